// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::fs;
use std::path::Path;

use anyhow::Context;
use nrt_kernel::types::record::MeasurementRecord;

pub fn read(path: &Path) -> anyhow::Result<MeasurementRecord> {
    let raw = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let record = serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))?;
    Ok(record)
}

pub fn write(path: &Path, record: &MeasurementRecord) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(record)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
