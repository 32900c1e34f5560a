// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use nrt_kernel::commitment;

use crate::record_file;

pub fn run(path: &Path) -> anyhow::Result<()> {
    let record = record_file::read(path)?;

    let stored = match record.hash() {
        Some(h) => h.to_hex(),
        None => anyhow::bail!("{} carries no hash", path.display()),
    };
    let computed = commitment::commit(&record)?.to_hex();

    println!("Stored:   {}", stored);
    println!("Computed: {}", computed);

    if !commitment::verify(&record) {
        anyhow::bail!("❌ Hash mismatch: record was modified after sealing");
    }

    println!("✅ Record integrity verified");
    Ok(())
}
