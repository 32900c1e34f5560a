// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use clap::ValueEnum;
use nrt_kernel::commitment::{self, CommitmentScheme};

use crate::record_file;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    /// timestamp, noiseLevel, location
    V1,
    /// timestamp, noiseLevel, location, dataQuality
    V2,
}

impl From<Scheme> for CommitmentScheme {
    fn from(s: Scheme) -> Self {
        match s {
            Scheme::V1 => CommitmentScheme::V1,
            Scheme::V2 => CommitmentScheme::V2,
        }
    }
}

/// Recomputes the commitment of a record file under the given scheme.
pub fn run(path: &Path, scheme: Scheme) -> anyhow::Result<()> {
    let record = record_file::read(path)?;
    let scheme = CommitmentScheme::from(scheme);

    let canonical = commitment::canonical_bytes_with(&record, scheme)?;
    let hash = commitment::commit_with(&record, scheme)?;

    println!("Canonical: {}", String::from_utf8_lossy(&canonical));
    println!("SHA-256:   {}", hash);
    Ok(())
}
