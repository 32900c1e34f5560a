// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Commitment hashing.
//!
//! The canonical form is compact JSON with keys in the order
//! `timestamp, noiseLevel, location, dataQuality`, byte-identical to what a
//! browser's `JSON.stringify` produces for the same object literal. The
//! minting policy is parameterized on the SHA-256 of those bytes, so the key
//! order and the set of keys are part of the on-chain contract.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{KernelError, Result};
use crate::types::record::{Commitment, MeasurementRecord};

/// Which fields a commitment covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CommitmentScheme {
    /// `timestamp, noiseLevel, location` as hashed by the first dashboard.
    V1,
    /// `timestamp, noiseLevel, location, dataQuality`.
    #[default]
    V2,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalV1<'a> {
    timestamp: &'a str,
    noise_level: i64,
    location: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CanonicalV2<'a> {
    timestamp: &'a str,
    noise_level: i64,
    location: &'a str,
    data_quality: i64,
}

pub fn canonical_bytes_with(record: &MeasurementRecord, scheme: CommitmentScheme) -> Result<Vec<u8>> {
    let encoded = match scheme {
        CommitmentScheme::V1 => serde_json::to_vec(&CanonicalV1 {
            timestamp: record.timestamp(),
            noise_level: record.noise_level(),
            location: record.location(),
        }),
        CommitmentScheme::V2 => serde_json::to_vec(&CanonicalV2 {
            timestamp: record.timestamp(),
            noise_level: record.noise_level(),
            location: record.location(),
            data_quality: record.data_quality(),
        }),
    };
    encoded.map_err(|e| KernelError::Encoding(e.to_string()))
}

pub fn canonical_bytes(record: &MeasurementRecord) -> Result<Vec<u8>> {
    canonical_bytes_with(record, CommitmentScheme::V2)
}

pub fn commit_with(record: &MeasurementRecord, scheme: CommitmentScheme) -> Result<Commitment> {
    let bytes = canonical_bytes_with(record, scheme)?;
    let digest = Sha256::digest(&bytes);
    Ok(Commitment(digest.into()))
}

/// Computes the commitment of the four measured fields. Ignores any attached hash.
pub fn commit(record: &MeasurementRecord) -> Result<Commitment> {
    commit_with(record, CommitmentScheme::V2)
}

/// Attaches the commitment. A record is sealed once; resealing is an error.
pub fn seal(record: MeasurementRecord) -> Result<MeasurementRecord> {
    if record.is_sealed() {
        return Err(KernelError::HashAlreadySet);
    }
    let commitment = commit(&record)?;
    record.attach(commitment)
}

/// True when the attached hash matches the record's fields.
pub fn verify(record: &MeasurementRecord) -> bool {
    match (record.hash(), commit(record)) {
        (Some(attached), Ok(computed)) => *attached == computed,
        _ => false,
    }
}
