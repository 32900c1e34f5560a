// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Error types.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KernelError {
    /// Range bounds are inverted.
    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },
    /// A record can be sealed exactly once.
    #[error("record already carries a commitment hash")]
    HashAlreadySet,
    /// Minting needs a sealed record.
    #[error("record has no commitment hash")]
    MissingCommitment,
    /// Data quality below the mint threshold.
    #[error("insufficient data quality: {data_quality} (minimum {minimum})")]
    InsufficientQuality { data_quality: i64, minimum: i64 },
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid policy id: {0}")]
    InvalidPolicyId(String),
    #[error("invalid asset unit: {0}")]
    InvalidUnit(String),
    #[error("invalid trade: {0}")]
    InvalidTrade(String),
    #[error("encoding failed: {0}")]
    Encoding(String),
}

pub type KernelResult<T> = core::result::Result<T, KernelError>;
pub type Result<T> = KernelResult<T>;
