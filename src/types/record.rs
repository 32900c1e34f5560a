// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Measurement records and their commitments.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::{COMMITMENT_LEN, COORDINATE_DECIMALS};
use crate::error::{KernelError, Result};

/// SHA-256 digest binding a record's four measured fields.
///
/// Displays and serializes as 64 lowercase hex characters; that string is the
/// parameter applied to the minting policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment(pub [u8; COMMITMENT_LEN]);

impl Commitment {
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != COMMITMENT_LEN * 2 {
            return Err(KernelError::InvalidHex(format!(
                "commitment must be {} hex chars, got {}",
                COMMITMENT_LEN * 2,
                s.len()
            )));
        }
        let mut out = [0u8; COMMITMENT_LEN];
        hex::decode_to_slice(s, &mut out).map_err(|e| KernelError::InvalidHex(e.to_string()))?;
        Ok(Commitment(out))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", self.to_hex())
    }
}

impl FromStr for Commitment {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        Commitment::from_hex(s)
    }
}

impl Serialize for Commitment {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Commitment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Commitment::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// One synthetic noise-sensor reading.
///
/// Fields are fixed at construction. The commitment is attached once by
/// [`crate::commitment::seal`]; a new reading supersedes the old one rather
/// than mutating it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementRecord {
    timestamp: String,
    noise_level: i64,
    location: String,
    data_quality: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hash: Option<Commitment>,
}

impl MeasurementRecord {
    pub fn new(
        timestamp: impl Into<String>,
        noise_level: i64,
        location: impl Into<String>,
        data_quality: i64,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            noise_level,
            location: location.into(),
            data_quality,
            hash: None,
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn noise_level(&self) -> i64 {
        self.noise_level
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn data_quality(&self) -> i64 {
        self.data_quality
    }

    pub fn hash(&self) -> Option<&Commitment> {
        self.hash.as_ref()
    }

    pub fn is_sealed(&self) -> bool {
        self.hash.is_some()
    }

    /// Parses `location` back into `(latitude, longitude)`.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lon) = self.location.split_once(", ")?;
        Some((lat.parse().ok()?, lon.parse().ok()?))
    }

    pub(crate) fn attach(mut self, commitment: Commitment) -> Result<Self> {
        if self.hash.is_some() {
            return Err(KernelError::HashAlreadySet);
        }
        self.hash = Some(commitment);
        Ok(self)
    }
}

/// ISO-8601 UTC with milliseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Formats one coordinate with a fixed number of decimals.
///
/// Negative zero prints without a sign, tiny negative values keep theirs.
/// Exact halfway values round away from zero, matching `Number.toFixed`.
pub fn format_coordinate(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    let scale = 10_i64.pow(COORDINATE_DECIMALS as u32);
    // At four decimals a double sits exactly on a tie only when it is an odd
    // multiple of 1/32; both products below are exact.
    let thirty_seconds = value * 32.0;
    if thirty_seconds.fract() == 0.0 && thirty_seconds % 2.0 != 0.0 {
        let units = (value * scale as f64).round() as i64;
        let sign = if units < 0 { "-" } else { "" };
        let abs = units.unsigned_abs();
        let scale = scale as u64;
        return format!(
            "{}{}.{:0width$}",
            sign,
            abs / scale,
            abs % scale,
            width = COORDINATE_DECIMALS
        );
    }
    format!("{:.*}", COORDINATE_DECIMALS, value)
}

pub fn format_location(latitude: f64, longitude: f64) -> String {
    format!("{}, {}", format_coordinate(latitude), format_coordinate(longitude))
}
