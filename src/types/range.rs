// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Sampling ranges.

use core::fmt;
use core::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{
    DATA_QUALITY_MAX, DATA_QUALITY_MIN, LEGACY_NOISE_LEVEL_MAX, LEGACY_NOISE_LEVEL_MIN,
    NOISE_LEVEL_MAX, NOISE_LEVEL_MIN,
};
use crate::error::{KernelError, Result};

/// Inclusive integer range. Always `min <= max`, including after deserializing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct SampleRange {
    min: i64,
    max: i64,
}

#[derive(Deserialize)]
struct RawRange {
    min: i64,
    max: i64,
}

impl TryFrom<RawRange> for SampleRange {
    type Error = KernelError;

    fn try_from(raw: RawRange) -> Result<Self> {
        SampleRange::new(raw.min, raw.max)
    }
}

impl SampleRange {
    pub fn new(min: i64, max: i64) -> Result<Self> {
        if min > max {
            return Err(KernelError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min..=self.max)
    }
}

impl fmt::Display for SampleRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Parses `min..max` (both inclusive).
impl FromStr for SampleRange {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self> {
        let (lo, hi) = s
            .split_once("..")
            .ok_or_else(|| KernelError::Encoding(format!("expected min..max, got {:?}", s)))?;
        let min = lo
            .trim()
            .parse()
            .map_err(|_| KernelError::Encoding(format!("bad range start {:?}", lo)))?;
        let max = hi
            .trim()
            .trim_start_matches('=')
            .parse()
            .map_err(|_| KernelError::Encoding(format!("bad range end {:?}", hi)))?;
        SampleRange::new(min, max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplerConfig {
    pub noise_level: SampleRange,
    pub data_quality: SampleRange,
}

impl SamplerConfig {
    /// Ranges from the first dashboard revision (noise level 30..=129).
    pub fn legacy() -> Self {
        Self {
            noise_level: SampleRange { min: LEGACY_NOISE_LEVEL_MIN, max: LEGACY_NOISE_LEVEL_MAX },
            ..Self::default()
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            noise_level: SampleRange { min: NOISE_LEVEL_MIN, max: NOISE_LEVEL_MAX },
            data_quality: SampleRange { min: DATA_QUALITY_MIN, max: DATA_QUALITY_MAX },
        }
    }
}
