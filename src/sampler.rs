// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Synthetic noise-sensor sample generation.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::{LATITUDE_BOUND, LONGITUDE_BOUND};
use crate::types::range::SamplerConfig;
use crate::types::record::{format_location, format_timestamp, MeasurementRecord};

/// Produces unsealed [`MeasurementRecord`]s from an injected random source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleGenerator {
    config: SamplerConfig,
}

impl SampleGenerator {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> MeasurementRecord {
        self.generate_at(rng, Utc::now())
    }

    /// Draw order is fixed (noise level, latitude, longitude, data quality) so
    /// a seeded source always yields the same record.
    pub fn generate_at<R: Rng + ?Sized>(&self, rng: &mut R, now: DateTime<Utc>) -> MeasurementRecord {
        let noise_level = self.config.noise_level.sample(rng);
        let latitude = rng.gen_range(-LATITUDE_BOUND..=LATITUDE_BOUND);
        let longitude = rng.gen_range(-LONGITUDE_BOUND..=LONGITUDE_BOUND);
        let data_quality = self.config.data_quality.sample(rng);

        MeasurementRecord::new(
            format_timestamp(now),
            noise_level,
            format_location(latitude, longitude),
            data_quality,
        )
    }
}
