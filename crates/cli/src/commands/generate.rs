// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use nrt_kernel::commitment;
use nrt_kernel::reward::reward_for;
use nrt_kernel::sampler::SampleGenerator;
use nrt_kernel::types::range::{SampleRange, SamplerConfig};
use nrt_kernel::types::record::MeasurementRecord;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::record_file;

pub struct GenerateOptions {
    pub seed: Option<u64>,
    pub noise: Option<SampleRange>,
    pub quality: Option<SampleRange>,
    pub legacy: bool,
}

/// Draws one sealed record.
pub fn sample(opts: &GenerateOptions) -> anyhow::Result<MeasurementRecord> {
    let mut config = if opts.legacy { SamplerConfig::legacy() } else { SamplerConfig::default() };
    if let Some(noise) = opts.noise {
        config.noise_level = noise;
    }
    if let Some(quality) = opts.quality {
        config.data_quality = quality;
    }

    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let record = SampleGenerator::new(config).generate(&mut rng);
    Ok(commitment::seal(record)?)
}

pub fn run(opts: GenerateOptions, json: bool, out: Option<&Path>) -> anyhow::Result<()> {
    let record = sample(&opts)?;

    if let Some(path) = out {
        record_file::write(path, &record)?;
        println!("Wrote record to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    let reward = reward_for(record.data_quality());
    let hash = record.hash().map(|h| h.to_hex()).unwrap_or_default();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Timestamp".to_string(), record.timestamp().to_string()]);
    table.add_row(vec!["Noise Level".to_string(), format!("{} dB", record.noise_level())]);
    table.add_row(vec!["Location".to_string(), record.location().to_string()]);
    table.add_row(vec!["Data Quality".to_string(), format!("{}%", record.data_quality())]);
    table.add_row(vec!["Hash".to_string(), hash]);
    table.add_row(vec!["Reward".to_string(), format!("{} ({})", reward.quantity, reward.tier)]);

    println!("\nMeasurement\n");
    println!("{table}\n");

    if !reward.is_mint_eligible() {
        println!("⚠️  Data quality below mint threshold; this record cannot be minted.\n");
    }

    Ok(())
}
