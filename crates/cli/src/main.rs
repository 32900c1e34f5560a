// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use nrt_cli::commands::commit::Scheme;
use nrt_cli::commands::generate::GenerateOptions;
use nrt_cli::commands::redeemer::Action;
use nrt_cli::commands::{commit, generate, redeemer, reward, tiers, verify};
use nrt_kernel::config::{DEFAULT_TOKEN_IMAGE, DEFAULT_TOKEN_NAME};
use nrt_kernel::types::range::SampleRange;
use nrt_kernel::types::token::OutRef;

#[derive(Parser)]
#[command(name = "nrt")]
#[command(about = "Noise Reduction Token CLI - sample, hash and inspect measurement records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and seal one simulated measurement
    Generate {
        /// Seed for a reproducible draw
        #[arg(long)]
        seed: Option<u64>,

        /// Noise level range in dB, e.g. 45..100
        #[arg(long)]
        noise: Option<SampleRange>,

        /// Data quality range in percent, e.g. 45..100
        #[arg(long)]
        quality: Option<SampleRange>,

        /// Use the wider 30..129 dB noise range of the first dashboard
        #[arg(long)]
        legacy: bool,

        /// Print the record as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Write the record to a file
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Show the reward step table
    Tiers,
    /// Look up the reward for one data quality value
    Reward {
        #[arg(allow_hyphen_values = true)]
        quality: i64,
    },
    /// Recompute the commitment of a record file
    Commit {
        record_path: PathBuf,

        #[arg(long, value_enum, default_value = "v2")]
        scheme: Scheme,
    },
    /// Check a record file against its stored hash
    Verify {
        record_path: PathBuf,
    },
    /// Build redeemers without touching a wallet
    Redeemer {
        #[command(subcommand)]
        kind: RedeemerKind,
    },
}

#[derive(Subcommand)]
enum RedeemerKind {
    /// Mint redeemer for a sealed record
    Mint {
        record_path: PathBuf,

        #[arg(long, default_value = DEFAULT_TOKEN_NAME)]
        token_name: String,

        #[arg(long, default_value = DEFAULT_TOKEN_IMAGE)]
        image: String,
    },
    /// Marketplace redeemer
    Trade {
        #[arg(value_enum)]
        action: Action,

        /// Wallet address placed in the redeemer
        #[arg(long)]
        address: String,

        /// Listing to buy, as txHash#index
        #[arg(long)]
        out_ref: Option<OutRef>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            seed,
            noise,
            quality,
            legacy,
            json,
            out,
        } => generate::run(
            GenerateOptions { seed, noise, quality, legacy },
            json,
            out.as_deref(),
        ),
        Commands::Tiers => tiers::run(),
        Commands::Reward { quality } => reward::run(quality),
        Commands::Commit { record_path, scheme } => commit::run(&record_path, scheme),
        Commands::Verify { record_path } => verify::run(&record_path),
        Commands::Redeemer { kind } => match kind {
            RedeemerKind::Mint {
                record_path,
                token_name,
                image,
            } => redeemer::mint(&record_path, &token_name, &image),
            RedeemerKind::Trade {
                action,
                address,
                out_ref,
            } => redeemer::trade(action, &address, out_ref),
        },
    }
}
