// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::path::Path;

use clap::ValueEnum;
use nrt_kernel::intent::{MintIntent, TradeAction, TradeRedeemer};
use nrt_kernel::plutus;
use nrt_kernel::types::token::OutRef;

use crate::record_file;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Action {
    Sell,
    Cancel,
    Buy,
}

impl From<Action> for TradeAction {
    fn from(a: Action) -> Self {
        match a {
            Action::Sell => TradeAction::Sell,
            Action::Cancel => TradeAction::Cancel,
            Action::Buy => TradeAction::Buy,
        }
    }
}

/// Prints the mint redeemer and CIP-25 fields for a sealed record.
pub fn mint(path: &Path, token_name: &str, image: &str) -> anyhow::Result<()> {
    let record = record_file::read(path)?;
    let intent = MintIntent::build(&record, token_name, image)?;

    println!("Script param: {}", intent.script_params.join(", "));
    println!("Asset name:   {} ({})", intent.asset_name, intent.asset_name_hex);
    println!("Quantity:     {} ({})", intent.quantity, intent.tier);
    println!("Redeemer:     {}", serde_json::to_string(&intent.redeemer)?);
    println!("CBOR:         {}", intent.redeemer_cbor);
    Ok(())
}

pub fn trade(action: Action, address: &str, out_ref: Option<OutRef>) -> anyhow::Result<()> {
    let redeemer = TradeRedeemer::new(action.into(), address, out_ref)?;
    let data = redeemer.to_data();

    println!("Redeemer: {}", serde_json::to_string(&data)?);
    println!("CBOR:     {}", plutus::to_hex(&data)?);
    Ok(())
}
