// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use serde::{Deserialize, Serialize};

use nrt_kernel::intent::TradeAction;
use nrt_kernel::reward::{RewardTier, Tier, TierThreshold};
use nrt_kernel::types::record::MeasurementRecord;
use nrt_kernel::types::token::{OutRef, SelectedToken};

use crate::session::ActionOutcome;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SampleResponse {
    pub record: MeasurementRecord,
    pub quantity: u64,
    pub tier: Tier,
    pub mint_eligible: bool,
}

impl SampleResponse {
    pub fn new(record: MeasurementRecord, reward: RewardTier) -> Self {
        Self {
            record,
            quantity: reward.quantity,
            tier: reward.tier,
            mint_eligible: reward.is_mint_eligible(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RewardResponse {
    pub data_quality: i64,
    pub quantity: u64,
    pub tier: Tier,
    pub mint_eligible: bool,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TierRow {
    /// Inclusive lower bound; absent for the catch-all bottom tier.
    pub min_quality: Option<i64>,
    pub quantity: u64,
    pub tier: Tier,
}

impl From<&TierThreshold> for TierRow {
    fn from(t: &TierThreshold) -> Self {
        Self {
            min_quality: (t.min_quality != i64::MIN).then_some(t.min_quality),
            quantity: t.quantity,
            tier: t.tier,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TierListResponse {
    pub tiers: Vec<TierRow>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TokenListResponse {
    pub tokens: Vec<SelectedToken>,
    pub selected: Option<SelectedToken>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SelectTokenRequest {
    pub unit: String,
    #[serde(default)]
    pub source_ref: Option<OutRef>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SelectTokenResponse {
    pub token: SelectedToken,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub action: TradeAction,
    /// The listed output being purchased; buys only.
    #[serde(default)]
    pub out_ref: Option<OutRef>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub record: Option<MeasurementRecord>,
    pub reward: Option<RewardTier>,
    pub token_count: usize,
    pub selected: Option<SelectedToken>,
    pub in_flight: u32,
    pub last_outcome: Option<ActionOutcome>,
    pub ledger: &'static str,
}
