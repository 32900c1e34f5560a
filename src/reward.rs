// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Data-quality to reward mapping.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    Insufficient,
    Minimal,
    Low,
    Basic,
    Good,
    #[serde(rename = "Very Good")]
    VeryGood,
    Excellent,
    Perfect,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Insufficient => "Insufficient",
            Tier::Minimal => "Minimal",
            Tier::Low => "Low",
            Tier::Basic => "Basic",
            Tier::Good => "Good",
            Tier::VeryGood => "Very Good",
            Tier::Excellent => "Excellent",
            Tier::Perfect => "Perfect",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the step function: qualities at or above `min_quality` (and
/// below the next row's) earn `quantity`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TierThreshold {
    pub min_quality: i64,
    pub quantity: u64,
    pub tier: Tier,
}

/// Ascending by `min_quality`. The first row catches everything below 50.
pub const TIER_TABLE: [TierThreshold; 8] = [
    TierThreshold { min_quality: i64::MIN, quantity: 0, tier: Tier::Insufficient },
    TierThreshold { min_quality: 50, quantity: 10, tier: Tier::Minimal },
    TierThreshold { min_quality: 60, quantity: 15, tier: Tier::Low },
    TierThreshold { min_quality: 70, quantity: 20, tier: Tier::Basic },
    TierThreshold { min_quality: 80, quantity: 35, tier: Tier::Good },
    TierThreshold { min_quality: 90, quantity: 45, tier: Tier::VeryGood },
    TierThreshold { min_quality: 95, quantity: 60, tier: Tier::Excellent },
    TierThreshold { min_quality: 99, quantity: 100, tier: Tier::Perfect },
];

/// Lowest quality that mints anything.
pub const MINT_THRESHOLD: i64 = 50;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RewardTier {
    pub quantity: u64,
    pub tier: Tier,
}

impl RewardTier {
    pub fn is_mint_eligible(&self) -> bool {
        self.quantity > 0
    }
}

pub fn reward_for(data_quality: i64) -> RewardTier {
    let row = TIER_TABLE
        .iter()
        .rev()
        .find(|row| data_quality >= row.min_quality)
        .unwrap_or(&TIER_TABLE[0]);
    RewardTier { quantity: row.quantity, tier: row.tier }
}

/// Local mint precondition. Runs before any transaction is built.
pub fn ensure_mint_eligible(data_quality: i64) -> Result<RewardTier> {
    let reward = reward_for(data_quality);
    if !reward.is_mint_eligible() {
        return Err(KernelError::InsufficientQuality { data_quality, minimum: MINT_THRESHOLD });
    }
    Ok(reward)
}
