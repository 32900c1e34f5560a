// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::net::SocketAddr;

use nrt_kernel::config::{ASSET_NAME_MAX_LEN, DEFAULT_TOKEN_IMAGE, DEFAULT_TOKEN_NAME, NOISE_REDUCTION_SCRIPT_HEX};
use nrt_kernel::types::range::{SampleRange, SamplerConfig};

use crate::errors::NodeError;

/// Address reported by the offline ledger when none is configured.
pub const OFFLINE_WALLET_ADDRESS: &str = "addr_test1offline";

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    pub auth_token: Option<String>,
    /// Wallet bridge base URL. `None` runs against the in-memory ledger.
    pub ledger_url: Option<String>,
    pub offline_address: String,
    /// Market script address for sells. Unset falls back to the wallet address.
    pub market_address: Option<String>,
    pub token_name: String,
    pub token_image: String,
    pub script_hex: String,
    pub sampler: SamplerConfig,
    pub rng_seed: Option<u64>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            auth_token: None,
            ledger_url: None,
            offline_address: OFFLINE_WALLET_ADDRESS.to_string(),
            market_address: None,
            token_name: DEFAULT_TOKEN_NAME.to_string(),
            token_image: DEFAULT_TOKEN_IMAGE.to_string(),
            script_hex: NOISE_REDUCTION_SCRIPT_HEX.to_string(),
            sampler: SamplerConfig::default(),
            rng_seed: None,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `NRT_*` environment variables.
    pub fn from_env() -> Result<Self, NodeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, NodeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = NodeConfig::default();

        if let Some(addr) = lookup("NRT_BIND_ADDR") {
            cfg.bind_addr = addr
                .parse()
                .map_err(|_| NodeError::InvalidInput(format!("NRT_BIND_ADDR: bad socket address {:?}", addr)))?;
        }
        cfg.auth_token = lookup("NRT_AUTH_TOKEN").filter(|t| !t.is_empty());
        cfg.ledger_url = lookup("NRT_LEDGER_URL").filter(|u| !u.is_empty());
        cfg.market_address = lookup("NRT_MARKET_ADDRESS").filter(|a| !a.is_empty());
        if let Some(addr) = lookup("NRT_OFFLINE_ADDRESS") {
            cfg.offline_address = addr;
        }
        if let Some(name) = lookup("NRT_TOKEN_NAME").filter(|n| !n.is_empty()) {
            if name.len() > ASSET_NAME_MAX_LEN {
                return Err(NodeError::InvalidInput(format!(
                    "NRT_TOKEN_NAME must be at most {} bytes, got {}",
                    ASSET_NAME_MAX_LEN,
                    name.len()
                )));
            }
            cfg.token_name = name;
        }
        if let Some(image) = lookup("NRT_TOKEN_IMAGE") {
            cfg.token_image = image;
        }
        if let Some(script) = lookup("NRT_SCRIPT_HEX") {
            if hex::decode(&script).is_err() {
                return Err(NodeError::InvalidInput("NRT_SCRIPT_HEX is not valid hex".into()));
            }
            cfg.script_hex = script;
        }
        if let Some(range) = lookup("NRT_NOISE_RANGE") {
            cfg.sampler.noise_level = parse_range("NRT_NOISE_RANGE", &range)?;
        }
        if let Some(range) = lookup("NRT_QUALITY_RANGE") {
            cfg.sampler.data_quality = parse_range("NRT_QUALITY_RANGE", &range)?;
        }
        if let Some(seed) = lookup("NRT_RNG_SEED") {
            cfg.rng_seed = Some(
                seed.parse()
                    .map_err(|_| NodeError::InvalidInput(format!("NRT_RNG_SEED: not a u64: {:?}", seed)))?,
            );
        }

        Ok(cfg)
    }
}

fn parse_range(key: &str, raw: &str) -> Result<SampleRange, NodeError> {
    raw.parse::<SampleRange>()
        .map_err(|e| NodeError::InvalidInput(format!("{}: {}", key, e)))
}
