// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Boundary to the wallet / transaction-building SDK.
//!
//! Everything past this trait is a black box: UTXO selection, balancing,
//! signing, submission, and applying parameters to the compiled policy.

pub mod http;
pub mod offline;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use nrt_kernel::intent::TradeAction;
use nrt_kernel::types::token::{OutRef, PolicyId, SelectedToken, TxId};

pub use http::HttpLedger;
pub use offline::OfflineLedger;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("network error: {0}")]
    Network(String),
    #[error("rejected by wallet bridge ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("malformed response: {0}")]
    Decode(String),
    #[error("script error: {0}")]
    Script(String),
    #[error("submission failed: {0}")]
    Submission(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// A minting policy with its parameters applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterizedScript {
    pub script_hex: String,
    pub policy_id: PolicyId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintSubmission {
    pub policy: ParameterizedScript,
    pub unit: String,
    pub quantity: u64,
    pub redeemer_cbor: String,
    pub metadata_label: u64,
    pub metadata: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeSubmission {
    pub action: TradeAction,
    pub unit: String,
    pub quantity: u64,
    pub source_ref: OutRef,
    pub destination: String,
    pub redeemer_cbor: String,
}

#[async_trait]
pub trait Ledger: Send + Sync {
    /// Address of the connected wallet.
    async fn wallet_address(&self) -> LedgerResult<String>;

    /// Applies `params` to the compiled script and derives its policy id.
    async fn apply_params(&self, script_hex: &str, params: &[String]) -> LedgerResult<ParameterizedScript>;

    /// Native tokens currently held by the wallet.
    async fn wallet_tokens(&self) -> LedgerResult<Vec<SelectedToken>>;

    /// Builds, signs and submits the mint. Returns the transaction id.
    async fn submit_mint(&self, mint: &MintSubmission) -> LedgerResult<TxId>;

    async fn submit_trade(&self, trade: &TradeSubmission) -> LedgerResult<TxId>;

    fn backend_name(&self) -> &'static str;
}
