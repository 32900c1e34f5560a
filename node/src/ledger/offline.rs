// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory dry-run ledger.
//!
//! Nothing is signed or broadcast. Policy ids and transaction ids are BLAKE3
//! digests of the request, so identical submissions get identical ids within a
//! run. Holdings are tracked so token listing and trading can be exercised
//! without a wallet.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use nrt_kernel::config::POLICY_ID_HEX_LEN;
use nrt_kernel::intent::TradeAction;
use nrt_kernel::types::token::{OutRef, PolicyId, SelectedToken, TxId};

use super::{Ledger, LedgerError, LedgerResult, MintSubmission, ParameterizedScript, TradeSubmission};

#[derive(Default)]
struct OfflineState {
    holdings: Vec<SelectedToken>,
    mints: Vec<MintSubmission>,
    trades: Vec<TradeSubmission>,
    calls: u64,
    nonce: u64,
}

pub struct OfflineLedger {
    address: String,
    state: Mutex<OfflineState>,
}

impl OfflineLedger {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            state: Mutex::new(OfflineState::default()),
        }
    }

    /// Seeds the wallet with a token, as if received earlier.
    pub fn with_holding(self, token: SelectedToken) -> Self {
        self.lock().holdings.push(token);
        self
    }

    pub fn mints(&self) -> Vec<MintSubmission> {
        self.lock().mints.clone()
    }

    pub fn trades(&self) -> Vec<TradeSubmission> {
        self.lock().trades.clone()
    }

    /// Number of ledger calls made so far, of any kind.
    pub fn call_count(&self) -> u64 {
        self.lock().calls
    }

    fn lock(&self) -> MutexGuard<'_, OfflineState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tx_id(state: &mut OfflineState, kind: &[u8], body: &[u8]) -> TxId {
        state.nonce += 1;
        let mut hasher = blake3::Hasher::new();
        hasher.update(kind);
        hasher.update(&state.nonce.to_le_bytes());
        hasher.update(body);
        TxId(hasher.finalize().to_hex().to_string())
    }
}

#[async_trait]
impl Ledger for OfflineLedger {
    async fn wallet_address(&self) -> LedgerResult<String> {
        self.lock().calls += 1;
        Ok(self.address.clone())
    }

    async fn apply_params(&self, script_hex: &str, params: &[String]) -> LedgerResult<ParameterizedScript> {
        self.lock().calls += 1;
        let script = hex::decode(script_hex).map_err(|e| LedgerError::Script(e.to_string()))?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(&script);
        for p in params {
            hasher.update(&(p.len() as u32).to_le_bytes());
            hasher.update(p.as_bytes());
        }
        let digest = hasher.finalize().to_hex();
        let policy_id = PolicyId::new(&digest[..POLICY_ID_HEX_LEN])
            .map_err(|e| LedgerError::Script(e.to_string()))?;

        Ok(ParameterizedScript { script_hex: script_hex.to_string(), policy_id })
    }

    async fn wallet_tokens(&self) -> LedgerResult<Vec<SelectedToken>> {
        let mut state = self.lock();
        state.calls += 1;
        Ok(state.holdings.clone())
    }

    async fn submit_mint(&self, mint: &MintSubmission) -> LedgerResult<TxId> {
        let body = serde_json::to_vec(mint).map_err(|e| LedgerError::Submission(e.to_string()))?;
        let mut state = self.lock();
        state.calls += 1;

        let tx_id = Self::tx_id(&mut state, b"mint", &body);
        let token = SelectedToken::from_unit(OutRef::new(tx_id.0.clone(), 0), &mint.unit, mint.quantity)
            .map_err(|e| LedgerError::Submission(e.to_string()))?;
        state.holdings.push(token);
        state.mints.push(mint.clone());

        tracing::debug!("offline mint {} of {} -> {}", mint.quantity, mint.unit, tx_id);
        Ok(tx_id)
    }

    async fn submit_trade(&self, trade: &TradeSubmission) -> LedgerResult<TxId> {
        let body = serde_json::to_vec(trade).map_err(|e| LedgerError::Submission(e.to_string()))?;
        let mut state = self.lock();
        state.calls += 1;

        let tx_id = Self::tx_id(&mut state, b"trade", &body);
        match trade.action {
            TradeAction::Sell => {
                let before = state.holdings.len();
                state
                    .holdings
                    .retain(|t| !(t.source_ref == trade.source_ref && t.asset_unit == trade.unit));
                if state.holdings.len() == before {
                    return Err(LedgerError::Submission(format!(
                        "output {} does not hold {}",
                        trade.source_ref, trade.unit
                    )));
                }
            }
            TradeAction::Cancel | TradeAction::Buy => {
                let token = SelectedToken::from_unit(OutRef::new(tx_id.0.clone(), 0), &trade.unit, trade.quantity)
                    .map_err(|e| LedgerError::Submission(e.to_string()))?;
                state.holdings.push(token);
            }
        }
        state.trades.push(trade.clone());

        tracing::debug!("offline {:?} of {} -> {}", trade.action, trade.unit, tx_id);
        Ok(tx_id)
    }

    fn backend_name(&self) -> &'static str {
        "offline"
    }
}
