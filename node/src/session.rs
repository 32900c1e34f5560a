// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Dashboard session: the one owner of per-user state.
//!
//! Holds a single current record, the last wallet token listing and the
//! selection. Actions that reach the ledger copy what they need under the
//! lock, release it, and only then await the ledger. A generation that lands
//! while a mint is in flight therefore does not stop the older record from
//! being minted; that race is accepted.

use std::sync::Arc;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::sync::Mutex;

use nrt_kernel::commitment::seal;
use nrt_kernel::intent::{MintIntent, TradeAction, TradeIntent};
use nrt_kernel::reward::{ensure_mint_eligible, reward_for, RewardTier, Tier};
use nrt_kernel::sampler::SampleGenerator;
use nrt_kernel::types::range::SamplerConfig;
use nrt_kernel::types::record::{Commitment, MeasurementRecord};
use nrt_kernel::types::token::{OutRef, PolicyId, SelectedToken, TxId};

use crate::config::NodeConfig;
use crate::errors::{NodeError, NodeResult};
use crate::ledger::{Ledger, MintSubmission, TradeSubmission};

pub type SharedSession = Arc<Mutex<DashboardSession>>;

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub sampler: SamplerConfig,
    pub token_name: String,
    pub token_image: String,
    pub script_hex: String,
    pub market_address: Option<String>,
}

impl From<&NodeConfig> for SessionSettings {
    fn from(cfg: &NodeConfig) -> Self {
        Self {
            sampler: cfg.sampler,
            token_name: cfg.token_name.clone(),
            token_image: cfg.token_image.clone(),
            script_hex: cfg.script_hex.clone(),
            market_address: cfg.market_address.clone(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings::from(&NodeConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Mint,
    Trade,
    RefreshTokens,
}

/// What the last ledger-bound action ended in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum ActionOutcome {
    Succeeded { action: ActionKind, detail: String },
    Failed { action: ActionKind, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintReceipt {
    pub tx_id: TxId,
    pub policy_id: PolicyId,
    pub unit: String,
    pub quantity: u64,
    pub tier: Tier,
    pub data_hash: Commitment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeReceipt {
    pub tx_id: TxId,
    pub action: TradeAction,
    pub unit: String,
    pub destination: String,
}

/// Everything a mint needs, copied out of the session.
#[derive(Debug, Clone)]
pub struct PreparedMint {
    pub record: MeasurementRecord,
    pub intent: MintIntent,
    pub script_hex: String,
}

#[derive(Debug, Clone)]
pub struct PreparedTrade {
    pub action: TradeAction,
    pub token: SelectedToken,
    pub out_ref: Option<OutRef>,
    pub market_address: Option<String>,
}

pub struct DashboardSession {
    settings: SessionSettings,
    generator: SampleGenerator,
    rng: StdRng,
    current: Option<MeasurementRecord>,
    tokens: Vec<SelectedToken>,
    selected: Option<SelectedToken>,
    in_flight: u32,
    last_outcome: Option<ActionOutcome>,
}

impl DashboardSession {
    pub fn new(settings: SessionSettings, rng: StdRng) -> Self {
        Self {
            generator: SampleGenerator::new(settings.sampler),
            settings,
            rng,
            current: None,
            tokens: Vec::new(),
            selected: None,
            in_flight: 0,
            last_outcome: None,
        }
    }

    pub fn from_config(cfg: &NodeConfig) -> Self {
        let rng = match cfg.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(SessionSettings::from(cfg), rng)
    }

    pub fn into_shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Generates and seals a new record with the session's own random source.
    pub fn generate(&mut self) -> NodeResult<&MeasurementRecord> {
        let record = self.generator.generate(&mut self.rng);
        self.install(record)
    }

    pub fn generate_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NodeResult<&MeasurementRecord> {
        let record = self.generator.generate(rng);
        self.install(record)
    }

    /// Replaces the current record. Used when a record arrives from outside
    /// the generator (tests, imports); it is sealed here if it is not yet.
    pub fn install(&mut self, record: MeasurementRecord) -> NodeResult<&MeasurementRecord> {
        let record = if record.is_sealed() { record } else { seal(record)? };
        metrics::increment_counter!("nrt_samples_generated_total");
        tracing::debug!(
            "record generated: quality={} noise={} hash={:?}",
            record.data_quality(),
            record.noise_level(),
            record.hash()
        );
        Ok(self.current.insert(record))
    }

    pub fn current(&self) -> Option<&MeasurementRecord> {
        self.current.as_ref()
    }

    /// Recomputed from the current record on every call.
    pub fn reward(&self) -> Option<RewardTier> {
        self.current.as_ref().map(|r| reward_for(r.data_quality()))
    }

    pub fn tokens(&self) -> &[SelectedToken] {
        &self.tokens
    }

    pub fn selected(&self) -> Option<&SelectedToken> {
        self.selected.as_ref()
    }

    pub fn in_flight(&self) -> u32 {
        self.in_flight
    }

    pub fn last_outcome(&self) -> Option<&ActionOutcome> {
        self.last_outcome.as_ref()
    }

    /// Runs every local mint precondition. Nothing here touches the ledger.
    pub fn prepare_mint(&self) -> NodeResult<PreparedMint> {
        let record = self.current.clone().ok_or(NodeError::NoRecord)?;
        if let Err(e) = ensure_mint_eligible(record.data_quality()) {
            metrics::increment_counter!("nrt_mints_refused_total");
            tracing::info!("mint refused locally: {}", e);
            return Err(e.into());
        }
        let intent = MintIntent::build(&record, &self.settings.token_name, &self.settings.token_image)?;
        Ok(PreparedMint { record, intent, script_hex: self.settings.script_hex.clone() })
    }

    pub fn prepare_trade(&self, action: TradeAction, out_ref: Option<OutRef>) -> NodeResult<PreparedTrade> {
        let token = self.selected.clone().ok_or(NodeError::NoTokenSelected)?;
        Ok(PreparedTrade {
            action,
            token,
            out_ref,
            market_address: self.settings.market_address.clone(),
        })
    }

    /// Replaces the listing wholesale. A selection that vanished is dropped.
    pub fn replace_tokens(&mut self, tokens: Vec<SelectedToken>) {
        if let Some(sel) = &self.selected {
            let still_held = tokens
                .iter()
                .any(|t| t.asset_unit == sel.asset_unit && t.source_ref == sel.source_ref);
            if !still_held {
                tracing::debug!("selection {} no longer held, clearing", sel.asset_unit);
                self.selected = None;
            }
        }
        self.tokens = tokens;
    }

    /// Selects by unit; `source_ref` disambiguates when the unit sits in
    /// several outputs, otherwise the first match wins.
    pub fn select_token(&mut self, unit: &str, source_ref: Option<&OutRef>) -> NodeResult<&SelectedToken> {
        let unit = unit.to_ascii_lowercase();
        let found = self
            .tokens
            .iter()
            .find(|t| t.asset_unit == unit && source_ref.map_or(true, |r| &t.source_ref == r))
            .cloned()
            .ok_or_else(|| NodeError::UnknownToken(unit.clone()))?;
        Ok(self.selected.insert(found))
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    fn begin(&mut self) {
        self.in_flight += 1;
    }

    fn finish(&mut self, outcome: ActionOutcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.last_outcome = Some(outcome);
    }
}

/// Applies the commitment to the policy, then builds, signs and submits.
pub async fn execute_mint(ledger: &dyn Ledger, prepared: &PreparedMint) -> NodeResult<MintReceipt> {
    let started = Instant::now();
    let intent = &prepared.intent;

    let policy = ledger.apply_params(&prepared.script_hex, &intent.script_params).await?;
    let unit = intent.unit(&policy.policy_id);
    let submission = MintSubmission {
        unit: unit.clone(),
        quantity: intent.quantity,
        redeemer_cbor: intent.redeemer_cbor.clone(),
        metadata_label: intent.metadata_label(),
        metadata: intent.metadata(&policy.policy_id),
        policy: policy.clone(),
    };
    let tx_id = ledger.submit_mint(&submission).await?;

    metrics::histogram!("nrt_ledger_call_duration_seconds", started.elapsed().as_secs_f64());
    metrics::increment_counter!("nrt_mints_submitted_total");
    tracing::info!("minted {} x {} ({}) in {}", intent.quantity, unit, intent.tier, tx_id);

    Ok(MintReceipt {
        tx_id,
        policy_id: policy.policy_id,
        unit,
        quantity: intent.quantity,
        tier: intent.tier,
        data_hash: intent.data_hash,
    })
}

pub async fn execute_trade(ledger: &dyn Ledger, prepared: &PreparedTrade) -> NodeResult<TradeReceipt> {
    let started = Instant::now();
    let wallet_address = ledger.wallet_address().await?;

    let destination = match (prepared.action, &prepared.market_address) {
        (TradeAction::Sell, Some(market)) => market.clone(),
        (TradeAction::Sell, None) => {
            tracing::warn!("no market address configured; selling to the wallet's own address");
            wallet_address.clone()
        }
        (TradeAction::Cancel | TradeAction::Buy, _) => wallet_address.clone(),
    };

    let intent = TradeIntent::build(
        prepared.action,
        prepared.token.clone(),
        &wallet_address,
        &destination,
        prepared.out_ref.clone(),
    )?;
    let submission = TradeSubmission {
        action: intent.action,
        unit: intent.token.asset_unit.clone(),
        quantity: intent.token.quantity,
        source_ref: intent.token.source_ref.clone(),
        destination: intent.destination.clone(),
        redeemer_cbor: intent.redeemer_cbor.clone(),
    };
    let tx_id = ledger.submit_trade(&submission).await?;

    metrics::histogram!("nrt_ledger_call_duration_seconds", started.elapsed().as_secs_f64());
    metrics::increment_counter!("nrt_trades_submitted_total");
    tracing::info!("{:?} {} -> {} in {}", prepared.action, submission.unit, destination, tx_id);

    Ok(TradeReceipt { tx_id, action: prepared.action, unit: submission.unit, destination })
}

/// Mint against the shared session. Preconditions are checked under the lock;
/// the ledger is awaited without it.
pub async fn mint(session: &SharedSession, ledger: &dyn Ledger) -> NodeResult<MintReceipt> {
    let prepared = {
        let mut s = session.lock().await;
        let prepared = s.prepare_mint()?;
        s.begin();
        prepared
    };

    let result = execute_mint(ledger, &prepared).await;

    let mut s = session.lock().await;
    s.finish(match &result {
        Ok(r) => ActionOutcome::Succeeded { action: ActionKind::Mint, detail: r.tx_id.to_string() },
        Err(e) => {
            tracing::error!("mint failed: {}", e);
            ActionOutcome::Failed { action: ActionKind::Mint, message: e.to_string() }
        }
    });
    result
}

pub async fn trade(
    session: &SharedSession,
    ledger: &dyn Ledger,
    action: TradeAction,
    out_ref: Option<OutRef>,
) -> NodeResult<TradeReceipt> {
    let prepared = {
        let mut s = session.lock().await;
        let prepared = s.prepare_trade(action, out_ref)?;
        s.begin();
        prepared
    };

    let result = execute_trade(ledger, &prepared).await;

    let mut s = session.lock().await;
    s.finish(match &result {
        Ok(r) => ActionOutcome::Succeeded { action: ActionKind::Trade, detail: r.tx_id.to_string() },
        Err(e) => {
            tracing::error!("trade failed: {}", e);
            ActionOutcome::Failed { action: ActionKind::Trade, message: e.to_string() }
        }
    });
    result
}

pub async fn refresh_tokens(session: &SharedSession, ledger: &dyn Ledger) -> NodeResult<Vec<SelectedToken>> {
    session.lock().await.begin();

    let result = ledger.wallet_tokens().await;

    let mut s = session.lock().await;
    match result {
        Ok(tokens) => {
            tracing::debug!("wallet holds {} token outputs", tokens.len());
            s.replace_tokens(tokens.clone());
            s.finish(ActionOutcome::Succeeded {
                action: ActionKind::RefreshTokens,
                detail: format!("{} tokens", tokens.len()),
            });
            Ok(tokens)
        }
        Err(e) => {
            tracing::error!("token refresh failed: {}", e);
            s.finish(ActionOutcome::Failed { action: ActionKind::RefreshTokens, message: e.to_string() });
            Err(e.into())
        }
    }
}
