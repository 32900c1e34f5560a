use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use nrt_kernel::error::KernelError;
use nrt_kernel::intent::TradeAction;
use nrt_kernel::reward::Tier;
use nrt_kernel::types::range::{SampleRange, SamplerConfig};
use nrt_kernel::types::record::MeasurementRecord;
use nrt_kernel::types::token::{OutRef, SelectedToken};
use nrt_node::errors::NodeError;
use nrt_node::ledger::{Ledger, OfflineLedger};
use nrt_node::session::{self, ActionOutcome, DashboardSession, SessionSettings};

fn session_with_quality(q: i64) -> DashboardSession {
    let settings = SessionSettings {
        sampler: SamplerConfig {
            data_quality: SampleRange::new(q, q).unwrap(),
            ..SamplerConfig::default()
        },
        ..SessionSettings::default()
    };
    DashboardSession::new(settings, StdRng::seed_from_u64(1))
}

fn held_token(tx: &str, name: &str) -> SelectedToken {
    let unit = format!("{}{}", "ab".repeat(28), hex::encode(name));
    SelectedToken::from_unit(OutRef::new(tx.repeat(32), 0), &unit, 10).unwrap()
}

#[test]
fn test_generate_replaces_single_slot() {
    let mut s = session_with_quality(80);
    assert!(s.current().is_none());
    assert!(s.reward().is_none());

    let first = s.generate().unwrap().clone();
    assert!(first.hash().is_some());
    let second = s.generate().unwrap().clone();

    assert_ne!(first, second);
    assert_eq!(s.current(), Some(&second));
    assert_eq!(s.reward().unwrap().tier, Tier::Good);
}

#[test]
fn test_install_seals_unsealed_record() {
    let mut s = session_with_quality(80);
    let rec = MeasurementRecord::new("2025-01-01T00:00:00.000Z", 70, "1.0000, 2.0000", 99);
    let installed = s.install(rec).unwrap();
    assert!(installed.is_sealed());
    assert_eq!(s.reward().unwrap().quantity, 100);
}

#[tokio::test]
async fn test_mint_without_record_is_precondition_failure() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(90).into_shared();

    let err = session::mint(&shared, &ledger).await.unwrap_err();
    assert!(matches!(err, NodeError::NoRecord));
    assert_eq!(ledger.call_count(), 0);
}

#[tokio::test]
async fn test_quality_49_refused_before_any_ledger_call() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(49).into_shared();
    shared.lock().await.generate().unwrap();

    let err = session::mint(&shared, &ledger).await.unwrap_err();
    assert!(matches!(
        err,
        NodeError::Kernel(KernelError::InsufficientQuality { data_quality: 49, .. })
    ));
    assert_eq!(ledger.call_count(), 0);
    assert!(ledger.mints().is_empty());
}

#[tokio::test]
async fn test_quality_50_reaches_transaction_construction() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(50).into_shared();
    shared.lock().await.generate().unwrap();

    let receipt = session::mint(&shared, &ledger).await.unwrap();
    assert_eq!(receipt.quantity, 10);
    assert_eq!(receipt.tier, Tier::Minimal);

    let mints = ledger.mints();
    assert_eq!(mints.len(), 1);
    assert_eq!(mints[0].quantity, 10);
    assert_eq!(mints[0].unit, receipt.unit);
    assert_eq!(mints[0].metadata_label, 721);
}

#[tokio::test]
async fn test_mint_excellent_end_to_end() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(95).into_shared();
    let hash = shared.lock().await.generate().unwrap().hash().unwrap().to_hex();
    assert_eq!(hash.len(), 64);

    let receipt = session::mint(&shared, &ledger).await.unwrap();
    assert_eq!(receipt.quantity, 60);
    assert_eq!(receipt.tier, Tier::Excellent);
    assert_eq!(receipt.data_hash.to_hex(), hash);
    assert!(receipt.unit.starts_with(receipt.policy_id.as_str()));

    let mint = &ledger.mints()[0];
    let meta = &mint.metadata[receipt.policy_id.as_str()]["Noise Reduction Token"];
    assert_eq!(meta["dataHash"], hash);

    let s = shared.lock().await;
    assert_eq!(s.in_flight(), 0);
    assert!(matches!(s.last_outcome(), Some(ActionOutcome::Succeeded { .. })));
}

#[tokio::test]
async fn test_policy_depends_on_commitment() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(90).into_shared();

    shared.lock().await.generate().unwrap();
    let a = session::mint(&shared, &ledger).await.unwrap();
    shared.lock().await.generate().unwrap();
    let b = session::mint(&shared, &ledger).await.unwrap();

    assert_ne!(a.policy_id, b.policy_id);
    assert_ne!(a.tx_id, b.tx_id);
}

#[tokio::test]
async fn test_refresh_replaces_listing_and_drops_stale_selection() {
    let ledger = OfflineLedger::new("addr_test1me").with_holding(held_token("11", "Alpha"));
    let shared = session_with_quality(90).into_shared();

    let tokens = session::refresh_tokens(&shared, &ledger).await.unwrap();
    assert_eq!(tokens.len(), 1);
    {
        let mut s = shared.lock().await;
        let unit = tokens[0].asset_unit.clone();
        assert_eq!(s.select_token(&unit, None).unwrap().display_name, "Alpha");
    }

    // selling moves the token out of the wallet
    session::trade(&shared, &ledger, TradeAction::Sell, None).await.unwrap();
    let tokens = session::refresh_tokens(&shared, &ledger).await.unwrap();
    assert!(tokens.is_empty());

    let s = shared.lock().await;
    assert!(s.tokens().is_empty());
    assert!(s.selected().is_none());
}

#[tokio::test]
async fn test_trade_without_selection() {
    let ledger = OfflineLedger::new("addr_test1me");
    let shared = session_with_quality(90).into_shared();
    let err = session::trade(&shared, &ledger, TradeAction::Cancel, None).await.unwrap_err();
    assert!(matches!(err, NodeError::NoTokenSelected));
    assert_eq!(ledger.call_count(), 0);
}

#[tokio::test]
async fn test_sell_destination_falls_back_to_wallet() {
    let ledger = OfflineLedger::new("addr_test1me").with_holding(held_token("22", "Beta"));
    let shared = session_with_quality(90).into_shared();
    session::refresh_tokens(&shared, &ledger).await.unwrap();
    {
        let mut s = shared.lock().await;
        let unit = s.tokens()[0].asset_unit.clone();
        s.select_token(&unit, None).unwrap();
    }

    let receipt = session::trade(&shared, &ledger, TradeAction::Sell, None).await.unwrap();
    assert_eq!(receipt.destination, "addr_test1me");
    assert_eq!(ledger.trades()[0].action, TradeAction::Sell);
}

#[tokio::test]
async fn test_sell_uses_market_address() {
    let ledger = OfflineLedger::new("addr_test1me").with_holding(held_token("33", "Gamma"));
    let settings = SessionSettings {
        market_address: Some("addr_test1market".into()),
        ..SessionSettings::default()
    };
    let shared = DashboardSession::new(settings, StdRng::seed_from_u64(2)).into_shared();
    session::refresh_tokens(&shared, &ledger).await.unwrap();
    {
        let mut s = shared.lock().await;
        let unit = s.tokens()[0].asset_unit.clone();
        s.select_token(&unit, None).unwrap();
    }

    let receipt = session::trade(&shared, &ledger, TradeAction::Sell, None).await.unwrap();
    assert_eq!(receipt.destination, "addr_test1market");
    assert_eq!(ledger.trades()[0].destination, "addr_test1market");
}

#[tokio::test]
async fn test_buy_requires_out_ref() {
    let ledger = OfflineLedger::new("addr_test1me").with_holding(held_token("44", "Delta"));
    let shared = session_with_quality(90).into_shared();
    session::refresh_tokens(&shared, &ledger).await.unwrap();
    {
        let mut s = shared.lock().await;
        let unit = s.tokens()[0].asset_unit.clone();
        s.select_token(&unit, None).unwrap();
    }

    let err = session::trade(&shared, &ledger, TradeAction::Buy, None).await.unwrap_err();
    assert!(matches!(err, NodeError::Kernel(KernelError::InvalidTrade(_))));
    assert!(matches!(
        shared.lock().await.last_outcome(),
        Some(ActionOutcome::Failed { .. })
    ));

    let listing = OutRef::new("ef".repeat(32), 3);
    let receipt = session::trade(&shared, &ledger, TradeAction::Buy, Some(listing)).await.unwrap();
    assert_eq!(receipt.action, TradeAction::Buy);
    assert_eq!(receipt.destination, "addr_test1me");
}

#[tokio::test]
async fn test_select_unknown_token() {
    let shared = session_with_quality(90).into_shared();
    let mut s = shared.lock().await;
    let err = s.select_token("deadbeef", None).unwrap_err();
    assert!(matches!(err, NodeError::UnknownToken(_)));
}

#[tokio::test]
async fn test_ledger_trait_object() {
    let ledger: Arc<dyn Ledger> = Arc::new(OfflineLedger::new("addr_test1me"));
    assert_eq!(ledger.backend_name(), "offline");
    assert_eq!(ledger.wallet_address().await.unwrap(), "addr_test1me");
    assert!(ledger.apply_params("zz", &[]).await.is_err());
}
