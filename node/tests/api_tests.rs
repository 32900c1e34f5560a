use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tower::ServiceExt; // for oneshot

use nrt_kernel::types::range::{SampleRange, SamplerConfig};
use nrt_node::api::{SampleResponse, TierListResponse};
use nrt_node::ledger::OfflineLedger;
use nrt_node::server::{build_router, AppState};
use nrt_node::session::{DashboardSession, SessionSettings};

fn app_with_quality(q: i64, auth: Option<String>) -> (Router, Arc<OfflineLedger>) {
    let settings = SessionSettings {
        sampler: SamplerConfig {
            data_quality: SampleRange::new(q, q).unwrap(),
            ..SamplerConfig::default()
        },
        ..SessionSettings::default()
    };
    let session = DashboardSession::new(settings, StdRng::seed_from_u64(9)).into_shared();
    let ledger = Arc::new(OfflineLedger::new("addr_test1api"));
    let app = build_router(AppState::new(session, ledger.clone()), auth);
    (app, ledger)
}

fn post(uri: &str) -> Request<Body> {
    Request::builder().method("POST").uri(uri).body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_generate_then_mint() {
    let (app, ledger) = app_with_quality(95, None);

    let resp = app.clone().oneshot(post("/v1/samples")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    let sample: SampleResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(sample.quantity, 60);
    assert!(sample.mint_eligible);
    let hash = sample.record.hash().unwrap().to_hex();

    let resp = app.clone().oneshot(post("/v1/mint")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let receipt = json_body(resp).await;
    assert_eq!(receipt["quantity"], 60);
    assert_eq!(receipt["tier"], "Excellent");
    assert_eq!(receipt["dataHash"], hash);
    assert_eq!(ledger.mints().len(), 1);

    let resp = app.oneshot(get("/v1/session")).await.unwrap();
    let view = json_body(resp).await;
    assert_eq!(view["lastOutcome"]["status"], "succeeded");
    assert_eq!(view["ledger"], "offline");
}

#[tokio::test]
async fn test_mint_insufficient_quality_is_422() {
    let (app, ledger) = app_with_quality(45, None);
    app.clone().oneshot(post("/v1/samples")).await.unwrap();

    let resp = app.oneshot(post("/v1/mint")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["kind"], "precondition");
    assert!(body["error"].as_str().unwrap().contains("insufficient data quality"));
    assert_eq!(ledger.call_count(), 0);
}

#[tokio::test]
async fn test_mint_without_sample_is_conflict() {
    let (app, _) = app_with_quality(90, None);
    let resp = app.clone().oneshot(post("/v1/mint")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let resp = app.oneshot(get("/v1/samples/current")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_reward_endpoints() {
    let (app, _) = app_with_quality(90, None);

    let resp = app.clone().oneshot(get("/v1/rewards/99")).await.unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["quantity"], 100);
    assert_eq!(body["tier"], "Perfect");

    let resp = app.clone().oneshot(get("/v1/rewards/49")).await.unwrap();
    let body = json_body(resp).await;
    assert_eq!(body["mintEligible"], false);

    let resp = app.oneshot(get("/v1/rewards/tiers")).await.unwrap();
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    let tiers: TierListResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(tiers.tiers.len(), 8);
    assert_eq!(tiers.tiers[0].min_quality, None);
    assert_eq!(tiers.tiers[7].min_quality, Some(99));
}

#[tokio::test]
async fn test_tokens_select_and_sell() {
    let (app, ledger) = app_with_quality(90, None);
    app.clone().oneshot(post("/v1/samples")).await.unwrap();
    app.clone().oneshot(post("/v1/mint")).await.unwrap();

    let resp = app.clone().oneshot(post("/v1/tokens/refresh")).await.unwrap();
    let listing = json_body(resp).await;
    let unit = listing["tokens"][0]["assetUnit"].as_str().unwrap().to_string();
    assert_eq!(listing["tokens"][0]["quantity"], 45);

    let req = Request::builder()
        .method("POST")
        .uri("/v1/tokens/select")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "unit": unit }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let req = Request::builder()
        .method("POST")
        .uri("/v1/trade")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"action":"sell"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let receipt = json_body(resp).await;
    assert_eq!(receipt["action"], "sell");
    assert_eq!(ledger.trades().len(), 1);
}

#[tokio::test]
async fn test_trade_without_selection_is_conflict() {
    let (app, _) = app_with_quality(90, None);
    let req = Request::builder()
        .method("POST")
        .uri("/v1/trade")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"action":"cancel"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_auth_guard() {
    let (app, _) = app_with_quality(90, Some("secret".into()));

    let resp = app.clone().oneshot(post("/v1/samples")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = Request::builder()
        .method("POST")
        .uri("/v1/samples")
        .header("authorization", "Bearer secret")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let (app, _) = app_with_quality(90, Some("secret".into()));
    let resp = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
    assert_eq!(&bytes[..], b"# metrics not initialized\n");
}
