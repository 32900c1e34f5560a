// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use axum::extract::{Path, Request as AxumRequest, State};
use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use axum::middleware::{from_fn_with_state, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use nrt_kernel::reward::{reward_for, TIER_TABLE};

use crate::api::*;
use crate::errors::{NodeError, NodeResult};
use crate::ledger::Ledger;
use crate::session::{self, MintReceipt, SharedSession, TradeReceipt};

#[derive(Clone)]
pub struct AppState {
    pub session: SharedSession,
    pub ledger: Arc<dyn Ledger>,
}

impl AppState {
    pub fn new(session: SharedSession, ledger: Arc<dyn Ledger>) -> Self {
        Self { session, ledger }
    }
}

async fn auth_guard(
    State(token): State<Arc<String>>,
    req: AxumRequest,
    next: Next,
) -> Result<Response, StatusCode> {
    let provided = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|val| val.to_str().ok())
        .and_then(|val| val.strip_prefix("Bearer "));

    match provided {
        Some(p) if p == token.as_str() => Ok(next.run(req).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

pub fn build_router(state: AppState, auth_token: Option<String>) -> Router {
    let mut app = Router::new()
        .route("/v1/session", get(session_view))
        .route("/v1/samples", post(generate_sample))
        .route("/v1/samples/current", get(current_sample))
        .route("/v1/rewards/tiers", get(reward_tiers))
        .route("/v1/rewards/:quality", get(reward_lookup))
        .route("/v1/mint", post(mint))
        .route("/v1/tokens", get(list_tokens))
        .route("/v1/tokens/refresh", post(refresh_tokens))
        .route("/v1/tokens/select", post(select_token))
        .route("/v1/trade", post(trade))
        .with_state(state);

    if let Some(token) = auth_token {
        tracing::info!("Auth Enabled: Bearer token required");
        app = app.layer(from_fn_with_state(Arc::new(token), auth_guard));
    } else {
        tracing::warn!("Auth Disabled: No token configured");
    }

    // Probes stay outside the auth layer.
    app.route("/health", get(health))
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn session_view(State(state): State<AppState>) -> Json<SessionResponse> {
    let s = state.session.lock().await;
    Json(SessionResponse {
        record: s.current().cloned(),
        reward: s.reward(),
        token_count: s.tokens().len(),
        selected: s.selected().cloned(),
        in_flight: s.in_flight(),
        last_outcome: s.last_outcome().cloned(),
        ledger: state.ledger.backend_name(),
    })
}

async fn generate_sample(State(state): State<AppState>) -> NodeResult<Json<SampleResponse>> {
    let mut s = state.session.lock().await;
    let record = s.generate()?.clone();
    let reward = reward_for(record.data_quality());
    Ok(Json(SampleResponse::new(record, reward)))
}

async fn current_sample(State(state): State<AppState>) -> NodeResult<Json<SampleResponse>> {
    let s = state.session.lock().await;
    let record = s.current().cloned().ok_or(NodeError::NoRecord)?;
    let reward = reward_for(record.data_quality());
    Ok(Json(SampleResponse::new(record, reward)))
}

async fn reward_tiers() -> Json<TierListResponse> {
    Json(TierListResponse { tiers: TIER_TABLE.iter().map(TierRow::from).collect() })
}

async fn reward_lookup(Path(quality): Path<i64>) -> Json<RewardResponse> {
    let reward = reward_for(quality);
    Json(RewardResponse {
        data_quality: quality,
        quantity: reward.quantity,
        tier: reward.tier,
        mint_eligible: reward.is_mint_eligible(),
    })
}

async fn mint(State(state): State<AppState>) -> NodeResult<Json<MintReceipt>> {
    let receipt = session::mint(&state.session, state.ledger.as_ref()).await?;
    Ok(Json(receipt))
}

async fn list_tokens(State(state): State<AppState>) -> Json<TokenListResponse> {
    let s = state.session.lock().await;
    Json(TokenListResponse {
        tokens: s.tokens().to_vec(),
        selected: s.selected().cloned(),
    })
}

async fn refresh_tokens(State(state): State<AppState>) -> NodeResult<Json<TokenListResponse>> {
    let tokens = session::refresh_tokens(&state.session, state.ledger.as_ref()).await?;
    let s = state.session.lock().await;
    Ok(Json(TokenListResponse { tokens, selected: s.selected().cloned() }))
}

async fn select_token(
    State(state): State<AppState>,
    Json(req): Json<SelectTokenRequest>,
) -> NodeResult<Json<SelectTokenResponse>> {
    let mut s = state.session.lock().await;
    let token = s.select_token(&req.unit, req.source_ref.as_ref())?.clone();
    Ok(Json(SelectTokenResponse { token }))
}

async fn trade(
    State(state): State<AppState>,
    Json(req): Json<TradeRequest>,
) -> NodeResult<Json<TradeReceipt>> {
    let receipt = session::trade(&state.session, state.ledger.as_ref(), req.action, req.out_ref).await?;
    Ok(Json(receipt))
}

async fn health() -> &'static str {
    "ok"
}

async fn metrics_handler() -> String {
    crate::telemetry::get_metrics()
}
