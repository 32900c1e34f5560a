// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use std::sync::Arc;

use tokio::net::TcpListener;

use nrt_node::config::NodeConfig;
use nrt_node::ledger::{HttpLedger, Ledger, OfflineLedger};
use nrt_node::server::{build_router, AppState};
use nrt_node::session::DashboardSession;
use nrt_node::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();

    let cfg = NodeConfig::from_env()?;
    tracing::info!(
        "Initializing NRT node: noise {} quality {} token {:?}",
        cfg.sampler.noise_level, cfg.sampler.data_quality, cfg.token_name
    );

    let ledger: Arc<dyn Ledger> = match &cfg.ledger_url {
        Some(url) => {
            tracing::info!("Using wallet bridge at {}", url);
            Arc::new(HttpLedger::new(url.clone()))
        }
        None => {
            tracing::warn!("No NRT_LEDGER_URL set; running against the offline ledger");
            Arc::new(OfflineLedger::new(cfg.offline_address.clone()))
        }
    };

    let session = DashboardSession::from_config(&cfg).into_shared();
    let app = build_router(AppState::new(session, ledger), cfg.auth_token.clone());

    let addr = cfg.bind_addr;
    tracing::info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
