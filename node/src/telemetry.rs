// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Logging and Prometheus metrics for the dashboard node.

use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "nrt_node=debug,tower_http=debug";

enum MetricKind {
    Counter,
    Histogram,
}

const METRICS: &[(&str, MetricKind, &str)] = &[
    ("nrt_samples_generated_total", MetricKind::Counter, "Measurement records generated and sealed"),
    ("nrt_mints_submitted_total", MetricKind::Counter, "Mint transactions submitted to the ledger"),
    ("nrt_mints_refused_total", MetricKind::Counter, "Mints refused locally for insufficient quality"),
    ("nrt_trades_submitted_total", MetricKind::Counter, "Trade transactions submitted to the ledger"),
    ("nrt_ledger_call_duration_seconds", MetricKind::Histogram, "Time spent in ledger calls per action"),
];

static RECORDER: OnceLock<PrometheusHandle> = OnceLock::new();

/// Installs the `RUST_LOG` driven subscriber and the Prometheus recorder.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let handle = match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => handle,
        Err(e) => {
            tracing::error!("metrics disabled: {}", e);
            return;
        }
    };
    if RECORDER.set(handle).is_err() {
        tracing::warn!("metrics recorder installed twice");
    }

    for (name, kind, help) in METRICS {
        match kind {
            MetricKind::Counter => metrics::describe_counter!((*name), (*help)),
            MetricKind::Histogram => metrics::describe_histogram!((*name), (*help)),
        }
    }
    metrics::gauge!("nrt_node_up", 1.0);
}

/// Prometheus text exposition, or a comment when no recorder is installed.
pub fn get_metrics() -> String {
    RECORDER
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# metrics not initialized\n".to_string())
}
