//! ProctorScope server binary
//!
//! Analyzes exam monitoring snapshots for integrity risks: person counts,
//! suspicious and prohibited objects, and a bounded risk score per image.

use anyhow::Result;
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};

use proctorscope_analysis::{Detector, StubDetector};
use proctorscope_server::{config, create_router, AppState, Cli, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    info!("Starting ProctorScope server");

    let config = ServerConfig::resolve(&cli);
    let taxonomy = config::load_taxonomy(cli.taxonomy.as_deref())?;
    info!(
        confidence_threshold = config.confidence_threshold,
        device = %config.device,
        "Configuration resolved"
    );

    let metrics_handle = init_metrics()?;

    // Wire the detector backend and warm it up. A failed warm-up leaves the
    // service running with analysis endpoints answering 503, mirroring
    // /health's model_loaded flag.
    let backend = StubDetector::new(config.confidence_threshold);
    let detector: Option<Arc<dyn Detector>> = match backend.warm_up().await {
        Ok(()) => {
            info!(backend = backend.name(), "Detector warmed up");
            Some(Arc::new(backend))
        }
        Err(e) => {
            error!("Detector initialization failed: {e}");
            None
        }
    };

    let state = AppState::new(config.clone(), detector, taxonomy, metrics_handle);
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", config.listen, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    warn!("Shutdown signal received, stopping server...");
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("proctorscope=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("proctorscope=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {e}"))?;

    metrics::describe_counter!(
        "proctorscope_requests_total",
        "Total number of requests processed by endpoint"
    );
    metrics::describe_counter!(
        "proctorscope_batch_items_total",
        "Total number of batch items processed by outcome"
    );
    metrics::describe_histogram!(
        "proctorscope_analyze_latency_ms",
        metrics::Unit::Milliseconds,
        "End-to-end analyze latency in milliseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
