//! Shared application state

use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

use proctorscope_analysis::Detector;
use proctorscope_core::Taxonomy;

use crate::config::ServerConfig;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved configuration
    pub config: Arc<ServerConfig>,

    /// Detector backend; `None` when initialization failed, in which case
    /// analysis endpoints answer 503 and /health reports it
    pub detector: Option<Arc<dyn Detector>>,

    /// Static detection taxonomy
    pub taxonomy: Arc<Taxonomy>,

    /// Prometheus metrics handle for rendering /metrics
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Assemble application state
    pub fn new(
        config: ServerConfig,
        detector: Option<Arc<dyn Detector>>,
        taxonomy: Taxonomy,
        metrics_handle: PrometheusHandle,
    ) -> Self {
        Self {
            config: Arc::new(config),
            detector,
            taxonomy: Arc::new(taxonomy),
            metrics_handle,
        }
    }
}
