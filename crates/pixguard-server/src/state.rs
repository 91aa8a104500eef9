//! Shared application state

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use pixguard_classifier::ToxicityClassifier;
use std::sync::Arc;
use tracing::info;

use crate::config::ServerConfig;

/// Application state shared across all requests.
///
/// The classifier is constructed exactly once here and handed to every
/// request handler by reference; there is no global lookup and no way to
/// serve requests before the model finished loading.
#[derive(Clone)]
pub struct AppState {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,

    /// Loaded toxicity classifier, shared read-only
    pub classifier: Arc<ToxicityClassifier>,

    /// Prometheus metrics handle for rendering
    pub metrics_handle: PrometheusHandle,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Initialize application state from configuration.
    ///
    /// Fails fatally on any configuration or artifact problem; the caller
    /// must not bind the listener when this returns an error.
    pub fn new(config: ServerConfig, metrics_handle: PrometheusHandle) -> Result<Self> {
        let label_set = config.label_set()?;
        info!(labels = ?label_set.names(), "using label set");

        let classifier = ToxicityClassifier::load(&config.model_path, label_set)?;
        info!(model = %config.model_path.display(), "classifier ready");

        Ok(Self {
            config: Arc::new(config),
            classifier: Arc::new(classifier),
            metrics_handle,
        })
    }
}
