use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::models::Severity;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Safe to call more than once; only the
/// first call installs.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => tracing::warn!(error = %e, "Failed to install Prometheus recorder"),
    }
}

pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Count a completed symptom classification by tier.
pub fn record_assessment(severity: Severity) {
    counter!("symptom_assessments_total", "severity" => severity.as_str()).increment(1);
}

/// Count an upstream call by collaborator and outcome.
pub fn record_upstream(upstream: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("upstream_requests_total", "upstream" => upstream, "outcome" => outcome).increment(1);
}
