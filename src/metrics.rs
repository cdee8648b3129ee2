//! Metrics for the GDP chart pipeline
//!
//! Counters and histograms are recorded through the `metrics` facade. A Prometheus
//! recorder is installed once per process; since runs are short-lived there is no HTTP
//! listener and the text snapshot is written out on request instead.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::{Once, OnceLock};
use tracing::{info, warn};

static INIT: Once = Once::new();
static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metric names follow gdp_{phase}_{metric_name}[_total]
macro_rules! phase_metric {
    (counter, $phase:literal, $name:literal) => {
        concat!("gdp_", $phase, "_", $name, "_total")
    };
    (histogram, $phase:literal, $name:literal) => {
        concat!("gdp_", $phase, "_", $name)
    };
}

/// Install the Prometheus recorder. Idempotent.
pub fn init_metrics() {
    INIT.call_once(|| match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            if HANDLE.set(handle).is_err() {
                warn!("METRICS: handle already set");
            }
            info!("Prometheus recorder installed");
        }
        Err(e) => {
            warn!("Failed to install Prometheus recorder: {}", e);
        }
    });
}

/// Prometheus text exposition of everything recorded so far, if a recorder is installed
pub fn render_snapshot() -> Option<String> {
    HANDLE.get().map(|h| h.render())
}

/// Table loading metrics
pub struct LoadMetrics;

impl LoadMetrics {
    pub fn record_table_loaded(rows: usize, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "load", "files_read")).increment(1);
        ::metrics::counter!(phase_metric!(counter, "load", "rows")).increment(rows as u64);
        ::metrics::histogram!(phase_metric!(histogram, "load", "duration_seconds"))
            .record(duration_secs);
    }
}

/// Reconciliation and value extraction metrics
pub struct ReconcileMetrics;

impl ReconcileMetrics {
    pub fn record_reconciliation(matched: usize, unmatched: usize) {
        ::metrics::counter!(phase_metric!(counter, "reconcile", "matched"))
            .increment(matched as u64);
        ::metrics::counter!(phase_metric!(counter, "reconcile", "unmatched"))
            .increment(unmatched as u64);
    }

    pub fn record_no_value(count: usize) {
        ::metrics::counter!(phase_metric!(counter, "reconcile", "no_value"))
            .increment(count as u64);
    }
}

/// XY series metrics
pub struct SeriesMetrics;

impl SeriesMetrics {
    pub fn record_series(points: usize, truncated: bool) {
        ::metrics::counter!(phase_metric!(counter, "series", "built")).increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "series", "points")).record(points as f64);
        if truncated {
            ::metrics::counter!(phase_metric!(counter, "series", "truncated")).increment(1);
        }
    }

    pub fn record_missing_country() {
        ::metrics::counter!(phase_metric!(counter, "series", "missing_countries")).increment(1);
    }
}

/// Chart rendering metrics
pub struct RenderMetrics;

impl RenderMetrics {
    pub fn record_chart_rendered(chart: &'static str, duration_secs: f64) {
        ::metrics::counter!(phase_metric!(counter, "render", "charts"), "chart" => chart)
            .increment(1);
        ::metrics::histogram!(phase_metric!(histogram, "render", "duration_seconds"), "chart" => chart)
            .record(duration_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_naming_convention() {
        assert_eq!(phase_metric!(counter, "load", "rows"), "gdp_load_rows_total");
        assert_eq!(
            phase_metric!(histogram, "render", "duration_seconds"),
            "gdp_render_duration_seconds"
        );
    }

    #[test]
    fn test_snapshot_contains_recorded_metrics() {
        init_metrics();
        init_metrics();
        LoadMetrics::record_table_loaded(3, 0.01);
        SeriesMetrics::record_series(2, true);
        RenderMetrics::record_chart_rendered("xy", 0.1);

        let snapshot = render_snapshot().expect("recorder installed");
        assert!(snapshot.contains("gdp_load_rows_total"));
        assert!(snapshot.contains("gdp_series_truncated_total"));
        assert!(snapshot.contains("chart=\"xy\""));
    }
}
