//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_resolutions_total` (counter): resolutions by outcome
//! - `locale_redirects_total` (counter): redirects by locale and preference source
//! - `gateway_upstream_requests_total` (counter): forwarded requests by status
//! - `gateway_request_duration_seconds` (histogram): origin round-trip latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels are low-cardinality (locale codes come from the supported set)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Resolution;

/// Install the Prometheus exporter with its own scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record the outcome of one locale resolution.
pub fn record_resolution(resolution: &Resolution) {
    match resolution {
        Resolution::Continue { reason } => {
            counter!("locale_resolutions_total", "outcome" => "continue", "reason" => reason.as_str())
                .increment(1);
        }
        Resolution::Redirect { locale, source, .. } => {
            counter!("locale_resolutions_total", "outcome" => "redirect").increment(1);
            counter!(
                "locale_redirects_total",
                "locale" => locale.clone(),
                "source" => source.as_str()
            )
            .increment(1);
        }
    }
}

/// Record one request forwarded to the origin.
pub fn record_upstream(status: u16, start_time: Instant) {
    counter!("gateway_upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("gateway_request_duration_seconds").record(start_time.elapsed().as_secs_f64());
}
