//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! locale middleware + origin forwarding produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every log event of a request
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
