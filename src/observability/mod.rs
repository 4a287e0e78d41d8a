//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers, store, lifecycle produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout, pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through every request span
//! - Metrics endpoint is opt-in

pub mod logging;
pub mod metrics;
