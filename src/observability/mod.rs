//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Registry and sync cycle produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (host gauges, cycle counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
