//! Observability for the storefront.
//!
//! This crate provides:
//! - `init_logging` - `tracing` subscriber setup in JSON or human format
//! - `SearchMetrics` - per-session counters for dispatched and applied searches

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
