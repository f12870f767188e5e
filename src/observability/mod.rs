//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Decider, controller, admin API produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters and the state gauge)
//!
//! Consumers:
//!     → stdout via tracing-subscriber
//!     → Prometheus scrape endpoint (optional)
//! ```

pub mod logging;
pub mod metrics;
