//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layers, graceful shutdown)
//!     → request.rs (request ID)
//!     → middleware.rs (MaintenanceDecider: forced-on → global state → exemption → forced-off)
//!         → Block: response.rs (default 503) or custom responder
//!         → Proceed: application handler
//! ```

pub mod exempt;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use exempt::PathPrefixExemption;
pub use middleware::{
    maintenance_middleware, BlockReason, Decision, ExemptionPredicate, MaintenanceDecider,
    MaintenanceResponder,
};
pub use request::{UuidRequestId, X_REQUEST_ID};
pub use response::default_maintenance_response;
pub use server::HttpServer;
