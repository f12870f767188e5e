//! Maintenance mode for axum services.
//!
//! A global "maintenance" flag, read from a pluggable backend, lets a service
//! answer every request with `503 Service Unavailable` while it is being
//! worked on. Individual routes can be forced on (always blocked) or forced
//! off (never blocked), and an exemption predicate can let chosen requests
//! through.
//!
//! ```text
//! request → maintenance_middleware
//!             ├─ forced-on route?              → 503
//!             ├─ StateController::get_state()  (env var / file backend)
//!             ├─ exempt? forced-off route?
//!             └─ otherwise                     → next handler
//! ```

// Core
pub mod routing;
pub mod state;

// HTTP integration
pub mod admin;
pub mod http;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::MaintenanceConfig;
pub use http::{maintenance_middleware, HttpServer, MaintenanceDecider};
pub use lifecycle::Shutdown;
pub use routing::{MarkedRouter, Markers, RouteMarker, RouteRegistry};
pub use state::{EnvVarBackend, LocalFileBackend, StateBackend, StateController, StateError};
