//! Route marker subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (MarkedRouter::route / route_marked)
//!     → registry.rs (side table: path pattern → applied markers)
//!     → axum::Router (the actual handler)
//!
//! First request (MaintenanceDecider):
//!     RouteRegistry snapshot
//!     → marker.rs (resolve effective marker per route)
//!     → matcher.rs (compile path patterns)
//!     → ForcedPaths (frozen for the decider's lifetime)
//! ```
//!
//! # Design Decisions
//! - Markers are data in a side table, not attributes on handlers
//! - Forced-on wins over forced-off whatever the application order
//! - Path patterns match the full path, never a prefix
//! - Collection is one-shot; later registrations are ignored

pub mod marker;
pub mod matcher;
pub mod registry;

pub use marker::{ForcedPaths, Markers, RouteMarker};
pub use matcher::{PathPattern, PatternError};
pub use registry::{MarkedRouter, RouteEntry, RouteRegistry};
