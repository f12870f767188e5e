//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MaintenanceConfig (validated)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → server re-applies the [state] section to the StateController
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Only the state backend is hot-reloadable; routes and markers are fixed
//!   once the first request has been served

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdminConfig, InterceptConfig, ListenerConfig, MaintenanceConfig, ObservabilityConfig,
    StateConfig, TimeoutConfig, PLACEHOLDER_API_KEY,
};
pub use validation::ValidationError;
