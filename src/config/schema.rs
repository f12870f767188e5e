//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files and
//! every section has defaults, so an empty file is a valid configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::state::env::DEFAULT_ENV_VAR_NAME;
use crate::state::file::DEFAULT_FILE_NAME;
use crate::state::BackendOptions;

/// Root configuration for the maintenance server.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct MaintenanceConfig {
    /// Listener for the gated application.
    pub listener: ListenerConfig,

    /// Where the maintenance flag lives.
    pub state: StateConfig,

    /// Interception behaviour.
    pub maintenance: InterceptConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Admin API settings.
    pub admin: AdminConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// State backend selection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct StateConfig {
    /// Backend kind: "env" or "file".
    pub backend: String,

    /// Variable read by the env backend.
    pub env_var_name: String,

    /// File used by the file backend.
    pub file_path: PathBuf,
}

impl StateConfig {
    pub fn backend_options(&self) -> BackendOptions {
        BackendOptions {
            env_var_name: Some(self.env_var_name.clone()),
            file_path: Some(self.file_path.clone()),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            backend: "env".to_string(),
            env_var_name: DEFAULT_ENV_VAR_NAME.to_string(),
            file_path: PathBuf::from(DEFAULT_FILE_NAME),
        }
    }
}

/// Interception configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct InterceptConfig {
    /// Fixed global state. When unset the state backend is consulted.
    pub maintenance_mode: Option<bool>,

    /// Requests whose path starts with one of these bypass maintenance.
    pub exempt_path_prefixes: Vec<String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Default `admin.api_key`. Rejected by validation when the admin API is enabled.
pub const PLACEHOLDER_API_KEY: &str = "CHANGE_ME_IN_PRODUCTION";

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: PLACEHOLDER_API_KEY.to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}
