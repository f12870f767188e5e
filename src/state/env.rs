//! Read-only backend backed by an environment variable.

use async_trait::async_trait;

use super::{codec, StateBackend, StateError};

/// Default variable consulted for the maintenance flag.
pub const DEFAULT_ENV_VAR_NAME: &str = "FASTAPI_MAINTENANCE_MODE";

/// Reads the flag from an environment variable.
///
/// The process environment is treated as read-only: `set` only warns.
#[derive(Debug, Clone)]
pub struct EnvVarBackend {
    var_name: String,
}

impl EnvVarBackend {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }

    pub fn var_name(&self) -> &str {
        &self.var_name
    }
}

impl Default for EnvVarBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ENV_VAR_NAME)
    }
}

#[async_trait]
impl StateBackend for EnvVarBackend {
    async fn get(&self) -> Result<bool, StateError> {
        let raw = match std::env::var(&self.var_name) {
            Ok(raw) => raw,
            Err(std::env::VarError::NotPresent) => return Ok(false),
            Err(std::env::VarError::NotUnicode(raw)) => {
                tracing::warn!(
                    env_var = %self.var_name,
                    value = ?raw,
                    "Invalid value for environment variable. Expected boolean-like value. Defaulting to false."
                );
                return Ok(false);
            }
        };

        match codec::decode(&raw) {
            Ok(value) => Ok(value),
            Err(_) => {
                tracing::warn!(
                    env_var = %self.var_name,
                    value = %raw,
                    "Invalid value for environment variable. Expected boolean-like value. Defaulting to false."
                );
                Ok(false)
            }
        }
    }

    async fn set(&self, value: bool) -> Result<(), StateError> {
        tracing::warn!(
            env_var = %self.var_name,
            requested = value,
            "Cannot set maintenance mode state via environment variable. \
             Environment variables are read-only during runtime; configure a writable backend instead."
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "env"
    }
}
