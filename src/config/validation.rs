//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and addresses
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Pure function: MaintenanceConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::{MaintenanceConfig, PLACEHOLDER_API_KEY};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("state.backend: unknown backend kind {0:?}")]
    UnknownBackend(String),

    #[error("state.env_var_name must not be empty")]
    EmptyEnvVarName,

    #[error("state.file_path must not be empty")]
    EmptyFilePath,

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("admin.api_key must not be empty when the admin API is enabled")]
    EmptyApiKey,

    #[error("admin.api_key is still the default placeholder; set a real key to enable the admin API")]
    PlaceholderApiKey,
}

pub fn validate_config(config: &MaintenanceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.state.backend.as_str() {
        "env" => {
            if config.state.env_var_name.trim().is_empty() {
                errors.push(ValidationError::EmptyEnvVarName);
            }
        }
        "file" => {
            if config.state.file_path.as_os_str().is_empty() {
                errors.push(ValidationError::EmptyFilePath);
            }
        }
        other => errors.push(ValidationError::UnknownBackend(other.to_string())),
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }
    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        } else if config.admin.api_key == PLACEHOLDER_API_KEY {
            errors.push(ValidationError::PlaceholderApiKey);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&MaintenanceConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = MaintenanceConfig::default();
        config.state.backend = "redis".to_string();
        config.timeouts.request_secs = 0;
        config.listener.bind_address = "not-an-address".to_string();
        config.admin.enabled = true;
        config.admin.api_key.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::UnknownBackend("redis".into()),
                ValidationError::ZeroRequestTimeout,
                ValidationError::InvalidAddress {
                    field: "listener.bind_address",
                    value: "not-an-address".into(),
                },
                ValidationError::EmptyApiKey,
            ]
        );
    }

    #[test]
    fn test_admin_rejects_placeholder_key() {
        let mut config = MaintenanceConfig::default();
        config.admin.enabled = true;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::PlaceholderApiKey])
        );

        config.admin.api_key = "s3cret".to_string();
        assert_eq!(validate_config(&config), Ok(()));

        // The placeholder is harmless while the admin API is off.
        config.admin.enabled = false;
        config.admin.api_key = PLACEHOLDER_API_KEY.to_string();
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn test_backend_specific_fields() {
        let mut config = MaintenanceConfig::default();
        config.state.env_var_name = " ".to_string();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::EmptyEnvVarName])
        );

        config.state.backend = "file".to_string();
        config.state.file_path = Default::default();
        assert_eq!(validate_config(&config), Err(vec![ValidationError::EmptyFilePath]));
    }
}
