//! Backend trait and construction by kind.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use super::{EnvVarBackend, LocalFileBackend, StateError};

/// Source of truth for the maintenance flag.
#[async_trait]
pub trait StateBackend: Send + Sync + std::fmt::Debug {
    /// Read the current state.
    async fn get(&self) -> Result<bool, StateError>;

    /// Persist a new state.
    async fn set(&self, value: bool) -> Result<(), StateError>;

    /// Short name of the medium, used in logs and the admin API.
    fn kind(&self) -> &'static str;
}

/// Constructor options for the built-in backends.
///
/// Unset fields fall back to the backend's default medium.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    pub env_var_name: Option<String>,
    pub file_path: Option<PathBuf>,
}

/// Build a backend from its kind name (`"env"` or `"file"`).
pub fn build_backend(
    kind: &str,
    options: BackendOptions,
) -> Result<Arc<dyn StateBackend>, StateError> {
    match kind {
        "env" => Ok(Arc::new(match options.env_var_name {
            Some(name) => EnvVarBackend::new(name),
            None => EnvVarBackend::default(),
        })),
        "file" => Ok(Arc::new(match options.file_path {
            Some(path) => LocalFileBackend::new(path),
            None => LocalFileBackend::default(),
        })),
        other => Err(StateError::UnknownBackend(other.to_string())),
    }
}
