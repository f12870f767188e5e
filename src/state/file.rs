//! Read-write backend backed by a local file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{codec, StateBackend, StateError};

/// Default file holding the maintenance flag.
pub const DEFAULT_FILE_NAME: &str = "maintenance_mode.txt";

/// Stores the flag as `"0"` or `"1"` in a file.
///
/// A missing file is created on first read. Writers are not coordinated.
#[derive(Debug, Clone)]
pub struct LocalFileBackend {
    path: PathBuf,
}

impl LocalFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StateError {
        StateError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for LocalFileBackend {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_NAME)
    }
}

#[async_trait]
impl StateBackend for LocalFileBackend {
    async fn get(&self) -> Result<bool, StateError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => codec::decode(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "State file missing, creating it");
                tokio::fs::write(&self.path, codec::encode(false))
                    .await
                    .map_err(|e| self.io_error(e))?;
                Ok(false)
            }
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn set(&self, value: bool) -> Result<(), StateError> {
        tokio::fs::write(&self.path, codec::encode(value))
            .await
            .map_err(|e| self.io_error(e))?;
        tracing::debug!(path = %self.path.display(), value, "State file updated");
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}
