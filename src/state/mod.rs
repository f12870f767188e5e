//! Maintenance state subsystem.
//!
//! # Data Flow
//! ```text
//! StateController (active backend, swapped atomically)
//!     → backend.rs (StateBackend trait)
//!         → env.rs  (read-only environment variable)
//!         → file.rs (read-write local file)
//!     → codec.rs (bool ⇄ "1"/"0", lenient parsing)
//! ```
//!
//! # Design Decisions
//! - One boolean flag, one medium per backend
//! - Env backend never errors: bad values and writes only warn
//! - File backend propagates malformed content instead of defaulting
//! - No locking on the file medium; last writer wins

pub mod backend;
pub mod codec;
pub mod controller;
pub mod env;
pub mod file;

pub use backend::{BackendOptions, StateBackend};
pub use controller::StateController;
pub use env::EnvVarBackend;
pub use file::LocalFileBackend;

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading, writing or configuring maintenance state.
#[derive(Debug, Error)]
pub enum StateError {
    /// The stored token is not a recognised boolean encoding.
    #[error("maintenance state value is not correct: {0:?}")]
    InvalidValue(String),

    /// Reading or writing the state file failed.
    #[error("state file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `configure` was called with a backend kind that does not exist.
    #[error("unknown state backend kind {0:?} (expected \"env\" or \"file\")")]
    UnknownBackend(String),
}
