//! Holder of the active backend and scoped state overrides.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use futures_util::FutureExt;

use super::backend::{build_backend, BackendOptions, StateBackend};
use super::{EnvVarBackend, StateError};

static GLOBAL: OnceLock<StateController> = OnceLock::new();

/// Owns the backend consulted when callers do not pass one explicitly.
///
/// Readers never block a concurrent `configure`: the backend reference is
/// swapped atomically and in-flight calls keep the backend they loaded.
#[derive(Debug)]
pub struct StateController {
    active: ArcSwap<Arc<dyn StateBackend>>,
}

impl StateController {
    /// Create a controller backed by the default environment variable.
    pub fn new() -> Self {
        Self::with_backend(Arc::new(EnvVarBackend::default()))
    }

    pub fn with_backend(backend: Arc<dyn StateBackend>) -> Self {
        Self {
            active: ArcSwap::from_pointee(backend),
        }
    }

    /// Process-wide controller, created on first use.
    pub fn global() -> &'static StateController {
        GLOBAL.get_or_init(StateController::new)
    }

    /// Currently active backend.
    pub fn active(&self) -> Arc<dyn StateBackend> {
        let guard = self.active.load();
        Arc::clone(&**guard)
    }

    /// Replace the active backend with a built-in one.
    ///
    /// An unknown `kind` leaves the current backend in place.
    pub fn configure(&self, kind: &str, options: BackendOptions) -> Result<(), StateError> {
        let backend = build_backend(kind, options)?;
        tracing::info!(backend = backend.kind(), "Maintenance state backend configured");
        self.set_backend(backend);
        Ok(())
    }

    /// Install a custom backend.
    pub fn set_backend(&self, backend: Arc<dyn StateBackend>) {
        self.active.store(Arc::new(backend));
    }

    pub async fn get_state(&self, backend: Option<&dyn StateBackend>) -> Result<bool, StateError> {
        match backend {
            Some(backend) => backend.get().await,
            None => self.active().get().await,
        }
    }

    pub async fn set_state(
        &self,
        value: bool,
        backend: Option<&dyn StateBackend>,
    ) -> Result<(), StateError> {
        match backend {
            Some(backend) => backend.set(value).await,
            None => self.active().set(value).await,
        }
    }

    /// Run `body` with the state forced to `value`, then restore the prior value.
    ///
    /// Restoration happens whether `body` completes, returns an error value,
    /// panics or is dropped before finishing. A panic is resumed once the
    /// prior value is written back. When the returned future is dropped
    /// mid-body the restore is spawned onto the current runtime instead.
    /// A failed restore is logged and never replaces the body's own outcome.
    /// Errors are only returned when the state cannot be read or set on entry,
    /// in which case `body` does not run.
    pub async fn override_state<F, Fut, T>(
        &self,
        value: bool,
        backend: Option<Arc<dyn StateBackend>>,
        body: F,
    ) -> Result<T, StateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        let backend = backend.unwrap_or_else(|| self.active());

        let previous = backend.get().await?;
        backend.set(value).await?;
        let guard = RestoreGuard::new(backend, previous);

        let outcome = AssertUnwindSafe(async move { body().await })
            .catch_unwind()
            .await;

        guard.restore().await;

        match outcome {
            Ok(output) => Ok(output),
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }

    /// Run `body` with maintenance forced on.
    pub async fn maintenance_on<F, Fut, T>(
        &self,
        backend: Option<Arc<dyn StateBackend>>,
        body: F,
    ) -> Result<T, StateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.override_state(true, backend, body).await
    }

    /// Run `body` with maintenance forced off.
    pub async fn maintenance_off<F, Fut, T>(
        &self,
        backend: Option<Arc<dyn StateBackend>>,
        body: F,
    ) -> Result<T, StateError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        self.override_state(false, backend, body).await
    }
}

/// Writes `previous` back to `backend` if dropped before [`restore`] ran.
///
/// [`restore`]: RestoreGuard::restore
struct RestoreGuard {
    backend: Arc<dyn StateBackend>,
    previous: bool,
    pending: bool,
}

impl RestoreGuard {
    fn new(backend: Arc<dyn StateBackend>, previous: bool) -> Self {
        Self {
            backend,
            previous,
            pending: true,
        }
    }

    async fn restore(mut self) {
        restore_state(self.backend.as_ref(), self.previous).await;
        self.pending = false;
    }
}

impl Drop for RestoreGuard {
    fn drop(&mut self) {
        if !self.pending {
            return;
        }
        let backend = Arc::clone(&self.backend);
        let previous = self.previous;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                tracing::debug!(
                    backend = backend.kind(),
                    previous,
                    "Override cancelled, restoring maintenance state in background"
                );
                handle.spawn(async move { restore_state(backend.as_ref(), previous).await });
            }
            Err(_) => tracing::error!(
                backend = backend.kind(),
                previous,
                "Override cancelled outside a runtime, maintenance state not restored"
            ),
        }
    }
}

async fn restore_state(backend: &dyn StateBackend, previous: bool) {
    if let Err(e) = backend.set(previous).await {
        tracing::error!(
            backend = backend.kind(),
            previous,
            error = %e,
            "Failed to restore maintenance state after override"
        );
    }
}

impl Default for StateController {
    fn default() -> Self {
        Self::new()
    }
}
