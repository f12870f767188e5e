//! Stop signal shared by the application and admin listeners.
//!
//! `main` owns one [`Shutdown`] and hands a receiver to each server it
//! spawns. Each server passes its receiver to [`wait`] as the graceful
//! shutdown future, so a single `trigger` drains both listeners.

use tokio::sync::broadcast;

/// Sending half of the stop signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        // One slot is enough: the event is sent at most once.
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receiver for a server that should stop on [`Shutdown::trigger`].
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscribed server to stop accepting connections.
    ///
    /// Returns how many servers were still listening.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(servers = notified, "Shutdown triggered");
        notified
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Graceful shutdown future for `axum::serve`.
///
/// Resolves on the stop event, or once the [`Shutdown`] is dropped so an
/// orphaned server does not outlive `main`.
pub async fn wait(mut rx: broadcast::Receiver<()>) {
    let _ = rx.recv().await;
}
