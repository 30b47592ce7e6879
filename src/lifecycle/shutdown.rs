//! Graceful-stop signalling.

use tokio::sync::broadcast;

/// Hands out receivers that resolve once the service should stop serving.
///
/// The accept loop subscribes before serving; integration tests trigger the
/// channel instead of delivering an OS signal. Triggering with no live
/// subscribers is harmless.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// A receiver that completes after [`trigger`](Self::trigger) runs.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Tell every subscriber to stop.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
