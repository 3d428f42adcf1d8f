//! Shutdown coordination.

use tokio::sync::broadcast;

/// Fans a single shutdown event out to every subscriber.
///
/// The HTTP server subscribes before it starts serving; the signal task
/// (or a test) calls [`Shutdown::trigger`] to begin a graceful drain.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Receive the shutdown event.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the shutdown event. Does nothing if nobody is subscribed.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
