//! Fan-out hub for accepted danmaku.

use tokio::sync::broadcast;
use tracing::debug;

use crate::bot::ports::Broadcaster;

/// Default number of frames a slow display may fall behind.
pub const DEFAULT_BACKLOG: usize = 256;

/// Broadcast hub shared by the dispatcher and the display sockets.
#[derive(Debug, Clone)]
pub struct DanmakuHub {
    sender: broadcast::Sender<String>,
}

impl DanmakuHub {
    pub fn new(backlog: usize) -> Self {
        let (sender, _) = broadcast::channel(backlog.max(1));
        Self { sender }
    }

    /// Subscribe a new display.
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Number of connected displays.
    pub fn displays(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for DanmakuHub {
    fn default() -> Self {
        Self::new(DEFAULT_BACKLOG)
    }
}

impl Broadcaster for DanmakuHub {
    fn broadcast(&self, text: &str) -> usize {
        // Err only means no display is connected right now.
        let delivered = self.sender.send(text.to_string()).unwrap_or(0);
        debug!("Broadcast to {} displays", delivered);
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_without_displays_is_dropped() {
        let hub = DanmakuHub::default();

        assert_eq!(hub.broadcast("hello"), 0);
    }

    #[tokio::test]
    async fn test_every_display_receives_message() {
        let hub = DanmakuHub::default();
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();

        assert_eq!(hub.displays(), 2);
        assert_eq!(hub.broadcast("恭喜"), 2);
        assert_eq!(a.recv().await.unwrap(), "恭喜");
        assert_eq!(b.recv().await.unwrap(), "恭喜");
    }

    #[tokio::test]
    async fn test_late_display_misses_earlier_messages() {
        let hub = DanmakuHub::default();
        let _early = hub.subscribe();
        hub.broadcast("first");
        let mut late = hub.subscribe();
        hub.broadcast("second");

        assert_eq!(late.recv().await.unwrap(), "second");
    }
}
