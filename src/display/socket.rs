//! WebSocket session for one display.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::DanmakuHub;

/// Forward every broadcast danmaku to `socket` until either side closes.
///
/// A display that falls behind skips the missed frames and carries on.
pub async fn stream_to_display(socket: WebSocket, hub: DanmakuHub) {
    let (mut sender, mut receiver) = socket.split();
    let mut danmaku = hub.subscribe();
    info!("Display connected ({} total)", hub.displays());

    loop {
        tokio::select! {
            next = danmaku.recv() => match next {
                Ok(text) => {
                    if sender.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Display lagged, skipped {} danmaku", skipped);
                }
                Err(RecvError::Closed) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Display socket error: {}", e);
                    break;
                }
            },
        }
    }

    info!("Display disconnected");
}
