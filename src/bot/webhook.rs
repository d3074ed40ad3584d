//! Webhook HTTP surface.
//!
//! Routes:
//! - `POST <webhook path>` - LINE deliveries, verified then dispatched
//! - `GET /ws` - WebSocket feed for the big-screen displays
//! - `GET /healthz` - liveness probe

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::ws::WebSocketUpgrade;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use tracing::{debug, info, warn};

use super::dispatcher::Dispatcher;
use crate::display::{self, DanmakuHub};
use crate::events::{InboundEvent, Outcome};
use crate::line::{self, WebhookBody};

/// Shared state of the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub channel_secret: Arc<str>,
    pub hub: DanmakuHub,
}

/// Build the HTTP router.
pub fn router(state: AppState, webhook_path: &str) -> Router {
    Router::new()
        .route(webhook_path, post(callback))
        .route("/ws", get(display_socket))
        .route("/healthz", get(|| async { "ok" }))
        .with_state(state)
}

/// Handle one LINE webhook delivery.
///
/// Business-level no-ops still answer `200 OK`; only signature and parse
/// failures are reported to LINE.
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let signature = headers
        .get(line::SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if let Err(e) = line::verify_signature(&state.channel_secret, &body, signature) {
        warn!("Rejected webhook delivery: {}", e);
        return (StatusCode::BAD_REQUEST, "Bad Request");
    }

    let payload = match WebhookBody::parse(&body) {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Unreadable webhook body: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    debug!("Delivery for {:?}", payload.destination);
    let events: Vec<InboundEvent> = payload.events.into_iter().map(|e| e.into_inbound()).collect();
    let received = events.len();
    let outcomes = state.dispatcher.dispatch(events).await;

    let failed = outcomes.iter().filter(|o| **o == Outcome::Failed).count();
    if failed > 0 {
        info!("Handled {} events ({} failed)", received, failed);
    } else {
        debug!("Handled {} events: {:?}", received, outcomes);
    }

    (StatusCode::OK, "OK")
}

async fn display_socket(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| display::stream_to_display(socket, state.hub))
}
