//! Webhook endpoint that receives Telegram updates.

use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use log::{debug, warn};

use crate::dispatcher::Dispatcher;
use crate::telegram::{MessageSender, Update};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub sender: Arc<dyn MessageSender>,
}

pub fn router(path: &str, state: AppState) -> Router {
    Router::new()
        .route(path, post(receive_update))
        .with_state(state)
}

/// Accept an update and handle it in the background.
///
/// Always answers 200 so Telegram does not redeliver; bodies we cannot use
/// are logged and dropped.
async fn receive_update(State(state): State<AppState>, body: Bytes) -> StatusCode {
    let update: Update = match serde_json::from_slice(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!("Ignoring malformed update: {e}");
            return StatusCode::OK;
        }
    };

    let Some(message) = update.message else {
        debug!("Ignoring update {:?} without a message", update.update_id);
        return StatusCode::OK;
    };

    let chat_id = message.chat.id;
    let Some(inbound) = message.to_inbound() else {
        debug!("Ignoring message in chat {chat_id} with no text or location");
        return StatusCode::OK;
    };

    debug!("Chat {chat_id}: received {inbound:?}");
    tokio::spawn(async move {
        state
            .dispatcher
            .handle(state.sender.as_ref(), chat_id, inbound)
            .await;
    });

    StatusCode::OK
}
