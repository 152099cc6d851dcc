use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use utoipa::IntoParams;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{auth::AuthError, Error},
        model::app::AppState,
        service::{
            auth::AuthService,
            notification::{NotificationHub, Room},
        },
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SocketParams {
    /// Bearer token of the subscribing user
    pub token: Option<String>,
}

/// Subscribe to real-time notifications over a WebSocket
///
/// The token is checked before the upgrade. Every event for the user's room is pushed as
/// `{"event": ..., "room": ..., "data": {...}}`; messages sent by the client are ignored.
#[utoipa::path(
    get,
    path = "/api/ws",
    tag = NOTIFICATION_TAG,
    params(SocketParams),
    responses(
        (status = 101, description = "Switching to the WebSocket protocol"),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Account is suspended", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Query(params): Query<SocketParams>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, Error> {
    let token = params
        .token
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let user = AuthService::new(&state.db, &state.jwt)
        .authenticate(&token)
        .await?;
    let room = Room::for_user(user.id, user.role);

    tracing::debug!(user_id = user.id, room = %room, "Notification socket requested");

    Ok(ws.on_upgrade(move |socket| stream_notifications(socket, state.notifier, room)))
}

async fn stream_notifications(socket: WebSocket, notifier: NotificationHub, room: Room) {
    let (mut sender, mut receiver) = socket.split();
    let mut notifications = notifier.subscribe(room).await;

    let mut send_task = tokio::spawn(async move {
        loop {
            let notification = match notifications.recv().await {
                Ok(notification) => notification,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(room = %room, skipped, "Notification subscriber lagging");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            let text = match serde_json::to_string(&notification) {
                Ok(text) => text,
                Err(err) => {
                    tracing::error!(room = %room, "Failed to serialize notification: {}", err);
                    continue;
                }
            };

            if sender.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if let Message::Close(_) = message {
                break;
            }
        }
    });

    let send_finished = tokio::select! {
        _ = (&mut send_task) => true,
        _ = (&mut recv_task) => false,
    };

    if send_finished {
        recv_task.abort();
    } else {
        send_task.abort();
        // The room's receiver is only dropped once the aborted task has wound down
        let _ = send_task.await;
    }

    notifier.prune(room).await;

    tracing::debug!(room = %room, "Notification socket closed");
}
