//! WebSocket lifecycle: each connection gets a dedicated writer task, a
//! forwarder that replays every hub event to the client, and an inbound loop
//! for hello/chat frames. Presence is rebuilt purely from live connections.

use axum::extract::ws::{Message, WebSocket};
use futures::{SinkExt, StreamExt};
use tokio::sync::{broadcast::error::RecvError, mpsc};
use tokio::task::JoinHandle;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    dao::models::ChatMessage,
    dto::chat::{ChatMessageView, ClientFrame, WsFrame},
    services::events,
    state::{SharedState, clock},
};

/// How many messages `GET /api/messages` returns at most.
const RECENT_MESSAGES_LIMIT: usize = 50;

/// Handle the full lifecycle of one realtime WebSocket connection.
pub async fn handle_socket(state: SharedState, socket: WebSocket) {
    let (mut sender, mut receiver) = socket.split();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Message>();

    // Dedicated writer task keeps outbound messages flowing even while we
    // await inbound frames.
    let writer_task = tokio::spawn(async move {
        while let Some(message) = outbound_rx.recv().await {
            if sender.send(message).await.is_err() {
                break;
            }
        }
    });

    // Forwarder task replays every hub event onto this connection.
    let forwarder_tx = outbound_tx.clone();
    let mut hub_receiver = state.hub().subscribe();
    let forwarder_task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = forwarder_tx.closed() => break,
                received = hub_receiver.recv() => match received {
                    Ok(event) => {
                        let frame = WsFrame {
                            event: &event.name,
                            data: &event.payload,
                        };
                        match serde_json::to_string(&frame) {
                            Ok(text) => {
                                if forwarder_tx.send(Message::Text(text.into())).is_err() {
                                    break;
                                }
                            }
                            Err(err) => {
                                warn!(error = %err, "failed to serialize outbound frame");
                            }
                        }
                    }
                    Err(RecvError::Closed) => break,
                    Err(RecvError::Lagged(_)) => {
                        // Skip lagged events but keep the connection alive.
                        continue;
                    }
                },
            }
        }
    });

    let connection_id = Uuid::new_v4();
    info!(%connection_id, "realtime client connected");

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => match ClientFrame::from_json_str(&text) {
                Ok(ClientFrame::Hello { player_id }) => {
                    state.online().insert(connection_id, player_id);
                    events::broadcast_presence(&state);
                }
                Ok(ClientFrame::Chat {
                    author,
                    body,
                    player_id,
                }) => {
                    accept_chat_message(&state, author, body, player_id).await;
                }
                Ok(ClientFrame::Unknown) => {
                    warn!(%connection_id, "ignoring unknown frame");
                }
                Err(err) => {
                    warn!(%connection_id, error = %err, "failed to parse client frame");
                }
            },
            Ok(Message::Ping(payload)) => {
                let _ = outbound_tx.send(Message::Pong(payload));
            }
            Ok(Message::Close(frame)) => {
                info!(%connection_id, "realtime client closed");
                let _ = outbound_tx.send(Message::Close(frame));
                break;
            }
            Ok(Message::Binary(_)) => {}
            Ok(Message::Pong(_)) => {}
            Err(err) => {
                warn!(%connection_id, error = %err, "websocket error");
                break;
            }
        }
    }

    if state.online().remove(&connection_id).is_some() {
        events::broadcast_presence(&state);
    }
    info!(%connection_id, "realtime client disconnected");

    forwarder_task.abort();
    finalize(writer_task, outbound_tx).await;
}

/// Append a chat message, kick off its best-effort persist, and broadcast it.
/// Chat writes are fire-and-forget: a crash between append and flush loses
/// the tail of the log, which is acceptable for party chat.
async fn accept_chat_message(
    state: &SharedState,
    author: String,
    body: String,
    player_id: Option<Uuid>,
) {
    let message = ChatMessage {
        id: Uuid::new_v4(),
        player_id,
        author,
        body,
        at: clock::now_ms(),
    };

    state
        .messages()
        .write()
        .await
        .messages
        .push(message.clone());

    let persist_state = state.clone();
    tokio::spawn(async move {
        if let Err(err) = persist_state.persist_messages().await {
            warn!(error = %err, "failed to persist chat log");
        }
    });

    events::broadcast_chat_message(state, &message);
}

/// Most recent chat messages, oldest first.
pub async fn recent_messages(state: &SharedState) -> Vec<ChatMessageView> {
    let messages = state.messages().read().await;
    let skip = messages.messages.len().saturating_sub(RECENT_MESSAGES_LIMIT);
    messages
        .messages
        .iter()
        .skip(skip)
        .map(ChatMessageView::from)
        .collect()
}

/// Ensure the writer task winds down before we return from the socket handler.
async fn finalize(writer_task: JoinHandle<()>, outbound_tx: mpsc::UnboundedSender<Message>) {
    drop(outbound_tx);
    let _ = writer_task.await;
}
