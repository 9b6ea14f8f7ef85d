use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dao::models::ChatMessage;

/// Frames accepted from realtime WebSocket clients.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(tag = "type")]
pub enum ClientFrame {
    /// Identifies the connection, optionally binding it to a player for
    /// presence tracking.
    #[serde(rename = "hello", rename_all = "camelCase")]
    Hello {
        /// Player the connection belongs to, when signed in.
        #[serde(default)]
        player_id: Option<Uuid>,
    },
    /// A chat message to append and broadcast.
    #[serde(rename = "chat", rename_all = "camelCase")]
    Chat {
        /// Display name the sender typed.
        author: String,
        /// Message body.
        body: String,
        /// Sender, when the client knows it.
        #[serde(default)]
        player_id: Option<Uuid>,
    },
    /// Anything this server version does not understand.
    #[serde(other)]
    Unknown,
}

impl ClientFrame {
    /// Parse a frame from its JSON text representation.
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Envelope wrapping a hub event for delivery over a WebSocket.
#[derive(Debug, Serialize)]
pub struct WsFrame<'a> {
    /// Event name, e.g. `chat:new`.
    pub event: &'a str,
    /// Event payload.
    pub data: &'a serde_json::Value,
}

/// Public projection of a chat message.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageView {
    /// Stable identifier.
    pub id: Uuid,
    /// Sender, when the connection identified itself.
    pub player_id: Option<Uuid>,
    /// Display name the sender typed.
    pub author: String,
    /// Message body.
    pub body: String,
    /// Epoch milliseconds when the server accepted the message.
    pub at: u64,
}

impl From<&ChatMessage> for ChatMessageView {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id,
            player_id: message.player_id,
            author: message.author.clone(),
            body: message.body.clone(),
            at: message.at,
        }
    }
}

/// Recent chat history returned by `GET /api/messages`.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessagesResponse {
    /// Most recent messages, oldest first.
    pub messages: Vec<ChatMessageView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_frame_parses_with_and_without_player() {
        let frame = ClientFrame::from_json_str(r#"{"type":"hello"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Hello { player_id: None }));

        let id = Uuid::new_v4();
        let text = format!(r#"{{"type":"hello","playerId":"{id}"}}"#);
        let frame = ClientFrame::from_json_str(&text).unwrap();
        assert!(matches!(frame, ClientFrame::Hello { player_id: Some(got) } if got == id));
    }

    #[test]
    fn unknown_frames_do_not_fail_parsing() {
        let frame = ClientFrame::from_json_str(r#"{"type":"buzz"}"#).unwrap();
        assert!(matches!(frame, ClientFrame::Unknown));
    }
}
