//! Socket event types for the real-time turn channel.
//!
//! Both directions use JSON text frames tagged `{"event": ..., "data": ...}`.
//! Inbound: `sendMessageToAi` carrying a [`TurnRequest`], plus a keep-alive
//! `ping`. Outbound: `receive` (user message persisted), `aiResponse`
//! (assistant message persisted), `error` (turn rejected before any write),
//! and `pong`.

use serde::{Deserialize, Serialize};

use crate::chat::{Conversation, Message, TurnKind};

/// One inbound turn: a user message and where it should land.
///
/// `conversation_id` of `None` or `0` means "start a new conversation".
/// `owner_id` is validated by the orchestrator, not the codec, so a missing
/// identity still parses and produces a proper `error` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default)]
    pub conversation_id: Option<i64>,
    pub content: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Incoming event from a socket client.
///
/// Unknown or malformed frames are logged and ignored by the connection
/// handler.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    /// A user turn to orchestrate.
    SendMessageToAi(TurnRequest),
    /// Keep-alive ping. Server responds with `pong`.
    Ping,
}

/// Outgoing event to the originating socket client only.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    /// The user's message was persisted. `chat` is present only when the
    /// conversation was newly created by this turn.
    #[serde(rename_all = "camelCase")]
    Receive {
        #[serde(skip_serializing_if = "Option::is_none")]
        chat: Option<Conversation>,
        user_message: Message,
    },
    /// The assistant's reply (real or fallback) was persisted.
    #[serde(rename_all = "camelCase")]
    AiResponse {
        message: Message,
        chat_id: i64,
        #[serde(rename = "type")]
        kind: TurnKind,
        #[serde(skip_serializing_if = "std::ops::Not::not")]
        error: bool,
    },
    /// The turn was rejected before any write.
    Error { error: String },
    /// Reply to a client `ping`.
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageRole;
    use chrono::Utc;

    fn sample_message() -> Message {
        Message {
            id: 2,
            conversation_id: 1,
            role: MessageRole::Assistant,
            content: "hi".to_string(),
            image: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_client_event_parses_send_message() {
        let frame = r#"{"event":"sendMessageToAi","data":{"conversationId":null,"content":"hello","ownerId":"user_1","image":null}}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        match event {
            ClientEvent::SendMessageToAi(turn) => {
                assert_eq!(turn.conversation_id, None);
                assert_eq!(turn.content, "hello");
                assert_eq!(turn.owner_id.as_deref(), Some("user_1"));
                assert!(turn.image.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_client_event_tolerates_missing_optionals() {
        let frame = r#"{"event":"sendMessageToAi","data":{"content":"hello"}}"#;
        let event: ClientEvent = serde_json::from_str(frame).unwrap();
        match event {
            ClientEvent::SendMessageToAi(turn) => {
                assert!(turn.conversation_id.is_none());
                assert!(turn.owner_id.is_none());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_ai_response_wire_shape() {
        let event = ServerEvent::AiResponse {
            message: sample_message(),
            chat_id: 1,
            kind: TurnKind::Text,
            error: false,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"aiResponse\""));
        assert!(json.contains("\"chatId\":1"));
        assert!(json.contains("\"type\":\"text\""));
        // The error flag is only present when set.
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_ai_response_error_flag_present_when_set() {
        let event = ServerEvent::AiResponse {
            message: sample_message(),
            chat_id: 1,
            kind: TurnKind::Image,
            error: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"error\":true"));
    }

    #[test]
    fn test_receive_omits_chat_for_existing_conversation() {
        let event = ServerEvent::Receive {
            chat: None,
            user_message: sample_message(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"receive\""));
        assert!(json.contains("\"userMessage\""));
        assert!(!json.contains("\"chat\""));
    }
}
