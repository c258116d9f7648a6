//! Conversation and message types for Parley.
//!
//! These types model a persistent conversation between one owner and the
//! assistant: the conversation record itself and its ordered messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a message within a conversation.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (role IN ('user', 'assistant'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Whether a turn asks for a text reply or a generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnKind {
    Text,
    Image,
}

impl fmt::Display for TurnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnKind::Text => write!(f, "text"),
            TurnKind::Image => write!(f, "image"),
        }
    }
}

/// A conversation between one owner and the assistant.
///
/// The owner identity is an opaque external identifier and is immutable
/// after creation. `updated_at` is bumped after every completed turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: i64,
    pub owner_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message within a conversation.
///
/// Messages are immutable once written and ordered by `created_at`
/// (id as tiebreak). Image-bearing messages carry a base64 payload in
/// `image`; `content` still holds the text (or the image prompt).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    pub conversation_id: i64,
    pub role: MessageRole,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        assert!("system".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_turn_kind_serde() {
        assert_eq!(serde_json::to_string(&TurnKind::Image).unwrap(), "\"image\"");
        assert_eq!(serde_json::to_string(&TurnKind::Text).unwrap(), "\"text\"");
    }

    #[test]
    fn test_message_serializes_camel_case() {
        let message = Message {
            id: 7,
            conversation_id: 3,
            role: MessageRole::User,
            content: "hello".to_string(),
            image: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"conversationId\":3"));
        assert!(json.contains("\"role\":\"user\""));
        // Absent image payload is omitted entirely.
        assert!(!json.contains("image"));
    }
}
