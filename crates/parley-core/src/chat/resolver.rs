//! Resolve an inbound turn to an owned conversation.
//!
//! A turn with no conversation id (or the `0` sentinel) lazily creates a
//! conversation titled after the triggering content. A turn with an id must
//! name a conversation that exists *and* belongs to the caller; anything
//! else is `AccessDenied`, with "not found" and "not yours" intentionally
//! indistinguishable.

use parley_types::chat::Conversation;
use parley_types::error::TurnError;

use crate::chat::repository::ChatRepository;

/// Maximum number of characters of content used for a derived title.
pub const TITLE_MAX_CHARS: usize = 50;

/// Outcome of conversation resolution.
#[derive(Debug, Clone)]
pub struct ResolvedChat {
    pub conversation: Conversation,
    /// True when this turn created the conversation.
    pub is_new: bool,
}

/// Derive a conversation title from the first message: the first 50
/// characters, with an ellipsis appended when truncated.
pub fn derive_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

/// Resolve a turn to an existing owned conversation, or create one.
pub async fn resolve<R: ChatRepository>(
    repo: &R,
    conversation_id: Option<i64>,
    owner_id: &str,
    content: &str,
) -> Result<ResolvedChat, TurnError> {
    match conversation_id {
        None | Some(0) => {
            let title = derive_title(content);
            tracing::debug!(owner_id, "creating new conversation");
            let conversation = repo.create_conversation(owner_id, &title).await?;
            Ok(ResolvedChat {
                conversation,
                is_new: true,
            })
        }
        Some(id) => {
            let conversation = repo
                .get_conversation(id, owner_id)
                .await?
                .ok_or(TurnError::AccessDenied)?;
            Ok(ResolvedChat {
                conversation,
                is_new: false,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_content_kept_verbatim() {
        assert_eq!(derive_title("hello there"), "hello there");
    }

    #[test]
    fn test_long_content_truncated_with_ellipsis() {
        let content = "a".repeat(80);
        let title = derive_title(&content);
        assert_eq!(title.len(), TITLE_MAX_CHARS + 3);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_exactly_fifty_chars_not_truncated() {
        let content = "b".repeat(TITLE_MAX_CHARS);
        assert_eq!(derive_title(&content), content);
    }

    #[test]
    fn test_multibyte_content_truncates_on_char_boundary() {
        let content = "é".repeat(60);
        let title = derive_title(&content);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }
}
