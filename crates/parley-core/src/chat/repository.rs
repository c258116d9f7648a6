//! ChatRepository trait definition.
//!
//! Provides conversation and message persistence for the turn pipeline and
//! the plain CRUD endpoints. Every read that takes an `owner_id` is
//! ownership-scoped: a conversation owned by someone else is reported the
//! same way as one that does not exist.

use parley_types::chat::{Conversation, Message, MessageRole};
use parley_types::error::RepositoryError;

/// Repository trait for conversation and message persistence.
///
/// Implementations live in parley-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Create a new conversation for an owner. Writes exactly one row.
    fn create_conversation(
        &self,
        owner_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Conversation, RepositoryError>> + Send;

    /// Get a conversation by id, scoped to its owner.
    ///
    /// Returns `None` both when the id does not exist and when it belongs to
    /// a different owner -- callers cannot distinguish the two.
    fn get_conversation(
        &self,
        id: i64,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Conversation>, RepositoryError>> + Send;

    /// Append a message to a conversation. Messages are immutable once written.
    fn insert_message(
        &self,
        conversation_id: i64,
        role: MessageRole,
        content: &str,
        image: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Message, RepositoryError>> + Send;

    /// Bump the conversation's last-activity timestamp to now.
    ///
    /// A concurrently deleted conversation makes this a no-op, not an error.
    fn touch_conversation(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List an owner's conversations, most recently active first.
    fn list_conversations(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Conversation>, RepositoryError>> + Send;

    /// List a conversation's messages in creation order, scoped to the owner.
    ///
    /// An unknown or foreign conversation yields an empty list.
    fn list_messages(
        &self,
        conversation_id: i64,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Message>, RepositoryError>> + Send;

    /// Delete one conversation and (by cascade) its messages.
    ///
    /// Returns `RepositoryError::NotFound` when nothing matched.
    fn delete_conversation(
        &self,
        id: i64,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete all of an owner's conversations. Returns the number deleted.
    fn delete_all_conversations(
        &self,
        owner_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
