//! SQLite persistence for conversations and messages.

pub mod chat;
pub mod pool;
