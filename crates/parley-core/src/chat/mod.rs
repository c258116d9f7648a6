//! Conversation persistence abstractions and ownership resolution.
//!
//! This module defines the `ChatRepository` trait that the infrastructure
//! layer implements, and the resolver that maps an optional conversation id
//! plus an owner identity onto an owned conversation.

pub mod repository;
pub mod resolver;
