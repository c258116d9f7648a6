//! Turn orchestration: one inbound user message driven to a terminal,
//! user-visible state.
//!
//! The engine sequences validation, conversation resolution, user-message
//! persistence, intent classification, generation, assistant-message
//! persistence, the conversation timestamp touch, and event emission.

pub mod emitter;
pub mod engine;

pub use emitter::ChannelEmitter;
pub use engine::{FALLBACK_REPLY, TurnEngine};
