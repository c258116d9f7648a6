//! ChannelEmitter trait definition.
//!
//! Unicast, fire-and-forget delivery of server events to the originating
//! connection only. No buffering, no retry, no acknowledgment tracking:
//! emitting into a closed channel is a no-op, and the orchestrator never
//! treats a dropped emit as a turn failure since persistence has already
//! succeeded.

use parley_types::event::ServerEvent;

/// Trait for the outbound event channel of one connection.
///
/// The WebSocket implementation lives in parley-api; tests use a recording
/// double.
pub trait ChannelEmitter: Send + Sync {
    /// Send one event to the originating channel. Never fails.
    fn emit(&self, event: ServerEvent) -> impl std::future::Future<Output = ()> + Send;
}
