//! The turn engine: the state machine at the heart of the server.
//!
//! Per turn: validate, resolve the conversation, persist the user message,
//! classify, generate, persist the assistant message (real reply or
//! fallback), touch the conversation, and emit events to the originating
//! channel.
//!
//! Ordering guarantees:
//! - the user message is persisted before any generation attempt;
//! - a turn that persists a user message always persists an assistant
//!   message too, even when generation fails;
//! - validation and access failures happen before any write and produce a
//!   single `error` event instead of the two-event sequence.
//!
//! Turns for the same conversation are not mutually excluded; interleaved
//! writes from concurrent turns are accepted. No step is wrapped in a
//! transaction spanning another, and there is no local timeout on the
//! generation call.

use parley_types::chat::{MessageRole, TurnKind};
use parley_types::error::TurnError;
use parley_types::event::{ServerEvent, TurnRequest};
use tracing::{info, warn};

use crate::chat::repository::ChatRepository;
use crate::chat::resolver;
use crate::generation::GenerationProvider;
use crate::intent::classify;
use crate::turn::emitter::ChannelEmitter;

/// Fixed apology persisted and emitted when generation fails, so every
/// turn still reaches a visible terminal state.
pub const FALLBACK_REPLY: &str = "Sorry, I encountered an error processing your request.";

/// Orchestrates one inbound turn end to end.
///
/// Generic over `ChatRepository` and `GenerationProvider` to maintain
/// clean architecture (parley-core never depends on parley-infra).
pub struct TurnEngine<R: ChatRepository, G: GenerationProvider> {
    repo: R,
    provider: G,
}

impl<R: ChatRepository, G: GenerationProvider> TurnEngine<R, G> {
    /// Create a new engine with the given repository and provider.
    pub fn new(repo: R, provider: G) -> Self {
        Self { repo, provider }
    }

    /// Access the chat repository (used by the plain CRUD endpoints).
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Drive one turn to completion, emitting events along the way.
    ///
    /// Fatal failures (validation, access, storage) are reported as a single
    /// `error` event; this method itself never fails.
    pub async fn run_turn(&self, turn: TurnRequest, emitter: &impl ChannelEmitter) {
        if let Err(err) = self.process(turn, emitter).await {
            warn!(error = %err, "turn rejected");
            emitter
                .emit(ServerEvent::Error {
                    error: err.to_string(),
                })
                .await;
        }
    }

    async fn process(
        &self,
        turn: TurnRequest,
        emitter: &impl ChannelEmitter,
    ) -> Result<(), TurnError> {
        // Validate before any write.
        let owner_id = turn
            .owner_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(TurnError::Unauthenticated)?;
        let content = turn.content.trim();
        if content.is_empty() {
            return Err(TurnError::InvalidInput);
        }

        let resolved = resolver::resolve(&self.repo, turn.conversation_id, owner_id, content).await?;
        let chat_id = resolved.conversation.id;
        info!(
            owner_id,
            conversation_id = chat_id,
            is_new = resolved.is_new,
            "processing turn"
        );

        // The user's message is durable before any generation attempt.
        let user_message = self
            .repo
            .insert_message(chat_id, MessageRole::User, content, turn.image.as_deref())
            .await?;
        emitter
            .emit(ServerEvent::Receive {
                chat: resolved.is_new.then(|| resolved.conversation.clone()),
                user_message,
            })
            .await;

        // Classification always looks at the original message, even when an
        // image attachment came along.
        let intent = classify(&turn.content);

        let generated = match intent.kind {
            TurnKind::Image => {
                info!(conversation_id = chat_id, prompt = %intent.prompt, "generating image");
                self.provider
                    .generate_image(&intent.prompt)
                    .await
                    .map(|blob| (intent.prompt.clone(), Some(blob)))
            }
            TurnKind::Text => {
                // The provider has no separate image-understanding channel,
                // so an attachment is signalled inline.
                let prompt = if turn.image.is_some() {
                    format!("User message: {content}. [Image attached]")
                } else {
                    content.to_string()
                };
                self.provider
                    .generate_text(&prompt)
                    .await
                    .map(|reply| (reply, None))
            }
        };

        // An assistant message is written either way: the real reply, or the
        // fixed apology when generation failed.
        let (reply, image, failed) = match generated {
            Ok((reply, image)) => (reply, image, false),
            Err(err) => {
                warn!(conversation_id = chat_id, error = %err, "generation failed, persisting fallback reply");
                (FALLBACK_REPLY.to_string(), None, true)
            }
        };

        let message = self
            .repo
            .insert_message(chat_id, MessageRole::Assistant, &reply, image.as_deref())
            .await?;
        self.repo.touch_conversation(chat_id).await?;

        emitter
            .emit(ServerEvent::AiResponse {
                message,
                chat_id,
                kind: intent.kind,
                error: failed,
            })
            .await;

        Ok(())
    }
}
