//! GenerationProvider trait definition.
//!
//! The one injected capability interface for AI generation: a text reply or
//! an image blob per prompt. Constructed once at process start and passed
//! into the turn engine, so tests substitute a double. Either call may fail
//! or stall; the orchestrator never treats that as fatal to the turn.

use parley_types::error::GenerationError;

/// Trait for generation backends.
///
/// Implementations live in parley-infra (e.g., `HttpGenerationProvider`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait GenerationProvider: Send + Sync {
    /// Generate a text reply for a prompt.
    fn generate_text(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;

    /// Generate an image for a prompt, returned as a base64 payload.
    fn generate_image(
        &self,
        prompt: &str,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}
