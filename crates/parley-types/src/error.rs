use thiserror::Error;

/// Errors from repository operations (used by trait definitions in parley-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors from the generation provider.
///
/// These never terminate a turn on their own: the orchestrator converts any
/// generation failure into a persisted fallback reply.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Errors that terminate a turn before or during orchestration.
///
/// The `Display` text of each variant is exactly what the client sees in the
/// `error` event payload. `AccessDenied` deliberately conflates "not found"
/// with "not yours" so conversation ids cannot be enumerated.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("User must be logged in")]
    Unauthenticated,

    #[error("Message content cannot be empty")]
    InvalidInput,

    #[error("Chat not found or access denied")]
    AccessDenied,

    #[error("storage error: {0}")]
    Repository(#[from] RepositoryError),
}
