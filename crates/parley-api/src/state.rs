//! Application state wiring all services together.
//!
//! The turn engine is generic over repository/provider traits, but AppState
//! pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;

use parley_core::turn::TurnEngine;
use parley_infra::config::{GEMINI_API_KEY_VAR, HF_API_KEY_VAR, api_key_from_env, load_config};
use parley_infra::generation::HttpGenerationProvider;
use parley_infra::sqlite::chat::SqliteChatRepository;
use parley_infra::sqlite::pool::DatabasePool;
use parley_types::config::AppConfig;

/// Concrete type alias for the engine generics pinned to infra implementations.
pub type ConcreteTurnEngine = TurnEngine<SqliteChatRepository, HttpGenerationProvider>;

/// Shared application state holding the turn engine and configuration.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ConcreteTurnEngine>,
    pub config: AppConfig,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire
    /// the generation provider and turn engine.
    pub async fn init(data_dir_override: Option<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir(data_dir_override);

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join(&config.database_file).display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let repo = SqliteChatRepository::new(db_pool.clone());

        let gemini_key = require_key(GEMINI_API_KEY_VAR);
        let hf_key = require_key(HF_API_KEY_VAR);
        let provider = HttpGenerationProvider::new(
            gemini_key,
            hf_key,
            config.text_model.clone(),
            config.image_endpoint.clone(),
        );

        let engine = TurnEngine::new(repo, provider);

        Ok(Self {
            engine: Arc::new(engine),
            config,
            data_dir,
            db_pool,
        })
    }
}

/// Resolve the data directory: explicit flag, then `PARLEY_DATA_DIR`,
/// then `~/.parley`.
fn resolve_data_dir(data_dir_override: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = data_dir_override {
        return dir;
    }
    if let Ok(dir) = std::env::var("PARLEY_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".parley")
}

/// Read an API key from the environment, warning when absent.
///
/// A missing key does not abort startup; generation requests will fail
/// with an authentication error and turns fall back to the apology reply.
fn require_key(var: &str) -> SecretString {
    match api_key_from_env(var) {
        Some(key) => key,
        None => {
            tracing::warn!("{var} is not set; generation requests will fail");
            SecretString::from("")
        }
    }
}
