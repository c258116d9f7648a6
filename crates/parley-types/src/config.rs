//! Server configuration for Parley.
//!
//! Deserialized from `{data_dir}/config.toml` by the infra loader. API keys
//! are never part of this file; they come from the environment.

use serde::{Deserialize, Serialize};

/// Global server configuration with sensible defaults for every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Bind address for the HTTP/WebSocket server.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Allowed CORS origin. `None` allows any origin.
    pub allowed_origin: Option<String>,
    /// SQLite database filename inside the data directory.
    pub database_file: String,
    /// Text generation model identifier.
    pub text_model: String,
    /// Image generation endpoint URL.
    pub image_endpoint: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            allowed_origin: None,
            database_file: "parley.db".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_endpoint:
                "https://router.huggingface.co/fal-ai/fal-ai/stable-diffusion-v3-medium"
                    .to_string(),
        }
    }
}
