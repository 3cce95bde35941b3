//! Shared types used across the assistant crates.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Response language. The closed set of locales the assistant speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English (the fallback for unset or unrecognized tags).
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// BCP-47-ish tag used on the wire.
    #[inline]
    pub const fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Returns all supported locales.
    pub fn all() -> [Self; 2] {
        [Locale::En, Locale::Es]
    }

    /// Collapses an optional wire tag to a supported locale.
    ///
    /// Unset, empty, or unrecognized tags resolve to [`Locale::En`]. Callers
    /// resolve once per request and reuse the result for both the success and
    /// failure paths, so the answer and the fallback always share a language.
    pub fn resolve(tag: Option<&str>) -> Self {
        match tag.map(str::trim) {
            Some("es") => Locale::Es,
            Some("en") => Locale::En,
            _ => Locale::En,
        }
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One turn of the visible conversation, owned by the chat widget.
///
/// The core only consumes the latest user message; history is accepted for
/// forward compatibility and otherwise ignored. The timestamp is whatever the
/// widget serialized (ISO string, epoch millis) and is never interpreted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<serde_json::Value>,
}

/// Global application configuration (gateway + generation). Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown on the status endpoint.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Directory holding the knowledge documents (one markdown file per category).
    pub knowledge_path: String,
    /// LLM mode: "mock" or "live".
    pub llm_mode: String,
    /// Chat-completions endpoint for live mode.
    pub llm_api_url: String,
    /// Model identifier sent to the provider.
    pub llm_model: String,
    /// Sampling temperature for generation.
    pub temperature: f32,
    /// Upper bound on completion length, in tokens.
    pub max_tokens: u32,
}

impl CoreConfig {
    /// Load config from file and environment.
    /// Precedence: env `LLAMITA_CONFIG` path > `config/llamita.toml` > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("LLAMITA_CONFIG").unwrap_or_else(|_| "config/llamita".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Llamita Assistant")?
            .set_default("port", 8001_i64)?
            .set_default("knowledge_path", "./knowledge")?
            .set_default("llm_mode", "mock")?
            .set_default("llm_api_url", "https://api.openai.com/v1/chat/completions")?
            .set_default("llm_model", "gpt-4o-mini")?
            .set_default("temperature", 0.7_f64)?
            .set_default("max_tokens", 400_i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() || Path::new(&format!("{}.toml", config_path)).exists() {
            builder.add_source(config::File::with_name(&config_path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("LLAMITA").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
