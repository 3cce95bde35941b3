//! The generation-provider boundary.
//!
//! Everything upstream of this module is pure; this is the one place the
//! assistant performs network I/O. The provider is reached through the
//! narrow [`TextGenerator`] trait so the gateway and its tests can swap in
//! the deterministic mock (or a failing stub) without touching the pipeline.

use async_trait::async_trait;
use llamita_core::CoreConfig;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

const ENV_LLM_API_KEY: &str = "LLAMITA_LLM_API_KEY";

/// How long a provider call may run before it is treated as failed.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Mode for LLM invocation: mock (deterministic canned generation) or live
/// (calls the configured chat-completions API).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmMode {
    #[default]
    Mock,
    Live,
}

impl LlmMode {
    /// Parses the `llm_mode` config value; anything other than "live" is mock.
    pub fn parse(mode: &str) -> Self {
        match mode {
            "live" => LlmMode::Live,
            _ => LlmMode::Mock,
        }
    }
}

/// Errors from the generation provider.
#[derive(Debug)]
pub enum ProviderError {
    /// Live mode without `LLAMITA_LLM_API_KEY` in the environment.
    MissingApiKey,
    /// Transport failure, timeout, or non-success HTTP status.
    Http(reqwest::Error),
    /// The provider answered but produced no usable text.
    EmptyCompletion,
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::MissingApiKey => {
                write!(f, "{} is not set; cannot call the provider", ENV_LLM_API_KEY)
            }
            ProviderError::Http(e) => write!(f, "provider request failed: {}", e),
            ProviderError::EmptyCompletion => write!(f, "provider returned no completion text"),
        }
    }
}

impl std::error::Error for ProviderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProviderError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::Http(e)
    }
}

/// The one true I/O seam: given a system instruction and the user query,
/// return generated text or fail. Implementations must not panic.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, instruction: &str, query: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

/// Live generator against an OpenAI-compatible chat-completions endpoint.
///
/// One request per call, no retries; a timeout expiry surfaces as the same
/// [`ProviderError::Http`] as any other transport failure.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAiGenerator {
    pub fn new(config: &CoreConfig) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url: config.llm_api_url.clone(),
            model: config.llm_model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, instruction: &str, query: &str) -> Result<String, ProviderError> {
        // The gateway holds the key; it is read per call so a rotated key
        // takes effect without a restart.
        let api_key =
            std::env::var(ENV_LLM_API_KEY).map_err(|_| ProviderError::MissingApiKey)?;

        let payload = serde_json::json!({
            "model": self.model,
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
            "messages": [
                { "role": "system", "content": instruction },
                { "role": "user", "content": query },
            ],
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let parsed: ChatCompletion = response.json().await?;
        let text = parsed
            .choices
            .into_iter()
            .find_map(|choice| {
                let trimmed = choice.message.content.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .ok_or(ProviderError::EmptyCompletion)?;

        tracing::debug!(
            target: "llamita::model",
            model = %self.model,
            chars = text.len(),
            "completion received"
        );
        Ok(text)
    }
}

/// Deterministic offline generator, used when `llm_mode = "mock"` and in
/// tests. Echoes a preview of the grounding so callers can verify that the
/// context made it into the call.
pub struct MockGenerator;

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, instruction: &str, query: &str) -> Result<String, ProviderError> {
        let preview: String = instruction
            .chars()
            .filter(|c| !c.is_control())
            .take(80)
            .collect();
        Ok(format!(
            "[mock completion] Grounded on: {}... You asked: {}",
            preview, query
        ))
    }
}

/// Builds the generator the config asks for.
pub fn generator_from_config(
    config: &CoreConfig,
) -> Result<Box<dyn TextGenerator>, ProviderError> {
    match LlmMode::parse(&config.llm_mode) {
        LlmMode::Mock => Ok(Box::new(MockGenerator)),
        LlmMode::Live => Ok(Box::new(OpenAiGenerator::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_parsing_defaults_to_mock() {
        assert_eq!(LlmMode::parse("live"), LlmMode::Live);
        assert_eq!(LlmMode::parse("mock"), LlmMode::Mock);
        assert_eq!(LlmMode::parse("anything-else"), LlmMode::Mock);
    }

    #[tokio::test]
    async fn mock_generation_is_deterministic_and_grounded() {
        let generator = MockGenerator;
        let first = generator
            .generate("system instruction with services context", "what do you offer?")
            .await
            .unwrap();
        let second = generator
            .generate("system instruction with services context", "what do you offer?")
            .await
            .unwrap();
        assert_eq!(first, second);
        assert!(first.contains("services context"));
        assert!(first.contains("what do you offer?"));
    }

    #[test]
    fn provider_error_display_never_exposes_a_backtrace() {
        let rendered = ProviderError::EmptyCompletion.to_string();
        assert_eq!(rendered, "provider returned no completion text");
        assert!(ProviderError::MissingApiKey.to_string().contains("LLAMITA_LLM_API_KEY"));
    }
}
