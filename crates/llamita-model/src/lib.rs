//! llamita-model: response generation for the assistant.
//!
//! Builds the locale-specific system instruction and sends it, with the raw
//! user query, to a text-generation provider behind the [`TextGenerator`]
//! seam. No state machine: one call, one success-or-error result; the
//! gateway owns the user-facing fallback.

mod generator;
mod prompt;

pub use generator::{
    generator_from_config, LlmMode, MockGenerator, OpenAiGenerator, ProviderError, TextGenerator,
};
pub use prompt::system_instruction;
