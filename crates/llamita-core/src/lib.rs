//! llamita-core: assistant core library (shared types, bilingual knowledge
//! base, relevance classification, context assembly, and user-facing
//! fallback strings).
//!
//! Everything here is pure or read-only after startup; the one network
//! boundary (the generation provider) lives in `llamita-model`.

pub mod i18n;
mod knowledge;
mod shared;

pub use knowledge::{
    assemble_context, relevant_categories, Category, KnowledgeError, KnowledgeStore,
    DEFAULT_CATEGORIES,
};
pub use shared::{ChatMessage, CoreConfig, Locale, Role};
