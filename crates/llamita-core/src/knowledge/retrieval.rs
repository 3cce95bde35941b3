//! Relevance classification and context assembly.
//!
//! `relevant_categories` maps a raw query to the categories whose keyword
//! sets hit it; `assemble_context` turns that set into the grounding string
//! handed to the generator. Both are pure given an unchanged store, so the
//! same query always produces the same context.

use super::store::{Category, KnowledgeError, KnowledgeStore};

/// Categories used when no keyword matches the query.
pub const DEFAULT_CATEGORIES: [Category; 2] = [Category::About, Category::Skills];

/// Returns the categories relevant to a query, in the store's stable order.
///
/// A category qualifies when any keyword from either locale's set is a
/// case-insensitive substring of the query; collisions across categories
/// include every hit. A query with no hits (empty, punctuation-only, or
/// simply off-topic) falls back to [`DEFAULT_CATEGORIES`], so the result is
/// never empty.
pub fn relevant_categories(store: &KnowledgeStore, query: &str) -> Vec<Category> {
    let query_lower = query.to_lowercase();

    let matched: Vec<Category> = store
        .list_categories()
        .into_iter()
        .filter(|&category| {
            let (en, es) = store.keywords(category);
            en.iter()
                .chain(es.iter())
                .any(|keyword| query_lower.contains(keyword))
        })
        .collect();

    if matched.is_empty() {
        DEFAULT_CATEGORIES.to_vec()
    } else {
        matched
    }
}

/// Concatenates the selected categories' documents into one grounding string.
///
/// Each body is preceded by a blank line and a marker naming its source file.
/// A category whose document cannot be read is skipped; an empty result means
/// "answer from general knowledge" and is valid.
pub fn assemble_context(store: &KnowledgeStore, categories: &[Category]) -> String {
    let mut context = String::new();
    for &category in categories {
        match store.get_document(category) {
            Ok(body) => {
                context.push_str("\n\n--- ");
                context.push_str(category.file_name());
                context.push_str(" ---\n");
                context.push_str(&body);
            }
            Err(KnowledgeError::NotFound(_)) => {
                tracing::debug!(
                    target: "llamita::knowledge",
                    category = %category,
                    "document missing, excluded from context"
                );
            }
            Err(e) => {
                tracing::warn!(
                    target: "llamita::knowledge",
                    category = %category,
                    error = %e,
                    "document unreadable, excluded from context"
                );
            }
        }
    }
    context
}
