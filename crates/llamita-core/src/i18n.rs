//! Locale-keyed user-facing strings.
//!
//! Every string the gateway can return without the generator lives here.
//! English is the defined fallback when a locale has no entry in the table.

use crate::shared::Locale;

/// Static strings for one locale.
pub struct UiMessages {
    /// Served with HTTP 400 when the message field is missing or empty.
    pub invalid_input: &'static str,
    /// Served with HTTP 500 when the generation provider fails; apologizes
    /// and offers a direct contact path so the user is never stranded.
    pub generation_fallback: &'static str,
}

static MESSAGES: [(Locale, UiMessages); 2] = [
    (
        Locale::En,
        UiMessages {
            invalid_input: "Please include a message so Llamita can help you.",
            generation_fallback: "Hi! I'm Llamita 🦙, Henry's portfolio assistant. I'm experiencing technical difficulties right now. Please explore the portfolio sections or contact Henry directly at henry.torres@example.com",
        },
    ),
    (
        Locale::Es,
        UiMessages {
            invalid_input: "Por favor incluye un mensaje para que Llamita pueda ayudarte.",
            generation_fallback: "¡Hola! Soy Llamita 🦙, la asistente del portafolio de Henry. Estoy teniendo problemas técnicos en este momento. Por favor, explora las secciones del portafolio o contacta a Henry directamente en henry.torres@example.com",
        },
    ),
];

/// Looks up the message table for a locale, falling back to the first entry
/// (English) if the locale has no row.
pub fn ui_messages(locale: Locale) -> &'static UiMessages {
    MESSAGES
        .iter()
        .find(|(l, _)| *l == locale)
        .map(|(_, m)| m)
        .unwrap_or(&MESSAGES[0].1)
}
