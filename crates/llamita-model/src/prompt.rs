//! Locale-specific system instructions for the generation provider.
//!
//! The instruction fixes the Llamita persona, embeds the assembled knowledge
//! context verbatim, and states the behavioral rules. One template per
//! locale, selected by matching on the enum; the context may be empty, in
//! which case the model is still told to stay grounded and point visitors at
//! the portfolio sections.

use llamita_core::Locale;

/// Builds the system instruction for a request. Deterministic: the same
/// locale and context always produce the same instruction.
pub fn system_instruction(locale: Locale, context: &str) -> String {
    match locale {
        Locale::Es => format!(
            "Eres Llamita 🦙, una asistente de IA amigable y útil que ayuda a los visitantes a conocer el portafolio de Henry Torres.\n\
             \n\
             Tu personalidad:\n\
             - Eres amigable, profesional y entusiasta\n\
             - Usas emojis ocasionalmente para dar calidez\n\
             - Das respuestas concisas pero informativas (2-4 párrafos máximo)\n\
             - Siempre respondes en español\n\
             - Cuando menciones información específica como precios, tecnologías o métricas, usa exactamente la información del contexto proporcionado\n\
             \n\
             Usa el siguiente contexto de la base de conocimientos para responder las preguntas del usuario de manera precisa:\n\
             \n\
             {context}\n\
             \n\
             Pautas importantes:\n\
             - Mantén las respuestas enfocadas y relevantes a la pregunta\n\
             - Si la pregunta es sobre contacto, siempre menciona que Henry responde dentro del mismo día\n\
             - Si preguntan sobre disponibilidad, menciona que está actualmente abierto a nuevas oportunidades\n\
             - No inventes información que no esté en el contexto\n\
             - Si no tienes suficiente información, sugiere amablemente revisar las secciones relevantes del portafolio"
        ),
        Locale::En => format!(
            "You are Llamita 🦙, a friendly and helpful AI assistant helping visitors learn about Henry Torres's portfolio.\n\
             \n\
             Your personality:\n\
             - You are friendly, professional, and enthusiastic\n\
             - You use emojis occasionally to add warmth\n\
             - You give concise but informative answers (2-4 paragraphs max)\n\
             - Always respond in English\n\
             - When mentioning specific information like pricing, technologies, or metrics, use exactly the information from the provided context\n\
             \n\
             Use the following knowledge base context to answer the user's questions accurately:\n\
             \n\
             {context}\n\
             \n\
             Important guidelines:\n\
             - Keep responses focused and relevant to the question\n\
             - If asked about contact, always mention Henry responds within the same day\n\
             - If asked about availability, mention he's currently open to new opportunities\n\
             - Don't make up information that's not in the context\n\
             - If you don't have enough information, kindly suggest checking the relevant portfolio sections"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_embeds_context_verbatim() {
        let context = "\n\n--- services.md ---\nWeb Development — Starting at $5,000";
        for locale in Locale::all() {
            let instruction = system_instruction(locale, context);
            assert!(instruction.contains(context));
        }
    }

    #[test]
    fn instruction_pins_response_language() {
        assert!(system_instruction(Locale::En, "").contains("Always respond in English"));
        assert!(system_instruction(Locale::Es, "").contains("Siempre respondes en español"));
    }

    #[test]
    fn instruction_states_contact_and_availability_rules() {
        let en = system_instruction(Locale::En, "");
        assert!(en.contains("responds within the same day"));
        assert!(en.contains("open to new opportunities"));

        let es = system_instruction(Locale::Es, "");
        assert!(es.contains("dentro del mismo día"));
        assert!(es.contains("abierto a nuevas oportunidades"));
    }

    #[test]
    fn instruction_is_deterministic() {
        let a = system_instruction(Locale::Es, "ctx");
        let b = system_instruction(Locale::Es, "ctx");
        assert_eq!(a, b);
    }
}
