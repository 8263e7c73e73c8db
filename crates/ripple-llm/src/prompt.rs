//! Analyst prompt construction.

use std::fmt::Write;

use ripple_core::ChangeEvent;

/// Snippets of each side previewed in the prompt.
const MAX_PREVIEWS: usize = 3;

/// Characters kept per previewed snippet.
const PREVIEW_CHARS: usize = 200;

const NONE: &str = "(none)";

/// Build the prompt asking for strict JSON feedback on `event`.
#[must_use]
pub fn build_prompt(event: &ChangeEvent) -> String {
    let old_text = previews(&event.old_snippets);
    let new_text = previews(&event.new_snippets);
    let docs_text = if event.impacted_docs.is_empty() {
        NONE.to_string()
    } else {
        event
            .impacted_docs
            .iter()
            .map(|(doc, snippets)| format!("- {doc}: {} snippet(s)", snippets.len()))
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut prompt = String::new();
    let _ = write!(
        prompt,
        "You are a documentation analyst. A policy has changed.\n\
         \n\
         Changed policy summary: {summary}\n\
         \n\
         Old text (preview):\n{old_text}\n\
         \n\
         New text (preview):\n{new_text}\n\
         \n\
         Documents that may be affected:\n{docs_text}\n\
         \n\
         Task: Return JSON with this schema (only JSON, no extra text):\n\
         {{\n  \"summary\": \"brief summary of the change impact\",\n  \
         \"severity\": \"low\",\n  \
         \"impacted_docs\": [\"list\", \"of\", \"doc\", \"names\"]\n}}\n",
        summary = event.summary,
    );
    prompt
}

fn previews(snippets: &[String]) -> String {
    if snippets.is_empty() {
        return NONE.to_string();
    }
    snippets
        .iter()
        .take(MAX_PREVIEWS)
        .map(|s| format!("- {}", s.chars().take(PREVIEW_CHARS).collect::<String>()))
        .collect::<Vec<_>>()
        .join("\n")
}
