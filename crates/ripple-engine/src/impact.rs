//! Selection of the paragraphs in dependent documents affected by a change.

use std::collections::BTreeMap;

use ripple_core::DependencyEdge;
use ripple_core::text::{name_keywords, token_set, truncate_chars};

use crate::corpus::DocumentSource;
use crate::error::EngineError;
use crate::splitter::split_paragraphs;

/// Maximum snippets reported per dependent document.
pub const MAX_SNIPPETS: usize = 3;

/// Character budget of the fallback snippet.
pub const FALLBACK_SNIPPET_CHARS: usize = 500;

/// Relevant snippets of every document with an edge pointing at `changed_doc`.
///
/// Paragraphs are scored by how many of their distinct tokens are key terms
/// of the changed document's name. Up to [`MAX_SNIPPETS`] paragraphs with a
/// positive score are kept, highest score first, ties in document order. When
/// nothing scores, the first paragraph (cut to [`FALLBACK_SNIPPET_CHARS`]) is
/// used instead, so a dependent document with any text is never left out.
/// Dependents missing from the corpus are skipped.
///
/// # Errors
///
/// Returns [`EngineError`] if reading a dependent document fails for a reason
/// other than its absence.
pub fn resolve_impacts(
    changed_doc: &str,
    edges: &[DependencyEdge],
    source: &dyn DocumentSource,
) -> Result<BTreeMap<String, Vec<String>>, EngineError> {
    let key_terms = name_keywords(changed_doc);
    let mut impacted = BTreeMap::new();

    for edge in edges.iter().filter(|e| e.to_doc == changed_doc) {
        let dependent = &edge.from_doc;
        if impacted.contains_key(dependent) {
            continue;
        }
        let Some(text) = source.read(dependent)? else {
            tracing::debug!(doc = %dependent, "dependent document missing; skipped");
            continue;
        };

        let paragraphs = split_paragraphs(&text);
        let mut scored: Vec<(usize, &str)> = paragraphs
            .iter()
            .map(|p| {
                let score = token_set(&p.text).intersection(&key_terms).count();
                (score, p.text.as_str())
            })
            .filter(|(score, _)| *score > 0)
            .collect();
        // Stable sort keeps document order among equal scores.
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let snippets: Vec<String> = if scored.is_empty() {
            paragraphs
                .first()
                .map(|p| truncate_chars(&p.text, FALLBACK_SNIPPET_CHARS))
                .into_iter()
                .collect()
        } else {
            scored
                .into_iter()
                .take(MAX_SNIPPETS)
                .map(|(_, text)| text.to_string())
                .collect()
        };

        if snippets.is_empty() {
            tracing::debug!(doc = %dependent, "dependent document has no paragraphs");
            continue;
        }
        impacted.insert(dependent.clone(), snippets);
    }

    Ok(impacted)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use ripple_core::RefKind;

    use super::*;
    use crate::corpus::MemoryCorpus;

    fn edge(from: &str, to: &str) -> DependencyEdge {
        DependencyEdge {
            from_doc: from.into(),
            to_doc: to.into(),
            kind: RefKind::Implicit,
            confidence: 0.65,
        }
    }

    #[test]
    fn top_three_by_score_then_order() {
        let corpus = MemoryCorpus::with_documents([(
            "Guide.md",
            "Intro without terms.\n\n\
             Shipping only.\n\n\
             Shipping rates apply.\n\n\
             Rates only.\n\n\
             More shipping rates detail.",
        )]);

        let impacted =
            resolve_impacts("shipping-rates.md", &[edge("Guide.md", "shipping-rates.md")], &corpus)
                .unwrap();
        assert_eq!(
            impacted["Guide.md"],
            vec![
                "Shipping rates apply.",
                "More shipping rates detail.",
                "Shipping only."
            ]
        );
    }

    #[test]
    fn fallback_impact_scenario() {
        let first = format!("Welcome. {}", "x".repeat(600));
        let text = format!("{first}\n\nSecond paragraph.");
        let corpus = MemoryCorpus::with_documents([("Onboarding.md", text.as_str())]);

        let impacted =
            resolve_impacts("RefundPolicy.md", &[edge("Onboarding.md", "RefundPolicy.md")], &corpus)
                .unwrap();
        let snippets = &impacted["Onboarding.md"];
        assert_eq!(snippets.len(), 1);
        assert!(snippets[0].chars().count() <= 500);
        assert!(snippets[0].starts_with("Welcome. xxx"));
        assert!(snippets[0].ends_with("..."));
    }

    #[test]
    fn short_first_paragraph_fallback_is_untouched() {
        let corpus = MemoryCorpus::with_documents([("Notes.md", "Short intro.\n\nMore.")]);
        let impacted =
            resolve_impacts("RefundPolicy.md", &[edge("Notes.md", "RefundPolicy.md")], &corpus)
                .unwrap();
        assert_eq!(impacted["Notes.md"], vec!["Short intro."]);
    }

    #[test]
    fn missing_dependent_is_skipped() {
        let corpus = MemoryCorpus::new();
        let impacted =
            resolve_impacts("RefundPolicy.md", &[edge("Gone.md", "RefundPolicy.md")], &corpus)
                .unwrap();
        assert!(impacted.is_empty());
    }

    #[test]
    fn only_edges_into_changed_doc_count() {
        let corpus = MemoryCorpus::with_documents([
            ("A.md", "mentions refundpolicy"),
            ("B.md", "unrelated"),
        ]);
        let edges = vec![edge("A.md", "RefundPolicy.md"), edge("B.md", "Other.md")];

        let impacted = resolve_impacts("RefundPolicy.md", &edges, &corpus).unwrap();
        assert_eq!(impacted.keys().collect::<Vec<_>>(), vec!["A.md"]);
        assert_eq!(impacted["A.md"], vec!["mentions refundpolicy"]);
    }
}
