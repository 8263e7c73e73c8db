//! Full-corpus dependency graph construction.
//!
//! Rebuilt from scratch on every processing cycle: each ordered pair of
//! documents is checked, so cost is quadratic in document count and linear in
//! document size.

use std::collections::{BTreeMap, BTreeSet};

use ripple_core::text::{contains_whole_word, name_keywords};
use ripple_core::{DependencyEdge, RefKind};

use crate::corpus::DocumentSource;
use crate::error::EngineError;

/// Confidence of an explicit file-name reference.
pub const EXPLICIT_CONFIDENCE: f64 = 0.95;

/// Base confidence of an implicit keyword reference.
pub const IMPLICIT_BASE_CONFIDENCE: f64 = 0.6;

/// Confidence added per matched keyword.
pub const IMPLICIT_PER_KEYWORD: f64 = 0.05;

struct Candidate {
    name: String,
    keywords: BTreeSet<String>,
}

/// Build the dependency edges of the whole corpus.
///
/// For every ordered pair `(a, b)` with `a != b`:
/// - **explicit**: `a` mentions `b`'s exact file name as a whole word
/// - **implicit**: at least half (minimum one) of `b`'s name keywords occur
///   anywhere in `a`'s lower-cased text
///
/// At most one edge is kept per pair, the one with the highest confidence.
/// Edges are ordered by `(from_doc, to_doc)`. Documents that vanish between
/// listing and reading are skipped.
///
/// # Errors
///
/// Returns [`EngineError`] if the corpus cannot be listed or read.
pub fn build_graph(source: &dyn DocumentSource) -> Result<Vec<DependencyEdge>, EngineError> {
    let candidates: Vec<Candidate> = source
        .names()?
        .into_iter()
        .map(|name| Candidate {
            keywords: name_keywords(&name),
            name,
        })
        .collect();

    let mut best: BTreeMap<(String, String), DependencyEdge> = BTreeMap::new();

    for from in &candidates {
        let Some(text) = source.read(&from.name)? else {
            tracing::debug!(doc = %from.name, "document vanished during graph build");
            continue;
        };
        let lowered = text.to_lowercase();

        for to in candidates.iter().filter(|c| c.name != from.name) {
            if contains_whole_word(&text, &to.name) {
                keep_best(&mut best, edge(from, to, RefKind::Explicit, EXPLICIT_CONFIDENCE));
            }
            if let Some(confidence) = implicit_confidence(&to.keywords, &lowered) {
                keep_best(&mut best, edge(from, to, RefKind::Implicit, confidence));
            }
        }
    }

    let edges: Vec<DependencyEdge> = best.into_values().collect();
    tracing::debug!(documents = candidates.len(), edges = edges.len(), "dependency graph built");
    Ok(edges)
}

/// Confidence of an implicit reference, if the keyword threshold is met.
///
/// The threshold is `max(1, keywords / 2)` using integer division.
fn implicit_confidence(keywords: &BTreeSet<String>, lowered_text: &str) -> Option<f64> {
    let matched = keywords
        .iter()
        .filter(|k| lowered_text.contains(k.as_str()))
        .count();
    let threshold = (keywords.len() / 2).max(1);
    if matched < threshold {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let confidence = IMPLICIT_PER_KEYWORD.mul_add(matched as f64, IMPLICIT_BASE_CONFIDENCE);
    Some(confidence.min(1.0))
}

fn edge(from: &Candidate, to: &Candidate, kind: RefKind, confidence: f64) -> DependencyEdge {
    DependencyEdge {
        from_doc: from.name.clone(),
        to_doc: to.name.clone(),
        kind,
        confidence,
    }
}

/// Insert `edge` unless an edge for the same pair with at least its confidence
/// already exists.
fn keep_best(best: &mut BTreeMap<(String, String), DependencyEdge>, edge: DependencyEdge) {
    let key = (edge.from_doc.clone(), edge.to_doc.clone());
    match best.get(&key) {
        Some(existing) if existing.confidence >= edge.confidence => {}
        _ => {
            best.insert(key, edge);
        }
    }
}
