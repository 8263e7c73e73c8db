//! Order-insensitive paragraph diffing against the stored snapshot.

use std::collections::HashSet;

use ripple_core::text::{digit_runs, truncate_chars};
use ripple_core::{Paragraph, Snapshot};

use crate::splitter::split_paragraphs;

/// Characters of each side shown in a "Replaced text" summary.
const REPLACED_PREVIEW_CHARS: usize = 60;

/// Outcome of diffing one document against its snapshot entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDiff {
    pub doc_name: String,
    /// Paragraphs whose hash disappeared, in previous document order.
    pub removed: Vec<Paragraph>,
    /// Paragraphs whose hash is new, in current document order.
    pub added: Vec<Paragraph>,
    pub summary: String,
    /// Full current paragraph list; replaces the snapshot entry once the
    /// cycle's event has been delivered.
    pub paragraphs: Vec<Paragraph>,
}

/// Diff `current_text` against the paragraphs stored for `doc_name`.
///
/// Comparison is by hash set: reordering paragraphs is not a change. Returns
/// `None` when no hash was added or removed. Never mutates the snapshot.
#[must_use]
pub fn diff_document(
    doc_name: &str,
    current_text: &str,
    snapshot: &Snapshot,
) -> Option<DocumentDiff> {
    let paragraphs = split_paragraphs(current_text);
    let previous = snapshot.get(doc_name).unwrap_or_default();

    let old_hashes: HashSet<&str> = previous.iter().map(|p| p.hash.as_str()).collect();
    let new_hashes: HashSet<&str> = paragraphs.iter().map(|p| p.hash.as_str()).collect();

    let removed = distinct_missing_from(previous, &new_hashes);
    let added = distinct_missing_from(&paragraphs, &old_hashes);

    if removed.is_empty() && added.is_empty() {
        return None;
    }

    let summary = summarize(&removed, &added);
    Some(DocumentDiff {
        doc_name: doc_name.to_string(),
        removed,
        added,
        summary,
        paragraphs,
    })
}

/// Paragraphs of `source` whose hash is not in `other`, first occurrence only.
fn distinct_missing_from(source: &[Paragraph], other: &HashSet<&str>) -> Vec<Paragraph> {
    let mut seen = HashSet::new();
    source
        .iter()
        .filter(|p| !other.contains(p.hash.as_str()) && seen.insert(p.hash.as_str()))
        .cloned()
        .collect()
}

/// One-line heuristic description of a diff.
///
/// Priority: a single replaced paragraph whose digit runs changed, any single
/// replacement, pure additions, pure removals, then a mixed update.
#[must_use]
pub fn summarize(removed: &[Paragraph], added: &[Paragraph]) -> String {
    match (removed, added) {
        ([old], [new]) => numeric_change(&old.text, &new.text).unwrap_or_else(|| {
            format!(
                "Replaced text: '{}' -> '{}'",
                truncate_chars(&old.text, REPLACED_PREVIEW_CHARS),
                truncate_chars(&new.text, REPLACED_PREVIEW_CHARS)
            )
        }),
        ([], added) => format!("Added {} paragraph(s)", added.len()),
        (removed, []) => format!("Removed {} paragraph(s)", removed.len()),
        (removed, added) => format!(
            "Updated document with {} additions and {} removals",
            added.len(),
            removed.len()
        ),
    }
}

/// `Some` when both texts contain digit runs and the sequences differ.
///
/// Reports the first position where the runs disagree, so unchanged numbers
/// earlier in the paragraph are skipped: "Plan 2024 costs 10" -> "Plan 2024
/// costs 12" reports `10 to 12`, not the leading `2024`. When one sequence is
/// a prefix of the other, the leading runs are reported.
fn numeric_change(old: &str, new: &str) -> Option<String> {
    let old_runs = digit_runs(old);
    let new_runs = digit_runs(new);
    if old_runs.is_empty() || new_runs.is_empty() || old_runs == new_runs {
        return None;
    }

    let (from, to) = old_runs
        .iter()
        .zip(&new_runs)
        .find(|(a, b)| a != b)
        .map_or((old_runs[0], new_runs[0]), |(a, b)| (*a, *b));
    Some(format!("Changed numeric value from {from} to {to}"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn snapshot_of(doc: &str, text: &str) -> Snapshot {
        let mut snapshot = Snapshot::new();
        snapshot.insert(doc, split_paragraphs(text));
        snapshot
    }

    fn texts(paragraphs: &[Paragraph]) -> Vec<&str> {
        paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn numeric_change_scenario() {
        let before = "Refund Policy\n\nRefunds are issued within 14 days of purchase.";
        let after = "Refund Policy\n\nRefunds are issued within 7 days of purchase.";
        let snapshot = snapshot_of("RefundPolicy.md", before);

        let diff = diff_document("RefundPolicy.md", after, &snapshot).expect("change detected");
        assert_eq!(diff.summary, "Changed numeric value from 14 to 7");
        assert_eq!(
            texts(&diff.removed),
            vec!["Refunds are issued within 14 days of purchase."]
        );
        assert_eq!(
            texts(&diff.added),
            vec!["Refunds are issued within 7 days of purchase."]
        );
        assert_eq!(diff.paragraphs.len(), 2);
    }

    #[test]
    fn unchanged_document_is_no_change_twice() {
        let text = "One.\n\nTwo.";
        let snapshot = snapshot_of("A.md", text);
        assert!(diff_document("A.md", text, &snapshot).is_none());
        assert!(diff_document("A.md", text, &snapshot).is_none());
    }

    #[test]
    fn reordering_is_not_a_change() {
        let snapshot = snapshot_of("A.md", "One.\n\nTwo.\n\nThree.");
        assert!(diff_document("A.md", "Three.\n\nOne.\n\nTwo.", &snapshot).is_none());
    }

    #[test]
    fn whitespace_only_edits_are_not_changes() {
        let snapshot = snapshot_of("A.md", "One.\n\nTwo.");
        assert!(diff_document("A.md", "\n\n  One.  \r\n\r\n\r\nTwo.\n", &snapshot).is_none());
    }

    #[test]
    fn additions_only() {
        let snapshot = snapshot_of("A.md", "One.");
        let diff = diff_document("A.md", "One.\n\nTwo.\n\nThree.", &snapshot).unwrap();
        assert_eq!(diff.summary, "Added 2 paragraph(s)");
        assert!(diff.removed.is_empty());
        assert_eq!(texts(&diff.added), vec!["Two.", "Three."]);
    }

    #[test]
    fn removals_only() {
        let snapshot = snapshot_of("A.md", "One.\n\nTwo.");
        let diff = diff_document("A.md", "Two.", &snapshot).unwrap();
        assert_eq!(diff.summary, "Removed 1 paragraph(s)");
        assert_eq!(texts(&diff.removed), vec!["One."]);
    }

    #[test]
    fn unseen_document_counts_as_all_added() {
        let diff = diff_document("New.md", "Hello.\n\nWorld.", &Snapshot::new()).unwrap();
        assert_eq!(diff.summary, "Added 2 paragraph(s)");
    }

    #[test]
    fn duplicated_paragraph_reported_once() {
        let snapshot = snapshot_of("A.md", "One.");
        let diff = diff_document("A.md", "One.\n\nTwo.\n\nTwo.", &snapshot).unwrap();
        assert_eq!(texts(&diff.added), vec!["Two."]);
        assert_eq!(diff.paragraphs.len(), 3);
    }

    #[test]
    fn mixed_update() {
        let snapshot = snapshot_of("A.md", "One.\n\nTwo.\n\nThree.");
        let diff = diff_document("A.md", "One.\n\nFour.\n\nFive.\n\nSix.", &snapshot).unwrap();
        assert_eq!(
            diff.summary,
            "Updated document with 3 additions and 2 removals"
        );
    }

    #[test]
    fn diff_does_not_touch_snapshot() {
        let snapshot = snapshot_of("A.md", "One.");
        let before = snapshot.clone();
        let _ = diff_document("A.md", "Two.", &snapshot);
        assert_eq!(snapshot, before);
    }

    #[rstest]
    #[case("Ship in 3 days.", "Ship in 5 days.", "Changed numeric value from 3 to 5")]
    #[case("Plan 2024 costs 10.", "Plan 2024 costs 12.", "Changed numeric value from 10 to 12")]
    #[case(
        "Call us on weekdays.",
        "Email us on weekdays.",
        "Replaced text: 'Call us on weekdays.' -> 'Email us on weekdays.'"
    )]
    #[case(
        "Valid for 30 days.",
        "Valid for 30 days, excluding holidays.",
        "Replaced text: 'Valid for 30 days.' -> 'Valid for 30 days, excluding holidays.'"
    )]
    #[case(
        "No numbers here.",
        "Now 5 numbers.",
        "Replaced text: 'No numbers here.' -> 'Now 5 numbers.'"
    )]
    fn single_replacement_summaries(#[case] old: &str, #[case] new: &str, #[case] expected: &str) {
        let summary = summarize(&[Paragraph::new(old)], &[Paragraph::new(new)]);
        assert_eq!(summary, expected);
    }

    #[test]
    fn replaced_text_preview_is_truncated() {
        let old = "a".repeat(100);
        let new = "b".repeat(100);
        let summary = summarize(&[Paragraph::new(&old)], &[Paragraph::new(&new)]);
        let expected = format!("Replaced text: '{}...' -> '{}...'", "a".repeat(57), "b".repeat(57));
        assert_eq!(summary, expected);
    }
}
