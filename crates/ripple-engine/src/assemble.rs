use std::collections::BTreeMap;

use ripple_core::ChangeEvent;

use crate::differ::DocumentDiff;

/// Combine a document diff and its resolved impacts into the outbound record.
#[must_use]
pub fn assemble(diff: &DocumentDiff, impacted_docs: BTreeMap<String, Vec<String>>) -> ChangeEvent {
    ChangeEvent {
        changed_doc: diff.doc_name.clone(),
        summary: diff.summary.clone(),
        old_snippets: diff.removed.iter().map(|p| p.text.clone()).collect(),
        new_snippets: diff.added.iter().map(|p| p.text.clone()).collect(),
        impacted_docs,
    }
}
