//! Wire-format tests for records consumed outside the engine.

use std::collections::BTreeMap;

use pretty_assertions::assert_eq;
use ripple_core::{ChangeEvent, ImpactFeedback, Severity};

#[test]
fn change_event_matches_published_shape() {
    let mut impacted = BTreeMap::new();
    impacted.insert(
        "Support_Script.md".to_string(),
        vec!["Tell customers refunds take 14 days.".to_string()],
    );
    let event = ChangeEvent {
        changed_doc: "RefundPolicy.md".into(),
        summary: "Changed numeric value from 14 to 7".into(),
        old_snippets: vec!["Refunds within 14 days.".into()],
        new_snippets: vec!["Refunds within 7 days.".into()],
        impacted_docs: impacted,
    };

    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "changed_doc": "RefundPolicy.md",
            "summary": "Changed numeric value from 14 to 7",
            "old_snippets": ["Refunds within 14 days."],
            "new_snippets": ["Refunds within 7 days."],
            "impacted_docs": {
                "Support_Script.md": ["Tell customers refunds take 14 days."]
            }
        })
    );
}

#[test]
fn feedback_tolerates_missing_fields() {
    let feedback: ImpactFeedback =
        serde_json::from_str(r#"{"severity": "high"}"#).unwrap();
    assert_eq!(feedback.severity, Severity::High);
    assert!(feedback.summary.is_empty());
    assert!(feedback.impacted_docs.is_empty());
}

#[test]
fn fallback_is_medium_with_no_docs() {
    let feedback = ImpactFeedback::fallback("JSON parse failed");
    assert_eq!(feedback.summary, "JSON parse failed");
    assert_eq!(feedback.severity, Severity::Medium);
    assert!(feedback.impacted_docs.is_empty());
}
