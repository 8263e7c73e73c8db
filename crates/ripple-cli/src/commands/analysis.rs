//! LLM impact analysis of emitted change events.

use ripple_config::LlmConfig;
use ripple_core::{ChangeEvent, ImpactFeedback};
use ripple_llm::{GeminiClient, ImpactAnalyzer};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use crate::output::output_line;

#[derive(Debug, Serialize)]
struct AnalysisRecord<'a> {
    changed_doc: &'a str,
    analysis: &'a ImpactFeedback,
}

/// Build the analyzer if analysis is enabled and usable.
pub fn client(config: &LlmConfig) -> Option<GeminiClient> {
    if !config.enabled {
        return None;
    }
    if !config.is_configured() {
        tracing::warn!("llm.enabled is set but llm.api_key is empty; impact analysis disabled");
        return None;
    }
    match GeminiClient::new(config.clone()) {
        Ok(client) => Some(client),
        Err(error) => {
            tracing::warn!(%error, "failed to create LLM client; impact analysis disabled");
            None
        }
    }
}

/// Analyze every event published on `rx` until the channel closes.
pub fn spawn_listener(
    config: &LlmConfig,
    mut rx: broadcast::Receiver<ChangeEvent>,
) -> Option<JoinHandle<()>> {
    let client = client(config)?;
    tracing::info!(model = %config.model, "LLM impact analysis enabled");
    Some(tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let feedback = client.analyze(&event).await;
                    report(&event, &feedback);
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "analysis fell behind; events skipped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    }))
}

/// Log and print one analysis result.
pub fn report(event: &ChangeEvent, feedback: &ImpactFeedback) {
    tracing::info!(
        doc = %event.changed_doc,
        severity = %feedback.severity,
        summary = %feedback.summary,
        "impact analysis"
    );
    let record = AnalysisRecord {
        changed_doc: &event.changed_doc,
        analysis: feedback,
    };
    if let Err(error) = output_line(&record) {
        tracing::warn!(%error, "failed to print analysis");
    }
}
