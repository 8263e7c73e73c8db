//! Delivery of finished change events to external consumers.
//!
//! A successful [`EventSink::emit`] is what allows the processor to persist
//! the snapshot; a failed emit leaves the snapshot untouched so the change is
//! detected again on the next notification.

use std::io::Write;
use std::sync::Mutex;

use ripple_core::ChangeEvent;
use serde_jsonlines::JsonLinesWriter;
use tokio::sync::broadcast;

use crate::error::SinkError;

/// Receives every assembled [`ChangeEvent`].
pub trait EventSink: Send + Sync {
    /// Deliver `event`.
    ///
    /// # Errors
    ///
    /// Returns [`SinkError`] if the event could not be delivered.
    fn emit(&self, event: &ChangeEvent) -> Result<(), SinkError>;
}

/// In-process fan-out over a `tokio` broadcast channel.
///
/// Stands in for the notification server: any number of listeners subscribe.
/// Emitting with no subscribers is not an error. When a subscriber falls more
/// than `capacity` events behind, it observes a lag and skips ahead.
#[derive(Debug, Clone)]
pub struct BroadcastSink {
    sender: broadcast::Sender<ChangeEvent>,
    capacity: usize,
}

impl BroadcastSink {
    /// # Panics
    ///
    /// Panics if `capacity` is zero (rejected earlier by config validation).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender, capacity }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl EventSink for BroadcastSink {
    fn emit(&self, event: &ChangeEvent) -> Result<(), SinkError> {
        match self.sender.send(event.clone()) {
            Ok(count) => tracing::debug!(subscribers = count, doc = %event.changed_doc, "change event broadcast"),
            Err(_) => tracing::debug!(doc = %event.changed_doc, "change event broadcast with no subscribers"),
        }
        Ok(())
    }
}

/// Writes each event as one compact JSON line and flushes.
pub struct JsonLinesSink<W: Write + Send> {
    writer: Mutex<JsonLinesWriter<W>>,
}

impl<W: Write + Send> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(JsonLinesWriter::new(writer)),
        }
    }

    /// Consume the sink, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .into_inner()
    }
}

impl JsonLinesSink<std::io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> EventSink for JsonLinesSink<W> {
    fn emit(&self, event: &ChangeEvent) -> Result<(), SinkError> {
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        writer.write(event)?;
        writer.flush()?;
        Ok(())
    }
}

/// Delivers to every inner sink; fails if any of them fails.
///
/// All sinks are attempted even after a failure, so one broken consumer does
/// not starve the others.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl FanoutSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl EventSink for FanoutSink {
    fn emit(&self, event: &ChangeEvent) -> Result<(), SinkError> {
        let mut failed = 0;
        let mut first = None;
        for sink in &self.sinks {
            if let Err(e) = sink.emit(event) {
                tracing::warn!(error = %e, doc = %event.changed_doc, "sink failed");
                failed += 1;
                first.get_or_insert(e);
            }
        }
        match first {
            None => Ok(()),
            Some(first) => Err(SinkError::Fanout {
                failed,
                total: self.sinks.len(),
                first: Box::new(first),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::*;

    fn event() -> ChangeEvent {
        ChangeEvent {
            changed_doc: "A.md".into(),
            summary: "Added 1 paragraph(s)".into(),
            old_snippets: Vec::new(),
            new_snippets: vec!["New text.".into()],
            impacted_docs: BTreeMap::new(),
        }
    }

    struct FailingSink;

    impl EventSink for FailingSink {
        fn emit(&self, _event: &ChangeEvent) -> Result<(), SinkError> {
            Err(SinkError::Io(std::io::Error::other("listener gone")))
        }
    }

    #[test]
    fn json_lines_writes_one_line_per_event() {
        let sink = JsonLinesSink::new(Vec::new());
        sink.emit(&event()).unwrap();
        sink.emit(&event()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: ChangeEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed, event());
    }

    #[tokio::test]
    async fn broadcast_reaches_subscribers() {
        let sink = BroadcastSink::new(4);
        let mut rx = sink.subscribe();
        sink.emit(&event()).unwrap();
        assert_eq!(rx.recv().await.unwrap(), event());
    }

    #[test]
    fn broadcast_without_subscribers_is_ok() {
        let sink = BroadcastSink::new(4);
        assert_eq!(sink.subscriber_count(), 0);
        assert!(sink.emit(&event()).is_ok());
    }

    #[tokio::test]
    async fn fanout_tries_every_sink_and_reports_failure() {
        let broadcast = BroadcastSink::new(4);
        let mut rx = broadcast.subscribe();
        let fanout = FanoutSink::new().with(FailingSink).with(broadcast);

        let err = fanout.emit(&event()).unwrap_err();
        assert!(matches!(err, SinkError::Fanout { failed: 1, total: 2, .. }));
        assert_eq!(rx.recv().await.unwrap(), event());
    }
}
