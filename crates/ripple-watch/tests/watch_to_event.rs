//! Watcher, queue, and consumer wired together over a temporary corpus.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use ripple_config::RippleConfig;
use ripple_engine::{BroadcastSink, ChangeProcessor};
use ripple_watch::{run_consumer, spawn_watcher};
use tempfile::TempDir;
use tokio::sync::mpsc;

fn config(dir: &TempDir) -> RippleConfig {
    let mut config = RippleConfig::default();
    config.corpus.root = dir.path().join("docs");
    config.state.path = dir.path().join("state.json");
    config.watch.poll = true;
    config.watch.poll_interval_ms = 50;
    config.watch.settle_interval_ms = 10;
    config.watch.settle_max_reads = 3;
    config
}

#[tokio::test]
async fn created_document_reaches_the_queue() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    fs::create_dir(&config.corpus.root).unwrap();

    let (_watcher, mut rx) = spawn_watcher(&config).unwrap();
    fs::write(config.corpus.root.join("ignored.png"), "png").unwrap();
    fs::write(config.corpus.root.join("A.md"), "Hello.").unwrap();

    let path = tokio::time::timeout(Duration::from_secs(10), rx.recv())
        .await
        .expect("notification within timeout")
        .expect("queue open");
    assert_eq!(path.file_name().unwrap(), "A.md");
}

#[tokio::test]
async fn consumer_processes_in_order_and_survives_failures() {
    let dir = tempfile::tempdir().unwrap();
    let config = config(&dir);
    let docs = config.corpus.root.clone();
    fs::create_dir(&docs).unwrap();
    fs::write(docs.join("A.md"), "One.").unwrap();

    let sink = BroadcastSink::new(8);
    let mut events = sink.subscribe();
    let processor = Arc::new(ChangeProcessor::from_config(&config, sink).unwrap());
    processor.bootstrap().unwrap();

    fs::write(docs.join("A.md"), "One.\n\nTwo.").unwrap();
    fs::write(docs.join("B.md"), "Mentions A.md directly.").unwrap();

    let (tx, rx) = mpsc::channel::<PathBuf>(4);
    tx.send(docs.join("Gone.md")).await.unwrap();
    tx.send(docs.join("A.md")).await.unwrap();
    tx.send(docs.join("A.md")).await.unwrap();
    tx.send(docs.join("B.md")).await.unwrap();
    drop(tx);

    let emitted = run_consumer(rx, Arc::clone(&processor)).await;
    assert_eq!(emitted, 2);

    let first = events.recv().await.unwrap();
    assert_eq!(first.changed_doc, "A.md");
    assert_eq!(first.new_snippets, vec!["Two."]);
    assert_eq!(first.impacted_docs["B.md"], vec!["Mentions A.md directly."]);

    let second = events.recv().await.unwrap();
    assert_eq!(second.changed_doc, "B.md");
    assert_eq!(second.summary, "Added 1 paragraph(s)");
}
