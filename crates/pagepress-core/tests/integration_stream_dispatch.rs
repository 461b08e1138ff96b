//! Integration test: line stream through dispatcher to per-target artifacts.
//!
//! Feeds a mixed input stream through the resolver and a bounded dispatcher
//! whose runner writes one file per target, then asserts the concurrency
//! bound, the drain, and the derived artifact names.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use pagepress_core::dispatch::Dispatcher;
use pagepress_core::stream::process_lines;
use pagepress_core::target::{parse_target_url, CaptureTarget, TargetResolver};
use tempfile::tempdir;
use tokio::io::BufReader;

#[tokio::test]
async fn stream_produces_one_artifact_per_valid_line() {
    let out_dir = tempdir().unwrap();
    let base = parse_target_url("http://example.com/site").unwrap();
    let resolver = TargetResolver::new(base, out_dir.path(), "pdf");

    let current = Arc::new(AtomicUsize::new(0));
    let max_seen = Arc::new(AtomicUsize::new(0));
    let cur = Arc::clone(&current);
    let max = Arc::clone(&max_seen);

    let limit = 2;
    let dispatcher = Dispatcher::new(limit, move |target: CaptureTarget| {
        let cur = Arc::clone(&cur);
        let max = Arc::clone(&max);
        async move {
            let now = cur.fetch_add(1, Ordering::SeqCst) + 1;
            max.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            tokio::fs::write(&target.output, target.url.as_str()).await?;
            cur.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }
    });

    let input = b"/docs/intro\nGET nothing\n/docs/setup\n/\n/a b trailing\n" as &[u8];
    let summary = process_lines(BufReader::new(input), &resolver, &dispatcher)
        .await
        .expect("stream processes cleanly");

    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.skipped, 1);
    assert!(max_seen.load(Ordering::SeqCst) <= limit);
    assert_eq!(dispatcher.outstanding(), 0, "drained after process_lines");
    assert_eq!(dispatcher.failures(), 0);

    for name in ["_docs_intro.pdf", "_docs_setup.pdf", "_.pdf", "_a.pdf"] {
        assert!(
            out_dir.path().join(name).exists(),
            "expected artifact {name}"
        );
    }

    let content = std::fs::read_to_string(out_dir.path().join("_docs_intro.pdf")).unwrap();
    assert_eq!(content, "http://example.com/site/docs/intro");
}

#[tokio::test]
async fn failed_captures_do_not_stop_the_stream() {
    let base = parse_target_url("http://example.com").unwrap();
    let resolver = TargetResolver::new(base, ".", "pdf");

    let dispatcher = Dispatcher::new(1, |target: CaptureTarget| async move {
        if target.url.path() == "/bad" {
            anyhow::bail!("render failed");
        }
        Ok(())
    });

    let input = b"/ok1\n/bad\n/ok2\n" as &[u8];
    let summary = process_lines(BufReader::new(input), &resolver, &dispatcher)
        .await
        .unwrap();

    assert_eq!(summary.submitted, 3);
    assert_eq!(dispatcher.failures(), 1);
    assert_eq!(dispatcher.outstanding(), 0);
}
