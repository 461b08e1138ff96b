//! Line stream processing: read, validate, submit, drain.
//!
//! Drives the dispatcher from a line-delimited reader (stdin in the CLI).
//! Lines that fail validation are skipped silently; end of stream or a read
//! error ends admission, and the dispatcher is always drained before this
//! module returns. A read error is reported only after the drain, as the
//! final error of the run.

use std::future::Future;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::dispatch::Dispatcher;
use crate::target::{CaptureTarget, TargetResolver};

/// Counts for one processed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Lines that resolved to a target and were submitted.
    pub submitted: u64,
    /// Lines that failed the extraction pattern.
    pub skipped: u64,
}

/// Read failure on the input stream. Carries the summary of everything
/// processed before the failure; all of it has been drained.
#[derive(Debug, thiserror::Error)]
#[error("error reading input stream: {source}")]
pub struct StreamError {
    pub summary: StreamSummary,
    #[source]
    pub source: std::io::Error,
}

/// Submits every valid line from `reader` to `dispatcher` and drains it.
///
/// Admission order follows line order; completion order is unspecified. Does
/// not return while any admitted capture is still running.
pub async fn process_lines<B, R, Fut>(
    reader: B,
    resolver: &TargetResolver,
    dispatcher: &Dispatcher<R>,
) -> Result<StreamSummary, StreamError>
where
    B: AsyncBufRead + Unpin,
    R: Fn(CaptureTarget) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    let mut lines = reader.lines();
    let mut summary = StreamSummary::default();
    let mut read_err = None;

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => match resolver.resolve(&line) {
                Some(target) => {
                    dispatcher.submit(target).await;
                    summary.submitted += 1;
                }
                None => {
                    tracing::trace!(line = %line, "line skipped: no capture path");
                    summary.skipped += 1;
                }
            },
            Ok(None) => break,
            Err(source) => {
                read_err = Some(source);
                break;
            }
        }
    }

    dispatcher.wait().await;

    match read_err {
        None => Ok(summary),
        Some(source) => Err(StreamError { summary, source }),
    }
}
