//! CLI for pagepress: parse flags, wire the capture pipeline, drive stdin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;

use pagepress_core::capture::{proxy_server_arg, CaptureRunner};
use pagepress_core::config;
use pagepress_core::dispatch::{effective_limit, Dispatcher};
use pagepress_core::stream::process_lines;
use pagepress_core::target::{parse_target_url, CaptureTarget, TargetResolver};

/// Reads candidate paths from stdin, one per line, and prints each matching
/// page under the base URL to a PDF. Lines that don't start with `/` are
/// skipped. The run ends when stdin closes and every capture has finished.
#[derive(Debug, Parser)]
#[command(name = "pagepress")]
#[command(about = "pagepress: bulk page-to-PDF capture driven by paths on stdin", long_about = None)]
pub struct Cli {
    /// Base URL every capture path is resolved against.
    #[arg(short = 'u', long = "base-url")]
    pub base_url: String,

    /// Directory where the PDFs are stored.
    #[arg(short = 'd', long, default_value = ".")]
    pub directory: PathBuf,

    /// URL of an http/https proxy to route captures through.
    #[arg(short = 'p', long)]
    pub proxy: Option<String>,

    /// Number of concurrent captures (default: config, else CPU count).
    #[arg(short = 't', long, value_name = "N")]
    pub threads: Option<usize>,

    /// Exit non-zero if any capture failed (default: failures are only logged).
    #[arg(long)]
    pub strict: bool,

    /// Skip the implicit capture of the base URL's root page.
    #[arg(long)]
    pub no_root: bool,
}

pub async fn run_from_args() -> Result<()> {
    Cli::parse().run().await
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = config::load_or_init().context("error loading configuration")?;
        tracing::debug!("loaded config: {:?}", cfg);

        // Configuration errors abort here, before any submission.
        let base = parse_target_url(&self.base_url)
            .with_context(|| format!("error parsing URL for {:?}", "base-url"))?;
        let proxy_server = match self.proxy.as_deref() {
            Some(proxy) => {
                let url = parse_target_url(proxy)
                    .with_context(|| format!("error parsing URL for {:?}", "proxy"))?;
                Some(proxy_server_arg(&url))
            }
            None => None,
        };

        let resolver = TargetResolver::new(base, &self.directory, &cfg.extension);
        let runner = Arc::new(CaptureRunner::new(
            &cfg.browser,
            &cfg.extra_args,
            proxy_server,
        ));

        let limit = effective_limit(self.threads.or(cfg.default_jobs));
        tracing::info!(limit, base = %resolver.base(), "starting capture run");

        let dispatcher = Dispatcher::new(limit, move |target: CaptureTarget| {
            let runner = Arc::clone(&runner);
            async move { runner.capture(&target).await.map_err(anyhow::Error::from) }
        });

        // The root page is always captured first unless opted out.
        let mut preloaded = 0u64;
        if !self.no_root {
            if let Some(root) = resolver.resolve("/") {
                dispatcher.submit(root).await;
                preloaded += 1;
            }
        }

        let stdin = BufReader::new(tokio::io::stdin());
        let result = process_lines(stdin, &resolver, &dispatcher).await;

        let failures = dispatcher.failures();
        let summary = match result {
            Ok(summary) => summary,
            Err(err) => {
                // All admitted captures have drained; the read error is the
                // final error of the run.
                tracing::error!(
                    submitted = err.summary.submitted,
                    skipped = err.summary.skipped,
                    failures,
                    "input stream failed after partial processing"
                );
                return Err(anyhow::Error::new(err).context("error reading standard input"));
            }
        };

        let submitted = summary.submitted + preloaded;
        println!(
            "{} page(s) captured, {} line(s) skipped, {} failure(s)",
            submitted.saturating_sub(failures),
            summary.skipped,
            failures
        );

        if self.strict && failures > 0 {
            anyhow::bail!("{failures} capture(s) failed");
        }

        Ok(())
    }
}
