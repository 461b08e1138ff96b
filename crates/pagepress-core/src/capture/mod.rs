//! Capture task runner: renders one page to PDF via an external browser.
//!
//! The runner is the side-effecting collaborator of the dispatcher. It builds
//! the browser command line, spawns the process, and reports success or
//! failure back through its `Result`; the dispatcher decides what a failure
//! means for the run (log and continue, by default).

mod command;
mod proxy;

use std::process::ExitStatus;

use tokio::process::Command;

use crate::target::CaptureTarget;
pub use command::capture_args;
pub use proxy::proxy_server_arg;

/// Error from one capture invocation. Contained per task; never fatal to the
/// overall run.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("error spawning {browser:?}: {source}")]
    Spawn {
        browser: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{browser:?} exited with {status}")]
    Exit { browser: String, status: ExitStatus },
}

/// Invokes a headless browser to print pages to PDF.
#[derive(Debug, Clone)]
pub struct CaptureRunner {
    browser: String,
    extra_args: Vec<String>,
    proxy_server: Option<String>,
}

impl CaptureRunner {
    /// `proxy_server` is the pre-built `--proxy-server` value (see
    /// [`proxy_server_arg`]), or `None` for direct connections.
    pub fn new(browser: &str, extra_args: &[String], proxy_server: Option<String>) -> Self {
        Self {
            browser: browser.to_string(),
            extra_args: extra_args.to_vec(),
            proxy_server,
        }
    }

    /// Renders `target.url` into `target.output`. Suspends until the browser
    /// process exits; a non-zero exit is an error.
    pub async fn capture(&self, target: &CaptureTarget) -> Result<(), CaptureError> {
        let args = capture_args(
            &self.extra_args,
            self.proxy_server.as_deref(),
            &target.output,
            target.url.as_str(),
        );

        tracing::info!(url = %target.url, output = %target.output.display(), "printing page to pdf");

        let status = Command::new(&self.browser)
            .args(&args)
            .status()
            .await
            .map_err(|source| CaptureError::Spawn {
                browser: self.browser.clone(),
                source,
            })?;

        if !status.success() {
            return Err(CaptureError::Exit {
                browser: self.browser.clone(),
                status,
            });
        }

        Ok(())
    }
}
