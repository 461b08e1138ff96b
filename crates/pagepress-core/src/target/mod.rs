//! Input validation and capture target derivation.
//!
//! Turns a candidate input line into a [`CaptureTarget`]: the line is matched
//! against the leading-path pattern, the extracted path is resolved against
//! the base URL, and a deterministic output filename is derived. All of this
//! is pure and synchronous; the concurrency core never sees rejected lines.

mod output;
mod pattern;

use std::path::{Path, PathBuf};

use url::Url;

pub use output::output_filename;
pub use pattern::extract_capture_path;

/// Error for a malformed base or proxy URL.
#[derive(Debug, thiserror::Error)]
pub enum TargetError {
    #[error("error parsing URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("host is not defined")]
    MissingHost,
}

/// Parses and validates a user-supplied URL (base or proxy target).
///
/// The scheme and host must both be present; query and fragment are stripped
/// since captures always address whole pages.
pub fn parse_target_url(s: &str) -> Result<Url, TargetError> {
    let mut url = Url::parse(s)?;

    if !url.has_host() || url.host_str().is_some_and(str::is_empty) {
        return Err(TargetError::MissingHost);
    }

    url.set_query(None);
    url.set_fragment(None);

    Ok(url)
}

/// One validated unit of capture work: the page URL to render and the file
/// the rendered PDF is written to. Immutable once derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureTarget {
    pub url: Url,
    pub output: PathBuf,
}

/// Derives capture targets from input lines against a fixed base URL,
/// output directory, and file extension.
#[derive(Debug, Clone)]
pub struct TargetResolver {
    base: Url,
    directory: PathBuf,
    extension: String,
}

impl TargetResolver {
    pub fn new(base: Url, directory: impl AsRef<Path>, extension: &str) -> Self {
        Self {
            base,
            directory: directory.as_ref().to_path_buf(),
            extension: extension.to_string(),
        }
    }

    /// Base URL all capture paths are resolved against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Resolves one input line into a capture target, or `None` when the line
    /// does not match the extraction pattern. Resolution is deterministic:
    /// the same line always yields the same URL and output path.
    pub fn resolve(&self, line: &str) -> Option<CaptureTarget> {
        let path = extract_capture_path(line)?;
        let output = self
            .directory
            .join(output_filename(&path, &self.extension));
        Some(CaptureTarget {
            url: self.page_url(&path),
            output,
        })
    }

    /// Appends the capture path to the base URL's path. A base of
    /// `http://host/site` and a path of `/a/b` yield `http://host/site/a/b`.
    fn page_url(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        let joined = format!("{}{}", self.base.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }
}
