//! Browser argv construction, kept pure for testing.

use std::path::Path;

/// Flags passed on every invocation: render without a window, don't touch the
/// user's profile, skip GPU initialization.
const FIXED_FLAGS: [&str; 3] = ["--headless", "--temp-profile", "--no-gpu"];

/// Builds the browser argument vector for one capture.
///
/// Order: fixed flags, user-configured extras, optional proxy, PDF sink,
/// page URL last.
pub fn capture_args(
    extra_args: &[String],
    proxy_server: Option<&str>,
    output: &Path,
    url: &str,
) -> Vec<String> {
    let mut args: Vec<String> = FIXED_FLAGS.iter().map(|s| s.to_string()).collect();
    args.extend(extra_args.iter().cloned());
    if let Some(proxy) = proxy_server {
        args.push(format!("--proxy-server={proxy}"));
    }
    args.push(format!("--print-to-pdf={}", output.display()));
    args.push(url.to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn args_without_proxy() {
        let args = capture_args(&[], None, &PathBuf::from("out/_a.pdf"), "http://h/a");
        assert_eq!(
            args,
            vec![
                "--headless",
                "--temp-profile",
                "--no-gpu",
                "--print-to-pdf=out/_a.pdf",
                "http://h/a",
            ]
        );
    }

    #[test]
    fn args_with_proxy_and_extras() {
        let extras = vec!["--disable-extensions".to_string()];
        let args = capture_args(
            &extras,
            Some("http://proxy:8080;https://proxy:8080"),
            &PathBuf::from("_.pdf"),
            "http://h/",
        );
        assert_eq!(args[3], "--disable-extensions");
        assert_eq!(args[4], "--proxy-server=http://proxy:8080;https://proxy:8080");
        assert_eq!(args.last().map(String::as_str), Some("http://h/"));
    }
}
