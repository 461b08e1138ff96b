//! Leading-path extraction from candidate input lines.

use once_cell::sync::Lazy;
use regex::Regex;

/// A capture path is a leading `/` followed by an optional run of
/// non-whitespace; anything after the first whitespace is discarded.
static CAPTURE_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(/(?:\S+)?).*").expect("capture path pattern is valid"));

/// Extracts the capture path from one input line.
///
/// Lines that do not start with `/` yield `None` and are skipped upstream
/// without an error. Matched paths are lexically normalized: repeated slashes
/// collapse, `.` segments drop, `..` segments pop (never above the root).
pub fn extract_capture_path(line: &str) -> Option<String> {
    let captures = CAPTURE_PATH.captures(line)?;
    Some(normalize(captures.get(1)?.as_str()))
}

fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_leading_slash_paths() {
        assert_eq!(extract_capture_path("/a/b").as_deref(), Some("/a/b"));
        assert_eq!(extract_capture_path("/c").as_deref(), Some("/c"));
        assert_eq!(extract_capture_path("/").as_deref(), Some("/"));
    }

    #[test]
    fn rejects_lines_without_leading_slash() {
        assert_eq!(extract_capture_path("not-a-path"), None);
        assert_eq!(extract_capture_path(""), None);
        assert_eq!(extract_capture_path("  /indented"), None);
    }

    #[test]
    fn discards_trailing_garbage_after_whitespace() {
        assert_eq!(
            extract_capture_path("/a/b 200 OK").as_deref(),
            Some("/a/b")
        );
    }

    #[test]
    fn normalizes_dot_segments_and_repeated_slashes() {
        assert_eq!(extract_capture_path("//a///b").as_deref(), Some("/a/b"));
        assert_eq!(extract_capture_path("/a/./b").as_deref(), Some("/a/b"));
        assert_eq!(extract_capture_path("/a/../b").as_deref(), Some("/b"));
        assert_eq!(extract_capture_path("/../../a").as_deref(), Some("/a"));
        assert_eq!(extract_capture_path("/a/..").as_deref(), Some("/"));
    }
}
