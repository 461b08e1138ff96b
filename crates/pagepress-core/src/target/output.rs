//! Output artifact naming.
//!
//! Derives a Linux-safe filename from a capture path: path separators become
//! `_`, control characters are stripped, and the configured extension is
//! appended. Naming is deterministic so re-running the same input overwrites
//! the same artifact instead of accumulating duplicates.

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Derives the output filename for a normalized capture path.
///
/// `/a/b` with extension `pdf` becomes `_a_b.pdf`.
pub fn output_filename(path: &str, extension: &str) -> String {
    let mut stem = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' || c == '\\' || c == '\0' || c.is_control() {
            stem.push('_');
        } else {
            stem.push(c);
        }
    }

    let name = format!("{stem}.{extension}");
    truncate_to_name_max(&name)
}

fn truncate_to_name_max(name: &str) -> String {
    if name.len() <= NAME_MAX {
        return name.to_string();
    }
    let mut take = NAME_MAX;
    while take > 0 && !name.is_char_boundary(take) {
        take -= 1;
    }
    name[..take].to_string()
}
