/// Index of the first line equal to `sentinel`, ignoring surrounding whitespace.
pub fn sentinel_position(lines: &[String], sentinel: impl AsRef<str>) -> Option<usize> {
    let sentinel = sentinel.as_ref().trim();
    lines.iter().position(|x| x.trim() == sentinel)
}

/// Removes every line from the start through the first sentinel line, inclusive.
///
/// A document without the sentinel is returned unchanged; callers that care
/// can check [`sentinel_position`] first.
pub fn strip_header(mut lines: Vec<String>, sentinel: impl AsRef<str>) -> Vec<String> {
    if let Some(position) = sentinel_position(&lines, sentinel) {
        lines.drain(..=position);
    }

    lines
}
