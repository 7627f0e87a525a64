/// Splits raw document text into translation segments.
///
/// Every non-blank line becomes one segment, in document order. Lines are
/// kept as written; only whitespace-only lines are dropped.
pub fn segment(raw_text: &str) -> Vec<String> {
    raw_text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(ToString::to_string)
        .collect()
}
