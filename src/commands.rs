//! Line-oriented command text: one selection token per non-empty line, with
//! `#` starting a trailing comment.

/// Extract selection tokens from raw command text. Comments are stripped,
/// surrounding whitespace trimmed, blank lines skipped.
pub fn tokens(source: &str) -> Vec<&str> {
    source
        .lines()
        .map(|line| match line.find('#') {
            Some(i) => &line[..i],
            None => line,
        })
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}
