//! Bounding of merged output to a maximum number of characters.

/// Bound `text` to at most `max_len` characters.
///
/// Lengths are counted in `char`s, not bytes, so the cut never splits a
/// code point. When the limit is exceeded the first `max_len` characters are
/// kept and a trailer reporting the original length is appended.
pub fn truncate_output(text: String, max_len: usize) -> String {
    let total = text.chars().count();
    if total <= max_len {
        return text;
    }

    let cut = text
        .char_indices()
        .nth(max_len)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    format!(
        "{}\n... Output truncated (total length: {} characters)",
        &text[..cut],
        total
    )
}
