/// Leading character stripped from every tag (`#sunset` -> `sunset`).
pub const TAG_MARKER: char = '#';

/// Tokens for a free-text field.
///
/// The whole trimmed value comes first, followed by every word. A single-word
/// value therefore yields its token twice, which is what lets an exact
/// full-field match outrank a partial one.
pub fn tokenize_text(value: &str) -> Vec<String> {
    let whole = value.trim().to_lowercase();
    if whole.is_empty() {
        return Vec::new();
    }

    let words = whole.split_whitespace().map(str::to_string).collect::<Vec<_>>();

    let mut tokens = Vec::with_capacity(words.len() + 1);
    tokens.push(whole);
    tokens.extend(words);
    tokens
}

/// Tokens for a space separated tag list. The list as a whole is never a token.
pub fn tokenize_tags(value: &str) -> Vec<String> {
    value
        .split_whitespace()
        .map(|tag| tag.strip_prefix(TAG_MARKER).unwrap_or(tag))
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}
