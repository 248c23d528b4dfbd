use unicode_general_category::{GeneralCategory, get_general_category};

/// COMBINING GRAPHEME JOINER, used to break up words in spam previews.
const GRAPHEME_JOINER: char = '\u{034F}';

/// Whether `c` renders as a visible glyph (whitespace is handled separately).
///
/// Controls, format characters, surrogates, private-use, unassigned code
/// points and line/paragraph separators are not printable.
pub fn is_printable(c: char) -> bool {
    if c == GRAPHEME_JOINER {
        return false;
    }
    !matches!(
        get_general_category(c),
        GeneralCategory::Control
            | GeneralCategory::Format
            | GeneralCategory::Surrogate
            | GeneralCategory::PrivateUse
            | GeneralCategory::Unassigned
            | GeneralCategory::LineSeparator
            | GeneralCategory::ParagraphSeparator
    )
}

/// Reduce `text` to one line: invisible characters are dropped and every
/// whitespace run becomes one ASCII space, with no leading or trailing space.
pub fn clean_line(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
            continue;
        }
        if !is_printable(c) {
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }
    out
}

/// Turn a provider preview into a single line of safe, compact text.
///
/// Entities are decoded first, then the result goes through [`clean_line`].
pub fn sanitize_snippet(raw: &str) -> String {
    clean_line(&html_escape::decode_html_entities(raw))
}
