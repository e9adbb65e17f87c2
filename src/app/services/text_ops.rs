use std::path::Path;

use unicode_segmentation::UnicodeSegmentation;

use crate::app::domain::spelling::Span;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Byte offset of the `char_idx`-th character. Indices past the end clamp to
/// `text.len()`.
pub fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// Number of characters that start before `byte_pos`.
pub fn byte_to_char(text: &str, byte_pos: usize) -> usize {
    text.char_indices().take_while(|(b, _)| *b < byte_pos).count()
}

/// Byte range for a character span, clamped to the text and never inverted.
pub fn span_to_bytes(text: &str, span: Span) -> (usize, usize) {
    let start = char_to_byte(text, span.start);
    let end = char_to_byte(text, span.end).max(start);
    (start, end)
}

/// Byte ranges for many spans over the same text, indexing its characters
/// once. Each range is clamped like `span_to_bytes`.
pub fn spans_to_bytes(text: &str, spans: &[Span]) -> Vec<(usize, usize)> {
    let boundaries: Vec<usize> = text.char_indices().map(|(byte, _)| byte).collect();
    let byte_at = |char_idx: usize| boundaries.get(char_idx).copied().unwrap_or(text.len());
    spans
        .iter()
        .map(|span| {
            let start = byte_at(span.start);
            (start, byte_at(span.end).max(start))
        })
        .collect()
}

/// Find the word under character position `char_pos`.
///
/// Words follow Unicode word boundaries; a segment counts as a word when it
/// contains at least one alphanumeric character, so "don't" is one word and
/// punctuation or whitespace never is. A position exactly at the end of a
/// word still selects it, as a caret placed right after a word would.
pub fn word_at(text: &str, char_pos: usize) -> Option<(Span, String)> {
    let byte_pos = char_to_byte(text, char_pos);
    let mut trailing = None;

    for (start, segment) in text.split_word_bound_indices() {
        if start > byte_pos {
            break;
        }
        if !segment.chars().any(char::is_alphanumeric) {
            continue;
        }
        let end = start + segment.len();
        if byte_pos <= end {
            let char_start = byte_to_char(text, start);
            let span = Span::new(char_start, char_start + segment.chars().count());
            if byte_pos < end {
                return Some((span, segment.to_string()));
            }
            trailing = Some((span, segment.to_string()));
        }
    }

    trailing
}
