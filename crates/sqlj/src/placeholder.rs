//! `?` marker scanning and `$n` placeholder rewriting.
//!
//! Callers write clause text with `?` markers (`"name = ? AND age > ?"`). Before the
//! text reaches Postgres every marker is replaced with a positional placeholder
//! (`$1`, `$2`, ...). A `?` inside a single-quoted string literal is part of the
//! literal and is left alone.
//!
//! Quote state flips on every `'`. A doubled quote (`'it''s'`) flips twice, so
//! standard SQL escaping keeps the scanner inside the literal. Backslash escapes
//! (`E'\''`) are not recognised and will desynchronise the quote state.

use std::fmt::Write;

const MARKER: u8 = b'?';
const QUOTE: u8 = b'\'';

/// Byte offsets of every `?` marker outside single-quoted literals.
pub fn marker_positions(text: &str) -> Vec<usize> {
    let mut positions = Vec::new();
    let mut in_quote = false;

    for (idx, byte) in text.bytes().enumerate() {
        match byte {
            MARKER if !in_quote => positions.push(idx),
            QUOTE => in_quote = !in_quote,
            _ => {}
        }
    }

    positions
}

/// Replace each unquoted `?` with `$offset+1`, `$offset+2`, ... in order of appearance.
///
/// Returns the rewritten text and the number of markers replaced. Text without
/// markers is returned unchanged with a count of 0.
pub fn rewrite(text: &str, offset: usize) -> (String, usize) {
    let positions = marker_positions(text);
    if positions.is_empty() {
        return (text.to_string(), 0);
    }

    let mut out = String::with_capacity(text.len() + positions.len() * 2);
    let mut last = 0;

    for (n, pos) in positions.iter().enumerate() {
        out.push_str(&text[last..*pos]);
        let _ = write!(&mut out, "${}", offset + n + 1);
        last = pos + 1;
    }
    out.push_str(&text[last..]);

    (out, positions.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_markers() {
        assert!(marker_positions("something = nothing").is_empty());
        assert_eq!(rewrite("a = b", 0), ("a = b".to_string(), 0));
    }

    #[test]
    fn single_marker_position() {
        assert_eq!(marker_positions("something = ?"), vec![12]);
    }

    #[test]
    fn quoted_marker_is_ignored() {
        assert!(marker_positions("something = '?'").is_empty());
        assert_eq!(marker_positions("something = '?' || ?"), vec![19]);
    }

    #[test]
    fn rewrite_numbers_from_one() {
        assert_eq!(rewrite("a = ?", 0), ("a = $1".to_string(), 1));
        assert_eq!(
            rewrite("a = ? AND b IN (?, ?)", 0),
            ("a = $1 AND b IN ($2, $3)".to_string(), 3)
        );
    }

    #[test]
    fn rewrite_honours_offset() {
        assert_eq!(rewrite("name = ?", 3), ("name = $4".to_string(), 1));
        assert_eq!(
            rewrite("a = ? OR b = ?", 9),
            ("a = $10 OR b = $11".to_string(), 2)
        );
    }

    #[test]
    fn rewrite_skips_quoted_marker() {
        assert_eq!(
            rewrite("title = '?' || ?", 0),
            ("title = '?' || $1".to_string(), 1)
        );
    }

    #[test]
    fn doubled_quote_stays_inside_literal() {
        let text = "note = 'it''s ?' AND id = ?";
        assert_eq!(marker_positions(text), vec![26]);
        assert_eq!(
            rewrite(text, 0),
            ("note = 'it''s ?' AND id = $1".to_string(), 1)
        );
    }

    #[test]
    fn multibyte_text_is_preserved() {
        assert_eq!(
            rewrite("name = 'café?' AND city = ?", 0),
            ("name = 'café?' AND city = $1".to_string(), 1)
        );
    }

    #[test]
    fn adjacent_markers() {
        assert_eq!(rewrite("??", 0), ("$1$2".to_string(), 2));
    }
}
