// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Character and grapheme cluster boundaries, and display widths.
//!
//! All offsets are byte offsets into a `&str`. Offsets that are out of range are clamped
//! to `[0, text.len()]`, and a returned boundary is always a valid char boundary, so it
//! is safe to slice with.

#[cfg(feature = "unicode")]
use unicode_segmentation::{GraphemeCursor, UnicodeSegmentation};
#[cfg(feature = "unicode")]
use unicode_width::UnicodeWidthChar;

/// Byte offset of the next char boundary after `offset`, or `text.len()`.
#[must_use]
pub fn next_char_boundary(text: &str, offset: usize) -> usize {
    if offset >= text.len() {
        return text.len();
    }
    (offset + 1..=text.len())
        .find(|it| text.is_char_boundary(*it))
        .unwrap_or(text.len())
}

/// Byte offset of the char boundary before `offset`, or `0`.
#[must_use]
pub fn prev_char_boundary(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    (0..offset)
        .rev()
        .find(|it| text.is_char_boundary(*it))
        .unwrap_or(0)
}

/// Byte offset of the next grapheme cluster boundary after `offset`.
#[cfg(feature = "unicode")]
#[must_use]
pub fn next_grapheme_boundary(text: &str, offset: usize) -> usize {
    let offset = snap_to_char_boundary(text, offset);
    let mut cursor = GraphemeCursor::new(offset, text.len(), true);
    match cursor.next_boundary(text, 0) {
        Ok(Some(it)) => it,
        _ => text.len(),
    }
}

/// Byte offset of the previous grapheme cluster boundary before `offset`.
#[cfg(feature = "unicode")]
#[must_use]
pub fn prev_grapheme_boundary(text: &str, offset: usize) -> usize {
    let offset = snap_to_char_boundary(text, offset);
    let mut cursor = GraphemeCursor::new(offset, text.len(), true);
    match cursor.prev_boundary(text, 0) {
        Ok(Some(it)) => it,
        _ => 0,
    }
}

#[cfg(not(feature = "unicode"))]
#[must_use]
pub fn next_grapheme_boundary(text: &str, offset: usize) -> usize {
    next_char_boundary(text, offset)
}

#[cfg(not(feature = "unicode"))]
#[must_use]
pub fn prev_grapheme_boundary(text: &str, offset: usize) -> usize {
    prev_char_boundary(text, offset)
}

/// Number of user perceived characters in `text`.
#[cfg(feature = "unicode")]
#[must_use]
pub fn grapheme_count(text: &str) -> usize { text.graphemes(true).count() }

#[cfg(not(feature = "unicode"))]
#[must_use]
pub fn grapheme_count(text: &str) -> usize { text.len() }

/// Terminal columns occupied by `ch`: `0` for control and combining characters, `2`
/// for wide (East Asian, emoji) characters, `1` otherwise.
#[cfg(feature = "unicode")]
#[must_use]
pub fn char_display_width(ch: char) -> usize { ch.width().unwrap_or(0) }

#[cfg(not(feature = "unicode"))]
#[must_use]
pub fn char_display_width(ch: char) -> usize { ch.len_utf8() }

/// Terminal columns occupied by `text`. Measured per grapheme cluster so that an emoji
/// with a variation selector or a ZWJ sequence counts as the single glyph it renders as.
#[cfg(feature = "unicode")]
#[must_use]
pub fn str_display_width(text: &str) -> usize {
    text.graphemes(true).map(grapheme_display_width).sum()
}

#[cfg(not(feature = "unicode"))]
#[must_use]
pub fn str_display_width(text: &str) -> usize { text.len() }

#[cfg(feature = "unicode")]
fn grapheme_display_width(grapheme: &str) -> usize {
    let mut chars = grapheme.chars();
    let Some(first) = chars.next() else {
        return 0;
    };
    // An emoji presentation selector widens the preceding symbol.
    if grapheme.contains('\u{FE0F}') {
        return 2;
    }
    let width = char_display_width(first);
    if width == 0 {
        chars.map(char_display_width).max().unwrap_or(0)
    } else {
        width
    }
}

/// Terminal columns occupied by `text` once ANSI escape sequences (colors in a prompt,
/// for example) are removed.
#[must_use]
pub fn str_display_width_strip_ansi(text: &str) -> usize {
    if text.contains('\x1b') {
        str_display_width(&strip_ansi_escapes::strip_str(text))
    } else {
        str_display_width(text)
    }
}

/// Moves `offset` back to the nearest char boundary at or before it.
#[must_use]
pub fn snap_to_char_boundary(text: &str, offset: usize) -> usize {
    let offset = offset.min(text.len());
    if text.is_char_boundary(offset) {
        offset
    } else {
        prev_char_boundary(text, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_char_boundaries() {
        let text = "aé€";
        assert_eq2!(next_char_boundary(text, 0), 1);
        assert_eq2!(next_char_boundary(text, 1), 3);
        assert_eq2!(next_char_boundary(text, 3), 6);
        assert_eq2!(next_char_boundary(text, 6), 6);
        assert_eq2!(prev_char_boundary(text, 6), 3);
        assert_eq2!(prev_char_boundary(text, 3), 1);
        assert_eq2!(prev_char_boundary(text, 0), 0);
        assert_eq2!(snap_to_char_boundary(text, 2), 1);
        assert_eq2!(snap_to_char_boundary(text, 99), 6);
    }

    #[cfg(feature = "unicode")]
    #[test]
    fn test_grapheme_boundaries() {
        // "e" followed by a combining acute accent is one grapheme of 3 bytes.
        let text = "ae\u{301}b";
        assert_eq2!(next_grapheme_boundary(text, 0), 1);
        assert_eq2!(next_grapheme_boundary(text, 1), 4);
        assert_eq2!(next_grapheme_boundary(text, 4), 5);
        assert_eq2!(next_grapheme_boundary(text, 5), 5);
        assert_eq2!(prev_grapheme_boundary(text, 5), 4);
        assert_eq2!(prev_grapheme_boundary(text, 4), 1);
        assert_eq2!(prev_grapheme_boundary(text, 0), 0);
        assert_eq2!(grapheme_count(text), 3);
    }

    #[cfg(feature = "unicode")]
    #[test]
    fn test_display_width() {
        assert_eq2!(char_display_width('a'), 1);
        assert_eq2!(char_display_width('\u{301}'), 0);
        assert_eq2!(char_display_width('界'), 2);
        assert_eq2!(char_display_width('\x07'), 0);
        assert_eq2!(str_display_width("hello"), 5);
        assert_eq2!(str_display_width("e\u{301}"), 1);
        assert_eq2!(str_display_width("世界"), 4);
        assert_eq2!(str_display_width("😀"), 2);
    }

    #[test]
    fn test_display_width_strip_ansi() {
        assert_eq2!(str_display_width_strip_ansi("\x1b[32m> \x1b[0m"), 2);
        assert_eq2!(str_display_width_strip_ansi("> "), 2);
    }
}
