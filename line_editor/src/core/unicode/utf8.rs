// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! UTF-8 decoding of raw input bytes.
//!
//! ```text
//! Byte Pattern   Meaning              Detection Mask
//! ──────────────────────────────────────────────────
//! 0xxxxxxx       ASCII (1-byte)       byte & 0x80 == 0x00
//! 110xxxxx       2-byte start         byte & 0xE0 == 0xC0
//! 1110xxxx       3-byte start         byte & 0xF0 == 0xE0
//! 11110xxx       4-byte start         byte & 0xF8 == 0xF0
//! 10xxxxxx       Continuation         byte & 0xC0 == 0x80
//! ```
//!
//! Overlong encodings, surrogates, and values past `U+10FFFF` are rejected, so a
//! terminal that sends garbage never produces a codepoint that could not have been
//! typed.

use thiserror::Error;

/// Why a byte sequence could not be decoded into a codepoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Utf8DecodeError {
    #[error("no bytes to decode")]
    Empty,
    #[error("byte {0:#04x} can not start a UTF-8 sequence")]
    InvalidLeadByte(u8),
    #[error("sequence needs {expected} bytes but only {available} are present")]
    Incomplete { expected: usize, available: usize },
    #[error("malformed {0} byte sequence")]
    Malformed(usize),
}

/// Returns the total length of the UTF-8 sequence that starts with `lead_byte`, or `0`
/// if the byte is a continuation byte or can never appear in valid UTF-8.
#[must_use]
pub fn char_length(lead_byte: u8) -> usize {
    match lead_byte {
        0x00..=0x7F => 1,
        // 0xC0 and 0xC1 only ever start overlong 2 byte encodings.
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// `10xxxxxx`, a byte that can only follow a lead byte.
#[must_use]
pub const fn is_continuation_byte(byte: u8) -> bool { byte & 0xC0 == 0x80 }

/// Decodes the first codepoint of `bytes`. Returns the codepoint and the number of bytes
/// it occupies.
///
/// # Errors
///
/// Returns [`Utf8DecodeError`] if `bytes` is empty, does not start with a lead byte, is
/// shorter than the lead byte announces, or is otherwise malformed.
pub fn decode(bytes: &[u8]) -> Result<(char, usize), Utf8DecodeError> {
    let Some(&lead_byte) = bytes.first() else {
        return Err(Utf8DecodeError::Empty);
    };

    let expected = char_length(lead_byte);
    if expected == 0 {
        return Err(Utf8DecodeError::InvalidLeadByte(lead_byte));
    }
    if bytes.len() < expected {
        return Err(Utf8DecodeError::Incomplete {
            expected,
            available: bytes.len(),
        });
    }

    // `from_utf8` enforces the continuation byte pattern, overlong, surrogate and range
    // rules.
    std::str::from_utf8(&bytes[..expected])
        .ok()
        .and_then(|it| it.chars().next())
        .map(|ch| (ch, expected))
        .ok_or(Utf8DecodeError::Malformed(expected))
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(b'a', 1)]
    #[test_case(0x7F, 1)]
    #[test_case(0xC3, 2)]
    #[test_case(0xE2, 3)]
    #[test_case(0xF0, 4)]
    #[test_case(0x80, 0; "continuation byte")]
    #[test_case(0xC0, 0; "overlong lead")]
    #[test_case(0xF5, 0; "past the unicode range")]
    #[test_case(0xFF, 0)]
    fn test_char_length(lead_byte: u8, expected: usize) {
        assert_eq2!(char_length(lead_byte), expected);
    }

    #[test_case(0x80, true)]
    #[test_case(0xBF, true)]
    #[test_case(b'x', false)]
    #[test_case(b'\r', false)]
    #[test_case(0xC3, false; "lead byte")]
    fn test_is_continuation_byte(byte: u8, expected: bool) {
        assert_eq2!(is_continuation_byte(byte), expected);
    }

    #[test]
    fn test_decode_valid() {
        assert_eq2!(decode(b"abc"), Ok(('a', 1)));
        assert_eq2!(decode("é!".as_bytes()), Ok(('é', 2)));
        assert_eq2!(decode("€".as_bytes()), Ok(('€', 3)));
        assert_eq2!(decode("😀".as_bytes()), Ok(('😀', 4)));
    }

    #[test]
    fn test_decode_errors() {
        assert_eq2!(decode(&[]), Err(Utf8DecodeError::Empty));
        assert_eq2!(decode(&[0xA9]), Err(Utf8DecodeError::InvalidLeadByte(0xA9)));
        assert_eq2!(
            decode(&[0xE2, 0x82]),
            Err(Utf8DecodeError::Incomplete {
                expected: 3,
                available: 2
            })
        );
        // Bad continuation byte.
        assert_eq2!(decode(&[0xC3, 0x41]), Err(Utf8DecodeError::Malformed(2)));
        // Overlong encoding of '/'.
        assert_eq2!(
            decode(&[0xE0, 0x80, 0xAF]),
            Err(Utf8DecodeError::Malformed(3))
        );
        // UTF-16 surrogate U+D800.
        assert_eq2!(
            decode(&[0xED, 0xA0, 0x80]),
            Err(Utf8DecodeError::Malformed(3))
        );
        // U+110000.
        assert_eq2!(
            decode(&[0xF4, 0x90, 0x80, 0x80]),
            Err(Utf8DecodeError::Malformed(4))
        );
    }
}
