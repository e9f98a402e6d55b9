// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use strum_macros::{Display, EnumCount, EnumIter};

/// Keys that terminals report with escape sequences. Bind them with
/// [`crate::KeyMap::bind_special`] instead of spelling out the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumCount)]
pub enum SpecialKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Insert,
    Delete,
}

impl SpecialKey {
    /// Every byte sequence a common terminal may send for this key: the normal cursor
    /// mode (`CSI`), application cursor mode (`SS3`), and the `vt220` style `CSI n ~`.
    #[must_use]
    pub fn sequences(self) -> &'static [&'static [u8]] {
        match self {
            SpecialKey::Up => &[b"\x1b[A", b"\x1bOA"],
            SpecialKey::Down => &[b"\x1b[B", b"\x1bOB"],
            SpecialKey::Right => &[b"\x1b[C", b"\x1bOC"],
            SpecialKey::Left => &[b"\x1b[D", b"\x1bOD"],
            SpecialKey::Home => &[b"\x1b[H", b"\x1bOH", b"\x1b[1~", b"\x1b[7~"],
            SpecialKey::End => &[b"\x1b[F", b"\x1bOF", b"\x1b[4~", b"\x1b[8~"],
            SpecialKey::Insert => &[b"\x1b[2~"],
            SpecialKey::Delete => &[b"\x1b[3~"],
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::{EnumCount, IntoEnumIterator};

    use super::*;

    #[test]
    fn test_every_sequence_is_an_escape_sequence() {
        assert_eq!(SpecialKey::iter().count(), SpecialKey::COUNT);
        for key in SpecialKey::iter() {
            assert!(!key.sequences().is_empty(), "{key}");
            for sequence in key.sequences() {
                assert_eq!(sequence[0], 0x1b, "{key}");
                assert!(sequence.len() >= 3, "{key}");
            }
        }
    }
}
