// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::VecDeque,
          io,
          sync::{Arc,
                 atomic::{AtomicIsize, Ordering}}};

use crate::InputDevice;

/// Replays a scripted byte sequence.
///
/// Once the script runs out, [`InputDevice::read_byte`] reports end of input and
/// [`InputDevice::try_read_byte`] reports that nothing is available, which is what a
/// terminal looks like when a lone `ESC` was typed and nothing followed it.
///
/// Clones share `raw_mode_depth`, so a test can keep a clone and check that every
/// [`InputDevice::enter_raw_mode`] was matched by a [`InputDevice::restore_mode`] after
/// the original was moved into a session.
#[derive(Debug, Clone, Default)]
pub struct InputDeviceMock {
    pub bytes: VecDeque<u8>,
    pub is_terminal: bool,
    pub raw_mode_depth: Arc<AtomicIsize>,
}

impl InputDeviceMock {
    /// A mock that claims to be an interactive terminal.
    #[must_use]
    pub fn new_terminal(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            bytes: bytes.as_ref().iter().copied().collect(),
            is_terminal: true,
            raw_mode_depth: Arc::default(),
        }
    }

    /// A mock that looks like piped input.
    #[must_use]
    pub fn new_pipe(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            is_terminal: false,
            ..Self::new_terminal(bytes)
        }
    }

    #[must_use]
    pub fn raw_mode_depth(&self) -> isize { self.raw_mode_depth.load(Ordering::SeqCst) }
}

impl InputDevice for InputDeviceMock {
    fn read_byte(&mut self) -> io::Result<Option<u8>> { Ok(self.bytes.pop_front()) }

    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.bytes.pop_front())
    }

    fn is_terminal(&self) -> bool { self.is_terminal }

    fn enter_raw_mode(&mut self) -> miette::Result<()> {
        self.raw_mode_depth.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn restore_mode(&mut self) -> miette::Result<()> {
        self.raw_mode_depth.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_scripted_bytes_then_exhaustion() {
        let mut input = InputDeviceMock::new_terminal(b"ab");
        assert_eq2!(input.read_byte().unwrap(), Some(b'a'));
        assert_eq2!(input.try_read_byte().unwrap(), Some(b'b'));
        assert_eq2!(input.try_read_byte().unwrap(), None);
        assert_eq2!(input.read_byte().unwrap(), None);
        assert!(input.is_terminal());
        assert!(!InputDeviceMock::new_pipe("x").is_terminal());
    }

    #[test]
    fn test_clones_share_raw_mode_depth() {
        let mut input = InputDeviceMock::new_terminal([]);
        let observer = input.clone();
        input.enter_raw_mode().unwrap();
        assert_eq2!(observer.raw_mode_depth(), 1);
        input.restore_mode().unwrap();
        assert_eq2!(observer.raw_mode_depth(), 0);
    }
}
