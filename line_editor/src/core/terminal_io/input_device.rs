// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use rustix::{fs::{self, OFlags},
             io::Errno,
             termios};

use crate::{SavedTermMode, enter_raw_mode, ok, restore_mode};

/// A byte source for the editor.
///
/// [`read_byte`](InputDevice::read_byte) blocks until a byte is available.
/// [`try_read_byte`](InputDevice::try_read_byte) never blocks; the key dispatcher uses
/// it to peek for the rest of an escape sequence.
pub trait InputDevice {
    /// Blocking read of one byte. `Ok(None)` means end of input.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Non-blocking read of one byte. `Ok(None)` means nothing is available right now
    /// (or end of input).
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error.
    fn try_read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Whether the byte source is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// # Errors
    ///
    /// Returns a diagnostic if the terminal can not be put into raw mode.
    fn enter_raw_mode(&mut self) -> miette::Result<()> { ok!() }

    /// # Errors
    ///
    /// Returns a diagnostic if the terminal settings can not be restored.
    fn restore_mode(&mut self) -> miette::Result<()> { ok!() }
}

/// [`InputDevice`] backed by the process's stdin file descriptor. Reads go straight to
/// the descriptor (no [`std::io::Stdin`] buffering), so a byte pulled by the dispatcher
/// is never hidden in a userspace buffer that a later non-blocking read can not see.
#[derive(Debug)]
pub struct StdinInputDevice {
    stdin: io::Stdin,
    saved_mode: Option<SavedTermMode>,
}

impl Default for StdinInputDevice {
    fn default() -> Self { Self::new() }
}

impl StdinInputDevice {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            saved_mode: None,
        }
    }

    fn read_one(&self) -> Result<Option<u8>, Errno> {
        let mut buf = [0_u8; 1];
        loop {
            match rustix::io::read(&self.stdin, &mut buf[..]) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(Errno::INTR) => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl InputDevice for StdinInputDevice {
    fn read_byte(&mut self) -> io::Result<Option<u8>> { Ok(self.read_one()?) }

    /// Flips the descriptor to `O_NONBLOCK` for exactly one read attempt and puts the
    /// original flags back before returning, whatever the outcome.
    fn try_read_byte(&mut self) -> io::Result<Option<u8>> {
        let flags = fs::fcntl_getfl(&self.stdin)?;
        fs::fcntl_setfl(&self.stdin, flags | OFlags::NONBLOCK)?;
        let result = self.read_one();
        fs::fcntl_setfl(&self.stdin, flags)?;

        match result {
            Ok(it) => Ok(it),
            Err(Errno::AGAIN) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn is_terminal(&self) -> bool { termios::isatty(&self.stdin) }

    fn enter_raw_mode(&mut self) -> miette::Result<()> {
        if self.saved_mode.is_none() {
            self.saved_mode = Some(enter_raw_mode(&self.stdin)?);
        }
        ok!()
    }

    fn restore_mode(&mut self) -> miette::Result<()> {
        if let Some(saved) = self.saved_mode.take() {
            restore_mode(&self.stdin, &saved)?;
        }
        ok!()
    }
}

impl Drop for StdinInputDevice {
    fn drop(&mut self) {
        if let Err(err) = self.restore_mode() {
            tracing::warn!(message = "could not restore terminal mode", ?err);
        }
    }
}
