// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{io::{self, Write},
          sync::Arc};

use crate::{SafeRawTerminal, StdMutex, ok};

/// Width used when the terminal can not tell us its size.
pub const DEFAULT_TERM_WIDTH: u16 = 80;

/// Where the redisplay engine gets the terminal width from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermWidth {
    /// Ask the terminal on every redisplay, so resizes are picked up.
    Detect,
    /// Pinned width. Used for tests and for non-interactive output.
    Fixed(u16),
}

/// This struct represents an output device that can be used to write to the terminal.
/// - It is safe to clone; clones write to the same sink.
/// - It implements [`Write`], so `crossterm` commands can be queued on it directly.
#[derive(Clone)]
#[allow(missing_debug_implementations)]
pub struct OutputDevice {
    pub resource: SafeRawTerminal,
    pub term_width: TermWidth,
    pub is_mock: bool,
}

impl Default for OutputDevice {
    fn default() -> Self { Self::new_stdout() }
}

impl OutputDevice {
    #[must_use]
    pub fn new_stdout() -> Self {
        Self {
            resource: Arc::new(StdMutex::new(io::stdout())),
            term_width: TermWidth::Detect,
            is_mock: false,
        }
    }

    /// Current terminal width in columns, never `0`.
    #[must_use]
    pub fn width(&self, fallback: u16) -> u16 {
        let fallback = fallback.max(1);
        match self.term_width {
            TermWidth::Fixed(width) => width.max(1),
            TermWidth::Detect => match crossterm::terminal::size() {
                Ok((columns, _)) if columns > 0 => columns,
                _ => fallback,
            },
        }
    }

    /// Ring the terminal bell.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error.
    pub fn bell(&mut self) -> io::Result<()> {
        self.write_all(b"\x07")?;
        self.flush()?;
        ok!()
    }

    fn with_resource<T>(
        &self,
        f: impl FnOnce(&mut dyn Write) -> io::Result<T>,
    ) -> io::Result<T> {
        let mut guard = self
            .resource
            .lock()
            .map_err(|_| io::Error::other("output device lock poisoned"))?;
        f(&mut *guard)
    }
}

impl Write for OutputDevice {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_resource(|it| it.write(buf))
    }

    #[allow(clippy::redundant_closure_for_method_calls)]
    fn flush(&mut self) -> io::Result<()> { self.with_resource(|it| it.flush()) }
}
