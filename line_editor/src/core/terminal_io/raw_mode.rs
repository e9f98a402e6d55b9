// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Raw mode using rustix's safe termios API.
//!
//! This is not `cfmakeraw`. Output post processing stays on, so a `\n` written by the
//! editor still returns the carriage, and only the input side is made raw:
//! 1. No input translation (`ICRNL` etc.), so Enter arrives as `\r`.
//! 2. No canonical mode, echo, or signal generation.
//! 3. `VMIN=1`, `VTIME=0` for byte-by-byte blocking reads.

use miette::miette;
use rustix::{fd::AsFd,
             termios::{self, InputModes, LocalModes, OptionalActions, OutputModes,
                       SpecialCodeIndex, Termios}};

/// Terminal settings captured by [`enter_raw_mode`], handed back to [`restore_mode`].
#[derive(Debug, Clone)]
pub struct SavedTermMode(Termios);

/// Switch the terminal behind `fd` into raw mode and return the settings to restore.
///
/// # Errors
///
/// Returns a diagnostic if the terminal attributes can not be read or written, eg: when
/// `fd` is not a terminal.
pub fn enter_raw_mode(fd: impl AsFd) -> miette::Result<SavedTermMode> {
    let original = termios::tcgetattr(&fd)
        .map_err(|e| miette!("failed to retrieve terminal attributes: {e}"))?;

    let mut raw = original.clone();
    raw.input_modes = InputModes::empty();
    raw.output_modes = OutputModes::OPOST | OutputModes::ONLCR;
    raw.local_modes = LocalModes::empty();
    raw.special_codes[SpecialCodeIndex::VMIN] = 1;
    raw.special_codes[SpecialCodeIndex::VTIME] = 0;

    termios::tcsetattr(&fd, OptionalActions::Drain, &raw)
        .map_err(|e| miette!("failed to set terminal attributes: {e}"))?;

    tracing::debug!(message = "entered raw mode");
    Ok(SavedTermMode(original))
}

/// Put back the settings captured by [`enter_raw_mode`].
///
/// # Errors
///
/// Returns a diagnostic if the terminal attributes can not be written.
pub fn restore_mode(fd: impl AsFd, saved: &SavedTermMode) -> miette::Result<()> {
    termios::tcsetattr(&fd, OptionalActions::Drain, &saved.0)
        .map_err(|e| miette!("failed to restore terminal attributes: {e}"))?;

    tracing::debug!(message = "restored terminal mode");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_raw_mode_on_non_tty_fails() {
        let file = tempfile::tempfile().unwrap();
        let result = enter_raw_mode(&file);
        assert!(result.is_err());
    }
}
