// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{char_display_width, grapheme_count, snap_to_char_boundary,
            str_display_width};

/// Whether typed text is shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EchoMode {
    #[default]
    Enabled,
    /// Show one substitute character per typed character (eg: `*` for passwords), or
    /// nothing at all for `None`.
    Masked(Option<char>),
}

impl EchoMode {
    /// `'\0'` as the substitute means "print nothing".
    #[must_use]
    pub fn masked(substitute: char) -> Self {
        if substitute == '\0' {
            EchoMode::Masked(None)
        } else {
            EchoMode::Masked(Some(substitute))
        }
    }
}

/// The line as it appears on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLine {
    /// What gets printed after the prompt.
    pub text: String,
    /// Columns between the end of the prompt and the cursor.
    pub cursor_col: usize,
    /// Columns occupied by `text`.
    pub width: usize,
}

impl DisplayLine {
    #[must_use]
    pub fn new(line: &str, point: usize, echo_mode: EchoMode) -> Self {
        let point = snap_to_char_boundary(line, point);
        match echo_mode {
            EchoMode::Enabled => Self {
                text: line.to_string(),
                cursor_col: str_display_width(&line[..point]),
                width: str_display_width(line),
            },
            EchoMode::Masked(Some(substitute)) => {
                let substitute_width = char_display_width(substitute);
                let count = grapheme_count(line);
                Self {
                    text: std::iter::repeat_n(substitute, count).collect(),
                    cursor_col: grapheme_count(&line[..point]) * substitute_width,
                    width: count * substitute_width,
                }
            }
            // Nothing is drawn, so the cursor stays right after the prompt.
            EchoMode::Masked(None) => Self::default(),
        }
    }
}
