// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io;

use miette::Diagnostic;
use thiserror::Error;

/// Error returned from [`crate::Readline::read_line`] and the session constructors.
///
/// Editing problems (a full line, an unbound key) are not errors. They ring the bell and
/// leave the line as it was.
#[derive(Debug, Error, Diagnostic)]
pub enum ReadlineError {
    #[error(transparent)]
    #[diagnostic(code(line_editor::io))]
    IO(#[from] io::Error),

    #[error("terminal error: {message}")]
    #[diagnostic(
        code(line_editor::terminal),
        help("is the input a terminal that supports termios?")
    )]
    Terminal { message: String },

    #[error("invalid configuration: {message}")]
    #[diagnostic(code(line_editor::config))]
    Config { message: String },
}

impl ReadlineError {
    pub(crate) fn terminal(report: &miette::Report) -> Self {
        Self::Terminal {
            message: report.to_string(),
        }
    }
}

/// What a call to [`crate::Readline::read_line`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadlineEvent {
    /// The user accepted a line.
    Line(String),
    /// End of input, eg: `Ctrl+D` on an empty line, or a closed pipe.
    Eof,
    /// The user pressed `Ctrl+C`.
    Interrupted,
}
