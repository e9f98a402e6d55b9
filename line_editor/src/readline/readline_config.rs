// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_TERM_WIDTH, ReadlineError};

/// How the completion engine compares candidates while computing the common prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[derive(strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CompletionCase {
    /// `HE` completes against `help` and `hello`.
    #[default]
    Insensitive,
    Sensitive,
}

/// Settings for a [`crate::Readline`] session. Every field has a default, so a JSON file
/// only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadlineConfig {
    /// Maximum line length in bytes, `0` means unbounded.
    pub max_line_length: usize,
    /// Maximum number of history entries, `0` means unbounded.
    pub history_capacity: usize,
    pub history_dedup: bool,
    pub completion_case: CompletionCase,
    /// List the candidates even when the typed word is a complete match that has
    /// longer alternatives (`vi` vs `view`).
    pub always_show_extensions: bool,
    /// Drop one trailing whitespace character from an accepted line. Completion inserts
    /// a space after a finished word, and it should not leak into the result.
    pub strip_trailing_whitespace: bool,
    pub fallback_term_width: u16,
}

impl Default for ReadlineConfig {
    fn default() -> Self {
        Self {
            max_line_length: 0,
            history_capacity: 0,
            history_dedup: true,
            completion_case: CompletionCase::Insensitive,
            always_show_extensions: false,
            strip_trailing_whitespace: true,
            fallback_term_width: DEFAULT_TERM_WIDTH,
        }
    }
}

impl ReadlineConfig {
    /// # Errors
    ///
    /// Returns [`ReadlineError::Config`] if `json` is not a valid configuration.
    pub fn try_from_json_str(json: &str) -> Result<Self, ReadlineError> {
        serde_json::from_str(json).map_err(|err| ReadlineError::Config {
            message: err.to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns [`ReadlineError::IO`] if the file can not be read, and
    /// [`ReadlineError::Config`] if it can not be parsed.
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ReadlineError> {
        let json = std::fs::read_to_string(path)?;
        Self::try_from_json_str(&json)
    }
}
