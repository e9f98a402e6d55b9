// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{QueueableCommand, cursor::MoveDown};

use super::Readline;
use crate::{CompletionOutcome, complete_word, format_match_table, ok};

impl Readline {
    /// Complete the word between `word_start` and the cursor against `candidates`.
    ///
    /// The bell rings if the completed line would be too long. Ambiguous outcomes (and
    /// prefix matches, if [`crate::ReadlineConfig::always_show_extensions`] is set)
    /// list the candidates below the line, then the prompt and line are drawn again.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn complete<S: AsRef<str>>(
        &mut self,
        word_start: usize,
        candidates: &[S],
        allow_prefix: bool,
    ) -> io::Result<CompletionOutcome> {
        let outcome = match complete_word(
            &mut self.line_buffer,
            word_start,
            candidates,
            allow_prefix,
            self.config.completion_case,
        ) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::debug!(message = "completion does not fit", ?err);
                self.ding()?;
                return ok!(CompletionOutcome::NoMatch);
            }
        };
        tracing::debug!(message = "complete", ?outcome, candidates = candidates.len());

        let show_matches = match outcome {
            CompletionOutcome::Ambiguous { .. } => true,
            CompletionOutcome::MatchWithExtensions { .. } => self.config.always_show_extensions,
            CompletionOutcome::NoMatch | CompletionOutcome::Match { .. } => false,
        };
        if show_matches {
            self.show_matches(candidates)?;
        }

        self.redisplay()?;
        ok!(outcome)
    }

    /// Like [`Readline::complete`], with candidates produced by `generator`. It is
    /// called with the typed word and `0, 1, 2, ..` until it returns `None`.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn complete_with(
        &mut self,
        word_start: usize,
        mut generator: impl FnMut(&str, usize) -> Option<String>,
        allow_prefix: bool,
    ) -> io::Result<CompletionOutcome> {
        let Some(word) = self.line().get(word_start..self.point()).map(str::to_string)
        else {
            return ok!(CompletionOutcome::NoMatch);
        };

        let candidates: Vec<String> = (0..)
            .map_while(|state| generator(&word, state))
            .collect();
        self.complete(word_start, &candidates, allow_prefix)
    }

    /// Print `candidates` in columns on the rows below the line. The next redisplay
    /// draws prompt and line from scratch underneath.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn show_matches<S: AsRef<str>>(&mut self, candidates: &[S]) -> io::Result<()> {
        if let Some(snapshot) = self.redisplay.snapshot() {
            let rows_below = snapshot.rows.saturating_sub(snapshot.cursor_row);
            if rows_below > 0 {
                let rows_below = u16::try_from(rows_below).unwrap_or(u16::MAX);
                self.output.queue(MoveDown(rows_below))?;
            }
        }

        let table = format_match_table(candidates, usize::from(self.term_width()));
        self.output.write_all(b"\n")?;
        self.output.write_all(table.as_bytes())?;
        self.output.flush()?;
        self.redisplay.reset();
        ok!()
    }
}
