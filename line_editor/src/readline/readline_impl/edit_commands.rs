// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The built in [`EditCommand`]s. Each returns `Ok(false)` to ring the bell.

use crossterm::{QueueableCommand,
                cursor::MoveTo,
                terminal::{Clear, ClearType}};
use smallvec::{SmallVec, smallvec};
use std::io::Write;

use super::{Readline, SessionExit};
use crate::{EditCommand, HistoryRecall, ReadlineError, char_length, decode,
            is_continuation_byte, next_grapheme_boundary, ok, prev_grapheme_boundary};

impl Readline {
    /// Run `command` as if a key bound to it was pressed, `byte` being the first byte of
    /// that key.
    ///
    /// # Errors
    ///
    /// Returns the IO error from reading further input or from drawing.
    pub fn run_command(
        &mut self,
        command: EditCommand,
        byte: u8,
    ) -> Result<bool, ReadlineError> {
        let handled = match command {
            EditCommand::SelfInsert => self.self_insert(byte)?,
            EditCommand::AcceptLine => self.accept_line()?,
            EditCommand::Interrupt => self.interrupt()?,
            EditCommand::DeleteCharOrEof => {
                if self.line_buffer.is_empty() {
                    self.crlf()?;
                    self.done_with(SessionExit::EndOfInput);
                    true
                } else {
                    self.delete_char()
                }
            }
            EditCommand::DeleteChar => self.delete_char(),
            EditCommand::BackwardDeleteChar => self.backward_delete_char(),
            EditCommand::ForwardChar => self.forward_char(),
            EditCommand::BackwardChar => self.backward_char(),
            EditCommand::BeginningOfLine => self.set_point(0),
            EditCommand::EndOfLine => self.set_point(self.end()),
            EditCommand::KillLine => self.kill(self.point(), self.end()),
            EditCommand::UnixLineDiscard => self.kill(0, self.point()),
            EditCommand::UnixWordRubout => self.kill(self.word_start_before_point(), self.point()),
            EditCommand::Yank => self.yank(),
            EditCommand::PreviousHistory => self.previous_history(),
            EditCommand::NextHistory => self.next_history(),
            EditCommand::ClearScreen => self.clear_screen()?,
            EditCommand::InsertKeyCode => self.insert_text(&format!("~{byte}")),
            EditCommand::Alert => false,
        };
        ok!(handled)
    }

    fn self_insert(&mut self, byte: u8) -> Result<bool, ReadlineError> {
        let text = self.read_char(byte)?;
        ok!(self.insert_text(&text))
    }

    /// Pull in the continuation bytes announced by `lead_byte`. Reading stops at the
    /// first byte that is not a continuation byte, which is pushed back so it is
    /// dispatched as its own key. Bytes that do not decode are each taken as the
    /// Latin-1 character with the same value.
    fn read_char(&mut self, lead_byte: u8) -> Result<String, ReadlineError> {
        let expected = char_length(lead_byte);
        let mut bytes: SmallVec<[u8; 4]> = smallvec![lead_byte];
        while bytes.len() < expected {
            match self.next_byte()? {
                Some(byte) if is_continuation_byte(byte) => bytes.push(byte),
                Some(byte) => {
                    self.pending_byte = Some(byte);
                    break;
                }
                None => break,
            }
        }

        match decode(&bytes) {
            Ok((ch, _)) => ok!(ch.to_string()),
            Err(err) => {
                tracing::debug!(message = "undecodable input", ?err, bytes = ?bytes.as_slice());
                ok!(bytes.iter().copied().map(char::from).collect())
            }
        }
    }

    fn accept_line(&mut self) -> Result<bool, ReadlineError> {
        self.set_point(self.end());
        self.redisplay()?;
        self.crlf()?;
        self.done();
        ok!(true)
    }

    fn interrupt(&mut self) -> Result<bool, ReadlineError> {
        self.line_buffer.clear();
        self.redisplay()?;
        self.crlf()?;
        self.done_with(SessionExit::Interrupt);
        ok!(true)
    }

    fn delete_char(&mut self) -> bool {
        let point = self.point();
        if point >= self.end() {
            return false;
        }
        let next = next_grapheme_boundary(self.line(), point);
        self.delete_text(point, next)
    }

    fn backward_delete_char(&mut self) -> bool {
        let point = self.point();
        if point == 0 {
            return false;
        }
        let prev = prev_grapheme_boundary(self.line(), point);
        self.delete_text(prev, point)
    }

    fn forward_char(&mut self) -> bool {
        let point = self.point();
        if point >= self.end() {
            return false;
        }
        self.set_point(next_grapheme_boundary(self.line(), point))
    }

    fn backward_char(&mut self) -> bool {
        let point = self.point();
        if point == 0 {
            return false;
        }
        self.set_point(prev_grapheme_boundary(self.line(), point))
    }

    /// Start of the word that ends at the cursor, skipping whitespace right before it.
    fn word_start_before_point(&self) -> usize {
        let before = &self.line()[..self.point()];
        let trimmed = before.trim_end_matches(char::is_whitespace);
        trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(index, ch)| index + ch.len_utf8())
    }

    fn yank(&mut self) -> bool {
        match self.kill_text.clone() {
            Some(text) if !text.is_empty() => self.insert_text(&text),
            _ => false,
        }
    }

    fn previous_history(&mut self) -> bool {
        let recall = self.history.recall_previous();
        self.show_recall(recall)
    }

    fn next_history(&mut self) -> bool {
        let recall = self.history.recall_next();
        self.show_recall(recall)
    }

    fn show_recall(&mut self, recall: HistoryRecall) -> bool {
        match recall {
            HistoryRecall::Entry(entry) => {
                self.set_line_from_history(entry);
                true
            }
            HistoryRecall::LiveLine => {
                self.line_buffer.show_owned();
                true
            }
            HistoryRecall::NotFound => false,
        }
    }

    fn clear_screen(&mut self) -> Result<bool, ReadlineError> {
        self.output.queue(Clear(ClearType::All))?;
        self.output.queue(MoveTo(0, 0))?;
        self.output.flush()?;
        self.redisplay.reset();
        ok!(true)
    }
}
