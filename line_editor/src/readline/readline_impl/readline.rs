// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crate::{DisplayLine, EchoMode, History, HistoryEntry, InputDevice, KeyAction, KeyMap,
            LineBuffer, OutputDevice, ReadlineConfig, ReadlineError, ReadlineEvent,
            RedrawKind, Redisplay, SpecialKey, StdinInputDevice, ok};

/// Why the current [`Readline::read_line`] call is ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionExit {
    Accept,
    Interrupt,
    EndOfInput,
}

/// # Editor session
///
/// Owns everything one prompt needs: the devices, the [`LineBuffer`], the [`KeyMap`],
/// the [`Redisplay`] state, and the [`History`].
///
/// ```no_run
/// use line_editor::{KeyAction, Readline, ReadlineConfig, ReadlineEvent};
///
/// let mut readline = Readline::new_stdio(ReadlineConfig::default());
/// readline.bind_key(b'\t', KeyAction::custom(|readline, _byte| {
///     readline
///         .complete(0, &["help", "hello", "exit"], false)
///         .is_ok_and(|it| it.is_accepted())
/// }));
/// if let Ok(ReadlineEvent::Line(line)) = readline.read_line("> ") {
///     println!("{line}");
/// }
/// ```
///
/// Key actions get `&mut Readline` and change things only through its methods, so the
/// cursor, the redisplay snapshot and the history recall cursor stay consistent across
/// nested calls.
///
/// When input is a terminal, it is put into raw mode for the duration of
/// [`Readline::read_line`] and restored on every way out of it. Anything else (a pipe,
/// a file) is read one line at a time with no editing.
#[allow(missing_debug_implementations)]
pub struct Readline {
    pub(super) input: Box<dyn InputDevice>,
    pub(super) output: OutputDevice,
    pub(super) config: ReadlineConfig,
    pub(super) prompt: String,
    pub(super) line_buffer: LineBuffer,
    pub(super) kill_text: Option<String>,
    pub(super) echo_mode: EchoMode,
    pub(super) redisplay: Redisplay,
    pub(super) key_map: KeyMap,
    pub(super) history: History,
    pub(super) done: Option<SessionExit>,
    /// A byte read ahead while decoding a character that belongs to the next key.
    pub(super) pending_byte: Option<u8>,
    raw_mode_active: bool,
}

impl Readline {
    #[must_use]
    pub fn new(
        input: Box<dyn InputDevice>,
        output: OutputDevice,
        config: ReadlineConfig,
    ) -> Self {
        let mut history = History::new(config.history_capacity);
        history.set_dedup(config.history_dedup);

        Self {
            input,
            output,
            line_buffer: LineBuffer::new(config.max_line_length),
            config,
            prompt: String::new(),
            kill_text: None,
            echo_mode: EchoMode::Enabled,
            redisplay: Redisplay::default(),
            key_map: KeyMap::default(),
            history,
            done: None,
            pending_byte: None,
            raw_mode_active: false,
        }
    }

    /// Read from stdin, draw on stdout.
    #[must_use]
    pub fn new_stdio(config: ReadlineConfig) -> Self {
        Self::new(
            Box::new(StdinInputDevice::new()),
            OutputDevice::new_stdout(),
            config,
        )
    }

    /// Show `prompt` and edit a line until it is accepted, interrupted, or input ends.
    ///
    /// # Errors
    ///
    /// Returns [`ReadlineError::Terminal`] if raw mode can not be entered or restored,
    /// and [`ReadlineError::IO`] if reading or writing fails.
    pub fn read_line(&mut self, prompt: &str) -> Result<ReadlineEvent, ReadlineError> {
        prompt.clone_into(&mut self.prompt);
        self.line_buffer.clear();
        self.history.reset_recall();
        self.redisplay.reset();
        self.done = None;

        let exit = if self.is_interactive() {
            self.read_interactive()?
        } else {
            self.read_non_interactive()?
        };
        self.done = None;

        let event = match exit {
            SessionExit::Accept => ReadlineEvent::Line(self.accepted_line()),
            SessionExit::Interrupt => ReadlineEvent::Interrupted,
            SessionExit::EndOfInput => ReadlineEvent::Eof,
        };
        tracing::debug!(message = "read_line", ?event);
        ok!(event)
    }

    fn read_interactive(&mut self) -> Result<SessionExit, ReadlineError> {
        self.input
            .enter_raw_mode()
            .map_err(|report| ReadlineError::terminal(&report))?;
        self.raw_mode_active = true;

        let result = self.run_key_loop();
        let restored = self.restore_terminal();

        let exit = result?;
        restored?;
        ok!(exit)
    }

    fn run_key_loop(&mut self) -> Result<SessionExit, ReadlineError> {
        loop {
            self.redisplay()?;

            let Some(byte) = self.next_byte()? else {
                self.crlf()?;
                return ok!(SessionExit::EndOfInput);
            };
            self.dispatch_key(byte)?;

            if let Some(exit) = self.done.take() {
                return ok!(exit);
            }
        }
    }

    /// The pushed back byte if there is one, otherwise the next byte from input.
    pub(super) fn next_byte(&mut self) -> io::Result<Option<u8>> {
        match self.pending_byte.take() {
            Some(byte) => ok!(Some(byte)),
            None => self.input.read_byte(),
        }
    }

    /// Piped input: one line per call, echoed after the prompt, no key bindings.
    fn read_non_interactive(&mut self) -> Result<SessionExit, ReadlineError> {
        let mut bytes = Vec::new();
        let mut saw_newline = false;
        while let Some(byte) = self.input.read_byte()? {
            if byte == b'\n' {
                saw_newline = true;
                break;
            }
            bytes.push(byte);
        }

        if bytes.is_empty() && !saw_newline {
            self.crlf()?;
            return ok!(SessionExit::EndOfInput);
        }

        let text = String::from_utf8_lossy(&bytes);
        let text = text.trim_end_matches('\r').trim_start();
        if !self.insert_text(text) {
            self.ding()?;
        }
        self.redisplay()?;
        self.crlf()?;
        ok!(SessionExit::Accept)
    }

    /// Resolve the key starting with `byte` and run its action. Rings the bell if the
    /// key is unbound or the action fails.
    ///
    /// # Errors
    ///
    /// Returns the IO error from reading lookahead bytes or from the action.
    pub fn dispatch_key(&mut self, byte: u8) -> Result<(), ReadlineError> {
        let resolution = self.key_map.resolve(byte, self.input.as_mut())?;
        tracing::trace!(
            message = "dispatch",
            bytes = ?resolution.bytes.as_slice(),
            action = ?resolution.action
        );

        let edit_count = self.line_buffer.edit_count();
        let handled = match resolution.action {
            None => false,
            Some(KeyAction::Command(command)) => self.run_command(command, byte)?,
            Some(KeyAction::Custom(handler)) => handler(self, byte),
        };

        if self.line_buffer.edit_count() != edit_count {
            self.history.reset_recall();
        }
        if !handled {
            self.ding()?;
        }
        ok!()
    }

    fn accepted_line(&self) -> String {
        let mut line = self.line_buffer.text().to_string();
        if self.config.strip_trailing_whitespace && line.ends_with(char::is_whitespace) {
            line.pop();
        }
        line
    }

    fn restore_terminal(&mut self) -> Result<(), ReadlineError> {
        if !self.raw_mode_active {
            return ok!();
        }
        self.raw_mode_active = false;
        self.input
            .restore_mode()
            .map_err(|report| ReadlineError::terminal(&report))
    }
}

/// Line accessors and mutators.
impl Readline {
    #[must_use]
    pub fn line(&self) -> &str { self.line_buffer.text() }

    #[must_use]
    pub fn point(&self) -> usize { self.line_buffer.point() }

    #[must_use]
    pub fn end(&self) -> usize { self.line_buffer.end() }

    #[must_use]
    pub fn line_buffer(&self) -> &LineBuffer { &self.line_buffer }

    /// Returns `false` if `point` is out of range or not on a char boundary.
    pub fn set_point(&mut self, point: usize) -> bool { self.line_buffer.set_point(point) }

    /// Insert at the cursor. Returns `false` (line unchanged) if the line would get too
    /// long.
    pub fn insert_text(&mut self, text: &str) -> bool {
        self.line_buffer.insert(text).is_ok()
    }

    /// Delete `[start, end_excl)`. Returns `false` for an empty or invalid range.
    pub fn delete_text(&mut self, start: usize, end_excl: usize) -> bool {
        self.line_buffer.delete(start, end_excl)
    }

    /// Replace the whole line, cursor at the end. Returns `false` if `text` is too long.
    pub fn replace_line(&mut self, text: &str) -> bool {
        self.line_buffer.replace_all(text).is_ok()
    }

    /// Show a history entry without copying it until it is edited.
    pub fn set_line_from_history(&mut self, entry: HistoryEntry) {
        self.line_buffer.set_text(entry);
    }

    /// Last killed text, if any.
    #[must_use]
    pub fn kill_text(&self) -> Option<&str> { self.kill_text.as_deref() }

    /// Move `[start, end_excl)` into the kill slot, replacing what was there.
    pub fn kill(&mut self, start: usize, end_excl: usize) -> bool {
        if start == end_excl {
            return true;
        }
        let Some(text) = self.line().get(start..end_excl).map(str::to_string) else {
            return false;
        };
        if !self.line_buffer.delete(start, end_excl) {
            return false;
        }
        self.kill_text = Some(text);
        true
    }

    /// Cap the line length in bytes, `0` for no cap.
    pub fn limit_line_length(&mut self, max_line_length: usize) {
        self.config.max_line_length = max_line_length;
        self.line_buffer.set_max_line_length(max_line_length);
    }

    /// Stop editing and return the line from [`Readline::read_line`].
    pub fn done(&mut self) { self.done = Some(SessionExit::Accept); }

    /// Stop editing for a reason other than accepting the line.
    pub fn done_with(&mut self, exit: SessionExit) { self.done = Some(exit); }

    #[must_use]
    pub fn is_done(&self) -> bool { self.done.is_some() }
}

/// Output.
impl Readline {
    /// Bring the screen up to date with the line.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn redisplay(&mut self) -> io::Result<RedrawKind> {
        let line = DisplayLine::new(
            self.line_buffer.text(),
            self.line_buffer.point(),
            self.echo_mode,
        );
        let term_width = self.term_width();
        self.redisplay
            .render(&mut self.output, &self.prompt, line, term_width)
    }

    /// Forget what is on screen and draw prompt and line again from the cursor.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn reset_line_state(&mut self) -> io::Result<()> {
        self.redisplay.reset();
        self.redisplay()?;
        ok!()
    }

    /// Move the terminal cursor to the start of the next row.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn crlf(&mut self) -> io::Result<()> {
        self.output.write_all(b"\n")?;
        self.output.flush()?;
        ok!()
    }

    /// Ring the bell.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn ding(&mut self) -> io::Result<()> { self.output.bell() }

    /// Write `text` to the output device. The line is drawn again from scratch on the
    /// next redisplay.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to the output device.
    pub fn print(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        self.redisplay.reset();
        ok!()
    }

    #[must_use]
    pub fn term_width(&self) -> u16 { self.output.width(self.config.fallback_term_width) }

    #[must_use]
    pub fn prompt(&self) -> &str { &self.prompt }

    pub fn enable_echo(&mut self) { self.echo_mode = EchoMode::Enabled; }

    /// Show `substitute` instead of each typed character, or nothing if it is `'\0'`.
    pub fn disable_echo(&mut self, substitute: char) {
        self.echo_mode = EchoMode::masked(substitute);
    }

    #[must_use]
    pub fn echo_mode(&self) -> EchoMode { self.echo_mode }
}

/// Configuration, key bindings, history.
impl Readline {
    #[must_use]
    pub fn config(&self) -> &ReadlineConfig { &self.config }

    /// Whether the input is a terminal (line editing) or not (plain line reads).
    #[must_use]
    pub fn is_interactive(&self) -> bool { self.input.is_terminal() }

    #[must_use]
    pub fn history(&self) -> &History { &self.history }

    pub fn history_mut(&mut self) -> &mut History { &mut self.history }

    #[must_use]
    pub fn key_map(&self) -> &KeyMap { &self.key_map }

    pub fn key_map_mut(&mut self) -> &mut KeyMap { &mut self.key_map }

    pub fn bind_key(&mut self, byte: u8, action: impl Into<KeyAction>) {
        self.key_map.bind(byte, action);
    }

    pub fn bind_sequence(&mut self, sequence: &[u8], action: impl Into<KeyAction>) -> bool {
        self.key_map.bind_sequence(sequence, action)
    }

    pub fn bind_special(&mut self, key: SpecialKey, action: impl Into<KeyAction>) {
        self.key_map.bind_special(key, action);
    }

    pub fn unbind_key(&mut self, byte: u8) -> Option<KeyAction> { self.key_map.unbind(byte) }
}

impl Drop for Readline {
    fn drop(&mut self) {
        if let Err(err) = self.restore_terminal() {
            tracing::warn!(message = "could not restore terminal mode", ?err);
        }
    }
}
