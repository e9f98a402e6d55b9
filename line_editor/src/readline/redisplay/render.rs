// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, Write};

use crossterm::{QueueableCommand,
                cursor::{MoveDown, MoveLeft, MoveRight, MoveToColumn, MoveUp},
                terminal::{Clear, ClearType}};
use strum_macros::Display;

use crate::{DisplayLine, ok, str_display_width_strip_ansi};

/// How [`Redisplay::render`] brought the screen up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RedrawKind {
    Unchanged,
    /// Nothing was on screen: prompt and line printed from the current cursor position.
    Initial,
    Append,
    Truncate,
    CursorOnly,
    /// Single row redraw from column 0.
    Full,
    /// Multi row redraw. Used whenever the previous or the current rendering does not
    /// fit on one row.
    Wrapped,
}

/// What the last call to [`Redisplay::render`] put on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    pub prompt: String,
    pub prompt_width: usize,
    pub line: DisplayLine,
    /// Rows occupied by prompt and line, at least 1.
    pub rows: usize,
    /// Row the cursor was left on, 1 based, counted from the prompt row.
    pub cursor_row: usize,
}

/// Diff based redisplay. Holds the snapshot of the last draw.
#[derive(Debug, Default)]
pub struct Redisplay {
    snapshot: Option<RenderSnapshot>,
}

impl Redisplay {
    #[must_use]
    pub fn snapshot(&self) -> Option<&RenderSnapshot> { self.snapshot.as_ref() }

    /// Forget what is on screen. The next render starts from scratch at the current
    /// cursor position, eg: after a completion listing was printed below the line.
    pub fn reset(&mut self) { self.snapshot = None; }

    /// Update the screen so it shows `prompt` followed by `line`, with the cursor in
    /// place. The snapshot is replaced even if writing fails, so the next call diffs
    /// against what was meant to be drawn.
    ///
    /// # Errors
    ///
    /// Returns the IO error from writing to `term`.
    pub fn render(
        &mut self,
        term: &mut dyn Write,
        prompt: &str,
        line: DisplayLine,
        term_width: u16,
    ) -> io::Result<RedrawKind> {
        let term_width = usize::from(term_width.max(1));
        let prompt_width = str_display_width_strip_ansi(prompt);
        let previous = self.snapshot.take();
        let kind = classify(previous.as_ref(), prompt, &line, prompt_width, term_width);

        let result = match (kind, &previous) {
            (RedrawKind::Unchanged, _) => ok!(),
            (RedrawKind::Initial, _) => draw_initial(term, prompt, &line),
            (RedrawKind::Full, _) => draw_full(term, prompt, &line),
            (RedrawKind::Wrapped, _) => {
                draw_wrapped(term, previous.as_ref(), prompt, prompt_width, &line, term_width)
            }
            (RedrawKind::Append, Some(previous)) => draw_append(term, &previous.line, &line),
            (RedrawKind::Truncate, Some(previous)) => {
                draw_truncate(term, &previous.line, &line)
            }
            (RedrawKind::CursorOnly, Some(previous)) => {
                move_horizontally(term, previous.line.cursor_col, line.cursor_col)
            }
            (RedrawKind::Append | RedrawKind::Truncate | RedrawKind::CursorOnly, None) => {
                draw_initial(term, prompt, &line)
            }
        }
        .and_then(|()| term.flush());

        let (rows, cursor_row) = row_math(prompt_width, &line, term_width);
        tracing::trace!(message = "redisplay", %kind, rows, cursor_row);
        self.snapshot = Some(RenderSnapshot {
            prompt: prompt.to_string(),
            prompt_width,
            line,
            rows,
            cursor_row,
        });

        result.map(|()| kind)
    }
}

fn classify(
    previous: Option<&RenderSnapshot>,
    prompt: &str,
    line: &DisplayLine,
    prompt_width: usize,
    term_width: usize,
) -> RedrawKind {
    // The cursor after the last column must still be on the same row.
    let fits_one_row = prompt_width + line.width < term_width;

    let Some(previous) = previous else {
        return if fits_one_row {
            RedrawKind::Initial
        } else {
            RedrawKind::Wrapped
        };
    };

    if !fits_one_row || previous.rows > 1 {
        return RedrawKind::Wrapped;
    }
    if previous.prompt != prompt {
        return RedrawKind::Full;
    }

    let (old, new) = (previous.line.text.as_str(), line.text.as_str());
    if old == new {
        if previous.line.cursor_col == line.cursor_col {
            RedrawKind::Unchanged
        } else {
            RedrawKind::CursorOnly
        }
    } else if new.starts_with(old) {
        RedrawKind::Append
    } else if old.starts_with(new) {
        RedrawKind::Truncate
    } else {
        RedrawKind::Full
    }
}

/// Rows drawn and the 1 based row of the cursor, from `(prompt + offset) / width`.
fn row_math(prompt_width: usize, line: &DisplayLine, term_width: usize) -> (usize, usize) {
    let rows = (prompt_width + line.width).div_ceil(term_width).max(1);
    let cursor_row = (prompt_width + line.cursor_col) / term_width + 1;
    (rows.max(cursor_row), cursor_row)
}

fn columns(count: usize) -> u16 { u16::try_from(count).unwrap_or(u16::MAX) }

/// `CSI 0 C` moves one column in many terminals, so zero moves are skipped.
fn move_horizontally(term: &mut dyn Write, from: usize, to: usize) -> io::Result<()> {
    if to > from {
        term.queue(MoveRight(columns(to - from)))?;
    } else if from > to {
        term.queue(MoveLeft(columns(from - to)))?;
    }
    ok!()
}

fn move_back_from_end(term: &mut dyn Write, line: &DisplayLine) -> io::Result<()> {
    move_horizontally(term, line.width, line.cursor_col)
}

fn draw_initial(term: &mut dyn Write, prompt: &str, line: &DisplayLine) -> io::Result<()> {
    term.write_all(prompt.as_bytes())?;
    term.write_all(line.text.as_bytes())?;
    move_back_from_end(term, line)
}

fn draw_full(term: &mut dyn Write, prompt: &str, line: &DisplayLine) -> io::Result<()> {
    term.queue(MoveToColumn(0))?;
    term.queue(Clear(ClearType::UntilNewLine))?;
    draw_initial(term, prompt, line)
}

fn draw_append(
    term: &mut dyn Write,
    previous: &DisplayLine,
    line: &DisplayLine,
) -> io::Result<()> {
    move_horizontally(term, previous.cursor_col, previous.width)?;
    term.write_all(&line.text.as_bytes()[previous.text.len()..])?;
    move_back_from_end(term, line)
}

fn draw_truncate(
    term: &mut dyn Write,
    previous: &DisplayLine,
    line: &DisplayLine,
) -> io::Result<()> {
    move_horizontally(term, previous.cursor_col, line.width)?;
    term.queue(Clear(ClearType::UntilNewLine))?;
    move_back_from_end(term, line)
}

fn draw_wrapped(
    term: &mut dyn Write,
    previous: Option<&RenderSnapshot>,
    prompt: &str,
    prompt_width: usize,
    line: &DisplayLine,
    term_width: usize,
) -> io::Result<()> {
    term.write_all(b"\r")?;

    // Erase every row drawn last time, bottom up, ending on the prompt row.
    if let Some(previous) = previous {
        if previous.rows > previous.cursor_row {
            term.queue(MoveDown(columns(previous.rows - previous.cursor_row)))?;
        }
        for _ in 1..previous.rows {
            term.queue(Clear(ClearType::CurrentLine))?;
            term.queue(MoveUp(1))?;
        }
        term.queue(Clear(ClearType::CurrentLine))?;
    }

    term.write_all(prompt.as_bytes())?;
    term.write_all(line.text.as_bytes())?;

    let rows = (prompt_width + line.width).div_ceil(term_width).max(1);
    let cursor_row = (prompt_width + line.cursor_col) / term_width + 1;
    let cursor_col = (prompt_width + line.cursor_col) % term_width;

    // The terminal holds the cursor on the last column after filling a row, so force
    // the wrap when the cursor belongs on the next one.
    if rows < cursor_row {
        term.write_all(b"\n")?;
    }

    if line.width > line.cursor_col {
        if rows > cursor_row {
            term.queue(MoveUp(columns(rows - cursor_row)))?;
        }
        term.write_all(b"\r")?;
        if cursor_col > 0 {
            term.queue(MoveRight(columns(cursor_col)))?;
        }
    }
    ok!()
}
