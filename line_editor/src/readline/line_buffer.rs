// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The text being edited, and the cursor.
//!
//! Offsets are bytes. The buffer itself only checks that an offset is in range and on a
//! char boundary (so it can never split a UTF-8 sequence); snapping to grapheme cluster
//! boundaries is up to the caller, which uses [`crate::core::unicode`] for that.
//!
//! While a history entry is being recalled the buffer shows it through a
//! [`LineView::Borrowed`] view without copying it. The first mutation copies the entry
//! into the owned storage ([`LineBuffer::materialize`]), so history is never edited in
//! place.

use thiserror::Error;

use crate::HistoryEntry;

/// Unbounded buffers grow by at least this many bytes at a time.
pub const LINE_BUFFER_GROWTH_INCREMENT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LineBufferError {
    #[error("line can not be longer than {max} bytes")]
    LineTooLong { max: usize },
}

/// What the buffer currently shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineView {
    /// The owned, editable storage.
    Owned,
    /// A recalled history entry, shown as is.
    Borrowed(HistoryEntry),
}

#[derive(Debug, Clone)]
pub struct LineBuffer {
    buffer: String,
    /// Logical capacity. `end() <= capacity` always holds.
    capacity: usize,
    /// `0` means unbounded.
    max_line_length: usize,
    view: LineView,
    point: usize,
    edit_count: u64,
}

impl Default for LineBuffer {
    fn default() -> Self { Self::new(0) }
}

impl LineBuffer {
    #[must_use]
    pub fn new(max_line_length: usize) -> Self {
        Self {
            buffer: String::new(),
            capacity: 0,
            max_line_length,
            view: LineView::Owned,
            point: 0,
            edit_count: 0,
        }
    }

    /// The displayed line.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.view {
            LineView::Owned => &self.buffer,
            LineView::Borrowed(entry) => entry.text(),
        }
    }

    #[must_use]
    pub fn point(&self) -> usize { self.point }

    #[must_use]
    pub fn end(&self) -> usize { self.text().len() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn max_line_length(&self) -> usize { self.max_line_length }

    #[must_use]
    pub fn view(&self) -> &LineView { &self.view }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.text().is_empty() }

    /// Increases on every mutation of the text. Cursor moves and view switches don't
    /// count.
    #[must_use]
    pub fn edit_count(&self) -> u64 { self.edit_count }

    /// Takes effect on the next growth, existing text is never truncated.
    pub fn set_max_line_length(&mut self, max_line_length: usize) {
        self.max_line_length = max_line_length;
    }

    /// Move the cursor. Returns `false` (and leaves the cursor) if `point` is past the
    /// end or inside a UTF-8 sequence.
    pub fn set_point(&mut self, point: usize) -> bool {
        if point > self.end() || !self.text().is_char_boundary(point) {
            return false;
        }
        self.point = point;
        true
    }

    /// Copy a borrowed history entry into the owned storage. Every mutation starts with
    /// this.
    pub fn materialize(&mut self) {
        if let LineView::Borrowed(entry) = &self.view {
            self.buffer.clear();
            self.buffer.push_str(entry.text());
            self.capacity = self.capacity.max(self.buffer.len());
            self.view = LineView::Owned;
        }
    }

    /// Insert `text` at the cursor and move the cursor past it.
    ///
    /// # Errors
    ///
    /// Returns [`LineBufferError::LineTooLong`] if the line would exceed the maximum
    /// length. Nothing is changed in that case.
    pub fn insert(&mut self, text: &str) -> Result<(), LineBufferError> {
        if text.is_empty() {
            return Ok(());
        }
        self.ensure_capacity(self.end() + text.len())?;
        self.materialize();

        self.buffer.insert_str(self.point, text);
        self.point += text.len();
        self.edit_count += 1;
        Ok(())
    }

    /// Delete `[start, end_excl)`. Returns `false` without changing anything if the range
    /// is empty, out of bounds, or does not fall on char boundaries.
    ///
    /// The cursor stays put if it was before the range, moves to `start` if it was
    /// inside it, and shifts left by the deleted width if it was after it.
    pub fn delete(&mut self, start: usize, end_excl: usize) -> bool {
        if start == end_excl || !self.is_valid_range(start, end_excl) {
            return false;
        }
        self.materialize();

        self.buffer.replace_range(start..end_excl, "");
        self.point = adjust_point_for_delete(self.point, start, end_excl);
        self.edit_count += 1;
        true
    }

    /// Replace `[start, end_excl)` with `text` and put the cursor after it. Either the
    /// whole replacement happens or nothing does.
    ///
    /// # Errors
    ///
    /// Returns [`LineBufferError::LineTooLong`] if the result would exceed the maximum
    /// length.
    pub fn replace_range(
        &mut self,
        start: usize,
        end_excl: usize,
        text: &str,
    ) -> Result<bool, LineBufferError> {
        if !self.is_valid_range(start, end_excl) {
            return Ok(false);
        }
        self.ensure_capacity(self.end() - (end_excl - start) + text.len())?;
        self.materialize();

        self.buffer.replace_range(start..end_excl, text);
        self.point = start + text.len();
        self.edit_count += 1;
        Ok(true)
    }

    /// Show `entry` without copying it. The cursor goes to the end.
    pub fn set_text(&mut self, entry: HistoryEntry) {
        self.point = entry.text().len();
        self.view = LineView::Borrowed(entry);
    }

    /// Switch back to the owned storage (the line that was being edited before history
    /// navigation started). The cursor goes to the end.
    pub fn show_owned(&mut self) {
        self.view = LineView::Owned;
        self.point = self.buffer.len();
    }

    /// Replace the whole line with an owned copy of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`LineBufferError::LineTooLong`] if `text` exceeds the maximum length.
    pub fn replace_all(&mut self, text: &str) -> Result<(), LineBufferError> {
        self.ensure_capacity(text.len())?;
        self.view = LineView::Owned;
        self.buffer.clear();
        self.buffer.push_str(text);
        self.point = self.buffer.len();
        self.edit_count += 1;
        Ok(())
    }

    /// Empty the line and drop any borrowed view.
    pub fn clear(&mut self) {
        let was_empty = self.is_empty();
        self.view = LineView::Owned;
        self.buffer.clear();
        self.point = 0;
        if !was_empty {
            self.edit_count += 1;
        }
    }

    fn is_valid_range(&self, start: usize, end_excl: usize) -> bool {
        let text = self.text();
        start <= end_excl
            && end_excl <= text.len()
            && text.is_char_boundary(start)
            && text.is_char_boundary(end_excl)
    }

    /// Make room for a line of `needed` bytes. Fails if that is over the maximum, even
    /// when the buffer grew past it before the maximum was lowered. Otherwise grows by at
    /// least [`LINE_BUFFER_GROWTH_INCREMENT`] when unbounded, or straight to the maximum
    /// when bounded.
    fn ensure_capacity(&mut self, needed: usize) -> Result<(), LineBufferError> {
        let max = self.max_line_length;
        if max > 0 && needed > max {
            tracing::debug!(message = "line too long", needed, max);
            return Err(LineBufferError::LineTooLong { max });
        }
        if needed <= self.capacity {
            return Ok(());
        }

        let new_capacity = match max {
            0 => needed.max(self.capacity + LINE_BUFFER_GROWTH_INCREMENT),
            max => max,
        };

        self.buffer
            .reserve(new_capacity.saturating_sub(self.buffer.len()));
        self.capacity = new_capacity;
        Ok(())
    }
}

fn adjust_point_for_delete(point: usize, start: usize, end_excl: usize) -> usize {
    if point <= start {
        point
    } else if point <= end_excl {
        start
    } else {
        point - (end_excl - start)
    }
}
