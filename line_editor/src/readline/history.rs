// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bounded, insertion ordered log of accepted lines, with a recall cursor for
//! `Up`/`Down` navigation.
//!
//! Offsets count from the oldest entry (`0`) to the newest (`len() - 1`). Each entry
//! also carries an insertion index that keeps increasing for the life of the log, so
//! callers can tell entries apart even after eviction shifts the offsets.

use std::{collections::VecDeque, rc::Rc};

/// One accepted line. Cloning is cheap; the text is shared, never copied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub index: usize,
    pub line: Rc<str>,
}

impl HistoryEntry {
    #[must_use]
    pub fn text(&self) -> &str { &self.line }
}

/// Result of moving the recall cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryRecall {
    /// Show this entry.
    Entry(HistoryEntry),
    /// Navigation moved past the newest entry; show the line being edited.
    LiveLine,
    /// Nothing to move to (empty log, or already at the oldest entry).
    NotFound,
}

#[derive(Debug)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// Stifle. `0` means unbounded.
    capacity: usize,
    dedup: bool,
    next_index: usize,
    /// Offset of the entry being shown while navigating, `None` when not navigating.
    recall_position: Option<usize>,
}

impl Default for History {
    fn default() -> Self { Self::new(0) }
}

impl History {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
            dedup: true,
            next_index: 0,
            recall_position: None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn capacity(&self) -> usize { self.capacity }

    #[must_use]
    pub fn is_dedup_enabled(&self) -> bool { self.dedup }

    pub fn set_dedup(&mut self, dedup: bool) { self.dedup = dedup; }

    #[must_use]
    pub fn get(&self, offset: usize) -> Option<&HistoryEntry> { self.entries.get(offset) }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> { self.entries.iter() }

    /// Offset of the entry currently recalled, if navigating.
    #[must_use]
    pub fn recall_position(&self) -> Option<usize> { self.recall_position }

    /// Append `line` as the newest entry and return it. Any line is recorded, the empty
    /// one included; callers that don't want blank entries skip them.
    ///
    /// An older entry with the same text is removed first (when dedup is on), then the
    /// oldest entries are evicted until there is room.
    pub fn add(&mut self, line: &str) -> &HistoryEntry {
        if self.dedup {
            self.entries.retain(|it| &*it.line != line);
        }

        if self.capacity > 0 {
            while self.entries.len() >= self.capacity {
                self.entries.pop_front();
            }
        }

        let entry = HistoryEntry {
            index: self.next_index,
            line: Rc::from(line),
        };
        self.next_index += 1;
        self.entries.push_back(entry);
        self.recall_position = None;

        tracing::debug!(
            message = "history add",
            len = self.entries.len(),
            capacity = self.capacity
        );

        &self.entries[self.entries.len() - 1]
    }

    /// Remove the entry at `offset`. Returns `None` if there is no such entry.
    pub fn remove(&mut self, offset: usize) -> Option<HistoryEntry> {
        let removed = self.entries.remove(offset)?;
        self.recall_position = match self.recall_position {
            Some(position) if position == offset => None,
            Some(position) if position > offset => Some(position - 1),
            other => other,
        };
        Some(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recall_position = None;
    }

    /// Change the stifle. Shrinking evicts the oldest entries right away. `0` removes
    /// the limit.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity;
        if capacity == 0 || self.entries.len() <= capacity {
            return;
        }

        let excess = self.entries.len() - capacity;
        self.entries.drain(..excess);
        self.recall_position = self
            .recall_position
            .and_then(|position| position.checked_sub(excess));
    }

    /// Step towards older entries. The first call starts at the newest entry.
    pub fn recall_previous(&mut self) -> HistoryRecall {
        let position = match self.recall_position {
            None if self.entries.is_empty() => return HistoryRecall::NotFound,
            None => self.entries.len() - 1,
            Some(0) => return HistoryRecall::NotFound,
            Some(position) => position - 1,
        };
        self.recall_at(position)
    }

    /// Step towards newer entries. Stepping past the newest entry ends navigation.
    pub fn recall_next(&mut self) -> HistoryRecall {
        match self.recall_position {
            None => HistoryRecall::NotFound,
            Some(position) if position + 1 >= self.entries.len() => {
                self.recall_position = None;
                HistoryRecall::LiveLine
            }
            Some(position) => self.recall_at(position + 1),
        }
    }

    /// Stop navigating, eg: because the user edited the recalled line.
    pub fn reset_recall(&mut self) { self.recall_position = None; }

    fn recall_at(&mut self, position: usize) -> HistoryRecall {
        match self.entries.get(position) {
            Some(entry) => {
                self.recall_position = Some(position);
                HistoryRecall::Entry(entry.clone())
            }
            None => {
                self.recall_position = None;
                HistoryRecall::NotFound
            }
        }
    }
}
