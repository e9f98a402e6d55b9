// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # line_editor
//!
//! An embeddable, synchronous line editor for interactive command line programs. It
//! reads raw keystrokes from an input stream, keeps an editable line with a cursor,
//! redraws the terminal incrementally, completes words against a candidate list, and
//! recalls previous lines from a bounded history.
//!
//! ```no_run
//! use line_editor::{Readline, ReadlineConfig, ReadlineEvent};
//!
//! # fn main() -> Result<(), line_editor::ReadlineError> {
//! let mut readline = Readline::new_stdio(ReadlineConfig::default());
//! loop {
//!     match readline.read_line("> ")? {
//!         ReadlineEvent::Line(line) if line.is_empty() => {}
//!         ReadlineEvent::Line(line) => {
//!             println!("echo: {line}");
//!             readline.history_mut().add(&line);
//!         }
//!         ReadlineEvent::Eof | ReadlineEvent::Interrupted => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The pieces, leaves first:
//!
//! - [`core::unicode`]: codepoint decoding, grapheme boundaries, display widths.
//! - [`History`]: bounded, de-duplicating log with a recall cursor.
//! - [`LineBuffer`]: the edited text, the cursor, and a copy-on-write view onto a
//!   recalled history entry.
//! - [`KeyMap`]: a byte trie resolving raw input (including escape sequences) to
//!   [`KeyAction`]s, with non-blocking lookahead.
//! - [`Redisplay`]: diff-based terminal update with a wrap-aware fallback.
//! - [`completion`](readline::completion): common prefix, classification, column
//!   table.
//! - [`Readline`]: the session tying them together.

// Enforce strict error handling in production library code only. Tests and examples are
// allowed to use .unwrap() (workspace `Cargo.toml` config allows it).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

// Attach modules.
pub mod core;
pub mod readline;

// Re-export.
#[allow(ambiguous_glob_reexports)]
pub use core::*;
#[allow(ambiguous_glob_reexports)]
pub use readline::*;
