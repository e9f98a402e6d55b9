// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Word completion against a caller supplied candidate list.
//!
//! The session entry points are [`crate::Readline::complete`] and
//! [`crate::Readline::complete_with`]. They run [`complete_word`] on the line buffer,
//! then print a [`format_match_table`] below the line when the result is ambiguous.

// Attach sources.
pub mod common_prefix;
pub mod complete_word;
pub mod match_table;

// Re-export.
pub use common_prefix::*;
pub use complete_word::*;
pub use match_table::*;
