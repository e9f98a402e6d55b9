// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The Unicode service used by the line buffer and the redisplay engine.
//!
//! - [`utf8`] decodes raw terminal bytes into codepoints.
//! - [`segmentation`] finds character and grapheme cluster boundaries and reports
//!   display widths.
//!
//! With the `unicode` cargo feature disabled, grapheme boundaries collapse to character
//! boundaries and every byte is one column wide.

// Attach sources.
pub mod segmentation;
pub mod utf8;

// Re-export.
pub use segmentation::*;
pub use utf8::*;
