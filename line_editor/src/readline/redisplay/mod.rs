// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keep the terminal in sync with the line being edited.
//!
//! [`DisplayLine`] is what the line looks like on screen (after echo masking) and where
//! the cursor is, in columns. [`Redisplay`] compares it with the snapshot of the last
//! draw and writes the smallest update it can:
//!
//! | change since last draw                  | output                                   |
//! |-----------------------------------------|------------------------------------------|
//! | nothing drawn yet                       | prompt + line                            |
//! | text appended                           | the new suffix                           |
//! | text truncated                          | move, erase to end of row                |
//! | only the cursor moved                   | move                                     |
//! | anything else                           | column 0, erase row, prompt + line       |
//! | line wider than the terminal, or was    | erase every drawn row, redraw, row math  |

// Attach sources.
pub mod display_line;
pub mod render;

// Re-export.
pub use display_line::*;
pub use render::*;
