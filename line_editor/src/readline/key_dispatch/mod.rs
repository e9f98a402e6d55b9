// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Resolve raw input bytes to [`KeyAction`]s.
//!
//! Terminals send most keys as a single byte, but arrows and friends arrive as escape
//! sequences (`ESC [ A`), and a bare `ESC` looks exactly like the start of one. The
//! [`KeyMap`] is a trie over bytes. Resolution walks it while more bytes are
//! *immediately* available, and the action bound at the deepest node that had one wins.

// Attach sources.
pub mod key_action;
pub mod key_map;
pub mod special_key;

// Re-export.
pub use key_action::*;
pub use key_map::*;
pub use special_key::*;
