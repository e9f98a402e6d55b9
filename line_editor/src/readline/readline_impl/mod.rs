// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod edit_commands;
pub mod readline;
pub mod session_completion;

// Re-export.
pub use readline::*;
