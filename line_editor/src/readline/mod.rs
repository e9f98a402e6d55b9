// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod completion;
pub mod history;
pub mod key_dispatch;
pub mod line_buffer;
pub mod readline_config;
pub mod readline_error;
pub mod readline_impl;
pub mod redisplay;

// Re-export.
pub use completion::*;
pub use history::*;
pub use key_dispatch::*;
pub use line_buffer::*;
pub use readline_config::*;
pub use readline_error::*;
pub use readline_impl::*;
pub use redisplay::*;
