// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal plumbing: the byte source the key dispatcher reads from, the sink the
//! redisplay engine writes to, and raw mode.

// Attach sources.
pub mod input_device;
pub mod output_device;
pub mod raw_mode;

// Re-export.
pub use input_device::*;
pub use output_device::*;
pub use raw_mode::*;

pub type StdMutex<T> = std::sync::Mutex<T>;
pub type SendRawTerminal = dyn std::io::Write + Send;
pub type SafeRawTerminal = std::sync::Arc<StdMutex<SendRawTerminal>>;
