// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Tracing setup. The library itself only emits `tracing` events; an application that
//! wants to see them calls [`try_initialize_logging_global`] (or the thread local
//! variant in tests) with a [`TracingConfig`].

// Attach sources.
pub mod log_file_appender;
pub mod tracing_config;
pub mod tracing_init;

// Re-export.
pub use tracing_config::*;
pub use tracing_init::*;
