// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::path::Path;

use tracing_appender::rolling::{self, RollingFileAppender};

/// Append trace output to the single file at `path`. A bare file name lands in the
/// current directory. The file is never rotated.
///
/// # Errors
///
/// Returns an error if `path` does not end in a file name, e.g. `/` or `logs/..`.
pub fn try_create(path: &str) -> miette::Result<RollingFileAppender> {
    let path = Path::new(path);

    let Some(file_name) = path.file_name() else {
        miette::bail!("log file path {} does not name a file", path.display());
    };
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok(rolling::never(directory, file_name))
}
