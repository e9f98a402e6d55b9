// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::ops::Add;

use tracing_core::LevelFilter;

pub const DEFAULT_LOG_FILE_NAME: &str = "line_editor_log.txt";

/// Configure the tracing logging to suit your needs. You can display the logs to a:
/// 1. file,
/// 2. stdout or stderr,
/// 3. both.
///
/// An editor owns the terminal it draws on, so interactive programs should log to a
/// file. Display output is for non-interactive tools and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct TracingConfig {
    pub writer_config: WriterConfig,
    pub level_filter: LevelFilter,
}

/// The `String` is the path of the log file, eg: `/tmp/line_editor.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriterConfig {
    None,
    Display(DisplayPreference),
    File(String),
    DisplayAndFile(DisplayPreference, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayPreference {
    Stdout,
    Stderr,
}

impl TracingConfig {
    #[must_use]
    pub fn new_file(filename: Option<String>, level_filter: LevelFilter) -> Self {
        Self {
            writer_config: WriterConfig::File(
                filename.unwrap_or_else(|| DEFAULT_LOG_FILE_NAME.to_string()),
            ),
            level_filter,
        }
    }

    #[must_use]
    pub fn get_writer_config(&self) -> WriterConfig { self.writer_config.clone() }

    #[must_use]
    pub fn get_level_filter(&self) -> LevelFilter { self.level_filter }
}

impl From<tracing::Level> for TracingConfig {
    fn from(level: tracing::Level) -> Self {
        Self {
            level_filter: level.into(),
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<LevelFilter> for TracingConfig {
    fn from(level_filter: LevelFilter) -> Self {
        Self {
            level_filter,
            writer_config: WriterConfig::File(DEFAULT_LOG_FILE_NAME.to_string()),
        }
    }
}

impl From<WriterConfig> for TracingConfig {
    fn from(writer_config: WriterConfig) -> Self {
        Self {
            level_filter: LevelFilter::DEBUG,
            writer_config,
        }
    }
}

impl Add<TracingConfig> for TracingConfig {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            level_filter: self.level_filter.max(rhs.level_filter),
            writer_config: self.writer_config + rhs.writer_config,
        }
    }
}

/// The right hand side wins where both sides configure the same thing.
impl Add<WriterConfig> for WriterConfig {
    type Output = Self;

    fn add(self, rhs: WriterConfig) -> Self::Output {
        use WriterConfig::{Display, DisplayAndFile, File, None};

        match (self, rhs) {
            (None, wc_rhs) => wc_rhs,
            (wc_lhs, None) => wc_lhs,
            (Display(dp_lhs), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
            (File(f_lhs), Display(dp_rhs)) => DisplayAndFile(dp_rhs, f_lhs),
            (Display(_), Display(dp_rhs)) => Display(dp_rhs),
            (File(_), File(f_rhs)) => File(f_rhs),
            (Display(_) | File(_), DisplayAndFile(dp_rhs, f_rhs))
            | (DisplayAndFile(_, f_rhs), Display(dp_rhs))
            | (DisplayAndFile(_, _), DisplayAndFile(dp_rhs, f_rhs)) => {
                DisplayAndFile(dp_rhs, f_rhs)
            }
            (DisplayAndFile(dp_lhs, _), File(f_rhs)) => DisplayAndFile(dp_lhs, f_rhs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_add_writer_configs() {
        let file = WriterConfig::File("a.log".into());
        let stderr = WriterConfig::Display(DisplayPreference::Stderr);
        let stdout = WriterConfig::Display(DisplayPreference::Stdout);

        assert_eq2!(WriterConfig::None + file.clone(), file);
        assert_eq2!(stderr.clone() + WriterConfig::None, stderr);
        assert_eq2!(stdout.clone() + stderr.clone(), stderr);
        assert_eq2!(
            file.clone() + stderr.clone(),
            WriterConfig::DisplayAndFile(DisplayPreference::Stderr, "a.log".into())
        );
        assert_eq2!(
            WriterConfig::DisplayAndFile(DisplayPreference::Stdout, "a.log".into())
                + WriterConfig::File("b.log".into()),
            WriterConfig::DisplayAndFile(DisplayPreference::Stdout, "b.log".into())
        );
    }

    #[test]
    fn test_add_tracing_configs_keeps_most_verbose_level() {
        let lhs = TracingConfig::from(LevelFilter::INFO);
        let rhs = TracingConfig::from(WriterConfig::Display(DisplayPreference::Stderr));
        let sum = lhs + rhs;
        assert_eq2!(sum.level_filter, LevelFilter::DEBUG);
        assert_eq2!(
            sum.writer_config,
            WriterConfig::DisplayAndFile(
                DisplayPreference::Stderr,
                DEFAULT_LOG_FILE_NAME.to_string()
            )
        );
    }
}
