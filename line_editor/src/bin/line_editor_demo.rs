// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interactive playground. Completes a handful of command words, echoes each line, and
//! keeps a history. Type `exit` (or press `Ctrl+D` on an empty line) to quit.

use std::{io::{self, Write},
          ops::ControlFlow};

use clap::Parser;
use line_editor::{CR, CompletionOutcome, EditCommand, KeyAction, LF, Readline,
                  ReadlineConfig, ReadlineEvent, TracingConfig,
                  try_initialize_logging_global};
use miette::IntoDiagnostic;
use tracing::level_filters::LevelFilter;

use crate::clap_config::CLIArg;

const COMMAND_WORDS: [&str; 5] = ["exit", "help", "hello", "vi", "view"];

fn main() -> miette::Result<()> {
    let cli_arg = CLIArg::parse();

    // Never log to the terminal being edited.
    if let Some(log_file) = &cli_arg.log_file {
        try_initialize_logging_global(TracingConfig::new_file(
            Some(log_file.clone()),
            LevelFilter::TRACE,
        ))?;
    }

    let mut config = match &cli_arg.config {
        Some(path) => ReadlineConfig::try_load(path)?,
        None => ReadlineConfig::default(),
    };
    if let Some(history_size) = cli_arg.history_size {
        config.history_capacity = history_size;
    }
    if let Some(max_line_length) = cli_arg.max_line_length {
        config.max_line_length = max_line_length;
    }
    tracing::debug!(message = "starting demo", ?config);

    let mut readline = Readline::new_stdio(config);
    bind_completion_keys(&mut readline);

    loop {
        match readline.read_line(&cli_arg.prompt)? {
            ReadlineEvent::Line(line) => {
                let flow = handle_line(&mut readline, &line, &mut io::stdout())
                    .into_diagnostic()?;
                if flow.is_break() {
                    break;
                }
            }
            ReadlineEvent::Interrupted => {}
            ReadlineEvent::Eof => break,
        }
    }

    Ok(())
}

/// Echo `line` and remember it. `exit` stops the loop before anything is echoed.
fn handle_line(
    readline: &mut Readline,
    line: &str,
    out: &mut impl Write,
) -> io::Result<ControlFlow<()>> {
    if line == "exit" {
        return Ok(ControlFlow::Break(()));
    }
    if !line.is_empty() {
        writeln!(out, "echo: {line}")?;
        readline.history_mut().add(line);
    }
    Ok(ControlFlow::Continue(()))
}

fn bind_completion_keys(readline: &mut Readline) {
    readline.bind_key(b'\t', KeyAction::custom(complete_then_space_without_prefix));
    readline.bind_key(b' ', KeyAction::custom(complete_then_space_with_prefix));
    readline.bind_key(CR, KeyAction::custom(complete_then_accept));
    readline.bind_key(LF, KeyAction::custom(complete_then_accept));
}

/// Byte offset where the word ending at the cursor starts.
fn word_start(line: &str, point: usize) -> usize {
    line[..point]
        .char_indices()
        .rev()
        .find(|(_, ch)| ch.is_whitespace())
        .map_or(0, |(index, ch)| index + ch.len_utf8())
}

/// Command words starting with `word`, ignoring ASCII case.
fn matching_command_word(word: &str, state: usize) -> Option<String> {
    COMMAND_WORDS
        .iter()
        .filter(|it| it.get(..word.len()).is_some_and(|head| head.eq_ignore_ascii_case(word)))
        .nth(state)
        .map(|it| (*it).to_string())
}

fn complete_current_word(readline: &mut Readline, allow_prefix: bool) -> CompletionOutcome {
    let start = word_start(readline.line(), readline.point());
    match readline.complete_with(start, matching_command_word, allow_prefix) {
        Ok(outcome) => outcome,
        Err(err) => {
            tracing::warn!(message = "completion failed", ?err);
            CompletionOutcome::NoMatch
        }
    }
}

fn complete_then_space(readline: &mut Readline, allow_prefix: bool) -> bool {
    if complete_current_word(readline, allow_prefix).is_accepted() {
        readline.insert_text(" ")
    } else {
        false
    }
}

fn complete_then_space_without_prefix(readline: &mut Readline, _byte: u8) -> bool {
    complete_then_space(readline, false)
}

fn complete_then_space_with_prefix(readline: &mut Readline, _byte: u8) -> bool {
    complete_then_space(readline, true)
}

fn complete_then_accept(readline: &mut Readline, byte: u8) -> bool {
    let at_word_start = word_start(readline.line(), readline.point()) == readline.point();
    let accepted = at_word_start || complete_current_word(readline, true).is_accepted();
    if !accepted {
        return false;
    }
    readline
        .run_command(EditCommand::AcceptLine, byte)
        .unwrap_or_else(|err| {
            tracing::warn!(message = "accept failed", ?err);
            false
        })
}

mod clap_config {
    use clap::Parser;

    /// More info: <https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_2/index.html>
    #[derive(Debug, Parser)]
    #[command(bin_name = "line_editor_demo")]
    #[command(about = "Try out line editing, completion and history")]
    #[command(version)]
    #[command(next_line_help = true)]
    #[command(arg_required_else_help(false))]
    pub struct CLIArg {
        #[arg(default_value = "> ", help = "Prompt shown before each line")]
        pub prompt: String,

        #[arg(long, help = "Keep at most this many history entries, 0 for unlimited")]
        pub history_size: Option<usize>,

        #[arg(long, help = "Cap lines at this many bytes, 0 for unlimited")]
        pub max_line_length: Option<usize>,

        #[arg(long, short = 'c', help = "JSON configuration file")]
        pub config: Option<String>,

        #[arg(long, short = 'l', help = "Write trace logs to this file")]
        pub log_file: Option<String>,
    }
}
