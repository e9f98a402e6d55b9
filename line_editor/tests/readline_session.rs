// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Whole editing sessions, driven by scripted keystrokes.

use std::{cell::Cell, rc::Rc};

use line_editor::{CompletionOutcome, EditCommand, InputDeviceMock, KeyAction, LineView,
                  OutputDevice, OutputDeviceExt, Readline, ReadlineConfig, ReadlineEvent,
                  StdoutMock, assert_eq2, ctrl};

const BELL: char = '\x07';

struct Session {
    readline: Readline,
    stdout_mock: StdoutMock,
    input_observer: InputDeviceMock,
}

fn session(bytes: &[u8]) -> Session { session_with(bytes, ReadlineConfig::default(), 80) }

fn session_with(bytes: &[u8], config: ReadlineConfig, term_width: u16) -> Session {
    let input = InputDeviceMock::new_terminal(bytes);
    let input_observer = input.clone();
    let (output, stdout_mock) = OutputDevice::new_mock(term_width);
    Session {
        readline: Readline::new(Box::new(input), output, config),
        stdout_mock,
        input_observer,
    }
}

fn line(text: &str) -> ReadlineEvent { ReadlineEvent::Line(text.to_string()) }

#[test]
fn test_typed_line_is_returned_and_echoed() {
    let Session {
        mut readline,
        stdout_mock,
        input_observer,
    } = session(b"hello\r");

    assert_eq2!(readline.read_line("> ").unwrap(), line("hello"));
    assert_eq2!(stdout_mock.get_copy_of_buffer_as_string_strip_ansi(), "> hello\n");
    assert_eq2!(input_observer.raw_mode_depth(), 0);
}

#[test]
fn test_successive_lines_reuse_the_session() {
    let Session { mut readline, .. } = session(b"one\ntwo\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("one"));
    assert_eq2!(readline.read_line("> ").unwrap(), line("two"));
    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Eof);
}

#[test]
fn test_arrow_keys_move_the_cursor() {
    let Session { mut readline, .. } = session(b"ac\x1b[Db\x1b[C!\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("abc!"));
}

#[test]
fn test_home_and_end_in_every_encoding() {
    let Session { mut readline, .. } = session(b"bc\x1b[Ha\x1b[F!\x1bOH<\x1b[4~>\x1b[1~^\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("^<abc!>"));
}

#[test]
fn test_lone_escape_rings_bell() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"ab\x1b");

    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Eof);
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains(BELL));
    assert_eq2!(readline.line(), "ab");
}

#[test]
fn test_unbound_escape_sequence_is_discarded() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"a\x1bxb\r");

    assert_eq2!(readline.read_line("> ").unwrap(), line("ab"));
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains(BELL));
}

#[test]
fn test_unbound_control_key_inserts_its_code() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"ab\x02\x07c\r");
    readline.bind_key(ctrl(b'b'), KeyAction::from(EditCommand::BackwardChar));

    assert_eq2!(readline.read_line("> ").unwrap(), line("a~7cb"));
    assert!(!stdout_mock.get_copy_of_buffer_as_string().contains(BELL));
}

#[test]
fn test_control_key_in_the_middle_of_a_line() {
    let Session { mut readline, .. } = session(b"a\x07b\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("a~7b"));
}

#[test]
fn test_stray_lead_byte_then_enter() {
    let Session { mut readline, .. } = session(&[0xC3, b'\r']);
    assert_eq2!(readline.read_line("> ").unwrap(), line("\u{c3}"));
}

#[test]
fn test_stray_lead_byte_keeps_following_keys() {
    let Session { mut readline, .. } = session(&[0xE2, b'a', b'b', b'\r', b'z', b'\r']);
    assert_eq2!(readline.read_line("> ").unwrap(), line("\u{e2}ab"));
    assert_eq2!(readline.read_line("> ").unwrap(), line("z"));
}

#[test]
fn test_stray_lead_byte_before_escape_sequence() {
    let Session { mut readline, .. } = session(b"x\xC3\x1b[Dy\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("xy\u{c3}"));
}

#[test]
fn test_backspace_and_delete() {
    let Session { mut readline, .. } = session(b"abcd\x7f\x08\x1b[D\x1b[3~x\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("ax"));
}

#[test]
fn test_multibyte_input() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session("caf\u{e9}\r".as_bytes());

    assert_eq2!(readline.read_line("> ").unwrap(), line("caf\u{e9}"));
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains("caf\u{e9}"));
}

#[test]
fn test_ctrl_c_interrupts() {
    let Session {
        mut readline,
        stdout_mock,
        input_observer,
    } = session(b"abc\x03");

    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Interrupted);
    assert_eq2!(readline.line(), "");
    assert!(stdout_mock.get_copy_of_buffer_as_string().ends_with('\n'));
    assert_eq2!(input_observer.raw_mode_depth(), 0);
}

#[test]
fn test_ctrl_d_ends_input_only_on_empty_line() {
    let Session { mut readline, .. } = session(b"ab\x1b[D\x04\r\x04");
    assert_eq2!(readline.read_line("> ").unwrap(), line("a"));
    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Eof);
}

#[test]
fn test_max_line_length_rings_bell_and_keeps_line() {
    let config = ReadlineConfig {
        max_line_length: 3,
        ..Default::default()
    };
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session_with(b"abcd\r", config, 80);

    assert_eq2!(readline.read_line("> ").unwrap(), line("abc"));
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains(BELL));
}

#[test]
fn test_trailing_whitespace() {
    let Session { mut readline, .. } = session(b"ls  \r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("ls "));

    let config = ReadlineConfig {
        strip_trailing_whitespace: false,
        ..Default::default()
    };
    let Session { mut readline, .. } = session_with(b"ls \r", config, 80);
    assert_eq2!(readline.read_line("> ").unwrap(), line("ls "));
}

#[test]
fn test_history_recall_and_return_to_live_line() {
    let Session { mut readline, .. } =
        session(b"\x1b[A\x1b[A\rlive\x1b[A\x1b[B\r\x1b[A\x1b[A\x1b[A\r");
    readline.history_mut().add("first");
    readline.history_mut().add("second");

    assert_eq2!(readline.read_line("> ").unwrap(), line("first"));
    assert_eq2!(readline.read_line("> ").unwrap(), line("live"));
    // Past the oldest entry: bell, stay on it.
    assert_eq2!(readline.read_line("> ").unwrap(), line("first"));
}

#[test]
fn test_recalled_line_is_not_copied_until_edited() {
    let Session { mut readline, .. } = session(b"\x1b[A");
    readline.history_mut().add("ls -la");

    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Eof);
    assert_eq2!(readline.line(), "ls -la");
    assert!(matches!(readline.line_buffer().view(), LineView::Borrowed(_)));
}

#[test]
fn test_editing_recalled_line_leaves_history_alone() {
    let Session { mut readline, .. } = session(b"\x1b[A!\r");
    readline.history_mut().add("second");

    assert_eq2!(readline.read_line("> ").unwrap(), line("second!"));
    assert_eq2!(readline.history().len(), 1);
    assert_eq2!(readline.history().get(0).unwrap().text(), "second");
}

#[test]
fn test_tab_completion_lists_ambiguous_candidates() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"he\tp\t\r");
    readline.bind_key(
        b'\t',
        KeyAction::custom(|readline, _byte| {
            readline
                .complete(0, &["help", "hello"], false)
                .is_ok_and(CompletionOutcome::is_accepted)
        }),
    );

    assert_eq2!(readline.read_line("> ").unwrap(), line("help"));

    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.contains("\nhelp  hello \n> hel"), "{output:?}");
}

#[test]
fn test_custom_action_runs_in_raw_mode() {
    let Session {
        mut readline,
        input_observer,
        ..
    } = session(b"\x14\r");

    let seen_depth = Rc::new(Cell::new(-1));
    let seen_depth_clone = seen_depth.clone();
    let observer = input_observer.clone();
    readline.bind_key(
        ctrl(b't'),
        KeyAction::custom(move |readline, _byte| {
            seen_depth_clone.set(observer.raw_mode_depth());
            readline.insert_text("tea")
        }),
    );

    assert_eq2!(readline.read_line("> ").unwrap(), line("tea"));
    assert_eq2!(seen_depth.get(), 1);
    assert_eq2!(input_observer.raw_mode_depth(), 0);
}

#[test]
fn test_unbinding_a_key_makes_it_ring_the_bell() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"ab\x15\r");
    assert!(readline.unbind_key(ctrl(b'u')).is_some());
    assert!(readline.unbind_key(ctrl(b'u')).is_none());

    assert_eq2!(readline.read_line("> ").unwrap(), line("ab"));
    assert!(stdout_mock.get_copy_of_buffer_as_string().contains(BELL));
}

#[test]
fn test_action_replaces_line_and_redraws() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"secret\x12x\r");
    readline.disable_echo('*');
    readline.key_map_mut().bind(
        ctrl(b'r'),
        KeyAction::custom(|readline, _byte| {
            readline.enable_echo();
            readline.replace_line("reset") && readline.reset_line_state().is_ok()
        }),
    );

    assert_eq2!(readline.read_line("> ").unwrap(), line("resetx"));
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.starts_with("> ******"), "{output:?}");
    assert!(output.ends_with("> resetx\n"), "{output:?}");
    assert!(!output.contains("secret"), "{output:?}");
}

#[test]
fn test_masked_echo() {
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session(b"pw\r");
    readline.disable_echo('*');

    assert_eq2!(readline.read_line("> ").unwrap(), line("pw"));
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert_eq2!(output, "> **\n");
}

#[test]
fn test_long_line_wraps() {
    let text = "abcdefghijklmnopqrstuvwxyz";
    let Session {
        mut readline,
        stdout_mock,
        ..
    } = session_with(format!("{text}\r").as_bytes(), ReadlineConfig::default(), 10);

    assert_eq2!(readline.read_line("> ").unwrap(), line(text));
    let output = stdout_mock.get_copy_of_buffer_as_string_strip_ansi();
    assert!(output.ends_with("\n"), "{output:?}");
    assert!(output.contains("xyz"), "{output:?}");
}

#[test]
fn test_piped_input_reads_plain_lines() {
    let input = InputDeviceMock::new_pipe(b"  hello world\r\nsecond\n\n");
    let input_observer = input.clone();
    let (output, stdout_mock) = OutputDevice::new_mock(80);
    let mut readline = Readline::new(Box::new(input), output, ReadlineConfig::default());

    assert!(!readline.is_interactive());
    assert_eq2!(readline.read_line("> ").unwrap(), line("hello world"));
    assert_eq2!(readline.read_line("> ").unwrap(), line("second"));
    assert_eq2!(readline.read_line("> ").unwrap(), line(""));
    assert_eq2!(readline.read_line("> ").unwrap(), ReadlineEvent::Eof);
    assert_eq2!(input_observer.raw_mode_depth(), 0);
    assert!(
        stdout_mock
            .get_copy_of_buffer_as_string_strip_ansi()
            .starts_with("> hello world\n> second\n")
    );
}

#[cfg(feature = "emacs")]
#[test]
fn test_emacs_kill_and_yank() {
    let Session { mut readline, .. } = session(b"hello world\x01\x06\x06\x06\x06\x06\x0b\x05 \x19\r");
    assert_eq2!(readline.read_line("> ").unwrap(), line("hello  world"));
    assert_eq2!(readline.kill_text(), Some(" world"));
}
