// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{fmt::{Debug, Formatter},
          rc::Rc};

use strum_macros::{Display, EnumIter};

use crate::Readline;

/// Signature of a caller supplied key handler. It receives the session and the first
/// byte of the key that triggered it, and returns `false` to ring the bell.
///
/// Whatever context the handler needs is captured by the closure. Session state is
/// reached only through [`Readline`]'s methods.
pub type KeyActionFn = dyn Fn(&mut Readline, u8) -> bool;

/// Built in editing commands. Names follow GNU readline where there is an equivalent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum EditCommand {
    /// Insert the typed character. UTF-8 lead bytes pull in their continuation bytes.
    SelfInsert,
    AcceptLine,
    /// Clear the line and return [`crate::ReadlineEvent::Interrupted`].
    Interrupt,
    /// Delete the character under the cursor, or end input if the line is empty.
    DeleteCharOrEof,
    DeleteChar,
    BackwardDeleteChar,
    ForwardChar,
    BackwardChar,
    BeginningOfLine,
    EndOfLine,
    /// Kill from the cursor to the end of the line.
    KillLine,
    /// Kill from the start of the line to the cursor.
    UnixLineDiscard,
    /// Kill the word before the cursor.
    UnixWordRubout,
    /// Insert the last killed text.
    Yank,
    PreviousHistory,
    NextHistory,
    ClearScreen,
    /// Insert the key as the visible text `~N`, `N` being its byte value in decimal.
    InsertKeyCode,
    /// Ring the bell and do nothing else.
    Alert,
}

/// What a key is bound to.
#[derive(Clone)]
pub enum KeyAction {
    Command(EditCommand),
    Custom(Rc<KeyActionFn>),
}

impl KeyAction {
    pub fn custom(handler: impl Fn(&mut Readline, u8) -> bool + 'static) -> Self {
        KeyAction::Custom(Rc::new(handler))
    }
}

impl From<EditCommand> for KeyAction {
    fn from(command: EditCommand) -> Self { KeyAction::Command(command) }
}

impl Debug for KeyAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyAction::Command(command) => write!(f, "Command({command})"),
            KeyAction::Custom(_) => write!(f, "Custom"),
        }
    }
}

impl PartialEq for KeyAction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KeyAction::Command(lhs), KeyAction::Command(rhs)) => lhs == rhs,
            (KeyAction::Custom(lhs), KeyAction::Custom(rhs)) => Rc::ptr_eq(lhs, rhs),
            _ => false,
        }
    }
}
