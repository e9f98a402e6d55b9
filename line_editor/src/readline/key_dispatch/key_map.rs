// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{collections::HashMap, io};

use smallvec::{SmallVec, smallvec};
use strum::IntoEnumIterator;

use crate::{EditCommand, InputDevice, KeyAction, SpecialKey};

pub const ESC: u8 = 0x1b;
pub const DEL: u8 = 0x7f;
pub const CR: u8 = b'\r';
pub const LF: u8 = b'\n';

/// `Ctrl+<letter>` byte, eg: `ctrl(b'a') == 0x01`.
#[must_use]
pub const fn ctrl(letter: u8) -> u8 { letter & 0x1f }

/// Bytes pulled from the input while resolving one key.
pub type KeyBytes = SmallVec<[u8; 8]>;

/// A node of the byte trie. The action bound to a byte sequence lives in the node that
/// the last byte leads to.
#[derive(Debug, Default)]
pub struct KeyTrieNode {
    action: Option<KeyAction>,
    children: HashMap<u8, KeyTrieNode>,
}

impl KeyTrieNode {
    #[must_use]
    pub fn action(&self) -> Option<&KeyAction> { self.action.as_ref() }

    #[must_use]
    pub fn child(&self, byte: u8) -> Option<&KeyTrieNode> { self.children.get(&byte) }
}

/// Tear the subtree down with an explicit stack. A long bound sequence makes a deep
/// chain of nodes, and the derived drop would recurse once per byte.
impl Drop for KeyTrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<KeyTrieNode> =
            self.children.drain().map(|(_, child)| child).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain().map(|(_, child)| child));
        }
    }
}

/// Outcome of [`KeyMap::resolve`].
#[derive(Debug)]
pub struct KeyResolution {
    /// Action bound at the deepest matched node, `None` if nothing on the path was
    /// bound.
    pub action: Option<KeyAction>,
    /// Every byte consumed, including lookahead bytes that did not extend the match.
    pub bytes: KeyBytes,
}

/// Byte trie of key bindings.
///
/// [`KeyMap::default`] binds every byte at the root: printable and non-ASCII bytes
/// insert themselves, control bytes get the usual readline bindings or
/// [`EditCommand::InsertKeyCode`], and a lone `ESC` gets [`EditCommand::Alert`].
#[derive(Debug)]
pub struct KeyMap {
    root: KeyTrieNode,
}

impl Default for KeyMap {
    fn default() -> Self {
        let mut this = Self::new_empty();
        this.bind_defaults();
        this
    }
}

impl KeyMap {
    /// A map with nothing bound; every key rings the bell.
    #[must_use]
    pub fn new_empty() -> Self {
        Self {
            root: KeyTrieNode::default(),
        }
    }

    /// Bind a single byte. Overwrites the existing binding.
    pub fn bind(&mut self, byte: u8, action: impl Into<KeyAction>) {
        self.bind_sequence(&[byte], action);
    }

    /// Bind a byte sequence, creating unbound intermediate nodes as needed. Overwrites the
    /// existing binding. Returns `false` for an empty sequence.
    pub fn bind_sequence(&mut self, sequence: &[u8], action: impl Into<KeyAction>) -> bool {
        if sequence.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for byte in sequence {
            node = node.children.entry(*byte).or_default();
        }
        node.action = Some(action.into());
        true
    }

    /// Bind every sequence a terminal may send for `key`.
    pub fn bind_special(&mut self, key: SpecialKey, action: impl Into<KeyAction>) {
        let action = action.into();
        for sequence in key.sequences() {
            self.bind_sequence(sequence, action.clone());
        }
    }

    /// Remove the action bound to `sequence`, keeping longer bindings that pass through
    /// it. Returns the removed action.
    pub fn unbind_sequence(&mut self, sequence: &[u8]) -> Option<KeyAction> {
        let mut node = &mut self.root;
        for byte in sequence {
            node = node.children.get_mut(byte)?;
        }
        node.action.take()
    }

    pub fn unbind(&mut self, byte: u8) -> Option<KeyAction> { self.unbind_sequence(&[byte]) }

    /// The action bound to exactly `sequence`.
    #[must_use]
    pub fn lookup(&self, sequence: &[u8]) -> Option<&KeyAction> {
        let mut node = &self.root;
        for byte in sequence {
            node = node.child(*byte)?;
        }
        node.action()
    }

    /// Resolve the key that starts with `first_byte`.
    ///
    /// While the current node has children, one more byte is requested from `input`
    /// without blocking. The walk stops when no byte is available or the byte has no
    /// child; the most specific action seen so far wins. So a lone `ESC` resolves to
    /// whatever `ESC` is bound to, even though `ESC [` starts longer bindings.
    ///
    /// # Errors
    ///
    /// Returns the IO error from the non-blocking read.
    pub fn resolve(
        &self,
        first_byte: u8,
        input: &mut dyn InputDevice,
    ) -> io::Result<KeyResolution> {
        let mut bytes: KeyBytes = smallvec![first_byte];
        let mut best: Option<&KeyAction> = None;
        let mut node = &self.root;
        let mut byte = first_byte;

        loop {
            let Some(child) = node.child(byte) else {
                break;
            };
            if let Some(action) = child.action() {
                best = Some(action);
            }
            if child.children.is_empty() {
                break;
            }
            let Some(next_byte) = input.try_read_byte()? else {
                break;
            };
            bytes.push(next_byte);
            node = child;
            byte = next_byte;
        }

        Ok(KeyResolution {
            action: best.cloned(),
            bytes,
        })
    }

    fn bind_defaults(&mut self) {
        for byte in 0..=u8::MAX {
            let command = match byte {
                ESC => EditCommand::Alert,
                0x00..0x20 => EditCommand::InsertKeyCode,
                _ => EditCommand::SelfInsert,
            };
            self.bind(byte, command);
        }

        self.bind(CR, EditCommand::AcceptLine);
        self.bind(LF, EditCommand::AcceptLine);
        self.bind(ctrl(b'c'), EditCommand::Interrupt);
        self.bind(ctrl(b'd'), EditCommand::DeleteCharOrEof);
        self.bind(DEL, EditCommand::BackwardDeleteChar);
        self.bind(ctrl(b'h'), EditCommand::BackwardDeleteChar);
        self.bind(ctrl(b'l'), EditCommand::ClearScreen);
        self.bind(ctrl(b'u'), EditCommand::UnixLineDiscard);
        self.bind(ctrl(b'w'), EditCommand::UnixWordRubout);

        #[cfg(feature = "emacs")]
        {
            self.bind(ctrl(b'a'), EditCommand::BeginningOfLine);
            self.bind(ctrl(b'e'), EditCommand::EndOfLine);
            self.bind(ctrl(b'b'), EditCommand::BackwardChar);
            self.bind(ctrl(b'f'), EditCommand::ForwardChar);
            self.bind(ctrl(b'k'), EditCommand::KillLine);
            self.bind(ctrl(b'y'), EditCommand::Yank);
            self.bind(ctrl(b'p'), EditCommand::PreviousHistory);
            self.bind(ctrl(b'n'), EditCommand::NextHistory);
        }

        for key in SpecialKey::iter() {
            let command = match key {
                SpecialKey::Up => EditCommand::PreviousHistory,
                SpecialKey::Down => EditCommand::NextHistory,
                SpecialKey::Left => EditCommand::BackwardChar,
                SpecialKey::Right => EditCommand::ForwardChar,
                SpecialKey::Home => EditCommand::BeginningOfLine,
                SpecialKey::End => EditCommand::EndOfLine,
                SpecialKey::Delete => EditCommand::DeleteChar,
                SpecialKey::Insert => continue,
            };
            self.bind_special(key, command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InputDeviceMock, assert_eq2};

    fn resolve(key_map: &KeyMap, bytes: &[u8]) -> (KeyResolution, InputDeviceMock) {
        let mut input = InputDeviceMock::new_terminal(&bytes[1..]);
        let resolution = key_map.resolve(bytes[0], &mut input).unwrap();
        (resolution, input)
    }

    fn command(resolution: &KeyResolution) -> Option<EditCommand> {
        match resolution.action {
            Some(KeyAction::Command(it)) => Some(it),
            _ => None,
        }
    }

    #[test]
    fn test_every_root_byte_is_bound_by_default() {
        let key_map = KeyMap::default();
        for byte in 0..=u8::MAX {
            assert!(key_map.lookup(&[byte]).is_some(), "byte {byte:#04x}");
        }
        assert_eq2!(
            key_map.lookup(b"a"),
            Some(&KeyAction::Command(EditCommand::SelfInsert))
        );
        assert_eq2!(
            key_map.lookup(&[0xC3]),
            Some(&KeyAction::Command(EditCommand::SelfInsert))
        );
        assert_eq2!(
            key_map.lookup(&[CR]),
            Some(&KeyAction::Command(EditCommand::AcceptLine))
        );
        assert_eq2!(
            key_map.lookup(&[ctrl(b'g')]),
            Some(&KeyAction::Command(EditCommand::InsertKeyCode))
        );
        assert_eq2!(
            key_map.lookup(&[ESC]),
            Some(&KeyAction::Command(EditCommand::Alert))
        );
        assert_eq2!(
            key_map.lookup(&[DEL]),
            Some(&KeyAction::Command(EditCommand::BackwardDeleteChar))
        );
    }

    #[test]
    fn test_resolves_special_keys() {
        let key_map = KeyMap::default();
        let (resolution, input) = resolve(&key_map, b"\x1b[Cx");
        assert_eq2!(command(&resolution), Some(EditCommand::ForwardChar));
        assert_eq2!(resolution.bytes.as_slice(), b"\x1b[C");
        // The byte after the sequence is left for the next key.
        assert_eq2!(input.bytes.len(), 1);

        let (resolution, _) = resolve(&key_map, b"\x1b[3~");
        assert_eq2!(command(&resolution), Some(EditCommand::DeleteChar));
        let (resolution, _) = resolve(&key_map, b"\x1bOA");
        assert_eq2!(command(&resolution), Some(EditCommand::PreviousHistory));
    }

    #[test]
    fn test_lone_escape_falls_back_to_escape_binding() {
        let mut key_map = KeyMap::new_empty();
        key_map.bind_sequence(b"\x1b[", EditCommand::EndOfLine);
        key_map.bind(ESC, EditCommand::BeginningOfLine);

        // Nothing follows the ESC, so the lookahead comes back empty and must not block.
        let (resolution, _) = resolve(&key_map, b"\x1b");
        assert_eq2!(command(&resolution), Some(EditCommand::BeginningOfLine));
        assert_eq2!(resolution.bytes.as_slice(), b"\x1b");
    }

    #[test]
    fn test_lone_escape_without_binding_resolves_to_nothing() {
        let mut key_map = KeyMap::new_empty();
        key_map.bind_sequence(b"\x1b[", EditCommand::EndOfLine);

        let (resolution, _) = resolve(&key_map, b"\x1b");
        assert!(resolution.action.is_none());

        let (resolution, _) = resolve(&key_map, b"\x1b[");
        assert_eq2!(command(&resolution), Some(EditCommand::EndOfLine));
    }

    #[test]
    fn test_incomplete_longer_sequence_falls_back_to_best_prefix() {
        let mut key_map = KeyMap::new_empty();
        key_map.bind(ESC, EditCommand::Alert);
        key_map.bind_sequence(b"\x1b[1~", EditCommand::BeginningOfLine);

        // `ESC [ 1 ;` is not bound; the `ESC` binding wins and the bytes are consumed.
        let (resolution, input) = resolve(&key_map, b"\x1b[1;5C");
        assert_eq2!(command(&resolution), Some(EditCommand::Alert));
        assert_eq2!(resolution.bytes.as_slice(), b"\x1b[1;");
        assert_eq2!(input.bytes.iter().copied().collect::<Vec<_>>(), b"5C".to_vec());
    }

    #[test]
    fn test_bind_overwrites_and_unbind_keeps_longer_bindings() {
        let mut key_map = KeyMap::default();
        key_map.bind(b'x', EditCommand::Alert);
        assert_eq2!(
            key_map.lookup(b"x"),
            Some(&KeyAction::Command(EditCommand::Alert))
        );

        assert!(key_map.unbind(ESC).is_some());
        assert!(key_map.lookup(&[ESC]).is_none());
        assert_eq2!(
            key_map.lookup(b"\x1b[A"),
            Some(&KeyAction::Command(EditCommand::PreviousHistory))
        );
        assert!(!key_map.bind_sequence(&[], EditCommand::Alert));
    }

    #[test]
    fn test_custom_action_is_stored() {
        let mut key_map = KeyMap::new_empty();
        let action = KeyAction::custom(|_readline, _byte| true);
        key_map.bind(b'\t', action.clone());
        assert_eq2!(key_map.lookup(b"\t"), Some(&action));
    }

    #[test]
    fn test_dropping_a_very_deep_trie_does_not_overflow_the_stack() {
        let mut key_map = KeyMap::new_empty();
        let sequence = vec![b'a'; 200_000];
        key_map.bind_sequence(&sequence, EditCommand::Alert);
        drop(key_map);
    }
}
