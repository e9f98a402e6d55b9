// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::{CompletionCase, LineBuffer, LineBufferError, common_prefix, words_match};

/// How a completion attempt went. `completed` is true when the typed word was replaced
/// with a longer (or differently spelled) common prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// No candidates. Nothing changed.
    NoMatch,
    /// Exactly one candidate.
    Match { completed: bool },
    /// Several candidates, and the common prefix is itself one of them, eg: `vi` with
    /// `view` also available. Only reported when prefixes are accepted as matches.
    MatchWithExtensions { completed: bool },
    /// Several candidates, more typing needed.
    Ambiguous { completed: bool },
}

impl CompletionOutcome {
    /// The word can be taken as is.
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(
            self,
            CompletionOutcome::Match { .. } | CompletionOutcome::MatchWithExtensions { .. }
        )
    }

    #[must_use]
    pub fn is_ambiguous(self) -> bool { matches!(self, CompletionOutcome::Ambiguous { .. }) }

    /// The line was changed.
    #[must_use]
    pub fn is_completed(self) -> bool {
        match self {
            CompletionOutcome::NoMatch => false,
            CompletionOutcome::Match { completed }
            | CompletionOutcome::MatchWithExtensions { completed }
            | CompletionOutcome::Ambiguous { completed } => completed,
        }
    }
}

/// Complete the word between `word_start` and the cursor.
///
/// If the common prefix of `candidates` is longer than the typed word, or the typed
/// word does not start with it, the typed word is replaced by the prefix. The
/// replacement is atomic.
///
/// An invalid `word_start` (past the cursor, or inside a character) is
/// [`CompletionOutcome::NoMatch`].
///
/// # Errors
///
/// Returns [`LineBufferError::LineTooLong`] if the completed line would be too long. The
/// line is unchanged in that case.
pub fn complete_word<S: AsRef<str>>(
    line_buffer: &mut LineBuffer,
    word_start: usize,
    candidates: &[S],
    allow_prefix: bool,
    case: CompletionCase,
) -> Result<CompletionOutcome, LineBufferError> {
    let point = line_buffer.point();
    if candidates.is_empty()
        || word_start > point
        || !line_buffer.text().is_char_boundary(word_start)
    {
        return Ok(CompletionOutcome::NoMatch);
    }

    let prefix = common_prefix(candidates, case);
    let typed = &line_buffer.text()[word_start..point];
    let needs_insert = typed.len() < prefix.len() || !typed.starts_with(prefix);

    let completed = if needs_insert {
        line_buffer.replace_range(word_start, point, prefix)?
    } else {
        false
    };

    let prefix_is_candidate = candidates
        .iter()
        .any(|it| words_match(it.as_ref(), prefix, case));

    Ok(classify(candidates.len(), prefix_is_candidate, allow_prefix, completed))
}

/// Map the shape of a completion attempt to its outcome.
#[must_use]
pub fn classify(
    candidate_count: usize,
    prefix_is_candidate: bool,
    allow_prefix: bool,
    completed: bool,
) -> CompletionOutcome {
    match candidate_count {
        0 => CompletionOutcome::NoMatch,
        1 => CompletionOutcome::Match { completed },
        _ if prefix_is_candidate && allow_prefix => {
            CompletionOutcome::MatchWithExtensions { completed }
        }
        _ => CompletionOutcome::Ambiguous { completed },
    }
}
