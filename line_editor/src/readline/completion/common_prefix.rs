// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::CompletionCase;

/// Whether `lhs` and `rhs` are the same character under `case`.
#[must_use]
pub fn chars_match(lhs: char, rhs: char, case: CompletionCase) -> bool {
    match case {
        CompletionCase::Sensitive => lhs == rhs,
        CompletionCase::Insensitive => lhs == rhs || lhs.to_lowercase().eq(rhs.to_lowercase()),
    }
}

/// Whether `lhs` and `rhs` are the same text under `case`.
#[must_use]
pub fn words_match(lhs: &str, rhs: &str, case: CompletionCase) -> bool {
    lhs.chars().count() == rhs.chars().count()
        && lhs.chars().zip(rhs.chars()).all(|(l, r)| chars_match(l, r, case))
}

/// Longest common prefix of `candidates`, as a slice of the first one (so with
/// [`CompletionCase::Insensitive`] the result is spelled the way the first candidate
/// spells it). Empty if there are no candidates.
///
/// Seeded with the first candidate, then shrunk against each of the others.
#[must_use]
pub fn common_prefix<S: AsRef<str>>(candidates: &[S], case: CompletionCase) -> &str {
    let Some((first, rest)) = candidates.split_first() else {
        return "";
    };
    let first = first.as_ref();

    let mut shared_len = first.len();
    for candidate in rest {
        let matching_len: usize = first[..shared_len]
            .chars()
            .zip(candidate.as_ref().chars())
            .take_while(|(lhs, rhs)| chars_match(*lhs, *rhs, case))
            .map(|(lhs, _)| lhs.len_utf8())
            .sum();
        shared_len = matching_len;
        if shared_len == 0 {
            break;
        }
    }

    &first[..shared_len]
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::assert_eq2;

    #[test_case(&["help", "hello"], "hel")]
    #[test_case(&["vi", "view"], "vi")]
    #[test_case(&["exit"], "exit")]
    #[test_case(&["abc", "xyz"], "")]
    #[test_case(&["Help", "HELLO"], "Hel"; "spelled like the first candidate")]
    #[test_case(&["héllo", "hÉlp"], "hél")]
    fn test_common_prefix_insensitive(candidates: &[&str], expected: &str) {
        assert_eq2!(common_prefix(candidates, CompletionCase::Insensitive), expected);
    }

    #[test]
    fn test_common_prefix_sensitive() {
        assert_eq2!(
            common_prefix(&["Help", "hello"], CompletionCase::Sensitive),
            ""
        );
        assert_eq2!(
            common_prefix(&["help", "hello"], CompletionCase::Sensitive),
            "hel"
        );
    }

    #[test]
    fn test_common_prefix_of_nothing() {
        let candidates: [&str; 0] = [];
        assert_eq2!(common_prefix(&candidates, CompletionCase::Insensitive), "");
    }

    #[test]
    fn test_words_match() {
        assert!(words_match("VI", "vi", CompletionCase::Insensitive));
        assert!(!words_match("VI", "vi", CompletionCase::Sensitive));
        assert!(!words_match("vi", "view", CompletionCase::Insensitive));
    }
}
