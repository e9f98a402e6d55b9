// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use crate::str_display_width;

/// Lay `candidates` out in columns that fit `term_width`, row-major. Every cell is
/// padded to the widest candidate plus one space, and every row ends with `\n`.
#[must_use]
pub fn format_match_table<S: AsRef<str>>(candidates: &[S], term_width: usize) -> String {
    let max_width = candidates
        .iter()
        .map(|it| str_display_width(it.as_ref()))
        .max()
        .unwrap_or(0);
    let column_width = max_width + 1;
    let columns = (term_width / column_width).max(1);

    let mut acc = String::new();
    for row in candidates.chunks(columns) {
        for candidate in row {
            let candidate = candidate.as_ref();
            acc.push_str(candidate);
            let padding = column_width - str_display_width(candidate);
            acc.extend(std::iter::repeat_n(' ', padding));
        }
        acc.push('\n');
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_eq2;

    #[test]
    fn test_columns_fill_row_major() {
        let candidates = ["exit", "help", "hello", "vi", "view"];
        // Column width 6, 13 columns wide: 2 per row.
        assert_eq2!(
            format_match_table(&candidates, 13),
            "exit  help  \nhello vi    \nview  \n"
        );
    }

    #[test]
    fn test_at_least_one_column() {
        assert_eq2!(
            format_match_table(&["alpha", "beta"], 3),
            "alpha \nbeta  \n"
        );
    }

    #[test]
    fn test_all_on_one_row_when_wide_enough() {
        assert_eq2!(format_match_table(&["a", "bb"], 80), "a  bb \n");
    }

    #[test]
    fn test_empty() {
        let candidates: [&str; 0] = [];
        assert_eq2!(format_match_table(&candidates, 80), "");
    }
}
