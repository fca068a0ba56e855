//! Date-specificity heuristic
//!
//! Decides whether the free-text travel dates look like an explicit range
//! ("June 15-22, 2025") or a vague period ("September"). Explicit ranges let
//! the model infer the trip length; vague periods require one from the user.

use tracing::debug;

/// Characters that usually separate the parts of a written date range
const DATE_SEPARATORS: [char; 3] = ['-', '/', ','];

/// Minimum number of digits before text can count as a specific range
const MIN_DIGITS: usize = 2;

/// Returns true when `text` looks like an explicit date range
///
/// Requires at least two digits, plus either a separator (`-`, `/`, `,`) or
/// more than three whitespace-separated words. The digit gate dominates:
/// a long phrase without digits is never specific.
pub fn is_specific_date_range(text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        debug!("is_specific_date_range: empty text");
        return false;
    }

    let digit_count = text.chars().filter(|c| c.is_ascii_digit()).count();
    let has_enough_digits = digit_count >= MIN_DIGITS;
    let has_separator = text.contains(DATE_SEPARATORS);
    let word_count = text.split_whitespace().count();

    let specific = has_enough_digits && (has_separator || word_count > 3);
    debug!(%digit_count, %has_separator, %word_count, %specific, "is_specific_date_range: evaluated");
    specific
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_is_not_specific() {
        assert!(!is_specific_date_range(""));
        assert!(!is_specific_date_range("   "));
    }

    #[test]
    fn test_month_name_is_vague() {
        assert!(!is_specific_date_range("September"));
    }

    #[test]
    fn test_explicit_range_is_specific() {
        assert!(is_specific_date_range("June 15-22, 2025"));
        assert!(is_specific_date_range("06/15/2025"));
        assert!(is_specific_date_range("  12,14  "));
    }

    #[test]
    fn test_long_phrase_without_digits_is_vague() {
        // Five words, no separator, no digits: digit gate wins
        assert!(!is_specific_date_range("sometime in the middle of next year"));
    }

    #[test]
    fn test_long_phrase_with_digits_is_specific() {
        assert!(is_specific_date_range("from the 10th to the 20th of May"));
    }

    #[test]
    fn test_short_phrase_with_digits_no_separator_is_vague() {
        assert!(!is_specific_date_range("summer 2025"));
        assert!(!is_specific_date_range("May 2025 trip"));
    }

    #[test]
    fn test_single_digit_with_separator_is_vague() {
        assert!(!is_specific_date_range("May 5 - late June"));
    }

    proptest! {
        #[test]
        fn prop_text_without_digits_is_never_specific(text in "[a-zA-Z ,/-]{0,40}") {
            prop_assert!(!is_specific_date_range(&text));
        }

        #[test]
        fn prop_surrounding_whitespace_is_ignored(text in "[a-zA-Z0-9 ,/-]{0,30}") {
            let padded = format!("  {}\t", text);
            prop_assert_eq!(is_specific_date_range(&text), is_specific_date_range(&padded));
        }
    }
}
