//! Folder-name normalization.
//!
//! Used for titles whenever no existing folder can be reused. Author and
//! series folders only ever get spaces swapped for underscores (see
//! [`resolve`](crate::resolve)), so unusual characters in names survive there.

use crate::consts::DISALLOWED_CHARS_REGEX;

/// Substituted by callers when a title slugifies to nothing.
pub const UNKNOWN_TITLE: &str = "Unknown_Title";

/// Deletes every character outside `[\w\-.() ]`, then trims. Spaces are kept.
pub fn clean_title(value: &str) -> String {
    DISALLOWED_CHARS_REGEX.replace_all(value, "").trim().to_string()
}

/// Converts text to a filesystem-safe folder name.
///
/// Idempotent, and returns an empty string for empty or all-punctuation
/// input.
///
/// ```
/// use shelve_library::slugify;
///
/// assert_eq!(slugify("J.R.R. Tolkien"), "J.R.R._Tolkien");
/// assert_eq!(slugify("Harry Potter: The Chamber of Secrets!"), "Harry_Potter_The_Chamber_of_Secrets");
/// assert_eq!(slugify("?!"), "");
/// ```
pub fn slugify(text: &str) -> String {
    clean_title(text).replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("The Hobbit", "The_Hobbit")]
    #[case("  padded title  ", "padded_title")]
    #[case("Ender's Game", "Enders_Game")]
    #[case("Dune (Unabridged)", "Dune_(Unabridged)")]
    #[case("Vol. 1 - The Start", "Vol._1_-_The_Start")]
    #[case("L'École des Sorciers", "LÉcole_des_Sorciers")]
    #[case("AC/DC: Live", "ACDC_Live")]
    #[case("tabs\tand\nnewlines", "tabsandnewlines")]
    #[case("already_slugged", "already_slugged")]
    #[case("", "")]
    #[case("*&^%$#@!", "")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[rstest]
    #[case("The Hobbit")]
    #[case("  ((weird)) -- .. spacing  ")]
    #[case("Señor & Señora: A Tale")]
    #[case(" - ")]
    #[case("日本語のタイトル 第1巻")]
    #[case("trailing punctuation ?")]
    fn test_slugify_idempotent(#[case] input: &str) {
        let once = slugify(input);
        assert_eq!(slugify(&once), once);
    }

    #[test]
    fn test_clean_title_keeps_spaces() {
        assert_eq!(clean_title("Harry Potter: Book #2"), "Harry Potter Book 2");
    }
}
