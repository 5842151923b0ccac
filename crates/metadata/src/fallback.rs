//! Best-effort metadata from a folder name.
//!
//! Used only when every fetch source came back empty. Folder names in the
//! wild look like `"Stephen King - It"`, `"T1 - Le Sorcier"` or
//! `"Dune T2 [mp3 64kbps]"`; the rules below pull an author, a title and,
//! when a volume marker is present, a series out of them.

use crate::consts::{BITRATE_TAG_REGEX, INLINE_VOLUME_REGEX, VOLUME_MARKER_REGEX, VOLUME_SEGMENT_REGEX};
use crate::models::{BookMetadata, PLACEHOLDER_AUTHOR};
use tracing::instrument;

const SEGMENT_SEPARATOR: &str = " - ";
/// A leading segment with more words than this is unlikely to be a name.
const MAX_AUTHOR_WORDS: usize = 4;
/// Titles need more words than this before the first two are taken as the series.
const MIN_SERIES_TITLE_WORDS: usize = 2;

impl BookMetadata {
    /// Builds metadata by parsing a folder name.
    ///
    /// ```
    /// use shelve_metadata::BookMetadata;
    ///
    /// let metadata = BookMetadata::from_folder_name("Stephen King - It");
    /// assert_eq!(metadata.primary_author(), "Stephen King");
    /// assert_eq!(metadata.title, "It");
    /// ```
    #[instrument]
    pub fn from_folder_name(name: &str) -> Self {
        let name = name.trim();
        let (author, title) = split_author(name);
        let mut metadata = Self::new(strip_bitrate(&title), [author]);

        if let Some(captures) = VOLUME_MARKER_REGEX.captures(name) {
            let title = INLINE_VOLUME_REGEX.replace_all(&metadata.title, "");
            let title = title.trim_matches(|c: char| c == '-' || c.is_whitespace()).to_string();
            let words: Vec<&str> = title.split_whitespace().collect();
            if words.len() > MIN_SERIES_TITLE_WORDS {
                metadata.series = words[..2].join(" ");
                metadata.series_position = captures[1].to_string();
            }
            metadata.title = title;
        }
        if metadata.title.is_empty() {
            metadata.title = name.to_string();
        }
        tracing::debug!(title = %metadata.title, author = metadata.primary_author(), "Inferred metadata from folder name");
        metadata
    }
}

/// Splits `"Author - Title"` style names, returning the author (or the
/// placeholder) and the title.
fn split_author(name: &str) -> (String, String) {
    let parts: Vec<&str> = name.split(SEGMENT_SEPARATOR).map(str::trim).collect();
    let [first, rest @ ..] = parts.as_slice() else {
        return (PLACEHOLDER_AUTHOR.to_string(), name.to_string());
    };
    if rest.is_empty() {
        return (PLACEHOLDER_AUTHOR.to_string(), name.to_string());
    }
    if VOLUME_SEGMENT_REGEX.is_match(first) {
        return (PLACEHOLDER_AUTHOR.to_string(), rest.join(SEGMENT_SEPARATOR));
    }
    if looks_like_author(first) {
        return (first.to_string(), rest.join(SEGMENT_SEPARATOR));
    }
    (PLACEHOLDER_AUTHOR.to_string(), name.to_string())
}

fn looks_like_author(segment: &str) -> bool {
    segment.chars().any(char::is_uppercase) && segment.split_whitespace().count() <= MAX_AUTHOR_WORDS
}

fn strip_bitrate(title: &str) -> String {
    BITRATE_TAG_REGEX.replace_all(title, "").trim().to_string()
}
