use super::UNKNOWN_AUTHOR;
use std::path::Path;

/// Everything known about a single audiobook.
///
/// Fields are plain strings, empty when unknown, because that is how every
/// source reports them. `series_position` stays a string so positions like
/// `"1.5"` or `"2-3"` survive untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookMetadata {
    pub title: String,
    /// Ordered by billing; the first entry is the primary author.
    pub authors: Vec<String>,
    pub subtitle: String,
    pub summary: String,
    pub narrators: Vec<String>,
    pub publisher: String,
    pub publish_year: String,
    pub genres: Vec<String>,
    pub isbn: String,
    pub asin: String,
    pub series: String,
    pub series_position: String,
    pub duration_minutes: String,
    pub language: String,
    pub cover_url: String,
    /// Page the metadata was fetched from, if any.
    pub url: String,
}

impl BookMetadata {
    pub fn new(title: impl Into<String>, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: title.into(),
            authors: authors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_series(mut self, series: impl Into<String>, position: impl Into<String>) -> Self {
        self.series = series.into();
        self.series_position = position.into();
        self
    }

    /// The first listed author, or [`UNKNOWN_AUTHOR`] when there are none.
    ///
    /// Never fails: destination resolution relies on always having a name.
    pub fn primary_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or(UNKNOWN_AUTHOR)
    }

    /// The first listed narrator, or an empty string.
    pub fn primary_narrator(&self) -> &str {
        self.narrators.first().map(String::as_str).unwrap_or_default()
    }

    /// Whether the book belongs in a series folder.
    ///
    /// Both the series name and the position must be present; a series name
    /// on its own is treated as a standalone book.
    pub fn has_series(&self) -> bool {
        !self.series.trim().is_empty() && !self.series_position.trim().is_empty()
    }

    /// Uses the folder's own name as the title when no source provided one.
    pub fn fill_title_from(&mut self, folder: impl AsRef<Path>) {
        if !self.title.trim().is_empty() {
            return;
        }
        if let Some(name) = folder.as_ref().file_name() {
            self.title = name.to_string_lossy().into_owned();
        }
    }
}
