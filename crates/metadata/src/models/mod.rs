mod book;

pub use self::book::BookMetadata;

/// Returned by [`BookMetadata::primary_author`] when no author is known.
pub const UNKNOWN_AUTHOR: &str = "_unknown_";
/// Author recorded by folder-name fallbacks that could not identify anyone.
pub const PLACEHOLDER_AUTHOR: &str = "Unknown Author";
