//! Destination resolution.
//!
//! Decides the two folder levels (`author/series-or-title`) a book lands in
//! under the destination root. The order of preference is always:
//!
//! 1. A learned alias replaces the raw scraped name.
//! 2. A folder already on disk that matches the (aliased) name, ignoring case
//!    and underscore/space differences, is reused verbatim.
//! 3. Otherwise a new name is synthesized.
//!
//! Resolution never fails. Unreadable directories are logged and treated as
//! empty, and missing metadata degrades to sentinel names.

use crate::error::Result;
use crate::slug::{UNKNOWN_TITLE, slugify};
use crate::tree::{FolderIndex, scan_authors, scan_series_in};
use shelve_config::AliasStore;
use shelve_metadata::{BookMetadata, UNKNOWN_AUTHOR};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Appended to synthesized series folder names.
pub const SERIES_SUFFIX: &str = "_Series";

/// Where a book belongs, relative to the destination root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedDestination {
    pub author_folder: String,
    /// Either a series folder or a solo-book folder.
    pub title_folder: String,
}
impl ResolvedDestination {
    /// `root/author_folder/title_folder`
    pub fn under(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref().join(&self.author_folder).join(&self.title_folder)
    }
}
impl From<(String, String)> for ResolvedDestination {
    fn from((author_folder, title_folder): (String, String)) -> Self {
        Self { author_folder, title_folder }
    }
}
impl Display for ResolvedDestination {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.author_folder, self.title_folder)
    }
}

/// Resolves the destination folders for `metadata`.
///
/// `source` is the folder the book is being imported from; its name stands
/// in for the title when the metadata has none.
///
/// ```
/// use shelve_config::AliasStore;
/// use shelve_library::resolve;
/// use shelve_metadata::BookMetadata;
/// use std::path::Path;
///
/// let metadata = BookMetadata::new("The Hobbit", ["J.R.R. Tolkien"]);
/// let root = Path::new("/nonexistent/library");
/// let destination = resolve(&metadata, Path::new("/incoming/hobbit"), root, &AliasStore::default());
/// assert_eq!(destination.author_folder, "J.R.R._Tolkien");
/// assert_eq!(destination.title_folder, "The_Hobbit");
/// ```
#[instrument(skip_all, fields(root = %destination_root.display(), title = %metadata.title))]
pub fn resolve(
    metadata: &BookMetadata,
    source: &Path,
    destination_root: &Path,
    aliases: &AliasStore,
) -> ResolvedDestination {
    let author_name = author_name(metadata, aliases);
    let author_folder = match or_empty(scan_authors(destination_root)).find(author_name) {
        Some(existing) => {
            tracing::debug!(folder = existing, "Reusing author folder");
            existing.to_string()
        },
        None => author_name.replace(' ', "_"),
    };

    let title_folder = if metadata.has_series() {
        let series_name = series_name(metadata, aliases);
        match or_empty(scan_series_in(&destination_root.join(&author_folder))).find(series_name) {
            Some(existing) => {
                tracing::debug!(folder = existing, "Reusing series folder");
                existing.to_string()
            },
            None => format!("{}{SERIES_SUFFIX}", series_name.replace(' ', "_")),
        }
    } else {
        title_slug(metadata, source)
    };

    let destination = ResolvedDestination { author_folder, title_folder };
    tracing::info!(%destination, "Resolved destination");
    destination
}

/// The aliased primary author, falling back to [`UNKNOWN_AUTHOR`] for blank names.
fn author_name<'a>(metadata: &'a BookMetadata, aliases: &'a AliasStore) -> &'a str {
    let raw = metadata.primary_author();
    let name = aliases.get_author_alias(raw).unwrap_or(raw).trim();
    if name.is_empty() { UNKNOWN_AUTHOR } else { name }
}

fn series_name<'a>(metadata: &'a BookMetadata, aliases: &'a AliasStore) -> &'a str {
    aliases.get_series_alias(&metadata.series).unwrap_or(&metadata.series).trim()
}

/// Slugified title, or slugified source folder name, or [`UNKNOWN_TITLE`].
fn title_slug(metadata: &BookMetadata, source: &Path) -> String {
    let slug = match metadata.title.trim() {
        "" => source.file_name().map(|name| slugify(&name.to_string_lossy())).unwrap_or_default(),
        title => slugify(title),
    };
    if slug.is_empty() { UNKNOWN_TITLE.to_string() } else { slug }
}

fn or_empty(scan: Result<FolderIndex>) -> FolderIndex {
    scan.unwrap_or_else(|e| {
        tracing::warn!(error = ?e, "Could not inspect existing folders; treating as empty");
        FolderIndex::default()
    })
}
