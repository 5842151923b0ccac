//! Existing output tree inspection.
//!
//! The directory structure under the destination root is the source of
//! truth for which author and series folders exist; nothing here is cached
//! between calls. Folder names are indexed by a normalized key (underscores
//! to spaces, lowercased) so that `Jane_Doe`, `jane doe` and `JANE_DOE` all
//! count as the same logical folder, while the on-disk spelling is kept as
//! the value to reuse.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::instrument;

/// Folder names starting with this are internal markers, never authors.
const RESERVED_PREFIX: char = '_';
/// Word marking a folder as grouping a whole series.
const SERIES_WORD: &str = "series";

/// Normalized name → actual folder name.
///
/// When two folders normalize to the same key, the first one in listing
/// order (sorted by name) wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderIndex {
    entries: BTreeMap<String, String>,
}

impl FolderIndex {
    /// Looks up the on-disk folder for `name`, normalizing it first.
    pub fn find(&self, name: &str) -> Option<&str> {
        self.entries.get(&normalize(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(normalized key, folder name)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn insert_first(&mut self, key: String, folder: &str) {
        if key.is_empty() {
            return;
        }
        match self.entries.entry(key) {
            Entry::Vacant(entry) => {
                entry.insert(folder.to_string());
            },
            Entry::Occupied(entry) => {
                tracing::debug!(key = %entry.key(), kept = %entry.get(), ignored = folder, "Ambiguous folder match");
            },
        }
    }
}

/// Underscores to spaces, runs of whitespace collapsed, then lowercase.
pub fn normalize(name: &str) -> String {
    name.replace('_', " ").split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Indexes the author folders directly under `root`.
///
/// A missing root is simply empty. Folders starting with an underscore are
/// skipped.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_authors(root: &Path) -> Result<FolderIndex> {
    let mut index = FolderIndex::default();
    for name in subdirectories(root)? {
        if name.starts_with(RESERVED_PREFIX) {
            continue;
        }
        index.insert_first(normalize(&name), &name);
    }
    Ok(index)
}

/// Indexes the series and solo-book folders of one author.
///
/// The author folder is found by its underscore-joined name first, then by a
/// normalized match across every folder under `root`. Series folders are
/// keyed without the word "series", so `Harry_Potter_Series` answers to
/// `"Harry Potter"`. Anything else is keyed by its normalized name, which
/// lets a later book reuse a standalone folder of the same name.
#[instrument(skip_all, fields(root = %root.display(), author = %author))]
pub fn scan_series(root: &Path, author: &str) -> Result<FolderIndex> {
    match find_author_folder(root, author)? {
        Some(author_folder) => scan_series_in(&root.join(author_folder)),
        None => Ok(FolderIndex::default()),
    }
}

/// Indexes the series and solo-book folders directly inside `author_dir`,
/// keyed as in [`scan_series`]. A missing folder is simply empty.
#[instrument(skip_all, fields(author_dir = %author_dir.display()))]
pub fn scan_series_in(author_dir: &Path) -> Result<FolderIndex> {
    let mut index = FolderIndex::default();
    for name in subdirectories(author_dir)? {
        index.insert_first(series_key(&name), &name);
    }
    Ok(index)
}

fn find_author_folder(root: &Path, author: &str) -> Result<Option<String>> {
    let exact = author.replace(' ', "_");
    if !exact.is_empty() && root.join(&exact).is_dir() {
        return Ok(Some(exact));
    }
    let wanted = normalize(author);
    Ok(subdirectories(root)?.into_iter().find(|name| normalize(name) == wanted))
}

/// Drops the last standalone "series" word from the normalized name.
fn series_key(folder: &str) -> String {
    let normalized = normalize(folder);
    let mut words: Vec<&str> = normalized.split(' ').collect();
    match words.iter().rposition(|word| *word == SERIES_WORD) {
        Some(at) => {
            words.remove(at);
            words.join(" ")
        },
        None => normalized,
    }
}

/// Sorted names of the immediate subdirectories of `path`; empty if `path`
/// does not exist. Names that are not valid UTF-8 are skipped since they
/// could never be reproduced as a folder name.
fn subdirectories(path: &Path) -> Result<Vec<String>> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == IoErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e).or_raise(|| ErrorKind::ReadDir(path.to_path_buf())),
    };
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.or_raise(|| ErrorKind::ReadDir(path.to_path_buf()))?;
        // Follows symlinks, so a linked author folder still counts.
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(name) => tracing::debug!(name = ?name, "Skipping non UTF-8 folder name"),
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::fs::{create_dir_all, write};
    use tempfile::TempDir;

    fn tree(dirs: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        for dir in dirs {
            create_dir_all(root.path().join(dir)).unwrap();
        }
        root
    }

    #[test]
    fn test_missing_root_is_empty() {
        let root = TempDir::new().unwrap();
        let missing = root.path().join("nowhere");
        assert!(scan_authors(&missing).unwrap().is_empty());
        assert!(scan_series(&missing, "Jane Doe").unwrap().is_empty());
    }

    #[test]
    fn test_scan_authors() {
        let root = tree(&["Jane_Doe", "J.K._Rowling", "_unsorted", "_unknown_"]);
        write(root.path().join("notes.txt"), b"not a folder").unwrap();

        let authors = scan_authors(root.path()).unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors.find("Jane Doe"), Some("Jane_Doe"));
        assert_eq!(authors.find("JANE DOE"), Some("Jane_Doe"));
        assert_eq!(authors.find("jane_doe"), Some("Jane_Doe"));
        assert_eq!(authors.find("j.k. rowling"), Some("J.K._Rowling"));
        assert_eq!(authors.find("unsorted"), None);
    }

    #[rstest]
    #[case("Dark__Tower", "dark tower")]
    #[case(" Dark _Tower ", "dark tower")]
    #[case("DARK TOWER", "dark tower")]
    fn test_normalize(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(normalize(name), expected);
    }

    #[test]
    fn test_spacing_is_ignored_on_both_sides() {
        let root = tree(&["Stephen_King/Dark__Tower", "Stephen_King/The__Stand_Series"]);
        let series = scan_series(root.path(), "Stephen King").unwrap();
        assert_eq!(series.find("Dark Tower"), Some("Dark__Tower"));
        assert_eq!(series.find("The  Stand"), Some("The__Stand_Series"));
        assert_eq!(series.iter().collect::<Vec<_>>(), vec![("dark tower", "Dark__Tower"), ("the stand", "The__Stand_Series")]);
    }

    #[test]
    fn test_scan_series_in_author_folder() {
        let root = tree(&["Jane Doe/mystery series", "Jane_Doe/Other"]);
        let series = scan_series_in(&root.path().join("Jane Doe")).unwrap();
        assert_eq!(series.find("Mystery"), Some("mystery series"));
        assert_eq!(series.find("Other"), None);
        assert!(scan_series_in(&root.path().join("Nobody")).unwrap().is_empty());
    }

    #[test]
    fn test_first_listed_folder_wins() {
        let root = tree(&["Jane Doe", "Jane_Doe"]);
        let authors = scan_authors(root.path()).unwrap();
        assert_eq!(authors.len(), 1);
        // ' ' sorts before '_'
        assert_eq!(authors.find("Jane Doe"), Some("Jane Doe"));
    }

    #[rstest]
    #[case("Harry_Potter_Series", "harry potter")]
    #[case("Harry Potter series", "harry potter")]
    #[case("The_Expanse_Series_Series", "the expanse series")]
    #[case("The_Hobbit", "the hobbit")]
    #[case("Seriesly_Good", "seriesly good")]
    fn test_series_key(#[case] folder: &str, #[case] expected: &str) {
        assert_eq!(series_key(folder), expected);
    }

    #[test]
    fn test_scan_series_exact_author() {
        let root = tree(&["Jane_Doe/Mystery_Series/Book_1", "Jane_Doe/Standalone_Tale", "Jane_Doe/Series"]);
        let series = scan_series(root.path(), "Jane Doe").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.find("Mystery"), Some("Mystery_Series"));
        assert_eq!(series.find("Standalone Tale"), Some("Standalone_Tale"));
        // Nested book folders are not series.
        assert_eq!(series.find("Book 1"), None);
    }

    #[test]
    fn test_scan_series_normalized_author() {
        let root = tree(&["jane_DOE/Mystery_Series"]);
        let series = scan_series(root.path(), "Jane Doe").unwrap();
        assert_eq!(series.find("mystery"), Some("Mystery_Series"));
    }

    #[test]
    fn test_scan_series_unknown_author() {
        let root = tree(&["Jane_Doe/Mystery_Series"]);
        assert!(scan_series(root.path(), "John Smith").unwrap().is_empty());
    }

    #[test]
    fn test_substring_is_not_a_match() {
        let root = tree(&["Jane_Doe/X_Other_Series"]);
        let series = scan_series(root.path(), "Jane Doe").unwrap();
        assert_eq!(series.find("X"), None);
        assert_eq!(series.find("X Other"), Some("X_Other_Series"));
    }
}
