//! Finding audiobook folders below an input root.
//!
//! An audiobook folder is any directory that directly holds at least one
//! audio file. Multi-disc rips (`Book/CD1/*.mp3`, `Book/CD2/*.mp3` next to
//! `Book/*.mp3`) are reported once, as the outermost folder with audio.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use shelve_config::DEFAULT_OUTPUT_FOLDER;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::instrument;
use walkdir::{DirEntry, WalkDir};

/// Lowercase extensions recognized as audio.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "m4b", "wma", "flac", "ogg"];

/// Whether `path` has an audio extension, ignoring case.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| AUDIO_EXTENSIONS.iter().any(|audio| audio.eq_ignore_ascii_case(ext)))
}

/// Lists the audiobook folders below `root`, sorted.
///
/// `root` itself is never reported, and anything inside a folder named like
/// the default output folder is ignored so a previous run's output is not
/// picked up again. A folder is skipped when its parent (other than `root`)
/// also holds audio. Subdirectories that cannot be read are logged and
/// skipped.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn discover(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        exn::bail!(ErrorKind::NotADirectory(root.to_path_buf()));
    }

    let mut with_audio = BTreeSet::new();
    let walker = WalkDir::new(root).follow_links(true).sort_by_file_name().into_iter();
    for entry in walker.filter_entry(|entry| !is_output_folder(entry)) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => return Err(e).or_raise(|| ErrorKind::ReadDir(root.to_path_buf())),
            Err(e) => {
                tracing::warn!(path = ?e.path(), error = %e, "Skipping unreadable entry");
                continue;
            },
        };
        if !entry.file_type().is_file() || !is_audio_file(entry.path()) {
            continue;
        }
        if let Some(parent) = entry.path().parent()
            && parent != root
        {
            with_audio.insert(parent.to_path_buf());
        }
    }

    let folders: Vec<PathBuf> = with_audio
        .iter()
        .filter(|folder| match folder.parent() {
            Some(parent) if parent != root => !with_audio.contains(parent),
            _ => true,
        })
        .cloned()
        .collect();
    for folder in &folders {
        tracing::debug!(folder = %folder.display(), "Found audiobook folder");
    }
    tracing::info!(count = folders.len(), "Scanned for audiobook folders");
    Ok(folders)
}

fn is_output_folder(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == DEFAULT_OUTPUT_FOLDER
}
