//! Metadata files written next to the audio in a prepared destination.
//!
//! Each writer returns the path it wrote, or `None` when it had nothing to
//! do (a dry run, or no content). Existing files are overwritten.

mod template;

pub use self::template::{DEFAULT_OPF_TEMPLATE, OpfTemplate};

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use shelve_metadata::BookMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

pub const INFO_FILE: &str = "info.txt";
pub const JSON_FILE: &str = "metadata.json";
pub const OPF_FILE: &str = "metadata.opf";

/// Writes the summary to `info.txt`. Skipped when there is no summary.
#[instrument(skip_all, fields(destination = %destination.display()))]
pub fn write_info(destination: &Path, metadata: &BookMetadata, dry_run: bool) -> Result<Option<PathBuf>> {
    if dry_run || metadata.summary.trim().is_empty() {
        return Ok(None);
    }
    write(destination.join(INFO_FILE), &metadata.summary).map(Some)
}

/// Writes every metadata field to `metadata.json`.
#[instrument(skip_all, fields(destination = %destination.display()))]
pub fn write_json(destination: &Path, metadata: &BookMetadata, dry_run: bool) -> Result<Option<PathBuf>> {
    if dry_run {
        return Ok(None);
    }
    let json = serde_json::to_string_pretty(metadata).or_raise(|| ErrorKind::Serialize)?;
    write(destination.join(JSON_FILE), &json).map(Some)
}

/// Renders `template` into `metadata.opf`.
#[instrument(skip_all, fields(destination = %destination.display()))]
pub fn write_opf(
    destination: &Path,
    metadata: &BookMetadata,
    template: &OpfTemplate,
    dry_run: bool,
) -> Result<Option<PathBuf>> {
    if dry_run {
        return Ok(None);
    }
    let opf = template.render(metadata)?;
    write(destination.join(OPF_FILE), &opf).map(Some)
}

fn write(path: PathBuf, contents: &str) -> Result<PathBuf> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "Replacing existing file");
    }
    fs::write(&path, contents).or_raise(|| ErrorKind::WriteSidecar(path.clone()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Deref;
    use tempfile::TempDir;

    fn book() -> BookMetadata {
        let mut metadata = BookMetadata::new("It", ["Stephen King"]);
        metadata.summary = "Derry, Maine.".into();
        metadata
    }

    #[test]
    fn test_write_info() {
        let dir = TempDir::new().unwrap();
        let path = write_info(dir.path(), &book(), false).unwrap().unwrap();
        assert_eq!(path, dir.path().join(INFO_FILE));
        assert_eq!(fs::read_to_string(path).unwrap(), "Derry, Maine.");
    }

    #[test]
    fn test_write_info_without_summary() {
        let dir = TempDir::new().unwrap();
        let metadata = BookMetadata::new("It", ["Stephen King"]);
        assert_eq!(write_info(dir.path(), &metadata, false).unwrap(), None);
        assert!(!dir.path().join(INFO_FILE).exists());
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let path = write_json(dir.path(), &book().with_series("", ""), false).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(json["title"], "It");
        assert_eq!(json["authors"][0], "Stephen King");
        assert_eq!(json["summary"], "Derry, Maine.");
        assert_eq!(json["series_position"], "");
    }

    #[test]
    fn test_write_opf_overwrites() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(OPF_FILE), "stale").unwrap();
        let template: OpfTemplate = "<title>{{ title|xml }}</title>".parse().unwrap();
        let path = write_opf(dir.path(), &book(), &template, false).unwrap().unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "<title>It</title>");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let template = OpfTemplate::builtin().unwrap();
        assert_eq!(write_info(dir.path(), &book(), true).unwrap(), None);
        assert_eq!(write_json(dir.path(), &book(), true).unwrap(), None);
        assert_eq!(write_opf(dir.path(), &book(), &template, true).unwrap(), None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_destination() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        let err = write_json(&missing, &book(), false).unwrap_err();
        assert!(matches!(err.deref(), ErrorKind::WriteSidecar(p) if *p == missing.join(JSON_FILE)));
    }
}
