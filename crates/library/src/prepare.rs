//! Turning a resolved book into a real destination folder.

use crate::error::{ErrorKind, Result};
use crate::session::AliasSession;
use exn::ResultExt;
use shelve_config::ProcessingFlags;
use shelve_metadata::BookMetadata;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// What to do with one source folder.
///
/// Only `source_folder`, `destination_root` and `dry_run` affect where the
/// book goes. The remaining flags are carried for the collaborators that
/// move files and write sidecars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingPlan {
    pub source_folder: PathBuf,
    pub destination_root: PathBuf,
    /// Copy instead of move.
    pub copy: bool,
    /// Pull audio out of nested disc folders.
    pub flatten: bool,
    pub rename_tracks: bool,
    pub create_opf: bool,
    pub create_info: bool,
    pub download_cover: bool,
    pub emit_json: bool,
    /// Resolve and report without touching the destination.
    pub dry_run: bool,
}

impl ProcessingPlan {
    /// A plan with every action disabled.
    pub fn new(source_folder: impl Into<PathBuf>, destination_root: impl Into<PathBuf>) -> Self {
        Self {
            source_folder: source_folder.into(),
            destination_root: destination_root.into(),
            copy: false,
            flatten: false,
            rename_tracks: false,
            create_opf: false,
            create_info: false,
            download_cover: false,
            emit_json: false,
            dry_run: false,
        }
    }

    /// A plan with the actions remembered in the settings document.
    pub fn from_flags(
        source_folder: impl Into<PathBuf>,
        destination_root: impl Into<PathBuf>,
        flags: &ProcessingFlags,
    ) -> Self {
        Self {
            copy: flags.copy,
            flatten: flags.flatten,
            rename_tracks: flags.rename,
            create_opf: flags.opf,
            create_info: flags.infotxt,
            download_cover: flags.cover,
            ..Self::new(source_folder, destination_root)
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_json(mut self, emit_json: bool) -> Self {
        self.emit_json = emit_json;
        self
    }
}

/// Resolves where `metadata` belongs, learns from it and creates the folder.
///
/// Resolution always uses the aliases known *before* this book; anything the
/// book itself teaches applies from the next book on. The returned path is
/// `destination_root/author_folder/title_folder` and exists on return unless
/// the plan is a dry run.
#[instrument(skip_all, fields(source = %plan.source_folder.display(), dry_run = plan.dry_run))]
pub fn prepare_output(metadata: &BookMetadata, plan: &ProcessingPlan, session: &mut AliasSession) -> Result<PathBuf> {
    let destination = session.resolve(metadata, &plan.source_folder, &plan.destination_root);
    session.learn(metadata);
    let path = destination.under(&plan.destination_root);
    if plan.dry_run {
        tracing::info!(path = %path.display(), "Dry run; not creating destination");
        return Ok(path);
    }
    fs::create_dir_all(&path).or_raise(|| ErrorKind::CreateDestination(path.clone()))?;
    tracing::debug!(path = %path.display(), "Destination ready");
    Ok(path)
}

/// Whether `destination` exists and already has something in it.
pub fn is_populated(destination: &Path) -> bool {
    fs::read_dir(destination).is_ok_and(|mut entries| entries.next().is_some())
}
