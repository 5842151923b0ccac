//! Configuration loading and persistence.
//!
//! Settings are layered with [figment]: built-in defaults, then the JSON
//! settings document, then `SHELVE_`-prefixed environment variables (nested
//! keys separated by `__`, e.g. `SHELVE_LAST_USED_SETTINGS__COPY=true`).
//!
//! The document doubles as the persistence channel for the [`AliasStore`].
//! Every mutating method rewrites the whole file straight away; there is no
//! partial or append write, so a crash can at worst lose the one change that
//! was being written.

mod aliases;
pub mod error;
mod settings;

pub use crate::aliases::AliasStore;
pub use crate::settings::{ConflictResolution, DEFAULT_OUTPUT_FOLDER, MetadataSource, ProcessingFlags, Settings};

use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// File name of the settings document inside the platform config directory.
pub const SETTINGS_FILE: &str = "config.json";
const ENV_PREFIX: &str = "SHELVE_";
const APPLICATION: &str = "shelve";

/// Loaded settings together with the path they persist to.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    settings: Settings,
}

impl Config {
    /// The platform-specific settings location, e.g.
    /// `~/.config/shelve/config.json` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", APPLICATION)
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .ok_or_raise(|| ErrorKind::NoConfigDir)
    }

    /// Loads settings from `path`, or from [`default_path`](Self::default_path)
    /// when none is given.
    ///
    /// A missing file is not an error; defaults are used and the file is
    /// created by the first save. A file that exists but cannot be parsed
    /// returns [`ErrorKind::Load`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };
        Self::load_from(path)
    }

    /// Like [`load`](Self::load), but never fails.
    ///
    /// Problems are logged as warnings and the defaults are used instead, so
    /// the run carries on with in-memory settings.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path().unwrap_or_else(|e| {
                tracing::warn!(error = ?e, "No config directory; using settings file in working directory");
                PathBuf::from(SETTINGS_FILE)
            }),
        };
        match Self::load_from(path.clone()) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = ?e, "Could not load settings; using defaults");
                Self::with_settings(path, Settings::default())
            },
        }
    }

    /// Wraps already-built settings without touching the filesystem.
    pub fn with_settings(path: impl Into<PathBuf>, settings: Settings) -> Self {
        Self { path: path.into(), settings }
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn load_from(path: PathBuf) -> Result<Self> {
        let settings = Figment::from(Serialized::defaults(Settings::default()))
            .merge(Json::file(&path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract::<Settings>()
            .or_raise(|| ErrorKind::Load(path.clone()))?;
        tracing::debug!(exists = path.exists(), "Loaded settings");
        Ok(Self { path, settings })
    }

    /// Rewrites the whole settings document.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).or_raise(|| ErrorKind::Save(self.path.clone()))?;
        }
        let json = serde_json::to_string_pretty(&self.settings).or_raise(|| ErrorKind::Save(self.path.clone()))?;
        fs::write(&self.path, json).or_raise(|| ErrorKind::Save(self.path.clone()))?;
        tracing::debug!("Saved settings");
        Ok(())
    }

    /// Deletes the settings document and restores defaults in memory.
    ///
    /// Returns `true` if a file was actually removed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn reset(&mut self) -> Result<bool> {
        self.settings = Settings::default();
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.path).or_raise(|| ErrorKind::Reset(self.path.clone()))?;
        tracing::info!("Removed settings file");
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn aliases(&self) -> &AliasStore {
        &self.settings.aliases
    }

    /// Direct access to the alias tables. Changes made through this are only
    /// persisted by the next [`save`](Self::save).
    pub fn aliases_mut(&mut self) -> &mut AliasStore {
        &mut self.settings.aliases
    }

    pub fn should_skip_existing_folders(&self) -> bool {
        self.settings.skip_existing_folders
    }

    pub fn conflict_resolution(&self) -> ConflictResolution {
        self.settings.conflict_resolution
    }

    pub fn set_default_input_folder(&mut self, folder: impl Into<PathBuf>) -> Result<()> {
        self.settings.default_input_folder = Some(folder.into());
        self.save()
    }

    pub fn set_default_output_folder(&mut self, folder: impl Into<PathBuf>) -> Result<()> {
        self.settings.default_output_folder = folder.into();
        self.save()
    }

    pub fn save_last_settings(&mut self, flags: ProcessingFlags) -> Result<()> {
        self.settings.last_used_settings = flags;
        self.save()
    }

    /// Records an author alias and persists it if the table changed.
    pub fn add_author_mapping(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Result<()> {
        if self.settings.aliases.insert_author_alias(raw, canonical) {
            self.save()?;
        }
        Ok(())
    }

    /// Records a series alias and persists it if the table changed.
    pub fn add_series_mapping(&mut self, raw: impl Into<String>, canonical: impl Into<String>) -> Result<()> {
        if self.settings.aliases.insert_series_alias(raw, canonical) {
            self.save()?;
        }
        Ok(())
    }
}
