//! Write-through alias persistence for one processing run.

use crate::learn::{Learned, learn};
use crate::resolve::{ResolvedDestination, resolve};
use shelve_config::{AliasStore, Config};
use shelve_metadata::BookMetadata;
use std::path::Path;

/// Owns the run's [`Config`] and saves it whenever an alias is learned.
///
/// A failed save never stops processing. It is logged, and from then on the
/// session keeps learning in memory only; later books still resolve against
/// everything learned so far, it just won't survive a restart.
#[derive(Debug)]
pub struct AliasSession {
    config: Config,
    session_only: bool,
}

impl AliasSession {
    pub fn new(config: Config) -> Self {
        Self { config, session_only: false }
    }

    pub fn aliases(&self) -> &AliasStore {
        self.config.aliases()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes made here are saved along with the next learned alias.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Whether a save has failed during this session.
    pub fn is_session_only(&self) -> bool {
        self.session_only
    }

    /// [`resolve`] against the session's current aliases.
    pub fn resolve(&self, metadata: &BookMetadata, source: &Path, destination_root: &Path) -> ResolvedDestination {
        resolve(metadata, source, destination_root, self.config.aliases())
    }

    /// Learns from `metadata` and rewrites the settings document if anything
    /// new was recorded.
    pub fn learn(&mut self, metadata: &BookMetadata) -> Vec<Learned> {
        let learned = learn(self.config.aliases_mut(), metadata);
        if learned.is_empty() {
            return learned;
        }
        // Still saved when session-only; one good save carries everything learned since.
        match self.config.save() {
            Ok(()) => {
                if self.session_only {
                    tracing::info!(path = %self.config.path().display(), "Settings saved again after earlier failure");
                    self.session_only = false;
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %self.config.path().display(),
                    error = ?e,
                    "Could not save learned aliases; they will only last for this session"
                );
                self.session_only = true;
            },
        }
        learned
    }
}

impl From<Config> for AliasSession {
    fn from(config: Config) -> Self {
        Self::new(config)
    }
}
