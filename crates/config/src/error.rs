//! Config Error Types
//!
//! Structured errors using `exn` for automatic location tracking and error
//! tree construction, the same as every other crate in the workspace.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A config error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// No settings path was given and the platform has no config directory.
    #[display("could not determine a configuration directory")]
    NoConfigDir,
    /// The settings document exists but could not be read or understood.
    #[display("failed to load settings from {}", _0.display())]
    Load(#[error(not(source))] PathBuf),
    /// The settings document could not be written back.
    #[display("failed to save settings to {}", _0.display())]
    Save(#[error(not(source))] PathBuf),
    /// The settings document could not be removed.
    #[display("failed to remove settings at {}", _0.display())]
    Reset(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Save(_) | Self::Reset(_))
    }
}
