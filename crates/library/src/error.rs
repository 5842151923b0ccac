//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Destination resolution itself never fails; these cover the operations
//! around it that touch the filesystem.

use derive_more::{Display, Error};
use std::path::PathBuf;

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A directory listing failed for a reason other than the directory
    /// not existing.
    #[display("could not list directory: {}", _0.display())]
    ReadDir(#[error(not(source))] PathBuf),
    /// The path given as a root is missing or is a file.
    #[display("not a directory: {}", _0.display())]
    NotADirectory(#[error(not(source))] PathBuf),
    /// The resolved destination could not be created.
    #[display("could not create destination: {}", _0.display())]
    CreateDestination(#[error(not(source))] PathBuf),
    #[display("issue with sidecar template")]
    Template,
    #[display("could not read template: {}", _0.display())]
    ReadTemplate(#[error(not(source))] PathBuf),
    #[display("could not serialize metadata")]
    Serialize,
    /// A sidecar file could not be written into the destination.
    #[display("could not write sidecar: {}", _0.display())]
    WriteSidecar(#[error(not(source))] PathBuf),
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ReadDir(_) | Self::CreateDestination(_) | Self::WriteSidecar(_))
    }
}
