//! Audiobook metadata as produced by the fetch collaborators.
//!
//! [`BookMetadata`] is the single record every other crate consumes. Only the
//! title, authors and series fields take part in destination resolution; the
//! rest is carried through to the sidecar files untouched.
//!
//! When no source yields anything usable, [`BookMetadata::from_folder_name`]
//! derives a best-effort record from the source folder's own name.

mod consts;
mod fallback;
pub mod models;

pub use crate::models::BookMetadata;
pub use crate::models::{PLACEHOLDER_AUTHOR, UNKNOWN_AUTHOR};
