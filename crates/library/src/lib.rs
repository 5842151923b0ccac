//! Deciding where audiobooks go inside a library, and preparing them there.
//!
//! A library is laid out as `root/Author/Series_Series` for books in a series
//! and `root/Author/Title` for standalone books. Given a book's
//! [`BookMetadata`](shelve_metadata::BookMetadata), [`resolve`] picks those two
//! folder names, reusing whatever already exists on disk. [`AliasSession`]
//! remembers corrected author and series spellings across books, and
//! [`prepare_output`] ties the two together and creates the folder.
//!
//! Around that core sit [`discover`] for finding audiobook folders to import
//! and the [`sidecar`] writers for `info.txt`, `metadata.json` and
//! `metadata.opf`.

mod consts;
mod discover;
pub mod error;
mod learn;
mod prepare;
mod resolve;
mod session;
pub mod sidecar;
mod slug;
pub mod tree;

pub use crate::discover::{AUDIO_EXTENSIONS, discover, is_audio_file};
pub use crate::learn::{Learned, clean_author_name, clean_series_name, learn};
pub use crate::prepare::{ProcessingPlan, is_populated, prepare_output};
pub use crate::resolve::{ResolvedDestination, SERIES_SUFFIX, resolve};
pub use crate::session::AliasSession;
pub use crate::sidecar::OpfTemplate;
pub use crate::slug::{UNKNOWN_TITLE, clean_title, slugify};
