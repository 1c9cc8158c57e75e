//! Gaane Library
//!
//! File-system [`CatalogSource`](gaane_core::CatalogSource): walks music
//! directories, reads tags, derives stable track ids, and deletes files on
//! request.
//!
//! # Example
//!
//! ```rust,no_run
//! use gaane_core::CatalogSource;
//! use gaane_library::DirectoryCatalog;
//! use std::path::PathBuf;
//!
//! let source = DirectoryCatalog::new(vec![PathBuf::from("/home/me/Music")]);
//! let catalog = source.load()?;
//! for track in &catalog {
//!     println!("{} - {}", track.artist, track.title);
//! }
//! # Ok::<(), gaane_core::GaaneError>(())
//! ```

#![forbid(unsafe_code)]

mod directory;
mod scanner;
mod tags;

pub use directory::{locator_for, path_from_locator, track_id_for, DirectoryCatalog, UNKNOWN_ARTIST};
pub use scanner::{FileScanner, DEFAULT_EXTENSIONS};
pub use tags::{read_tags, TrackTags};
