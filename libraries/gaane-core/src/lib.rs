//! Gaane Core
//!
//! Platform-agnostic types, collaborator traits, and error handling shared by
//! every Gaane crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Catalog`, `RepeatMode`, `PersistedSnapshot`
//! - **Collaborator Traits**: `CatalogSource`, `SnapshotStore`
//! - **Error Handling**: Unified `GaaneError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use gaane_core::{Catalog, Locator, Track, TrackId};
//! use std::time::Duration;
//!
//! let track = Track::new(
//!     TrackId::new("a1"),
//!     "Aaj Jaane Ki Zid Na Karo",
//!     "Farida Khanum",
//!     Duration::from_secs(412),
//!     Locator::new("/music/zid.mp3"),
//! );
//!
//! let catalog = Catalog::new(vec![track]);
//! assert_eq!(catalog.position(&TrackId::new("a1")), Some(0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{GaaneError, Result};
pub use traits::{CatalogSource, DeleteOutcome, SnapshotStore};
pub use types::{Catalog, Locator, PersistedSnapshot, RepeatMode, Track, TrackId};
