/// Collaborator traits for Gaane
///
/// The playback core never touches the file system or a settings backend
/// directly; the platform supplies these.
use crate::error::Result;
use crate::types::{Catalog, PersistedSnapshot, Track};

/// How a deletion was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Removed through the source, keyed by locator
    ViaLocator,

    /// Locator removal failed; the direct file path fallback succeeded
    ViaFilePath,
}

/// Source of the track catalog
///
/// Implementers enumerate playable audio and remove it on request.
pub trait CatalogSource {
    /// Enumerate all playable tracks, sorted the way the catalog should be
    /// presented
    ///
    /// # Errors
    /// Returns an error if the underlying index cannot be read at all. Files
    /// that individually fail are skipped, not reported.
    fn load(&self) -> Result<Catalog>;

    /// Delete a track's audio data
    ///
    /// Tries the locator first and falls back to `Track::file_path` when that
    /// fails. On error nothing was deleted.
    fn delete(&self, track: &Track) -> Result<DeleteOutcome>;
}

/// Persisted key-value snapshot storage
pub trait SnapshotStore {
    /// Read the last written snapshot
    ///
    /// A store that has never been written returns `PersistedSnapshot::default()`.
    fn load(&self) -> Result<PersistedSnapshot>;

    /// Replace the stored snapshot
    fn save(&mut self, snapshot: &PersistedSnapshot) -> Result<()>;
}
