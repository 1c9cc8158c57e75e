//! Directory-backed catalog source

use crate::scanner::FileScanner;
use crate::tags::{read_tags, TrackTags};
use gaane_core::{
    Catalog, CatalogSource, DeleteOutcome, GaaneError, Locator, Result, Track, TrackId,
};
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LOCATOR_SCHEME: &str = "file://";

/// Artist shown for files without an artist tag
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// Catalog built from audio files under a set of root directories
#[derive(Debug, Clone)]
pub struct DirectoryCatalog {
    roots: Vec<PathBuf>,
    scanner: FileScanner,
}

impl DirectoryCatalog {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            scanner: FileScanner::new(),
        }
    }

    /// Use a custom scanner (extensions, link following)
    #[must_use]
    pub fn with_scanner(mut self, scanner: FileScanner) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn track_for(path: &Path) -> Track {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let tags = read_tags(&path).unwrap_or_else(|e| {
            tracing::debug!("No tags for {}: {}", path.display(), e);
            TrackTags::default()
        });

        let title = tags.title.unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });
        let artist = tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

        Track::new(
            track_id_for(&path),
            title,
            artist,
            tags.duration,
            locator_for(&path),
        )
        .with_file_path(path)
    }
}

impl CatalogSource for DirectoryCatalog {
    fn load(&self) -> Result<Catalog> {
        let files = self.scanner.scan_directories(&self.roots);
        let mut tracks: Vec<Track> = files.iter().map(|p| Self::track_for(p)).collect();

        // Same file reachable through two roots
        tracks.sort_by(|a, b| a.id.cmp(&b.id));
        tracks.dedup_by(|a, b| a.id == b.id);
        tracks.sort_by(compare_titles);

        tracing::info!(
            "Loaded {} tracks from {} roots",
            tracks.len(),
            self.roots.len()
        );
        Ok(Catalog::new(tracks))
    }

    fn delete(&self, track: &Track) -> Result<DeleteOutcome> {
        let locator_path = path_from_locator(&track.locator);

        let locator_err = match fs::remove_file(&locator_path) {
            Ok(()) => return Ok(DeleteOutcome::ViaLocator),
            Err(e) => e,
        };

        if let Some(file_path) = track.file_path.as_ref().filter(|p| **p != locator_path) {
            tracing::debug!(
                "Locator delete failed ({}), trying {}",
                locator_err,
                file_path.display()
            );
            return match fs::remove_file(file_path) {
                Ok(()) => Ok(DeleteOutcome::ViaFilePath),
                Err(e) => Err(delete_error(&track.id, e)),
            };
        }

        Err(delete_error(&track.id, locator_err))
    }
}

/// Stable id: first 16 hex chars of SHA-256 over the absolute path
pub fn track_id_for(path: &Path) -> TrackId {
    let mut hasher = Sha256::new();
    hasher.update(path.to_string_lossy().as_bytes());
    let hash = hasher.finalize();
    TrackId::new(hex::encode(&hash[..8]))
}

pub fn locator_for(path: &Path) -> Locator {
    Locator::new(format!("{LOCATOR_SCHEME}{}", path.display()))
}

/// File path behind a locator; locators without the scheme are plain paths
pub fn path_from_locator(locator: &Locator) -> PathBuf {
    let raw = locator.as_str();
    PathBuf::from(raw.strip_prefix(LOCATOR_SCHEME).unwrap_or(raw))
}

/// Case-insensitive title order, id as tie-break
fn compare_titles(a: &Track, b: &Track) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

fn delete_error(id: &TrackId, err: io::Error) -> GaaneError {
    match err.kind() {
        io::ErrorKind::PermissionDenied => {
            GaaneError::permission_denied(format!("cannot delete {id}: {err}"))
        }
        io::ErrorKind::NotFound => GaaneError::TrackNotFound(id.clone()),
        _ => GaaneError::Io(err),
    }
}
