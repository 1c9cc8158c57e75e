/// Track domain type
use crate::types::{Locator, TrackId};
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::path::PathBuf;
use std::time::Duration;

/// Playable track record
///
/// Immutable once created by the catalog source. Equality and hashing use
/// `id` only: two tracks with the same title and artist are still distinct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    /// Unique, stable identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Track duration as reported by the catalog source
    pub duration: Duration,

    /// Reference handed to the decoder
    pub locator: Locator,

    /// Direct file path, used as the deletion fallback
    pub file_path: Option<PathBuf>,
}

impl Track {
    /// Create a new track without a fallback file path
    pub fn new(
        id: TrackId,
        title: impl Into<String>,
        artist: impl Into<String>,
        duration: Duration,
        locator: Locator,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            artist: artist.into(),
            duration,
            locator,
            file_path: None,
        }
    }

    /// Attach the direct file path used when locator-based deletion fails
    #[must_use]
    pub fn with_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Duration in whole milliseconds
    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

impl PartialEq for Track {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Track {}

impl Hash for Track {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, title: &str) -> Track {
        Track::new(
            TrackId::new(id),
            title,
            "Artist",
            Duration::from_secs(180),
            Locator::new(format!("/music/{id}.mp3")),
        )
    }

    #[test]
    fn equality_ignores_metadata() {
        let a = track("1", "Same Title");
        let mut b = track("1", "Other Title");
        b.artist = "Someone Else".to_string();
        assert_eq!(a, b);
    }

    #[test]
    fn colliding_titles_stay_distinct() {
        assert_ne!(track("1", "Intro"), track("2", "Intro"));
    }

    #[test]
    fn duration_ms_truncates() {
        let mut t = track("1", "x");
        t.duration = Duration::from_micros(1_500_900);
        assert_eq!(t.duration_ms(), 1_500);
    }
}
