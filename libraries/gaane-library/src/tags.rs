/// Tag reading using lofty
use gaane_core::{GaaneError, Result};
use lofty::{AudioFile, TaggedFileExt};
use std::path::Path;
use std::time::Duration;

/// The subset of tags a catalog entry needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub duration: Duration,
}

/// Read title, artist, and duration from an audio file
pub fn read_tags(path: &Path) -> Result<TrackTags> {
    let tagged_file =
        lofty::read_from_path(path).map_err(|e| GaaneError::metadata(e.to_string()))?;

    let mut tags = TrackTags {
        duration: tagged_file.properties().duration(),
        ..TrackTags::default()
    };

    // Primary tag first, else whatever tag the file has
    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.tags().first());

    if let Some(tag) = tag {
        for item in tag.items() {
            let text = item
                .value()
                .text()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToString::to_string);

            match item.key() {
                lofty::ItemKey::TrackTitle if tags.title.is_none() => tags.title = text,
                lofty::ItemKey::TrackArtist if tags.artist.is_none() => tags.artist = text,
                _ => {}
            }
        }
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn unknown_format_is_a_metadata_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.bin");
        fs::write(&path, b"definitely not audio").unwrap();

        let err = read_tags(&path).unwrap_err();
        assert!(matches!(err, GaaneError::Metadata(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(read_tags(&dir.path().join("nope.flac")).is_err());
    }
}
