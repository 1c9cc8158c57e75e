//! Directory catalog: scanning, tag fallbacks, ordering, deletion

use gaane_core::{CatalogSource, DeleteOutcome, GaaneError, Locator, Track};
use gaane_library::{path_from_locator, track_id_for, DirectoryCatalog, FileScanner, UNKNOWN_ARTIST};
use std::fs;
use std::path::Path;
use std::time::Duration;
use tempfile::TempDir;

/// Minimal 8 kHz mono 16-bit PCM WAV of `secs` seconds of silence
fn write_wav(path: &Path, secs: u32) {
    let sample_rate: u32 = 8000;
    let byte_rate = sample_rate * 2;
    let data_len = byte_rate * secs;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes()); // block align
    bytes.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.resize(bytes.len() + data_len as usize, 0);

    fs::write(path, bytes).unwrap();
}

fn titles(source: &DirectoryCatalog) -> Vec<String> {
    source
        .load()
        .unwrap()
        .iter()
        .map(|t| t.title.clone())
        .collect()
}

#[test]
fn untagged_files_fall_back_to_file_name() {
    let dir = TempDir::new().unwrap();
    write_wav(&dir.path().join("Raag Yaman.wav"), 2);

    let catalog = DirectoryCatalog::new(vec![dir.path().to_path_buf()])
        .load()
        .unwrap();
    assert_eq!(catalog.len(), 1);

    let track = catalog.get(0).unwrap();
    assert_eq!(track.title, "Raag Yaman");
    assert_eq!(track.artist, UNKNOWN_ARTIST);
    assert!(track.duration >= Duration::from_millis(1900));
    assert!(track.duration <= Duration::from_millis(2100));

    let path = track.file_path.clone().unwrap();
    assert!(path.is_absolute());
    assert_eq!(track.id, track_id_for(&path));
    assert_eq!(path_from_locator(&track.locator), path);
}

#[test]
fn unreadable_audio_is_still_listed() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("broken.mp3"), b"not really audio").unwrap();

    let catalog = DirectoryCatalog::new(vec![dir.path().to_path_buf()])
        .load()
        .unwrap();
    let track = catalog.get(0).unwrap();
    assert_eq!(track.title, "broken");
    assert_eq!(track.duration, Duration::ZERO);
}

#[test]
fn catalog_is_sorted_by_title_and_skips_other_files() {
    let dir = TempDir::new().unwrap();
    for name in ["mera.wav", "Aaj.wav", "zindagi.wav", "bahar.wav"] {
        write_wav(&dir.path().join(name), 1);
    }
    fs::write(dir.path().join("lyrics.txt"), b"...").unwrap();

    let source = DirectoryCatalog::new(vec![dir.path().to_path_buf()]);
    assert_eq!(titles(&source), vec!["Aaj", "bahar", "mera", "zindagi"]);
}

#[test]
fn overlapping_roots_do_not_duplicate() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("ghazals");
    fs::create_dir(&nested).unwrap();
    write_wav(&nested.join("chupke.wav"), 1);

    let source = DirectoryCatalog::new(vec![dir.path().to_path_buf(), nested]);
    assert_eq!(source.load().unwrap().len(), 1);
}

#[test]
fn missing_roots_yield_an_empty_catalog() {
    let dir = TempDir::new().unwrap();
    let source = DirectoryCatalog::new(vec![dir.path().join("nowhere")]);
    assert!(source.load().unwrap().is_empty());
}

#[test]
fn scanner_extensions_are_respected() {
    let dir = TempDir::new().unwrap();
    write_wav(&dir.path().join("keep.wav"), 1);
    fs::write(dir.path().join("skip.mp3"), b"x").unwrap();

    let source = DirectoryCatalog::new(vec![dir.path().to_path_buf()])
        .with_scanner(FileScanner::new().extensions(["wav"]));
    assert_eq!(titles(&source), vec!["keep"]);
}

#[test]
fn delete_through_locator() {
    let dir = TempDir::new().unwrap();
    write_wav(&dir.path().join("gone.wav"), 1);

    let source = DirectoryCatalog::new(vec![dir.path().to_path_buf()]);
    let catalog = source.load().unwrap();
    let track = catalog.get(0).unwrap();

    assert_eq!(source.delete(track).unwrap(), DeleteOutcome::ViaLocator);
    assert!(source.load().unwrap().is_empty());
}

#[test]
fn delete_falls_back_to_file_path() {
    let dir = TempDir::new().unwrap();
    let real = dir.path().join("real.wav");
    write_wav(&real, 1);

    let track = Track::new(
        track_id_for(&real),
        "real",
        UNKNOWN_ARTIST,
        Duration::from_secs(1),
        Locator::new("file:///no/such/place.wav"),
    )
    .with_file_path(&real);

    let source = DirectoryCatalog::new(vec![dir.path().to_path_buf()]);
    assert_eq!(source.delete(&track).unwrap(), DeleteOutcome::ViaFilePath);
    assert!(!real.exists());
}

#[test]
fn deleting_a_missing_file_reports_not_found() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("never.wav");
    let track = Track::new(
        track_id_for(&path),
        "never",
        UNKNOWN_ARTIST,
        Duration::ZERO,
        gaane_library::locator_for(&path),
    );

    let source = DirectoryCatalog::new(vec![]);
    let err = source.delete(&track).unwrap_err();
    assert!(matches!(err, GaaneError::TrackNotFound(_)));
}
