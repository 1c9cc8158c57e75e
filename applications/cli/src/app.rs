//! Wiring between configuration and the playback libraries

use crate::config::GaaneConfig;
use crate::error::Result;
use crate::focus::DesktopFocus;
use gaane_core::{Catalog, CatalogSource, Track};
use gaane_playback::{DecoderBackend, PlayerSession, TransportController};
use gaane_storage::{JsonSnapshotStore, MemorySnapshotStore};
use std::time::Duration;
use tracing::info;

/// File-system catalog for the configured roots
pub fn catalog_source(config: &GaaneConfig) -> gaane_library::DirectoryCatalog {
    gaane_library::DirectoryCatalog::new(config.library.roots.clone())
        .with_scanner(config.scanner())
}

pub fn load_catalog(config: &GaaneConfig) -> Result<Catalog> {
    config.require_library()?;
    let catalog = catalog_source(config).load()?;
    info!(
        tracks = catalog.len(),
        roots = config.library.roots.len(),
        "library loaded"
    );
    Ok(catalog)
}

pub fn build_controller(
    config: &GaaneConfig,
    backend: impl DecoderBackend + 'static,
) -> TransportController {
    TransportController::new(
        config.playback_config(),
        Box::new(backend),
        Box::new(DesktopFocus::new()),
    )
}

/// Controller plus the on-disk snapshot store, ready to attach
pub fn build_session(config: &GaaneConfig, backend: impl DecoderBackend + 'static) -> PlayerSession {
    let store = JsonSnapshotStore::new(config.state.snapshot_path.clone());
    PlayerSession::new(build_controller(config, backend), Box::new(store))
}

/// Session whose snapshot never leaves memory, for one-shot commands
pub fn build_ephemeral_session(
    config: &GaaneConfig,
    backend: impl DecoderBackend + 'static,
) -> PlayerSession {
    PlayerSession::new(
        build_controller(config, backend),
        Box::new(MemorySnapshotStore::new()),
    )
}

/// Play order index of the track `scan` listed at `catalog_index`
///
/// The two differ once shuffle is on.
pub fn play_order_index(
    controller: &TransportController,
    catalog_index: usize,
) -> Option<usize> {
    let track = controller.catalog().get(catalog_index)?;
    controller.play_order().index_of(&track.id)
}

/// `mm:ss`, or `h:mm:ss` past the hour
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs / 60) % 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// One catalog line: position, id, artist, title, length
pub fn format_track(index: usize, track: &Track) -> String {
    format!(
        "{:>4}  {}  {} - {} ({})",
        index,
        track.id,
        track.artist,
        track.title,
        format_duration(track.duration)
    )
}
