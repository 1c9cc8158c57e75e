//! Player session: controller lifetime around a coming-and-going UI
//!
//! The controller can outlive its presentation layer. On detach the session
//! writes a [`PersistedSnapshot`]; on the next attach it either keeps the
//! live controller state or rebuilds playback from that snapshot.

use crate::command::TransportCommand;
use crate::controller::TransportController;
use crate::error::{PlaybackError, Result};
use crate::events::{Notice, PlaybackEvent};
use gaane_core::{Catalog, CatalogSource, DeleteOutcome, PersistedSnapshot, SnapshotStore, TrackId};
use std::ops::ControlFlow;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What `attach` did with the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachOutcome {
    /// A track was already loaded; live state kept
    KeptLive,

    /// Playback rebuilt from the snapshot
    Restored(TrackId),

    /// Nothing to restore
    Fresh,
}

pub struct PlayerSession {
    controller: TransportController,
    store: Box<dyn SnapshotStore>,
}

impl PlayerSession {
    pub fn new(controller: TransportController, store: Box<dyn SnapshotStore>) -> Self {
        Self { controller, store }
    }

    pub fn controller(&self) -> &TransportController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TransportController {
        &mut self.controller
    }

    /// A presentation layer appeared
    ///
    /// Installs `catalog`, applies persisted shuffle/repeat, then restores the
    /// snapshot's track unless the controller already has one loaded. A
    /// snapshot naming a track that no longer exists is ignored.
    pub fn attach(&mut self, catalog: Catalog) -> Result<AttachOutcome> {
        let snapshot = self.store.load()?;
        debug!(?snapshot, "loaded snapshot");

        self.controller.set_catalog(catalog);
        self.controller.set_shuffle(snapshot.shuffle_enabled);
        self.controller.set_repeat_mode(snapshot.repeat_mode);
        self.controller.attach_ui();

        if self.controller.current_track().is_some() {
            info!("attached to live playback");
            return Ok(AttachOutcome::KeptLive);
        }

        let Some(track_id) = snapshot.last_track_id else {
            return Ok(AttachOutcome::Fresh);
        };
        let Some(index) = self.controller.play_order().index_of(&track_id) else {
            info!(track_id = %track_id, "last track no longer in catalog");
            return Ok(AttachOutcome::Fresh);
        };

        self.controller.restore(
            &track_id,
            index,
            snapshot.was_playing,
            Duration::from_millis(snapshot.last_position_ms),
        )?;
        Ok(AttachOutcome::Restored(track_id))
    }

    /// The presentation layer went away; persist live state
    ///
    /// A load still preparing is saved with its target position and play
    /// intent, not the zeroed live position.
    pub fn detach(&mut self) -> Result<()> {
        let snapshot = self.snapshot(true);
        self.store.save(&snapshot)?;
        self.controller.detach_ui();
        info!("detached, snapshot saved");
        Ok(())
    }

    /// Final teardown
    ///
    /// The snapshot is written with `was_playing = false` so the next launch
    /// never auto-resumes.
    pub fn destroy(&mut self) -> Result<()> {
        let snapshot = self.snapshot(false);
        let saved = self.store.save(&snapshot);
        self.controller.shutdown();
        saved?;
        info!("session destroyed");
        Ok(())
    }

    /// Delete a track's audio through `source`, then drop it from the catalog
    ///
    /// On failure the catalog is unchanged and a notice explains why.
    pub fn delete_track(
        &mut self,
        id: &TrackId,
        source: &dyn CatalogSource,
    ) -> Result<DeleteOutcome> {
        let track = self
            .controller
            .catalog()
            .find(id)
            .cloned()
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;

        match source.delete(&track) {
            Ok(outcome) => {
                self.controller.remove_track(id)?;
                info!(track_id = %id, ?outcome, "track deleted");
                self.controller
                    .emit_notice(Notice::TrackDeleted { title: track.title });
                Ok(outcome)
            }
            Err(e) => {
                warn!(track_id = %id, error = %e, "delete failed");
                self.controller.emit_notice(Notice::DeleteFailed {
                    title: track.title,
                    reason: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Apply an external command; `Stop` ends the session
    pub fn dispatch(&mut self, command: TransportCommand) -> ControlFlow<()> {
        if command == TransportCommand::Stop {
            if let Err(e) = self.destroy() {
                warn!(error = %e, "failed to persist snapshot on stop");
            }
            return ControlFlow::Break(());
        }

        if let Err(e) = self.controller.apply(command) {
            debug!(?command, error = %e, "command rejected");
        }
        ControlFlow::Continue(())
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        self.controller.drain_events()
    }

    /// `keep_playing = false` forces `was_playing` off
    fn snapshot(&self, keep_playing: bool) -> PersistedSnapshot {
        let current = self.controller.current_track();
        let (position, playing) = self
            .controller
            .pending_resume()
            .unwrap_or_else(|| (self.controller.position(), self.controller.is_playing()));

        PersistedSnapshot {
            last_track_id: current.map(|t| t.id.clone()),
            last_position_ms: current
                .map(|_| position.as_millis() as u64)
                .unwrap_or(0),
            was_playing: keep_playing && playing && current.is_some(),
            shuffle_enabled: self.controller.shuffle_enabled(),
            repeat_mode: self.controller.repeat_mode(),
        }
    }
}
