//! Transport controller - core orchestration
//!
//! Owns the catalog, the play order, the single decoder, and audio focus.
//! Every operation runs on one logical thread: commands and decoder/focus
//! callbacks are applied one at a time, and the controller never blocks on
//! preparation. A new load always tears down the previous decoder first, so
//! at most one decoder exists.

use crate::{
    decoder::{Decoder, DecoderBackend, DecoderEvent, PrepareTicket},
    error::{PlaybackError, Result},
    events::{Notice, PlaybackEvent},
    focus::{FocusAction, FocusArbitrator, FocusChange, FocusGrant, FocusTracker},
    order::{Direction, PlayOrder},
    ticker::ProgressTicker,
    types::{PendingAction, PlaybackConfig, PlaybackStatus, TransportState},
};
use gaane_core::{Catalog, RepeatMode, Track, TrackId};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Transport controller
pub struct TransportController {
    config: PlaybackConfig,

    // Content
    catalog: Catalog,
    order: PlayOrder,
    repeat: RepeatMode,

    // Transport
    state: TransportState,
    current_index: Option<usize>,
    current_track: Option<Track>,
    position: Duration,
    pending: PendingAction,

    // Decoder
    backend: Box<dyn DecoderBackend>,
    decoder: Option<Box<dyn Decoder>>,
    generation: u64,
    consecutive_failures: usize,

    // Focus
    arbitrator: Box<dyn FocusArbitrator>,
    focus: FocusTracker,

    ticker: ProgressTicker,
    rng: StdRng,

    // Event queue for the attached presentation layer
    pending_events: Vec<PlaybackEvent>,
}

impl TransportController {
    /// Create an idle controller with an empty catalog
    pub fn new(
        config: PlaybackConfig,
        backend: Box<dyn DecoderBackend>,
        arbitrator: Box<dyn FocusArbitrator>,
    ) -> Self {
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            ticker: ProgressTicker::new(config.tick_interval),
            config,
            catalog: Catalog::default(),
            order: PlayOrder::default(),
            repeat: RepeatMode::Off,
            state: TransportState::Idle,
            current_index: None,
            current_track: None,
            position: Duration::ZERO,
            pending: PendingAction::None,
            backend,
            decoder: None,
            generation: 0,
            consecutive_failures: 0,
            arbitrator,
            focus: FocusTracker::new(),
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Catalog =====

    /// Replace the catalog
    ///
    /// The play order is rebuilt (current track pinned when shuffled). If the
    /// current track is gone from the new catalog, playback is torn down and
    /// the controller goes idle.
    pub fn set_catalog(&mut self, catalog: Catalog) {
        info!(tracks = catalog.len(), "catalog replaced");
        self.catalog = catalog;
        self.reconcile_order();
    }

    /// Remove one track from the catalog
    pub fn remove_track(&mut self, id: &TrackId) -> Result<Track> {
        let removed = self
            .catalog
            .remove(id)
            .ok_or_else(|| PlaybackError::TrackNotFound(id.clone()))?;
        debug!(track_id = %id, "track removed from catalog");
        self.reconcile_order();
        Ok(removed)
    }

    fn reconcile_order(&mut self) {
        let current = self.current_track.clone();
        let surviving = current
            .as_ref()
            .and_then(|t| self.catalog.find(&t.id))
            .cloned();

        self.order
            .rebuild(&self.catalog, surviving.as_ref(), &mut self.rng);

        match (current, surviving) {
            (Some(_), Some(track)) => {
                self.current_index = self.order.index_of(&track.id);
                self.current_track = Some(track);
            }
            (Some(gone), None) => {
                info!(track_id = %gone.id, "current track left the catalog");
                self.go_idle();
            }
            (None, _) => self.current_index = None,
        }

        self.emit_order_changed();
    }

    // ===== Transport =====

    /// Select a track by play order index and start it
    pub fn load_track(&mut self, index: usize) -> Result<()> {
        let len = self.order.len();
        if len == 0 {
            return Err(self.nothing_to_play());
        }
        if index >= len {
            self.emit_notice(Notice::InvalidSelection { index });
            return Err(PlaybackError::InvalidSelection { index, len });
        }

        self.start_load(index, PendingAction::Autoplay)
    }

    /// Start or resume playback
    ///
    /// Idle loads the first track of the play order. A preparation in flight
    /// is restarted with autoplay. A paused track resumes after acquiring
    /// focus.
    pub fn play(&mut self) -> Result<()> {
        match self.state {
            TransportState::ReadyPlaying => Ok(()),
            TransportState::ReadyPaused => self.resume(),
            TransportState::Preparing => {
                let index = self.current_index.unwrap_or(0);
                self.start_load(index, PendingAction::Autoplay)
            }
            TransportState::Idle => {
                if self.order.is_empty() {
                    return Err(self.nothing_to_play());
                }
                self.start_load(0, PendingAction::Autoplay)
            }
        }
    }

    /// Pause playback, keeping the position
    pub fn pause(&mut self) {
        self.focus.forget_resume();
        if self.state == TransportState::ReadyPlaying {
            self.pause_output();
        }
    }

    /// Pause and give up audio focus
    ///
    /// The track stays loaded.
    pub fn stop(&mut self) {
        self.pause();
        self.release_focus();
    }

    /// Seek within the current track
    ///
    /// Only valid once the decoder is prepared. The decoder clamps positions
    /// past the end.
    pub fn seek(&mut self, position: Duration) -> Result<()> {
        if !self.state.is_prepared() {
            debug!(?position, "seek ignored, nothing prepared");
            return Err(PlaybackError::NotPrepared);
        }
        let decoder = self.decoder.as_mut().ok_or(PlaybackError::NotPrepared)?;

        match decoder.seek(position) {
            Ok(reached) => {
                self.position = reached;
                self.emit_progress();
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, ?position, "seek failed");
                Err(e)
            }
        }
    }

    /// Skip to the next track, wrapping at the end
    pub fn next(&mut self) -> Result<()> {
        self.advance(Direction::Next)
    }

    /// Go back one track, wrapping at the start
    pub fn previous(&mut self) -> Result<()> {
        self.advance(Direction::Previous)
    }

    /// Move through the play order and autoplay the result
    pub fn advance(&mut self, direction: Direction) -> Result<()> {
        let Some(index) = self.order.step(self.current_index, direction) else {
            return Err(self.nothing_to_play());
        };
        self.start_load(index, PendingAction::Autoplay)
    }

    /// Toggle shuffle and announce it
    pub fn toggle_shuffle(&mut self) {
        let enabled = !self.order.is_shuffled();
        self.apply_shuffle(enabled);
        self.emit_notice(Notice::ShuffleChanged { enabled });
    }

    /// Set shuffle without a notice (restoring preferences)
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled != self.order.is_shuffled() {
            self.apply_shuffle(enabled);
        }
    }

    fn apply_shuffle(&mut self, enabled: bool) {
        let current = self.current_track.clone();
        let index = self
            .order
            .toggle(enabled, &self.catalog, current.as_ref(), &mut self.rng);
        if current.is_some() {
            self.current_index = index;
        }
        info!(enabled, "shuffle changed");
        self.emit_order_changed();
    }

    /// Cycle Off -> All -> One -> Off and announce it
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.next();
        info!(mode = %self.repeat, "repeat changed");
        self.emit_notice(Notice::RepeatChanged { mode: self.repeat });
    }

    /// Set the repeat mode without a notice
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat = mode;
    }

    /// Rebuild playback from a persisted snapshot
    ///
    /// `index` is a hint; if it does not point at `track_id` the track is
    /// looked up by id. Once prepared, the decoder seeks to `position` and
    /// starts only if `resume_playing` is set.
    pub fn restore(
        &mut self,
        track_id: &TrackId,
        index: usize,
        resume_playing: bool,
        position: Duration,
    ) -> Result<()> {
        let index = match self.order.get(index) {
            Some(track) if track.id == *track_id => index,
            _ => self
                .order
                .index_of(track_id)
                .ok_or_else(|| PlaybackError::TrackNotFound(track_id.clone()))?,
        };

        info!(track_id = %track_id, index, ?position, resume_playing, "restoring playback");
        self.start_load(
            index,
            PendingAction::SeekThenMaybePlay {
                position,
                play: resume_playing,
            },
        )
    }

    /// Tear everything down and go idle
    pub fn shutdown(&mut self) {
        info!("shutting down transport");
        self.ticker.detach();
        self.go_idle();
    }

    // ===== Decoder callbacks =====

    /// Route a decoder notification
    pub fn on_decoder_event(&mut self, event: &DecoderEvent) {
        match event {
            DecoderEvent::Prepared(ticket) => self.on_prepared(ticket),
            DecoderEvent::Completed(ticket) => self.on_track_completed(ticket),
            DecoderEvent::Failed { ticket, message } => self.on_decoder_error(ticket, message),
        }
    }

    /// The decoder opened with `ticket` finished preparing
    pub fn on_prepared(&mut self, ticket: &PrepareTicket) {
        if !self.is_current(ticket) || self.state != TransportState::Preparing {
            debug!(generation = ticket.generation(), "ignoring stale prepared callback");
            return;
        }

        self.state = TransportState::ReadyPaused;
        debug!(track_id = %ticket.track_id(), "track prepared");

        match std::mem::take(&mut self.pending) {
            PendingAction::None => {
                self.emit_track_changed();
                self.emit_state_changed();
            }
            PendingAction::Autoplay => self.autoplay_prepared(),
            PendingAction::SeekThenMaybePlay { position, play } => {
                if let Some(decoder) = self.decoder.as_mut() {
                    match decoder.seek(position) {
                        Ok(reached) => self.position = reached,
                        Err(e) => warn!(error = %e, ?position, "restore seek failed"),
                    }
                }
                if play {
                    self.autoplay_prepared();
                } else {
                    self.emit_track_changed();
                    self.emit_state_changed();
                }
                self.emit_progress();
            }
        }
    }

    /// The decoder opened with `ticket` reached the end of its track
    pub fn on_track_completed(&mut self, ticket: &PrepareTicket) {
        if !self.is_current(ticket) || !self.state.is_prepared() {
            debug!(generation = ticket.generation(), "ignoring stale completion");
            return;
        }
        let Some(index) = self.current_index else {
            return;
        };

        self.consecutive_failures = 0;
        debug!(index, repeat = %self.repeat, "track completed");

        match self.repeat {
            RepeatMode::One => self.load_index(index, PendingAction::Autoplay),
            RepeatMode::Off if index + 1 >= self.order.len() => self.finish_order(),
            RepeatMode::All | RepeatMode::Off => self.skip_forward(),
        }
    }

    /// The decoder opened with `ticket` failed while running
    pub fn on_decoder_error(&mut self, ticket: &PrepareTicket, message: &str) {
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation(), "ignoring stale decoder error");
            return;
        }
        self.handle_runtime_failure(message);
    }

    // ===== Focus =====

    /// Apply a platform focus change
    pub fn on_focus_change(&mut self, change: FocusChange) {
        let action = self.focus.on_change(change, self.is_playing());
        debug!(?change, ?action, "audio focus changed");

        match action {
            FocusAction::None => {}
            FocusAction::PauseAndRelease => {
                if self.is_playing() {
                    self.pause_output();
                }
                self.arbitrator.release();
            }
            FocusAction::Pause => self.pause_output(),
            FocusAction::Duck => self.apply_volume(self.config.duck_volume),
            FocusAction::Restore { resume } => {
                self.apply_volume(1.0);
                if resume && self.state == TransportState::ReadyPaused {
                    if let Err(e) = self.start_output() {
                        debug!(error = %e, "resume after focus gain failed");
                    }
                }
            }
        }
    }

    // ===== Presentation =====

    /// A presentation layer attached; re-announce state and start ticking
    ///
    /// Anything queued while detached is stale and dropped first.
    pub fn attach_ui(&mut self) {
        self.pending_events.clear();
        self.ticker.attach();
        self.emit_track_changed();
        self.emit_state_changed();
        self.emit_progress();
    }

    /// The presentation layer went away; undelivered events are dropped
    pub fn detach_ui(&mut self) {
        self.ticker.detach();
        self.pending_events.clear();
    }

    /// Publish a progress update if the ticker is running
    pub fn tick(&mut self) {
        if !self.ticker.is_running() {
            return;
        }
        if let Some(decoder) = self.decoder.as_ref() {
            self.position = decoder.position();
        }
        self.emit_progress();
    }

    /// How long the host loop may wait before the next `tick`
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.ticker.next_tick_in()
    }

    /// Take all events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Queries =====

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == TransportState::ReadyPlaying
    }

    pub fn is_prepared(&self) -> bool {
        self.state.is_prepared()
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Live position when prepared, else the last captured one
    pub fn position(&self) -> Duration {
        match self.decoder.as_ref() {
            Some(decoder) if self.state.is_prepared() => decoder.position(),
            _ => self.position,
        }
    }

    /// Where a load in flight will land: target position and whether it
    /// starts once prepared
    ///
    /// `None` unless the controller is `Preparing`.
    pub fn pending_resume(&self) -> Option<(Duration, bool)> {
        if self.state != TransportState::Preparing {
            return None;
        }
        Some(match self.pending {
            PendingAction::None => (self.position, false),
            PendingAction::Autoplay => (self.position, true),
            PendingAction::SeekThenMaybePlay { position, play } => (position, play),
        })
    }

    /// Track duration, zero until prepared
    pub fn duration(&self) -> Duration {
        match self.decoder.as_ref() {
            Some(decoder) if self.state.is_prepared() => decoder.duration(),
            _ => Duration::ZERO,
        }
    }

    pub fn shuffle_enabled(&self) -> bool {
        self.order.is_shuffled()
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn play_order(&self) -> &PlayOrder {
        &self.order
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus {
            transport: self.state,
            current_index: self.current_index,
            current_track: self.current_track.clone(),
            position: self.position(),
            duration: self.duration(),
            is_playing: self.is_playing(),
            is_prepared: self.is_prepared(),
            shuffle_enabled: self.shuffle_enabled(),
            repeat_mode: self.repeat,
        }
    }

    // ===== Internal =====

    /// User-initiated load: resets the failure counter first
    fn start_load(&mut self, index: usize, pending: PendingAction) -> Result<()> {
        self.consecutive_failures = 0;
        self.load_index(index, pending);

        if self.state == TransportState::Idle {
            return Err(PlaybackError::SkipLimitReached {
                attempts: self.order.len(),
            });
        }
        Ok(())
    }

    /// Tear down the old decoder and open one for `index`
    ///
    /// Setup failures skip forward until a track opens or the skip cap is hit.
    fn load_index(&mut self, mut index: usize, mut pending: PendingAction) {
        loop {
            let Some(track) = self.order.get(index).cloned() else {
                self.go_idle();
                return;
            };

            self.teardown_decoder();
            self.current_index = Some(index);
            self.current_track = Some(track.clone());
            self.position = Duration::ZERO;
            self.pending = pending;
            self.state = TransportState::Preparing;
            self.emit_track_changed();
            self.emit_state_changed();

            let ticket = PrepareTicket::new(self.generation, track.id.clone());
            match self.backend.open(&track, ticket) {
                Ok(decoder) => {
                    debug!(track_id = %track.id, index, "preparing track");
                    self.decoder = Some(decoder);
                    return;
                }
                Err(e) => {
                    warn!(track_id = %track.id, error = %e, "failed to open decoder");
                    self.emit_notice(Notice::TrackFailed { title: track.title });
                    if !self.note_failure() {
                        return;
                    }
                    index = (index + 1) % self.order.len();
                    pending = PendingAction::Autoplay;
                }
            }
        }
    }

    /// Count a failed track; go idle once every track has failed in a row
    fn note_failure(&mut self) -> bool {
        self.consecutive_failures += 1;
        let attempts = self.consecutive_failures;

        if attempts >= self.order.len() {
            error!(attempts, "every track in the play order failed, giving up");
            self.consecutive_failures = 0;
            self.go_idle();
            self.emit_notice(Notice::PlaybackAborted { attempts });
            return false;
        }
        true
    }

    fn handle_runtime_failure(&mut self, message: &str) {
        let title = self
            .current_track
            .as_ref()
            .map(|t| t.title.clone())
            .unwrap_or_default();
        warn!(error = message, track = %title, "decoder failed");

        self.teardown_decoder();
        self.state = TransportState::Preparing;
        self.emit_state_changed();
        self.emit_notice(Notice::TrackFailed { title });

        if self.note_failure() {
            self.skip_forward();
        }
    }

    /// Automatic advance that keeps the failure count
    fn skip_forward(&mut self) {
        match self.order.step(self.current_index, Direction::Next) {
            Some(index) => self.load_index(index, PendingAction::Autoplay),
            None => self.go_idle(),
        }
    }

    fn autoplay_prepared(&mut self) {
        match self.resume() {
            Ok(()) => self.emit_track_changed(),
            Err(PlaybackError::FocusDenied) => {
                self.emit_track_changed();
                self.emit_state_changed();
            }
            // Decoder failed to start; already moved on
            Err(_) => {}
        }
    }

    /// Acquire focus and start output from Ready-Paused
    fn resume(&mut self) -> Result<()> {
        if self.arbitrator.acquire() == FocusGrant::Denied {
            warn!("audio focus denied");
            self.emit_notice(Notice::FocusDenied);
            return Err(PlaybackError::FocusDenied);
        }
        self.focus.acquired();
        self.start_output()
    }

    fn start_output(&mut self) -> Result<()> {
        let gain = if self.focus.is_ducked() {
            self.config.duck_volume
        } else {
            1.0
        };
        let decoder = self.decoder.as_mut().ok_or(PlaybackError::NotPrepared)?;
        decoder.set_volume(gain);

        if let Err(e) = decoder.start() {
            self.handle_runtime_failure(&e.to_string());
            return Err(e);
        }

        self.state = TransportState::ReadyPlaying;
        self.ticker.arm();
        self.emit_state_changed();
        Ok(())
    }

    fn pause_output(&mut self) {
        if let Some(decoder) = self.decoder.as_mut() {
            self.position = decoder.position();
            decoder.pause();
        }
        self.state = TransportState::ReadyPaused;
        self.ticker.cancel();
        self.emit_state_changed();
    }

    /// Repeat off and the last track ended: rewind and stay paused
    fn finish_order(&mut self) {
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.pause();
            if let Err(e) = decoder.seek(Duration::ZERO) {
                warn!(error = %e, "rewind after last track failed");
            }
        }
        self.position = Duration::ZERO;
        self.state = TransportState::ReadyPaused;
        self.ticker.cancel();
        info!("reached end of play order");

        self.emit_track_changed();
        self.emit_state_changed();
        self.emit_progress();
    }

    fn apply_volume(&mut self, gain: f32) {
        if let Some(decoder) = self.decoder.as_mut() {
            decoder.set_volume(gain);
        }
    }

    /// Drop the decoder and invalidate its ticket
    fn teardown_decoder(&mut self) {
        self.decoder = None;
        self.generation = self.generation.wrapping_add(1);
        self.ticker.cancel();
    }

    fn release_focus(&mut self) {
        if self.focus.is_held() {
            self.arbitrator.release();
            self.focus.released();
        }
    }

    fn go_idle(&mut self) {
        self.teardown_decoder();
        self.state = TransportState::Idle;
        self.current_index = None;
        self.current_track = None;
        self.position = Duration::ZERO;
        self.pending = PendingAction::None;
        self.release_focus();

        self.emit_track_changed();
        self.emit_state_changed();
    }

    fn is_current(&self, ticket: &PrepareTicket) -> bool {
        self.decoder.is_some() && ticket.generation() == self.generation
    }

    fn nothing_to_play(&mut self) -> PlaybackError {
        self.emit_notice(Notice::NothingToPlay);
        PlaybackError::NothingToPlay
    }

    // ===== Event Emission =====

    fn emit_track_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track: self.current_track.clone(),
            is_playing: self.is_playing(),
        });
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PlaybackStateChanged {
            is_playing: self.is_playing(),
        });
    }

    fn emit_progress(&mut self) {
        self.pending_events.push(PlaybackEvent::Progress {
            position_ms: self.position().as_millis() as u64,
            duration_ms: self.duration().as_millis() as u64,
        });
    }

    fn emit_order_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::OrderChanged {
            len: self.order.len(),
            shuffled: self.order.is_shuffled(),
        });
    }

    pub(crate) fn emit_notice(&mut self, notice: Notice) {
        self.pending_events.push(PlaybackEvent::Notice(notice));
    }
}
