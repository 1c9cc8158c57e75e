//! Shared mocks for transport controller tests
//!
//! Decoders and focus record everything into `Rc<RefCell<..>>` logs so tests
//! can drive callbacks and inspect side effects after handing ownership of
//! the mocks to the controller.

#![allow(dead_code)]

use gaane_core::{
    Catalog, CatalogSource, DeleteOutcome, GaaneError, Locator, PersistedSnapshot, SnapshotStore,
    Track, TrackId,
};
use gaane_playback::{
    Decoder, DecoderBackend, FocusArbitrator, FocusGrant, PlaybackConfig, PlaybackError,
    PlaybackEvent, PrepareTicket, TransportController,
};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use std::time::Duration;

pub const TRACK_SECS: u64 = 180;

// ===== Decoder =====

#[derive(Debug)]
pub struct DecoderLog {
    pub opened: Vec<PrepareTicket>,
    pub live: usize,
    pub started: usize,
    pub paused: usize,
    pub seeks: Vec<Duration>,
    pub volume: f32,
    pub position: Duration,
    pub fail_open: HashSet<TrackId>,
    pub fail_start: bool,
}

impl Default for DecoderLog {
    fn default() -> Self {
        Self {
            opened: Vec::new(),
            live: 0,
            started: 0,
            paused: 0,
            seeks: Vec::new(),
            volume: 1.0,
            position: Duration::ZERO,
            fail_open: HashSet::new(),
            fail_start: false,
        }
    }
}

pub struct MockBackend {
    log: Rc<RefCell<DecoderLog>>,
}

impl DecoderBackend for MockBackend {
    fn open(
        &mut self,
        track: &Track,
        ticket: PrepareTicket,
    ) -> gaane_playback::Result<Box<dyn Decoder>> {
        let mut log = self.log.borrow_mut();
        if log.fail_open.contains(&track.id) {
            return Err(PlaybackError::decoder(format!("cannot open {}", track.id)));
        }
        log.opened.push(ticket);
        log.live += 1;
        log.position = Duration::ZERO;
        drop(log);

        Ok(Box::new(MockDecoder {
            log: Rc::clone(&self.log),
            duration: track.duration,
        }))
    }
}

pub struct MockDecoder {
    log: Rc<RefCell<DecoderLog>>,
    duration: Duration,
}

impl Decoder for MockDecoder {
    fn start(&mut self) -> gaane_playback::Result<()> {
        let mut log = self.log.borrow_mut();
        if log.fail_start {
            return Err(PlaybackError::decoder("output stalled"));
        }
        log.started += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().paused += 1;
    }

    fn seek(&mut self, position: Duration) -> gaane_playback::Result<Duration> {
        let reached = position.min(self.duration);
        let mut log = self.log.borrow_mut();
        log.seeks.push(position);
        log.position = reached;
        Ok(reached)
    }

    fn position(&self) -> Duration {
        self.log.borrow().position
    }

    fn duration(&self) -> Duration {
        self.duration
    }

    fn set_volume(&mut self, gain: f32) {
        self.log.borrow_mut().volume = gain;
    }
}

impl Drop for MockDecoder {
    fn drop(&mut self) {
        self.log.borrow_mut().live -= 1;
    }
}

// ===== Focus =====

#[derive(Debug)]
pub struct FocusLog {
    pub grant: bool,
    pub acquired: usize,
    pub released: usize,
}

pub struct MockFocus {
    log: Rc<RefCell<FocusLog>>,
}

impl FocusArbitrator for MockFocus {
    fn acquire(&mut self) -> FocusGrant {
        let mut log = self.log.borrow_mut();
        if log.grant {
            log.acquired += 1;
            FocusGrant::Granted
        } else {
            FocusGrant::Denied
        }
    }

    fn release(&mut self) {
        self.log.borrow_mut().released += 1;
    }
}

// ===== Collaborators for the session layer =====

#[derive(Clone, Default)]
pub struct SharedStore {
    pub snapshot: Rc<RefCell<PersistedSnapshot>>,
    pub saves: Rc<RefCell<usize>>,
}

impl SnapshotStore for SharedStore {
    fn load(&self) -> gaane_core::Result<PersistedSnapshot> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&mut self, snapshot: &PersistedSnapshot) -> gaane_core::Result<()> {
        *self.snapshot.borrow_mut() = snapshot.clone();
        *self.saves.borrow_mut() += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockSource {
    pub refuse: bool,
    pub deleted: RefCell<Vec<TrackId>>,
}

impl CatalogSource for MockSource {
    fn load(&self) -> gaane_core::Result<Catalog> {
        Ok(catalog(3))
    }

    fn delete(&self, track: &Track) -> gaane_core::Result<DeleteOutcome> {
        if self.refuse {
            return Err(GaaneError::permission_denied(track.locator.to_string()));
        }
        self.deleted.borrow_mut().push(track.id.clone());
        Ok(DeleteOutcome::ViaLocator)
    }
}

// ===== Helpers =====

pub fn track(i: usize) -> Track {
    Track::new(
        TrackId::new(format!("t{i}")),
        format!("Track {i}"),
        format!("Artist {}", i % 3),
        Duration::from_secs(TRACK_SECS),
        Locator::new(format!("/music/{i}.mp3")),
    )
}

pub fn catalog(count: usize) -> Catalog {
    Catalog::new((0..count).map(track).collect())
}

pub fn id(i: usize) -> TrackId {
    TrackId::new(format!("t{i}"))
}

pub struct Harness {
    pub controller: TransportController,
    pub decoders: Rc<RefCell<DecoderLog>>,
    pub focus: Rc<RefCell<FocusLog>>,
}

impl Harness {
    pub fn new(count: usize) -> Self {
        Self::with_catalog(catalog(count))
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        let mut harness = Self::empty();
        harness.controller.set_catalog(catalog);
        harness.controller.drain_events();
        harness
    }

    /// Controller with an empty catalog
    pub fn empty() -> Self {
        let decoders = Rc::new(RefCell::new(DecoderLog::default()));
        let focus = Rc::new(RefCell::new(FocusLog {
            grant: true,
            acquired: 0,
            released: 0,
        }));

        let controller = TransportController::new(
            PlaybackConfig {
                shuffle_seed: Some(42),
                ..PlaybackConfig::default()
            },
            Box::new(MockBackend {
                log: Rc::clone(&decoders),
            }),
            Box::new(MockFocus {
                log: Rc::clone(&focus),
            }),
        );

        Self {
            controller,
            decoders,
            focus,
        }
    }

    pub fn last_ticket(&self) -> PrepareTicket {
        self.decoders
            .borrow()
            .opened
            .last()
            .cloned()
            .expect("no decoder opened")
    }

    /// Fire the prepared callback for the newest decoder
    pub fn prepare(&mut self) {
        let ticket = self.last_ticket();
        self.controller.on_prepared(&ticket);
    }

    /// Fire the completion callback for the newest decoder
    pub fn complete(&mut self) {
        let ticket = self.last_ticket();
        self.controller.on_track_completed(&ticket);
    }

    /// Select a track and let it prepare
    pub fn play_index(&mut self, index: usize) {
        self.controller.load_track(index).expect("load failed");
        self.prepare();
    }

    pub fn current_id(&self) -> Option<String> {
        self.controller
            .current_track()
            .map(|t| t.id.as_str().to_string())
    }

    pub fn live_decoders(&self) -> usize {
        self.decoders.borrow().live
    }

    pub fn events(&mut self) -> Vec<PlaybackEvent> {
        self.controller.drain_events()
    }
}
