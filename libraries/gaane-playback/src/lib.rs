//! Gaane - Transport Control
//!
//! Platform-agnostic playback control for the Gaane music player.
//!
//! This crate provides:
//! - Play order (linear or shuffled with the current track pinned)
//! - Repeat modes (Off, All, One)
//! - Single-decoder lifecycle with asynchronous preparation
//! - Audio focus handling (pause, duck, resume)
//! - Skip-on-error with a bounded skip count
//! - Event queue for a presentation layer
//! - Session persistence across presentation detach/attach
//!
//! # Architecture
//!
//! `gaane-playback` never touches audio hardware or the file system. The
//! platform supplies:
//! - a [`DecoderBackend`] that opens one [`Decoder`] per track
//! - a [`FocusArbitrator`] for audio focus
//! - a [`SnapshotStore`](gaane_core::SnapshotStore) and
//!   [`CatalogSource`](gaane_core::CatalogSource) for the session layer
//!
//! # Example
//!
//! ```rust
//! use gaane_core::{Catalog, Locator, Track, TrackId};
//! use gaane_playback::{
//!     Decoder, DecoderBackend, FocusArbitrator, FocusGrant, PlaybackConfig, PrepareTicket,
//!     TransportController,
//! };
//! use std::time::Duration;
//!
//! struct Silent;
//!
//! impl Decoder for Silent {
//!     fn start(&mut self) -> gaane_playback::Result<()> { Ok(()) }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, position: Duration) -> gaane_playback::Result<Duration> { Ok(position) }
//!     fn position(&self) -> Duration { Duration::ZERO }
//!     fn duration(&self) -> Duration { Duration::from_secs(60) }
//!     fn set_volume(&mut self, _gain: f32) {}
//! }
//!
//! #[derive(Default)]
//! struct Backend { last: Option<PrepareTicket> }
//!
//! impl DecoderBackend for Backend {
//!     fn open(&mut self, _track: &Track, ticket: PrepareTicket)
//!         -> gaane_playback::Result<Box<dyn Decoder>> {
//!         self.last = Some(ticket);
//!         Ok(Box::new(Silent))
//!     }
//! }
//!
//! struct AlwaysGrant;
//!
//! impl FocusArbitrator for AlwaysGrant {
//!     fn acquire(&mut self) -> FocusGrant { FocusGrant::Granted }
//!     fn release(&mut self) {}
//! }
//!
//! let mut controller = TransportController::new(
//!     PlaybackConfig::default(),
//!     Box::new(Backend::default()),
//!     Box::new(AlwaysGrant),
//! );
//!
//! controller.set_catalog(Catalog::new(vec![Track::new(
//!     TrackId::new("1"),
//!     "Dil Cheez Kya Hai",
//!     "Asha Bhosle",
//!     Duration::from_secs(60),
//!     Locator::new("/music/dil.mp3"),
//! )]));
//!
//! controller.play().unwrap();
//! assert!(!controller.is_prepared());
//! ```

#![forbid(unsafe_code)]

pub mod command;
pub mod controller;
pub mod decoder;
pub mod error;
pub mod events;
pub mod focus;
pub mod order;
pub mod session;
pub mod shuffle;
pub mod ticker;
pub mod types;

pub use command::{CommandChannel, CommandSender, TransportCommand};
pub use controller::TransportController;
pub use decoder::{Decoder, DecoderBackend, DecoderEvent, PrepareTicket};
pub use error::{PlaybackError, Result};
pub use events::{Notice, PlaybackEvent};
pub use focus::{FocusAction, FocusArbitrator, FocusChange, FocusGrant, FocusTracker};
pub use order::{Direction, PlayOrder};
pub use session::{AttachOutcome, PlayerSession};
pub use ticker::ProgressTicker;
pub use types::{PendingAction, PlaybackConfig, PlaybackStatus, TransportState};
