//! Decoder abstraction
//!
//! The platform supplies a [`DecoderBackend`] that opens one [`Decoder`] per
//! track. Preparation is asynchronous: the backend reports readiness,
//! completion, and runtime failure as [`DecoderEvent`]s carrying the
//! [`PrepareTicket`] it was opened with. The controller ignores events whose
//! ticket is not the current one, so callbacks from a torn-down decoder are
//! harmless.
//!
//! Dropping a decoder tears it down.

use crate::error::Result;
use gaane_core::{Track, TrackId};
use std::time::Duration;

/// Identifies one preparation attempt
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrepareTicket {
    generation: u64,
    track_id: TrackId,
}

impl PrepareTicket {
    pub fn new(generation: u64, track_id: TrackId) -> Self {
        Self {
            generation,
            track_id,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }
}

/// Asynchronous decoder notifications
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecoderEvent {
    /// Preparation finished; the decoder can start and seek
    Prepared(PrepareTicket),

    /// Playback reached the end of the track
    Completed(PrepareTicket),

    /// Runtime failure after setup
    Failed { ticket: PrepareTicket, message: String },
}

impl DecoderEvent {
    pub fn ticket(&self) -> &PrepareTicket {
        match self {
            Self::Prepared(ticket) | Self::Completed(ticket) => ticket,
            Self::Failed { ticket, .. } => ticket,
        }
    }
}

/// Opens decoders for tracks
pub trait DecoderBackend {
    /// Create a decoder for `track` and begin preparing it
    ///
    /// Readiness is reported later as `DecoderEvent::Prepared(ticket)`.
    ///
    /// # Errors
    /// Returns an error if the decoder cannot be set up at all (missing file,
    /// unsupported format). No event follows a failed open.
    fn open(&mut self, track: &Track, ticket: PrepareTicket) -> Result<Box<dyn Decoder>>;
}

/// One track's decoder
pub trait Decoder {
    /// Start or resume output
    fn start(&mut self) -> Result<()>;

    /// Pause output, keeping the position
    fn pause(&mut self);

    /// Seek and return the position actually reached
    ///
    /// Positions past the end are clamped by the decoder.
    fn seek(&mut self, position: Duration) -> Result<Duration>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Total duration, zero when unknown
    fn duration(&self) -> Duration;

    /// Output gain, 0.0 to 1.0
    fn set_volume(&mut self, gain: f32);
}
