//! Error types for transport control

use gaane_core::{GaaneError, TrackId};
use thiserror::Error;

/// Playback errors
///
/// Returned by rejected commands. A rejected command never changes state.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Requested index is outside the play order
    #[error("Invalid selection: index {index} (play order has {len} tracks)")]
    InvalidSelection { index: usize, len: usize },

    /// Play order is empty
    #[error("Nothing to play")]
    NothingToPlay,

    /// Decoder has not finished preparing
    #[error("No prepared track")]
    NotPrepared,

    /// Audio output could not be acquired
    #[error("Could not acquire audio output")]
    FocusDenied,

    /// Decoder setup or runtime failure
    #[error("Decoder error: {0}")]
    Decoder(String),

    /// Every track in the play order failed in a row
    #[error("Gave up after {attempts} consecutive failed tracks")]
    SkipLimitReached { attempts: usize },

    /// Track id not present in the play order
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    /// Unparseable external command
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Collaborator failure (storage, catalog source)
    #[error(transparent)]
    Core(#[from] GaaneError),
}

impl PlaybackError {
    /// Create a decoder error
    pub fn decoder(msg: impl Into<String>) -> Self {
        Self::Decoder(msg.into())
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
