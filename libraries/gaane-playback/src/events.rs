//! Playback Events
//!
//! Outbound notifications for whatever presentation layer is attached.
//! Events queue up inside the controller and are taken with
//! `TransportController::drain_events`; at most one presentation layer
//! consumes them.

use gaane_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Events emitted by the transport controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Current track changed, or was re-announced with a new playing flag
    TrackChanged {
        /// New current track, `None` when the controller went idle
        track: Option<Track>,
        /// Whether output is running
        is_playing: bool,
    },

    /// Output started or stopped
    PlaybackStateChanged {
        /// Whether output is running
        is_playing: bool,
    },

    /// Position update (periodic while playing, and after seeks)
    Progress {
        /// Current playback position
        position_ms: u64,
        /// Total track duration, zero before preparation
        duration_ms: u64,
    },

    /// Play order was rebuilt
    OrderChanged {
        /// Number of tracks in the new order
        len: usize,
        /// Whether the order is shuffled
        shuffled: bool,
    },

    /// User-facing message
    Notice(Notice),
}

/// User-facing messages, rendered through `Display`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// Shuffle toggled by the user
    ShuffleChanged { enabled: bool },

    /// Repeat mode cycled by the user
    RepeatChanged { mode: RepeatMode },

    /// A track could not be played and was skipped
    TrackFailed { title: String },

    /// Every track failed in a row; playback stopped
    PlaybackAborted { attempts: usize },

    /// Audio output could not be acquired
    FocusDenied,

    /// Nothing in the play order
    NothingToPlay,

    /// Selection outside the play order
    InvalidSelection { index: usize },

    /// A track was deleted from storage
    TrackDeleted { title: String },

    /// Deletion failed
    DeleteFailed { title: String, reason: String },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShuffleChanged { enabled: true } => write!(f, "Shuffle: On"),
            Self::ShuffleChanged { enabled: false } => write!(f, "Shuffle: Off"),
            Self::RepeatChanged { mode } => match mode {
                RepeatMode::Off => write!(f, "Repeat: Off"),
                RepeatMode::All => write!(f, "Repeat: All"),
                RepeatMode::One => write!(f, "Repeat: One"),
            },
            Self::TrackFailed { title } => write!(f, "Error loading {title}. Skipping..."),
            Self::PlaybackAborted { attempts } => {
                write!(f, "Stopped after {attempts} unplayable songs")
            }
            Self::FocusDenied => write!(f, "Could not acquire audio output"),
            Self::NothingToPlay => write!(f, "No songs to play"),
            Self::InvalidSelection { index } => write!(f, "No song at position {index}"),
            Self::TrackDeleted { title } => write!(f, "Deleted {title}"),
            Self::DeleteFailed { title, reason } => {
                write!(f, "Could not delete {title}: {reason}")
            }
        }
    }
}
