//! Core types for transport control

use gaane_core::{RepeatMode, Track};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport lifecycle
///
/// `Idle` has no current track. `Preparing` owns a decoder that has not
/// reported readiness yet. The two `Ready*` states have a prepared decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportState {
    #[default]
    Idle,
    Preparing,
    ReadyPaused,
    ReadyPlaying,
}

impl TransportState {
    /// Decoder has finished preparing
    pub fn is_prepared(self) -> bool {
        matches!(self, Self::ReadyPaused | Self::ReadyPlaying)
    }
}

/// What to do once the in-flight preparation completes
///
/// Consumed exactly once by the prepared callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingAction {
    /// Stay paused
    #[default]
    None,

    /// Acquire focus and start
    Autoplay,

    /// Seek to a restored position, then optionally start
    SeekThenMaybePlay { position: Duration, play: bool },
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackConfig {
    /// Gain applied while another app holds transient duckable focus
    pub duck_volume: f32,

    /// Progress tick cadence while a UI is attached and playback runs
    pub tick_interval: Duration,

    /// Fixed shuffle seed; `None` seeds from OS entropy
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duck_volume: 0.1,
            tick_interval: Duration::from_secs(1),
            shuffle_seed: None,
        }
    }
}

/// Point-in-time view of the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub transport: TransportState,
    pub current_index: Option<usize>,
    pub current_track: Option<Track>,
    pub position: Duration,
    pub duration: Duration,
    pub is_playing: bool,
    pub is_prepared: bool,
    pub shuffle_enabled: bool,
    pub repeat_mode: RepeatMode,
}
