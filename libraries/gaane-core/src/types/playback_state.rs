/// Playback preference types persisted between launches
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Repeat mode for playback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop after the last track
    #[default]
    Off,

    /// Wrap to the first track after the last
    All,

    /// Replay the current track
    One,
}

impl RepeatMode {
    /// Next mode in the Off -> All -> One -> Off cycle
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Off => Self::All,
            Self::All => Self::One,
            Self::One => Self::Off,
        }
    }

    /// Numeric code used in persisted settings
    pub fn code(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::All => 1,
            Self::One => 2,
        }
    }

    /// Decode a persisted code; unknown values fall back to `Off`
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::All,
            2 => Self::One,
            _ => Self::Off,
        }
    }

    /// Convert to string representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::All => "all",
            Self::One => "one",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Key-value snapshot written when the presentation layer goes away
///
/// Read back on the next attach to rebuild playback. Not authoritative while
/// a live controller already has a track loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSnapshot {
    /// Last track, `None` when nothing was loaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_track_id: Option<TrackId>,

    /// Position inside the last track
    #[serde(default)]
    pub last_position_ms: u64,

    /// Whether playback should resume on restore
    #[serde(default)]
    pub was_playing: bool,

    /// Shuffle preference
    #[serde(default)]
    pub shuffle_enabled: bool,

    /// Repeat preference, stored as 0|1|2
    #[serde(default, with = "repeat_code")]
    pub repeat_mode: RepeatMode,
}

mod repeat_code {
    use super::RepeatMode;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(mode: &RepeatMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(mode.code())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RepeatMode, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Ok(RepeatMode::from_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_cycle_returns_to_start() {
        let mode = RepeatMode::Off;
        assert_eq!(mode.next(), RepeatMode::All);
        assert_eq!(mode.next().next(), RepeatMode::One);
        assert_eq!(mode.next().next().next(), RepeatMode::Off);
    }

    #[test]
    fn unknown_repeat_code_is_off() {
        assert_eq!(RepeatMode::from_code(7), RepeatMode::Off);
        assert_eq!(RepeatMode::from_code(2), RepeatMode::One);
    }

    #[test]
    fn snapshot_uses_settings_key_names() {
        let snapshot = PersistedSnapshot {
            last_track_id: Some(TrackId::new("17")),
            last_position_ms: 83_000,
            was_playing: true,
            shuffle_enabled: false,
            repeat_mode: RepeatMode::One,
        };

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["lastTrackId"], "17");
        assert_eq!(json["lastPositionMs"], 83_000);
        assert_eq!(json["wasPlaying"], true);
        assert_eq!(json["shuffleEnabled"], false);
        assert_eq!(json["repeatMode"], 2);
    }

    #[test]
    fn sparse_snapshot_fills_defaults() {
        let snapshot: PersistedSnapshot = serde_json::from_str(r#"{"repeatMode":1}"#).unwrap();
        assert_eq!(snapshot.last_track_id, None);
        assert_eq!(snapshot.last_position_ms, 0);
        assert!(!snapshot.was_playing);
        assert_eq!(snapshot.repeat_mode, RepeatMode::All);
    }
}
