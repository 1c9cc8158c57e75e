/// Player configuration
use crate::error::{CliError, Result};
use gaane_library::{FileScanner, DEFAULT_EXTENSIONS};
use gaane_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "gaane.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GaaneConfig {
    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,

    #[serde(default = "default_state")]
    pub state: StateSettings,

    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    #[serde(default = "default_roots")]
    pub roots: Vec<PathBuf>,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_duck_volume")]
    pub duck_volume: f32,

    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateSettings {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl GaaneConfig {
    /// Load configuration from a TOML file and `GAANE_` environment variables
    ///
    /// An explicit `path` must exist. Without one, `gaane.toml` in the
    /// working directory is used when present. Nested keys are addressed
    /// with a double underscore, e.g. `GAANE_PLAYBACK__DUCK_VOLUME=0.2`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path).required(true));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("GAANE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("library.roots")
                .with_list_parse_key("library.extensions")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.playback.duck_volume) {
            return Err(CliError::Config(format!(
                "duck_volume must be between 0 and 1, got {}",
                self.playback.duck_volume
            )));
        }

        if self.playback.tick_interval_ms == 0 {
            return Err(CliError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }

        if self.log_filter.trim().is_empty() {
            return Err(CliError::Config("log_filter must not be empty".to_string()));
        }

        Ok(())
    }

    /// Commands that read the music library need at least one root
    pub fn require_library(&self) -> Result<()> {
        if self.library.roots.is_empty() {
            return Err(CliError::Config(
                "no music directories configured (set library.roots or pass --root)"
                    .to_string(),
            ));
        }
        Ok(())
    }

    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            duck_volume: self.playback.duck_volume,
            tick_interval: Duration::from_millis(self.playback.tick_interval_ms),
            shuffle_seed: self.playback.shuffle_seed,
        }
    }

    pub fn scanner(&self) -> FileScanner {
        FileScanner::new()
            .follow_links(self.library.follow_links)
            .extensions(self.library.extensions.iter().map(String::as_str))
    }
}

// Default values
fn default_library() -> LibrarySettings {
    LibrarySettings {
        roots: default_roots(),
        extensions: default_extensions(),
        follow_links: default_follow_links(),
    }
}

fn default_roots() -> Vec<PathBuf> {
    dirs::audio_dir().into_iter().collect()
}

fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

fn default_follow_links() -> bool {
    false
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        duck_volume: default_duck_volume(),
        tick_interval_ms: default_tick_interval_ms(),
        shuffle_seed: None,
    }
}

fn default_duck_volume() -> f32 {
    0.1
}

fn default_tick_interval_ms() -> u64 {
    1000
}

fn default_state() -> StateSettings {
    StateSettings {
        snapshot_path: default_snapshot_path(),
    }
}

fn default_snapshot_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("gaane").join("state.json"))
        .unwrap_or_else(|| PathBuf::from("./gaane-state.json"))
}

fn default_log_filter() -> String {
    "gaane=info,gaane_cli=info,gaane_playback=info".to_string()
}

impl Default for GaaneConfig {
    fn default() -> Self {
        Self {
            library: default_library(),
            playback: default_playback(),
            state: default_state(),
            log_filter: default_log_filter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_are_valid() {
        let config = GaaneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.playback.duck_volume, 0.1);
        assert!(config.state.snapshot_path.ends_with("state.json"));
    }

    #[test]
    fn rejects_out_of_range_duck_volume() {
        let mut config = GaaneConfig::default();
        config.playback.duck_volume = 1.5;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }

    #[test]
    fn rejects_zero_tick_interval() {
        let mut config = GaaneConfig::default();
        config.playback.tick_interval_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_roots_fail_library_check() {
        let mut config = GaaneConfig::default();
        config.library.roots.clear();
        assert!(config.require_library().is_err());

        config.library.roots.push(PathBuf::from("/music"));
        assert!(config.require_library().is_ok());
    }

    #[test]
    fn loads_toml_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gaane.toml");
        fs::write(
            &path,
            r#"
[library]
roots = ["/srv/music"]
extensions = ["flac"]

[playback]
duck_volume = 0.25
tick_interval_ms = 500
shuffle_seed = 7

[state]
snapshot_path = "/tmp/gaane/state.json"
"#,
        )
        .unwrap();

        let config = GaaneConfig::load(Some(&path)).unwrap();
        assert_eq!(config.library.roots, vec![PathBuf::from("/srv/music")]);
        assert_eq!(config.library.extensions, vec!["flac".to_string()]);
        assert!(!config.library.follow_links);

        let playback = config.playback_config();
        assert_eq!(playback.duck_volume, 0.25);
        assert_eq!(playback.tick_interval, Duration::from_millis(500));
        assert_eq!(playback.shuffle_seed, Some(7));
    }

    #[test]
    fn invalid_file_values_are_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gaane.toml");
        fs::write(&path, "[playback]\nduck_volume = -0.5\n").unwrap();

        assert!(GaaneConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = GaaneConfig::load(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
