//! File scanning for audio files

use gaane_core::{GaaneError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up when none are configured
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3", "flac", "ogg", "wav", "aac", "m4a", "opus"];

/// Scanner for audio files in directories
#[derive(Debug, Clone)]
pub struct FileScanner {
    /// Whether to follow symbolic links
    follow_links: bool,

    /// Lowercase extensions without the dot
    extensions: Vec<String>,
}

impl Default for FileScanner {
    fn default() -> Self {
        Self {
            follow_links: false,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
        }
    }
}

impl FileScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to follow symbolic links
    #[must_use]
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// Replace the accepted extensions (case-insensitive, leading dot optional)
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        self
    }

    /// Recursively list audio files under `path`
    ///
    /// Unreadable entries are skipped.
    pub fn scan_directory(&self, path: &Path) -> Result<Vec<PathBuf>> {
        if !path.exists() {
            return Err(GaaneError::invalid_input(format!(
                "{} does not exist",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(GaaneError::invalid_input(format!(
                "{} is not a directory",
                path.display()
            )));
        }

        let files = WalkDir::new(path)
            .follow_links(self.follow_links)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|p| self.is_audio_file(p))
            .collect();

        Ok(files)
    }

    /// Scan several roots; roots that cannot be scanned are logged and skipped
    pub fn scan_directories(&self, paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut all_files = Vec::new();

        for path in paths {
            match self.scan_directory(path) {
                Ok(mut files) => all_files.append(&mut files),
                Err(e) => {
                    tracing::warn!("Failed to scan {}: {}", path.display(), e);
                }
            }
        }

        all_files
    }

    /// Whether `path` has an accepted extension
    pub fn is_audio_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}
