//! Library scanning
//!
//! Builds an immutable library snapshot from a list of candidate audio file
//! paths. The path list normally comes from the directory-picking
//! collaborator; a walkdir-based discovery helper is included for callers
//! that hand over a directory instead.
//!
//! Snapshots are copy-on-reload: every scan produces a fresh snapshot that
//! replaces the previous one wholesale.

use crate::extractor::MetadataExtractor;
use crate::grouper::group_albums;
use aria_core::types::{Album, Track};
use std::path::{Path, PathBuf};

/// Scan configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Supported audio file extensions
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "mp3".to_string(),
                "flac".to_string(),
                "ogg".to_string(),
                "opus".to_string(),
                "wav".to_string(),
                "m4a".to_string(),
                "aac".to_string(),
            ],
        }
    }
}

/// Immutable library snapshot produced by one scan
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    /// All scanned tracks, in scan order
    pub tracks: Vec<Track>,

    /// Albums grouped from the tracks
    pub albums: Vec<Album>,
}

impl LibrarySnapshot {
    /// Look up a track by id
    pub fn track(&self, id: &aria_core::TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }

    /// Look up an album by id
    pub fn album(&self, id: &aria_core::AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| &a.id == id)
    }
}

/// Library scanner
pub struct LibraryScanner {
    extractor: MetadataExtractor,
    config: ScanConfig,
}

impl LibraryScanner {
    /// Create a scanner with the default configuration
    pub fn new() -> Self {
        Self {
            extractor: MetadataExtractor::new(),
            config: ScanConfig::default(),
        }
    }

    /// Create a scanner with a custom configuration
    pub fn with_config(config: ScanConfig) -> Self {
        Self {
            extractor: MetadataExtractor::new(),
            config,
        }
    }

    /// Build a snapshot from an explicit path list
    ///
    /// Extraction is total per file, so the scan itself never fails; files
    /// that cannot be read become stem-titled tracks with defaults.
    pub fn scan_paths(&self, paths: &[PathBuf]) -> LibrarySnapshot {
        let tracks: Vec<Track> = paths
            .iter()
            .map(|path| {
                tracing::debug!(path = %path.display(), "extracting metadata");
                self.extractor.extract(path)
            })
            .collect();

        let albums = group_albums(&tracks);
        tracing::debug!(
            tracks = tracks.len(),
            albums = albums.len(),
            "library snapshot built"
        );

        LibrarySnapshot { tracks, albums }
    }

    /// Discover audio files under a directory, recursively
    ///
    /// Results are sorted by path for deterministic snapshots.
    pub fn discover_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = walkdir::WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file() && self.is_supported_file(e.path()))
            .map(|e| e.path().to_path_buf())
            .collect();

        files.sort();
        files
    }

    /// Discover and scan in one step
    pub fn scan_directory(&self, root: &Path) -> LibrarySnapshot {
        let files = self.discover_files(root);
        self.scan_paths(&files)
    }

    fn is_supported_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.config.extensions.contains(&e.to_lowercase()))
            .unwrap_or(false)
    }
}

impl Default for LibraryScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn discover_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.mp3"), []).unwrap();
        fs::write(dir.path().join("b.FLAC"), []).unwrap();
        fs::write(dir.path().join("notes.txt"), []).unwrap();

        let scanner = LibraryScanner::new();
        let files = scanner.discover_files(dir.path());
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn scan_of_unreadable_files_still_yields_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mystery song.mp3");
        fs::write(&path, [0u8; 16]).unwrap();

        let scanner = LibraryScanner::new();
        let snapshot = scanner.scan_paths(&[path]);

        assert_eq!(snapshot.tracks.len(), 1);
        assert_eq!(snapshot.tracks[0].title, "mystery song");
        assert_eq!(snapshot.tracks[0].artist, "Unknown Artist");
        assert_eq!(snapshot.albums.len(), 1);
        assert_eq!(snapshot.albums[0].title, "Unknown Album");
    }

    #[test]
    fn rescan_produces_fresh_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        fs::write(&path, [0u8; 16]).unwrap();

        let scanner = LibraryScanner::new();
        let first = scanner.scan_paths(std::slice::from_ref(&path));
        let second = scanner.scan_paths(std::slice::from_ref(&path));

        // Copy-on-reload: snapshots are independent
        assert_ne!(first.tracks[0].id, second.tracks[0].id);
    }
}
