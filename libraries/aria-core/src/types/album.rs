//! Album domain type

use crate::types::{AlbumId, AnimationDecision, Artwork, Track};
use serde::{Deserialize, Serialize};

/// A named group of tracks sharing an album title
///
/// Created by the library grouper from a snapshot of scanned tracks and
/// regenerated wholesale on every library reload. `tracks` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// Unique album identifier, generated at grouping time
    pub id: AlbumId,

    /// Album title
    pub title: String,

    /// Resolved display artist
    pub artist: String,

    /// Explicit album-artist tag, when the member tracks carried one
    pub album_artist: Option<String>,

    /// Representative artwork (first track's)
    pub artwork: Option<Artwork>,

    /// Member tracks, ordered by (disc, track number)
    pub tracks: Vec<Track>,

    /// Animation decision from the external cover analyzer, if any
    pub animation: Option<AnimationDecision>,

    /// Whether an analyzer request is currently in flight
    pub analyzing: bool,

    /// Cached dominant artwork color as RGB, best-effort
    pub dominant_color: Option<[u8; 3]>,
}

impl Album {
    /// Whether any member track is a mastering-certified release
    pub fn mastering_certified(&self) -> bool {
        self.tracks.iter().any(|t| t.mastering_certified)
    }

    /// Total album duration in seconds, summing known track durations
    pub fn duration_secs(&self) -> f64 {
        self.tracks.iter().filter_map(|t| t.duration_secs).sum()
    }

    /// Find a member track by id
    pub fn track(&self, id: &crate::types::TrackId) -> Option<&Track> {
        self.tracks.iter().find(|t| &t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn album_with_tracks(tracks: Vec<Track>) -> Album {
        Album {
            id: AlbumId::generate(),
            title: "Test Album".to_string(),
            artist: "Test Artist".to_string(),
            album_artist: None,
            artwork: None,
            tracks,
            animation: None,
            analyzing: false,
            dominant_color: None,
        }
    }

    #[test]
    fn mastering_certified_when_any_track_is() {
        let mut a = Track::new("A", PathBuf::from("/a.m4a"));
        let mut b = Track::new("B", PathBuf::from("/b.m4a"));
        b.mastering_certified = true;

        let album = album_with_tracks(vec![a.clone(), b]);
        assert!(album.mastering_certified());

        a.mastering_certified = false;
        let album = album_with_tracks(vec![a]);
        assert!(!album.mastering_certified());
    }

    #[test]
    fn duration_sums_known_tracks() {
        let mut a = Track::new("A", PathBuf::from("/a.mp3"));
        a.duration_secs = Some(120.0);
        let b = Track::new("B", PathBuf::from("/b.mp3"));

        let album = album_with_tracks(vec![a, b]);
        assert_eq!(album.duration_secs(), 120.0);
    }
}
