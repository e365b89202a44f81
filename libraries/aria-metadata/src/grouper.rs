//! Album grouping
//!
//! Groups a flat track collection into albums, one per distinct album name
//! (case-sensitive), resolving the display artist and member ordering.

use aria_core::types::{Album, AlbumId, Track};
use std::collections::HashMap;

/// Artist literal used by the extractor when no artist tag exists.
/// Treated as "no artist" during resolution.
const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Display artist when no member track carries any artist at all
const VARIOUS_ARTISTS: &str = "Various Artists";

/// Group tracks into albums
///
/// One album per distinct album name. Members are sorted by
/// (disc-or-1, track-or-0); the album list is sorted by title, ordinal
/// ascending. Representative artwork and dominant color come from the first
/// member track.
pub fn group_albums(tracks: &[Track]) -> Vec<Album> {
    // Preserve first-seen order so artist tie-breaks are deterministic
    let mut order: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<Track>> = HashMap::new();

    for track in tracks {
        if !members.contains_key(&track.album) {
            order.push(track.album.clone());
        }
        members.entry(track.album.clone()).or_default().push(track.clone());
    }

    let mut albums: Vec<Album> = order
        .into_iter()
        .map(|title| {
            let mut tracks = members.remove(&title).unwrap_or_default();
            tracks.sort_by_key(|t| (t.disc_number.unwrap_or(1), t.track_number.unwrap_or(0)));
            build_album(title, tracks)
        })
        .collect();

    albums.sort_by(|a, b| a.title.cmp(&b.title));
    albums
}

fn build_album(title: String, tracks: Vec<Track>) -> Album {
    let (artist, album_artist) = resolve_artist(&tracks);
    let artwork = tracks.first().and_then(|t| t.artwork.clone());
    let dominant_color = artwork
        .as_ref()
        .and_then(|a| aria_artwork::dominant_color(&a.data));

    Album {
        id: AlbumId::generate(),
        title,
        artist,
        album_artist,
        artwork,
        tracks,
        animation: None,
        analyzing: false,
        dominant_color,
    }
}

/// Resolve the album's display artist
///
/// Order: single distinct explicit album-artist; else single distinct track
/// artist; else the most frequent track artist (ties broken by first
/// occurrence); else "Various Artists". The extractor's "Unknown Artist"
/// literal counts as no artist here.
fn resolve_artist(tracks: &[Track]) -> (String, Option<String>) {
    let album_artists = distinct(tracks.iter().filter_map(|t| t.album_artist.as_deref()));
    if album_artists.len() == 1 {
        let artist = album_artists[0].to_string();
        return (artist.clone(), Some(artist));
    }

    let track_artists = distinct(
        tracks
            .iter()
            .map(|t| t.artist.as_str())
            .filter(|a| *a != UNKNOWN_ARTIST),
    );

    match track_artists.len() {
        0 => (VARIOUS_ARTISTS.to_string(), None),
        1 => (track_artists[0].to_string(), None),
        _ => (most_frequent_artist(tracks).to_string(), None),
    }
}

/// Distinct values preserving first-occurrence order
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

/// Most frequent track artist; ties go to the earliest first occurrence
fn most_frequent_artist(tracks: &[Track]) -> &str {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for track in tracks {
        if track.artist != UNKNOWN_ARTIST {
            *counts.entry(track.artist.as_str()).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for track in tracks {
        let artist = track.artist.as_str();
        if artist == UNKNOWN_ARTIST {
            continue;
        }
        let count = counts[artist];
        // Strictly greater keeps the first-seen artist on ties
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((artist, count));
        }
    }

    best.map_or(VARIOUS_ARTISTS, |(artist, _)| artist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn track(title: &str, album: &str, artist: &str) -> Track {
        let mut t = Track::new(title, PathBuf::from(format!("/music/{title}.mp3")));
        t.album = album.to_string();
        t.artist = artist.to_string();
        t
    }

    #[test]
    fn one_album_per_distinct_name() {
        let tracks = vec![
            track("a", "Foo", "X"),
            track("b", "Bar", "X"),
            track("c", "Foo", "X"),
        ];

        let albums = group_albums(&tracks);
        assert_eq!(albums.len(), 2);
        // Sorted by title, ordinal
        assert_eq!(albums[0].title, "Bar");
        assert_eq!(albums[1].title, "Foo");
        assert_eq!(albums[1].tracks.len(), 2);
    }

    #[test]
    fn album_names_are_case_sensitive() {
        let tracks = vec![track("a", "foo", "X"), track("b", "Foo", "X")];
        assert_eq!(group_albums(&tracks).len(), 2);
    }

    #[test]
    fn members_sorted_by_disc_then_track() {
        let mut a = track("a", "Foo", "X");
        a.disc_number = Some(2);
        a.track_number = Some(1);
        let mut b = track("b", "Foo", "X");
        b.disc_number = Some(1);
        b.track_number = Some(2);
        let mut c = track("c", "Foo", "X");
        c.track_number = Some(1); // no disc -> treated as disc 1

        let albums = group_albums(&[a, b, c]);
        let titles: Vec<&str> = albums[0].tracks.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn explicit_album_artist_wins() {
        let mut a = track("a", "Foo", "Y");
        a.album_artist = Some("X".to_string());
        let mut b = track("b", "Foo", "Z");
        b.album_artist = Some("X".to_string());

        let albums = group_albums(&[a, b]);
        assert_eq!(albums[0].artist, "X");
        assert_eq!(albums[0].album_artist.as_deref(), Some("X"));
    }

    #[test]
    fn conflicting_album_artists_fall_through() {
        let mut a = track("a", "Foo", "Y");
        a.album_artist = Some("X1".to_string());
        let mut b = track("b", "Foo", "Y");
        b.album_artist = Some("X2".to_string());

        let albums = group_albums(&[a, b]);
        // Two distinct album-artists, one distinct track artist
        assert_eq!(albums[0].artist, "Y");
        assert_eq!(albums[0].album_artist, None);
    }

    #[test]
    fn most_frequent_track_artist_wins() {
        let tracks = vec![
            track("a", "Foo", "Y"),
            track("b", "Foo", "Y"),
            track("c", "Foo", "Z"),
        ];

        let albums = group_albums(&tracks);
        assert_eq!(albums[0].artist, "Y");
    }

    #[test]
    fn frequency_tie_breaks_by_first_occurrence() {
        let tracks = vec![
            track("a", "Foo", "Z"),
            track("b", "Foo", "Y"),
            track("c", "Foo", "Y"),
            track("d", "Foo", "Z"),
        ];

        let albums = group_albums(&tracks);
        assert_eq!(albums[0].artist, "Z");
    }

    #[test]
    fn no_artists_at_all_resolves_various() {
        let tracks = vec![
            track("a", "Foo", "Unknown Artist"),
            track("b", "Foo", "Unknown Artist"),
        ];

        let albums = group_albums(&tracks);
        assert_eq!(albums[0].artist, "Various Artists");
    }
}
