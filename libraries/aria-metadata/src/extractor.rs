//! Best-effort tag extraction
//!
//! Resolves heterogeneous embedded metadata into a normalized [`Track`].
//! Every field has a documented fallback chain; a failure in any single
//! field leaves that field absent and never aborts the extraction.

use aria_core::types::{ContentAdvisory, Track};
use lofty::{AudioFile, FileType, ItemValue, TaggedFileExt};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Disc-number heuristic over the file path: "CD2", "Disc 1", "part-3", ...
fn disc_path_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(?:cd|disc|part|vol)[\s._-]*(\d+)").expect("valid disc pattern")
    })
}

/// Raw tag values gathered before resolution
///
/// Split out from resolution so the fallback rules are testable without
/// tagged fixture files.
#[derive(Debug, Default)]
pub(crate) struct RawTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    /// Track number as tagged text ("7" or "7/12")
    pub track_text: Option<String>,
    /// Binary track atom payload (bytes 2-3: big-endian track index)
    pub track_atom: Option<Vec<u8>>,
    /// Disc number as tagged text ("1" or "1/2")
    pub disc_text: Option<String>,
    /// Binary disc atom payload (byte 3: disc index)
    pub disc_atom: Option<Vec<u8>>,
    /// Content rating value (1/4 = explicit, anything else present = clean)
    pub rating: Option<u32>,
    /// Store format-flavor tag ("2" or "2:...") marks certified masters
    pub flavor: Option<String>,
    pub has_apple_id: bool,
    pub has_catalog_id: bool,
    pub has_owner: bool,
}

/// Metadata extractor producing normalized tracks
///
/// Total over its input: `extract` always returns a track, defaulting every
/// field it cannot read.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }

    /// Extract a normalized track from an audio file
    ///
    /// Never fails: unreadable files yield a track named after the file stem
    /// with all optional fields absent.
    pub fn extract(&self, path: &Path) -> Track {
        let mut track = Track::new(file_stem(path), path.to_path_buf());
        track.file_size = std::fs::metadata(path).ok().map(|m| m.len());

        let tagged_file = match lofty::read_from_path(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "tag read failed, using fallbacks");
                track.artwork = aria_artwork::folder_artwork(path);
                track.disc_number = disc_from_path(path);
                return track;
            }
        };

        // Stream properties first; tag values may override nothing here
        let props = tagged_file.properties();
        let duration = props.duration().as_secs_f64();
        track.duration_secs = (duration > 0.0).then_some(duration);
        track.sample_rate = props.sample_rate();
        track.bit_depth = props.bit_depth();
        track.channels = props.channels();

        let (format, codec) = map_format(tagged_file.file_type(), props.bit_depth());
        track.format = Some(format);
        track.codec = Some(codec);

        track.bitrate_kbps = props
            .audio_bitrate()
            .filter(|&kbps| kbps > 0)
            .or_else(|| computed_bitrate(track.file_size, track.duration_secs));

        let raw = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .map(collect_tags)
            .unwrap_or_default();

        apply_tags(&mut track, &raw, path);

        // Artwork chain: embedded pictures, cover-marker items, folder images
        track.artwork = aria_artwork::find_artwork(path);

        track
    }
}

impl Default for MetadataExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Gather raw values from a tag without resolving them
fn collect_tags(tag: &lofty::Tag) -> RawTags {
    let mut raw = RawTags::default();

    for item in tag.items() {
        match item.key() {
            lofty::ItemKey::TrackTitle => {
                raw.title = item.value().text().map(str::to_string);
            }
            lofty::ItemKey::TrackArtist => {
                raw.artist = item.value().text().map(str::to_string);
            }
            lofty::ItemKey::AlbumTitle => {
                raw.album = item.value().text().map(str::to_string);
            }
            lofty::ItemKey::AlbumArtist => {
                raw.album_artist = item.value().text().map(str::to_string);
            }
            lofty::ItemKey::TrackNumber => match item.value() {
                ItemValue::Binary(data) => raw.track_atom = Some(data.clone()),
                other => raw.track_text = other.text().map(str::to_string),
            },
            lofty::ItemKey::TrackTotal | lofty::ItemKey::DiscTotal => {}
            lofty::ItemKey::DiscNumber => match item.value() {
                ItemValue::Binary(data) => raw.disc_atom = Some(data.clone()),
                other => raw.disc_text = other.text().map(str::to_string),
            },
            lofty::ItemKey::ParentalAdvisory => {
                raw.rating = rating_value(item.value());
            }
            lofty::ItemKey::Unknown(key) => collect_unknown(&mut raw, key.as_str(), item.value()),
            _ => {}
        }
    }

    raw
}

/// Vendor-specific atoms arrive as unknown keys; match them by marker
fn collect_unknown(raw: &mut RawTags, key: &str, value: &ItemValue) {
    let key = key.to_ascii_lowercase();

    if key.contains("trkn") && raw.track_atom.is_none() {
        if let ItemValue::Binary(data) = value {
            raw.track_atom = Some(data.clone());
        }
    } else if (key.contains("disk") || key.contains("disc")) && raw.disc_atom.is_none() {
        match value {
            ItemValue::Binary(data) => raw.disc_atom = Some(data.clone()),
            other => {
                if raw.disc_text.is_none() {
                    raw.disc_text = other.text().map(str::to_string);
                }
            }
        }
    } else if key.contains("rtng") || key.contains("advisory") || key.contains("rating") {
        if raw.rating.is_none() {
            raw.rating = rating_value(value);
        }
    } else if key.contains("flvr") {
        raw.flavor = value.text().map(str::to_string);
    } else if key.contains("apid") {
        raw.has_apple_id = true;
    } else if key.contains("cnid") || key.contains("catalog") {
        raw.has_catalog_id = true;
    } else if key.contains("ownr") || key.contains("owner") {
        raw.has_owner = true;
    }
}

/// Resolve raw tag values onto the track per the fallback chains
fn apply_tags(track: &mut Track, raw: &RawTags, path: &Path) {
    if let Some(title) = &raw.title {
        track.title = title.clone();
    }
    if let Some(artist) = &raw.artist {
        track.artist = artist.clone();
    }
    if let Some(album) = &raw.album {
        track.album = album.clone();
    }
    track.album_artist = raw.album_artist.clone();

    track.track_number = raw
        .track_text
        .as_deref()
        .and_then(parse_number_pair)
        .or_else(|| raw.track_atom.as_deref().and_then(track_from_atom));

    track.disc_number = raw
        .disc_text
        .as_deref()
        .and_then(parse_number_pair)
        .or_else(|| raw.disc_atom.as_deref().and_then(disc_from_atom))
        .or_else(|| disc_from_path(path));

    track.advisory = raw.rating.map(|r| match r {
        1 | 4 => ContentAdvisory::Explicit,
        _ => ContentAdvisory::Clean,
    });

    track.mastering_certified = is_certified_flavor(raw.flavor.as_deref())
        || (raw.has_apple_id && raw.has_catalog_id)
        || raw.has_owner;
}

/// Parse "N" or "N/M" track/disc text, taking N
pub(crate) fn parse_number_pair(text: &str) -> Option<u32> {
    text.split('/').next()?.trim().parse().ok()
}

/// Track index from a binary track atom: bytes 2-3 as big-endian u16
pub(crate) fn track_from_atom(data: &[u8]) -> Option<u32> {
    if data.len() < 4 {
        return None;
    }
    let n = u16::from_be_bytes([data[2], data[3]]);
    (n != 0).then_some(u32::from(n))
}

/// Disc index from a binary disc atom: byte 3 of a >= 6 byte payload
pub(crate) fn disc_from_atom(data: &[u8]) -> Option<u32> {
    if data.len() < 6 {
        return None;
    }
    (data[3] != 0).then_some(u32::from(data[3]))
}

/// Disc index guessed from the file path ("CD2", "Disc 1", ...)
pub(crate) fn disc_from_path(path: &Path) -> Option<u32> {
    let text = path.to_string_lossy();
    let captures = disc_path_pattern().captures(&text)?;
    captures.get(1)?.as_str().parse().ok()
}

fn rating_value(value: &ItemValue) -> Option<u32> {
    match value {
        ItemValue::Binary(data) => data.first().map(|&b| u32::from(b)),
        other => other.text().and_then(|t| t.trim().parse().ok()),
    }
}

/// Flavor tag "2" (or prefix "2:") marks a certified master
fn is_certified_flavor(flavor: Option<&str>) -> bool {
    match flavor {
        Some(f) => f == "2" || f.starts_with("2:"),
        None => false,
    }
}

/// Map the decoded stream's format identifier to (format, codec) names
fn map_format(file_type: FileType, bit_depth: Option<u8>) -> (String, String) {
    let (format, codec) = match file_type {
        FileType::Mpeg => ("MP3", "MP3"),
        FileType::Flac => ("FLAC", "FLAC"),
        // MP4 containers carry either AAC or Apple Lossless; only the
        // lossless stream reports a bit depth
        FileType::Mp4 => {
            if bit_depth.is_some() {
                ("ALAC", "ALAC")
            } else {
                ("AAC", "AAC")
            }
        }
        FileType::Aac => ("AAC", "AAC"),
        FileType::Wav | FileType::Aiff => ("PCM", "PCM"),
        FileType::Opus => ("Opus", "Opus"),
        FileType::Vorbis => ("OGG", "Vorbis"),
        _ => ("Other", "Unknown"),
    };
    (format.to_string(), codec.to_string())
}

/// Bitrate fallback: file size in bits over duration, in kbps
fn computed_bitrate(file_size: Option<u64>, duration_secs: Option<f64>) -> Option<u32> {
    let size = file_size?;
    let secs = duration_secs?;
    if secs <= 0.0 {
        return None;
    }
    let kbps = (size as f64 * 8.0) / secs / 1000.0;
    (kbps > 0.0).then_some(kbps as u32)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Unknown")
        .to_string()
}
