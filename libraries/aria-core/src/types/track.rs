/// Track domain type
use crate::types::TrackId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Embedded or sidecar artwork image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artwork {
    /// Raw image bytes
    pub data: Vec<u8>,

    /// MIME type (e.g. "image/jpeg"), if known
    pub mime_type: Option<String>,
}

impl Artwork {
    /// Create new artwork data
    pub fn new(data: Vec<u8>, mime_type: Option<String>) -> Self {
        Self { data, mime_type }
    }
}

/// Content advisory tag derived from a rating tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentAdvisory {
    /// Explicit content
    Explicit,

    /// Clean edit
    Clean,
}

/// Coarse audio-quality classification derived from format and bitrate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityTier {
    /// Lossless formats (ALAC, FLAC) regardless of bitrate
    Lossless,

    /// Lossy, >= 320 kbps
    High,

    /// Lossy, >= 192 kbps
    Medium,

    /// Lossy, below 192 kbps
    Low,

    /// Neither format nor bitrate known
    Unknown,
}

/// One normalized audio-file record
///
/// Built once per file during a library scan. Identity and file location never
/// change after construction; corrections happen by replacing the whole record
/// on the next scan, never by in-place mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album artist, when explicitly tagged
    pub album_artist: Option<String>,

    /// Album name
    pub album: String,

    /// Embedded or sidecar artwork
    pub artwork: Option<Artwork>,

    /// Track number in album
    pub track_number: Option<u32>,

    /// Disc number
    pub disc_number: Option<u32>,

    /// Content advisory tag
    pub advisory: Option<ContentAdvisory>,

    /// Whether this is a mastering-certified release
    pub mastering_certified: bool,

    /// Container format name (e.g. "MP3", "ALAC")
    pub format: Option<String>,

    /// Codec name
    pub codec: Option<String>,

    /// Bitrate in kbps
    pub bitrate_kbps: Option<u32>,

    /// Sample rate in Hz
    pub sample_rate: Option<u32>,

    /// Bit depth
    pub bit_depth: Option<u8>,

    /// Channel count
    pub channels: Option<u8>,

    /// File size in bytes
    pub file_size: Option<u64>,

    /// Duration in seconds
    pub duration_secs: Option<f64>,

    /// Source file location
    pub file_path: PathBuf,

    /// When the track was added to the library
    pub added_at: DateTime<Utc>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(title: impl Into<String>, file_path: PathBuf) -> Self {
        Self {
            id: TrackId::generate(),
            title: title.into(),
            artist: "Unknown Artist".to_string(),
            album_artist: None,
            album: "Unknown Album".to_string(),
            artwork: None,
            track_number: None,
            disc_number: None,
            advisory: None,
            mastering_certified: false,
            format: None,
            codec: None,
            bitrate_kbps: None,
            sample_rate: None,
            bit_depth: None,
            channels: None,
            file_size: None,
            duration_secs: None,
            file_path,
            added_at: Utc::now(),
        }
    }

    /// Get the track duration as a `Duration`
    pub fn duration(&self) -> Option<Duration> {
        self.duration_secs.map(Duration::from_secs_f64)
    }

    /// Derive the quality tier from format and bitrate
    ///
    /// Lossless formats win regardless of bitrate. Lossy tiers are cut at
    /// 320 and 192 kbps. With neither format nor bitrate known the tier is
    /// `Unknown`.
    pub fn quality_tier(&self) -> QualityTier {
        if let Some(format) = &self.format {
            if format == "ALAC" || format == "FLAC" {
                return QualityTier::Lossless;
            }
        }

        match self.bitrate_kbps {
            Some(kbps) if kbps >= 320 => QualityTier::High,
            Some(kbps) if kbps >= 192 => QualityTier::Medium,
            Some(_) => QualityTier::Low,
            None if self.format.is_some() => QualityTier::Low,
            None => QualityTier::Unknown,
        }
    }
}
