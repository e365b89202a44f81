//! Error types for waveform computation

use thiserror::Error;

/// Waveform decode errors
///
/// These stay internal to the crate's fallible path; the public sampler
/// swallows them into a flat envelope.
#[derive(Debug, Error)]
pub enum WaveformError {
    /// File could not be opened
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Container format was not recognized
    #[error("Unrecognized container: {0}")]
    Probe(String),

    /// The container holds no audio track
    #[error("No audio track found")]
    NoAudioTrack,

    /// The codec could not decode the stream
    #[error("Decode failure: {0}")]
    Decode(String),
}

/// Result type for waveform operations
pub type Result<T> = std::result::Result<T, WaveformError>;
