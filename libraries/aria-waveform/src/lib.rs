//! Aria Waveform
//!
//! Reduces an audio file to a fixed-length amplitude envelope for scrubber
//! display. The public entry point never fails: undecodable input yields a
//! flat mid-level envelope of the requested length, so callers can render
//! unconditionally.
//!
//! Decoding is CPU-bound and meant to run off the playback-control path;
//! see the session crate for the background task wiring.

mod decode;
mod envelope;
mod error;

pub use envelope::{envelope_from_samples, DEFAULT_BUCKETS};
pub use error::{Result, WaveformError};

use std::path::Path;

/// Fixed-length amplitude envelope sampler
#[derive(Debug, Clone, Copy)]
pub struct WaveformSampler {
    buckets: usize,
}

impl Default for WaveformSampler {
    fn default() -> Self {
        Self {
            buckets: DEFAULT_BUCKETS,
        }
    }
}

impl WaveformSampler {
    /// Sampler producing `buckets` values per file
    pub fn new(buckets: usize) -> Self {
        Self { buckets }
    }

    /// Compute the envelope for an audio file
    ///
    /// Always returns exactly `buckets` values in `[0.05, 1.0]`. Decode
    /// failures are logged and produce a flat 0.5 envelope.
    pub fn envelope(&self, path: &Path) -> Vec<f32> {
        match self.try_envelope(path) {
            Ok(values) => values,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "waveform decode failed, using flat envelope");
                envelope::flat(self.buckets)
            }
        }
    }

    /// Compute the envelope, surfacing decode errors
    pub fn try_envelope(&self, path: &Path) -> Result<Vec<f32>> {
        let samples = decode::decode_mono(path)?;
        Ok(envelope_from_samples(&samples, self.buckets))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn undecodable_file_yields_flat_envelope() {
        let mut file = tempfile::NamedTempFile::with_suffix(".mp3").unwrap();
        file.write_all(b"this is not audio").unwrap();

        let envelope = WaveformSampler::default().envelope(file.path());

        assert_eq!(envelope.len(), DEFAULT_BUCKETS);
        assert!(envelope.iter().all(|&v| (v - 0.5).abs() < f32::EPSILON));
    }

    #[test]
    fn missing_file_yields_flat_envelope() {
        let envelope = WaveformSampler::new(30).envelope(Path::new("/nonexistent/file.flac"));
        assert_eq!(envelope.len(), 30);
        assert!(envelope.iter().all(|&v| (v - 0.5).abs() < f32::EPSILON));
    }
}
