//! Background task results
//!
//! Long-running work (scans, waveforms, analysis) runs off the control path
//! and posts a [`TaskResult`] back over a channel. Every result carries the
//! request token it was computed for; the control path applies it only if
//! that token still matches the live target and discards it otherwise.

use aria_core::types::{AlbumId, AnimationDecision, TrackId};
use aria_metadata::{LibraryScanner, LibrarySnapshot};
use aria_waveform::{envelope_from_samples, WaveformSampler, DEFAULT_BUCKETS};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A completed background computation, tagged with its request token
#[derive(Debug)]
pub enum TaskResult {
    /// Waveform envelope for the track that requested it
    WaveformReady {
        track_id: TrackId,
        envelope: Vec<f32>,
    },

    /// Animation analysis for an album; `None` records a failed analysis
    AnimationAnalyzed {
        album_id: AlbumId,
        decision: Option<AnimationDecision>,
    },

    /// A finished library scan, tagged with the scan generation
    LibraryScanned {
        generation: u64,
        snapshot: LibrarySnapshot,
    },
}

/// Decode a track's waveform on the blocking pool
///
/// The sampler itself never fails; a crashed worker still posts a flat
/// envelope so the scrubber can render.
pub fn spawn_waveform(
    track_id: TrackId,
    path: PathBuf,
    tx: mpsc::Sender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let envelope =
            match tokio::task::spawn_blocking(move || WaveformSampler::default().envelope(&path))
                .await
            {
                Ok(envelope) => envelope,
                Err(err) => {
                    tracing::warn!(error = %err, "waveform worker failed");
                    envelope_from_samples(&[], DEFAULT_BUCKETS)
                }
            };
        let _ = tx.send(TaskResult::WaveformReady { track_id, envelope }).await;
    })
}

/// Run a library scan on the blocking pool
///
/// `generation` is the staleness token: the control path bumps it per scan
/// request and only applies the snapshot whose tag still matches.
pub fn spawn_scan(
    generation: u64,
    paths: Vec<PathBuf>,
    tx: mpsc::Sender<TaskResult>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        match tokio::task::spawn_blocking(move || LibraryScanner::new().scan_paths(&paths)).await {
            Ok(snapshot) => {
                let _ = tx
                    .send(TaskResult::LibraryScanned {
                        generation,
                        snapshot,
                    })
                    .await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "library scan worker failed");
            }
        }
    })
}
