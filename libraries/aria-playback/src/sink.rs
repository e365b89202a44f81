//! Audio sink seam
//!
//! The engine owns playback state; the actual audio device sits behind this
//! trait. The engine is the only component allowed to start or stop it.

use crate::error::Result;
use std::path::Path;
use std::time::Duration;

/// Platform audio output
///
/// Implementations decode and play a single file at a time. `load` replaces
/// whatever was loaded before; position queries are cheap and may be polled.
pub trait AudioSink: Send {
    /// Open a file for playback, replacing any loaded track
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Begin or resume playback
    fn play(&mut self);

    /// Pause, keeping position
    fn pause(&mut self);

    /// Stop and release the loaded track
    fn stop(&mut self);

    /// Seek back to the start of the loaded track
    fn seek_to_start(&mut self);

    /// Elapsed time in the loaded track
    fn position(&self) -> Duration;
}
