//! Aria Playback
//!
//! Playback state machine for the Aria engine:
//! - Queue with slot identity, current-index pointer, loop modes, shuffle
//!   with lossless restore, reorder/remove/play-next mutations
//! - Favorites store with stable insertion order
//! - Playback events for UI synchronization
//!
//! The crate is platform-agnostic and runtime-free: the audio device is
//! reached through the [`AudioSink`] trait, and all state mutation is meant
//! to happen on a single control path. Background work (waveforms, scans)
//! lives elsewhere and only posts values back.
//!
//! # Example
//!
//! ```rust
//! use aria_playback::{LoopMode, QueueEngine};
//! use aria_core::Track;
//! use std::path::PathBuf;
//!
//! let mut engine = QueueEngine::new();
//! let tracks = vec![
//!     Track::new("One", PathBuf::from("/music/one.mp3")),
//!     Track::new("Two", PathBuf::from("/music/two.mp3")),
//! ];
//!
//! engine.load_album(&tracks, None);
//! engine.set_loop_mode(LoopMode::Queue);
//! engine.next();
//! assert_eq!(engine.current_track().unwrap().title, "Two");
//! ```

mod engine;
mod error;
mod events;
mod favorites;
mod queue;
mod shuffle;
mod sink;
pub mod types;

pub use engine::QueueEngine;
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use favorites::FavoritesStore;
pub use queue::PlayQueue;
pub use sink::AudioSink;
pub use types::{LoopMode, PlayState, QueueItem};
