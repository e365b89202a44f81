//! Core types for queue management

use aria_core::types::{SlotId, Track};
use serde::{Deserialize, Serialize};

/// One position in the playback queue
///
/// Pairs a queue-slot identity with the track it holds. The same track may
/// occupy several slots at once ("play next" duplicates), so reordering and
/// deletion key off the slot id, never the track id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueItem {
    /// Slot identity, unique within a queue
    pub slot: SlotId,

    /// The track occupying this slot
    pub track: Track,
}

impl QueueItem {
    /// Wrap a track in a fresh slot
    pub fn new(track: Track) -> Self {
        Self {
            slot: SlotId::generate(),
            track,
        }
    }
}

/// Loop mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoopMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Repeat the current track
    Single,

    /// Wrap around to the start of the queue
    Queue,
}

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayState {
    /// No track playing
    #[default]
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}
