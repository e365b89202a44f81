//! Playback events
//!
//! Discrete notifications posted by the engine and drained by the control
//! path. The engine never calls back into the UI; it queues events and the
//! owner picks them up after each operation.

use crate::types::PlayState;
use aria_core::types::{SlotId, TrackId};
use serde::{Deserialize, Serialize};

/// An event emitted by the queue engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// Play state changed (playing, paused, stopped)
    StateChanged { state: PlayState },

    /// A different slot was loaded into the sink
    TrackChanged { track_id: TrackId, slot: SlotId },

    /// The queue contents changed (load, reorder, insert, remove, clear)
    QueueChanged { length: usize },

    /// The sink failed to load or decode a track
    PlaybackError { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_style_tag() {
        let event = PlaybackEvent::StateChanged {
            state: PlayState::Playing,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"state_changed\""));
        assert!(json.contains("\"state\":\"Playing\""));
    }
}
