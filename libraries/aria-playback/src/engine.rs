//! Queue engine
//!
//! The single owner of playback state: queue contents, current index, loop
//! mode, shuffle, and the audio sink. All mutation happens through this type
//! on one control path; background work never touches it directly.

use crate::error::Result;
use crate::events::PlaybackEvent;
use crate::queue::{PlayQueue, RemoveOutcome};
use crate::sink::AudioSink;
use crate::types::{LoopMode, PlayState, QueueItem};
use aria_core::types::{SlotId, Track, TrackId};
use std::time::Duration;

/// Elapsed time past which "previous" restarts the track instead of
/// skipping back
const RESTART_THRESHOLD: Duration = Duration::from_secs(3);

/// Playback queue state machine
///
/// Operations are total: advancing an empty queue, removing an unknown slot
/// and so on are no-ops rather than errors. Sink failures clear the current
/// track and surface as a [`PlaybackEvent::PlaybackError`].
pub struct QueueEngine {
    queue: PlayQueue,
    loop_mode: LoopMode,
    state: PlayState,
    sink: Option<Box<dyn AudioSink>>,
    pending_events: Vec<PlaybackEvent>,
}

impl Default for QueueEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl QueueEngine {
    /// Create an engine without an audio sink
    ///
    /// State transitions still apply; sink calls become no-ops. Useful for
    /// tests and for driving the queue before audio is initialized.
    pub fn new() -> Self {
        Self {
            queue: PlayQueue::new(),
            loop_mode: LoopMode::Off,
            state: PlayState::Stopped,
            sink: None,
            pending_events: Vec::new(),
        }
    }

    /// Create an engine owning the given sink
    pub fn with_sink(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::new()
        }
    }

    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    pub fn items(&self) -> &[QueueItem] {
        self.queue.items()
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    pub fn is_shuffled(&self) -> bool {
        self.queue.is_shuffled()
    }

    /// The currently loaded item, if any
    pub fn current_item(&self) -> Option<&QueueItem> {
        self.queue.current_item()
    }

    /// The currently loaded track, if any
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current_item().map(|i| &i.track)
    }

    /// Elapsed time in the loaded track
    pub fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map(|s| s.position())
            .unwrap_or(Duration::ZERO)
    }

    /// Drain events queued since the last call
    pub fn take_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
    }

    /// Replace the queue with an album's tracks and start playing
    ///
    /// `start` selects the first track to load; defaults to the album's
    /// first track.
    pub fn load_album(&mut self, tracks: &[Track], start: Option<&TrackId>) {
        self.queue.load(tracks, start);
        self.push_queue_changed();
        if self.load_current() {
            self.play();
        }
    }

    /// Whether advance has somewhere to go
    pub fn can_advance(&self) -> bool {
        self.queue.has_successor() || (self.loop_mode == LoopMode::Queue && !self.queue.is_empty())
    }

    /// Whether previous will restart or skip back
    pub fn can_go_back(&self) -> bool {
        self.queue.has_predecessor() || self.position() > RESTART_THRESHOLD
    }

    /// Advance to the next track
    ///
    /// Loop-single restarts the current track. At the end of the queue,
    /// loop-queue wraps to the start; otherwise playback pauses in place.
    pub fn next(&mut self) {
        if self.queue.current_item().is_none() {
            return;
        }

        if self.loop_mode == LoopMode::Single {
            self.restart_current();
            return;
        }

        if self.queue.step_next() {
            if self.load_current() {
                self.play();
            }
        } else if self.loop_mode == LoopMode::Queue {
            self.queue.wrap_to_start();
            if self.load_current() {
                self.play();
            }
        } else {
            self.sink_pause();
            self.set_state(PlayState::Paused);
        }
    }

    /// Go to the previous track
    ///
    /// Past the restart threshold this seeks back to the start of the
    /// current track; otherwise it steps to the predecessor, or restarts
    /// when there is none.
    pub fn previous(&mut self) {
        if self.queue.current_item().is_none() {
            return;
        }

        if self.position() > RESTART_THRESHOLD {
            self.seek_to_start();
            return;
        }

        if self.queue.step_previous() {
            if self.load_current() {
                self.play();
            }
        } else {
            self.seek_to_start();
        }
    }

    /// Load and play a specific slot
    pub fn play_slot(&mut self, slot: &SlotId) {
        let Some(index) = self.queue.slot_index(slot) else {
            return;
        };
        if self.queue.set_current(index) && self.load_current() {
            self.play();
        }
    }

    /// Turn shuffle on or off
    ///
    /// On: the loaded track is pinned at position 0 and the rest permuted.
    /// Off: the pre-shuffle order is restored and the current index
    /// relocated to the loaded track. Neither direction reloads the sink.
    pub fn set_shuffle(&mut self, enabled: bool) {
        if enabled == self.queue.is_shuffled() {
            return;
        }
        if enabled {
            self.queue.shuffle_on();
        } else {
            self.queue.shuffle_off();
        }
        self.push_queue_changed();
    }

    /// Move a contiguous selection to a destination position
    ///
    /// The current index is recomputed from the loaded slot's new position;
    /// the loaded track keeps playing.
    pub fn reorder(&mut self, start: usize, count: usize, dest: usize) {
        self.queue.move_range(start, count, dest);
        self.push_queue_changed();
    }

    /// Remove a slot from the queue
    ///
    /// Removing the current slot loads whatever now occupies its (clamped)
    /// index, or stops playback when the queue empties.
    pub fn remove(&mut self, slot: &SlotId) {
        let Some(outcome) = self.queue.remove_slot(slot) else {
            return;
        };
        self.push_queue_changed();

        if outcome == RemoveOutcome::Current {
            if self.queue.is_empty() {
                self.sink_stop();
                self.set_state(PlayState::Stopped);
            } else if self.load_current() {
                self.play();
            }
        }
    }

    /// Insert a track immediately after the current slot
    pub fn play_next(&mut self, track: Track) -> SlotId {
        let slot = self.queue.insert_next(track);
        self.push_queue_changed();
        slot
    }

    /// Append a track at the tail of the queue
    pub fn append(&mut self, track: Track) -> SlotId {
        let slot = self.queue.append(track);
        self.push_queue_changed();
        slot
    }

    /// Empty the queue and stop playback
    pub fn clear(&mut self) {
        self.queue.clear();
        self.sink_stop();
        self.set_state(PlayState::Stopped);
        self.push_queue_changed();
    }

    /// Begin or resume playback of the loaded track
    pub fn play(&mut self) {
        if self.queue.current_item().is_none() {
            return;
        }
        if let Some(sink) = self.sink.as_mut() {
            sink.play();
        }
        self.set_state(PlayState::Playing);
    }

    /// Pause, keeping position
    pub fn pause(&mut self) {
        if self.state != PlayState::Playing {
            return;
        }
        self.sink_pause();
        self.set_state(PlayState::Paused);
    }

    /// Toggle between playing and paused
    pub fn toggle_play(&mut self) {
        match self.state {
            PlayState::Playing => self.pause(),
            _ => self.play(),
        }
    }

    /// Seek the loaded track back to its start
    pub fn seek_to_start(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.seek_to_start();
        }
    }

    fn restart_current(&mut self) {
        self.seek_to_start();
        self.play();
    }

    /// Load the current item into the sink
    ///
    /// A sink failure clears the current track and the playing flag and
    /// posts a playback error event. Returns whether a track is loaded.
    fn load_current(&mut self) -> bool {
        let Some((path, track_id, slot)) = self
            .queue
            .current_item()
            .map(|i| (i.track.file_path.clone(), i.track.id.clone(), i.slot.clone()))
        else {
            return false;
        };

        match self.sink_load(&path) {
            Ok(()) => {
                self.pending_events
                    .push(PlaybackEvent::TrackChanged { track_id, slot });
                true
            }
            Err(err) => {
                self.queue.clear_current();
                self.set_state(PlayState::Stopped);
                self.pending_events.push(PlaybackEvent::PlaybackError {
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn sink_load(&mut self, path: &std::path::Path) -> Result<()> {
        match self.sink.as_mut() {
            Some(sink) => sink.load(path),
            None => Ok(()),
        }
    }

    fn sink_pause(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.pause();
        }
    }

    fn sink_stop(&mut self) {
        if let Some(sink) = self.sink.as_mut() {
            sink.stop();
        }
    }

    fn set_state(&mut self, state: PlayState) {
        if self.state != state {
            self.state = state;
            self.pending_events
                .push(PlaybackEvent::StateChanged { state });
        }
    }

    fn push_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tracks(n: usize) -> Vec<Track> {
        (0..n)
            .map(|i| Track::new(format!("t{i}"), PathBuf::from(format!("/music/{i}.mp3"))))
            .collect()
    }

    #[test]
    fn load_album_starts_playing_first_track() {
        let tracks = tracks(3);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        assert_eq!(engine.state(), PlayState::Playing);
        assert_eq!(engine.current_track().unwrap().title, "t0");
    }

    #[test]
    fn advance_past_end_pauses_with_loop_off() {
        let tracks = tracks(2);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        engine.next();
        assert_eq!(engine.current_track().unwrap().title, "t1");
        assert!(!engine.can_advance());

        engine.next();
        assert_eq!(engine.current_track().unwrap().title, "t1");
        assert_eq!(engine.state(), PlayState::Paused);
    }

    #[test]
    fn advance_wraps_with_loop_queue() {
        let tracks = tracks(2);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, Some(&tracks[1].id));
        engine.set_loop_mode(LoopMode::Queue);

        assert!(engine.can_advance());
        engine.next();

        assert_eq!(engine.current_track().unwrap().title, "t0");
        assert_eq!(engine.state(), PlayState::Playing);
    }

    #[test]
    fn loop_single_stays_on_current_track() {
        let tracks = tracks(3);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, Some(&tracks[1].id));
        engine.set_loop_mode(LoopMode::Single);

        engine.next();
        assert_eq!(engine.current_track().unwrap().title, "t1");
        assert_eq!(engine.state(), PlayState::Playing);
    }

    #[test]
    fn previous_at_queue_start_is_a_restart() {
        let tracks = tracks(2);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        engine.previous();
        assert_eq!(engine.current_track().unwrap().title, "t0");
    }

    #[test]
    fn empty_queue_operations_are_noops() {
        let mut engine = QueueEngine::new();
        engine.next();
        engine.previous();
        engine.play();

        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(engine.current_track().is_none());
        assert!(!engine.can_advance());
    }

    #[test]
    fn remove_current_loads_the_replacement() {
        let tracks = tracks(3);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, Some(&tracks[1].id));

        let slot = engine.items()[1].slot.clone();
        engine.remove(&slot);

        assert_eq!(engine.current_track().unwrap().title, "t2");
        assert_eq!(engine.state(), PlayState::Playing);
    }

    #[test]
    fn removing_the_last_item_stops_playback() {
        let tracks = tracks(1);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        let slot = engine.items()[0].slot.clone();
        engine.remove(&slot);

        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(engine.current_track().is_none());
        assert!(engine.queue().is_empty());
    }

    #[test]
    fn play_next_queues_after_current_without_interrupting() {
        let ts = tracks(2);
        let mut engine = QueueEngine::new();
        engine.load_album(&ts, None);

        engine.play_next(Track::new("next", PathBuf::from("/next.mp3")));

        assert_eq!(engine.current_track().unwrap().title, "t0");
        engine.next();
        assert_eq!(engine.current_track().unwrap().title, "next");
    }

    #[test]
    fn events_report_queue_and_state_changes() {
        let tracks = tracks(2);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        let events = engine.take_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::QueueChanged { length: 2 })));
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::TrackChanged { .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            PlaybackEvent::StateChanged {
                state: PlayState::Playing
            }
        )));

        // Drained
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn shuffle_round_trip_keeps_loaded_track() {
        let tracks = tracks(8);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, Some(&tracks[3].id));
        let loaded = engine.current_track().unwrap().id.clone();

        engine.set_shuffle(true);
        assert_eq!(engine.current_track().unwrap().id, loaded);

        engine.set_shuffle(false);
        assert_eq!(engine.current_track().unwrap().id, loaded);
        assert_eq!(engine.queue().current_index(), Some(3));
    }

    #[test]
    fn clear_stops_and_empties() {
        let tracks = tracks(3);
        let mut engine = QueueEngine::new();
        engine.load_album(&tracks, None);

        engine.clear();

        assert!(engine.queue().is_empty());
        assert_eq!(engine.state(), PlayState::Stopped);
        assert!(engine.current_track().is_none());
    }
}
