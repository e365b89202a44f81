//! Playback queue
//!
//! An ordered sequence of slots with a current-index pointer. Shuffle keeps
//! a pre-shuffle baseline so toggling it off is a lossless restore. The
//! current index is never assumed stable across mutations; it is recomputed
//! by locating the loaded slot.

use crate::shuffle::{shuffle_items, shuffle_tail};
use crate::types::QueueItem;
use aria_core::types::{SlotId, Track, TrackId};

/// Effect of removing a slot, from the engine's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemoveOutcome {
    /// The removed slot was the current one; whatever now occupies the
    /// (clamped) index needs loading, or playback stops if the queue emptied
    Current,

    /// Some other slot was removed; the current index was adjusted
    Other,
}

/// The playback queue
#[derive(Debug, Clone, Default)]
pub struct PlayQueue {
    items: Vec<QueueItem>,

    /// Index of the currently loaded slot; `None` when nothing is loaded
    current: Option<usize>,

    /// Pre-shuffle order, kept for lossless restore
    baseline: Vec<QueueItem>,

    shuffled: bool,

    /// Set when the queue mirrors an album's track order
    album_locked: bool,
}

impl PlayQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with an album's tracks
    ///
    /// Wraps each track in a fresh slot, snapshots the order as the restore
    /// baseline, clears shuffle, and points the current index at `start`
    /// (or 0).
    pub fn load(&mut self, tracks: &[Track], start: Option<&TrackId>) {
        self.items = tracks.iter().cloned().map(QueueItem::new).collect();
        self.baseline = self.items.clone();
        self.shuffled = false;
        self.album_locked = true;
        self.current = if self.items.is_empty() {
            None
        } else {
            let start_index = start
                .and_then(|id| self.items.iter().position(|i| &i.track.id == id))
                .unwrap_or(0);
            Some(start_index)
        };
    }

    /// All queue items in play order
    pub fn items(&self) -> &[QueueItem] {
        &self.items
    }

    /// Number of slots in the queue
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Current index, when a slot is loaded
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The currently loaded item
    pub fn current_item(&self) -> Option<&QueueItem> {
        self.current.and_then(|i| self.items.get(i))
    }

    /// Drop the current pointer (decode failure, queue emptied)
    pub(crate) fn clear_current(&mut self) {
        self.current = None;
    }

    /// Position of a slot in the queue
    pub fn slot_index(&self, slot: &SlotId) -> Option<usize> {
        self.items.iter().position(|i| &i.slot == slot)
    }

    /// Whether a successor slot exists
    pub fn has_successor(&self) -> bool {
        self.current.is_some_and(|i| i + 1 < self.items.len())
    }

    /// Whether a predecessor slot exists
    pub fn has_predecessor(&self) -> bool {
        self.current.is_some_and(|i| i > 0)
    }

    /// Move the current pointer to the successor; false if none exists
    pub(crate) fn step_next(&mut self) -> bool {
        if self.has_successor() {
            self.current = self.current.map(|i| i + 1);
            true
        } else {
            false
        }
    }

    /// Move the current pointer to the predecessor; false if none exists
    pub(crate) fn step_previous(&mut self) -> bool {
        if self.has_predecessor() {
            self.current = self.current.map(|i| i - 1);
            true
        } else {
            false
        }
    }

    /// Point the current pointer at an index; false when out of range
    pub(crate) fn set_current(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Wrap the current pointer to the first slot
    pub(crate) fn wrap_to_start(&mut self) {
        if !self.items.is_empty() {
            self.current = Some(0);
        }
    }

    /// Whether shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.shuffled
    }

    /// Whether the queue still mirrors the loaded album's order
    pub fn is_album_locked(&self) -> bool {
        self.album_locked
    }

    /// Turn shuffle on
    ///
    /// Snapshots the order as the restore baseline. A loaded track stays
    /// pinned at position 0 with the remainder permuted; with nothing loaded
    /// the whole queue is permuted. The current index resets to 0.
    pub(crate) fn shuffle_on(&mut self) {
        if self.shuffled {
            return;
        }
        self.baseline = self.items.clone();

        if let Some(cur) = self.current {
            let item = self.items.remove(cur);
            self.items.insert(0, item);
            shuffle_tail(&mut self.items);
        } else {
            shuffle_items(&mut self.items);
        }

        self.current = if self.items.is_empty() { None } else { Some(0) };
        self.shuffled = true;
        self.album_locked = false;
    }

    /// Turn shuffle off, restoring the baseline order
    ///
    /// The current index is relocated to wherever the loaded slot sits in
    /// the restored order (or 0 if nothing is loaded).
    pub(crate) fn shuffle_off(&mut self) {
        if !self.shuffled {
            return;
        }
        let loaded_slot = self.current_item().map(|i| i.slot.clone());
        self.items = self.baseline.clone();
        self.shuffled = false;

        self.current = match loaded_slot {
            Some(slot) => self.slot_index(&slot),
            None => None,
        }
        .or(if self.items.is_empty() { None } else { Some(0) });
    }

    /// Move a contiguous selection to a destination position
    ///
    /// `dest` is expressed in pre-removal coordinates, standard list-move
    /// semantics. Out-of-range arguments are a no-op. The current index is
    /// recomputed by locating the loaded slot's new position.
    pub(crate) fn move_range(&mut self, start: usize, count: usize, dest: usize) {
        if count == 0 || start + count > self.items.len() || dest > self.items.len() {
            return;
        }

        let loaded_slot = self.current_item().map(|i| i.slot.clone());

        let moved: Vec<QueueItem> = self.items.drain(start..start + count).collect();
        let insert_at = if dest <= start {
            dest
        } else if dest >= start + count {
            dest - count
        } else {
            // Destination inside the moved range collapses onto it
            start
        };
        for (offset, item) in moved.into_iter().enumerate() {
            self.items.insert(insert_at + offset, item);
        }

        if let Some(slot) = loaded_slot {
            self.current = self.slot_index(&slot);
        }
        self.album_locked = false;
        self.sync_baseline_after_mutation();
    }

    /// Remove a slot by id
    ///
    /// A slot before the current index shifts it down by one. Removing the
    /// current slot clamps the index to the new tail (or clears it when the
    /// queue empties). Unknown slots are a no-op.
    pub(crate) fn remove_slot(&mut self, slot: &SlotId) -> Option<RemoveOutcome> {
        let idx = self.slot_index(slot)?;
        let removed = self.items.remove(idx);

        if self.shuffled {
            self.baseline.retain(|i| i.slot != removed.slot);
        }

        let outcome = match self.current {
            Some(cur) if idx < cur => {
                self.current = Some(cur - 1);
                RemoveOutcome::Other
            }
            Some(cur) if idx == cur => {
                self.current = if self.items.is_empty() {
                    None
                } else {
                    Some(cur.min(self.items.len() - 1))
                };
                RemoveOutcome::Current
            }
            _ => RemoveOutcome::Other,
        };

        self.album_locked = false;
        self.sync_baseline_after_mutation();
        Some(outcome)
    }

    /// Insert a track immediately after the current slot
    ///
    /// Appends when nothing is loaded or the current slot is last.
    pub(crate) fn insert_next(&mut self, track: Track) -> SlotId {
        let item = QueueItem::new(track);
        let slot = item.slot.clone();

        let pos = self
            .current
            .map(|c| (c + 1).min(self.items.len()))
            .unwrap_or(self.items.len());
        self.items.insert(pos, item.clone());

        if self.shuffled {
            self.baseline.push(item);
        }
        self.album_locked = false;
        self.sync_baseline_after_mutation();
        slot
    }

    /// Append a track at the tail
    pub(crate) fn append(&mut self, track: Track) -> SlotId {
        let item = QueueItem::new(track);
        let slot = item.slot.clone();
        self.items.push(item.clone());

        if self.shuffled {
            self.baseline.push(item);
        }
        self.album_locked = false;
        self.sync_baseline_after_mutation();
        slot
    }

    /// Empty the queue and the restore baseline
    pub(crate) fn clear(&mut self) {
        self.items.clear();
        self.baseline.clear();
        self.current = None;
        self.shuffled = false;
        self.album_locked = false;
    }

    /// While not shuffled the baseline mirrors the live order
    fn sync_baseline_after_mutation(&mut self) {
        if !self.shuffled {
            self.baseline = self.items.clone();
        }
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

    fn titles(queue: &PlayQueue) -> Vec<String> {
        queue.items().iter().map(|i| i.track.title.clone()).collect()
    }

    #[test]
    fn load_sets_current_to_start_track() {
        let tracks = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[1].id));

        assert_eq!(queue.current_index(), Some(1));
        assert!(queue.is_album_locked());
        assert!(!queue.is_shuffled());
    }

    #[test]
    fn load_defaults_to_first_track() {
        let tracks = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, None);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn slot_ids_are_unique_within_queue() {
        let mut one = tracks(1);
        one.push(one[0].clone()); // same track twice
        let mut queue = PlayQueue::new();
        queue.load(&one, None);

        assert_ne!(queue.items()[0].slot, queue.items()[1].slot);
        assert_eq!(queue.items()[0].track.id, queue.items()[1].track.id);
    }

    #[test]
    fn shuffle_round_trip_restores_order_and_current() {
        let tracks = tracks(12);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[5].id));
        let original = titles(&queue);
        let loaded = queue.current_item().unwrap().track.id.clone();

        queue.shuffle_on();
        assert!(queue.is_shuffled());
        assert_eq!(queue.current_index(), Some(0));
        assert_eq!(queue.current_item().unwrap().track.id, loaded);

        queue.shuffle_off();
        assert_eq!(titles(&queue), original);
        assert_eq!(queue.current_index(), Some(5));
        assert_eq!(queue.current_item().unwrap().track.id, loaded);
    }

    #[test]
    fn shuffle_with_nothing_loaded_resets_index_to_zero() {
        let mut queue = PlayQueue::new();
        for t in tracks(4) {
            queue.append(t);
        }
        assert_eq!(queue.current_index(), None);

        queue.shuffle_on();
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn move_single_item_recomputes_current() {
        // queue=[a,b,c], current=b; move index 0 to position 2 -> [b,a,c]
        let tracks = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[1].id));

        queue.move_range(0, 1, 2);

        assert_eq!(titles(&queue), vec!["t1", "t0", "t2"]);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn move_contiguous_selection_backward() {
        let tracks = tracks(5);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[4].id));

        // Move [t2,t3] to the front
        queue.move_range(2, 2, 0);

        assert_eq!(titles(&queue), vec!["t2", "t3", "t0", "t1", "t4"]);
        assert_eq!(queue.current_index(), Some(4));
    }

    #[test]
    fn move_out_of_range_is_a_noop() {
        let tracks = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, None);

        queue.move_range(2, 5, 0);
        assert_eq!(titles(&queue), vec!["t0", "t1", "t2"]);
    }

    #[test]
    fn remove_before_current_decrements_index() {
        let tracks = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[2].id));

        let slot = queue.items()[0].slot.clone();
        let outcome = queue.remove_slot(&slot).unwrap();

        assert_eq!(outcome, RemoveOutcome::Other);
        assert_eq!(queue.current_index(), Some(1));
        assert_eq!(queue.current_item().unwrap().track.title, "t2");
    }

    #[test]
    fn remove_current_clamps_to_tail() {
        let tracks = tracks(2);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, Some(&tracks[1].id));

        let slot = queue.items()[1].slot.clone();
        let outcome = queue.remove_slot(&slot).unwrap();

        assert_eq!(outcome, RemoveOutcome::Current);
        assert_eq!(queue.current_index(), Some(0));
    }

    #[test]
    fn remove_last_item_clears_current() {
        let tracks = tracks(1);
        let mut queue = PlayQueue::new();
        queue.load(&tracks, None);

        let slot = queue.items()[0].slot.clone();
        let outcome = queue.remove_slot(&slot).unwrap();

        assert_eq!(outcome, RemoveOutcome::Current);
        assert_eq!(queue.current_index(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn insert_next_lands_after_current() {
        let ts = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&ts, Some(&ts[1].id));

        queue.insert_next(Track::new("next", PathBuf::from("/next.mp3")));

        assert_eq!(titles(&queue), vec!["t0", "t1", "next", "t2"]);
        assert_eq!(queue.current_index(), Some(1));
    }

    #[test]
    fn insert_next_appends_when_current_is_last() {
        let ts = tracks(2);
        let mut queue = PlayQueue::new();
        queue.load(&ts, Some(&ts[1].id));

        queue.insert_next(Track::new("next", PathBuf::from("/next.mp3")));
        assert_eq!(titles(&queue), vec!["t0", "t1", "next"]);
    }

    #[test]
    fn removing_inserted_item_survives_shuffle_restore() {
        let ts = tracks(4);
        let mut queue = PlayQueue::new();
        queue.load(&ts, None);
        queue.shuffle_on();

        let slot = queue.insert_next(Track::new("next", PathBuf::from("/next.mp3")));
        queue.remove_slot(&slot);
        queue.shuffle_off();

        // The transient item is gone from the restored order too
        assert_eq!(queue.len(), 4);
        assert!(titles(&queue).iter().all(|t| t != "next"));
    }

    #[test]
    fn clear_empties_everything() {
        let ts = tracks(3);
        let mut queue = PlayQueue::new();
        queue.load(&ts, None);
        queue.shuffle_on();

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.current_index(), None);
        assert!(!queue.is_shuffled());
    }
}
