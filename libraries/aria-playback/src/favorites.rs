//! Favorites store
//!
//! An ordered set of track ids. Order is user-significant and independent
//! of any queue or album order; reordering uses the same list-move semantics
//! as the queue. Linear lookup is fine at library scale.

use aria_core::types::TrackId;

/// Ordered favorites, no duplicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FavoritesStore {
    ids: Vec<TrackId>,
}

impl FavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Favorited ids in user order
    pub fn ids(&self) -> &[TrackId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Membership test
    pub fn contains(&self, id: &TrackId) -> bool {
        self.ids.contains(id)
    }

    /// Add at the tail if absent, remove if present; returns the new
    /// membership state
    pub fn toggle(&mut self, id: &TrackId) -> bool {
        if let Some(pos) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(id.clone());
            true
        }
    }

    /// Move a contiguous selection to a destination position
    ///
    /// `dest` uses pre-removal coordinates, matching queue reorder. Out of
    /// range arguments are a no-op.
    pub fn move_range(&mut self, start: usize, count: usize, dest: usize) {
        if count == 0 || start + count > self.ids.len() || dest > self.ids.len() {
            return;
        }
        let moved: Vec<TrackId> = self.ids.drain(start..start + count).collect();
        let insert_at = if dest <= start {
            dest
        } else if dest >= start + count {
            dest - count
        } else {
            start
        };
        for (offset, id) in moved.into_iter().enumerate() {
            self.ids.insert(insert_at + offset, id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<TrackId> {
        (0..n).map(|_| TrackId::generate()).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let ids = ids(3);
        let mut store = FavoritesStore::new();
        for id in &ids {
            assert!(store.toggle(id));
        }

        assert!(store.contains(&ids[1]));
        assert!(!store.toggle(&ids[1]));
        assert!(!store.contains(&ids[1]));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn double_toggle_restores_the_sequence() {
        let ids = ids(3);
        let mut store = FavoritesStore::new();
        for id in &ids {
            store.toggle(id);
        }
        let before = store.clone();

        // Toggling the tail entry twice lands it back where it was
        store.toggle(&ids[2]);
        store.toggle(&ids[2]);

        assert_eq!(store, before);
    }

    #[test]
    fn re_added_favorite_lands_at_the_tail() {
        let ids = ids(3);
        let mut store = FavoritesStore::new();
        for id in &ids {
            store.toggle(id);
        }

        store.toggle(&ids[0]);
        store.toggle(&ids[0]);

        assert_eq!(store.ids(), &[ids[1].clone(), ids[2].clone(), ids[0].clone()]);
    }

    #[test]
    fn move_range_reorders() {
        let ids = ids(4);
        let mut store = FavoritesStore::new();
        for id in &ids {
            store.toggle(id);
        }

        store.move_range(0, 1, 3);

        assert_eq!(
            store.ids(),
            &[ids[1].clone(), ids[2].clone(), ids[0].clone(), ids[3].clone()]
        );
    }

    #[test]
    fn move_range_out_of_bounds_is_a_noop() {
        let ids = ids(2);
        let mut store = FavoritesStore::new();
        for id in &ids {
            store.toggle(id);
        }
        let before = store.clone();

        store.move_range(1, 4, 0);
        assert_eq!(store, before);
    }
}
