//! Queue shuffling (Fisher-Yates)

use crate::types::QueueItem;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle the whole queue
pub(crate) fn shuffle_items(items: &mut [QueueItem]) {
    let mut rng = thread_rng();
    items.shuffle(&mut rng);
}

/// Shuffle everything after the first slot
///
/// Used when a track is loaded: it stays pinned at position 0 while the
/// remainder is permuted.
pub(crate) fn shuffle_tail(items: &mut [QueueItem]) {
    if items.len() > 2 {
        let mut rng = thread_rng();
        items[1..].shuffle(&mut rng);
    }
}
