//! Property-based tests for the playback queue
//!
//! Uses proptest to verify queue invariants across many random operation
//! sequences. Every property test verifies a meaningful invariant.

use proptest::prelude::*;
use vibe_core::Track;
use vibe_playback::Queue;

// ===== Helpers =====

fn arbitrary_track() -> impl Strategy<Value = Track> {
    (
        "[a-z0-9]{1,10}",  // id
        "[A-Za-z ]{1,30}", // title
        "[A-Za-z ]{1,20}", // artist
    )
        .prop_map(|(id, title, artist)| {
            Track::new(&id, format!("/music/{id}.mp3"), title, artist)
        })
}

fn arbitrary_tracks() -> impl Strategy<Value = Vec<Track>> {
    prop::collection::vec(arbitrary_track(), 0..40)
}

#[derive(Debug, Clone)]
enum QueueOp {
    Push,
    Remove(usize),
    SetIndex(usize),
    Shuffle,
    Clear,
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<QueueOp>> {
    prop::collection::vec(
        prop_oneof![
            Just(QueueOp::Push),
            (0usize..50).prop_map(QueueOp::Remove),
            (0usize..50).prop_map(QueueOp::SetIndex),
            Just(QueueOp::Shuffle),
            Just(QueueOp::Clear),
        ],
        1..30,
    )
}

// ===== Property Tests =====

proptest! {
    /// The index is in bounds whenever the queue is non-empty, and `None`
    /// whenever it is empty, across arbitrary operation sequences.
    #[test]
    fn index_always_consistent(tracks in arbitrary_tracks(), ops in arbitrary_ops()) {
        let mut queue = Queue::new();
        queue.replace(tracks, 0);

        let filler = Track::new("filler", "/music/filler.mp3", "Filler", "Artist");
        for op in ops {
            match op {
                QueueOp::Push => queue.push(filler.clone()),
                QueueOp::Remove(i) => { queue.remove(i); }
                QueueOp::SetIndex(i) => queue.set_index(i),
                QueueOp::Shuffle => queue.shuffle_keeping_current(),
                QueueOp::Clear => queue.clear(),
            }

            match queue.index() {
                Some(i) => {
                    prop_assert!(!queue.is_empty());
                    prop_assert!(i < queue.len(), "index {} out of bounds {}", i, queue.len());
                    prop_assert!(queue.current().is_some());
                }
                None => prop_assert!(queue.current().is_none()),
            }
        }
    }

    /// Shuffling never adds, drops or duplicates tracks.
    #[test]
    fn shuffle_is_a_permutation(tracks in arbitrary_tracks()) {
        let mut queue = Queue::new();
        queue.replace(tracks.clone(), 0);

        let mut before: Vec<String> = tracks.iter().map(|t| t.id.clone()).collect();
        queue.shuffle_keeping_current();
        let mut after: Vec<String> = queue.tracks().iter().map(|t| t.id.clone()).collect();

        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    /// Removing a track only ever shrinks the queue by exactly one, and
    /// out-of-range removals change nothing.
    #[test]
    fn remove_shrinks_by_one(tracks in arbitrary_tracks(), index in 0usize..50) {
        let mut queue = Queue::new();
        queue.replace(tracks.clone(), 0);

        let removed = queue.remove(index);
        if index < tracks.len() {
            prop_assert!(removed.is_some());
            prop_assert_eq!(queue.len(), tracks.len() - 1);
        } else {
            prop_assert!(removed.is_none());
            prop_assert_eq!(queue.len(), tracks.len());
        }
    }

    /// Replace always lands the index on the clamped start position.
    #[test]
    fn replace_clamps_start(tracks in arbitrary_tracks(), start in 0usize..100) {
        let mut queue = Queue::new();
        queue.replace(tracks.clone(), start);

        if tracks.is_empty() {
            prop_assert_eq!(queue.index(), None);
        } else {
            prop_assert_eq!(queue.index(), Some(start.min(tracks.len() - 1)));
        }
    }
}
