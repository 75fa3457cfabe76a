//! Queue shuffling
//!
//! Fisher-Yates permutation over the whole queue. Toggling shuffle off does
//! not restore the pre-shuffle order; that is a product decision, not an
//! oversight.

use rand::seq::SliceRandom;
use rand::thread_rng;
use vibe_core::Track;

/// Randomly permute `tracks` in place
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    tracks.shuffle(&mut rng);
}
