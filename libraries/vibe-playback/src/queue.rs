//! Playback queue
//!
//! An ordered list of tracks plus a pointer to the current one. The queue is
//! owned exclusively by the controller; every mutator preserves the invariant
//! that the index stays in bounds whenever the queue is non-empty.

use crate::shuffle;
use vibe_core::Track;

/// Ordered track list with a current-position pointer
#[derive(Debug, Clone, Default)]
pub struct Queue {
    tracks: Vec<Track>,
    /// Current position, `None` only when the queue is empty or unset
    index: Option<usize>,
}

impl Queue {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire queue, pointing at `start_index`.
    ///
    /// Out-of-range start indices are clamped into bounds. An empty track
    /// list leaves the queue empty with no current position.
    pub fn replace(&mut self, tracks: Vec<Track>, start_index: usize) {
        self.tracks = tracks;
        self.index = if self.tracks.is_empty() {
            None
        } else {
            Some(start_index.min(self.tracks.len() - 1))
        };
    }

    /// Append a track to the end of the queue
    pub fn push(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Remove the track at `index`.
    ///
    /// The current position follows the track it pointed at: removals before
    /// it shift it down, and removing the tail while current clamps it to the
    /// new last track. Returns the removed track, or `None` if out of range.
    pub fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);

        self.index = match self.index {
            None => None,
            Some(_) if self.tracks.is_empty() => None,
            Some(current) if index < current => Some(current - 1),
            Some(current) => Some(current.min(self.tracks.len() - 1)),
        };

        Some(removed)
    }

    /// Clear the queue entirely
    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = None;
    }

    /// Move the current position to `index` (clamped into bounds)
    pub fn set_index(&mut self, index: usize) {
        if self.tracks.is_empty() {
            self.index = None;
        } else {
            self.index = Some(index.min(self.tracks.len() - 1));
        }
    }

    /// Current position, if any
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Track at the current position
    pub fn current(&self) -> Option<&Track> {
        self.index.and_then(|i| self.tracks.get(i))
    }

    /// Track at `index`
    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// All tracks in queue order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Randomly permute the queue, relocating the current position so the
    /// same track (matched by id) stays current.
    pub fn shuffle_keeping_current(&mut self) {
        if self.tracks.is_empty() {
            return;
        }
        let current_id = self.current().map(|t| t.id.clone());
        shuffle::shuffle_tracks(&mut self.tracks);

        self.index = match current_id {
            Some(id) => Some(
                self.tracks
                    .iter()
                    .position(|t| t.id == id)
                    .unwrap_or(0),
            ),
            None => self.index,
        };
    }
}
