//! Sleep timer
//!
//! Counts down to a pause, fading volume out over the final 30 seconds. The
//! timer holds no clock of its own; the platform loop polls it with the
//! current instant, applies the returned volume scale to the engine, and
//! pauses playback on expiry. Keeping the timer pure over injected instants
//! makes the fade curve and expiry directly testable.

use std::time::{Duration, Instant};

/// Window before expiry over which volume fades linearly to zero
pub const FADE_WINDOW: Duration = Duration::from_secs(30);

/// Result of polling the sleep timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SleepTick {
    /// No timer is set
    Inactive,
    /// Timer is counting down
    Running {
        /// Time left until the timer fires
        remaining: Duration,
        /// Volume multiplier to apply while fading, `None` outside the
        /// fade window
        volume_scale: Option<f32>,
    },
    /// The timer fired; playback should pause
    Expired,
}

/// Countdown timer that requests a playback pause when it ends
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepTimer {
    deadline: Option<Instant>,
}

impl SleepTimer {
    /// Create an inactive timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `duration` after `now`, replacing any
    /// running timer.
    pub fn set(&mut self, duration: Duration, now: Instant) {
        self.deadline = Some(now + duration);
    }

    /// Disarm the timer
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Whether a timer is currently armed
    pub fn is_active(&self) -> bool {
        self.deadline.is_some()
    }

    /// Advance the timer to `now`.
    ///
    /// Returns [`SleepTick::Expired`] exactly once; the timer disarms
    /// itself when it fires.
    pub fn poll(&mut self, now: Instant) -> SleepTick {
        let Some(deadline) = self.deadline else {
            return SleepTick::Inactive;
        };

        if now >= deadline {
            self.deadline = None;
            return SleepTick::Expired;
        }

        let remaining = deadline - now;
        let volume_scale = if remaining <= FADE_WINDOW {
            Some(remaining.as_secs_f32() / FADE_WINDOW.as_secs_f32())
        } else {
            None
        };

        SleepTick::Running {
            remaining,
            volume_scale,
        }
    }

    /// Time left until the timer fires, `None` when inactive or past due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline.saturating_duration_since(now)
        })
    }
}

/// Render a countdown as `h:mm:ss`, or `m:ss` under an hour.
///
/// Rounds up so the display never shows `0:00` while time remains.
pub fn format_remaining(remaining: Duration) -> String {
    let total_seconds = remaining.as_millis().div_ceil(1000);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}
