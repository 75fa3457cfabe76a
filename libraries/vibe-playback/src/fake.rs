//! Scripted in-memory audio engine
//!
//! Stands in for the platform engine in tests and headless tools. Records
//! every command into a shared [`CallLog`] so assertions can inspect what the
//! controller asked the engine to do, and can be armed to fail the next load.

use crate::engine::AudioEngine;
use crate::error::{PlaybackError, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use vibe_core::Track;

/// One recorded engine command
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    /// `load(track, generation)`
    Load {
        /// Track id passed to load
        track_id: String,
        /// Load generation
        generation: u64,
    },
    /// `play()`
    Play,
    /// `pause()`
    Pause,
    /// `stop()`
    Stop,
    /// `seek(position_ms)`
    Seek(u64),
    /// `set_volume(volume)`
    SetVolume(f32),
    /// `set_muted(muted)`
    SetMuted(bool),
    /// `set_rate(rate)`
    SetRate(f32),
}

#[derive(Debug, Default)]
struct Shared {
    calls: Vec<EngineCall>,
    fail_next_load: Option<String>,
}

/// Shared handle over a [`FakeEngine`]'s recorded commands
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    shared: Arc<Mutex<Shared>>,
}

impl CallLog {
    /// All recorded commands, in call order
    pub fn calls(&self) -> Vec<EngineCall> {
        self.shared.lock().expect("call log poisoned").calls.clone()
    }

    /// Number of recorded commands matching `predicate`
    pub fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.calls().iter().filter(|c| predicate(c)).count()
    }

    /// The most recent command, if any
    pub fn last(&self) -> Option<EngineCall> {
        self.calls().last().cloned()
    }

    /// Discard all recorded commands
    pub fn clear(&self) {
        self.shared.lock().expect("call log poisoned").calls.clear();
    }

    /// Make the next `load` fail with `reason`
    pub fn fail_next_load(&self, reason: impl Into<String>) {
        self.shared.lock().expect("call log poisoned").fail_next_load = Some(reason.into());
    }
}

/// In-memory [`AudioEngine`] that records commands and never produces audio
#[derive(Debug, Default)]
pub struct FakeEngine {
    log: CallLog,
}

impl FakeEngine {
    /// Create a fake engine together with its call log handle
    pub fn new() -> (Self, CallLog) {
        let log = CallLog::default();
        (Self { log: log.clone() }, log.clone())
    }

    fn record(&self, call: EngineCall) {
        self.log
            .shared
            .lock()
            .expect("call log poisoned")
            .calls
            .push(call);
    }
}

#[async_trait]
impl AudioEngine for FakeEngine {
    async fn load(&mut self, track: &Track, generation: u64) -> Result<()> {
        self.record(EngineCall::Load {
            track_id: track.id.clone(),
            generation,
        });
        let armed = self
            .log
            .shared
            .lock()
            .expect("call log poisoned")
            .fail_next_load
            .take();
        match armed {
            Some(reason) => Err(PlaybackError::Load {
                track_id: track.id.clone(),
                reason,
            }),
            None => Ok(()),
        }
    }

    async fn play(&mut self) -> Result<()> {
        self.record(EngineCall::Play);
        Ok(())
    }

    async fn pause(&mut self) -> Result<()> {
        self.record(EngineCall::Pause);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.record(EngineCall::Stop);
        Ok(())
    }

    async fn seek(&mut self, position_ms: u64) -> Result<()> {
        self.record(EngineCall::Seek(position_ms));
        Ok(())
    }

    async fn set_volume(&mut self, volume: f32) -> Result<()> {
        self.record(EngineCall::SetVolume(volume));
        Ok(())
    }

    async fn set_muted(&mut self, muted: bool) -> Result<()> {
        self.record(EngineCall::SetMuted(muted));
        Ok(())
    }

    async fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.record(EngineCall::SetRate(rate));
        Ok(())
    }
}
