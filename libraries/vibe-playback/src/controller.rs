//! Playback/queue controller
//!
//! Owns the queue, transport state, shuffle/repeat modes, playback rate and
//! A/B loop region; drives the audio engine and reports listened time to the
//! statistics layer through [`PlayReporter`].
//!
//! The controller runs on a single dispatch thread. Engine commands are
//! suspending calls that may complete out of order relative to rapid user
//! input; `play` guards against redundant loads by track identity and every
//! load is tagged with a generation so a stale status tick from a superseded
//! load is discarded instead of overwriting newer state.

use crate::engine::{AudioEngine, EngineStatus};
use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::queue::Queue;
use crate::shuffle::shuffle_tracks;
use crate::types::{
    LoopPoint, PlayerConfig, RepeatMode, MAX_RATE, MIN_RATE, PREVIOUS_RESTART_THRESHOLD_MS,
    RATE_PRESETS,
};
use vibe_core::{NullReporter, PlayReporter, Track};

/// Playback/queue controller state machine
pub struct PlayerController {
    engine: Box<dyn AudioEngine>,
    reporter: Box<dyn PlayReporter>,

    queue: Queue,
    current_track: Option<Track>,

    is_playing: bool,
    is_loading: bool,
    position_ms: u64,
    duration_ms: u64,

    volume: f32,
    is_muted: bool,
    repeat: RepeatMode,
    is_shuffled: bool,
    playback_rate: f32,

    loop_start: Option<u64>,
    loop_end: Option<u64>,

    /// Position at which listening for the current track began.
    /// Reset alongside every current-track change so listened spans are
    /// never attributed across tracks and never reported twice.
    track_start_baseline: u64,

    /// Generation of the most recent `load`; stale status ticks are dropped
    load_generation: u64,

    pending_events: Vec<PlayerEvent>,
}

impl PlayerController {
    /// Create a controller driving `engine`, with no stats reporting
    pub fn new(engine: Box<dyn AudioEngine>, config: PlayerConfig) -> Self {
        Self::with_reporter(engine, Box::new(NullReporter), config)
    }

    /// Create a controller that reports listened spans to `reporter`
    pub fn with_reporter(
        engine: Box<dyn AudioEngine>,
        reporter: Box<dyn PlayReporter>,
        config: PlayerConfig,
    ) -> Self {
        Self {
            engine,
            reporter,
            queue: Queue::new(),
            current_track: None,
            is_playing: false,
            is_loading: false,
            position_ms: 0,
            duration_ms: 0,
            volume: config.volume.clamp(0.0, 1.0),
            is_muted: false,
            repeat: config.repeat,
            is_shuffled: config.shuffled,
            playback_rate: config.playback_rate.clamp(MIN_RATE, MAX_RATE),
            loop_start: None,
            loop_end: None,
            track_start_baseline: 0,
            load_generation: 0,
            pending_events: Vec::new(),
        }
    }

    /// Push the controller's volume/mute/rate settings to the engine.
    ///
    /// Called once after construction so a restored config takes effect.
    pub async fn sync_engine(&mut self) -> Result<()> {
        self.engine.set_volume(self.volume).await?;
        self.engine.set_muted(self.is_muted).await?;
        self.engine.set_rate(self.playback_rate).await?;
        Ok(())
    }

    // ===== Transport =====

    /// Start playing `track`, or resume the current track when `None`.
    ///
    /// Loading is a single attempt: on failure the controller stays
    /// not-playing with the error surfaced to the caller, and the caller may
    /// simply call `play` again.
    pub async fn play(&mut self, track: Option<Track>) -> Result<()> {
        match track {
            Some(track) => self.play_track(track).await,
            None => {
                if self.current_track.is_some() && !self.is_loading {
                    self.engine.play().await?;
                    self.is_playing = true;
                    self.emit_state_changed();
                }
                Ok(())
            }
        }
    }

    async fn play_track(&mut self, track: Track) -> Result<()> {
        // Rapid-tap guard: ignore a repeated request for the track that is
        // already loading.
        if self.is_loading
            && self
                .current_track
                .as_ref()
                .is_some_and(|current| current.id == track.id)
        {
            return Ok(());
        }

        // Flush the span listened on the track we are leaving before the
        // current track changes.
        self.flush_listened().await;

        if self.is_playing {
            self.engine.stop().await?;
        }

        let previous_track_id = self.current_track.as_ref().map(|t| t.id.clone());
        self.current_track = Some(track.clone());
        self.duration_ms = track.duration_ms;
        self.position_ms = 0;
        self.track_start_baseline = 0;
        self.is_playing = false;
        self.is_loading = true;
        self.load_generation += 1;
        let generation = self.load_generation;
        self.emit(PlayerEvent::TrackChanged {
            track_id: track.id.clone(),
            previous_track_id,
        });
        self.emit_state_changed();

        let result = async {
            self.engine.load(&track, generation).await?;
            self.engine.play().await
        }
        .await;

        match result {
            Ok(()) => {
                self.is_playing = true;
                self.is_loading = false;
                self.emit_state_changed();
                Ok(())
            }
            Err(err) => {
                tracing::warn!(track_id = %track.id, error = %err, "failed to play track");
                self.is_loading = false;
                self.emit(PlayerEvent::Error {
                    message: err.to_string(),
                });
                self.emit_state_changed();
                Err(err)
            }
        }
    }

    /// Pause playback
    pub async fn pause(&mut self) -> Result<()> {
        self.engine.pause().await?;
        self.is_playing = false;
        self.emit_state_changed();
        Ok(())
    }

    /// Resume playback of the current track
    pub async fn resume(&mut self) -> Result<()> {
        self.engine.play().await?;
        self.is_playing = true;
        self.emit_state_changed();
        Ok(())
    }

    /// Stop playback, keeping the current track and queue
    pub async fn stop(&mut self) -> Result<()> {
        self.engine.stop().await?;
        self.is_playing = false;
        self.position_ms = 0;
        self.emit_state_changed();
        Ok(())
    }

    /// Seek to `position_ms`, updating the reported position optimistically
    pub async fn seek_to(&mut self, position_ms: u64) -> Result<()> {
        self.engine.seek(position_ms).await?;
        self.position_ms = position_ms;
        Ok(())
    }

    // ===== Queue navigation =====

    /// Advance to the next track in the queue.
    ///
    /// At the end of the queue this wraps to the first track when repeat-all
    /// is active, and otherwise does nothing (playback stays on the last
    /// track).
    pub async fn next(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        let next_index = self.queue.index().map_or(0, |i| i + 1);
        let next_index = if next_index >= self.queue.len() {
            if self.repeat == RepeatMode::All {
                0
            } else {
                return Ok(());
            }
        } else {
            next_index
        };

        self.queue.set_index(next_index);
        let track = self
            .queue
            .current()
            .cloned()
            .ok_or(PlaybackError::NoTrackLoaded)?;
        self.play(Some(track)).await
    }

    /// Go to the previous track, or restart the current one.
    ///
    /// More than 3 seconds into a track, "previous" means "restart".
    pub async fn previous(&mut self) -> Result<()> {
        if self.queue.is_empty() {
            return Ok(());
        }

        if self.position_ms > PREVIOUS_RESTART_THRESHOLD_MS {
            return self.seek_to(0).await;
        }

        let prev_index = match self.queue.index() {
            Some(i) if i > 0 => i - 1,
            _ => self.queue.len() - 1,
        };

        self.queue.set_index(prev_index);
        let track = self
            .queue
            .current()
            .cloned()
            .ok_or(PlaybackError::NoTrackLoaded)?;
        self.play(Some(track)).await
    }

    // ===== Queue management =====

    /// Replace the queue, pointing at `start_index`.
    ///
    /// When shuffle is active the incoming tracks are permuted first and the
    /// start index addresses the shuffled order. This does not start
    /// playback; callers invoke [`play`](Self::play) afterwards.
    pub async fn set_queue(&mut self, mut tracks: Vec<Track>, start_index: usize) {
        // The current track is about to change without a load; settle its
        // listened span first.
        self.flush_listened().await;

        if self.is_shuffled {
            shuffle_tracks(&mut tracks);
        }
        self.queue.replace(tracks, start_index);
        self.current_track = self.queue.current().cloned();
        self.track_start_baseline = self.position_ms;
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Append a track to the end of the queue
    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.push(track);
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    /// Remove the track at `index` from the queue
    pub fn remove_from_queue(&mut self, index: usize) -> Option<Track> {
        let removed = self.queue.remove(index);
        if removed.is_some() {
            self.emit(PlayerEvent::QueueChanged {
                length: self.queue.len(),
            });
        }
        removed
    }

    /// Clear the queue, keeping the current track loaded
    pub fn clear_queue(&mut self) {
        self.queue.clear();
        self.emit(PlayerEvent::QueueChanged { length: 0 });
    }

    // ===== Modes =====

    /// Toggle shuffle.
    ///
    /// Turning shuffle on permutes the queue and relocates the index so the
    /// current track keeps playing uninterrupted. Turning it off leaves the
    /// queue order as-is.
    pub fn toggle_shuffle(&mut self) {
        if !self.is_shuffled && !self.queue.is_empty() {
            self.queue.shuffle_keeping_current();
            self.is_shuffled = true;
            self.emit(PlayerEvent::QueueChanged {
                length: self.queue.len(),
            });
        } else {
            self.is_shuffled = false;
        }
    }

    /// Cycle repeat mode `off -> all -> one -> off`
    pub fn toggle_repeat(&mut self) {
        self.repeat = self.repeat.next();
    }

    // ===== Volume =====

    /// Set output volume (clamped to 0.0 - 1.0); always unmutes
    pub async fn set_volume(&mut self, volume: f32) -> Result<()> {
        let volume = volume.clamp(0.0, 1.0);
        self.engine.set_volume(volume).await?;
        self.volume = volume;
        self.is_muted = false;
        self.emit_volume_changed();
        Ok(())
    }

    /// Scale the engine's output volume without touching the stored
    /// setting. Used for the sleep-timer fade; a scale of 1.0 restores
    /// the configured volume.
    pub async fn apply_volume_scale(&mut self, scale: f32) -> Result<()> {
        let effective = (self.volume * scale).clamp(0.0, 1.0);
        self.engine.set_volume(effective).await
    }

    /// Toggle mute without changing the volume setting
    pub async fn toggle_mute(&mut self) -> Result<()> {
        let muted = !self.is_muted;
        self.engine.set_muted(muted).await?;
        self.is_muted = muted;
        self.emit_volume_changed();
        Ok(())
    }

    // ===== Playback rate =====

    /// Set playback rate, clamped to 0.5 - 2.0
    pub async fn set_playback_rate(&mut self, rate: f32) -> Result<()> {
        let rate = rate.clamp(MIN_RATE, MAX_RATE);
        self.engine.set_rate(rate).await?;
        self.playback_rate = rate;
        Ok(())
    }

    /// Step to the next preset rate (0.75, 1.0, 1.25, 1.5, 2.0), wrapping.
    ///
    /// The current rate is matched against the presets with a 0.01 tolerance
    /// to absorb floating-point drift; an off-preset rate steps to the first
    /// preset.
    pub async fn cycle_playback_rate(&mut self) -> Result<()> {
        let next = match RATE_PRESETS
            .iter()
            .position(|preset| (preset - self.playback_rate).abs() < 0.01)
        {
            Some(index) => RATE_PRESETS[(index + 1) % RATE_PRESETS.len()],
            None => RATE_PRESETS[0],
        };
        self.set_playback_rate(next).await
    }

    // ===== A/B loop =====

    /// Set a loop point at the current position.
    ///
    /// Setting A clears any existing B. Setting B only takes effect when A
    /// is set and the position is past it; otherwise it is silently ignored.
    pub fn set_loop_point(&mut self, point: LoopPoint) {
        match point {
            LoopPoint::A => {
                self.loop_start = Some(self.position_ms);
                self.loop_end = None;
            }
            LoopPoint::B => {
                if let Some(start) = self.loop_start {
                    if self.position_ms > start {
                        self.loop_end = Some(self.position_ms);
                    }
                }
            }
        }
    }

    /// Clear both loop points
    pub fn clear_loop(&mut self) {
        self.loop_start = None;
        self.loop_end = None;
    }

    // ===== Status ingestion =====

    /// Ingest an asynchronous status tick from the engine.
    ///
    /// Ticks from superseded loads (stale generation) are dropped. An active
    /// A/B loop seeks back to the loop start as soon as the reported position
    /// reaches the loop end, suppressing the position update for that tick so
    /// the observable position never crosses the loop end. A completion tick
    /// flushes listened time and advances per the repeat mode.
    pub async fn ingest_status(&mut self, status: EngineStatus) -> Result<()> {
        if status.generation != self.load_generation {
            tracing::debug!(
                stale = status.generation,
                current = self.load_generation,
                "dropping stale engine status"
            );
            return Ok(());
        }

        if !status.is_loaded {
            if let Some(message) = status.load_error {
                tracing::warn!(%message, "engine reported load fault");
                self.emit(PlayerEvent::Error { message });
            }
            return Ok(());
        }

        if let (Some(start), Some(end)) = (self.loop_start, self.loop_end) {
            if status.position_ms >= end {
                return self.seek_to(start).await;
            }
        }

        self.position_ms = status.position_ms;
        if let Some(duration) = status.duration_ms {
            if duration > 0 {
                self.duration_ms = duration;
            }
        }
        self.is_playing = status.is_playing;

        if status.did_just_finish {
            let finished = self.current_track.clone();
            self.flush_listened().await;
            if let Some(track) = finished {
                self.emit(PlayerEvent::TrackFinished {
                    track_id: track.id,
                });
            }

            if self.repeat == RepeatMode::One {
                self.track_start_baseline = 0;
                self.seek_to(0).await?;
                self.resume().await?;
            } else {
                self.next().await?;
            }
        }

        Ok(())
    }

    /// Report the span listened on the current track since the baseline,
    /// then move the baseline up so the span is never reported twice.
    async fn flush_listened(&mut self) {
        if let Some(track) = self.current_track.clone() {
            let listened = self.position_ms.saturating_sub(self.track_start_baseline);
            if listened > 0 {
                self.reporter.report_play(&track, listened).await;
            }
        }
        self.track_start_baseline = self.position_ms;
    }

    /// Report any listened span accumulated since the baseline.
    ///
    /// Called on shutdown so the final span is not lost.
    pub async fn flush_listening(&mut self) {
        self.flush_listened().await;
    }

    // ===== Events =====

    /// Drain pending events for observers on the dispatch thread
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_state_changed(&mut self) {
        self.emit(PlayerEvent::StateChanged {
            is_playing: self.is_playing,
            is_loading: self.is_loading,
        });
    }

    fn emit_volume_changed(&mut self) {
        self.emit(PlayerEvent::VolumeChanged {
            volume: self.volume,
            is_muted: self.is_muted,
        });
    }

    // ===== State queries =====

    /// Currently loaded track
    pub fn current_track(&self) -> Option<&Track> {
        self.current_track.as_ref()
    }

    /// All queued tracks in order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Current queue position, `None` when the queue is empty
    pub fn queue_index(&self) -> Option<usize> {
        self.queue.index()
    }

    /// Whether audio is playing
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Current position in milliseconds
    pub fn position_ms(&self) -> u64 {
        self.position_ms
    }

    /// Track length in milliseconds (engine-decoded once known)
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Volume setting (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Whether output is muted
    pub fn is_muted(&self) -> bool {
        self.is_muted
    }

    /// Current repeat mode
    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    /// Whether shuffle is active
    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    /// Current playback rate
    pub fn playback_rate(&self) -> f32 {
        self.playback_rate
    }

    /// Active A/B loop region as `(start, end)`
    pub fn loop_region(&self) -> (Option<u64>, Option<u64>) {
        (self.loop_start, self.loop_end)
    }

    /// Generation of the most recent load (for platforms stamping ticks)
    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }
}
