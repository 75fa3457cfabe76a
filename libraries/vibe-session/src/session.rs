//! Application session
//!
//! One `Session` is the whole player: the playback controller, the shared
//! statistics store wired in as its play reporter, equalizer settings and
//! the sleep timer, all persisting through one blob store. The embedding
//! application owns exactly one session and drives it from its dispatch
//! thread; nothing here is a global.

use crate::error::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use vibe_core::BlobStore;
use vibe_eq::EqStore;
use vibe_playback::{AudioEngine, PlayerConfig, PlayerController, SleepTick, SleepTimer};
use vibe_stats::{SharedStatsReporter, StatsStore};

const PLAYER_KEY: &str = "player";

/// The assembled player: controller, stats, equalizer, sleep timer
pub struct Session {
    player: PlayerController,
    stats: Arc<Mutex<StatsStore>>,
    eq: EqStore,
    sleep_timer: SleepTimer,
    blobs: Arc<dyn BlobStore>,
}

impl Session {
    /// Build a session on top of `blobs` and `engine`, restoring persisted
    /// player settings, statistics and equalizer state.
    pub async fn init(blobs: Arc<dyn BlobStore>, engine: Box<dyn AudioEngine>) -> Result<Self> {
        let config = match blobs.load(PLAYER_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(config) => config,
                Err(err) => {
                    tracing::warn!(error = %err, "persisted player settings did not parse, using defaults");
                    PlayerConfig::default()
                }
            },
            Ok(None) => PlayerConfig::default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to read persisted player settings, using defaults");
                PlayerConfig::default()
            }
        };

        let stats = Arc::new(Mutex::new(StatsStore::load(Arc::clone(&blobs)).await));
        let mut player =
            PlayerController::with_reporter(engine, Box::new(SharedStatsReporter(Arc::clone(&stats))), config);
        player.sync_engine().await?;

        let eq = EqStore::load(Arc::clone(&blobs)).await;

        Ok(Self {
            player,
            stats,
            eq,
            sleep_timer: SleepTimer::new(),
            blobs,
        })
    }

    /// The playback controller
    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    /// The playback controller, mutably
    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    /// Handle to the shared statistics store
    pub fn stats(&self) -> Arc<Mutex<StatsStore>> {
        Arc::clone(&self.stats)
    }

    /// Equalizer settings
    pub fn eq(&self) -> &EqStore {
        &self.eq
    }

    /// Equalizer settings, mutably
    pub fn eq_mut(&mut self) -> &mut EqStore {
        &mut self.eq
    }

    // ===== Sleep timer =====

    /// Arm the sleep timer to pause playback `duration` from `now`
    pub fn set_sleep_timer(&mut self, duration: Duration, now: Instant) {
        self.sleep_timer.set(duration, now);
    }

    /// Disarm the sleep timer, restoring full volume if a fade had begun
    pub async fn cancel_sleep_timer(&mut self) -> Result<()> {
        if self.sleep_timer.is_active() {
            self.sleep_timer.cancel();
            self.player.apply_volume_scale(1.0).await?;
        }
        Ok(())
    }

    /// Time left on the sleep timer, `None` when inactive
    pub fn sleep_timer_remaining(&self, now: Instant) -> Option<Duration> {
        self.sleep_timer.remaining(now)
    }

    /// Advance the sleep timer.
    ///
    /// Applies the fade inside the final 30 seconds and pauses playback on
    /// expiry, restoring the configured volume for the next play.
    pub async fn tick_sleep_timer(&mut self, now: Instant) -> Result<()> {
        match self.sleep_timer.poll(now) {
            SleepTick::Running {
                volume_scale: Some(scale),
                ..
            } => {
                self.player.apply_volume_scale(scale).await?;
            }
            SleepTick::Running { .. } | SleepTick::Inactive => {}
            SleepTick::Expired => {
                self.player.pause().await?;
                self.player.apply_volume_scale(1.0).await?;
            }
        }
        Ok(())
    }

    // ===== Shutdown =====

    /// Flush everything that must survive shutdown: the in-progress
    /// listened span, statistics, equalizer and player settings.
    pub async fn dispose(&mut self) -> Result<()> {
        self.player.flush_listening().await;
        self.stats.lock().await.flush().await;
        self.eq.flush().await;

        let config = PlayerConfig {
            volume: self.player.volume(),
            repeat: self.player.repeat(),
            shuffled: self.player.is_shuffled(),
            playback_rate: self.player.playback_rate(),
        };
        match serde_json::to_value(&config) {
            Ok(value) => {
                if let Err(err) = self.blobs.save(PLAYER_KEY, &value).await {
                    tracing::warn!(error = %err, "failed to persist player settings");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to serialize player settings"),
        }

        Ok(())
    }
}
