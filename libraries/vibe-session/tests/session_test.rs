//! End-to-end session tests
//!
//! Runs a full session over a temp-dir blob store and a fake engine:
//! playback feeding statistics, sleep-timer fade and expiry, and settings
//! surviving a restart.

use std::sync::{Arc, Once};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use vibe_core::{BlobStore, JsonFileStore, Track};
use vibe_playback::{EngineCall, EngineStatus, FakeEngine};
use vibe_session::Session;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

fn track(id: &str) -> Track {
    let mut t = Track::new(
        id,
        format!("/music/{id}.mp3"),
        format!("Track {id}"),
        "Artist",
    );
    t.duration_ms = 240_000;
    t
}

async fn blob_store(dir: &TempDir) -> Arc<dyn BlobStore> {
    init_logging();
    Arc::new(JsonFileStore::open(dir.path()).await.unwrap())
}

#[tokio::test]
async fn playback_feeds_statistics() {
    let dir = TempDir::new().unwrap();
    let (engine, _log) = FakeEngine::new();
    let mut session = Session::init(blob_store(&dir).await, Box::new(engine))
        .await
        .unwrap();

    session
        .player_mut()
        .set_queue(vec![track("1"), track("2")], 0)
        .await;
    session.player_mut().play(Some(track("1"))).await.unwrap();

    let generation = session.player().load_generation();
    session
        .player_mut()
        .ingest_status(EngineStatus::playing(generation, 90_000))
        .await
        .unwrap();
    session.player_mut().next().await.unwrap();

    let stats = session.stats();
    let stats = stats.lock().await;
    assert_eq!(stats.recorder().play_count.get("1"), Some(&1));
    assert_eq!(stats.recorder().total_listening_time_ms, 90_000);
}

#[tokio::test]
async fn settings_survive_restart() {
    let dir = TempDir::new().unwrap();
    let blobs = blob_store(&dir).await;

    {
        let (engine, _log) = FakeEngine::new();
        let mut session = Session::init(Arc::clone(&blobs), Box::new(engine))
            .await
            .unwrap();

        session.player_mut().set_volume(0.4).await.unwrap();
        session.player_mut().toggle_repeat();
        session.player_mut().set_playback_rate(1.5).await.unwrap();
        session
            .eq_mut()
            .update(|eq| eq.select_preset("vocal"))
            .await;
        session.dispose().await.unwrap();
    }

    let (engine, log) = FakeEngine::new();
    let session = Session::init(blobs, Box::new(engine)).await.unwrap();

    assert!((session.player().volume() - 0.4).abs() < f32::EPSILON);
    assert_eq!(
        session.player().repeat(),
        vibe_playback::RepeatMode::All
    );
    assert!((session.player().playback_rate() - 1.5).abs() < f32::EPSILON);
    assert_eq!(session.eq().equalizer().current_preset_id, "vocal");
    // The restored settings were pushed to the fresh engine.
    assert!(log.calls().contains(&EngineCall::SetVolume(0.4)));
    assert!(log.calls().contains(&EngineCall::SetRate(1.5)));
}

#[tokio::test]
async fn dispose_flushes_inprogress_listening() {
    let dir = TempDir::new().unwrap();
    let blobs = blob_store(&dir).await;

    {
        let (engine, _log) = FakeEngine::new();
        let mut session = Session::init(Arc::clone(&blobs), Box::new(engine))
            .await
            .unwrap();
        session.player_mut().play(Some(track("1"))).await.unwrap();
        let generation = session.player().load_generation();
        session
            .player_mut()
            .ingest_status(EngineStatus::playing(generation, 45_000))
            .await
            .unwrap();
        session.dispose().await.unwrap();
    }

    let (engine, _log) = FakeEngine::new();
    let session = Session::init(blobs, Box::new(engine)).await.unwrap();
    let stats = session.stats();
    let stats = stats.lock().await;
    assert_eq!(stats.recorder().play_count.get("1"), Some(&1));
}

#[tokio::test]
async fn sleep_timer_fades_then_pauses() {
    let dir = TempDir::new().unwrap();
    let (engine, log) = FakeEngine::new();
    let mut session = Session::init(blob_store(&dir).await, Box::new(engine))
        .await
        .unwrap();

    session.player_mut().play(Some(track("1"))).await.unwrap();
    session.player_mut().set_volume(0.8).await.unwrap();

    let start = Instant::now();
    session.set_sleep_timer(Duration::from_secs(60), start);

    // Outside the fade window: volume untouched.
    log.clear();
    session
        .tick_sleep_timer(start + Duration::from_secs(10))
        .await
        .unwrap();
    assert!(!log
        .calls()
        .iter()
        .any(|c| matches!(c, EngineCall::SetVolume(_))));

    // Halfway through the fade: engine volume scaled, setting untouched.
    session
        .tick_sleep_timer(start + Duration::from_secs(45))
        .await
        .unwrap();
    match log.last() {
        Some(EngineCall::SetVolume(v)) => assert!((v - 0.4).abs() < 0.02),
        other => panic!("expected a faded volume, got {other:?}"),
    }
    assert!((session.player().volume() - 0.8).abs() < f32::EPSILON);

    // Expiry pauses and restores the configured volume.
    session
        .tick_sleep_timer(start + Duration::from_secs(61))
        .await
        .unwrap();
    assert!(!session.player().is_playing());
    assert_eq!(log.last(), Some(EngineCall::SetVolume(0.8)));
    assert_eq!(session.sleep_timer_remaining(Instant::now()), None);
}

#[tokio::test]
async fn cancelling_sleep_timer_restores_volume() {
    let dir = TempDir::new().unwrap();
    let (engine, log) = FakeEngine::new();
    let mut session = Session::init(blob_store(&dir).await, Box::new(engine))
        .await
        .unwrap();
    session.player_mut().set_volume(0.6).await.unwrap();

    let start = Instant::now();
    session.set_sleep_timer(Duration::from_secs(20), start);
    session
        .tick_sleep_timer(start + Duration::from_secs(10))
        .await
        .unwrap();

    session.cancel_sleep_timer().await.unwrap();
    assert_eq!(log.last(), Some(EngineCall::SetVolume(0.6)));
    assert_eq!(session.sleep_timer_remaining(Instant::now()), None);
}
