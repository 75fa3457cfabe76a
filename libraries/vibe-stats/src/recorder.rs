//! Listening statistics aggregation
//!
//! Accumulates play counts, total/daily/hourly listening time and a bounded
//! play history, and answers the queries the stats screens are built on
//! (top tracks/artists, weekly chart, streak).
//!
//! Every time-dependent entry point has an `*_at` variant taking an explicit
//! timestamp or date so behavior at day and hour boundaries is testable; the
//! undecorated variants use the local clock.

use chrono::{DateTime, Duration, Local, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use vibe_core::Track;

/// Plays shorter than this are treated as skips and not recorded
pub const MINIMUM_PLAY_DURATION_MS: u64 = 30_000;

/// Bound on the retained play history
pub const MAX_HISTORY_SIZE: usize = 1_000;

/// One recorded play
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRecord {
    /// Id of the played track
    pub track_id: String,
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// How long the track was listened to, in milliseconds
    pub duration_ms: u64,
}

/// A track joined with its play count
#[derive(Debug, Clone, PartialEq)]
pub struct TopTrack {
    /// The track
    pub track: Track,
    /// Number of recorded plays
    pub plays: u32,
}

/// Per-artist aggregate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopArtist {
    /// Artist name
    pub artist: String,
    /// Number of recorded plays across the artist's tracks
    pub plays: u32,
    /// Listening time attributed from the retained history, in milliseconds
    pub time_ms: u64,
}

/// One day in the weekly chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayListening {
    /// Three-letter day name (`Mon`, `Tue`, ...)
    pub day: String,
    /// Listening time on that day, in milliseconds
    pub time_ms: u64,
}

/// Accumulated listening statistics
///
/// Serde round-trippable; this is exactly the shape persisted to disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatsRecorder {
    /// Plays per track id
    pub play_count: HashMap<String, u32>,
    /// Total listening time across all tracks, in milliseconds
    pub total_listening_time_ms: u64,
    /// Recent plays, newest first, capped at [`MAX_HISTORY_SIZE`]
    pub listening_history: VecDeque<PlayRecord>,
    /// Listening time per hour of day (0-23), in milliseconds
    pub hourly_distribution: [u64; 24],
    /// Listening time per day, keyed `YYYY-MM-DD`
    pub daily_listening_time: HashMap<String, u64>,
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn day_name(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

impl StatsRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a play of `track` lasting `duration_ms`, stamped now
    pub fn record_play(&mut self, track: &Track, duration_ms: u64) {
        self.record_play_at(track, duration_ms, Local::now());
    }

    /// Record a play stamped at `now`.
    ///
    /// Plays below the 30-second minimum are dropped entirely; nothing is
    /// counted, not even total listening time.
    pub fn record_play_at(&mut self, track: &Track, duration_ms: u64, now: DateTime<Local>) {
        if duration_ms < MINIMUM_PLAY_DURATION_MS {
            return;
        }

        *self.play_count.entry(track.id.clone()).or_insert(0) += 1;
        self.total_listening_time_ms += duration_ms;
        self.hourly_distribution[now.hour() as usize] += duration_ms;
        *self
            .daily_listening_time
            .entry(date_key(now.date_naive()))
            .or_insert(0) += duration_ms;

        self.listening_history.push_front(PlayRecord {
            track_id: track.id.clone(),
            timestamp: now.timestamp_millis(),
            duration_ms,
        });
        self.listening_history.truncate(MAX_HISTORY_SIZE);
    }

    /// Most-played tracks among `tracks`, sorted by play count descending.
    ///
    /// Counted tracks absent from `tracks` (e.g. deleted files) are skipped.
    pub fn top_tracks(&self, tracks: &[Track], limit: usize) -> Vec<TopTrack> {
        let by_id: HashMap<&str, &Track> = tracks.iter().map(|t| (t.id.as_str(), t)).collect();

        let mut ranked: Vec<TopTrack> = self
            .play_count
            .iter()
            .filter_map(|(id, &plays)| {
                by_id.get(id.as_str()).map(|&track| TopTrack {
                    track: track.clone(),
                    plays,
                })
            })
            .collect();
        ranked.sort_by(|a, b| b.plays.cmp(&a.plays));
        ranked.truncate(limit);
        ranked
    }

    /// Most-played artists among `tracks`, sorted by play count descending.
    ///
    /// Play counts come from the full counters; listening time is attributed
    /// from the retained history, so it only covers the most recent 1000
    /// plays.
    pub fn top_artists(&self, tracks: &[Track], limit: usize) -> Vec<TopArtist> {
        let by_id: HashMap<&str, &Track> = tracks.iter().map(|t| (t.id.as_str(), t)).collect();

        let mut by_artist: HashMap<&str, (u32, u64)> = HashMap::new();
        for (id, &plays) in &self.play_count {
            if let Some(track) = by_id.get(id.as_str()) {
                by_artist.entry(track.artist.as_str()).or_default().0 += plays;
            }
        }
        for record in &self.listening_history {
            if let Some(track) = by_id.get(record.track_id.as_str()) {
                if let Some(stats) = by_artist.get_mut(track.artist.as_str()) {
                    stats.1 += record.duration_ms;
                }
            }
        }

        let mut ranked: Vec<TopArtist> = by_artist
            .into_iter()
            .map(|(artist, (plays, time_ms))| TopArtist {
                artist: artist.to_string(),
                plays,
                time_ms,
            })
            .collect();
        ranked.sort_by(|a, b| b.plays.cmp(&a.plays));
        ranked.truncate(limit);
        ranked
    }

    /// Listening time recorded today, in milliseconds
    pub fn today_listening_time(&self) -> u64 {
        self.today_listening_time_at(Local::now().date_naive())
    }

    /// Listening time recorded on `today`
    pub fn today_listening_time_at(&self, today: NaiveDate) -> u64 {
        self.daily_listening_time
            .get(&date_key(today))
            .copied()
            .unwrap_or(0)
    }

    /// Last seven days of listening, oldest first, ending today
    pub fn weekly_data(&self) -> Vec<DayListening> {
        self.weekly_data_at(Local::now().date_naive())
    }

    /// Seven days of listening ending at `today`, oldest first
    pub fn weekly_data_at(&self, today: NaiveDate) -> Vec<DayListening> {
        (0..7)
            .rev()
            .map(|back| {
                let date = today - Duration::days(back);
                DayListening {
                    day: day_name(date),
                    time_ms: self
                        .daily_listening_time
                        .get(&date_key(date))
                        .copied()
                        .unwrap_or(0),
                }
            })
            .collect()
    }

    /// Consecutive days with listening, counting back from today
    pub fn streak(&self) -> u32 {
        self.streak_at(Local::now().date_naive())
    }

    /// Streak ending at `today`.
    ///
    /// A day counts when it has non-zero listening time. A zero today does
    /// not break a streak built on prior days; the user still has until
    /// midnight. Scans back at most a year.
    pub fn streak_at(&self, today: NaiveDate) -> u32 {
        let mut streak = 0;
        for back in 0..365 {
            let date = today - Duration::days(back);
            let listened = self
                .daily_listening_time
                .get(&date_key(date))
                .copied()
                .unwrap_or(0);

            if listened > 0 {
                streak += 1;
            } else if back > 0 {
                break;
            }
        }
        streak
    }

    /// Discard all accumulated statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn track(id: &str, artist: &str) -> Track {
        Track::new(id, format!("/music/{id}.mp3"), format!("Track {id}"), artist)
    }

    fn at(date: &str, hour: u32) -> DateTime<Local> {
        let date = date.parse::<NaiveDate>().unwrap();
        Local
            .from_local_datetime(&date.and_hms_opt(hour, 0, 0).unwrap())
            .unwrap()
    }

    #[test]
    fn plays_below_minimum_are_dropped_entirely() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 29_999, at("2026-08-25", 10));

        assert!(stats.play_count.is_empty());
        assert_eq!(stats.total_listening_time_ms, 0);
        assert!(stats.listening_history.is_empty());
        assert_eq!(stats.hourly_distribution.iter().sum::<u64>(), 0);
        assert!(stats.daily_listening_time.is_empty());
    }

    #[test]
    fn play_at_exact_minimum_is_counted() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 30_000, at("2026-08-25", 10));

        assert_eq!(stats.play_count.get("1"), Some(&1));
        assert_eq!(stats.total_listening_time_ms, 30_000);
        assert_eq!(stats.listening_history.len(), 1);
        assert_eq!(stats.hourly_distribution[10], 30_000);
        assert_eq!(stats.daily_listening_time.get("2026-08-25"), Some(&30_000));
    }

    #[test]
    fn history_is_newest_first_and_capped() {
        let mut stats = StatsRecorder::new();
        let t = track("1", "A");
        for i in 0..1_001u32 {
            stats.record_play_at(&t, 30_000 + u64::from(i), at("2026-08-25", 12));
        }

        assert_eq!(stats.listening_history.len(), MAX_HISTORY_SIZE);
        // Newest record first; the very first (oldest) record fell off.
        assert_eq!(stats.listening_history[0].duration_ms, 30_000 + 1_000);
        assert_eq!(
            stats.listening_history[MAX_HISTORY_SIZE - 1].duration_ms,
            30_000 + 1
        );
        assert_eq!(stats.play_count.get("1"), Some(&1_001));
    }

    #[test]
    fn top_tracks_sorts_by_plays_and_skips_unknown() {
        let mut stats = StatsRecorder::new();
        let one = track("1", "A");
        let two = track("2", "B");
        let gone = track("gone", "C");
        let now = at("2026-08-25", 9);

        stats.record_play_at(&one, 60_000, now);
        stats.record_play_at(&two, 60_000, now);
        stats.record_play_at(&two, 60_000, now);
        stats.record_play_at(&gone, 60_000, now);

        let library = vec![one, two];
        let top = stats.top_tracks(&library, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].track.id, "2");
        assert_eq!(top[0].plays, 2);
        assert_eq!(top[1].track.id, "1");

        let limited = stats.top_tracks(&library, 1);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].track.id, "2");
    }

    #[test]
    fn top_artists_aggregates_plays_and_history_time() {
        let mut stats = StatsRecorder::new();
        let one = track("1", "Ana");
        let two = track("2", "Ana");
        let three = track("3", "Bo");
        let now = at("2026-08-25", 9);

        stats.record_play_at(&one, 60_000, now);
        stats.record_play_at(&two, 90_000, now);
        stats.record_play_at(&three, 30_000, now);

        let library = vec![one, two, three];
        let top = stats.top_artists(&library, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].artist, "Ana");
        assert_eq!(top[0].plays, 2);
        assert_eq!(top[0].time_ms, 150_000);
        assert_eq!(top[1].artist, "Bo");
        assert_eq!(top[1].time_ms, 30_000);
    }

    #[test]
    fn weekly_data_is_seven_days_oldest_first() {
        let mut stats = StatsRecorder::new();
        // Monday 2026-08-24 and Tuesday 2026-08-25.
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-24", 8));
        stats.record_play_at(&track("1", "A"), 90_000, at("2026-08-25", 8));

        let week = stats.weekly_data_at("2026-08-25".parse().unwrap());
        assert_eq!(week.len(), 7);
        assert_eq!(week[6], DayListening { day: "Tue".into(), time_ms: 90_000 });
        assert_eq!(week[5], DayListening { day: "Mon".into(), time_ms: 60_000 });
        assert_eq!(week[0].day, "Wed");
        assert_eq!(week[0].time_ms, 0);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-24", 8));
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-25", 8));

        assert_eq!(stats.streak_at("2026-08-25".parse().unwrap()), 2);
    }

    #[test]
    fn zero_today_does_not_break_streak() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-23", 8));
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-24", 8));

        // Nothing played on the 25th yet; the two prior days still count.
        assert_eq!(stats.streak_at("2026-08-25".parse().unwrap()), 2);
    }

    #[test]
    fn gap_breaks_streak() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-21", 8));
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-25", 8));

        assert_eq!(stats.streak_at("2026-08-25".parse().unwrap()), 1);
    }

    #[test]
    fn reset_clears_everything() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-25", 8));
        stats.reset();

        assert!(stats.play_count.is_empty());
        assert_eq!(stats.total_listening_time_ms, 0);
        assert!(stats.listening_history.is_empty());
        assert_eq!(stats.hourly_distribution, [0; 24]);
        assert!(stats.daily_listening_time.is_empty());
    }

    #[test]
    fn serde_round_trip_preserves_aggregates() {
        let mut stats = StatsRecorder::new();
        stats.record_play_at(&track("1", "A"), 60_000, at("2026-08-25", 8));
        stats.record_play_at(&track("2", "B"), 90_000, at("2026-08-25", 22));

        let json = serde_json::to_string(&stats).unwrap();
        let restored: StatsRecorder = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.play_count, stats.play_count);
        assert_eq!(restored.total_listening_time_ms, 150_000);
        assert_eq!(restored.listening_history, stats.listening_history);
        assert_eq!(restored.hourly_distribution, stats.hourly_distribution);
        assert_eq!(restored.daily_listening_time, stats.daily_listening_time);
    }
}
