// Deterministic generator - every reading is a pure function of the time bucket
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::error::GenerationError;
use crate::domain::history::HISTORY_CAPACITY;
use crate::domain::telemetry::{HistoryEntry, Snapshot, StatsPayload};
use std::time::Duration;

/// Width of one seed bucket; also the spacing of history samples
pub const BUCKET_MS: i64 = 5_000;

pub fn bucket_seed(time_ms: i64) -> i64 {
    time_ms.div_euclid(BUCKET_MS)
}

/// Fractional part of a scaled sine, in [0, 1)
fn pseudo_random(seed: i64, offset: i64) -> f64 {
    let x = ((seed + offset) as f64).sin() * 10_000.0;
    x - x.floor()
}

/// Snapshot for any instant; identical for identical input
pub fn snapshot_at(time_ms: i64) -> Result<Snapshot, GenerationError> {
    let seed = bucket_seed(time_ms);

    let coil_temp = 40.0 + pseudo_random(seed, 1) * 50.0;
    let produced = 100.0 + pseudo_random(seed, 2) * 80.0;
    let consumed = 60.0 + pseudo_random(seed, 3) * 60.0;
    // Slow oscillation, independent of the bucket
    let stored = 70.0 + (time_ms as f64 / 100_000.0).sin() * 20.0;

    Snapshot::new(time_ms, coil_temp, produced, stored, consumed)
}

/// The 20 samples spaced one bucket apart that lead up to `now_ms`
pub fn history_at(now_ms: i64) -> Result<Vec<HistoryEntry>, GenerationError> {
    let window = HISTORY_CAPACITY as i64;
    (0..window)
        .map(|i| {
            let t = now_ms - (window - i) * BUCKET_MS;
            snapshot_at(t).map(|s| s.to_history_entry())
        })
        .collect()
}

pub fn stats_at(now_ms: i64) -> Result<StatsPayload, GenerationError> {
    Ok(StatsPayload::new(snapshot_at(now_ms)?, history_at(now_ms)?))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DeterministicSource;

impl TelemetrySource for DeterministicSource {
    fn name(&self) -> &'static str {
        "deterministic"
    }

    fn default_interval(&self) -> Duration {
        Duration::from_millis(BUCKET_MS as u64)
    }

    fn tick(&mut self, now_ms: i64) -> Result<StatsPayload, GenerationError> {
        stats_at(now_ms)
    }

    fn current(&self, now_ms: i64) -> Result<StatsPayload, GenerationError> {
        stats_at(now_ms)
    }
}
