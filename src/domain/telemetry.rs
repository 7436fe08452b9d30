// Telemetry data domain models
use chrono::{Local, TimeZone, Utc};
use serde::Serialize;

use super::error::GenerationError;

pub const COIL_TEMP_MIN: f64 = 20.0;
pub const COIL_TEMP_MAX: f64 = 100.0;
pub const STORED_MIN: f64 = 0.0;
pub const STORED_MAX: f64 = 100.0;

/// One instant's full telemetry reading
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub coil_temp: f64,
    pub energy_produced: f64,
    pub energy_stored: f64,
    pub energy_consumed: f64,
    pub timestamp: String,
    #[serde(skip)]
    pub time_ms: i64,
}

impl Snapshot {
    /// Builds a snapshot stamped at `time_ms`, rounding every reading to one decimal.
    pub fn new(
        time_ms: i64,
        coil_temp: f64,
        energy_produced: f64,
        energy_stored: f64,
        energy_consumed: f64,
    ) -> Result<Self, GenerationError> {
        Ok(Self {
            coil_temp: round_one(coil_temp),
            energy_produced: round_one(energy_produced),
            energy_stored: round_one(energy_stored),
            energy_consumed: round_one(energy_consumed),
            timestamp: format_local_time(time_ms)?,
            time_ms,
        })
    }

    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            time: self.timestamp.clone(),
            produced: self.energy_produced,
            consumed: self.energy_consumed,
            time_ms: self.time_ms,
        }
    }
}

/// Chart projection of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub time: String,
    pub produced: f64,
    pub consumed: f64,
    #[serde(skip)]
    pub time_ms: i64,
}

/// Snapshot plus its history window, as served and pushed to clients
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsPayload {
    #[serde(flatten)]
    pub snapshot: Snapshot,
    pub history: Vec<HistoryEntry>,
}

impl StatsPayload {
    pub fn new(snapshot: Snapshot, history: Vec<HistoryEntry>) -> Self {
        Self { snapshot, history }
    }
}

pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Formats an epoch timestamp as local `HH:MM:SS`
pub fn format_local_time(time_ms: i64) -> Result<String, GenerationError> {
    Local
        .timestamp_millis_opt(time_ms)
        .earliest()
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .ok_or(GenerationError::ClockOutOfRange(time_ms))
}
