// Stats service - Shared handle to the active telemetry source
use crate::application::deterministic::DeterministicSource;
use crate::application::random_walk::RandomWalk;
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::error::GenerationError;
use crate::domain::telemetry::{StatsPayload, now_ms};
use crate::infrastructure::config::{TelemetryMode, TelemetrySettings};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Clone)]
pub struct StatsService {
    source: Arc<Mutex<Box<dyn TelemetrySource>>>,
    name: &'static str,
    interval: Duration,
}

impl StatsService {
    pub fn new(source: Box<dyn TelemetrySource>, interval: Option<Duration>) -> Self {
        let name = source.name();
        // A zero period would panic the timer
        let interval = interval
            .filter(|period| !period.is_zero())
            .unwrap_or_else(|| source.default_interval());
        Self {
            source: Arc::new(Mutex::new(source)),
            name,
            interval,
        }
    }

    pub fn from_settings(settings: &TelemetrySettings) -> Self {
        let source: Box<dyn TelemetrySource> = match settings.mode {
            TelemetryMode::Deterministic => Box::new(DeterministicSource),
            TelemetryMode::RandomWalk => Box::new(RandomWalk::from_seed(settings.seed)),
        };
        Self::new(source, settings.interval_ms.map(Duration::from_millis))
    }

    pub fn source_name(&self) -> &'static str {
        self.name
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Payload for "now" without side effects
    pub fn current(&self) -> Result<StatsPayload, GenerationError> {
        self.lock().current(now_ms())
    }

    /// Advances the source by one tick
    pub fn tick(&self) -> Result<StatsPayload, GenerationError> {
        self.lock().tick(now_ms())
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn TelemetrySource>> {
        // Sources hold no invariants a panic mid-tick could break
        self.source.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::HISTORY_CAPACITY;

    fn settings(mode: TelemetryMode) -> TelemetrySettings {
        TelemetrySettings {
            mode,
            interval_ms: None,
            seed: Some(42),
            channel_capacity: 16,
        }
    }

    #[test]
    fn test_deterministic_mode() {
        let service = StatsService::from_settings(&settings(TelemetryMode::Deterministic));
        assert_eq!(service.source_name(), "deterministic");
        assert_eq!(service.interval(), Duration::from_millis(5_000));
        assert_eq!(service.current().unwrap().history.len(), HISTORY_CAPACITY);
    }

    #[test]
    fn test_random_walk_mode() {
        let service = StatsService::from_settings(&settings(TelemetryMode::RandomWalk));
        assert_eq!(service.source_name(), "random_walk");
        assert_eq!(service.interval(), Duration::from_millis(2_000));
        assert!(service.current().unwrap().history.is_empty());

        service.tick().unwrap();
        let after_two = service.tick().unwrap();
        assert_eq!(after_two.history.len(), 2);
        assert_eq!(service.current().unwrap(), after_two);
    }

    #[test]
    fn test_configured_interval_overrides_default() {
        let mut custom = settings(TelemetryMode::RandomWalk);
        custom.interval_ms = Some(750);
        let service = StatsService::from_settings(&custom);
        assert_eq!(service.interval(), Duration::from_millis(750));
    }

    #[test]
    fn test_zero_interval_falls_back_to_default() {
        let mut custom = settings(TelemetryMode::RandomWalk);
        custom.interval_ms = Some(0);
        let service = StatsService::from_settings(&custom);
        assert_eq!(service.interval(), Duration::from_millis(2_000));

        let service = StatsService::new(Box::new(DeterministicSource), Some(Duration::ZERO));
        assert_eq!(service.interval(), Duration::from_millis(5_000));
    }
}
