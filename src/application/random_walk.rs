// Random-walk simulator - stateful, path-dependent telemetry
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::error::GenerationError;
use crate::domain::history::HistoryBuffer;
use crate::domain::telemetry::{
    COIL_TEMP_MAX, COIL_TEMP_MIN, STORED_MAX, STORED_MIN, Snapshot, StatsPayload,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

pub const WALK_INTERVAL_MS: u64 = 2_000;

/// Fraction of net power that flows into storage per tick
const STORAGE_RATE: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkState {
    pub coil_temp: f64,
    pub energy_produced: f64,
    pub energy_consumed: f64,
    pub energy_stored: f64,
}

impl Default for WalkState {
    fn default() -> Self {
        Self {
            coil_temp: 45.0,
            energy_produced: 120.0,
            energy_consumed: 80.0,
            energy_stored: 85.0,
        }
    }
}

impl WalkState {
    /// Applies one bounded random step
    fn advance<R: Rng>(&mut self, rng: &mut R) {
        self.coil_temp =
            (self.coil_temp + rng.gen_range(-1.0..=1.0)).clamp(COIL_TEMP_MIN, COIL_TEMP_MAX);
        self.energy_produced =
            (self.energy_produced + rng.gen_range(-0.4..=0.6) * 10.0).max(0.0);
        self.energy_consumed =
            (self.energy_consumed + rng.gen_range(-0.5..=0.5) * 8.0).max(0.0);

        let net = self.energy_produced - self.energy_consumed;
        self.energy_stored = (self.energy_stored + net * STORAGE_RATE).clamp(STORED_MIN, STORED_MAX);
    }
}

/// Simulation context owning the walk state, its random source and its history.
pub struct RandomWalk<R: Rng> {
    rng: R,
    state: WalkState,
    history: HistoryBuffer,
    latest: Option<StatsPayload>,
}

impl RandomWalk<StdRng> {
    /// Seeded when `seed` is set, otherwise drawn from OS entropy
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, WalkState::default())
    }
}

impl<R: Rng> RandomWalk<R> {
    pub fn new(rng: R, state: WalkState) -> Self {
        Self {
            rng,
            state,
            history: HistoryBuffer::default(),
            latest: None,
        }
    }

    pub fn state(&self) -> WalkState {
        self.state
    }

    /// Advances the walk by one tick and records the result in history
    pub fn step(&mut self, now_ms: i64) -> Result<StatsPayload, GenerationError> {
        let mut next = self.state;
        next.advance(&mut self.rng);
        let snapshot = snapshot_of(&next, now_ms)?;

        self.state = next;
        if let Some(evicted) = self.history.push(snapshot.to_history_entry()) {
            tracing::trace!("Evicted history entry from {}", evicted.time);
        }
        let payload = StatsPayload::new(snapshot, self.history.to_vec());
        self.latest = Some(payload.clone());
        Ok(payload)
    }
}

fn snapshot_of(state: &WalkState, now_ms: i64) -> Result<Snapshot, GenerationError> {
    Snapshot::new(
        now_ms,
        state.coil_temp,
        state.energy_produced,
        state.energy_stored,
        state.energy_consumed,
    )
}

impl<R: Rng + Send> TelemetrySource for RandomWalk<R> {
    fn name(&self) -> &'static str {
        "random_walk"
    }

    fn default_interval(&self) -> Duration {
        Duration::from_millis(WALK_INTERVAL_MS)
    }

    fn tick(&mut self, now_ms: i64) -> Result<StatsPayload, GenerationError> {
        self.step(now_ms)
    }

    fn current(&self, now_ms: i64) -> Result<StatsPayload, GenerationError> {
        match &self.latest {
            Some(payload) => Ok(payload.clone()),
            None => Ok(StatsPayload::new(
                snapshot_of(&self.state, now_ms)?,
                self.history.to_vec(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::HISTORY_CAPACITY;

    const T: i64 = 1_000_000_000_000;

    fn seeded(state: WalkState) -> RandomWalk<StdRng> {
        RandomWalk::new(StdRng::seed_from_u64(7), state)
    }

    #[test]
    fn test_first_tick_moves_coil_temp_by_at_most_one() {
        let mut walk = seeded(WalkState::default());
        let payload = walk.step(T).unwrap();
        assert!((44.0..=46.0).contains(&payload.snapshot.coil_temp));
        assert!((44.0..=46.0).contains(&walk.state().coil_temp));
    }

    #[test]
    fn test_single_step_bounds() {
        let mut walk = seeded(WalkState::default());
        walk.step(T).unwrap();
        let s = walk.state();
        assert!((116.0..=126.0).contains(&s.energy_produced), "{:?}", s);
        assert!((76.0..=84.0).contains(&s.energy_consumed), "{:?}", s);
    }

    #[test]
    fn test_ranges_hold_over_long_walks() {
        let starts = [
            WalkState::default(),
            WalkState { coil_temp: 20.0, energy_produced: 0.0, energy_consumed: 300.0, energy_stored: 0.5 },
            WalkState { coil_temp: 100.0, energy_produced: 400.0, energy_consumed: 0.0, energy_stored: 99.5 },
        ];
        for start in starts {
            let mut walk = seeded(start);
            for i in 0..5_000 {
                let s = walk.step(T + i * 2_000).unwrap().snapshot;
                assert!((COIL_TEMP_MIN..=COIL_TEMP_MAX).contains(&s.coil_temp), "{:?}", s);
                assert!((STORED_MIN..=STORED_MAX).contains(&s.energy_stored), "{:?}", s);
                assert!(s.energy_produced >= 0.0, "{:?}", s);
                assert!(s.energy_consumed >= 0.0, "{:?}", s);
            }
        }
    }

    #[test]
    fn test_storage_integrates_net_power() {
        let start = WalkState {
            coil_temp: 50.0,
            energy_produced: 300.0,
            energy_consumed: 0.0,
            energy_stored: 10.0,
        };
        let mut walk = seeded(start);
        walk.step(T).unwrap();
        let s = walk.state();
        let expected = 10.0 + (s.energy_produced - s.energy_consumed) * STORAGE_RATE;
        assert!((s.energy_stored - expected).abs() < 1e-9);

        let full = WalkState { energy_stored: 99.9, ..start };
        let mut walk = seeded(full);
        walk.step(T).unwrap();
        assert_eq!(walk.state().energy_stored, STORED_MAX);
    }

    #[test]
    fn test_history_evicts_after_capacity() {
        let mut walk = seeded(WalkState::default());
        let mut payload = None;
        for i in 0..=HISTORY_CAPACITY as i64 {
            payload = Some(walk.step(T + i * 2_000).unwrap());
        }
        let history = payload.unwrap().history;
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.first().unwrap().time_ms, T + 2_000);
        assert_eq!(history.last().unwrap().time_ms, T + 20 * 2_000);
        assert!(history.windows(2).all(|w| w[0].time_ms <= w[1].time_ms));
    }

    #[test]
    fn test_same_seed_replays_same_walk() {
        let mut a = seeded(WalkState::default());
        let mut b = seeded(WalkState::default());
        for i in 0..50 {
            assert_eq!(a.step(T + i).unwrap(), b.step(T + i).unwrap());
        }
    }

    #[test]
    fn test_current_does_not_advance() {
        let mut walk = seeded(WalkState::default());
        let before = walk.current(T).unwrap();
        assert!(before.history.is_empty());
        assert_eq!(before.snapshot.coil_temp, 45.0);

        let ticked = walk.tick(T + 2_000).unwrap();
        let state = walk.state();
        assert_eq!(walk.current(T + 3_000).unwrap(), ticked);
        assert_eq!(walk.current(T + 4_000).unwrap(), ticked);
        assert_eq!(walk.state(), state);
    }
}
