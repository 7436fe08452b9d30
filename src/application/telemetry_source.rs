// Source trait for telemetry generators
use crate::domain::error::GenerationError;
use crate::domain::telemetry::StatsPayload;
use std::time::Duration;

pub trait TelemetrySource: Send {
    /// Short identifier used in logs
    fn name(&self) -> &'static str;

    /// Broadcast period used when none is configured
    fn default_interval(&self) -> Duration;

    /// Produce the payload for one timer tick, advancing any internal state
    fn tick(&mut self, now_ms: i64) -> Result<StatsPayload, GenerationError>;

    /// Payload for an on-demand query. Never advances state.
    fn current(&self, now_ms: i64) -> Result<StatsPayload, GenerationError>;
}
