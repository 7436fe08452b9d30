// Domain layer - Telemetry models and invariants
pub mod error;
pub mod history;
pub mod telemetry;
