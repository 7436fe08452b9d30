// Application layer - Generators, stats service and broadcast timer
pub mod broadcaster;
pub mod deterministic;
pub mod random_walk;
pub mod stats_service;
pub mod telemetry_source;
