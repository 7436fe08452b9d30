// Domain errors
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("timestamp {0}ms cannot be represented as local time")]
    ClockOutOfRange(i64),
}
