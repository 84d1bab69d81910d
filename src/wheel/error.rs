use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WheelError {
    #[error("wheel needs at least one reward")]
    NoSegments,

    #[error("wheel supports at most {max} segments, got {count}")]
    TooManySegments { count: usize, max: usize },

    #[error("{field} has {actual} entries but there are {expected} rewards")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("winner {0:?} is not one of the configured rewards")]
    UnknownWinner(String),

    #[error("winner index {index} is out of range for {count} segments")]
    WinnerOutOfRange { index: usize, count: usize },

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("spin duration must be greater than zero")]
    InvalidDuration,

    #[error("invalid radii: inner {inner}, outer {outer}")]
    InvalidRadius { inner: f64, outer: f64 },

    #[error("a spin is already in progress")]
    AlreadySpinning,

    #[error("no spin is in progress")]
    NotSpinning,

    #[error("spin already finished, reset the wheel first")]
    NeedsReset,

    #[error("wheel has been torn down")]
    Detached,
}
