use thiserror::Error;

use epi_core::{CoreError, Time};

#[derive(Debug, Error)]
pub enum ScheduleError {
    /// A phase was added with a zero, negative, or non-finite duration.
    #[error("invalid phase duration {0}: must be > 0")]
    InvalidDuration(Time),

    #[error("schedule has no phases")]
    EmptySchedule,

    #[error("schedule parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
