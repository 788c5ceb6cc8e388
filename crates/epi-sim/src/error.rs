use thiserror::Error;

use epi_behavior::BehaviorError;
use epi_core::{CoreError, HostId, PathogenId};
use epi_pathogen::PathogenError;
use epi_population::PopulationError;
use epi_schedule::ScheduleError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("unknown pathogen {0}")]
    UnknownPathogen(PathogenId),

    #[error("unknown host {0}")]
    UnknownHost(HostId),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Pathogen(#[from] PathogenError),

    #[error(transparent)]
    Population(#[from] PopulationError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type SimResult<T> = Result<T, SimError>;
