use thiserror::Error;

use epi_core::{AgentId, HostId, PlaceId};

#[derive(Debug, Error)]
pub enum PopulationError {
    #[error("unknown place {0}")]
    UnknownPlace(PlaceId),

    #[error("unknown host {0}")]
    UnknownHost(HostId),

    #[error("unknown agent {0}")]
    UnknownAgent(AgentId),

    #[error("population configuration error: {0}")]
    Config(String),
}

pub type PopulationResult<T> = Result<T, PopulationError>;
