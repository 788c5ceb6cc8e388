use thiserror::Error;

use epi_core::CoreError;

#[derive(Debug, Error)]
pub enum PathogenError {
    #[error("pathogen configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type PathogenResult<T> = Result<T, PathogenError>;
