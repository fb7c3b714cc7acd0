use thiserror::Error;

use super::algorithm::GenerationError;
use super::replay::ReplayError;
use crate::core::particles::ParticleError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Branch calculation failed: {source}")]
    Generation {
        #[from]
        source: GenerationError,
    },

    #[error("Replay of branch '{label}' failed: {source}")]
    Replay {
        label: String,
        #[source]
        source: ReplayError,
    },

    #[error("Invalid external state: {source}")]
    Particle {
        #[from]
        source: ParticleError,
    },

    #[error("Branch index {index} is out of range for {len} branches")]
    BranchOutOfRange { index: usize, len: usize },

    #[error("External states do not match the process: {0}")]
    StateMismatch(String),

    #[error("Internal logic error: {0}")]
    Internal(String),
}
