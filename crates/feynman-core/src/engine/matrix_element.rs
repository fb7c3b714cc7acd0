use super::algorithm::Operation;
use super::replay::{Replay, ReplayError};
use crate::core::interaction::AmplitudeRule;
use crate::core::model::AbcModel;
use crate::core::particles::ParticleState;
use crate::core::utils::numeric::Complex64;

/// Numeric evaluation of one diagram from its external states and operations.
#[derive(Debug, Clone)]
pub struct MatrixElement {
    replay: Replay<AmplitudeRule>,
}

impl MatrixElement {
    pub fn new(
        externals: Vec<ParticleState>,
        operations: Vec<Operation>,
        model: AbcModel,
    ) -> Result<Self, ReplayError> {
        Ok(Self {
            replay: Replay::new(AmplitudeRule::new(model), externals, operations)?,
        })
    }

    pub fn number_of_operations(&self) -> usize {
        self.replay.number_of_operations()
    }

    pub fn do_next_operation(&mut self) -> Result<(), ReplayError> {
        self.replay.do_next_operation().map(|_| ())
    }

    pub fn history_of_particle_lists(&self) -> &[Vec<ParticleState>] {
        self.replay.history_of_particle_lists()
    }

    /// Replays the remaining operations and returns the amplitude.
    pub fn evaluate(mut self) -> Result<Complex64, ReplayError> {
        self.replay.run()
    }
}
