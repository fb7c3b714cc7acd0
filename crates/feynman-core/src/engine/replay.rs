use super::algorithm::Operation;
use crate::core::interaction::{InteractionError, VertexOutcome, VertexRule};
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ReplayError {
    #[error("No operations to replay")]
    NoOperations,
    #[error("All {0} operations have already been applied")]
    Exhausted(usize),
    #[error("Operation index {index} is out of range for {len} particles")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Operation uses index {0} more than once")]
    RepeatedIndex(usize),
    #[error("Replay finished without closing the diagram")]
    Unterminated,
    #[error(transparent)]
    Interaction(#[from] InteractionError),
}

/// What one applied operation consumed and produced.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexEvent<L, M> {
    pub operation: Operation,
    pub inputs: Vec<L>,
    pub outcome: VertexOutcome<L, M>,
}

/// Steps through a branch's operations with a given vertex rule.
#[derive(Debug, Clone)]
pub struct Replay<R: VertexRule> {
    rule: R,
    operations: Vec<Operation>,
    cursor: usize,
    current: Vec<R::Leg>,
    history_of_particle_lists: Vec<Vec<R::Leg>>,
    history_of_outcomes: Vec<VertexOutcome<R::Leg, R::Amplitude>>,
}

impl<R: VertexRule> Replay<R> {
    pub fn new(
        rule: R,
        externals: Vec<R::Leg>,
        operations: Vec<Operation>,
    ) -> Result<Self, ReplayError> {
        if operations.is_empty() {
            return Err(ReplayError::NoOperations);
        }
        Ok(Self {
            rule,
            operations,
            cursor: 0,
            history_of_particle_lists: vec![externals.clone()],
            current: externals,
            history_of_outcomes: Vec::new(),
        })
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    pub fn number_of_operations(&self) -> usize {
        self.operations.len()
    }

    pub fn remaining(&self) -> usize {
        self.operations.len() - self.cursor
    }

    pub fn current_particles(&self) -> &[R::Leg] {
        &self.current
    }

    /// The particle list before the first and after every fusion.
    pub fn history_of_particle_lists(&self) -> &[Vec<R::Leg>] {
        &self.history_of_particle_lists
    }

    pub fn history_of_outcomes(&self) -> &[VertexOutcome<R::Leg, R::Amplitude>] {
        &self.history_of_outcomes
    }

    fn validate(&self, indices: &[usize]) -> Result<(), ReplayError> {
        let len = self.current.len();
        for (position, &index) in indices.iter().enumerate() {
            if index >= len {
                return Err(ReplayError::IndexOutOfRange { index, len });
            }
            if indices[..position].contains(&index) {
                return Err(ReplayError::RepeatedIndex(index));
            }
        }
        Ok(())
    }

    pub fn do_next_operation(
        &mut self,
    ) -> Result<VertexEvent<R::Leg, R::Amplitude>, ReplayError> {
        let operation = *self
            .operations
            .get(self.cursor)
            .ok_or(ReplayError::Exhausted(self.operations.len()))?;
        let indices = operation.indices();
        self.validate(&indices)?;

        let inputs: Vec<R::Leg> = indices.iter().map(|&i| self.current[i].clone()).collect();
        let legs: Vec<&R::Leg> = inputs.iter().collect();
        let outcome = self.rule.interact(&legs)?;

        if let VertexOutcome::Particle(product) = &outcome {
            let mut next = Vec::with_capacity(self.current.len() - 1);
            next.push(product.clone());
            next.extend(
                self.current
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| !indices.contains(i))
                    .map(|(_, leg)| leg.clone()),
            );
            self.current = next;
            self.history_of_particle_lists.push(self.current.clone());
        }
        trace!(step = self.cursor, %operation, "Applied operation.");

        self.cursor += 1;
        self.history_of_outcomes.push(outcome.clone());
        Ok(VertexEvent {
            operation,
            inputs,
            outcome,
        })
    }

    /// Applies all remaining operations and returns the closing amplitude.
    pub fn run(&mut self) -> Result<R::Amplitude, ReplayError> {
        let mut last = None;
        while self.remaining() > 0 {
            last = Some(self.do_next_operation()?.outcome);
        }
        match last {
            Some(VertexOutcome::Amplitude(amplitude)) => Ok(amplitude),
            _ => Err(ReplayError::Unterminated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interaction::DiagramRule;
    use crate::core::particles::{Particle, Species};

    fn abab() -> Vec<Particle> {
        vec![
            Particle::incoming("a1", Species::A),
            Particle::incoming("b1", Species::B),
            Particle::outgoing("a2", Species::A),
            Particle::outgoing("b2", Species::B),
        ]
    }

    #[test]
    fn fusion_moves_product_to_front() {
        let mut replay = Replay::new(
            DiagramRule,
            abab(),
            vec![Operation::Fuse(0, 1), Operation::Close],
        )
        .unwrap();
        let event = replay.do_next_operation().unwrap();
        assert_eq!(event.inputs.len(), 2);
        let names: Vec<_> = replay
            .current_particles()
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["C(a1,b1)", "a2", "b2"]);
        assert_eq!(replay.history_of_particle_lists().len(), 2);
    }

    #[test]
    fn run_returns_closing_amplitude() {
        let mut replay = Replay::new(
            DiagramRule,
            abab(),
            vec![Operation::Fuse(0, 1), Operation::Close],
        )
        .unwrap();
        assert_eq!(replay.run().unwrap(), "M(C(a1,b1),a2,b2)");
        assert_eq!(replay.remaining(), 0);
        assert_eq!(replay.do_next_operation(), Err(ReplayError::Exhausted(2)));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut replay = Replay::new(DiagramRule, abab(), vec![Operation::Fuse(0, 4)]).unwrap();
        assert_eq!(
            replay.do_next_operation(),
            Err(ReplayError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn repeated_index_is_rejected() {
        let mut replay = Replay::new(DiagramRule, abab(), vec![Operation::Fuse(1, 1)]).unwrap();
        assert_eq!(
            replay.do_next_operation(),
            Err(ReplayError::RepeatedIndex(1))
        );
    }

    #[test]
    fn unclosed_replay_is_unterminated() {
        let mut replay = Replay::new(DiagramRule, abab(), vec![Operation::Fuse(0, 1)]).unwrap();
        assert_eq!(replay.run(), Err(ReplayError::Unterminated));
    }

    #[test]
    fn empty_operation_list_is_rejected() {
        assert!(matches!(
            Replay::new(DiagramRule, abab(), Vec::new()),
            Err(ReplayError::NoOperations)
        ));
    }
}
