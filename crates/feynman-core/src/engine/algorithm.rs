//! Branch calculation: enumerates the fusion orders that build every tree-level
//! diagram of a process.
//!
//! The first generation picks the pivot with the most compatible partners;
//! every later generation pivots on the particle produced by the previous
//! fusion, which sits at index 0. The pivot is fused with each partner in
//! turn and the fusion is recorded as an [`Operation`]. When
//! three particles remain, the branch is closed. A branch is therefore a
//! recipe: replaying its operations on the external particles reproduces the
//! diagram.

use crate::core::interaction::{DiagramRule, InteractionError, VertexRule};
use crate::core::particles::Particle;
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, trace};

/// Label of the root branch; children append `"<k>."`.
pub const ROOT_LABEL: &str = "branch ";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GenerationError {
    #[error("At least 3 particles are needed for a diagram, got {0}")]
    TooFewParticles(usize),
    #[error("The process admits no tree-level diagram")]
    NoDiagrams,
    #[error("Vertex rule failed during branch calculation: {0}")]
    Interaction(#[from] InteractionError),
}

/// One step of a branch, with indices into the particle list at that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fuse the particles at the two indices; the product goes to the front.
    Fuse(usize, usize),
    /// Close the three remaining particles into the amplitude.
    Close,
}

impl Operation {
    pub fn indices(&self) -> Vec<usize> {
        match *self {
            Operation::Fuse(i, j) => vec![i, j],
            Operation::Close => vec![0, 1, 2],
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operation::Fuse(..) => 2,
            Operation::Close => 3,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Fuse(i, j) => write!(f, "({i}, {j})"),
            Operation::Close => write!(f, "(0, 1, 2)"),
        }
    }
}

/// A completed (or in-progress) sequence of operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Branch {
    pub label: String,
    pub operations: Vec<Operation>,
}

impl Branch {
    pub fn root() -> Self {
        Self {
            label: ROOT_LABEL.to_string(),
            operations: Vec::new(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.operations.last() == Some(&Operation::Close)
    }

    pub fn fusions(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| matches!(op, Operation::Fuse(..)))
            .count()
    }

    pub fn operations_string(&self) -> String {
        format_operations(&self.operations)
    }
}

/// Operations as a space separated string, e.g. `(0, 1) (0, 1, 2)`.
pub fn format_operations(operations: &[Operation]) -> String {
    operations
        .iter()
        .map(Operation::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// A branch under construction together with its current particle list.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingBranch {
    pub branch: Branch,
    pub particles: Vec<Particle>,
}

impl PendingBranch {
    pub fn root(particles: Vec<Particle>) -> Self {
        Self {
            branch: Branch::root(),
            particles,
        }
    }
}

/// Indices of the pivot followed by every particle of a different species, in list order.
pub fn filter_abc(pivot: usize, particles: &[Particle]) -> Vec<usize> {
    let Some(pivot_particle) = particles.get(pivot) else {
        return Vec::new();
    };
    std::iter::once(pivot)
        .chain(
            particles
                .iter()
                .enumerate()
                .filter(|(_, p)| p.species != pivot_particle.species)
                .map(|(i, _)| i),
        )
        .collect()
}

fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// The first index whose [`filter_abc`] list yields the most pairs.
pub fn max_comb(particles: &[Particle]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for index in 0..particles.len() {
        let combinations = pair_count(filter_abc(index, particles).len());
        if best.is_none_or(|(_, most)| combinations > most) {
            best = Some((index, combinations));
        }
    }
    best.map(|(index, _)| index)
}

/// Expands a branch by one generation.
///
/// Branches that are already closed are returned unchanged; branches that
/// cannot continue produce no children.
pub fn comb(pending: &PendingBranch) -> Result<Vec<PendingBranch>, GenerationError> {
    if pending.branch.is_closed() {
        return Ok(vec![pending.clone()]);
    }

    let particles = &pending.particles;
    if particles.len() == 3 {
        return match DiagramRule.close(&particles[0], &particles[1], &particles[2]) {
            Ok(amplitude) => {
                trace!(label = %pending.branch.label, %amplitude, "Closing branch.");
                let mut branch = pending.branch.clone();
                branch.operations.push(Operation::Close);
                Ok(vec![PendingBranch {
                    branch,
                    particles: particles.clone(),
                }])
            }
            Err(InteractionError::NotAllDistinct(..)) => {
                debug!(label = %pending.branch.label, "Dropping branch: final vertex is not allowed.");
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        };
    }

    // Only the external list is searched; afterwards the latest fusion product leads.
    let pivot = if pending.branch.operations.is_empty() {
        let Some(pivot) = max_comb(particles) else {
            return Ok(Vec::new());
        };
        pivot
    } else {
        0
    };
    let candidates = filter_abc(pivot, particles);
    let partners = &candidates[1..];
    if partners.is_empty() {
        debug!(label = %pending.branch.label, "Dropping branch: pivot has no partner.");
    }

    partners
        .iter()
        .enumerate()
        .map(|(k, &partner)| -> Result<PendingBranch, GenerationError> {
            let fused = DiagramRule.fuse(&particles[pivot], &particles[partner])?;
            let mut next = Vec::with_capacity(particles.len() - 1);
            next.push(fused);
            next.extend(
                particles
                    .iter()
                    .enumerate()
                    .filter(|&(i, _)| i != pivot && i != partner)
                    .map(|(_, p)| p.clone()),
            );

            let mut operations = pending.branch.operations.clone();
            operations.push(Operation::Fuse(pivot, partner));
            Ok(PendingBranch {
                branch: Branch {
                    label: format!("{}{}.", pending.branch.label, k + 1),
                    operations,
                },
                particles: next,
            })
        })
        .collect()
}

/// Applies [`comb`] to every branch of a generation.
pub fn comb_rec(generation: &[PendingBranch]) -> Result<Vec<PendingBranch>, GenerationError> {
    let mut next = Vec::new();
    for pending in generation {
        next.extend(comb(pending)?);
    }
    Ok(next)
}

/// Computes every closed branch for the given external particles.
#[instrument(skip_all, name = "branch_calculator", fields(particles = particles.len()))]
pub fn branch_calculator(particles: &[Particle]) -> Result<Vec<Branch>, GenerationError> {
    if particles.len() < 3 {
        return Err(GenerationError::TooFewParticles(particles.len()));
    }

    let mut generation = vec![PendingBranch::root(particles.to_vec())];
    for step in 0..particles.len() - 2 {
        generation = comb_rec(&generation)?;
        debug!(generation = step + 1, branches = generation.len(), "Expanded generation.");
    }

    let branches: Vec<Branch> = generation
        .into_iter()
        .map(|pending| pending.branch)
        .filter(Branch::is_closed)
        .collect();

    if branches.is_empty() {
        return Err(GenerationError::NoDiagrams);
    }
    Ok(branches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particles::Species;
    use std::collections::HashSet;

    fn process(species: &[(&str, Species)]) -> Vec<Particle> {
        species
            .iter()
            .map(|&(name, s)| Particle::incoming(name, s))
            .collect()
    }

    fn abab() -> Vec<Particle> {
        process(&[
            ("a1", Species::A),
            ("b1", Species::B),
            ("a2", Species::A),
            ("b2", Species::B),
        ])
    }

    #[test]
    fn filter_abc_puts_pivot_first() {
        let particles = abab();
        assert_eq!(filter_abc(0, &particles), vec![0, 1, 3]);
        assert_eq!(filter_abc(1, &particles), vec![1, 0, 2]);
        assert!(filter_abc(9, &particles).is_empty());
    }

    #[test]
    fn max_comb_picks_first_maximum() {
        assert_eq!(max_comb(&abab()), Some(0));
        let particles = process(&[
            ("a1", Species::A),
            ("a2", Species::A),
            ("b1", Species::B),
            ("c1", Species::C),
        ]);
        // b1 and c1 both see three partners; b1 comes first.
        assert_eq!(max_comb(&particles), Some(2));
        assert_eq!(max_comb(&[]), None);
    }

    #[test]
    fn abab_yields_two_branches() {
        let branches = branch_calculator(&abab()).unwrap();
        assert_eq!(
            branches,
            vec![
                Branch {
                    label: "branch 1.".to_string(),
                    operations: vec![Operation::Fuse(0, 1), Operation::Close],
                },
                Branch {
                    label: "branch 2.".to_string(),
                    operations: vec![Operation::Fuse(0, 3), Operation::Close],
                },
            ]
        );
    }

    #[test]
    fn three_particles_close_immediately() {
        let branches = branch_calculator(&process(&[
            ("a", Species::A),
            ("b", Species::B),
            ("c", Species::C),
        ]))
        .unwrap();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].label, ROOT_LABEL);
        assert_eq!(branches[0].operations, vec![Operation::Close]);
    }

    #[test]
    fn forbidden_processes_have_no_diagrams() {
        let particles = process(&[
            ("a", Species::A),
            ("b", Species::B),
            ("c1", Species::C),
            ("c2", Species::C),
        ]);
        assert_eq!(
            branch_calculator(&particles),
            Err(GenerationError::NoDiagrams)
        );
        let same = process(&[("a1", Species::A), ("a2", Species::A), ("a3", Species::A)]);
        assert_eq!(branch_calculator(&same), Err(GenerationError::NoDiagrams));
    }

    #[test]
    fn too_few_particles_is_an_error() {
        let particles = process(&[("a", Species::A), ("b", Species::B)]);
        assert_eq!(
            branch_calculator(&particles),
            Err(GenerationError::TooFewParticles(2))
        );
    }

    #[test]
    fn every_branch_has_n_minus_three_fusions() {
        let particles = process(&[
            ("a1", Species::A),
            ("b1", Species::B),
            ("c1", Species::C),
            ("a2", Species::A),
            ("b2", Species::B),
            ("c2", Species::C),
        ]);
        let branches = branch_calculator(&particles).unwrap();
        assert!(!branches.is_empty());
        for branch in &branches {
            assert_eq!(branch.fusions(), 3);
            assert!(branch.is_closed());
            assert_eq!(branch.operations.len(), 4);
        }
        let labels: HashSet<_> = branches.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels.len(), branches.len());
    }

    #[test]
    fn later_generations_pivot_on_the_fused_particle() {
        let particles = process(&[
            ("a1", Species::A),
            ("b1", Species::B),
            ("c1", Species::C),
            ("a2", Species::A),
            ("b2", Species::B),
            ("c2", Species::C),
        ]);
        let branches = branch_calculator(&particles).unwrap();
        assert_eq!(branches.len(), 16);
        assert_eq!(
            branches[0],
            Branch {
                label: "branch 1.1.1.".to_string(),
                operations: vec![
                    Operation::Fuse(0, 1),
                    Operation::Fuse(0, 2),
                    Operation::Fuse(0, 1),
                    Operation::Close,
                ],
            }
        );
        assert_eq!(branches[15].label, "branch 4.2.2.");
        for branch in &branches {
            for operation in &branch.operations[1..] {
                assert_eq!(operation.indices()[0], 0, "{}", branch.label);
            }
        }
    }

    #[test]
    fn comb_after_first_fusion_ignores_max_comb() {
        // b1 would win max_comb here, but the fused particle at index 0 leads.
        let pending = PendingBranch {
            branch: Branch {
                label: "branch 1.".to_string(),
                operations: vec![Operation::Fuse(0, 1)],
            },
            particles: process(&[
                ("C(a1,b1)", Species::C),
                ("a2", Species::A),
                ("a3", Species::A),
                ("b1", Species::B),
                ("c1", Species::C),
            ]),
        };
        let children = comb(&pending).unwrap();
        let operations: Vec<_> = children
            .iter()
            .map(|child| *child.branch.operations.last().unwrap())
            .collect();
        assert_eq!(
            operations,
            [
                Operation::Fuse(0, 1),
                Operation::Fuse(0, 2),
                Operation::Fuse(0, 3)
            ]
        );
        assert_eq!(children[2].branch.label, "branch 1.3.");
    }

    #[test]
    fn comb_relabels_children() {
        let children = comb(&PendingBranch::root(abab())).unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].branch.label, "branch 1.");
        let names: Vec<_> = children[0].particles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["C(a1,b1)", "a2", "b2"]);
        let names: Vec<_> = children[1].particles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["C(a1,b2)", "b1", "a2"]);
    }

    #[test]
    fn operation_display_matches_index_tuples() {
        let branch = Branch {
            label: "branch 1.".to_string(),
            operations: vec![Operation::Fuse(0, 3), Operation::Close],
        };
        assert_eq!(branch.operations_string(), "(0, 3) (0, 1, 2)");
    }
}
