//! Vertex rules of the ABC model.
//!
//! Every vertex joins one A, one B and one C line. Read as a fusion, two
//! distinct species produce the third; read as a closure, three distinct
//! species terminate a diagram. [`VertexRule`] abstracts over what a leg is,
//! so the same replay drives both the symbolic diagram builder
//! ([`DiagramRule`]) and the numeric amplitude evaluation ([`AmplitudeRule`]).

use super::model::AbcModel;
use super::particles::{Leg, Particle, ParticleError, ParticleState, Species};
use super::utils::numeric::{Complex64, I};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InteractionError {
    #[error("A vertex takes 2 or 3 legs, got {0}")]
    InvalidLegCount(usize),
    #[error("Forbidden fusion of '{first}' and '{second}'")]
    Forbidden { first: String, second: String },
    #[error("Cannot close vertex with '{0}', '{1}', '{2}': species are not all distinct")]
    NotAllDistinct(String, String, String),
    #[error(transparent)]
    Particle(#[from] ParticleError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionKind {
    Fusion,
    Closure,
}

impl InteractionKind {
    pub fn from_leg_count(legs: usize) -> Result<Self, InteractionError> {
        match legs {
            2 => Ok(InteractionKind::Fusion),
            3 => Ok(InteractionKind::Closure),
            n => Err(InteractionError::InvalidLegCount(n)),
        }
    }

    /// Number of particles leaving the vertex.
    pub const fn output_particles(self) -> usize {
        match self {
            InteractionKind::Fusion => 1,
            InteractionKind::Closure => 0,
        }
    }
}

/// The species produced by fusing `first` and `second`, if the pair couples.
pub fn fusion_product(first: Species, second: Species) -> Option<Species> {
    match (first, second) {
        (Species::A, Species::B) | (Species::B, Species::A) => Some(Species::C),
        (Species::A, Species::C) | (Species::C, Species::A) => Some(Species::B),
        (Species::B, Species::C) | (Species::C, Species::B) => Some(Species::A),
        _ => None,
    }
}

pub fn all_distinct(a: Species, b: Species, c: Species) -> bool {
    a != b && b != c && a != c
}

fn fused_name(species: Species, first: &str, second: &str) -> String {
    format!("{species}({first},{second})")
}

fn product_of<L: Leg>(first: &L, second: &L) -> Result<Species, InteractionError> {
    fusion_product(first.species(), second.species()).ok_or_else(|| InteractionError::Forbidden {
        first: first.name().to_string(),
        second: second.name().to_string(),
    })
}

fn check_closure<L: Leg>(a: &L, b: &L, c: &L) -> Result<(), InteractionError> {
    if all_distinct(a.species(), b.species(), c.species()) {
        Ok(())
    } else {
        Err(InteractionError::NotAllDistinct(
            a.name().to_string(),
            b.name().to_string(),
            c.name().to_string(),
        ))
    }
}

/// Result of applying a vertex.
#[derive(Debug, Clone, PartialEq)]
pub enum VertexOutcome<L, M> {
    /// A fusion produced a new (virtual) leg.
    Particle(L),
    /// A closure produced the amplitude.
    Amplitude(M),
}

impl<L, M> VertexOutcome<L, M> {
    pub fn particle(&self) -> Option<&L> {
        match self {
            VertexOutcome::Particle(leg) => Some(leg),
            VertexOutcome::Amplitude(_) => None,
        }
    }

    pub fn amplitude(&self) -> Option<&M> {
        match self {
            VertexOutcome::Particle(_) => None,
            VertexOutcome::Amplitude(amplitude) => Some(amplitude),
        }
    }
}

pub trait VertexRule {
    type Leg: Leg + Clone + fmt::Debug;
    type Amplitude: Clone + fmt::Debug;

    fn fuse(&self, first: &Self::Leg, second: &Self::Leg) -> Result<Self::Leg, InteractionError>;

    fn close(
        &self,
        a: &Self::Leg,
        b: &Self::Leg,
        c: &Self::Leg,
    ) -> Result<Self::Amplitude, InteractionError>;

    /// Dispatches on the number of legs.
    fn interact(
        &self,
        legs: &[&Self::Leg],
    ) -> Result<VertexOutcome<Self::Leg, Self::Amplitude>, InteractionError> {
        match (InteractionKind::from_leg_count(legs.len())?, legs) {
            (InteractionKind::Fusion, [first, second]) => {
                self.fuse(first, second).map(VertexOutcome::Particle)
            }
            (InteractionKind::Closure, [a, b, c]) => {
                self.close(a, b, c).map(VertexOutcome::Amplitude)
            }
            _ => Err(InteractionError::InvalidLegCount(legs.len())),
        }
    }
}

/// Symbolic rule: fusions name the virtual particle, closures name the amplitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagramRule;

impl VertexRule for DiagramRule {
    type Leg = Particle;
    type Amplitude = String;

    fn fuse(&self, first: &Particle, second: &Particle) -> Result<Particle, InteractionError> {
        let species = product_of(first, second)?;
        Ok(Particle::new(
            fused_name(species, &first.name, &second.name),
            species,
            true,
            false,
        ))
    }

    fn close(&self, a: &Particle, b: &Particle, c: &Particle) -> Result<String, InteractionError> {
        check_closure(a, b, c)?;
        Ok(format!("M({},{},{})", a.name, b.name, c.name))
    }
}

/// Numeric rule: every vertex contributes `-i * coupling`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmplitudeRule {
    pub model: AbcModel,
}

impl AmplitudeRule {
    pub fn new(model: AbcModel) -> Self {
        Self { model }
    }

    pub fn vertex_factor(&self) -> Complex64 {
        -I * self.model.coupling
    }
}

impl VertexRule for AmplitudeRule {
    type Leg = ParticleState;
    type Amplitude = Complex64;

    fn fuse(
        &self,
        first: &ParticleState,
        second: &ParticleState,
    ) -> Result<ParticleState, InteractionError> {
        let species = product_of(first, second)?;
        let momentum = first.signed_momentum() + second.signed_momentum();
        let state = self.vertex_factor() * first.state()? * second.state()?;
        let particle = Particle::new(
            fused_name(species, first.name(), second.name()),
            species,
            true,
            false,
        );
        Ok(ParticleState::with_mass(
            particle,
            momentum,
            self.model.mass_of(species),
            Some(state),
        )?)
    }

    fn close(
        &self,
        a: &ParticleState,
        b: &ParticleState,
        c: &ParticleState,
    ) -> Result<Complex64, InteractionError> {
        check_closure(a, b, c)?;
        Ok(a.state()? * b.state()? * c.state()? * self.vertex_factor())
    }
}
