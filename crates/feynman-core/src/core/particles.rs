use super::utils::numeric::{Complex64, I, real};
use phf::{Map, phf_map};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The three scalar species of the ABC model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Species {
    A,
    B,
    C,
}

static SPECIES_ALIASES: Map<&'static str, Species> = phf_map! {
    "A" => Species::A,
    "a" => Species::A,
    "ParticleA" => Species::A,
    "B" => Species::B,
    "b" => Species::B,
    "ParticleB" => Species::B,
    "C" => Species::C,
    "c" => Species::C,
    "ParticleC" => Species::C,
};

impl Species {
    pub const ALL: [Species; 3] = [Species::A, Species::B, Species::C];

    /// Mass used when no model overrides it.
    pub const fn default_mass(self) -> f64 {
        match self {
            Species::A => 2.0,
            Species::B => 1.0,
            Species::C => 0.5,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Species::A => "A",
            Species::B => "B",
            Species::C => "C",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown particle species: '{0}' (expected one of A, B, C)")]
pub struct ParseSpeciesError(pub String);

impl FromStr for Species {
    type Err = ParseSpeciesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SPECIES_ALIASES
            .get(s.trim())
            .copied()
            .ok_or_else(|| ParseSpeciesError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Species {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParticleError {
    #[error("Virtual particle '{name}' needs an explicit state")]
    MissingState { name: String },
    #[error("Real particle '{name}' has no propagator")]
    NoPropagator { name: String },
    #[error("Propagator of '{name}' is singular at p^2 = m^2 = {mass_squared}")]
    OnShellPole { name: String, mass_squared: f64 },
}

/// Common view on everything that can sit on a vertex leg.
pub trait Leg {
    fn name(&self) -> &str;
    fn species(&self) -> Species;
}

/// A symbolic particle: a name, a species and its role in the process.
///
/// `real` particles are external legs; virtual ones are produced by fusing two
/// others and carry a propagator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Particle {
    pub name: String,
    pub species: Species,
    pub incoming: bool,
    pub real: bool,
}

impl Particle {
    pub fn new(name: impl Into<String>, species: Species, incoming: bool, real: bool) -> Self {
        Self {
            name: name.into(),
            species,
            incoming,
            real,
        }
    }

    /// An external, incoming particle.
    pub fn incoming(name: impl Into<String>, species: Species) -> Self {
        Self::new(name, species, true, true)
    }

    /// An external, outgoing particle.
    pub fn outgoing(name: impl Into<String>, species: Species) -> Self {
        Self::new(name, species, false, true)
    }
}

impl Leg for Particle {
    fn name(&self) -> &str {
        &self.name
    }

    fn species(&self) -> Species {
        self.species
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A particle together with a scalar momentum and a complex state.
///
/// For virtual particles the stored state is the vertex factor accumulated so
/// far; [`ParticleState::state`] multiplies in the propagator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    pub particle: Particle,
    pub momentum: f64,
    pub mass: f64,
    stored_state: Complex64,
}

impl ParticleState {
    /// Builds a state using the species' default mass.
    pub fn new(
        particle: Particle,
        momentum: f64,
        state: Option<Complex64>,
    ) -> Result<Self, ParticleError> {
        let mass = particle.species.default_mass();
        Self::with_mass(particle, momentum, mass, state)
    }

    /// Builds a state with an explicit mass.
    ///
    /// # Errors
    ///
    /// Returns [`ParticleError::MissingState`] when `state` is `None` for a
    /// virtual particle. Real particles default to a unit state.
    pub fn with_mass(
        particle: Particle,
        momentum: f64,
        mass: f64,
        state: Option<Complex64>,
    ) -> Result<Self, ParticleError> {
        let stored_state = match state {
            Some(value) => value,
            None if particle.real => real(1.0),
            None => {
                return Err(ParticleError::MissingState {
                    name: particle.name,
                });
            }
        };
        Ok(Self {
            particle,
            momentum,
            mass,
            stored_state,
        })
    }

    pub fn is_real(&self) -> bool {
        self.particle.real
    }

    pub fn is_incoming(&self) -> bool {
        self.particle.incoming
    }

    pub fn stored_state(&self) -> Complex64 {
        self.stored_state
    }

    /// `i / (p^2 - m^2)`, defined for virtual particles only.
    pub fn propagator(&self) -> Result<Complex64, ParticleError> {
        if self.particle.real {
            return Err(ParticleError::NoPropagator {
                name: self.particle.name.clone(),
            });
        }
        let mass_squared = self.mass * self.mass;
        let denominator = self.momentum * self.momentum - mass_squared;
        if denominator == 0.0 {
            return Err(ParticleError::OnShellPole {
                name: self.particle.name.clone(),
                mass_squared,
            });
        }
        Ok(I / denominator)
    }

    /// The value this particle contributes at the next vertex.
    pub fn state(&self) -> Result<Complex64, ParticleError> {
        if self.particle.real {
            Ok(self.stored_state)
        } else {
            Ok(self.stored_state * self.propagator()?)
        }
    }

    /// The momentum with incoming particles counted positive and outgoing negative.
    pub fn signed_momentum(&self) -> f64 {
        if self.particle.incoming {
            self.momentum
        } else {
            -self.momentum
        }
    }
}

impl Leg for ParticleState {
    fn name(&self) -> &str {
        &self.particle.name
    }

    fn species(&self) -> Species {
        self.particle.species
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::numeric::is_close_complex;

    #[test]
    fn species_parses_all_aliases() {
        assert_eq!("A".parse::<Species>().unwrap(), Species::A);
        assert_eq!("b".parse::<Species>().unwrap(), Species::B);
        assert_eq!(" ParticleC ".parse::<Species>().unwrap(), Species::C);
        assert!("D".parse::<Species>().is_err());
    }

    #[test]
    fn default_masses_match_abc_model() {
        assert_eq!(Species::A.default_mass(), 2.0);
        assert_eq!(Species::B.default_mass(), 1.0);
        assert_eq!(Species::C.default_mass(), 0.5);
    }

    #[test]
    fn real_particle_defaults_to_unit_state() {
        let state = ParticleState::new(Particle::incoming("a1", Species::A), 3.0, None).unwrap();
        assert_eq!(state.state().unwrap(), real(1.0));
        assert_eq!(state.mass, 2.0);
    }

    #[test]
    fn virtual_particle_without_state_is_rejected() {
        let particle = Particle::new("C(a,b)", Species::C, true, false);
        let err = ParticleState::new(particle, 1.0, None).unwrap_err();
        assert!(matches!(err, ParticleError::MissingState { .. }));
    }

    #[test]
    fn real_particle_has_no_propagator() {
        let state = ParticleState::new(Particle::outgoing("b", Species::B), 1.0, None).unwrap();
        assert!(matches!(
            state.propagator(),
            Err(ParticleError::NoPropagator { .. })
        ));
    }

    #[test]
    fn virtual_state_includes_propagator() {
        let particle = Particle::new("C(a,b)", Species::C, true, false);
        let state = ParticleState::new(particle, 1.5, Some(real(2.0))).unwrap();
        let expected = real(2.0) * I / (1.5 * 1.5 - 0.25);
        assert!(is_close_complex(state.state().unwrap(), expected));
    }

    #[test]
    fn propagator_pole_is_reported() {
        let particle = Particle::new("B(a,c)", Species::B, true, false);
        let state = ParticleState::new(particle, 1.0, Some(real(1.0))).unwrap();
        assert!(matches!(
            state.propagator(),
            Err(ParticleError::OnShellPole { .. })
        ));
    }

    #[test]
    fn signed_momentum_flips_for_outgoing() {
        let inc = ParticleState::new(Particle::incoming("a", Species::A), 4.0, None).unwrap();
        let out = ParticleState::new(Particle::outgoing("a", Species::A), 4.0, None).unwrap();
        assert_eq!(inc.signed_momentum(), 4.0);
        assert_eq!(out.signed_momentum(), -4.0);
    }
}
