use crate::core::model::{AbcModel, ModelLoadError};
use crate::core::particles::{
    ParseSpeciesError, Particle, ParticleError, ParticleState, Species,
};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessLoadError {
    #[error("Failed to read process file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML from '{path}': {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid species for particle '{name}' in '{path}': {source}")]
    Species {
        path: String,
        name: String,
        #[source]
        source: ParseSpeciesError,
    },
    #[error("Process '{path}' defines no particles")]
    Empty { path: String },
    #[error("Particle name '{name}' appears more than once in '{path}'")]
    DuplicateName { path: String, name: String },
    #[error("Invalid model in '{path}': {source}")]
    Model {
        path: String,
        #[source]
        source: ModelLoadError,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawProcess {
    #[serde(default)]
    model: Option<AbcModel>,
    #[serde(default, rename = "particle")]
    particles: Vec<RawParticle>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawParticle {
    name: String,
    species: String,
    #[serde(default = "default_incoming")]
    incoming: bool,
    #[serde(default)]
    momentum: f64,
}

fn default_incoming() -> bool {
    true
}

/// One external leg of a process.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalParticle {
    pub name: String,
    pub species: Species,
    pub incoming: bool,
    pub momentum: f64,
}

impl ExternalParticle {
    pub fn to_particle(&self) -> Particle {
        Particle::new(self.name.clone(), self.species, self.incoming, true)
    }
}

/// A scattering process: the model parameters and the external legs in order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSpec {
    pub model: AbcModel,
    pub particles: Vec<ExternalParticle>,
}

impl ProcessSpec {
    pub fn new(model: AbcModel, particles: Vec<ExternalParticle>) -> Self {
        Self { model, particles }
    }

    pub fn load(path: &Path) -> Result<Self, ProcessLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path).map_err(|e| ProcessLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::parse(&content, &path_str)
    }

    /// Parses a process from TOML text; `origin` only labels errors.
    pub fn parse(content: &str, origin: &str) -> Result<Self, ProcessLoadError> {
        let raw: RawProcess = toml::from_str(content).map_err(|e| ProcessLoadError::Toml {
            path: origin.to_string(),
            source: e,
        })?;

        let model = raw.model.unwrap_or_default();
        model.validate().map_err(|e| ProcessLoadError::Model {
            path: origin.to_string(),
            source: e,
        })?;

        if raw.particles.is_empty() {
            return Err(ProcessLoadError::Empty {
                path: origin.to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut particles = Vec::with_capacity(raw.particles.len());
        for entry in raw.particles {
            if !seen.insert(entry.name.clone()) {
                return Err(ProcessLoadError::DuplicateName {
                    path: origin.to_string(),
                    name: entry.name,
                });
            }
            let species = entry
                .species
                .parse::<Species>()
                .map_err(|e| ProcessLoadError::Species {
                    path: origin.to_string(),
                    name: entry.name.clone(),
                    source: e,
                })?;
            particles.push(ExternalParticle {
                name: entry.name,
                species,
                incoming: entry.incoming,
                momentum: entry.momentum,
            });
        }

        Ok(Self { model, particles })
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The external legs as symbolic particles.
    pub fn symbolic_particles(&self) -> Vec<Particle> {
        self.particles
            .iter()
            .map(ExternalParticle::to_particle)
            .collect()
    }

    /// The external legs as unit states, with masses taken from `model`.
    pub fn states(&self, model: &AbcModel) -> Result<Vec<ParticleState>, ParticleError> {
        self.particles
            .iter()
            .map(|p| {
                ParticleState::with_mass(
                    p.to_particle(),
                    p.momentum,
                    model.mass_of(p.species),
                    None,
                )
            })
            .collect()
    }
}
