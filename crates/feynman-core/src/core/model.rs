use super::particles::Species;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_COUPLING: f64 = 0.1;

#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Failed to read file '{path}': {source}")]
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
    #[error("Invalid model parameter: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Masses {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "C")]
    pub c: f64,
}

impl Default for Masses {
    fn default() -> Self {
        Self {
            a: Species::A.default_mass(),
            b: Species::B.default_mass(),
            c: Species::C.default_mass(),
        }
    }
}

impl Masses {
    pub fn of(&self, species: Species) -> f64 {
        match species {
            Species::A => self.a,
            Species::B => self.b,
            Species::C => self.c,
        }
    }

    pub fn set(&mut self, species: Species, mass: f64) {
        match species {
            Species::A => self.a = mass,
            Species::B => self.b = mass,
            Species::C => self.c = mass,
        }
    }
}

/// Parameters of the ABC model: one mass per species and the cubic coupling.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AbcModel {
    pub masses: Masses,
    pub coupling: f64,
}

impl Default for AbcModel {
    fn default() -> Self {
        Self {
            masses: Masses::default(),
            coupling: DEFAULT_COUPLING,
        }
    }
}

impl AbcModel {
    pub fn mass_of(&self, species: Species) -> f64 {
        self.masses.of(species)
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    /// Rejects negative or non-finite masses and a non-finite coupling.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        for species in Species::ALL {
            let mass = self.mass_of(species);
            if !mass.is_finite() || mass < 0.0 {
                return Err(ModelLoadError::Invalid(format!(
                    "mass of {species} must be a non-negative number, got {mass}"
                )));
            }
        }
        if !self.coupling.is_finite() {
            return Err(ModelLoadError::Invalid(format!(
                "coupling must be finite, got {}",
                self.coupling
            )));
        }
        Ok(())
    }

    /// Loads model parameters from a TOML file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ModelLoadError> {
        let path_str = path.to_string_lossy().to_string();
        let content = fs::read_to_string(path).map_err(|e| ModelLoadError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        let model: AbcModel = toml::from_str(&content).map_err(|e| ModelLoadError::Toml {
            path: path_str,
            source: e,
        })?;
        model.validate()?;
        Ok(model)
    }
}
