use super::KinematicsError;
use super::lorentz::LorentzVector;
use crate::core::utils::numeric::is_close;
use std::ops::{Add, Neg, Sub};

/// A real four-momentum `(E, px, py, pz)` with an optional mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FourMomentum {
    vector: LorentzVector<f64>,
    mass: Option<f64>,
}

fn proposed_mass(vector: &LorentzVector<f64>) -> Option<f64> {
    let invariant = vector.squared();
    (invariant >= 0.0).then(|| invariant.sqrt())
}

impl FourMomentum {
    /// Builds a momentum whose mass is the invariant mass, when it is real.
    pub fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self::from_invariant(LorentzVector::new(e, px, py, pz))
    }

    /// Builds a momentum with an explicit mass.
    pub fn with_mass(e: f64, px: f64, py: f64, pz: f64, mass: f64) -> Result<Self, KinematicsError> {
        Self::from_vector(LorentzVector::new(e, px, py, pz), Some(mass))
    }

    pub fn from_vector(
        vector: LorentzVector<f64>,
        mass: Option<f64>,
    ) -> Result<Self, KinematicsError> {
        match mass {
            Some(m) if m < 0.0 => Err(KinematicsError::NegativeMass(m)),
            Some(m) => Ok(Self {
                vector,
                mass: Some(m),
            }),
            None => Ok(Self::from_invariant(vector)),
        }
    }

    fn from_invariant(vector: LorentzVector<f64>) -> Self {
        Self {
            mass: proposed_mass(&vector),
            vector,
        }
    }

    pub fn e(&self) -> f64 {
        self.vector.x0
    }

    pub fn px(&self) -> f64 {
        self.vector.x1
    }

    pub fn py(&self) -> f64 {
        self.vector.x2
    }

    pub fn pz(&self) -> f64 {
        self.vector.x3
    }

    pub fn vector(&self) -> &LorentzVector<f64> {
        &self.vector
    }

    pub fn mass(&self) -> Option<f64> {
        self.mass
    }

    /// `p * p` in the Minkowski metric.
    pub fn invariant_mass_squared(&self) -> f64 {
        self.vector.squared()
    }

    /// Whether `p * p` matches the squared mass.
    ///
    /// # Errors
    ///
    /// Returns [`KinematicsError::MissingMass`] when the momentum carries no mass.
    pub fn is_on_shell(&self) -> Result<bool, KinematicsError> {
        let mass = self.mass.ok_or(KinematicsError::MissingMass)?;
        Ok(is_close(self.invariant_mass_squared(), mass * mass))
    }

    pub fn dot(&self, other: &FourMomentum) -> f64 {
        self.vector.dot(&other.vector)
    }
}

impl Add for FourMomentum {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_invariant(self.vector + rhs.vector)
    }
}

impl Sub for FourMomentum {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_invariant(self.vector - rhs.vector)
    }
}

impl Neg for FourMomentum {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            vector: -self.vector,
            mass: self.mass,
        }
    }
}
