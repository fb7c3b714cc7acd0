//! Relativistic kinematics: Lorentz vectors, four-momenta, polarisation
//! vectors and the Dirac algebra needed to evaluate fermion lines.
//!
//! The scalar ABC model itself only needs momentum moduli; this module provides
//! the building blocks for models with spin.

pub mod dirac;
pub mod gamma;
pub mod lorentz;
pub mod momentum;
pub mod polarisation;
pub mod spinor;
pub mod utils;

pub use dirac::{AdjointBiSpinor, BiSpinor, DiracMatrix};
pub use gamma::{feynman_slash, gamma_mu, gamma0, gamma1, gamma2, gamma3, gamma5};
pub use lorentz::LorentzVector;
pub use momentum::FourMomentum;
pub use polarisation::PolarisationVector;
pub use spinor::{
    FermionBaseSpinors, FermionSpinor, SpinorValue, fermion_sandwich,
    fermion_sandwich_spin_ortho_summed, fermion_sandwich_spin_summed, incoming_anti_fermion,
    incoming_fermion, outgoing_anti_fermion, outgoing_fermion,
};
pub use utils::{Spin, spin_combinations};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Mass must be non-negative, got {0}")]
    NegativeMass(f64),
    #[error("Momentum has no mass")]
    MissingMass,
    #[error("Momentum is off-shell: p^2 = {invariant}, m^2 = {mass_squared}")]
    OffShell { mass_squared: f64, invariant: f64 },
    #[error("Spinor cannot be used as a {expected}")]
    SpinorOrientation { expected: &'static str },
}
