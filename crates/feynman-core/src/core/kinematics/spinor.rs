use super::KinematicsError;
use super::dirac::{AdjointBiSpinor, BiSpinor, DiracMatrix};
use super::gamma::{feynman_slash, gamma0};
use super::momentum::FourMomentum;
use super::utils::{Spin, spin_combinations};
use crate::core::utils::numeric::Complex64;

/// The rest-frame basis spinors: `e1, e2` for particles, `e3, e4` for antiparticles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FermionBaseSpinors {
    particle: [BiSpinor; 2],
    anti_particle: [BiSpinor; 2],
}

impl Default for FermionBaseSpinors {
    fn default() -> Self {
        Self {
            particle: [
                BiSpinor::from_real([1.0, 0.0, 0.0, 0.0]),
                BiSpinor::from_real([0.0, 1.0, 0.0, 0.0]),
            ],
            anti_particle: [
                BiSpinor::from_real([0.0, 0.0, 1.0, 0.0]),
                BiSpinor::from_real([0.0, 0.0, 0.0, 1.0]),
            ],
        }
    }
}

impl FermionBaseSpinors {
    pub fn get(&self, anti_particle: bool, spin: Spin) -> BiSpinor {
        let set = if anti_particle {
            &self.anti_particle
        } else {
            &self.particle
        };
        set[spin.index()]
    }
}

/// A spinor evaluated at a definite spin: a ket `B u` or a Dirac adjoint `(B u)^dagger g0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinorValue {
    Ket(BiSpinor),
    Bra(AdjointBiSpinor),
}

/// An external fermion line with an on-shell momentum.
///
/// Incoming particles and outgoing antiparticles are kets (`u`, `v`); the
/// other two cases are Dirac adjoints (`u-bar`, `v-bar`).
#[derive(Debug, Clone, PartialEq)]
pub struct FermionSpinor {
    momentum: FourMomentum,
    mass: f64,
    incoming: bool,
    anti_particle: bool,
    boost: DiracMatrix,
    base: FermionBaseSpinors,
}

impl FermionSpinor {
    /// # Errors
    ///
    /// Returns [`KinematicsError::MissingMass`] if the momentum has no mass and
    /// [`KinematicsError::OffShell`] if `p * p` differs from `m^2`.
    pub fn new(
        momentum: FourMomentum,
        incoming: bool,
        anti_particle: bool,
    ) -> Result<Self, KinematicsError> {
        let mass = momentum.mass().ok_or(KinematicsError::MissingMass)?;
        if !momentum.is_on_shell()? {
            return Err(KinematicsError::OffShell {
                mass_squared: mass * mass,
                invariant: momentum.invariant_mass_squared(),
            });
        }

        let sign = if anti_particle { -1.0 } else { 1.0 };
        let normalisation = (momentum.e().abs() + mass).sqrt();
        let boost = (feynman_slash(momentum.vector()) * sign + DiracMatrix::unit() * mass)
            / normalisation;

        Ok(Self {
            momentum,
            mass,
            incoming,
            anti_particle,
            boost,
            base: FermionBaseSpinors::default(),
        })
    }

    pub fn momentum(&self) -> &FourMomentum {
        &self.momentum
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn is_incoming(&self) -> bool {
        self.incoming
    }

    pub fn is_anti_particle(&self) -> bool {
        self.anti_particle
    }

    pub fn boost(&self) -> &DiracMatrix {
        &self.boost
    }

    pub fn is_ket(&self) -> bool {
        self.incoming ^ self.anti_particle
    }

    pub fn evaluate(&self, spin: Spin) -> SpinorValue {
        let boosted = self.boost * self.base.get(self.anti_particle, spin);
        if self.is_ket() {
            SpinorValue::Ket(boosted)
        } else {
            SpinorValue::Bra(boosted.adjoint() * gamma0())
        }
    }

    pub fn ket(&self, spin: Spin) -> Result<BiSpinor, KinematicsError> {
        match self.evaluate(spin) {
            SpinorValue::Ket(ket) => Ok(ket),
            SpinorValue::Bra(_) => Err(KinematicsError::SpinorOrientation { expected: "ket" }),
        }
    }

    pub fn bra(&self, spin: Spin) -> Result<AdjointBiSpinor, KinematicsError> {
        match self.evaluate(spin) {
            SpinorValue::Bra(bra) => Ok(bra),
            SpinorValue::Ket(_) => Err(KinematicsError::SpinorOrientation { expected: "bra" }),
        }
    }
}

pub fn incoming_fermion(momentum: FourMomentum) -> Result<FermionSpinor, KinematicsError> {
    FermionSpinor::new(momentum, true, false)
}

pub fn outgoing_fermion(momentum: FourMomentum) -> Result<FermionSpinor, KinematicsError> {
    FermionSpinor::new(momentum, false, false)
}

pub fn incoming_anti_fermion(momentum: FourMomentum) -> Result<FermionSpinor, KinematicsError> {
    FermionSpinor::new(momentum, true, true)
}

pub fn outgoing_anti_fermion(momentum: FourMomentum) -> Result<FermionSpinor, KinematicsError> {
    FermionSpinor::new(momentum, false, true)
}

/// `bra(i) * operator * ket(j)`.
pub fn fermion_sandwich(
    bra: &FermionSpinor,
    operator: &DiracMatrix,
    ket: &FermionSpinor,
    i: Spin,
    j: Spin,
) -> Result<Complex64, KinematicsError> {
    Ok(bra.bra(i)? * (*operator * ket.ket(j)?))
}

/// Sum of [`fermion_sandwich`] over all four spin pairs.
pub fn fermion_sandwich_spin_summed(
    bra: &FermionSpinor,
    operator: &DiracMatrix,
    ket: &FermionSpinor,
) -> Result<Complex64, KinematicsError> {
    spin_combinations(2)
        .into_iter()
        .map(|spins| fermion_sandwich(bra, operator, ket, spins[0], spins[1]))
        .sum()
}

/// Sum of [`fermion_sandwich`] over equal spins only.
pub fn fermion_sandwich_spin_ortho_summed(
    bra: &FermionSpinor,
    operator: &DiracMatrix,
    ket: &FermionSpinor,
) -> Result<Complex64, KinematicsError> {
    Spin::ALL
        .into_iter()
        .map(|spin| fermion_sandwich(bra, operator, ket, spin, spin))
        .sum()
}
