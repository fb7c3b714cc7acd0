//! Gamma matrices in the Dirac representation.
//!
//! The spatial matrices are stored with a lowered index, so `gamma_k` here is
//! `-gamma^k` of the textbook Dirac representation. The Clifford algebra
//! `{g_mu, g_nu} = 2 g_{mu nu}` is unaffected by the overall sign.

use super::dirac::DiracMatrix;
use super::lorentz::LorentzVector;
use crate::core::utils::numeric::{Complex64, I, real};

pub fn gamma0() -> DiracMatrix {
    DiracMatrix::from_real_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 0.0, -1.0],
    ])
}

pub fn gamma1() -> DiracMatrix {
    DiracMatrix::from_real_rows([
        [0.0, 0.0, 0.0, -1.0],
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0, 0.0],
    ])
}

pub fn gamma2() -> DiracMatrix {
    let zero: Complex64 = real(0.0);
    DiracMatrix::from_rows([
        [zero, zero, zero, I],
        [zero, zero, -I, zero],
        [zero, -I, zero, zero],
        [I, zero, zero, zero],
    ])
}

pub fn gamma3() -> DiracMatrix {
    DiracMatrix::from_real_rows([
        [0.0, 0.0, -1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, -1.0, 0.0, 0.0],
    ])
}

pub fn gamma5() -> DiracMatrix {
    -DiracMatrix::from_real_rows([
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
    ])
}

/// The four gamma matrices as a Lorentz vector.
pub fn gamma_mu() -> LorentzVector<DiracMatrix> {
    LorentzVector::new(gamma0(), gamma1(), gamma2(), gamma3())
}

/// `p-slash = g^0 p^0 - g^1 p^1 - g^2 p^2 - g^3 p^3`.
pub fn feynman_slash(p: &LorentzVector<f64>) -> DiracMatrix {
    gamma_mu().dot(p)
}
