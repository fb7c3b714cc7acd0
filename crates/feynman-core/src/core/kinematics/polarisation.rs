use super::lorentz::LorentzVector;
use crate::core::utils::numeric::{Complex64, is_close_complex, real};

/// A complex Lorentz vector describing the polarisation of a vector boson.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarisationVector(LorentzVector<Complex64>);

impl PolarisationVector {
    pub fn new(x0: Complex64, x1: Complex64, x2: Complex64, x3: Complex64) -> Self {
        Self(LorentzVector::new(x0, x1, x2, x3))
    }

    pub fn from_real(components: [f64; 4]) -> Self {
        Self(LorentzVector::from_array(components).map(real))
    }

    pub fn from_vector(vector: LorentzVector<Complex64>) -> Self {
        Self(vector)
    }

    pub fn vector(&self) -> &LorentzVector<Complex64> {
        &self.0
    }

    /// Whether `eps * eps` equals `-1` (bilinear, no conjugation).
    pub fn is_normed(&self) -> bool {
        is_close_complex(self.0.squared(), real(-1.0))
    }

    /// Complex conjugates all components in place.
    pub fn conj(&mut self) {
        self.0 = self.0.map(|z| z.conj());
    }

    pub fn conjugate(&self) -> Self {
        let mut copy = *self;
        copy.conj();
        copy
    }
}
