//! Dirac algebra on complex 4x4 matrices, column bispinors and their adjoints.
//!
//! Only the products that are meaningful in Dirac algebra are implemented, so
//! something like `BiSpinor * BiSpinor` simply does not compile.

use crate::core::utils::numeric::{Complex64, is_close_complex, real};
use nalgebra::{Matrix4, RowVector4, Vector4};
use std::ops::{Add, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiracMatrix(Matrix4<Complex64>);

/// A column bispinor `psi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiSpinor(Vector4<Complex64>);

/// A row bispinor, e.g. `psi^dagger` or the Dirac adjoint `psi^dagger gamma^0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjointBiSpinor(RowVector4<Complex64>);

impl DiracMatrix {
    pub fn new(matrix: Matrix4<Complex64>) -> Self {
        Self(matrix)
    }

    pub fn from_rows(rows: [[Complex64; 4]; 4]) -> Self {
        Self(Matrix4::from_fn(|i, j| rows[i][j]))
    }

    pub fn from_real_rows(rows: [[f64; 4]; 4]) -> Self {
        Self(Matrix4::from_fn(|i, j| real(rows[i][j])))
    }

    pub fn zeros() -> Self {
        Self(Matrix4::zeros())
    }

    /// The 4x4 identity.
    pub fn unit() -> Self {
        Self(Matrix4::identity())
    }

    pub fn as_matrix(&self) -> &Matrix4<Complex64> {
        &self.0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        self.0.get((row, col)).copied()
    }

    pub fn trace(&self) -> Complex64 {
        self.0.trace()
    }

    /// Conjugate transpose.
    pub fn adjoint(&self) -> Self {
        Self(self.0.adjoint())
    }

    pub fn is_close(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| is_close_complex(*a, *b))
    }
}

impl BiSpinor {
    pub fn new(components: [Complex64; 4]) -> Self {
        Self(Vector4::from(components))
    }

    pub fn from_real(components: [f64; 4]) -> Self {
        Self(Vector4::from(components).map(real))
    }

    pub fn as_vector(&self) -> &Vector4<Complex64> {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.0.get(index).copied()
    }

    /// Conjugate transpose `psi^dagger`.
    pub fn adjoint(&self) -> AdjointBiSpinor {
        AdjointBiSpinor(self.0.adjoint())
    }

    /// Hermitian product `psi^dagger phi`.
    pub fn vdot(&self, other: &BiSpinor) -> Complex64 {
        self.adjoint() * *other
    }

    pub fn is_close(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| is_close_complex(*a, *b))
    }
}

impl AdjointBiSpinor {
    pub fn new(components: [Complex64; 4]) -> Self {
        Self(RowVector4::new(
            components[0],
            components[1],
            components[2],
            components[3],
        ))
    }

    pub fn as_row(&self) -> &RowVector4<Complex64> {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.0.get(index).copied()
    }

    /// Conjugate transpose, giving back a column bispinor.
    pub fn adjoint(&self) -> BiSpinor {
        BiSpinor(self.0.adjoint())
    }

    pub fn vdot(&self, other: &AdjointBiSpinor) -> Complex64 {
        self.adjoint().vdot(&other.adjoint())
    }

    pub fn is_close(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| is_close_complex(*a, *b))
    }
}

// Products between the three kinds.

impl Mul for DiracMatrix {
    type Output = DiracMatrix;

    fn mul(self, rhs: DiracMatrix) -> DiracMatrix {
        DiracMatrix(self.0 * rhs.0)
    }
}

impl Mul<BiSpinor> for DiracMatrix {
    type Output = BiSpinor;

    fn mul(self, rhs: BiSpinor) -> BiSpinor {
        BiSpinor(self.0 * rhs.0)
    }
}

impl Mul<BiSpinor> for AdjointBiSpinor {
    type Output = Complex64;

    fn mul(self, rhs: BiSpinor) -> Complex64 {
        (self.0 * rhs.0)[(0, 0)]
    }
}

impl Mul<DiracMatrix> for AdjointBiSpinor {
    type Output = AdjointBiSpinor;

    fn mul(self, rhs: DiracMatrix) -> AdjointBiSpinor {
        AdjointBiSpinor(self.0 * rhs.0)
    }
}

impl Mul<AdjointBiSpinor> for BiSpinor {
    type Output = DiracMatrix;

    fn mul(self, rhs: AdjointBiSpinor) -> DiracMatrix {
        DiracMatrix(self.0 * rhs.0)
    }
}

// Linear structure shared by all three kinds.
macro_rules! impl_linear_ops {
    ($ty:ident) => {
        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                $ty(self.0 + rhs.0)
            }
        }

        impl Sub for $ty {
            type Output = $ty;

            fn sub(self, rhs: $ty) -> $ty {
                $ty(self.0 - rhs.0)
            }
        }

        impl Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $ty(-self.0)
            }
        }

        impl Mul<Complex64> for $ty {
            type Output = $ty;

            fn mul(self, rhs: Complex64) -> $ty {
                $ty(self.0 * rhs)
            }
        }

        impl Mul<f64> for $ty {
            type Output = $ty;

            fn mul(self, rhs: f64) -> $ty {
                $ty(self.0 * real(rhs))
            }
        }

        impl Mul<$ty> for Complex64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Mul<$ty> for f64 {
            type Output = $ty;

            fn mul(self, rhs: $ty) -> $ty {
                rhs * self
            }
        }

        impl Div<Complex64> for $ty {
            type Output = $ty;

            fn div(self, rhs: Complex64) -> $ty {
                $ty(self.0 / rhs)
            }
        }

        impl Div<f64> for $ty {
            type Output = $ty;

            fn div(self, rhs: f64) -> $ty {
                $ty(self.0 / real(rhs))
            }
        }
    };
}

impl_linear_ops!(DiracMatrix);
impl_linear_ops!(BiSpinor);
impl_linear_ops!(AdjointBiSpinor);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::numeric::I;

    fn spinor() -> BiSpinor {
        BiSpinor::new([real(1.0), I, real(0.0), real(2.0)])
    }

    #[test]
    fn adjoint_conjugates_and_transposes() {
        let adj = spinor().adjoint();
        assert_eq!(adj.get(1), Some(-I));
        assert_eq!(adj.adjoint(), spinor());
    }

    #[test]
    fn vdot_is_hermitian_norm() {
        assert_eq!(spinor().vdot(&spinor()), real(6.0));
    }

    #[test]
    fn outer_product_yields_matrix() {
        let outer = spinor() * spinor().adjoint();
        assert_eq!(outer.get(0, 1), Some(-I));
        assert_eq!(outer.trace(), real(6.0));
    }

    #[test]
    fn unit_matrix_is_neutral() {
        let m = DiracMatrix::from_real_rows([
            [1.0, 2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 3.0, 0.0],
            [4.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(DiracMatrix::unit() * m, m);
        assert_eq!(m * DiracMatrix::unit(), m);
        assert_eq!(DiracMatrix::unit() * spinor(), spinor());
        assert_eq!(spinor().adjoint() * DiracMatrix::unit(), spinor().adjoint());
    }

    #[test]
    fn scalar_operations_act_on_every_entry() {
        let doubled = 2.0 * spinor();
        assert_eq!(doubled.get(3), Some(real(4.0)));
        assert_eq!(doubled / 2.0, spinor());
        assert_eq!((spinor() * I).get(1), Some(real(-1.0)));
        assert_eq!(spinor() - spinor(), BiSpinor::from_real([0.0; 4]));
        assert_eq!(-DiracMatrix::unit() + DiracMatrix::unit(), DiracMatrix::zeros());
    }
}
