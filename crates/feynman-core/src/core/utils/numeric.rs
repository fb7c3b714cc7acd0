use nalgebra::Complex;

pub type Complex64 = Complex<f64>;

/// The imaginary unit.
pub const I: Complex64 = Complex::new(0.0, 1.0);

const RELATIVE_TOLERANCE: f64 = 1e-5;
const ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Checks `|a - b| <= atol + rtol * |b|` with the usual floating point tolerances.
#[inline]
pub fn is_close(a: f64, b: f64) -> bool {
    (a - b).abs() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * b.abs()
}

/// Complex counterpart of [`is_close`], using the modulus of the difference.
#[inline]
pub fn is_close_complex(a: Complex64, b: Complex64) -> bool {
    (a - b).norm() <= ABSOLUTE_TOLERANCE + RELATIVE_TOLERANCE * b.norm()
}

#[inline]
pub fn real(value: f64) -> Complex64 {
    Complex::new(value, 0.0)
}
