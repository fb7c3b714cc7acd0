use std::ops::{Add, Div, Mul, Neg, Sub};

/// A four-component object with Minkowski metric `diag(+1, -1, -1, -1)`.
///
/// The component type is generic so that the same container carries real
/// momenta, complex polarisations and the four gamma matrices.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LorentzVector<T> {
    pub x0: T,
    pub x1: T,
    pub x2: T,
    pub x3: T,
}

impl<T> LorentzVector<T> {
    pub const fn new(x0: T, x1: T, x2: T, x3: T) -> Self {
        Self { x0, x1, x2, x3 }
    }

    pub fn from_array([x0, x1, x2, x3]: [T; 4]) -> Self {
        Self::new(x0, x1, x2, x3)
    }

    pub fn into_array(self) -> [T; 4] {
        [self.x0, self.x1, self.x2, self.x3]
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> LorentzVector<U> {
        LorentzVector::new(f(self.x0), f(self.x1), f(self.x2), f(self.x3))
    }

    /// Converts from another component type, e.g. real to complex.
    pub fn convert<U: Into<T>>(other: LorentzVector<U>) -> Self {
        other.map(Into::into)
    }

    /// Minkowski product `x0 y0 - x1 y1 - x2 y2 - x3 y3`.
    pub fn dot<U, O>(&self, other: &LorentzVector<U>) -> O
    where
        T: Clone + Mul<U, Output = O>,
        U: Clone,
        O: Sub<Output = O>,
    {
        self.x0.clone() * other.x0.clone()
            - self.x1.clone() * other.x1.clone()
            - self.x2.clone() * other.x2.clone()
            - self.x3.clone() * other.x3.clone()
    }

    pub fn squared<O>(&self) -> O
    where
        T: Clone + Mul<T, Output = O>,
        O: Sub<Output = O>,
    {
        self.dot(self)
    }
}

impl<T: Add<Output = T>> Add for LorentzVector<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.x0 + rhs.x0,
            self.x1 + rhs.x1,
            self.x2 + rhs.x2,
            self.x3 + rhs.x3,
        )
    }
}

impl<T: Sub<Output = T>> Sub for LorentzVector<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.x0 - rhs.x0,
            self.x1 - rhs.x1,
            self.x2 - rhs.x2,
            self.x3 - rhs.x3,
        )
    }
}

impl<T: Neg<Output = T>> Neg for LorentzVector<T> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(Neg::neg)
    }
}

impl<T, S> Mul<S> for LorentzVector<T>
where
    T: Mul<S, Output = T>,
    S: Copy,
{
    type Output = Self;

    fn mul(self, rhs: S) -> Self {
        self.map(|x| x * rhs)
    }
}

impl<T, S> Div<S> for LorentzVector<T>
where
    T: Div<S, Output = T>,
    S: Copy,
{
    type Output = Self;

    fn div(self, rhs: S) -> Self {
        self.map(|x| x / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minkowski_dot_uses_mostly_minus_metric() {
        let p = LorentzVector::new(4.0, 1.0, 2.0, 3.0);
        let q = LorentzVector::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(p.dot(&q), 4.0 - 1.0 - 2.0 - 3.0);
        assert_eq!(p.squared(), 16.0 - 1.0 - 4.0 - 9.0);
    }

    #[test]
    fn arithmetic_is_componentwise() {
        let p = LorentzVector::new(1.0, 2.0, 3.0, 4.0);
        let q = LorentzVector::from_array([0.5, 0.5, 0.5, 0.5]);
        assert_eq!((p + q).into_array(), [1.5, 2.5, 3.5, 4.5]);
        assert_eq!((p - q).into_array(), [0.5, 1.5, 2.5, 3.5]);
        assert_eq!((-p).into_array(), [-1.0, -2.0, -3.0, -4.0]);
        assert_eq!((p * 2.0).into_array(), [2.0, 4.0, 6.0, 8.0]);
        assert_eq!((p / 2.0).into_array(), [0.5, 1.0, 1.5, 2.0]);
    }

    #[test]
    fn convert_widens_component_type() {
        let p = LorentzVector::new(1.0f32, 2.0, 3.0, 4.0);
        let wide: LorentzVector<f64> = LorentzVector::convert(p);
        assert_eq!(wide.x3, 4.0);
    }
}
