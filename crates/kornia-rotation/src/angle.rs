use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use crate::scalar::Real;

/// The interval an [`Angle`] is kept in.
pub trait WrapMode: fmt::Debug + Clone + Copy + Default + PartialEq + 'static {
    /// Lower and upper bound of the half-open interval, or `None` for unwrapped angles.
    fn bounds<T: Real>() -> Option<(T, T)>;
}

/// Wraps into `[-π, π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NegPiToPi;

/// Wraps into `[0, 2π)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZeroToTwoPi;

/// Never wraps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unwrapped;

impl WrapMode for NegPiToPi {
    fn bounds<T: Real>() -> Option<(T, T)> {
        Some((-T::pi(), T::pi()))
    }
}

impl WrapMode for ZeroToTwoPi {
    fn bounds<T: Real>() -> Option<(T, T)> {
        Some((T::zero(), T::two_pi()))
    }
}

impl WrapMode for Unwrapped {
    fn bounds<T: Real>() -> Option<(T, T)> {
        None
    }
}

/// An angle in radians, re-wrapped into the interval of `W` after every operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Angle<W: WrapMode, T: Real> {
    rad: T,
    _mode: PhantomData<W>,
}

impl<W: WrapMode, T: Real> Angle<W, T> {
    /// Creates a wrapped angle from radians.
    pub fn new(rad: T) -> Self {
        Self {
            rad: wrap::<W, T>(rad),
            _mode: PhantomData,
        }
    }

    /// Creates a wrapped angle from degrees.
    pub fn from_deg(deg: T) -> Self {
        Self::new(deg * T::pi() / T::lit(180.0))
    }

    /// The angle in radians.
    #[inline]
    pub fn rad(&self) -> T {
        self.rad
    }

    /// The angle in degrees.
    pub fn deg(&self) -> T {
        self.rad * T::lit(180.0) / T::pi()
    }
}

fn wrap<W: WrapMode, T: Real>(rad: T) -> T {
    let Some((lo, hi)) = W::bounds::<T>() else {
        return rad;
    };
    if lo <= rad && rad < hi {
        return rad;
    }
    let range = hi - lo;
    let wrapped = rad - ((rad - lo) / range).floor() * range;
    // rounding can land on the excluded upper bound
    if wrapped >= hi || wrapped < lo {
        lo
    } else {
        wrapped
    }
}

impl<W: WrapMode, T: Real> PartialEq for Angle<W, T> {
    fn eq(&self, other: &Self) -> bool {
        self.rad.bits() == other.rad.bits()
    }
}

impl<W: WrapMode, T: Real> Eq for Angle<W, T> {}

/// Bitwise comparison against a raw value in radians.
impl<W: WrapMode, T: Real> PartialEq<T> for Angle<W, T> {
    fn eq(&self, other: &T) -> bool {
        self.rad.bits() == other.bits()
    }
}

impl<W: WrapMode, T: Real> fmt::Display for Angle<W, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rad", self.rad)
    }
}

macro_rules! angle_binary_ops {
    ($($op:ident, $method:ident, $op_assign:ident, $method_assign:ident);+ $(;)?) => {$(
        impl<W: WrapMode, T: Real> $op<T> for Angle<W, T> {
            type Output = Self;

            fn $method(self, rhs: T) -> Self::Output {
                Self::new(self.rad.$method(rhs))
            }
        }

        impl<W: WrapMode, T: Real> $op_assign<T> for Angle<W, T> {
            fn $method_assign(&mut self, rhs: T) {
                *self = Self::new(self.rad.$method(rhs));
            }
        }

        impl<W: WrapMode> $op<Angle<W, f32>> for f32 {
            type Output = Angle<W, f32>;

            fn $method(self, rhs: Angle<W, f32>) -> Self::Output {
                Angle::new(self.$method(rhs.rad))
            }
        }

        impl<W: WrapMode> $op<Angle<W, f64>> for f64 {
            type Output = Angle<W, f64>;

            fn $method(self, rhs: Angle<W, f64>) -> Self::Output {
                Angle::new(self.$method(rhs.rad))
            }
        }
    )+};
}

angle_binary_ops! {
    Add, add, AddAssign, add_assign;
    Sub, sub, SubAssign, sub_assign;
    Mul, mul, MulAssign, mul_assign;
    Div, div, DivAssign, div_assign;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn test_wrap_neg_pi_to_pi() {
        assert_relative_eq!(
            Angle::<NegPiToPi, f64>::new(3.0 * PI / 2.0).rad(),
            -PI / 2.0,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Angle::<NegPiToPi, f64>::new(-5.0 * PI / 2.0).rad(),
            -PI / 2.0,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Angle::<NegPiToPi, f64>::new(PI).rad(),
            -PI,
            epsilon = EPSILON
        );
        assert_eq!(Angle::<NegPiToPi, f64>::new(1.0), 1.0);
    }

    #[test]
    fn test_wrap_zero_to_two_pi() {
        assert_relative_eq!(
            Angle::<ZeroToTwoPi, f64>::new(-PI / 2.0).rad(),
            3.0 * PI / 2.0,
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Angle::<ZeroToTwoPi, f64>::new(5.0 * PI).rad(),
            PI,
            epsilon = EPSILON
        );
        assert_eq!(Angle::<ZeroToTwoPi, f64>::new(0.0), 0.0);
    }

    #[test]
    fn test_wrap_stays_below_upper_bound() {
        let a = Angle::<ZeroToTwoPi, f64>::new(-1e-17);
        assert!(a.rad() >= 0.0 && a.rad() < 2.0 * PI);
        assert_eq!(a, 0.0);

        let b = Angle::<NegPiToPi, f64>::new(-PI - 1e-17);
        assert!(b.rad() >= -PI && b.rad() < PI);

        let c = Angle::<ZeroToTwoPi, f32>::new(-1e-9);
        assert!(c.rad() >= 0.0 && c.rad() < 2.0 * std::f32::consts::PI);
    }

    #[test]
    fn test_bitwise_equality() {
        let zero = Angle::<NegPiToPi, f64>::new(0.0);
        assert_ne!(zero, -0.0);
        assert_ne!(zero, Angle::<NegPiToPi, f64>::new(-0.0));

        let nan = Angle::<Unwrapped, f64>::new(f64::NAN);
        assert_eq!(nan, nan);
    }

    #[test]
    fn test_unwrapped() {
        assert_eq!(Angle::<Unwrapped, f64>::new(10.0 * PI), 10.0 * PI);
    }

    #[test]
    fn test_degrees() {
        let a = Angle::<NegPiToPi, f64>::from_deg(90.0);
        assert_relative_eq!(a.rad(), PI / 2.0, epsilon = EPSILON);
        assert_relative_eq!(a.deg(), 90.0, epsilon = EPSILON);
    }

    #[test]
    fn test_arithmetic_rewraps() {
        let a = Angle::<NegPiToPi, f64>::new(3.0);
        assert_relative_eq!((a + 1.0).rad(), 4.0 - 2.0 * PI, epsilon = EPSILON);
        assert_relative_eq!((a * 2.0).rad(), 6.0 - 2.0 * PI, epsilon = EPSILON);
        assert_relative_eq!((a - 7.0).rad(), -4.0 + 2.0 * PI, epsilon = EPSILON);
        assert_relative_eq!((a / 2.0).rad(), 1.5, epsilon = EPSILON);
        assert_relative_eq!((1.0_f64 + a).rad(), 4.0 - 2.0 * PI, epsilon = EPSILON);
        assert_relative_eq!((7.0_f64 - a).rad(), 4.0 - 2.0 * PI, epsilon = EPSILON);

        let mut b = Angle::<ZeroToTwoPi, f32>::new(1.0);
        b -= 2.0;
        assert_relative_eq!(b.rad(), 2.0 * std::f32::consts::PI - 1.0, epsilon = 1e-6);
        b *= 0.5;
        assert!(b.rad() >= 0.0 && b.rad() < 2.0 * std::f32::consts::PI);
    }
}
