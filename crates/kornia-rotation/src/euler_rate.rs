use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use nalgebra::{Matrix3, Vector3};

use crate::angular_velocity::{rate_map, AngularVelocity};
use crate::conventions::{EulerConvention, EulerSequence, Intrinsic, MatrixConvention, ZYX};
use crate::euler::Euler;
use crate::linalg::bitwise_eq;
use crate::rotation_matrix::RotationMatrix;
use crate::scalar::Real;

/// Time derivative of an [`Euler`] triple, in radians per second.
#[derive(Debug, Clone, Copy)]
pub struct EulerRate<E: EulerConvention, S: EulerSequence, T: Real> {
    rates: Vector3<T>,
    _marker: PhantomData<(E, S)>,
}

/// Single precision Euler rates, intrinsic `ZYX` by default.
pub type EulerRateF32<E = Intrinsic, S = ZYX> = EulerRate<E, S, f32>;

/// Double precision Euler rates, intrinsic `ZYX` by default.
pub type EulerRateF64<E = Intrinsic, S = ZYX> = EulerRate<E, S, f64>;

impl<E: EulerConvention, S: EulerSequence, T: Real> EulerRate<E, S, T> {
    /// Creates rates for the first, second and third angle.
    pub fn new(first: T, second: T, third: T) -> Self {
        Self::from_rates(Vector3::new(first, second, third))
    }

    /// Creates rates from a vector in rotation order.
    pub fn from_rates(rates: Vector3<T>) -> Self {
        Self {
            rates,
            _marker: PhantomData,
        }
    }

    /// The rates in rotation order.
    #[inline]
    pub fn rates(&self) -> &Vector3<T> {
        &self.rates
    }

    /// The Euler rates that produce the body angular velocity `omega` at orientation `dcm`.
    ///
    /// The orientation is first converted to Euler angles. The rate map is then inverted in
    /// closed form: one of its columns is a unit vector, which leaves a 2×2 system for the other
    /// two rates followed by back-substitution.
    ///
    /// The map is singular at gimbal lock. The result is then non-finite and should not be used,
    /// and results close to gimbal lock are unreliable.
    pub fn from_angular_velocity<C: MatrixConvention>(
        dcm: &RotationMatrix<C, T>,
        omega: &AngularVelocity<T>,
    ) -> Self {
        let euler = Euler::<E, S, T>::from(*dcm);
        Self::from_rates(solve::<E, S, T>(
            &rate_map::<E, S, T>(euler.angles()),
            omega.vector(),
        ))
    }
}

fn solve<E, S, T>(m: &Matrix3<T>, w: &Vector3<T>) -> Vector3<T>
where
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    // row k holds the unit entry of the unit column, rows i < j form the 2x2 block
    let k = if E::IS_INTRINSIC {
        S::AXIS3.index()
    } else {
        S::AXIS1.index()
    };
    let (i, j) = match k {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    };
    let (p, q, unit) = if E::IS_INTRINSIC { (0, 1, 2) } else { (1, 2, 0) };

    let (a, b) = (m[(i, p)], m[(i, q)]);
    let (c, d) = (m[(j, p)], m[(j, q)]);
    let det = a * d - b * c;
    if det.abs() < T::eps() {
        log::debug!(
            "EulerRate {} {}: singular rate map, determinant {:?}",
            E::NAME,
            S::KIND,
            det
        );
    }

    let mut rates = Vector3::zeros();
    rates[p] = (d * w[i] - b * w[j]) / det;
    rates[q] = (a * w[j] - c * w[i]) / det;
    rates[unit] = w[k] - m[(k, p)] * rates[p] - m[(k, q)] * rates[q];
    rates
}

impl<E: EulerConvention, S: EulerSequence, T: Real> PartialEq for EulerRate<E, S, T> {
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.rates.as_slice(), other.rates.as_slice())
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> Eq for EulerRate<E, S, T> {}

impl<E: EulerConvention, S: EulerSequence, T: Real> Default for EulerRate<E, S, T> {
    fn default() -> Self {
        Self::from_rates(Vector3::zeros())
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> Index<usize> for EulerRate<E, S, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.rates[index]
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> IndexMut<usize> for EulerRate<E, S, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.rates[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::{
        Active, Extrinsic, Passive, XYX, XYZ, XZX, XZY, YXY, YXZ, YZX, YZY, ZXY, ZXZ, ZYZ,
    };
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn round_trip<E: EulerConvention, S: EulerSequence, C: MatrixConvention>() {
        let second = if S::is_proper_euler() { 1.1 } else { -0.6 };
        let euler = Euler::<E, S, f64>::new(0.4, second, -1.3);
        let dcm = RotationMatrix::<C, f64>::from(euler);
        let omega = AngularVelocity::new(Vector3::new(0.3, -1.2, 0.8));

        let rate = EulerRate::<E, S, f64>::from_angular_velocity(&dcm, &omega);
        let extracted = Euler::<E, S, f64>::from(dcm);
        let back = AngularVelocity::from_euler_rate(&extracted, &rate);
        assert_relative_eq!(*back.vector(), *omega.vector(), epsilon = 1e-4);
    }

    fn round_trip_all<E: EulerConvention, C: MatrixConvention>() {
        round_trip::<E, XYZ, C>();
        round_trip::<E, XZY, C>();
        round_trip::<E, YXZ, C>();
        round_trip::<E, YZX, C>();
        round_trip::<E, ZXY, C>();
        round_trip::<E, ZYX, C>();
        round_trip::<E, XYX, C>();
        round_trip::<E, XZX, C>();
        round_trip::<E, YXY, C>();
        round_trip::<E, YZY, C>();
        round_trip::<E, ZXZ, C>();
        round_trip::<E, ZYZ, C>();
    }

    #[test]
    fn test_round_trip() {
        round_trip_all::<Intrinsic, Active>();
        round_trip_all::<Intrinsic, Passive>();
        round_trip_all::<Extrinsic, Active>();
        round_trip_all::<Extrinsic, Passive>();
    }

    #[test]
    fn test_inverse_intrinsic_xyz() {
        let angles = Vector3::new(0.1f64, 0.2, 0.3);
        let m = rate_map::<Intrinsic, XYZ, f64>(&angles);
        let w = Vector3::new(0.5, -0.25, 2.0);
        let rates = solve::<Intrinsic, XYZ, f64>(&m, &w);
        assert_relative_eq!(m * rates, w, epsilon = 1e-12);
    }

    #[test]
    fn test_inverse_extrinsic_zxz() {
        let angles = Vector3::new(-0.7f64, 2.0, 0.3);
        let m = rate_map::<Extrinsic, ZXZ, f64>(&angles);
        let w = Vector3::new(1.0, 0.5, -0.5);
        let rates = solve::<Extrinsic, ZXZ, f64>(&m, &w);
        assert_relative_eq!(m * rates, w, epsilon = 1e-12);
    }

    #[test]
    fn test_pure_rate_about_third_axis() {
        // spinning only the last intrinsic angle is a body rotation about its axis
        let euler = Euler::<Intrinsic, ZYX, f64>::new(0.4, 0.3, -0.2);
        let dcm = RotationMatrix::<Active, f64>::from(euler);
        let omega = AngularVelocity::new(Vector3::new(0.7, 0.0, 0.0));
        let rate = EulerRateF64::<Intrinsic, ZYX>::from_angular_velocity(&dcm, &omega);
        assert_relative_eq!(*rate.rates(), Vector3::new(0.0, 0.0, 0.7), epsilon = 1e-12);
    }

    #[test]
    fn test_singular_at_gimbal_lock() {
        let euler = Euler::<Intrinsic, ZYX, f64>::new(0.0, FRAC_PI_2, 0.0);
        let dcm = RotationMatrix::<Active, f64>::from(euler);
        let omega = AngularVelocity::new(Vector3::new(0.1, 0.2, 0.3));
        let rate = EulerRateF64::<Intrinsic, ZYX>::from_angular_velocity(&dcm, &omega);
        assert!(!rate.rates().iter().all(|r| r.is_finite()) || rate.rates().norm() > 1e6);
    }

    #[test]
    fn test_index() {
        let mut rate = EulerRateF32::<Intrinsic, ZYX>::new(1.0, 2.0, 3.0);
        rate[1] = 5.0;
        assert_eq!(rate[0], 1.0);
        assert_eq!(rate[1], 5.0);
        assert_eq!(*rate.rates(), Vector3::new(1.0, 5.0, 3.0));
    }
}
