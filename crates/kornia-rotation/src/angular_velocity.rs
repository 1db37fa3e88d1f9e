use std::ops::Index;

use nalgebra::{Matrix3, Vector3};

use crate::conventions::{EulerConvention, EulerSequence, Passive, PrincipalAxis};
use crate::euler::Euler;
use crate::euler_rate::EulerRate;
use crate::linalg::bitwise_eq;
use crate::rotation_matrix::RotationMatrix;
use crate::scalar::Real;

/// Angular velocity in radians per second, expressed in the body frame.
#[derive(Debug, Clone, Copy)]
pub struct AngularVelocity<T: Real> {
    vector: Vector3<T>,
}

/// Single precision angular velocity.
pub type AngularVelocityF32 = AngularVelocity<f32>;

/// Double precision angular velocity.
pub type AngularVelocityF64 = AngularVelocity<f64>;

impl<T: Real> AngularVelocity<T> {
    /// Creates an angular velocity from its body-frame components.
    pub fn new(vector: Vector3<T>) -> Self {
        Self { vector }
    }

    /// The body-frame components.
    #[inline]
    pub fn vector(&self) -> &Vector3<T> {
        &self.vector
    }

    /// The angular velocity of a body at orientation `euler` whose angles change at `rate`.
    ///
    /// This is `M(euler) * rate` with `M` the Euler rate map of the sequence and convention.
    pub fn from_euler_rate<E, S>(euler: &Euler<E, S, T>, rate: &EulerRate<E, S, T>) -> Self
    where
        E: EulerConvention,
        S: EulerSequence,
    {
        Self::new(rate_map::<E, S, T>(euler.angles()) * rate.rates())
    }
}

impl<T: Real> PartialEq for AngularVelocity<T> {
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.vector.as_slice(), other.vector.as_slice())
    }
}

impl<T: Real> Eq for AngularVelocity<T> {}

impl<T: Real> Default for AngularVelocity<T> {
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}

impl<T: Real> Index<usize> for AngularVelocity<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vector[index]
    }
}

fn passive<T: Real>(axis: PrincipalAxis, angle: T) -> Matrix3<T> {
    RotationMatrix::<Passive, T>::rotate_principal_axis(axis, angle).into_inner()
}

/// The linear map from Euler rates to body angular velocity at `angles`.
///
/// Each column is the rotation axis of one angle expressed in the body frame. For intrinsic
/// angles the columns are
///
/// ```text
/// P3(a2) P2(a1) e1,  P3(a2) e2,  e3
/// ```
///
/// and for extrinsic angles
///
/// ```text
/// e1,  P1(a0) e2,  P1(a0) P2(a1) e3
/// ```
///
/// where `Pk` is the passive rotation about the k-th axis of the sequence and `ek` its unit
/// vector. The map is singular at gimbal lock.
pub(crate) fn rate_map<E, S, T>(angles: &Vector3<T>) -> Matrix3<T>
where
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    let e1 = S::AXIS1.unit::<T>();
    let e2 = S::AXIS2.unit::<T>();
    let e3 = S::AXIS3.unit::<T>();

    let (c0, c1, c2) = if E::IS_INTRINSIC {
        let p3 = passive(S::AXIS3, angles[2]);
        let p32 = p3 * passive(S::AXIS2, angles[1]);
        (p32 * e1, p3 * e2, e3)
    } else {
        let p1 = passive(S::AXIS1, angles[0]);
        let p12 = p1 * passive(S::AXIS2, angles[1]);
        (e1, p1 * e2, p12 * e3)
    };
    Matrix3::from_columns(&[c0, c1, c2])
}
