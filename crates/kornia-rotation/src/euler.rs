//! # Euler angles
//!
//! An [`Euler`] triple stores three angles in rotation order. The sequence marker `S` names the
//! axes and the convention marker `E` says whether they are body axes ([`Intrinsic`]) or world
//! axes ([`Extrinsic`]).
//!
//! With active matrices an intrinsic `ZYX` triple is `Rz(a0) * Ry(a1) * Rx(a2)`, and an
//! extrinsic one is `Rx(a2) * Ry(a1) * Rz(a0)`. Passive matrices are the transposes.
//!
//! Ranges after extraction from a matrix:
//!
//! - first and third angle in `[-π, π]`;
//! - second angle in `[-π/2, π/2]` for Tait-Bryan sequences and `[0, π]` for proper Euler
//!   sequences.
//!
//! At gimbal lock (second angle at `±π/2` for Tait-Bryan, `0` or `π` for proper Euler) only the
//! sum or difference of the first and third angles is defined. The first angle is then set to
//! exactly zero and the whole rotation is folded into the third.
//!
//! [`Intrinsic`]: crate::conventions::Intrinsic
//! [`Extrinsic`]: crate::conventions::Extrinsic

use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use nalgebra::{Matrix3, Vector3};

use crate::angle::{Angle, NegPiToPi};
use crate::axis_angle::AxisAngle;
use crate::conventions::{
    is_forward_composition, Active, EulerConvention, EulerSequence, Intrinsic, MatrixConvention,
    QuaternionConvention, ZYX,
};
use crate::linalg::bitwise_eq;
use crate::quaternion::Quaternion;
use crate::rotation_matrix::RotationMatrix;
use crate::scalar::Real;

/// Three rotation angles in radians for the sequence `S` under the convention `E`.
#[derive(Debug, Clone, Copy)]
pub struct Euler<E: EulerConvention, S: EulerSequence, T: Real> {
    angles: Vector3<T>,
    _marker: PhantomData<(E, S)>,
}

/// Single precision Euler angles, intrinsic `ZYX` by default.
pub type EulerF32<E = Intrinsic, S = ZYX> = Euler<E, S, f32>;

/// Double precision Euler angles, intrinsic `ZYX` by default.
pub type EulerF64<E = Intrinsic, S = ZYX> = Euler<E, S, f64>;

impl<E: EulerConvention, S: EulerSequence, T: Real> Euler<E, S, T> {
    /// Creates a triple from the angles of the first, second and third rotation.
    pub fn new(first: T, second: T, third: T) -> Self {
        Self::from_angles(Vector3::new(first, second, third))
    }

    /// Creates a triple from a vector of angles in rotation order.
    pub fn from_angles(angles: Vector3<T>) -> Self {
        Self {
            angles,
            _marker: PhantomData,
        }
    }

    /// The angles in rotation order.
    #[inline]
    pub fn angles(&self) -> &Vector3<T> {
        &self.angles
    }

    /// `true` when the second angle sits at a singular value of the sequence.
    pub fn is_gimbal_locked(&self) -> bool {
        is_singular::<S, T>(self.angles[1])
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> PartialEq for Euler<E, S, T> {
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.angles.as_slice(), other.angles.as_slice())
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> Eq for Euler<E, S, T> {}

impl<E: EulerConvention, S: EulerSequence, T: Real> Default for Euler<E, S, T> {
    fn default() -> Self {
        Self::from_angles(Vector3::zeros())
    }
}

fn is_singular<S: EulerSequence, T: Real>(second: T) -> bool {
    let eps = T::eps();
    if S::is_proper_euler() {
        second.abs() < eps || (second - T::pi()).abs() < eps
    } else {
        (second.abs() - T::frac_pi_2()).abs() < eps
    }
}

/// Decomposes `n`, read as an intrinsic active matrix `R1 * R2 * R3`, into its angles.
///
/// `at(i, j)` reads entry `(i, j)` of `n`. Returns the angles and whether the decomposition hit
/// gimbal lock. The second angle is taken from `atan2` of its sine and cosine, and lock is
/// detected when the entries off the pivot `at(a1, a3)` in row `a1` fall below [`Real::eps`].
/// The second angle is then snapped to its singular value.
fn decompose<S: EulerSequence, T: Real>(at: impl Fn(usize, usize) -> T) -> (Vector3<T>, bool) {
    let a1 = S::AXIS1.index();
    let a2 = S::AXIS2.index();
    let a3 = S::AXIS3.index();
    let left = 3 - a1 - a2;

    let zero = T::zero();
    let one = T::one();
    // +1 when the second axis follows the first cyclically (X -> Y -> Z -> X)
    let sign = if (a2 + 3 - a1) % 3 == 1 { one } else { -one };

    let pivot = at(a1, a3);
    let off = if S::is_proper_euler() {
        at(a1, a2).hypot(at(a1, left))
    } else {
        at(a1, a1).hypot(at(a1, a2))
    };

    if off >= T::eps() {
        let e = if S::is_proper_euler() {
            Vector3::new(
                at(a2, a1).atan2(-sign * at(left, a1)),
                off.atan2(pivot),
                at(a1, a2).atan2(sign * at(a1, left)),
            )
        } else {
            Vector3::new(
                (-sign * at(a2, a3)).atan2(at(a3, a3)),
                sign * pivot.atan2(off),
                (-sign * at(a1, a2)).atan2(at(a1, a1)),
            )
        };
        return (e, false);
    }

    let e = if S::is_proper_euler() {
        let second = if pivot > zero { zero } else { T::pi() };
        Vector3::new(zero, second, (-sign * at(a2, left)).atan2(at(a2, a2)))
    } else if sign * pivot > zero {
        let third = at(a3, a2).atan2(-sign * at(a3, a1));
        Vector3::new(zero, T::frac_pi_2(), third)
    } else {
        let third = (-at(a3, a2)).atan2(sign * at(a3, a1));
        Vector3::new(zero, -T::frac_pi_2(), third)
    };
    (e, true)
}

impl<C, E, S, T> From<RotationMatrix<C, T>> for Euler<E, S, T>
where
    C: MatrixConvention,
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    /// Extracts the angles with closed-form `atan2`/`asin`/`acos` expressions.
    ///
    /// All four combinations of conventions reduce to the decomposition of an intrinsic active
    /// matrix: intrinsic passive matrices are transposes of it, and extrinsic matrices describe
    /// the intrinsic rotation with negated angles.
    fn from(dcm: RotationMatrix<C, T>) -> Self {
        let m: &Matrix3<T> = dcm.matrix();
        let (f, gimbal_locked) = if is_forward_composition::<E, C>() {
            decompose::<S, T>(|i, j| m[(i, j)])
        } else {
            decompose::<S, T>(|i, j| m[(j, i)])
        };

        if gimbal_locked {
            log::debug!(
                "Euler {} {}: gimbal lock at second angle {:?}, first angle set to zero",
                E::NAME,
                S::KIND,
                f[1]
            );
        }

        if E::IS_INTRINSIC {
            return Self::from_angles(f);
        }

        let angles = if !S::is_proper_euler() {
            let mut angles = -f;
            if gimbal_locked {
                angles[0] = T::zero();
            }
            angles
        } else if gimbal_locked {
            Vector3::new(T::zero(), f[1], -f[2])
        } else {
            // (-a, -b, -c) is the same rotation as (π - a, b, π - c) for proper sequences
            let pi = T::pi();
            Vector3::new(
                Angle::<NegPiToPi, T>::new(pi - f[0]).rad(),
                f[1],
                Angle::<NegPiToPi, T>::new(pi - f[2]).rad(),
            )
        };
        Self::from_angles(angles)
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> From<AxisAngle<T>> for Euler<E, S, T> {
    fn from(axis_angle: AxisAngle<T>) -> Self {
        Self::from(RotationMatrix::<Active, T>::from(axis_angle))
    }
}

impl<Q, E, S, T> From<Quaternion<Q, T>> for Euler<E, S, T>
where
    Q: QuaternionConvention,
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    fn from(quaternion: Quaternion<Q, T>) -> Self {
        Self::from(RotationMatrix::<Q::Matrix, T>::from(quaternion))
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> Index<usize> for Euler<E, S, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.angles[index]
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> IndexMut<usize> for Euler<E, S, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.angles[index]
    }
}
