//! # Quaternions
//!
//! [`Hamilton`] quaternions are stored scalar first, `[w, x, y, z]`, and describe [`Active`]
//! rotations. [`Jpl`] quaternions are stored scalar last, `[x, y, z, w]`, and describe
//! [`Passive`] rotations. For the same rotation the JPL quaternion is the conjugate of the
//! Hamilton one, so both use the same product formula on `(w, x, y, z)`, and the matrix of a
//! product is the product of the matrices.
//!
//! A unit quaternion and its negation encode the same rotation;
//! [`Quaternion::canonicalize`] picks the one with a non-negative scalar part.
//!
//! [`Active`]: crate::conventions::Active
//! [`Passive`]: crate::conventions::Passive

use std::marker::PhantomData;
use std::ops::{Div, DivAssign, Index, IndexMut, Mul, MulAssign};

use nalgebra::{Vector3, Vector4};
use rand::Rng;

use crate::axis_angle::AxisAngle;
use crate::conventions::{
    is_forward_product, EulerConvention, EulerSequence, Hamilton, PrincipalAxis,
    QuaternionConvention,
};
use crate::euler::Euler;
use crate::linalg::{bitwise_eq, clamp};
use crate::rotation_matrix::RotationMatrix;
use crate::scalar::Real;

/// A quaternion under the convention `Q`.
///
/// Only unit quaternions represent rotations; [`Quaternion::normalize`] restores unit norm.
#[derive(Debug, Clone, Copy)]
pub struct Quaternion<Q: QuaternionConvention, T: Real> {
    coords: Vector4<T>,
    _convention: PhantomData<Q>,
}

/// Single precision quaternion, Hamilton by default.
pub type QuaternionF32<Q = Hamilton> = Quaternion<Q, f32>;

/// Double precision quaternion, Hamilton by default.
pub type QuaternionF64<Q = Hamilton> = Quaternion<Q, f64>;

impl<Q: QuaternionConvention, T: Real> Quaternion<Q, T> {
    /// Creates a quaternion from its components in storage order: `(w, x, y, z)` for Hamilton,
    /// `(x, y, z, w)` for JPL.
    pub fn new(q1: T, q2: T, q3: T, q4: T) -> Self {
        Self::from_coords(Vector4::new(q1, q2, q3, q4))
    }

    /// Creates a quaternion from a vector in storage order.
    pub fn from_coords(coords: Vector4<T>) -> Self {
        Self {
            coords,
            _convention: PhantomData,
        }
    }

    /// Creates a quaternion from its scalar and imaginary parts.
    pub fn from_parts(w: T, im: Vector3<T>) -> Self {
        let mut coords = Vector4::zeros();
        coords[Q::W] = w;
        coords[Q::X] = im.x;
        coords[Q::X + 1] = im.y;
        coords[Q::X + 2] = im.z;
        Self::from_coords(coords)
    }

    /// The identity rotation.
    pub fn identity() -> Self {
        Self::from_parts(T::one(), Vector3::zeros())
    }

    /// A uniformly distributed random unit quaternion.
    pub fn from_random() -> Self {
        let mut rng = rand::rng();

        let r1: f64 = rng.random();
        let r2: f64 = rng.random();
        let r3: f64 = rng.random();

        let two_pi = 2.0 * std::f64::consts::PI;
        let w = (1.0 - r1).sqrt() * (two_pi * r2).sin();
        let x = (1.0 - r1).sqrt() * (two_pi * r2).cos();
        let y = r1.sqrt() * (two_pi * r3).sin();
        let z = r1.sqrt() * (two_pi * r3).cos();

        Self::from_parts(T::lit(w), Vector3::new(T::lit(x), T::lit(y), T::lit(z)))
    }

    /// Half-angle rotation about a single coordinate axis.
    ///
    /// The imaginary component is `sin(angle / 2)` for Hamilton and `-sin(angle / 2)` for JPL.
    pub fn rotate_principal_axis(axis: PrincipalAxis, angle: T) -> Self {
        let (s, c) = (angle / T::lit(2.0)).sin_cos();
        let mut im = Vector3::zeros();
        im[axis.index()] = if Q::IS_HAMILTON { s } else { -s };
        Self::from_parts(c, im)
    }

    /// Exponential map, `[cos |v|, sin |v| / |v| * v]`.
    ///
    /// The norm of `v` is half the rotation angle. Returns the identity when `|v|` is below
    /// [`Real::eps`].
    pub fn exp(v: &Vector3<T>) -> Self {
        let norm = v.norm();
        if norm < T::eps() {
            return Self::identity();
        }
        let (s, c) = norm.sin_cos();
        Self::from_parts(c, v * (s / norm))
    }

    /// The components in storage order.
    #[inline]
    pub fn coords(&self) -> &Vector4<T> {
        &self.coords
    }

    /// The scalar part.
    #[inline]
    pub fn w(&self) -> T {
        self.coords[Q::W]
    }

    /// The first imaginary component.
    #[inline]
    pub fn x(&self) -> T {
        self.coords[Q::X]
    }

    /// The second imaginary component.
    #[inline]
    pub fn y(&self) -> T {
        self.coords[Q::X + 1]
    }

    /// The third imaginary component.
    #[inline]
    pub fn z(&self) -> T {
        self.coords[Q::X + 2]
    }

    /// The scalar part.
    #[inline]
    pub fn re(&self) -> T {
        self.w()
    }

    /// The imaginary part.
    #[inline]
    pub fn im(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Euclidean norm of the four components.
    pub fn norm(&self) -> T {
        self.coords.norm()
    }

    /// Scales to unit norm in place.
    pub fn normalize(&mut self) {
        self.coords.normalize_mut();
    }

    /// Returns a unit-norm copy.
    pub fn normalized(&self) -> Self {
        Self::from_coords(self.coords.normalize())
    }

    /// Negates the imaginary part, which inverts a unit quaternion.
    pub fn conjugate(&self) -> Self {
        Self::from_parts(self.w(), -self.im())
    }

    /// The multiplicative inverse, `conjugate / |q|²`.
    pub fn inverse(&self) -> Self {
        let conj = self.conjugate();
        Self::from_coords(conj.coords / self.coords.norm_squared())
    }

    /// Returns the representative of the rotation with a non-negative scalar part.
    pub fn canonicalize(&self) -> Self {
        if self.w() < T::zero() {
            Self::from_coords(-self.coords)
        } else {
            *self
        }
    }

    /// Logarithm map of a unit quaternion, `acos(w) / |im| * im`.
    ///
    /// The result has norm half the rotation angle. Returns the zero vector when `|im|` is below
    /// [`Real::eps`].
    pub fn log(&self) -> Vector3<T> {
        let im = self.im();
        let norm = im.norm();
        if norm < T::eps() {
            return Vector3::zeros();
        }
        let one = T::one();
        im * (clamp(self.w(), -one, one).acos() / norm)
    }

    /// The fraction `t` of the rotation, `exp(t * log(q))`.
    pub fn pow(&self, t: T) -> Self {
        Self::exp(&(self.log() * t))
    }

    /// Spherical linear interpolation from `self` (at `t = 0`) to `to` (at `t = 1`).
    ///
    /// Hamilton quaternions compose on the left, `(to * q⁻¹)^t * q`; JPL quaternions on the
    /// right, `q * (q⁻¹ * to)^t`. The relative rotation is canonicalized first, so the path is
    /// the shortest one whatever the signs of `self` and `to`.
    pub fn slerp(&self, to: &Self, t: T) -> Self {
        if Q::IS_HAMILTON {
            (*to * self.conjugate()).canonicalize().pow(t) * *self
        } else {
            *self * (self.conjugate() * *to).canonicalize().pow(t)
        }
    }

    /// Rotates `v` with the sandwich product `q * [0, v] * q⁻¹`.
    pub fn rotate(&self, v: &Vector3<T>) -> Vector3<T> {
        let pure = Self::from_parts(T::zero(), *v);
        (*self * pure * self.conjugate()).im()
    }
}

impl<Q: QuaternionConvention, T: Real> PartialEq for Quaternion<Q, T> {
    /// Compares the bit patterns of the stored components in storage order, so `-0.0 != 0.0` and identical NaNs
    /// compare equal.
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.coords.as_slice(), other.coords.as_slice())
    }
}

impl<Q: QuaternionConvention, T: Real> Eq for Quaternion<Q, T> {}

impl<Q: QuaternionConvention, T: Real> Default for Quaternion<Q, T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<Q: QuaternionConvention, T: Real> From<RotationMatrix<Q::Matrix, T>> for Quaternion<Q, T> {
    /// Shepperd's method: take the square root on the largest of the trace and the diagonal
    /// entries, then recover the other components from sums and differences of off-diagonal
    /// entries.
    fn from(dcm: RotationMatrix<Q::Matrix, T>) -> Self {
        let m = dcm.matrix();
        let one = T::one();
        let two = T::lit(2.0);
        let four = T::lit(4.0);
        let trace = m.trace();

        let (w, x, y, z) = if trace > T::zero() {
            let s = two * (trace + one).sqrt();
            (
                s / four,
                (m[(2, 1)] - m[(1, 2)]) / s,
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(1, 0)] - m[(0, 1)]) / s,
            )
        } else if m[(0, 0)] > m[(1, 1)] && m[(0, 0)] > m[(2, 2)] {
            let s = two * (one + m[(0, 0)] - m[(1, 1)] - m[(2, 2)]).sqrt();
            (
                (m[(2, 1)] - m[(1, 2)]) / s,
                s / four,
                (m[(0, 1)] + m[(1, 0)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
            )
        } else if m[(1, 1)] > m[(2, 2)] {
            let s = two * (one + m[(1, 1)] - m[(0, 0)] - m[(2, 2)]).sqrt();
            (
                (m[(0, 2)] - m[(2, 0)]) / s,
                (m[(0, 1)] + m[(1, 0)]) / s,
                s / four,
                (m[(1, 2)] + m[(2, 1)]) / s,
            )
        } else {
            let s = two * (one + m[(2, 2)] - m[(0, 0)] - m[(1, 1)]).sqrt();
            (
                (m[(1, 0)] - m[(0, 1)]) / s,
                (m[(0, 2)] + m[(2, 0)]) / s,
                (m[(1, 2)] + m[(2, 1)]) / s,
                s / four,
            )
        };

        Self::from_parts(w, Vector3::new(x, y, z))
    }
}

impl<Q, E, S, T> From<Euler<E, S, T>> for Quaternion<Q, T>
where
    Q: QuaternionConvention,
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    fn from(euler: Euler<E, S, T>) -> Self {
        let q1 = Self::rotate_principal_axis(S::AXIS1, euler[0]);
        let q2 = Self::rotate_principal_axis(S::AXIS2, euler[1]);
        let q3 = Self::rotate_principal_axis(S::AXIS3, euler[2]);

        if is_forward_product::<E, Q>() {
            q1 * q2 * q3
        } else {
            q3 * q2 * q1
        }
    }
}

impl<Q: QuaternionConvention, T: Real> From<AxisAngle<T>> for Quaternion<Q, T> {
    fn from(axis_angle: AxisAngle<T>) -> Self {
        let (s, c) = (axis_angle.angle() / T::lit(2.0)).sin_cos();
        let s = if Q::IS_HAMILTON { s } else { -s };
        Self::from_parts(c, axis_angle.axis() * s)
    }
}

impl<Q: QuaternionConvention, T: Real> Mul for Quaternion<Q, T> {
    type Output = Self;

    /// Hamilton product on `(w, x, y, z)`, written back in the layout of `Q`.
    fn mul(self, rhs: Self) -> Self::Output {
        let (aw, ax, ay, az) = (self.w(), self.x(), self.y(), self.z());
        let (bw, bx, by, bz) = (rhs.w(), rhs.x(), rhs.y(), rhs.z());

        Self::from_parts(
            aw * bw - ax * bx - ay * by - az * bz,
            Vector3::new(
                aw * bx + ax * bw + ay * bz - az * by,
                aw * by - ax * bz + ay * bw + az * bx,
                aw * bz + ax * by - ay * bx + az * bw,
            ),
        )
    }
}

impl<Q: QuaternionConvention, T: Real> MulAssign for Quaternion<Q, T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<Q: QuaternionConvention, T: Real> Div for Quaternion<Q, T> {
    type Output = Self;

    /// `self * rhs.conjugate()`, the relative rotation for unit quaternions.
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.conjugate()
    }
}

impl<Q: QuaternionConvention, T: Real> DivAssign for Quaternion<Q, T> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<Q: QuaternionConvention, T: Real> Mul<Vector3<T>> for Quaternion<Q, T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.rotate(&rhs)
    }
}

impl<Q: QuaternionConvention, T: Real> Index<usize> for Quaternion<Q, T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.coords[index]
    }
}

impl<Q: QuaternionConvention, T: Real> IndexMut<usize> for Quaternion<Q, T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.coords[index]
    }
}
