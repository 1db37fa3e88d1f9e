//! # Rotation matrices
//!
//! A [`RotationMatrix`] is a 3×3 orthonormal matrix with determinant +1, tagged with how it acts
//! on vectors:
//!
//! - [`Active`] (alibi): `R * v` rotates `v` inside a fixed frame.
//! - [`Passive`] (alias): `R * v` expresses the fixed vector `v` in the rotated frame.
//!
//! For the same nominal rotation the passive matrix is the transpose of the active one.
//!
//! ## The exp/log maps
//!
//! `log()` returns the skew-symmetric generator `θ / (2 sin θ) · (R − Rᵀ)` with
//! `θ = acos((tr R − 1) / 2)`. [`RotationMatrix::exp`] maps a generator back through Rodrigues'
//! formula. Both are gated by [`Real::eps`]: near the identity `log` is the zero matrix and `exp`
//! is the identity. `pow(t)` is `exp(t · log)`, the fraction `t` of the rotation.
//!
//! ## Orthonormalization
//!
//! Products of many rotations drift away from SO(3). [`RotationMatrix::normalize`] replaces `R`
//! with `(R Rᵀ)^(-1/2) R`, the closest orthonormal matrix in the Frobenius sense, using the
//! closed-form [`EigenSolver`] for the inverse square root.

use std::marker::PhantomData;
use std::ops::{Index, Mul, MulAssign};

use nalgebra::{Matrix3, Vector3};

use crate::axis_angle::AxisAngle;
use crate::conventions::{
    is_forward_composition, Active, EulerConvention, EulerSequence, Hamilton, MatrixConvention,
    PrincipalAxis, QuaternionConvention,
};
use crate::eigen::EigenSolver;
use crate::euler::Euler;
use crate::linalg::{bitwise_eq, clamp, hat, vee};
use crate::quaternion::Quaternion;
use crate::scalar::Real;

/// A 3×3 rotation matrix under the matrix convention `C`.
///
/// The orthonormality invariant is not checked on construction from raw matrices; call
/// [`RotationMatrix::normalize`] to restore it.
#[derive(Debug, Clone, Copy)]
pub struct RotationMatrix<C: MatrixConvention, T: Real> {
    matrix: Matrix3<T>,
    _convention: PhantomData<C>,
}

/// Single precision rotation matrix, active by default.
pub type RotationMatrixF32<C = Active> = RotationMatrix<C, f32>;

/// Double precision rotation matrix, active by default.
pub type RotationMatrixF64<C = Active> = RotationMatrix<C, f64>;

impl<C: MatrixConvention, T: Real> RotationMatrix<C, T> {
    /// The identity rotation.
    pub fn identity() -> Self {
        Self::from_matrix_unchecked(Matrix3::identity())
    }

    /// Wraps a raw matrix without checking that it is a rotation.
    pub fn from_matrix_unchecked(matrix: Matrix3<T>) -> Self {
        Self {
            matrix,
            _convention: PhantomData,
        }
    }

    /// A uniformly distributed random rotation.
    pub fn from_random() -> Self {
        let q = Quaternion::<Hamilton, T>::from_random();
        Self::from_matrix_unchecked(*RotationMatrix::<Active, T>::from(q).matrix())
    }

    /// Rotation by `angle` about a single coordinate axis.
    ///
    /// The active matrices are
    ///
    /// ```text
    /// X: | 1  0  0 |   Y: |  c  0  s |   Z: | c -s  0 |
    ///    | 0  c -s |      |  0  1  0 |      | s  c  0 |
    ///    | 0  s  c |      | -s  0  c |      | 0  0  1 |
    /// ```
    ///
    /// and the passive ones are their transposes.
    pub fn rotate_principal_axis(axis: PrincipalAxis, angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let s = if C::IS_ACTIVE { s } else { -s };
        let (zero, one) = (T::zero(), T::one());

        let matrix = match axis {
            PrincipalAxis::X => Matrix3::new(one, zero, zero, zero, c, -s, zero, s, c),
            PrincipalAxis::Y => Matrix3::new(c, zero, s, zero, one, zero, -s, zero, c),
            PrincipalAxis::Z => Matrix3::new(c, -s, zero, s, c, zero, zero, zero, one),
        };
        Self::from_matrix_unchecked(matrix)
    }

    /// Exponential map from a skew-symmetric generator.
    ///
    /// Only the lower triangle of `skew` is read. Returns the identity when the encoded angle is
    /// below [`Real::eps`].
    pub fn exp(skew: &Matrix3<T>) -> Self {
        let v = vee(skew);
        let theta = v.norm();
        if theta < T::eps() {
            return Self::identity();
        }
        Self::from_matrix_unchecked(rodrigues(&(v / theta), theta))
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> &Matrix3<T> {
        &self.matrix
    }

    /// Consumes the rotation and returns the underlying matrix.
    #[inline]
    pub fn into_inner(self) -> Matrix3<T> {
        self.matrix
    }

    /// The transposed matrix, which is the inverse rotation.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_matrix_unchecked(self.matrix.transpose())
    }

    /// The inverse rotation.
    #[inline]
    pub fn inverse(&self) -> Self {
        self.transpose()
    }

    /// Determinant of the underlying matrix, one for a proper rotation.
    pub fn determinant(&self) -> T {
        self.matrix.determinant()
    }

    /// Rotation angle in `[0, π]`.
    pub fn angle(&self) -> T {
        let one = T::one();
        clamp((self.matrix.trace() - one) / T::lit(2.0), -one, one).acos()
    }

    /// Logarithm map, the skew-symmetric generator of the rotation.
    ///
    /// Returns the zero matrix when the rotation angle is below [`Real::eps`].
    pub fn log(&self) -> Matrix3<T> {
        hat(&self.rotation_vector())
    }

    /// The fraction `t` of the rotation, `exp(t * log(R))`.
    pub fn pow(&self, t: T) -> Self {
        Self::exp(&(self.log() * t))
    }

    /// Geodesic interpolation from `self` (at `t = 0`) to `to` (at `t = 1`).
    ///
    /// Active matrices compose on the right, `from * (fromᵀ * to)^t`; passive ones on the left,
    /// `(to * fromᵀ)^t * from`.
    pub fn interpolate(&self, to: &Self, t: T) -> Self {
        if C::IS_ACTIVE {
            *self * (self.transpose() * *to).pow(t)
        } else {
            (*to * self.transpose()).pow(t) * *self
        }
    }

    /// Re-orthonormalizes the matrix in place.
    pub fn normalize(&mut self) {
        let solver = EigenSolver::new(&(self.matrix * self.matrix.transpose()));
        let inv_sqrt = solver.compose(|value| T::one() / value.abs().sqrt());
        self.matrix = inv_sqrt * self.matrix;
    }

    /// Returns an orthonormalized copy.
    pub fn normalized(&self) -> Self {
        let mut out = *self;
        out.normalize();
        out
    }

    /// Rotation vector `v` such that `exp(hat(v))` is this matrix.
    pub(crate) fn rotation_vector(&self) -> Vector3<T> {
        let theta = self.angle();
        if theta < T::eps() {
            return Vector3::zeros();
        }

        if T::pi() - theta < T::eps() {
            // R - Rᵀ vanishes at π; read the axis from the symmetric part (R + I) / 2 = a aᵀ
            let sym = (self.matrix + Matrix3::identity()) / T::lit(2.0);
            let k = (1..3).fold(0, |best, i| {
                if sym[(i, i)] > sym[(best, best)] {
                    i
                } else {
                    best
                }
            });
            let axis: Vector3<T> = sym.column(k).into_owned() / sym[(k, k)].sqrt();
            return axis.normalize() * theta;
        }

        vee(&(self.matrix - self.matrix.transpose())) * (theta / (T::lit(2.0) * theta.sin()))
    }
}

/// `c I + (1 - c) a aᵀ + s hat(a)` for the unit axis `a`.
pub(crate) fn rodrigues<T: Real>(axis: &Vector3<T>, angle: T) -> Matrix3<T> {
    let (s, c) = angle.sin_cos();
    Matrix3::identity() * c + axis * axis.transpose() * (T::one() - c) + hat(axis) * s
}

impl<C: MatrixConvention, T: Real> PartialEq for RotationMatrix<C, T> {
    /// Compares the bit patterns of the stored components, so `-0.0 != 0.0` and identical NaNs
    /// compare equal.
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.matrix.as_slice(), other.matrix.as_slice())
    }
}

impl<C: MatrixConvention, T: Real> Eq for RotationMatrix<C, T> {}

impl<C: MatrixConvention, T: Real> Default for RotationMatrix<C, T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<C, E, S, T> From<Euler<E, S, T>> for RotationMatrix<C, T>
where
    C: MatrixConvention,
    E: EulerConvention,
    S: EulerSequence,
    T: Real,
{
    fn from(euler: Euler<E, S, T>) -> Self {
        let r1 = Self::rotate_principal_axis(S::AXIS1, euler[0]);
        let r2 = Self::rotate_principal_axis(S::AXIS2, euler[1]);
        let r3 = Self::rotate_principal_axis(S::AXIS3, euler[2]);

        if is_forward_composition::<E, C>() {
            r1 * r2 * r3
        } else {
            r3 * r2 * r1
        }
    }
}

impl<C: MatrixConvention, T: Real> From<AxisAngle<T>> for RotationMatrix<C, T> {
    /// Rodrigues' formula. The skew term changes sign for passive matrices.
    fn from(axis_angle: AxisAngle<T>) -> Self {
        let angle = if C::IS_ACTIVE {
            axis_angle.angle()
        } else {
            -axis_angle.angle()
        };
        Self::from_matrix_unchecked(rodrigues(&axis_angle.axis(), angle))
    }
}

impl<Q: QuaternionConvention, T: Real> From<Quaternion<Q, T>> for RotationMatrix<Q::Matrix, T> {
    /// The same polynomial in `(w, x, y, z)` serves both pairings: a JPL quaternion is the
    /// conjugate of the Hamilton one and a passive matrix is the transpose of the active one.
    fn from(q: Quaternion<Q, T>) -> Self {
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let one = T::one();
        let two = T::lit(2.0);

        Self::from_matrix_unchecked(Matrix3::new(
            one - two * (y * y + z * z),
            two * (x * y - w * z),
            two * (x * z + w * y),
            two * (x * y + w * z),
            one - two * (x * x + z * z),
            two * (y * z - w * x),
            two * (x * z - w * y),
            two * (y * z + w * x),
            one - two * (x * x + y * y),
        ))
    }
}

impl<C: MatrixConvention, T: Real> Mul for RotationMatrix<C, T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self::from_matrix_unchecked(self.matrix * rhs.matrix)
    }
}

impl<C: MatrixConvention, T: Real> MulAssign for RotationMatrix<C, T> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<C: MatrixConvention, T: Real> Mul<Vector3<T>> for RotationMatrix<C, T> {
    type Output = Vector3<T>;

    fn mul(self, rhs: Vector3<T>) -> Self::Output {
        self.matrix * rhs
    }
}

impl<C: MatrixConvention, T: Real> Index<(usize, usize)> for RotationMatrix<C, T> {
    type Output = T;

    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.matrix[index]
    }
}
