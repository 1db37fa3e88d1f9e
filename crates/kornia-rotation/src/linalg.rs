use nalgebra::{Matrix3, Vector3};

use crate::scalar::Real;

/// Skew-symmetric cross-product matrix of `v`, such that `hat(v) * u == v.cross(&u)`.
///
/// ```text
/// |  0   -vz   vy |
/// |  vz   0   -vx |
/// | -vy   vx   0  |
/// ```
#[inline]
pub fn hat<T: Real>(v: &Vector3<T>) -> Matrix3<T> {
    let zero = T::zero();
    Matrix3::new(zero, -v.z, v.y, v.z, zero, -v.x, -v.y, v.x, zero)
}

/// Inverse of [`hat`]: extracts the vector from a skew-symmetric matrix.
///
/// Only the lower triangle is read.
#[inline]
pub fn vee<T: Real>(m: &Matrix3<T>) -> Vector3<T> {
    Vector3::new(m[(2, 1)], m[(0, 2)], m[(1, 0)])
}

/// Restricts `x` to `[lo, hi]`.
#[inline]
pub fn clamp<T: Real>(x: T, lo: T, hi: T) -> T {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Inverse of a 3x3 matrix through its adjugate.
///
/// When the determinant is zero or not finite the matrix has no inverse and every entry of the
/// result is NaN, so the failure propagates through later arithmetic.
pub fn inverse3<T: Real>(m: &Matrix3<T>) -> Matrix3<T> {
    let det = m.determinant();
    if det == T::zero() || !det.is_finite() {
        return Matrix3::from_element(T::zero() / T::zero());
    }

    let c00 = m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)];
    let c01 = m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)];
    let c02 = m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)];
    let c10 = m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)];
    let c11 = m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)];
    let c12 = m[(0, 1)] * m[(2, 0)] - m[(0, 0)] * m[(2, 1)];
    let c20 = m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)];
    let c21 = m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)];
    let c22 = m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)];

    // adjugate is the transposed cofactor matrix
    Matrix3::new(c00, c10, c20, c01, c11, c21, c02, c12, c22) / det
}

/// Returns `true` when every entry of `m` is NaN.
#[inline]
pub fn is_all_nan<T: Real>(m: &Matrix3<T>) -> bool {
    m.iter().all(|x| x.partial_cmp(x).is_none())
}

/// `true` when both slices hold the same bit patterns, so `-0.0 != 0.0` and identical NaNs
/// compare equal.
#[inline]
pub fn bitwise_eq<T: Real>(a: &[T], b: &[T]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.bits() == y.bits())
}
