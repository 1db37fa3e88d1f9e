use std::ops::{Div, Index, Mul, Neg};

use nalgebra::Vector3;

use crate::conventions::{
    Active, EulerConvention, EulerSequence, MatrixConvention, QuaternionConvention,
};
use crate::euler::Euler;
use crate::linalg::bitwise_eq;
use crate::quaternion::Quaternion;
use crate::rotation_matrix::RotationMatrix;
use crate::scalar::Real;

/// A rotation vector: the unit axis scaled by the rotation angle.
///
/// The zero vector is the identity. The same vector describes the same nominal rotation for
/// every convention; conversions apply the sign each convention needs.
#[derive(Debug, Clone, Copy)]
pub struct AxisAngle<T: Real> {
    vector: Vector3<T>,
}

/// Single precision axis-angle vector.
pub type AxisAngleF32 = AxisAngle<f32>;

/// Double precision axis-angle vector.
pub type AxisAngleF64 = AxisAngle<f64>;

impl<T: Real> AxisAngle<T> {
    /// Creates a rotation vector directly.
    pub fn new(vector: Vector3<T>) -> Self {
        Self { vector }
    }

    /// Creates a rotation of `angle` radians about `axis`, which is expected to be unit length.
    pub fn from_axis_angle(axis: &Vector3<T>, angle: T) -> Self {
        Self::new(axis * angle)
    }

    /// The underlying vector.
    #[inline]
    pub fn vector(&self) -> &Vector3<T> {
        &self.vector
    }

    /// The unit rotation axis, or the zero vector when the angle is below [`Real::eps`].
    pub fn axis(&self) -> Vector3<T> {
        let angle = self.angle();
        if angle < T::eps() {
            return Vector3::zeros();
        }
        self.vector / angle
    }

    /// The rotation angle, the norm of the vector.
    pub fn angle(&self) -> T {
        self.vector.norm()
    }
}

impl<C: MatrixConvention, T: Real> From<RotationMatrix<C, T>> for AxisAngle<T> {
    /// `θ / (2 sin θ) · vee(R − Rᵀ)` for active matrices and `vee(Rᵀ − R)` for passive ones.
    fn from(dcm: RotationMatrix<C, T>) -> Self {
        let v = dcm.rotation_vector();
        Self::new(if C::IS_ACTIVE { v } else { -v })
    }
}

impl<Q: QuaternionConvention, T: Real> From<Quaternion<Q, T>> for AxisAngle<T> {
    /// Angle `2 acos(w)` about the normalized imaginary part, negated for JPL.
    ///
    /// `q` is canonicalized first so the angle lies in `[0, π]`.
    fn from(q: Quaternion<Q, T>) -> Self {
        let q = q.canonicalize();
        let one = T::one();
        let w = crate::linalg::clamp(q.w(), -one, one);
        let sin_half_sq = one - w * w;
        if sin_half_sq < T::eps() {
            return Self::default();
        }

        let angle = T::lit(2.0) * w.acos();
        let v = q.im() * (angle / sin_half_sq.sqrt());
        Self::new(if Q::IS_HAMILTON { v } else { -v })
    }
}

impl<E: EulerConvention, S: EulerSequence, T: Real> From<Euler<E, S, T>> for AxisAngle<T> {
    fn from(euler: Euler<E, S, T>) -> Self {
        Self::from(RotationMatrix::<Active, T>::from(euler))
    }
}

impl<T: Real> Mul<T> for AxisAngle<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self::new(self.vector * rhs)
    }
}

impl Mul<AxisAngle<f32>> for f32 {
    type Output = AxisAngle<f32>;

    fn mul(self, rhs: AxisAngle<f32>) -> Self::Output {
        rhs * self
    }
}

impl Mul<AxisAngle<f64>> for f64 {
    type Output = AxisAngle<f64>;

    fn mul(self, rhs: AxisAngle<f64>) -> Self::Output {
        rhs * self
    }
}

impl<T: Real> Div<T> for AxisAngle<T> {
    type Output = Vector3<T>;

    fn div(self, rhs: T) -> Self::Output {
        self.vector / rhs
    }
}

impl<T: Real> Neg for AxisAngle<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.vector)
    }
}

impl<T: Real> PartialEq for AxisAngle<T> {
    fn eq(&self, other: &Self) -> bool {
        bitwise_eq(self.vector.as_slice(), other.vector.as_slice())
    }
}

impl<T: Real> Eq for AxisAngle<T> {}

impl<T: Real> Default for AxisAngle<T> {
    fn default() -> Self {
        Self::new(Vector3::zeros())
    }
}

impl<T: Real> Index<usize> for AxisAngle<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.vector[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::{Extrinsic, Hamilton, Intrinsic, Jpl, Passive, ZYX};
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_3;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_axis_angle() {
        let aa = AxisAngleF64::from_axis_angle(&Vector3::new(0.0, 0.6, 0.8), 0.5);
        assert_relative_eq!(aa.angle(), 0.5, epsilon = EPSILON);
        assert_relative_eq!(aa.axis(), Vector3::new(0.0, 0.6, 0.8), epsilon = EPSILON);
        assert_eq!(AxisAngleF64::default().axis(), Vector3::zeros());
        assert_eq!(AxisAngleF64::default().angle(), 0.0);
    }

    #[test]
    fn test_ops() {
        let aa = AxisAngleF64::new(Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(*(aa * 2.0).vector(), Vector3::new(0.2, 0.4, 0.6));
        assert_eq!(2.0_f64 * aa, aa * 2.0);
        assert_eq!(*(-aa).vector(), Vector3::new(-0.1, -0.2, -0.3));
        assert_eq!(aa / 2.0, Vector3::new(0.05, 0.1, 0.15));
        assert_eq!(aa[2], 0.3);
    }

    #[test]
    fn test_from_every_representation() {
        let euler = Euler::<Intrinsic, ZYX, f64>::new(0.0, 0.2, 0.0);
        let expected = Vector3::new(0.0, 0.2, 0.0);

        let from_euler = AxisAngle::from(euler);
        let from_active = AxisAngle::from(RotationMatrix::<Active, f64>::from(euler));
        let from_passive = AxisAngle::from(RotationMatrix::<Passive, f64>::from(euler));
        let from_hamilton = AxisAngle::from(Quaternion::<Hamilton, f64>::from(euler));
        let from_jpl = AxisAngle::from(Quaternion::<Jpl, f64>::from(euler));

        for aa in [from_euler, from_active, from_passive, from_hamilton, from_jpl] {
            assert_relative_eq!(*aa.vector(), expected, epsilon = EPSILON);
        }
    }

    #[test]
    fn test_from_quaternion_negative_scalar() {
        fn check<Q: QuaternionConvention>() {
            let q = Quaternion::<Q, f64>::from_parts(-0.5, Vector3::new(0.5, 0.5, 0.5));
            let aa = AxisAngle::from(q);
            assert_relative_eq!(aa.angle(), 2.0 * FRAC_PI_3, epsilon = EPSILON);

            let from_matrix = AxisAngle::from(RotationMatrix::<Q::Matrix, f64>::from(q));
            assert_relative_eq!(*aa.vector(), *from_matrix.vector(), epsilon = EPSILON);
            let same = Quaternion::<Q, f64>::from_parts(0.5, Vector3::new(-0.5, -0.5, -0.5));
            assert_relative_eq!(*AxisAngle::from(same).vector(), *aa.vector(), epsilon = EPSILON);
        }
        check::<Hamilton>();
        check::<Jpl>();
    }

    #[test]
    fn test_round_trip_through_matrices() {
        let aa = AxisAngleF64::new(Vector3::new(-0.4, 1.3, 0.7));
        let active = AxisAngle::from(RotationMatrix::<Active, f64>::from(aa));
        let passive = AxisAngle::from(RotationMatrix::<Passive, f64>::from(aa));
        assert_relative_eq!(*active.vector(), *aa.vector(), epsilon = EPSILON);
        assert_relative_eq!(*passive.vector(), *aa.vector(), epsilon = EPSILON);

        let euler = Euler::<Extrinsic, ZYX, f64>::from(aa);
        assert_relative_eq!(*AxisAngle::from(euler).vector(), *aa.vector(), epsilon = EPSILON);
    }

    #[test]
    fn test_identity() {
        let identity = RotationMatrix::<Active, f32>::identity();
        assert_eq!(AxisAngle::from(identity), AxisAngle::default());
        assert_eq!(
            AxisAngle::from(Quaternion::<Jpl, f32>::identity()),
            AxisAngle::default()
        );
    }
}
