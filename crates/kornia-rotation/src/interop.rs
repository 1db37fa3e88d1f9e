//! Lossless conversions between the active/Hamilton types of this crate and their glam
//! counterparts.
//!
//! glam stores matrices column-major like nalgebra and represents rotations actively with
//! Hamilton quaternions, so the conversions copy components without any sign change.

use nalgebra::{Matrix3, Vector3};

use crate::conventions::{Active, Hamilton};
use crate::quaternion::Quaternion;
use crate::rotation_matrix::RotationMatrix;

macro_rules! glam_interop {
    ($scalar:ty, $mat:ty, $quat:ty) => {
        impl From<$mat> for RotationMatrix<Active, $scalar> {
            #[inline]
            fn from(mat: $mat) -> Self {
                Self::from_matrix_unchecked(Matrix3::from_column_slice(&mat.to_cols_array()))
            }
        }

        impl From<RotationMatrix<Active, $scalar>> for $mat {
            #[inline]
            fn from(dcm: RotationMatrix<Active, $scalar>) -> Self {
                <$mat>::from_cols_slice(dcm.matrix().as_slice())
            }
        }

        impl From<$quat> for Quaternion<Hamilton, $scalar> {
            #[inline]
            fn from(q: $quat) -> Self {
                let [x, y, z, w] = q.to_array();
                Self::from_parts(w, Vector3::new(x, y, z))
            }
        }

        impl From<Quaternion<Hamilton, $scalar>> for $quat {
            #[inline]
            fn from(q: Quaternion<Hamilton, $scalar>) -> Self {
                <$quat>::from_xyzw(q.x(), q.y(), q.z(), q.w())
            }
        }
    };
}

glam_interop!(f32, glam::Mat3, glam::Quat);
glam_interop!(f64, glam::DMat3, glam::DQuat);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conventions::{Intrinsic, ZYX};
    use crate::euler::Euler;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix_layout() {
        let euler = Euler::<Intrinsic, ZYX, f32>::new(0.3, -0.2, 0.9);
        let dcm = RotationMatrix::<Active, f32>::from(euler);
        let mat = glam::Mat3::from(dcm);
        // glam indexes columns first
        assert_eq!(mat.col(0).y, dcm[(1, 0)]);
        assert_eq!(mat.col(2).x, dcm[(0, 2)]);
        assert_eq!(RotationMatrix::<Active, f32>::from(mat), dcm);
    }

    #[test]
    fn test_same_rotation() {
        let euler = Euler::<Intrinsic, ZYX, f64>::new(1.1, 0.4, -0.6);
        let q = Quaternion::<Hamilton, f64>::from(euler);
        let dq = glam::DQuat::from(q);
        assert_eq!(Quaternion::<Hamilton, f64>::from(dq), q);

        let v = Vector3::new(0.2, -1.0, 0.5);
        let rotated = dq * glam::DVec3::new(v.x, v.y, v.z);
        let expected = q.rotate(&v);
        assert_relative_eq!(rotated.x, expected.x, epsilon = 1e-12);
        assert_relative_eq!(rotated.y, expected.y, epsilon = 1e-12);
        assert_relative_eq!(rotated.z, expected.z, epsilon = 1e-12);

        let dm = glam::DMat3::from(RotationMatrix::<Active, f64>::from(euler));
        let from_glam = glam::DMat3::from_quat(dq);
        assert!(dm.abs_diff_eq(from_glam, 1e-12));
    }

    #[test]
    fn test_identity() {
        assert_eq!(
            glam::Quat::from(Quaternion::<Hamilton, f32>::identity()),
            glam::Quat::IDENTITY
        );
        assert_eq!(
            RotationMatrix::<Active, f32>::from(glam::Mat3::IDENTITY),
            RotationMatrix::identity()
        );
    }
}
