#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Rotation
//!
//! Rotation matrices, unit quaternions, Euler angles, axis-angle vectors, angular velocity and
//! Euler rates, together with the conversions between them.
//!
//! Conventions are part of the type: a [`RotationMatrix`] is either [`Active`] or [`Passive`], a
//! [`Quaternion`] is either [`Hamilton`] or [`Jpl`], and an [`Euler`] triple carries both its
//! [`EulerConvention`] and one of the twelve [`EulerSequence`] markers. Mixing conventions
//! therefore needs an explicit conversion and invalid sequences cannot be written down.
//!
//! ## Example
//!
//! ```rust
//! use kornia_rotation::{
//!     Active, AxisAngleF32, EulerF32, Hamilton, Intrinsic, QuaternionF32, RotationMatrixF32, ZYX,
//! };
//! use nalgebra::Vector3;
//!
//! let euler = EulerF32::<Intrinsic, ZYX>::new(0.1, 0.2, 0.3);
//! let quaternion = QuaternionF32::<Hamilton>::from(euler);
//! let axis_angle = AxisAngleF32::from(quaternion);
//! let rotation = RotationMatrixF32::<Active>::from(axis_angle);
//!
//! let v = Vector3::new(1.0, 0.0, 0.0);
//! let a = rotation * v;
//! let b = quaternion * v;
//! assert!((a - b).norm() < 1e-5);
//! ```

/// Angular velocity in the body frame.
pub mod angular_velocity;

/// Wrapped one-dimensional angles.
pub mod angle;

/// Rotation vectors (axis scaled by angle).
pub mod axis_angle;

/// Compile-time convention markers and their runtime mirrors.
pub mod conventions;

/// Closed-form eigendecomposition of symmetric 3x3 matrices.
pub mod eigen;

/// Error types for parsing runtime convention descriptions.
pub mod error;

/// Euler angle triples.
pub mod euler;

/// Time derivatives of Euler angle triples.
pub mod euler_rate;

/// Conversions to and from glam types.
#[cfg(feature = "glam")]
pub mod interop;

/// Small linear algebra helpers on top of nalgebra.
pub mod linalg;

/// Unit quaternions under the Hamilton or JPL convention.
pub mod quaternion;

/// Rotation matrices under the active or passive convention.
pub mod rotation_matrix;

/// Scalar precision and the per-precision zero threshold.
pub mod scalar;

pub use angle::{Angle, NegPiToPi, Unwrapped, WrapMode, ZeroToTwoPi};
pub use angular_velocity::{AngularVelocity, AngularVelocityF32, AngularVelocityF64};
pub use axis_angle::{AxisAngle, AxisAngleF32, AxisAngleF64};
pub use conventions::{
    Active, Alias, Alibi, EulerConvention, EulerSequence, Extrinsic, Hamilton, Intrinsic, Jpl,
    MatrixConvention, Passive, PrincipalAxis, QuaternionConvention, SequenceKind, XYX, XYZ, XZX, XZY, YXY,
    YXZ, YZX, YZY, ZXY, ZXZ, ZYX, ZYZ,
};
pub use eigen::{EigenPair, EigenSolver};
pub use error::RotationError;
pub use euler::{Euler, EulerF32, EulerF64};
pub use euler_rate::{EulerRate, EulerRateF32, EulerRateF64};
pub use quaternion::{Quaternion, QuaternionF32, QuaternionF64};
pub use rotation_matrix::{RotationMatrix, RotationMatrixF32, RotationMatrixF64};
pub use scalar::Real;
