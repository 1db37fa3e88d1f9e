//! Convention markers.
//!
//! Every convention is a zero-sized type implementing a sealed trait, so the choice between
//! e.g. active and passive rotation matrices is made when the type is written and resolved at
//! compile time. Only the twelve valid Euler sequences implement [`EulerSequence`]; a triple such
//! as `XXY` has no marker type and cannot be used.
//!
//! [`PrincipalAxis`] and [`SequenceKind`] are the runtime counterparts, used when a sequence is
//! read from text.

use std::fmt;
use std::str::FromStr;

use crate::error::RotationError;

mod sealed {
    pub trait Sealed {}
}

/// One of the three coordinate axes.
///
/// The discriminants are the row/column indices of the axis, and the Euler conversions rely on
/// that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrincipalAxis {
    /// The x axis, index 0.
    X = 0,
    /// The y axis, index 1.
    Y = 1,
    /// The z axis, index 2.
    Z = 2,
}

impl PrincipalAxis {
    /// The row/column index of the axis.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The unit vector along the axis.
    pub fn unit<T: nalgebra::RealField + Copy>(self) -> nalgebra::Vector3<T> {
        let mut v = nalgebra::Vector3::zeros();
        v[self.index()] = T::one();
        v
    }
}

impl TryFrom<usize> for PrincipalAxis {
    type Error = RotationError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::X),
            1 => Ok(Self::Y),
            2 => Ok(Self::Z),
            _ => Err(RotationError::InvalidAxisIndex(index)),
        }
    }
}

impl FromStr for PrincipalAxis {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Self::X),
            "Y" | "y" => Ok(Self::Y),
            "Z" | "z" => Ok(Self::Z),
            other => Err(RotationError::InvalidAxisName(other.to_string())),
        }
    }
}

impl fmt::Display for PrincipalAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        };
        write!(f, "{name}")
    }
}

/// How a rotation matrix acts on vectors.
pub trait MatrixConvention:
    sealed::Sealed + fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// `true` for [`Active`], `false` for [`Passive`].
    const IS_ACTIVE: bool;
    /// Human readable name.
    const NAME: &'static str;
}

/// The matrix rotates vectors within a fixed frame (alibi).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Active;

/// The matrix re-expresses fixed vectors in a rotated frame (alias).
///
/// A passive principal rotation is the transpose of the active one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Passive;

/// Alternative name for [`Active`].
pub type Alibi = Active;

/// Alternative name for [`Passive`].
pub type Alias = Passive;

impl sealed::Sealed for Active {}
impl sealed::Sealed for Passive {}

impl MatrixConvention for Active {
    const IS_ACTIVE: bool = true;
    const NAME: &'static str = "active";
}

impl MatrixConvention for Passive {
    const IS_ACTIVE: bool = false;
    const NAME: &'static str = "passive";
}

/// Component layout and handedness of a quaternion.
pub trait QuaternionConvention:
    sealed::Sealed + fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// The rotation matrix convention the quaternion maps to.
    type Matrix: MatrixConvention;
    /// `true` for [`Hamilton`], `false` for [`Jpl`].
    const IS_HAMILTON: bool;
    /// Storage index of the scalar part.
    const W: usize;
    /// Storage index of the first imaginary component.
    const X: usize;
    /// Human readable name.
    const NAME: &'static str;
}

/// Scalar-first `[w, x, y, z]` quaternions, paired with [`Active`] matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hamilton;

/// Scalar-last `[x, y, z, w]` quaternions, paired with [`Passive`] matrices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Jpl;

impl sealed::Sealed for Hamilton {}
impl sealed::Sealed for Jpl {}

impl QuaternionConvention for Hamilton {
    type Matrix = Active;
    const IS_HAMILTON: bool = true;
    const W: usize = 0;
    const X: usize = 1;
    const NAME: &'static str = "hamilton";
}

impl QuaternionConvention for Jpl {
    type Matrix = Passive;
    const IS_HAMILTON: bool = false;
    const W: usize = 3;
    const X: usize = 0;
    const NAME: &'static str = "jpl";
}

/// Whether Euler rotations are taken about moving or fixed axes.
pub trait EulerConvention:
    sealed::Sealed + fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// `true` for [`Intrinsic`], `false` for [`Extrinsic`].
    const IS_INTRINSIC: bool;
    /// Human readable name.
    const NAME: &'static str;
}

/// Rotations about the body axes, which move with each rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Intrinsic;

/// Rotations about the fixed world axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Extrinsic;

impl sealed::Sealed for Intrinsic {}
impl sealed::Sealed for Extrinsic {}

impl EulerConvention for Intrinsic {
    const IS_INTRINSIC: bool = true;
    const NAME: &'static str = "intrinsic";
}

impl EulerConvention for Extrinsic {
    const IS_INTRINSIC: bool = false;
    const NAME: &'static str = "extrinsic";
}

/// Returns `true` when the matrix of an Euler triple is `R1 * R2 * R3` and `false` when it is
/// `R3 * R2 * R1`.
///
/// The first order holds for intrinsic angles with active matrices and for extrinsic angles with
/// passive matrices.
#[inline]
pub(crate) const fn is_forward_composition<E: EulerConvention, C: MatrixConvention>() -> bool {
    E::IS_INTRINSIC == C::IS_ACTIVE
}

/// The same test for quaternions, through their paired matrix convention.
#[inline]
pub(crate) const fn is_forward_product<E: EulerConvention, Q: QuaternionConvention>() -> bool {
    E::IS_INTRINSIC == Q::IS_HAMILTON
}

/// An ordered triple of rotation axes.
///
/// Implemented by the six Tait-Bryan sequences (all axes distinct) and the six proper Euler
/// sequences (first axis repeated last).
pub trait EulerSequence:
    sealed::Sealed + fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// Axis of the first rotation.
    const AXIS1: PrincipalAxis;
    /// Axis of the second rotation.
    const AXIS2: PrincipalAxis;
    /// Axis of the third rotation.
    const AXIS3: PrincipalAxis;
    /// The runtime value of this sequence.
    const KIND: SequenceKind;

    /// `true` when the first axis is repeated as the third.
    #[inline]
    fn is_proper_euler() -> bool {
        Self::KIND.is_proper_euler()
    }
}

macro_rules! euler_sequences {
    ($($name:ident => ($a1:ident, $a2:ident, $a3:ident)),+ $(,)?) => {
        $(
            #[doc = concat!(
                "Rotate about ", stringify!($a1), ", then ", stringify!($a2),
                ", then ", stringify!($a3), "."
            )]
            #[allow(clippy::upper_case_acronyms)]
            #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
            pub struct $name;

            impl sealed::Sealed for $name {}

            impl EulerSequence for $name {
                const AXIS1: PrincipalAxis = PrincipalAxis::$a1;
                const AXIS2: PrincipalAxis = PrincipalAxis::$a2;
                const AXIS3: PrincipalAxis = PrincipalAxis::$a3;
                const KIND: SequenceKind = SequenceKind::$name;
            }
        )+

        /// Runtime tag for one of the twelve Euler sequences.
        #[allow(clippy::upper_case_acronyms)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SequenceKind {
            $(
                #[doc = concat!("The ", stringify!($name), " sequence.")]
                $name,
            )+
        }

        impl SequenceKind {
            /// All twelve sequences, Tait-Bryan first.
            pub const ALL: [SequenceKind; 12] = [$(SequenceKind::$name),+];

            /// The three rotation axes in order.
            pub const fn axes(self) -> [PrincipalAxis; 3] {
                match self {
                    $(SequenceKind::$name => [
                        PrincipalAxis::$a1,
                        PrincipalAxis::$a2,
                        PrincipalAxis::$a3,
                    ],)+
                }
            }

            /// The canonical upper case name, e.g. `"ZYX"`.
            pub const fn name(self) -> &'static str {
                match self {
                    $(SequenceKind::$name => stringify!($name),)+
                }
            }
        }
    };
}

euler_sequences! {
    XYZ => (X, Y, Z),
    XZY => (X, Z, Y),
    YXZ => (Y, X, Z),
    YZX => (Y, Z, X),
    ZXY => (Z, X, Y),
    ZYX => (Z, Y, X),
    XYX => (X, Y, X),
    XZX => (X, Z, X),
    YXY => (Y, X, Y),
    YZY => (Y, Z, Y),
    ZXZ => (Z, X, Z),
    ZYZ => (Z, Y, Z),
}

impl SequenceKind {
    /// `true` when the first axis is repeated as the third.
    pub const fn is_proper_euler(self) -> bool {
        let [a1, _, a3] = self.axes();
        a1 as usize == a3 as usize
    }

    /// `true` when all three axes are distinct.
    pub const fn is_tait_bryan(self) -> bool {
        !self.is_proper_euler()
    }
}

impl FromStr for SequenceKind {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || RotationError::InvalidSequence(trimmed.to_string());

        let mut axes = [PrincipalAxis::X; 3];
        let mut chars = trimmed.chars();
        for axis in axes.iter_mut() {
            let c = chars.next().ok_or_else(invalid)?;
            *axis = c.to_string().parse().map_err(|_| invalid())?;
        }
        if chars.next().is_some() {
            return Err(invalid());
        }

        SequenceKind::ALL
            .into_iter()
            .find(|kind| kind.axes() == axes)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
