include!(concat!(env!("OUT_DIR"), "/epsilon.rs"));

/// A real floating point scalar usable by every rotation type.
///
/// The threshold returned by [`Real::eps`] is configured at build time per precision through
/// the `KORNIA_ROTATION_F32_EPSILON_EXPONENT` and `KORNIA_ROTATION_F64_EPSILON_EXPONENT`
/// environment variables (defaults `1e-6` and `1e-12`).
pub trait Real: nalgebra::RealField + Copy {
    /// Angles and norms below this value are treated as zero.
    fn eps() -> Self;

    /// Converts an `f64` literal into this precision.
    #[inline]
    fn lit(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// The IEEE 754 bit pattern, widened to `u64`.
    fn bits(self) -> u64;
}

impl Real for f32 {
    #[inline]
    fn eps() -> Self {
        F32_EPSILON
    }

    #[inline]
    fn bits(self) -> u64 {
        u64::from(self.to_bits())
    }
}

impl Real for f64 {
    #[inline]
    fn eps() -> Self {
        F64_EPSILON
    }

    #[inline]
    fn bits(self) -> u64 {
        self.to_bits()
    }
}
