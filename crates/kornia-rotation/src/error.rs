/// An error type for parsing runtime descriptions of rotation conventions.
///
/// The numeric conversions never fail; degenerate geometry resolves to a canonical value
/// instead. These errors only appear when axes, sequences or conventions are read from text
/// or integers, e.g. from a configuration file or the command line.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RotationError {
    /// The index does not name a principal axis.
    #[error("Invalid principal axis index {0}, expected 0, 1 or 2")]
    InvalidAxisIndex(usize),

    /// The text does not name a principal axis.
    #[error("Invalid principal axis name {0:?}, expected X, Y or Z")]
    InvalidAxisName(String),

    /// The text is not one of the twelve Euler sequences.
    #[error("Invalid Euler sequence {0:?}, expected three axes with no two consecutive repeats")]
    InvalidSequence(String),

    /// The text does not name a known convention.
    #[error("Invalid convention {0:?}")]
    InvalidConvention(String),
}
