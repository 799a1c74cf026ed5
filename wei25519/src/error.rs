//! Error types.

use core::fmt;

/// Arithmetic domain errors.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Attempted to invert zero.
    Inversion,

    /// Coordinates do not satisfy the curve equation.
    NotOnCurve,

    /// Byte encoding has the wrong length or is not reduced modulo `p`.
    Encoding,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Inversion => write!(f, "zero has no multiplicative inverse"),
            Error::NotOnCurve => write!(f, "point is not on the curve"),
            Error::Encoding => write!(f, "invalid field element encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Result type.
pub type Result<T> = core::result::Result<T, Error>;
