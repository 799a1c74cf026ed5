//! Scalars modulo the order of the Curve25519 prime-order subgroup.

use crate::{FieldBytes, Wei25519, U256};
use core::{fmt, ops::Add};
use elliptic_curve::{bigint::ArrayEncoding, Curve as _};

/// Integer in `[0, n)` where `n` is the order of the Wei25519 base point.
///
/// Scalars only carry the reduction invariant; the curve operations consume
/// them one bit at a time, most significant bit first.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Scalar(U256);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(U256::ONE);

    /// Number of bits in the order `n`.
    pub const NUM_BITS: usize = 253;

    /// Convert a `u64` into a [`Scalar`].
    pub const fn from_u64(w: u64) -> Self {
        // every u64 is below n
        Self(U256::from_u64(w))
    }

    /// Interpret `uint` as an integer and reduce it modulo `n`.
    pub fn from_uint_reduced(uint: U256) -> Self {
        Self(uint.wrapping_rem(&Wei25519::ORDER))
    }

    /// Interpret `bytes` as a big endian integer and reduce it modulo `n`.
    pub fn from_bytes_reduced(bytes: &FieldBytes) -> Self {
        Self::from_uint_reduced(U256::from_be_byte_array(bytes.clone()))
    }

    /// Returns the big endian encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        self.0.to_be_byte_array()
    }

    /// Returns the integer value in `[0, n)`.
    pub fn to_uint(&self) -> U256 {
        self.0
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        self.0 == U256::ZERO
    }

    /// Returns `self + rhs mod n`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(self.0.add_mod(&rhs.0, &Wei25519::ORDER))
    }

    /// Iterate over the bits of this scalar, most significant first,
    /// starting at bit 255.
    pub(crate) fn bits_be(&self) -> impl Iterator<Item = bool> {
        let bytes = self.to_bytes();
        (0..256).map(move |i| (bytes[i / 8] >> (7 - i % 8)) & 1 == 1)
    }
}

impl Add for Scalar {
    type Output = Scalar;

    fn add(self, rhs: Scalar) -> Scalar {
        Scalar::add(&self, &rhs)
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Scalar {
        Self::from_u64(n)
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x{:x})", self)
    }
}

impl fmt::LowerHex for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}
