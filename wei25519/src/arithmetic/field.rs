//! Field arithmetic modulo p = 2^{255} − 19
//!
//! Elements are kept in Montgomery form using the constant-modulus residues
//! of `crypto-bigint`. Inversion and square roots are computed by
//! exponentiation.

use crate::{Error, FieldBytes, Result, U256};
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    bigint::{impl_modulus, modular::constant_mod::Residue, ArrayEncoding},
    subtle::{Choice, ConstantTimeEq},
};

/// Constant representing the modulus: p = 2^{255} − 19
const MODULUS_HEX: &str = "7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed";

impl_modulus!(FieldModulus, U256, MODULUS_HEX);

type Fe = Residue<FieldModulus, { U256::LIMBS }>;

/// p - 2
const P_MINUS_2: U256 =
    U256::from_be_hex("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffeb");

/// (p + 3) / 8
const SQRT_EXP: U256 =
    U256::from_be_hex("0ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffe");

/// 2^((p - 1) / 4), a square root of -1.
const SQRT_M1: FieldElement =
    FieldElement::from_hex("2b8324804fc1df0b2b4d00993dfbd7a72f431806ad2fe478c4ee1b274a0ea0b0");

/// Element of the Curve25519 base field used for curve coordinates.
#[derive(Clone, Copy)]
pub struct FieldElement(Fe);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self(Fe::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(Fe::ONE);

    /// Field modulus `p`.
    pub const MODULUS: U256 = U256::from_be_hex(MODULUS_HEX);

    /// Create a [`FieldElement`] from a big endian hex string.
    ///
    /// Intended for constants: panics on malformed input and does not check
    /// that the value is reduced.
    pub const fn from_hex(hex: &str) -> Self {
        Self::from_uint_unchecked(U256::from_be_hex(hex))
    }

    /// Convert a `u64` into a [`FieldElement`].
    pub const fn from_u64(w: u64) -> Self {
        Self::from_uint_unchecked(U256::from_u64(w))
    }

    /// Convert an integer into Montgomery form without checking that it is
    /// smaller than the modulus.
    pub const fn from_uint_unchecked(uint: U256) -> Self {
        Self(Fe::new(&uint))
    }

    /// Convert an integer in the range `[0, p)` into a [`FieldElement`].
    pub fn from_uint(uint: U256) -> Result<Self> {
        if uint < Self::MODULUS {
            Ok(Self::from_uint_unchecked(uint))
        } else {
            Err(Error::Encoding)
        }
    }

    /// Parse a big endian encoded field element, rejecting values `>= p`.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::from_uint(U256::from_be_byte_array(bytes.clone()))
    }

    /// Parse a big endian encoded field element from a 32-byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != 32 {
            return Err(Error::Encoding);
        }

        Self::from_bytes(FieldBytes::from_slice(slice))
    }

    /// Returns the big endian encoding of this field element.
    pub fn to_bytes(&self) -> FieldBytes {
        self.to_canonical().to_be_byte_array()
    }

    /// Returns the canonical integer representative in `[0, p)`.
    pub fn to_canonical(&self) -> U256 {
        self.0.retrieve()
    }

    /// Determine if this element is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Determine if the canonical representative is odd.
    pub fn is_odd(&self) -> bool {
        self.to_bytes()[31] & 1 == 1
    }

    /// Returns `self + rhs mod p`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self(self.0 + rhs.0)
    }

    /// Returns `self - rhs mod p`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self(self.0 - rhs.0)
    }

    /// Returns `self * rhs mod p`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0)
    }

    /// Returns `-self mod p`.
    pub fn neg(&self) -> Self {
        Self(-self.0)
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Returns `self^exp mod p`.
    pub fn pow(&self, exp: &U256) -> Self {
        Self(self.0.pow(exp))
    }

    /// Returns the multiplicative inverse of self.
    ///
    /// Fails with [`Error::Inversion`] when self is zero.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::Inversion);
        }

        Ok(self.invert_unchecked())
    }

    /// Fermat inversion, `self^(p - 2)`. Maps zero to zero.
    pub(crate) fn invert_unchecked(&self) -> Self {
        self.pow(&P_MINUS_2)
    }

    /// Returns the square root of self mod p, or `None` if no square root
    /// exists.
    pub fn sqrt(&self) -> Option<Self> {
        // Because p ≡ 5 mod 8, a candidate is self^((p + 3) / 8). It squares
        // to either self or -self; the latter is fixed up by sqrt(-1).
        let candidate = self.pow(&SQRT_EXP);
        let square = candidate.square();

        if square == *self {
            Some(candidate)
        } else if square == -*self {
            Some(candidate * SQRT_M1)
        } else {
            None
        }
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_canonical().ct_eq(&other.to_canonical())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl From<u64> for FieldElement {
    fn from(n: u64) -> FieldElement {
        Self::from_u64(n)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x{:x})", self)
    }
}

impl fmt::LowerHex for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        FieldElement::add(&self, &rhs)
    }
}

impl AddAssign for FieldElement {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = FieldElement::add(self, &rhs);
    }
}

impl Sub for FieldElement {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        FieldElement::sub(&self, &rhs)
    }
}

impl SubAssign for FieldElement {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = FieldElement::sub(self, &rhs);
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        FieldElement::mul(&self, &rhs)
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = FieldElement::mul(self, &rhs);
    }
}

impl Neg for FieldElement {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        FieldElement::neg(&self)
    }
}
