//! Birational map between Wei25519 and the Montgomery form of Curve25519,
//! `v² = u³ + 486662u² + u`.
//!
//! With `B = 1` the map is a pure translation of the first coordinate:
//! `x = u + A/3`, `y = v`.

use crate::{AffinePoint, Error, FieldElement, Result};

/// Montgomery coefficient `A = 486662`.
const MONTGOMERY_A: FieldElement = FieldElement::from_u64(486662);

/// `A/3 mod p`, the translation between Montgomery u and Weierstrass x.
const A_OVER_3: FieldElement =
    FieldElement::from_hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad2451");

/// Point on the Montgomery curve, represented by its u-coordinate and the
/// parity of its v-coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MontgomeryPoint {
    u: FieldElement,
    v_is_odd: bool,
}

impl MontgomeryPoint {
    /// Size of the `u || parity` encoding.
    pub const ENCODED_LEN: usize = 33;

    /// Create a point from its u-coordinate and the parity of v.
    ///
    /// No curve membership check is done here; see [`MontgomeryPoint::lift`].
    pub fn new(u: FieldElement, v_is_odd: bool) -> Self {
        Self { u, v_is_odd }
    }

    /// The u-coordinate.
    pub fn u(&self) -> FieldElement {
        self.u
    }

    /// Is the v-coordinate odd?
    pub fn v_is_odd(&self) -> bool {
        self.v_is_odd
    }

    /// Parse the 33-byte `u || parity` encoding. `u` is big endian and the
    /// parity byte must be `0` or `1`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return Err(Error::Encoding);
        }

        let u = FieldElement::from_slice(&bytes[..32])?;
        let v_is_odd = match bytes[32] {
            0 => false,
            1 => true,
            _ => return Err(Error::Encoding),
        };

        Ok(Self::new(u, v_is_odd))
    }

    /// Serialize as `u || parity`.
    pub fn to_bytes(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out[..32].copy_from_slice(&self.u.to_bytes());
        out[32] = u8::from(self.v_is_odd);
        out
    }

    /// Recover the Wei25519 point with this u-coordinate and v parity.
    ///
    /// Fails with [`Error::NotOnCurve`] when `u³ + Au² + u` is not a square.
    pub fn lift(&self) -> Result<AffinePoint> {
        let u = self.u;
        let v2 = u * (u.square() + MONTGOMERY_A * u + FieldElement::ONE);
        let mut v = v2.sqrt().ok_or(Error::NotOnCurve)?;

        if v.is_odd() != self.v_is_odd {
            v = -v;
        }

        AffinePoint::new(u + A_OVER_3, v)
    }
}

impl AffinePoint {
    /// Map this point to Montgomery form. Returns `None` for the point at
    /// infinity, which has no affine Montgomery image.
    pub fn to_montgomery(&self) -> Option<MontgomeryPoint> {
        if self.is_identity() {
            return None;
        }

        Some(MontgomeryPoint::new(self.x - A_OVER_3, self.y.is_odd()))
    }
}
