//! EC-SRP5 password verifier derivation.
//!
//! The private scalar is the SRP-6 style hash chain
//!
//! ```text
//! i = SHA-256(salt || SHA-256(username || ":" || password))
//! ```
//!
//! read as a big endian integer and reduced modulo the subgroup order. The
//! database stores the Montgomery u-coordinate of `[i] G`.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use wei25519::{AffinePoint, FieldBytes, FieldElement, MontgomeryPoint, Scalar};

/// Compute the 32-byte password hash `i`.
pub fn password_hash(username: &str, password: &[u8], salt: &[u8]) -> [u8; 32] {
    let inner = Sha256::new()
        .chain_update(username.as_bytes())
        .chain_update(b":")
        .chain_update(password)
        .finalize();

    Sha256::new()
        .chain_update(salt)
        .chain_update(inner)
        .finalize()
        .into()
}

/// Derive the private scalar for a (username, password, salt) triple.
pub fn derive_scalar(username: &str, password: &[u8], salt: &[u8]) -> Scalar {
    let hash = password_hash(username, password, salt);
    Scalar::from_bytes_reduced(FieldBytes::from_slice(&hash))
}

/// Compute the public point `[scalar] G`.
///
/// A zero scalar would give the point at infinity, which has no
/// coordinate to compare, so it is rejected.
pub fn derive_public_point(scalar: &Scalar) -> Result<AffinePoint> {
    if scalar.is_zero() {
        return Err(Error::DegenerateScalar);
    }

    Ok(AffinePoint::mul_by_generator(scalar))
}

/// Compute the Montgomery point stored as the verifier for this triple.
pub fn derive_verifier(username: &str, password: &[u8], salt: &[u8]) -> Result<MontgomeryPoint> {
    let scalar = derive_scalar(username, password, salt);
    derive_public_point(&scalar)?
        .to_montgomery()
        .ok_or(Error::DegenerateScalar)
}

/// Compute the verifier coordinate compared against the database: the
/// Montgomery u-coordinate of the public point.
pub fn verifier_x(username: &str, password: &[u8], salt: &[u8]) -> Result<FieldElement> {
    derive_verifier(username, password, salt).map(|point| point.u())
}

/// Verifier value loaded from a user record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verifier {
    u: FieldElement,
    v_is_odd: Option<bool>,
}

impl Verifier {
    /// Parse a stored verifier: either the 32-byte u-coordinate or the
    /// 33-byte `u || parity` form found in `user.dat`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (u, parity) = match bytes.len() {
            32 => (bytes, None),
            33 => (&bytes[..32], Some(bytes[32])),
            n => {
                return Err(Error::Verifier(format!(
                    "expected 32 or 33 bytes, got {n}"
                )))
            }
        };

        let u = FieldElement::from_slice(u)
            .map_err(|_| Error::Verifier("u-coordinate is not reduced".into()))?;

        Ok(Self {
            u,
            v_is_odd: parity.map(|byte| byte & 1 == 1),
        })
    }

    /// The stored u-coordinate.
    pub fn u(&self) -> FieldElement {
        self.u
    }

    /// Parity of v, if the record carried it.
    pub fn v_is_odd(&self) -> Option<bool> {
        self.v_is_odd
    }

    /// Does a derived u-coordinate match this verifier? Parity is not
    /// compared.
    pub fn matches(&self, u: &FieldElement) -> bool {
        self.u == *u
    }

    /// Is the stored u-coordinate the coordinate of a curve point?
    pub fn is_on_curve(&self) -> bool {
        MontgomeryPoint::new(self.u, self.v_is_odd.unwrap_or(false))
            .lift()
            .is_ok()
    }
}

impl From<MontgomeryPoint> for Verifier {
    fn from(point: MontgomeryPoint) -> Self {
        Self {
            u: point.u(),
            v_is_odd: Some(point.v_is_odd()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn hash_chain() {
        assert_eq!(
            password_hash("admin", b"correct", b"abc123"),
            hex!("f642eddaed12dca331d76a2e24e06039a0077f4b5b627cfcecff53c20cbf1e4f")
        );
        assert_eq!(
            password_hash("admin", b"", b""),
            hex!("9843308030c72374193b78ea093584c1407550d7aad66c9c6414c6aac49120cc")
        );
    }

    #[test]
    fn zero_scalar_is_degenerate() {
        assert!(matches!(
            derive_public_point(&Scalar::ZERO),
            Err(Error::DegenerateScalar)
        ));
    }

    #[test]
    fn verifier_lengths() {
        assert!(Verifier::from_bytes(&[0u8; 32]).is_ok());
        assert_eq!(
            Verifier::from_bytes(&[0u8; 33]).unwrap().v_is_odd(),
            Some(false)
        );
        assert!(matches!(
            Verifier::from_bytes(&[0u8; 31]),
            Err(Error::Verifier(_))
        ));
        assert!(matches!(
            Verifier::from_bytes(&[0xffu8; 32]),
            Err(Error::Verifier(_))
        ));
    }

    #[test]
    fn parity_is_ignored() {
        let mut bytes = [0u8; 33];
        bytes[31] = 9;
        bytes[32] = 1;
        let verifier = Verifier::from_bytes(&bytes).unwrap();
        assert!(verifier.matches(&FieldElement::from_u64(9)));
        assert!(verifier.is_on_curve());
    }

    #[test]
    fn twist_point_is_not_on_curve() {
        let mut bytes = [0u8; 32];
        bytes[31] = 2;
        assert!(!Verifier::from_bytes(&bytes).unwrap().is_on_curve());
    }
}
