#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;

mod error;
mod montgomery;

pub use elliptic_curve::{self, bigint::U256, consts::U32, generic_array::GenericArray};

pub use crate::{
    arithmetic::{field::FieldElement, scalar::Scalar, CurveParams},
    error::{Error, Result},
    montgomery::MontgomeryPoint,
};

use elliptic_curve::FieldBytesEncoding;

/// Order of the prime-order subgroup of Curve25519 (i.e. scalar modulus) in
/// hexadecimal.
const ORDER_HEX: &str = "1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed";

/// Curve25519 in short Weierstrass form.
///
/// Its equation is `y² = x³ + ax + b` over the prime field `p = 2^255 - 19`:
///
/// ```text
/// a = 19298681539552699237261830834781317975544997444273427339909597334573241639236
/// b = 55751746669818908907645289078257140818241103727901012315294400837956729358436
/// ```
///
/// The cofactor is 8. Only the subgroup of order `n` generated by
/// [`AffinePoint::GENERATOR`] is used for scalar multiplication.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Wei25519;

impl elliptic_curve::Curve for Wei25519 {
    /// 32-byte serialized field elements.
    type FieldBytesSize = U32;

    /// 256-bit integer type used for internally representing field elements.
    type Uint = U256;

    /// Order of the prime-order subgroup (i.e. scalar modulus).
    const ORDER: U256 = U256::from_be_hex(ORDER_HEX);
}

impl FieldBytesEncoding<Wei25519> for U256 {}

/// Wei25519 field element serialized as big endian bytes.
pub type FieldBytes = elliptic_curve::FieldBytes<Wei25519>;

/// Point on Wei25519 in affine coordinates.
pub type AffinePoint = arithmetic::affine::AffinePoint<Wei25519>;

/// Point on Wei25519 in projective coordinates.
pub type ProjectivePoint = arithmetic::projective::ProjectivePoint<Wei25519>;
