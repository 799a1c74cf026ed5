//! Pure Rust implementation of group operations on Curve25519 written in
//! short Weierstrass form.
//!
//! Curve parameters follow the Wei25519 representation of
//! [draft-ietf-lwig-curve-representations], Appendix E.3.
//!
//! [draft-ietf-lwig-curve-representations]: https://datatracker.ietf.org/doc/draft-ietf-lwig-curve-representations/

pub mod affine;
pub mod field;
pub mod projective;
pub mod scalar;

use self::field::FieldElement;
use crate::{Wei25519, U256};

/// Parameters for elliptic curves over `GF(2^255 - 19)` which can be described
/// by the short Weierstrass equation `y² = x³ + ax + b`.
pub trait CurveParams: elliptic_curve::Curve<Uint = U256> {
    /// Coefficient `a` in the curve equation.
    const EQUATION_A: FieldElement;

    /// Coefficient `b` in the curve equation.
    const EQUATION_B: FieldElement;

    /// Generator point's affine coordinates: (x, y).
    const GENERATOR: (FieldElement, FieldElement);
}

impl CurveParams for Wei25519 {
    const EQUATION_A: FieldElement =
        FieldElement::from_hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa984914a144");
    const EQUATION_B: FieldElement =
        FieldElement::from_hex("7b425ed097b425ed097b425ed097b425ed097b425ed097b4260b5e9c7710c864");

    /// Montgomery `u = 9` lifted with an even `y`.
    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_hex("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a"),
        FieldElement::from_hex("5f51e65e475f794b1fe122d388b72eb36dc2b28192839e4dd6163a5d81312c14"),
    );
}
