//! Affine arithmetic tests.

use hex_literal::hex;
use wei25519::{
    elliptic_curve::Curve, AffinePoint, FieldBytes, FieldElement, Scalar, Wei25519, U256,
};

/// Affine coordinates of `[k] G` for `k = 1..=4`.
const MUL_TEST_VECTORS: &[([u8; 32], [u8; 32])] = &[
    (
        hex!("2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad245a"),
        hex!("5f51e65e475f794b1fe122d388b72eb36dc2b28192839e4dd6163a5d81312c14"),
    ),
    (
        hex!("4b7ded7fc31e9c62841fb71327c01bbf39ea0797c8dfb6070758f1478815734c"),
        hex!("6c4a81fee8ff1751faf5ff6ba2d45d0c889a614d7272c6e14328fb9a38d20a8a"),
    ),
    (
        hex!("46bd66c518025690effdf83c6cc6650fa32cf9120cc6b3046ab4ae5aa61e6063"),
        hex!("56797aa341c7815153115bb9acd3cc73ac950a8f08e108308a399afe63beddc2"),
    ),
    (
        hex!("247943628b134828927c7b1f4c05dc0aa8c2b08a7807d4cdba99308effad3853"),
        hex!("78a50a40b14238a3701d978cbd82d8a28c3f04ec25c9ef885a9aac60b921e3bd"),
    ),
];

fn point(x: &[u8; 32], y: &[u8; 32]) -> AffinePoint {
    AffinePoint::new(
        FieldElement::from_slice(x).unwrap(),
        FieldElement::from_slice(y).unwrap(),
    )
    .unwrap()
}

#[test]
fn mul_by_small_scalars() {
    let g = AffinePoint::GENERATOR;

    for (k, (x, y)) in MUL_TEST_VECTORS.iter().enumerate() {
        let expected = point(x, y);
        let k = Scalar::from_u64(k as u64 + 1);
        assert_eq!(g.mul(&k), expected);
        assert_eq!(AffinePoint::mul_by_generator(&k), expected);
    }
}

#[test]
fn repeated_addition() {
    let g = AffinePoint::GENERATOR;
    let mut acc = AffinePoint::IDENTITY;

    for (x, y) in MUL_TEST_VECTORS {
        acc = acc + g;
        assert_eq!(acc, point(x, y));
    }
}

#[test]
fn double_matches_vector() {
    let (x, y) = MUL_TEST_VECTORS[1];
    assert_eq!(AffinePoint::GENERATOR.double(), point(&x, &y));
    assert_eq!(AffinePoint::GENERATOR.double().double(), {
        let (x, y) = MUL_TEST_VECTORS[3];
        point(&x, &y)
    });
}

#[test]
fn mul_by_zero_is_identity() {
    assert!(AffinePoint::GENERATOR.mul(&Scalar::ZERO).is_identity());
    assert!(AffinePoint::IDENTITY.mul(&Scalar::from_u64(7)).is_identity());
}

#[test]
fn mul_by_order_is_identity() {
    let n = Scalar::from_uint_reduced(Wei25519::ORDER);
    assert!(AffinePoint::mul_by_generator(&n).is_identity());
}

#[test]
fn mul_by_order_minus_one_is_negation() {
    let n_minus_one = Scalar::from_uint_reduced(Wei25519::ORDER.wrapping_sub(&U256::ONE));
    let p = AffinePoint::mul_by_generator(&n_minus_one);
    assert_eq!(p, -AffinePoint::GENERATOR);
    assert!((p + AffinePoint::GENERATOR).is_identity());
}

#[test]
fn inverse_operands_sum_to_identity() {
    let g = AffinePoint::GENERATOR;
    assert!((g + (-g)).is_identity());
    assert!((g - g).is_identity());
    assert_eq!(AffinePoint::IDENTITY + g, g);
    assert_eq!(g + AffinePoint::IDENTITY, g);
}

#[test]
fn order_two_point() {
    // (A/3, 0) has a vertical tangent
    let x = FieldElement::from_hex(
        "2aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaad2451",
    );
    let t = AffinePoint::new(x, FieldElement::ZERO).unwrap();
    assert!(t.double().is_identity());
    assert!((t + t).is_identity());
    assert_eq!(-t, t);
}

#[test]
fn montgomery_u_matches_x25519() {
    // u-coordinate of [123456789] (u = 9), computed with an X25519 ladder
    let k = Scalar::from_u64(123456789);
    let m = AffinePoint::mul_by_generator(&k).to_montgomery().unwrap();
    assert_eq!(
        m.u().to_bytes(),
        *FieldBytes::from_slice(&hex!(
            "43289de2a44ea47b0b3eede19da6e43971a3f458993909837a711622960b7e18"
        ))
    );
    assert_eq!(m.lift().unwrap().to_montgomery(), Some(m));
}
