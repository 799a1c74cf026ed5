//! Property-based tests for the group law.

use proptest::{prelude::*, prop_compose, proptest};
use wei25519::{AffinePoint, FieldBytes, ProjectivePoint, Scalar};

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
        Scalar::from_bytes_reduced(&FieldBytes::from(bytes))
    }
}

prop_compose! {
    fn point()(k in scalar()) -> AffinePoint {
        AffinePoint::mul_by_generator(&k)
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn closure(a in point(), b in point()) {
        prop_assert!((a + b).is_on_curve());
        prop_assert!(a.double().is_on_curve());
    }

    #[test]
    fn identity_law(a in point()) {
        prop_assert_eq!(a + AffinePoint::IDENTITY, a);
        prop_assert_eq!(AffinePoint::IDENTITY + a, a);
    }

    #[test]
    fn add_self_is_double(a in point()) {
        prop_assert_eq!(a + a, a.double());
    }

    #[test]
    fn commutativity(a in point(), b in point()) {
        prop_assert_eq!(a + b, b + a);
    }

    #[test]
    fn negation(a in point()) {
        prop_assert!((a + (-a)).is_identity());
        prop_assert_eq!(-(-a), a);
    }

    #[test]
    fn projective_matches_affine(a in point(), b in point()) {
        let (pa, pb) = (ProjectivePoint::from(a), ProjectivePoint::from(b));
        prop_assert_eq!(pa.add(&pb).to_affine(), a + b);
        prop_assert_eq!(pa.double().to_affine(), a.double());
        prop_assert_eq!(AffinePoint::from(pa.add(&pa.neg())), AffinePoint::IDENTITY);
    }

    #[test]
    fn distributivity(a in scalar(), b in scalar()) {
        let lhs = AffinePoint::mul_by_generator(&(a + b));
        let rhs = AffinePoint::mul_by_generator(&a) + AffinePoint::mul_by_generator(&b);
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn montgomery_round_trip(a in point()) {
        if let Some(m) = a.to_montgomery() {
            prop_assert_eq!(m.lift(), Ok(a));
        }
    }
}
