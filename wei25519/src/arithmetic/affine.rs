//! Affine curve points.
//!
//! Points are added with the textbook chord-and-tangent formulas, one
//! inversion per operation. Every exceptional case of the group law
//! (identity operands, doubling, inverse operands, vertical tangents) is
//! dispatched explicitly before any division takes place. Scalar
//! multiplication runs on [`ProjectivePoint`] instead.

#![allow(clippy::op_ref)]

use crate::{
    arithmetic::{field::FieldElement, projective::ProjectivePoint, scalar::Scalar, CurveParams},
    Error, Result,
};
use core::{
    fmt,
    marker::PhantomData,
    ops::{Add, Mul, Neg, Sub},
};

/// Point on a short Weierstrass curve in affine coordinates.
#[derive(Clone, Copy)]
pub struct AffinePoint<C: CurveParams> {
    /// x-coordinate
    pub(crate) x: FieldElement,

    /// y-coordinate
    pub(crate) y: FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    pub(crate) infinity: u8,

    curve: PhantomData<C>,
}

impl<C> AffinePoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
        curve: PhantomData,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        infinity: 0,
        curve: PhantomData,
    };

    /// Create a point from its affine coordinates, checking that it satisfies
    /// the curve equation.
    pub fn new(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Self::from_coordinates_unchecked(x, y);

        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::NotOnCurve)
        }
    }

    pub(crate) const fn from_coordinates_unchecked(x: FieldElement, y: FieldElement) -> Self {
        Self {
            x,
            y,
            infinity: 0,
            curve: PhantomData,
        }
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity == 1
    }

    /// The x-coordinate. Zero for the point at infinity.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// The y-coordinate. Zero for the point at infinity.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Does this point satisfy `y² = x³ + ax + b`?
    pub fn is_on_curve(&self) -> bool {
        if self.is_identity() {
            return true;
        }

        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + C::EQUATION_A * self.x + C::EQUATION_B;
        lhs == rhs
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }

        if other.is_identity() {
            return *self;
        }

        if self.x == other.x {
            if self.y == other.y {
                return self.double();
            }

            // Same x-coordinate and distinct y-coordinates: `other == -self`.
            return Self::IDENTITY;
        }

        // x1 != x2, so the chord is not vertical and the denominator is non-zero.
        let lambda = (other.y - self.y) * (other.x - self.x).invert_unchecked();
        self.through_slope(&other.x, lambda)
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        // Vertical tangent at points of order two.
        if self.is_identity() || self.y.is_zero() {
            return Self::IDENTITY;
        }

        let numerator = FieldElement::from_u64(3) * self.x.square() + C::EQUATION_A;
        let lambda = numerator * self.y.double().invert_unchecked();
        self.through_slope(&self.x, lambda)
    }

    /// Third intersection of the line with slope `lambda` through `self` and
    /// the point with x-coordinate `other_x`, reflected over the x-axis.
    fn through_slope(&self, other_x: &FieldElement, lambda: FieldElement) -> Self {
        let x3 = lambda.square() - self.x - *other_x;
        let y3 = lambda * (self.x - x3) - self.y;
        Self::from_coordinates_unchecked(x3, y3)
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        if self.is_identity() {
            return *self;
        }

        Self::from_coordinates_unchecked(self.x, -self.y)
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Returns `[k] self` using left-to-right double-and-add.
    ///
    /// The ladder runs in projective coordinates and is normalized once at
    /// the end. `k` is already reduced modulo the subgroup order, so this
    /// computes the expected result for points of the prime-order subgroup.
    pub fn mul(&self, k: &Scalar) -> Self {
        if self.is_identity() || k.is_zero() {
            return Self::IDENTITY;
        }

        let base = ProjectivePoint::<C>::from(*self);
        let mut acc = ProjectivePoint::<C>::IDENTITY;
        for bit in k.bits_be() {
            acc = acc.double();
            if bit {
                acc = acc.add(&base);
            }
        }
        acc.to_affine()
    }

    /// Returns `[k] G` where `G` is [`AffinePoint::GENERATOR`].
    pub fn mul_by_generator(k: &Scalar) -> Self {
        Self::mul(&Self::GENERATOR, k)
    }
}

impl<C> Default for AffinePoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> PartialEq for AffinePoint<C>
where
    C: CurveParams,
{
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => true,
            (false, false) => self.x == other.x && self.y == other.y,
            _ => false,
        }
    }
}

impl<C: CurveParams> Eq for AffinePoint<C> {}

impl<C> fmt::Debug for AffinePoint<C>
where
    C: CurveParams,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_identity() {
            write!(f, "AffinePoint::IDENTITY")
        } else {
            f.debug_struct("AffinePoint")
                .field("x", &self.x)
                .field("y", &self.y)
                .finish()
        }
    }
}

//
// Arithmetic trait impls
//

impl<C: CurveParams> Add<AffinePoint<C>> for AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn add(self, other: AffinePoint<C>) -> AffinePoint<C> {
        AffinePoint::add(&self, &other)
    }
}

impl<C: CurveParams> Add<&AffinePoint<C>> for &AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn add(self, other: &AffinePoint<C>) -> AffinePoint<C> {
        AffinePoint::add(self, other)
    }
}

impl<C: CurveParams> Sub<AffinePoint<C>> for AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn sub(self, other: AffinePoint<C>) -> AffinePoint<C> {
        AffinePoint::sub(&self, &other)
    }
}

impl<C: CurveParams> Neg for AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn neg(self) -> AffinePoint<C> {
        AffinePoint::neg(&self)
    }
}

impl<C: CurveParams> Mul<Scalar> for AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn mul(self, scalar: Scalar) -> AffinePoint<C> {
        AffinePoint::mul(&self, &scalar)
    }
}

impl<C: CurveParams> Mul<&Scalar> for &AffinePoint<C> {
    type Output = AffinePoint<C>;

    fn mul(self, scalar: &Scalar) -> AffinePoint<C> {
        AffinePoint::mul(self, scalar)
    }
}
