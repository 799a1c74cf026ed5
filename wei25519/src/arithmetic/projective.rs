//! Projective curve points.
//!
//! Homogeneous coordinates `(X : Y : Z)` with `x = X/Z`, `y = Y/Z`. The group
//! law needs no inversion, so scalar multiplication accumulates here and
//! converts back to affine once at the end. Exceptional cases are dispatched
//! the same way [`AffinePoint::add`] does, which keeps the formulas valid for
//! points of every order, including the point of order two.

use crate::arithmetic::{affine::AffinePoint, field::FieldElement, CurveParams};
use core::marker::PhantomData;

/// Point on a short Weierstrass curve in projective coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint<C: CurveParams> {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    curve: PhantomData<C>,
}

impl<C> ProjectivePoint<C>
where
    C: CurveParams,
{
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
        curve: PhantomData,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: C::GENERATOR.0,
        y: C::GENERATOR.1,
        z: FieldElement::ONE,
        curve: PhantomData,
    };

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Returns the affine representation of this point. Costs one inversion.
    pub fn to_affine(&self) -> AffinePoint<C> {
        if self.is_identity() {
            return AffinePoint::IDENTITY;
        }

        let zinv = self.z.invert_unchecked();
        AffinePoint::from_coordinates_unchecked(self.x * zinv, self.y * zinv)
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            y: -self.y,
            ..*self
        }
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }

        if other.is_identity() {
            return *self;
        }

        let y1z2 = self.y * other.z;
        let x1z2 = self.x * other.z;
        let z1z2 = self.z * other.z;
        let u = other.y * self.z - y1z2;
        let v = other.x * self.z - x1z2;

        if v.is_zero() {
            if u.is_zero() {
                return self.double();
            }

            // Same affine x-coordinate and distinct y-coordinates.
            return Self::IDENTITY;
        }

        let vv = v.square();
        let vvv = v * vv;
        let r = vv * x1z2;
        let a = u.square() * z1z2 - vvv - r.double();

        Self {
            x: v * a,
            y: u * (r - a) - vvv * y1z2,
            z: vvv * z1z2,
            curve: PhantomData,
        }
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        // Vertical tangent at points of order two.
        if self.is_identity() || self.y.is_zero() {
            return Self::IDENTITY;
        }

        let xx = self.x.square();
        let w = C::EQUATION_A * self.z.square() + xx.double() + xx;
        let s = (self.y * self.z).double();
        let r = self.y * s;
        let rr = r.square();
        let b = (self.x + r).square() - xx - rr;
        let h = w.square() - b.double();

        Self {
            x: h * s,
            y: w * (b - h) - rr.double(),
            z: s * s.square(),
            curve: PhantomData,
        }
    }
}

impl<C> Default for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl<C> From<AffinePoint<C>> for ProjectivePoint<C>
where
    C: CurveParams,
{
    fn from(p: AffinePoint<C>) -> Self {
        if p.is_identity() {
            return Self::IDENTITY;
        }

        Self {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
            curve: PhantomData,
        }
    }
}

impl<C> From<ProjectivePoint<C>> for AffinePoint<C>
where
    C: CurveParams,
{
    fn from(p: ProjectivePoint<C>) -> Self {
        p.to_affine()
    }
}
