use std::fmt;

use bitvec::prelude::*;
use num_bigint_dig::BigUint;
use tracing::trace;

use crate::curve::Curve;
use crate::error::{Error, Result};
use crate::field::FieldElement;

/// A point on a Weierstrass curve, or the point at infinity of that curve.
///
/// Equality compares the coordinates and the curve, so two points at infinity
/// on different curves are not equal. Finite points can only be built through
/// [`Point::new`] (or [`Curve::point`]), which checks the curve equation:
///
/// ```compile_fail
/// use weierstrass_gf::{AffinePoint, Curve, Point};
///
/// let curve = Curve::from_reduced(0, 7, 223).unwrap();
/// let bogus = Point::Affine(AffinePoint {
///     x: curve.element(1),
///     y: curve.element(1),
///     curve: curve.clone(),
/// });
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Point {
    Infinity(Curve),
    Affine(AffinePoint),
}

/// Coordinates of a finite point, known to satisfy the curve equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AffinePoint {
    x: FieldElement,
    y: FieldElement,
    curve: Curve,
}

impl AffinePoint {
    pub fn x(&self) -> &FieldElement {
        &self.x
    }

    pub fn y(&self) -> &FieldElement {
        &self.y
    }

    pub fn curve(&self) -> &Curve {
        &self.curve
    }
}

impl Point {
    pub fn new(x: FieldElement, y: FieldElement, curve: Curve) -> Result<Self> {
        if !curve.contains(&x, &y)? {
            trace!(%x, %y, %curve, "point not on curve");
            return Err(Error::PointNotOnCurve {
                x: x.num().to_string(),
                y: y.num().to_string(),
            });
        }

        Ok(Self::affine_unchecked(x, y, curve))
    }

    /// Skips the curve check; callers guarantee `(x, y)` is on `curve`.
    pub(crate) fn affine_unchecked(x: FieldElement, y: FieldElement, curve: Curve) -> Self {
        Point::Affine(AffinePoint { x, y, curve })
    }

    pub fn infinity(curve: Curve) -> Self {
        Point::Infinity(curve)
    }

    pub fn is_at_infinity(&self) -> bool {
        matches!(self, Point::Infinity(_))
    }

    pub fn curve(&self) -> &Curve {
        match self {
            Point::Infinity(curve) => curve,
            Point::Affine(point) => &point.curve,
        }
    }

    pub fn coordinates(&self) -> Option<(&FieldElement, &FieldElement)> {
        match self {
            Point::Infinity(_) => None,
            Point::Affine(point) => Some((&point.x, &point.y)),
        }
    }

    pub fn x(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(x, _)| x)
    }

    pub fn y(&self) -> Option<&FieldElement> {
        self.coordinates().map(|(_, y)| y)
    }

    /// Group law. The cases are tried in order and each one relies on the
    /// earlier ones having been ruled out.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.curve() != other.curve() {
            return Err(Error::CurveMismatch);
        }
        let curve = self.curve();

        let ((x1, y1), (x2, y2)) = match (self.coordinates(), other.coordinates()) {
            (None, _) => return Ok(other.clone()),
            (_, None) => return Ok(self.clone()),
            (Some(l), Some(r)) => (l, r),
        };

        if x1 == x2 && y1 != y2 {
            trace!("vertical line");
            return Ok(curve.infinity());
        }

        if x1 != x2 {
            let slope = y2.sub(y1)?.div(&x2.sub(x1)?)?;
            return third_point(curve, &slope, x1, y1, x2);
        }

        if self == other && !y1.is_zero() {
            trace!("tangent");
            let numerator = x1.pow(2)?.mul(&curve.element(3))?.add(curve.a())?;
            let denominator = y1.mul(&curve.element(2))?;
            let slope = numerator.div(&denominator)?;
            return third_point(curve, &slope, x1, y1, x1);
        }

        if self == other && y1.is_zero() {
            trace!("vertical tangent");
            return Ok(curve.infinity());
        }

        Err(Error::AdditionUndefined)
    }

    pub fn double(&self) -> Result<Self> {
        self.add(self)
    }

    pub fn negate(&self) -> Self {
        match self {
            Point::Infinity(_) => self.clone(),
            Point::Affine(point) => {
                Self::affine_unchecked(point.x.clone(), point.y.negate(), point.curve.clone())
            }
        }
    }

    /// `k * self` by double-and-add over the bits of `k`, least significant first.
    pub fn multiply(&self, k: &BigUint) -> Result<Self> {
        let mut output = self.curve().infinity();
        let mut addend = self.clone();
        let k_bytes = k.to_bytes_le();
        let bits = k_bytes.view_bits::<Lsb0>();
        let top = bits.last_one().map_or(0, |i| i + 1);

        for bit in &bits[..top] {
            if *bit {
                output = output.add(&addend)?;
            }
            addend = addend.double()?;
        }

        Ok(output)
    }
}

/// Third intersection of the line through `(x1, y1)` with `slope`, reflected
/// over the x-axis.
fn third_point(
    curve: &Curve,
    slope: &FieldElement,
    x1: &FieldElement,
    y1: &FieldElement,
    x2: &FieldElement,
) -> Result<Point> {
    let x3 = slope.pow(2)?.sub(x1)?.sub(x2)?;
    let y3 = slope.mul(&x1.sub(&x3)?)?.sub(y1)?;

    Ok(Point::affine_unchecked(x3, y3, curve.clone()))
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity(_) => write!(f, "Point at Infinity"),
            Point::Affine(point) => {
                write!(f, "({}, {}) on {}", point.x.num(), point.y.num(), point.curve)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::SECP256K1;

    fn secp_like() -> Curve {
        Curve::from_reduced(0, 7, 223).unwrap()
    }

    fn point(curve: &Curve, x: i64, y: i64) -> Point {
        curve.point_from(x, y).unwrap()
    }

    #[test]
    fn rejects_points_off_the_curve() {
        let curve = secp_like();
        assert_eq!(
            curve.point_from(200, 119),
            Err(Error::PointNotOnCurve {
                x: "200".to_string(),
                y: "119".to_string()
            })
        );
        assert!(curve.point_from(192, 105).is_ok());
    }

    #[test]
    fn rejects_coordinates_from_another_field() {
        let curve = secp_like();
        let x = FieldElement::new(1, 17).unwrap();
        assert!(matches!(
            curve.point(x.clone(), x),
            Err(Error::FieldMismatch(_, _))
        ));
    }

    #[test]
    fn finite_points_stay_on_their_curve() {
        let curve = secp_like();
        assert!(curve.point_from(1, 1).is_err());

        let good = point(&curve, 192, 105);
        let derived = [
            good.clone(),
            good.negate(),
            good.double().unwrap(),
            good.add(&point(&curve, 17, 56)).unwrap(),
            good.multiply(&BigUint::from(5u32)).unwrap(),
        ];
        for p in derived.iter() {
            match p {
                Point::Affine(affine) => {
                    assert_eq!(affine.curve(), &curve);
                    assert!(curve.contains(affine.x(), affine.y()).unwrap());
                }
                Point::Infinity(_) => panic!("{} is finite", p),
            }
        }
    }

    #[test]
    fn infinity_is_identity() {
        let curve = secp_like();
        let p = point(&curve, 192, 105);
        let inf = curve.infinity();

        assert_eq!(p.add(&inf).unwrap(), p);
        assert_eq!(inf.add(&p).unwrap(), p);
        assert!(inf.add(&inf).unwrap().is_at_infinity());
    }

    #[test]
    fn secant() {
        let curve = secp_like();
        let sum = point(&curve, 192, 105).add(&point(&curve, 17, 56)).unwrap();
        assert_eq!(sum, point(&curve, 170, 142));

        let sum = point(&curve, 170, 142).add(&point(&curve, 60, 139)).unwrap();
        assert_eq!(sum, point(&curve, 220, 181));
    }

    #[test]
    fn inverse_pair_is_infinity() {
        let curve = secp_like();
        let p = point(&curve, 192, 105);
        assert!(p.add(&p.negate()).unwrap().is_at_infinity());
        assert!(curve.infinity().negate().is_at_infinity());
    }

    #[test]
    fn tangent() {
        let curve = secp_like();
        assert_eq!(point(&curve, 47, 71).double().unwrap(), point(&curve, 36, 111));

        let curve = Curve::from_reduced(5, 7, 223).unwrap();
        let p = point(&curve, -1, -1);
        let doubled = p.add(&p).unwrap();
        assert_eq!(doubled, point(&curve, 18, 77));
    }

    #[test]
    fn vertical_tangent() {
        let curve = Curve::from_reduced(1, 0, 223).unwrap();
        let p = point(&curve, 0, 0);
        assert!(p.double().unwrap().is_at_infinity());
    }

    #[test]
    fn curve_mismatch() {
        let p = point(&secp_like(), 192, 105);
        let other = Curve::from_reduced(5, 7, 223).unwrap();
        let q = point(&other, -1, -1);

        assert_eq!(p.add(&q), Err(Error::CurveMismatch));
        assert_eq!(p.add(&other.infinity()), Err(Error::CurveMismatch));
        assert_ne!(secp_like().infinity(), other.infinity());
    }

    #[test]
    fn scalar_multiplication() {
        let curve = secp_like();
        let g = point(&curve, 15, 86);
        let expected = [(15, 86), (139, 86), (69, 137), (69, 86), (139, 137), (15, 137)];

        assert!(g.multiply(&BigUint::from(0u32)).unwrap().is_at_infinity());
        for (k, (x, y)) in expected.iter().enumerate() {
            let k = BigUint::from(k as u32 + 1);
            assert_eq!(g.multiply(&k).unwrap(), point(&curve, *x, *y));
        }
        assert!(g.multiply(&BigUint::from(7u32)).unwrap().is_at_infinity());
        assert_eq!(g.multiply(&BigUint::from(8u32)).unwrap(), g);
    }

    #[test]
    fn secp256k1_generator_order() {
        let secp = &*SECP256K1;
        assert!(secp
            .generator
            .multiply(&secp.order)
            .unwrap()
            .is_at_infinity());
    }

    #[test]
    fn display() {
        let curve = secp_like();
        assert_eq!(curve.infinity().to_string(), "Point at Infinity");
        assert_eq!(
            point(&curve, 192, 105).to_string(),
            "(192, 105) on y^2 = x^3 + 0*x + 7 over GF(223)"
        );
    }
}
