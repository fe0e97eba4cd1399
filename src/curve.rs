use std::fmt;

use lazy_static::lazy_static;
use num_bigint_dig::{BigInt, BigUint};

use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::point::Point;

/// Short Weierstrass curve `y^2 = x^3 + a*x + b` over the field of `a` and `b`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Curve {
    a: FieldElement,
    b: FieldElement,
}

impl Curve {
    pub fn new(a: FieldElement, b: FieldElement) -> Result<Self> {
        if !a.same_field(&b) {
            return Err(Error::FieldMismatch(
                a.prime().to_string(),
                b.prime().to_string(),
            ));
        }

        Ok(Self { a, b })
    }

    /// Builds the curve from integer coefficients, reducing them into GF(`prime`).
    pub fn from_reduced<A, B, P>(a: A, b: B, prime: P) -> Result<Self>
    where
        A: Into<BigInt>,
        B: Into<BigInt>,
        P: Into<BigInt>,
    {
        let a = FieldElement::from_reduced(a, prime)?;
        let b = a.lift(b);

        Ok(Self { a, b })
    }

    pub fn a(&self) -> &FieldElement {
        &self.a
    }

    pub fn b(&self) -> &FieldElement {
        &self.b
    }

    pub fn prime(&self) -> &BigUint {
        self.a.prime()
    }

    /// Lifts an integer into the curve's field.
    pub fn element<N: Into<BigInt>>(&self, num: N) -> FieldElement {
        self.a.lift(num)
    }

    /// Checks `y^2 == x^3 + a*x + b`.
    pub fn contains(&self, x: &FieldElement, y: &FieldElement) -> Result<bool> {
        for coordinate in [x, y] {
            if !coordinate.same_field(&self.a) {
                return Err(Error::FieldMismatch(
                    self.prime().to_string(),
                    coordinate.prime().to_string(),
                ));
            }
        }
        let lhs = y.pow(2)?;
        let rhs = x.pow(3)?.add(&self.a.mul(x)?)?.add(&self.b)?;

        Ok(lhs == rhs)
    }

    /// `4a^3 + 27b^2 == 0`. Singular curves are accepted but their points do
    /// not form a group.
    pub fn is_singular(&self) -> bool {
        self.discriminant().map(|d| d.is_zero()).unwrap_or(false)
    }

    fn discriminant(&self) -> Result<FieldElement> {
        let four_a_cubed = self.a.pow(3)?.mul(&self.element(4))?;
        let twenty_seven_b_squared = self.b.pow(2)?.mul(&self.element(27))?;

        four_a_cubed.add(&twenty_seven_b_squared)
    }

    pub fn point(&self, x: FieldElement, y: FieldElement) -> Result<Point> {
        Point::new(x, y, self.clone())
    }

    /// Builds a point from integer coordinates, reducing them into the field.
    pub fn point_from<X, Y>(&self, x: X, y: Y) -> Result<Point>
    where
        X: Into<BigInt>,
        Y: Into<BigInt>,
    {
        self.point(self.element(x), self.element(y))
    }

    pub fn infinity(&self) -> Point {
        Point::infinity(self.clone())
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "y^2 = x^3 + {}*x + {} over GF({})",
            self.a.num(),
            self.b.num(),
            self.prime()
        )
    }
}

/// A curve together with a base point and the order of that point.
#[derive(Debug, Clone)]
pub struct NamedCurve {
    pub name: &'static str,
    pub curve: Curve,
    pub generator: Point,
    pub order: BigUint,
}

lazy_static! {
    pub static ref SECP256K1: NamedCurve = {
        let p = hex("fffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f");
        let a = FieldElement::from_parts(BigUint::from(0u32), p.clone());
        let b = a.lift(7);
        let curve = Curve { a, b };
        let generator = Point::affine_unchecked(
            FieldElement::from_parts(
                hex("79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"),
                p.clone(),
            ),
            FieldElement::from_parts(
                hex("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
                p,
            ),
            curve.clone(),
        );

        NamedCurve {
            name: "secp256k1",
            curve,
            generator,
            order: hex("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141"),
        }
    };
}

fn hex(digits: &str) -> BigUint {
    BigUint::parse_bytes(digits.as_bytes(), 16).unwrap()
}
