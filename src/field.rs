//! Arithmetic in the prime field GF(p).
//!
//! Values and moduli are arbitrary precision. Every operation checks that both
//! operands share a modulus and hands back a fresh element, so elements behave
//! like plain values and can be shared across threads freely.

use std::fmt;

use num_bigint_dig::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{default_config, PrimalityConfig};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldElement {
    num: BigUint,
    prime: BigUint,
}

impl FieldElement {
    /// Builds `num` in GF(`prime`), requiring `0 <= num < prime`.
    pub fn new<N, P>(num: N, prime: P) -> Result<Self>
    where
        N: Into<BigInt>,
        P: Into<BigInt>,
    {
        Self::new_with(num, prime, default_config())
    }

    pub fn new_with<N, P>(num: N, prime: P, config: &PrimalityConfig) -> Result<Self>
    where
        N: Into<BigInt>,
        P: Into<BigInt>,
    {
        let prime = validate_modulus(&prime.into(), config)?;
        let num = num.into();
        let (sign, magnitude) = split_sign(&num);
        if sign == Sign::Minus || magnitude >= prime {
            debug!(%num, %prime, "field element out of range");
            return Err(Error::OutOfRange {
                num: num.to_string(),
                prime: prime.to_string(),
            });
        }

        Ok(Self::from_parts(magnitude, prime))
    }

    /// Builds the residue of any integer `num` in GF(`prime`). Negative values
    /// wrap around, so `-1` becomes `prime - 1`.
    pub fn from_reduced<N, P>(num: N, prime: P) -> Result<Self>
    where
        N: Into<BigInt>,
        P: Into<BigInt>,
    {
        Self::from_reduced_with(num, prime, default_config())
    }

    pub fn from_reduced_with<N, P>(num: N, prime: P, config: &PrimalityConfig) -> Result<Self>
    where
        N: Into<BigInt>,
        P: Into<BigInt>,
    {
        let prime = validate_modulus(&prime.into(), config)?;
        let num = reduce(&num.into(), &prime);

        Ok(Self::from_parts(num, prime))
    }

    /// Skips validation; callers guarantee `prime` is prime and `num < prime`.
    pub(crate) fn from_parts(num: BigUint, prime: BigUint) -> Self {
        Self { num, prime }
    }

    pub fn num(&self) -> &BigUint {
        &self.num
    }

    pub fn prime(&self) -> &BigUint {
        &self.prime
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn same_field(&self, other: &Self) -> bool {
        self.prime == other.prime
    }

    pub fn additive_identity(&self) -> Self {
        Self::from_parts(BigUint::zero(), self.prime.clone())
    }

    pub fn multiplicative_identity(&self) -> Self {
        Self::from_parts(BigUint::one(), self.prime.clone())
    }

    /// Lifts an integer into the same field as `self`.
    pub fn lift<N: Into<BigInt>>(&self, num: N) -> Self {
        Self::from_parts(reduce(&num.into(), &self.prime), self.prime.clone())
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let num = (&self.num + &other.num) % &self.prime;

        Ok(Self::from_parts(num, self.prime.clone()))
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let num = (&self.num + &self.prime - &other.num) % &self.prime;

        Ok(Self::from_parts(num, self.prime.clone()))
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        let num = (&self.num * &other.num) % &self.prime;

        Ok(Self::from_parts(num, self.prime.clone()))
    }

    pub fn negate(&self) -> Self {
        let num = (&self.prime - &self.num) % &self.prime;

        Self::from_parts(num, self.prime.clone())
    }

    /// Raises `self` to `exponent`.
    ///
    /// The multiplicative group has order `p - 1`, so a negative exponent `-k`
    /// is replaced by `(p - 1) - (k mod (p - 1))` before exponentiating. Any
    /// element, zero included, to the power zero is one. Zero has no negative
    /// powers and yields `DivisionByZero`.
    pub fn pow<E: Into<BigInt>>(&self, exponent: E) -> Result<Self> {
        let (sign, magnitude) = split_sign(&exponent.into());
        let exponent = match sign {
            Sign::Minus => {
                if self.is_zero() {
                    return Err(Error::DivisionByZero);
                }
                let order = &self.prime - &BigUint::one();
                (&order - &(magnitude % &order)) % &order
            }
            _ => magnitude,
        };

        Ok(self.pow_unsigned(&exponent))
    }

    /// Multiplicative inverse `num^(p-2)` by Fermat's little theorem.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::DivisionByZero);
        }
        let exponent = &self.prime - &BigUint::from(2u32);

        Ok(self.pow_unsigned(&exponent))
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        self.check_field(other)?;
        self.mul(&other.inverse()?)
    }

    fn pow_unsigned(&self, exponent: &BigUint) -> Self {
        if exponent.is_zero() {
            return self.multiplicative_identity();
        }

        Self::from_parts(self.num.modpow(exponent, &self.prime), self.prime.clone())
    }

    fn check_field(&self, other: &Self) -> Result<()> {
        if self.same_field(other) {
            Ok(())
        } else {
            trace!(left = %self.prime, right = %other.prime, "field mismatch");
            Err(Error::FieldMismatch(
                self.prime.to_string(),
                other.prime.to_string(),
            ))
        }
    }
}

impl fmt::Display for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement_{}({})", self.prime, self.num)
    }
}

/// Computes `x^(p-1)` for every `x` in `1..p`, in that order.
///
/// Fermat's little theorem says each entry is one; the set is a cheap check of
/// the exponentiation path for small moduli.
pub fn create_set(p: u64) -> Result<Vec<FieldElement>> {
    create_set_with(p, default_config())
}

pub fn create_set_with(p: u64, config: &PrimalityConfig) -> Result<Vec<FieldElement>> {
    let prime = validate_modulus(&BigInt::from(p), config)?;
    let order = &prime - &BigUint::one();
    let lift = |x: u64| FieldElement::from_parts(BigUint::from(x), prime.clone()).pow_unsigned(&order);

    #[cfg(feature = "parallel")]
    let set: Vec<FieldElement> = (1..p).into_par_iter().map(lift).collect();
    #[cfg(not(feature = "parallel"))]
    let set: Vec<FieldElement> = (1..p).map(lift).collect();

    Ok(set)
}

fn validate_modulus(prime: &BigInt, config: &PrimalityConfig) -> Result<BigUint> {
    let (sign, magnitude) = split_sign(prime);
    if sign == Sign::Minus || !config.is_prime(&magnitude) {
        debug!(%prime, rounds = config.rounds, "rejected modulus");
        return Err(Error::InvalidModulus(prime.to_string()));
    }

    Ok(magnitude)
}

fn split_sign(n: &BigInt) -> (Sign, BigUint) {
    let magnitude = match n.sign() {
        Sign::Minus => (-n).to_biguint(),
        _ => n.to_biguint(),
    };
    (n.sign(), magnitude.unwrap_or_else(BigUint::zero))
}

fn reduce(n: &BigInt, prime: &BigUint) -> BigUint {
    let (sign, magnitude) = split_sign(n);
    let residue = magnitude % prime;
    match sign {
        Sign::Minus => (prime - &residue) % prime,
        _ => residue,
    }
}
