//! Decimal approximations of algebraic numbers with certified comparisons.
//!
//! An [`AlgebraicApproximation`] pairs a [`ScaledDecimal`] with the degree and
//! height of the algebraic number it approximates. Two distinct algebraic
//! numbers of degree `d` and height `h` cannot agree in their first
//! `floor(log10 d) + floor(log10 h) + 1` decimal places, so once that many
//! places are held, sign and comparison answers are exact.
//!
//! Arithmetic grows the height additively and never refines. A sign or
//! comparison query on a value that does not hold enough places fails with
//! [`ApproximationError::InsufficientAccuracy`]; the caller refines and
//! retries.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Serialize, Serializer};

use crate::decimal::ScaledDecimal;
use crate::error::ApproximationError;

/// `floor(log10 n)` for `n >= 1`, and `0` for `n == 0`.
fn log10_floor(n: &BigUint) -> u32 {
    if n.is_zero() {
        return 0;
    }
    // Decimal digit count minus one; at most u32::MAX digits are representable.
    (n.to_string().len() - 1) as u32
}

/// Decimal places needed to decide a sign for degree `degree` and height `height`.
pub fn precision_needed(degree: u32, height: &BigUint) -> u32 {
    log10_floor(&BigUint::from(degree)) + log10_floor(height) + 1
}

/// Right-hand operand of approximation arithmetic and comparison.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Decimal(&'a AlgebraicApproximation),
    /// An exact integer, lifted to the left operand's scale before combining.
    Integer(i64),
}

impl<'a> From<&'a AlgebraicApproximation> for Operand<'a> {
    fn from(value: &'a AlgebraicApproximation) -> Self {
        Operand::Decimal(value)
    }
}

impl From<i64> for Operand<'_> {
    fn from(value: i64) -> Self {
        Operand::Integer(value)
    }
}

impl From<i32> for Operand<'_> {
    fn from(value: i32) -> Self {
        Operand::Integer(value.into())
    }
}

/// Heights are written as decimal strings, like the decimals they accompany.
fn height_as_string<S: Serializer>(height: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(height)
}

/// A decimal approximation of an algebraic number of known degree and height.
#[derive(Debug, Clone, Serialize)]
pub struct AlgebraicApproximation {
    decimal: ScaledDecimal,
    degree: u32,
    #[serde(serialize_with = "height_as_string")]
    height: BigUint,
    #[serde(skip)]
    precision_needed: u32,
}

impl AlgebraicApproximation {
    /// Wrap `decimal` as an approximation of a number of the given degree and height.
    pub fn new(
        decimal: ScaledDecimal,
        degree: u32,
        height: impl Into<BigUint>,
    ) -> Result<Self, ApproximationError> {
        if degree == 0 {
            return Err(ApproximationError::InvalidDegree);
        }
        Ok(Self::from_parts(decimal, degree, height.into()))
    }

    fn from_parts(decimal: ScaledDecimal, degree: u32, height: BigUint) -> Self {
        let precision_needed = precision_needed(degree, &height);
        Self {
            decimal,
            degree,
            height,
            precision_needed,
        }
    }

    /// Parse a decimal literal and attach `degree` and `height`.
    pub fn from_string(
        text: &str,
        degree: u32,
        height: impl Into<BigUint>,
    ) -> Result<Self, ApproximationError> {
        Self::new(text.parse()?, degree, height)
    }

    pub fn decimal(&self) -> &ScaledDecimal {
        &self.decimal
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn height(&self) -> &BigUint {
        &self.height
    }

    /// Decimal places currently held.
    pub fn accuracy(&self) -> u32 {
        self.decimal.scale()
    }

    /// Decimal places required before sign and comparison are decidable.
    pub fn precision_needed(&self) -> u32 {
        self.precision_needed
    }

    /// Whether enough places are held to answer sign and comparison queries.
    pub fn good(&self) -> bool {
        self.accuracy() >= self.precision_needed
    }

    /// Resolve an operand to `(decimal, degree, height)`.
    fn resolve(&self, operand: Operand<'_>) -> (ScaledDecimal, u32, BigUint) {
        match operand {
            Operand::Decimal(other) => (other.decimal.clone(), other.degree, other.height.clone()),
            Operand::Integer(n) => (
                ScaledDecimal::from_integer(n, self.accuracy()),
                1,
                BigUint::from(n.unsigned_abs()),
            ),
        }
    }

    pub fn add<'a>(&self, other: impl Into<Operand<'a>>) -> Self {
        let (decimal, degree, height) = self.resolve(other.into());
        Self::from_parts(
            self.decimal.add(&decimal),
            self.degree.max(degree),
            &self.height + height + BigUint::one(),
        )
    }

    pub fn sub<'a>(&self, other: impl Into<Operand<'a>>) -> Self {
        let (decimal, degree, height) = self.resolve(other.into());
        Self::from_parts(
            self.decimal.sub(&decimal),
            self.degree.max(degree),
            &self.height + height + BigUint::one(),
        )
    }

    pub fn mul<'a>(&self, other: impl Into<Operand<'a>>) -> Self {
        let (decimal, degree, height) = self.resolve(other.into());
        Self::from_parts(
            self.decimal.mul(&decimal),
            self.degree.max(degree),
            &self.height + height,
        )
    }

    pub fn negate(&self) -> Self {
        Self::from_parts(self.decimal.negate(), self.degree, self.height.clone())
    }

    /// Certified sign, as an ordering against zero.
    pub fn sign(&self) -> Result<Ordering, ApproximationError> {
        if !self.good() {
            return Err(ApproximationError::InsufficientAccuracy {
                held: self.accuracy(),
                needed: self.precision_needed,
            });
        }
        Ok(self.decimal.demote(self.precision_needed)?.sign())
    }

    /// Certified comparison: the sign of `self - other`.
    pub fn compare<'a>(&self, other: impl Into<Operand<'a>>) -> Result<Ordering, ApproximationError> {
        self.sub(other).sign()
    }

    pub fn approx_eq<'a>(&self, other: impl Into<Operand<'a>>) -> Result<bool, ApproximationError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }

    pub fn is_zero(&self) -> Result<bool, ApproximationError> {
        Ok(self.sign()? == Ordering::Equal)
    }

    pub fn is_positive(&self) -> Result<bool, ApproximationError> {
        Ok(self.sign()? == Ordering::Greater)
    }

    pub fn is_nonnegative(&self) -> Result<bool, ApproximationError> {
        Ok(self.sign()? != Ordering::Less)
    }
}

/// Parse `text` as an approximation of a number of the given degree and height.
pub fn algebraic_approximation_from_string(
    text: &str,
    degree: u32,
    height: impl Into<BigUint>,
) -> Result<AlgebraicApproximation, ApproximationError> {
    AlgebraicApproximation::from_string(text, degree, height)
}

impl fmt::Display for AlgebraicApproximation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.decimal, f)
    }
}

impl Add for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn add(self, rhs: Self) -> AlgebraicApproximation {
        AlgebraicApproximation::add(self, rhs)
    }
}

impl Add<i64> for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn add(self, rhs: i64) -> AlgebraicApproximation {
        AlgebraicApproximation::add(self, rhs)
    }
}

impl Sub for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn sub(self, rhs: Self) -> AlgebraicApproximation {
        AlgebraicApproximation::sub(self, rhs)
    }
}

impl Sub<i64> for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn sub(self, rhs: i64) -> AlgebraicApproximation {
        AlgebraicApproximation::sub(self, rhs)
    }
}

impl Mul for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn mul(self, rhs: Self) -> AlgebraicApproximation {
        AlgebraicApproximation::mul(self, rhs)
    }
}

impl Mul<i64> for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn mul(self, rhs: i64) -> AlgebraicApproximation {
        AlgebraicApproximation::mul(self, rhs)
    }
}

impl Neg for &AlgebraicApproximation {
    type Output = AlgebraicApproximation;
    fn neg(self) -> AlgebraicApproximation {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecimalError;

    fn approx(text: &str, degree: u32, height: u64) -> AlgebraicApproximation {
        algebraic_approximation_from_string(text, degree, height).unwrap()
    }

    // --- serialization ---

    #[test]
    fn json_writes_height_as_decimal_string() {
        let x = approx("0.618", 2, 1_000_000_000_000);
        let json = serde_json::to_value(&x).unwrap();
        assert_eq!(json["decimal"], "0.618");
        assert_eq!(json["degree"], 2);
        assert_eq!(json["height"], "1000000000000");
        assert!(json.get("precision_needed").is_none());
    }

    // --- precision_needed ---

    #[test]
    fn precision_needed_from_degree_and_height() {
        assert_eq!(precision_needed(2, &BigUint::from(2u32)), 1);
        assert_eq!(precision_needed(10, &BigUint::from(1_000_000u32)), 8);
        assert_eq!(precision_needed(99, &BigUint::from(999u32)), 4);
    }

    #[test]
    fn precision_needed_treats_small_heights_as_one() {
        assert_eq!(precision_needed(1, &BigUint::zero()), 1);
        assert_eq!(precision_needed(1, &BigUint::one()), 1);
    }

    #[test]
    fn construction_computes_precision_needed() {
        let x = approx("3.14159", 12, 12_345);
        assert_eq!(x.precision_needed(), 1 + 4 + 1);
        assert!(!x.good());
        let y = approx("3.141592", 12, 12_345);
        assert!(y.good());
    }

    #[test]
    fn zero_degree_rejected() {
        assert_eq!(
            AlgebraicApproximation::from_string("1.0", 0, 1u32).unwrap_err(),
            ApproximationError::InvalidDegree
        );
    }

    #[test]
    fn malformed_literal_rejected() {
        assert!(matches!(
            AlgebraicApproximation::from_string("1.0.0", 2, 2u32),
            Err(ApproximationError::Decimal(DecimalError::Parse(_)))
        ));
    }

    // --- certified comparisons ---

    #[test]
    fn sqrt_two_approximations_agree() {
        let a = approx("1.4142135623730951", 2, 2);
        let b = approx("1.41421356237", 2, 2);
        assert!(a.approx_eq(&b).unwrap());
        assert!(b.approx_eq(&a).unwrap());
        assert!(a.approx_eq(&a).unwrap());
    }

    #[test]
    fn sqrt_two_squares_to_two() {
        let a = approx("1.4142135623730951", 2, 2);
        let b = approx("1.41421356237", 2, 2);
        assert!((&a * &a).approx_eq(2).unwrap());
        assert!((&b * &b).approx_eq(2).unwrap());
    }

    #[test]
    fn comparison_orders_distinct_values() {
        let a = approx("1.4", 2, 2);
        let b = approx("1.6", 2, 2);
        assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
        assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
        assert_eq!(a.compare(1).unwrap(), Ordering::Greater);
        assert_eq!(a.compare(2).unwrap(), Ordering::Less);
    }

    #[test]
    fn sign_fails_without_enough_places() {
        let x = approx("1.4", 10, 1_000_000);
        assert_eq!(
            x.sign().unwrap_err(),
            ApproximationError::InsufficientAccuracy { held: 1, needed: 8 }
        );
        assert!(x.compare(1).is_err());
    }

    #[test]
    fn sign_reads_only_the_needed_places() {
        // Below 10^-precision_needed the value is indistinguishable from zero.
        let tiny = approx("-0.00001", 2, 2);
        assert_eq!(tiny.sign().unwrap(), Ordering::Equal);
        assert!(tiny.is_nonnegative().unwrap());
        let negative = approx("-0.2", 2, 2);
        assert_eq!(negative.sign().unwrap(), Ordering::Less);
        assert!(!negative.is_positive().unwrap());
    }

    // --- arithmetic bookkeeping ---

    #[test]
    fn heights_add_up() {
        let a = approx("1.000000", 3, 10);
        let b = approx("2.000000", 2, 20);
        assert_eq!((&a + &b).height(), &BigUint::from(31u32));
        assert_eq!((&a - &b).height(), &BigUint::from(31u32));
        assert_eq!((&a * &b).height(), &BigUint::from(30u32));
        assert_eq!((&a * &b).degree(), 3);
        assert_eq!((-&a).height(), &BigUint::from(10u32));
    }

    #[test]
    fn integer_operand_counts_its_magnitude() {
        let a = approx("1.000000", 3, 10);
        assert_eq!((&a + -7i64).height(), &BigUint::from(18u32));
        assert_eq!((&a * 5i64).height(), &BigUint::from(15u32));
    }

    #[test]
    fn integer_operand_lifted_to_held_scale() {
        let a = approx("0.123456", 1, 1);
        let shifted = &a + 1i64;
        assert_eq!(shifted.accuracy(), 5);
        assert_eq!(shifted.to_string(), "1.12345");
    }

    #[test]
    fn arithmetic_keeps_smaller_scale() {
        let a = approx("1.0000000000", 2, 2);
        let b = approx("1.000", 2, 2);
        assert_eq!((&a + &b).accuracy(), 2);
        assert_eq!((&a * &b).accuracy(), 5);
    }

    #[test]
    fn repeated_operations_raise_precision_needed() {
        let a = approx("1.00000000000000000000", 2, 9);
        let mut acc = a.clone();
        for _ in 0..10 {
            acc = &acc + &a;
        }
        assert_eq!(acc.accuracy(), 10);
        assert!(acc.precision_needed() > a.precision_needed());
        assert!(acc.approx_eq(11).unwrap());
    }
}
