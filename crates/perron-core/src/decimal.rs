//! Exact scaled fixed-point decimals.
//!
//! A [`ScaledDecimal`] is the rational `mantissa * 10^-scale` with an
//! arbitrary-precision mantissa. Representations are not canonical: `1.50`
//! and `1.5` are different values of the type that compare equal.
//!
//! Comparison and sign are exact. Every `+`, `-` and `*` drops one decimal
//! place from its result (see [`ARITHMETIC_TRIM`]); the accuracy budgeting
//! in [`crate::approximation`] accounts for this loss.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::{ARITHMETIC_TRIM, MIN_SCALE};
use crate::error::DecimalError;

/// `10^exp` as a big integer.
pub fn pow10(exp: u32) -> BigInt {
    BigInt::from(10u32).pow(exp)
}

/// The exact rational `mantissa * 10^-scale`.
#[derive(Debug, Clone)]
pub struct ScaledDecimal {
    mantissa: BigInt,
    scale: u32,
}

impl ScaledDecimal {
    /// Construct from raw parts.
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        Self {
            mantissa: mantissa.into(),
            scale,
        }
    }

    /// The integer `value` held exactly at `scale` places.
    pub fn from_integer(value: impl Into<BigInt>, scale: u32) -> Self {
        let value: BigInt = value.into();
        Self {
            mantissa: value * pow10(scale),
            scale,
        }
    }

    /// `numerator / denominator` truncated toward zero at `scale` places.
    pub fn from_ratio(
        numerator: &BigInt,
        denominator: &BigInt,
        scale: u32,
    ) -> Result<Self, DecimalError> {
        if denominator.is_zero() {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(Self {
            mantissa: numerator * pow10(scale) / denominator,
            scale,
        })
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// Drop digits until `scale` places remain, truncating toward zero.
    ///
    /// Callers guarantee `scale <= self.scale`.
    fn truncate_to(&self, scale: u32) -> Self {
        debug_assert!(scale <= self.scale);
        Self {
            mantissa: &self.mantissa / pow10(self.scale - scale),
            scale,
        }
    }

    /// Reduce to `new_scale` places, truncating toward zero.
    ///
    /// Fails if more places are requested than are held, or if `new_scale`
    /// is below [`MIN_SCALE`].
    pub fn demote(&self, new_scale: u32) -> Result<Self, DecimalError> {
        if new_scale > self.scale {
            return Err(DecimalError::InsufficientPrecision {
                held: self.scale,
                requested: new_scale,
            });
        }
        if new_scale < MIN_SCALE {
            return Err(DecimalError::ScaleBelowMinimum {
                requested: new_scale,
            });
        }
        Ok(self.truncate_to(new_scale))
    }

    /// Both operands truncated to the smaller of their two scales.
    fn aligned(&self, other: &Self) -> (BigInt, BigInt, u32) {
        let scale = self.scale.min(other.scale);
        (
            self.truncate_to(scale).mantissa,
            other.truncate_to(scale).mantissa,
            scale,
        )
    }

    /// Apply the post-arithmetic trim, never going below [`MIN_SCALE`].
    fn trimmed(self) -> Self {
        if self.scale >= MIN_SCALE + ARITHMETIC_TRIM {
            let scale = self.scale - ARITHMETIC_TRIM;
            self.truncate_to(scale)
        } else {
            self
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a + b, scale).trimmed()
    }

    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a - b, scale).trimmed()
    }

    pub fn mul(&self, other: &Self) -> Self {
        let (a, b, scale) = self.aligned(other);
        Self::new(a * b, scale * 2).trimmed()
    }

    pub fn negate(&self) -> Self {
        Self::new(-&self.mantissa, self.scale)
    }

    /// Divide by a plain integer, truncating toward zero at the same scale.
    ///
    /// Division by another decimal is not offered: it does not terminate in
    /// general.
    pub fn div_int(&self, divisor: i64) -> Result<Self, DecimalError> {
        if divisor == 0 {
            return Err(DecimalError::DivisionByZero);
        }
        Ok(Self::new(&self.mantissa / BigInt::from(divisor), self.scale))
    }

    /// Sign of the value, as an ordering against zero.
    pub fn sign(&self) -> Ordering {
        if self.mantissa.is_negative() {
            Ordering::Less
        } else if self.mantissa.is_positive() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }

    /// Exact comparison after aligning both operands to the lower scale.
    pub fn compare(&self, other: &Self) -> Ordering {
        let (a, b, _) = self.aligned(other);
        a.cmp(&b)
    }
}

impl PartialEq for ScaledDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl PartialOrd for ScaledDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Add for &ScaledDecimal {
    type Output = ScaledDecimal;
    fn add(self, rhs: Self) -> ScaledDecimal {
        ScaledDecimal::add(self, rhs)
    }
}

impl Sub for &ScaledDecimal {
    type Output = ScaledDecimal;
    fn sub(self, rhs: Self) -> ScaledDecimal {
        ScaledDecimal::sub(self, rhs)
    }
}

impl Mul for &ScaledDecimal {
    type Output = ScaledDecimal;
    fn mul(self, rhs: Self) -> ScaledDecimal {
        ScaledDecimal::mul(self, rhs)
    }
}

impl Neg for &ScaledDecimal {
    type Output = ScaledDecimal;
    fn neg(self) -> ScaledDecimal {
        self.negate()
    }
}

impl Neg for ScaledDecimal {
    type Output = ScaledDecimal;
    fn neg(self) -> ScaledDecimal {
        self.negate()
    }
}

impl FromStr for ScaledDecimal {
    type Err = DecimalError;

    /// Parse `[+-]digits[.digits]`, keeping every fractional digit given.
    ///
    /// A negative zero such as `-0.000` parses to zero; the sign is not kept.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || DecimalError::Parse(text.to_string());
        let trimmed = text.trim();
        let (negative, unsigned) = match trimmed.as_bytes().first() {
            Some(b'-') => (true, &trimmed[1..]),
            Some(b'+') => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };
        let (whole, fraction) = match unsigned.split_once('.') {
            Some((w, f)) if !f.is_empty() => (w, f),
            Some(_) => return Err(invalid()),
            None => (unsigned, ""),
        };
        if whole.is_empty() {
            return Err(invalid());
        }
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }
        let digits = format!("{whole}{fraction}");
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let scale = u32::try_from(fraction.len()).map_err(|_| invalid())?;
        let mantissa = if negative { -magnitude } else { magnitude };
        Ok(Self { mantissa, scale })
    }
}

/// Writes every place held. Zero is always written unsigned.
impl fmt::Display for ScaledDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.mantissa.is_negative() { "-" } else { "" };
        let digits = self.mantissa.abs().to_string();
        let scale = self.scale as usize;
        if scale == 0 {
            return write!(f, "{sign}{digits}");
        }
        // Left-pad so at least one digit sits before the point.
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (whole, fraction) = padded.split_at(padded.len() - scale);
        write!(f, "{sign}{whole}.{fraction}")
    }
}

impl Serialize for ScaledDecimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ScaledDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
