//! Certified arithmetic on algebraic approximations.
//!
//! Properties tested:
//! - Squaring a truncated square root of two compares equal to two
//! - Strict comparisons are decided once enough places are held
//! - Comparisons refuse to answer below the required precision
//! - Serialized decimals survive a JSON round trip with their scale

use std::cmp::Ordering;

use perron_core::approximation::{algebraic_approximation_from_string, AlgebraicApproximation};
use perron_core::decimal::ScaledDecimal;
use perron_core::error::{ErrorKind, PerronError};
use perron_tests::helpers::{sqrt2, SQRT_2};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Square root of two
// ---------------------------------------------------------------------------

#[test]
fn sqrt2_squared_equals_two() {
    let root = sqrt2(8);
    assert_eq!(root.precision_needed(), 1);
    let square = &root * &root;
    assert!(square.approx_eq(2i64).unwrap());
    assert_eq!(square.compare(2i64).unwrap(), Ordering::Equal);
}

#[test]
fn sqrt2_literals_of_different_length_agree() {
    let long = algebraic_approximation_from_string("1.4142135623730951", 2, 2u32).unwrap();
    let short = algebraic_approximation_from_string("1.41421356237", 2, 2u32).unwrap();
    assert!(long.approx_eq(&short).unwrap());
    assert!(short.approx_eq(&long).unwrap());
    assert!((&long * &long).approx_eq(2i64).unwrap());
    assert!((&short * &short).approx_eq(2i64).unwrap());
}

#[test]
fn sqrt2_lies_between_one_and_two() {
    let root = sqrt2(10);
    assert_eq!(root.compare(1i64).unwrap(), Ordering::Greater);
    assert_eq!(root.compare(2i64).unwrap(), Ordering::Less);
    assert!(root.is_positive().unwrap());
    assert!((-&root).sign().unwrap() == Ordering::Less);
}

#[test]
fn difference_of_equal_roots_is_zero() {
    let a = sqrt2(20);
    let b = sqrt2(12);
    let difference = &a - &b;
    assert!(difference.is_zero().unwrap());
    assert_eq!(a.compare(&b).unwrap(), Ordering::Equal);
}

#[test]
fn free_constructor_matches_method() {
    let a = algebraic_approximation_from_string(SQRT_2, 2, 2u32).unwrap();
    let b = AlgebraicApproximation::from_string(SQRT_2, 2, 2u32).unwrap();
    assert_eq!(a.to_string(), b.to_string());
    assert_eq!(a.accuracy(), 64);
}

proptest! {
    #[test]
    fn any_truncation_squares_to_two(places in 2usize..=64) {
        let root = sqrt2(places);
        prop_assert!(root.mul(&root).approx_eq(2i64).unwrap());
    }
}

// ---------------------------------------------------------------------------
// Precision refusal
// ---------------------------------------------------------------------------

#[test]
fn tall_height_needs_more_places() {
    // Degree 3, height 10^6: seven places needed, three held.
    let x = AlgebraicApproximation::from_string("0.333", 3, 1_000_000u32).unwrap();
    assert_eq!(x.precision_needed(), 7);
    assert!(!x.good());
    let err = PerronError::from(x.sign().unwrap_err());
    assert_eq!(err.kind(), ErrorKind::InsufficientPrecision);
}

#[test]
fn zero_degree_is_rejected() {
    let err = AlgebraicApproximation::from_string("1.0", 0, 1u32).unwrap_err();
    assert_eq!(PerronError::from(err).kind(), ErrorKind::InvalidInput);
}

#[test]
fn malformed_literal_is_invalid_input() {
    let err = "1.2.3".parse::<ScaledDecimal>().unwrap_err();
    assert_eq!(PerronError::from(err).kind(), ErrorKind::InvalidInput);
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[test]
fn decimal_json_keeps_trailing_zeros() {
    let d: ScaledDecimal = "2.500".parse().unwrap();
    let json = serde_json::to_string(&d).unwrap();
    assert_eq!(json, "\"2.500\"");
    let back: ScaledDecimal = serde_json::from_str(&json).unwrap();
    assert_eq!(back.scale(), 3);
    assert_eq!(back, d);
}
