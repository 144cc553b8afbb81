//! Projective (direction-only) convergence test for power iteration.
//!
//! For vectors `a`, `b` with positive sums `A`, `B`, the directions agree to
//! `scale` places when
//!
//! ```text
//! max_i |a_i * B - b_i * A| * 10^scale < A * B
//! ```
//!
//! i.e. the normalized vectors `a / A` and `b / B` differ by less than
//! `10^-scale` in every coordinate. The test is exact and invariant under
//! rescaling either vector.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use perron_core::decimal::pow10;

/// Sum of a vector's coordinates.
pub fn total(vector: &[BigInt]) -> BigInt {
    vector.iter().sum()
}

/// Whether `a` and `b` agree as directions to `scale` decimal places.
///
/// Vectors of different lengths, or with a nonpositive sum, never agree.
pub fn projectively_close(a: &[BigInt], b: &[BigInt], scale: u32) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let sum_a = total(a);
    let sum_b = total(b);
    if !sum_a.is_positive() || !sum_b.is_positive() {
        return false;
    }
    let deviation = a
        .iter()
        .zip(b)
        .map(|(x, y)| (x * &sum_b - y * &sum_a).abs())
        .max()
        .unwrap_or_else(BigInt::zero);
    deviation * pow10(scale) < sum_a * sum_b
}
