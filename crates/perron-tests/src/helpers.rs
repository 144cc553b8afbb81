//! Shared test helpers for the integration suites.

use perron_core::approximation::AlgebraicApproximation;
use perron_core::config::RefinementConfig;
use perron_core::matrix::Matrix;
use perron_eigen::solver::PowerIterationSolver;

/// Decimal expansion of the square root of two, 64 places.
pub const SQRT_2: &str = "1.4142135623730950488016887242096980785696718753769480731766797379";

/// Build a matrix from row slices.
pub fn matrix(rows: &[&[i64]]) -> Matrix {
    Matrix::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

/// `J + I`: twos on the diagonal, ones elsewhere. Its Perron vector is
/// uniform with eigenvalue `n + 1`.
pub fn uniform(n: usize) -> Matrix {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 2 } else { 1 }).collect())
        .collect();
    Matrix::new(rows).unwrap()
}

/// `[[2, 1], [1, 1]]`, whose Perron vector is `(phi - 1, 2 - phi)`.
pub fn golden() -> Matrix {
    matrix(&[&[2, 1], &[1, 1]])
}

/// Cyclic permutation matrix: irreducible but never primitive.
pub fn cycle(n: usize) -> Matrix {
    let rows = (0..n)
        .map(|i| (0..n).map(|j| i64::from(j == (i + 1) % n)).collect())
        .collect();
    Matrix::new(rows).unwrap()
}

/// A solver with a fixed height bound and otherwise default settings.
pub fn solver(log_height: u32) -> PowerIterationSolver {
    PowerIterationSolver::new(RefinementConfig {
        log_height: Some(log_height),
        ..RefinementConfig::default()
    })
}

/// The square root of two truncated to `places` decimal places, as a
/// degree-2 algebraic number of height 2.
pub fn sqrt2(places: usize) -> AlgebraicApproximation {
    let text = &SQRT_2[..2 + places];
    AlgebraicApproximation::from_string(text, 2, 2u32).unwrap()
}

/// The repeating decimal `0.333...` with `places` digits.
pub fn third(places: usize) -> String {
    format!("0.{}", "3".repeat(places))
}
