//! Nonnegative-image certificate.
//!
//! Properties tested:
//! - A nonnegative matrix certifies its own Perron vector
//! - Conditions that hold strictly or with equality pass
//! - A condition that fails is an assumption violation, decided at the
//!   certificate accuracy rather than reported as uncertainty
//! - Matrices and configuration load from JSON files

use std::io::Write;

use perron_core::config::RefinementConfig;
use perron_core::error::{EigenError, ErrorKind, MatrixError};
use perron_core::matrix::Matrix;
use perron_core::traits::{PerronFrobeniusSolver, RefinableCoordinate};
use perron_eigen::solver::certificate_accuracy;
use perron_tests::helpers::{golden, matrix, solver, uniform};

// ---------------------------------------------------------------------------
// Passing certificates
// ---------------------------------------------------------------------------

#[test]
fn matrix_certifies_its_own_eigenvector() {
    for a in [uniform(3), golden(), matrix(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]])] {
        let pair = solver(4).perron_frobenius_eigen(&a, Some(&a)).unwrap();
        let accuracy = certificate_accuracy(&pair.eigenvector, &a);
        for entry in &pair.eigenvector {
            assert_eq!(entry.current_accuracy(), Some(accuracy));
        }
    }
}

#[test]
fn ordering_condition_holds_for_golden_vector() {
    // x - y >= 0 with x = phi - 1, y = 2 - phi.
    let pair = solver(2)
        .perron_frobenius_eigen(&golden(), Some(&matrix(&[&[1, -1]])))
        .unwrap();
    assert_eq!(pair.eigenvector.len(), 2);
}

#[test]
fn zero_image_coordinate_passes() {
    // Uniform vector: x0 - x1 is exactly zero.
    let condition = matrix(&[&[1, -1, 0], &[0, 1, -1]]);
    assert!(solver(4).perron_frobenius_eigen(&uniform(3), Some(&condition)).is_ok());
}

#[test]
fn certificate_accuracy_grows_with_condition() {
    let entries = solver(4).entries(&uniform(3)).unwrap();
    let small = certificate_accuracy(&entries, &matrix(&[&[1, 1, 1]]));
    let large = certificate_accuracy(&entries, &matrix(&[&[1000, 1, 1]]));
    assert_eq!(large, small + 3);
}

// ---------------------------------------------------------------------------
// Failing certificates
// ---------------------------------------------------------------------------

#[test]
fn reversed_ordering_is_assumption_violated() {
    let err = solver(2)
        .perron_frobenius_eigen(&golden(), Some(&matrix(&[&[-1, 1]])))
        .unwrap_err();
    assert!(matches!(err, EigenError::NotPerronFrobenius(_)));
    assert_eq!(err.kind(), ErrorKind::AssumptionViolated);
}

#[test]
fn close_but_negative_condition_fails() {
    // 2 * 0.381966... - 0.618033... = 0.1458... > 0, but
    // 0.618033... - 2 * 0.381966... < 0.
    let a = golden();
    assert!(solver(2).perron_frobenius_eigen(&a, Some(&matrix(&[&[-1, 2]]))).is_ok());
    let err = solver(2)
        .perron_frobenius_eigen(&a, Some(&matrix(&[&[1, -2]])))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AssumptionViolated);
}

#[test]
fn condition_shape_is_checked() {
    let err = solver(2)
        .perron_frobenius_eigen(&golden(), Some(&uniform(3)))
        .unwrap_err();
    assert_eq!(err, EigenError::Matrix(MatrixError::DimensionMismatch { expected: 2, got: 3 }));
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

// ---------------------------------------------------------------------------
// Loading inputs
// ---------------------------------------------------------------------------

#[test]
fn matrix_loads_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "[[2, 1], [1, 1]]").unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let a: Matrix = serde_json::from_str(&text).unwrap();
    assert_eq!(a, golden());
    assert_eq!(serde_json::to_string(&a).unwrap(), "[[2,1],[1,1]]");
}

#[test]
fn ragged_json_is_rejected() {
    assert!(serde_json::from_str::<Matrix>("[[1, 2], [3]]").is_err());
    assert!(serde_json::from_str::<Matrix>("[]").is_err());
}

#[test]
fn partial_config_json_uses_defaults() {
    let config: RefinementConfig = serde_json::from_str(r#"{"max_iterations": 7}"#).unwrap();
    assert_eq!(config.max_iterations, 7);
    assert_eq!(config.log_height, None);
    assert!(config.verify_primitive);
}
