//! Power-iteration Perron-Frobenius driver implementing [`PerronFrobeniusSolver`].
//!
//! Builds one [`EigenvectorEntry`] per matrix row from a shared seed
//! (the all-ones vector and its image), and, when a condition matrix is
//! supplied, refines every entry far enough that the nonnegative-image
//! certificate is decidable before running it. A failed certificate at that
//! accuracy means the premise is false, not that precision ran short.

use std::sync::Arc;

use num_bigint::BigInt;
use num_traits::One;
use perron_core::config::RefinementConfig;
use perron_core::error::{EigenError, MatrixError};
use perron_core::matrix::Matrix;
use perron_core::constants::CERTIFICATE_SLACK;
use perron_core::traits::{Eigenpair, PerronFrobeniusSolver, RefinableCoordinate};
use tracing::{debug, warn};

use crate::entry::EigenvectorEntry;

/// Reference solver: exact power iteration over big integers.
#[derive(Debug, Clone, Default)]
pub struct PowerIterationSolver {
    config: RefinementConfig,
}

impl PowerIterationSolver {
    /// Create a solver with the given configuration.
    pub fn new(config: RefinementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Reject inputs that are provably not Perron-Frobenius.
    fn validate(&self, matrix: &Matrix) -> Result<usize, EigenError> {
        let n = matrix.dimension()?;
        if !matrix.is_nonnegative() {
            return Err(EigenError::NotPerronFrobenius(
                "matrix has negative entries".to_string(),
            ));
        }
        if self.config.verify_primitive && !matrix.is_primitive() {
            return Err(EigenError::NotPerronFrobenius(
                "matrix is not primitive".to_string(),
            ));
        }
        Ok(n)
    }

    /// One entry per row, all seeded from `1` and `M * 1`.
    pub fn entries(&self, matrix: &Matrix) -> Result<Vec<EigenvectorEntry>, EigenError> {
        let n = self.validate(matrix)?;
        // The derived bound is a heuristic for coordinates; an explicit
        // `log_height` takes precedence.
        let log_height = self
            .config
            .log_height
            .unwrap_or_else(|| matrix.log_height_bound());
        let shared = Arc::new(matrix.clone());
        let initial = vec![BigInt::one(); n];
        let next = shared.mul_vector(&initial)?;
        (0..n)
            .map(|i| {
                EigenvectorEntry::new(
                    Arc::clone(&shared),
                    i,
                    initial.clone(),
                    next.clone(),
                    log_height,
                )
            })
            .collect()
    }
}

/// Accuracy at which `condition * eigenvector` has a decidable sign in every
/// coordinate: the entries' own accuracies summed, plus room for the
/// dimension and the condition matrix's largest coefficient.
pub fn certificate_accuracy(entries: &[EigenvectorEntry], condition: &Matrix) -> u32 {
    let own: u32 = entries.iter().map(|e| e.accuracy_needed()).sum();
    let dimension_digits = (entries.len().max(1)).ilog10();
    let coefficient_digits = condition.max_abs_entry().max(1).ilog10();
    own + dimension_digits + coefficient_digits + CERTIFICATE_SLACK
}

impl PerronFrobeniusSolver for PowerIterationSolver {
    type Coordinate = EigenvectorEntry;

    fn perron_frobenius_eigen(
        &self,
        matrix: &Matrix,
        condition: Option<&Matrix>,
    ) -> Result<Eigenpair<EigenvectorEntry>, EigenError> {
        let mut entries = self.entries(matrix)?;
        let budget = self.config.budget();
        debug!(dimension = entries.len(), certified = condition.is_some(), "solving");

        match condition {
            None => {
                for entry in &mut entries {
                    entry.approximation(&budget)?;
                }
            }
            Some(condition) => {
                if condition.col_count() != entries.len() {
                    return Err(MatrixError::DimensionMismatch {
                        expected: entries.len(),
                        got: condition.col_count(),
                    }
                    .into());
                }
                let accuracy = certificate_accuracy(&entries, condition);
                debug!(accuracy, "refining for nonnegative-image certificate");
                let mut approximations = Vec::with_capacity(entries.len());
                for entry in &mut entries {
                    approximations.push(entry.increase_accuracy(accuracy, &budget)?.clone());
                }
                if !condition.nonnegative_image(&approximations)? {
                    warn!(accuracy, "nonnegative-image certificate failed");
                    return Err(EigenError::NotPerronFrobenius(
                        "eigenvector does not lie in the cone of the condition matrix".to_string(),
                    ));
                }
                debug!("nonnegative-image certificate passed");
            }
        }

        let eigenvalue = match entries.first() {
            Some(entry) => entry.eigenvalue()?,
            None => return Err(MatrixError::Empty.into()),
        };
        Ok(Eigenpair {
            eigenvector: entries,
            eigenvalue,
        })
    }
}

/// Solve with the default configuration.
pub fn perron_frobenius_eigen(
    matrix: &Matrix,
    condition: Option<&Matrix>,
) -> Result<Eigenpair<EigenvectorEntry>, EigenError> {
    PowerIterationSolver::default().perron_frobenius_eigen(matrix, condition)
}
