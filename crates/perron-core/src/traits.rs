//! Trait interfaces for the Perron kernel.
//!
//! - [`RefinableCoordinate`]: one lazily refined eigenvector coordinate
//!   (perron-eigen implements it).
//! - [`PerronFrobeniusSolver`]: computes the dominant eigenvector of a
//!   nonnegative matrix, optionally certified against a condition matrix.
//!   The power-iteration engine in perron-eigen is the reference backend;
//!   exact or higher-precision backends implement the same contract.

use crate::approximation::AlgebraicApproximation;
use crate::config::RefinementBudget;
use crate::error::EigenError;
use crate::matrix::Matrix;

/// A real number that can be approximated to any requested number of places.
pub trait RefinableCoordinate {
    /// Places the cached approximation currently holds, if any.
    fn current_accuracy(&self) -> Option<u32>;

    /// Places required for this coordinate's own sign test.
    fn accuracy_needed(&self) -> u32;

    /// Refine until `accuracy` places are held, within `budget`.
    ///
    /// Requests at or below the accuracy already reached return the cached
    /// approximation without further work.
    fn increase_accuracy(
        &mut self,
        accuracy: u32,
        budget: &RefinementBudget,
    ) -> Result<&AlgebraicApproximation, EigenError>;

    /// The approximation at [`accuracy_needed`](Self::accuracy_needed), or
    /// better if more has already been computed.
    fn approximation(
        &mut self,
        budget: &RefinementBudget,
    ) -> Result<&AlgebraicApproximation, EigenError> {
        let accuracy = self.current_accuracy().unwrap_or(0).max(self.accuracy_needed());
        self.increase_accuracy(accuracy, budget)
    }
}

/// A dominant eigenvector together with its eigenvalue.
#[derive(Debug, Clone)]
pub struct Eigenpair<C> {
    pub eigenvector: Vec<C>,
    pub eigenvalue: AlgebraicApproximation,
}

/// Computes Perron-Frobenius eigenvectors.
pub trait PerronFrobeniusSolver: Send + Sync {
    type Coordinate: RefinableCoordinate;

    /// Dominant eigenvector and eigenvalue of the square nonnegative `matrix`.
    ///
    /// When `condition` is given, every coordinate is refined far enough to
    /// decide whether `condition * eigenvector` is nonnegative, and a failed
    /// check is reported as [`EigenError::NotPerronFrobenius`].
    fn perron_frobenius_eigen(
        &self,
        matrix: &Matrix,
        condition: Option<&Matrix>,
    ) -> Result<Eigenpair<Self::Coordinate>, EigenError>;
}
