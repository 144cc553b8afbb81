//! One lazily refined coordinate of a Perron-Frobenius eigenvector.
//!
//! An [`EigenvectorEntry`] owns the two most recent power-iteration vectors
//! `previous` and `current = M * previous`. Asking for more accuracy steps
//! the iteration until the two agree projectively to the requested number of
//! places, then extracts `current[index] / sum(current)` as an
//! [`AlgebraicApproximation`].
//!
//! Power iteration converges only for primitive matrices. The loop here does
//! not check that; it is bounded by the caller's [`RefinementBudget`] instead.
//!
//! Arithmetic and comparison on entries use the cached approximation as-is
//! and never refine. Refinement is the caller's decision.

use std::cmp::Ordering;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use perron_core::approximation::{precision_needed, AlgebraicApproximation, Operand};
use perron_core::config::RefinementBudget;
use perron_core::decimal::ScaledDecimal;
use perron_core::error::{ApproximationError, EigenError, MatrixError};
use perron_core::matrix::Matrix;
use perron_core::traits::RefinableCoordinate;
use tracing::{debug, trace, warn};

use crate::budget::BudgetEnforcer;
use crate::projective::{projectively_close, total};

/// A single coordinate of the normalized dominant eigenvector of a matrix.
#[derive(Debug, Clone)]
pub struct EigenvectorEntry {
    matrix: Arc<Matrix>,
    index: usize,
    previous: Vec<BigInt>,
    current: Vec<BigInt>,
    current_accuracy: Option<u32>,
    accuracy_needed: u32,
    degree: u32,
    height: BigUint,
    cached: Option<AlgebraicApproximation>,
    iterations: u64,
}

impl EigenvectorEntry {
    /// Coordinate `index` of the eigenvector of `matrix`, seeded with two
    /// consecutive iteration vectors.
    ///
    /// The coordinate is treated as an algebraic number of degree at most
    /// the matrix dimension and height below `10^log_height`.
    pub fn new(
        matrix: Arc<Matrix>,
        index: usize,
        previous: Vec<BigInt>,
        current: Vec<BigInt>,
        log_height: u32,
    ) -> Result<Self, EigenError> {
        let dimension = matrix.dimension()?;
        if index >= dimension {
            return Err(MatrixError::IndexOutOfBounds { index, dimension }.into());
        }
        for len in [previous.len(), current.len()] {
            if len != dimension {
                return Err(MatrixError::DimensionMismatch {
                    expected: dimension,
                    got: len,
                }
                .into());
            }
        }
        let degree = u32::try_from(dimension).map_err(|_| {
            EigenError::NotPerronFrobenius(format!("dimension {dimension} too large"))
        })?;
        let height = BigUint::from(10u32).pow(log_height);
        let accuracy_needed = precision_needed(degree, &height);
        Ok(Self {
            matrix,
            index,
            previous,
            current,
            current_accuracy: None,
            accuracy_needed,
            degree,
            height,
            cached: None,
            iterations: 0,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn degree(&self) -> u32 {
        self.degree
    }

    pub fn height(&self) -> &BigUint {
        &self.height
    }

    /// Power-iteration steps taken by this entry so far.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    /// The cached approximation, if one has been computed.
    pub fn cached(&self) -> Option<&AlgebraicApproximation> {
        self.cached.as_ref()
    }

    /// `previous, current := current, M * current`.
    fn step(&mut self) -> Result<(), EigenError> {
        let next = self.matrix.mul_vector(&self.current)?;
        if total(&next).is_zero() {
            return Err(EigenError::NotPerronFrobenius(
                "power iteration collapsed to the zero vector".to_string(),
            ));
        }
        self.previous = std::mem::replace(&mut self.current, next);
        self.iterations += 1;
        trace!(index = self.index, iterations = self.iterations, "power iteration step");
        Ok(())
    }

    /// Iterate until `previous` and `current` agree to `accuracy` places and
    /// extract the coordinate at that accuracy.
    fn refine(
        &mut self,
        accuracy: u32,
        budget: &RefinementBudget,
    ) -> Result<AlgebraicApproximation, EigenError> {
        let mut enforcer = BudgetEnforcer::new(*budget);
        while !projectively_close(&self.previous, &self.current, accuracy) {
            if let Err(e) = enforcer.check_iteration() {
                warn!(index = self.index, accuracy, "refinement budget exhausted");
                return Err(e);
            }
            self.step()?;
        }
        let accuracy = self.current_accuracy.map_or(accuracy, |held| held.max(accuracy));
        let decimal =
            ScaledDecimal::from_ratio(&self.current[self.index], &total(&self.current), accuracy)?;
        let approximation = AlgebraicApproximation::new(decimal, self.degree, self.height.clone())?;
        self.current_accuracy = Some(accuracy);
        debug!(
            index = self.index,
            accuracy,
            steps = enforcer.iterations_used(),
            value = %approximation,
            "eigenvector entry refined"
        );
        Ok(approximation)
    }

    /// Eigenvalue estimate `sum(current) / sum(previous)` at the accuracy
    /// this entry has reached (or its default accuracy before any refinement).
    pub fn eigenvalue(&self) -> Result<AlgebraicApproximation, EigenError> {
        let accuracy = self.current_accuracy.unwrap_or(self.accuracy_needed);
        let decimal =
            ScaledDecimal::from_ratio(&total(&self.current), &total(&self.previous), accuracy)?;
        Ok(AlgebraicApproximation::new(decimal, self.degree, self.height.clone())?)
    }

    fn held(&self) -> Result<&AlgebraicApproximation, EigenError> {
        self.cached.as_ref().ok_or(EigenError::Approximation(
            ApproximationError::InsufficientAccuracy {
                held: 0,
                needed: self.accuracy_needed,
            },
        ))
    }

    pub fn add<'a>(&self, other: impl Into<EntryOperand<'a>>) -> Result<AlgebraicApproximation, EigenError> {
        Ok(self.held()?.add(other.into().resolve()?))
    }

    pub fn sub<'a>(&self, other: impl Into<EntryOperand<'a>>) -> Result<AlgebraicApproximation, EigenError> {
        Ok(self.held()?.sub(other.into().resolve()?))
    }

    pub fn mul<'a>(&self, other: impl Into<EntryOperand<'a>>) -> Result<AlgebraicApproximation, EigenError> {
        Ok(self.held()?.mul(other.into().resolve()?))
    }

    pub fn sign(&self) -> Result<Ordering, EigenError> {
        Ok(self.held()?.sign()?)
    }

    pub fn compare<'a>(&self, other: impl Into<EntryOperand<'a>>) -> Result<Ordering, EigenError> {
        Ok(self.held()?.compare(other.into().resolve()?)?)
    }

    pub fn approx_eq<'a>(&self, other: impl Into<EntryOperand<'a>>) -> Result<bool, EigenError> {
        Ok(self.compare(other)? == Ordering::Equal)
    }
}

impl RefinableCoordinate for EigenvectorEntry {
    fn current_accuracy(&self) -> Option<u32> {
        self.current_accuracy
    }

    fn accuracy_needed(&self) -> u32 {
        self.accuracy_needed
    }

    fn increase_accuracy(
        &mut self,
        accuracy: u32,
        budget: &RefinementBudget,
    ) -> Result<&AlgebraicApproximation, EigenError> {
        let fresh = self.cached.is_some()
            && self.current_accuracy.is_some_and(|held| held >= accuracy);
        if !fresh {
            let approximation = self.refine(accuracy, budget)?;
            let cached: &AlgebraicApproximation = self.cached.insert(approximation);
            return Ok(cached);
        }
        self.held()
    }
}

/// Right-hand operand of entry arithmetic: another entry or a plain integer.
#[derive(Debug, Clone, Copy)]
pub enum EntryOperand<'a> {
    Entry(&'a EigenvectorEntry),
    Integer(i64),
}

impl<'a> EntryOperand<'a> {
    fn resolve(self) -> Result<Operand<'a>, EigenError> {
        match self {
            EntryOperand::Entry(entry) => Ok(Operand::Decimal(entry.held()?)),
            EntryOperand::Integer(n) => Ok(Operand::Integer(n)),
        }
    }
}

impl<'a> From<&'a EigenvectorEntry> for EntryOperand<'a> {
    fn from(entry: &'a EigenvectorEntry) -> Self {
        EntryOperand::Entry(entry)
    }
}

impl From<i64> for EntryOperand<'_> {
    fn from(value: i64) -> Self {
        EntryOperand::Integer(value)
    }
}

impl From<i32> for EntryOperand<'_> {
    fn from(value: i32) -> Self {
        EntryOperand::Integer(value.into())
    }
}
