//! Error types for the Perron kernel.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecimalError {
    #[error("invalid decimal literal: {0:?}")] Parse(String),
    #[error("insufficient precision: hold {held} places, requested {requested}")] InsufficientPrecision { held: u32, requested: u32 },
    #[error("scale {requested} below minimum of one decimal place")] ScaleBelowMinimum { requested: u32 },
    #[error("division by zero")] DivisionByZero,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApproximationError {
    #[error("insufficient accuracy: hold {held} places, need {needed}")] InsufficientAccuracy { held: u32, needed: u32 },
    #[error("degree must be positive")] InvalidDegree,
    #[error(transparent)] Decimal(#[from] DecimalError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix has no entries")] Empty,
    #[error("ragged matrix: row {row} has {got} columns, expected {expected}")] Ragged { row: usize, expected: usize, got: usize },
    #[error("matrix is not square: {rows}x{cols}")] NotSquare { rows: usize, cols: usize },
    #[error("dimension mismatch: expected {expected}, got {got}")] DimensionMismatch { expected: usize, got: usize },
    #[error("index {index} out of bounds for dimension {dimension}")] IndexOutOfBounds { index: usize, dimension: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EigenError {
    #[error("matrix is not Perron-Frobenius: {0}")] NotPerronFrobenius(String),
    #[error("computation uncertain after {iterations} iterations: {reason}")] ComputationUncertain { reason: String, iterations: u64 },
    #[error(transparent)] Approximation(#[from] ApproximationError),
    #[error(transparent)] Matrix(#[from] MatrixError),
}

impl From<DecimalError> for EigenError {
    fn from(err: DecimalError) -> Self {
        EigenError::Approximation(err.into())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value:?}")] InvalidValue { name: &'static str, value: String },
}

/// Coarse classification of a failure, for callers that only need to pick
/// a message or a recovery policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not enough digits held; refine and retry.
    InsufficientPrecision,
    /// The input matrix is proven not to satisfy the Perron-Frobenius premise.
    AssumptionViolated,
    /// Resources ran out before a decision was reached.
    ComputationUncertain,
    /// Malformed input (parse failures, shape errors, bad configuration).
    InvalidInput,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PerronError {
    #[error(transparent)] Decimal(#[from] DecimalError),
    #[error(transparent)] Approximation(#[from] ApproximationError),
    #[error(transparent)] Matrix(#[from] MatrixError),
    #[error(transparent)] Eigen(#[from] EigenError),
    #[error(transparent)] Config(#[from] ConfigError),
}

impl DecimalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DecimalError::InsufficientPrecision { .. } => ErrorKind::InsufficientPrecision,
            DecimalError::Parse(_)
            | DecimalError::ScaleBelowMinimum { .. }
            | DecimalError::DivisionByZero => ErrorKind::InvalidInput,
        }
    }
}

impl ApproximationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApproximationError::InsufficientAccuracy { .. } => ErrorKind::InsufficientPrecision,
            ApproximationError::InvalidDegree => ErrorKind::InvalidInput,
            ApproximationError::Decimal(e) => e.kind(),
        }
    }
}

impl EigenError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EigenError::NotPerronFrobenius(_) => ErrorKind::AssumptionViolated,
            EigenError::ComputationUncertain { .. } => ErrorKind::ComputationUncertain,
            EigenError::Approximation(e) => e.kind(),
            EigenError::Matrix(_) => ErrorKind::InvalidInput,
        }
    }
}

impl PerronError {
    /// Classify this error into one of the [`ErrorKind`] buckets.
    pub fn kind(&self) -> ErrorKind {
        match self {
            PerronError::Decimal(e) => e.kind(),
            PerronError::Approximation(e) => e.kind(),
            PerronError::Matrix(_) | PerronError::Config(_) => ErrorKind::InvalidInput,
            PerronError::Eigen(e) => e.kind(),
        }
    }
}
