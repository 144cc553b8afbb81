//! # perron-core
//! Foundation types and traits for the Perron kernel.
//!
//! - [`decimal::ScaledDecimal`]: exact fixed-point decimals with truncating
//!   precision reduction.
//! - [`approximation::AlgebraicApproximation`]: decimals tagged with the
//!   degree and height of the algebraic number they approximate, whose sign
//!   and comparisons refuse to answer without enough places.
//! - [`matrix::Matrix`]: integer matrices, exact vector products, the
//!   primitivity test, and the nonnegative-image certificate.

pub mod approximation;
pub mod config;
pub mod constants;
pub mod decimal;
pub mod error;
pub mod matrix;
pub mod traits;

pub use approximation::{algebraic_approximation_from_string, AlgebraicApproximation, Operand};
pub use config::{RefinementBudget, RefinementConfig};
pub use decimal::ScaledDecimal;
pub use error::{ErrorKind, PerronError};
pub use matrix::Matrix;
pub use traits::{Eigenpair, PerronFrobeniusSolver, RefinableCoordinate};
