//! # perron-eigen: certified Perron-Frobenius eigenvectors.
//!
//! All arithmetic is exact big-integer arithmetic; only the final extraction
//! of a coordinate truncates, and it is tagged with the degree and height
//! that make its sign decidable.
//!
//! - **Lazy entries**: each [`EigenvectorEntry`] refines its own coordinate by
//!   power iteration only when asked for more places.
//! - **Projective convergence**: iteration stops when two consecutive vectors
//!   agree as directions to the requested number of places.
//! - **Budgets**: every refinement call is bounded by iteration count and,
//!   optionally, wall-clock time.
//! - **Certificate**: the driver can prove that a condition matrix maps the
//!   eigenvector into the nonnegative orthant.

pub mod budget;
pub mod entry;
pub mod projective;
pub mod solver;

pub use budget::BudgetEnforcer;
pub use entry::{EigenvectorEntry, EntryOperand};
pub use projective::projectively_close;
pub use solver::{certificate_accuracy, perron_frobenius_eigen, PowerIterationSolver};
