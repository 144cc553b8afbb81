//! Budget enforcement for power iteration.
//!
//! [`BudgetEnforcer`] tracks wall-clock time and iteration count against a
//! [`RefinementBudget`]. The refinement loop calls
//! [`check_iteration`](BudgetEnforcer::check_iteration) at the top of every
//! step; running out is reported as [`EigenError::ComputationUncertain`].

use std::time::Instant;

use perron_core::config::RefinementBudget;
use perron_core::error::EigenError;

/// Enforces iteration and wall-time limits during one refinement call.
///
/// Not `Clone`: each refinement call owns exactly one enforcer.
#[derive(Debug)]
pub struct BudgetEnforcer {
    start_time: Instant,
    budget: RefinementBudget,
    iterations_used: u64,
}

impl BudgetEnforcer {
    /// Start the clock on `budget`.
    pub fn new(budget: RefinementBudget) -> Self {
        Self {
            start_time: Instant::now(),
            budget,
            iterations_used: 0,
        }
    }

    /// Iterations consumed so far.
    pub fn iterations_used(&self) -> u64 {
        self.iterations_used
    }

    /// Account for one more iteration.
    ///
    /// # Errors
    ///
    /// Returns [`EigenError::ComputationUncertain`] if the iteration count or
    /// the wall-clock limit would be exceeded.
    pub fn check_iteration(&mut self) -> Result<(), EigenError> {
        self.iterations_used += 1;

        if self.iterations_used > self.budget.max_iterations {
            return Err(EigenError::ComputationUncertain {
                reason: format!(
                    "iteration limit reached ({} > {})",
                    self.iterations_used, self.budget.max_iterations
                ),
                iterations: self.budget.max_iterations,
            });
        }

        if let Some(max_time) = self.budget.max_time {
            let elapsed = self.start_time.elapsed();
            if elapsed > max_time {
                return Err(EigenError::ComputationUncertain {
                    reason: format!(
                        "wall-clock limit reached ({elapsed:.2?} > {max_time:.2?})"
                    ),
                    iterations: self.iterations_used - 1,
                });
            }
        }

        Ok(())
    }
}
