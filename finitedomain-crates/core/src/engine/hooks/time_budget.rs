use std::time::Duration;
use std::time::Instant;

use super::PropagationHook;
use crate::engine::Space;

/// A [`PropagationHook`] which aborts the search once the specified time budget has been
/// exceeded.
#[derive(Clone, Copy, Debug)]
pub struct TimeBudget {
    /// The point in time from which to measure the budget.
    started_at: Instant,
    /// The amount of time before [`TimeBudget::should_abort()`] becomes true.
    budget: Duration,
}

impl TimeBudget {
    /// Give the search a time budget, starting now.
    pub fn starting_now(budget: Duration) -> TimeBudget {
        let started_at = Instant::now();

        TimeBudget { started_at, budget }
    }
}

impl PropagationHook for TimeBudget {
    fn should_abort(&mut self, _space: &Space) -> bool {
        self.started_at.elapsed() >= self.budget
    }
}
