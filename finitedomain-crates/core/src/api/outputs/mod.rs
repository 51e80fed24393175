pub mod solution_iterator;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::Solver;

/// The result of asking for the next solution, see
/// [`SolutionIterator::next_solution`](solution_iterator::SolutionIterator::next_solution).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IteratedSolution {
    /// A new solution was found.
    Solution(Solution),
    /// There are no more solutions.
    Finished,
    /// A hook stopped the search; no further solutions will be reported.
    Aborted,
}

/// Why [`Solver::solve`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every solution has been found.
    Exhausted,
    /// The requested number of solutions has been found; the search may be resumed.
    LimitReached,
    /// A hook stopped the search.
    Aborted,
}

/// The solutions collected by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub solutions: Vec<Solution>,
    pub status: SolveStatus,
}
