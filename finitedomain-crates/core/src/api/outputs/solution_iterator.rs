//! Contains the structures corresponding to solution iterations.

use super::IteratedSolution;
use crate::Solver;

/// Retrieves the solutions of a [`Solver`] one at a time.
///
/// The search is suspended between two calls; the iterator can be dropped and recreated without
/// losing the position in the search tree.
#[derive(Debug)]
pub struct SolutionIterator<'solver> {
    solver: &'solver mut Solver,
}

impl<'solver> SolutionIterator<'solver> {
    pub(crate) fn new(solver: &'solver mut Solver) -> Self {
        SolutionIterator { solver }
    }

    pub fn next_solution(&mut self) -> IteratedSolution {
        self.solver.next_solution()
    }
}

impl Iterator for SolutionIterator<'_> {
    type Item = crate::basic_types::Solution;

    /// Yields solutions until the search is finished or aborted.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_solution() {
            IteratedSolution::Solution(solution) => Some(solution),
            IteratedSolution::Finished | IteratedSolution::Aborted => None,
        }
    }
}
