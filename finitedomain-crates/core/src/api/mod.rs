mod outputs;
pub(crate) mod solver;

pub mod results {
    //! The outputs of the [`Solver`].
    //!
    //! Solutions are either requested one at a time through a
    //! [`SolutionIterator`](solution_iterator::SolutionIterator), or collected in bulk by
    //! [`Solver::solve`] which returns a [`SolveOutcome`].
    pub use crate::api::outputs::solution_iterator;
    pub use crate::api::outputs::IteratedSolution;
    pub use crate::api::outputs::SolveOutcome;
    pub use crate::api::outputs::SolveStatus;
    pub use crate::basic_types::Solution;
    pub use crate::basic_types::SolutionValue;
    pub use crate::engine::SearchStatistics;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! The options which can be passed to the [`Solver`]: the source of randomness used by the
    //! Markov value strategy and the [hooks](crate::hooks) of the search.
    pub use crate::api::solver::SolverOptions;
    pub use crate::branching::value_selection::MarkovOptions;
    pub use crate::branching::value_selection::MarkovRow;
    pub use crate::branching::value_selection::ValueStrategy;
    pub use crate::branching::variable_selection::VarStratConfig;
    pub use crate::branching::variable_selection::VarStrategyKind;
    pub use crate::model::Targets;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod hooks {
    //! Callbacks which are polled before and after every propagation and which can stop the
    //! search of the [`Solver`].
    //!
    //! The solver has no time limit of its own; [`TimeBudget`] and [`NodeBudget`] provide the
    //! common limits, and any `FnMut(&Space) -> bool` closure can be used as a
    //! [`PropagationHook`] as well.
    pub use crate::engine::hooks::NodeBudget;
    pub use crate::engine::hooks::TimeBudget;
    pub use crate::engine::PropagationHook;
    pub use crate::engine::SearchHooks;
    pub use crate::engine::Space;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod propagation {
    //! The propagators a [`Config`](crate::model::Config) is compiled into, see
    //! [`Config::propagators`](crate::model::Config::propagators).
    pub use crate::propagators::Propagator;
    pub use crate::propagators::PropagatorId;
}
