use log::debug;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::basic_types::ModelError;
use crate::basic_types::Random;
use crate::engine::Search;
use crate::engine::SearchHooks;
use crate::engine::SearchStatistics;
use crate::engine::SearchStatus;
use crate::model::Config;
use crate::results::solution_iterator::SolutionIterator;
use crate::results::IteratedSolution;
use crate::results::SolveOutcome;
use crate::results::SolveStatus;
use crate::statistics::log_statistic_postfix;
use crate::statistics::should_log_statistics;

/// The options of a [`Solver`].
#[derive(Debug)]
pub struct SolverOptions {
    /// The source of randomness of the Markov value strategy.
    pub random_generator: Box<dyn Random>,
    pub hooks: SearchHooks,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            random_generator: Box::new(SmallRng::seed_from_u64(42)),
            hooks: SearchHooks::default(),
        }
    }
}

/// Searches for the solutions of a [`Config`].
///
/// The search is depth-first and lazy: every request for a solution continues where the previous
/// one stopped, so solutions can be retrieved one at a time.
///
/// # Example
/// ```rust
/// # use finitedomain_core::model::Config;
/// # use finitedomain_core::results::SolveStatus;
/// # use finitedomain_core::Solver;
/// let mut config = Config::default();
/// let _ = config.add_var_range("A", 0, 3).unwrap();
/// let _ = config.add_var_range("B", 0, 3).unwrap();
/// config.lt("A", "B").unwrap();
/// config.eq("B", 1).unwrap();
///
/// let mut solver = Solver::new(config).unwrap();
/// let outcome = solver.solve(10);
///
/// assert_eq!(outcome.status, SolveStatus::Exhausted);
/// assert_eq!(outcome.solutions.len(), 1);
/// assert_eq!(outcome.solutions[0].value("A"), Some(0));
/// ```
#[derive(Debug)]
pub struct Solver {
    config: Config,
    search: Search,
    random_generator: Box<dyn Random>,
    hooks: SearchHooks,
}

impl Solver {
    /// Prepares `config` and creates a solver with the default [`SolverOptions`].
    pub fn new(config: Config) -> Result<Solver, ModelError> {
        Solver::with_options(config, SolverOptions::default())
    }

    pub fn with_options(mut config: Config, options: SolverOptions) -> Result<Solver, ModelError> {
        config.prepare()?;
        let search = Search::new(&config);

        Ok(Solver {
            config,
            search,
            random_generator: options.random_generator,
            hooks: options.hooks,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn statistics(&self) -> &SearchStatistics {
        self.search.statistics()
    }

    /// Logs the statistics of the search so far, if statistic logging has been configured (see
    /// [`configure_statistic_logging`](crate::statistics::configure_statistic_logging)).
    pub fn log_statistics(&self) {
        if should_log_statistics() {
            self.statistics().log();
            log_statistic_postfix();
        }
    }

    /// Continues the search until the next solution is found.
    pub fn next_solution(&mut self) -> IteratedSolution {
        match self.search.next_solution(
            &self.config,
            self.random_generator.as_mut(),
            &mut self.hooks,
        ) {
            SearchStatus::Solved(space) => IteratedSolution::Solution(space.solution(&self.config)),
            SearchStatus::End => IteratedSolution::Finished,
            SearchStatus::Aborted => IteratedSolution::Aborted,
        }
    }

    pub fn solution_iterator(&mut self) -> SolutionIterator<'_> {
        SolutionIterator::new(self)
    }

    /// Collects at most `max_solutions` further solutions.
    pub fn solve(&mut self, max_solutions: usize) -> SolveOutcome {
        let mut solutions = Vec::new();

        let status = loop {
            if solutions.len() >= max_solutions {
                break SolveStatus::LimitReached;
            }
            match self.next_solution() {
                IteratedSolution::Solution(solution) => solutions.push(solution),
                IteratedSolution::Finished => break SolveStatus::Exhausted,
                IteratedSolution::Aborted => break SolveStatus::Aborted,
            }
        };

        debug!("Collected {} solutions, {status:?}", solutions.len());
        SolveOutcome { solutions, status }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::SolutionValue;
    use crate::domain::Domain;
    use crate::hooks::NodeBudget;
    use crate::model::Targets;

    fn two_digits() -> Config {
        let mut config = Config::default();
        let _ = config.add_var_range("A", 0, 9).unwrap();
        let _ = config.add_var_range("B", 0, 9).unwrap();
        let _ = config.plus("A", "B", 3).unwrap();
        config
    }

    #[test]
    fn solve_stops_at_the_limit_and_resumes() {
        let mut solver = Solver::new(two_digits()).unwrap();

        let first = solver.solve(2);
        assert_eq!(first.status, SolveStatus::LimitReached);
        assert_eq!(first.solutions.len(), 2);

        let rest = solver.solve(10);
        assert_eq!(rest.status, SolveStatus::Exhausted);
        assert_eq!(rest.solutions.len(), 2);
        assert_eq!(rest.solutions[1].value("A"), Some(3));
    }

    #[test]
    fn solutions_report_every_declared_variable() {
        let mut config = Config::default();
        let _ = config.add_var_range("A", 0, 9).unwrap();
        let _ = config.add_var_range("B", 0, 9).unwrap();
        let _ = config.add_var_range("C", 0, 1).unwrap();
        let _ = config.plus("A", "B", 3).unwrap();
        config.set_targeted_vars(Targets::Names(vec!["A".to_owned()]));
        let mut solver = Solver::new(config).unwrap();

        let IteratedSolution::Solution(solution) = solver.next_solution() else {
            panic!("Expected a solution");
        };

        let names = solution.iter().map(|(name, _)| name).collect::<Vec<_>>();
        assert_eq!(&names[..3], &["A", "B", "C"]);
        assert_eq!(
            solution.get("C"),
            Some(&SolutionValue::Domain(Domain::range(0, 1)))
        );
    }

    #[test]
    fn an_invalid_config_is_reported_when_the_solver_is_created() {
        let mut config = Config::default();
        config.set_targeted_vars(Targets::Names(vec!["A".to_owned()]));

        assert_eq!(
            Solver::new(config).unwrap_err(),
            ModelError::UnknownVariable("A".to_owned())
        );
    }

    #[test]
    fn hooks_abort_the_search() {
        let options = SolverOptions {
            hooks: SearchHooks::default().with_pre_propagation(NodeBudget::new(3)),
            ..Default::default()
        };
        let mut solver = Solver::with_options(two_digits(), options).unwrap();

        let outcome = solver.solve(100);

        assert_eq!(outcome.status, SolveStatus::Aborted);
        assert_eq!(solver.next_solution(), IteratedSolution::Aborted);
    }

    #[test]
    fn the_iterator_ends_when_the_search_is_exhausted() {
        let mut solver = Solver::new(two_digits()).unwrap();

        assert_eq!(solver.solution_iterator().count(), 4);
        assert_eq!(solver.solution_iterator().next_solution(), IteratedSolution::Finished);
        assert_eq!(solver.statistics().num_solutions, 4);
    }
}
