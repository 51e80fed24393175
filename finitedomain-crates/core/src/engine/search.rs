use log::debug;

use super::PropagationEngine;
use super::PropagationOutcome;
use super::SearchHooks;
use super::SearchStatistics;
use super::Space;
use crate::basic_types::Random;
use crate::branching::value_selection::select_value;
use crate::fd_assert_simple;
use crate::model::Config;

/// The result of asking the search for its next solution.
#[derive(Debug)]
pub(crate) enum SearchStatus {
    /// A space in which every targeted variable is fixed; the search can be resumed afterwards.
    Solved(Space),
    /// The search tree has been exhausted.
    End,
    /// A hook requested the search to stop.
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    NotStarted,
    Exploring,
    Finished,
    Aborted,
}

/// A depth-first search over cloned spaces.
///
/// The stack only contains spaces which have been propagated, are consistent and still have
/// unsolved variables. Every call to [`Search::next_solution`] continues where the previous call
/// stopped.
#[derive(Debug, Clone)]
pub(crate) struct Search {
    stack: Vec<Space>,
    state: SearchState,
    engine: PropagationEngine,
    statistics: SearchStatistics,
}

impl Search {
    pub(crate) fn new(config: &Config) -> Search {
        fd_assert_simple!(
            config.is_prepared(),
            "A config has to be prepared before it can be searched"
        );

        Search {
            stack: Vec::new(),
            state: SearchState::NotStarted,
            engine: PropagationEngine::new(config.num_variables()),
            statistics: SearchStatistics::default(),
        }
    }

    pub(crate) fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub(crate) fn next_solution(
        &mut self,
        config: &Config,
        random: &mut dyn Random,
        hooks: &mut SearchHooks,
    ) -> SearchStatus {
        match self.state {
            SearchState::Finished => return SearchStatus::End,
            SearchState::Aborted => return SearchStatus::Aborted,
            SearchState::NotStarted => {
                self.state = SearchState::Exploring;
                if let Some(status) = self.start(config, hooks) {
                    return status;
                }
            }
            SearchState::Exploring => {}
        }

        while let Some(frame) = self.stack.last_mut() {
            let Some(variable) = config.var_strategy().select_variable(config, frame) else {
                let _ = self.stack.pop();
                continue;
            };
            fd_assert_simple!(
                !frame.domain(variable).is_solved(),
                "The selected variable {variable} is already fixed"
            );

            let choice = frame.branch_count;
            frame.branch_count = (choice + 1).min(2);

            let strategy = config.value_strategy_of(variable);
            let Some(domain) = select_value(strategy, variable, frame, choice, random) else {
                let _ = self.stack.pop();
                continue;
            };

            let mut child = frame.create_child(variable, domain);
            self.statistics.num_spaces += 1;
            match self
                .engine
                .propagate(config, &mut child, hooks, &mut self.statistics)
            {
                PropagationOutcome::Rejected => self.statistics.num_rejected += 1,
                PropagationOutcome::Aborted => {
                    self.state = SearchState::Aborted;
                    return SearchStatus::Aborted;
                }
                PropagationOutcome::Stable if child.is_solved() => {
                    self.statistics.num_solutions += 1;
                    debug!("Found solution {}", self.statistics.num_solutions);
                    return SearchStatus::Solved(child);
                }
                PropagationOutcome::Stable => {
                    self.stack.push(child);
                    self.statistics.peak_depth =
                        self.statistics.peak_depth.max(self.stack.len() as u64);
                }
            }
        }

        debug!("Search tree exhausted");
        self.state = SearchState::Finished;
        SearchStatus::End
    }

    /// Propagates the root; returns a status if the search does not need to branch at all.
    fn start(&mut self, config: &Config, hooks: &mut SearchHooks) -> Option<SearchStatus> {
        let mut root = Space::root(config);
        self.statistics.num_spaces += 1;

        match self
            .engine
            .propagate(config, &mut root, hooks, &mut self.statistics)
        {
            PropagationOutcome::Rejected => {
                debug!("The root space is inconsistent");
                self.statistics.num_rejected += 1;
                self.state = SearchState::Finished;
                Some(SearchStatus::End)
            }
            PropagationOutcome::Aborted => {
                self.state = SearchState::Aborted;
                Some(SearchStatus::Aborted)
            }
            PropagationOutcome::Stable if root.is_solved() => {
                self.statistics.num_solutions += 1;
                Some(SearchStatus::Solved(root))
            }
            PropagationOutcome::Stable => {
                self.stack.push(root);
                self.statistics.peak_depth = 1;
                None
            }
        }
    }
}
