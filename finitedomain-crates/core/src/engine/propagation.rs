use log::debug;
use log::trace;

use super::SearchHooks;
use super::SearchStatistics;
use super::Space;
use crate::basic_types::Inconsistency;
use crate::basic_types::PropagationStatus;
use crate::containers::EpochSet;
use crate::containers::KeyedVec;
use crate::domain::Domain;
use crate::model::Config;
use crate::model::VariableId;

/// The variables which changed during the current propagation cycle, in the order in which they
/// changed.
#[derive(Debug, Clone)]
pub(crate) struct ChangeTracker {
    recorded: EpochSet<VariableId>,
    changed: Vec<VariableId>,
}

impl ChangeTracker {
    pub(crate) fn new(num_variables: usize) -> ChangeTracker {
        ChangeTracker {
            recorded: EpochSet::new(num_variables),
            changed: Vec::new(),
        }
    }

    fn record(&mut self, variable: VariableId) {
        if self.recorded.insert(variable) {
            self.changed.push(variable);
        }
    }

    /// Returns the variables changed in the cycle which just finished and starts a new cycle.
    fn next_cycle(&mut self) -> Vec<VariableId> {
        self.recorded.next_epoch();
        std::mem::take(&mut self.changed)
    }

    #[cfg(test)]
    pub(crate) fn changed(&self) -> &[VariableId] {
        &self.changed
    }
}

/// The view of a space handed to a propagator.
///
/// Domains are replaced rather than modified; a replacement which differs from the old domain is
/// recorded as a change and an empty replacement is reported as an [`Inconsistency`].
#[derive(Debug)]
pub(crate) struct PropagationContext<'a> {
    domains: &'a mut KeyedVec<VariableId, Domain>,
    changes: &'a mut ChangeTracker,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(
        domains: &'a mut KeyedVec<VariableId, Domain>,
        changes: &'a mut ChangeTracker,
    ) -> PropagationContext<'a> {
        PropagationContext { domains, changes }
    }

    pub(crate) fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[variable]
    }

    pub(crate) fn set_domain(&mut self, variable: VariableId, domain: Domain) -> PropagationStatus {
        if domain.is_empty() {
            self.domains[variable] = domain;
            return Err(Inconsistency { variable });
        }

        if self.domains[variable] != domain {
            self.domains[variable] = domain;
            self.changes.record(variable);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PropagationOutcome {
    /// A fixpoint has been reached.
    Stable,
    /// The domain of a variable became empty.
    Rejected,
    /// One of the hooks requested the search to stop.
    Aborted,
}

/// Runs the propagators of a [`Config`] on a [`Space`] until none of them narrows a domain.
#[derive(Debug, Clone)]
pub(crate) struct PropagationEngine {
    changes: ChangeTracker,
}

impl PropagationEngine {
    pub(crate) fn new(num_variables: usize) -> PropagationEngine {
        PropagationEngine {
            changes: ChangeTracker::new(num_variables),
        }
    }

    pub(crate) fn propagate(
        &mut self,
        config: &Config,
        space: &mut Space,
        hooks: &mut SearchHooks,
        statistics: &mut SearchStatistics,
    ) -> PropagationOutcome {
        if hooks.pre_propagation(space) {
            debug!("Search aborted by the pre-propagation hook");
            return PropagationOutcome::Aborted;
        }

        if let Err(Inconsistency { variable }) = self.fixpoint(config, space, statistics) {
            trace!(
                "Space rejected, the domain of '{}' became empty",
                config.variable_name(variable)
            );
            return PropagationOutcome::Rejected;
        }
        space.update_unsolved();

        if hooks.post_propagation(space) {
            debug!("Search aborted by the post-propagation hook");
            return PropagationOutcome::Aborted;
        }
        PropagationOutcome::Stable
    }

    fn fixpoint(
        &mut self,
        config: &Config,
        space: &mut Space,
        statistics: &mut SearchStatistics,
    ) -> PropagationStatus {
        // Discard whatever an interrupted call left behind
        let _ = self.changes.next_cycle();
        let Some(network) = config.network() else {
            return Ok(());
        };

        // In the first cycle every propagator of the narrowed variable has to run, afterwards a
        // variable attached to a single propagator was necessarily changed by that propagator.
        let mut minimum_attached = 1;
        match space.changed_variable() {
            Some(variable) => self.changes.record(variable),
            None => {
                if let Some((variable, _)) = space.domains().find(|(_, domain)| domain.is_empty()) {
                    return Err(Inconsistency { variable });
                }

                let mut context = PropagationContext::new(space.domains_mut(), &mut self.changes);
                for propagator in network.propagators().iter() {
                    statistics.num_propagations += 1;
                    propagator.propagate(&mut context)?;
                }
                minimum_attached = 2;
            }
        }

        let mut cycle = 0;
        loop {
            let changed = self.changes.next_cycle();
            if changed.is_empty() {
                return Ok(());
            }
            trace!("Propagation cycle {cycle} with {} changed variables", changed.len());

            let mut context = PropagationContext::new(space.domains_mut(), &mut self.changes);
            for variable in changed {
                let attached = network.propagators_of(variable);
                if attached.len() < minimum_attached {
                    continue;
                }
                for propagator_id in attached {
                    statistics.num_propagations += 1;
                    network.propagator(*propagator_id).propagate(&mut context)?;
                }
            }

            minimum_attached = 2;
            cycle += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    fn config_with(names: &[&str], constrain: impl FnOnce(&mut Config)) -> Config {
        let mut config = Config::default();
        for name in names {
            let _ = config.add_var_range(name, 0, 9).unwrap();
        }
        constrain(&mut config);
        config.prepare().unwrap();
        config
    }

    fn propagate(config: &Config, space: &mut Space) -> (PropagationOutcome, SearchStatistics) {
        let mut engine = PropagationEngine::new(config.num_variables());
        let mut statistics = SearchStatistics::default();
        let outcome = engine.propagate(
            config,
            space,
            &mut SearchHooks::default(),
            &mut statistics,
        );
        (outcome, statistics)
    }

    fn domain_of<'a>(config: &Config, space: &'a Space, name: &str) -> &'a Domain {
        space.domain(config.variable_id(name).unwrap())
    }

    #[test]
    fn unchanged_domains_are_not_recorded() {
        let mut domains: KeyedVec<VariableId, Domain> =
            [Domain::range(0, 3), Domain::range(0, 3)].into_iter().collect();
        let mut changes = ChangeTracker::new(2);
        let mut context = PropagationContext::new(&mut domains, &mut changes);
        let first = VariableId::create_from_index(0);
        let second = VariableId::create_from_index(1);

        assert!(context.set_domain(first, Domain::range(0, 3)).is_ok());
        assert!(context.set_domain(second, Domain::range(1, 3)).is_ok());
        assert!(context.set_domain(second, Domain::range(2, 3)).is_ok());

        assert_eq!(changes.changed(), &[second]);
        assert_eq!(domains[second], Domain::range(2, 3));
    }

    #[test]
    fn empty_domains_are_inconsistent() {
        let mut domains: KeyedVec<VariableId, Domain> = [Domain::range(0, 3)].into_iter().collect();
        let mut changes = ChangeTracker::new(1);
        let mut context = PropagationContext::new(&mut domains, &mut changes);
        let variable = VariableId::create_from_index(0);

        assert_eq!(
            context.set_domain(variable, Domain::empty()),
            Err(Inconsistency { variable })
        );
    }

    #[test]
    fn a_new_cycle_forgets_recorded_variables() {
        let mut changes = ChangeTracker::new(2);
        let variable = VariableId::create_from_index(1);
        changes.record(variable);
        changes.record(variable);

        assert_eq!(changes.next_cycle(), vec![variable]);
        changes.record(variable);
        assert_eq!(changes.changed(), &[variable]);
    }

    #[test]
    fn the_root_runs_every_propagator_once() {
        let config = config_with(&["A", "B", "C"], |config| {
            config.neq("A", "B").unwrap();
            config.neq("B", "C").unwrap();
        });
        let mut root = Space::root(&config);

        let (outcome, statistics) = propagate(&config, &mut root);

        assert_eq!(outcome, PropagationOutcome::Stable);
        assert_eq!(statistics.num_propagations, 2);
    }

    #[test]
    fn a_child_only_runs_the_propagators_of_its_changed_variable() {
        let config = config_with(&["A", "B", "C", "D"], |config| {
            config.neq("A", "B").unwrap();
            config.neq("C", "D").unwrap();
        });
        let mut root = Space::root(&config);
        let _ = propagate(&config, &mut root);
        let a = config.variable_id("A").unwrap();
        let mut child = root.create_child(a, Domain::value(5));

        let (outcome, statistics) = propagate(&config, &mut child);

        assert_eq!(outcome, PropagationOutcome::Stable);
        // B was narrowed by its only propagator, which is not run again
        assert_eq!(statistics.num_propagations, 1);
        assert!(!domain_of(&config, &child, "B").contains(5));
        assert_eq!(domain_of(&config, &child, "D"), &Domain::range(0, 9));
    }

    #[test]
    fn variables_with_several_propagators_are_revisited() {
        let config = config_with(&["A", "B", "C"], |config| {
            config.neq("A", "B").unwrap();
            config.neq("B", "C").unwrap();
        });
        let mut root = Space::root(&config);
        let _ = propagate(&config, &mut root);
        let a = config.variable_id("A").unwrap();
        let mut child = root.create_child(a, Domain::value(5));

        let (_, statistics) = propagate(&config, &mut child);

        assert_eq!(statistics.num_propagations, 3);
    }

    #[test]
    fn chains_are_narrowed_to_a_fixpoint_in_one_call() {
        let config = config_with(&["A", "B", "C", "D"], |config| {
            config.lt("A", "B").unwrap();
            config.lt("B", "C").unwrap();
            config.lt("C", "D").unwrap();
        });
        let mut root = Space::root(&config);

        let (outcome, _) = propagate(&config, &mut root);

        assert_eq!(outcome, PropagationOutcome::Stable);
        assert_eq!(domain_of(&config, &root, "A"), &Domain::range(0, 6));
        assert_eq!(domain_of(&config, &root, "B"), &Domain::range(1, 7));
        assert_eq!(domain_of(&config, &root, "C"), &Domain::range(2, 8));
        assert_eq!(domain_of(&config, &root, "D"), &Domain::range(3, 9));
    }

    #[test]
    fn an_emptied_domain_rejects_the_space() {
        let config = config_with(&["A", "B"], |config| {
            config.lt("A", "B").unwrap();
            config.lt("B", "A").unwrap();
        });
        let mut root = Space::root(&config);

        let (outcome, _) = propagate(&config, &mut root);

        assert_eq!(outcome, PropagationOutcome::Rejected);
    }
}
