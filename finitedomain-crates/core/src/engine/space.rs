use crate::basic_types::Solution;
use crate::basic_types::SolutionValue;
use crate::containers::KeyedVec;
use crate::domain::Domain;
use crate::fd_assert_moderate;
use crate::model::Config;
use crate::model::VariableId;

/// A node of the search tree: the domain of every variable together with the bookkeeping of the
/// search driver.
///
/// A child is created by cloning its parent; nothing is shared between the two afterwards.
#[derive(Debug, Clone)]
pub struct Space {
    domains: KeyedVec<VariableId, Domain>,
    /// The targeted variables which are not yet fixed; only ever shrinks.
    unsolved: Vec<VariableId>,
    /// How many children have been requested from this node.
    pub(crate) branch_count: u8,
    /// The variable which was narrowed when this node was created, [`None`] for the root.
    changed_variable: Option<VariableId>,
    /// The value picked by the value selection strategy for the latest child.
    pub(crate) last_chosen_value: Option<i32>,
}

impl Space {
    /// Creates the root of the search tree of `config`.
    pub(crate) fn root(config: &Config) -> Space {
        let domains: KeyedVec<VariableId, Domain> = config
            .variables()
            .map(|variable| config.initial_domain(variable).clone())
            .collect();
        let unsolved = config
            .targeted_variables()
            .iter()
            .copied()
            .filter(|variable| !domains[*variable].is_solved())
            .collect();

        Space {
            domains,
            unsolved,
            branch_count: 0,
            changed_variable: None,
            last_chosen_value: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn from_domains(domains: impl IntoIterator<Item = Domain>) -> Space {
        let domains: KeyedVec<VariableId, Domain> = domains.into_iter().collect();
        let unsolved = domains
            .iter_with_keys()
            .filter(|(_, domain)| !domain.is_solved())
            .map(|(variable, _)| variable)
            .collect();
        Space {
            domains,
            unsolved,
            branch_count: 0,
            changed_variable: None,
            last_chosen_value: None,
        }
    }

    /// Clones the space and replaces the domain of `variable` with `domain`.
    pub(crate) fn create_child(&self, variable: VariableId, domain: Domain) -> Space {
        fd_assert_moderate!(
            domain.values().all(|value| self.domains[variable].contains(value)),
            "A child may only narrow the domain of its parent"
        );

        let mut domains = self.domains.clone();
        domains[variable] = domain;

        Space {
            domains,
            unsolved: self.unsolved.clone(),
            branch_count: 0,
            changed_variable: Some(variable),
            last_chosen_value: None,
        }
    }

    pub fn domain(&self, variable: VariableId) -> &Domain {
        &self.domains[variable]
    }

    pub fn domains(&self) -> impl Iterator<Item = (VariableId, &Domain)> {
        self.domains.iter_with_keys()
    }

    /// The targeted variables which are not fixed yet.
    pub fn unsolved(&self) -> &[VariableId] {
        &self.unsolved
    }

    /// Whether every targeted variable is fixed.
    pub fn is_solved(&self) -> bool {
        self.unsolved.is_empty()
    }

    pub fn changed_variable(&self) -> Option<VariableId> {
        self.changed_variable
    }

    pub(crate) fn domains_mut(&mut self) -> &mut KeyedVec<VariableId, Domain> {
        &mut self.domains
    }

    /// Drops the variables which became fixed from the unsolved list.
    pub(crate) fn update_unsolved(&mut self) {
        let domains = &self.domains;
        self.unsolved.retain(|variable| !domains[*variable].is_solved());
    }

    /// The assignment of every variable of `config`, in declaration order.
    pub fn solution(&self, config: &Config) -> Solution {
        Solution::new(
            self.domains
                .iter_with_keys()
                .map(|(variable, domain)| {
                    (
                        config.variable_name(variable).to_owned(),
                        SolutionValue::from_domain(domain),
                    )
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn children_do_not_share_domains_with_their_parent() {
        let parent = Space::from_domains([Domain::range(0, 3), Domain::range(0, 3)]);
        let variable = VariableId::create_from_index(0);

        let child = parent.create_child(variable, Domain::value(2));

        assert_eq!(parent.domain(variable), &Domain::range(0, 3));
        assert_eq!(child.domain(variable), &Domain::value(2));
        assert_eq!(child.changed_variable(), Some(variable));
        assert_eq!(parent.changed_variable(), None);
    }

    #[test]
    fn unsolved_list_only_shrinks() {
        let parent = Space::from_domains([Domain::range(0, 3), Domain::value(1), Domain::range(4, 5)]);
        let mut child = parent.create_child(VariableId::create_from_index(2), Domain::value(5));

        child.update_unsolved();

        assert_eq!(parent.unsolved().len(), 2);
        assert_eq!(child.unsolved(), &[VariableId::create_from_index(0)]);
        assert!(child.unsolved().iter().all(|variable| parent.unsolved().contains(variable)));
    }

    #[test]
    fn branching_state_is_reset_on_clone() {
        let mut parent = Space::from_domains([Domain::range(0, 3)]);
        parent.branch_count = 1;
        parent.last_chosen_value = Some(0);

        let child = parent.create_child(VariableId::create_from_index(0), Domain::range(1, 3));

        assert_eq!(child.branch_count, 0);
        assert_eq!(child.last_chosen_value, None);
    }
}
