//! A harness for running a single propagator step on a handful of domains.

use super::ChangeTracker;
use super::PropagationContext;
use crate::basic_types::PropagationStatus;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::domain::Domain;
use crate::model::VariableId;

pub(crate) struct TestContext<const N: usize> {
    domains: KeyedVec<VariableId, Domain>,
    changes: ChangeTracker,
}

impl<const N: usize> TestContext<N> {
    pub(crate) fn new(domains: [Domain; N]) -> Self {
        TestContext {
            domains: domains.into_iter().collect(),
            changes: ChangeTracker::new(N),
        }
    }

    /// Runs `step` with the variables `x0, ..., x{N-1}`.
    pub(crate) fn run(
        &mut self,
        step: impl FnOnce(&mut PropagationContext, [VariableId; N]) -> PropagationStatus,
    ) -> PropagationStatus {
        let variables = std::array::from_fn(VariableId::create_from_index);
        let mut context = PropagationContext::new(&mut self.domains, &mut self.changes);
        step(&mut context, variables)
    }

    pub(crate) fn domain(&self, index: usize) -> &Domain {
        &self.domains[VariableId::create_from_index(index)]
    }

    /// The indices of the variables which changed, in the order in which they changed.
    pub(crate) fn changed(&self) -> Vec<usize> {
        self.changes
            .changed()
            .iter()
            .map(|variable| variable.index())
            .collect()
    }
}
