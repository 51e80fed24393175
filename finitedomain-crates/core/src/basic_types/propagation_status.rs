use crate::model::VariableId;

/// The result of running a propagator (or the propagation engine) on a space.
///
/// An [`Inconsistency`] is not an error of the solver: it signals that the space cannot contain a
/// solution and should be pruned from the search tree.
pub(crate) type PropagationStatus = Result<(), Inconsistency>;

/// Indicates that the domain of `variable` became empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Inconsistency {
    pub(crate) variable: VariableId,
}
