use super::PropagationHook;
use crate::engine::Space;

/// A [`PropagationHook`] which aborts the search once more than `budget` spaces have been
/// presented to it.
#[derive(Debug, Copy, Clone)]
pub struct NodeBudget {
    budget: u64,
    num_spaces: u64,
}

impl NodeBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_spaces: 0,
        }
    }
}

impl PropagationHook for NodeBudget {
    fn should_abort(&mut self, _space: &Space) -> bool {
        self.num_spaces += 1;
        self.num_spaces > self.budget
    }
}
