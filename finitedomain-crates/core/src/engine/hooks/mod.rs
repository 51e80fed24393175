//! Hooks which are polled before and after every propagation and which can stop the search.
//!
//! There is no built-in time limit; cancellation is requested by a [`PropagationHook`], for
//! example a [`TimeBudget`] or a [`NodeBudget`].

mod node_budget;
mod time_budget;

use std::fmt::Debug;
use std::fmt::Formatter;

pub use node_budget::NodeBudget;
pub use time_budget::TimeBudget;

use super::Space;

/// A callback which receives the space which is (about to be) propagated; returning `true`
/// aborts the whole search, not only the current branch.
pub trait PropagationHook {
    fn should_abort(&mut self, space: &Space) -> bool;
}

impl<F> PropagationHook for F
where
    F: FnMut(&Space) -> bool,
{
    fn should_abort(&mut self, space: &Space) -> bool {
        self(space)
    }
}

/// The hooks of a search, see [`PropagationHook`].
#[derive(Default)]
pub struct SearchHooks {
    pre_propagation: Option<Box<dyn PropagationHook>>,
    post_propagation: Option<Box<dyn PropagationHook>>,
}

impl Debug for SearchHooks {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchHooks")
            .field(
                "pre_propagation",
                &self.pre_propagation.as_ref().map(|_| "<Hook>"),
            )
            .field(
                "post_propagation",
                &self.post_propagation.as_ref().map(|_| "<Hook>"),
            )
            .finish()
    }
}

impl SearchHooks {
    /// Runs `hook` before a space is propagated.
    pub fn with_pre_propagation(mut self, hook: impl PropagationHook + 'static) -> SearchHooks {
        self.pre_propagation = Some(Box::new(hook));
        self
    }

    /// Runs `hook` after a space has been propagated without becoming inconsistent.
    pub fn with_post_propagation(mut self, hook: impl PropagationHook + 'static) -> SearchHooks {
        self.post_propagation = Some(Box::new(hook));
        self
    }

    pub(crate) fn pre_propagation(&mut self, space: &Space) -> bool {
        self.pre_propagation
            .as_mut()
            .is_some_and(|hook| hook.should_abort(space))
    }

    pub(crate) fn post_propagation(&mut self, space: &Space) -> bool {
        self.post_propagation
            .as_mut()
            .is_some_and(|hook| hook.should_abort(space))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;

    #[test]
    fn closures_are_hooks() {
        let mut calls = 0;
        let mut hooks = SearchHooks::default().with_post_propagation(move |_: &Space| {
            calls += 1;
            calls > 1
        });
        let space = Space::from_domains([Domain::range(0, 1)]);

        assert!(!hooks.pre_propagation(&space));
        assert!(!hooks.post_propagation(&space));
        assert!(hooks.post_propagation(&space));
    }
}
