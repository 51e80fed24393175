//! Strategies which select the variable to branch on.
//!
//! A [`VarStratConfig`] compares two candidates; the unsolved variables of a space are folded from
//! left to right and a candidate only replaces the best variable so far if it is strictly better.
//! When the primary strategy considers two variables equal, the fallback strategy (if any) is
//! consulted.

use std::cmp::Ordering;
use std::str::FromStr;

use log::warn;

use crate::basic_types::ModelError;
use crate::containers::HashMap;
use crate::engine::Space;
use crate::model::Config;
use crate::model::VariableId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VarStrategyKind {
    /// The first unsolved variable.
    #[default]
    Naive,
    /// The variable with the fewest values.
    Size,
    /// The variable with the smallest lower bound.
    Min,
    /// The variable with the largest upper bound.
    Max,
    /// Variables with a Markov value strategy before all others.
    Markov,
    /// Variables in the order of an explicit priority list.
    List,
}

impl FromStr for VarStrategyKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "naive" => Ok(VarStrategyKind::Naive),
            "size" => Ok(VarStrategyKind::Size),
            "min" => Ok(VarStrategyKind::Min),
            "max" => Ok(VarStrategyKind::Max),
            "markov" => Ok(VarStrategyKind::Markov),
            "list" => Ok(VarStrategyKind::List),
            _ => Err(ModelError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// A variable selection strategy together with its fallback chain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VarStratConfig {
    kind: VarStrategyKind,
    /// The names in order of priority, only used by [`VarStrategyKind::List`].
    priority_list: Vec<String>,
    /// Whether a later position in the priority list is preferred.
    inverted: bool,
    fallback: Option<Box<VarStratConfig>>,
    /// The position of every listed variable; filled in when the config is prepared.
    priorities: HashMap<VariableId, usize>,
}

impl VarStratConfig {
    pub fn new(kind: VarStrategyKind) -> VarStratConfig {
        VarStratConfig {
            kind,
            ..Default::default()
        }
    }

    /// A [`VarStrategyKind::List`] strategy which prefers the variables which come first in
    /// `names`; variables which are not listed come after all listed ones.
    pub fn list<Name: Into<String>>(names: impl IntoIterator<Item = Name>) -> VarStratConfig {
        VarStratConfig {
            kind: VarStrategyKind::List,
            priority_list: names.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Prefer the listed variables which come last in the priority list. Listed variables still
    /// come before the unlisted ones.
    pub fn inverted(mut self) -> VarStratConfig {
        self.inverted = true;
        self
    }

    /// Use `fallback` to decide between variables which this strategy considers equal.
    pub fn with_fallback(mut self, fallback: VarStratConfig) -> VarStratConfig {
        self.fallback = Some(Box::new(fallback));
        self
    }

    pub fn kind(&self) -> VarStrategyKind {
        self.kind
    }

    pub fn fallback(&self) -> Option<&VarStratConfig> {
        self.fallback.as_deref()
    }

    /// Resolves the priority lists of the whole chain.
    pub(crate) fn compile(
        &mut self,
        variables: &HashMap<String, VariableId>,
    ) -> Result<(), ModelError> {
        self.priorities.clear();
        if self.kind == VarStrategyKind::List {
            if self.priority_list.is_empty() {
                warn!("The list variable strategy has an empty priority list");
            }
            for (position, name) in self.priority_list.iter().enumerate() {
                let variable = variables
                    .get(name)
                    .copied()
                    .ok_or_else(|| ModelError::UnknownVariable(name.clone()))?;
                let _ = self.priorities.entry(variable).or_insert(position);
            }
        }

        match &mut self.fallback {
            Some(fallback) => fallback.compile(variables),
            None => Ok(()),
        }
    }

    /// Selects the variable to branch on among the unsolved variables of `space`.
    pub(crate) fn select_variable(&self, config: &Config, space: &Space) -> Option<VariableId> {
        let mut unsolved = space.unsolved().iter().copied();
        let first = unsolved.next()?;

        if self.kind == VarStrategyKind::Naive {
            return Some(first);
        }

        Some(unsolved.fold(first, |best, candidate| {
            if self.compare(config, space, candidate, best) == Ordering::Less {
                candidate
            } else {
                best
            }
        }))
    }

    /// [`Ordering::Less`] if `candidate` should be branched on before `best`.
    fn compare(
        &self,
        config: &Config,
        space: &Space,
        candidate: VariableId,
        best: VariableId,
    ) -> Ordering {
        let candidate_domain = space.domain(candidate);
        let best_domain = space.domain(best);

        let ordering = match self.kind {
            VarStrategyKind::Naive => Ordering::Equal,
            VarStrategyKind::Size => candidate_domain.size().cmp(&best_domain.size()),
            VarStrategyKind::Min => candidate_domain.min().cmp(&best_domain.min()),
            VarStrategyKind::Max => best_domain.max().cmp(&candidate_domain.max()),
            VarStrategyKind::Markov => config.is_markov(best).cmp(&config.is_markov(candidate)),
            VarStrategyKind::List => {
                match (self.priorities.get(&candidate), self.priorities.get(&best)) {
                    (Some(candidate_position), Some(best_position)) if self.inverted => {
                        best_position.cmp(candidate_position)
                    }
                    (Some(candidate_position), Some(best_position)) => {
                        candidate_position.cmp(best_position)
                    }
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                }
            }
        };

        ordering.then_with(|| {
            self.fallback.as_ref().map_or(Ordering::Equal, |fallback| {
                fallback.compare(config, space, candidate, best)
            })
        })
    }
}
