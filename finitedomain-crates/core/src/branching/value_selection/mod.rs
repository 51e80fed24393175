//! Strategies which decide how the domain of the selected variable is split.
//!
//! Every strategy offers at most two alternatives for a space: choice 0 is tried first and
//! choice 1 is the complement of choice 0 (e.g. "`x = min`" followed by "`x != min`"). Any later
//! choice yields [`None`], which tells the search that the space is exhausted. The value picked
//! for choice 0 is cached on the space so that choice 1 can remove exactly that value.

mod bounds;
mod list;
mod markov;
mod split;

use std::str::FromStr;

pub use markov::MarkovOptions;
pub use markov::MarkovRow;

use crate::basic_types::ModelError;
use crate::basic_types::Random;
use crate::containers::HashMap;
use crate::containers::StorageKey;
use crate::domain::Domain;
use crate::engine::Space;
use crate::fd_assert_simple;
use crate::model::VariableId;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ValueStrategy {
    /// Try the smallest value, then the remaining values.
    #[default]
    Min,
    /// Try the largest value, then the remaining values.
    Max,
    /// Try the middle value of the enumerated domain, then the remaining values.
    Mid,
    /// Try the lower half of the range of the domain, then the upper half.
    SplitMin,
    /// Try the upper half of the range of the domain, then the lower half.
    SplitMax,
    /// [`ValueStrategy::Min`] for variables with an even index, [`ValueStrategy::Max`] for the
    /// others.
    MinMaxCycle,
    /// Try the first value of `values` which is in the domain; if there is none, `fallback` is
    /// used instead.
    List {
        values: Vec<i32>,
        fallback: Box<ValueStrategy>,
    },
    /// Sample a value according to the weights of a Markov matrix.
    Markov(MarkovOptions),
}

impl ValueStrategy {
    /// A [`ValueStrategy::List`] which falls back to [`ValueStrategy::Min`].
    pub fn list(values: impl Into<Vec<i32>>) -> ValueStrategy {
        ValueStrategy::List {
            values: values.into(),
            fallback: Box::new(ValueStrategy::Min),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueStrategy::Min => "min",
            ValueStrategy::Max => "max",
            ValueStrategy::Mid => "mid",
            ValueStrategy::SplitMin => "splitMin",
            ValueStrategy::SplitMax => "splitMax",
            ValueStrategy::MinMaxCycle => "minMaxCycle",
            ValueStrategy::List { .. } => "list",
            ValueStrategy::Markov(_) => "markov",
        }
    }

    /// Validates the strategy of `variable_name` and resolves the variables it refers to.
    pub(crate) fn compile(
        &mut self,
        variable_name: &str,
        variables: &HashMap<String, VariableId>,
    ) -> Result<(), ModelError> {
        match self {
            ValueStrategy::List { fallback, .. } => {
                if matches!(fallback.as_ref(), ValueStrategy::Markov(_)) {
                    return Err(ModelError::invalid_strategy(
                        variable_name,
                        "the fallback of a list strategy cannot be markov",
                    ));
                }
                fallback.compile(variable_name, variables)
            }
            ValueStrategy::Markov(options) => options.compile(variable_name, variables),
            _ => Ok(()),
        }
    }
}

impl FromStr for ValueStrategy {
    type Err = ModelError;

    /// Parses the strategies which need no further options.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" | "naive" => Ok(ValueStrategy::Min),
            "max" => Ok(ValueStrategy::Max),
            "mid" => Ok(ValueStrategy::Mid),
            "splitMin" => Ok(ValueStrategy::SplitMin),
            "splitMax" => Ok(ValueStrategy::SplitMax),
            "minMaxCycle" => Ok(ValueStrategy::MinMaxCycle),
            "list" | "markov" => Err(ModelError::invalid_strategy(
                "*",
                format!("the '{s}' value strategy cannot be created without its options"),
            )),
            _ => Err(ModelError::UnknownStrategy(s.to_owned())),
        }
    }
}

/// The domain to try for `variable` as alternative `choice` of `space`, or [`None`] if the
/// alternatives are exhausted.
pub(crate) fn select_value(
    strategy: &ValueStrategy,
    variable: VariableId,
    space: &mut Space,
    choice: u8,
    random: &mut dyn Random,
) -> Option<Domain> {
    fd_assert_simple!(
        choice <= 2,
        "A value strategy offers at most two alternatives"
    );
    let domain = space.domain(variable);
    if domain.is_empty() || domain.is_solved() {
        return None;
    }

    match strategy {
        ValueStrategy::Min => bounds::select_min(variable, space, choice),
        ValueStrategy::Max => bounds::select_max(variable, space, choice),
        ValueStrategy::Mid => bounds::select_mid(variable, space, choice),
        ValueStrategy::SplitMin => split::select_lower_half_first(variable, space, choice),
        ValueStrategy::SplitMax => split::select_upper_half_first(variable, space, choice),
        ValueStrategy::MinMaxCycle if variable.index() % 2 == 0 => {
            bounds::select_min(variable, space, choice)
        }
        ValueStrategy::MinMaxCycle => bounds::select_max(variable, space, choice),
        ValueStrategy::List { values, fallback } => {
            list::select_from_list(values, fallback, variable, space, choice, random)
        }
        ValueStrategy::Markov(options) => {
            markov::select_markov_value(options, variable, space, choice, random)
        }
    }
}
