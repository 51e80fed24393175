use std::fmt::Display;
use std::fmt::Formatter;

use crate::domain::Domain;

/// The value reported for a single variable in a [`Solution`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionValue {
    /// The variable is fixed to this value.
    Value(i32),
    /// The domain of the variable is empty; this is only observable on spaces which were not
    /// propagated successfully.
    Empty,
    /// The variable was not targeted by the search and still has several candidate values.
    Domain(Domain),
}

impl SolutionValue {
    pub(crate) fn from_domain(domain: &Domain) -> SolutionValue {
        if domain.is_empty() {
            SolutionValue::Empty
        } else if let Some(value) = domain.solved_value() {
            SolutionValue::Value(value)
        } else {
            SolutionValue::Domain(domain.clone())
        }
    }

    pub fn as_value(&self) -> Option<i32> {
        match self {
            SolutionValue::Value(value) => Some(*value),
            SolutionValue::Empty | SolutionValue::Domain(_) => None,
        }
    }
}

impl Display for SolutionValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolutionValue::Value(value) => write!(f, "{value}"),
            SolutionValue::Empty => write!(f, "false"),
            SolutionValue::Domain(domain) => write!(f, "{domain}"),
        }
    }
}

/// An assignment found by the search, mapping every declared variable (in declaration order) to
/// its [`SolutionValue`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Solution {
    entries: Vec<(String, SolutionValue)>,
}

impl Solution {
    pub(crate) fn new(entries: Vec<(String, SolutionValue)>) -> Self {
        Solution { entries }
    }

    pub fn get(&self, name: &str) -> Option<&SolutionValue> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, value)| value)
    }

    /// The value of a solved variable; [`None`] if the variable does not exist or is unsolved.
    pub fn value(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(SolutionValue::as_value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SolutionValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, (name, value)) in self.entries.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}
