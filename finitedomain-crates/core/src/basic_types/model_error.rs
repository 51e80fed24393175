use thiserror::Error;

#[cfg(doc)]
use crate::model::Config;

/// Errors related to building a [`Config`]; these indicate a malformed problem definition and are
/// reported eagerly, either when the offending variable or constraint is declared or when the
/// [`Config`] is prepared for solving.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("The variable '{0}' has already been declared")]
    DuplicateVariable(String),
    #[error("A variable name cannot be empty")]
    EmptyName,
    #[error("The variable name '{0}' is numeric, such names are reserved for literals")]
    NumericName(String),
    #[error("The range [{lower_bound}, {upper_bound}] is inverted")]
    InvertedRange { lower_bound: i64, upper_bound: i64 },
    #[error("The value {0} lies outside of the supported range [SUB, SUP]")]
    OutOfBounds(i64),
    #[error("The variable '{0}' has not been declared")]
    UnknownVariable(String),
    #[error("The operator '{0}' is not known")]
    UnknownOperator(String),
    #[error("The distribution strategy '{0}' is not known")]
    UnknownStrategy(String),
    #[error("The operator '{operator}' expects {expected} operands but received {actual}")]
    InvalidArity {
        operator: String,
        expected: String,
        actual: usize,
    },
    #[error("The operator '{0}' does not produce a value and cannot have a result variable")]
    UnexpectedResult(String),
    #[error("The result of a reified constraint has to be boolean, but {0} was given")]
    NonBooleanResult(i64),
    #[error("Invalid strategy configuration for '{variable}': {reason}")]
    InvalidStrategy { variable: String, reason: String },
}

impl ModelError {
    pub(crate) fn invalid_strategy(variable: impl Into<String>, reason: impl Into<String>) -> Self {
        ModelError::InvalidStrategy {
            variable: variable.into(),
            reason: reason.into(),
        }
    }
}
