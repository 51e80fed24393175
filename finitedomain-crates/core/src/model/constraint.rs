use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;

use super::Config;
use super::VariableId;
use crate::basic_types::ModelError;
use crate::domain::Domain;

/// The operators which can be used to declare a [`Constraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Distinct,
    Plus,
    Minus,
    Mul,
    Div,
    Sum,
    Product,
    IsEq,
    IsNeq,
    IsLt,
    IsLte,
    IsGt,
    IsGte,
}

/// The number of operands an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl ConstraintOp {
    pub fn name(self) -> &'static str {
        match self {
            ConstraintOp::Eq => "eq",
            ConstraintOp::Neq => "neq",
            ConstraintOp::Lt => "lt",
            ConstraintOp::Lte => "lte",
            ConstraintOp::Gt => "gt",
            ConstraintOp::Gte => "gte",
            ConstraintOp::Distinct => "distinct",
            ConstraintOp::Plus => "plus",
            ConstraintOp::Minus => "minus",
            ConstraintOp::Mul => "mul",
            ConstraintOp::Div => "div",
            ConstraintOp::Sum => "sum",
            ConstraintOp::Product => "product",
            ConstraintOp::IsEq => "iseq",
            ConstraintOp::IsNeq => "isneq",
            ConstraintOp::IsLt => "islt",
            ConstraintOp::IsLte => "islte",
            ConstraintOp::IsGt => "isgt",
            ConstraintOp::IsGte => "isgte",
        }
    }

    /// Whether the operator defines a result variable (arithmetic, sums, products and
    /// reifications); comparisons only restrict their operands.
    pub fn produces_value(self) -> bool {
        !matches!(
            self,
            ConstraintOp::Eq
                | ConstraintOp::Neq
                | ConstraintOp::Lt
                | ConstraintOp::Lte
                | ConstraintOp::Gt
                | ConstraintOp::Gte
                | ConstraintOp::Distinct
        )
    }

    /// Whether the result of the operator is a boolean.
    pub fn is_reified(self) -> bool {
        matches!(
            self,
            ConstraintOp::IsEq
                | ConstraintOp::IsNeq
                | ConstraintOp::IsLt
                | ConstraintOp::IsLte
                | ConstraintOp::IsGt
                | ConstraintOp::IsGte
        )
    }

    pub(crate) fn arity(self) -> Arity {
        match self {
            ConstraintOp::Distinct => Arity::AtLeast(0),
            ConstraintOp::Sum | ConstraintOp::Product => Arity::AtLeast(1),
            _ => Arity::Exactly(2),
        }
    }

    pub(crate) fn check_arity(self, num_operands: usize) -> Result<(), ModelError> {
        let (accepted, expected) = match self.arity() {
            Arity::Exactly(count) => (num_operands == count, count.to_string()),
            Arity::AtLeast(count) => (num_operands >= count, format!("at least {count}")),
        };
        if accepted {
            Ok(())
        } else {
            Err(ModelError::InvalidArity {
                operator: self.name().to_owned(),
                expected,
                actual: num_operands,
            })
        }
    }

    /// The initial domain of an anonymous result variable.
    pub(crate) fn result_domain(self) -> Domain {
        if self.is_reified() {
            Domain::range(0, 1)
        } else {
            Domain::full()
        }
    }
}

impl FromStr for ConstraintOp {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let op = match s {
            "eq" | "==" => ConstraintOp::Eq,
            "neq" | "!=" => ConstraintOp::Neq,
            "lt" | "<" => ConstraintOp::Lt,
            "lte" | "<=" => ConstraintOp::Lte,
            "gt" | ">" => ConstraintOp::Gt,
            "gte" | ">=" => ConstraintOp::Gte,
            "distinct" => ConstraintOp::Distinct,
            "plus" => ConstraintOp::Plus,
            "minus" => ConstraintOp::Minus,
            "mul" => ConstraintOp::Mul,
            "div" => ConstraintOp::Div,
            "sum" => ConstraintOp::Sum,
            "product" => ConstraintOp::Product,
            "iseq" => ConstraintOp::IsEq,
            "isneq" => ConstraintOp::IsNeq,
            "islt" => ConstraintOp::IsLt,
            "islte" => ConstraintOp::IsLte,
            "isgt" => ConstraintOp::IsGt,
            "isgte" => ConstraintOp::IsGte,
            _ => return Err(ModelError::UnknownOperator(s.to_owned())),
        };
        Ok(op)
    }
}

impl Display for ConstraintOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An operand of a constraint: a declared variable (by name or by id) or a literal, which is
/// turned into a (shared) constant variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Name(String),
    Variable(VariableId),
    Literal(i64),
}

impl From<VariableId> for Operand {
    fn from(value: VariableId) -> Self {
        Operand::Variable(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Name(value.to_owned())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::Name(value)
    }
}

impl From<&String> for Operand {
    fn from(value: &String) -> Self {
        Operand::Name(value.clone())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Operand::Literal(value as i64)
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Literal(value)
    }
}

/// The result of a value producing constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResultVar {
    /// A fresh anonymous variable is created to hold the result.
    Anonymous,
    /// The result is bound to this operand.
    Operand(Operand),
}

impl From<Operand> for ResultVar {
    fn from(value: Operand) -> Self {
        ResultVar::Operand(value)
    }
}

macro_rules! result_var_from_operand {
    ($($type:ty),+) => {
        $(
            impl From<$type> for ResultVar {
                fn from(value: $type) -> Self {
                    ResultVar::Operand(value.into())
                }
            }
        )+
    };
}

result_var_from_operand!(&str, String, &String, VariableId, i32, i64);

/// A constraint as it was declared, before it is lowered to propagators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub(crate) op: ConstraintOp,
    pub(crate) operands: Vec<VariableId>,
    pub(crate) result: Option<VariableId>,
}

impl Constraint {
    pub fn op(&self) -> ConstraintOp {
        self.op
    }

    pub fn operands(&self) -> &[VariableId] {
        &self.operands
    }

    pub fn result(&self) -> Option<VariableId> {
        self.result
    }

    /// Formats the constraint as `op(a, b) -> r` using the names of the variables in `config`.
    pub fn display<'a>(&'a self, config: &'a Config) -> impl Display + 'a {
        ConstraintDisplay {
            constraint: self,
            config,
        }
    }
}

struct ConstraintDisplay<'a> {
    constraint: &'a Constraint,
    config: &'a Config,
}

impl Display for ConstraintDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.constraint.op)?;
        for (index, operand) in self.constraint.operands.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", self.config.variable_name(*operand))?;
        }
        write!(f, ")")?;
        if let Some(result) = self.constraint.result {
            write!(f, " -> {}", self.config.variable_name(result))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_are_parsed_from_their_names() {
        assert_eq!("iseq".parse::<ConstraintOp>(), Ok(ConstraintOp::IsEq));
        assert_eq!(">=".parse::<ConstraintOp>(), Ok(ConstraintOp::Gte));
        assert_eq!(
            "xor".parse::<ConstraintOp>(),
            Err(ModelError::UnknownOperator("xor".to_owned()))
        );
    }

    #[test]
    fn names_round_trip_through_parsing() {
        for op in [
            ConstraintOp::Distinct,
            ConstraintOp::Product,
            ConstraintOp::IsLte,
            ConstraintOp::Div,
        ] {
            assert_eq!(op.name().parse::<ConstraintOp>(), Ok(op));
        }
    }

    #[test]
    fn arity_of_binary_and_nary_operators() {
        assert!(ConstraintOp::Plus.check_arity(2).is_ok());
        assert_eq!(
            ConstraintOp::Plus.check_arity(3),
            Err(ModelError::InvalidArity {
                operator: "plus".to_owned(),
                expected: "2".to_owned(),
                actual: 3,
            })
        );
        assert!(ConstraintOp::Sum.check_arity(5).is_ok());
        assert!(ConstraintOp::Sum.check_arity(0).is_err());
        assert!(ConstraintOp::Distinct.check_arity(0).is_ok());
    }

    #[test]
    fn only_reifiers_produce_booleans() {
        assert_eq!(ConstraintOp::IsGt.result_domain(), Domain::range(0, 1));
        assert_eq!(ConstraintOp::Mul.result_domain(), Domain::full());
        assert!(!ConstraintOp::Distinct.produces_value());
        assert!(ConstraintOp::Sum.produces_value());
    }
}
