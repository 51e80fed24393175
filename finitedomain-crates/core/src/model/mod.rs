//! The problem definition: variables, constraints and strategies, and their compilation to
//! propagators.
mod compiler;
mod config;
mod constraint;
mod variables;

pub(crate) use compiler::PropagatorNetwork;
pub use config::Config;
pub use config::Targets;
pub use constraint::Constraint;
pub use constraint::ConstraintOp;
pub use constraint::Operand;
pub use constraint::ResultVar;
pub(crate) use variables::check_variable_name;
pub use variables::VariableId;
