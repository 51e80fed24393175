//! # finitedomain
//! A finite domain constraint solver: problems are declared on a [`Config`](model::Config),
//! whose constraints are compiled into a network of narrowing propagators, and solved by a
//! depth-first search over cloned spaces which is steered by variable and value selection
//! strategies (including a Markov chain based value strategy).
//!
//! # Declaring a problem
//! Variables are created with a name and a domain of non-negative integers between
//! [`SUB`](domain::SUB) and [`SUP`](domain::SUP). Constraints refer to variables by name (or by
//! [`VariableId`](model::VariableId)), and literals are turned into constant variables.
//! ```rust
//! # use finitedomain_core::model::Config;
//! # use finitedomain_core::model::ResultVar;
//! let mut config = Config::default();
//! let _ = config.add_var_range("x", 0, 10).unwrap();
//! let _ = config.add_var_range("y", 0, 10).unwrap();
//!
//! // x + y = 10
//! let _ = config.plus("x", "y", 10).unwrap();
//! // x < y
//! config.lt("x", "y").unwrap();
//! // z <-> (x = 2), with an anonymous boolean z
//! let _ = config.is_eq("x", 2, ResultVar::Anonymous).unwrap();
//! ```
//!
//! # Solving
//! A [`Solver`] prepares the config and produces its solutions lazily.
//! ```rust
//! # use finitedomain_core::model::Config;
//! # use finitedomain_core::options::ValueStrategy;
//! # use finitedomain_core::results::IteratedSolution;
//! # use finitedomain_core::Solver;
//! let mut config = Config::default();
//! let _ = config.add_var_range("x", 1, 99).unwrap();
//! config.set_value_strategy(ValueStrategy::Max).unwrap();
//!
//! let mut solver = Solver::new(config).unwrap();
//! let IteratedSolution::Solution(solution) = solver.next_solution() else {
//!     panic!("There is a solution")
//! };
//! assert_eq!(solution.value("x"), Some(99));
//! ```
pub mod asserts;
pub(crate) mod basic_types;
pub mod containers;
pub mod domain;
pub(crate) mod engine;
pub mod model;
pub(crate) mod propagators;

pub mod branching;
pub mod statistics;

pub use convert_case;
pub use rand;

mod api;

pub use api::*;

pub use crate::api::solver::Solver;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::Random;
pub use crate::basic_types::Solution;
pub use crate::basic_types::SolutionValue;
