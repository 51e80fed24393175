//! # finitedomain
//! A finite domain constraint solver. Problems are declared on a
//! [`Config`](crate::model::Config): variables with integer domains, comparisons, arithmetic,
//! sums and products, distinctness and reified comparisons. The config is compiled into a
//! network of propagators and searched depth-first by the [`Solver`], which reports solutions
//! one at a time.
//!
//! The order of the search is determined by a variable selection strategy
//! ([`VarStratConfig`](crate::options::VarStratConfig)) and a value selection strategy
//! ([`ValueStrategy`](crate::options::ValueStrategy)) which can be overridden per variable. A
//! Markov value strategy samples values according to a (guarded) weight matrix.
//!
//! ```rust
//! # use finitedomain_solver::model::Config;
//! # use finitedomain_solver::results::SolveStatus;
//! # use finitedomain_solver::Solver;
//! let mut config = Config::default();
//! let _ = config.add_var_range("A", 1, 4).unwrap();
//! let _ = config.add_var_range("B", 1, 4).unwrap();
//! config.distinct(["A", "B"]).unwrap();
//! let _ = config.sum(["A", "B"], 5).unwrap();
//!
//! let mut solver = Solver::new(config).unwrap();
//! let outcome = solver.solve(10);
//!
//! assert_eq!(outcome.status, SolveStatus::Exhausted);
//! assert_eq!(outcome.solutions.len(), 4);
//! ```
pub use finitedomain_core::*;
