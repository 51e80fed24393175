//! Contains the heuristics which guide the search.
//!
//! The search repeatedly asks a [`variable_selection::VarStratConfig`] which unsolved variable to
//! branch on and then asks the [`value_selection::ValueStrategy`] of that variable how to split
//! its domain.

pub mod value_selection;
pub mod variable_selection;
