//! The propagators a [`Config`](crate::model::Config) is compiled into.
//!
//! Every propagator narrows the domains of at most three variables (a Markov propagator also
//! reads the guards of its matrix rows). Propagators are created once by the compiler and are
//! never modified afterwards.

mod markov;
mod reified;
mod relational;
mod ring;

use std::fmt::Display;
use std::fmt::Formatter;

use itertools::Itertools;
pub(crate) use relational::Relation;
pub(crate) use ring::RingOperation;

use crate::basic_types::PropagationStatus;
use crate::branching::value_selection::MarkovOptions;
use crate::containers::StorageKey;
use crate::engine::PropagationContext;
use crate::model::VariableId;

#[derive(Clone, PartialEq, Eq, Copy, Hash, Debug)]
pub struct PropagatorId(pub u32);

impl StorageKey for PropagatorId {
    fn index(&self) -> usize {
        self.0 as usize
    }

    fn create_from_index(index: usize) -> Self {
        PropagatorId(index as u32)
    }
}

impl Display for PropagatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum PropagatorKind {
    /// `relation(a, b)`; the compiler only emits `eq`, `neq`, `lt` and `lte`.
    Relation {
        relation: Relation,
        a: VariableId,
        b: VariableId,
    },
    /// `result <-> relation(a, b)`.
    Reified {
        relation: Relation,
        a: VariableId,
        b: VariableId,
        result: VariableId,
    },
    /// `c ⊆ operation(a, b)`.
    Ring {
        operation: RingOperation,
        a: VariableId,
        b: VariableId,
        c: VariableId,
    },
    Markov {
        variable: VariableId,
        options: MarkovOptions,
    },
}

/// A compiled narrowing operator.
#[derive(Debug, Clone)]
pub struct Propagator {
    kind: PropagatorKind,
}

impl Propagator {
    pub(crate) fn new(kind: PropagatorKind) -> Propagator {
        Propagator { kind }
    }

    pub(crate) fn kind(&self) -> &PropagatorKind {
        &self.kind
    }

    pub fn name(&self) -> &'static str {
        match &self.kind {
            PropagatorKind::Relation { relation, .. } => relation.name(),
            PropagatorKind::Reified { .. } => "reified",
            PropagatorKind::Ring { operation, .. } => operation.name(),
            PropagatorKind::Markov { .. } => "markov",
        }
    }

    /// The variables whose domains are read by the propagator, without duplicates.
    pub fn variables(&self) -> Vec<VariableId> {
        match &self.kind {
            PropagatorKind::Relation { a, b, .. } => vec![*a, *b],
            PropagatorKind::Reified { a, b, result, .. } => vec![*a, *b, *result],
            PropagatorKind::Ring { a, b, c, .. } => vec![*a, *b, *c],
            PropagatorKind::Markov { variable, options } => std::iter::once(*variable)
                .chain(options.matrix().iter().filter_map(|row| row.guard()))
                .collect(),
        }
        .into_iter()
        .unique()
        .collect()
    }

    pub(crate) fn propagate(&self, context: &mut PropagationContext) -> PropagationStatus {
        match &self.kind {
            PropagatorKind::Relation { relation, a, b } => relation.propagate(*a, *b, context),
            PropagatorKind::Reified {
                relation,
                a,
                b,
                result,
            } => reified::propagate_reified(*relation, *a, *b, *result, context),
            PropagatorKind::Ring { operation, a, b, c } => {
                ring::propagate_ring(*operation, *a, *b, *c, context)
            }
            PropagatorKind::Markov { variable, options } => {
                markov::propagate_markov(*variable, options, context)
            }
        }
    }
}

impl Display for Propagator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            PropagatorKind::Relation { relation, a, b } => {
                write!(f, "{}({a}, {b})", relation.name())
            }
            PropagatorKind::Reified {
                relation,
                a,
                b,
                result,
            } => write!(f, "{result} <-> {}({a}, {b})", relation.name()),
            PropagatorKind::Ring { operation, a, b, c } => {
                write!(f, "{c} <- {}({a}, {b})", operation.name())
            }
            PropagatorKind::Markov { variable, .. } => write!(f, "markov({variable})"),
        }
    }
}
