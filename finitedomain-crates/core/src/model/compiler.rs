//! Lowers the constraints of a [`Config`] to a flat network of propagators.

use itertools::Itertools;

use super::Config;
use super::Constraint;
use super::ConstraintOp;
use super::VariableId;
use crate::branching::value_selection::ValueStrategy;
use crate::containers::KeyedVec;
use crate::domain::Domain;
use crate::propagators::Propagator;
use crate::propagators::PropagatorId;
use crate::propagators::PropagatorKind;
use crate::propagators::Relation;
use crate::propagators::RingOperation;

/// The propagators of a prepared [`Config`] and the reverse index from variables to the
/// propagators which have to run when they change.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorNetwork {
    propagators: KeyedVec<PropagatorId, Propagator>,
    variable_propagators: KeyedVec<VariableId, Vec<PropagatorId>>,
    targeted: Vec<VariableId>,
    /// The number of variables before the compiler introduced its intermediate variables.
    num_declared_variables: usize,
}

impl PropagatorNetwork {
    pub(super) fn new(
        propagators: KeyedVec<PropagatorId, Propagator>,
        variable_propagators: KeyedVec<VariableId, Vec<PropagatorId>>,
        targeted: Vec<VariableId>,
        num_declared_variables: usize,
    ) -> PropagatorNetwork {
        PropagatorNetwork {
            propagators,
            variable_propagators,
            targeted,
            num_declared_variables,
        }
    }

    pub(crate) fn propagators(&self) -> &KeyedVec<PropagatorId, Propagator> {
        &self.propagators
    }

    pub(crate) fn propagator(&self, propagator: PropagatorId) -> &Propagator {
        &self.propagators[propagator]
    }

    /// The propagators which read `variable`.
    pub(crate) fn propagators_of(&self, variable: VariableId) -> &[PropagatorId] {
        &self.variable_propagators[variable]
    }

    pub(crate) fn targeted(&self) -> &[VariableId] {
        &self.targeted
    }

    pub(super) fn num_declared_variables(&self) -> usize {
        self.num_declared_variables
    }
}

impl Config {
    /// Creates the propagators of every constraint followed by one propagator per variable with a
    /// Markov value strategy.
    pub(super) fn generate_propagators(&mut self) -> KeyedVec<PropagatorId, Propagator> {
        let mut propagators = KeyedVec::default();

        for index in 0..self.constraints().len() {
            let constraint = self.constraints()[index].clone();
            self.lower_constraint(&constraint, &mut propagators);
        }

        let markov = self
            .markov_strategies()
            .filter_map(|(variable, strategy)| match strategy {
                ValueStrategy::Markov(options) => Some((variable, options.clone())),
                _ => None,
            })
            .collect::<Vec<_>>();
        for (variable, options) in markov {
            let _ = propagators.push(Propagator::new(PropagatorKind::Markov { variable, options }));
        }

        propagators
    }

    fn lower_constraint(
        &mut self,
        constraint: &Constraint,
        propagators: &mut KeyedVec<PropagatorId, Propagator>,
    ) {
        let operands = constraint.operands();
        let binary = || (operands[0], operands[1]);

        match (constraint.op(), constraint.result()) {
            (ConstraintOp::Eq, _) => add_relation(propagators, Relation::Eq, binary()),
            (ConstraintOp::Neq, _) => add_relation(propagators, Relation::Neq, binary()),
            (ConstraintOp::Lt, _) => add_relation(propagators, Relation::Lt, binary()),
            (ConstraintOp::Lte, _) => add_relation(propagators, Relation::Lte, binary()),
            (ConstraintOp::Gt, _) => add_relation(propagators, Relation::Lt, swap(binary())),
            (ConstraintOp::Gte, _) => add_relation(propagators, Relation::Lte, swap(binary())),
            (ConstraintOp::Distinct, _) => {
                for (a, b) in operands.iter().copied().tuple_combinations() {
                    add_relation(propagators, Relation::Neq, (a, b));
                }
            }

            (ConstraintOp::Plus, Some(result)) => {
                let (a, b) = binary();
                add_ring(propagators, RingOperation::Plus, a, b, result);
            }
            (ConstraintOp::Minus, Some(result)) => {
                let (a, b) = binary();
                add_ring(propagators, RingOperation::Plus, result, b, a);
            }
            (ConstraintOp::Mul, Some(result)) => {
                let (a, b) = binary();
                add_ring(propagators, RingOperation::Mul, a, b, result);
            }
            (ConstraintOp::Div, Some(result)) => {
                let (a, b) = binary();
                add_ring(propagators, RingOperation::Mul, result, b, a);
            }
            (ConstraintOp::Sum, Some(result)) => {
                self.lower_nary(RingOperation::Plus, operands, result, propagators);
            }
            (ConstraintOp::Product, Some(result)) => {
                self.lower_nary(RingOperation::Mul, operands, result, propagators);
            }

            (ConstraintOp::IsEq, Some(result)) => {
                add_reified(propagators, Relation::Eq, binary(), result)
            }
            (ConstraintOp::IsNeq, Some(result)) => {
                add_reified(propagators, Relation::Neq, binary(), result)
            }
            (ConstraintOp::IsLt, Some(result)) => {
                add_reified(propagators, Relation::Lt, binary(), result)
            }
            (ConstraintOp::IsLte, Some(result)) => {
                add_reified(propagators, Relation::Lte, binary(), result)
            }
            (ConstraintOp::IsGt, Some(result)) => {
                add_reified(propagators, Relation::Lt, swap(binary()), result)
            }
            (ConstraintOp::IsGte, Some(result)) => {
                add_reified(propagators, Relation::Lte, swap(binary()), result)
            }

            (op, None) => unreachable!("The '{op}' constraint has no result variable"),
        }
    }

    /// Lowers `operation(operands) = result` to a balanced tree of binary ring operations.
    fn lower_nary(
        &mut self,
        operation: RingOperation,
        operands: &[VariableId],
        result: VariableId,
        propagators: &mut KeyedVec<PropagatorId, Propagator>,
    ) {
        match operands {
            [] => {}
            [single] => add_relation(propagators, Relation::Eq, (*single, result)),
            [a, b] => add_ring(propagators, operation, *a, *b, result),
            _ => {
                let (left, right) = operands.split_at(operands.len() / 2);
                let left = self.nary_operand(operation, left, propagators);
                let right = self.nary_operand(operation, right, propagators);
                add_ring(propagators, operation, left, right, result);
            }
        }
    }

    /// A single operand is used as is, longer lists get an intermediate result.
    fn nary_operand(
        &mut self,
        operation: RingOperation,
        operands: &[VariableId],
        propagators: &mut KeyedVec<PropagatorId, Propagator>,
    ) -> VariableId {
        if let [single] = operands {
            return *single;
        }
        let intermediate = self.push_anonymous(Domain::full());
        self.lower_nary(operation, operands, intermediate, propagators);
        intermediate
    }
}

/// Registers every propagator with the variables it reads, skipping variables whose initial
/// domain is already fixed since those never change.
pub(super) fn index_propagators(
    propagators: &KeyedVec<PropagatorId, Propagator>,
    initial_domains: &KeyedVec<VariableId, Domain>,
) -> KeyedVec<VariableId, Vec<PropagatorId>> {
    let mut variable_propagators = KeyedVec::default();
    variable_propagators.resize(initial_domains.len(), Vec::new());

    for (propagator_id, propagator) in propagators.iter_with_keys() {
        for variable in propagator.variables() {
            if !initial_domains[variable].is_solved() {
                variable_propagators[variable].push(propagator_id);
            }
        }
    }

    variable_propagators
}

fn swap((a, b): (VariableId, VariableId)) -> (VariableId, VariableId) {
    (b, a)
}

fn add_relation(
    propagators: &mut KeyedVec<PropagatorId, Propagator>,
    relation: Relation,
    (a, b): (VariableId, VariableId),
) {
    let _ = propagators.push(Propagator::new(PropagatorKind::Relation { relation, a, b }));
}

fn add_reified(
    propagators: &mut KeyedVec<PropagatorId, Propagator>,
    relation: Relation,
    (a, b): (VariableId, VariableId),
    result: VariableId,
) {
    let _ = propagators.push(Propagator::new(PropagatorKind::Reified {
        relation,
        a,
        b,
        result,
    }));
}

/// `c = a (operation) b` as the forward operation and both rearrangements with the inverse.
fn add_ring(
    propagators: &mut KeyedVec<PropagatorId, Propagator>,
    operation: RingOperation,
    a: VariableId,
    b: VariableId,
    c: VariableId,
) {
    let inverse = operation.inverse();
    for (operation, a, b, c) in [(operation, a, b, c), (inverse, c, b, a), (inverse, c, a, b)] {
        let _ = propagators.push(Propagator::new(PropagatorKind::Ring {
            operation,
            a,
            b,
            c,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultVar;

    fn propagator_names(config: &Config) -> Vec<String> {
        config
            .propagators()
            .map(|propagator| propagator.name().to_owned())
            .collect()
    }

    fn config_with(count: usize) -> (Config, Vec<String>) {
        let mut config = Config::default();
        let names = (0..count).map(|index| format!("V{index}")).collect::<Vec<_>>();
        for name in &names {
            let _ = config.add_var_range(name, 0, 9).unwrap();
        }
        (config, names)
    }

    #[test]
    fn distinct_is_lowered_pairwise() {
        for count in 0..6 {
            let (mut config, names) = config_with(count);
            config.distinct(&names).unwrap();
            config.prepare().unwrap();

            assert_eq!(config.propagators().count(), count * (count.saturating_sub(1)) / 2);
            assert!(propagator_names(&config).iter().all(|name| name == "neq"));
        }
    }

    #[test]
    fn greater_than_swaps_its_operands() {
        let (mut config, names) = config_with(2);
        config.gt(&names[0], &names[1]).unwrap();
        config.prepare().unwrap();

        let propagators = config.propagators().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(propagators, vec!["lt(x1, x0)".to_owned()]);
    }

    #[test]
    fn arithmetic_is_lowered_to_three_ring_propagators() {
        let (mut config, names) = config_with(2);
        let _ = config.plus(&names[0], &names[1], ResultVar::Anonymous).unwrap();
        config.prepare().unwrap();

        assert_eq!(propagator_names(&config), vec!["ring-plus", "ring-minus", "ring-minus"]);
    }

    #[test]
    fn division_is_the_inverse_of_multiplication() {
        let (mut config, names) = config_with(3);
        let _ = config.div(&names[0], &names[1], &names[2]).unwrap();
        config.prepare().unwrap();

        let propagators = config.propagators().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(
            propagators,
            vec![
                "x0 <- ring-mul(x2, x1)".to_owned(),
                "x2 <- ring-div(x0, x1)".to_owned(),
                "x1 <- ring-div(x0, x2)".to_owned(),
            ]
        );
    }

    #[test]
    fn sums_are_lowered_to_a_balanced_tree() {
        for (count, expected_propagators, expected_intermediates) in
            [(1, 1, 0), (2, 3, 0), (3, 6, 1), (4, 9, 2), (5, 12, 3)]
        {
            let (mut config, names) = config_with(count);
            let _ = config.sum(&names, ResultVar::Anonymous).unwrap();
            let num_declared = config.num_variables();
            config.prepare().unwrap();

            assert_eq!(config.propagators().count(), expected_propagators);
            assert_eq!(
                config.num_variables() - num_declared,
                expected_intermediates
            );
        }
    }

    #[test]
    fn reified_greater_than_swaps_its_operands() {
        let (mut config, names) = config_with(2);
        let result = config.is_gte(&names[0], &names[1], ResultVar::Anonymous).unwrap();
        config.prepare().unwrap();

        let propagators = config.propagators().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(propagators, vec![format!("{result} <-> lte(x1, x0)")]);
    }

    #[test]
    fn fixed_variables_are_not_indexed() {
        let (mut config, names) = config_with(1);
        config.lt(&names[0], 5).unwrap();
        config.prepare().unwrap();
        let network = config.network().unwrap();

        let variable = config.variable_id(&names[0]).unwrap();
        let constant = config.constraints()[0].operands()[1];
        assert_eq!(network.propagators_of(variable).len(), 1);
        assert!(network.propagators_of(constant).is_empty());
    }
}
