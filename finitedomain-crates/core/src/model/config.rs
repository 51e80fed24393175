use itertools::Itertools;
use log::debug;
use log::info;
use log::warn;

use super::check_variable_name;
use super::Constraint;
use super::ConstraintOp;
use super::Operand;
use super::PropagatorNetwork;
use super::ResultVar;
use super::VariableId;
use crate::basic_types::ModelError;
use crate::branching::value_selection::ValueStrategy;
use crate::branching::variable_selection::VarStratConfig;
use crate::containers::HashMap;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::domain::Domain;
use crate::domain::SUB;
use crate::domain::SUP;
use crate::propagators::Propagator;

/// The variables which have to be fixed before a space counts as a solution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Targets {
    /// Every variable, including anonymous and constant ones.
    #[default]
    All,
    /// Only the named variables.
    Names(Vec<String>),
}

/// The definition of a problem: its variables, constraints and search strategies.
///
/// A config is built up through the `add_*` methods and the constraint helpers, and then
/// [prepared](Config::prepare), which lowers the constraints to propagators. Any modification
/// afterwards discards the compiled propagators; the config has to be prepared again before it can
/// be solved.
#[derive(Debug, Clone, Default)]
pub struct Config {
    variable_names: KeyedVec<VariableId, String>,
    name_to_variable: HashMap<String, VariableId>,
    initial_domains: KeyedVec<VariableId, Domain>,
    /// The shared variable of every literal used as an operand.
    constants: HashMap<i32, VariableId>,
    constraints: Vec<Constraint>,
    constraint_keys: HashMap<(ConstraintOp, Vec<VariableId>), usize>,
    targets: Targets,
    var_strategy: VarStratConfig,
    value_strategy: ValueStrategy,
    variable_value_strategies: HashMap<VariableId, ValueStrategy>,
    network: Option<PropagatorNetwork>,
}

impl Config {
    /// Declares a variable with the domain `[lower_bound, upper_bound]`.
    pub fn add_var_range(
        &mut self,
        name: &str,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Result<VariableId, ModelError> {
        let domain = checked_range(lower_bound, upper_bound)?;
        self.add_var_domain(name, domain)
    }

    pub fn add_var_domain(&mut self, name: &str, domain: Domain) -> Result<VariableId, ModelError> {
        check_variable_name(name)?;
        if self.name_to_variable.contains_key(name) {
            return Err(ModelError::DuplicateVariable(name.to_owned()));
        }

        self.invalidate();
        Ok(self.push_variable(name.to_owned(), domain))
    }

    /// Declares a variable with a generated name.
    pub fn add_var_anon(&mut self, domain: Domain) -> VariableId {
        self.invalidate();
        self.push_anonymous(domain)
    }

    pub fn add_var_anon_range(
        &mut self,
        lower_bound: i64,
        upper_bound: i64,
    ) -> Result<VariableId, ModelError> {
        let domain = checked_range(lower_bound, upper_bound)?;
        Ok(self.add_var_anon(domain))
    }

    /// The variable fixed to `value`; every use of the same value shares one variable.
    pub fn add_constant(&mut self, value: i64) -> Result<VariableId, ModelError> {
        let value = checked_value(value)?;
        self.invalidate();
        Ok(self.constant(value))
    }

    /// Declares `op(operands)`, bound to `result` if the operator produces a value.
    ///
    /// Literal operands become constant variables. A constraint which was declared before is not
    /// added again; if it produces a value and a different result is requested, the two results
    /// are constrained to be equal instead. Returns the result variable, or [`None`] for a
    /// comparison.
    pub fn add_constraint(
        &mut self,
        op: ConstraintOp,
        operands: impl IntoIterator<Item = Operand>,
        result: ResultVar,
    ) -> Result<Option<VariableId>, ModelError> {
        let operands = operands.into_iter().collect::<Vec<_>>();
        if op.produces_value() {
            self.add_value_constraint(op, operands, result).map(Some)
        } else if result == ResultVar::Anonymous {
            self.add_comparison(op, operands).map(|_| None)
        } else {
            Err(ModelError::UnexpectedResult(op.name().to_owned()))
        }
    }

    pub fn eq(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Eq, vec![a.into(), b.into()])
    }

    pub fn neq(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Neq, vec![a.into(), b.into()])
    }

    pub fn lt(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Lt, vec![a.into(), b.into()])
    }

    pub fn lte(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Lte, vec![a.into(), b.into()])
    }

    pub fn gt(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Gt, vec![a.into(), b.into()])
    }

    pub fn gte(&mut self, a: impl Into<Operand>, b: impl Into<Operand>) -> Result<(), ModelError> {
        self.add_comparison(ConstraintOp::Gte, vec![a.into(), b.into()])
    }

    /// All operands take pairwise different values.
    pub fn distinct<T: Into<Operand>>(
        &mut self,
        operands: impl IntoIterator<Item = T>,
    ) -> Result<(), ModelError> {
        let operands = operands.into_iter().map(Into::into).collect();
        self.add_comparison(ConstraintOp::Distinct, operands)
    }

    /// `a + b = result`
    pub fn plus(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::Plus, vec![a.into(), b.into()], result.into())
    }

    /// `a - b = result`
    pub fn minus(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::Minus, vec![a.into(), b.into()], result.into())
    }

    /// `a * b = result`
    pub fn mul(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::Mul, vec![a.into(), b.into()], result.into())
    }

    /// `a / b = result`, as the inverse of multiplication.
    pub fn div(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::Div, vec![a.into(), b.into()], result.into())
    }

    pub fn sum<T: Into<Operand>>(
        &mut self,
        operands: impl IntoIterator<Item = T>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        let operands = operands.into_iter().map(Into::into).collect();
        self.add_value_constraint(ConstraintOp::Sum, operands, result.into())
    }

    pub fn product<T: Into<Operand>>(
        &mut self,
        operands: impl IntoIterator<Item = T>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        let operands = operands.into_iter().map(Into::into).collect();
        self.add_value_constraint(ConstraintOp::Product, operands, result.into())
    }

    /// `result <-> a = b`
    pub fn is_eq(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsEq, vec![a.into(), b.into()], result.into())
    }

    pub fn is_neq(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsNeq, vec![a.into(), b.into()], result.into())
    }

    pub fn is_lt(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsLt, vec![a.into(), b.into()], result.into())
    }

    pub fn is_lte(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsLte, vec![a.into(), b.into()], result.into())
    }

    pub fn is_gt(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsGt, vec![a.into(), b.into()], result.into())
    }

    pub fn is_gte(
        &mut self,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
        result: impl Into<ResultVar>,
    ) -> Result<VariableId, ModelError> {
        self.add_value_constraint(ConstraintOp::IsGte, vec![a.into(), b.into()], result.into())
    }

    pub fn set_targeted_vars(&mut self, targets: Targets) {
        self.invalidate();
        self.targets = targets;
    }

    pub fn set_var_strategy(&mut self, strategy: VarStratConfig) {
        self.invalidate();
        self.var_strategy = strategy;
    }

    /// Sets the value strategy of every variable without an override of its own.
    ///
    /// A Markov strategy needs a matrix per variable and can only be set with
    /// [`Config::set_var_value_strategy`].
    pub fn set_value_strategy(&mut self, strategy: ValueStrategy) -> Result<(), ModelError> {
        if matches!(strategy, ValueStrategy::Markov(_)) {
            return Err(ModelError::invalid_strategy(
                "*",
                "a markov value strategy has to be set per variable",
            ));
        }

        self.invalidate();
        self.value_strategy = strategy;
        Ok(())
    }

    pub fn set_var_value_strategy(
        &mut self,
        name: &str,
        strategy: ValueStrategy,
    ) -> Result<(), ModelError> {
        self.invalidate();
        let variable = self.lookup(name)?;
        let _ = self.variable_value_strategies.insert(variable, strategy);
        Ok(())
    }

    /// Validates the strategies and lowers the constraints to propagators.
    ///
    /// Preparing a config which is already prepared does nothing.
    pub fn prepare(&mut self) -> Result<(), ModelError> {
        if self.network.is_some() {
            return Ok(());
        }

        self.var_strategy.compile(&self.name_to_variable)?;
        self.value_strategy.compile("*", &self.name_to_variable)?;
        for (variable, strategy) in self.variable_value_strategies.iter_mut() {
            strategy.compile(&self.variable_names[*variable], &self.name_to_variable)?;
        }

        let targeted = match &self.targets {
            Targets::All => None,
            Targets::Names(names) => {
                if names.is_empty() {
                    warn!("No variables are targeted, the first propagated space is a solution");
                }
                Some(
                    names
                        .iter()
                        .map(|name| self.lookup(name))
                        .collect::<Result<Vec<_>, _>>()?,
                )
            }
        };

        let num_declared_variables = self.variable_names.len();
        let propagators = self.generate_propagators();
        let variable_propagators = super::compiler::index_propagators(
            &propagators,
            &self.initial_domains,
        );
        let targeted = match targeted {
            Some(targeted) => targeted.into_iter().unique().collect(),
            None => self.variables().collect(),
        };

        info!(
            "Prepared {} variables ({} declared), {} constraints and {} propagators",
            self.variable_names.len(),
            num_declared_variables,
            self.constraints.len(),
            propagators.len()
        );
        self.network = Some(PropagatorNetwork::new(
            propagators,
            variable_propagators,
            targeted,
            num_declared_variables,
        ));
        Ok(())
    }

    pub fn is_prepared(&self) -> bool {
        self.network.is_some()
    }

    pub fn num_variables(&self) -> usize {
        self.variable_names.len()
    }

    /// Every variable, in declaration order.
    pub fn variables(&self) -> impl Iterator<Item = VariableId> {
        self.variable_names.keys()
    }

    pub fn variable_id(&self, name: &str) -> Option<VariableId> {
        self.name_to_variable.get(name).copied()
    }

    pub fn variable_name(&self, variable: VariableId) -> &str {
        &self.variable_names[variable]
    }

    pub fn initial_domain(&self, variable: VariableId) -> &Domain {
        &self.initial_domains[variable]
    }

    /// The constraints as they were declared.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    pub fn var_strategy(&self) -> &VarStratConfig {
        &self.var_strategy
    }

    /// The default value strategy.
    pub fn value_strategy(&self) -> &ValueStrategy {
        &self.value_strategy
    }

    pub fn value_strategy_of(&self, variable: VariableId) -> &ValueStrategy {
        self.variable_value_strategies
            .get(&variable)
            .unwrap_or(&self.value_strategy)
    }

    pub fn is_markov(&self, variable: VariableId) -> bool {
        matches!(
            self.variable_value_strategies.get(&variable),
            Some(ValueStrategy::Markov(_))
        )
    }

    /// The compiled propagators; empty if the config is not prepared.
    pub fn propagators(&self) -> impl Iterator<Item = &Propagator> {
        self.network
            .iter()
            .flat_map(|network| network.propagators().iter())
    }

    pub(crate) fn network(&self) -> Option<&PropagatorNetwork> {
        self.network.as_ref()
    }

    /// The variables a solution has to fix; empty if the config is not prepared.
    pub(crate) fn targeted_variables(&self) -> &[VariableId] {
        self.network
            .as_ref()
            .map(PropagatorNetwork::targeted)
            .unwrap_or_default()
    }

    pub(super) fn markov_strategies(&self) -> impl Iterator<Item = (VariableId, &ValueStrategy)> {
        self.variable_value_strategies
            .iter()
            .filter(|(_, strategy)| matches!(strategy, ValueStrategy::Markov(_)))
            .map(|(variable, strategy)| (*variable, strategy))
            .sorted_by_key(|(variable, _)| *variable)
    }

    /// Creates an anonymous variable; used by the compiler for intermediate results.
    pub(super) fn push_anonymous(&mut self, domain: Domain) -> VariableId {
        let index = self.variable_names.len();
        let mut name = format!("__{index}");
        let mut suffix = 0;
        while self.name_to_variable.contains_key(&name) {
            suffix += 1;
            name = format!("__{index}_{suffix}");
        }
        self.push_variable(name, domain)
    }

    fn push_variable(&mut self, name: String, domain: Domain) -> VariableId {
        let variable = self.variable_names.push(name.clone());
        let _ = self.initial_domains.push(domain);
        let _ = self.name_to_variable.insert(name, variable);
        variable
    }

    fn constant(&mut self, value: i32) -> VariableId {
        if let Some(variable) = self.constants.get(&value) {
            return *variable;
        }
        let variable = self.push_anonymous(Domain::value(value));
        let _ = self.constants.insert(value, variable);
        variable
    }

    fn lookup(&self, name: &str) -> Result<VariableId, ModelError> {
        self.variable_id(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_owned()))
    }

    /// Drops the compiled propagators together with the intermediate variables they introduced.
    fn invalidate(&mut self) {
        let Some(network) = self.network.take() else {
            return;
        };
        debug!("Discarding the propagators of the modified config");

        let num_declared = network.num_declared_variables();
        self.variable_names.truncate(num_declared);
        self.initial_domains.truncate(num_declared);
        self.name_to_variable
            .retain(|_, variable| variable.index() < num_declared);
    }

    fn add_comparison(&mut self, op: ConstraintOp, operands: Vec<Operand>) -> Result<(), ModelError> {
        op.check_arity(operands.len())?;
        let operands = self.resolve_operands(&operands)?;
        let key = (op, operands);
        if !self.constraint_keys.contains_key(&key) {
            self.push_constraint(key, None);
        }
        Ok(())
    }

    fn add_value_constraint(
        &mut self,
        op: ConstraintOp,
        operands: Vec<Operand>,
        result: ResultVar,
    ) -> Result<VariableId, ModelError> {
        op.check_arity(operands.len())?;
        let operands = self.resolve_operands(&operands)?;
        let key = (op, operands);

        let existing = self
            .constraint_keys
            .get(&key)
            .and_then(|index| self.constraints[*index].result);
        if let Some(existing) = existing {
            let ResultVar::Operand(result) = result else {
                return Ok(existing);
            };
            let result = self.resolve_result(op, &result)?;
            if result != existing {
                debug!(
                    "Unifying the results of two '{op}' constraints on the same operands: {} and {}",
                    self.variable_name(existing),
                    self.variable_name(result)
                );
                self.add_comparison(
                    ConstraintOp::Eq,
                    vec![Operand::Variable(existing), Operand::Variable(result)],
                )?;
            }
            return Ok(result);
        }

        let result = match result {
            ResultVar::Anonymous => self.push_anonymous(op.result_domain()),
            ResultVar::Operand(operand) => self.resolve_result(op, &operand)?,
        };
        self.push_constraint(key, Some(result));
        Ok(result)
    }

    fn push_constraint(&mut self, key: (ConstraintOp, Vec<VariableId>), result: Option<VariableId>) {
        let constraint = Constraint {
            op: key.0,
            operands: key.1.clone(),
            result,
        };
        let _ = self.constraint_keys.insert(key, self.constraints.len());
        self.constraints.push(constraint);
    }

    fn resolve_operands(&mut self, operands: &[Operand]) -> Result<Vec<VariableId>, ModelError> {
        self.invalidate();
        operands
            .iter()
            .map(|operand| self.resolve_operand(operand))
            .collect()
    }

    fn resolve_operand(&mut self, operand: &Operand) -> Result<VariableId, ModelError> {
        match operand {
            Operand::Name(name) => self.lookup(name),
            Operand::Variable(variable) if variable.index() < self.variable_names.len() => {
                Ok(*variable)
            }
            Operand::Variable(variable) => Err(ModelError::UnknownVariable(variable.to_string())),
            Operand::Literal(value) => Ok(self.constant(checked_value(*value)?)),
        }
    }

    /// Resolves the result of `op`; the result of a reified operator is restricted to `[0, 1]`.
    fn resolve_result(&mut self, op: ConstraintOp, operand: &Operand) -> Result<VariableId, ModelError> {
        if !op.is_reified() {
            return self.resolve_operand(operand);
        }

        if let Operand::Literal(value) = operand {
            if !(0..=1).contains(value) {
                return Err(ModelError::NonBooleanResult(*value));
            }
        }
        let variable = self.resolve_operand(operand)?;
        let domain = &self.initial_domains[variable];
        if let Some(value) = domain.solved_value().filter(|value| *value > 1) {
            return Err(ModelError::NonBooleanResult(value as i64));
        }
        let restricted = domain.intersection(&Domain::range(0, 1));
        if restricted.is_empty() {
            return Err(ModelError::NonBooleanResult(domain.min() as i64));
        }
        self.initial_domains[variable] = restricted;
        Ok(variable)
    }
}

fn checked_value(value: i64) -> Result<i32, ModelError> {
    if value < SUB as i64 || value > SUP as i64 {
        Err(ModelError::OutOfBounds(value))
    } else {
        Ok(value as i32)
    }
}

fn checked_range(lower_bound: i64, upper_bound: i64) -> Result<Domain, ModelError> {
    if lower_bound > upper_bound {
        return Err(ModelError::InvertedRange {
            lower_bound,
            upper_bound,
        });
    }
    Ok(Domain::range(
        checked_value(lower_bound)?,
        checked_value(upper_bound)?,
    ))
}
