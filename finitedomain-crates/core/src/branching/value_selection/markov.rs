use log::warn;

use crate::basic_types::ModelError;
use crate::basic_types::Random;
use crate::containers::HashMap;
use crate::domain::Domain;
use crate::engine::Space;
use crate::model::VariableId;

/// One row of a Markov transition matrix: a weight per value of the legend, optionally guarded by
/// a boolean variable.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovRow {
    vector: Vec<f64>,
    boolean: Option<String>,
    guard: Option<VariableId>,
}

impl MarkovRow {
    pub fn new(vector: impl Into<Vec<f64>>) -> MarkovRow {
        MarkovRow {
            vector: vector.into(),
            boolean: None,
            guard: None,
        }
    }

    /// The row is only active once the variable `boolean` is fixed to 1.
    pub fn guarded_by(mut self, boolean: impl Into<String>) -> MarkovRow {
        self.boolean = Some(boolean.into());
        self
    }

    pub fn vector(&self) -> &[f64] {
        &self.vector
    }

    pub fn boolean(&self) -> Option<&str> {
        self.boolean.as_deref()
    }

    pub(crate) fn guard(&self) -> Option<VariableId> {
        self.guard
    }
}

/// The options of the Markov value selection strategy.
///
/// The weights of the active row of `matrix` are aligned with `legend`: the `i`-th weight is the
/// weight of the `i`-th value of the legend. When `expand_vectors_with` is set, the values of the
/// domain which are missing from the legend are appended to it and every vector is padded with
/// that weight.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovOptions {
    legend: Vec<i32>,
    matrix: Vec<MarkovRow>,
    expand_vectors_with: Option<f64>,
}

impl MarkovOptions {
    pub fn new(legend: impl Into<Vec<i32>>, matrix: impl Into<Vec<MarkovRow>>) -> MarkovOptions {
        MarkovOptions {
            legend: legend.into(),
            matrix: matrix.into(),
            expand_vectors_with: None,
        }
    }

    pub fn expand_vectors_with(mut self, weight: f64) -> MarkovOptions {
        self.expand_vectors_with = Some(weight);
        self
    }

    pub fn legend(&self) -> &[i32] {
        &self.legend
    }

    pub fn matrix(&self) -> &[MarkovRow] {
        &self.matrix
    }

    /// Validates the options of the variable `variable_name` and resolves the guards of the rows.
    pub(crate) fn compile(
        &mut self,
        variable_name: &str,
        variables: &HashMap<String, VariableId>,
    ) -> Result<(), ModelError> {
        if self.matrix.is_empty() {
            return Err(ModelError::invalid_strategy(
                variable_name,
                "a markov matrix needs at least one row",
            ));
        }
        if let Some(weight) = self.expand_vectors_with {
            if !is_valid_weight(weight) {
                return Err(ModelError::invalid_strategy(
                    variable_name,
                    format!("the expansion weight {weight} is not a finite non-negative number"),
                ));
            }
        }

        for (index, row) in self.matrix.iter_mut().enumerate() {
            if !row.vector.iter().all(|weight| is_valid_weight(*weight)) {
                return Err(ModelError::invalid_strategy(
                    variable_name,
                    format!("row {index} contains a weight which is not a finite non-negative number"),
                ));
            }
            if self.expand_vectors_with.is_none() && row.vector.len() > self.legend.len() {
                return Err(ModelError::invalid_strategy(
                    variable_name,
                    format!(
                        "row {index} has {} weights but the legend only has {} values",
                        row.vector.len(),
                        self.legend.len()
                    ),
                ));
            }
            if row.vector.iter().all(|weight| *weight == 0.0) {
                warn!("Row {index} of the markov matrix of '{variable_name}' has no positive weight");
            }

            row.guard = match &row.boolean {
                Some(name) => Some(
                    variables
                        .get(name)
                        .copied()
                        .ok_or_else(|| ModelError::UnknownVariable(name.clone()))?,
                ),
                None => None,
            };
        }

        Ok(())
    }

    /// The first row whose guard is absent or fixed to 1, or the last row if there is none.
    pub(crate) fn active_row(&self, is_true: impl Fn(VariableId) -> bool) -> Option<&MarkovRow> {
        self.matrix
            .iter()
            .find(|row| row.guard.map_or(true, &is_true))
            .or_else(|| self.matrix.last())
    }

    /// The values which can be weighted for a variable with the given domain.
    pub(crate) fn legend_for(&self, domain: &Domain) -> Vec<i32> {
        let mut legend = self.legend.clone();
        if self.expand_vectors_with.is_some() {
            legend.extend(domain.values().filter(|value| !self.legend.contains(value)));
        }
        legend
    }

    /// The weights of `row` aligned with a legend of `num_values` values.
    pub(crate) fn probability_vector(&self, row: &MarkovRow, num_values: usize) -> Vec<f64> {
        let mut probabilities = row.vector.clone();
        if let Some(weight) = self.expand_vectors_with {
            if probabilities.len() < num_values {
                probabilities.resize(num_values, weight);
            }
        }
        probabilities
    }

    /// The weight of `value` for a variable with the given domain.
    pub(crate) fn weight_of(
        &self,
        value: i32,
        domain: &Domain,
        is_true: impl Fn(VariableId) -> bool,
    ) -> f64 {
        let Some(row) = self.active_row(is_true) else {
            return 0.0;
        };
        let legend = self.legend_for(domain);
        let probabilities = self.probability_vector(row, legend.len());

        legend
            .iter()
            .position(|candidate| *candidate == value)
            .and_then(|index| probabilities.get(index))
            .copied()
            .unwrap_or(0.0)
    }
}

fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// Samples a value of the domain of `variable` on the first choice and removes it on the second.
pub(crate) fn select_markov_value(
    options: &MarkovOptions,
    variable: VariableId,
    space: &mut Space,
    choice: u8,
    random: &mut dyn Random,
) -> Option<Domain> {
    match choice {
        0 => {
            let domain = space.domain(variable);
            let row = options.active_row(|guard| space.domain(guard).is_value(1))?;
            let legend = options.legend_for(domain);
            let probabilities = options.probability_vector(row, legend.len());

            let (candidates, weights): (Vec<i32>, Vec<f64>) = legend
                .iter()
                .zip(probabilities)
                .filter(|(value, weight)| *weight > 0.0 && domain.contains(**value))
                .map(|(value, weight)| (*value, weight))
                .unzip();

            let selected = candidates[random.get_weighted_choice(&weights)?];
            space.last_chosen_value = Some(selected);
            Some(Domain::value(selected))
        }
        1 => {
            let value = space.last_chosen_value?;
            Some(space.domain(variable).remove_value(value))
        }
        _ => None,
    }
}
