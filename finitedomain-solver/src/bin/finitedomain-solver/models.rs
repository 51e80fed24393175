use clap::ValueEnum;
use finitedomain_solver::model::Config;
use finitedomain_solver::model::ResultVar;
use finitedomain_solver::model::Targets;
use finitedomain_solver::model::VariableId;
use finitedomain_solver::options::MarkovOptions;
use finitedomain_solver::options::MarkovRow;
use finitedomain_solver::options::ValueStrategy;
use finitedomain_solver::ModelError;

/// The built-in models which can be solved from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModelKind {
    /// Place `size` queens on a `size` x `size` board without attacks.
    Queens,
    /// SEND + MORE = MONEY with distinct digits.
    SendMoreMoney,
    /// A `size` x `size` square of distinct numbers whose rows, columns and diagonals have the
    /// same sum.
    MagicSquare,
    /// A `size` x `size` grid of booleans with exactly one 1 per row and column; the cells are
    /// distributed with a Markov strategy.
    Grid,
}

/// A config together with the variables which make up its output.
#[derive(Debug)]
pub(crate) struct Model {
    pub(crate) config: Config,
    pub(crate) output: Vec<String>,
}

impl ModelKind {
    pub(crate) fn build(self, size: u32) -> Result<Model, ModelError> {
        match self {
            ModelKind::Queens => queens(size),
            ModelKind::SendMoreMoney => send_more_money(),
            ModelKind::MagicSquare => magic_square(size),
            ModelKind::Grid => grid(size),
        }
    }
}

fn queens(size: u32) -> Result<Model, ModelError> {
    let mut config = Config::default();
    let queens = (0..size).map(|row| format!("q{row}")).collect::<Vec<_>>();
    for queen in &queens {
        let _ = config.add_var_range(queen, 0, size as i64 - 1)?;
    }

    config.distinct(&queens)?;
    for (row, queen) in queens.iter().enumerate() {
        for (distance, other) in queens[row + 1..].iter().enumerate() {
            let distance = distance as i64 + 1;
            let up = config.plus(queen, distance, ResultVar::Anonymous)?;
            config.neq(up, other)?;
            let down = config.plus(other, distance, ResultVar::Anonymous)?;
            config.neq(down, queen)?;
        }
    }

    config.set_targeted_vars(Targets::Names(queens.clone()));
    Ok(Model {
        config,
        output: queens,
    })
}

fn send_more_money() -> Result<Model, ModelError> {
    let mut config = Config::default();
    let letters = ["S", "E", "N", "D", "M", "O", "R", "Y"];
    for letter in letters {
        let _ = config.add_var_range(letter, 0, 9)?;
    }
    config.distinct(letters)?;
    config.gt("S", 0)?;
    config.gt("M", 0)?;

    let send = word(&mut config, &["S", "E", "N", "D"])?;
    let more = word(&mut config, &["M", "O", "R", "E"])?;
    let money = word(&mut config, &["M", "O", "N", "E", "Y"])?;
    let _ = config.plus(send, more, money)?;

    let output = letters.map(str::to_owned).to_vec();
    config.set_targeted_vars(Targets::Names(output.clone()));
    Ok(Model { config, output })
}

/// The number spelled by the digits `letters`, most significant first.
fn word(config: &mut Config, letters: &[&str]) -> Result<VariableId, ModelError> {
    let mut terms = Vec::new();
    for (position, letter) in letters.iter().rev().enumerate() {
        let weight = 10_i64.pow(position as u32);
        let term = if weight == 1 {
            config
                .variable_id(letter)
                .ok_or_else(|| ModelError::UnknownVariable((*letter).to_owned()))?
        } else {
            config.mul(*letter, weight, ResultVar::Anonymous)?
        };
        terms.push(term);
    }
    config.sum(terms, ResultVar::Anonymous)
}

fn magic_square(size: u32) -> Result<Model, ModelError> {
    let mut config = Config::default();
    let size = size as usize;
    let cells = (0..size)
        .map(|row| (0..size).map(|column| format!("c{row}_{column}")).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let num_cells = (size * size) as i64;
    for cell in cells.iter().flatten() {
        let _ = config.add_var_range(cell, 1, num_cells)?;
    }

    let magic_sum = size as i64 * (num_cells + 1) / 2;
    config.distinct(cells.iter().flatten())?;
    for index in 0..size {
        let _ = config.sum(&cells[index], magic_sum)?;
        let _ = config.sum(cells.iter().map(|row| &row[index]), magic_sum)?;
    }
    let _ = config.sum((0..size).map(|index| &cells[index][index]), magic_sum)?;
    let _ = config.sum((0..size).map(|index| &cells[index][size - 1 - index]), magic_sum)?;

    let output = cells.into_iter().flatten().collect::<Vec<_>>();
    config.set_targeted_vars(Targets::Names(output.clone()));
    Ok(Model { config, output })
}

fn grid(size: u32) -> Result<Model, ModelError> {
    let mut config = Config::default();
    let size = size as usize;
    let cells = (0..size)
        .map(|row| (0..size).map(|column| format!("g{row}_{column}")).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    for cell in cells.iter().flatten() {
        let _ = config.add_var_range(cell, 0, 1)?;
        config.set_var_value_strategy(
            cell,
            ValueStrategy::Markov(MarkovOptions::new([0, 1], [MarkovRow::new([1.0, 3.0])])),
        )?;
    }

    for index in 0..size {
        let _ = config.sum(&cells[index], 1)?;
        let _ = config.sum(cells.iter().map(|row| &row[index]), 1)?;
    }

    let output = cells.into_iter().flatten().collect::<Vec<_>>();
    config.set_targeted_vars(Targets::Names(output.clone()));
    Ok(Model { config, output })
}

#[cfg(test)]
mod tests {
    use finitedomain_solver::results::SolveStatus;
    use finitedomain_solver::Solver;

    use super::*;

    fn count_solutions(kind: ModelKind, size: u32) -> usize {
        let model = kind.build(size).unwrap();
        let mut solver = Solver::new(model.config).unwrap();
        let outcome = solver.solve(usize::MAX);
        assert_eq!(outcome.status, SolveStatus::Exhausted);
        outcome.solutions.len()
    }

    #[test]
    fn queens_have_the_known_number_of_solutions() {
        assert_eq!(count_solutions(ModelKind::Queens, 4), 2);
        assert_eq!(count_solutions(ModelKind::Queens, 5), 10);
        assert_eq!(count_solutions(ModelKind::Queens, 6), 4);
    }

    #[test]
    fn send_more_money_has_a_unique_solution() {
        let model = ModelKind::SendMoreMoney.build(0).unwrap();
        let mut solver = Solver::new(model.config).unwrap();

        let outcome = solver.solve(usize::MAX);

        assert_eq!(outcome.solutions.len(), 1);
        let digits = model
            .output
            .iter()
            .map(|letter| outcome.solutions[0].value(letter))
            .collect::<Option<Vec<_>>>();
        assert_eq!(digits, Some(vec![9, 5, 6, 7, 1, 0, 8, 2]));
    }

    #[test]
    fn magic_squares_of_size_three() {
        assert_eq!(count_solutions(ModelKind::MagicSquare, 3), 8);
    }

    #[test]
    fn grids_are_permutation_matrices() {
        assert_eq!(count_solutions(ModelKind::Grid, 3), 6);
    }
}
