#![cfg(test)]

use finitedomain_solver::model::Config;
use finitedomain_solver::options::MarkovOptions;
use finitedomain_solver::options::MarkovRow;
use finitedomain_solver::options::SolverOptions;
use finitedomain_solver::options::ValueStrategy;
use finitedomain_solver::options::VarStratConfig;
use finitedomain_solver::options::VarStrategyKind;
use finitedomain_solver::rand::rngs::SmallRng;
use finitedomain_solver::rand::SeedableRng;
use finitedomain_solver::results::SolveStatus;
use finitedomain_solver::ModelError;
use finitedomain_solver::Solver;
use itertools::Itertools;

fn solve_sorted(config: Config, names: &[&str], seed: u64) -> Vec<Vec<i32>> {
    let options = SolverOptions {
        random_generator: Box::new(SmallRng::seed_from_u64(seed)),
        ..Default::default()
    };
    let mut solver = Solver::with_options(config, options).unwrap();
    let outcome = solver.solve(usize::MAX);
    assert_eq!(outcome.status, SolveStatus::Exhausted);

    outcome
        .solutions
        .iter()
        .map(|solution| {
            names
                .iter()
                .map(|name| solution.value(name).unwrap())
                .collect::<Vec<_>>()
        })
        .sorted()
        .collect()
}

#[test]
fn values_without_weight_are_never_part_of_a_solution() {
    for seed in [1, 2, 42] {
        let mut config = Config::default();
        let _ = config.add_var_range("X", 0, 3).unwrap();
        config
            .set_var_value_strategy(
                "X",
                ValueStrategy::Markov(MarkovOptions::new(
                    [0, 1, 2, 3],
                    [MarkovRow::new([1.0, 0.0, 2.0, 0.0])],
                )),
            )
            .unwrap();

        assert_eq!(solve_sorted(config, &["X"], seed), vec![vec![0], vec![2]]);
    }
}

#[test]
fn guarded_rows_follow_their_boolean() {
    let mut config = Config::default();
    let _ = config.add_var_range("B", 0, 1).unwrap();
    let _ = config.add_var_range("X", 0, 3).unwrap();
    config
        .set_var_value_strategy(
            "X",
            ValueStrategy::Markov(MarkovOptions::new(
                [0, 1, 2, 3],
                [
                    MarkovRow::new([0.0, 1.0, 0.0, 0.0]).guarded_by("B"),
                    MarkovRow::new([1.0, 0.0, 0.0, 0.0]),
                ],
            )),
        )
        .unwrap();

    assert_eq!(
        solve_sorted(config, &["B", "X"], 42),
        vec![vec![0, 0], vec![1, 1]]
    );
}

#[test]
fn expanded_legends_weigh_the_remaining_values() {
    let mut config = Config::default();
    let _ = config.add_var_range("X", 0, 4).unwrap();
    config
        .set_var_value_strategy(
            "X",
            ValueStrategy::Markov(
                MarkovOptions::new([4], [MarkovRow::new([0.0])]).expand_vectors_with(1.0),
            ),
        )
        .unwrap();

    assert_eq!(
        solve_sorted(config, &["X"], 42),
        vec![vec![0], vec![1], vec![2], vec![3]]
    );
}

#[test]
fn markov_variables_are_branched_on_first() {
    let mut config = Config::default();
    let _ = config.add_var_range("A", 0, 1).unwrap();
    let _ = config.add_var_range("M", 0, 1).unwrap();
    config
        .set_var_value_strategy(
            "M",
            ValueStrategy::Markov(MarkovOptions::new([0, 1], [MarkovRow::new([0.0, 1.0])])),
        )
        .unwrap();
    config.set_var_strategy(VarStratConfig::new(VarStrategyKind::Markov));

    let mut solver = Solver::new(config).unwrap();
    let outcome = solver.solve(usize::MAX);

    assert_eq!(outcome.solutions.len(), 2);
    assert!(outcome
        .solutions
        .iter()
        .all(|solution| solution.value("M") == Some(1)));
    assert_eq!(solver.statistics().num_rejected, 1);
}

#[test]
fn invalid_matrices_are_rejected_when_solving() {
    let mut config = Config::default();
    let _ = config.add_var_range("X", 0, 3).unwrap();
    config
        .set_var_value_strategy(
            "X",
            ValueStrategy::Markov(MarkovOptions::new([0], [MarkovRow::new([1.0, 1.0])])),
        )
        .unwrap();

    assert!(matches!(
        Solver::new(config).unwrap_err(),
        ModelError::InvalidStrategy { .. }
    ));
}

#[test]
fn guards_have_to_exist() {
    let mut config = Config::default();
    let _ = config.add_var_range("X", 0, 3).unwrap();
    config
        .set_var_value_strategy(
            "X",
            ValueStrategy::Markov(MarkovOptions::new(
                [0],
                [MarkovRow::new([1.0]).guarded_by("G")],
            )),
        )
        .unwrap();

    assert_eq!(
        Solver::new(config).unwrap_err(),
        ModelError::UnknownVariable("G".to_owned())
    );
}
