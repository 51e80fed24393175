#![cfg(test)]

use finitedomain_solver::model::Config;
use finitedomain_solver::options::ValueStrategy;
use finitedomain_solver::results::SolveStatus;
use finitedomain_solver::Solver;

fn values(outcome_solutions: &[finitedomain_solver::Solution], names: &[&str]) -> Vec<Vec<i32>> {
    outcome_solutions
        .iter()
        .map(|solution| {
            names
                .iter()
                .map(|name| solution.value(name).expect("every named variable is solved"))
                .collect()
        })
        .collect()
}

fn first_value_of_a(strategy: ValueStrategy) -> i32 {
    let mut config = Config::default();
    let _ = config.add_var_range("A", 1, 99).unwrap();
    let _ = config.add_var_range("B", 0, 0).unwrap();
    config.gt("A", "B").unwrap();
    config.set_value_strategy(strategy).unwrap();

    let mut solver = Solver::new(config).unwrap();
    let outcome = solver.solve(1);

    assert_eq!(outcome.status, SolveStatus::LimitReached);
    outcome.solutions[0].value("A").unwrap()
}

#[test]
fn value_strategies_pick_the_expected_first_solution() {
    assert_eq!(first_value_of_a(ValueStrategy::Max), 99);
    assert_eq!(first_value_of_a(ValueStrategy::Min), 1);
    assert_eq!(first_value_of_a(ValueStrategy::Mid), 50);
    assert_eq!(first_value_of_a(ValueStrategy::SplitMax), 99);
    assert_eq!(first_value_of_a(ValueStrategy::SplitMin), 1);
}

#[test]
fn min_max_cycle_enumerates_in_alternating_order() {
    let mut config = Config::default();
    let _ = config.add_var_range("V1", 1, 4).unwrap();
    let _ = config.add_var_range("V2", 1, 4).unwrap();
    config.gt("V1", 0).unwrap();
    config.gt("V2", 0).unwrap();
    config.set_value_strategy(ValueStrategy::MinMaxCycle).unwrap();

    let mut solver = Solver::new(config).unwrap();
    let outcome = solver.solve(17);

    let expected = (1..=4)
        .flat_map(|first| (1..=4).rev().map(move |second| vec![first, second]))
        .collect::<Vec<_>>();
    assert_eq!(outcome.status, SolveStatus::Exhausted);
    assert_eq!(values(&outcome.solutions, &["V1", "V2"]), expected);
}

fn reified_equality(forced: bool) -> Vec<Vec<i32>> {
    let mut config = Config::default();
    let _ = config.add_var_range("A", 0, 1).unwrap();
    let _ = config.add_var_range("B", 0, 1).unwrap();
    let _ = config.add_var_range("R", 0, 1).unwrap();
    let _ = config.is_eq("A", "B", "R").unwrap();
    if forced {
        config.eq("R", 1).unwrap();
    }

    let mut solver = Solver::new(config).unwrap();
    let outcome = solver.solve(usize::MAX);
    assert_eq!(outcome.status, SolveStatus::Exhausted);

    let mut solutions = values(&outcome.solutions, &["A", "B"]);
    solutions.sort();
    solutions
}

#[test]
fn an_unconstrained_reified_result_does_not_restrict_its_operands() {
    assert_eq!(
        reified_equality(false),
        vec![vec![0, 0], vec![0, 1], vec![1, 0], vec![1, 1]]
    );
}

#[test]
fn a_forced_reified_result_constrains_its_operands() {
    assert_eq!(reified_equality(true), vec![vec![0, 0], vec![1, 1]]);
}

#[test]
fn reified_results_follow_their_operands() {
    let mut config = Config::default();
    let _ = config.add_var_range("A", 0, 3).unwrap();
    let _ = config.add_var_range("B", 0, 3).unwrap();
    let _ = config.add_var_range("R", 0, 1).unwrap();
    let _ = config.is_lt("A", "B", "R").unwrap();

    let mut solver = Solver::new(config).unwrap();
    let outcome = solver.solve(usize::MAX);

    assert_eq!(outcome.solutions.len(), 16);
    for solution in outcome.solutions {
        let expected = i32::from(solution.value("A") < solution.value("B"));
        assert_eq!(solution.value("R"), Some(expected));
    }
}
