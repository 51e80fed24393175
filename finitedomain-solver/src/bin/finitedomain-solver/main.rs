mod models;
mod result;

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use finitedomain_solver::convert_case::Case;
use finitedomain_solver::hooks::SearchHooks;
use finitedomain_solver::hooks::TimeBudget;
use finitedomain_solver::options::SolverOptions;
use finitedomain_solver::options::ValueStrategy;
use finitedomain_solver::options::VarStratConfig;
use finitedomain_solver::options::VarStrategyKind;
use finitedomain_solver::rand::rngs::SmallRng;
use finitedomain_solver::rand::SeedableRng;
use finitedomain_solver::results::IteratedSolution;
use finitedomain_solver::statistics::configure_statistic_logging;
use finitedomain_solver::Solution;
use finitedomain_solver::Solver;
use log::error;
use log::info;
use log::LevelFilter;
use models::ModelKind;
use result::SolverResult;

#[derive(Debug, Parser)]
#[command(
    help_template = "\
{before-help}{name} {version}
Authors: {author}
About: {about}

{usage-heading}\n{tab}{usage}

{all-args}{after-help}
",
    author,
    version,
    about
)]
struct Args {
    /// The built-in model to solve.
    #[arg(value_enum)]
    model: ModelKind,

    /// The size of the model (the number of queens, or the side of the square or grid). Ignored
    /// by send-more-money.
    ///
    /// Possible values: u32
    #[arg(short = 'n', long = "size", default_value_t = 8, verbatim_doc_comment)]
    size: u32,

    /// The maximum number of solutions to print.
    ///
    /// Possible values: usize
    #[arg(long = "solutions", default_value_t = 1, verbatim_doc_comment)]
    solutions: usize,

    /// Print every solution, overrides "--solutions".
    ///
    /// Possible values: bool
    #[arg(short = 'a', long = "all-solutions", verbatim_doc_comment)]
    all_solutions: bool,

    /// The variable selection strategy.
    ///
    /// Possible values: naive, size, min, max, markov
    #[arg(long = "var-strategy", verbatim_doc_comment)]
    var_strategy: Option<VarStrategyKind>,

    /// The value selection strategy of the variables without a strategy of their own.
    ///
    /// Possible values: min, max, mid, splitMin, splitMax, minMaxCycle
    #[arg(long = "value-strategy", verbatim_doc_comment)]
    value_strategy: Option<ValueStrategy>,

    /// The seed of the random generator used by the Markov value strategy.
    ///
    /// Possible values: u64
    #[arg(
        short = 'r',
        long = "random-seed",
        default_value_t = 42,
        verbatim_doc_comment
    )]
    random_seed: u64,

    /// The time budget for the solver, given in milliseconds.
    ///
    /// Possible values: u64 (Optional)
    #[arg(short = 't', long = "time-limit", verbatim_doc_comment)]
    time_limit: Option<u64>,

    /// Enables log message output from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,

    /// Enables logging of statistics from the solver.
    ///
    /// Possible values: bool
    #[arg(short = 's', long = "log-statistics", verbatim_doc_comment)]
    log_statistics: bool,
}

fn configure_logging(verbose: bool, log_statistics: bool) -> std::io::Result<()> {
    if log_statistics {
        configure_statistic_logging(
            "%%%mzn-stat:",
            Some("%%%mzn-stat-end"),
            Some(Case::Camel),
            None,
        );
    }
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(move |buf, record| {
            write!(buf, "% ")?;

            writeln!(buf, "{}", record.args())
        })
        .filter_level(level_filter)
        .target(env_logger::Target::Stdout)
        .init();
    info!("Logging successfully configured");
    Ok(())
}

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run() -> SolverResult<()> {
    let args = Args::parse();
    configure_logging(args.verbose, args.log_statistics)?;

    let mut model = args.model.build(args.size)?;
    if let Some(kind) = args.var_strategy {
        model.config.set_var_strategy(VarStratConfig::new(kind));
    }
    if let Some(strategy) = args.value_strategy {
        model.config.set_value_strategy(strategy)?;
    }

    let mut hooks = SearchHooks::default();
    if let Some(time_limit) = args.time_limit {
        hooks = hooks.with_pre_propagation(TimeBudget::starting_now(Duration::from_millis(
            time_limit,
        )));
    }
    let options = SolverOptions {
        random_generator: Box::new(SmallRng::seed_from_u64(args.random_seed)),
        hooks,
    };
    let mut solver = Solver::with_options(model.config, options)?;

    let max_solutions = if args.all_solutions {
        usize::MAX
    } else {
        args.solutions
    };
    let mut num_solutions = 0;
    let mut solutions = solver.solution_iterator();
    while num_solutions < max_solutions {
        match solutions.next_solution() {
            IteratedSolution::Solution(solution) => {
                num_solutions += 1;
                print_solution(&solution, &model.output);
            }
            IteratedSolution::Finished => {
                if num_solutions == 0 {
                    println!("=====UNSATISFIABLE=====");
                } else {
                    println!("==========");
                }
                break;
            }
            IteratedSolution::Aborted => {
                if num_solutions == 0 {
                    println!("=====UNKNOWN=====");
                }
                break;
            }
        }
    }

    solver.log_statistics();
    Ok(())
}

fn print_solution(solution: &Solution, output: &[String]) {
    for name in output {
        if let Some(value) = solution.get(name) {
            println!("{name} = {value};");
        }
    }
    println!("----------");
}
