use finitedomain_solver::ModelError;
use thiserror::Error;

pub(crate) type SolverResult<T> = Result<T, SolverError>;

#[derive(Error, Debug)]
pub(crate) enum SolverError {
    #[error("IO error, more details: {0}")]
    IO(#[from] std::io::Error),
    #[error("The model is invalid, more details: {0}")]
    Model(#[from] ModelError),
}
