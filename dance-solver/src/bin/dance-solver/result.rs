use dance_solver::DanceSolverError;
use thiserror::Error;

pub(crate) type DanceSolverResult<T> = Result<T, DanceSolverCliError>;

#[derive(Error, Debug)]
pub(crate) enum DanceSolverCliError {
    #[error("IO error, more details: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Failed to process the instance, more details: {0}")]
    Instance(#[from] DanceSolverError),
}
