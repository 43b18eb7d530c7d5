use thiserror::Error;

#[derive(Debug, Error)]
pub enum DanceSolverError {
    #[error("failed to read instance file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("there is no dancer called '{0}'")]
    UnknownDancer(String),
}
