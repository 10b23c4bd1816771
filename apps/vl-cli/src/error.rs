use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Project error: {0}")]
    Project(#[from] vl_project::ProjectError),

    #[error("Solver error: {0}")]
    Solver(#[from] vl_solver::SolverError),

    #[error("Surrogate error: {0}")]
    Surrogate(#[from] vl_surrogate::SurrogateError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Either --project or --model is required")]
    MissingSource,

    #[error("{failed} of {total} samples failed")]
    SamplesFailed { failed: usize, total: usize },
}

pub type CliResult<T> = Result<T, CliError>;
