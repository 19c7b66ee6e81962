//! Error types for the eq-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Case validation failed: {0}")]
    Validation(String),

    #[error("Runtime compilation failed: {0}")]
    Compile(String),

    #[error("Equilibration failed: {0}")]
    Solver(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for eq-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<eq_deck::DeckError> for AppError {
    fn from(err: eq_deck::DeckError) -> Self {
        match err {
            eq_deck::DeckError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Case(other.to_string()),
        }
    }
}

impl From<eq_deck::ValidationError> for AppError {
    fn from(err: eq_deck::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<eq_solver::SolverError> for AppError {
    fn from(err: eq_solver::SolverError) -> Self {
        AppError::Solver(err.to_string())
    }
}

impl From<eq_props::PropsError> for AppError {
    fn from(err: eq_props::PropsError) -> Self {
        AppError::Compile(err.to_string())
    }
}

impl From<eq_grid::GridError> for AppError {
    fn from(err: eq_grid::GridError) -> Self {
        AppError::Compile(err.to_string())
    }
}
