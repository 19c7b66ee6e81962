//! Error types for equilibration.

use eq_grid::GridError;
use eq_props::PropsError;
use thiserror::Error;

/// Errors that abort an equilibration pass.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Configuration error: {what}")]
    Config { what: String },

    #[error("Convergence failed: {what}")]
    ConvergenceFailed { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Property error: {0}")]
    Props(#[from] PropsError),

    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    #[error("Region {region}, cell {cell}: {source}")]
    AtCell {
        region: usize,
        cell: usize,
        #[source]
        source: Box<SolverError>,
    },

    #[error("Region {region}: {source}")]
    AtRegion {
        region: usize,
        #[source]
        source: Box<SolverError>,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;

impl SolverError {
    pub fn config(what: impl Into<String>) -> Self {
        SolverError::Config { what: what.into() }
    }

    /// Attach the offending region and cell.
    pub fn at_cell(self, region: usize, cell: usize) -> Self {
        match self {
            located @ (SolverError::AtCell { .. } | SolverError::AtRegion { .. }) => located,
            other => SolverError::AtCell {
                region,
                cell,
                source: Box::new(other),
            },
        }
    }

    /// Attach the offending region unless a location is already known.
    pub fn at_region(self, region: usize) -> Self {
        match self {
            located @ (SolverError::AtCell { .. } | SolverError::AtRegion { .. }) => located,
            other => SolverError::AtRegion {
                region,
                source: Box::new(other),
            },
        }
    }

    /// Error with any location wrapper removed.
    pub fn root_cause(&self) -> &SolverError {
        match self {
            SolverError::AtCell { source, .. } | SolverError::AtRegion { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// True for input problems, as opposed to numerical failures.
    pub fn is_config(&self) -> bool {
        matches!(self.root_cause(), SolverError::Config { .. })
    }
}
