//! Property model errors.

use thiserror::Error;

use crate::phase::Phase;

/// Result type for property operations.
pub type PropsResult<T> = Result<T, PropsError>;

/// Errors that can occur during property evaluation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// Non-physical values (negative density, NaN capillary pressure, etc.).
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    /// A model was asked about a phase it has no data for.
    #[error("Phase {phase} is not defined by {model}")]
    UndefinedPhase { phase: Phase, model: &'static str },

    /// The phase is not active in this run.
    #[error("Phase {phase} is not active")]
    InactivePhase { phase: Phase },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// Malformed saturation or mixing table.
    #[error("Invalid table: {what}")]
    InvalidTable { what: String },

    /// A per-cell property region id points past the configured regions.
    #[error("{what} region {region} out of range (have {count})")]
    RegionOutOfRange {
        what: &'static str,
        region: usize,
        count: usize,
    },
}
