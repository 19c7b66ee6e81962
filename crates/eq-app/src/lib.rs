//! Shared application service layer for equilibration.
//!
//! Gives the CLI one place to load and validate case files, compile them
//! into engine objects, run the equilibration and query or export the
//! resulting initial state.

pub mod case_service;
pub mod error;
pub mod export;
pub mod query;
pub mod run_service;
pub mod runtime_compile;

pub use case_service::{
    CaseSummary, RegionInfo, depth_range, list_regions, load_case, save_case, summarize_case,
    validate_case,
};
pub use error::{AppError, AppResult};
pub use export::{export_csv, to_csv};
pub use query::{CellSummary, PhaseValues, RegionSummary, cell_summary, region_summaries};
pub use run_service::{InitialState, RunOptions, run_case, run_case_file};
pub use runtime_compile::{
    CaseRuntime, build_curve, build_grid, build_miscibility, build_pvt, build_saturation,
    compile_case,
};
