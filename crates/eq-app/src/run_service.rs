//! Equilibration run execution.

use std::path::Path;
use std::time::Instant;

use eq_deck::schema::Case;
use eq_props::{Phase, PhaseUsage};
use eq_solver::{PhaseField, PressureFormulation, RegionReport};
use tracing::info;

use crate::case_service;
use crate::error::AppResult;
use crate::runtime_compile;

/// Options for running an equilibration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Solve regions on the rayon pool.
    pub parallel: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Initial reservoir state produced by one run.
#[derive(Debug, Clone)]
pub struct InitialState {
    pub case_name: String,
    pub timestamp: String,
    pub usage: PhaseUsage,
    pub formulation: PressureFormulation,
    /// Cell-centre depths [m].
    pub depths: Vec<f64>,
    /// Equilibration region of every cell.
    pub region_of: Vec<usize>,
    pub pressures: PhaseField,
    pub saturations: PhaseField,
    /// Pressure selected by the formulation, per cell [Pa].
    pub primary_pressure: Vec<f64>,
    pub reports: Vec<RegionReport>,
    pub compile_time_s: f64,
    pub solve_time_s: f64,
}

impl InitialState {
    pub fn num_cells(&self) -> usize {
        self.depths.len()
    }

    pub fn pressure(&self, phase: Phase, cell: usize) -> Option<f64> {
        let pos = self.usage.position(phase)?;
        self.pressures.phase(pos).get(cell).copied()
    }

    pub fn saturation(&self, phase: Phase, cell: usize) -> Option<f64> {
        let pos = self.usage.position(phase)?;
        self.saturations.phase(pos).get(cell).copied()
    }
}

/// Compile and equilibrate a loaded case.
pub fn run_case(case: &Case, options: &RunOptions) -> AppResult<InitialState> {
    let compile_start = Instant::now();
    let mut runtime = runtime_compile::compile_case(case)?;
    runtime.options.parallel = options.parallel;
    let compile_time_s = compile_start.elapsed().as_secs_f64();

    let solve_start = Instant::now();
    let equilibrium = runtime.equilibrator().run()?;
    let primary_pressure = runtime.formulation.primary_pressure(
        &equilibrium.usage,
        &equilibrium.pressures,
        &equilibrium.saturations,
    )?;
    let solve_time_s = solve_start.elapsed().as_secs_f64();

    let region_of = (0..runtime.grid.num_cells())
        .map(|cell| runtime.mapping.region_of(cell).map_or(0, |r| r.index()))
        .collect();

    info!(
        case = %runtime.name,
        cells = runtime.grid.num_cells(),
        regions = equilibrium.reports.len(),
        solve_time_s,
        "run finished"
    );

    Ok(InitialState {
        case_name: runtime.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        usage: equilibrium.usage,
        formulation: runtime.formulation,
        depths: runtime.grid.depths().to_vec(),
        region_of,
        pressures: equilibrium.pressures,
        saturations: equilibrium.saturations,
        primary_pressure,
        reports: equilibrium.reports,
        compile_time_s,
        solve_time_s,
    })
}

/// Load a case file and run it.
pub fn run_case_file(path: &Path, options: &RunOptions) -> AppResult<InitialState> {
    let case = case_service::load_case(path)?;
    run_case(&case, options)
}
