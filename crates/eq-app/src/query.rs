//! Query helpers for inspecting an initial state.

use eq_core::RegionId;
use eq_props::Phase;

use crate::error::{AppError, AppResult};
use crate::run_service::InitialState;

/// Pressure and saturation of one phase in one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseValues {
    pub phase: Phase,
    pub pressure_pa: f64,
    pub saturation: f64,
}

/// Everything known about one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellSummary {
    pub cell: usize,
    pub depth_m: f64,
    pub region: usize,
    pub phases: Vec<PhaseValues>,
    pub primary_pressure_pa: f64,
}

/// Aggregates over one equilibration region.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region: RegionId,
    pub num_cells: usize,
    pub depth_range: (f64, f64),
    pub overlap_cells: usize,
    pub clamped_cells: usize,
    pub gas_clamped_cells: usize,
    pub closed_form: bool,
    pub mean_primary_pressure_pa: f64,
}

pub fn cell_summary(state: &InitialState, cell: usize) -> AppResult<CellSummary> {
    if cell >= state.num_cells() {
        return Err(AppError::InvalidInput(format!(
            "cell {} out of range (have {})",
            cell,
            state.num_cells()
        )));
    }

    let phases = state
        .usage
        .active_phases()
        .filter_map(|phase| {
            Some(PhaseValues {
                phase,
                pressure_pa: state.pressure(phase, cell)?,
                saturation: state.saturation(phase, cell)?,
            })
        })
        .collect();

    Ok(CellSummary {
        cell,
        depth_m: state.depths[cell],
        region: state.region_of[cell],
        phases,
        primary_pressure_pa: state.primary_pressure[cell],
    })
}

/// One summary per solved region, in region order.
pub fn region_summaries(state: &InitialState) -> Vec<RegionSummary> {
    state
        .reports
        .iter()
        .map(|report| {
            let r = report.region.index();
            let cells: Vec<usize> = (0..state.num_cells())
                .filter(|&c| state.region_of[c] == r)
                .collect();
            let top = cells
                .iter()
                .map(|&c| state.depths[c])
                .fold(f64::INFINITY, f64::min);
            let bottom = cells
                .iter()
                .map(|&c| state.depths[c])
                .fold(f64::NEG_INFINITY, f64::max);
            let mean = if cells.is_empty() {
                f64::NAN
            } else {
                cells.iter().map(|&c| state.primary_pressure[c]).sum::<f64>() / cells.len() as f64
            };

            RegionSummary {
                region: report.region,
                num_cells: report.num_cells,
                depth_range: (top, bottom),
                overlap_cells: report.overlap_cells,
                clamped_cells: report.clamped_cells.len(),
                gas_clamped_cells: report.gas_clamped_cells.len(),
                closed_form: report.closed_form,
                mean_primary_pressure_pa: mean,
            }
        })
        .collect()
}
