//! CSV export of an initial state.

use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::run_service::InitialState;

/// One row per cell: depth, region, then pressure and saturation of every
/// active phase, then the primary pressure.
pub fn to_csv(state: &InitialState) -> String {
    let phases: Vec<_> = state.usage.active_phases().collect();

    let mut csv = String::from("cell,depth_m,region");
    for phase in &phases {
        csv.push_str(&format!(",p_{}_pa", phase.as_str()));
    }
    for phase in &phases {
        csv.push_str(&format!(",s_{}", phase.as_str()));
    }
    csv.push_str(",p_primary_pa\n");

    for cell in 0..state.num_cells() {
        csv.push_str(&format!(
            "{},{},{}",
            cell, state.depths[cell], state.region_of[cell]
        ));
        for (pos, _) in phases.iter().enumerate() {
            csv.push_str(&format!(",{}", state.pressures.get(pos, cell)));
        }
        for (pos, _) in phases.iter().enumerate() {
            csv.push_str(&format!(",{}", state.saturations.get(pos, cell)));
        }
        csv.push_str(&format!(",{}\n", state.primary_pressure[cell]));
    }
    csv
}

pub fn export_csv(path: &Path, state: &InitialState) -> AppResult<()> {
    std::fs::write(path, to_csv(state)).map_err(|e| AppError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
