//! Phase saturations from phase pressures within one region.

use eq_grid::CellRange;
use eq_props::{Phase, SaturationProps};
use tracing::{debug, warn};

use crate::error::{SolverError, SolverResult};
use crate::field::PhaseField;
use crate::inversion::{PcDirection, sat_from_pc, sat_from_sum_of_pcs};
use crate::region::EquilRegion;

/// Oil saturation adjustments larger than this are reported.
pub const OIL_CLAMP_REPORT_TOL: f64 = 1e-8;

/// Gas saturation adjustments after the overlap correction larger than this
/// are reported.
pub const GAS_CLAMP_REPORT_TOL: f64 = 1e-8;

/// Saturations of one region plus what had to be corrected on the way.
#[derive(Clone, Debug, PartialEq)]
pub struct SaturationOutcome {
    /// Region-local field, entry `i` belonging to `cells[i]`.
    pub saturations: PhaseField,
    /// Cells where the gas-oil and oil-water transition zones overlapped.
    pub overlap_cells: usize,
    /// Global indices of cells whose oil saturation had to be clamped.
    pub clamped_cells: Vec<usize>,
    /// Global indices of overlap cells where `1 - s_w` exceeded the gas
    /// maximum; gas was held at `s_g,max` and oil took the remainder.
    pub gas_clamped_cells: Vec<usize>,
}

/// Water, oil and gas saturations of `cells` from region-local `pressures`.
///
/// Water follows `pcow = p_o - p_w` on a decreasing curve, gas follows
/// `pcgo = p_g - p_o` on an increasing one. Where both are active and the
/// independent answers add up to more than one, water is recomputed from the
/// gas-water capillary pressure and gas takes the rest, leaving no oil. Gas
/// never exceeds its maximum: when `1 - s_w` does, oil keeps the difference
/// and the cell is reported.
pub fn phase_saturations(
    region: &EquilRegion<'_>,
    cells: CellRange<'_>,
    props: &dyn SaturationProps,
    pressures: &PhaseField,
) -> SolverResult<SaturationOutcome> {
    let usage = *region.usage();
    let Some(oil) = usage.position(Phase::Liquid) else {
        return Err(SolverError::config(
            "oil must be active: not handling water-gas cases",
        ));
    };
    let water = usage.position(Phase::Aqua);
    let gas = usage.position(Phase::Vapour);
    let region_index = region.id().index();

    let mut saturations = PhaseField::new(usage.num_phases(), cells.len());
    let mut overlap_cells = 0;
    let mut clamped_cells = Vec::new();
    let mut gas_clamped_cells = Vec::new();

    for (i, cell) in cells.iter().enumerate() {
        let po = pressures.get(oil, i);
        let pw = water.map(|w| pressures.get(w, i));
        let pg = gas.map(|g| pressures.get(g, i));
        let resolved =
            resolve_cell(props, cell, po, pw, pg).map_err(|e| e.at_cell(region_index, cell))?;

        if resolved.overlap {
            overlap_cells += 1;
        }
        if resolved.gas_excess > GAS_CLAMP_REPORT_TOL {
            warn!(
                region = region_index,
                cell,
                excess = resolved.gas_excess,
                "gas saturation held at its maximum after overlap correction"
            );
            gas_clamped_cells.push(cell);
        }
        let so = resolved.so.clamp(0.0, 1.0);
        if (resolved.so - so).abs() > OIL_CLAMP_REPORT_TOL {
            warn!(
                region = region_index,
                cell,
                so = resolved.so,
                "oil saturation clamped to [0, 1]"
            );
            clamped_cells.push(cell);
        }

        if let Some(w) = water {
            saturations.set(w, i, resolved.sw);
        }
        if let Some(g) = gas {
            saturations.set(g, i, resolved.sg);
        }
        saturations.set(oil, i, so);
    }

    if overlap_cells > 0 {
        debug!(
            region = region_index,
            overlap_cells, "transition zones overlap, used gas-water capillary pressure"
        );
    }

    Ok(SaturationOutcome {
        saturations,
        overlap_cells,
        clamped_cells,
        gas_clamped_cells,
    })
}

struct CellSaturations {
    sw: f64,
    so: f64,
    sg: f64,
    overlap: bool,
    /// How far `1 - s_w` overshot `s_g,max` in an overlap cell.
    gas_excess: f64,
}

fn resolve_cell(
    props: &dyn SaturationProps,
    cell: usize,
    po: f64,
    pw: Option<f64>,
    pg: Option<f64>,
) -> SolverResult<CellSaturations> {
    let mut sw = match pw {
        Some(pw) => sat_from_pc(props, Phase::Aqua, cell, po - pw, PcDirection::Decreasing)?,
        None => 0.0,
    };
    let mut sg = match pg {
        Some(pg) => sat_from_pc(props, Phase::Vapour, cell, pg - po, PcDirection::Increasing)?,
        None => 0.0,
    };

    let mut overlap = false;
    let mut gas_excess = 0.0;
    if let (Some(pw), Some(pg)) = (pw, pg) {
        if sw + sg > 1.0 {
            sw = sat_from_sum_of_pcs(props, Phase::Aqua, Phase::Vapour, cell, pg - pw)?;
            sg = 1.0 - sw;
            overlap = true;

            let sgmax = props.sat_range(cell)?.max(Phase::Vapour);
            if sg > sgmax {
                gas_excess = sg - sgmax;
                sg = sgmax;
            }
        }
    }

    Ok(CellSaturations {
        sw,
        so: 1.0 - sw - sg,
        sg,
        overlap,
        gas_excess,
    })
}
