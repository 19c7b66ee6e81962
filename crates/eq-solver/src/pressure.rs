//! Hydrostatic phase pressures within one equilibration region.

use eq_core::units::{hydrostatic_head, kg_per_m3, m};
use eq_grid::{CellRange, Grid};
use eq_props::{MixingRatios, Phase};
use tracing::debug;

use crate::error::{SolverError, SolverResult};
use crate::field::PhaseField;
use crate::ode::{ScalarOde, integrate_to_tolerance};
use crate::region::EquilRegion;

/// `dp/dz = ρ(z, p)·g` for one phase of a region.
struct PhaseGradient<'r, 'a> {
    region: &'r EquilRegion<'a>,
    phase: Phase,
    gravity: f64,
}

impl PhaseGradient<'_, '_> {
    fn mixing(&self, z: f64, p: f64) -> MixingRatios {
        match self.phase {
            Phase::Aqua => MixingRatios::default(),
            Phase::Liquid => MixingRatios {
                rs: self.region.dissolution().ratio(z, p),
                rv: 0.0,
            },
            Phase::Vapour => MixingRatios {
                rs: 0.0,
                rv: self.region.evaporation().ratio(z, p),
            },
        }
    }
}

impl ScalarOde for PhaseGradient<'_, '_> {
    fn rhs(&self, z: f64, p: f64) -> SolverResult<f64> {
        let rho = self
            .region
            .density()
            .density(self.phase, p, self.mixing(z, p))?;
        Ok(rho * self.gravity)
    }
}

/// A depth at which a pressure is wanted, tied to a cell when it is one.
#[derive(Clone, Copy, Debug)]
struct Target {
    depth: f64,
    cell: Option<usize>,
}

/// Pressures of one phase along a column, walking outward from the anchor.
struct Column<'g, 'r, 'a> {
    gradient: &'g PhaseGradient<'r, 'a>,
    /// Constant density when the region is incompressible.
    closed_form_rho: Option<f64>,
    breakpoints: &'g [f64],
    steps: usize,
}

impl Column<'_, '_, '_> {
    fn solve(&mut self, z0: f64, p0: f64, targets: &[Target]) -> SolverResult<Vec<f64>> {
        if let Some(rho) = self.closed_form_rho {
            let rho = kg_per_m3(rho);
            let g = self.gradient.gravity;
            return Ok(targets
                .iter()
                .map(|t| p0 + hydrostatic_head(rho, g, m(t.depth - z0)).value)
                .collect());
        }

        let mut order: Vec<usize> = (0..targets.len()).collect();
        order.sort_by(|&a, &b| targets[a].depth.total_cmp(&targets[b].depth));
        let split = order.partition_point(|&i| targets[i].depth < z0);

        let mut out = vec![f64::NAN; targets.len()];
        let (above, below) = order.split_at(split);
        for leg in [
            below.iter().copied().collect::<Vec<_>>(),
            above.iter().rev().copied().collect::<Vec<_>>(),
        ] {
            let (mut z, mut p) = (z0, p0);
            for i in leg {
                let target = targets[i];
                p = self.advance(z, p, target.depth).map_err(|e| {
                    let region = self.gradient.region.id().index();
                    match target.cell {
                        Some(cell) => e.at_cell(region, cell),
                        None => e.at_region(region),
                    }
                })?;
                z = target.depth;
                out[i] = p;
            }
        }
        Ok(out)
    }

    /// Carry `(z, p)` to `z_to`, stopping at every breakpoint strictly
    /// between them.
    fn advance(&mut self, z: f64, p: f64, z_to: f64) -> SolverResult<f64> {
        let (lo, hi) = (z.min(z_to), z.max(z_to));
        let mut stops: Vec<f64> = self
            .breakpoints
            .iter()
            .copied()
            .filter(|&b| b > lo && b < hi)
            .collect();
        if z_to < z {
            stops.sort_by(|a, b| b.total_cmp(a));
        } else {
            stops.sort_by(f64::total_cmp);
        }
        stops.push(z_to);

        let (mut z_cur, mut p_cur) = (z, p);
        for stop in stops {
            let leg = integrate_to_tolerance(self.gradient, z_cur, p_cur, stop)?;
            self.steps += leg.steps;
            z_cur = stop;
            p_cur = leg.value;
        }
        Ok(p_cur)
    }
}

/// Pressure of `phase` at `targets` given its anchor.
fn phase_column(
    region: &EquilRegion<'_>,
    phase: Phase,
    gravity: f64,
    anchor: (f64, f64),
    targets: &[Target],
) -> SolverResult<Vec<f64>> {
    let gradient = PhaseGradient {
        region,
        phase,
        gravity,
    };
    let (z0, p0) = anchor;
    let closed_form_rho = if region.is_incompressible() {
        Some(
            region
                .density()
                .density(phase, p0, gradient.mixing(z0, p0))
                .map_err(|e| SolverError::from(e).at_region(region.id().index()))?,
        )
    } else {
        None
    };
    let breakpoints = [region.zgoc(), region.zwoc()];

    let mut column = Column {
        gradient: &gradient,
        closed_form_rho,
        breakpoints: &breakpoints,
        steps: 0,
    };
    let pressures = column.solve(z0, p0, targets)?;
    if closed_form_rho.is_none() {
        debug!(
            region = region.id().index(),
            phase = %phase,
            steps = column.steps,
            "integrated phase pressure"
        );
    }
    Ok(pressures)
}

/// Phase pressures [Pa] at the cell centres of `cells`.
///
/// Oil is anchored at the datum. Water is anchored at the water-oil contact
/// with `p_w = p_o - pcow`, gas at the gas-oil contact with
/// `p_g = p_o + pcgo`. The returned field is region local: entry `i` belongs
/// to `cells[i]`.
pub fn phase_pressures(
    grid: &Grid,
    region: &EquilRegion<'_>,
    cells: CellRange<'_>,
    gravity: f64,
) -> SolverResult<PhaseField> {
    let usage = *region.usage();
    let region_index = region.id().index();

    let mut targets = Vec::with_capacity(cells.len() + 2);
    for cell in cells {
        let depth = grid.cell_depth(cell).ok_or_else(|| {
            SolverError::config(format!("cell {} is outside the grid", cell))
                .at_cell(region_index, cell)
        })?;
        targets.push(Target {
            depth,
            cell: Some(cell),
        });
    }
    let num_cells = targets.len();

    let water = usage.is_active(Phase::Aqua);
    let gas = usage.is_active(Phase::Vapour);
    let mut oil_targets = targets.clone();
    if water {
        oil_targets.push(Target {
            depth: region.zwoc(),
            cell: None,
        });
    }
    if gas {
        oil_targets.push(Target {
            depth: region.zgoc(),
            cell: None,
        });
    }

    let oil = phase_column(
        region,
        Phase::Liquid,
        gravity,
        (region.datum(), region.pressure()),
        &oil_targets,
    )?;

    let mut field = PhaseField::new(usage.num_phases(), num_cells);
    let mut write = |phase: Phase, values: &[f64]| {
        if let Some(pos) = usage.position(phase) {
            field.phase_mut(pos).copy_from_slice(&values[..num_cells]);
        }
    };
    write(Phase::Liquid, &oil);

    let mut extra = num_cells;
    if water {
        let po_woc = oil[extra];
        extra += 1;
        let anchor = (region.zwoc(), po_woc - region.pcow_woc());
        let pw = phase_column(region, Phase::Aqua, gravity, anchor, &targets)?;
        write(Phase::Aqua, &pw);
    }
    if gas {
        let po_goc = oil[extra];
        let anchor = (region.zgoc(), po_goc + region.pcgo_goc());
        let pg = phase_column(region, Phase::Vapour, gravity, anchor, &targets)?;
        write(Phase::Vapour, &pg);
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::EquilRecord;
    use eq_core::RegionId;
    use eq_core::units::constants::G0_MPS2;
    use eq_core::units::{bar, kg_per_m3, m, pa};
    use eq_grid::GridBuilder;
    use eq_props::{CompressibleDensity, CompressiblePhase, ConstantDensity, PhaseUsage};

    fn constant() -> ConstantDensity {
        ConstantDensity::new()
            .with_phase(Phase::Aqua, kg_per_m3(1000.0))
            .with_phase(Phase::Liquid, kg_per_m3(800.0))
            .with_phase(Phase::Vapour, kg_per_m3(200.0))
    }

    fn grid(depths: &[f64]) -> Grid {
        let mut builder = GridBuilder::new();
        builder.extend_from_depths(depths);
        builder.build().unwrap()
    }

    #[test]
    fn incompressible_pressures_are_linear() {
        let rho = constant();
        let usage = PhaseUsage::three_phase();
        let record = EquilRecord::new(m(2000.0), bar(200.0))
            .with_woc(m(2200.0), pa(0.0))
            .with_goc(m(1900.0), pa(0.0));
        let region = EquilRegion::builder(RegionId::from_index(0), record, &rho, &usage)
            .build()
            .unwrap();

        let depths = [1850.0, 1950.0, 2050.0, 2250.0];
        let grid = grid(&depths);
        let cells = [0, 1, 2, 3];
        let field =
            phase_pressures(&grid, &region, CellRange::from_slice(&cells), G0_MPS2).unwrap();

        let g = G0_MPS2;
        for (i, &z) in depths.iter().enumerate() {
            let po = 2.0e7 + 800.0 * g * (z - 2000.0);
            assert!((field.get(1, i) - po).abs() < 1e-6);

            let pw = 2.0e7 + 800.0 * g * 200.0 + 1000.0 * g * (z - 2200.0);
            assert!((field.get(0, i) - pw).abs() < 1e-6);

            let pg = 2.0e7 - 800.0 * g * 100.0 + 200.0 * g * (z - 1900.0);
            assert!((field.get(2, i) - pg).abs() < 1e-6);
        }
    }

    #[test]
    fn contact_capillary_pressure_offsets_anchor() {
        let rho = constant();
        let usage = PhaseUsage::water_oil();
        let record =
            EquilRecord::new(m(2000.0), bar(200.0)).with_woc(m(2100.0), pa(5.0e4));
        let region = EquilRegion::builder(RegionId::from_index(0), record, &rho, &usage)
            .build()
            .unwrap();

        let grid = grid(&[2100.0]);
        let field = phase_pressures(&grid, &region, CellRange::from_slice(&[0]), G0_MPS2).unwrap();
        let po = field.get(1, 0);
        let pw = field.get(0, 0);
        assert!((po - pw - 5.0e4).abs() < 1e-6);
    }

    #[test]
    fn compressible_oil_matches_analytic_profile() {
        // dp/dz = ρ0 exp(c (p - p0)) g has the solution
        // p(z) = p0 - ln(1 - c ρ0 g (z - z0)) / c.
        let c = 1.0e-9;
        let rho0 = 800.0;
        let model = CompressibleDensity::new().with_phase(
            Phase::Liquid,
            CompressiblePhase::new(kg_per_m3(rho0), c, bar(200.0)),
        );
        let usage = PhaseUsage::new(false, true, false);
        let region = EquilRegion::builder(
            RegionId::from_index(0),
            EquilRecord::new(m(2000.0), bar(200.0)),
            &model,
            &usage,
        )
        .build()
        .unwrap();
        assert!(!region.is_incompressible());

        let depths = [1500.0, 2000.0, 2600.0];
        let grid = grid(&depths);
        let field =
            phase_pressures(&grid, &region, CellRange::from_slice(&[0, 1, 2]), G0_MPS2).unwrap();
        for (i, &z) in depths.iter().enumerate() {
            let exact = 2.0e7 - (1.0 - c * rho0 * G0_MPS2 * (z - 2000.0)).ln() / c;
            let got = field.get(0, i);
            assert!((got - exact).abs() / exact < 1e-9, "z={z}: {got} vs {exact}");
        }
    }

    #[test]
    fn cells_keep_their_local_order() {
        let rho = constant();
        let usage = PhaseUsage::new(false, true, false);
        let region = EquilRegion::builder(
            RegionId::from_index(0),
            EquilRecord::new(m(2000.0), bar(200.0)),
            &rho,
            &usage,
        )
        .build()
        .unwrap();

        let grid = grid(&[2100.0, 1900.0, 2000.0]);
        let cells = [1, 0, 2];
        let field =
            phase_pressures(&grid, &region, CellRange::from_slice(&cells), G0_MPS2).unwrap();
        assert!(field.get(0, 0) < field.get(0, 2));
        assert!(field.get(0, 2) < field.get(0, 1));
        assert_eq!(field.get(0, 2), 2.0e7);
    }
}
