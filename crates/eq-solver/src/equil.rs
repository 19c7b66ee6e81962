//! Whole-grid equilibration across all regions.

use std::collections::HashMap;
use std::sync::Arc;

use eq_core::RegionId;
use eq_core::units::constants::G0_MPS2;
use eq_grid::{Grid, RegionMapping};
use eq_props::{Miscibility, NoMixing, Phase, PhaseUsage, PvtRegions, SaturationProps};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{SolverError, SolverResult};
use crate::field::PhaseField;
use crate::pressure::phase_pressures;
use crate::region::{EquilRecord, EquilRegion};
use crate::saturation::phase_saturations;

/// Engine options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EquilOptions {
    /// Gravitational acceleration [m/s²].
    pub gravity: f64,
    /// Equilibrate regions on the rayon pool.
    pub parallel: bool,
}

impl Default for EquilOptions {
    fn default() -> Self {
        Self {
            gravity: G0_MPS2,
            parallel: true,
        }
    }
}

/// Mixing policies of one equilibration region.
#[derive(Clone, Debug)]
pub struct RegionMixing {
    pub dissolution: Arc<dyn Miscibility>,
    pub evaporation: Arc<dyn Miscibility>,
}

impl Default for RegionMixing {
    fn default() -> Self {
        Self {
            dissolution: Arc::new(NoMixing),
            evaporation: Arc::new(NoMixing),
        }
    }
}

/// What happened in one region.
#[derive(Clone, Debug, PartialEq)]
pub struct RegionReport {
    pub region: RegionId,
    pub num_cells: usize,
    pub overlap_cells: usize,
    pub clamped_cells: Vec<usize>,
    /// Overlap cells where gas was held at its maximum saturation.
    pub gas_clamped_cells: Vec<usize>,
    /// Pressures were evaluated in closed form.
    pub closed_form: bool,
}

/// Initial phase pressures and saturations over the whole grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Equilibrium {
    pub usage: PhaseUsage,
    pub pressures: PhaseField,
    pub saturations: PhaseField,
    /// One report per populated region, in region order.
    pub reports: Vec<RegionReport>,
}

impl Equilibrium {
    pub fn pressure(&self, phase: Phase, cell: usize) -> Option<f64> {
        let pos = self.usage.position(phase)?;
        self.pressures.phase(pos).get(cell).copied()
    }

    pub fn saturation(&self, phase: Phase, cell: usize) -> Option<f64> {
        let pos = self.usage.position(phase)?;
        self.saturations.phase(pos).get(cell).copied()
    }
}

struct RegionSolution {
    region: usize,
    pressures: PhaseField,
    saturations: PhaseField,
    report: RegionReport,
}

/// Drives equilibration of every populated region.
///
/// Each region is bound to the PVT model of its first cell and solved
/// independently; results are scattered into whole-grid fields afterwards,
/// which is safe because regions partition the cells.
pub struct Equilibrator<'a> {
    grid: &'a Grid,
    mapping: &'a RegionMapping,
    records: &'a [EquilRecord],
    pvt: &'a PvtRegions,
    sat_props: &'a dyn SaturationProps,
    options: EquilOptions,
    mixing: HashMap<usize, RegionMixing>,
}

impl<'a> Equilibrator<'a> {
    pub fn new(
        grid: &'a Grid,
        mapping: &'a RegionMapping,
        records: &'a [EquilRecord],
        pvt: &'a PvtRegions,
        sat_props: &'a dyn SaturationProps,
    ) -> Self {
        Self {
            grid,
            mapping,
            records,
            pvt,
            sat_props,
            options: EquilOptions::default(),
            mixing: HashMap::new(),
        }
    }

    pub fn with_options(mut self, options: EquilOptions) -> Self {
        self.options = options;
        self
    }

    /// Mixing policies for `region`; regions without any use no mixing.
    pub fn with_mixing(mut self, region: usize, mixing: RegionMixing) -> Self {
        self.mixing.insert(region, mixing);
        self
    }

    pub fn options(&self) -> &EquilOptions {
        &self.options
    }

    /// Compute the initial state.
    pub fn run(&self) -> SolverResult<Equilibrium> {
        let usage = *self.sat_props.phase_usage();
        self.check(&usage)?;

        let regions: Vec<usize> = self
            .mapping
            .regions()
            .map(RegionId::index)
            .filter(|&r| !self.mapping.cells(r).is_empty())
            .collect();

        info!(
            regions = regions.len(),
            cells = self.grid.num_cells(),
            parallel = self.options.parallel,
            "equilibrating"
        );

        let solve = |&region: &usize| self.solve_region(region, &usage);
        let solutions: Vec<RegionSolution> = if self.options.parallel {
            regions.par_iter().map(solve).collect::<SolverResult<_>>()?
        } else {
            regions.iter().map(solve).collect::<SolverResult<_>>()?
        };

        let num_cells = self.grid.num_cells();
        let mut pressures = PhaseField::new(usage.num_phases(), num_cells);
        let mut saturations = PhaseField::new(usage.num_phases(), num_cells);
        let mut reports = Vec::with_capacity(solutions.len());
        for solution in solutions {
            let cells = self.mapping.cells(solution.region);
            pressures.scatter_from(&solution.pressures, cells);
            saturations.scatter_from(&solution.saturations, cells);
            reports.push(solution.report);
        }

        let overlap: usize = reports.iter().map(|r| r.overlap_cells).sum();
        let clamped: usize = reports.iter().map(|r| r.clamped_cells.len()).sum();
        info!(overlap, clamped, "equilibration finished");

        Ok(Equilibrium {
            usage,
            pressures,
            saturations,
            reports,
        })
    }

    fn check(&self, usage: &PhaseUsage) -> SolverResult<()> {
        if !usage.is_active(Phase::Liquid) {
            return Err(SolverError::config(
                "oil must be active: not handling water-gas cases",
            ));
        }
        if self.mapping.num_cells() != self.grid.num_cells() {
            return Err(SolverError::config(format!(
                "region mapping covers {} cells but the grid has {}",
                self.mapping.num_cells(),
                self.grid.num_cells()
            )));
        }
        for region in self.mapping.regions() {
            let r = region.index();
            if !self.mapping.cells(r).is_empty() && r >= self.records.len() {
                return Err(SolverError::config(format!(
                    "no equilibration record for region {} (have {})",
                    r,
                    self.records.len()
                )));
            }
        }
        Ok(())
    }

    fn solve_region(&self, r: usize, usage: &PhaseUsage) -> SolverResult<RegionSolution> {
        let cells = self.mapping.cells(r);
        let Some(rep) = cells.first() else {
            return Err(SolverError::config(format!("region {} has no cells", r)));
        };
        let record = self.records.get(r).cloned().ok_or_else(|| {
            SolverError::config(format!("no equilibration record for region {}", r))
        })?;
        let density = self
            .pvt
            .model_for_cell(rep)
            .map_err(|e| SolverError::from(e).at_cell(r, rep))?;
        let mixing = self.mixing.get(&r).cloned().unwrap_or_default();

        let region = EquilRegion::builder(RegionId::from_index(r), record, density, usage)
            .dissolution(mixing.dissolution)
            .evaporation(mixing.evaporation)
            .build()
            .map_err(|e| e.at_region(r))?;

        debug!(
            region = r,
            cells = cells.len(),
            density = density.name(),
            closed_form = region.is_incompressible(),
            "equilibrating region"
        );

        let pressures = phase_pressures(self.grid, &region, cells, self.options.gravity)?;
        let outcome = phase_saturations(&region, cells, self.sat_props, &pressures)?;

        Ok(RegionSolution {
            region: r,
            pressures,
            saturations: outcome.saturations,
            report: RegionReport {
                region: region.id(),
                num_cells: cells.len(),
                overlap_cells: outcome.overlap_cells,
                clamped_cells: outcome.clamped_cells,
                gas_clamped_cells: outcome.gas_clamped_cells,
                closed_form: region.is_incompressible(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eq_core::units::{bar, kg_per_m3, m, pa};
    use eq_grid::GridBuilder;
    use eq_props::{CapillaryCurve, ConstantDensity, SatFuncRegion, SaturationFunctions};

    fn grid(n: usize) -> Grid {
        let mut builder = GridBuilder::new();
        builder.add_column(1900.0, 400.0 / n as f64, n);
        builder.build().unwrap()
    }

    fn pvt() -> PvtRegions {
        PvtRegions::single(Box::new(
            ConstantDensity::new()
                .with_phase(Phase::Aqua, kg_per_m3(1000.0))
                .with_phase(Phase::Liquid, kg_per_m3(800.0)),
        ))
    }

    fn props() -> SaturationFunctions {
        let region = SatFuncRegion::new(CapillaryCurve::Zero, CapillaryCurve::Zero)
            .with_water_range(0.2, 1.0);
        SaturationFunctions::new(PhaseUsage::water_oil(), vec![region]).unwrap()
    }

    fn record() -> EquilRecord {
        EquilRecord::new(m(2000.0), bar(200.0)).with_woc(m(2100.0), pa(0.0))
    }

    #[test]
    fn missing_record_is_a_config_error() {
        let grid = grid(4);
        let mapping = RegionMapping::new(&[0, 0, 1, 1]);
        let records = [record()];
        let pvt = pvt();
        let props = props();
        let err = Equilibrator::new(&grid, &mapping, &records, &pvt, &props)
            .run()
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("region 1"));
    }

    #[test]
    fn empty_regions_are_skipped() {
        let grid = grid(3);
        // Region 1 has no cells and needs no record.
        let mapping = RegionMapping::new(&[0, 2, 2]);
        let records = [record(), record(), record()];
        let pvt = pvt();
        let props = props();
        let eq = Equilibrator::new(&grid, &mapping, &records, &pvt, &props)
            .run()
            .unwrap();
        let ids: Vec<usize> = eq.reports.iter().map(|r| r.region.index()).collect();
        assert_eq!(ids, vec![0, 2]);
        assert!(eq.pressures.is_complete());
        assert!(eq.saturations.is_complete());
    }

    #[test]
    fn mismatched_mapping_rejected() {
        let grid = grid(3);
        let mapping = RegionMapping::uniform(2);
        let records = [record()];
        let pvt = pvt();
        let props = props();
        assert!(
            Equilibrator::new(&grid, &mapping, &records, &pvt, &props)
                .run()
                .is_err()
        );
    }

    #[test]
    fn bad_record_names_region() {
        let grid = grid(2);
        let mapping = RegionMapping::uniform(2);
        let records = [EquilRecord::new(m(2300.0), bar(200.0)).with_woc(m(2100.0), pa(0.0))];
        let pvt = pvt();
        let props = props();
        let err = Equilibrator::new(&grid, &mapping, &records, &pvt, &props)
            .run()
            .unwrap_err();
        assert!(matches!(err, SolverError::AtRegion { region: 0, .. }));
        assert!(err.is_config());
    }
}
