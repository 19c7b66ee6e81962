//! Runtime compilation of a case into engine objects.

use std::sync::Arc;

use eq_core::units::constants::G0_MPS2;
use eq_core::units::{kg_per_m3, m, pa};
use eq_deck::schema::{
    Case, CompressiblePhaseDef, FormulationDef, GridDef, MiscibilityDef, PcCurveDef, PvtDef,
    SatRegionDef, SaturationArgumentDef,
};
use eq_grid::{Grid, GridBuilder, RegionMapping};
use eq_props::{
    BrooksCorey, CapillaryCurve, CompressibleDensity, CompressiblePhase, ConstantDensity,
    ConstantRatio, DensityModel, DepthTable, Miscibility, NoMixing, PcTable, Phase, PhaseUsage,
    PvtRegions, SatFuncRegion, SaturationArgument, SaturationFunctions,
};
use eq_solver::{EquilOptions, EquilRecord, Equilibrator, PressureFormulation, RegionMixing};

use crate::error::{AppError, AppResult};

/// Engine objects compiled from a case.
pub struct CaseRuntime {
    pub name: String,
    pub usage: PhaseUsage,
    pub grid: Grid,
    pub mapping: RegionMapping,
    pub records: Vec<EquilRecord>,
    pub pvt: PvtRegions,
    pub sat_props: SaturationFunctions,
    pub mixing: Vec<(usize, RegionMixing)>,
    pub options: EquilOptions,
    pub formulation: PressureFormulation,
}

impl CaseRuntime {
    /// Equilibrator over this runtime's objects.
    pub fn equilibrator(&self) -> Equilibrator<'_> {
        self.mixing.iter().fold(
            Equilibrator::new(
                &self.grid,
                &self.mapping,
                &self.records,
                &self.pvt,
                &self.sat_props,
            )
            .with_options(self.options),
            |eq, (region, mixing)| eq.with_mixing(*region, mixing.clone()),
        )
    }
}

/// Compile a validated case into runtime structures.
pub fn compile_case(case: &Case) -> AppResult<CaseRuntime> {
    let usage = PhaseUsage::new(case.phases.water, case.phases.oil, case.phases.gas);

    let grid = build_grid(&case.grid)?;
    let mapping = RegionMapping::from_assignment(case.eqlnum.as_deref(), grid.num_cells())?;

    let records: Vec<EquilRecord> = case
        .equil
        .iter()
        .map(|def| {
            EquilRecord::new(m(def.datum_depth_m), pa(def.datum_pressure_pa))
                .with_woc(m(def.woc()), pa(def.pcow_woc_pa))
                .with_goc(m(def.goc()), pa(def.pcgo_goc_pa))
        })
        .collect();

    let pvt = build_pvt(&case.pvt, case.pvtnum.as_deref())?;
    let sat_props = build_saturation(usage, &case.saturation, case.satnum.as_deref())?;

    let mut mixing = Vec::with_capacity(case.mixing.len());
    for def in &case.mixing {
        mixing.push((
            def.region,
            RegionMixing {
                dissolution: build_miscibility(&def.dissolution)?,
                evaporation: build_miscibility(&def.evaporation)?,
            },
        ));
    }

    let options = EquilOptions {
        gravity: case.gravity_mps2.unwrap_or(G0_MPS2),
        ..EquilOptions::default()
    };

    let formulation = match case.formulation {
        FormulationDef::Wetting => PressureFormulation::Wetting,
        FormulationDef::NonWetting => PressureFormulation::NonWetting,
        FormulationDef::Global => PressureFormulation::Global,
    };
    formulation
        .validate(&usage)
        .map_err(|e| AppError::Compile(e.to_string()))?;

    Ok(CaseRuntime {
        name: case.name.clone(),
        usage,
        grid,
        mapping,
        records,
        pvt,
        sat_props,
        mixing,
        options,
        formulation,
    })
}

pub fn build_grid(def: &GridDef) -> AppResult<Grid> {
    let mut builder = GridBuilder::new();
    match def {
        GridDef::Depths { depths_m } => {
            builder.extend_from_depths(depths_m);
        }
        GridDef::Columns { columns } => {
            for column in columns {
                builder.add_column(column.top_m, column.cell_thickness_m, column.cells);
            }
        }
    }
    Ok(builder.build()?)
}

pub fn build_pvt(defs: &[PvtDef], pvtnum: Option<&[usize]>) -> AppResult<PvtRegions> {
    let models: Vec<Box<dyn DensityModel>> = defs.iter().map(build_density).collect();
    let pvt = PvtRegions::new(models)?;
    match pvtnum {
        Some(pvtnum) => Ok(pvt.with_pvtnum(pvtnum.to_vec())?),
        None => Ok(pvt),
    }
}

fn build_density(def: &PvtDef) -> Box<dyn DensityModel> {
    match def {
        PvtDef::Incompressible {
            water_kg_m3,
            oil_kg_m3,
            gas_kg_m3,
        } => {
            let mut model = ConstantDensity::new();
            for (phase, rho) in Phase::ALL.into_iter().zip([water_kg_m3, oil_kg_m3, gas_kg_m3]) {
                if let Some(rho) = rho {
                    model = model.with_phase(phase, kg_per_m3(*rho));
                }
            }
            Box::new(model)
        }
        PvtDef::Compressible { water, oil, gas } => {
            let mut model = CompressibleDensity::new();
            for (phase, def) in Phase::ALL.into_iter().zip([water, oil, gas]) {
                if let Some(def) = def {
                    model = model.with_phase(phase, compressible_phase(def));
                }
            }
            Box::new(model)
        }
    }
}

fn compressible_phase(def: &CompressiblePhaseDef) -> CompressiblePhase {
    CompressiblePhase::new(
        kg_per_m3(def.ref_density_kg_m3),
        def.compressibility_per_pa,
        pa(def.ref_pressure_pa),
    )
}

pub fn build_saturation(
    usage: PhaseUsage,
    defs: &[SatRegionDef],
    satnum: Option<&[usize]>,
) -> AppResult<SaturationFunctions> {
    let mut regions = Vec::with_capacity(defs.len());
    for def in defs {
        regions.push(
            SatFuncRegion::new(build_curve(&def.water_oil)?, build_curve(&def.gas_oil)?)
                .with_water_range(def.swmin, def.swmax)
                .with_gas_range(def.sgmin, def.sgmax),
        );
    }
    let props = SaturationFunctions::new(usage, regions)?;
    match satnum {
        Some(satnum) => Ok(props.with_satnum(satnum.to_vec())?),
        None => Ok(props),
    }
}

pub fn build_curve(def: &PcCurveDef) -> AppResult<CapillaryCurve> {
    let curve = match def {
        PcCurveDef::Zero => CapillaryCurve::Zero,
        PcCurveDef::Table {
            saturations,
            pressures_pa,
        } => CapillaryCurve::Table(PcTable::new(saturations.clone(), pressures_pa.clone())?),
        PcCurveDef::BrooksCorey {
            entry_pressure_pa,
            lambda,
            s_min,
            s_max,
            pc_max_pa,
            argument,
        } => {
            let argument = match argument {
                SaturationArgumentDef::Wetting => SaturationArgument::Wetting,
                SaturationArgumentDef::NonWetting => SaturationArgument::NonWetting,
            };
            CapillaryCurve::BrooksCorey(BrooksCorey::new(
                pa(*entry_pressure_pa),
                *lambda,
                *s_min,
                *s_max,
                pa(*pc_max_pa),
                argument,
            )?)
        }
    };
    Ok(curve)
}

pub fn build_miscibility(def: &MiscibilityDef) -> AppResult<Arc<dyn Miscibility>> {
    let policy: Arc<dyn Miscibility> = match def {
        MiscibilityDef::None => Arc::new(NoMixing),
        MiscibilityDef::Constant { ratio } => Arc::new(ConstantRatio(*ratio)),
        MiscibilityDef::DepthTable { depths_m, ratios } => {
            Arc::new(DepthTable::new(depths_m.clone(), ratios.clone())?)
        }
    };
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eq_deck::schema::ColumnDef;

    #[test]
    fn columns_stack_in_order() {
        let grid = build_grid(&GridDef::Columns {
            columns: vec![
                ColumnDef {
                    top_m: 2000.0,
                    cell_thickness_m: 10.0,
                    cells: 2,
                },
                ColumnDef {
                    top_m: 1000.0,
                    cell_thickness_m: 50.0,
                    cells: 1,
                },
            ],
        })
        .unwrap();
        assert_eq!(grid.depths(), &[2005.0, 2015.0, 1025.0]);
    }

    #[test]
    fn incompressible_pvt_defines_listed_phases() {
        let pvt = build_pvt(
            &[PvtDef::Incompressible {
                water_kg_m3: None,
                oil_kg_m3: Some(800.0),
                gas_kg_m3: None,
            }],
            None,
        )
        .unwrap();
        let model = pvt.model_for_cell(0).unwrap();
        let mix = eq_props::MixingRatios::default();
        assert_eq!(model.density(Phase::Liquid, 1.0e7, mix).unwrap(), 800.0);
        assert!(model.density(Phase::Aqua, 1.0e7, mix).is_err());
        assert!(model.is_incompressible());
    }

    #[test]
    fn bad_table_is_a_compile_error() {
        let err = build_curve(&PcCurveDef::Table {
            saturations: vec![0.5],
            pressures_pa: vec![0.0],
        })
        .unwrap_err();
        assert!(matches!(err, AppError::Compile(_)));
    }

    #[test]
    fn constant_mixing_is_constant() {
        let policy = build_miscibility(&MiscibilityDef::Constant { ratio: 0.1 }).unwrap();
        assert!(policy.is_constant());
        assert_eq!(policy.ratio(2000.0, 2.0e7), 0.1);
    }
}
