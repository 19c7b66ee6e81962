//! Case validation logic.

use crate::schema::{
    Case, EquilDef, FormulationDef, GridDef, MiscibilityDef, PcCurveDef, PvtDef, SatRegionDef,
};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate entry: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Length mismatch: {field} has {actual} entries, grid has {expected} cells")]
    LengthMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported feature: {feature} - {reason}")]
    Unsupported { feature: String, reason: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: impl Into<String>, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_case(case: &Case) -> Result<(), ValidationError> {
    if case.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if !case.phases.oil {
        return Err(ValidationError::Unsupported {
            feature: "phases".to_string(),
            reason: "oil must be active, water-gas systems are not handled".to_string(),
        });
    }
    if case.formulation == FormulationDef::Wetting && !case.phases.water {
        return Err(ValidationError::Unsupported {
            feature: "formulation Wetting".to_string(),
            reason: "needs an active water phase".to_string(),
        });
    }
    if let Some(g) = case.gravity_mps2 {
        if !(g.is_finite() && g > 0.0) {
            return Err(invalid("gravity_mps2", g, "must be positive and finite"));
        }
    }

    let num_cells = validate_grid(&case.grid)?;

    let eqlnum = region_array(case.eqlnum.as_deref(), "eqlnum", num_cells)?;
    if case.equil.is_empty() {
        return Err(ValidationError::MissingReference {
            id: "0".to_string(),
            context: "equil records".to_string(),
        });
    }
    for &region in eqlnum.iter() {
        if region >= case.equil.len() {
            return Err(ValidationError::MissingReference {
                id: region.to_string(),
                context: "eqlnum region without an equil record".to_string(),
            });
        }
    }
    for (i, record) in case.equil.iter().enumerate() {
        validate_equil(record, i)?;
    }

    if case.pvt.is_empty() {
        return Err(ValidationError::MissingReference {
            id: "0".to_string(),
            context: "pvt regions".to_string(),
        });
    }
    for &region in region_array(case.pvtnum.as_deref(), "pvtnum", num_cells)?.iter() {
        if region >= case.pvt.len() {
            return Err(ValidationError::MissingReference {
                id: region.to_string(),
                context: "pvtnum".to_string(),
            });
        }
    }
    for (i, pvt) in case.pvt.iter().enumerate() {
        validate_pvt(pvt, i, case)?;
    }

    if case.saturation.is_empty() {
        return Err(ValidationError::MissingReference {
            id: "0".to_string(),
            context: "saturation regions".to_string(),
        });
    }
    for &region in region_array(case.satnum.as_deref(), "satnum", num_cells)?.iter() {
        if region >= case.saturation.len() {
            return Err(ValidationError::MissingReference {
                id: region.to_string(),
                context: "satnum".to_string(),
            });
        }
    }
    for (i, sat) in case.saturation.iter().enumerate() {
        validate_saturation(sat, i)?;
    }

    let mut mixed = HashSet::new();
    for (i, mixing) in case.mixing.iter().enumerate() {
        if !mixed.insert(mixing.region) {
            return Err(ValidationError::DuplicateId {
                id: mixing.region.to_string(),
                context: "mixing regions".to_string(),
            });
        }
        if mixing.region >= case.equil.len() {
            return Err(ValidationError::MissingReference {
                id: mixing.region.to_string(),
                context: "mixing region without an equil record".to_string(),
            });
        }
        validate_miscibility(&mixing.dissolution, &format!("mixing[{}].dissolution", i))?;
        validate_miscibility(&mixing.evaporation, &format!("mixing[{}].evaporation", i))?;
    }

    Ok(())
}

fn validate_grid(grid: &GridDef) -> Result<usize, ValidationError> {
    match grid {
        GridDef::Depths { depths_m } => {
            for (i, z) in depths_m.iter().enumerate() {
                if !z.is_finite() {
                    return Err(invalid(format!("grid.depths_m[{}]", i), z, "must be finite"));
                }
            }
        }
        GridDef::Columns { columns } => {
            for (i, column) in columns.iter().enumerate() {
                if !column.top_m.is_finite() {
                    return Err(invalid(
                        format!("grid.columns[{}].top_m", i),
                        column.top_m,
                        "must be finite",
                    ));
                }
                if !(column.cell_thickness_m.is_finite() && column.cell_thickness_m > 0.0) {
                    return Err(invalid(
                        format!("grid.columns[{}].cell_thickness_m", i),
                        column.cell_thickness_m,
                        "must be positive and finite",
                    ));
                }
            }
        }
    }
    let num_cells = grid.num_cells();
    if num_cells == 0 {
        return Err(invalid("grid", 0, "must contain at least one cell"));
    }
    Ok(num_cells)
}

/// Region array checked for length, or all zeros when absent.
fn region_array(
    array: Option<&[usize]>,
    field: &str,
    num_cells: usize,
) -> Result<Vec<usize>, ValidationError> {
    match array {
        Some(array) if array.len() != num_cells => Err(ValidationError::LengthMismatch {
            field: field.to_string(),
            expected: num_cells,
            actual: array.len(),
        }),
        Some(array) => Ok(array.to_vec()),
        None => Ok(vec![0; num_cells]),
    }
}

fn validate_equil(record: &EquilDef, i: usize) -> Result<(), ValidationError> {
    let fields = [
        ("datum_depth_m", record.datum_depth_m),
        ("datum_pressure_pa", record.datum_pressure_pa),
        ("woc_depth_m", record.woc()),
        ("pcow_woc_pa", record.pcow_woc_pa),
        ("goc_depth_m", record.goc()),
        ("pcgo_goc_pa", record.pcgo_goc_pa),
    ];
    for (name, value) in fields {
        if !value.is_finite() {
            return Err(invalid(format!("equil[{}].{}", i, name), value, "must be finite"));
        }
    }
    if record.datum_pressure_pa <= 0.0 {
        return Err(invalid(
            format!("equil[{}].datum_pressure_pa", i),
            record.datum_pressure_pa,
            "must be positive",
        ));
    }
    if record.goc() > record.datum_depth_m || record.datum_depth_m > record.woc() {
        return Err(invalid(
            format!("equil[{}].datum_depth_m", i),
            record.datum_depth_m,
            "the datum depth must be in the oil zone (goc <= datum <= woc)",
        ));
    }
    Ok(())
}

fn validate_pvt(pvt: &PvtDef, i: usize, case: &Case) -> Result<(), ValidationError> {
    let active = [
        ("water", case.phases.water),
        ("oil", case.phases.oil),
        ("gas", case.phases.gas),
    ];
    match pvt {
        PvtDef::Incompressible {
            water_kg_m3,
            oil_kg_m3,
            gas_kg_m3,
        } => {
            for ((phase, used), rho) in active.iter().zip([water_kg_m3, oil_kg_m3, gas_kg_m3]) {
                match rho {
                    Some(rho) if !(rho.is_finite() && *rho > 0.0) => {
                        return Err(invalid(
                            format!("pvt[{}].{}_kg_m3", i, phase),
                            rho,
                            "must be positive and finite",
                        ));
                    }
                    None if *used => {
                        return Err(ValidationError::MissingReference {
                            id: phase.to_string(),
                            context: format!("pvt[{}] density of an active phase", i),
                        });
                    }
                    _ => {}
                }
            }
        }
        PvtDef::Compressible { water, oil, gas } => {
            for ((phase, used), def) in active.iter().zip([water, oil, gas]) {
                match def {
                    Some(def) => {
                        let field = format!("pvt[{}].{}", i, phase);
                        if !(def.ref_density_kg_m3.is_finite() && def.ref_density_kg_m3 > 0.0) {
                            return Err(invalid(
                                format!("{}.ref_density_kg_m3", field),
                                def.ref_density_kg_m3,
                                "must be positive and finite",
                            ));
                        }
                        if !(def.compressibility_per_pa.is_finite()
                            && def.compressibility_per_pa >= 0.0)
                        {
                            return Err(invalid(
                                format!("{}.compressibility_per_pa", field),
                                def.compressibility_per_pa,
                                "must be non-negative and finite",
                            ));
                        }
                        if !def.ref_pressure_pa.is_finite() {
                            return Err(invalid(
                                format!("{}.ref_pressure_pa", field),
                                def.ref_pressure_pa,
                                "must be finite",
                            ));
                        }
                    }
                    None if *used => {
                        return Err(ValidationError::MissingReference {
                            id: phase.to_string(),
                            context: format!("pvt[{}] density of an active phase", i),
                        });
                    }
                    None => {}
                }
            }
        }
    }
    Ok(())
}

fn validate_saturation(sat: &SatRegionDef, i: usize) -> Result<(), ValidationError> {
    let ends = [
        ("swmin", sat.swmin),
        ("swmax", sat.swmax),
        ("sgmin", sat.sgmin),
        ("sgmax", sat.sgmax),
    ];
    for (name, value) in ends {
        if !(0.0..=1.0).contains(&value) {
            return Err(invalid(
                format!("saturation[{}].{}", i, name),
                value,
                "must lie in [0, 1]",
            ));
        }
    }
    if sat.swmin > sat.swmax || sat.sgmin > sat.sgmax {
        return Err(invalid(
            format!("saturation[{}]", i),
            "end points",
            "minimum exceeds maximum",
        ));
    }
    validate_curve(&sat.water_oil, &format!("saturation[{}].water_oil", i))?;
    validate_curve(&sat.gas_oil, &format!("saturation[{}].gas_oil", i))?;
    Ok(())
}

fn validate_curve(curve: &PcCurveDef, field: &str) -> Result<(), ValidationError> {
    match curve {
        PcCurveDef::Zero => Ok(()),
        PcCurveDef::Table {
            saturations,
            pressures_pa,
        } => {
            if saturations.len() < 2 || saturations.len() != pressures_pa.len() {
                return Err(invalid(
                    field,
                    format!("{}/{} rows", saturations.len(), pressures_pa.len()),
                    "needs at least two rows of matching length",
                ));
            }
            if saturations.windows(2).any(|w| w[1] <= w[0])
                || saturations.iter().any(|s| !(0.0..=1.0).contains(s))
            {
                return Err(invalid(
                    format!("{}.saturations", field),
                    format!("{:?}", saturations),
                    "must increase strictly within [0, 1]",
                ));
            }
            let falls = pressures_pa.windows(2).all(|w| w[1] <= w[0]);
            let rises = pressures_pa.windows(2).all(|w| w[1] >= w[0]);
            if !(falls || rises) || pressures_pa.iter().any(|p| !p.is_finite()) {
                return Err(invalid(
                    format!("{}.pressures_pa", field),
                    format!("{:?}", pressures_pa),
                    "must be finite and monotone",
                ));
            }
            Ok(())
        }
        PcCurveDef::BrooksCorey {
            entry_pressure_pa,
            lambda,
            s_min,
            s_max,
            pc_max_pa,
            ..
        } => {
            if !(*entry_pressure_pa > 0.0 && entry_pressure_pa.is_finite()) {
                return Err(invalid(
                    format!("{}.entry_pressure_pa", field),
                    entry_pressure_pa,
                    "must be positive",
                ));
            }
            if !(*lambda > 0.0 && lambda.is_finite()) {
                return Err(invalid(format!("{}.lambda", field), lambda, "must be positive"));
            }
            if !(0.0 <= *s_min && s_min < s_max && *s_max <= 1.0) {
                return Err(invalid(
                    field,
                    format!("[{}, {}]", s_min, s_max),
                    "needs 0 <= s_min < s_max <= 1",
                ));
            }
            if !(pc_max_pa >= entry_pressure_pa && pc_max_pa.is_finite()) {
                return Err(invalid(
                    format!("{}.pc_max_pa", field),
                    pc_max_pa,
                    "must be finite and at least the entry pressure",
                ));
            }
            Ok(())
        }
    }
}

fn validate_miscibility(policy: &MiscibilityDef, field: &str) -> Result<(), ValidationError> {
    match policy {
        MiscibilityDef::None => Ok(()),
        MiscibilityDef::Constant { ratio } => {
            if ratio.is_finite() && *ratio >= 0.0 {
                Ok(())
            } else {
                Err(invalid(field, ratio, "ratio must be non-negative and finite"))
            }
        }
        MiscibilityDef::DepthTable { depths_m, ratios } => {
            if depths_m.is_empty() || depths_m.len() != ratios.len() {
                return Err(invalid(
                    field,
                    format!("{}/{} rows", depths_m.len(), ratios.len()),
                    "needs matching, non-empty depth and ratio rows",
                ));
            }
            if depths_m.windows(2).any(|w| w[1] <= w[0]) {
                return Err(invalid(
                    format!("{}.depths_m", field),
                    format!("{:?}", depths_m),
                    "must increase strictly",
                ));
            }
            if ratios.iter().any(|r| !(r.is_finite() && *r >= 0.0)) {
                return Err(invalid(
                    format!("{}.ratios", field),
                    format!("{:?}", ratios),
                    "must be non-negative and finite",
                ));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn minimal() -> Case {
        Case {
            version: crate::LATEST_VERSION,
            name: "minimal".to_string(),
            phases: PhasesDef::default(),
            grid: GridDef::Depths {
                depths_m: vec![1950.0, 2050.0, 2150.0],
            },
            equil: vec![EquilDef {
                datum_depth_m: 2000.0,
                datum_pressure_pa: 2.0e7,
                woc_depth_m: Some(2100.0),
                pcow_woc_pa: 0.0,
                goc_depth_m: None,
                pcgo_goc_pa: 0.0,
            }],
            eqlnum: None,
            pvt: vec![PvtDef::Incompressible {
                water_kg_m3: Some(1000.0),
                oil_kg_m3: Some(800.0),
                gas_kg_m3: None,
            }],
            pvtnum: None,
            saturation: vec![SatRegionDef {
                water_oil: PcCurveDef::Zero,
                gas_oil: PcCurveDef::Zero,
                swmin: 0.2,
                swmax: 1.0,
                sgmin: 0.0,
                sgmax: 1.0,
            }],
            satnum: None,
            mixing: vec![],
            gravity_mps2: None,
            formulation: FormulationDef::NonWetting,
        }
    }

    #[test]
    fn minimal_case_is_valid() {
        validate_case(&minimal()).unwrap();
    }

    #[test]
    fn future_version_rejected() {
        let mut case = minimal();
        case.version = crate::LATEST_VERSION + 1;
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::UnsupportedVersion { .. })
        ));
    }

    #[test]
    fn eqlnum_length_must_match_grid() {
        let mut case = minimal();
        case.eqlnum = Some(vec![0, 0]);
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::LengthMismatch { expected: 3, actual: 2, .. })
        ));
    }

    #[test]
    fn eqlnum_region_needs_a_record() {
        let mut case = minimal();
        case.eqlnum = Some(vec![0, 1, 1]);
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn datum_outside_oil_zone_rejected() {
        let mut case = minimal();
        case.equil[0].woc_depth_m = Some(1990.0);
        let err = validate_case(&case).unwrap_err();
        assert!(err.to_string().contains("oil zone"));
    }

    #[test]
    fn active_phase_needs_density() {
        let mut case = minimal();
        case.phases.gas = true;
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn non_monotone_table_rejected() {
        let mut case = minimal();
        case.saturation[0].water_oil = PcCurveDef::Table {
            saturations: vec![0.2, 0.5, 1.0],
            pressures_pa: vec![1.0e5, 2.0e5, 0.0],
        };
        assert!(validate_case(&case).is_err());
    }

    #[test]
    fn water_gas_system_unsupported() {
        let mut case = minimal();
        case.phases = PhasesDef {
            water: true,
            oil: false,
            gas: true,
        };
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::Unsupported { .. })
        ));
    }

    #[test]
    fn duplicate_mixing_region_rejected() {
        let mut case = minimal();
        let mixing = MixingDef {
            region: 0,
            dissolution: MiscibilityDef::Constant { ratio: 50.0 },
            evaporation: MiscibilityDef::None,
        };
        case.mixing = vec![mixing.clone(), mixing];
        assert!(matches!(
            validate_case(&case),
            Err(ValidationError::DuplicateId { .. })
        ));
    }
}
