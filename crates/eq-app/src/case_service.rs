//! Case loading, saving, validation, and introspection.

use std::path::Path;

use eq_deck::schema::{Case, GridDef};

use crate::error::{AppError, AppResult};

/// Summary of a case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub name: String,
    pub version: u32,
    pub num_cells: usize,
    pub num_regions: usize,
    pub phases: Vec<&'static str>,
}

/// One equilibration region as declared in a case.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    pub region: usize,
    pub num_cells: usize,
    pub datum_depth_m: f64,
    pub datum_pressure_pa: f64,
    pub woc_depth_m: f64,
    pub goc_depth_m: f64,
    pub has_mixing: bool,
}

/// Load a case from a YAML or JSON file, migrating and validating it.
pub fn load_case(path: &Path) -> AppResult<Case> {
    let case = eq_deck::load(path).map_err(|e| match e {
        eq_deck::DeckError::Io(source) => AppError::CaseFileRead {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })?;
    tracing::debug!(path = %path.display(), name = %case.name, "loaded case");
    Ok(case)
}

/// Save a case, as JSON when the extension says so and YAML otherwise.
pub fn save_case(path: &Path, case: &Case) -> AppResult<()> {
    eq_deck::save(path, case).map_err(|e| match e {
        eq_deck::DeckError::Io(source) => AppError::FileWrite {
            path: path.to_path_buf(),
            source,
        },
        other => other.into(),
    })
}

/// Validate case structure.
pub fn validate_case(case: &Case) -> AppResult<()> {
    eq_deck::validate_case(case)?;
    Ok(())
}

pub fn summarize_case(case: &Case) -> CaseSummary {
    let mut phases = Vec::new();
    if case.phases.water {
        phases.push("water");
    }
    if case.phases.oil {
        phases.push("oil");
    }
    if case.phases.gas {
        phases.push("gas");
    }
    CaseSummary {
        name: case.name.clone(),
        version: case.version,
        num_cells: case.grid.num_cells(),
        num_regions: case.equil.len(),
        phases,
    }
}

/// Equilibration regions with their cell counts.
pub fn list_regions(case: &Case) -> Vec<RegionInfo> {
    let num_cells = case.grid.num_cells();
    let mut counts = vec![0_usize; case.equil.len()];
    match &case.eqlnum {
        Some(eqlnum) => {
            for &r in eqlnum {
                if let Some(count) = counts.get_mut(r) {
                    *count += 1;
                }
            }
        }
        None => {
            if let Some(count) = counts.first_mut() {
                *count = num_cells;
            }
        }
    }

    case.equil
        .iter()
        .enumerate()
        .map(|(region, record)| RegionInfo {
            region,
            num_cells: counts[region],
            datum_depth_m: record.datum_depth_m,
            datum_pressure_pa: record.datum_pressure_pa,
            woc_depth_m: record.woc(),
            goc_depth_m: record.goc(),
            has_mixing: case.mixing.iter().any(|m| m.region == region),
        })
        .collect()
}

/// Top and bottom cell-centre depth of a grid definition.
pub fn depth_range(grid: &GridDef) -> Option<(f64, f64)> {
    let depths: Vec<f64> = match grid {
        GridDef::Depths { depths_m } => depths_m.clone(),
        GridDef::Columns { columns } => columns
            .iter()
            .filter(|c| c.cells > 0)
            .flat_map(|c| {
                [
                    c.top_m + 0.5 * c.cell_thickness_m,
                    c.top_m + (c.cells as f64 - 0.5) * c.cell_thickness_m,
                ]
            })
            .collect(),
    };
    let top = depths.iter().copied().reduce(f64::min)?;
    let bottom = depths.iter().copied().reduce(f64::max)?;
    Some((top, bottom))
}
