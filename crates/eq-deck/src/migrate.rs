//! Case format migration.
//!
//! Version 1 numbered regions from 1 in `eqlnum`, `pvtnum`, `satnum` and
//! `mixing`. Version 2 numbers them from 0.

use crate::DeckError;
use crate::schema::Case;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut case: Case) -> Result<Case, DeckError> {
    while case.version < LATEST_VERSION {
        case = migrate_one_version(case)?;
    }
    Ok(case)
}

fn migrate_one_version(case: Case) -> Result<Case, DeckError> {
    match case.version {
        1 => migrate_v1_to_v2(case),
        v => Err(DeckError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v1_to_v2(mut case: Case) -> Result<Case, DeckError> {
    for (field, array) in [
        ("eqlnum", case.eqlnum.as_mut()),
        ("pvtnum", case.pvtnum.as_mut()),
        ("satnum", case.satnum.as_mut()),
    ] {
        if let Some(array) = array {
            for (cell, region) in array.iter_mut().enumerate() {
                *region = one_based(*region, field, cell)?;
            }
        }
    }
    for (i, mixing) in case.mixing.iter_mut().enumerate() {
        mixing.region = one_based(mixing.region, "mixing.region", i)?;
    }
    case.version = 2;
    Ok(case)
}

fn one_based(region: usize, field: &str, at: usize) -> Result<usize, DeckError> {
    region.checked_sub(1).ok_or_else(|| DeckError::Migration {
        what: format!("{}[{}] is 0, but version 1 numbers regions from 1", field, at),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::*;

    fn v1_case() -> Case {
        Case {
            version: 1,
            name: "v1".to_string(),
            phases: PhasesDef::default(),
            grid: GridDef::Depths {
                depths_m: vec![2000.0, 2100.0],
            },
            equil: vec![],
            eqlnum: Some(vec![1, 2]),
            pvt: vec![],
            pvtnum: None,
            saturation: vec![],
            satnum: Some(vec![1, 1]),
            mixing: vec![MixingDef {
                region: 2,
                dissolution: MiscibilityDef::None,
                evaporation: MiscibilityDef::None,
            }],
            gravity_mps2: None,
            formulation: FormulationDef::default(),
        }
    }

    #[test]
    fn v1_regions_become_zero_based() {
        let case = migrate_to_latest(v1_case()).unwrap();
        assert_eq!(case.version, LATEST_VERSION);
        assert_eq!(case.eqlnum, Some(vec![0, 1]));
        assert_eq!(case.satnum, Some(vec![0, 0]));
        assert_eq!(case.mixing[0].region, 1);
    }

    #[test]
    fn v1_zero_region_rejected() {
        let mut case = v1_case();
        case.eqlnum = Some(vec![0, 1]);
        assert!(matches!(
            migrate_to_latest(case),
            Err(DeckError::Migration { .. })
        ));
    }

    #[test]
    fn version_zero_has_no_path() {
        let mut case = v1_case();
        case.version = 0;
        assert!(migrate_to_latest(case).is_err());
    }
}
