//! Smoke tests for the eq-app service layer over the bundled cases.

use std::path::PathBuf;

use eq_app::{
    AppError, RunOptions, cell_summary, export_csv, list_regions, load_case, region_summaries,
    run_case, run_case_file, save_case, summarize_case, to_csv,
};
use eq_core::units::constants::G0_MPS2;
use eq_props::Phase;

fn case_path(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // go to crates
    path.pop(); // go to repo root
    path.push("cases");
    path.push(name);
    path
}

#[test]
fn water_oil_case_runs() {
    let state = run_case_file(&case_path("01_water_oil.yaml"), &RunOptions::default()).unwrap();
    assert_eq!(state.num_cells(), 40);

    for cell in 0..state.num_cells() {
        let z = state.depths[cell];
        let po = state.pressure(Phase::Liquid, cell).unwrap();
        let expected = 2.0e7 + 800.0 * G0_MPS2 * (z - 2000.0);
        assert!((po - expected).abs() < 1e-6, "cell {cell}");

        let sw = state.saturation(Phase::Aqua, cell).unwrap();
        let so = state.saturation(Phase::Liquid, cell).unwrap();
        assert!((sw + so - 1.0).abs() < 1e-12);
        if z > 2200.0 {
            assert_eq!(sw, 1.0);
        }
        if z < 2030.0 {
            assert_eq!(sw, 0.2);
        }
    }

    // Oil pressure is the default primary pressure.
    assert_eq!(
        state.primary_pressure[5],
        state.pressure(Phase::Liquid, 5).unwrap()
    );
}

#[test]
fn two_region_case_is_deterministic_across_modes() {
    let case = load_case(&case_path("02_three_phase_regions.yaml")).unwrap();
    let parallel = run_case(&case, &RunOptions { parallel: true }).unwrap();
    let sequential = run_case(&case, &RunOptions { parallel: false }).unwrap();

    assert_eq!(parallel.pressures, sequential.pressures);
    assert_eq!(parallel.saturations, sequential.saturations);
    assert_eq!(parallel.reports, sequential.reports);

    for cell in 0..parallel.num_cells() {
        let total: f64 = [Phase::Aqua, Phase::Liquid, Phase::Vapour]
            .into_iter()
            .map(|p| parallel.saturation(p, cell).unwrap())
            .sum();
        assert!((total - 1.0).abs() < 1e-12, "cell {cell}");
    }

    let summaries = region_summaries(&parallel);
    assert_eq!(summaries.len(), 2);
    assert!(summaries.iter().all(|s| !s.closed_form));
    assert_eq!(summaries[0].num_cells, 25);
}

#[test]
fn global_formulation_lies_between_phase_pressures() {
    let state = run_case_file(
        &case_path("02_three_phase_regions.yaml"),
        &RunOptions::default(),
    )
    .unwrap();

    for cell in 0..state.num_cells() {
        let summary = cell_summary(&state, cell).unwrap();
        let lo = summary
            .phases
            .iter()
            .map(|v| v.pressure_pa)
            .fold(f64::INFINITY, f64::min);
        let hi = summary
            .phases
            .iter()
            .map(|v| v.pressure_pa)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(summary.primary_pressure_pa >= lo - 1e-4);
        assert!(summary.primary_pressure_pa <= hi + 1e-4);
    }
}

#[test]
fn gas_cap_is_at_maximum_gas_saturation() {
    let state = run_case_file(&case_path("03_oil_gas.json"), &RunOptions::default()).unwrap();
    assert!(state.saturation(Phase::Aqua, 0).is_none());

    for cell in 0..state.num_cells() {
        let z = state.depths[cell];
        let sg = state.saturation(Phase::Vapour, cell).unwrap();
        if z < 1910.0 {
            assert_eq!(sg, 0.8, "cell {cell} at {z} m");
        } else if z > 1925.0 {
            assert_eq!(sg, 0.0, "cell {cell} at {z} m");
        }
    }
}

#[test]
fn regions_listing_counts_cells() {
    let case = load_case(&case_path("02_three_phase_regions.yaml")).unwrap();
    let regions = list_regions(&case);
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[0].num_cells, 25);
    assert_eq!(regions[1].num_cells, 25);
    assert!(regions.iter().all(|r| r.has_mixing));

    let summary = summarize_case(&case);
    assert_eq!(summary.phases, vec!["water", "oil", "gas"]);
    assert_eq!(summary.num_cells, 50);
}

#[test]
fn csv_has_one_row_per_cell() {
    let state = run_case_file(&case_path("01_water_oil.yaml"), &RunOptions::default()).unwrap();
    let csv = to_csv(&state);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("cell,depth_m,region,p_water_pa,p_oil_pa,s_water,s_oil,p_primary_pa")
    );
    assert_eq!(lines.count(), state.num_cells());

    let path = std::env::temp_dir().join("eq_app_export.csv");
    export_csv(&path, &state).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), csv);
}

#[test]
fn saved_case_loads_back() {
    let case = load_case(&case_path("03_oil_gas.json")).unwrap();
    let path = std::env::temp_dir().join("eq_app_saved_case.yaml");
    save_case(&path, &case).unwrap();
    assert_eq!(load_case(&path).unwrap(), case);
}

#[test]
fn missing_file_is_reported() {
    let err = load_case(&case_path("does_not_exist.yaml")).unwrap_err();
    assert!(matches!(err, AppError::CaseFileRead { .. }));
}

#[test]
fn load_case_matches_deck_loader() {
    for name in ["01_water_oil.yaml", "03_oil_gas.json"] {
        let path = case_path(name);
        let via_app = load_case(&path).unwrap();
        let via_deck = eq_deck::load(&path).unwrap();
        assert_eq!(via_app, via_deck, "{name}");
    }

    let err = load_case(&case_path("does_not_exist.json")).unwrap_err();
    match err {
        AppError::CaseFileRead { path, .. } => assert!(path.ends_with("does_not_exist.json")),
        other => panic!("expected CaseFileRead, got {other}"),
    }
}

#[test]
fn cell_out_of_range_is_invalid_input() {
    let state = run_case_file(&case_path("03_oil_gas.json"), &RunOptions::default()).unwrap();
    assert!(matches!(
        cell_summary(&state, 99),
        Err(AppError::InvalidInput(_))
    ));
}
