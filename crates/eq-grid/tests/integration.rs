//! Integration tests for eq-grid.

use eq_grid::{GridBuilder, RegionMapping};

#[test]
fn layered_grid_with_two_regions() {
    // Two columns side by side, each in its own region.
    let mut builder = GridBuilder::new();
    let west = builder.add_column(2000.0, 50.0, 4);
    let east = builder.add_column(2100.0, 50.0, 4);
    let grid = builder.build().unwrap();

    let mut assignment = vec![0; grid.num_cells()];
    for cell in east.clone() {
        assignment[cell] = 1;
    }
    let mapping = RegionMapping::from_assignment(Some(&assignment), grid.num_cells()).unwrap();

    assert_eq!(mapping.num_regions(), 2);
    assert_eq!(mapping.cells(0).as_slice(), &west.collect::<Vec<_>>()[..]);
    assert_eq!(mapping.cells(1).as_slice(), &east.collect::<Vec<_>>()[..]);

    // Representative cell of region 1 is its shallowest.
    let rep = mapping.cells(1).first().unwrap();
    assert_eq!(grid.cell_depth(rep), Some(2125.0));
}

#[test]
fn partition_is_disjoint_and_total() {
    let assignment = [3, 1, 0, 3, 1, 1, 0, 2];
    let mapping = RegionMapping::new(&assignment);

    let mut seen = vec![false; assignment.len()];
    for region in mapping.regions() {
        for cell in mapping.cells(region.index()) {
            assert!(!seen[cell], "cell {} listed twice", cell);
            seen[cell] = true;
            assert_eq!(mapping.region_of(cell), Some(region));
        }
    }
    assert!(seen.iter().all(|&s| s));
}
