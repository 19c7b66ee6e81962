//! Per-phase, per-cell value arrays.

use eq_grid::CellRange;

/// One sequence of per-cell values for every active phase, indexed by the
/// phase's compact position.
///
/// Fresh fields are filled with NaN so a cell that was never written stands
/// out instead of masquerading as a zero pressure or saturation.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseField {
    values: Vec<Vec<f64>>,
}

impl PhaseField {
    pub fn new(num_phases: usize, num_cells: usize) -> Self {
        Self {
            values: vec![vec![f64::NAN; num_cells]; num_phases],
        }
    }

    pub fn num_phases(&self) -> usize {
        self.values.len()
    }

    pub fn num_cells(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn phase(&self, pos: usize) -> &[f64] {
        &self.values[pos]
    }

    pub fn phase_mut(&mut self, pos: usize) -> &mut [f64] {
        &mut self.values[pos]
    }

    pub fn get(&self, pos: usize, cell: usize) -> f64 {
        self.values[pos][cell]
    }

    pub fn set(&mut self, pos: usize, cell: usize, value: f64) {
        self.values[pos][cell] = value;
    }

    /// Write a region-local field into this whole-grid field, local entry `i`
    /// going to global cell `cells[i]`.
    pub fn scatter_from(&mut self, local: &PhaseField, cells: CellRange<'_>) {
        for (dst, src) in self.values.iter_mut().zip(&local.values) {
            for (cell, &value) in cells.iter().zip(src) {
                dst[cell] = value;
            }
        }
    }

    /// True when every entry has been written.
    pub fn is_complete(&self) -> bool {
        self.values.iter().flatten().all(|v| !v.is_nan())
    }

    pub fn into_inner(self) -> Vec<Vec<f64>> {
        self.values
    }
}

impl std::ops::Index<usize> for PhaseField {
    type Output = [f64];

    fn index(&self, pos: usize) -> &[f64] {
        &self.values[pos]
    }
}
