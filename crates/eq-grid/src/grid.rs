//! Cell-centre depths.

/// Depth information for every cell of a grid.
///
/// Depth is measured positive downwards, in metres. Cells are addressed by
/// their 0-based global index.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub(crate) depths: Vec<f64>,
}

impl Grid {
    /// Total number of cells.
    pub fn num_cells(&self) -> usize {
        self.depths.len()
    }

    /// Depth of a cell centre, `None` if the index is out of range.
    pub fn cell_depth(&self, cell: usize) -> Option<f64> {
        self.depths.get(cell).copied()
    }

    /// All cell-centre depths in global index order.
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Shallowest and deepest cell-centre depth.
    pub fn depth_span(&self) -> (f64, f64) {
        self.depths
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            })
    }
}
