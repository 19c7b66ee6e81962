//! Incremental grid builder with validation.

use crate::error::GridResult;
use crate::grid::Grid;
use crate::validate::validate_depths;

/// Builds a [`Grid`] cell by cell.
#[derive(Debug, Default)]
pub struct GridBuilder {
    depths: Vec<f64>,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one cell with the given centre depth and return its index.
    pub fn add_cell(&mut self, depth: f64) -> usize {
        self.depths.push(depth);
        self.depths.len() - 1
    }

    /// Append a vertical column of `n` cells of equal `thickness`, the first
    /// one's top face at `top`. Returns the index range of the new cells.
    pub fn add_column(&mut self, top: f64, thickness: f64, n: usize) -> std::ops::Range<usize> {
        let start = self.depths.len();
        for k in 0..n {
            self.depths.push(top + thickness * (k as f64 + 0.5));
        }
        start..self.depths.len()
    }

    /// Append every depth of `depths` in order.
    pub fn extend_from_depths(&mut self, depths: &[f64]) -> &mut Self {
        self.depths.extend_from_slice(depths);
        self
    }

    /// Validate and produce the grid.
    pub fn build(self) -> GridResult<Grid> {
        validate_depths(&self.depths)?;
        Ok(Grid {
            depths: self.depths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn column_cells_are_centred() {
        let mut builder = GridBuilder::new();
        let range = builder.add_column(100.0, 2.0, 3);
        assert_eq!(range, 0..3);
        let grid = builder.build().unwrap();
        assert_eq!(grid.depths(), &[101.0, 103.0, 105.0]);
        assert_eq!(grid.depth_span(), (101.0, 105.0));
    }

    #[test]
    fn empty_grid_rejected() {
        assert_eq!(GridBuilder::new().build().unwrap_err(), GridError::Empty);
    }

    #[test]
    fn nan_depth_rejected() {
        let mut builder = GridBuilder::new();
        builder.add_cell(10.0);
        builder.add_cell(f64::NAN);
        let err = builder.build().unwrap_err();
        assert!(matches!(err, GridError::NonFiniteDepth { cell: 1, .. }));
    }
}
