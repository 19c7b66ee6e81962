//! Region -> cells partition.
//!
//! Stores the cells of every region contiguously (CSR layout): one flat
//! arena of cell indices plus per-region offsets. Each region's cells keep
//! ascending global order, so iteration is deterministic.

use eq_core::RegionId;

use crate::error::{GridError, GridResult};
use crate::validate::validate_assignment;

/// Partition of a grid's cells into regions.
///
/// Every cell belongs to exactly one region. Region ids are the values of the
/// assignment array, so regions that no cell refers to exist but are empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionMapping {
    /// Cell -> region.
    region_of: Vec<usize>,

    /// Region `r` owns `cells[start[r]..start[r + 1]]`.
    start: Vec<usize>,

    /// All cell indices grouped by region.
    cells: Vec<usize>,
}

impl RegionMapping {
    /// Build the partition from a cell -> region array.
    pub fn new(assignment: &[usize]) -> Self {
        let num_regions = assignment.iter().max().map_or(0, |&r| r + 1);

        let mut start = vec![0_usize; num_regions + 1];
        for &r in assignment {
            start[r + 1] += 1;
        }
        for r in 0..num_regions {
            start[r + 1] += start[r];
        }

        let mut fill = start.clone();
        let mut cells = vec![0_usize; assignment.len()];
        for (cell, &r) in assignment.iter().enumerate() {
            cells[fill[r]] = cell;
            fill[r] += 1;
        }

        Self {
            region_of: assignment.to_vec(),
            start,
            cells,
        }
    }

    /// Every cell in region 0.
    pub fn uniform(num_cells: usize) -> Self {
        Self::new(&vec![0; num_cells])
    }

    /// Build from an optional assignment array; absence puts all cells in region 0.
    pub fn from_assignment(assignment: Option<&[usize]>, num_cells: usize) -> GridResult<Self> {
        match assignment {
            Some(regions) => {
                validate_assignment(regions, num_cells)?;
                Ok(Self::new(regions))
            }
            None => Ok(Self::uniform(num_cells)),
        }
    }

    /// Number of regions (largest region id + 1).
    pub fn num_regions(&self) -> usize {
        self.start.len() - 1
    }

    /// Number of cells covered by the partition.
    pub fn num_cells(&self) -> usize {
        self.region_of.len()
    }

    /// Cells of one region. Panics if `region >= num_regions()`.
    pub fn cells(&self, region: usize) -> CellRange<'_> {
        CellRange {
            cells: &self.cells[self.start[region]..self.start[region + 1]],
        }
    }

    /// Cells of one region, checked.
    pub fn try_cells(&self, region: usize) -> GridResult<CellRange<'_>> {
        if region >= self.num_regions() {
            return Err(GridError::RegionOutOfRange {
                region,
                num_regions: self.num_regions(),
            });
        }
        Ok(self.cells(region))
    }

    /// Region that owns `cell`.
    pub fn region_of(&self, cell: usize) -> Option<RegionId> {
        self.region_of.get(cell).map(|&r| RegionId::from_index(r))
    }

    /// All region ids in ascending order.
    pub fn regions(&self) -> impl Iterator<Item = RegionId> + '_ {
        (0..self.num_regions()).map(RegionId::from_index)
    }
}

/// Ordered, restartable view of one region's cells.
///
/// Borrows the index storage of the [`RegionMapping`] it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange<'a> {
    cells: &'a [usize],
}

impl<'a> CellRange<'a> {
    /// Wrap an explicit list of cell indices.
    pub fn from_slice(cells: &'a [usize]) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// First cell of the range, used as the region's representative cell.
    pub fn first(&self) -> Option<usize> {
        self.cells.first().copied()
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'a, usize>> {
        self.cells.iter().copied()
    }

    pub fn as_slice(&self) -> &'a [usize] {
        self.cells
    }
}

impl<'a> IntoIterator for CellRange<'a> {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}

impl<'a> IntoIterator for &CellRange<'a> {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}
