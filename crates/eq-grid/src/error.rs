//! Grid-specific error types.

pub type GridResult<T> = Result<T, GridError>;

/// Grid construction and region-partition errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// The grid has no cells.
    Empty,

    /// A cell depth is NaN or infinite.
    NonFiniteDepth { cell: usize, depth: f64 },

    /// The region assignment array does not cover the grid exactly.
    AssignmentLength { expected: usize, actual: usize },

    /// A region id was requested that the mapping does not know.
    RegionOutOfRange { region: usize, num_regions: usize },
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::Empty => write!(f, "Grid has no cells"),
            GridError::NonFiniteDepth { cell, depth } => {
                write!(f, "Cell {} has non-finite depth {}", cell, depth)
            }
            GridError::AssignmentLength { expected, actual } => {
                write!(
                    f,
                    "Region assignment has {} entries but the grid has {} cells",
                    actual, expected
                )
            }
            GridError::RegionOutOfRange {
                region,
                num_regions,
            } => {
                write!(
                    f,
                    "Region {} out of range (mapping has {} regions)",
                    region, num_regions
                )
            }
        }
    }
}

impl std::error::Error for GridError {}
