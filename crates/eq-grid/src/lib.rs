//! eq-grid: cell geometry and region partition for equilibration.
//!
//! Provides:
//! - Cell-centre depths (`Grid`) and an incremental `GridBuilder`
//! - The region -> cells partition (`RegionMapping`) and its `CellRange` views
//!
//! # Example
//!
//! ```
//! use eq_grid::{GridBuilder, RegionMapping};
//!
//! let mut builder = GridBuilder::new();
//! builder.add_column(2000.0, 10.0, 4);
//! let grid = builder.build().unwrap();
//!
//! let mapping = RegionMapping::from_assignment(None, grid.num_cells()).unwrap();
//! assert_eq!(mapping.num_regions(), 1);
//! assert_eq!(mapping.cells(0).len(), 4);
//! ```

pub mod builder;
pub mod error;
pub mod grid;
pub mod mapping;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use builder::GridBuilder;
pub use error::{GridError, GridResult};
pub use grid::Grid;
pub use mapping::{CellRange, RegionMapping};
