//! eq-core: shared foundation for the equilibration engine.
//!
//! Contains:
//! - units (uom SI types, constructors, gravity and hydrostatic head)
//! - numeric (clamped linear interpolation for property tables)
//! - ids (typed region ids)

pub mod ids;
pub mod numeric;
pub mod units;

pub use ids::*;
pub use numeric::*;
pub use units::*;
