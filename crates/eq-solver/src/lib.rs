//! Hydrostatic equilibration of a reservoir's initial state.
//!
//! For every equilibration region this crate integrates the phase-pressure
//! ODE `dp/dz = ρ(z, p)·g` from the datum and fluid contacts to each cell
//! centre, then inverts the capillary-pressure curves to obtain phase
//! saturations. Overlapping gas-oil and oil-water transition zones are
//! reconciled through the gas-water capillary relation.
//!
//! The pipeline, leaf first:
//! - [`root`]: bracketed Illinois regula falsi
//! - [`ode`]: RK4 stepping with step doubling to a fixed tolerance
//! - [`inversion`]: saturation from capillary pressure
//! - [`pressure`]: per-region hydrostatic pressures
//! - [`saturation`]: per-region saturations
//! - [`equil`]: all regions, scattered into whole-grid arrays

pub mod equil;
pub mod error;
pub mod field;
pub mod formulation;
pub mod inversion;
pub mod ode;
pub mod pressure;
pub mod region;
pub mod root;
pub mod saturation;

pub use equil::{EquilOptions, Equilibrator, Equilibrium, RegionMixing, RegionReport};
pub use error::{SolverError, SolverResult};
pub use field::PhaseField;
pub use formulation::PressureFormulation;
pub use inversion::{PcDirection, sat_from_pc, sat_from_sum_of_pcs};
pub use pressure::phase_pressures;
pub use region::{EquilRecord, EquilRegion, EquilRegionBuilder};
pub use root::{RootConfig, RootResult, regula_falsi};
pub use saturation::{
    GAS_CLAMP_REPORT_TOL, OIL_CLAMP_REPORT_TOL, SaturationOutcome, phase_saturations,
};
