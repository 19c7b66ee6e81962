//! eq-props: fluid and rock property models consumed by equilibration.
//!
//! Provides:
//! - Phase identities and the `PhaseUsage` active-phase map
//! - `DensityModel` trait with incompressible and compressible backends
//! - PVT region lookup (`PvtRegions`)
//! - Mixing policies (`Miscibility`): dissolved gas (Rs) and vaporised oil (Rv)
//! - Capillary-pressure curves and the `SaturationProps` trait
//!
//! # Architecture
//!
//! The equilibration solver only sees the two traits, `DensityModel` and
//! `SaturationProps`. The concrete types here are the default backends used by
//! the case-file layer and the tests; any other property source can be plugged
//! in by implementing the traits.
//!
//! # Example
//!
//! ```
//! use eq_core::units::kg_per_m3;
//! use eq_props::{ConstantDensity, DensityModel, MixingRatios, Phase};
//!
//! let model = ConstantDensity::new()
//!     .with_phase(Phase::Aqua, kg_per_m3(1000.0))
//!     .with_phase(Phase::Liquid, kg_per_m3(800.0));
//!
//! let rho = model.density(Phase::Liquid, 2.0e7, MixingRatios::default()).unwrap();
//! assert_eq!(rho, 800.0);
//! ```

pub mod capillary;
pub mod density;
pub mod error;
pub mod miscibility;
pub mod phase;
pub mod pvt;
pub mod saturation;

// Re-exports for ergonomics
pub use capillary::{BrooksCorey, CapillaryCurve, PcTable, SaturationArgument};
pub use density::{CompressibleDensity, CompressiblePhase, ConstantDensity, DensityModel, MixingRatios};
pub use error::{PropsError, PropsResult};
pub use miscibility::{ConstantRatio, DepthTable, Miscibility, NoMixing};
pub use phase::{Phase, PhaseUsage};
pub use pvt::PvtRegions;
pub use saturation::{SatFuncRegion, SatRange, SaturationFunctions, SaturationProps};
