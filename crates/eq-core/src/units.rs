//! SI quantities used at the engine boundary.
//!
//! Records and property models take uom quantities; the solver internals work
//! on raw `f64` in pascals, metres and kg/m³.

use uom::si::f64::{Length as UomLength, MassDensity as UomMassDensity, Pressure as UomPressure};

pub type Length = UomLength;
pub type Density = UomMassDensity;
pub type Pressure = UomPressure;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn bar(v: f64) -> Pressure {
    use uom::si::pressure::bar;
    Pressure::new::<bar>(v)
}

/// Depth or length in metres. Depths are positive downward.
#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn kg_per_m3(v: f64) -> Density {
    use uom::si::mass_density::kilogram_per_cubic_meter;
    Density::new::<kilogram_per_cubic_meter>(v)
}

pub mod constants {
    /// Standard gravity [m/s²], acting in the direction of increasing depth.
    pub const G0_MPS2: f64 = 9.806_65;
}

/// Hydrostatic pressure change [Pa] over `dz` metres of a column of density `rho`.
#[inline]
pub fn hydrostatic_head(rho: Density, gravity: f64, dz: Length) -> Pressure {
    pa(rho.value * gravity * dz.value)
}
