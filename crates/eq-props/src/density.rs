//! Phase density models.

use eq_core::units::{Density, Pressure};

use crate::error::{PropsError, PropsResult};
use crate::phase::Phase;

/// Mixing state of the hydrocarbon phases at one point.
///
/// `rs` is dissolved gas in oil and `rv` vaporised oil in gas, both as
/// surface-volume ratios.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MixingRatios {
    pub rs: f64,
    pub rv: f64,
}

/// Trait for phase density models.
///
/// A model describes one PVT region. Implementations must be thread-safe
/// (Send + Sync) so regions can be equilibrated in parallel.
pub trait DensityModel: Send + Sync + std::fmt::Debug {
    /// Model name (for logging).
    fn name(&self) -> &'static str;

    /// Density [kg/m³] of `phase` at pressure `press` [Pa].
    fn density(&self, phase: Phase, press: f64, mixing: MixingRatios) -> PropsResult<f64>;

    /// True when densities depend neither on pressure nor on mixing.
    ///
    /// Callers may then integrate hydrostatics in closed form.
    fn is_incompressible(&self) -> bool {
        false
    }
}

/// Incompressible fluids: one fixed density per phase.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConstantDensity {
    rho: [Option<f64>; 3],
}

impl ConstantDensity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the density of one phase.
    pub fn with_phase(mut self, phase: Phase, rho: Density) -> Self {
        self.rho[phase.index()] = Some(rho.value);
        self
    }
}

impl DensityModel for ConstantDensity {
    fn name(&self) -> &'static str {
        "ConstantDensity"
    }

    fn density(&self, phase: Phase, _press: f64, _mixing: MixingRatios) -> PropsResult<f64> {
        let rho = self.rho[phase.index()].ok_or(PropsError::UndefinedPhase {
            phase,
            model: self.name(),
        })?;
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn is_incompressible(&self) -> bool {
        true
    }
}

/// Reference state of one phase in a [`CompressibleDensity`] model.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompressiblePhase {
    /// Density at `ref_pressure` with no mixing [kg/m³].
    pub ref_density: f64,
    /// Isothermal compressibility [1/Pa].
    pub compressibility: f64,
    /// Reference pressure [Pa].
    pub ref_pressure: f64,
}

impl CompressiblePhase {
    pub fn new(ref_density: Density, compressibility: f64, ref_pressure: Pressure) -> Self {
        Self {
            ref_density: ref_density.value,
            compressibility,
            ref_pressure: ref_pressure.value,
        }
    }
}

/// Slightly compressible fluids.
///
/// ```text
/// ρ(p) = (ρ_ref + mixing) · exp(c · (p − p_ref))
/// ```
///
/// Oil picks up `rs · ρ_gas,ref` of dissolved gas, gas picks up
/// `rv · ρ_oil,ref` of vaporised oil. Water never mixes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompressibleDensity {
    phases: [Option<CompressiblePhase>; 3],
}

impl CompressibleDensity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_phase(mut self, phase: Phase, phase_def: CompressiblePhase) -> Self {
        self.phases[phase.index()] = Some(phase_def);
        self
    }

    fn phase_def(&self, phase: Phase) -> PropsResult<&CompressiblePhase> {
        self.phases[phase.index()]
            .as_ref()
            .ok_or(PropsError::UndefinedPhase {
                phase,
                model: self.name(),
            })
    }

    fn ref_density_or_zero(&self, phase: Phase) -> f64 {
        self.phases[phase.index()].map_or(0.0, |s| s.ref_density)
    }
}

impl DensityModel for CompressibleDensity {
    fn name(&self) -> &'static str {
        "CompressibleDensity"
    }

    fn density(&self, phase: Phase, press: f64, mixing: MixingRatios) -> PropsResult<f64> {
        let phase_def = self.phase_def(phase)?;
        let mixed = match phase {
            Phase::Aqua => 0.0,
            Phase::Liquid => mixing.rs * self.ref_density_or_zero(Phase::Vapour),
            Phase::Vapour => mixing.rv * self.ref_density_or_zero(Phase::Liquid),
        };
        let rho = (phase_def.ref_density + mixed)
            * (phase_def.compressibility * (press - phase_def.ref_pressure)).exp();
        validation::validate_density(rho)?;
        Ok(rho)
    }

    fn is_incompressible(&self) -> bool {
        self.phases
            .iter()
            .flatten()
            .all(|phase_def| phase_def.compressibility == 0.0)
    }
}

/// Validation helpers for property values.
pub(crate) mod validation {
    use super::*;

    /// Ensure density is positive and finite.
    pub fn validate_density(rho: f64) -> PropsResult<()> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PropsError::NonPhysical {
                what: "density must be positive and finite",
                value: rho,
            });
        }
        Ok(())
    }

    /// Ensure a saturation lies in [0, 1].
    pub fn validate_saturation(s: f64, what: &'static str) -> PropsResult<()> {
        if !(0.0..=1.0).contains(&s) {
            return Err(PropsError::NonPhysical { what, value: s });
        }
        Ok(())
    }
}
