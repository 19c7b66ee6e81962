//! Equilibration records and per-region parameter bundles.

use std::sync::Arc;

use eq_core::RegionId;
use eq_core::units::{Length, Pressure, m, pa};
use eq_props::{DensityModel, Miscibility, NoMixing, Phase, PhaseUsage};

use crate::error::{SolverError, SolverResult};

/// Datum and fluid contacts of one equilibration region.
///
/// Depth increases downward. Capillary pressures at the contacts follow the
/// saturation-function conventions: `pcow = p_o - p_w`, `pcgo = p_g - p_o`.
#[derive(Clone, Debug, PartialEq)]
pub struct EquilRecord {
    pub datum_depth: Length,
    pub datum_pressure: Pressure,
    pub woc_depth: Length,
    pub pcow_woc: Pressure,
    pub goc_depth: Length,
    pub pcgo_goc: Pressure,
}

impl EquilRecord {
    /// Record with both contacts at the datum and zero contact capillary
    /// pressure.
    pub fn new(datum_depth: Length, datum_pressure: Pressure) -> Self {
        Self {
            datum_depth,
            datum_pressure,
            woc_depth: datum_depth,
            pcow_woc: pa(0.0),
            goc_depth: datum_depth,
            pcgo_goc: pa(0.0),
        }
    }

    /// Convenience constructor from SI values.
    pub fn from_si(datum_depth: f64, datum_pressure: f64) -> Self {
        Self::new(m(datum_depth), pa(datum_pressure))
    }

    pub fn with_woc(mut self, depth: Length, pcow: Pressure) -> Self {
        self.woc_depth = depth;
        self.pcow_woc = pcow;
        self
    }

    pub fn with_goc(mut self, depth: Length, pcgo: Pressure) -> Self {
        self.goc_depth = depth;
        self.pcgo_goc = pcgo;
        self
    }

    /// Check values are finite and the datum lies in the oil zone
    /// (`goc <= datum <= woc`).
    pub fn validate(&self) -> SolverResult<()> {
        let values = [
            ("datum depth", self.datum_depth.value),
            ("datum pressure", self.datum_pressure.value),
            ("water-oil contact depth", self.woc_depth.value),
            ("water-oil contact capillary pressure", self.pcow_woc.value),
            ("gas-oil contact depth", self.goc_depth.value),
            ("gas-oil contact capillary pressure", self.pcgo_goc.value),
        ];
        for (what, value) in values {
            if !value.is_finite() {
                return Err(SolverError::config(format!(
                    "{} must be finite, got {}",
                    what, value
                )));
            }
        }

        let datum = self.datum_depth.value;
        if datum < self.goc_depth.value || datum > self.woc_depth.value {
            return Err(SolverError::config(format!(
                "the datum depth must be in the oil zone (goc={}, datum={}, woc={})",
                self.goc_depth.value, datum, self.woc_depth.value
            )));
        }
        Ok(())
    }
}

/// Everything needed to equilibrate one region.
///
/// Built once per region by the driver and then read-only; all depth and
/// pressure accessors return SI values.
#[derive(Clone, Debug)]
pub struct EquilRegion<'a> {
    id: RegionId,
    record: EquilRecord,
    density: &'a dyn DensityModel,
    dissolution: Arc<dyn Miscibility>,
    evaporation: Arc<dyn Miscibility>,
    usage: &'a PhaseUsage,
}

impl<'a> EquilRegion<'a> {
    pub fn builder(
        id: RegionId,
        record: EquilRecord,
        density: &'a dyn DensityModel,
        usage: &'a PhaseUsage,
    ) -> EquilRegionBuilder<'a> {
        EquilRegionBuilder {
            id,
            record,
            density,
            usage,
            dissolution: None,
            evaporation: None,
        }
    }

    pub fn id(&self) -> RegionId {
        self.id
    }

    pub fn record(&self) -> &EquilRecord {
        &self.record
    }

    pub fn density(&self) -> &dyn DensityModel {
        self.density
    }

    pub fn dissolution(&self) -> &dyn Miscibility {
        self.dissolution.as_ref()
    }

    pub fn evaporation(&self) -> &dyn Miscibility {
        self.evaporation.as_ref()
    }

    pub fn usage(&self) -> &PhaseUsage {
        self.usage
    }

    pub fn datum(&self) -> f64 {
        self.record.datum_depth.value
    }

    pub fn pressure(&self) -> f64 {
        self.record.datum_pressure.value
    }

    pub fn zwoc(&self) -> f64 {
        self.record.woc_depth.value
    }

    pub fn pcow_woc(&self) -> f64 {
        self.record.pcow_woc.value
    }

    pub fn zgoc(&self) -> f64 {
        self.record.goc_depth.value
    }

    pub fn pcgo_goc(&self) -> f64 {
        self.record.pcgo_goc.value
    }

    /// True when phase densities cannot vary along the column, so pressures
    /// are linear in depth.
    pub fn is_incompressible(&self) -> bool {
        self.density.is_incompressible()
            && self.dissolution.is_constant()
            && self.evaporation.is_constant()
    }
}

/// Builder for [`EquilRegion`]. Mixing policies default to [`NoMixing`].
pub struct EquilRegionBuilder<'a> {
    id: RegionId,
    record: EquilRecord,
    density: &'a dyn DensityModel,
    usage: &'a PhaseUsage,
    dissolution: Option<Arc<dyn Miscibility>>,
    evaporation: Option<Arc<dyn Miscibility>>,
}

impl<'a> EquilRegionBuilder<'a> {
    /// Dissolved gas-oil ratio policy.
    pub fn dissolution(mut self, policy: Arc<dyn Miscibility>) -> Self {
        self.dissolution = Some(policy);
        self
    }

    /// Vaporised oil-gas ratio policy.
    pub fn evaporation(mut self, policy: Arc<dyn Miscibility>) -> Self {
        self.evaporation = Some(policy);
        self
    }

    pub fn build(self) -> SolverResult<EquilRegion<'a>> {
        if !self.usage.is_active(Phase::Liquid) {
            return Err(SolverError::config(
                "oil must be active: not handling water-gas cases",
            ));
        }
        self.record.validate()?;

        Ok(EquilRegion {
            id: self.id,
            record: self.record,
            density: self.density,
            dissolution: self.dissolution.unwrap_or_else(|| Arc::new(NoMixing)),
            evaporation: self.evaporation.unwrap_or_else(|| Arc::new(NoMixing)),
            usage: self.usage,
        })
    }
}
