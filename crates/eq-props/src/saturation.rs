//! Saturation end points and capillary pressure per cell.

use crate::capillary::CapillaryCurve;
use crate::density::validation::validate_saturation;
use crate::error::{PropsError, PropsResult};
use crate::phase::{Phase, PhaseUsage};

/// Lowest and highest attainable saturation of every phase in one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SatRange {
    min: [f64; 3],
    max: [f64; 3],
}

impl SatRange {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Self { min, max }
    }

    pub fn min(&self, phase: Phase) -> f64 {
        self.min[phase.index()]
    }

    pub fn max(&self, phase: Phase) -> f64 {
        self.max[phase.index()]
    }
}

/// Saturation-function access needed by equilibration.
///
/// Capillary pressure sign convention, per phase argument:
/// - `Aqua`: `pc_ow(s_w) = p_o − p_w`, typically decreasing in `s_w`
/// - `Vapour`: `pc_go(s_g) = p_g − p_o`, typically increasing in `s_g`
/// - `Liquid`: always zero (oil is the reference phase)
pub trait SaturationProps: Send + Sync {
    fn phase_usage(&self) -> &PhaseUsage;

    /// Saturation end points of `cell`.
    fn sat_range(&self, cell: usize) -> PropsResult<SatRange>;

    /// Capillary pressure [Pa] of `phase` against oil at saturation `sat`.
    fn cap_press(&self, cell: usize, phase: Phase, sat: f64) -> PropsResult<f64>;
}

/// Saturation functions of one saturation region.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SatFuncRegion {
    pub water_oil: CapillaryCurve,
    pub gas_oil: CapillaryCurve,
    pub swmin: f64,
    pub swmax: f64,
    pub sgmin: f64,
    pub sgmax: f64,
}

impl SatFuncRegion {
    pub fn new(water_oil: CapillaryCurve, gas_oil: CapillaryCurve) -> Self {
        Self {
            water_oil,
            gas_oil,
            swmin: 0.0,
            swmax: 1.0,
            sgmin: 0.0,
            sgmax: 1.0,
        }
    }

    pub fn with_water_range(mut self, swmin: f64, swmax: f64) -> Self {
        self.swmin = swmin;
        self.swmax = swmax;
        self
    }

    pub fn with_gas_range(mut self, sgmin: f64, sgmax: f64) -> Self {
        self.sgmin = sgmin;
        self.sgmax = sgmax;
        self
    }

    fn validate(&self) -> PropsResult<()> {
        validate_saturation(self.swmin, "swmin must lie in [0, 1]")?;
        validate_saturation(self.swmax, "swmax must lie in [0, 1]")?;
        validate_saturation(self.sgmin, "sgmin must lie in [0, 1]")?;
        validate_saturation(self.sgmax, "sgmax must lie in [0, 1]")?;
        if self.swmin > self.swmax || self.sgmin > self.sgmax {
            return Err(PropsError::InvalidArg {
                what: "saturation minimum exceeds maximum".to_string(),
            });
        }
        Ok(())
    }

    /// End points with inactive phases pinned to zero. Oil takes what the
    /// other active phases leave.
    fn range(&self, usage: &PhaseUsage) -> SatRange {
        let (swmin, swmax) = if usage.is_active(Phase::Aqua) {
            (self.swmin, self.swmax)
        } else {
            (0.0, 0.0)
        };
        let (sgmin, sgmax) = if usage.is_active(Phase::Vapour) {
            (self.sgmin, self.sgmax)
        } else {
            (0.0, 0.0)
        };
        let somin = (1.0 - swmax - sgmax).max(0.0);
        let somax = (1.0 - swmin - sgmin).clamp(0.0, 1.0);
        SatRange::new([swmin, somin, sgmin], [swmax, somax, sgmax])
    }
}

/// Default [`SaturationProps`] backend: per-region curves plus an optional
/// cell -> saturation region map (absent means region 0 everywhere).
#[derive(Clone, Debug)]
pub struct SaturationFunctions {
    usage: PhaseUsage,
    regions: Vec<SatFuncRegion>,
    satnum: Option<Vec<usize>>,
}

impl SaturationFunctions {
    pub fn new(usage: PhaseUsage, regions: Vec<SatFuncRegion>) -> PropsResult<Self> {
        if regions.is_empty() {
            return Err(PropsError::InvalidArg {
                what: "at least one saturation region is required".to_string(),
            });
        }
        for region in &regions {
            region.validate()?;
        }
        Ok(Self {
            usage,
            regions,
            satnum: None,
        })
    }

    pub fn with_satnum(mut self, satnum: Vec<usize>) -> PropsResult<Self> {
        if let Some(&bad) = satnum.iter().find(|&&r| r >= self.regions.len()) {
            return Err(PropsError::RegionOutOfRange {
                what: "saturation",
                region: bad,
                count: self.regions.len(),
            });
        }
        self.satnum = Some(satnum);
        Ok(self)
    }

    fn region(&self, cell: usize) -> PropsResult<&SatFuncRegion> {
        let r = match &self.satnum {
            None => 0,
            Some(satnum) => *satnum.get(cell).ok_or(PropsError::InvalidArg {
                what: format!("cell {} has no saturation region", cell),
            })?,
        };
        Ok(&self.regions[r])
    }
}

impl SaturationProps for SaturationFunctions {
    fn phase_usage(&self) -> &PhaseUsage {
        &self.usage
    }

    fn sat_range(&self, cell: usize) -> PropsResult<SatRange> {
        Ok(self.region(cell)?.range(&self.usage))
    }

    fn cap_press(&self, cell: usize, phase: Phase, sat: f64) -> PropsResult<f64> {
        if !self.usage.is_active(phase) {
            return Err(PropsError::InactivePhase { phase });
        }
        let region = self.region(cell)?;
        let pc = match phase {
            Phase::Aqua => region.water_oil.eval(sat),
            Phase::Liquid => 0.0,
            Phase::Vapour => region.gas_oil.eval(sat),
        };
        if !pc.is_finite() {
            return Err(PropsError::NonPhysical {
                what: "capillary pressure must be finite",
                value: pc,
            });
        }
        Ok(pc)
    }
}
