//! Mixing policies for the hydrocarbon phases.
//!
//! An equilibration region carries two of these: one for gas dissolved in
//! oil (Rs) and one for oil vaporised in gas (Rv). Both are evaluated along
//! the hydrostatic integration path.

use eq_core::numeric::interp_linear;

use crate::error::{PropsError, PropsResult};

/// Mixing ratio as a function of depth and phase pressure.
pub trait Miscibility: Send + Sync + std::fmt::Debug {
    /// Surface-volume mixing ratio at `depth` [m] and `press` [Pa].
    fn ratio(&self, depth: f64, press: f64) -> f64;

    /// True when `ratio` returns the same value everywhere.
    fn is_constant(&self) -> bool {
        false
    }
}

/// Immiscible phases.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoMixing;

impl Miscibility for NoMixing {
    fn ratio(&self, _depth: f64, _press: f64) -> f64 {
        0.0
    }

    fn is_constant(&self) -> bool {
        true
    }
}

/// Uniform mixing ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantRatio(pub f64);

impl Miscibility for ConstantRatio {
    fn ratio(&self, _depth: f64, _press: f64) -> f64 {
        self.0
    }

    fn is_constant(&self) -> bool {
        true
    }
}

/// Mixing ratio tabulated against depth, linear in between and constant
/// beyond the end points.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthTable {
    depths: Vec<f64>,
    ratios: Vec<f64>,
}

impl DepthTable {
    pub fn new(depths: Vec<f64>, ratios: Vec<f64>) -> PropsResult<Self> {
        if depths.is_empty() || depths.len() != ratios.len() {
            return Err(PropsError::InvalidTable {
                what: format!(
                    "mixing table needs matching non-empty columns (depths={}, ratios={})",
                    depths.len(),
                    ratios.len()
                ),
            });
        }
        if depths.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PropsError::InvalidTable {
                what: "mixing table depths must be strictly increasing".to_string(),
            });
        }
        if ratios.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(PropsError::InvalidTable {
                what: "mixing ratios must be finite and non-negative".to_string(),
            });
        }
        Ok(Self { depths, ratios })
    }
}

impl Miscibility for DepthTable {
    fn ratio(&self, depth: f64, _press: f64) -> f64 {
        interp_linear(&self.depths, &self.ratios, depth)
    }

    fn is_constant(&self) -> bool {
        self.ratios.windows(2).all(|w| w[0] == w[1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_policies_report_constant() {
        assert!(NoMixing.is_constant());
        assert_eq!(NoMixing.ratio(1000.0, 1.0e7), 0.0);
        assert!(ConstantRatio(0.3).is_constant());
        assert_eq!(ConstantRatio(0.3).ratio(0.0, 0.0), 0.3);
    }

    #[test]
    fn depth_table_interpolates() {
        let table = DepthTable::new(vec![1000.0, 2000.0], vec![50.0, 100.0]).unwrap();
        assert!(!table.is_constant());
        assert_eq!(table.ratio(500.0, 0.0), 50.0);
        assert!((table.ratio(1500.0, 0.0) - 75.0).abs() < 1e-12);
        assert_eq!(table.ratio(2500.0, 0.0), 100.0);
    }

    #[test]
    fn depth_table_rejects_unsorted_depths() {
        assert!(DepthTable::new(vec![2000.0, 1000.0], vec![1.0, 2.0]).is_err());
        assert!(DepthTable::new(vec![1000.0], vec![1.0, 2.0]).is_err());
        assert!(DepthTable::new(vec![1000.0], vec![-1.0]).is_err());
    }
}
