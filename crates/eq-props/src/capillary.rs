//! Capillary-pressure curves.

use eq_core::numeric::interp_linear;
use eq_core::units::Pressure;

use crate::error::{PropsError, PropsResult};

/// A capillary-pressure curve `pc(s)` of one phase pair.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CapillaryCurve {
    /// No capillary pressure; sharp contacts.
    #[default]
    Zero,
    /// Piecewise-linear table.
    Table(PcTable),
    /// Brooks-Corey power law.
    BrooksCorey(BrooksCorey),
}

impl CapillaryCurve {
    /// Capillary pressure [Pa] at saturation `s`.
    pub fn eval(&self, s: f64) -> f64 {
        match self {
            CapillaryCurve::Zero => 0.0,
            CapillaryCurve::Table(table) => table.eval(s),
            CapillaryCurve::BrooksCorey(bc) => bc.eval(s),
        }
    }
}

/// Tabulated capillary pressure, linear between rows and constant beyond the
/// end rows.
#[derive(Clone, Debug, PartialEq)]
pub struct PcTable {
    sat: Vec<f64>,
    pc: Vec<f64>,
}

impl PcTable {
    /// Saturations must increase strictly and lie in [0, 1]; pressures must be
    /// monotone (either direction).
    pub fn new(sat: Vec<f64>, pc: Vec<f64>) -> PropsResult<Self> {
        if sat.len() < 2 || sat.len() != pc.len() {
            return Err(PropsError::InvalidTable {
                what: format!(
                    "capillary table needs at least two matching rows (sat={}, pc={})",
                    sat.len(),
                    pc.len()
                ),
            });
        }
        if sat.iter().any(|s| !(0.0..=1.0).contains(s)) {
            return Err(PropsError::InvalidTable {
                what: "capillary table saturations must lie in [0, 1]".to_string(),
            });
        }
        if sat.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PropsError::InvalidTable {
                what: "capillary table saturations must be strictly increasing".to_string(),
            });
        }
        if pc.iter().any(|p| !p.is_finite()) {
            return Err(PropsError::InvalidTable {
                what: "capillary pressures must be finite".to_string(),
            });
        }
        let non_increasing = pc.windows(2).all(|w| w[1] <= w[0]);
        let non_decreasing = pc.windows(2).all(|w| w[1] >= w[0]);
        if !non_increasing && !non_decreasing {
            return Err(PropsError::InvalidTable {
                what: "capillary pressure must be monotone in saturation".to_string(),
            });
        }
        Ok(Self { sat, pc })
    }

    pub fn eval(&self, s: f64) -> f64 {
        interp_linear(&self.sat, &self.pc, s)
    }

    pub fn saturations(&self) -> &[f64] {
        &self.sat
    }

    pub fn pressures(&self) -> &[f64] {
        &self.pc
    }
}

/// Which saturation a curve is written against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaturationArgument {
    /// Wetting-phase saturation (water in water-oil); pc falls as s grows.
    Wetting,
    /// Non-wetting saturation (gas in gas-oil); pc rises as s grows.
    NonWetting,
}

/// Brooks-Corey capillary pressure.
///
/// ```text
/// pc = pe · se^(−1/λ),  capped at pc_max
/// se = (s − s_min) / (s_max − s_min)      wetting argument
/// se = (s_max − s) / (s_max − s_min)      non-wetting argument
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BrooksCorey {
    entry_pressure: f64,
    lambda: f64,
    s_min: f64,
    s_max: f64,
    pc_max: f64,
    argument: SaturationArgument,
}

impl BrooksCorey {
    pub fn new(
        entry_pressure: Pressure,
        lambda: f64,
        s_min: f64,
        s_max: f64,
        pc_max: Pressure,
        argument: SaturationArgument,
    ) -> PropsResult<Self> {
        let entry_pressure = entry_pressure.value;
        let pc_max = pc_max.value;
        if !(entry_pressure > 0.0 && entry_pressure.is_finite()) {
            return Err(PropsError::InvalidArg {
                what: "Brooks-Corey entry pressure must be positive".to_string(),
            });
        }
        if !(lambda > 0.0 && lambda.is_finite()) {
            return Err(PropsError::InvalidArg {
                what: "Brooks-Corey lambda must be positive".to_string(),
            });
        }
        if !(0.0 <= s_min && s_min < s_max && s_max <= 1.0) {
            return Err(PropsError::InvalidArg {
                what: "Brooks-Corey saturation limits must satisfy 0 <= s_min < s_max <= 1"
                    .to_string(),
            });
        }
        if !(pc_max >= entry_pressure && pc_max.is_finite()) {
            return Err(PropsError::InvalidArg {
                what: "Brooks-Corey pc_max must be finite and at least the entry pressure"
                    .to_string(),
            });
        }
        Ok(Self {
            entry_pressure,
            lambda,
            s_min,
            s_max,
            pc_max,
            argument,
        })
    }

    pub fn eval(&self, s: f64) -> f64 {
        let span = self.s_max - self.s_min;
        let se = match self.argument {
            SaturationArgument::Wetting => (s - self.s_min) / span,
            SaturationArgument::NonWetting => (self.s_max - s) / span,
        }
        .clamp(0.0, 1.0);
        if se <= 0.0 {
            return self.pc_max;
        }
        (self.entry_pressure * se.powf(-1.0 / self.lambda)).min(self.pc_max)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use eq_core::units::pa;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn table_eval_stays_monotone(
            steps in prop::collection::vec(0.0_f64..1.0e4, 2..8),
            a in 0.0_f64..1.0,
            b in 0.0_f64..1.0,
        ) {
            let n = steps.len();
            let sat: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
            let mut pc = Vec::with_capacity(n);
            let mut acc = 0.0;
            for step in steps.iter().rev() {
                acc += step;
                pc.push(acc);
            }
            pc.reverse();
            // pc now falls with saturation.
            let table = PcTable::new(sat, pc).unwrap();
            let (lo, hi) = (a.min(b), a.max(b));
            prop_assert!(table.eval(lo) + 1e-6 >= table.eval(hi));
        }

        #[test]
        fn brooks_corey_never_exceeds_cap(s in -0.5_f64..1.5) {
            let bc = BrooksCorey::new(
                pa(1.0e4),
                2.0,
                0.2,
                1.0,
                pa(1.0e6),
                SaturationArgument::Wetting,
            )
            .unwrap();
            let pc = bc.eval(s);
            prop_assert!(pc.is_finite());
            prop_assert!(pc <= 1.0e6);
            prop_assert!(pc >= 1.0e4);
        }
    }
}
