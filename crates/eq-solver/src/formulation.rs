//! Choice of the primary pressure reported with the initial state.

use eq_props::{Phase, PhaseUsage};

use crate::error::{SolverError, SolverResult};
use crate::field::PhaseField;

/// Which pressure represents a cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressureFormulation {
    /// Water pressure.
    Wetting,
    /// Oil pressure.
    #[default]
    NonWetting,
    /// Saturation-weighted mean of the phase pressures.
    Global,
}

impl PressureFormulation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressureFormulation::Wetting => "wetting",
            PressureFormulation::NonWetting => "non-wetting",
            PressureFormulation::Global => "global",
        }
    }

    /// Check the formulation can be evaluated for `usage`.
    pub fn validate(&self, usage: &PhaseUsage) -> SolverResult<()> {
        let needed = match self {
            PressureFormulation::Wetting => Phase::Aqua,
            PressureFormulation::NonWetting | PressureFormulation::Global => Phase::Liquid,
        };
        if usage.is_active(needed) {
            Ok(())
        } else {
            Err(SolverError::config(format!(
                "{} pressure formulation needs an active {} phase",
                self.as_str(),
                needed
            )))
        }
    }

    /// Primary pressure of every cell.
    pub fn primary_pressure(
        &self,
        usage: &PhaseUsage,
        pressures: &PhaseField,
        saturations: &PhaseField,
    ) -> SolverResult<Vec<f64>> {
        self.validate(usage)?;
        let pick = |phase: Phase| -> SolverResult<Vec<f64>> {
            usage
                .position(phase)
                .map(|pos| pressures.phase(pos).to_vec())
                .ok_or_else(|| SolverError::config(format!("phase {} is not active", phase)))
        };

        match self {
            PressureFormulation::Wetting => pick(Phase::Aqua),
            PressureFormulation::NonWetting => pick(Phase::Liquid),
            PressureFormulation::Global => {
                let mut mean = vec![0.0; pressures.num_cells()];
                for pos in 0..usage.num_phases() {
                    let p = pressures.phase(pos);
                    let s = saturations.phase(pos);
                    for (cell, total) in mean.iter_mut().enumerate() {
                        *total += s[cell] * p[cell];
                    }
                }
                Ok(mean)
            }
        }
    }
}

impl std::fmt::Display for PressureFormulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> (PhaseField, PhaseField) {
        let mut p = PhaseField::new(2, 1);
        p.set(0, 0, 100.0);
        p.set(1, 0, 110.0);
        let mut s = PhaseField::new(2, 1);
        s.set(0, 0, 0.25);
        s.set(1, 0, 0.75);
        (p, s)
    }

    #[test]
    fn non_wetting_is_default_and_picks_oil() {
        let (p, s) = fields();
        let usage = PhaseUsage::water_oil();
        let primary = PressureFormulation::default()
            .primary_pressure(&usage, &p, &s)
            .unwrap();
        assert_eq!(primary, vec![110.0]);
    }

    #[test]
    fn wetting_picks_water() {
        let (p, s) = fields();
        let usage = PhaseUsage::water_oil();
        let primary = PressureFormulation::Wetting
            .primary_pressure(&usage, &p, &s)
            .unwrap();
        assert_eq!(primary, vec![100.0]);
    }

    #[test]
    fn global_is_saturation_weighted() {
        let (p, s) = fields();
        let usage = PhaseUsage::water_oil();
        let primary = PressureFormulation::Global
            .primary_pressure(&usage, &p, &s)
            .unwrap();
        assert!((primary[0] - 107.5).abs() < 1e-12);
    }

    #[test]
    fn wetting_needs_water() {
        let err = PressureFormulation::Wetting
            .validate(&PhaseUsage::oil_gas())
            .unwrap_err();
        assert!(err.is_config());
    }
}
