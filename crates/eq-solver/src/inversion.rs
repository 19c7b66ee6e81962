//! Saturation from capillary pressure.
//!
//! Both inversions treat a target outside the curve's range as an end point
//! rather than an error: a cell far above the contact sits at the end point
//! saturation, a cell far below it at the other.

use eq_props::{Phase, SaturationProps};

use crate::error::SolverResult;
use crate::root::{RootConfig, regula_falsi};

/// Monotonicity of a capillary curve in its own saturation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcDirection {
    /// `pc` grows with saturation (gas-oil).
    Increasing,
    /// `pc` falls with saturation (oil-water).
    Decreasing,
}

/// Saturation of `phase` in `cell` at which its capillary pressure equals
/// `target_pc`.
///
/// With `f(s) = pc(s) - target_pc` the search starts from the end point where
/// `pc` is largest (`s_max` when increasing, `s_min` when decreasing):
/// - `f <= 0` there returns that end point,
/// - `f > 0` at the other end returns the other end point,
/// - otherwise the root is found by regula falsi.
pub fn sat_from_pc(
    props: &dyn SaturationProps,
    phase: Phase,
    cell: usize,
    target_pc: f64,
    direction: PcDirection,
) -> SolverResult<f64> {
    let range = props.sat_range(cell)?;
    let (smin, smax) = (range.min(phase), range.max(phase));
    let (s0, s1) = match direction {
        PcDirection::Increasing => (smax, smin),
        PcDirection::Decreasing => (smin, smax),
    };

    let f = |s: f64| -> SolverResult<f64> { Ok(props.cap_press(cell, phase, s)? - target_pc) };

    if f(s0)? <= 0.0 {
        return Ok(s0);
    }
    if f(s1)? > 0.0 {
        return Ok(s1);
    }

    let found = regula_falsi(f, s0, s1, &RootConfig::default())?;
    Ok(found.root.clamp(smin, smax))
}

/// Saturation `s` of `phase1` with `pc1(s) + pc2(1 - s) = target_pc`.
///
/// Used where the gas-oil and oil-water transition zones overlap and oil is
/// squeezed out: with `phase1 = Aqua`, `phase2 = Vapour` the sum is the
/// gas-water capillary pressure `p_g - p_w`. The search runs from `s_min` to
/// `s_max` of `phase1` with the same end point rule as [`sat_from_pc`].
pub fn sat_from_sum_of_pcs(
    props: &dyn SaturationProps,
    phase1: Phase,
    phase2: Phase,
    cell: usize,
    target_pc: f64,
) -> SolverResult<f64> {
    let range = props.sat_range(cell)?;
    let (s0, s1) = (range.min(phase1), range.max(phase1));

    let f = |s: f64| -> SolverResult<f64> {
        let pc1 = props.cap_press(cell, phase1, s)?;
        let pc2 = props.cap_press(cell, phase2, 1.0 - s)?;
        Ok(pc1 + pc2 - target_pc)
    };

    if f(s0)? <= 0.0 {
        return Ok(s0);
    }
    if f(s1)? > 0.0 {
        return Ok(s1);
    }

    let found = regula_falsi(f, s0, s1, &RootConfig::default())?;
    Ok(found.root.clamp(s0, s1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use eq_core::units::pa;
    use eq_props::{
        BrooksCorey, CapillaryCurve, PcTable, PhaseUsage, SatFuncRegion, SaturationArgument,
        SaturationFunctions,
    };

    /// pcow: 2 bar at sw = 0.2 falling linearly to 0 at sw = 1.
    /// pcgo: 0 at sg = 0 rising linearly to 1 bar at sg = 0.8.
    fn props() -> SaturationFunctions {
        let pcow = PcTable::new(vec![0.2, 1.0], vec![2.0e5, 0.0]).unwrap();
        let pcgo = PcTable::new(vec![0.0, 0.8], vec![0.0, 1.0e5]).unwrap();
        let region = SatFuncRegion::new(CapillaryCurve::Table(pcow), CapillaryCurve::Table(pcgo))
            .with_water_range(0.2, 1.0)
            .with_gas_range(0.0, 0.8);
        SaturationFunctions::new(PhaseUsage::three_phase(), vec![region]).unwrap()
    }

    #[test]
    fn decreasing_curve_inverts_inside_range() {
        let props = props();
        let sw = sat_from_pc(&props, Phase::Aqua, 0, 1.0e5, PcDirection::Decreasing).unwrap();
        assert!((sw - 0.6).abs() < 1e-5);
    }

    #[test]
    fn decreasing_curve_clamps_to_end_points() {
        let props = props();
        // Far above the contact: pc larger than anything on the curve.
        let sw = sat_from_pc(&props, Phase::Aqua, 0, 5.0e5, PcDirection::Decreasing).unwrap();
        assert_eq!(sw, 0.2);
        // Below the contact: negative pc.
        let sw = sat_from_pc(&props, Phase::Aqua, 0, -1.0e4, PcDirection::Decreasing).unwrap();
        assert_eq!(sw, 1.0);
    }

    #[test]
    fn increasing_curve_inverts_and_clamps() {
        let props = props();
        let sg = sat_from_pc(&props, Phase::Vapour, 0, 5.0e4, PcDirection::Increasing).unwrap();
        assert!((sg - 0.4).abs() < 1e-5);

        let sg = sat_from_pc(&props, Phase::Vapour, 0, 2.0e5, PcDirection::Increasing).unwrap();
        assert_eq!(sg, 0.8);
        let sg = sat_from_pc(&props, Phase::Vapour, 0, -1.0, PcDirection::Increasing).unwrap();
        assert_eq!(sg, 0.0);
    }

    #[test]
    fn zero_curve_takes_end_point_on_each_side() {
        let region = SatFuncRegion::new(CapillaryCurve::Zero, CapillaryCurve::Zero);
        let props = SaturationFunctions::new(PhaseUsage::three_phase(), vec![region]).unwrap();
        let above = sat_from_pc(&props, Phase::Aqua, 0, 10.0, PcDirection::Decreasing).unwrap();
        let below = sat_from_pc(&props, Phase::Aqua, 0, -10.0, PcDirection::Decreasing).unwrap();
        assert_eq!(above, 0.0);
        assert_eq!(below, 1.0);
    }

    #[test]
    fn sum_of_pcs_matches_combined_curve() {
        let props = props();
        // pcow(sw) + pcgo(1 - sw) for sw in [0.2, 1]:
        //   2e5 (1 - sw) / 0.8 + 1e5 (1 - sw) / 0.8 = 3.75e5 (1 - sw) while 1 - sw <= 0.8.
        let sw = sat_from_sum_of_pcs(&props, Phase::Aqua, Phase::Vapour, 0, 1.5e5).unwrap();
        assert!((sw - 0.6).abs() < 1e-5);
    }

    #[test]
    fn sum_of_pcs_clamps() {
        let props = props();
        let sw = sat_from_sum_of_pcs(&props, Phase::Aqua, Phase::Vapour, 0, 1.0e7).unwrap();
        assert_eq!(sw, 0.2);
        let sw = sat_from_sum_of_pcs(&props, Phase::Aqua, Phase::Vapour, 0, -1.0).unwrap();
        assert_eq!(sw, 1.0);
    }

    /// Brooks-Corey curves with entry pressure 1e3 Pa that blow up toward `pc_max`.
    fn steep_props(lambda: f64, pc_max: f64) -> SaturationFunctions {
        let pcow = BrooksCorey::new(
            pa(1.0e3),
            lambda,
            0.2,
            1.0,
            pa(pc_max),
            SaturationArgument::Wetting,
        )
        .unwrap();
        let pcgo = BrooksCorey::new(
            pa(1.0e3),
            lambda,
            0.0,
            0.8,
            pa(pc_max),
            SaturationArgument::NonWetting,
        )
        .unwrap();
        let region = SatFuncRegion::new(
            CapillaryCurve::BrooksCorey(pcow),
            CapillaryCurve::BrooksCorey(pcgo),
        )
        .with_water_range(0.2, 1.0)
        .with_gas_range(0.0, 0.8);
        SaturationFunctions::new(PhaseUsage::three_phase(), vec![region]).unwrap()
    }

    #[test]
    fn steep_brooks_corey_round_trips() {
        for lambda in [0.3, 0.5, 4.0] {
            for pc_max in [1.0e7, 1.0e8, 1.0e9] {
                let props = steep_props(lambda, pc_max);
                for i in 1..40 {
                    let sg = 0.8 * i as f64 / 40.0;
                    let pc = props.cap_press(0, Phase::Vapour, sg).unwrap();
                    if pc < pc_max {
                        let back =
                            sat_from_pc(&props, Phase::Vapour, 0, pc, PcDirection::Increasing)
                                .unwrap();
                        assert!(
                            (back - sg).abs() < 1e-6,
                            "gas lambda={lambda} pc_max={pc_max} s={sg} back={back}"
                        );
                    }

                    let sw = 0.2 + 0.8 * i as f64 / 40.0;
                    let pc = props.cap_press(0, Phase::Aqua, sw).unwrap();
                    if pc < pc_max {
                        let back =
                            sat_from_pc(&props, Phase::Aqua, 0, pc, PcDirection::Decreasing)
                                .unwrap();
                        assert!(
                            (back - sw).abs() < 1e-6,
                            "water lambda={lambda} pc_max={pc_max} s={sw} back={back}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn steep_sum_of_pcs_round_trips() {
        for lambda in [0.3, 0.5] {
            for pc_max in [1.0e8, 1.0e9] {
                let props = steep_props(lambda, pc_max);
                for i in 1..40 {
                    let sw = 0.2 + 0.8 * i as f64 / 40.0;
                    let pcow = props.cap_press(0, Phase::Aqua, sw).unwrap();
                    let pcgo = props.cap_press(0, Phase::Vapour, 1.0 - sw).unwrap();
                    if pcow >= pc_max || pcgo >= pc_max {
                        continue;
                    }
                    let back =
                        sat_from_sum_of_pcs(&props, Phase::Aqua, Phase::Vapour, 0, pcow + pcgo)
                            .unwrap();
                    assert!(
                        (back - sw).abs() < 1e-6,
                        "lambda={lambda} pc_max={pc_max} s={sw} back={back}"
                    );
                }
            }
        }
    }

    #[test]
    fn inactive_phase_is_an_error() {
        let region = SatFuncRegion::new(CapillaryCurve::Zero, CapillaryCurve::Zero);
        let props = SaturationFunctions::new(PhaseUsage::water_oil(), vec![region]).unwrap();
        assert!(sat_from_pc(&props, Phase::Vapour, 0, 0.0, PcDirection::Increasing).is_err());
    }
}
