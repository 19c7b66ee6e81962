//! Scalar ODE stepping for hydrostatic pressure.

use crate::error::{SolverError, SolverResult};

/// Relative tolerance between successive step-doubling estimates.
///
/// Pressures are expected to be accurate to about 1e-9 relative; the stepper
/// resolves one order of magnitude below that.
pub const ODE_REL_TOL: f64 = 1e-10;

/// Step count of the first estimate on an interval.
const MIN_STEPS: usize = 2;

/// Step count doublings allowed before giving up.
const MAX_DOUBLINGS: u32 = 20;

/// Right-hand side of `dp/dz = f(z, p)`.
pub trait ScalarOde {
    fn rhs(&self, z: f64, p: f64) -> SolverResult<f64>;
}

impl<F> ScalarOde for F
where
    F: Fn(f64, f64) -> SolverResult<f64>,
{
    fn rhs(&self, z: f64, p: f64) -> SolverResult<f64> {
        self(z, p)
    }
}

/// One classical RK4 (Runge-Kutta 4th order) step of size `h`.
pub fn rk4_step<O: ScalarOde + ?Sized>(ode: &O, z: f64, p: f64, h: f64) -> SolverResult<f64> {
    let k1 = ode.rhs(z, p)?;
    let k2 = ode.rhs(z + 0.5 * h, p + 0.5 * h * k1)?;
    let k3 = ode.rhs(z + 0.5 * h, p + 0.5 * h * k2)?;
    let k4 = ode.rhs(z + h, p + h * k3)?;

    // Combine: p_new = p + (h/6) * (k1 + 2*k2 + 2*k3 + k4)
    let p_new = p + h / 6.0 * (k1 + 2.0 * k2 + 2.0 * k3 + k4);
    if !p_new.is_finite() {
        return Err(SolverError::Numeric {
            what: format!("non-finite pressure stepping from z={} (p={}, h={})", z, p, h),
        });
    }
    Ok(p_new)
}

/// Integrate from `(z0, p0)` to `z1` with `steps` equal RK4 steps.
pub fn integrate_fixed<O: ScalarOde + ?Sized>(
    ode: &O,
    z0: f64,
    p0: f64,
    z1: f64,
    steps: usize,
) -> SolverResult<f64> {
    let h = (z1 - z0) / steps as f64;
    let mut p = p0;
    for k in 0..steps {
        p = rk4_step(ode, z0 + k as f64 * h, p, h)?;
    }
    Ok(p)
}

/// Value at the end of an interval and the step count that achieved it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntervalSolution {
    pub value: f64,
    pub steps: usize,
}

/// Integrate from `(z0, p0)` to `z1`, doubling the step count until two
/// successive estimates agree to [`ODE_REL_TOL`].
pub fn integrate_to_tolerance<O: ScalarOde + ?Sized>(
    ode: &O,
    z0: f64,
    p0: f64,
    z1: f64,
) -> SolverResult<IntervalSolution> {
    if z1 == z0 {
        return Ok(IntervalSolution {
            value: p0,
            steps: 0,
        });
    }

    let mut steps = MIN_STEPS;
    let mut prev = integrate_fixed(ode, z0, p0, z1, steps)?;
    for _ in 0..MAX_DOUBLINGS {
        steps *= 2;
        let next = integrate_fixed(ode, z0, p0, z1, steps)?;
        if (next - prev).abs() <= ODE_REL_TOL * next.abs().max(1.0) {
            return Ok(IntervalSolution { value: next, steps });
        }
        prev = next;
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "pressure integration from z={} to z={} did not reach tolerance with {} steps",
            z0, z1, steps
        ),
    })
}
