//! Bracketed scalar root finding.

use crate::error::{SolverError, SolverResult};

/// Root finder configuration.
#[derive(Clone, Copy, Debug)]
pub struct RootConfig {
    /// Hard cap on iterations; exceeding it is an error.
    pub max_iterations: usize,
    /// Absolute tolerance on the root location.
    pub tol: f64,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            max_iterations: 30,
            tol: 1e-6,
        }
    }
}

/// Root finder result.
#[derive(Clone, Copy, Debug)]
pub struct RootResult {
    pub root: f64,
    pub iterations: usize,
}

/// Illinois-modified regula falsi on a sign-changing bracket `[a, b]`.
///
/// Keeps the root bracketed at every step, so flat stretches of `f` near the
/// bracket ends cannot throw the iteration out of range the way Newton can.
/// An iteration whose false-position step leaves more than half the bracket
/// is followed by a bisection step, so the bracket at least halves per
/// iteration. Converged means the bracket is narrower than `config.tol`; the
/// midpoint is returned.
pub fn regula_falsi<F>(mut f: F, a: f64, b: f64, config: &RootConfig) -> SolverResult<RootResult>
where
    F: FnMut(f64) -> SolverResult<f64>,
{
    let (mut s, mut t) = (a.min(b), a.max(b));
    let mut fs = finite(f(s)?, s)?;
    let mut ft = finite(f(t)?, t)?;

    if fs == 0.0 {
        return Ok(RootResult {
            root: s,
            iterations: 0,
        });
    }
    if ft == 0.0 {
        return Ok(RootResult {
            root: t,
            iterations: 0,
        });
    }
    if fs.signum() == ft.signum() {
        return Err(SolverError::ConvergenceFailed {
            what: format!(
                "root not bracketed: f({}) = {}, f({}) = {}",
                s, fs, t, ft
            ),
        });
    }
    if t - s <= config.tol {
        return Ok(RootResult {
            root: 0.5 * (s + t),
            iterations: 0,
        });
    }

    let mut side = 0_i8;
    for iter in 1..=config.max_iterations {
        let width = t - s;

        let x = ((s * ft - t * fs) / (ft - fs)).clamp(s, t);
        let fx = finite(f(x)?, x)?;
        if fx == 0.0 {
            return Ok(RootResult {
                root: x,
                iterations: iter,
            });
        }
        if fx.signum() == ft.signum() {
            t = x;
            ft = fx;
            if side == -1 {
                fs *= 0.5;
            }
            side = -1;
        } else {
            s = x;
            fs = fx;
            if side == 1 {
                ft *= 0.5;
            }
            side = 1;
        }

        // False position stalls next to a steep end; bisect instead.
        if t - s > 0.5 * width {
            let mid = 0.5 * (s + t);
            let fm = finite(f(mid)?, mid)?;
            if fm == 0.0 {
                return Ok(RootResult {
                    root: mid,
                    iterations: iter,
                });
            }
            if fm.signum() == ft.signum() {
                t = mid;
                ft = fm;
            } else {
                s = mid;
                fs = fm;
            }
            side = 0;
        }

        if t - s <= config.tol {
            return Ok(RootResult {
                root: 0.5 * (s + t),
                iterations: iter,
            });
        }
    }

    Err(SolverError::ConvergenceFailed {
        what: format!(
            "regula falsi exceeded {} iterations, bracket [{}, {}]",
            config.max_iterations, s, t
        ),
    })
}

fn finite(v: f64, at: f64) -> SolverResult<f64> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SolverError::Numeric {
            what: format!("non-finite function value {} at {}", v, at),
        })
    }
}
