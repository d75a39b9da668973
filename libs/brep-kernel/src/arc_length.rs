//! # Arc-Length Integration
//!
//! Numeric arc length and its inversion for parametric curves.
//!
//! Length is the integral of `|d1(u)|`, computed with adaptive Simpson
//! quadrature. Inversion (length → parameter) runs Newton iterations with a
//! maintained bracket and falls back to bisection whenever a Newton step
//! leaves the bracket or the speed vanishes. Both are bounded by the limits
//! in [`config::constants`]; exceeding them surfaces
//! [`KernelError::NumericConvergence`].

use crate::curve::ParamCurve;
use crate::error::KernelError;
use config::constants::{
    ARC_LENGTH_MAX_ITERATIONS, ARC_LENGTH_TOLERANCE, EPSILON, INTEGRATION_MAX_DEPTH,
};

/// Curve speed `|d1|` at parameter `u`.
fn speed<C: ParamCurve + ?Sized>(curve: &C, u: f64) -> f64 {
    curve.derivatives_at(u).0.length()
}

/// Simpson's rule over `[a, b]` given the three sampled speeds.
fn simpson(fa: f64, fm: f64, fb: f64, h: f64) -> f64 {
    (fa + 4.0 * fm + fb) * h / 6.0
}

/// Arc length of `curve` between parameters `a` and `b`.
///
/// Returns 0 when `b <= a`. Exact for constant-speed curves (lines, circles)
/// and converges to [`ARC_LENGTH_TOLERANCE`] otherwise.
pub fn length_between<C: ParamCurve + ?Sized>(curve: &C, a: f64, b: f64) -> f64 {
    if b - a <= EPSILON {
        return 0.0;
    }
    let m = 0.5 * (a + b);
    let fa = speed(curve, a);
    let fm = speed(curve, m);
    let fb = speed(curve, b);
    let whole = simpson(fa, fm, fb, b - a);
    adaptive(curve, a, b, fa, fm, fb, whole, ARC_LENGTH_TOLERANCE, 0)
}

#[allow(clippy::too_many_arguments)]
fn adaptive<C: ParamCurve + ?Sized>(
    curve: &C,
    a: f64,
    b: f64,
    fa: f64,
    fm: f64,
    fb: f64,
    whole: f64,
    eps: f64,
    depth: u32,
) -> f64 {
    let m = 0.5 * (a + b);
    let lm = 0.5 * (a + m);
    let rm = 0.5 * (m + b);
    let flm = speed(curve, lm);
    let frm = speed(curve, rm);
    let left = simpson(fa, flm, fm, m - a);
    let right = simpson(fm, frm, fb, b - m);
    let delta = left + right - whole;
    if depth >= INTEGRATION_MAX_DEPTH || delta.abs() <= 15.0 * eps {
        return left + right + delta / 15.0;
    }
    adaptive(curve, a, m, fa, flm, fm, left, eps * 0.5, depth + 1)
        + adaptive(curve, m, b, fm, frm, fb, right, eps * 0.5, depth + 1)
}

/// Parameter `p` in `[a, b]` such that the arc length from `a` to `p`
/// equals `target`.
///
/// `total` is the precomputed length of `[a, b]`; targets outside
/// `[0, total]` (beyond tolerance) are not resolvable inside the range and
/// fail immediately.
///
/// # Errors
///
/// [`KernelError::NumericConvergence`] when the target is out of range or
/// the iteration budget is exhausted.
pub fn param_at_length<C: ParamCurve + ?Sized>(
    curve: &C,
    a: f64,
    b: f64,
    target: f64,
    total: f64,
) -> Result<f64, KernelError> {
    let tol = ARC_LENGTH_TOLERANCE * total.max(1.0);
    if target < -tol || target > total + tol {
        return Err(KernelError::NumericConvergence {
            target,
            residual: if target < 0.0 { target } else { target - total },
            iterations: 0,
        });
    }
    let target = target.clamp(0.0, total);
    if target <= tol {
        return Ok(a);
    }
    if total - target <= tol {
        return Ok(b);
    }

    // Newton with a maintained bracket; bisect when a step escapes it.
    let mut lo = a;
    let mut hi = b;
    let mut p = a + (b - a) * (target / total);
    let mut residual = length_between(curve, a, p) - target;
    for _ in 0..ARC_LENGTH_MAX_ITERATIONS {
        if residual.abs() <= tol {
            return Ok(p);
        }
        if residual > 0.0 {
            hi = p;
        } else {
            lo = p;
        }
        let v = speed(curve, p);
        let mut next = if v > EPSILON { p - residual / v } else { f64::NAN };
        if !next.is_finite() || next <= lo || next >= hi {
            next = 0.5 * (lo + hi);
        }
        p = next;
        residual = length_between(curve, a, p) - target;
    }
    Err(KernelError::NumericConvergence {
        target,
        residual,
        iterations: ARC_LENGTH_MAX_ITERATIONS,
    })
}
