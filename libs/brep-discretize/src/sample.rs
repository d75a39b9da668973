//! # Curve Sampling
//!
//! Point generation along anything that implements
//! [`ParamCurve`](brep_kernel::ParamCurve) — bare curves in tests, whole
//! wires through [`WireAdaptor`](brep_kernel::WireAdaptor) in the public
//! API.
//!
//! Two division families exist and are genuinely different: uniform steps in
//! the curve's **native parameter** (fast, density follows parametrization)
//! and uniform steps in **arc length** (each sample located by numeric
//! inversion). The pattern walk additionally never clamps its accumulator:
//! once accumulated length passes the curve's end it extrapolates with the
//! same derivative-based evaluation and emits one overshoot sample for
//! downstream trimming.

use crate::error::DiscretizeError;
use brep_kernel::ParamCurve;
use config::constants::{ARC_LENGTH_TOLERANCE, EPSILON, ZERO_LENGTH_TOLERANCE};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// One point sampled from a curve, with its source coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Position in world space.
    pub position: DVec3,
    /// Curve parameter the position was evaluated at.
    pub source_param: f64,
    /// Arc length from the curve start to the position.
    pub source_length: f64,
}

/// Total length of `curve`, or a degenerate-geometry error when it has none.
fn measured<C: ParamCurve>(curve: &C) -> Result<f64, DiscretizeError> {
    let total = curve.length();
    if total <= ZERO_LENGTH_TOLERANCE {
        return Err(DiscretizeError::degenerate(format!(
            "Curve has no usable length ({total})"
        )));
    }
    Ok(total)
}

/// Sample at an arc length that may lie past the curve's nominal end.
///
/// In-range lengths go through the inverse integrator; out-of-range lengths
/// convert the excess to a parameter offset via the end speed and evaluate
/// with the curve's own (extrapolating) formulas.
fn sample_at_length<C: ParamCurve>(
    curve: &C,
    length: f64,
    total: f64,
) -> Result<Sample, DiscretizeError> {
    let tol = ARC_LENGTH_TOLERANCE * total.max(1.0);
    if length <= total + tol {
        let param = curve.length_to_param(length.min(total))?;
        return Ok(Sample {
            position: curve.value_at(param),
            source_param: param,
            source_length: length.min(total),
        });
    }
    let end = curve.last_param();
    let (d1, _, _) = curve.derivatives_at(end);
    let speed = d1.length();
    if speed <= EPSILON {
        return Err(DiscretizeError::degenerate(
            "Cannot extrapolate past a stationary curve end",
        ));
    }
    let param = end + (length - total) / speed;
    Ok(Sample {
        position: curve.value_at(param),
        source_param: param,
        source_length: length,
    })
}

fn trim_ends(mut samples: Vec<Sample>, remove_start: bool, remove_end: bool) -> Vec<Sample> {
    if remove_end && !samples.is_empty() {
        samples.pop();
    }
    if remove_start && !samples.is_empty() {
        samples.remove(0);
    }
    samples
}

/// Divides a curve into `n` spans of uniform **native parameter**, returning
/// the `n + 1` boundary samples (before optional end trimming).
///
/// # Errors
///
/// [`DiscretizeError::InvalidArgument`] for `n == 0`,
/// [`DiscretizeError::DegenerateGeometry`] for a zero-length curve.
pub fn divide_by_params<C: ParamCurve>(
    curve: &C,
    n: usize,
    remove_start: bool,
    remove_end: bool,
) -> Result<Vec<Sample>, DiscretizeError> {
    if n == 0 {
        return Err(DiscretizeError::invalid_argument(
            "Division count must be positive",
        ));
    }
    measured(curve)?;
    let first = curve.first_param();
    let span = curve.last_param() - first;
    let mut samples = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let u = first + span * (i as f64 / n as f64);
        samples.push(Sample {
            position: curve.value_at(u),
            source_param: u,
            source_length: curve.param_to_length(u),
        });
    }
    Ok(trim_ends(samples, remove_start, remove_end))
}

/// Divides a curve into `n` spans of uniform **arc length**, returning the
/// `n + 1` boundary samples (before optional end trimming). For closed
/// curves the first and last sample coincide.
///
/// # Errors
///
/// Same as [`divide_by_params`], plus
/// [`DiscretizeError::NumericConvergence`] when inversion fails.
pub fn divide_by_equal_distance<C: ParamCurve>(
    curve: &C,
    n: usize,
    remove_start: bool,
    remove_end: bool,
) -> Result<Vec<Sample>, DiscretizeError> {
    if n == 0 {
        return Err(DiscretizeError::invalid_argument(
            "Division count must be positive",
        ));
    }
    let total = measured(curve)?;
    let mut samples = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let s = total * (i as f64 / n as f64);
        let param = curve.length_to_param(s)?;
        samples.push(Sample {
            position: curve.value_at(param),
            source_param: param,
            source_length: s,
        });
    }
    Ok(trim_ends(samples, remove_start, remove_end))
}

/// Maps explicit arc-length offsets to samples, preserving input order.
///
/// Empty input yields empty output. Offsets outside the curve fail with
/// [`DiscretizeError::NumericConvergence`].
pub fn points_at_lengths<C: ParamCurve>(
    curve: &C,
    lengths: &[f64],
) -> Result<Vec<Sample>, DiscretizeError> {
    if lengths.is_empty() {
        return Ok(Vec::new());
    }
    measured(curve)?;
    lengths
        .iter()
        .map(|&s| {
            let param = curve.length_to_param(s)?;
            Ok(Sample {
                position: curve.value_at(param),
                source_param: param,
                source_length: s,
            })
        })
        .collect()
}

/// Walks the curve in fixed-length increments from its start.
///
/// Emits one sample per full step strictly inside the curve.
/// `include_first`/`include_last` add the boundary samples; `try_next` emits
/// the first overshooting step as an extrapolated sample instead of
/// discarding it.
///
/// # Errors
///
/// [`DiscretizeError::InvalidArgument`] for a non-positive step.
pub fn points_at_equal_length<C: ParamCurve>(
    curve: &C,
    step: f64,
    try_next: bool,
    include_first: bool,
    include_last: bool,
) -> Result<Vec<Sample>, DiscretizeError> {
    if step <= 0.0 {
        return Err(DiscretizeError::invalid_argument(format!(
            "Step length must be positive: {step}"
        )));
    }
    let total = measured(curve)?;
    let tol = ARC_LENGTH_TOLERANCE * total.max(1.0);
    let mut samples = Vec::new();
    if include_first {
        samples.push(sample_at_length(curve, 0.0, total)?);
    }
    let mut k = 1u64;
    loop {
        let s = step * k as f64;
        if s >= total - tol {
            if try_next {
                samples.push(sample_at_length(curve, s, total)?);
            }
            break;
        }
        samples.push(sample_at_length(curve, s, total)?);
        k += 1;
    }
    if include_last {
        samples.push(sample_at_length(curve, total, total)?);
    }
    Ok(samples)
}

/// Walks the curve by a cyclically repeated pattern of lengths.
///
/// The accumulator never resets and is never clamped to the curve's total
/// length: the first cumulative offset past the end produces one
/// extrapolated overshoot sample (gated by `try_next`) and terminates the
/// walk. Downstream consumers trim the overshoot.
///
/// # Errors
///
/// [`DiscretizeError::InvalidArgument`] for an empty pattern or a
/// non-positive entry.
pub fn points_at_pattern_of_lengths<C: ParamCurve>(
    curve: &C,
    pattern: &[f64],
    include_first: bool,
    include_last: bool,
    try_next: bool,
) -> Result<Vec<Sample>, DiscretizeError> {
    if pattern.is_empty() {
        return Err(DiscretizeError::invalid_argument(
            "Pattern must contain at least one length",
        ));
    }
    if let Some(&bad) = pattern.iter().find(|&&l| l <= 0.0) {
        return Err(DiscretizeError::invalid_argument(format!(
            "Pattern lengths must be positive: {bad}"
        )));
    }
    let total = measured(curve)?;
    let tol = ARC_LENGTH_TOLERANCE * total.max(1.0);
    let mut samples = Vec::new();
    if include_first {
        samples.push(sample_at_length(curve, 0.0, total)?);
    }
    let mut accumulated = 0.0;
    let mut i = 0usize;
    loop {
        accumulated += pattern[i % pattern.len()];
        i += 1;
        if accumulated >= total - tol {
            if try_next {
                samples.push(sample_at_length(curve, accumulated, total)?);
            }
            break;
        }
        samples.push(sample_at_length(curve, accumulated, total)?);
    }
    if include_last {
        samples.push(sample_at_length(curve, total, total)?);
    }
    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brep_kernel::Curve3;

    fn circle(radius: f64) -> Curve3 {
        Curve3::circle(DVec3::ZERO, DVec3::Z, radius).unwrap()
    }

    fn diagonal() -> Curve3 {
        Curve3::line(DVec3::ZERO, DVec3::new(6.0, 8.0, 0.0)).unwrap()
    }

    #[test]
    fn test_divide_by_params_counts() {
        let line = diagonal();
        assert_eq!(divide_by_params(&line, 4, false, false).unwrap().len(), 5);
        assert_eq!(divide_by_params(&line, 4, true, true).unwrap().len(), 3);
        assert_eq!(divide_by_params(&line, 4, true, false).unwrap().len(), 4);
    }

    #[test]
    fn test_divide_by_params_zero_rejected() {
        let line = diagonal();
        assert!(matches!(
            divide_by_params(&line, 0, false, false),
            Err(DiscretizeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_divide_closed_curve_ends_coincide() {
        let samples = divide_by_equal_distance(&circle(5.0), 8, false, false).unwrap();
        assert_eq!(samples.len(), 9);
        let first = samples.first().unwrap().position;
        let last = samples.last().unwrap().position;
        assert!(first.distance(last) < 1e-6);
    }

    #[test]
    fn test_equal_distance_steps_are_uniform() {
        let bezier = Curve3::bezier([
            DVec3::ZERO,
            DVec3::new(0.0, 3.0, 0.0),
            DVec3::new(3.0, 3.0, 0.0),
            DVec3::new(3.0, 0.0, 0.0),
        ]);
        let samples = divide_by_equal_distance(&bezier, 10, false, false).unwrap();
        let step = samples[1].source_length - samples[0].source_length;
        for pair in samples.windows(2) {
            let d = pair[1].source_length - pair[0].source_length;
            assert!((d - step).abs() < 1e-9);
        }
    }

    #[test]
    fn test_points_at_lengths_preserves_order() {
        let line = diagonal();
        let samples = points_at_lengths(&line, &[5.0, 1.0, 9.0]).unwrap();
        let lengths: Vec<f64> = samples.iter().map(|s| s.source_length).collect();
        assert_eq!(lengths, vec![5.0, 1.0, 9.0]);
    }

    #[test]
    fn test_points_at_lengths_empty() {
        let line = diagonal();
        assert!(points_at_lengths(&line, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_points_at_lengths_out_of_range() {
        let line = diagonal(); // length 10
        assert!(matches!(
            points_at_lengths(&line, &[11.0]),
            Err(DiscretizeError::NumericConvergence { .. })
        ));
    }

    #[test]
    fn test_equal_length_walk_boundaries() {
        let line = diagonal(); // length 10
        let inner = points_at_equal_length(&line, 3.0, false, false, false).unwrap();
        assert_eq!(inner.len(), 3); // 3, 6, 9
        let with_ends = points_at_equal_length(&line, 3.0, false, true, true).unwrap();
        assert_eq!(with_ends.len(), 5);
        assert!((with_ends[0].source_length - 0.0).abs() < 1e-12);
        assert!((with_ends[4].source_length - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_length_try_next_extrapolates() {
        let line = diagonal(); // length 10
        let samples = points_at_equal_length(&line, 4.0, true, false, false).unwrap();
        // 4, 8 in range; 12 extrapolated.
        assert_eq!(samples.len(), 3);
        let overshoot = samples.last().unwrap();
        assert!((overshoot.source_length - 12.0).abs() < 1e-9);
        assert!(overshoot.position.distance(DVec3::new(7.2, 9.6, 0.0)) < 1e-9);
    }

    #[test]
    fn test_pattern_accumulates_without_reset() {
        let line = diagonal(); // length 10
        let samples = points_at_pattern_of_lengths(&line, &[1.0, 2.0], false, false, false).unwrap();
        let lengths: Vec<f64> = samples.iter().map(|s| s.source_length).collect();
        // 1, 3, 4, 6, 7, 9 — the 10th offset terminates the walk.
        assert_eq!(lengths, vec![1.0, 3.0, 4.0, 6.0, 7.0, 9.0]);
    }

    #[test]
    fn test_pattern_overshoot_is_single_extrapolated_sample() {
        let line = diagonal(); // length 10
        let samples = points_at_pattern_of_lengths(&line, &[4.0], false, false, true).unwrap();
        // 4, 8 in range; 12 overshoots and is emitted once.
        assert_eq!(samples.len(), 3);
        assert!((samples[2].source_length - 12.0).abs() < 1e-9);
        assert!(samples[2].position.x > 6.0);
    }

    #[test]
    fn test_pattern_rejects_bad_input() {
        let line = diagonal();
        assert!(matches!(
            points_at_pattern_of_lengths(&line, &[], false, false, false),
            Err(DiscretizeError::InvalidArgument { .. })
        ));
        assert!(matches!(
            points_at_pattern_of_lengths(&line, &[1.0, -1.0], false, false, false),
            Err(DiscretizeError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_degenerate_curve_rejected() {
        // A bezier collapsed to a point has zero length but valid params.
        let degenerate = Curve3::bezier([DVec3::ONE; 4]);
        assert!(matches!(
            divide_by_params(&degenerate, 3, false, false),
            Err(DiscretizeError::DegenerateGeometry { .. })
        ));
    }
}
