//! # Parametric Curves
//!
//! 3D curve evaluation for the discretization pipeline. [`Curve3`] is the
//! kernel's curve representation; [`ParamCurve`] is the trait seam the
//! sampler works through, so a bare curve and a whole wire (via
//! `WireAdaptor`) are sampled by the same code.
//!
//! Evaluation outside the nominal parameter range is permitted and uses the
//! same formulas, so callers that walk past the end of a curve extrapolate
//! smoothly instead of clamping.

use crate::arc_length;
use crate::error::KernelError;
use config::constants::POINT_COINCIDENCE_TOLERANCE;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Common evaluation surface for anything parametrized over an interval.
///
/// Implemented by [`Curve3`] and by `WireAdaptor`, which presents a whole
/// wire as one curve over a concatenated parameter space.
pub trait ParamCurve {
    /// Evaluates the curve position at parameter `u`.
    fn value_at(&self, u: f64) -> DVec3;

    /// Evaluates the first three derivatives at parameter `u`.
    fn derivatives_at(&self, u: f64) -> (DVec3, DVec3, DVec3);

    /// First parameter of the nominal range.
    fn first_param(&self) -> f64;

    /// Last parameter of the nominal range.
    fn last_param(&self) -> f64;

    /// Whether the curve's endpoints coincide.
    fn is_closed(&self) -> bool;

    /// Total arc length over the nominal range.
    fn length(&self) -> f64;

    /// Arc length from the start of the range to parameter `u`.
    fn param_to_length(&self, u: f64) -> f64;

    /// Parameter at the given arc length from the start of the range.
    ///
    /// Fails with [`KernelError::NumericConvergence`] when the length cannot
    /// be resolved inside the nominal range within tolerance.
    fn length_to_param(&self, length: f64) -> Result<f64, KernelError>;
}

/// A 3D parametric curve.
///
/// Lines are parametrized over `[0, 1]`, circles over `[0, 2π]` (angle from
/// the local X axis), cubic Beziers over `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Curve3 {
    /// Straight segment from `start` to `end`.
    Line { start: DVec3, end: DVec3 },
    /// Full circle in the plane spanned by `x_axis`/`y_axis`.
    Circle {
        center: DVec3,
        x_axis: DVec3,
        y_axis: DVec3,
        radius: f64,
    },
    /// Cubic Bezier with four control points.
    Bezier { control: [DVec3; 4] },
}

impl Curve3 {
    /// Creates a line curve.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateGeometry`] when the endpoints
    /// coincide.
    pub fn line(start: DVec3, end: DVec3) -> Result<Self, KernelError> {
        if start.distance(end) < POINT_COINCIDENCE_TOLERANCE {
            return Err(KernelError::degenerate(format!(
                "Line endpoints coincide at {start:?}"
            )));
        }
        Ok(Self::Line { start, end })
    }

    /// Creates a full circle around `center` in the plane normal to `normal`.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateGeometry`] for a non-positive radius
    /// or a zero normal.
    pub fn circle(center: DVec3, normal: DVec3, radius: f64) -> Result<Self, KernelError> {
        if radius <= 0.0 {
            return Err(KernelError::degenerate(format!(
                "Circle radius must be positive: {radius}"
            )));
        }
        let n = normal.try_normalize().ok_or_else(|| {
            KernelError::degenerate("Circle normal must be non-zero".to_string())
        })?;
        let x_axis = perpendicular_to(n);
        let y_axis = n.cross(x_axis);
        Ok(Self::Circle {
            center,
            x_axis,
            y_axis,
            radius,
        })
    }

    /// Creates a cubic Bezier curve.
    pub fn bezier(control: [DVec3; 4]) -> Self {
        Self::Bezier { control }
    }
}

/// Any unit vector perpendicular to `n` (assumed normalized).
fn perpendicular_to(n: DVec3) -> DVec3 {
    let candidate = if n.x.abs() < 0.9 { DVec3::X } else { DVec3::Y };
    (candidate - n * candidate.dot(n)).normalize()
}

impl ParamCurve for Curve3 {
    fn value_at(&self, u: f64) -> DVec3 {
        match self {
            Self::Line { start, end } => *start + (*end - *start) * u,
            Self::Circle {
                center,
                x_axis,
                y_axis,
                radius,
            } => *center + (*x_axis * u.cos() + *y_axis * u.sin()) * *radius,
            Self::Bezier { control } => {
                let t = u;
                let s = 1.0 - t;
                control[0] * (s * s * s)
                    + control[1] * (3.0 * s * s * t)
                    + control[2] * (3.0 * s * t * t)
                    + control[3] * (t * t * t)
            }
        }
    }

    fn derivatives_at(&self, u: f64) -> (DVec3, DVec3, DVec3) {
        match self {
            Self::Line { start, end } => (*end - *start, DVec3::ZERO, DVec3::ZERO),
            Self::Circle {
                x_axis,
                y_axis,
                radius,
                ..
            } => {
                let d1 = (*y_axis * u.cos() - *x_axis * u.sin()) * *radius;
                let d2 = (*x_axis * u.cos() + *y_axis * u.sin()) * -*radius;
                (d1, d2, -d1)
            }
            Self::Bezier { control } => {
                let t = u;
                let s = 1.0 - t;
                let [p0, p1, p2, p3] = *control;
                let d1 = (p1 - p0) * (3.0 * s * s)
                    + (p2 - p1) * (6.0 * s * t)
                    + (p3 - p2) * (3.0 * t * t);
                let d2 = (p2 - p1 * 2.0 + p0) * (6.0 * s) + (p3 - p2 * 2.0 + p1) * (6.0 * t);
                let d3 = (p3 - p2 * 3.0 + p1 * 3.0 - p0) * 6.0;
                (d1, d2, d3)
            }
        }
    }

    fn first_param(&self) -> f64 {
        0.0
    }

    fn last_param(&self) -> f64 {
        match self {
            Self::Line { .. } | Self::Bezier { .. } => 1.0,
            Self::Circle { .. } => std::f64::consts::TAU,
        }
    }

    fn is_closed(&self) -> bool {
        match self {
            Self::Line { .. } => false,
            Self::Circle { .. } => true,
            Self::Bezier { control } => {
                control[0].distance(control[3]) < POINT_COINCIDENCE_TOLERANCE
            }
        }
    }

    fn length(&self) -> f64 {
        arc_length::length_between(self, self.first_param(), self.last_param())
    }

    fn param_to_length(&self, u: f64) -> f64 {
        arc_length::length_between(self, self.first_param(), u)
    }

    fn length_to_param(&self, length: f64) -> Result<f64, KernelError> {
        arc_length::param_at_length(
            self,
            self.first_param(),
            self.last_param(),
            length,
            self.length(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_evaluation() {
        let line = Curve3::line(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0)).unwrap();
        assert_eq!(line.value_at(0.5), DVec3::new(1.0, 0.0, 0.0));
        let (d1, d2, _) = line.derivatives_at(0.25);
        assert_eq!(d1, DVec3::new(2.0, 0.0, 0.0));
        assert_eq!(d2, DVec3::ZERO);
    }

    #[test]
    fn test_line_extrapolates_past_end() {
        let line = Curve3::line(DVec3::ZERO, DVec3::X).unwrap();
        assert_eq!(line.value_at(1.5), DVec3::new(1.5, 0.0, 0.0));
    }

    #[test]
    fn test_degenerate_line_rejected() {
        let result = Curve3::line(DVec3::ONE, DVec3::ONE);
        assert!(matches!(
            result,
            Err(KernelError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_circle_stays_on_radius() {
        let circle = Curve3::circle(DVec3::ZERO, DVec3::Z, 10.0).unwrap();
        for i in 0..16 {
            let u = i as f64 * std::f64::consts::TAU / 16.0;
            let p = circle.value_at(u);
            assert!((p.length() - 10.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_circle_is_closed() {
        let circle = Curve3::circle(DVec3::ZERO, DVec3::Z, 1.0).unwrap();
        assert!(circle.is_closed());
        let start = circle.value_at(circle.first_param());
        let end = circle.value_at(circle.last_param());
        assert!(start.distance(end) < 1e-12);
    }

    #[test]
    fn test_circle_length_analytic() {
        let circle = Curve3::circle(DVec3::ZERO, DVec3::Z, 3.0).unwrap();
        assert!((circle.length() - 3.0 * std::f64::consts::TAU).abs() < 1e-8);
    }

    #[test]
    fn test_bezier_endpoints() {
        let bezier = Curve3::bezier([
            DVec3::ZERO,
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(3.0, 2.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        ]);
        assert!(bezier.value_at(0.0).distance(DVec3::ZERO) < 1e-12);
        assert!(bezier.value_at(1.0).distance(DVec3::new(4.0, 0.0, 0.0)) < 1e-12);
        assert!(!bezier.is_closed());
    }

    #[test]
    fn test_bezier_derivative_matches_finite_difference() {
        let bezier = Curve3::bezier([
            DVec3::ZERO,
            DVec3::new(0.0, 1.0, 0.0),
            DVec3::new(1.0, 1.0, 1.0),
            DVec3::new(2.0, 0.0, 1.0),
        ]);
        let h = 1e-6;
        let (d1, _, _) = bezier.derivatives_at(0.4);
        let approx = (bezier.value_at(0.4 + h) - bezier.value_at(0.4 - h)) / (2.0 * h);
        assert!(d1.distance(approx) < 1e-6);
    }
}
