//! # Surfaces
//!
//! Parametric surfaces backing faces. Only the evaluation the mesh builder
//! needs: position, normal, and per-direction subdivision counts for a given
//! deflection budget.

use config::constants::MAX_SURFACE_SEGMENTS;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A parametric surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Surface {
    /// `point = origin + u * x_axis + v * y_axis`; natural normal is
    /// `x_axis × y_axis`.
    Plane {
        origin: DVec3,
        x_axis: DVec3,
        y_axis: DVec3,
    },
    /// `point = origin + radius * (cos u * x_axis + sin u * y_axis) + v * z_axis`;
    /// `u` is the angle, `v` the height along the axis.
    Cylinder {
        origin: DVec3,
        x_axis: DVec3,
        y_axis: DVec3,
        z_axis: DVec3,
        radius: f64,
    },
}

impl Surface {
    /// Evaluates the surface position at `(u, v)`.
    pub fn point_at(&self, u: f64, v: f64) -> DVec3 {
        match self {
            Self::Plane {
                origin,
                x_axis,
                y_axis,
            } => *origin + *x_axis * u + *y_axis * v,
            Self::Cylinder {
                origin,
                x_axis,
                y_axis,
                z_axis,
                radius,
            } => *origin + (*x_axis * u.cos() + *y_axis * u.sin()) * *radius + *z_axis * v,
        }
    }

    /// Evaluates the natural (un-oriented) surface normal at `(u, v)`.
    pub fn normal_at(&self, u: f64, _v: f64) -> DVec3 {
        match self {
            Self::Plane { x_axis, y_axis, .. } => x_axis.cross(*y_axis).normalize(),
            Self::Cylinder {
                x_axis, y_axis, ..
            } => (*x_axis * u.cos() + *y_axis * u.sin()).normalize(),
        }
    }

    /// Subdivision counts `(nu, nv)` meeting the deflection budget over the
    /// given parameter spans.
    ///
    /// Flat directions need a single segment regardless of precision; curved
    /// directions are bounded by both the chord (sagitta) error and the
    /// angular deflection, and clamped to [`MAX_SURFACE_SEGMENTS`].
    pub fn grid_segments(
        &self,
        u_span: f64,
        v_span: f64,
        linear_deflection: f64,
        angular_deflection: f64,
    ) -> (u32, u32) {
        let _ = v_span;
        match self {
            Self::Plane { .. } => (1, 1),
            Self::Cylinder { radius, .. } => (
                arc_segments(*radius, u_span, linear_deflection, angular_deflection),
                1,
            ),
        }
    }
}

/// Segments needed so an arc of `radius` over `span` radians deviates from
/// its chords by at most `linear` while each segment sweeps at most
/// `angular` radians.
fn arc_segments(radius: f64, span: f64, linear: f64, angular: f64) -> u32 {
    // Sagitta of one segment of sweep θ is r * (1 - cos(θ / 2)).
    let max_sweep_linear = if linear >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - linear / radius).acos()
    };
    let max_sweep = max_sweep_linear.min(angular);
    let n = (span / max_sweep).ceil() as u32;
    n.clamp(2, MAX_SURFACE_SEGMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_evaluation() {
        let plane = Surface::Plane {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
        };
        assert_eq!(plane.point_at(2.0, 3.0), DVec3::new(2.0, 3.0, 0.0));
        assert_eq!(plane.normal_at(2.0, 3.0), DVec3::Z);
        assert_eq!(plane.grid_segments(10.0, 10.0, 0.001, 0.5), (1, 1));
    }

    #[test]
    fn test_cylinder_normal_is_radial() {
        let cyl = Surface::Cylinder {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
            z_axis: DVec3::Z,
            radius: 5.0,
        };
        let u = 1.2;
        let p = cyl.point_at(u, 3.0);
        let n = cyl.normal_at(u, 3.0);
        let radial = DVec3::new(p.x, p.y, 0.0).normalize();
        assert!(n.distance(radial) < 1e-12);
    }

    #[test]
    fn test_cylinder_segments_grow_with_precision() {
        let cyl = Surface::Cylinder {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
            z_axis: DVec3::Z,
            radius: 5.0,
        };
        let span = std::f64::consts::TAU;
        let (coarse, _) = cyl.grid_segments(span, 1.0, 1.0, 10.0);
        let (fine, _) = cyl.grid_segments(span, 1.0, 0.01, 10.0);
        assert!(fine > coarse);
    }

    #[test]
    fn test_segments_clamped_to_limit() {
        assert_eq!(
            arc_segments(1000.0, std::f64::consts::TAU, 1e-9, 10.0),
            MAX_SURFACE_SEGMENTS
        );
    }
}
