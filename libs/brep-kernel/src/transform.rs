//! # Rigid Transforms
//!
//! Orthogonal transforms (rotations and mirrors) plus translation, applied
//! structurally to curves, surfaces, and whole shapes. Transforming a shape
//! produces a fresh copy; triangulation caches never survive a transform.

use crate::curve::Curve3;
use crate::shape::{Face, Shape};
use crate::surface::Surface;
use crate::topology::{Edge, Vertex, Wire};
use glam::{DMat3, DVec3};

/// An orthogonal linear map (|det| = 1) plus translation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trsf {
    pub linear: DMat3,
    pub translation: DVec3,
}

impl Trsf {
    pub fn identity() -> Self {
        Self {
            linear: DMat3::IDENTITY,
            translation: DVec3::ZERO,
        }
    }

    /// Rotation by `angle` radians about `axis` through the origin.
    pub fn rotation(axis: DVec3, angle: f64) -> Self {
        Self {
            linear: DMat3::from_axis_angle(axis, angle),
            translation: DVec3::ZERO,
        }
    }

    /// Mirror across the XY plane (negates Z).
    pub fn mirror_xy() -> Self {
        Self {
            linear: DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0)),
            translation: DVec3::ZERO,
        }
    }

    pub fn translation_by(offset: DVec3) -> Self {
        Self {
            linear: DMat3::IDENTITY,
            translation: offset,
        }
    }

    /// This transform followed by `next`.
    pub fn then(&self, next: &Trsf) -> Trsf {
        Trsf {
            linear: next.linear * self.linear,
            translation: next.linear * self.translation + next.translation,
        }
    }

    /// Z-up right-handed to Y-up left-handed convention change: rotation of
    /// −90° about X followed by a mirror across the XY plane. Net effect
    /// `(x, y, z) → (x, z, y)`.
    pub fn y_up_convention() -> Self {
        Self::rotation(DVec3::X, -std::f64::consts::FRAC_PI_2).then(&Self::mirror_xy())
    }

    /// Applies the transform to a point.
    #[inline]
    pub fn point(&self, p: DVec3) -> DVec3 {
        self.linear * p + self.translation
    }

    /// Applies the linear part to a direction.
    #[inline]
    pub fn vector(&self, v: DVec3) -> DVec3 {
        self.linear * v
    }
}

/// Geometry that can be carried through a rigid transform.
pub trait Transformable {
    /// Returns a transformed copy.
    fn transformed(&self, trsf: &Trsf) -> Self;
}

impl Transformable for Curve3 {
    fn transformed(&self, trsf: &Trsf) -> Self {
        match self {
            Self::Line { start, end } => Self::Line {
                start: trsf.point(*start),
                end: trsf.point(*end),
            },
            Self::Circle {
                center,
                x_axis,
                y_axis,
                radius,
            } => Self::Circle {
                center: trsf.point(*center),
                x_axis: trsf.vector(*x_axis),
                y_axis: trsf.vector(*y_axis),
                radius: *radius,
            },
            Self::Bezier { control } => Self::Bezier {
                control: control.map(|p| trsf.point(p)),
            },
        }
    }
}

impl Transformable for Surface {
    fn transformed(&self, trsf: &Trsf) -> Self {
        match self {
            Self::Plane {
                origin,
                x_axis,
                y_axis,
            } => Self::Plane {
                origin: trsf.point(*origin),
                x_axis: trsf.vector(*x_axis),
                y_axis: trsf.vector(*y_axis),
            },
            Self::Cylinder {
                origin,
                x_axis,
                y_axis,
                z_axis,
                radius,
            } => Self::Cylinder {
                origin: trsf.point(*origin),
                x_axis: trsf.vector(*x_axis),
                y_axis: trsf.vector(*y_axis),
                z_axis: trsf.vector(*z_axis),
                radius: *radius,
            },
        }
    }
}

impl Transformable for Vertex {
    fn transformed(&self, trsf: &Trsf) -> Self {
        Vertex::new(trsf.point(self.point))
    }
}

impl Transformable for Edge {
    fn transformed(&self, trsf: &Trsf) -> Self {
        let (first, last) = self.range();
        // The parameter range and orientation are invariant under rigid
        // transforms, so the trimmed construction cannot fail here.
        Edge::trimmed(
            self.curve().transformed(trsf),
            first,
            last,
            self.orientation(),
        )
        .expect("rigid transform preserves parameter ranges")
    }
}

impl Transformable for Wire {
    fn transformed(&self, trsf: &Trsf) -> Self {
        let edges = self.edges().iter().map(|e| e.transformed(trsf)).collect();
        Wire::new(edges).expect("rigid transform preserves wire contiguity")
    }
}

impl Transformable for Face {
    fn transformed(&self, trsf: &Trsf) -> Self {
        Face::new(
            self.surface().transformed(trsf),
            self.u_range(),
            self.v_range(),
            self.orientation(),
        )
    }
}

impl Transformable for Shape {
    fn transformed(&self, trsf: &Trsf) -> Self {
        Shape::new(
            self.faces().iter().map(|f| f.transformed(trsf)).collect(),
            self.edges().iter().map(|e| e.transformed(trsf)).collect(),
            self.vertices().iter().map(|v| v.transformed(trsf)).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ParamCurve;

    #[test]
    fn test_y_up_convention_swaps_axes() {
        let trsf = Trsf::y_up_convention();
        let p = trsf.point(DVec3::new(1.0, 2.0, 3.0));
        assert!(p.distance(DVec3::new(1.0, 3.0, 2.0)) < 1e-12);
    }

    #[test]
    fn test_convention_is_involutive() {
        let trsf = Trsf::y_up_convention();
        let twice = trsf.then(&trsf);
        let p = DVec3::new(0.3, -1.7, 4.2);
        assert!(twice.point(p).distance(p) < 1e-12);
    }

    #[test]
    fn test_circle_transform_preserves_radius() {
        let circle = Curve3::circle(DVec3::new(1.0, 0.0, 0.0), DVec3::Z, 2.5).unwrap();
        let moved = circle.transformed(&Trsf::y_up_convention());
        assert!((moved.length() - circle.length()).abs() < 1e-9);
    }

    #[test]
    fn test_composition_order() {
        let rot = Trsf::rotation(DVec3::Z, std::f64::consts::FRAC_PI_2);
        let shift = Trsf::translation_by(DVec3::X);
        // Rotate first, then translate.
        let combined = rot.then(&shift);
        let p = combined.point(DVec3::X);
        assert!(p.distance(DVec3::new(1.0, 1.0, 0.0)) < 1e-12);
    }
}
