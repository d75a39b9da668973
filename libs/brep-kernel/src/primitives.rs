//! # Shape Construction Helpers
//!
//! Builders for the handful of shapes and wires the pipeline works with in
//! practice and in tests: boxes, circles, polylines, and open cylinder
//! shells.

use crate::curve::Curve3;
use crate::error::KernelError;
use crate::shape::{Face, Shape};
use crate::surface::Surface;
use crate::topology::{Edge, Orientation, Vertex, Wire};
use glam::DVec3;

/// Creates a box shape with faces, free edges, and corner vertices.
///
/// # Arguments
///
/// * `size` - Dimensions [x, y, z]
/// * `center` - If true, center at origin; if false, corner at origin
///
/// # Errors
///
/// [`KernelError::DegenerateGeometry`] for a non-positive dimension.
pub fn make_box(size: DVec3, center: bool) -> Result<Shape, KernelError> {
    if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Box size must be positive: {size:?}"
        )));
    }
    let min = if center { -size / 2.0 } else { DVec3::ZERO };
    let max = min + size;

    let corner = |x: f64, y: f64, z: f64| DVec3::new(x, y, z);
    let c = [
        corner(min.x, min.y, min.z),
        corner(max.x, min.y, min.z),
        corner(max.x, max.y, min.z),
        corner(min.x, max.y, min.z),
        corner(min.x, min.y, max.z),
        corner(max.x, min.y, max.z),
        corner(max.x, max.y, max.z),
        corner(min.x, max.y, max.z),
    ];

    let plane = |origin: DVec3, x_axis: DVec3, y_axis: DVec3, u_max: f64, v_max: f64| {
        Face::new(
            Surface::Plane {
                origin,
                x_axis,
                y_axis,
            },
            (0.0, u_max),
            (0.0, v_max),
            Orientation::Forward,
        )
    };

    // Axes per face chosen so the natural normal x_axis × y_axis points
    // outward.
    let faces = vec![
        plane(c[0], DVec3::Y, DVec3::X, size.y, size.x), // bottom, -Z
        plane(c[4], DVec3::X, DVec3::Y, size.x, size.y), // top, +Z
        plane(c[0], DVec3::X, DVec3::Z, size.x, size.z), // front, -Y
        plane(c[3], DVec3::Z, DVec3::X, size.z, size.x), // back, +Y
        plane(c[0], DVec3::Z, DVec3::Y, size.z, size.y), // left, -X
        plane(c[1], DVec3::Y, DVec3::Z, size.y, size.z), // right, +X
    ];

    let line_edge = |a: DVec3, b: DVec3| -> Result<Edge, KernelError> {
        Ok(Edge::new(Curve3::line(a, b)?, Orientation::Forward))
    };
    let edges = vec![
        // Bottom square
        line_edge(c[0], c[1])?,
        line_edge(c[1], c[2])?,
        line_edge(c[2], c[3])?,
        line_edge(c[3], c[0])?,
        // Top square
        line_edge(c[4], c[5])?,
        line_edge(c[5], c[6])?,
        line_edge(c[6], c[7])?,
        line_edge(c[7], c[4])?,
        // Verticals
        line_edge(c[0], c[4])?,
        line_edge(c[1], c[5])?,
        line_edge(c[2], c[6])?,
        line_edge(c[3], c[7])?,
    ];

    let vertices = c.iter().copied().map(Vertex::new).collect();
    Ok(Shape::new(faces, edges, vertices))
}

/// Creates an open cylinder shell: one lateral face bounded by two circle
/// edges.
///
/// # Errors
///
/// [`KernelError::DegenerateGeometry`] for a non-positive radius or height.
pub fn make_cylinder_shell(radius: f64, height: f64) -> Result<Shape, KernelError> {
    if radius <= 0.0 || height <= 0.0 {
        return Err(KernelError::degenerate(format!(
            "Cylinder dimensions must be positive: radius {radius}, height {height}"
        )));
    }
    let face = Face::new(
        Surface::Cylinder {
            origin: DVec3::ZERO,
            x_axis: DVec3::X,
            y_axis: DVec3::Y,
            z_axis: DVec3::Z,
            radius,
        },
        (0.0, std::f64::consts::TAU),
        (0.0, height),
        Orientation::Forward,
    );
    let bottom = Edge::new(
        Curve3::circle(DVec3::ZERO, DVec3::Z, radius)?,
        Orientation::Forward,
    );
    let top = Edge::new(
        Curve3::circle(DVec3::new(0.0, 0.0, height), DVec3::Z, radius)?,
        Orientation::Forward,
    );
    let seam_bottom = bottom.start_point();
    let seam_top = top.start_point();
    Ok(Shape::new(
        vec![face],
        vec![bottom, top],
        vec![Vertex::new(seam_bottom), Vertex::new(seam_top)],
    ))
}

/// Creates a closed single-edge wire from a full circle.
///
/// # Errors
///
/// [`KernelError::DegenerateGeometry`] for a non-positive radius or zero
/// normal.
pub fn make_circle_wire(center: DVec3, normal: DVec3, radius: f64) -> Result<Wire, KernelError> {
    let edge = Edge::new(Curve3::circle(center, normal, radius)?, Orientation::Forward);
    Wire::new(vec![edge])
}

/// Creates an open wire of straight segments through `points`, skipping
/// consecutive duplicates.
///
/// # Errors
///
/// [`KernelError::DegenerateGeometry`] when fewer than two distinct points
/// remain.
pub fn make_polyline_wire(points: &[DVec3]) -> Result<Wire, KernelError> {
    let mut edges = Vec::new();
    let mut prev: Option<DVec3> = None;
    for &p in points {
        if let Some(a) = prev {
            match Curve3::line(a, p) {
                Ok(curve) => {
                    edges.push(Edge::new(curve, Orientation::Forward));
                    prev = Some(p);
                }
                // Duplicate point within tolerance: keep the previous anchor.
                Err(KernelError::DegenerateGeometry { .. }) => {}
                Err(other) => return Err(other),
            }
        } else {
            prev = Some(p);
        }
    }
    if edges.is_empty() {
        return Err(KernelError::degenerate(
            "Polyline needs at least two distinct points",
        ));
    }
    Wire::new(edges)
}

/// Creates a single-segment wire from `start` to `end`.
///
/// # Errors
///
/// [`KernelError::DegenerateGeometry`] when the endpoints coincide.
pub fn make_line_wire(start: DVec3, end: DVec3) -> Result<Wire, KernelError> {
    make_polyline_wire(&[start, end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_topology_counts() {
        let shape = make_box(DVec3::splat(1.0), false).unwrap();
        assert_eq!(shape.faces().len(), 6);
        assert_eq!(shape.edges().len(), 12);
        assert_eq!(shape.vertices().len(), 8);
    }

    #[test]
    fn test_box_normals_point_outward() {
        let shape = make_box(DVec3::splat(2.0), true).unwrap();
        for face in shape.faces() {
            let center = face.point_at_uv_fraction(0.5, 0.5);
            let normal = face.normal_at_uv_fraction(0.5, 0.5);
            // Centered box: the outward direction at a face center is the
            // direction away from the origin.
            assert!(normal.dot(center) > 0.0);
        }
    }

    #[test]
    fn test_box_invalid_size() {
        assert!(matches!(
            make_box(DVec3::new(0.0, 1.0, 1.0), false),
            Err(KernelError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_circle_wire_closed() {
        let wire = make_circle_wire(DVec3::ZERO, DVec3::Z, 10.0).unwrap();
        assert!(wire.is_closed());
        assert!((wire.length() - 10.0 * std::f64::consts::TAU).abs() < 1e-6);
    }

    #[test]
    fn test_polyline_skips_duplicates() {
        let wire = make_polyline_wire(&[
            DVec3::ZERO,
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(1.0, 1.0, 0.0),
        ])
        .unwrap();
        assert_eq!(wire.edge_count(), 2);
    }

    #[test]
    fn test_polyline_all_duplicates_rejected() {
        assert!(matches!(
            make_polyline_wire(&[DVec3::ONE, DVec3::ONE]),
            Err(KernelError::DegenerateGeometry { .. })
        ));
    }

    #[test]
    fn test_cylinder_shell_counts() {
        let shape = make_cylinder_shell(2.0, 5.0).unwrap();
        assert_eq!(shape.faces().len(), 1);
        assert_eq!(shape.edges().len(), 2);
        assert_eq!(shape.vertices().len(), 2);
    }
}
