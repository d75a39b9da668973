//! # Incremental Mesh Builder
//!
//! Populates the per-face triangulation cache for a whole shape at a given
//! linear precision and angular deflection. Faces with a degenerate UV
//! domain are left without a triangulation; consumers decide how to handle
//! the gap.

use crate::error::KernelError;
use crate::shape::{Face, Shape, Triangulation};
use config::constants::EPSILON;
use glam::DVec2;
use tracing::debug;

/// Tessellates every face of `shape`, storing results in the face caches.
///
/// Deterministic for identical inputs: the grid for each face depends only
/// on its surface, its UV domain, and the two deflection parameters.
///
/// # Errors
///
/// [`KernelError::InvalidGeometry`] for a non-positive deflection.
pub fn tessellate_shape(
    shape: &Shape,
    linear_deflection: f64,
    angular_deflection: f64,
) -> Result<(), KernelError> {
    if linear_deflection <= 0.0 {
        return Err(KernelError::invalid(format!(
            "Linear deflection must be positive: {linear_deflection}"
        )));
    }
    if angular_deflection <= 0.0 {
        return Err(KernelError::invalid(format!(
            "Angular deflection must be positive: {angular_deflection}"
        )));
    }
    let mut tessellated = 0usize;
    for face in shape.faces() {
        if let Some(triangulation) = tessellate_face(face, linear_deflection, angular_deflection) {
            face.set_triangulation(triangulation);
            tessellated += 1;
        }
    }
    debug!(
        faces = shape.faces().len(),
        tessellated, "tessellated shape"
    );
    Ok(())
}

/// Grid-triangulates one face, or returns `None` for a degenerate UV domain.
fn tessellate_face(face: &Face, linear: f64, angular: f64) -> Option<Triangulation> {
    let (u0, u1) = face.u_range();
    let (v0, v1) = face.v_range();
    let u_span = u1 - u0;
    let v_span = v1 - v0;
    if u_span <= EPSILON || v_span <= EPSILON {
        return None;
    }

    let (nu, nv) = face.surface().grid_segments(u_span, v_span, linear, angular);
    let node_count = ((nu + 1) * (nv + 1)) as usize;
    let mut nodes = Vec::with_capacity(node_count);
    let mut uvs = Vec::with_capacity(node_count);
    for j in 0..=nv {
        let v = v0 + v_span * (j as f64 / nv as f64);
        for i in 0..=nu {
            let u = u0 + u_span * (i as f64 / nu as f64);
            nodes.push(face.surface().point_at(u, v));
            uvs.push(DVec2::new(u, v));
        }
    }

    // Two triangles per grid cell, wound counter-clockwise when viewed from
    // the natural normal side of the surface.
    let mut triangles = Vec::with_capacity((nu * nv * 2) as usize);
    let stride = nu + 1;
    for j in 0..nv {
        for i in 0..nu {
            let a = j * stride + i;
            let b = j * stride + i + 1;
            let c = (j + 1) * stride + i + 1;
            let d = (j + 1) * stride + i;
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
    }

    Some(Triangulation {
        nodes,
        uvs,
        triangles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;
    use crate::topology::Orientation;
    use glam::DVec3;

    fn plane_face(extent: f64) -> Face {
        Face::new(
            Surface::Plane {
                origin: DVec3::ZERO,
                x_axis: DVec3::X,
                y_axis: DVec3::Y,
            },
            (0.0, extent),
            (0.0, extent),
            Orientation::Forward,
        )
    }

    #[test]
    fn test_plane_face_is_two_triangles() {
        let shape = Shape::new(vec![plane_face(1.0)], vec![], vec![]);
        tessellate_shape(&shape, 0.01, 0.5).unwrap();
        let tri = shape.faces()[0].triangulation().unwrap();
        assert_eq!(tri.nodes.len(), 4);
        assert_eq!(tri.triangles.len(), 2);
        assert_eq!(tri.uvs.len(), tri.nodes.len());
    }

    #[test]
    fn test_plane_winding_matches_natural_normal() {
        let shape = Shape::new(vec![plane_face(1.0)], vec![], vec![]);
        tessellate_shape(&shape, 0.01, 0.5).unwrap();
        let tri = shape.faces()[0].triangulation().unwrap();
        for [a, b, c] in &tri.triangles {
            let pa = tri.nodes[*a as usize];
            let pb = tri.nodes[*b as usize];
            let pc = tri.nodes[*c as usize];
            let n = (pb - pa).cross(pc - pa);
            assert!(n.z > 0.0, "triangle wound against the plane normal");
        }
    }

    #[test]
    fn test_cylinder_density_follows_precision() {
        let cylinder = |precision: f64| {
            let face = Face::new(
                Surface::Cylinder {
                    origin: DVec3::ZERO,
                    x_axis: DVec3::X,
                    y_axis: DVec3::Y,
                    z_axis: DVec3::Z,
                    radius: 5.0,
                },
                (0.0, std::f64::consts::TAU),
                (0.0, 2.0),
                Orientation::Forward,
            );
            let shape = Shape::new(vec![face], vec![], vec![]);
            tessellate_shape(&shape, precision, 0.5).unwrap();
            shape.faces()[0].triangulation().unwrap().nodes.len()
        };
        assert!(cylinder(0.001) > cylinder(0.5));
    }

    #[test]
    fn test_degenerate_face_left_untriangulated() {
        let face = plane_face(0.0);
        let shape = Shape::new(vec![face], vec![], vec![]);
        tessellate_shape(&shape, 0.01, 0.5).unwrap();
        assert!(!shape.faces()[0].has_triangulation());
    }

    #[test]
    fn test_rejects_non_positive_deflection() {
        let shape = Shape::new(vec![plane_face(1.0)], vec![], vec![]);
        assert!(matches!(
            tessellate_shape(&shape, 0.0, 0.5),
            Err(KernelError::InvalidGeometry { .. })
        ));
    }
}
