//! # Faces and Shapes
//!
//! [`Face`] pairs a surface with a UV domain, an orientation, and an
//! interior-mutable triangulation slot — the kernel's per-shape
//! triangulation cache. [`Shape`] aggregates faces, free edges, and
//! vertices.
//!
//! The cache is the one piece of shared mutable state in the pipeline;
//! consumers are expected to invalidate it before and after every
//! tessellation pass so no stale resolution leaks between calls.

use crate::topology::{Edge, Orientation, Vertex};
use crate::surface::Surface;
use glam::{DVec2, DVec3};
use std::cell::RefCell;

/// Discrete approximation of one face.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    /// Node positions in world coordinates.
    pub nodes: Vec<DVec3>,
    /// Surface parameters per node.
    pub uvs: Vec<DVec2>,
    /// Triangle index triples, local to `nodes`.
    pub triangles: Vec<[u32; 3]>,
}

/// A face: surface patch over a rectangular UV domain.
#[derive(Debug)]
pub struct Face {
    surface: Surface,
    u_range: (f64, f64),
    v_range: (f64, f64),
    orientation: Orientation,
    triangulation: RefCell<Option<Triangulation>>,
}

impl Face {
    pub fn new(
        surface: Surface,
        u_range: (f64, f64),
        v_range: (f64, f64),
        orientation: Orientation,
    ) -> Self {
        Self {
            surface,
            u_range,
            v_range,
            orientation,
            triangulation: RefCell::new(None),
        }
    }

    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    #[inline]
    pub fn u_range(&self) -> (f64, f64) {
        self.u_range
    }

    #[inline]
    pub fn v_range(&self) -> (f64, f64) {
        self.v_range
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Point at a fractional position of the UV domain (`(0.5, 0.5)` is the
    /// domain midpoint).
    pub fn point_at_uv_fraction(&self, fu: f64, fv: f64) -> DVec3 {
        let (u, v) = self.uv_at_fraction(fu, fv);
        self.surface.point_at(u, v)
    }

    /// Natural surface normal at a fractional position of the UV domain.
    pub fn normal_at_uv_fraction(&self, fu: f64, fv: f64) -> DVec3 {
        let (u, v) = self.uv_at_fraction(fu, fv);
        self.surface.normal_at(u, v)
    }

    fn uv_at_fraction(&self, fu: f64, fv: f64) -> (f64, f64) {
        (
            self.u_range.0 + (self.u_range.1 - self.u_range.0) * fu,
            self.v_range.0 + (self.v_range.1 - self.v_range.0) * fv,
        )
    }

    /// Stores a triangulation in the cache slot.
    pub fn set_triangulation(&self, triangulation: Triangulation) {
        *self.triangulation.borrow_mut() = Some(triangulation);
    }

    /// Clones the cached triangulation out of the slot, if any.
    pub fn triangulation(&self) -> Option<Triangulation> {
        self.triangulation.borrow().clone()
    }

    pub fn has_triangulation(&self) -> bool {
        self.triangulation.borrow().is_some()
    }

    /// Drops any cached triangulation.
    pub fn invalidate_triangulation(&self) {
        *self.triangulation.borrow_mut() = None;
    }
}

impl Clone for Face {
    /// Clones the face definition; the triangulation cache starts empty in
    /// the copy.
    fn clone(&self) -> Self {
        Self {
            surface: self.surface.clone(),
            u_range: self.u_range,
            v_range: self.v_range,
            orientation: self.orientation,
            triangulation: RefCell::new(None),
        }
    }
}

/// A B-rep shape: faces plus free edges plus topological vertices.
#[derive(Debug, Clone, Default)]
pub struct Shape {
    faces: Vec<Face>,
    edges: Vec<Edge>,
    vertices: Vec<Vertex>,
}

impl Shape {
    pub fn new(faces: Vec<Face>, edges: Vec<Edge>, vertices: Vec<Vertex>) -> Self {
        Self {
            faces,
            edges,
            vertices,
        }
    }

    /// The null shape: no topology at all.
    pub fn null() -> Self {
        Self::default()
    }

    /// Whether the shape carries no topology.
    pub fn is_null(&self) -> bool {
        self.faces.is_empty() && self.edges.is_empty() && self.vertices.is_empty()
    }

    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Drops every face's cached triangulation.
    pub fn invalidate_triangulations(&self) {
        for face in &self.faces {
            face.invalidate_triangulation();
        }
    }

    /// Whether any face currently holds a cached triangulation.
    pub fn has_any_triangulation(&self) -> bool {
        self.faces.iter().any(Face::has_triangulation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_plane_face() -> Face {
        Face::new(
            Surface::Plane {
                origin: DVec3::ZERO,
                x_axis: DVec3::X,
                y_axis: DVec3::Y,
            },
            (0.0, 1.0),
            (0.0, 1.0),
            Orientation::Forward,
        )
    }

    #[test]
    fn test_face_center_evaluation() {
        let face = unit_plane_face();
        assert_eq!(
            face.point_at_uv_fraction(0.5, 0.5),
            DVec3::new(0.5, 0.5, 0.0)
        );
        assert_eq!(face.normal_at_uv_fraction(0.5, 0.5), DVec3::Z);
    }

    #[test]
    fn test_triangulation_cache_lifecycle() {
        let face = unit_plane_face();
        assert!(!face.has_triangulation());
        face.set_triangulation(Triangulation {
            nodes: vec![DVec3::ZERO],
            uvs: vec![DVec2::ZERO],
            triangles: vec![],
        });
        assert!(face.has_triangulation());
        face.invalidate_triangulation();
        assert!(!face.has_triangulation());
    }

    #[test]
    fn test_face_clone_does_not_share_cache() {
        let face = unit_plane_face();
        face.set_triangulation(Triangulation {
            nodes: vec![],
            uvs: vec![],
            triangles: vec![],
        });
        let copy = face.clone();
        assert!(!copy.has_triangulation());
        assert!(face.has_triangulation());
    }

    #[test]
    fn test_null_shape() {
        let shape = Shape::null();
        assert!(shape.is_null());
        assert!(!shape.has_any_triangulation());
    }
}
