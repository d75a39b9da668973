//! # Mesh Extraction
//!
//! Decomposes a shape into per-face triangle buffers and per-edge polylines.
//!
//! Buffers are strictly per-face: triangle indices are local to their own
//! face's vertex array and nothing is deduplicated across faces, so
//! downstream consumers can color, pick, or export faces independently.
//!
//! The kernel's face-level triangulation cache is the one piece of shared
//! mutable state on this path. Every call invalidates it up front (a stale
//! triangulation from a different precision must never be reused) and again
//! on the way out via a drop guard, which also covers error paths.

use crate::error::DiscretizeError;
use brep_kernel::arc_length;
use brep_kernel::{
    discretize_edge, tessellate_shape, ParamCurve, Shape, Transformable, Trsf,
};
use config::constants::{ANGULAR_DEFLECTION, CURVE_ANGULAR_DEFLECTION};
use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Triangle buffers for one face.
///
/// Indices in `triangles` are local to this face's own `vertices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshFaceData {
    pub vertices: Vec<DVec3>,
    pub normals: Vec<DVec3>,
    pub uvs: Vec<DVec2>,
    pub triangles: Vec<[u32; 3]>,
    pub face_index: usize,
    /// Point at the UV-domain midpoint.
    pub center_point: DVec3,
    /// Oriented normal at the UV-domain midpoint.
    pub center_normal: DVec3,
}

/// Adaptive polyline for one free edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshEdgeData {
    pub polyline: Vec<DVec3>,
    /// Point at half the edge's arc length.
    pub mid_point: DVec3,
    pub edge_index: usize,
}

/// Full discrete decomposition of a shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecomposedMesh {
    pub faces: Vec<MeshFaceData>,
    pub edges: Vec<MeshEdgeData>,
    /// Topological vertices, flat, independent of mesh topology.
    pub vertices: Vec<DVec3>,
}

/// Re-invalidates the triangulation cache when the extraction scope ends,
/// on success and on error alike.
struct CacheGuard<'a> {
    shape: &'a Shape,
}

impl Drop for CacheGuard<'_> {
    fn drop(&mut self) {
        self.shape.invalidate_triangulations();
    }
}

/// Tessellates `shape` at `precision` and extracts all discrete buffers.
///
/// A null shape short-circuits to an empty [`DecomposedMesh`] — callers
/// feeding empty selections through the pipeline get empty buffers, not
/// errors. Faces the mesher could not triangulate are skipped with a
/// warning; everything else is extracted best-effort.
///
/// With `adjust_orientation` the shape is first carried through the Z-up to
/// Y-up convention change ([`Trsf::y_up_convention`]); the caller's shape is
/// never modified.
///
/// # Errors
///
/// [`DiscretizeError::InvalidArgument`] for a non-positive precision.
pub fn shape_to_mesh(
    shape: &Shape,
    precision: f64,
    adjust_orientation: bool,
) -> Result<DecomposedMesh, DiscretizeError> {
    if shape.is_null() {
        return Ok(DecomposedMesh::default());
    }
    if precision <= 0.0 {
        return Err(DiscretizeError::invalid_argument(format!(
            "Mesh precision must be positive: {precision}"
        )));
    }

    let adjusted;
    let shape = if adjust_orientation {
        adjusted = shape.transformed(&Trsf::y_up_convention());
        &adjusted
    } else {
        shape
    };

    // Stale triangulations from a previous call at another precision must
    // not survive into this pass.
    shape.invalidate_triangulations();
    let _guard = CacheGuard { shape };

    tessellate_shape(shape, precision, ANGULAR_DEFLECTION)?;

    let mut mesh = DecomposedMesh::default();

    for (face_index, face) in shape.faces().iter().enumerate() {
        let Some(triangulation) = face.triangulation() else {
            warn!(face_index, "face has no triangulation, skipping");
            continue;
        };
        let reversed = face.orientation().is_reversed();
        let normals = triangulation
            .uvs
            .iter()
            .map(|uv| {
                let n = face.surface().normal_at(uv.x, uv.y);
                if reversed {
                    -n
                } else {
                    n
                }
            })
            .collect();
        let triangles = triangulation
            .triangles
            .iter()
            .map(|&[a, b, c]| if reversed { [b, a, c] } else { [a, b, c] })
            .collect();
        let center_normal = face.normal_at_uv_fraction(0.5, 0.5);
        mesh.faces.push(MeshFaceData {
            vertices: triangulation.nodes,
            normals,
            uvs: triangulation.uvs,
            triangles,
            face_index,
            center_point: face.point_at_uv_fraction(0.5, 0.5),
            center_normal: if reversed {
                -center_normal
            } else {
                center_normal
            },
        });
    }

    for (edge_index, edge) in shape.edges().iter().enumerate() {
        let polyline = discretize_edge(edge, CURVE_ANGULAR_DEFLECTION, precision);
        let (first, last) = edge.range();
        let length = edge.length();
        let mid_param =
            arc_length::param_at_length(edge.curve(), first, last, length / 2.0, length)?;
        mesh.edges.push(MeshEdgeData {
            polyline,
            mid_point: edge.curve().value_at(mid_param),
            edge_index,
        });
    }

    mesh.vertices = shape.vertices().iter().map(|v| v.point).collect();

    Ok(mesh)
}
