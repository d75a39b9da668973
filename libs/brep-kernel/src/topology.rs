//! # Topology
//!
//! Vertices, edges, and wires. An [`Edge`] owns a trimmed range of a
//! [`Curve3`] plus a traversal orientation; a [`Wire`] is an ordered,
//! contiguous chain of edges, possibly closed.

use crate::arc_length;
use crate::curve::{Curve3, ParamCurve};
use crate::error::KernelError;
use config::constants::{PARAM_TOLERANCE, POINT_COINCIDENCE_TOLERANCE};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A topological vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub point: DVec3,
}

impl Vertex {
    pub fn new(point: DVec3) -> Self {
        Self { point }
    }
}

/// Traversal direction of an edge relative to its curve parametrization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Forward,
    Reversed,
}

impl Orientation {
    #[inline]
    pub fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed)
    }

    /// The opposite orientation.
    pub fn flipped(self) -> Self {
        match self {
            Self::Forward => Self::Reversed,
            Self::Reversed => Self::Forward,
        }
    }
}

/// An edge: a curve trimmed to `[first, last]` with a traversal orientation.
///
/// A `Reversed` edge is traversed from `last` to `first`; its start point is
/// the curve position at `last`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    curve: Curve3,
    first: f64,
    last: f64,
    orientation: Orientation,
}

impl Edge {
    /// Creates an edge over the curve's full nominal range.
    pub fn new(curve: Curve3, orientation: Orientation) -> Self {
        let first = curve.first_param();
        let last = curve.last_param();
        Self {
            curve,
            first,
            last,
            orientation,
        }
    }

    /// Creates an edge over a trimmed parameter range.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateGeometry`] when the range is empty
    /// within parameter tolerance.
    pub fn trimmed(
        curve: Curve3,
        first: f64,
        last: f64,
        orientation: Orientation,
    ) -> Result<Self, KernelError> {
        if last - first <= PARAM_TOLERANCE {
            return Err(KernelError::degenerate(format!(
                "Edge parameter range [{first}, {last}] is empty"
            )));
        }
        Ok(Self {
            curve,
            first,
            last,
            orientation,
        })
    }

    #[inline]
    pub fn curve(&self) -> &Curve3 {
        &self.curve
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Trimmed curve-parameter range `(first, last)`.
    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.first, self.last)
    }

    /// Parameter span of the trimmed range.
    #[inline]
    pub fn param_span(&self) -> f64 {
        self.last - self.first
    }

    /// Arc length of the trimmed range.
    pub fn length(&self) -> f64 {
        arc_length::length_between(&self.curve, self.first, self.last)
    }

    /// First point in traversal order.
    pub fn start_point(&self) -> DVec3 {
        match self.orientation {
            Orientation::Forward => self.curve.value_at(self.first),
            Orientation::Reversed => self.curve.value_at(self.last),
        }
    }

    /// Last point in traversal order.
    pub fn end_point(&self) -> DVec3 {
        match self.orientation {
            Orientation::Forward => self.curve.value_at(self.last),
            Orientation::Reversed => self.curve.value_at(self.first),
        }
    }

    /// Curve parameter for a traversal offset `t` in `[0, param_span]`
    /// measured from the edge's start point.
    pub fn traversal_to_curve_param(&self, t: f64) -> f64 {
        match self.orientation {
            Orientation::Forward => self.first + t,
            Orientation::Reversed => self.last - t,
        }
    }

    /// Point at traversal offset `t` in `[0, param_span]`.
    pub fn point_at_traversal(&self, t: f64) -> DVec3 {
        self.curve.value_at(self.traversal_to_curve_param(t))
    }

    /// Sub-edge covering traversal offsets `[a, b]`, preserving traversal
    /// direction.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::DegenerateGeometry`] when the piece is empty.
    pub fn traversal_piece(&self, a: f64, b: f64) -> Result<Edge, KernelError> {
        match self.orientation {
            Orientation::Forward => Edge::trimmed(
                self.curve.clone(),
                self.first + a,
                self.first + b,
                Orientation::Forward,
            ),
            Orientation::Reversed => Edge::trimmed(
                self.curve.clone(),
                self.last - b,
                self.last - a,
                Orientation::Reversed,
            ),
        }
    }

    /// The same edge traversed the other way.
    pub fn reversed(&self) -> Edge {
        Edge {
            curve: self.curve.clone(),
            first: self.first,
            last: self.last,
            orientation: self.orientation.flipped(),
        }
    }
}

/// An ordered, contiguous chain of edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    edges: Vec<Edge>,
}

impl Wire {
    /// Creates a wire from edges in traversal order.
    ///
    /// # Errors
    ///
    /// [`KernelError::InvalidGeometry`] when the list is empty or consecutive
    /// edges do not connect within the point-coincidence tolerance.
    pub fn new(edges: Vec<Edge>) -> Result<Self, KernelError> {
        if edges.is_empty() {
            return Err(KernelError::invalid("Wire must contain at least one edge"));
        }
        for (i, pair) in edges.windows(2).enumerate() {
            let gap = pair[0].end_point().distance(pair[1].start_point());
            if gap > POINT_COINCIDENCE_TOLERANCE {
                return Err(KernelError::invalid(format!(
                    "Wire edges {i} and {} do not connect (gap {gap})",
                    i + 1
                )));
            }
        }
        Ok(Self { edges })
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Sum of edge arc lengths.
    pub fn length(&self) -> f64 {
        self.edges.iter().map(Edge::length).sum()
    }

    pub fn start_point(&self) -> DVec3 {
        self.edges[0].start_point()
    }

    pub fn end_point(&self) -> DVec3 {
        self.edges[self.edges.len() - 1].end_point()
    }

    /// Whether the wire's endpoints coincide.
    pub fn is_closed(&self) -> bool {
        self.start_point().distance(self.end_point()) < POINT_COINCIDENCE_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_edge(a: DVec3, b: DVec3) -> Edge {
        Edge::new(Curve3::line(a, b).unwrap(), Orientation::Forward)
    }

    #[test]
    fn test_edge_orientation_swaps_endpoints() {
        let edge = line_edge(DVec3::ZERO, DVec3::X);
        let rev = edge.reversed();
        assert_eq!(rev.start_point(), edge.end_point());
        assert_eq!(rev.end_point(), edge.start_point());
        assert!((rev.length() - edge.length()).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_traversal_piece_preserves_direction() {
        let edge = line_edge(DVec3::ZERO, DVec3::new(4.0, 0.0, 0.0)).reversed();
        // Traversal runs from (4,0,0) towards the origin.
        let piece = edge.traversal_piece(0.25, 0.5).unwrap();
        assert!(piece.start_point().distance(DVec3::new(3.0, 0.0, 0.0)) < 1e-12);
        assert!(piece.end_point().distance(DVec3::new(2.0, 0.0, 0.0)) < 1e-12);
    }

    #[test]
    fn test_wire_rejects_disconnected_edges() {
        let e1 = line_edge(DVec3::ZERO, DVec3::X);
        let e2 = line_edge(DVec3::new(5.0, 0.0, 0.0), DVec3::new(6.0, 0.0, 0.0));
        assert!(matches!(
            Wire::new(vec![e1, e2]),
            Err(KernelError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_triangle_wire_closed_and_measured() {
        let a = DVec3::ZERO;
        let b = DVec3::new(3.0, 0.0, 0.0);
        let c = DVec3::new(0.0, 4.0, 0.0);
        let wire = Wire::new(vec![line_edge(a, b), line_edge(b, c), line_edge(c, a)]).unwrap();
        assert!(wire.is_closed());
        assert!((wire.length() - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_open_wire_endpoints() {
        let wire = Wire::new(vec![
            line_edge(DVec3::ZERO, DVec3::X),
            line_edge(DVec3::X, DVec3::new(1.0, 1.0, 0.0)),
        ])
        .unwrap();
        assert!(!wire.is_closed());
        assert_eq!(wire.start_point(), DVec3::ZERO);
        assert_eq!(wire.end_point(), DVec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_degenerate_trim_rejected() {
        let curve = Curve3::line(DVec3::ZERO, DVec3::X).unwrap();
        let result = Edge::trimmed(curve, 0.5, 0.5, Orientation::Forward);
        assert!(matches!(
            result,
            Err(KernelError::DegenerateGeometry { .. })
        ));
    }
}
