//! # Wire Splitting
//!
//! Regroups a wire's edges into contiguous sub-wires bounded by points that
//! already lie on the wire (typically produced by the sampler).
//!
//! Each point is matched to its owning edge by a coarse scan plus a local
//! parametric refinement; traversal then accumulates edges into groups,
//! closing a group at every split boundary. Edges containing no boundary are
//! appended whole, which is why the number of output sub-wires can be
//! smaller than the edge count. On closed wires the group trailing the last
//! split point wraps around into the group leading the first one.

use crate::error::DiscretizeError;
use brep_kernel::{Edge, Wire};
use config::constants::{
    PARAM_TOLERANCE, POINT_COINCIDENCE_TOLERANCE, POINT_LOCATION_REFINE_ITERATIONS,
    POINT_LOCATION_SCAN_SAMPLES, POINT_ON_WIRE_TOLERANCE,
};
use glam::DVec3;

/// A split point located on a wire: owning edge plus traversal offset.
#[derive(Debug, Clone, Copy)]
struct Location {
    edge: usize,
    /// Traversal offset within the edge, in `[0, param_span]`.
    t: f64,
}

/// Splits `wire` into contiguous sub-wires at `points`.
///
/// Guarantees: no sub-wire is empty, sub-wire lengths sum to the wire length
/// within tolerance, and output order follows traversal from the wire's
/// first edge.
///
/// # Errors
///
/// [`DiscretizeError::PointNotOnWire`] when a point is farther than the
/// matching tolerance from every edge.
pub fn split_on_points(wire: &Wire, points: &[DVec3]) -> Result<Vec<Wire>, DiscretizeError> {
    if points.is_empty() {
        return Ok(vec![wire.clone()]);
    }

    let mut locations = Vec::with_capacity(points.len());
    for &point in points {
        locations.push(locate_on_wire(wire, point)?);
    }
    locations.sort_by(|a, b| {
        a.edge
            .cmp(&b.edge)
            .then(a.t.partial_cmp(&b.t).expect("traversal offsets are finite"))
    });
    dedup_by_position(wire, &mut locations);

    let mut groups: Vec<Vec<Edge>> = Vec::new();
    let mut current: Vec<Edge> = Vec::new();
    let mut boundary_at_wire_start = false;
    let mut cursor_by_edge = locations.iter().peekable();

    for (idx, edge) in wire.edges().iter().enumerate() {
        let span = edge.param_span();
        let start = edge.start_point();
        let end = edge.end_point();
        let mut cursor = 0.0;
        while let Some(loc) = cursor_by_edge.peek() {
            if loc.edge != idx {
                break;
            }
            let t = loc.t;
            cursor_by_edge.next();
            let at = edge.point_at_traversal(t);
            if at.distance(start) < POINT_COINCIDENCE_TOLERANCE {
                // Boundary at the edge start: close the running group there.
                if idx == 0 {
                    boundary_at_wire_start = true;
                }
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
            } else if at.distance(end) < POINT_COINCIDENCE_TOLERANCE {
                if span - cursor > PARAM_TOLERANCE {
                    current.push(edge.traversal_piece(cursor, span)?);
                }
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                cursor = span;
            } else {
                // Interior boundary: cut the edge here.
                if t - cursor > PARAM_TOLERANCE {
                    current.push(edge.traversal_piece(cursor, t)?);
                }
                if !current.is_empty() {
                    groups.push(std::mem::take(&mut current));
                }
                cursor = t;
            }
        }
        if span - cursor > PARAM_TOLERANCE {
            current.push(edge.traversal_piece(cursor, span)?);
        }
    }

    if !current.is_empty() {
        if wire.is_closed() && !boundary_at_wire_start && !groups.is_empty() {
            // The trailing group runs through the wire's seam into the
            // leading group: concatenate them as one sub-wire.
            let head = groups.remove(0);
            current.extend(head);
            groups.insert(0, std::mem::take(&mut current));
        } else {
            groups.push(current);
        }
    }

    groups
        .into_iter()
        .map(|edges| Wire::new(edges).map_err(DiscretizeError::from))
        .collect()
}

/// Locates `point` on the wire, returning its owning edge and traversal
/// offset.
fn locate_on_wire(wire: &Wire, point: DVec3) -> Result<Location, DiscretizeError> {
    let mut best: Option<(Location, f64)> = None;
    for (idx, edge) in wire.edges().iter().enumerate() {
        let (t, distance) = locate_on_edge(edge, point);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((Location { edge: idx, t }, distance));
        }
    }
    let (mut location, distance) = best.expect("wires always have at least one edge");
    if distance > POINT_ON_WIRE_TOLERANCE {
        return Err(DiscretizeError::PointNotOnWire { point, distance });
    }
    // A hit at the very end of an edge is the same boundary as the start of
    // the next edge (or the wire seam on closed wires); normalize so the
    // traversal sees one canonical form.
    let edge = &wire.edges()[location.edge];
    let at = edge.point_at_traversal(location.t);
    if at.distance(edge.end_point()) < POINT_COINCIDENCE_TOLERANCE {
        if location.edge + 1 < wire.edge_count() {
            location = Location {
                edge: location.edge + 1,
                t: 0.0,
            };
        } else if wire.is_closed() {
            location = Location { edge: 0, t: 0.0 };
        }
    }
    Ok(location)
}

/// Closest traversal offset and distance from `point` to `edge`.
///
/// Coarse scan to bracket the minimum, then golden-section-style shrinking.
/// Split points are assumed to lie on the wire, so the local minimum found
/// by the scan is the global one.
fn locate_on_edge(edge: &Edge, point: DVec3) -> (f64, f64) {
    let span = edge.param_span();
    let n = POINT_LOCATION_SCAN_SAMPLES;
    let mut best_k = 0usize;
    let mut best_d = f64::INFINITY;
    for k in 0..=n {
        let t = span * (k as f64 / n as f64);
        let d = edge.point_at_traversal(t).distance(point);
        if d < best_d {
            best_d = d;
            best_k = k;
        }
    }
    let mut lo = span * (best_k.saturating_sub(1) as f64 / n as f64);
    let mut hi = span * ((best_k + 1).min(n) as f64 / n as f64);
    for _ in 0..POINT_LOCATION_REFINE_ITERATIONS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        let d1 = edge.point_at_traversal(m1).distance(point);
        let d2 = edge.point_at_traversal(m2).distance(point);
        if d1 < d2 {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    let t = 0.5 * (lo + hi);
    (t, edge.point_at_traversal(t).distance(point))
}

/// Drops locations that resolve to the same wire position.
fn dedup_by_position(wire: &Wire, locations: &mut Vec<Location>) {
    locations.dedup_by(|b, a| {
        let pa = wire.edges()[a.edge].point_at_traversal(a.t);
        let pb = wire.edges()[b.edge].point_at_traversal(b.t);
        pa.distance(pb) < POINT_COINCIDENCE_TOLERANCE
    });
}
