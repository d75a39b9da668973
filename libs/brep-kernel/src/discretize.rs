//! # Adaptive Edge Discretization
//!
//! Tangential-deflection sampling of edges: a segment is accepted only when
//! the tangent rotates by less than the angular deflection across it and the
//! curve's midpoint stays within the linear deflection of the chord. Point
//! density therefore follows curvature instead of uniform parameter steps.

use crate::curve::ParamCurve;
use crate::topology::Edge;
use config::constants::{DISCRETIZE_MAX_DEPTH, EPSILON};
use glam::DVec3;

/// Discretizes an edge into a polyline in traversal order.
///
/// The polyline always includes both endpoints; interior points are added
/// wherever the deflection criteria fail.
pub fn discretize_edge(edge: &Edge, angular_deflection: f64, linear_deflection: f64) -> Vec<DVec3> {
    let (first, last) = edge.range();
    let curve = edge.curve();
    let mut points = vec![curve.value_at(first)];
    subdivide(
        curve,
        first,
        last,
        angular_deflection,
        linear_deflection,
        0,
        &mut points,
    );
    if edge.orientation().is_reversed() {
        points.reverse();
    }
    points
}

/// Appends all polyline points of `(a, b]` to `out`.
fn subdivide<C: ParamCurve>(
    curve: &C,
    a: f64,
    b: f64,
    angular: f64,
    linear: f64,
    depth: u32,
    out: &mut Vec<DVec3>,
) {
    let pa = curve.value_at(a);
    let pb = curve.value_at(b);
    let m = 0.5 * (a + b);
    let pm = curve.value_at(m);

    if depth >= DISCRETIZE_MAX_DEPTH
        || (tangent_turn_ok(curve, a, b, angular) && chord_deviation_ok(pa, pb, pm, linear))
    {
        out.push(pb);
        return;
    }
    subdivide(curve, a, m, angular, linear, depth + 1, out);
    subdivide(curve, m, b, angular, linear, depth + 1, out);
}

fn tangent_turn_ok<C: ParamCurve>(curve: &C, a: f64, b: f64, angular: f64) -> bool {
    let (ta, _, _) = curve.derivatives_at(a);
    let (tb, _, _) = curve.derivatives_at(b);
    if ta.length() <= EPSILON || tb.length() <= EPSILON {
        return false;
    }
    ta.angle_between(tb) <= angular
}

fn chord_deviation_ok(pa: DVec3, pb: DVec3, pm: DVec3, linear: f64) -> bool {
    let chord = pb - pa;
    let len2 = chord.length_squared();
    if len2 <= EPSILON {
        return pm.distance(pa) <= linear;
    }
    let t = ((pm - pa).dot(chord) / len2).clamp(0.0, 1.0);
    pm.distance(pa + chord * t) <= linear
}
