//! # Zig-Zag Generation
//!
//! Builds a connective open polyline between two wires by sampling `n`
//! points from each and interleaving them alternately. With `per_edge` the
//! sampling runs independently for each edge pair, so shorter edges get
//! proportionally denser zig-zags.

use crate::error::DiscretizeError;
use crate::sample;
use brep_kernel::primitives::make_polyline_wire;
use brep_kernel::{Edge, Wire, WireAdaptor};
use glam::DVec3;

/// Samples `n` points along a wire, uniform in arc length or in native
/// parameter.
///
/// Open wires include both endpoints; closed wires drop the duplicate seam
/// sample so `n` distinct positions come back.
fn sample_wire_points(
    wire: &Wire,
    n: usize,
    by_equal_distance: bool,
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    if n == 1 {
        return Ok(vec![wire.start_point()]);
    }
    let (divisions, remove_end) = if wire.is_closed() {
        (n, true)
    } else {
        (n - 1, false)
    };
    let samples = if by_equal_distance {
        sample::divide_by_equal_distance(&adaptor, divisions, false, remove_end)?
    } else {
        sample::divide_by_params(&adaptor, divisions, false, remove_end)?
    };
    Ok(samples.into_iter().map(|s| s.position).collect())
}

fn interleave(a: &[DVec3], b: &[DVec3], inverse: bool, out: &mut Vec<DVec3>) {
    let (first, second) = if inverse { (b, a) } else { (a, b) };
    for (p, q) in first.iter().zip(second) {
        out.push(*p);
        out.push(*q);
    }
}

/// Creates a zig-zag polyline wire between `wire1` and `wire2`.
///
/// Samples `n` points from each wire and interleaves them
/// (`w1[0], w2[0], w1[1], w2[1], …`, swapped when `inverse`) into an open
/// polyline of straight segments — `2n` corner points in total. With
/// `per_edge` the wires must have the same edge count and each edge pair is
/// sampled independently.
///
/// # Errors
///
/// [`DiscretizeError::InvalidArgument`] for `n == 0` or mismatched edge
/// counts in `per_edge` mode.
pub fn create_zig_zag_between_two_wires(
    wire1: &Wire,
    wire2: &Wire,
    n: usize,
    inverse: bool,
    by_equal_distance: bool,
    per_edge: bool,
) -> Result<Wire, DiscretizeError> {
    if n == 0 {
        return Err(DiscretizeError::invalid_argument(
            "Zig-zag sample count must be positive",
        ));
    }

    let mut corners = Vec::with_capacity(2 * n);
    if per_edge {
        if wire1.edge_count() != wire2.edge_count() {
            return Err(DiscretizeError::invalid_argument(format!(
                "Per-edge zig-zag needs matching edge counts: {} vs {}",
                wire1.edge_count(),
                wire2.edge_count()
            )));
        }
        for (e1, e2) in wire1.edges().iter().zip(wire2.edges()) {
            let w1 = single_edge_wire(e1)?;
            let w2 = single_edge_wire(e2)?;
            let a = sample_wire_points(&w1, n, by_equal_distance)?;
            let b = sample_wire_points(&w2, n, by_equal_distance)?;
            interleave(&a, &b, inverse, &mut corners);
        }
    } else {
        let a = sample_wire_points(wire1, n, by_equal_distance)?;
        let b = sample_wire_points(wire2, n, by_equal_distance)?;
        interleave(&a, &b, inverse, &mut corners);
    }

    make_polyline_wire(&corners).map_err(DiscretizeError::from)
}

fn single_edge_wire(edge: &Edge) -> Result<Wire, DiscretizeError> {
    Wire::new(vec![edge.clone()]).map_err(DiscretizeError::from)
}
