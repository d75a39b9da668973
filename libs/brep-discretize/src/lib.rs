//! # B-Rep Discretization Engine
//!
//! Converts exact parametric B-rep geometry into discrete points, polylines,
//! and triangle meshes:
//!
//! - **Curve sampling**: divide wires by native parameter or arc length,
//!   place points at explicit offsets, fixed steps, or repeating patterns
//! - **Wire splitting**: regroup a wire's edges into sub-wires at points
//!   lying on it
//! - **Zig-zag generation**: interleaved polylines between two wires
//! - **Mesh extraction**: per-face triangle buffers and per-edge polylines
//!   from a tessellated shape
//!
//! Wire-level sampling goes through [`WireAdaptor`](brep_kernel::WireAdaptor),
//! which presents a whole wire as one parametric curve, so arc-length
//! positions flow across edge boundaries without seams.
//!
//! # Example
//!
//! ```
//! use brep_discretize::divide_wire_by_equal_distance_to_points;
//! use brep_kernel::primitives::make_circle_wire;
//! use glam::DVec3;
//!
//! let wire = make_circle_wire(DVec3::ZERO, DVec3::Z, 10.0).unwrap();
//! let points = divide_wire_by_equal_distance_to_points(&wire, 8, false, false).unwrap();
//! assert_eq!(points.len(), 9);
//! ```

pub mod error;
pub mod extract;
pub mod sample;
pub mod splitter;
pub mod zigzag;

pub use error::DiscretizeError;
pub use extract::{shape_to_mesh, DecomposedMesh, MeshEdgeData, MeshFaceData};
pub use sample::Sample;
pub use splitter::split_on_points;
pub use zigzag::create_zig_zag_between_two_wires;

use brep_kernel::{Wire, WireAdaptor};
use glam::DVec3;

fn positions(samples: Vec<Sample>) -> Vec<DVec3> {
    samples.into_iter().map(|s| s.position).collect()
}

/// Divides `wire` into `n` spans of uniform native parameter and returns the
/// boundary points.
///
/// `n + 1` points before trimming; `remove_start`/`remove_end` drop the
/// respective boundary.
pub fn divide_wire_by_params_to_points(
    wire: &Wire,
    n: usize,
    remove_start: bool,
    remove_end: bool,
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    sample::divide_by_params(&adaptor, n, remove_start, remove_end).map(positions)
}

/// Divides `wire` into `n` spans of uniform arc length and returns the
/// boundary points.
///
/// On a closed wire the first and last of the `n + 1` untrimmed points
/// coincide.
pub fn divide_wire_by_equal_distance_to_points(
    wire: &Wire,
    n: usize,
    remove_start: bool,
    remove_end: bool,
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    sample::divide_by_equal_distance(&adaptor, n, remove_start, remove_end).map(positions)
}

/// Returns the points at explicit arc-length offsets from the wire's start,
/// in input order. Empty input yields empty output.
pub fn points_on_wire_at_lengths(
    wire: &Wire,
    lengths: &[f64],
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    sample::points_at_lengths(&adaptor, lengths).map(positions)
}

/// Walks `wire` in fixed arc-length steps and returns the visited points.
///
/// `try_next` emits the first overshooting step as an extrapolated point;
/// `include_first`/`include_last` add the wire's boundary points.
pub fn points_on_wire_at_equal_length(
    wire: &Wire,
    step: f64,
    try_next: bool,
    include_first: bool,
    include_last: bool,
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    sample::points_at_equal_length(&adaptor, step, try_next, include_first, include_last)
        .map(positions)
}

/// Walks `wire` by a cyclically repeated pattern of arc lengths and returns
/// the visited points. See
/// [`points_at_pattern_of_lengths`](sample::points_at_pattern_of_lengths)
/// for the accumulator and overshoot rules.
pub fn points_on_wire_at_pattern_of_lengths(
    wire: &Wire,
    pattern: &[f64],
    include_first: bool,
    include_last: bool,
    try_next: bool,
) -> Result<Vec<DVec3>, DiscretizeError> {
    let adaptor = WireAdaptor::new(wire)?;
    sample::points_at_pattern_of_lengths(&adaptor, pattern, include_first, include_last, try_next)
        .map(positions)
}
