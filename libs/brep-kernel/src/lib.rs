//! # B-rep Kernel
//!
//! Minimal geometric kernel surface for the discretization pipeline.
//!
//! ## Architecture
//!
//! ```text
//! brep-kernel (curves, topology, tessellation) → brep-discretize (sampling, extraction)
//! ```
//!
//! The crate provides exactly what the discretization engine consumes:
//! curve/surface evaluation, arc-length integration and inversion, topology,
//! per-face triangulation with a shape-level cache, adaptive
//! tangential-deflection discretization, and rigid transforms. It is not a
//! modeling kernel: no booleans, no fillets, no solid construction beyond
//! the builders in [`primitives`].
//!
//! All evaluation is deterministic and single-threaded. The only mutable
//! state is the per-face triangulation cache, which callers bracket with
//! [`shape::Shape::invalidate_triangulations`].

pub mod adaptor;
pub mod arc_length;
pub mod curve;
pub mod discretize;
pub mod error;
pub mod primitives;
pub mod shape;
pub mod surface;
pub mod tessellate;
pub mod topology;
pub mod transform;

pub use adaptor::WireAdaptor;
pub use curve::{Curve3, ParamCurve};
pub use discretize::discretize_edge;
pub use error::KernelError;
pub use shape::{Face, Shape, Triangulation};
pub use surface::Surface;
pub use tessellate::tessellate_shape;
pub use topology::{Edge, Orientation, Vertex, Wire};
pub use transform::{Transformable, Trsf};
