//! # Config Crate
//!
//! Centralized configuration constants for the B-rep discretization pipeline.
//! All tolerances, deflection defaults, and numeric-iteration limits are
//! defined here so the kernel and the discretization engine agree on every
//! tunable value.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EPSILON, POINT_COINCIDENCE_TOLERANCE};
//!
//! fn points_coincide(a: [f64; 3], b: [f64; 3]) -> bool {
//!     let d2 = (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2);
//!     d2.sqrt() < POINT_COINCIDENCE_TOLERANCE
//! }
//!
//! assert!(points_coincide([0.0, 0.0, 0.0], [0.0, 0.0, 1e-8]));
//! assert!(EPSILON < POINT_COINCIDENCE_TOLERANCE);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Deterministic**: No runtime configuration, no environment lookups
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
