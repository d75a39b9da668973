//! # Configuration Constants
//!
//! Centralized constants for the B-rep discretization pipeline. All geometry
//! tolerances, tessellation parameters, and numeric-iteration limits are
//! defined here.
//!
//! ## Categories
//!
//! - **Precision**: Floating-point comparison tolerances
//! - **Matching**: Point/wire coincidence tolerances
//! - **Deflection**: Tessellation and discretization density controls
//! - **Numerics**: Arc-length integration and inversion limits
//! - **Limits**: Maximum values for safety bounds

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Epsilon for floating-point comparisons.
///
/// Used for determining if two floating-point values are "equal" within
/// numerical tolerance. This value is chosen to balance precision with
/// robustness against floating-point errors.
///
/// # Example
///
/// ```rust
/// use config::constants::EPSILON;
///
/// fn approximately_equal(a: f64, b: f64) -> bool {
///     (a - b).abs() < EPSILON
/// }
///
/// assert!(approximately_equal(1.0, 1.0 + 1e-11));
/// ```
pub const EPSILON: f64 = 1e-10;

/// Tolerance below which a curve or edge counts as zero-length.
///
/// Operations on geometry shorter than this fail with a degenerate-geometry
/// error rather than producing meaningless samples.
pub const ZERO_LENGTH_TOLERANCE: f64 = 1e-9;

/// Tolerance for comparing curve parameters.
///
/// Two parameters closer than this refer to the same curve position; a
/// trimmed parameter range narrower than this is degenerate.
pub const PARAM_TOLERANCE: f64 = 1e-9;

// =============================================================================
// MATCHING CONSTANTS
// =============================================================================

/// Distance below which two 3D points are considered coincident.
///
/// Used for wire contiguity validation, closed-wire detection, and the
/// closed-curve "first sample equals last sample" guarantee.
///
/// # Example
///
/// ```rust
/// use config::constants::POINT_COINCIDENCE_TOLERANCE;
///
/// let gap: f64 = 1e-8;
/// assert!(gap < POINT_COINCIDENCE_TOLERANCE);
/// ```
pub const POINT_COINCIDENCE_TOLERANCE: f64 = 1e-6;

/// Maximum distance at which a split point still matches a wire.
///
/// Points farther than this from every edge of the wire fail wire splitting
/// with a point-not-on-wire error.
pub const POINT_ON_WIRE_TOLERANCE: f64 = 1e-6;

/// Number of coarse samples per edge when locating a point on a wire.
///
/// The closest coarse sample seeds the parametric refinement; more samples
/// make the initial bracket tighter at the cost of more curve evaluations.
pub const POINT_LOCATION_SCAN_SAMPLES: usize = 64;

/// Refinement iterations when locating a point on an edge.
///
/// Each iteration shrinks the parameter bracket by one third (golden-section
/// style), so 48 iterations reduce the bracket by far more than the matching
/// tolerance requires.
pub const POINT_LOCATION_REFINE_ITERATIONS: usize = 48;

// =============================================================================
// DEFLECTION CONSTANTS
// =============================================================================

/// Angular deflection for surface tessellation, in radians.
///
/// The incremental mesh builder bounds the angle swept by any single
/// triangle strip across a curved surface by this value. Fixed by design;
/// only the linear precision varies per call.
pub const ANGULAR_DEFLECTION: f64 = 0.5;

/// Angular deflection for adaptive edge discretization, in radians.
///
/// Bounds the tangent rotation across one polyline segment, so point density
/// follows curvature rather than uniform parameter steps.
pub const CURVE_ANGULAR_DEFLECTION: f64 = 0.2;

/// Maximum recursion depth for adaptive edge discretization.
pub const DISCRETIZE_MAX_DEPTH: u32 = 16;

// =============================================================================
// NUMERICS CONSTANTS
// =============================================================================

/// Absolute tolerance for arc-length integration and inversion.
pub const ARC_LENGTH_TOLERANCE: f64 = 1e-9;

/// Maximum Newton/bisection iterations for arc-length inversion.
///
/// The inversion fails with a numeric-convergence error once this many
/// iterations pass without the residual dropping below
/// [`ARC_LENGTH_TOLERANCE`].
pub const ARC_LENGTH_MAX_ITERATIONS: u32 = 64;

/// Maximum recursion depth for adaptive Simpson arc-length integration.
pub const INTEGRATION_MAX_DEPTH: u32 = 20;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum subdivisions per parametric direction when tessellating a face.
///
/// Safety bound: a tiny linear precision on a large curved face would
/// otherwise request an unbounded grid.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_SURFACE_SEGMENTS;
///
/// let requested: u32 = 1_000_000;
/// let clamped = requested.min(MAX_SURFACE_SEGMENTS);
/// assert_eq!(clamped, MAX_SURFACE_SEGMENTS);
/// ```
pub const MAX_SURFACE_SEGMENTS: u32 = 256;
