//! # Wire Adaptor
//!
//! [`WireAdaptor`] presents a whole wire as a single [`ParamCurve`]: edge
//! parameter ranges are concatenated into one parameter space and edge
//! orientations are folded into evaluation, so the sampler never sees
//! individual edges.
//!
//! The adaptor's parameter space preserves each edge's **native**
//! parametrization (edge `i` occupies a span equal to its trimmed parameter
//! span), which keeps "uniform parameter steps" and "uniform arc-length
//! steps" genuinely different divisions.

use crate::arc_length;
use crate::curve::ParamCurve;
use crate::error::KernelError;
use crate::topology::Wire;
use config::constants::{EPSILON, ZERO_LENGTH_TOLERANCE};
use glam::DVec3;

#[derive(Debug, Clone, Copy)]
struct Span {
    param_start: f64,
    param_span: f64,
    length_start: f64,
    length: f64,
}

/// Composite-curve view over a [`Wire`].
#[derive(Debug)]
pub struct WireAdaptor<'w> {
    wire: &'w Wire,
    spans: Vec<Span>,
    total_param: f64,
    total_length: f64,
}

impl<'w> WireAdaptor<'w> {
    /// Builds an adaptor, measuring every edge once up front.
    ///
    /// # Errors
    ///
    /// [`KernelError::DegenerateGeometry`] when the wire has no usable
    /// length.
    pub fn new(wire: &'w Wire) -> Result<Self, KernelError> {
        let mut spans = Vec::with_capacity(wire.edge_count());
        let mut param_cursor = 0.0;
        let mut length_cursor = 0.0;
        for edge in wire.edges() {
            let param_span = edge.param_span();
            let length = edge.length();
            spans.push(Span {
                param_start: param_cursor,
                param_span,
                length_start: length_cursor,
                length,
            });
            param_cursor += param_span;
            length_cursor += length;
        }
        if length_cursor <= ZERO_LENGTH_TOLERANCE {
            return Err(KernelError::degenerate(format!(
                "Wire has no usable length ({length_cursor})"
            )));
        }
        Ok(Self {
            wire,
            spans,
            total_param: param_cursor,
            total_length: length_cursor,
        })
    }

    #[inline]
    pub fn wire(&self) -> &'w Wire {
        self.wire
    }

    /// Index of the span containing adaptor parameter `u`.
    ///
    /// Parameters past either end land in the first/last span, which then
    /// extrapolates with its own curve formulas.
    fn span_index_by_param(&self, u: f64) -> usize {
        if u <= 0.0 {
            return 0;
        }
        self.spans
            .iter()
            .rposition(|s| s.param_start <= u + EPSILON)
            .unwrap_or(self.spans.len() - 1)
    }

    fn span_index_by_length(&self, s: f64) -> usize {
        if s <= 0.0 {
            return 0;
        }
        self.spans
            .iter()
            .rposition(|sp| sp.length_start <= s + EPSILON)
            .unwrap_or(self.spans.len() - 1)
    }

    /// Maps an adaptor parameter to `(edge index, traversal offset)`.
    fn locate(&self, u: f64) -> (usize, f64) {
        let i = self.span_index_by_param(u);
        (i, u - self.spans[i].param_start)
    }
}

impl ParamCurve for WireAdaptor<'_> {
    fn value_at(&self, u: f64) -> DVec3 {
        let (i, t) = self.locate(u);
        self.wire.edges()[i].point_at_traversal(t)
    }

    fn derivatives_at(&self, u: f64) -> (DVec3, DVec3, DVec3) {
        let (i, t) = self.locate(u);
        let edge = &self.wire.edges()[i];
        let p = edge.traversal_to_curve_param(t);
        let (d1, d2, d3) = edge.curve().derivatives_at(p);
        if edge.orientation().is_reversed() {
            (-d1, d2, -d3)
        } else {
            (d1, d2, d3)
        }
    }

    fn first_param(&self) -> f64 {
        0.0
    }

    fn last_param(&self) -> f64 {
        self.total_param
    }

    fn is_closed(&self) -> bool {
        self.wire.is_closed()
    }

    fn length(&self) -> f64 {
        self.total_length
    }

    fn param_to_length(&self, u: f64) -> f64 {
        if u >= self.total_param {
            let (d1, _, _) = self.derivatives_at(self.total_param);
            return self.total_length + (u - self.total_param) * d1.length();
        }
        let (i, t) = self.locate(u);
        let span = self.spans[i];
        let edge = &self.wire.edges()[i];
        let (first, last) = edge.range();
        let partial = if edge.orientation().is_reversed() {
            arc_length::length_between(edge.curve(), last - t, last)
        } else {
            arc_length::length_between(edge.curve(), first, first + t)
        };
        span.length_start + partial
    }

    fn length_to_param(&self, length: f64) -> Result<f64, KernelError> {
        let tol = config::constants::ARC_LENGTH_TOLERANCE * self.total_length.max(1.0);
        if length < -tol || length > self.total_length + tol {
            return Err(KernelError::NumericConvergence {
                target: length,
                residual: if length < 0.0 {
                    length
                } else {
                    length - self.total_length
                },
                iterations: 0,
            });
        }
        let s = length.clamp(0.0, self.total_length);
        let i = self.span_index_by_length(s);
        let span = self.spans[i];
        let edge = &self.wire.edges()[i];
        let (first, last) = edge.range();
        let local = (s - span.length_start).clamp(0.0, span.length);
        let t = if edge.orientation().is_reversed() {
            let q = arc_length::param_at_length(
                edge.curve(),
                first,
                last,
                span.length - local,
                span.length,
            )?;
            last - q
        } else {
            let p = arc_length::param_at_length(edge.curve(), first, last, local, span.length)?;
            p - first
        };
        Ok(span.param_start + t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Curve3;
    use crate::topology::{Edge, Orientation};

    fn l_shape() -> Wire {
        let e1 = Edge::new(
            Curve3::line(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0)).unwrap(),
            Orientation::Forward,
        );
        let e2 = Edge::new(
            Curve3::line(DVec3::new(3.0, 0.0, 0.0), DVec3::new(3.0, 4.0, 0.0)).unwrap(),
            Orientation::Forward,
        );
        Wire::new(vec![e1, e2]).unwrap()
    }

    #[test]
    fn test_adaptor_total_length() {
        let wire = l_shape();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        assert!((adaptor.length() - 7.0).abs() < 1e-9);
        assert!((adaptor.last_param() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_adaptor_crosses_edge_boundary() {
        let wire = l_shape();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        // Parameter 1.5 is halfway along the second edge.
        let p = adaptor.value_at(1.5);
        assert!(p.distance(DVec3::new(3.0, 2.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_adaptor_length_round_trip() {
        let wire = l_shape();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        for s in [0.0, 1.0, 3.0, 4.5, 7.0] {
            let u = adaptor.length_to_param(s).unwrap();
            let back = adaptor.param_to_length(u);
            assert!((back - s).abs() < 1e-7, "length {s}, round trip {back}");
        }
    }

    #[test]
    fn test_adaptor_respects_reversed_edges() {
        // Same path as l_shape but the second edge's curve runs backwards.
        let e1 = Edge::new(
            Curve3::line(DVec3::ZERO, DVec3::new(3.0, 0.0, 0.0)).unwrap(),
            Orientation::Forward,
        );
        let e2 = Edge::new(
            Curve3::line(DVec3::new(3.0, 4.0, 0.0), DVec3::new(3.0, 0.0, 0.0)).unwrap(),
            Orientation::Reversed,
        );
        let wire = Wire::new(vec![e1, e2]).unwrap();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        let u = adaptor.length_to_param(5.0).unwrap();
        assert!(adaptor.value_at(u).distance(DVec3::new(3.0, 2.0, 0.0)) < 1e-9);
        // Tangent must follow traversal, not the underlying curve.
        let (d1, _, _) = adaptor.derivatives_at(u);
        assert!(d1.normalize().distance(DVec3::new(0.0, 1.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_adaptor_rejects_out_of_range_length() {
        let wire = l_shape();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        assert!(matches!(
            adaptor.length_to_param(8.0),
            Err(KernelError::NumericConvergence { .. })
        ));
    }

    #[test]
    fn test_adaptor_extrapolates_past_end() {
        let wire = l_shape();
        let adaptor = WireAdaptor::new(&wire).unwrap();
        // One unit of parameter past the end of the last (unit-speed-4) edge.
        let p = adaptor.value_at(2.25);
        assert!(p.distance(DVec3::new(3.0, 5.0, 0.0)) < 1e-9);
    }
}
