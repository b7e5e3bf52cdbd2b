//! Bezier curve over an arbitrary number of control points.
//!
//! Evaluation uses de Casteljau's algorithm: blend every adjacent pair of
//! points at `t`, which leaves one point fewer, and repeat until a single
//! point remains. The reduction runs in place over one scratch buffer.

use glam::DVec2;

use crate::error::FlowError;

/// Bezier curve defined by at least two control points.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierCurve {
    points: Vec<DVec2>,
}

impl BezierCurve {
    /// Creates a curve from its control points.
    ///
    /// Returns `FlowError::InvalidInput` for fewer than two points.
    pub fn new(points: Vec<DVec2>) -> Result<Self, FlowError> {
        if points.len() < 2 {
            return Err(FlowError::InvalidInput(format!(
                "a curve needs at least 2 control points, got {}",
                points.len()
            )));
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[DVec2] {
        &self.points
    }

    /// Polynomial degree, one less than the control point count.
    pub fn degree(&self) -> usize {
        self.points.len() - 1
    }

    /// Point on the curve at `t`.
    ///
    /// `t` outside [0, 1] extrapolates.
    pub fn evaluate(&self, t: f64) -> DVec2 {
        let mut scratch = Vec::with_capacity(self.points.len());
        self.evaluate_with(t, &mut scratch)
    }

    /// Same as [`evaluate`](Self::evaluate), reusing `scratch` as the
    /// working buffer.
    pub fn evaluate_with(&self, t: f64, scratch: &mut Vec<DVec2>) -> DVec2 {
        scratch.clear();
        scratch.extend_from_slice(&self.points);
        for len in (1..self.points.len()).rev() {
            for i in 0..len {
                let start = scratch[i];
                let end = scratch[i + 1];
                scratch[i] = start + (end - start) * t;
            }
        }
        scratch[0]
    }

    /// Evaluates the curve at `count` evenly spaced parameters from 0 to 1
    /// inclusive.
    ///
    /// `count == 1` yields only the start point; `count == 0` yields nothing.
    pub fn sample(&self, count: usize) -> Vec<DVec2> {
        let mut scratch = Vec::with_capacity(self.points.len());
        match count {
            0 => Vec::new(),
            1 => vec![self.evaluate_with(0.0, &mut scratch)],
            _ => {
                let last = (count - 1) as f64;
                (0..count)
                    .map(|i| self.evaluate_with(i as f64 / last, &mut scratch))
                    .collect()
            }
        }
    }
}
