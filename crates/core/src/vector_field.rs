//! Grid of velocity vectors that pushes points across the canvas.
//!
//! Cell `(x, y)` sits at canvas position `(x * resolution, y * resolution)`.
//! One integration step moves a point by the sum of every cell vector within
//! `radius` of it. The grid is filled once at construction and never changes.
//!
//! Cells are stored column-major (`x * rows + y`), which is also the order in
//! which random draws are consumed during generation and the order in which
//! displacements are summed.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use crate::error::FlowError;
use crate::prng::Xorshift64;

/// Grid shape and reach of a [`VectorField`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldGeometry {
    /// Number of grid columns.
    pub columns: usize,
    /// Number of grid rows.
    pub rows: usize,
    /// Canvas units between neighbouring cells.
    pub resolution: f64,
    /// Reach of a cell as a fraction of the larger canvas dimension.
    pub radius: f64,
}

impl FieldGeometry {
    /// Describes a `columns` x `rows` grid. Values are checked when a field
    /// is built from it.
    pub fn new(columns: usize, rows: usize, resolution: f64, radius: f64) -> Self {
        Self {
            columns,
            rows,
            resolution,
            radius,
        }
    }

    /// Canvas width covered by the grid.
    pub fn width(&self) -> f64 {
        self.columns as f64 * self.resolution
    }

    /// Canvas height covered by the grid.
    pub fn height(&self) -> f64 {
        self.rows as f64 * self.resolution
    }

    /// Returns the cell count, checking dimensions and scalar ranges.
    fn validate(&self) -> Result<usize, FlowError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        let len = self
            .columns
            .checked_mul(self.rows)
            .ok_or(FlowError::InvalidDimensions)?;
        if !self.resolution.is_finite() || self.resolution <= 0.0 {
            return Err(FlowError::parameter(
                "resolution",
                format!("must be a positive finite number, got {}", self.resolution),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(FlowError::parameter(
                "radius",
                format!("must be a non-negative finite number, got {}", self.radius),
            ));
        }
        Ok(len)
    }
}

/// Immutable velocity grid with a pre-scaled influence radius.
#[derive(Debug, Clone)]
pub struct VectorField {
    geometry: FieldGeometry,
    radius_px: f64,
    radius_sq: f64,
    cells: Vec<DVec2>,
}

impl VectorField {
    /// Fills a new grid from `rng`.
    ///
    /// Each cell draws an angle in [0, 2π) and then a magnitude in
    /// [0, max_velocity), and stores the polar vector shifted by
    /// `(max_velocity / 4, max_velocity / 15)` so traces share a drift.
    /// Draws are taken column by column, so a given generator state always
    /// yields the same grid.
    pub fn generate(
        geometry: FieldGeometry,
        max_velocity: f64,
        rng: &mut Xorshift64,
    ) -> Result<Self, FlowError> {
        let len = geometry.validate()?;
        if !max_velocity.is_finite() || max_velocity < 0.0 {
            return Err(FlowError::parameter(
                "max_velocity",
                format!("must be a non-negative finite number, got {max_velocity}"),
            ));
        }

        let drift = DVec2::new(max_velocity / 4.0, max_velocity / 15.0);
        let cells: Vec<DVec2> = (0..len)
            .map(|_| {
                let angle = TAU * rng.next_f64();
                let magnitude = max_velocity * rng.next_f64();
                DVec2::new(magnitude * angle.cos(), magnitude * angle.sin()) + drift
            })
            .collect();

        log::debug!(
            "generated {}x{} vector field (max velocity {max_velocity})",
            geometry.columns,
            geometry.rows
        );
        Self::from_cells(geometry, cells)
    }

    /// Builds a field from explicit column-major cell vectors.
    ///
    /// Returns `FlowError::DimensionMismatch` if `cells` does not hold exactly
    /// `columns * rows` vectors.
    pub fn from_cells(geometry: FieldGeometry, cells: Vec<DVec2>) -> Result<Self, FlowError> {
        let len = geometry.validate()?;
        if cells.len() != len {
            return Err(FlowError::DimensionMismatch {
                expected: len,
                got: cells.len(),
            });
        }
        let radius_px = geometry.radius * geometry.width().max(geometry.height());
        Ok(Self {
            geometry,
            radius_px,
            radius_sq: radius_px * radius_px,
            cells,
        })
    }

    /// Shape the field was built with.
    pub fn geometry(&self) -> &FieldGeometry {
        &self.geometry
    }

    /// Field width in cells.
    pub fn columns(&self) -> usize {
        self.geometry.columns
    }

    /// Field height in cells.
    pub fn rows(&self) -> usize {
        self.geometry.rows
    }

    /// Canvas units between neighbouring cells.
    pub fn resolution(&self) -> f64 {
        self.geometry.resolution
    }

    /// Influence radius in canvas units.
    pub fn radius(&self) -> f64 {
        self.radius_px
    }

    /// Canvas width covered by the grid.
    pub fn width(&self) -> f64 {
        self.geometry.width()
    }

    /// Canvas height covered by the grid.
    pub fn height(&self) -> f64 {
        self.geometry.height()
    }

    /// Column-major cell vectors.
    pub fn cells(&self) -> &[DVec2] {
        &self.cells
    }

    /// Vector at grid cell `(x, y)`, or `None` outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> Option<DVec2> {
        if x >= self.geometry.columns || y >= self.geometry.rows {
            return None;
        }
        Some(self.cells[x * self.geometry.rows + y])
    }

    /// Canvas position of the cell at column-major index `i`.
    fn node(&self, i: usize) -> DVec2 {
        let x = i / self.geometry.rows;
        let y = i % self.geometry.rows;
        DVec2::new(x as f64, y as f64) * self.geometry.resolution
    }

    fn in_reach(&self, i: usize, point: DVec2) -> bool {
        self.node(i).distance_squared(point) <= self.radius_sq
    }

    /// Moves `point` by one integration step.
    ///
    /// Scans the whole grid and adds every cell whose node lies within the
    /// radius (inclusive, compared squared). A point with no cell in reach
    /// comes back unchanged.
    #[cfg(not(feature = "parallel"))]
    pub fn advance(&self, point: DVec2) -> DVec2 {
        (0..self.cells.len())
            .filter(|&i| self.in_reach(i, point))
            .fold(point, |acc, i| acc + self.cells[i])
    }

    /// Moves `point` by one integration step.
    ///
    /// Scans the whole grid and adds every cell whose node lies within the
    /// radius (inclusive, compared squared). A point with no cell in reach
    /// comes back unchanged.
    // Only the range test runs in parallel; the indices come back in order
    // so the sum matches the sequential build bit for bit.
    #[cfg(feature = "parallel")]
    pub fn advance(&self, point: DVec2) -> DVec2 {
        use rayon::prelude::*;
        let in_reach: Vec<usize> = (0..self.cells.len())
            .into_par_iter()
            .filter(|&i| self.in_reach(i, point))
            .collect();
        in_reach
            .into_iter()
            .fold(point, |acc, i| acc + self.cells[i])
    }

    /// Integrates `steps` times from `start`.
    ///
    /// The result holds `start` followed by every intermediate position,
    /// `steps + 1` points in total.
    pub fn trace(&self, start: DVec2, steps: usize) -> Vec<DVec2> {
        let mut points = Vec::with_capacity(steps.saturating_add(1));
        points.push(start);
        let mut current = start;
        for _ in 0..steps {
            current = self.advance(current);
            points.push(current);
        }
        points
    }
}
