#![deny(unsafe_code)]
//! Flow-line sketch: traces points through a [`VectorField`], smooths each
//! trace with a [`BezierCurve`], and strokes the result onto a [`Canvas`].
//!
//! The CPU pixel conversion lives in [`pixel`]; PNG output is in
//! [`snapshot`] behind the default `png` feature.

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use flowart_core::color::stroke_color;
use flowart_core::params::{param_f64, param_opt_u64, param_string, param_usize};
use flowart_core::{
    BezierCurve, Canvas, DVec2, FieldGeometry, FlowError, ResolvedSeeds, Seeds, Srgb,
    VectorField, Xorshift64,
};
use serde_json::{json, Value};

const DEFAULT_COLUMNS: usize = 32;
const DEFAULT_ROWS: usize = 18;
/// Canvas units between grid nodes.
const DEFAULT_RESOLUTION: f64 = 50.0;
/// Influence radius as a fraction of the larger canvas side.
const DEFAULT_RADIUS: f64 = 0.1;
const DEFAULT_MAX_VELOCITY: f64 = 10.0;
/// Integration steps per traced line.
const DEFAULT_STEPS: usize = 50;
const DEFAULT_LINES: usize = 40;
/// Upper bound on `steps`; each step scans the whole grid.
const MAX_STEPS: usize = 1_000_000;
const DEFAULT_BACKGROUND: &str = "#000000";
/// Stroke widths are drawn uniformly from this inclusive range.
const STROKE_WIDTH_MIN: u32 = 3;
const STROKE_WIDTH_MAX: u32 = 8;

/// Tunable parameters of a flow-line sketch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchParams {
    pub geometry: FieldGeometry,
    /// Largest random per-cell speed before drift is added.
    pub max_velocity: f64,
    /// Integration steps per line.
    pub steps: usize,
    /// Lines drawn by [`FlowSketch::render`].
    pub lines: usize,
    pub background: Srgb,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            geometry: FieldGeometry::new(
                DEFAULT_COLUMNS,
                DEFAULT_ROWS,
                DEFAULT_RESOLUTION,
                DEFAULT_RADIUS,
            ),
            max_velocity: DEFAULT_MAX_VELOCITY,
            steps: DEFAULT_STEPS,
            lines: DEFAULT_LINES,
            background: Srgb::BLACK,
        }
    }
}

impl SketchParams {
    /// Reads parameters from a JSON object, falling back to defaults for
    /// missing or mistyped keys.
    ///
    /// Fails only on an unparsable `background` color.
    pub fn from_json(params: &Value) -> Result<Self, FlowError> {
        let background = param_string(params, "background", DEFAULT_BACKGROUND);
        Ok(Self {
            geometry: FieldGeometry::new(
                param_usize(params, "columns", DEFAULT_COLUMNS),
                param_usize(params, "rows", DEFAULT_ROWS),
                param_f64(params, "resolution", DEFAULT_RESOLUTION),
                param_f64(params, "radius", DEFAULT_RADIUS),
            ),
            max_velocity: param_f64(params, "max_velocity", DEFAULT_MAX_VELOCITY),
            steps: param_usize(params, "steps", DEFAULT_STEPS),
            lines: param_usize(params, "lines", DEFAULT_LINES),
            background: Srgb::from_hex(&background)?,
        })
    }

    /// Current values as a flat JSON object, readable by [`from_json`](Self::from_json).
    pub fn to_json(&self) -> Value {
        json!({
            "columns": self.geometry.columns,
            "rows": self.geometry.rows,
            "resolution": self.geometry.resolution,
            "radius": self.geometry.radius,
            "max_velocity": self.max_velocity,
            "steps": self.steps,
            "lines": self.lines,
            "background": self.background.to_hex(),
        })
    }

    /// Canvas size in pixels: the grid extent rounded to whole pixels.
    pub fn canvas_size(&self) -> (usize, usize) {
        (
            self.geometry.width().round() as usize,
            self.geometry.height().round() as usize,
        )
    }

    /// Curve samples per line: half the larger canvas side.
    pub fn sample_count(&self) -> usize {
        let (w, h) = self.canvas_size();
        w.max(h) / 2
    }

    /// Describes every parameter, its type, and its default.
    pub fn param_schema() -> Value {
        json!({
            "columns": {
                "type": "integer", "default": DEFAULT_COLUMNS, "min": 1,
                "description": "Grid columns"
            },
            "rows": {
                "type": "integer", "default": DEFAULT_ROWS, "min": 1,
                "description": "Grid rows"
            },
            "resolution": {
                "type": "number", "default": DEFAULT_RESOLUTION, "min": 0.0,
                "description": "Canvas pixels between grid nodes"
            },
            "radius": {
                "type": "number", "default": DEFAULT_RADIUS, "min": 0.0,
                "description": "Cell reach as a fraction of the larger canvas side"
            },
            "max_velocity": {
                "type": "number", "default": DEFAULT_MAX_VELOCITY, "min": 0.0,
                "description": "Largest random per-cell speed"
            },
            "steps": {
                "type": "integer", "default": DEFAULT_STEPS, "min": 1, "max": MAX_STEPS,
                "description": "Integration steps per line"
            },
            "lines": {
                "type": "integer", "default": DEFAULT_LINES, "min": 0,
                "description": "Number of lines to draw"
            },
            "background": {
                "type": "string", "default": DEFAULT_BACKGROUND,
                "description": "Background color as #rrggbb"
            },
            "vector_seed": {
                "type": "integer", "default": null,
                "description": "Seed for the velocity grid (random when unset)"
            },
            "line_seed": {
                "type": "integer", "default": null,
                "description": "Seed for line start points (random when unset)"
            },
            "color_seed": {
                "type": "integer", "default": null,
                "description": "Seed for stroke hue and width (random when unset)"
            }
        })
    }
}

/// Reads `vector_seed`, `line_seed`, and `color_seed` from a params object.
pub fn seeds_from_json(params: &Value) -> Seeds {
    Seeds {
        vectors: param_opt_u64(params, "vector_seed"),
        lines: param_opt_u64(params, "line_seed"),
        colors: param_opt_u64(params, "color_seed"),
    }
}

/// Style and start point of one line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub start: DVec2,
    pub color: [u8; 3],
    pub width: u32,
}

/// A flow-line drawing in progress.
pub struct FlowSketch {
    params: SketchParams,
    seeds: ResolvedSeeds,
    field: VectorField,
    canvas: Canvas,
    line_rng: Xorshift64,
    color_rng: Xorshift64,
}

impl FlowSketch {
    /// Builds the field from the vectors stream and allocates a blank canvas.
    ///
    /// Returns `FlowError::InvalidParameter` if `steps` is 0 or above
    /// the supported maximum.
    pub fn new(params: SketchParams, seeds: Seeds) -> Result<Self, FlowError> {
        if params.steps == 0 || params.steps > MAX_STEPS {
            return Err(FlowError::InvalidParameter {
                name: "steps".into(),
                reason: format!("must be in [1, {MAX_STEPS}], got {}", params.steps),
            });
        }
        let seeds = seeds.resolve();
        let mut streams = seeds.streams();
        let field =
            VectorField::generate(params.geometry, params.max_velocity, &mut streams.vectors)?;
        let (width, height) = params.canvas_size();
        let canvas = Canvas::new(width, height, params.background)?;
        log::debug!(
            "sketch {width}x{height}, radius {:.1}px, seeds {seeds:?}",
            field.radius()
        );
        Ok(Self {
            params,
            seeds,
            field,
            canvas,
            line_rng: streams.lines,
            color_rng: streams.colors,
        })
    }

    /// Parameters the sketch was built with.
    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    /// Seeds actually in use; pass them back to replay this sketch.
    pub fn seeds(&self) -> ResolvedSeeds {
        self.seeds
    }

    /// Velocity grid driving every line.
    pub fn field(&self) -> &VectorField {
        &self.field
    }

    /// Canvas with every line drawn so far.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draws the next start point from the lines stream, then hue and
    /// stroke width from the colors stream.
    pub fn next_stroke(&mut self) -> Stroke {
        let x = self.line_rng.next_f64() * self.field.width();
        let y = self.line_rng.next_f64() * self.field.height();
        let color = stroke_color(&mut self.color_rng);
        let width = self
            .color_rng
            .next_int_inclusive(STROKE_WIDTH_MIN, STROKE_WIDTH_MAX);
        Stroke {
            start: DVec2::new(x, y),
            color,
            width,
        }
    }

    /// Traces from `stroke.start`, smooths the trace, and strokes it.
    pub fn draw_line(&mut self, stroke: Stroke) -> Result<(), FlowError> {
        let trace = self.field.trace(stroke.start, self.params.steps);
        let curve = BezierCurve::new(trace)?;
        let samples = curve.sample(self.params.sample_count());
        self.canvas.draw_polyline(&samples, stroke.color, stroke.width);
        log::debug!(
            "line from ({:.1}, {:.1}) width {} -> {} samples",
            stroke.start.x,
            stroke.start.y,
            stroke.width,
            samples.len()
        );
        Ok(())
    }

    /// Draws `lines` lines with fresh strokes.
    pub fn generate(&mut self, lines: usize) -> Result<(), FlowError> {
        for _ in 0..lines {
            let stroke = self.next_stroke();
            self.draw_line(stroke)?;
        }
        log::info!(
            "drew {lines} lines on {}x{} canvas",
            self.canvas.width(),
            self.canvas.height()
        );
        Ok(())
    }

    /// Draws `params.lines` lines.
    pub fn render(&mut self) -> Result<(), FlowError> {
        self.generate(self.params.lines)
    }

    /// Consumes the sketch, returning the finished canvas.
    pub fn into_canvas(self) -> Canvas {
        self.canvas
    }
}
