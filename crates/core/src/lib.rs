#![deny(unsafe_code)]
//! Core types for the flowart flow-field renderer.
//!
//! Provides the velocity grid (`VectorField`), the de Casteljau
//! `BezierCurve` used to smooth traces, the RGB `Canvas` raster, stroke
//! colors, the `Xorshift64` PRNG with per-stream `Seeds`, and the JSON
//! parameter helpers.

pub mod canvas;
pub mod color;
pub mod curve;
pub mod error;
pub mod params;
pub mod prng;
pub mod seed;
pub mod vector_field;

pub use canvas::Canvas;
pub use color::Srgb;
pub use curve::BezierCurve;
pub use error::FlowError;
pub use prng::Xorshift64;
pub use seed::{ResolvedSeeds, Seeds, Streams};
pub use vector_field::{FieldGeometry, VectorField};

pub use glam::DVec2;
