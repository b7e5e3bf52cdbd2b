//! Flattens a [`Canvas`] into a packed RGB8 byte buffer.
//!
//! Kept free of the `image` crate so callers without the `png` feature can
//! still hand the bytes to another encoder.

use flowart_core::Canvas;

/// Packed `[r, g, b, r, g, b, ...]` bytes, row-major, `width * height * 3` long.
pub fn canvas_to_rgb(canvas: &Canvas) -> Vec<u8> {
    canvas.pixels().iter().flatten().copied().collect()
}
