//! PNG output of a finished [`Canvas`].
//!
//! Feature-gated behind `png` (default on) so the `image` crate stays
//! optional. The byte layout comes from [`crate::pixel`].

use flowart_core::{Canvas, FlowError};
use std::path::Path;

use crate::pixel::canvas_to_rgb;

/// Writes `canvas` to `path` as an RGB PNG.
///
/// Returns `FlowError::InvalidDimensions` if the canvas does not fit in
/// `u32`, or `FlowError::Io` on encode or write failure.
pub fn write_png(canvas: &Canvas, path: &Path) -> Result<(), FlowError> {
    let w = u32::try_from(canvas.width()).map_err(|_| FlowError::InvalidDimensions)?;
    let h = u32::try_from(canvas.height()).map_err(|_| FlowError::InvalidDimensions)?;
    let img = image::RgbImage::from_raw(w, h, canvas_to_rgb(canvas))
        .ok_or_else(|| FlowError::Io("RGB buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FlowError::Io(e.to_string()))?;
    log::info!("wrote {}x{} PNG to {}", w, h, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FlowSketch, SketchParams};
    use flowart_core::{FieldGeometry, Seeds, Srgb};

    #[test]
    fn write_png_round_trip() {
        let params = SketchParams {
            geometry: FieldGeometry::new(6, 4, 8.0, 0.25),
            lines: 3,
            steps: 8,
            ..SketchParams::default()
        };
        let mut sketch = FlowSketch::new(params, Seeds::all(12)).unwrap();
        sketch.render().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flow.png");
        write_png(sketch.canvas(), &path).unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        assert_eq!(img.width(), 48);
        assert_eq!(img.height(), 32);
        assert_eq!(img.into_raw(), canvas_to_rgb(sketch.canvas()));
    }

    #[test]
    fn write_png_to_missing_directory_is_io_error() {
        let canvas = Canvas::new(2, 2, Srgb::BLACK).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        assert!(matches!(write_png(&canvas, &path), Err(FlowError::Io(_))));
    }
}
