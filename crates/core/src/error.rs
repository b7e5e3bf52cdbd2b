//! Error types for the flowart core.

use thiserror::Error;

/// Errors produced while building fields, curves, and canvases.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A grid or canvas was requested with a zero (or overflowing) size.
    #[error("invalid dimensions: columns/rows and width/height must be non-zero")]
    InvalidDimensions,

    /// Input that cannot define the requested object, e.g. a curve with
    /// fewer than two control points.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A scalar parameter was out of its valid range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// An explicit cell list did not match the grid dimensions.
    #[error("dimension mismatch: expected {expected} cells, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Writing the rendered image failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl FlowError {
    pub(crate) fn parameter(name: &str, reason: impl Into<String>) -> Self {
        FlowError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_dimensions_mentions_columns_and_rows() {
        let msg = FlowError::InvalidDimensions.to_string();
        assert!(
            msg.contains("columns") && msg.contains("rows"),
            "expected message mentioning columns and rows, got: {msg}"
        );
    }

    #[test]
    fn invalid_input_includes_reason() {
        let err = FlowError::InvalidInput("curve needs at least 2 points, got 1".into());
        let msg = err.to_string();
        assert!(msg.contains("at least 2"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_parameter_includes_name_and_reason() {
        let err = FlowError::parameter("resolution", "must be positive");
        let msg = err.to_string();
        assert!(msg.contains("resolution"), "missing name in: {msg}");
        assert!(msg.contains("positive"), "missing reason in: {msg}");
    }

    #[test]
    fn dimension_mismatch_includes_counts() {
        let err = FlowError::DimensionMismatch {
            expected: 576,
            got: 575,
        };
        let msg = err.to_string();
        assert!(msg.contains("576"), "missing expected in: {msg}");
        assert!(msg.contains("575"), "missing got in: {msg}");
    }

    #[test]
    fn io_includes_message() {
        let msg = FlowError::Io("disk full".into()).to_string();
        assert!(msg.contains("disk full"), "missing message in: {msg}");
    }

    #[test]
    fn flow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }

    #[test]
    fn flow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FlowError>();
    }
}
