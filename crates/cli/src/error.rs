//! CLI errors, each mapped to its own exit code.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: sketch error (bad dimensions, bad parameters, degenerate curve)
//! - 11: I/O error (PNG write)
//! - 12: input error (bad `--params` JSON, bad color)
//! - 13: serialization error

use flowart_core::FlowError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    /// The sketch could not be built or drawn.
    Sketch(FlowError),
    /// Writing the image failed.
    Io(String),
    /// Malformed user input.
    Input(String),
    /// JSON output could not be produced.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Sketch(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Sketch(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl From<FlowError> for CliError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            FlowError::InvalidColor(msg) => CliError::Input(format!("invalid color: {msg}")),
            other => CliError::Sketch(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
