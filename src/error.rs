//! Error types for the qmaze crate

use thiserror::Error;

use crate::types::Position;

/// Main error type for the qmaze crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid grid dimensions {rows}x{cols} (rows and columns must be at least 1)")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("{role} position {position} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        role: &'static str,
        position: Position,
        rows: usize,
        cols: usize,
    },

    #[error("{role} position {position} is a wall")]
    BlockedEndpoint {
        role: &'static str,
        position: Position,
    },

    #[error("state {state} has no valid actions (cell is fully enclosed)")]
    NoValidActions { state: Position },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
