use std::{io, path::PathBuf};
use thiserror::Error;

/// Errors produced while using the switchshapes crate
#[derive(Debug, Error)]
pub enum SwitchShapesError {
    #[error("Unknown file type for file {path:?}")]
    /// The file type is unknown
    UnknownFileType {
        /// The path of the file
        path: PathBuf,
    },

    #[error("IO Error: {0}")]
    /// IO error
    IO(#[from] io::Error),

    #[error("JSON conversion error: {0}")]
    /// JSON conversion error
    JsonSerialize(#[from] serde_json::Error),

    #[error("Instance not found: {0}")]
    /// Could not find the specified instance
    InstanceNotFound(String),

    /// The font has no glyphs with bracket layers, so there is nothing to switch
    #[error("No bracket layers found")]
    NoBracketLayers,

    #[error("Invalid alternate glyph suffix '{0}'")]
    /// The suffix given for alternate glyphs cannot be used
    InvalidSuffix(String),

    #[error("Filter error: {0}")]
    /// General error when running a filter
    FilterError(String),
}
