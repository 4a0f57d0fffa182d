//! # Error standards
//!
//! This module provides a standardised error enum and result type for this crate.

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the obstacle crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Detector has no background map, construct it with one before detecting")]
    Uninitialised,

    #[error("Scene is {scene:?} but the background map is {background:?}")]
    DimensionMismatch {
        scene: (u32, u32),
        background: (u32, u32),
    },

    #[error("Disparity map has zero width or height")]
    EmptyMap,

    #[error("Invalid detection parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to read parameters file")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse parameters file")]
    Config(#[from] serde_json::Error),

    #[cfg(feature = "statistics")]
    #[error("Error was thrown while plotting statistics: {0}")]
    Plot(String),
}
