//! # Error standards
//!
//! This module provides a standardised error enum and result type for this crate.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::fmt;
use std::path::PathBuf;

// -----------------------------------------------------------------------------------------------
// TYPES
// -----------------------------------------------------------------------------------------------

/// Standard result type used in the stereo crate.
pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------
// ENUMERATIONS
// -----------------------------------------------------------------------------------------------

/// Which image of the stereo pair an input error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The image file could not be read or decoded.
    #[error("Could not load the {} image from {}: {}", .side, .path.display(), .source)]
    Load {
        side: Side,
        path: PathBuf,
        #[source]
        source: image::ImageError
    },

    /// The image has zero width or height.
    #[error("The {side} image is empty")]
    EmptyImage {
        side: Side
    },

    #[error(
        "Stereo images differ in size: left is {}x{}, right is {}x{}",
        .left.0, .left.1, .right.0, .right.1
    )]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32)
    },

    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Could not parse the parameters file: {0}")]
    Params(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[cfg(feature = "statistics")]
    #[error("Statistics plotting failed: {0}")]
    Statistics(String)
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right")
        }
    }
}
