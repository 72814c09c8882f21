//! # Stereo Reconstruction
//!
//! This crate provides disparity map computation for rectified grayscale stereo pairs and the
//! reconstruction of a 3D point cloud from the resulting disparities.
//!
//! Two estimators are available:
//!
//! - [`naive::Naive`] – independent per-pixel block matching with a windowed SSD cost.
//! - [`dynamic::Dynamic`] – per-scanline dynamic programming alignment with explicit occlusions.
//!
//! # Features
//!
//! - `rayon` – processes image rows in parallel. Results are identical to the sequential path.
//! - `statistics` – plots per-scanline match counts of the dynamic estimator with `plotters`.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod align;
pub mod cloud;
pub mod cost;
mod disparity;
pub mod dynamic;
pub mod error;
mod frame;
pub mod naive;
pub mod occlusion;
mod params;

// -----------------------------------------------------------------------------------------------
// EXPORTS
// -----------------------------------------------------------------------------------------------

pub mod prelude {
    pub use crate::cloud::{project, Point};
    pub use crate::disparity::{DisparityAlgorithm, DisparityMap};
    pub use crate::error::{Error, Result, Side};
    pub use crate::frame::StereoFrame;
    pub use crate::params::Params;
}
