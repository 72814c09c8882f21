//! # Stereo parameters
//!
//! Every tunable used by the estimators and the point cloud projector lives in [`Params`], which
//! can be built in code or loaded from a TOML file.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::*;
use crate::frame::StereoFrame;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Camera and matching parameters.
///
/// Fields missing from a parameters file take their default value.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Params {
    /// Side length of the square correlation window. Must be odd.
    pub window_size: usize,

    /// Disparity added by image cropping. Accepted for completeness, the naive search always
    /// covers the full image width.
    pub min_disparity: i32,

    /// Cost of skipping a column in the scanline alignment.
    pub occlusion_weight: f64,

    /// Multiplier applied to disparities before they are stored in a map.
    pub disparity_scale: f64,

    /// Focal length in pixels.
    pub focal_length: f64,

    /// Distance between the two camera centres.
    pub baseline: f64
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            window_size: 3,
            min_disparity: 67,
            occlusion_weight: 500.0,
            disparity_scale: 3.0,
            focal_length: 1247.0,
            baseline: 213.0
        }
    }
}

impl Params {
    /// Load parameters from a TOML file and validate them.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let params: Params = toml::from_str(&contents)?;

        debug!("Loaded parameters from {}: {:?}", path.display(), params);

        params.validate()?;
        Ok(params)
    }

    /// Check every parameter that does not depend on the images.
    pub fn validate(&self) -> Result<()> {
        self.validate_matching()?;
        self.validate_camera()
    }

    /// Check the matching parameters against the frame they are about to be used on.
    ///
    /// The camera parameters are left to [`Params::validate`], the estimators never read them.
    pub fn validate_for(&self, frame: &StereoFrame) -> Result<()> {
        self.validate_matching()?;

        let (width, height) = frame.dimensions();
        let limit = width.min(height) as usize;

        if self.window_size > limit {
            return Err(Error::Configuration(format!(
                "window_size {} exceeds the {}x{} image", self.window_size, width, height
            )));
        }

        Ok(())
    }

    fn validate_matching(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::Configuration(
                "window_size must be at least 1".into()
            ));
        }

        if self.window_size % 2 == 0 {
            return Err(Error::Configuration(format!(
                "window_size must be odd, got {}", self.window_size
            )));
        }

        if !self.occlusion_weight.is_finite() || self.occlusion_weight < 0.0 {
            return Err(Error::Configuration(format!(
                "occlusion_weight must be finite and non-negative, got {}",
                self.occlusion_weight
            )));
        }

        if !self.disparity_scale.is_finite() || self.disparity_scale < 0.0 {
            return Err(Error::Configuration(format!(
                "disparity_scale must be finite and non-negative, got {}",
                self.disparity_scale
            )));
        }

        Ok(())
    }

    fn validate_camera(&self) -> Result<()> {
        if !self.focal_length.is_finite() || self.focal_length <= 0.0 {
            return Err(Error::Configuration(format!(
                "focal_length must be finite and positive, got {}", self.focal_length
            )));
        }

        if !self.baseline.is_finite() || self.baseline <= 0.0 {
            return Err(Error::Configuration(format!(
                "baseline must be finite and positive, got {}", self.baseline
            )));
        }

        Ok(())
    }

    /// Half the window size, the margin kept free on each side of a pixel.
    pub fn half_window(&self) -> usize {
        self.window_size / 2
    }
}
