//! # Stereo frames
//!
//! A rectified grayscale image pair, checked once on construction so the estimators can index
//! both images without further bounds checks on the pair itself.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::GrayImage;
use log::debug;

use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A validated, read-only rectified stereo pair.
///
/// Both images are non-empty and share the same dimensions.
#[derive(Debug, Clone)]
pub struct StereoFrame {
    left: GrayImage,
    right: GrayImage
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl StereoFrame {
    /// Build a frame from two already decoded images.
    pub fn new(left: GrayImage, right: GrayImage) -> Result<Self> {
        if left.width() == 0 || left.height() == 0 {
            return Err(Error::EmptyImage { side: Side::Left });
        }

        if right.width() == 0 || right.height() == 0 {
            return Err(Error::EmptyImage { side: Side::Right });
        }

        if left.dimensions() != right.dimensions() {
            return Err(Error::DimensionMismatch {
                left: left.dimensions(),
                right: right.dimensions()
            });
        }

        Ok(Self { left, right })
    }

    /// Load both images from disk, converting them to 8-bit grayscale.
    pub fn open<P: AsRef<Path>, Q: AsRef<Path>>(left_path: P, right_path: Q) -> Result<Self> {
        let left = load(left_path.as_ref(), Side::Left)?;
        let right = load(right_path.as_ref(), Side::Right)?;

        Self::new(left, right)
    }

    pub fn left(&self) -> &GrayImage {
        &self.left
    }

    pub fn right(&self) -> &GrayImage {
        &self.right
    }

    pub fn width(&self) -> u32 {
        self.left.width()
    }

    pub fn height(&self) -> u32 {
        self.left.height()
    }

    /// `(width, height)` of both images.
    pub fn dimensions(&self) -> (u32, u32) {
        self.left.dimensions()
    }

    /// Intensity of the left image at column `x`, row `y`, widened for cost arithmetic.
    #[inline]
    pub(crate) fn left_at(&self, x: usize, y: usize) -> i64 {
        self.left.get_pixel(x as u32, y as u32)[0] as i64
    }

    /// Intensity of the right image at column `x`, row `y`.
    #[inline]
    pub(crate) fn right_at(&self, x: usize, y: usize) -> i64 {
        self.right.get_pixel(x as u32, y as u32)[0] as i64
    }
}

fn load(path: &Path, side: Side) -> Result<GrayImage> {
    let img = image::open(path).map_err(|source| Error::Load {
        side,
        path: path.to_path_buf(),
        source
    })?;

    let gray = img.to_luma();
    debug!(
        "Loaded {} image {} ({}x{})",
        side, path.display(), gray.width(), gray.height()
    );

    Ok(gray)
}
