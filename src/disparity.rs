//! # General disparity objects
//!
//! This module provides generic disparity traits and structures for use by different algorithms.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::Path;

use image::{GrayImage, Luma};
use crate::error::*;
use crate::frame::StereoFrame;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A generic 8-bit disparity map.
///
/// A value of 0 means no valid disparity was found for that cell.
#[derive(Debug, Clone)]
pub struct DisparityMap {
    data: GrayImage,
    pub max_disp: Option<u8>,
    pub min_disp: Option<u8>
}

// -----------------------------------------------------------------------------------------------
// TRAITS
// -----------------------------------------------------------------------------------------------

pub trait DisparityAlgorithm {
    /// Compute the disparity map of the given stereo frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap>;
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl DisparityMap {
    pub fn new(width: usize, height: usize) -> Self {
        DisparityMap {
            data: GrayImage::new(width as u32, height as u32),
            min_disp: None,
            max_disp: None
        }
    }

    /// Build a map from equally long rows, updating the disparity range.
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<u8>>) -> Self {
        let mut map = DisparityMap::new(width, rows.len());

        for (y, row) in rows.iter().enumerate() {
            for (x, &val) in row.iter().enumerate() {
                map.put(x, y, val);
            }
        }

        map.update_range();
        map
    }

    pub fn width(&self) -> usize {
        self.data.width() as usize
    }

    pub fn height(&self) -> usize {
        self.data.height() as usize
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.data.get_pixel(x as u32, y as u32)[0]
    }

    pub fn put(&mut self, x: usize, y: usize, val: u8) {
        self.data.put_pixel(x as u32, y as u32, Luma([val]))
    }

    /// Iterate over the values of row `y`.
    pub fn row(&self, y: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.width()).map(move |x| self.get(x, y))
    }

    /// Recompute `min_disp` and `max_disp` from the non-zero values in the map.
    pub fn update_range(&mut self) {
        let valid = self.data.pixels().map(|p| p[0]).filter(|&v| v > 0);

        let (min, max) = valid.fold((None, None), |(min, max): (Option<u8>, Option<u8>), v| {
            (
                Some(min.map_or(v, |m| m.min(v))),
                Some(max.map_or(v, |m| m.max(v)))
            )
        });

        self.min_disp = min;
        self.max_disp = max;
    }

    /// Converts the map into a Luma8 image holding the raw disparity values.
    pub fn to_luma(&self) -> GrayImage {
        self.data.clone()
    }

    /// Converts the map to a normalised GrayImage.
    ///
    /// Normalises by the maximum observed disparity in the map. If the maximum disparity is not
    /// set then the function is equivalent to `.to_luma()`.
    pub fn to_luma_normalised(&self) -> GrayImage {
        let max = match self.max_disp {
            Some(d) if d > 0 => d as f64,
            _ => 255.0
        };

        imageproc::map::map_colors(&self.data, |p: Luma<u8>| {
            Luma([saturate(p[0] as f64 * 255.0 / max)])
        })
    }

    /// Write the raw map to an image file, the format is taken from the extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.data.save(path)?;
        Ok(())
    }
}

/// Round towards zero and clamp into the 8-bit range, NaN maps to 0.
pub(crate) fn saturate(val: f64) -> u8 {
    if val.is_nan() || val <= 0.0 {
        0
    }
    else if val >= 255.0 {
        255
    }
    else {
        val as u8
    }
}
