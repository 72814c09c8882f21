//! # Naive block matching
//!
//! This module provides a local block matching disparity estimator. Every pixel is matched
//! independently by an exhaustive search over all column offsets that keep the correlation window
//! inside the right image, minimising the windowed sum of squared differences (SSD).

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::{debug, info, trace};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::disparity::{saturate, DisparityAlgorithm, DisparityMap};
use crate::error::*;
use crate::frame::StereoFrame;
use crate::params::Params;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct Naive {
    params: Params
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Naive {
    /// Create a new instance of the algorithm with the given parameters.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Calculate the SSD between the window centred on `(x, y)` in the left image and the window
    /// centred on `(x + d, y)` in the right image.
    fn get_criterion(&self, frame: &StereoFrame, x: usize, y: usize, d: isize) -> i64 {
        let half = self.params.half_window() as isize;
        let mut acc = 0i64;

        for v in -half..=half {
            let yv = (y as isize + v) as usize;

            for u in -half..=half {
                let xl = (x as isize + u) as usize;
                let xr = (x as isize + u + d) as usize;
                let diff = frame.left_at(xl, yv) - frame.right_at(xr, yv);
                acc += diff * diff;
            }
        }

        acc
    }

    /// Find the offset with the lowest SSD for the pixel at `(x, y)`.
    ///
    /// The zero offset is scored first, then every other offset in ascending order. Only a
    /// strictly lower SSD replaces the current best.
    fn best_offset(&self, frame: &StereoFrame, x: usize, y: usize) -> isize {
        let half = self.params.half_window() as isize;
        let width = frame.width() as isize;
        let x = x as isize;

        let mut min_ssd = self.get_criterion(frame, x as usize, y, 0);
        let mut disparity = 0isize;

        for d in (half - x)..(width - half - x) {
            if d == 0 {
                continue;
            }

            let ssd = self.get_criterion(frame, x as usize, y, d);
            if ssd < min_ssd {
                min_ssd = ssd;
                disparity = d;
            }
        }

        disparity
    }

    /// Compute one row of the output map, for image row `y`.
    fn compute_row(&self, frame: &StereoFrame, y: usize) -> Vec<u8> {
        let half = self.params.half_window();
        let width = frame.width() as usize;

        trace!("Naive row {} of {}", y, frame.height());

        (half..(width - half))
            .map(|x| {
                let d = self.best_offset(frame, x, y);
                saturate(d.abs() as f64 * self.params.disparity_scale)
            })
            .collect()
    }
}

impl DisparityAlgorithm for Naive {
    /// Compute the disparity map for the given frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        self.params.validate_for(frame)?;

        let half = self.params.half_window();
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let map_width = width - 2 * half;

        info!(
            "Computing naive disparities for {}x{} frame with a {}px window",
            width, height, self.params.window_size
        );
        debug!(
            "min_disparity {} does not constrain the naive search range",
            self.params.min_disparity
        );

        let this: &Naive = self;

        #[cfg(feature = "rayon")]
        let rows: Vec<Vec<u8>> = (half..(height - half))
            .into_par_iter()
            .map(|y| this.compute_row(frame, y))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let rows: Vec<Vec<u8>> = (half..(height - half))
            .map(|y| this.compute_row(frame, y))
            .collect();

        let disp_map = DisparityMap::from_rows(map_width, rows);

        debug!(
            "Naive disparity range: {:?}..{:?}",
            disp_map.min_disp, disp_map.max_disp
        );
        info!("Naive disparities complete");

        Ok(disp_map)
    }
}
