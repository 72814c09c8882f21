//! # Scanline dynamic programming disparity computation
//!
//! This module provides a disparity estimator that treats every image row as an independent 1D
//! alignment problem. Each row goes through three stages:
//!
//! 1. [`Dissimilarity`] builds the windowed SSD cost of every left/right column pair,
//! 2. [`Aligner`] finds the cheapest monotone alignment path with explicit occlusions,
//! 3. [`fill_occlusions`] propagates matched disparities into the occluded columns.
//!
//! The output map has `height - window_size + 1` rows and `width - window_size` columns.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use log::{debug, info, trace};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

#[cfg(feature = "statistics")]
use plotters::prelude::*;

use crate::align::{Aligner, Alignment};
use crate::cost::Dissimilarity;
use crate::disparity::{DisparityAlgorithm, DisparityMap};
use crate::error::*;
use crate::frame::StereoFrame;
use crate::occlusion::fill_occlusions;
use crate::params::Params;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

pub struct Dynamic {
    params: Params
}

/// Buffers owned by a single worker and reused for every row it processes.
struct Scanline {
    dissim: Dissimilarity,
    aligner: Aligner
}

/// Filled disparities of one row plus the path summary used for logging.
struct RowResult {
    disparities: Vec<u8>,
    matches: usize,
    occlusions: usize
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Scanline {
    fn new(params: &Params) -> Self {
        Self {
            dissim: Dissimilarity::new(),
            aligner: Aligner::new(params.occlusion_weight, params.disparity_scale)
        }
    }
}

impl Dynamic {
    /// Create a new instance of the algorithm with the given parameters.
    pub fn new(params: Params) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Align image row `row` without filling the occlusions.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not leave half the window size of rows above and below it inside the
    /// frame.
    pub fn align_row(&self, frame: &StereoFrame, row: usize) -> Alignment {
        let mut scan = Scanline::new(&self.params);
        scan.dissim.build_into(frame, row, self.params.window_size);
        scan.aligner.align(&scan.dissim)
    }

    fn compute_row(&self, frame: &StereoFrame, row: usize, scan: &mut Scanline) -> RowResult {
        trace!("Dynamic row {} of {}", row, frame.height());

        scan.dissim.build_into(frame, row, self.params.window_size);
        let alignment = scan.aligner.align(&scan.dissim);

        let mut disparities = alignment.disparities;
        fill_occlusions(&mut disparities);

        RowResult {
            disparities,
            matches: alignment.matches,
            occlusions: alignment.left_occlusions + alignment.right_occlusions
        }
    }

    #[cfg(feature = "statistics")]
    fn plot_matches(&self, results: &[RowResult], columns: usize) -> Result<()> {
        fn stats_err<E: std::fmt::Display>(e: E) -> Error {
            Error::Statistics(e.to_string())
        }

        std::fs::create_dir_all("plots/dynamic")?;

        let history: Vec<(usize, usize)> = results
            .iter()
            .enumerate()
            .map(|(row, r)| (row, r.matches))
            .collect();

        let area = BitMapBackend::new(
            "plots/dynamic/matches.png",
            (800, 600)
        ).into_drawing_area();
        area.fill(&WHITE).map_err(stats_err)?;

        let mut chart = ChartBuilder::on(&area)
            .caption("Matched columns per scanline", ("sans-serif", 20).into_font())
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(30)
            .build_ranged(0..results.len().max(1), 0..columns + 1)
            .map_err(stats_err)?;

        chart.configure_mesh().draw().map_err(stats_err)?;

        chart
            .draw_series(LineSeries::new(history, &BLUE))
            .map_err(stats_err)?
            .label("Matches")
            .legend(|(x, y)|
                PathElement::new(vec![(x, y), (x + 20, y)], &BLUE
            ));

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(stats_err)?;

        debug!("Stats plotting complete");

        Ok(())
    }
}

impl DisparityAlgorithm for Dynamic {
    /// Compute the disparity map for the given frame.
    fn compute(&mut self, frame: &StereoFrame) -> Result<DisparityMap> {
        self.params.validate_for(frame)?;

        let half = self.params.half_window();
        let (width, height) = (frame.width() as usize, frame.height() as usize);
        let map_width = width - self.params.window_size;

        info!(
            "Computing dynamic programming disparities for {}x{} frame, occlusion weight {}",
            width, height, self.params.occlusion_weight
        );

        let this: &Dynamic = self;
        let params = &self.params;

        #[cfg(feature = "rayon")]
        let results: Vec<RowResult> = (half..(height - half))
            .into_par_iter()
            .map_init(
                || Scanline::new(params),
                |scan, row| this.compute_row(frame, row, scan)
            )
            .collect();

        #[cfg(not(feature = "rayon"))]
        let results: Vec<RowResult> = {
            let mut scan = Scanline::new(params);
            (half..(height - half))
                .map(|row| this.compute_row(frame, row, &mut scan))
                .collect()
        };

        let matches: usize = results.iter().map(|r| r.matches).sum();
        let occlusions: usize = results.iter().map(|r| r.occlusions).sum();
        debug!(
            "Dynamic alignment over {} rows: {} matches, {} occlusions",
            results.len(), matches, occlusions
        );

        #[cfg(feature = "statistics")]
        self.plot_matches(&results, map_width)?;

        let rows = results.into_iter().map(|r| r.disparities).collect();
        let disp_map = DisparityMap::from_rows(map_width, rows);

        debug!(
            "Dynamic disparity range: {:?}..{:?}",
            disp_map.min_disp, disp_map.max_disp
        );
        info!("Dynamic disparities complete");

        Ok(disp_map)
    }
}
