//! # Scanline dissimilarity
//!
//! Builds, for a single image row, the matrix of windowed SSD costs between every left candidate
//! column and every right candidate column. Entry `(a, b)` compares left column `a + half` with
//! right column `b + half`, where `half` is half the window size.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::{Array2, Zip};

use crate::frame::StereoFrame;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Reusable per-row dissimilarity matrix.
#[derive(Debug, Clone, Default)]
pub struct Dissimilarity {
    matrix: Array2<f32>
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Dissimilarity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the dissimilarity matrix of `row` with a fresh buffer.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not leave `window_size / 2` rows above and below it inside the frame.
    pub fn build(frame: &StereoFrame, row: usize, window_size: usize) -> Self {
        let mut dissim = Self::new();
        dissim.build_into(frame, row, window_size);
        dissim
    }

    /// Rebuild this matrix for `row`, reusing the existing allocation when the size is unchanged.
    ///
    /// The matrix has `width - window_size` rows and columns, and is empty when the image is no
    /// wider than the window.
    ///
    /// # Panics
    ///
    /// Panics if `row` does not leave `window_size / 2` rows above and below it inside the frame.
    pub fn build_into(&mut self, frame: &StereoFrame, row: usize, window_size: usize) {
        let width = frame.width() as usize;
        let n = width.saturating_sub(window_size);
        let half = (window_size / 2) as isize;

        reset_square(&mut self.matrix, n, 0.0);

        Zip::indexed(&mut self.matrix).for_each(|(a, b), cost| {
            let xl = a as isize + half;
            let xr = b as isize + half;
            let mut acc = 0i64;

            for v in -half..=half {
                let y = (row as isize + v) as usize;

                for u in -half..=half {
                    let diff = frame.left_at((xl + u) as usize, y)
                        - frame.right_at((xr + u) as usize, y);
                    acc += diff * diff;
                }
            }

            *cost = acc as f32;
        });
    }

    pub fn matrix(&self) -> &Array2<f32> {
        &self.matrix
    }

    /// Number of candidate columns.
    pub fn size(&self) -> usize {
        self.matrix.nrows()
    }

    /// Cost of matching left candidate `a` with right candidate `b`.
    pub fn get(&self, a: usize, b: usize) -> f32 {
        self.matrix[(a, b)]
    }
}

impl From<Array2<f32>> for Dissimilarity {
    /// Wrap a precomputed square cost matrix.
    fn from(matrix: Array2<f32>) -> Self {
        debug_assert_eq!(matrix.nrows(), matrix.ncols());
        Self { matrix }
    }
}

/// Make `buf` an `n` by `n` matrix filled with `value`, keeping the allocation if the shape is
/// already right.
pub(crate) fn reset_square<T: Clone>(buf: &mut Array2<T>, n: usize, value: T) {
    if buf.dim() == (n, n) {
        buf.fill(value);
    }
    else {
        *buf = Array2::from_elem((n, n), value);
    }
}
