//! # Scanline alignment
//!
//! Dynamic programming alignment of one left scanline against one right scanline. The aligner
//! fills an accumulated cost matrix and a move matrix from a [`Dissimilarity`] matrix, then
//! backtracks from the bottom-right corner to recover the disparity of every matched column.
//!
//! Cell `(i, j)` of the cost matrix is the cheapest way to account for the first `i` right
//! candidates and the first `j` left candidates. Skipping a right candidate is a left occlusion,
//! skipping a left candidate is a right occlusion, both cost the occlusion weight.
//!
//! Ties between branches are not symmetric: a match or a left occlusion is only chosen when it is
//! strictly cheaper than both alternatives, every other case resolves to a right occlusion.
//! Flat regions depend on this rule, so it must not be relaxed.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use ndarray::Array2;

use crate::cost::{reset_square, Dissimilarity};
use crate::disparity::saturate;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// The recurrence branch that produced a cell's cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Match,
    LeftOcclusion,
    RightOcclusion
}

/// Reusable aligner, holding the cost and move matrices of the last aligned row.
#[derive(Debug, Clone)]
pub struct Aligner {
    occlusion_weight: f32,
    scale: f64,
    cost: Array2<f32>,
    moves: Array2<Move>
}

/// Result of aligning one scanline.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// One disparity per left candidate column, 0 where nothing was matched.
    pub disparities: Vec<u8>,

    /// Number of moves followed while backtracking.
    pub steps: usize,

    /// Number of matches on the optimal path.
    pub matches: usize,

    /// Number of left occlusions on the optimal path.
    pub left_occlusions: usize,

    /// Number of right occlusions on the optimal path.
    pub right_occlusions: usize
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Aligner {
    /// Create an aligner with the given occlusion weight and disparity scale.
    pub fn new(occlusion_weight: f64, scale: f64) -> Self {
        Self {
            occlusion_weight: occlusion_weight as f32,
            scale,
            cost: Array2::zeros((0, 0)),
            moves: Array2::from_elem((0, 0), Move::Match)
        }
    }

    /// Accumulated cost matrix of the last aligned row.
    pub fn cost(&self) -> &Array2<f32> {
        &self.cost
    }

    /// Move matrix of the last aligned row.
    pub fn moves(&self) -> &Array2<Move> {
        &self.moves
    }

    /// Align one scanline and return its disparities.
    pub fn align(&mut self, dissim: &Dissimilarity) -> Alignment {
        self.accumulate(dissim);
        self.backtrack()
    }

    /// Fill the cost and move matrices.
    fn accumulate(&mut self, dissim: &Dissimilarity) {
        let n = dissim.size();
        let w = self.occlusion_weight;

        reset_square(&mut self.cost, n, 0.0);
        reset_square(&mut self.moves, n, Move::Match);

        if n == 0 {
            return;
        }

        for j in 1..n {
            self.cost[(0, j)] = self.cost[(0, j - 1)] + w;
            self.moves[(0, j)] = Move::RightOcclusion;
        }

        for i in 1..n {
            self.cost[(i, 0)] = self.cost[(i - 1, 0)] + w;
            self.moves[(i, 0)] = Move::LeftOcclusion;
        }

        for i in 1..n {
            for j in 1..n {
                let matched = self.cost[(i - 1, j - 1)] + dissim.get(j, i);
                let left_occ = self.cost[(i - 1, j)] + w;
                let right_occ = self.cost[(i, j - 1)] + w;

                let (cost, mv) = if matched < left_occ && matched < right_occ {
                    (matched, Move::Match)
                }
                else if left_occ < matched && left_occ < right_occ {
                    (left_occ, Move::LeftOcclusion)
                }
                else {
                    (right_occ, Move::RightOcclusion)
                };

                self.cost[(i, j)] = cost;
                self.moves[(i, j)] = mv;
            }
        }
    }

    /// Walk the move matrix back from the bottom-right corner until either index reaches 0.
    fn backtrack(&self) -> Alignment {
        let n = self.moves.nrows();
        let mut alignment = Alignment {
            disparities: vec![0; n],
            steps: 0,
            matches: 0,
            left_occlusions: 0,
            right_occlusions: 0
        };

        if n == 0 {
            return alignment;
        }

        let mut i = n - 1;
        let mut j = n - 1;

        while i != 0 && j != 0 {
            match self.moves[(i, j)] {
                Move::Match => {
                    let d = (j as f64 - i as f64) * self.scale;
                    alignment.disparities[j] = saturate(d);
                    alignment.matches += 1;
                    i -= 1;
                    j -= 1;
                }
                Move::LeftOcclusion => {
                    alignment.disparities[j] = 0;
                    alignment.left_occlusions += 1;
                    i -= 1;
                }
                Move::RightOcclusion => {
                    alignment.right_occlusions += 1;
                    j -= 1;
                }
            }

            alignment.steps += 1;
        }

        alignment
    }
}
