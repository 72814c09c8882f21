//! # Point cloud reconstruction
//!
//! Back-projects a disparity map into camera frame 3D points using the pinhole stereo model:
//!
//! ```text
//! Z = f * B / d
//! X = (i - cx) / f * Z
//! Y = (j - cy) / f * Z
//! ```
//!
//! where `i` is the map row, `j` the map column and `(cx, cy)` the integer centre of the map. The
//! row drives X and the column drives Y. Cells with zero disparity are skipped.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::disparity::DisparityMap;
use crate::error::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// A point in the camera frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64
}

/// Lazy row-major iterator over the points of a disparity map, see [`project`].
#[derive(Debug, Clone)]
pub struct Points<'a> {
    map: &'a DisparityMap,
    focal_length: f64,
    baseline: f64,
    cx: i64,
    cy: i64,
    index: usize
}

// -----------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// -----------------------------------------------------------------------------------------------

/// Project every cell of `map` with a positive disparity into 3D.
///
/// The returned iterator is a pure function of its inputs and can be cloned to restart it.
///
/// `focal_length` and `baseline` are expected to be finite and positive, as checked by
/// [`Params::validate`](crate::prelude::Params::validate). Cells whose projection is not finite,
/// which is every cell when the focal length is zero, are skipped.
pub fn project(map: &DisparityMap, focal_length: f64, baseline: f64) -> Points<'_> {
    Points {
        map,
        focal_length,
        baseline,
        cx: (map.height() / 2) as i64,
        cy: (map.width() / 2) as i64,
        index: 0
    }
}

/// Write one `X Y Z` line per point, returning the number of points written.
pub fn write_xyz<W, I>(writer: &mut W, points: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = Point>
{
    let mut count = 0;

    for point in points {
        writeln!(writer, "{}", point)?;
        count += 1;
    }

    Ok(count)
}

/// Write the points to an `.xyz` file at `path`, returning the number of points written.
pub fn save_xyz<P, I>(path: P, points: I) -> Result<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = Point>
{
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    let count = write_xyz(&mut writer, points)?;
    writer.flush()?;

    debug!("Wrote {} points to {}", count, path.as_ref().display());

    Ok(count)
}

// -----------------------------------------------------------------------------------------------
// IMPLEMENTATIONS
// -----------------------------------------------------------------------------------------------

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// True if every coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

impl<'a> Points<'a> {
    fn point_at(&self, i: usize, j: usize, disparity: u8) -> Point {
        let z = self.focal_length * self.baseline / disparity as f64;
        let x = (i as i64 - self.cx) as f64 / self.focal_length * z;
        let y = (j as i64 - self.cy) as f64 / self.focal_length * z;

        Point { x, y, z }
    }
}

impl<'a> Iterator for Points<'a> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let width = self.map.width();
        let total = width * self.map.height();

        while self.index < total {
            let (i, j) = (self.index / width, self.index % width);
            self.index += 1;

            let disparity = self.map.get(j, i);
            if disparity == 0 {
                continue;
            }

            let point = self.point_at(i, j, disparity);
            if point.is_finite() {
                return Some(point);
            }
        }

        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let total = self.map.width() * self.map.height();
        (0, Some(total.saturating_sub(self.index)))
    }
}
