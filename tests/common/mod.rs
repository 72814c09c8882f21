//! Synthetic stereo frames shared by the integration tests.

#![allow(dead_code)]

use cv_stereo::prelude::*;
use image::{GrayImage, Luma};

/// Deterministic pseudo-random intensity for column `x` of row `y`.
pub fn texture(x: u32, y: u32) -> u8 {
    let mut z = ((y as u64) << 32 | x as u64).wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31)) as u8
}

/// Both images filled with `value`.
pub fn uniform_frame(width: u32, height: u32, value: u8) -> StereoFrame {
    let left = GrayImage::from_pixel(width, height, Luma([value]));
    let right = left.clone();
    StereoFrame::new(left, right).unwrap()
}

/// Textured pair where the right image is the left image shifted left by `shift` columns, so
/// every left pixel `(x, y)` appears at `(x - shift, y)` on the right.
pub fn shifted_frame(width: u32, height: u32, shift: u32) -> StereoFrame {
    let left = GrayImage::from_fn(width, height, |x, y| Luma([texture(x, y)]));
    let right = GrayImage::from_fn(width, height, |x, y| Luma([texture(x + shift, y)]));
    StereoFrame::new(left, right).unwrap()
}

pub fn params(window_size: usize) -> Params {
    Params {
        window_size,
        ..Params::default()
    }
}
