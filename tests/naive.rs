//! # Naive block matching
//!
//! Checks the block matcher against synthetic stereo pairs with a known disparity.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

mod common;

use cv_stereo::{naive::Naive, prelude::*};

use common::*;

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[test]
fn uniform_pair_has_zero_disparity() -> Result<()> {
    let frame = uniform_frame(5, 5, 100);
    let map = Naive::new(params(3)).compute(&frame)?;

    assert_eq!((map.width(), map.height()), (3, 3));
    for y in 0..map.height() {
        assert!(map.row(y).all(|d| d == 0), "row {} is not zero", y);
    }
    assert_eq!(map.max_disp, None);

    Ok(())
}

#[test]
fn shifted_pair_recovers_constant_disparity() -> Result<()> {
    let shift = 4;
    let frame = shifted_frame(40, 12, shift);
    let map = Naive::new(params(3)).compute(&frame)?;

    assert_eq!((map.width(), map.height()), (38, 10));

    // Map column x is image column x + 1, its match at x + 1 - shift must keep the window inside
    // the right image.
    for y in 0..map.height() {
        for x in (shift as usize)..map.width() {
            assert_eq!(map.get(x, y), 12, "at ({}, {})", x, y);
        }
    }

    Ok(())
}

#[test]
fn larger_window_shrinks_the_map() -> Result<()> {
    let frame = shifted_frame(30, 11, 2);
    let map = Naive::new(params(5)).compute(&frame)?;

    assert_eq!((map.width(), map.height()), (26, 7));
    for y in 0..map.height() {
        for x in 2..map.width() {
            assert_eq!(map.get(x, y), 6);
        }
    }

    Ok(())
}

#[test]
fn min_disparity_does_not_limit_the_search() -> Result<()> {
    let frame = shifted_frame(24, 7, 3);
    let params = Params {
        min_disparity: 10,
        ..params(3)
    };
    let map = Naive::new(params).compute(&frame)?;

    for y in 0..map.height() {
        for x in 3..map.width() {
            assert_eq!(map.get(x, y), 9);
        }
    }

    Ok(())
}

#[test]
fn large_scale_saturates() -> Result<()> {
    let frame = shifted_frame(24, 6, 4);
    let params = Params {
        disparity_scale: 100.0,
        ..params(3)
    };
    let map = Naive::new(params).compute(&frame)?;

    for y in 0..map.height() {
        for x in 4..map.width() {
            assert_eq!(map.get(x, y), 255);
        }
    }

    Ok(())
}

#[test]
fn window_larger_than_image_is_rejected() {
    let frame = uniform_frame(8, 4, 10);
    let result = Naive::new(params(5)).compute(&frame);

    assert!(matches!(result, Err(Error::Configuration(_))));
}

#[test]
fn zero_baseline_does_not_stop_matching() -> Result<()> {
    let frame = uniform_frame(5, 5, 100);
    let params = Params { baseline: 0.0, ..params(3) };
    let map = Naive::new(params).compute(&frame)?;

    assert_eq!((map.width(), map.height()), (3, 3));

    Ok(())
}
