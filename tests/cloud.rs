//! # Point cloud reconstruction
//!
//! Projects hand-built disparity maps and checks the geometry and the `.xyz` output.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use cv_stereo::{
    cloud::{save_xyz, write_xyz},
    prelude::*
};

// -----------------------------------------------------------------------------------------------
// CONSTANTS
// -----------------------------------------------------------------------------------------------

const FOCAL_LENGTH: f64 = 1247.0;
const BASELINE: f64 = 213.0;

// -----------------------------------------------------------------------------------------------
// TESTS
// -----------------------------------------------------------------------------------------------

#[test]
fn centre_pixel_projects_onto_the_optical_axis() {
    let mut map = DisparityMap::new(5, 5);
    map.put(2, 2, 10);

    let points: Vec<Point> = project(&map, FOCAL_LENGTH, BASELINE).collect();

    assert_eq!(points, vec![Point::new(0.0, 0.0, FOCAL_LENGTH * BASELINE / 10.0)]);
}

#[test]
fn rows_drive_x_and_columns_drive_y() {
    let mut map = DisparityMap::new(6, 4);
    // Row 0, column 3: two rows above and on the column of the centre (2, 3).
    map.put(3, 0, 20);
    // Row 2, column 5: on the centre row, two columns right.
    map.put(5, 2, 20);

    let z = FOCAL_LENGTH * BASELINE / 20.0;
    let points: Vec<Point> = project(&map, FOCAL_LENGTH, BASELINE).collect();

    assert_eq!(points.len(), 2);
    assert_eq!(points[0], Point::new(-2.0 / FOCAL_LENGTH * z, 0.0, z));
    assert_eq!(points[1], Point::new(0.0, 2.0 / FOCAL_LENGTH * z, z));
}

#[test]
fn zero_disparities_are_skipped_and_order_is_row_major() {
    let mut map = DisparityMap::new(4, 3);
    map.put(3, 0, 8);
    map.put(0, 1, 4);
    map.put(1, 2, 255);

    let depths: Vec<f64> = project(&map, FOCAL_LENGTH, BASELINE).map(|p| p.z).collect();

    assert_eq!(depths, vec![
        FOCAL_LENGTH * BASELINE / 8.0,
        FOCAL_LENGTH * BASELINE / 4.0,
        FOCAL_LENGTH * BASELINE / 255.0
    ]);

    let all = project(&map, FOCAL_LENGTH, BASELINE);
    assert!(all.clone().all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite()));
    assert_eq!(all.count(), 3);
}

#[test]
fn projection_restarts_from_the_same_inputs() {
    let mut map = DisparityMap::new(8, 8);
    for y in 0..8 {
        for x in 0..8 {
            map.put(x, y, ((x * 7 + y * 3) % 5) as u8 * 10);
        }
    }

    let points = project(&map, FOCAL_LENGTH, BASELINE);
    let first: Vec<Point> = points.clone().collect();
    let second: Vec<Point> = points.collect();
    let third: Vec<Point> = project(&map, FOCAL_LENGTH, BASELINE).collect();

    assert!(!first.is_empty());
    assert_eq!(first, second);
    assert_eq!(first, third);
}

#[test]
fn empty_map_yields_no_points() {
    let map = DisparityMap::new(0, 3);
    assert_eq!(project(&map, FOCAL_LENGTH, BASELINE).count(), 0);

    let map = DisparityMap::new(4, 4);
    assert_eq!(project(&map, FOCAL_LENGTH, BASELINE).count(), 0);
}

#[test]
fn zero_focal_length_yields_no_points() {
    let mut map = DisparityMap::new(5, 5);
    map.put(2, 2, 10);
    map.put(0, 4, 3);

    assert_eq!(project(&map, 0.0, BASELINE).count(), 0);

    // Only the zero-focal projection is dropped, the same map projects normally otherwise
    let points: Vec<Point> = project(&map, FOCAL_LENGTH, BASELINE).collect();
    assert_eq!(points.len(), 2);
    assert!(points.iter().all(Point::is_finite));
}

#[test]
fn xyz_lines_are_space_separated() -> Result<()> {
    let mut map = DisparityMap::new(5, 5);
    map.put(2, 2, 10);
    map.put(2, 3, 10);

    let mut out = Vec::new();
    let count = write_xyz(&mut out, project(&map, FOCAL_LENGTH, BASELINE))?;
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(count, 2);
    assert_eq!(lines[0], "0 0 26561.1");

    let values: Vec<f64> = lines[1]
        .split_whitespace()
        .map(|v| v.parse().unwrap())
        .collect();
    assert_eq!(values, vec![1.0 / FOCAL_LENGTH * 26561.1, 0.0, 26561.1]);

    Ok(())
}

#[test]
fn xyz_file_has_one_line_per_point() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("cloud.xyz");

    let mut map = DisparityMap::new(3, 3);
    map.put(0, 0, 1);
    map.put(1, 1, 2);
    map.put(2, 2, 3);

    let count = save_xyz(&path, project(&map, FOCAL_LENGTH, BASELINE))?;
    let contents = std::fs::read_to_string(&path)?;

    assert_eq!(count, 3);
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().all(|l| l.split(' ').count() == 3));

    Ok(())
}
