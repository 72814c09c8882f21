//! # Stereo reconstruction driver
//!
//! Loads a rectified stereo pair, computes naive and dynamic programming disparity maps and
//! reconstructs a point cloud from the naive map.

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use std::path::PathBuf;

use clap::Parser;
use log::info;

use cv_stereo::cloud::save_xyz;
use cv_stereo::dynamic::Dynamic;
use cv_stereo::naive::Naive;
use cv_stereo::prelude::*;

// -----------------------------------------------------------------------------------------------
// DATA STRUCTURES
// -----------------------------------------------------------------------------------------------

/// Stereo disparity estimation and point cloud reconstruction.
#[derive(Debug, Parser)]
#[command(author, version)]
struct Args {
    /// Left image of the rectified pair.
    image1: PathBuf,

    /// Right image of the rectified pair.
    image2: PathBuf,

    /// Output prefix for the naive disparity image and the point cloud.
    output_file: String,

    /// Output prefix for the dynamic programming disparity image.
    output_file2: String,

    /// Optional TOML file overriding the default parameters.
    #[arg(long)]
    params: Option<PathBuf>
}

// -----------------------------------------------------------------------------------------------
// MAIN
// -----------------------------------------------------------------------------------------------

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = try_main() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let args = Args::parse();

    let params = match &args.params {
        Some(path) => Params::from_file(path)?,
        None => Params::default()
    };

    // The reconstruction needs the camera parameters too, not just the matching ones
    params.validate()?;

    let frame = StereoFrame::open(&args.image1, &args.image2)?;
    params.validate_for(&frame)?;

    info!("------------------ Parameters -------------------");
    info!("focal_length = {}", params.focal_length);
    info!("baseline = {}", params.baseline);
    info!("window_size = {}", params.window_size);
    info!("occlusion weight = {}", params.occlusion_weight);
    info!("min_disparity = {}", params.min_disparity);
    info!("disparity_scale = {}", params.disparity_scale);
    info!("-------------------------------------------------");

    // Naive disparities and reconstruction
    let naive_map = Naive::new(params.clone()).compute(&frame)?;

    let cloud_path = format!("{}.xyz", args.output_file);
    let count = save_xyz(
        &cloud_path,
        project(&naive_map, params.focal_length, params.baseline)
    )?;
    info!("Reconstructed {} points into {}", count, cloud_path);

    let naive_path = format!("{}_naive.png", args.output_file);
    naive_map.save(&naive_path)?;
    info!("Saved naive disparities to {}", naive_path);

    // Dynamic programming disparities
    let dynamic_map = Dynamic::new(params).compute(&frame)?;

    let dynamic_path = format!("{}_dynamic.png", args.output_file2);
    dynamic_map.save(&dynamic_path)?;
    info!("Saved dynamic disparities to {}", dynamic_path);

    Ok(())
}
