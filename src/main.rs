/// Height field to printable solid converter entry point
mod bounds;
mod constants;
mod converter;
mod error;
mod heightfield;
mod loader;
mod mask;
mod mesh;
mod metadata;
mod resample;
mod smooth;
mod solidify;
mod stl_writer;
mod transform;

use converter::{ConvertParams, SolidConverter};
use solidify::WallMode;
use std::env;
use std::path::PathBuf;
use std::process;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!(
            "Usage: {} <input.exr|image> [--output-dir DIR] [--target-dimension N] \
             [--z-scale F] [--sigma F] [--no-invert] [--silhouette-walls] [--preview]",
            args[0]
        );
        process::exit(1);
    }

    let input_path = PathBuf::from(&args[1]);
    let mut params = ConvertParams::default();
    let mut output_dir: Option<PathBuf> = None;
    let mut preview = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--output-dir" => {
                output_dir = args.get(i + 1).map(PathBuf::from);
                i += 2;
            }
            "--target-dimension" => {
                params.target_dimension = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(constants::DEFAULT_TARGET_DIMENSION);
                i += 2;
            }
            "--z-scale" => {
                params.z_scale = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(constants::DEFAULT_Z_SCALE);
                i += 2;
            }
            "--sigma" => {
                params.sigma = args
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(constants::DEFAULT_SIGMA);
                i += 2;
            }
            "--no-invert" => {
                params.invert = false;
                i += 1;
            }
            "--silhouette-walls" => {
                params.wall_mode = WallMode::SilhouetteOnly;
                i += 1;
            }
            "--preview" => {
                preview = true;
                i += 1;
            }
            _ => i += 1,
        }
    }

    let solid_converter = SolidConverter::new(&input_path, output_dir.as_deref(), params, preview);
    if let Err(error) = solid_converter.convert() {
        eprintln!("Conversion failed: {error}");
        process::exit(1);
    }
}
