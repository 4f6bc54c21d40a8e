/// Pipeline orchestration from input file to solid mesh artefacts.
///
/// The conversion core (`height_field_to_mesh`) takes and returns in-memory
/// data only; `SolidConverter` owns every filesystem path and all console
/// reporting around it.
use crate::bounds::MeshBounds;
use crate::constants::{DEFAULT_SIGMA, DEFAULT_TARGET_DIMENSION, DEFAULT_Z_SCALE};
use crate::error::ConvertError;
use crate::heightfield::HeightField;
use crate::loader;
use crate::mask::{self, GridBounds, ValidityMask};
use crate::mesh::Mesh;
use crate::metadata::{ConversionMetadata, MetadataParams, write_metadata};
use crate::resample;
use crate::smooth;
use crate::solidify::{self, WallMode};
use crate::stl_writer;
use crate::transform;
use image::{GrayImage, Luma};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Conversion parameters with their standard defaults
#[derive(Debug, Clone)]
pub struct ConvertParams {
    pub target_dimension: i64,
    pub z_scale: f64,
    pub invert: bool,
    pub sigma: f64,
    pub wall_mode: WallMode,
}

impl Default for ConvertParams {
    fn default() -> Self {
        Self {
            target_dimension: DEFAULT_TARGET_DIMENSION,
            z_scale: DEFAULT_Z_SCALE,
            invert: true,
            sigma: DEFAULT_SIGMA,
            wall_mode: WallMode::default(),
        }
    }
}

/// Shape and count statistics collected across the pipeline stages
#[derive(Debug, Clone)]
pub struct ConversionStats {
    pub source_shape: (usize, usize),
    pub resampled_shape: (usize, usize),
    pub cropped_shape: (usize, usize),
    pub valid_samples: usize,
    pub active_cells: usize,
    pub triangle_count: usize,
}

/// Result of the in-memory pipeline: the mesh plus the cropped surface it
/// was built from
pub struct Conversion {
    pub mesh: Mesh,
    pub heights: HeightField,
    pub mask: ValidityMask,
    pub stats: ConversionStats,
}

/// Run the core pipeline: resample, smooth, transform, crop, solidify
pub fn height_field_to_mesh(
    field: &HeightField,
    params: &ConvertParams,
) -> Result<Conversion, ConvertError> {
    let source_shape = field.shape();

    let resampled = resample::flip_columns(&resample::downsample(field, params.target_dimension));
    let resampled_shape = resampled.shape();

    // The mask always reflects the pre-smoothing field; smoothing is
    // cosmetic for the valid surface and must not grow or shrink it.
    let mask = ValidityMask::from_field(&resampled);
    let smoothed = smooth::gaussian_smooth(&resampled, params.sigma);
    let z = transform::scale_heights(&smoothed, &mask, params.invert, params.z_scale);

    let bounds = GridBounds::of_valid(&mask)?;
    let heights = mask::crop_field(&z, &bounds);
    let mask = mask::crop_mask(&mask, &bounds);

    let mesh = solidify::solidify(&heights, &mask, params.wall_mode)?;

    let stats = ConversionStats {
        source_shape,
        resampled_shape,
        cropped_shape: heights.shape(),
        valid_samples: mask.valid_count(),
        active_cells: solidify::active_cell_count(&mask),
        triangle_count: mesh.triangles.len(),
    };
    Ok(Conversion {
        mesh,
        heights,
        mask,
        stats,
    })
}

/// Height field to printable solid converter
pub struct SolidConverter {
    input_path: PathBuf,
    output_dir: PathBuf,
    output_stem: String,
    params: ConvertParams,
    write_preview: bool,
}

impl SolidConverter {
    /// Create a converter writing next to the input unless an output
    /// directory is given
    pub fn new(
        input_path: &Path,
        output_dir: Option<&Path>,
        params: ConvertParams,
        write_preview: bool,
    ) -> Self {
        let output_dir = output_dir.map(Path::to_path_buf).unwrap_or_else(|| {
            input_path
                .parent()
                .unwrap_or(Path::new("."))
                .to_path_buf()
        });
        let output_stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "height_field".to_string());
        Self {
            input_path: input_path.to_path_buf(),
            output_dir,
            output_stem,
            params,
            write_preview,
        }
    }

    /// Execute the full conversion and write all artefacts
    pub fn convert(&self) -> Result<(), ConvertError> {
        println!(
            "Converting {} to a printable solid...",
            self.input_path.display()
        );

        let field = loader::load_height_field(&self.input_path)?;
        println!("  Source grid: {}x{}", field.rows(), field.cols());

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message("Building solid mesh");
        let conversion = height_field_to_mesh(&field, &self.params)?;
        spinner.finish_with_message("Solid mesh built");

        let stl_path = self
            .output_dir
            .join(format!("{}_solid.stl", self.output_stem));
        stl_writer::export_stl(&stl_path, &conversion.mesh)?;
        println!(
            "Saved {} ({} triangles)",
            stl_path.display(),
            conversion.stats.triangle_count
        );

        let bounds = MeshBounds::from_mesh(&conversion.mesh);
        self.print_summary(&conversion.stats, &bounds);

        let metadata_path = self
            .output_dir
            .join(format!("{}_metadata.json", self.output_stem));
        write_metadata(&metadata_path, &self.describe(&conversion.stats, bounds))?;
        println!("Saved {}", metadata_path.display());

        if self.write_preview {
            let preview_path = self
                .output_dir
                .join(format!("{}_preview.png", self.output_stem));
            save_preview(&preview_path, &conversion.heights, &conversion.mask)?;
            println!("Saved {}", preview_path.display());
        }

        Ok(())
    }

    /// Assemble the metadata sidecar document
    fn describe(&self, stats: &ConversionStats, bounds: MeshBounds) -> ConversionMetadata {
        ConversionMetadata {
            input: self.input_path.display().to_string(),
            params: MetadataParams {
                target_dimension: self.params.target_dimension,
                z_scale: self.params.z_scale,
                invert: self.params.invert,
                sigma: self.params.sigma,
                wall_mode: self.params.wall_mode.label().to_string(),
            },
            source_shape: [stats.source_shape.0, stats.source_shape.1],
            resampled_shape: [stats.resampled_shape.0, stats.resampled_shape.1],
            cropped_shape: [stats.cropped_shape.0, stats.cropped_shape.1],
            valid_samples: stats.valid_samples,
            active_cells: stats.active_cells,
            triangle_count: stats.triangle_count,
            bounds,
        }
    }

    /// Print shape, count, and extent statistics for verification
    fn print_summary(&self, stats: &ConversionStats, bounds: &MeshBounds) {
        println!("Conversion summary:");
        println!(
            "  Resampled grid: {}x{}",
            stats.resampled_shape.0, stats.resampled_shape.1
        );
        println!(
            "  Meshed region: {}x{} ({} valid samples)",
            stats.cropped_shape.0, stats.cropped_shape.1, stats.valid_samples
        );
        println!("  Active cells: {}", stats.active_cells);
        println!("  Triangles: {}", stats.triangle_count);
        let (dx, dy, dz) = bounds.dimensions();
        println!("  Solid extent: {dx:.2} x {dy:.2} x {dz:.2}");
    }
}

/// Normalised grayscale snapshot of the meshed height surface
fn save_preview(
    path: &Path,
    heights: &HeightField,
    mask: &ValidityMask,
) -> Result<(), ConvertError> {
    let (rows, cols) = heights.shape();
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for i in 0..rows {
        for j in 0..cols {
            if mask.get(i, j) {
                let value = heights.get(i, j);
                min = min.min(value);
                max = max.max(value);
            }
        }
    }
    let range = (max - min).max(f64::MIN_POSITIVE);

    let image = GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        let (i, j) = (y as usize, x as usize);
        if mask.get(i, j) {
            Luma([(((heights.get(i, j) - min) / range) * 255.0) as u8])
        } else {
            Luma([0u8])
        }
    });
    image
        .save(path)
        .map_err(|e| ConvertError::Io(std::io::Error::other(e)))?;
    Ok(())
}
