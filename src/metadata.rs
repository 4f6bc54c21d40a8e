/// Conversion metadata sidecar generation.
use crate::bounds::MeshBounds;
use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Parameters echoed into the sidecar for reproducibility
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MetadataParams {
    pub target_dimension: i64,
    pub z_scale: f64,
    pub invert: bool,
    pub sigma: f64,
    pub wall_mode: String,
}

/// Document describing one height-field-to-solid conversion
#[derive(Serialize, Deserialize, Debug)]
pub struct ConversionMetadata {
    pub input: String,
    pub params: MetadataParams,
    pub source_shape: [usize; 2],
    pub resampled_shape: [usize; 2],
    pub cropped_shape: [usize; 2],
    pub valid_samples: usize,
    pub active_cells: usize,
    pub triangle_count: usize,
    pub bounds: MeshBounds,
}

/// Write the metadata document as pretty-printed JSON
pub fn write_metadata(path: &Path, metadata: &ConversionMetadata) -> Result<(), ConvertError> {
    let json = serde_json::to_string_pretty(metadata).map_err(std::io::Error::from)?;
    fs::write(path, json)?;
    Ok(())
}
