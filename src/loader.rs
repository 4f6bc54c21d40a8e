/// Height field input decoding.
///
/// OpenEXR float maps keep NaN missing markers intact and are the preferred
/// container for model-produced depth; any ordinary image decodes to a fully
/// valid grayscale field.
use crate::error::ConvertError;
use crate::heightfield::HeightField;
use std::path::Path;

/// Decode an input file into a height field, dispatching on the extension
pub fn load_height_field(path: &Path) -> Result<HeightField, ConvertError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match extension.as_deref() {
        Some("exr") => load_exr(path),
        _ => load_image(path),
    }
}

/// Read the first flat layer of an OpenEXR file, preferring a luminance or
/// depth channel when one exists
fn load_exr(path: &Path) -> Result<HeightField, ConvertError> {
    use exr::prelude::*;

    let image = read_first_flat_layer_from_file(path)
        .map_err(|e| ConvertError::decode(format!("{}: {e}", path.display())))?;
    let layer = image.layer_data;
    let (cols, rows) = (layer.size.0, layer.size.1);

    let channels = &layer.channel_data.list;
    let channel = ["Y", "Z", "R"]
        .iter()
        .find_map(|name| channels.iter().find(|c| c.name.to_string() == *name))
        .or_else(|| channels.first())
        .ok_or_else(|| ConvertError::decode(format!("{}: no image channels", path.display())))?;

    let values: Vec<f64> = channel
        .sample_data
        .values_as_f32()
        .map(f64::from)
        .collect();
    HeightField::new(values, rows, cols)
}

/// Decode any image the `image` crate understands into a grayscale field
fn load_image(path: &Path) -> Result<HeightField, ConvertError> {
    let decoded = image::open(path)
        .map_err(|e| ConvertError::decode(format!("{}: {e}", path.display())))?;
    let gray = decoded.to_luma32f();
    let (cols, rows) = (gray.width() as usize, gray.height() as usize);
    let values = gray.into_raw().into_iter().map(f64::from).collect();
    HeightField::new(values, rows, cols)
}
