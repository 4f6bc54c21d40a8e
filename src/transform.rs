/// Height inversion, vertical scaling, and base offset.
use crate::constants::Z_OFFSET;
use crate::heightfield::HeightField;
use crate::mask::ValidityMask;

/// Largest smoothed height over valid cells
fn max_valid_height(field: &HeightField, mask: &ValidityMask) -> f64 {
    let mut max = f64::NEG_INFINITY;
    for (index, &value) in field.values().iter().enumerate() {
        if mask.get_index(index) && value > max {
            max = value;
        }
    }
    max
}

/// Apply inversion and z-scale, then lift every sample by the base offset.
/// The offset lands uniformly, cells that will later be masked out included;
/// validity is tracked by the mask alone, never re-derived from these values.
pub fn scale_heights(
    smoothed: &HeightField,
    mask: &ValidityMask,
    invert: bool,
    z_scale: f64,
) -> HeightField {
    let (rows, cols) = smoothed.shape();
    let max = if invert {
        max_valid_height(smoothed, mask)
    } else {
        0.0
    };
    let values = smoothed
        .values()
        .iter()
        .map(|&value| {
            let height = if invert { max - value } else { value };
            height * z_scale + Z_OFFSET
        })
        .collect();
    HeightField::from_parts(values, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_valid(field: &HeightField) -> ValidityMask {
        ValidityMask::from_field(field)
    }

    #[test]
    fn inversion_mirrors_heights() {
        let field = HeightField::from_rows(&[&[0.0, 10.0]]);
        let z = scale_heights(&field, &all_valid(&field), true, 1.0);
        assert!((z.get(0, 0) - 10.01).abs() < 1e-12);
        assert!((z.get(0, 1) - 0.01).abs() < 1e-12);
    }

    #[test]
    fn plain_scaling_keeps_orientation() {
        let field = HeightField::from_rows(&[&[0.0, 10.0]]);
        let z = scale_heights(&field, &all_valid(&field), false, 1.0);
        assert!((z.get(0, 0) - 0.01).abs() < 1e-12);
        assert!((z.get(0, 1) - 10.01).abs() < 1e-12);
    }

    #[test]
    fn z_scale_multiplies_heights() {
        let field = HeightField::from_rows(&[&[0.0, 2.0]]);
        let z = scale_heights(&field, &all_valid(&field), false, 50.0);
        assert!((z.get(0, 1) - 100.01).abs() < 1e-12);
    }

    #[test]
    fn max_height_ignores_masked_cells() {
        // The masked cell holds the largest value; inversion must not see it.
        let masked = HeightField::from_rows(&[&[5.0, f64::NAN]]);
        let smoothed = HeightField::from_rows(&[&[5.0, 100.0]]);
        let z = scale_heights(&smoothed, &all_valid(&masked), true, 1.0);
        assert!((z.get(0, 0) - 0.01).abs() < 1e-12);
        assert!((z.get(0, 1) - (-95.0 + 0.01)).abs() < 1e-12);
    }

    #[test]
    fn offset_lands_on_masked_cells_too() {
        let masked = HeightField::from_rows(&[&[1.0, f64::NAN]]);
        let smoothed = HeightField::from_rows(&[&[1.0, 2.0]]);
        let z = scale_heights(&smoothed, &all_valid(&masked), false, 1.0);
        assert!((z.get(0, 1) - 2.01).abs() < 1e-12);
    }
}
