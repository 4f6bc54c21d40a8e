/// Integer-stride downsampling and axis normalisation.
use crate::constants::NO_DOWNSAMPLING;
use crate::heightfield::HeightField;

/// Stride keeping the larger grid dimension within `target_dimension`
pub fn stride_for(rows: usize, cols: usize, target_dimension: i64) -> usize {
    if target_dimension == NO_DOWNSAMPLING {
        return 1;
    }
    let max_dimension = rows.max(cols);
    let target = target_dimension.max(1) as usize;
    max_dimension.div_ceil(target).max(1)
}

/// Keep every stride-th row and column, starting at index 0
pub fn downsample(field: &HeightField, target_dimension: i64) -> HeightField {
    let stride = stride_for(field.rows(), field.cols(), target_dimension);
    if stride == 1 {
        return field.clone();
    }

    let out_rows = field.rows().div_ceil(stride);
    let out_cols = field.cols().div_ceil(stride);
    let mut values = Vec::with_capacity(out_rows * out_cols);
    for i in (0..field.rows()).step_by(stride) {
        for j in (0..field.cols()).step_by(stride) {
            values.push(field.get(i, j));
        }
    }
    HeightField::from_parts(values, out_rows, out_cols)
}

/// Mirror the grid left-right, moving from image pixel space into the mesh frame
pub fn flip_columns(field: &HeightField) -> HeightField {
    let (rows, cols) = field.shape();
    let mut values = Vec::with_capacity(rows * cols);
    for i in 0..rows {
        for j in (0..cols).rev() {
            values.push(field.get(i, j));
        }
    }
    HeightField::from_parts(values, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(rows: usize, cols: usize) -> HeightField {
        let values = (0..rows * cols).map(|v| v as f64).collect();
        HeightField::from_parts(values, rows, cols)
    }

    #[test]
    fn stride_matches_contract() {
        assert_eq!(stride_for(1000, 500, 300), 4);
        assert_eq!(stride_for(300, 300, 300), 1);
        assert_eq!(stride_for(301, 10, 300), 2);
        assert_eq!(stride_for(1000, 500, NO_DOWNSAMPLING), 1);
    }

    #[test]
    fn downsample_shape() {
        let field = gradient(1000, 500);
        let out = downsample(&field, 300);
        assert_eq!(out.shape(), (250, 125));
        assert_eq!(out.get(0, 0), field.get(0, 0));
        assert_eq!(out.get(1, 1), field.get(4, 4));
    }

    #[test]
    fn sentinel_is_pass_through() {
        let field = gradient(17, 23);
        assert_eq!(downsample(&field, NO_DOWNSAMPLING), field);
    }

    #[test]
    fn flip_reverses_columns() {
        let field = HeightField::from_rows(&[&[1.0, 2.0, 3.0]]);
        let flipped = flip_columns(&field);
        assert_eq!(flipped.get(0, 0), 3.0);
        assert_eq!(flipped.get(0, 1), 2.0);
        assert_eq!(flipped.get(0, 2), 1.0);
    }

    #[test]
    fn flip_is_an_involution() {
        let field = gradient(7, 11);
        assert_eq!(flip_columns(&flip_columns(&field)), field);
    }
}
