/// Separable Gaussian smoothing of height values.
use crate::constants::GAUSSIAN_TRUNCATE;
use crate::heightfield::HeightField;
use rayon::prelude::*;

/// Discrete Gaussian weights truncated at GAUSSIAN_TRUNCATE standard
/// deviations and normalised to sum 1
fn kernel(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let mut weights: Vec<f64> = (-radius..=radius)
        .map(|x| (-0.5 * (x * x) as f64 / (sigma * sigma)).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for weight in &mut weights {
        *weight /= sum;
    }
    weights
}

/// Mirror an out-of-range index back into [0, len)
fn reflect(mut index: isize, len: usize) -> usize {
    let n = len as isize;
    loop {
        if index < 0 {
            index = -index - 1;
        } else if index >= n {
            index = 2 * n - index - 1;
        } else {
            return index as usize;
        }
    }
}

/// Horizontal pass over a rows x cols buffer
fn blur_rows(input: &[f64], rows: usize, cols: usize, weights: &[f64]) -> Vec<f64> {
    let radius = (weights.len() / 2) as isize;
    let mut output = vec![0.0; rows * cols];
    output
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(i, out_row)| {
            let in_row = &input[i * cols..(i + 1) * cols];
            for (j, out) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, weight) in weights.iter().enumerate() {
                    let src = reflect(j as isize + k as isize - radius, cols);
                    acc += weight * in_row[src];
                }
                *out = acc;
            }
        });
    output
}

/// Vertical pass over a rows x cols buffer
fn blur_cols(input: &[f64], rows: usize, cols: usize, weights: &[f64]) -> Vec<f64> {
    let radius = (weights.len() / 2) as isize;
    let mut output = vec![0.0; rows * cols];
    output
        .par_chunks_mut(cols)
        .enumerate()
        .for_each(|(i, out_row)| {
            for (j, out) in out_row.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, weight) in weights.iter().enumerate() {
                    let src = reflect(i as isize + k as isize - radius, rows);
                    acc += weight * input[src * cols + j];
                }
                *out = acc;
            }
        });
    output
}

/// Gaussian blur with validity-weighted handling of missing samples.
///
/// Fully valid fields get the textbook separable result. Next to missing
/// regions the kernel renormalises over the valid support, so valid samples
/// stay finite; cells with no valid support stay NaN. `sigma <= 0` is the
/// identity. Which cells count as valid is always decided by the
/// pre-smoothing field, never this output.
pub fn gaussian_smooth(field: &HeightField, sigma: f64) -> HeightField {
    let (rows, cols) = field.shape();
    if sigma <= 0.0 {
        return field.clone();
    }
    let weights = kernel(sigma);

    let mut numerator = Vec::with_capacity(rows * cols);
    let mut support = Vec::with_capacity(rows * cols);
    for &value in field.values() {
        if value.is_nan() {
            numerator.push(0.0);
            support.push(0.0);
        } else {
            numerator.push(value);
            support.push(1.0);
        }
    }

    let numerator = blur_cols(&blur_rows(&numerator, rows, cols, &weights), rows, cols, &weights);
    let support = blur_cols(&blur_rows(&support, rows, cols, &weights), rows, cols, &weights);

    let values = numerator
        .iter()
        .zip(&support)
        .map(|(&n, &s)| if s > 0.0 { n / s } else { f64::NAN })
        .collect();
    HeightField::from_parts(values, rows, cols)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Direct (non-separable) reference convolution with the same kernel
    /// and reflect boundary
    fn reference_blur(field: &HeightField, sigma: f64) -> Vec<f64> {
        let (rows, cols) = field.shape();
        let weights = kernel(sigma);
        let radius = (weights.len() / 2) as isize;
        let mut output = vec![0.0; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                let mut acc = 0.0;
                for (ki, wi) in weights.iter().enumerate() {
                    let si = reflect(i as isize + ki as isize - radius, rows);
                    for (kj, wj) in weights.iter().enumerate() {
                        let sj = reflect(j as isize + kj as isize - radius, cols);
                        acc += wi * wj * field.get(si, sj);
                    }
                }
                output[i * cols + j] = acc;
            }
        }
        output
    }

    fn wavy(rows: usize, cols: usize) -> HeightField {
        let values = (0..rows * cols)
            .map(|v| ((v * 31 + 7) % 13) as f64 * 0.5)
            .collect();
        HeightField::from_parts(values, rows, cols)
    }

    #[test]
    fn kernel_sums_to_one() {
        let weights = kernel(4.0);
        let sum: f64 = weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert_eq!(weights.len(), 2 * 16 + 1);
    }

    #[test]
    fn non_positive_sigma_is_identity() {
        let field = wavy(4, 5);
        assert_eq!(gaussian_smooth(&field, 0.0), field);
        assert_eq!(gaussian_smooth(&field, -1.0), field);
    }

    #[test]
    fn uniform_field_is_unchanged() {
        let field = HeightField::from_parts(vec![5.0; 6 * 9], 6, 9);
        let smoothed = gaussian_smooth(&field, 2.5);
        for &value in smoothed.values() {
            assert!((value - 5.0).abs() < 1e-12);
        }
    }

    #[test]
    fn matches_reference_convolution_on_valid_fields() {
        let field = wavy(12, 17);
        let smoothed = gaussian_smooth(&field, 1.3);
        let reference = reference_blur(&field, 1.3);
        for (got, want) in smoothed.values().iter().zip(&reference) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
    }

    #[test]
    fn valid_samples_stay_finite_next_to_missing_regions() {
        let mut values = vec![1.0; 10 * 10];
        for i in 0..5 {
            for j in 0..5 {
                values[i * 10 + j] = f64::NAN;
            }
        }
        let field = HeightField::from_parts(values, 10, 10);
        let smoothed = gaussian_smooth(&field, 2.0);
        for i in 0..10 {
            for j in 0..10 {
                if field.is_valid(i, j) {
                    assert!(smoothed.get(i, j).is_finite());
                }
            }
        }
    }

    #[test]
    fn isolated_missing_region_stays_nan() {
        // Larger than the kernel support, so the centre has no valid support.
        let side = 41;
        let mut values = vec![f64::NAN; side * side];
        values[0] = 1.0;
        let field = HeightField::from_parts(values, side, side);
        let smoothed = gaussian_smooth(&field, 1.0);
        assert!(smoothed.get(side / 2, side / 2).is_nan());
        assert!(smoothed.get(0, 0).is_finite());
    }
}
