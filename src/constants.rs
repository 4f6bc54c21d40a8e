/// Shared configuration for height field conversion

/// Default maximum grid dimension before meshing
pub const DEFAULT_TARGET_DIMENSION: i64 = 300;

/// Sentinel target dimension that disables downsampling
pub const NO_DOWNSAMPLING: i64 = -1;

/// Default vertical scale applied to transformed heights
pub const DEFAULT_Z_SCALE: f64 = 50.0;

/// Default Gaussian smoothing standard deviation
pub const DEFAULT_SIGMA: f64 = 4.0;

/// Gaussian kernel truncation, in standard deviations
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

/// Base offset lifting every transformed height off the z=0 floor
pub const Z_OFFSET: f64 = 0.01;

/// Triangles per active cell with per-cell walls (2 top + 8 side)
pub const TRIANGLES_PER_CELL: usize = 10;
