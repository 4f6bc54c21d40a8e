//! Solid mesh construction from a cropped height grid.
//!
//! Walks the grid cell-by-cell; every cell whose four corner samples are all
//! valid becomes a closed triangulated column: two top-surface triangles plus
//! vertical walls dropping to the z = 0 base. Cells touching a missing sample
//! contribute nothing, which is how holes and irregular silhouettes in the
//! source data survive into the output solid.

use crate::constants::TRIANGLES_PER_CELL;
use crate::error::ConvertError;
use crate::heightfield::HeightField;
use crate::mask::ValidityMask;
use crate::mesh::{Mesh, Triangle};
use rayon::prelude::*;

/// Side-wall emission policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallMode {
    /// Walls on all four edges of every active cell, interior double-walls
    /// between neighbouring active cells included
    #[default]
    PerCell,
    /// Walls only where the neighbouring cell is inactive or out of bounds
    SilhouetteOnly,
}

impl WallMode {
    pub fn label(&self) -> &'static str {
        match self {
            WallMode::PerCell => "per-cell",
            WallMode::SilhouetteOnly => "silhouette",
        }
    }
}

/// Cell offsets across the front, right, back, and left edges, in wall
/// emission order
const EDGE_NEIGHBOURS: [(isize, isize); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];

/// A cell is active iff its four corner samples are all valid
fn cell_active(mask: &ValidityMask, i: usize, j: usize) -> bool {
    mask.get(i, j) && mask.get(i + 1, j) && mask.get(i, j + 1) && mask.get(i + 1, j + 1)
}

/// Number of cells whose four corners are all valid
pub fn active_cell_count(mask: &ValidityMask) -> usize {
    let (rows, cols) = mask.shape();
    if rows < 2 || cols < 2 {
        return 0;
    }
    (0..rows - 1)
        .map(|i| (0..cols - 1).filter(|&j| cell_active(mask, i, j)).count())
        .sum()
}

/// Whether the cell offset by (di, dj) is an active in-bounds cell
fn neighbour_active(
    mask: &ValidityMask,
    i: usize,
    j: usize,
    (di, dj): (isize, isize),
    cell_rows: usize,
    cell_cols: usize,
) -> bool {
    let ni = i as isize + di;
    let nj = j as isize + dj;
    if ni < 0 || nj < 0 || ni >= cell_rows as isize || nj >= cell_cols as isize {
        return false;
    }
    cell_active(mask, ni as usize, nj as usize)
}

/// Which of the four walls a cell emits under the given mode
fn wall_edges(
    mask: &ValidityMask,
    i: usize,
    j: usize,
    mode: WallMode,
    cell_rows: usize,
    cell_cols: usize,
) -> [bool; 4] {
    match mode {
        WallMode::PerCell => [true; 4],
        WallMode::SilhouetteOnly => {
            EDGE_NEIGHBOURS.map(|offset| !neighbour_active(mask, i, j, offset, cell_rows, cell_cols))
        }
    }
}

/// Triangles the cell will emit: 2 top + 2 per emitted wall, 0 when inactive
fn cell_triangle_count(
    mask: &ValidityMask,
    i: usize,
    j: usize,
    mode: WallMode,
    cell_rows: usize,
    cell_cols: usize,
) -> usize {
    if !cell_active(mask, i, j) {
        return 0;
    }
    match mode {
        WallMode::PerCell => TRIANGLES_PER_CELL,
        WallMode::SilhouetteOnly => {
            let walls = wall_edges(mask, i, j, mode, cell_rows, cell_cols)
                .iter()
                .filter(|&&edge| edge)
                .count();
            2 + 2 * walls
        }
    }
}

/// Emit one cell row into its pre-sized output slice
fn fill_row(z: &HeightField, mask: &ValidityMask, mode: WallMode, i: usize, out: &mut [Triangle]) {
    let cell_rows = z.rows() - 1;
    let cell_cols = z.cols() - 1;
    let mut cursor = 0;
    for j in 0..cell_cols {
        if !cell_active(mask, i, j) {
            continue;
        }
        let (x0, x1) = (j as f64, (j + 1) as f64);
        let (y0, y1) = (i as f64, (i + 1) as f64);

        // Top-surface corners and their projections onto the z = 0 base
        let v0 = [x0, y0, z.get(i, j)];
        let v1 = [x0, y1, z.get(i + 1, j)];
        let v2 = [x1, y0, z.get(i, j + 1)];
        let v3 = [x1, y1, z.get(i + 1, j + 1)];
        let b0 = [x0, y0, 0.0];
        let b1 = [x0, y1, 0.0];
        let b2 = [x1, y0, 0.0];
        let b3 = [x1, y1, 0.0];

        // Top surface, split along the fixed v1-v2 diagonal
        out[cursor] = Triangle::new(v0, v1, v2);
        out[cursor + 1] = Triangle::new(v1, v3, v2);
        cursor += 2;

        // Front, right, back, left walls from the top edge down to the base
        let edges = wall_edges(mask, i, j, mode, cell_rows, cell_cols);
        let walls = [
            (v0, v1, b0, b1),
            (v1, v3, b1, b3),
            (v3, v2, b3, b2),
            (v2, v0, b2, b0),
        ];
        for (edge, &(top_a, top_b, base_a, base_b)) in walls.iter().enumerate() {
            if !edges[edge] {
                continue;
            }
            out[cursor] = Triangle::new(top_a, top_b, base_a);
            out[cursor + 1] = Triangle::new(top_b, base_b, base_a);
            cursor += 2;
        }
    }
    debug_assert_eq!(cursor, out.len());
}

/// Build the solid mesh from a cropped (z, mask) pair.
///
/// Cells are visited in row-major order with a fixed per-cell emission
/// sequence, so the output is deterministic; rows are filled in parallel into
/// disjoint slices sized by a prefix count. One extra slot stays reserved for
/// a bottom cap that is never written, so the mesh always ends with a single
/// zero triangle.
pub fn solidify(z: &HeightField, mask: &ValidityMask, mode: WallMode) -> Result<Mesh, ConvertError> {
    debug_assert_eq!(z.shape(), mask.shape());
    let (rows, cols) = z.shape();
    if rows < 2 || cols < 2 {
        return Err(ConvertError::EmptyGeometry);
    }
    let cell_rows = rows - 1;
    let cell_cols = cols - 1;

    let row_counts: Vec<usize> = (0..cell_rows)
        .into_par_iter()
        .map(|i| {
            (0..cell_cols)
                .map(|j| cell_triangle_count(mask, i, j, mode, cell_rows, cell_cols))
                .sum()
        })
        .collect();
    let total: usize = row_counts.iter().sum();
    if total == 0 {
        return Err(ConvertError::EmptyGeometry);
    }

    let mut triangles = vec![Triangle::default(); total + 1];

    let (body, _reserved) = triangles.split_at_mut(total);
    let mut rest = body;
    let mut row_slices = Vec::with_capacity(cell_rows);
    for &count in &row_counts {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(count);
        row_slices.push(head);
        rest = tail;
    }

    row_slices
        .into_par_iter()
        .enumerate()
        .for_each(|(i, slice)| fill_row(z, mask, mode, i, slice));

    Ok(Mesh { triangles })
}
