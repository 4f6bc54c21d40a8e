/// Axis-aligned solid extent tracking for reporting and metadata.
use crate::mesh::Mesh;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl MeshBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Grow the bounds to include a vertex
    pub fn update(&mut self, [x, y, z]: [f64; 3]) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.min_z = self.min_z.min(z);
        self.max_z = self.max_z.max(z);
    }

    /// Accumulate over every vertex of a mesh
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut bounds = Self::new();
        for triangle in &mesh.triangles {
            bounds.update(triangle.a);
            bounds.update(triangle.b);
            bounds.update(triangle.c);
        }
        bounds
    }

    /// Extent of the solid along each axis
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }
}

impl Default for MeshBounds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    #[test]
    fn accumulates_vertices() {
        let mesh = Mesh {
            triangles: vec![Triangle::new(
                [0.0, 0.0, 0.0],
                [2.0, 1.0, 0.0],
                [1.0, 3.0, 4.0],
            )],
        };
        let bounds = MeshBounds::from_mesh(&mesh);
        assert_eq!((bounds.min_x, bounds.max_x), (0.0, 2.0));
        assert_eq!((bounds.min_y, bounds.max_y), (0.0, 3.0));
        assert_eq!((bounds.min_z, bounds.max_z), (0.0, 4.0));
        assert_eq!(bounds.dimensions(), (2.0, 3.0, 4.0));
    }
}
