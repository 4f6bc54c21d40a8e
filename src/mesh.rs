/// Triangle soup accumulated by the solidifier.

/// One oriented triangle; winding determines the outward normal
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub a: [f64; 3],
    pub b: [f64; 3],
    pub c: [f64; 3],
}

impl Triangle {
    pub fn new(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
        Self { a, b, c }
    }
}

/// Ordered triangle sequence, handed whole to the STL writer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}
