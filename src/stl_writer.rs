//! Binary STL serialisation of the solid mesh.
//!
//! 80-byte header, little-endian u32 triangle count, then one 50-byte record
//! per triangle: face normal, three vertices as f32, and a zero attribute
//! count. Triangles are written in emission order.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::ConvertError;
use crate::mesh::{Mesh, Triangle};

const HEADER_TAG: &[u8] = b"height-field-solidifier stl";

/// Unit face normal from the triangle winding; zero for degenerate triangles
pub(crate) fn face_normal(triangle: &Triangle) -> [f64; 3] {
    let u = [
        triangle.b[0] - triangle.a[0],
        triangle.b[1] - triangle.a[1],
        triangle.b[2] - triangle.a[2],
    ];
    let v = [
        triangle.c[0] - triangle.a[0],
        triangle.c[1] - triangle.a[1],
        triangle.c[2] - triangle.a[2],
    ];
    let normal = [
        u[1] * v[2] - u[2] * v[1],
        u[2] * v[0] - u[0] * v[2],
        u[0] * v[1] - u[1] * v[0],
    ];
    let len = (normal[0] * normal[0] + normal[1] * normal[1] + normal[2] * normal[2]).sqrt();
    if len > 0.0 {
        [normal[0] / len, normal[1] / len, normal[2] / len]
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Serialise the mesh to any writer
pub fn write_stl<W: Write>(writer: &mut W, mesh: &Mesh) -> Result<(), ConvertError> {
    let mut header = [0u8; 80];
    header[..HEADER_TAG.len()].copy_from_slice(HEADER_TAG);
    writer.write_all(&header)?;
    writer.write_all(&(mesh.triangles.len() as u32).to_le_bytes())?;

    for triangle in &mesh.triangles {
        let normal = face_normal(triangle);
        for vertex in [normal, triangle.a, triangle.b, triangle.c] {
            for component in vertex {
                writer.write_all(&(component as f32).to_le_bytes())?;
            }
        }
        writer.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}

/// Write the mesh to a file path
pub fn export_stl<P: AsRef<Path>>(path: P, mesh: &Mesh) -> Result<(), ConvertError> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_stl(&mut writer, mesh)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_mesh() -> Mesh {
        Mesh {
            triangles: vec![
                Triangle::new([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
                Triangle::default(),
            ],
        }
    }

    #[test]
    fn layout_is_84_plus_50_per_triangle() {
        let mut buffer = Vec::new();
        write_stl(&mut buffer, &sample_mesh()).unwrap();
        assert_eq!(buffer.len(), 84 + 2 * 50);
        assert_eq!(&buffer[80..84], &2u32.to_le_bytes());
    }

    #[test]
    fn first_record_holds_normal_then_vertices() {
        let mut buffer = Vec::new();
        write_stl(&mut buffer, &sample_mesh()).unwrap();
        let floats: Vec<f32> = buffer[84..132]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(&floats[..3], &[0.0, 0.0, 1.0]);
        assert_eq!(&floats[3..6], &[0.0, 0.0, 0.0]);
        assert_eq!(&floats[6..9], &[1.0, 0.0, 0.0]);
        assert_eq!(&floats[9..12], &[0.0, 1.0, 0.0]);
        assert_eq!(&buffer[132..134], &0u16.to_le_bytes());
    }

    #[test]
    fn degenerate_triangle_gets_zero_normal() {
        assert_eq!(face_normal(&Triangle::default()), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn empty_mesh_is_header_only() {
        let mut buffer = Vec::new();
        write_stl(&mut buffer, &Mesh::default()).unwrap();
        assert_eq!(buffer.len(), 84);
        assert_eq!(&buffer[80..84], &0u32.to_le_bytes());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let result = export_stl("/nonexistent-dir/out.stl", &sample_mesh());
        assert!(matches!(result, Err(ConvertError::Io(_))));
    }
}
