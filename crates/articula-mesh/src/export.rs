//! Mesh export: Wavefront OBJ and binary STL.

use std::fmt::Write as _;
use std::path::Path;

use crate::{GeometryError, Solid};

/// Render a solid as Wavefront OBJ text under object name `name`.
///
/// Face indices are 1-based; no normals or materials are written.
pub fn to_obj_string(solid: &Solid, name: &str) -> String {
    let mut out = String::with_capacity(32 * (solid.num_vertices() + solid.num_triangles()));
    let _ = writeln!(out, "# articula OBJ export");
    let _ = writeln!(out, "o {name}");
    for p in solid.vertices() {
        let _ = writeln!(out, "v {} {} {}", p.x, p.y, p.z);
    }
    for t in solid.triangles() {
        let _ = writeln!(out, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1);
    }
    out
}

/// Write a solid to an OBJ file.
pub fn write_obj(solid: &Solid, name: &str, path: impl AsRef<Path>) -> Result<(), GeometryError> {
    std::fs::write(path.as_ref(), to_obj_string(solid, name))?;
    tracing::debug!(path = %path.as_ref().display(), triangles = solid.num_triangles(), "wrote OBJ");
    Ok(())
}

/// Encode a solid as binary STL.
pub fn to_stl_bytes(solid: &Solid) -> Vec<u8> {
    let num_triangles = solid.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * 50);

    let mut header = [b' '; 80];
    let tag = b"articula binary STL";
    header[..tag.len()].copy_from_slice(tag);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for [v0, v1, v2] in solid.triangle_points() {
        let n = (v1 - v0).cross(&(v2 - v0));
        let len = n.norm();
        let n = if len > 0.0 { n / len } else { n };
        for c in [n.x, n.y, n.z] {
            data.extend_from_slice(&(c as f32).to_le_bytes());
        }
        for v in [v0, v1, v2] {
            for c in [v.x, v.y, v.z] {
                data.extend_from_slice(&(c as f32).to_le_bytes());
            }
        }
        // attribute byte count
        data.extend_from_slice(&0u16.to_le_bytes());
    }

    data
}

/// Write a solid to a binary STL file.
pub fn write_stl(solid: &Solid, path: impl AsRef<Path>) -> Result<(), GeometryError> {
    std::fs::write(path.as_ref(), to_stl_bytes(solid))?;
    tracing::debug!(path = %path.as_ref().display(), triangles = solid.num_triangles(), "wrote STL");
    Ok(())
}
