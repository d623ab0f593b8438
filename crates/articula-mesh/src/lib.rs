#![warn(missing_docs)]

//! Triangulated solids for articula.
//!
//! A [`Solid`] is an immutable indexed triangle mesh with outward-facing,
//! counter-clockwise triangles. Solids come from the primitive builders in
//! [`primitives`], from [`Solid::concat`], or from the boolean engine.
//! Transforming a solid always yields a new one so rest-pose templates can be
//! re-posed every frame without accumulating error.

use articula_math::{Point3, RigidTransform};
use thiserror::Error;

pub mod export;
pub mod measure;
pub mod primitives;

pub use measure::Aabb;
pub use primitives::{cuboid, cylinder, orient, sphere};

/// Errors returned by solid construction and export.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// A primitive dimension or subdivision count is out of range.
    #[error("invalid geometry parameter `{parameter}` = {value}: must be {requirement}")]
    InvalidGeometryParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// Human-readable constraint.
        requirement: &'static str,
    },
    /// An I/O error occurred during export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An indexed triangle mesh describing a (nearly) closed volume.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Solid {
    vertices: Vec<Point3>,
    triangles: Vec<[u32; 3]>,
}

impl Solid {
    /// Build a solid from vertex positions and triangle index triples.
    pub fn new(vertices: Vec<Point3>, triangles: Vec<[u32; 3]>) -> Self {
        debug_assert!(triangles
            .iter()
            .flatten()
            .all(|&i| (i as usize) < vertices.len()));
        Self {
            vertices,
            triangles,
        }
    }

    /// A solid with no geometry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Vertex positions.
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Triangle index triples.
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// True when there are no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Iterate triangles as corner positions.
    pub fn triangle_points(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.triangles.iter().map(|t| {
            [
                self.vertices[t[0] as usize],
                self.vertices[t[1] as usize],
                self.vertices[t[2] as usize],
            ]
        })
    }

    /// A copy of this solid with `transform` applied to every vertex.
    pub fn transformed(&self, transform: &RigidTransform) -> Solid {
        Solid {
            vertices: self
                .vertices
                .iter()
                .map(|p| transform.apply_point(p))
                .collect(),
            triangles: self.triangles.clone(),
        }
    }

    /// Concatenate meshes into one solid without a boolean union.
    ///
    /// Overlapping inputs stay overlapping; use this for parts that are
    /// printed as one piece but never fed back into a boolean operation.
    pub fn concat(parts: &[&Solid]) -> Solid {
        let mut out = Solid::empty();
        for part in parts {
            let offset = out.vertices.len() as u32;
            out.vertices.extend_from_slice(&part.vertices);
            out.triangles.extend(
                part.triangles
                    .iter()
                    .map(|t| [t[0] + offset, t[1] + offset, t[2] + offset]),
            );
        }
        out
    }
}
