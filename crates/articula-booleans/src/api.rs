//! Public API types and entry point for boolean operations.

use std::collections::HashMap;

use articula_math::Point3;
use articula_mesh::Solid;
use csgrs::mesh::polygon::Polygon;
use csgrs::mesh::vertex::Vertex;
use csgrs::mesh::Mesh;
use csgrs::traits::CSG;

/// CSG boolean operation type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    /// Union: combine both solids.
    Union,
    /// Difference: subtract the tool from the target.
    Difference,
    /// Intersection: keep only the overlapping region.
    Intersection,
}

/// Perform a CSG boolean operation on two solids.
///
/// Both inputs are handed to `csgrs` as polygon meshes; the result is
/// triangulated back into a welded [`Solid`]. Inputs are never modified.
///
/// Shortcuts are taken when either side is empty or the bounding boxes do
/// not touch: difference returns the target, union concatenates, and
/// intersection is empty.
pub fn boolean_op(a: &Solid, b: &Solid, op: BooleanOp) -> Solid {
    if a.is_empty() || b.is_empty() {
        return match op {
            BooleanOp::Union if a.is_empty() => b.clone(),
            BooleanOp::Union | BooleanOp::Difference => a.clone(),
            BooleanOp::Intersection => Solid::empty(),
        };
    }

    if !a.aabb().overlaps(&b.aabb()) {
        tracing::trace!(?op, "bounding boxes disjoint, taking shortcut");
        return match op {
            BooleanOp::Union => Solid::concat(&[a, b]),
            BooleanOp::Difference => a.clone(),
            BooleanOp::Intersection => Solid::empty(),
        };
    }

    let ma = to_csg(a);
    let mb = to_csg(b);
    let out = match op {
        BooleanOp::Union => ma.union(&mb),
        BooleanOp::Difference => ma.difference(&mb),
        BooleanOp::Intersection => ma.intersection(&mb),
    };

    let result = from_csg(&out);
    tracing::debug!(
        ?op,
        input_triangles = a.num_triangles() + b.num_triangles(),
        polygons = out.polygons.len(),
        output_triangles = result.num_triangles(),
        "boolean finished"
    );
    result
}

/// `a - b`.
pub fn difference(a: &Solid, b: &Solid) -> Solid {
    boolean_op(a, b, BooleanOp::Difference)
}

/// `a + b`.
pub fn union(a: &Solid, b: &Solid) -> Solid {
    boolean_op(a, b, BooleanOp::Union)
}

/// `a & b`.
pub fn intersection(a: &Solid, b: &Solid) -> Solid {
    boolean_op(a, b, BooleanOp::Intersection)
}

// Triangles with a smaller doubled area carry no usable plane.
const MIN_DOUBLE_AREA: f64 = 1e-12;

fn to_csg(solid: &Solid) -> Mesh<()> {
    let polygons: Vec<Polygon<()>> = solid
        .triangle_points()
        .filter_map(|[a, b, c]| {
            let n = (b - a).cross(&(c - a));
            if n.norm() < MIN_DOUBLE_AREA {
                return None;
            }
            let n = n.normalize();
            Some(Polygon::new(
                vec![Vertex::new(a, n), Vertex::new(b, n), Vertex::new(c, n)],
                None,
            ))
        })
        .collect();
    Mesh::from_polygons(&polygons, None)
}

// Weld grid; vertices closer than this along every axis share an index.
const WELD_SCALE: f64 = 1e8;

fn from_csg(mesh: &Mesh<()>) -> Solid {
    let mut index: HashMap<[i64; 3], u32> = HashMap::new();
    let mut vertices: Vec<Point3> = Vec::new();
    let mut triangles = Vec::new();

    let mut weld = |p: &Point3| -> u32 {
        let key = [
            (p.x * WELD_SCALE).round() as i64,
            (p.y * WELD_SCALE).round() as i64,
            (p.z * WELD_SCALE).round() as i64,
        ];
        *index.entry(key).or_insert_with(|| {
            vertices.push(*p);
            (vertices.len() - 1) as u32
        })
    };

    // csgrs splits convex polygons into convex pieces, so a fan suffices.
    for poly in &mesh.polygons {
        let facing = poly.plane.normal();
        let Some(first) = poly.vertices.first().map(|v| v.pos) else {
            continue;
        };
        let ids: Vec<u32> = poly.vertices.iter().map(|v| weld(&v.pos)).collect();
        for k in 1..ids.len().saturating_sub(1) {
            let (b, c) = (poly.vertices[k].pos, poly.vertices[k + 1].pos);
            let mut tri = [ids[0], ids[k], ids[k + 1]];
            if (b - first).cross(&(c - first)).dot(&facing) < 0.0 {
                tri.swap(1, 2);
            }
            if tri[0] != tri[1] && tri[1] != tri[2] && tri[0] != tri[2] {
                triangles.push(tri);
            }
        }
    }

    Solid::new(vertices, triangles)
}
