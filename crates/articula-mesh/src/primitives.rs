//! Primitive solid construction: cylinder, icosphere and box.
//!
//! Every primitive is centered at the origin. Cylinders run along Z.
//! Parameters are validated before any geometry is built; degenerate
//! polygons make the boolean engine unstable, so fewer than three sections or
//! subdivisions are rejected.

use std::collections::HashMap;

use articula_math::{Point3, RigidTransform, Vec3};

use crate::{GeometryError, Solid};

/// Smallest accepted section or subdivision count.
pub const MIN_SUBDIVISIONS: u32 = 3;

fn require_positive(parameter: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::InvalidGeometryParameter {
            parameter,
            value,
            requirement: "finite and > 0",
        })
    }
}

fn require_count(parameter: &'static str, value: u32) -> Result<(), GeometryError> {
    if value >= MIN_SUBDIVISIONS {
        Ok(())
    } else {
        Err(GeometryError::InvalidGeometryParameter {
            parameter,
            value: value as f64,
            requirement: ">= 3",
        })
    }
}

/// Build a closed cylinder of `radius` and `height` along Z, centered at the
/// origin, with `sections` facets around the axis.
///
/// Caps are fanned around a center vertex.
pub fn cylinder(radius: f64, height: f64, sections: u32) -> Result<Solid, GeometryError> {
    require_positive("radius", radius)?;
    require_positive("height", height)?;
    require_count("sections", sections)?;

    let n = sections;
    let half = height / 2.0;
    let mut vertices = Vec::with_capacity(2 * n as usize + 2);
    vertices.push(Point3::new(0.0, 0.0, -half));
    vertices.push(Point3::new(0.0, 0.0, half));
    for i in 0..n {
        let theta = std::f64::consts::TAU * i as f64 / n as f64;
        let (s, c) = theta.sin_cos();
        vertices.push(Point3::new(radius * c, radius * s, -half));
        vertices.push(Point3::new(radius * c, radius * s, half));
    }

    let bottom = |i: u32| 2 + 2 * (i % n);
    let top = |i: u32| 3 + 2 * (i % n);

    let mut triangles = Vec::with_capacity(4 * n as usize);
    for i in 0..n {
        let j = i + 1;
        triangles.push([bottom(i), bottom(j), top(j)]);
        triangles.push([bottom(i), top(j), top(i)]);
        triangles.push([0, bottom(j), bottom(i)]);
        triangles.push([1, top(i), top(j)]);
    }

    Ok(Solid::new(vertices, triangles))
}

/// Build an icosphere: an icosahedron subdivided `subdivisions` times with
/// every vertex pushed out to `radius`.
///
/// The result has `10 * 4^s + 2` vertices and `20 * 4^s` triangles.
pub fn sphere(radius: f64, subdivisions: u32) -> Result<Solid, GeometryError> {
    require_positive("radius", radius)?;
    require_count("subdivisions", subdivisions)?;

    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let mut dirs: Vec<Vec3> = [
        (-1.0, t, 0.0),
        (1.0, t, 0.0),
        (-1.0, -t, 0.0),
        (1.0, -t, 0.0),
        (0.0, -1.0, t),
        (0.0, 1.0, t),
        (0.0, -1.0, -t),
        (0.0, 1.0, -t),
        (t, 0.0, -1.0),
        (t, 0.0, 1.0),
        (-t, 0.0, -1.0),
        (-t, 0.0, 1.0),
    ]
    .iter()
    .map(|&(x, y, z)| Vec3::new(x, y, z).normalize())
    .collect();

    let mut faces: Vec<[u32; 3]> = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::new();
        let mut midpoint = |a: u32, b: u32, dirs: &mut Vec<Vec3>| -> u32 {
            let key = if a < b { (a, b) } else { (b, a) };
            *midpoints.entry(key).or_insert_with(|| {
                let m = (dirs[a as usize] + dirs[b as usize]).normalize();
                dirs.push(m);
                (dirs.len() - 1) as u32
            })
        };

        let mut next = Vec::with_capacity(faces.len() * 4);
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut dirs);
            let bc = midpoint(b, c, &mut dirs);
            let ca = midpoint(c, a, &mut dirs);
            next.push([a, ab, ca]);
            next.push([b, bc, ab]);
            next.push([c, ca, bc]);
            next.push([ab, bc, ca]);
        }
        faces = next;
    }

    let vertices = dirs.iter().map(|d| Point3::from(d * radius)).collect();
    Ok(Solid::new(vertices, faces))
}

/// Build an axis-aligned box with extents `(x, y, z)` centered at the origin.
pub fn cuboid(x: f64, y: f64, z: f64) -> Result<Solid, GeometryError> {
    require_positive("x", x)?;
    require_positive("y", y)?;
    require_positive("z", z)?;

    // corner i has bit 0 = +x, bit 1 = +y, bit 2 = +z
    let vertices = (0..8u32)
        .map(|i| {
            Point3::new(
                if i & 1 == 0 { -x / 2.0 } else { x / 2.0 },
                if i & 2 == 0 { -y / 2.0 } else { y / 2.0 },
                if i & 4 == 0 { -z / 2.0 } else { z / 2.0 },
            )
        })
        .collect();

    let triangles = vec![
        [0, 2, 3],
        [0, 3, 1],
        [4, 5, 7],
        [4, 7, 6],
        [0, 1, 5],
        [0, 5, 4],
        [2, 6, 7],
        [2, 7, 3],
        [0, 4, 6],
        [0, 6, 2],
        [1, 3, 7],
        [1, 7, 5],
    ];

    Ok(Solid::new(vertices, triangles))
}

/// Return a copy of `solid` rotated by `rotation` and then moved by
/// `translation`.
pub fn orient(solid: &Solid, rotation: &RigidTransform, translation: &Vec3) -> Solid {
    solid.transformed(&RigidTransform::translation_vec(translation).then(rotation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use articula_math::y_axis;

    #[test]
    fn cylinder_counts_and_bounds() {
        let c = cylinder(2.0, 10.0, 16).unwrap();
        assert_eq!(c.num_vertices(), 34);
        assert_eq!(c.num_triangles(), 64);
        let bb = c.aabb();
        assert_relative_eq!(bb.min.z, -5.0);
        assert_relative_eq!(bb.max.z, 5.0);
        assert_relative_eq!(bb.max.x, 2.0);
    }

    #[test]
    fn cylinder_volume_matches_prism() {
        let n = 64;
        let c = cylinder(6.0, 22.0, n).unwrap();
        let theta = std::f64::consts::TAU / n as f64;
        let prism = 0.5 * n as f64 * 36.0 * theta.sin() * 22.0;
        assert_relative_eq!(c.volume(), prism, max_relative = 1e-10);
    }

    #[test]
    fn icosphere_counts() {
        let s = sphere(10.0, 3).unwrap();
        assert_eq!(s.num_vertices(), 642);
        assert_eq!(s.num_triangles(), 1280);
        for p in s.vertices() {
            assert_relative_eq!(p.coords.norm(), 10.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn icosphere_is_outward_and_close_to_ball_volume() {
        let s = sphere(10.0, 3).unwrap();
        let ball = 4.0 / 3.0 * std::f64::consts::PI * 1000.0;
        // inscribed polyhedron: slightly smaller than the ball
        assert!(s.volume() < ball);
        assert!(s.volume() > 0.97 * ball);
        assert!(s.signed_volume() > 0.0);
    }

    #[test]
    fn cuboid_volume_and_orientation() {
        let b = cuboid(2.0, 3.0, 4.0).unwrap();
        assert_relative_eq!(b.signed_volume(), 24.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(matches!(
            cylinder(0.0, 1.0, 8),
            Err(GeometryError::InvalidGeometryParameter { parameter: "radius", .. })
        ));
        assert!(matches!(
            cylinder(1.0, -1.0, 8),
            Err(GeometryError::InvalidGeometryParameter { parameter: "height", .. })
        ));
        assert!(matches!(
            cylinder(1.0, 1.0, 2),
            Err(GeometryError::InvalidGeometryParameter { parameter: "sections", .. })
        ));
        assert!(matches!(
            sphere(1.0, 2),
            Err(GeometryError::InvalidGeometryParameter { parameter: "subdivisions", .. })
        ));
        assert!(sphere(f64::NAN, 3).is_err());
        assert!(cuboid(1.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn orient_rotates_then_translates() {
        let c = cylinder(1.0, 10.0, 8).unwrap();
        let o = orient(
            &c,
            &RigidTransform::rotation_deg(&y_axis(), 90.0),
            &Vec3::new(0.0, 0.0, 3.0),
        );
        let bb = o.aabb();
        assert_relative_eq!(bb.min.x, -5.0, epsilon = 1e-9);
        assert_relative_eq!(bb.max.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(bb.center().z, 3.0, epsilon = 1e-9);
    }
}
