//! Mesh measurement: volume, bounds, point containment.

use articula_math::{Point3, Vec3};

use crate::Solid;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb {
    /// An inverted box that any point will grow.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// Grow the box to include `p`.
    pub fn include(&mut self, p: &Point3) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// True if no point was ever included.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Check if two boxes overlap (touching counts).
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Center point.
    pub fn center(&self) -> Point3 {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

// A generic direction keeps the parity ray off edges and vertices of the
// axis-aligned and rotationally symmetric meshes this crate produces.
const RAY_DIR: [f64; 3] = [0.871_779_788_7, 0.414_213_562_4, 0.262_265_437_3];

impl Solid {
    /// Signed volume via the divergence theorem. Positive for outward
    /// winding.
    pub fn signed_volume(&self) -> f64 {
        self.triangle_points()
            .map(|[a, b, c]| a.coords.dot(&b.coords.cross(&c.coords)))
            .sum::<f64>()
            / 6.0
    }

    /// Enclosed volume.
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }

    /// Bounding box of all vertices.
    pub fn aabb(&self) -> Aabb {
        let mut bb = Aabb::empty();
        for p in self.vertices() {
            bb.include(p);
        }
        bb
    }

    /// Test if a point is inside the solid by counting crossings of a ray.
    ///
    /// Odd crossing count = inside. Uses Möller-Trumbore per triangle.
    pub fn contains_point(&self, point: &Point3) -> bool {
        let dir = Vec3::new(RAY_DIR[0], RAY_DIR[1], RAY_DIR[2]);
        let mut crossings = 0u32;

        for [v0, v1, v2] in self.triangle_points() {
            let edge1 = v1 - v0;
            let edge2 = v2 - v0;
            let h = dir.cross(&edge2);
            let a = edge1.dot(&h);
            if a.abs() < 1e-14 {
                continue;
            }

            let f = 1.0 / a;
            let s = point - v0;
            let u = f * s.dot(&h);
            if !(0.0..=1.0).contains(&u) {
                continue;
            }

            let q = s.cross(&edge1);
            let v = f * dir.dot(&q);
            if v < 0.0 || u + v > 1.0 {
                continue;
            }

            if f * edge2.dot(&q) > 1e-10 {
                crossings += 1;
            }
        }

        crossings % 2 == 1
    }
}
