#![warn(missing_docs)]

//! Math types for articula.
//!
//! Thin wrappers around nalgebra: points, vectors, unit directions, the
//! [`RigidTransform`] used by every joint frame.

use nalgebra::{Matrix4, Rotation3, Vector3, Vector4};

pub use nalgebra::Unit;

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Unit X direction.
pub fn x_axis() -> Dir3 {
    Vector3::x_axis()
}

/// Unit Y direction.
pub fn y_axis() -> Dir3 {
    Vector3::y_axis()
}

/// Unit Z direction.
pub fn z_axis() -> Dir3 {
    Vector3::z_axis()
}

/// A rotation + translation stored as a 4x4 homogeneous matrix.
///
/// Composition is plain matrix multiplication: `a.then(&b)` is `a * b`, so
/// `b` acts on points first and the result is expressed in `a`'s frame.
/// That is the parent-then-local order used throughout the kinematic chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    matrix: Matrix4<f64>,
}

impl RigidTransform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self::translation_vec(&Vec3::new(dx, dy, dz))
    }

    /// Translation by a vector.
    pub fn translation_vec(v: &Vec3) -> Self {
        Self {
            matrix: Matrix4::new_translation(v),
        }
    }

    /// Rotation about an axis through the origin by `angle` radians.
    pub fn rotation(axis: &Dir3, angle: f64) -> Self {
        Self {
            matrix: Rotation3::from_axis_angle(axis, angle).to_homogeneous(),
        }
    }

    /// Rotation about an axis through the origin by `degrees`.
    pub fn rotation_deg(axis: &Dir3, degrees: f64) -> Self {
        Self::rotation(axis, degrees.to_radians())
    }

    /// The smallest rotation taking direction `from` onto direction `to`.
    ///
    /// Antiparallel inputs rotate half a turn about an axis perpendicular to
    /// `from`.
    pub fn rotation_between(from: &Dir3, to: &Dir3) -> Self {
        match Rotation3::rotation_between(from.as_ref(), to.as_ref()) {
            Some(r) => Self {
                matrix: r.to_homogeneous(),
            },
            None => {
                let helper = if from.x.abs() < 0.9 {
                    Vec3::x()
                } else {
                    Vec3::y()
                };
                let perp = Unit::new_normalize(from.cross(&helper));
                Self::rotation(&perp, std::f64::consts::PI)
            }
        }
    }

    /// Compose: `self * other` (apply `other` first, then `self`).
    pub fn then(&self, other: &RigidTransform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (rotation only).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Where this transform places the local origin.
    pub fn origin(&self) -> Point3 {
        Point3::new(
            self.matrix[(0, 3)],
            self.matrix[(1, 3)],
            self.matrix[(2, 3)],
        )
    }

    /// The underlying 4x4 matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Element-wise comparison with an absolute tolerance.
    pub fn approx_eq(&self, other: &RigidTransform, eps: f64) -> bool {
        (self.matrix - other.matrix).amax() <= eps
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for RigidTransform {
    type Output = RigidTransform;

    fn mul(self, rhs: RigidTransform) -> RigidTransform {
        self.then(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn translation_moves_points() {
        let t = RigidTransform::translation(10.0, 20.0, 30.0);
        let p = t.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(p, Point3::new(11.0, 22.0, 33.0), epsilon = 1e-12);
        // vectors ignore translation
        let v = t.apply_vec(&Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(v, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_deg_about_x() {
        let r = RigidTransform::rotation_deg(&x_axis(), 90.0);
        let p = r.apply_point(&Point3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(p, Point3::new(0.0, -1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn then_applies_right_operand_first() {
        let rot = RigidTransform::rotation_deg(&z_axis(), 90.0);
        let shift = RigidTransform::translation(1.0, 0.0, 0.0);

        // rotate the shifted point: (1,0,0) -> (0,1,0)
        let a = rot.then(&shift).apply_point(&Point3::origin());
        assert_relative_eq!(a, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);

        // shift the rotated point: origin stays, then moves to (1,0,0)
        let b = shift.then(&rot).apply_point(&Point3::origin());
        assert_relative_eq!(b, Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn rotation_between_maps_directions() {
        let r = RigidTransform::rotation_between(&z_axis(), &Unit::new_normalize(-Vec3::y()));
        let v = r.apply_vec(&Vec3::z());
        assert_relative_eq!(v, -Vec3::y(), epsilon = 1e-12);

        let flip = RigidTransform::rotation_between(&z_axis(), &Unit::new_normalize(-Vec3::z()));
        let v = flip.apply_vec(&Vec3::z());
        assert_relative_eq!(v, -Vec3::z(), epsilon = 1e-12);
    }

    #[test]
    fn origin_reads_translation() {
        let t = RigidTransform::rotation_deg(&x_axis(), 30.0)
            .then(&RigidTransform::translation(0.0, 0.0, 30.0));
        let o = t.origin();
        let expected = RigidTransform::rotation_deg(&x_axis(), 30.0)
            .apply_point(&Point3::new(0.0, 0.0, 30.0));
        assert_relative_eq!(o, expected, epsilon = 1e-12);
    }
}
