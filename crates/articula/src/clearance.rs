//! Clearance-fit shells and open cradles.
//!
//! A female part is built as `outer - inner`, where the inner solid is the
//! male envelope grown by the clearance and the outer one adds the wall.
//! Radii are always derived from the parameters, never measured back from
//! tessellated or transformed geometry.

use std::fmt;

use articula_booleans::difference;
use articula_math::{z_axis, Dir3, Point3, RigidTransform};
use articula_mesh::{cuboid, cylinder, sphere, GeometryError, Solid};

use crate::error::{JointError, Result};
use crate::joints::JointKind;

/// Extra length of the inner cylinder, split over both ends, so it pokes
/// through the outer end caps instead of sharing their planes.
pub const CAP_OVERSHOOT: f64 = 1.0;

pub(crate) fn require_positive(
    parameter: &'static str,
    value: f64,
) -> std::result::Result<(), GeometryError> {
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

/// Radial layout of a female part around a male envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearanceFit {
    male_radius: f64,
    clearance: f64,
    wall_thickness: f64,
}

impl ClearanceFit {
    /// Validate and store the three radial parameters.
    pub fn new(
        male_radius: f64,
        clearance: f64,
        wall_thickness: f64,
    ) -> std::result::Result<Self, GeometryError> {
        require_positive("male_radius", male_radius)?;
        require_positive("clearance", clearance)?;
        require_positive("wall_thickness", wall_thickness)?;
        Ok(Self {
            male_radius,
            clearance,
            wall_thickness,
        })
    }

    /// Radius of the male envelope.
    pub fn male_radius(&self) -> f64 {
        self.male_radius
    }

    /// Radial gap between male and female.
    pub fn clearance(&self) -> f64 {
        self.clearance
    }

    /// Wall thickness of the female part.
    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    /// `male_radius + clearance`.
    pub fn inner_radius(&self) -> f64 {
        self.male_radius + self.clearance
    }

    /// `inner_radius + wall_thickness`.
    pub fn outer_radius(&self) -> f64 {
        self.inner_radius() + self.wall_thickness
    }

    /// Coaxial cylinders along Z centered on the origin. The outer one is
    /// `length` long, the inner one [`CAP_OVERSHOOT`] longer.
    pub fn cylindrical_operands(
        &self,
        length: f64,
        sections: u32,
    ) -> std::result::Result<ShellOperands, GeometryError> {
        Ok(ShellOperands {
            outer: cylinder(self.outer_radius(), length, sections)?,
            inner: cylinder(self.inner_radius(), length + CAP_OVERSHOOT, sections)?,
            fit: *self,
            span: ShellSpan::Cylindrical { length, sections },
        })
    }

    /// Concentric icospheres centered on the origin.
    pub fn spherical_operands(
        &self,
        subdivisions: u32,
    ) -> std::result::Result<ShellOperands, GeometryError> {
        Ok(ShellOperands {
            outer: sphere(self.outer_radius(), subdivisions)?,
            inner: sphere(self.inner_radius(), subdivisions)?,
            fit: *self,
            span: ShellSpan::Spherical { subdivisions },
        })
    }
}

impl fmt::Display for ClearanceFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "male radius {}, clearance {}, inner radius {}, outer radius {}",
            self.male_radius,
            self.clearance,
            self.inner_radius(),
            self.outer_radius()
        )
    }
}

/// Extent of a shell's operands along their surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShellSpan {
    /// Coaxial cylinders.
    Cylindrical {
        /// Length of the outer cylinder.
        length: f64,
        /// Facets around the axis.
        sections: u32,
    },
    /// Concentric icospheres.
    Spherical {
        /// Icosahedron subdivision count.
        subdivisions: u32,
    },
}

impl fmt::Display for ShellSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellSpan::Cylindrical { length, sections } => {
                write!(f, "length {length}, {sections} sections")
            }
            ShellSpan::Spherical { subdivisions } => write!(f, "{subdivisions} subdivisions"),
        }
    }
}

/// The two solids a shell is cut from.
#[derive(Debug, Clone)]
pub struct ShellOperands {
    /// Outer envelope.
    pub outer: Solid,
    /// Cavity to remove.
    pub inner: Solid,
    fit: ClearanceFit,
    span: ShellSpan,
}

impl ShellOperands {
    /// Move both operands into the joint frame.
    pub fn oriented(self, transform: &RigidTransform) -> Self {
        Self {
            outer: self.outer.transformed(transform),
            inner: self.inner.transformed(transform),
            ..self
        }
    }

    /// Fit the operands were sized from.
    pub fn fit(&self) -> &ClearanceFit {
        &self.fit
    }

    /// Length or subdivision of the operands.
    pub fn span(&self) -> ShellSpan {
        self.span
    }

    /// `outer - inner`.
    pub fn shell(&self, joint: JointKind) -> Result<Solid> {
        let shell = difference(&self.outer, &self.inner);
        if shell.is_empty() {
            return Err(JointError::GeometryConstruction {
                joint,
                stage: "shell",
                detail: format!(
                    "{}, {} (outer {} triangles, inner {} triangles)",
                    self.fit,
                    self.span,
                    self.outer.num_triangles(),
                    self.inner.num_triangles()
                ),
            });
        }
        Ok(shell)
    }
}

/// Removes the closed half-space `{ p : normal . p >= offset }`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfSpaceTrim {
    /// Points into the removed side.
    pub normal: Dir3,
    /// Plane position along `normal`.
    pub offset: f64,
}

impl HalfSpaceTrim {
    /// Trim plane with unit `normal` at `offset`.
    pub fn new(normal: Dir3, offset: f64) -> Self {
        Self { normal, offset }
    }

    /// True if `p` lies in the removed half-space.
    pub fn removes(&self, p: &Point3) -> bool {
        self.normal.dot(&p.coords) >= self.offset
    }

    /// A cube of side `3 * extent` with one face in the trim plane, lying on
    /// the normal side. Covers any solid within `extent` of the origin.
    pub fn cutter(&self, extent: f64) -> std::result::Result<Solid, GeometryError> {
        let side = 3.0 * extent;
        let cube = cuboid(side, side, side)?;
        let center = self.normal.into_inner() * (self.offset + side / 2.0);
        let place = RigidTransform::translation_vec(&center)
            .then(&RigidTransform::rotation_between(&z_axis(), &self.normal));
        Ok(cube.transformed(&place))
    }

    /// Subtract the cutter from `solid`, a shell sized by `fit`.
    pub fn apply(
        &self,
        solid: &Solid,
        fit: &ClearanceFit,
        extent: f64,
        joint: JointKind,
    ) -> Result<Solid> {
        let trimmed = difference(solid, &self.cutter(extent)?);
        if trimmed.is_empty() {
            return Err(JointError::GeometryConstruction {
                joint,
                stage: "cradle trim",
                detail: format!(
                    "normal ({:.3}, {:.3}, {:.3}), offset {}, {fit}",
                    self.normal.x, self.normal.y, self.normal.z, self.offset
                ),
            });
        }
        Ok(trimmed)
    }
}

/// Largest absolute coordinate of `solid`, padded so a trim plane at
/// `offset` still leaves the cutter covering everything.
pub fn envelope_extent(solid: &Solid, offset: f64) -> f64 {
    let bb = solid.aabb();
    bb.min.coords.abs().sup(&bb.max.coords.abs()).max() + offset.abs()
}

/// Open a shell into a cradle by trimming away one half-space.
pub fn open_cradle(
    shell: &Solid,
    fit: &ClearanceFit,
    trim: &HalfSpaceTrim,
    extent: f64,
    joint: JointKind,
) -> Result<Solid> {
    let cradle = trim.apply(shell, fit, extent, joint)?;
    tracing::debug!(
        %joint,
        before = shell.num_triangles(),
        after = cradle.num_triangles(),
        "opened cradle"
    );
    Ok(cradle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use articula_math::{x_axis, y_axis, Unit, Vec3};

    #[test]
    fn radii_follow_parameters() {
        let fit = ClearanceFit::new(6.0, 0.4, 3.0).unwrap();
        assert_eq!(fit.inner_radius(), 6.0 + 0.4);
        assert_eq!(fit.outer_radius(), fit.inner_radius() + 3.0);
        assert_eq!(fit.outer_radius() - fit.inner_radius(), 3.0);
        assert_relative_eq!(fit.inner_radius() - fit.male_radius(), 0.4, epsilon = 1e-12);
        assert_relative_eq!(fit.inner_radius(), 6.4);
        assert_relative_eq!(fit.outer_radius(), 9.4);
    }

    #[test]
    fn rejects_non_positive() {
        for (r, c, w, name) in [
            (0.0, 0.4, 3.0, "male_radius"),
            (6.0, 0.0, 3.0, "clearance"),
            (6.0, 0.4, -1.0, "wall_thickness"),
            (6.0, f64::INFINITY, 3.0, "clearance"),
        ] {
            match ClearanceFit::new(r, c, w) {
                Err(GeometryError::InvalidGeometryParameter { parameter, .. }) => {
                    assert_eq!(parameter, name)
                }
                other => panic!("expected rejection of {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn inner_cylinder_overshoots_both_caps() {
        let ops = ClearanceFit::new(5.0, 0.5, 2.0)
            .unwrap()
            .cylindrical_operands(10.0, 16)
            .unwrap();
        let (o, i) = (ops.outer.aabb(), ops.inner.aabb());
        assert_relative_eq!(i.min.z, o.min.z - CAP_OVERSHOOT / 2.0);
        assert_relative_eq!(i.max.z, o.max.z + CAP_OVERSHOOT / 2.0);
    }

    #[test]
    fn cylindrical_shell_matches_annulus() {
        let n = 64;
        let fit = ClearanceFit::new(6.0, 0.4, 3.0).unwrap();
        let shell = fit
            .cylindrical_operands(16.0, n)
            .unwrap()
            .shell(JointKind::Hinge)
            .unwrap();
        let theta = std::f64::consts::TAU / n as f64;
        let polygon = |r: f64| 0.5 * n as f64 * r * r * theta.sin();
        let exact = (polygon(fit.outer_radius()) - polygon(fit.inner_radius())) * 16.0;
        assert_relative_eq!(shell.volume(), exact, max_relative = 1e-6);
        let circular = std::f64::consts::PI * (9.4f64.powi(2) - 6.4f64.powi(2)) * 16.0;
        assert_relative_eq!(shell.volume(), circular, max_relative = 0.01);
    }

    #[test]
    fn spherical_shell_is_hollow() {
        let fit = ClearanceFit::new(10.0, 0.4, 3.0).unwrap();
        let shell = fit
            .spherical_operands(3)
            .unwrap()
            .shell(JointKind::Ball)
            .unwrap();
        assert!(!shell.contains_point(&Point3::origin()));
        assert!(shell.contains_point(&Point3::new(0.3, 0.2, 12.0)));
        let ball = |r: f64| 4.0 / 3.0 * std::f64::consts::PI * r.powi(3);
        assert_relative_eq!(shell.volume(), ball(13.4) - ball(10.4), max_relative = 0.02);
    }

    #[test]
    fn oriented_moves_both_operands() {
        let ops = ClearanceFit::new(1.0, 0.1, 0.5)
            .unwrap()
            .cylindrical_operands(10.0, 8)
            .unwrap()
            .oriented(&RigidTransform::rotation_deg(&y_axis(), 90.0));
        assert_relative_eq!(ops.outer.aabb().max.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(ops.inner.aabb().max.x, 5.5, epsilon = 1e-9);
    }

    #[test]
    fn cutter_sits_on_normal_side() {
        let down = Unit::new_normalize(-Vec3::y());
        let trim = HalfSpaceTrim::new(down, 0.0);
        let bb = trim.cutter(10.0).unwrap().aabb();
        assert_relative_eq!(bb.max.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(bb.min.y, -30.0, epsilon = 1e-9);
        assert_relative_eq!(bb.min.x, -15.0, epsilon = 1e-9);

        let up = HalfSpaceTrim::new(z_axis(), 2.0);
        let bb = up.cutter(10.0).unwrap().aabb();
        assert_relative_eq!(bb.min.z, 2.0, epsilon = 1e-9);
        assert!(up.removes(&Point3::new(0.0, 0.0, 2.0)));
        assert!(!up.removes(&Point3::new(0.0, 0.0, 1.9)));
    }

    #[test]
    fn trim_removes_half_of_a_shell() {
        let fit = ClearanceFit::new(6.0, 0.4, 3.0).unwrap();
        let shell = fit
            .cylindrical_operands(16.0, 64)
            .unwrap()
            .shell(JointKind::Hinge)
            .unwrap();
        let trim = HalfSpaceTrim::new(x_axis(), 0.0);
        let extent = envelope_extent(&shell, 0.0);
        let half = open_cradle(&shell, &fit, &trim, extent, JointKind::Hinge).unwrap();
        assert_relative_eq!(half.volume(), shell.volume() / 2.0, max_relative = 1e-6);
        assert!(!half.contains_point(&Point3::new(8.0, 0.1, 0.0)));
        assert!(half.contains_point(&Point3::new(-8.0, 0.1, 0.0)));
    }

    #[test]
    fn trimming_everything_is_an_error() {
        let fit = ClearanceFit::new(0.5, 0.25, 0.25).unwrap();
        let shell = cuboid(2.0, 2.0, 2.0).unwrap();
        let trim = HalfSpaceTrim::new(z_axis(), -5.0);
        let err = trim
            .apply(&shell, &fit, envelope_extent(&shell, -5.0), JointKind::Slider)
            .unwrap_err();
        match err {
            JointError::GeometryConstruction {
                joint,
                stage: "cradle trim",
                detail,
            } => {
                assert_eq!(joint, JointKind::Slider);
                assert!(detail.contains("offset -5"), "{detail}");
                assert!(detail.contains("inner radius 0.75"), "{detail}");
                assert!(detail.contains("outer radius 1"), "{detail}");
            }
            other => panic!("expected cradle trim failure, got {other:?}"),
        }
    }

    #[test]
    fn shell_failure_reports_fit() {
        let fit = ClearanceFit::new(6.0, 0.5, 3.0).unwrap();
        let mut ops = fit.cylindrical_operands(16.0, 12).unwrap();
        assert_eq!(ops.fit(), &fit);
        assert_eq!(
            ops.span(),
            ShellSpan::Cylindrical {
                length: 16.0,
                sections: 12
            }
        );
        // a cavity that swallows the outer envelope leaves nothing
        ops.inner = cuboid(40.0, 40.0, 40.0).unwrap();
        let err = ops.shell(JointKind::Hinge).unwrap_err();
        let text = err.to_string();
        for needle in [
            "hinge joint: shell produced no geometry",
            "male radius 6",
            "inner radius 6.5",
            "outer radius 9.5",
            "length 16, 12 sections",
        ] {
            assert!(text.contains(needle), "missing {needle:?} in {text}");
        }

        let sphere_ops = ClearanceFit::new(10.0, 0.5, 3.0)
            .unwrap()
            .spherical_operands(3)
            .unwrap()
            .oriented(&RigidTransform::translation(1.0, 0.0, 0.0));
        assert_eq!(sphere_ops.span().to_string(), "3 subdivisions");
    }

    #[test]
    fn extent_covers_offset() {
        let c = cuboid(2.0, 4.0, 6.0).unwrap();
        assert_relative_eq!(envelope_extent(&c, 0.0), 3.0);
        assert_relative_eq!(envelope_extent(&c, -2.0), 5.0);
    }
}
