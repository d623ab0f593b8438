//! Hinge: a barrel along X resting in an open saddle.

use articula_math::{x_axis, y_axis, RigidTransform, Unit, Vec3};
use articula_mesh::{cylinder, orient, Solid};

use super::{DofRange, JointKind};
use crate::clearance::{
    envelope_extent, open_cradle, require_positive, ClearanceFit, HalfSpaceTrim,
};
use crate::config::HingeParams;
use crate::error::Result;

/// A built hinge.
#[derive(Debug, Clone)]
pub struct HingeJoint {
    params: HingeParams,
    fit: ClearanceFit,
    fixed: Solid,
    moving: Solid,
    child_attachment: RigidTransform,
}

impl HingeJoint {
    /// Build saddle and barrel from `params`.
    pub fn build(params: &HingeParams) -> Result<Self> {
        require_positive("max_angle_deg", params.max_angle_deg)?;
        let to_x = RigidTransform::rotation_deg(&y_axis(), 90.0);

        let barrel = orient(
            &cylinder(params.barrel_radius, params.barrel_length, params.sections)?,
            &to_x,
            &Vec3::zeros(),
        );
        let connector = cylinder(
            params.connector_radius,
            params.connector_length,
            params.connector_sections,
        )?
        .transformed(&RigidTransform::translation(0.0, 0.0, params.connector_length / 2.0));
        let moving = Solid::concat(&[&barrel, &connector]);

        let fit = ClearanceFit::new(params.barrel_radius, params.clearance, params.saddle_wall)?;
        let shell = fit
            .cylindrical_operands(params.saddle_width, params.sections)?
            .oriented(&to_x)
            .shell(JointKind::Hinge)?;
        let trim = Self::cradle_trim();
        let fixed = open_cradle(
            &shell,
            &fit,
            &trim,
            envelope_extent(&shell, trim.offset),
            JointKind::Hinge,
        )?;

        tracing::debug!(
            inner_radius = fit.inner_radius(),
            outer_radius = fit.outer_radius(),
            fixed_triangles = fixed.num_triangles(),
            moving_triangles = moving.num_triangles(),
            "built hinge"
        );

        Ok(Self {
            params: params.clone(),
            fit,
            fixed,
            moving,
            child_attachment: RigidTransform::translation(0.0, 0.0, params.connector_length),
        })
    }

    /// The saddle keeps `y > 0`; the barrel drops in from `-Y`.
    pub fn cradle_trim() -> HalfSpaceTrim {
        HalfSpaceTrim::new(Unit::new_normalize(-Vec3::y()), 0.0)
    }

    /// Parameters the hinge was built from.
    pub fn params(&self) -> &HingeParams {
        &self.params
    }

    /// Radial layout of the saddle.
    pub fn fit(&self) -> &ClearanceFit {
        &self.fit
    }

    /// The open saddle.
    pub fn fixed_solid(&self) -> &Solid {
        &self.fixed
    }

    /// Barrel plus connector.
    pub fn moving_solid(&self) -> &Solid {
        &self.moving
    }

    /// Tip of the connector.
    pub fn child_attachment(&self) -> &RigidTransform {
        &self.child_attachment
    }

    /// Allowed angle in degrees.
    pub fn range(&self) -> DofRange {
        DofRange::symmetric(self.params.max_angle_deg)
    }

    /// Rotation about X by `angle_deg`.
    pub fn articulation(&self, angle_deg: f64) -> RigidTransform {
        RigidTransform::rotation_deg(&x_axis(), angle_deg)
    }
}
