//! Ball joint: a ball with a stud, held in an open spherical socket.

use articula_math::{x_axis, y_axis, z_axis, RigidTransform};
use articula_mesh::{cylinder, sphere, GeometryError, Solid};

use super::{DofRange, JointKind};
use crate::clearance::{
    envelope_extent, open_cradle, require_positive, ClearanceFit, HalfSpaceTrim,
};
use crate::config::BallParams;
use crate::error::Result;

/// A built ball joint.
#[derive(Debug, Clone)]
pub struct BallJoint {
    params: BallParams,
    fit: ClearanceFit,
    fixed: Solid,
    moving: Solid,
    child_attachment: RigidTransform,
}

impl BallJoint {
    /// Build socket and ball from `params`.
    pub fn build(params: &BallParams) -> Result<Self> {
        require_positive("max_angle_deg", params.max_angle_deg)?;
        let tip = params.ball_radius + params.stud_length;

        let ball = sphere(params.ball_radius, params.subdivisions)?;
        let stud = cylinder(params.stud_radius, params.stud_length, params.stud_sections)?
            .transformed(&RigidTransform::translation(
                0.0,
                0.0,
                params.ball_radius + params.stud_length / 2.0,
            ));
        let moving = Solid::concat(&[&ball, &stud]);

        let fit = ClearanceFit::new(params.ball_radius, params.clearance, params.socket_thickness)?;
        Self::check_trim_height(&fit, params.socket_trim_height)?;
        let shell = fit
            .spherical_operands(params.subdivisions)?
            .shell(JointKind::Ball)?;
        let trim = Self::socket_trim(params);
        let fixed = open_cradle(
            &shell,
            &fit,
            &trim,
            envelope_extent(&shell, trim.offset),
            JointKind::Ball,
        )?;

        tracing::debug!(
            inner_radius = fit.inner_radius(),
            outer_radius = fit.outer_radius(),
            fixed_triangles = fixed.num_triangles(),
            moving_triangles = moving.num_triangles(),
            "built ball joint"
        );

        Ok(Self {
            params: params.clone(),
            fit,
            fixed,
            moving,
            child_attachment: RigidTransform::translation(0.0, 0.0, tip),
        })
    }

    /// Removes everything above `socket_trim_height`, where the stud exits.
    pub fn socket_trim(params: &BallParams) -> HalfSpaceTrim {
        HalfSpaceTrim::new(z_axis(), params.socket_trim_height)
    }

    // At or above the cavity top the ball is sealed in; at or below the
    // shell bottom nothing is left.
    fn check_trim_height(fit: &ClearanceFit, height: f64) -> Result<()> {
        if height.is_finite() && height < fit.inner_radius() && height > -fit.outer_radius() {
            Ok(())
        } else {
            Err(GeometryError::InvalidGeometryParameter {
                parameter: "socket_trim_height",
                value: height,
                requirement: "strictly between -outer_radius and inner_radius",
            }
            .into())
        }
    }

    /// Parameters the joint was built from.
    pub fn params(&self) -> &BallParams {
        &self.params
    }

    /// Radial layout of the socket.
    pub fn fit(&self) -> &ClearanceFit {
        &self.fit
    }

    /// The open socket.
    pub fn fixed_solid(&self) -> &Solid {
        &self.fixed
    }

    /// Ball plus stud.
    pub fn moving_solid(&self) -> &Solid {
        &self.moving
    }

    /// Tip of the stud.
    pub fn child_attachment(&self) -> &RigidTransform {
        &self.child_attachment
    }

    /// Allowed angle about each axis, in degrees.
    pub fn range(&self) -> DofRange {
        DofRange::symmetric(self.params.max_angle_deg)
    }

    /// `R(X, a) . R(Y, b)`.
    pub fn articulation(&self, a_deg: f64, b_deg: f64) -> RigidTransform {
        RigidTransform::rotation_deg(&x_axis(), a_deg)
            .then(&RigidTransform::rotation_deg(&y_axis(), b_deg))
    }
}
