//! Slider: a hollow carriage collar travelling along a rail.

use articula_math::RigidTransform;
use articula_mesh::{cylinder, GeometryError, Solid};

use super::{DofRange, JointKind};
use crate::clearance::ClearanceFit;
use crate::config::SliderParams;
use crate::error::Result;

/// A built slider.
#[derive(Debug, Clone)]
pub struct SliderJoint {
    params: SliderParams,
    fit: ClearanceFit,
    fixed: Solid,
    moving: Solid,
    child_attachment: RigidTransform,
}

impl SliderJoint {
    /// Build rail and carriage from `params`. The rail spans
    /// `z in [0, rail_length]`, the carriage starts at the rail's base.
    pub fn build(params: &SliderParams) -> Result<Self> {
        if params.carriage_length >= params.rail_length {
            return Err(GeometryError::InvalidGeometryParameter {
                parameter: "carriage_length",
                value: params.carriage_length,
                requirement: "< rail_length",
            }
            .into());
        }

        let fixed = cylinder(params.rail_radius, params.rail_length, params.sections)?
            .transformed(&RigidTransform::translation(0.0, 0.0, params.rail_length / 2.0));

        let fit = ClearanceFit::new(params.rail_radius, params.clearance, params.carriage_wall)?;
        let moving = fit
            .cylindrical_operands(params.carriage_length, params.sections)?
            .oriented(&RigidTransform::translation(
                0.0,
                0.0,
                params.carriage_length / 2.0,
            ))
            .shell(JointKind::Slider)?;

        tracing::debug!(
            inner_radius = fit.inner_radius(),
            outer_radius = fit.outer_radius(),
            travel = params.rail_length - params.carriage_length,
            "built slider"
        );

        Ok(Self {
            params: params.clone(),
            fit,
            fixed,
            moving,
            child_attachment: RigidTransform::translation(0.0, 0.0, params.carriage_length),
        })
    }

    /// Parameters the slider was built from.
    pub fn params(&self) -> &SliderParams {
        &self.params
    }

    /// Radial layout of the carriage.
    pub fn fit(&self) -> &ClearanceFit {
        &self.fit
    }

    /// The rail.
    pub fn fixed_solid(&self) -> &Solid {
        &self.fixed
    }

    /// The carriage collar.
    pub fn moving_solid(&self) -> &Solid {
        &self.moving
    }

    /// Top of the carriage.
    pub fn child_attachment(&self) -> &RigidTransform {
        &self.child_attachment
    }

    /// Allowed travel in millimetres.
    pub fn range(&self) -> DofRange {
        DofRange {
            min: 0.0,
            max: self.params.rail_length - self.params.carriage_length,
        }
    }

    /// Translation along Z, clamped to the travel.
    pub fn articulation(&self, offset: f64) -> RigidTransform {
        RigidTransform::translation(0.0, 0.0, self.range().clamp(offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JointError;
    use approx::assert_relative_eq;
    use articula_math::Point3;

    fn coarse() -> SliderParams {
        SliderParams {
            sections: 24,
            ..SliderParams::default()
        }
    }

    #[test]
    fn rail_and_carriage_placement() {
        let s = SliderJoint::build(&coarse()).unwrap();
        let rail = s.fixed_solid().aabb();
        assert_relative_eq!(rail.min.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(rail.max.z, 45.0, epsilon = 1e-12);
        let carriage = s.moving_solid().aabb();
        assert_relative_eq!(carriage.min.z, 0.0, epsilon = 1e-9);
        assert_relative_eq!(carriage.max.z, 18.0, epsilon = 1e-9);
        assert_relative_eq!(s.fit().outer_radius(), 9.4);
    }

    #[test]
    fn carriage_is_a_hollow_collar() {
        let s = SliderJoint::build(&coarse()).unwrap();
        let c = s.moving_solid();
        assert!(!c.contains_point(&Point3::new(0.1, 0.2, 9.0)));
        assert!(c.contains_point(&Point3::new(6.9, 0.3, 9.0)));
        assert!(c.contains_point(&Point3::new(-0.3, -6.9, 2.0)));
    }

    #[test]
    fn offset_is_clamped() {
        let s = SliderJoint::build(&coarse()).unwrap();
        assert_eq!(s.range().max, 27.0);
        assert_relative_eq!(s.articulation(40.0).origin().z, 27.0);
        assert_relative_eq!(s.articulation(-3.0).origin().z, 0.0);
        assert_relative_eq!(s.articulation(12.5).origin().z, 12.5);
    }

    #[test]
    fn carriage_longer_than_rail_is_rejected() {
        let err = SliderJoint::build(&SliderParams {
            carriage_length: 45.0,
            ..coarse()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            JointError::Geometry(GeometryError::InvalidGeometryParameter {
                parameter: "carriage_length",
                ..
            })
        ));
    }
}
