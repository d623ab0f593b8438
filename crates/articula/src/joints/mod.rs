//! Joint geometry and per-type articulation.
//!
//! Every joint owns a stationary (female) solid and a moving (male) solid,
//! both built once at rest pose. Posing never touches them; callers
//! transform copies instead.

use std::fmt;

use articula_math::RigidTransform;
use articula_mesh::Solid;

use crate::clearance::ClearanceFit;
use crate::error::{JointError, Result};

mod ball;
mod hinge;
mod slider;

pub use ball::BallJoint;
pub use hinge::HingeJoint;
pub use slider::SliderJoint;

/// Slack allowed when checking a value against a range.
const RANGE_SLACK: f64 = 1e-9;

/// Joint type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointKind {
    /// One rotation about the local X axis.
    Hinge,
    /// Rotation about local X then local Y.
    Ball,
    /// Translation along local Z.
    Slider,
}

impl fmt::Display for JointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JointKind::Hinge => "hinge",
            JointKind::Ball => "ball",
            JointKind::Slider => "slider",
        })
    }
}

/// A joint's degree-of-freedom value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dof {
    /// Hinge angle in degrees.
    Angle(f64),
    /// Ball angles about X and Y in degrees.
    AnglePair(f64, f64),
    /// Slider travel in millimetres.
    Offset(f64),
}

impl fmt::Display for Dof {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dof::Angle(a) => write!(f, "angle {a:.3} deg"),
            Dof::AnglePair(a, b) => write!(f, "angles ({a:.3}, {b:.3}) deg"),
            Dof::Offset(o) => write!(f, "offset {o:.3} mm"),
        }
    }
}

/// Closed interval of allowed values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DofRange {
    /// Lower bound.
    pub min: f64,
    /// Upper bound.
    pub max: f64,
}

impl DofRange {
    /// `[-span / 2, span / 2]`.
    pub fn symmetric(span: f64) -> Self {
        Self {
            min: -span / 2.0,
            max: span / 2.0,
        }
    }

    /// True if `v` is inside, allowing rounding slack.
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min - RANGE_SLACK && v <= self.max + RANGE_SLACK
    }

    /// Clamp `v` into the range.
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }

    fn check(&self, joint: JointKind, v: f64) -> Result<()> {
        if self.contains(v) {
            Ok(())
        } else {
            Err(JointError::OutOfRangeDof {
                joint,
                value: v,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// A built joint of any type.
#[derive(Debug, Clone)]
pub enum Joint {
    /// Barrel in an open saddle.
    Hinge(HingeJoint),
    /// Ball with stud in an open socket.
    Ball(BallJoint),
    /// Collar on a rail.
    Slider(SliderJoint),
}

impl Joint {
    /// Type tag.
    pub fn kind(&self) -> JointKind {
        match self {
            Joint::Hinge(_) => JointKind::Hinge,
            Joint::Ball(_) => JointKind::Ball,
            Joint::Slider(_) => JointKind::Slider,
        }
    }

    /// Stationary part at rest pose.
    pub fn fixed_solid(&self) -> &Solid {
        match self {
            Joint::Hinge(j) => j.fixed_solid(),
            Joint::Ball(j) => j.fixed_solid(),
            Joint::Slider(j) => j.fixed_solid(),
        }
    }

    /// Moving part at rest pose.
    pub fn template_moving_solid(&self) -> &Solid {
        match self {
            Joint::Hinge(j) => j.moving_solid(),
            Joint::Ball(j) => j.moving_solid(),
            Joint::Slider(j) => j.moving_solid(),
        }
    }

    /// Frame of the next joint, relative to this joint's moving frame.
    pub fn child_attachment(&self) -> &RigidTransform {
        match self {
            Joint::Hinge(j) => j.child_attachment(),
            Joint::Ball(j) => j.child_attachment(),
            Joint::Slider(j) => j.child_attachment(),
        }
    }

    /// Radial layout of the female part (saddle, socket or carriage).
    pub fn fit(&self) -> &ClearanceFit {
        match self {
            Joint::Hinge(j) => j.fit(),
            Joint::Ball(j) => j.fit(),
            Joint::Slider(j) => j.fit(),
        }
    }

    /// Allowed range of each DOF component.
    pub fn range(&self) -> DofRange {
        match self {
            Joint::Hinge(j) => j.range(),
            Joint::Ball(j) => j.range(),
            Joint::Slider(j) => j.range(),
        }
    }

    /// The zero value of the right variant.
    pub fn rest_dof(&self) -> Dof {
        match self {
            Joint::Hinge(_) => Dof::Angle(0.0),
            Joint::Ball(_) => Dof::AnglePair(0.0, 0.0),
            Joint::Slider(_) => Dof::Offset(0.0),
        }
    }

    /// Validate `dof` against the joint type and its range.
    pub fn check_range(&self, dof: &Dof) -> Result<()> {
        let kind = self.kind();
        match (self, dof) {
            (Joint::Hinge(j), Dof::Angle(a)) => j.range().check(kind, *a),
            (Joint::Ball(j), Dof::AnglePair(a, b)) => {
                j.range().check(kind, *a)?;
                j.range().check(kind, *b)
            }
            (Joint::Slider(j), Dof::Offset(o)) => j.range().check(kind, *o),
            _ => Err(self.mismatch(dof)),
        }
    }

    /// Motion of the moving frame relative to the joint's parent frame.
    ///
    /// Angles must lie in range; slider offsets are clamped.
    pub fn local_transform(&self, dof: &Dof) -> Result<RigidTransform> {
        match (self, dof) {
            (Joint::Hinge(j), Dof::Angle(a)) => {
                debug_assert!(j.range().contains(*a), "hinge angle {a} out of range");
                Ok(j.articulation(*a))
            }
            (Joint::Ball(j), Dof::AnglePair(a, b)) => {
                debug_assert!(
                    j.range().contains(*a) && j.range().contains(*b),
                    "ball angles ({a}, {b}) out of range"
                );
                Ok(j.articulation(*a, *b))
            }
            (Joint::Slider(j), Dof::Offset(o)) => Ok(j.articulation(*o)),
            _ => Err(self.mismatch(dof)),
        }
    }

    /// World frame of the moving part: `parent_world . local(dof)`.
    pub fn pose(&self, parent_world: &RigidTransform, dof: &Dof) -> Result<RigidTransform> {
        Ok(parent_world.then(&self.local_transform(dof)?))
    }

    /// Parent frame of the next joint: `world . child_attachment`.
    pub fn child_frame(&self, world: &RigidTransform) -> RigidTransform {
        world.then(self.child_attachment())
    }

    fn mismatch(&self, dof: &Dof) -> JointError {
        JointError::DofMismatch {
            joint: self.kind(),
            dof: dof.to_string(),
        }
    }
}

impl From<HingeJoint> for Joint {
    fn from(j: HingeJoint) -> Self {
        Joint::Hinge(j)
    }
}

impl From<BallJoint> for Joint {
    fn from(j: BallJoint) -> Self {
        Joint::Ball(j)
    }
}

impl From<SliderJoint> for Joint {
    fn from(j: SliderJoint) -> Self {
        Joint::Slider(j)
    }
}
