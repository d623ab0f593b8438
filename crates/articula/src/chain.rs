//! Forward kinematics over an ordered chain of joints.
//!
//! Link `i` is attached to the child frame of link `i - 1` (the world origin
//! for the root). Each update recomputes all frames top-down from fresh DOF
//! values and re-poses copies of the rest-pose templates, so no error
//! accumulates across frames.

use articula_math::RigidTransform;
use articula_mesh::Solid;

use crate::error::{JointError, Result};
use crate::joints::{Dof, Joint};
use crate::viewer::DisplayOptions;

/// One joint in a chain plus its current pose.
#[derive(Debug, Clone)]
pub struct ChainLink {
    name: String,
    joint: Joint,
    dof: Dof,
    parent_world: RigidTransform,
    world: RigidTransform,
    child_frame: RigidTransform,
    posed_fixed: Solid,
    posed_moving: Solid,
    fixed_options: DisplayOptions,
    moving_options: DisplayOptions,
}

impl ChainLink {
    fn new(name: String, joint: Joint, parent_world: RigidTransform) -> Self {
        let dof = joint.rest_dof();
        let world = parent_world;
        let child_frame = joint.child_frame(&world);
        let posed_fixed = joint.fixed_solid().transformed(&parent_world);
        let posed_moving = joint.template_moving_solid().transformed(&world);
        Self {
            name,
            joint,
            dof,
            parent_world,
            world,
            child_frame,
            posed_fixed,
            posed_moving,
            fixed_options: DisplayOptions::FIXED,
            moving_options: DisplayOptions::MOVING,
        }
    }

    /// Link name, used as the display-name prefix.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The joint.
    pub fn joint(&self) -> &Joint {
        &self.joint
    }

    /// DOF applied by the last update.
    pub fn dof(&self) -> Dof {
        self.dof
    }

    /// Frame the joint is attached to.
    pub fn parent_world(&self) -> &RigidTransform {
        &self.parent_world
    }

    /// Frame of the moving part.
    pub fn world(&self) -> &RigidTransform {
        &self.world
    }

    /// Frame the next link attaches to.
    pub fn child_frame(&self) -> &RigidTransform {
        &self.child_frame
    }

    /// Stationary part in world coordinates.
    pub fn posed_fixed_solid(&self) -> &Solid {
        &self.posed_fixed
    }

    /// Moving part in world coordinates.
    pub fn posed_moving_solid(&self) -> &Solid {
        &self.posed_moving
    }

    /// Display options of the stationary part.
    pub fn fixed_options(&self) -> &DisplayOptions {
        &self.fixed_options
    }

    /// Display options of the moving part.
    pub fn moving_options(&self) -> &DisplayOptions {
        &self.moving_options
    }

    /// Display name of the stationary part.
    pub fn fixed_name(&self) -> String {
        format!("{}_fixed", self.name)
    }

    /// Display name of the moving part.
    pub fn moving_name(&self) -> String {
        format!("{}_moving", self.name)
    }
}

/// Frames computed for one link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinkFrames {
    /// Frame the joint is attached to.
    pub parent_world: RigidTransform,
    /// Frame of the moving part.
    pub world: RigidTransform,
    /// Frame the next link attaches to.
    pub child_frame: RigidTransform,
}

/// Joints in parent-to-child order.
#[derive(Debug, Clone, Default)]
pub struct KinematicChain {
    links: Vec<ChainLink>,
}

impl KinematicChain {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a joint at the end of the chain, posed at rest.
    pub fn push(&mut self, name: impl Into<String>, joint: impl Into<Joint>) -> &mut ChainLink {
        let parent_world = self
            .links
            .last()
            .map(|l| *l.child_frame())
            .unwrap_or_default();
        self.links
            .push(ChainLink::new(name.into(), joint.into(), parent_world));
        let last = self.links.len() - 1;
        &mut self.links[last]
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_link(mut self, name: impl Into<String>, joint: impl Into<Joint>) -> Self {
        self.push(name, joint);
        self
    }

    /// Set display options of the link called `name`. Returns false if there
    /// is no such link.
    pub fn set_display(
        &mut self,
        name: &str,
        fixed: DisplayOptions,
        moving: DisplayOptions,
    ) -> bool {
        match self.links.iter_mut().find(|l| l.name == name) {
            Some(link) => {
                link.fixed_options = fixed;
                link.moving_options = moving;
                true
            }
            None => false,
        }
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// True for a chain without links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Links, root first.
    pub fn links(&self) -> &[ChainLink] {
        &self.links
    }

    /// Link by name.
    pub fn link(&self, name: &str) -> Option<&ChainLink> {
        self.links.iter().find(|l| l.name == name)
    }

    /// Rest DOF of every link.
    pub fn rest_dofs(&self) -> Vec<Dof> {
        self.links.iter().map(|l| l.joint.rest_dof()).collect()
    }

    /// Frames of every link for `dofs`, without touching any mesh.
    pub fn world_transforms(&self, dofs: &[Dof]) -> Result<Vec<LinkFrames>> {
        if dofs.len() != self.links.len() {
            return Err(JointError::DofCount {
                expected: self.links.len(),
                got: dofs.len(),
            });
        }

        let mut parent_world = RigidTransform::identity();
        let mut frames = Vec::with_capacity(dofs.len());
        for (link, dof) in self.links.iter().zip(dofs) {
            let world = link.joint.pose(&parent_world, dof)?;
            let child_frame = link.joint.child_frame(&world);
            frames.push(LinkFrames {
                parent_world,
                world,
                child_frame,
            });
            parent_world = child_frame;
        }
        Ok(frames)
    }

    /// Pose every link for `dofs` and regenerate its posed solids.
    ///
    /// All frames are computed before any link is modified, so an error
    /// leaves the chain as it was.
    pub fn update(&mut self, dofs: &[Dof]) -> Result<()> {
        let frames = self.world_transforms(dofs)?;
        for ((link, frame), dof) in self.links.iter_mut().zip(frames).zip(dofs) {
            link.dof = *dof;
            link.parent_world = frame.parent_world;
            link.world = frame.world;
            link.child_frame = frame.child_frame;
            link.posed_fixed = link.joint.fixed_solid().transformed(&frame.parent_world);
            link.posed_moving = link.joint.template_moving_solid().transformed(&frame.world);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HingeParams, SliderParams};
    use crate::joints::{HingeJoint, SliderJoint};
    use approx::assert_relative_eq;
    use articula_math::{x_axis, Point3};

    fn hinge() -> HingeJoint {
        HingeJoint::build(&HingeParams {
            sections: 16,
            connector_sections: 8,
            ..HingeParams::default()
        })
        .unwrap()
    }

    fn slider() -> SliderJoint {
        SliderJoint::build(&SliderParams {
            sections: 16,
            ..SliderParams::default()
        })
        .unwrap()
    }

    fn two_link() -> KinematicChain {
        KinematicChain::new()
            .with_link("elbow", hinge())
            .with_link("rail", slider())
    }

    #[test]
    fn push_poses_at_rest() {
        let chain = two_link();
        assert_eq!(chain.len(), 2);
        let rail = chain.link("rail").unwrap();
        assert_eq!(rail.parent_world().origin(), Point3::new(0.0, 0.0, 18.0));
        assert_relative_eq!(rail.posed_fixed_solid().aabb().min.z, 18.0, epsilon = 1e-12);
    }

    #[test]
    fn zero_dofs_give_rest_composition() {
        let chain = two_link();
        let frames = chain.world_transforms(&chain.rest_dofs()).unwrap();
        assert!(frames[0].world.approx_eq(&RigidTransform::identity(), 1e-12));
        let expected = chain.links()[0].joint().child_attachment();
        assert!(frames[1].parent_world.approx_eq(expected, 1e-12));
        let tip = frames[1].child_frame.origin();
        assert_relative_eq!(tip.z, 18.0 + 18.0, epsilon = 1e-12);
    }

    #[test]
    fn root_rotation_moves_descendants() {
        let mut chain = two_link();
        let before = chain.links()[1].posed_moving_solid().aabb().center();
        chain
            .update(&[Dof::Angle(45.0), Dof::Offset(0.0)])
            .unwrap();
        let rail = &chain.links()[1];
        let after = rail.posed_moving_solid().aabb().center();
        assert!((after - before).norm() > 1.0);
        let pivot = RigidTransform::rotation_deg(&x_axis(), 45.0)
            .apply_point(&Point3::new(0.0, 0.0, 18.0));
        assert_relative_eq!(rail.parent_world().origin(), pivot, epsilon = 1e-12);
        // the rail's fixed part rides along with the hinge
        assert!(rail.posed_fixed_solid().aabb().min.y < -1.0);
    }

    #[test]
    fn slider_offset_moves_only_the_carriage() {
        let mut chain = two_link();
        chain
            .update(&[Dof::Angle(0.0), Dof::Offset(10.0)])
            .unwrap();
        let rail = &chain.links()[1];
        assert_relative_eq!(rail.posed_fixed_solid().aabb().min.z, 18.0, epsilon = 1e-9);
        assert_relative_eq!(rail.posed_moving_solid().aabb().min.z, 28.0, epsilon = 1e-9);
        assert_eq!(rail.dof(), Dof::Offset(10.0));
    }

    #[test]
    fn wrong_dof_count() {
        let mut chain = two_link();
        assert!(matches!(
            chain.update(&[Dof::Angle(0.0)]),
            Err(JointError::DofCount { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn failed_update_leaves_chain_untouched() {
        let mut chain = two_link();
        chain
            .update(&[Dof::Angle(30.0), Dof::Offset(5.0)])
            .unwrap();
        let snapshot = *chain.links()[1].world();
        let err = chain.update(&[Dof::Angle(10.0), Dof::Angle(5.0)]);
        assert!(matches!(err, Err(JointError::DofMismatch { .. })));
        assert_eq!(chain.links()[0].dof(), Dof::Angle(30.0));
        assert_eq!(*chain.links()[1].world(), snapshot);
    }

    #[test]
    fn templates_survive_repeated_updates() {
        let mut chain = two_link();
        let template = chain.links()[0].joint().template_moving_solid().clone();
        for angle in [10.0, -20.0, 55.0, 0.0] {
            chain
                .update(&[Dof::Angle(angle), Dof::Offset(3.0)])
                .unwrap();
        }
        assert_eq!(chain.links()[0].joint().template_moving_solid(), &template);
        assert_eq!(chain.links()[0].posed_moving_solid(), &template);
    }

    #[test]
    fn display_names_and_options() {
        let mut chain = two_link();
        let link = &chain.links()[0];
        assert_eq!(link.fixed_name(), "elbow_fixed");
        assert_eq!(link.moving_name(), "elbow_moving");
        assert_eq!(*link.fixed_options(), DisplayOptions::FIXED);
        let red = DisplayOptions {
            color: [1.0, 0.0, 0.0],
            transparency: 0.0,
        };
        assert!(chain.set_display("rail", red, red));
        assert!(!chain.set_display("missing", red, red));
        assert_eq!(*chain.link("rail").unwrap().moving_options(), red);
    }
}
