//! Ready-made chains with their animation tracks.

use std::fmt;
use std::str::FromStr;

use crate::animation::{AnimationDriver, DofSequence, JointTrack};
use crate::chain::KinematicChain;
use crate::config::ArticulaConfig;
use crate::error::Result;
use crate::joints::{BallJoint, HingeJoint, SliderJoint};
use crate::viewer::DisplayOptions;

/// A chain plus one track per link.
#[derive(Debug, Clone)]
pub struct Rig {
    /// The chain, posed at rest.
    pub chain: KinematicChain,
    /// One track per link, in chain order.
    pub tracks: Vec<JointTrack>,
}

impl Rig {
    /// Turn the rig into a driver, validating every track sample.
    pub fn into_driver(self) -> Result<AnimationDriver> {
        AnimationDriver::new(self.chain, self.tracks)
    }
}

impl TryFrom<Rig> for AnimationDriver {
    type Error = crate::error::JointError;

    fn try_from(rig: Rig) -> Result<Self> {
        rig.into_driver()
    }
}

/// Which canned rig to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigKind {
    /// [`elbow_hinge`].
    Hinge,
    /// [`ball_hinge_slider`].
    Chain,
}

impl RigKind {
    /// Build the rig from `config`.
    pub fn build(self, config: &ArticulaConfig) -> Result<Rig> {
        match self {
            RigKind::Hinge => elbow_hinge(config),
            RigKind::Chain => ball_hinge_slider(config),
        }
    }
}

impl fmt::Display for RigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RigKind::Hinge => "hinge",
            RigKind::Chain => "chain",
        })
    }
}

impl FromStr for RigKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hinge" => Ok(RigKind::Hinge),
            "chain" => Ok(RigKind::Chain),
            other => Err(format!("unknown rig `{other}`, expected `hinge` or `chain`")),
        }
    }
}

/// A single hinge swinging through its full range.
pub fn elbow_hinge(config: &ArticulaConfig) -> Result<Rig> {
    let hinge = HingeJoint::build(&config.hinge)?;
    let range = hinge.range();
    let mut chain = KinematicChain::new();
    chain.push("elbow", hinge);
    chain.set_display(
        "elbow",
        DisplayOptions {
            color: [1.0, 0.7, 0.3],
            transparency: 0.55,
        },
        DisplayOptions {
            transparency: 0.35,
            ..DisplayOptions::MOVING
        },
    );

    let sweep = DofSequence::linspace(range.min, range.max, config.animation.hinge_samples)?;
    tracing::info!(samples = sweep.len(), "built elbow hinge rig");
    Ok(Rig {
        chain,
        tracks: vec![JointTrack::Angle(sweep)],
    })
}

/// Ball, then hinge at the stud tip, then slider at the connector tip.
///
/// The hinge comes from `[chain_hinge]`, not `[hinge]`. The ball's second
/// axis runs at `ball_secondary_stride` times the speed of the first.
pub fn ball_hinge_slider(config: &ArticulaConfig) -> Result<Rig> {
    let samples = config.animation.chain_samples;
    let ball = BallJoint::build(&config.ball)?;
    let hinge = HingeJoint::build(&config.chain_hinge.0)?;
    let slider = SliderJoint::build(&config.slider)?;

    let ball_range = ball.range();
    let ball_a = DofSequence::linspace(ball_range.min, ball_range.max, samples)?;
    let ball_b = ball_a
        .clone()
        .with_stride(config.animation.ball_secondary_stride)?;
    let hinge_range = hinge.range();
    let hinge_sweep = DofSequence::linspace(hinge_range.min, hinge_range.max, samples)?;
    let slider_range = slider.range();
    let slide = DofSequence::linspace(slider_range.min, slider_range.max, samples)?;

    let chain = KinematicChain::new()
        .with_link("ball", ball)
        .with_link("hinge", hinge)
        .with_link("slider", slider);
    tracing::info!(links = chain.len(), samples, "built ball-hinge-slider rig");

    Ok(Rig {
        chain,
        tracks: vec![
            JointTrack::AnglePair(ball_a, ball_b),
            JointTrack::Angle(hinge_sweep),
            JointTrack::Offset(slide),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joints::{Dof, Joint, JointKind};

    fn coarse() -> ArticulaConfig {
        let mut cfg = ArticulaConfig::default();
        cfg.hinge.sections = 16;
        cfg.hinge.connector_sections = 8;
        cfg.chain_hinge.0.sections = 16;
        cfg.chain_hinge.0.connector_sections = 8;
        cfg.slider.sections = 16;
        cfg.ball.stud_sections = 8;
        cfg
    }

    #[test]
    fn elbow_sweeps_full_range() {
        let rig = elbow_hinge(&coarse()).unwrap();
        assert_eq!(rig.chain.len(), 1);
        let JointTrack::Angle(sweep) = &rig.tracks[0] else {
            panic!("expected an angle track");
        };
        assert_eq!(sweep.len(), 160);
        assert_eq!(sweep.values()[0], -60.0);
        assert_eq!(sweep.values()[159], 60.0);
        assert_eq!(rig.chain.links()[0].fixed_options().transparency, 0.55);
    }

    #[test]
    fn chain_rig_order_and_tracks() {
        let rig = ball_hinge_slider(&coarse()).unwrap();
        let kinds: Vec<JointKind> = rig.chain.links().iter().map(|l| l.joint().kind()).collect();
        assert_eq!(kinds, [JointKind::Ball, JointKind::Hinge, JointKind::Slider]);

        let Joint::Hinge(hinge) = rig.chain.links()[1].joint() else {
            panic!("expected the hinge second");
        };
        let hp = hinge.params();
        assert_eq!((hp.connector_radius, hp.connector_length), (3.0, 20.0));
        assert_eq!(hp.saddle_width, 22.0);
        assert_eq!(hp.clearance, 0.4);
        assert_eq!(hinge.fit().inner_radius(), 6.4);
        assert_eq!(hinge.child_attachment().origin().z, 20.0);

        let driver = rig.into_driver().unwrap();
        let p = driver.parameters_at(10);
        match p[0] {
            Dof::AnglePair(a, b) => {
                let JointTrack::AnglePair(sa, _) = &driver.tracks()[0] else {
                    panic!("expected a pair track");
                };
                assert_eq!(a, sa.values()[10]);
                assert_eq!(b, sa.values()[20]);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(driver.parameters_at(120), driver.parameters_at(0));
        assert!(matches!(p[2], Dof::Offset(o) if o > 0.0 && o < 27.0));
    }

    #[test]
    fn rig_kind_parsing() {
        assert_eq!("hinge".parse::<RigKind>().unwrap(), RigKind::Hinge);
        assert_eq!("chain".parse::<RigKind>().unwrap(), RigKind::Chain);
        assert!("elbow".parse::<RigKind>().is_err());
        assert_eq!(RigKind::Chain.to_string(), "chain");
    }

    #[test]
    fn invalid_sampling_is_reported() {
        let mut cfg = coarse();
        cfg.animation.hinge_samples = 1;
        assert!(elbow_hinge(&cfg).is_err());
    }
}
