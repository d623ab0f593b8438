#![warn(missing_docs)]

//! articula: printable clearance-fit joints and their kinematic animation.
//!
//! Hinge, ball and slider joints are synthesized from primitives with
//! boolean differences (a shell around the male part, opened into a cradle
//! where needed), then chained so each joint rides on its parent's current
//! frame.
//!
//! # Example
//!
//! ```rust,no_run
//! use articula::{rigs, AnimationState, ArticulaConfig, HeadlessViewer, Viewer};
//!
//! let config = ArticulaConfig::default();
//! let driver = rigs::ball_hinge_slider(&config)?.into_driver()?;
//! let mut viewer = HeadlessViewer::new(240);
//! driver.attach(&mut viewer);
//! viewer.run()?;
//! # let _ = AnimationState::default();
//! # Ok::<(), articula::JointError>(())
//! ```

pub mod animation;
pub mod chain;
pub mod clearance;
pub mod config;
mod error;
pub mod joints;
pub mod rigs;
pub mod viewer;

pub use animation::{AnimationDriver, AnimationState, DofSequence, DriverPhase, JointTrack};
pub use chain::{ChainLink, KinematicChain, LinkFrames};
pub use clearance::{
    open_cradle, ClearanceFit, HalfSpaceTrim, ShellOperands, ShellSpan, CAP_OVERSHOOT,
};
pub use config::{
    AnimationParams, ArticulaConfig, BallParams, ChainHingeParams, HingeParams, SliderParams,
};
pub use error::{JointError, Result};
pub use joints::{BallJoint, Dof, DofRange, HingeJoint, Joint, JointKind, SliderJoint};
pub use rigs::{Rig, RigKind};
pub use viewer::{DisplayOptions, DisplaySink, HeadlessViewer, StepCallback, Viewer};

// Re-export the geometry crates so callers need a single dependency.
pub use articula_math as math;
pub use articula_mesh as mesh;
