//! Frame-indexed DOF tracks and the per-tick animation step.
//!
//! A frame is fully determined by its index: every track maps the index to a
//! DOF value, the chain is re-posed from scratch and all parts are handed to
//! the display sink. Nothing but the [`AnimationState`] carries over from one
//! tick to the next.

use crate::chain::KinematicChain;
use crate::error::{JointError, Result};
use crate::joints::Dof;
use crate::viewer::{DisplaySink, Viewer};

/// Evenly spaced samples, cycled by frame index.
#[derive(Debug, Clone, PartialEq)]
pub struct DofSequence {
    values: Vec<f64>,
    stride: usize,
}

impl DofSequence {
    /// `samples` values from `start` to `end`, both included.
    pub fn linspace(start: f64, end: f64, samples: usize) -> Result<Self> {
        if samples < 2 {
            return Err(JointError::InvalidSequence(format!(
                "need at least 2 samples, got {samples}"
            )));
        }
        if !start.is_finite() || !end.is_finite() {
            return Err(JointError::InvalidSequence(format!(
                "bounds must be finite, got [{start}, {end}]"
            )));
        }
        let step = (end - start) / (samples - 1) as f64;
        let mut values: Vec<f64> = (0..samples).map(|i| start + step * i as f64).collect();
        values[samples - 1] = end;
        Ok(Self { values, stride: 1 })
    }

    /// Advance `stride` samples per frame instead of one.
    pub fn with_stride(mut self, stride: usize) -> Result<Self> {
        if stride == 0 {
            return Err(JointError::InvalidSequence("stride must be >= 1".into()));
        }
        self.stride = stride;
        Ok(self)
    }

    /// The samples in order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Samples advanced per frame.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; sequences hold at least two samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sample for `frame`: index `(frame mod len) * stride mod len`.
    pub fn at(&self, frame: u64) -> f64 {
        let len = self.values.len() as u64;
        let i = ((frame % len) * self.stride as u64) % len;
        self.values[i as usize]
    }
}

/// DOF source for one chain link.
#[derive(Debug, Clone, PartialEq)]
pub enum JointTrack {
    /// Hinge angle.
    Angle(DofSequence),
    /// Ball angles about X and Y.
    AnglePair(DofSequence, DofSequence),
    /// Slider offset.
    Offset(DofSequence),
}

impl JointTrack {
    /// DOF for `frame`.
    pub fn dof_at(&self, frame: u64) -> Dof {
        match self {
            JointTrack::Angle(s) => Dof::Angle(s.at(frame)),
            JointTrack::AnglePair(a, b) => Dof::AnglePair(a.at(frame), b.at(frame)),
            JointTrack::Offset(s) => Dof::Offset(s.at(frame)),
        }
    }

    /// Every DOF the track can produce, one axis at a time (the other axis
    /// at zero for pairs).
    fn samples(&self) -> Vec<Dof> {
        match self {
            JointTrack::Angle(s) => s.values().iter().map(|&v| Dof::Angle(v)).collect(),
            JointTrack::AnglePair(a, b) => a
                .values()
                .iter()
                .map(|&v| Dof::AnglePair(v, 0.0))
                .chain(b.values().iter().map(|&v| Dof::AnglePair(0.0, v)))
                .collect(),
            JointTrack::Offset(s) => s.values().iter().map(|&v| Dof::Offset(v)).collect(),
        }
    }
}

/// The only state carried between ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    /// Frame to render next.
    pub frame_index: u64,
}

impl AnimationState {
    /// State positioned at `frame_index`.
    pub fn at(frame_index: u64) -> Self {
        Self { frame_index }
    }
}

/// Whether the driver has started producing frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverPhase {
    /// Built, nothing rendered yet.
    Idle,
    /// Attached to a viewer or stepped at least once.
    Stepping,
}

/// Poses a chain from its tracks and publishes the parts every tick.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    chain: KinematicChain,
    tracks: Vec<JointTrack>,
    phase: DriverPhase,
}

impl AnimationDriver {
    /// Pair a chain with one track per link.
    ///
    /// Every sample is checked against its joint up front, so stepping can
    /// never hit a DOF of the wrong kind or out of range.
    pub fn new(chain: KinematicChain, tracks: Vec<JointTrack>) -> Result<Self> {
        if tracks.len() != chain.len() {
            return Err(JointError::DofCount {
                expected: chain.len(),
                got: tracks.len(),
            });
        }
        for (link, track) in chain.links().iter().zip(&tracks) {
            for dof in track.samples() {
                link.joint().check_range(&dof)?;
            }
        }
        Ok(Self {
            chain,
            tracks,
            phase: DriverPhase::Idle,
        })
    }

    /// The driven chain, posed for the last rendered frame.
    pub fn chain(&self) -> &KinematicChain {
        &self.chain
    }

    /// One track per link.
    pub fn tracks(&self) -> &[JointTrack] {
        &self.tracks
    }

    /// Current phase.
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// DOF of every link for `frame`.
    pub fn parameters_at(&self, frame: u64) -> Vec<Dof> {
        self.tracks.iter().map(|t| t.dof_at(frame)).collect()
    }

    /// Render one frame into `sink` and return the state for the next one.
    pub fn step(
        &mut self,
        state: &AnimationState,
        sink: &mut dyn DisplaySink,
    ) -> Result<AnimationState> {
        self.phase = DriverPhase::Stepping;
        let dofs = self.parameters_at(state.frame_index);
        self.chain.update(&dofs)?;

        for link in self.chain.links() {
            sink.register(
                &link.fixed_name(),
                link.posed_fixed_solid(),
                link.fixed_options(),
            );
            sink.register(
                &link.moving_name(),
                link.posed_moving_solid(),
                link.moving_options(),
            );
        }
        tracing::trace!(frame = state.frame_index, ?dofs, "stepped");

        Ok(AnimationState {
            frame_index: state.frame_index.wrapping_add(1),
        })
    }

    /// Hand the driver to `viewer` as its step callback, starting at frame 0.
    pub fn attach<V: Viewer + ?Sized>(mut self, viewer: &mut V) {
        self.phase = DriverPhase::Stepping;
        let mut state = AnimationState::default();
        viewer.set_step_callback(Box::new(move |sink: &mut dyn DisplaySink| {
            state = self.step(&state, sink)?;
            Ok(())
        }));
    }
}
