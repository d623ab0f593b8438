//! Error types for joint construction and chain evaluation.

use articula_mesh::GeometryError;
use thiserror::Error;

use crate::joints::JointKind;

/// Errors that can occur while building joints or posing a chain.
#[derive(Error, Debug)]
pub enum JointError {
    /// A primitive or clearance parameter was rejected.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A boolean step produced an empty solid.
    #[error("{joint} joint: {stage} produced no geometry ({detail})")]
    GeometryConstruction {
        /// Joint type being built.
        joint: JointKind,
        /// Construction stage that failed.
        stage: &'static str,
        /// Parameters involved.
        detail: String,
    },

    /// The DOF variant does not fit the joint type.
    #[error("{joint} joint cannot take {dof}")]
    DofMismatch {
        /// Joint type.
        joint: JointKind,
        /// Description of the offending value.
        dof: String,
    },

    /// Number of DOF values differs from the number of chain links.
    #[error("expected {expected} DOF values, got {got}")]
    DofCount {
        /// Number of links.
        expected: usize,
        /// Number of values supplied.
        got: usize,
    },

    /// A DOF value lies outside the joint's range.
    #[error("{joint} joint: {value} outside [{min}, {max}]")]
    OutOfRangeDof {
        /// Joint type.
        joint: JointKind,
        /// The rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// A DOF sequence could not be built.
    #[error("invalid DOF sequence: {0}")]
    InvalidSequence(String),

    /// Configuration file could not be parsed.
    #[error("config: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O failure while reading configuration or dumping frames.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for joint operations.
pub type Result<T> = std::result::Result<T, JointError>;
