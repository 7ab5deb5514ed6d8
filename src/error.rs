//! Error types for the mapping core
//!
//! Every precondition violation has its own variant so the editor can decide
//! how to react (usually by keeping the last valid transform).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = MappingError> = std::result::Result<T, E>;

/// Reason a quad cannot be used as a homography target
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum QuadError {
    #[error("corners {first} and {second} are the same point")]
    DuplicatePoint { first: usize, second: usize },

    #[error("corners {indices:?} are collinear")]
    CollinearPoints { indices: [usize; 3] },

    #[error("quad area {area} is too small")]
    DegenerateArea { area: f64 },

    #[error("quad must be clockwise (signed area {area})")]
    WrongOrientation { area: f64 },

    #[error("edges {edges:?} cross each other")]
    SelfIntersecting { edges: [(usize, usize); 2] },
}

/// Errors produced by the mapping operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MappingError {
    #[error("invalid dimensions {width}x{height}, both must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("invalid quad: {0}")]
    InvalidQuad(#[from] QuadError),

    #[error("linear system is singular at column {column}")]
    SingularSystem { column: usize },

    #[error("projection is degenerate (w = {w:e})")]
    DegenerateProjection { w: f64 },

    /// The solved matrix does not reproduce its own inputs. This is a bug in
    /// the solver, never a user error.
    #[error("solved homography misses corner {corner} by {distance}")]
    InternalConsistency { corner: usize, distance: f64 },

    #[error("matrix is not invertible (determinant {determinant:e})")]
    NonInvertible { determinant: f64 },

    #[error("polygon needs at least 3 points, got {len}")]
    InvalidPolygon { len: usize },

    #[error("point count mismatch: {src} source vs {dst} destination")]
    PointCountMismatch { src: usize, dst: usize },

    #[error("corner index {index} out of range")]
    CornerIndex { index: usize },

    #[error("invalid mapping config: {0}")]
    InvalidConfig(String),
}

/// Errors from loading or saving a [`crate::MappingConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
