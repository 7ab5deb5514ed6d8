//! Immersive Mapping Library
//!
//! Perspective mapping core for projection surfaces: validates the four
//! output corners of a surface, solves the rectangle-to-quad homography,
//! projects points through it and lifts it into a 4x4 render matrix.

pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod warp;

// Re-export commonly used types
pub use config::MappingConfig;
pub use error::{ConfigError, MappingError, QuadError, Result};
pub use geometry::{Matrix3x3, Matrix4x4, Point2D, Polygon, Quad, Rect};
pub use layout::{fit_rect, fullscreen_quad, Alignment, FitMode};
pub use warp::{embed, project_point, solve_rect_to_quad, validate_quad, PerspectiveWarp};
