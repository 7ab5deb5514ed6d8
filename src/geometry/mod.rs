//! Geometry primitives for projection surfaces
//!
//! Plain value types: points, rectangles, quads, mask polygons and the
//! matrices produced by the warp solver.

mod matrix;
mod point;
mod polygon;
mod quad;

pub use matrix::{Matrix3x3, Matrix4x4, DETERMINANT_EPSILON};
pub use point::Point2D;
pub use polygon::Polygon;
pub use quad::{Quad, Rect};
