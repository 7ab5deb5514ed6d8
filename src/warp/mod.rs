//! Perspective warp pipeline
//!
//! validate -> solve -> project / embed, plus the stateful corner-pin warp
//! the editor drives.

pub mod embed;
pub mod homography;
pub mod perspective;
pub mod project;
pub mod validate;

pub use embed::embed;
pub use homography::{
    reprojection_error, solve_quad_to_quad, solve_quad_to_quad_with, solve_rect_to_quad,
    solve_rect_to_quad_with, verify_rect_to_quad,
};
pub use perspective::PerspectiveWarp;
pub use project::{project_point, project_point_with, project_polygon, project_quad, W_EPSILON};
pub use validate::{validate_quad, DEFAULT_EPSILON};
