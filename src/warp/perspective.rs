//! 4-corner perspective warp
//!
//! The editor-facing corner pin: a content rectangle of `width` x `height`
//! pinned onto four output corners. Corner edits are validated before they
//! are accepted, so the warp always holds a solvable quad.

use crate::config::MappingConfig;
use crate::error::{MappingError, Result};
use crate::geometry::{Matrix3x3, Matrix4x4, Point2D, Quad, Rect};
use crate::warp::embed::embed;
use crate::warp::homography::solve_rect_to_quad_with;
use crate::warp::project::project_point_with;
use crate::warp::validate::validate_quad;
use serde::{Deserialize, Serialize};

/// Project-file form of a warp, checked by `TryFrom` before use
#[derive(Deserialize)]
struct StoredWarp {
    width: f64,
    height: f64,
    corners: Quad,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredWarp")]
pub struct PerspectiveWarp {
    /// Content width in pixels
    #[serde(rename = "width")]
    width: f64,

    /// Content height in pixels
    #[serde(rename = "height")]
    height: f64,

    /// Corner positions: [top-left, top-right, bottom-right, bottom-left]
    #[serde(rename = "corners")]
    corners: Quad,

    #[serde(skip)]
    config: MappingConfig,
}

impl PerspectiveWarp {
    /// Identity warp: the corners sit on the content rectangle
    pub fn new(width: f64, height: f64) -> Result<Self> {
        Self::with_corners(width, height, Rect::from_size(width, height).to_quad())
    }

    pub fn with_corners(width: f64, height: f64, corners: Quad) -> Result<Self> {
        Self::with_config(width, height, corners, MappingConfig::default())
    }

    pub fn with_config(width: f64, height: f64, corners: Quad, config: MappingConfig) -> Result<Self> {
        config
            .sanitize()
            .map_err(|e| MappingError::InvalidConfig(e.to_string()))?;
        // Solving checks the dimensions and the quad in one go
        solve_rect_to_quad_with(width, height, &corners, &config)?;
        Ok(Self {
            width,
            height,
            corners,
            config,
        })
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn corners(&self) -> Quad {
        self.corners
    }

    pub fn corner(&self, index: usize) -> Result<Point2D> {
        self.corners
            .corner(index)
            .ok_or(MappingError::CornerIndex { index })
    }

    /// Move one corner; invalid edits leave the warp untouched
    pub fn set_corner(&mut self, index: usize, position: Point2D) -> Result<()> {
        let mut candidate = self.corners;
        let corner = candidate
            .corner_mut(index)
            .ok_or(MappingError::CornerIndex { index })?;
        *corner = position;

        if let Err(reason) = validate_quad(&candidate, self.config.epsilon) {
            log::warn!(
                "Rejected corner {} move to ({}, {}): {}",
                index,
                position.x,
                position.y,
                reason
            );
            return Err(reason.into());
        }
        self.corners = candidate;
        Ok(())
    }

    /// Move one corner by a delta
    pub fn move_corner(&mut self, index: usize, delta: Point2D) -> Result<()> {
        let current = self.corner(index)?;
        self.set_corner(index, current + delta)
    }

    /// Replace all four corners at once
    pub fn set_corners(&mut self, corners: Quad) -> Result<()> {
        validate_quad(&corners, self.config.epsilon)?;
        self.corners = corners;
        Ok(())
    }

    /// Reset to identity
    pub fn reset(&mut self) {
        self.corners = Rect::from_size(self.width, self.height).to_quad();
    }

    /// Check if every corner is within `epsilon` of its identity position
    pub fn is_identity(&self, epsilon: f64) -> bool {
        let identity = Rect::from_size(self.width, self.height).to_quad();
        self.corners
            .corners()
            .iter()
            .zip(identity.corners())
            .all(|(c, i)| c.distance(i) <= epsilon)
    }

    /// Content space to output space
    pub fn homography(&self) -> Result<Matrix3x3> {
        solve_rect_to_quad_with(self.width, self.height, &self.corners, &self.config)
    }

    pub fn render_matrix(&self) -> Result<Matrix4x4> {
        Ok(embed(&self.homography()?))
    }

    /// Map a content-space point to output space
    pub fn map_point(&self, point: Point2D) -> Result<Point2D> {
        project_point_with(&self.homography()?, point, self.config.w_epsilon)
    }

    /// Map an output-space point (e.g. a click) back into content space
    pub fn unmap_point(&self, point: Point2D) -> Result<Point2D> {
        let inverse = self.homography()?.inverse()?;
        project_point_with(&inverse, point, self.config.w_epsilon)
    }
}

impl TryFrom<StoredWarp> for PerspectiveWarp {
    type Error = MappingError;

    fn try_from(stored: StoredWarp) -> Result<Self> {
        Self::with_corners(stored.width, stored.height, stored.corners)
    }
}
