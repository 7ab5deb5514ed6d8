//! Point projection through a homography

use crate::error::{MappingError, Result};
use crate::geometry::{Matrix3x3, Point2D, Polygon, Quad};

/// Smallest |w| accepted by the perspective divide
pub const W_EPSILON: f64 = 1e-12;

/// Map `point` through `h`, failing near the transform's vanishing line
pub fn project_point(h: &Matrix3x3, point: Point2D) -> Result<Point2D> {
    project_point_with(h, point, W_EPSILON)
}

pub fn project_point_with(h: &Matrix3x3, point: Point2D, w_epsilon: f64) -> Result<Point2D> {
    let m = &h.m;
    let (x, y) = (point.x, point.y);
    let xp = m[0][0] * x + m[0][1] * y + m[0][2];
    let yp = m[1][0] * x + m[1][1] * y + m[1][2];
    let w = m[2][0] * x + m[2][1] * y + m[2][2];

    if w.is_nan() || w.abs() < w_epsilon {
        return Err(MappingError::DegenerateProjection { w });
    }
    Ok(Point2D::new(xp / w, yp / w))
}

pub fn project_quad(h: &Matrix3x3, quad: &Quad) -> Result<Quad> {
    let p = &quad.points;
    Ok(Quad::new([
        project_point(h, p[0])?,
        project_point(h, p[1])?,
        project_point(h, p[2])?,
        project_point(h, p[3])?,
    ]))
}

/// Map a mask outline into output space
pub fn project_polygon(h: &Matrix3x3, polygon: &Polygon) -> Result<Polygon> {
    polygon.try_map(|p| project_point(h, p))
}
