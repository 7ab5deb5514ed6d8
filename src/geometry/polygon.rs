//! Polygon masks
//!
//! Masks are free-form outlines drawn over a projection surface. Unlike
//! [`Quad`](super::Quad) they only need three or more points; ordering and
//! convexity are left to the caller.

use super::{Point2D, Quad, Rect};
use crate::error::{MappingError, Result};
use serde::{Deserialize, Serialize};

/// Below this magnitude the polygon is treated as having no area
const AREA_EPSILON: f64 = 1e-12;

/// Ordered outline of at least three points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Point2D>", into = "Vec<Point2D>")]
pub struct Polygon {
    points: Vec<Point2D>,
}

impl Polygon {
    pub fn new(points: Vec<Point2D>) -> Result<Self> {
        if points.len() < 3 {
            return Err(MappingError::InvalidPolygon { len: points.len() });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; a polygon holds at least three points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Shoelace area, positive for clockwise outlines in y-down space
    pub fn signed_area(&self) -> f64 {
        let n = self.points.len();
        let sum: f64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        sum * 0.5
    }

    /// Area-weighted centroid, or the vertex mean for zero-area outlines
    pub fn centroid(&self) -> Point2D {
        let n = self.points.len();
        let area = self.signed_area();
        if area.abs() <= AREA_EPSILON {
            let sum = self
                .points
                .iter()
                .fold(Point2D::ZERO, |acc, p| acc + *p);
            return sum * (1.0 / n as f64);
        }

        let (mut cx, mut cy) = (0.0, 0.0);
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let cross = a.x * b.y - b.x * a.y;
            cx += (a.x + b.x) * cross;
            cy += (a.y + b.y) * cross;
        }
        let factor = 1.0 / (6.0 * area);
        Point2D::new(cx * factor, cy * factor)
    }

    pub fn bounds(&self) -> Rect {
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Even-odd containment test
    pub fn contains(&self, point: Point2D) -> bool {
        let n = self.points.len();
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[j];
            if (a.y > point.y) != (b.y > point.y) {
                let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Apply `f` to every vertex, stopping at the first failure
    pub fn try_map<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(Point2D) -> Result<Point2D>,
    {
        let points = self
            .points
            .iter()
            .map(|p| f(*p))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { points })
    }
}

impl From<Quad> for Polygon {
    fn from(quad: Quad) -> Self {
        Self {
            points: quad.points.to_vec(),
        }
    }
}

impl TryFrom<Vec<Point2D>> for Polygon {
    type Error = MappingError;

    fn try_from(points: Vec<Point2D>) -> Result<Self> {
        Self::new(points)
    }
}

impl From<Polygon> for Vec<Point2D> {
    fn from(polygon: Polygon) -> Self {
        polygon.points
    }
}
