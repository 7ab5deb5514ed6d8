//! Rectangles and four-corner output quads

use super::Point2D;
use crate::error::QuadError;
use crate::warp::validate::{validate_quad, DEFAULT_EPSILON};
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub const fn from_size(width: f64, height: f64) -> Self {
        Self { x: 0.0, y: 0.0, width, height }
    }

    pub fn center(&self) -> Point2D {
        Point2D::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point2D) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Corners in clockwise order starting at the top-left
    pub fn to_quad(&self) -> Quad {
        Quad::from_rect(*self)
    }
}

/// Four output corners: top-left, top-right, bottom-right, bottom-left
///
/// A `Quad` is plain data. Use [`Quad::validate`] before handing it to the
/// solver; the solver validates again anyway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quad {
    pub points: [Point2D; 4],
}

impl Default for Quad {
    fn default() -> Self {
        Self::unit()
    }
}

impl Quad {
    pub const fn new(points: [Point2D; 4]) -> Self {
        Self { points }
    }

    /// Create a quad from a rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self::new([
            Point2D::new(rect.x, rect.y),
            Point2D::new(rect.x + rect.width, rect.y),
            Point2D::new(rect.x + rect.width, rect.y + rect.height),
            Point2D::new(rect.x, rect.y + rect.height),
        ])
    }

    /// Create a unit quad (0,0 to 1,1)
    pub fn unit() -> Self {
        Self::from_rect(Rect::from_size(1.0, 1.0))
    }

    pub fn corners(&self) -> [Point2D; 4] {
        self.points
    }

    pub fn corner(&self, index: usize) -> Option<Point2D> {
        self.points.get(index).copied()
    }

    pub fn corner_mut(&mut self, index: usize) -> Option<&mut Point2D> {
        self.points.get_mut(index)
    }

    /// Shoelace area, positive for clockwise corners in y-down space
    pub fn signed_area(&self) -> f64 {
        let p = &self.points;
        let sum: f64 = (0..4)
            .map(|i| {
                let a = p[i];
                let b = p[(i + 1) % 4];
                a.x * b.y - b.x * a.y
            })
            .sum();
        sum * 0.5
    }

    /// Arithmetic mean of the four corners
    pub fn centroid(&self) -> Point2D {
        let p = &self.points;
        Point2D::new(
            (p[0].x + p[1].x + p[2].x + p[3].x) / 4.0,
            (p[0].y + p[1].y + p[2].y + p[3].y) / 4.0,
        )
    }

    /// Scale about the centroid
    pub fn scaled(&self, scale_x: f64, scale_y: f64) -> Self {
        self.scaled_about(scale_x, scale_y, self.centroid())
    }

    /// Scale each corner's offset from `origin` independently per axis.
    ///
    /// An axis with a factor of exactly 1 keeps its coordinates untouched.
    pub fn scaled_about(&self, scale_x: f64, scale_y: f64, origin: Point2D) -> Self {
        let scale_axis = |value: f64, origin: f64, factor: f64| {
            if factor == 1.0 {
                value
            } else {
                origin + (value - origin) * factor
            }
        };
        Self::new(self.points.map(|p| {
            Point2D::new(
                scale_axis(p.x, origin.x, scale_x),
                scale_axis(p.y, origin.y, scale_y),
            )
        }))
    }

    /// Translate every corner by `offset`
    pub fn translated(&self, offset: Point2D) -> Self {
        Self::new(self.points.map(|p| p + offset))
    }

    /// Smallest rectangle containing all corners
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

    /// Check the quad against the default tolerance
    pub fn validate(&self) -> Result<(), QuadError> {
        validate_quad(self, DEFAULT_EPSILON)
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl From<[Point2D; 4]> for Quad {
    fn from(points: [Point2D; 4]) -> Self {
        Self::new(points)
    }
}

impl From<[(f64, f64); 4]> for Quad {
    fn from(points: [(f64, f64); 4]) -> Self {
        Self::new(points.map(Point2D::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_to_quad_order() {
        let quad = Rect::new(10.0, 20.0, 100.0, 50.0).to_quad();
        assert_eq!(quad.points[0], Point2D::new(10.0, 20.0));
        assert_eq!(quad.points[1], Point2D::new(110.0, 20.0));
        assert_eq!(quad.points[2], Point2D::new(110.0, 70.0));
        assert_eq!(quad.points[3], Point2D::new(10.0, 70.0));
    }

    #[test]
    fn test_centroid_of_rect() {
        let rect = Rect::new(12.5, -4.0, 300.0, 81.0);
        let c = rect.to_quad().centroid();
        assert!(c.distance(rect.center()) < 1e-12);
        assert_eq!(rect.center(), Point2D::new(162.5, 36.5));
    }

    #[test]
    fn test_rect_contains_edges() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert!(rect.contains(Point2D::new(10.0, 20.0)));
        assert!(rect.contains(Point2D::new(110.0, 70.0)));
        assert!(rect.contains(rect.center()));
        assert!(!rect.contains(Point2D::new(110.5, 40.0)));
        assert!(!rect.contains(Point2D::new(50.0, 19.0)));
    }

    #[test]
    fn test_translated_keeps_shape() {
        let quad = Quad::from([(10.0, 10.0), (210.0, 10.0), (200.0, 110.0), (0.0, 100.0)]);
        let moved = quad.translated(Point2D::new(-10.0, 5.0));
        assert_eq!(moved.corners()[0], Point2D::new(0.0, 15.0));
        assert_eq!(moved.signed_area(), quad.signed_area());
        assert_eq!(moved.bounds(), Rect::new(-10.0, 15.0, 210.0, 100.0));
    }

    #[test]
    fn test_signed_area_clockwise_positive() {
        let quad = Rect::from_size(4.0, 3.0).to_quad();
        assert_eq!(quad.signed_area(), 12.0);

        let mut mirrored = quad.points;
        mirrored.reverse();
        assert_eq!(Quad::new(mirrored).signed_area(), -12.0);
    }

    #[test]
    fn test_scale_identity_is_exact() {
        let quad = Quad::from([(10.1, 10.3), (210.7, 10.0), (200.0, 110.9), (0.3, 100.0)]);
        assert_eq!(quad.scaled(1.0, 1.0), quad);
        assert_eq!(quad.scaled_about(1.0, 1.0, Point2D::new(-7.0, 3.3)), quad);
    }

    #[test]
    fn test_scale_non_uniform_about_origin() {
        let quad = Rect::from_size(10.0, 10.0).to_quad();
        let scaled = quad.scaled_about(2.0, 0.5, Point2D::ZERO);
        assert_eq!(scaled.points[2], Point2D::new(20.0, 5.0));
        assert_eq!(scaled.points[0], Point2D::ZERO);
    }

    #[test]
    fn test_scale_about_centroid_keeps_centroid() {
        let quad = Rect::new(0.0, 0.0, 100.0, 40.0).to_quad();
        let scaled = quad.scaled(0.5, 3.0);
        let c = scaled.centroid();
        assert!((c.x - 50.0).abs() < 1e-12);
        assert!((c.y - 20.0).abs() < 1e-12);
        assert_eq!(scaled.bounds(), Rect::new(25.0, -40.0, 50.0, 120.0));
    }

    #[test]
    fn test_quad_serde_is_point_array() {
        let quad = Rect::from_size(2.0, 1.0).to_quad();
        let json = serde_json::to_string(&quad).unwrap();
        assert!(json.starts_with("[{\"x\":0.0"));
        let back: Quad = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quad);
    }
}
