//! Quad validation
//!
//! A quad is usable as a homography target when its corners are distinct,
//! no three are collinear, it encloses area, it winds clockwise in y-down
//! space and its edges do not cross. Each check is exposed on its own so
//! callers (and tests) can check one invariant at a time.

use crate::error::QuadError;
use crate::geometry::{Point2D, Quad};

/// Default tolerance for the collinearity, area and crossing checks
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// The four 3-point combinations of a quad's corners
const TRIPLES: [[usize; 3]; 4] = [[0, 1, 2], [0, 1, 3], [0, 2, 3], [1, 2, 3]];

/// Run every check in order; the first failure wins
pub fn validate_quad(quad: &Quad, epsilon: f64) -> Result<(), QuadError> {
    let result = check_duplicate_points(quad)
        .and_then(|_| check_collinearity(quad, epsilon))
        .and_then(|_| check_area(quad, epsilon))
        .and_then(|_| check_orientation(quad))
        .and_then(|_| check_self_intersection(quad, epsilon));

    if let Err(reason) = &result {
        log::trace!("Rejected quad {:?}: {}", quad.points, reason);
    }
    result
}

/// Reject any two corners that are exactly equal
pub fn check_duplicate_points(quad: &Quad) -> Result<(), QuadError> {
    let p = &quad.points;
    for first in 0..4 {
        for second in (first + 1)..4 {
            if p[first] == p[second] {
                return Err(QuadError::DuplicatePoint { first, second });
            }
        }
    }
    Ok(())
}

/// Reject when any three corners span (almost) no area
pub fn check_collinearity(quad: &Quad, epsilon: f64) -> Result<(), QuadError> {
    let p = &quad.points;
    for [a, b, c] in TRIPLES {
        let cross = (p[b] - p[a]).cross(p[c] - p[a]);
        if cross.abs() <= epsilon {
            return Err(QuadError::CollinearPoints { indices: [a, b, c] });
        }
    }
    Ok(())
}

/// Reject near-zero area; non-finite coordinates land here too
pub fn check_area(quad: &Quad, epsilon: f64) -> Result<(), QuadError> {
    let area = quad.signed_area();
    if !area.is_finite() || area.abs() <= epsilon {
        return Err(QuadError::DegenerateArea { area });
    }
    Ok(())
}

/// Clockwise on screen (y down) means a positive shoelace sum
pub fn check_orientation(quad: &Quad) -> Result<(), QuadError> {
    let area = quad.signed_area();
    if area <= 0.0 {
        return Err(QuadError::WrongOrientation { area });
    }
    Ok(())
}

/// Reject "bowtie" quads whose opposite edges properly cross
pub fn check_self_intersection(quad: &Quad, epsilon: f64) -> Result<(), QuadError> {
    let p = &quad.points;
    for [(a, b), (c, d)] in [[(0, 1), (2, 3)], [(1, 2), (3, 0)]] {
        if segments_cross(p[a], p[b], p[c], p[d], epsilon) {
            return Err(QuadError::SelfIntersecting {
                edges: [(a, b), (c, d)],
            });
        }
    }
    Ok(())
}

/// Signed area of the triangle (a, b, c), doubled
fn orientation(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    (b - a).cross(c - a)
}

/// True only for a proper crossing: touching or collinear overlap is not one
fn segments_cross(a: Point2D, b: Point2D, c: Point2D, d: Point2D, epsilon: f64) -> bool {
    let d1 = orientation(c, d, a);
    let d2 = orientation(c, d, b);
    let d3 = orientation(a, b, c);
    let d4 = orientation(a, b, d);

    if [d1, d2, d3, d4].iter().any(|v| v.abs() <= epsilon) {
        return false;
    }
    (d1 > 0.0) != (d2 > 0.0) && (d3 > 0.0) != (d4 > 0.0)
}
