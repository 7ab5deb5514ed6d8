//! Homography solving
//!
//! Four point correspondences fix a projective transform up to scale. With
//! `h22` pinned to 1 each correspondence gives two linear equations in the
//! remaining eight unknowns:
//!
//! ```text
//! h00·sx + h01·sy + h02 − tx·h20·sx − tx·h21·sy = tx
//! h10·sx + h11·sy + h12 − ty·h20·sx − ty·h21·sy = ty
//! ```
//!
//! The 8x8 system is solved by Gaussian elimination with partial pivoting.

use crate::config::MappingConfig;
use crate::error::{MappingError, Result};
use crate::geometry::{Matrix3x3, Point2D, Quad, Rect};
use crate::warp::project::{project_point, project_point_with, W_EPSILON};
use crate::warp::validate::validate_quad;

/// Pivots smaller than this fraction of the largest coefficient count as zero
const PIVOT_EPSILON: f64 = 1e-12;

/// Augmented 8x9 system `[A | b]`
type System = [[f64; 9]; 8];

/// Homography mapping the rectangle `(0,0)-(width,height)` onto `quad`
pub fn solve_rect_to_quad(width: f64, height: f64, quad: &Quad) -> Result<Matrix3x3> {
    solve_rect_to_quad_with(width, height, quad, &MappingConfig::default())
}

pub fn solve_rect_to_quad_with(
    width: f64,
    height: f64,
    quad: &Quad,
    config: &MappingConfig,
) -> Result<Matrix3x3> {
    check_dimensions(width, height)?;
    validate_quad(quad, config.epsilon)?;

    let source = Rect::from_size(width, height).to_quad();
    let h = solve_correspondences(&source.points, &quad.points)?;

    if config.verify_solution {
        verify_correspondences(
            &h,
            &source.points,
            &quad.points,
            config.consistency_tolerance,
            config.w_epsilon,
        )?;
    }

    log::debug!(
        "Solved {}x{} -> {:?}: {:?}",
        width,
        height,
        quad.points,
        h.to_row_major()
    );
    Ok(h)
}

/// Homography mapping the corners of `src` onto the corners of `dst`
///
/// Both quads must pass validation.
pub fn solve_quad_to_quad(src: &Quad, dst: &Quad) -> Result<Matrix3x3> {
    solve_quad_to_quad_with(src, dst, &MappingConfig::default())
}

pub fn solve_quad_to_quad_with(src: &Quad, dst: &Quad, config: &MappingConfig) -> Result<Matrix3x3> {
    validate_quad(src, config.epsilon)?;
    validate_quad(dst, config.epsilon)?;

    let h = solve_correspondences(&src.points, &dst.points)?;
    if config.verify_solution {
        verify_correspondences(
            &h,
            &src.points,
            &dst.points,
            config.consistency_tolerance,
            config.w_epsilon,
        )?;
    }
    Ok(h)
}

/// Re-project the canonical rectangle corners and compare against `quad`
///
/// A miss means the solver is broken, not that the input was bad.
pub fn verify_rect_to_quad(
    h: &Matrix3x3,
    width: f64,
    height: f64,
    quad: &Quad,
    tolerance: f64,
) -> Result<()> {
    let source = Rect::from_size(width, height).to_quad();
    verify_correspondences(h, &source.points, &quad.points, tolerance, W_EPSILON)
}

/// Mean distance between `h` applied to `src` and the matching `dst` points
pub fn reprojection_error(h: &Matrix3x3, src: &[Point2D], dst: &[Point2D]) -> Result<f64> {
    if src.len() != dst.len() {
        return Err(MappingError::PointCountMismatch {
            src: src.len(),
            dst: dst.len(),
        });
    }
    if src.is_empty() {
        return Ok(0.0);
    }

    let mut total_error = 0.0;
    for (s, d) in src.iter().zip(dst) {
        total_error += project_point(h, *s)?.distance(*d);
    }
    Ok(total_error / src.len() as f64)
}

fn check_dimensions(width: f64, height: f64) -> Result<()> {
    let valid = width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
    if !valid {
        return Err(MappingError::InvalidDimensions { width, height });
    }
    Ok(())
}

fn verify_correspondences(
    h: &Matrix3x3,
    src: &[Point2D; 4],
    dst: &[Point2D; 4],
    tolerance: f64,
    w_epsilon: f64,
) -> Result<()> {
    for (corner, (s, d)) in src.iter().zip(dst).enumerate() {
        let distance = match project_point_with(h, *s, w_epsilon) {
            Ok(projected) => projected.distance(*d),
            Err(_) => f64::INFINITY,
        };
        let allowed = tolerance * d.x.abs().max(d.y.abs()).max(1.0);
        if distance.is_nan() || distance > allowed {
            log::error!(
                "Homography misses corner {} by {} (allowed {}): {:?}",
                corner,
                distance,
                allowed,
                h.to_row_major()
            );
            return Err(MappingError::InternalConsistency { corner, distance });
        }
    }
    Ok(())
}

/// Build and solve the 8x8 system for four exact correspondences
fn solve_correspondences(src: &[Point2D; 4], dst: &[Point2D; 4]) -> Result<Matrix3x3> {
    let mut system: System = [[0.0; 9]; 8];
    for (i, (s, t)) in src.iter().zip(dst).enumerate() {
        system[2 * i] = [s.x, s.y, 1.0, 0.0, 0.0, 0.0, -t.x * s.x, -t.x * s.y, t.x];
        system[2 * i + 1] = [0.0, 0.0, 0.0, s.x, s.y, 1.0, -t.y * s.x, -t.y * s.y, t.y];
    }

    let h = gaussian_elimination(system)?;
    Ok(Matrix3x3::new([
        [h[0], h[1], h[2]],
        [h[3], h[4], h[5]],
        [h[6], h[7], 1.0],
    ]))
}

/// Solve `[A | b]` with partial pivoting and back substitution
fn gaussian_elimination(mut a: System) -> Result<[f64; 8]> {
    let scale = a
        .iter()
        .flat_map(|row| row[..8].iter())
        .fold(0.0_f64, |max, v| max.max(v.abs()));
    let threshold = PIVOT_EPSILON * scale;

    for col in 0..8 {
        let mut pivot_row = col;
        let mut max_val = a[col][col].abs();
        for (row, equation) in a.iter().enumerate().skip(col + 1) {
            let v = equation[col].abs();
            if v > max_val {
                max_val = v;
                pivot_row = row;
            }
        }

        if max_val.is_nan() || max_val <= threshold {
            log::trace!("No usable pivot in column {} (max {:e})", col, max_val);
            return Err(MappingError::SingularSystem { column: col });
        }
        if pivot_row != col {
            a.swap(col, pivot_row);
        }

        let pivot = a[col];
        for equation in a.iter_mut().skip(col + 1) {
            let factor = equation[col] / pivot[col];
            if factor == 0.0 {
                continue;
            }
            for (value, p) in equation[col..].iter_mut().zip(&pivot[col..]) {
                *value -= factor * p;
            }
        }
    }

    let mut h = [0.0_f64; 8];
    for row in (0..8).rev() {
        let mut sum = a[row][8];
        for c in (row + 1)..8 {
            sum -= a[row][c] * h[c];
        }
        h[row] = sum / a[row][row];
    }
    Ok(h)
}
