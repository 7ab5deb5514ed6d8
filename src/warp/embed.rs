//! Lifting homographies into 4x4 render matrices
//!
//! Compositors with a native 3D transform stage (CSS `matrix3d`, Core
//! Animation, a GPU vertex shader) take a 4x4 matrix. The homography's x, y
//! and w terms land in the x, y and w rows and columns; z passes through.

use crate::geometry::{Matrix3x3, Matrix4x4};

/// Embed `h` so that `(x, y, 0, 1)` maps to the homography's `(x', y', 0, w')`
pub fn embed(h: &Matrix3x3) -> Matrix4x4 {
    let m = &h.m;
    Matrix4x4::from_cols([
        [m[0][0], m[1][0], 0.0, m[2][0]],
        [m[0][1], m[1][1], 0.0, m[2][1]],
        [0.0, 0.0, 1.0, 0.0],
        [m[0][2], m[1][2], 0.0, m[2][2]],
    ])
}

impl Matrix3x3 {
    /// See [`embed`]
    pub fn to_render_matrix(&self) -> Matrix4x4 {
        embed(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2D;
    use crate::warp::project::project_point;

    fn sample() -> Matrix3x3 {
        Matrix3x3::new([[1.8, 0.12, 10.0], [-0.05, 1.4, 10.0], [0.0009, 0.0004, 1.0]])
    }

    #[test]
    fn test_identity_embeds_to_identity() {
        assert_eq!(embed(&Matrix3x3::IDENTITY), Matrix4x4::IDENTITY);
    }

    #[test]
    fn test_layout() {
        let m = embed(&sample());
        assert_eq!(m.get(0, 3), 10.0);
        assert_eq!(m.get(3, 0), 0.0009);
        assert_eq!(m.get(3, 3), 1.0);
        assert_eq!(m.get(2, 2), 1.0);
        for i in [0, 1, 3] {
            assert_eq!(m.get(2, i), 0.0);
            assert_eq!(m.get(i, 2), 0.0);
        }
    }

    #[test]
    fn test_embedding_matches_projection() {
        let h = sample();
        let m = h.to_render_matrix();
        for &(x, y) in &[(0.0, 0.0), (100.0, 50.0), (-30.0, 12.5), (640.0, 360.0)] {
            let [cx, cy, cz, cw] = m.transform([x, y, 0.0, 1.0]);
            let expected = project_point(&h, Point2D::new(x, y)).unwrap();
            assert!((cx / cw - expected.x).abs() < 1e-9);
            assert!((cy / cw - expected.y).abs() < 1e-9);
            assert_eq!(cz, 0.0);
        }
    }

    #[test]
    fn test_z_passes_through() {
        let m = embed(&sample());
        let [_, _, z, _] = m.transform([0.0, 0.0, 7.0, 1.0]);
        assert_eq!(z, 7.0);
    }
}
