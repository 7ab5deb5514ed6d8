//! 3x3 homographies and 4x4 render matrices

use crate::error::{MappingError, Result};
use glam::{DMat3, DMat4, DVec3};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Determinant magnitude below which a 3x3 matrix is treated as singular
pub const DETERMINANT_EPSILON: f64 = 1e-12;

/// 2D projective transform in homogeneous coordinates (row-major)
///
/// Conventionally normalized so `m[2][2] == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix3x3 {
    pub m: [[f64; 3]; 3],
}

impl Default for Matrix3x3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix3x3 {
    pub const IDENTITY: Self = Self {
        m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub const fn new(m: [[f64; 3]; 3]) -> Self {
        Self { m }
    }

    /// Build from nine values in row-major order (the stored project form)
    pub const fn from_row_major(v: [f64; 9]) -> Self {
        Self {
            m: [[v[0], v[1], v[2]], [v[3], v[4], v[5]], [v[6], v[7], v[8]]],
        }
    }

    pub const fn to_row_major(&self) -> [f64; 9] {
        let m = &self.m;
        [
            m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
        ]
    }

    pub const fn get(&self, row: usize, col: usize) -> f64 {
        self.m[row][col]
    }

    pub fn determinant(&self) -> f64 {
        let h = &self.m;
        h[0][0] * (h[1][1] * h[2][2] - h[1][2] * h[2][1])
            - h[0][1] * (h[1][0] * h[2][2] - h[1][2] * h[2][0])
            + h[0][2] * (h[1][0] * h[2][1] - h[1][1] * h[2][0])
    }

    /// Inverse via the adjugate
    pub fn inverse(&self) -> Result<Self> {
        let h = &self.m;
        let det = self.determinant();
        if !det.is_finite() || det.abs() < DETERMINANT_EPSILON {
            return Err(MappingError::NonInvertible { determinant: det });
        }

        let inv_det = 1.0 / det;
        Ok(Self::new([
            [
                (h[1][1] * h[2][2] - h[1][2] * h[2][1]) * inv_det,
                (h[0][2] * h[2][1] - h[0][1] * h[2][2]) * inv_det,
                (h[0][1] * h[1][2] - h[0][2] * h[1][1]) * inv_det,
            ],
            [
                (h[1][2] * h[2][0] - h[1][0] * h[2][2]) * inv_det,
                (h[0][0] * h[2][2] - h[0][2] * h[2][0]) * inv_det,
                (h[0][2] * h[1][0] - h[0][0] * h[1][2]) * inv_det,
            ],
            [
                (h[1][0] * h[2][1] - h[1][1] * h[2][0]) * inv_det,
                (h[0][1] * h[2][0] - h[0][0] * h[2][1]) * inv_det,
                (h[0][0] * h[1][1] - h[0][1] * h[1][0]) * inv_det,
            ],
        ]))
    }

    /// Scale so the bottom-right element is 1
    pub fn normalized(&self) -> Result<Self> {
        let scale = self.m[2][2];
        if !scale.is_finite() || scale.abs() < DETERMINANT_EPSILON {
            return Err(MappingError::NonInvertible { determinant: scale });
        }
        Ok(Self::new(self.m.map(|row| row.map(|v| v / scale))))
    }

    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|v| v.is_finite())
    }

    /// Max element-wise difference to another matrix
    pub fn max_abs_diff(&self, other: &Self) -> f64 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }

    pub fn to_dmat3(&self) -> DMat3 {
        let m = &self.m;
        DMat3::from_cols(
            DVec3::new(m[0][0], m[1][0], m[2][0]),
            DVec3::new(m[0][1], m[1][1], m[2][1]),
            DVec3::new(m[0][2], m[1][2], m[2][2]),
        )
    }

    pub fn from_dmat3(mat: DMat3) -> Self {
        Self::new([
            [mat.x_axis.x, mat.y_axis.x, mat.z_axis.x],
            [mat.x_axis.y, mat.y_axis.y, mat.z_axis.y],
            [mat.x_axis.z, mat.y_axis.z, mat.z_axis.z],
        ])
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut out = [[0.0_f64; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c] + a[r][2] * b[2][c];
            }
        }
        Self::new(out)
    }
}

impl From<DMat3> for Matrix3x3 {
    fn from(mat: DMat3) -> Self {
        Self::from_dmat3(mat)
    }
}

/// 4x4 transform stored column-major (`cols[c][r]`)
///
/// Matches the layout of GPU uniform buffers, Core Animation's
/// `CATransform3D` and CSS `matrix3d()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4x4 {
    pub cols: [[f64; 4]; 4],
}

impl Default for Matrix4x4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix4x4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const fn from_cols(cols: [[f64; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Element at `row`, `col` in the usual mathematical sense
    pub const fn get(&self, row: usize, col: usize) -> f64 {
        self.cols[col][row]
    }

    /// Multiply the column vector `(x, y, z, w)`
    pub fn transform(&self, v: [f64; 4]) -> [f64; 4] {
        let c = &self.cols;
        let mut out = [0.0_f64; 4];
        for (r, value) in out.iter_mut().enumerate() {
            *value = c[0][r] * v[0] + c[1][r] * v[1] + c[2][r] * v[2] + c[3][r] * v[3];
        }
        out
    }

    pub fn to_cols_array(&self) -> [f64; 16] {
        let mut out = [0.0_f64; 16];
        for (i, value) in self.cols.iter().flatten().enumerate() {
            out[i] = *value;
        }
        out
    }

    /// Single-precision columns for GPU uniforms
    pub fn to_f32_cols(&self) -> [[f32; 4]; 4] {
        self.cols.map(|col| col.map(|v| v as f32))
    }

    /// CSS `matrix3d(...)` value, column-major as the property expects
    pub fn to_css_matrix3d(&self) -> String {
        let values: Vec<String> = self.to_cols_array().iter().map(|v| v.to_string()).collect();
        format!("matrix3d({})", values.join(", "))
    }

    pub fn to_dmat4(&self) -> DMat4 {
        DMat4::from_cols_array_2d(&self.cols)
    }

    pub fn is_finite(&self) -> bool {
        self.cols.iter().flatten().all(|v| v.is_finite())
    }
}

impl From<DMat4> for Matrix4x4 {
    fn from(mat: DMat4) -> Self {
        Self::from_cols(mat.to_cols_array_2d())
    }
}
