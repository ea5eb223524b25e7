//! 3x3 matrix for linear color transforms.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | r |   | m00*r + m01*g + m02*b |
//! | m10 m11 m12 | * | g | = | m10*r + m11*g + m12*b |
//! | m20 m21 m22 |   | b |   | m20*r + m21*g + m22*b |
//! ```
//!
//! Construction, products and inversion are `const fn` so named color
//! matrices and their compositions can live in `const` items.

use crate::Vec3;
use std::ops::{Index, Mul};

/// A 3x3 color space matrix.
///
/// # Example
///
/// ```rust
/// use grade_math::{Mat3, Vec3};
///
/// let m = Mat3::diagonal(2.0, 1.0, 0.5);
/// assert_eq!(m * Vec3::ONE, Vec3::new(2.0, 1.0, 0.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Elements in row-major order: [row0, row1, row2]
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays (transposed internally).
    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0]],
                [cols[0][1], cols[1][1], cols[2][1]],
                [cols[0][2], cols[1][2], cols[2][2]],
            ],
        }
    }

    /// Creates a matrix whose rows are the given vectors.
    #[inline]
    pub const fn from_row_vecs(r0: Vec3, r1: Vec3, r2: Vec3) -> Self {
        Self::from_rows([r0.to_array(), r1.to_array(), r2.to_array()])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Creates a diagonal matrix from a vector, e.g. a von Kries gain.
    #[inline]
    pub const fn from_diagonal(d: Vec3) -> Self {
        Self::diagonal(d.x, d.y, d.z)
    }

    /// Returns a row as Vec3.
    #[inline]
    pub const fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub const fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns the transpose.
    #[inline]
    pub const fn transpose(&self) -> Self {
        Self::from_cols(self.m)
    }

    /// Computes the determinant.
    #[inline]
    pub const fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverts a matrix known to be non-singular.
    ///
    /// Intended for `const` items built from well-conditioned color
    /// matrices. A singular input yields non-finite elements; use
    /// [`Mat3::inverse`] when singularity is possible.
    pub const fn inverted(&self) -> Self {
        let m = &self.m;
        let inv_det = 1.0 / self.determinant();
        Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ])
    }

    /// Computes the inverse, or `None` for a singular matrix.
    ///
    /// ```rust
    /// use grade_math::Mat3;
    ///
    /// assert!(Mat3::diagonal(2.0, 4.0, 8.0).inverse().is_some());
    /// assert!(Mat3::ZERO.inverse().is_none());
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        if self.determinant().abs() < 1e-10 {
            return None;
        }
        Some(self.inverted())
    }

    /// Transforms a column vector, equivalent to `self * v`.
    #[inline]
    pub const fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            self.m[0][0] * v.x + self.m[0][1] * v.y + self.m[0][2] * v.z,
            self.m[1][0] * v.x + self.m[1][1] * v.y + self.m[1][2] * v.z,
            self.m[2][0] * v.x + self.m[2][1] * v.y + self.m[2][2] * v.z,
        )
    }

    /// Matrix product `self * other`: applies `other` first, then `self`.
    #[inline]
    pub const fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        let mut i = 0;
        while i < 3 {
            let mut j = 0;
            while j < 3 {
                result.m[i][j] = self.m[i][0] * other.m[0][j]
                    + self.m[i][1] * other.m[1][j]
                    + self.m[i][2] * other.m[2][j];
                j += 1;
            }
            i += 1;
        }
        result
    }

    /// Scales every element.
    #[inline]
    pub const fn scaled(&self, s: f32) -> Self {
        let m = &self.m;
        Self::from_rows([
            [m[0][0] * s, m[0][1] * s, m[0][2] * s],
            [m[1][0] * s, m[1][1] * s, m[1][2] * s],
            [m[2][0] * s, m[2][1] * s, m[2][2] * s],
        ])
    }

    /// Largest absolute element difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// True if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to glam Mat3 (column-major).
    #[inline]
    pub fn to_glam(&self) -> ::glam::Mat3 {
        ::glam::Mat3::from_cols_array_2d(&self.transpose().m)
    }

    /// Creates from glam Mat3.
    #[inline]
    pub fn from_glam(m: ::glam::Mat3) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Mul<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        self.scaled(rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f32; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: Mat3 = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_mat3_transpose() {
        let t = SAMPLE.transpose();
        assert_eq!(t.m[0][1], 0.0);
        assert_eq!(t.m[1][0], 2.0);
        assert_eq!(t.m[2][0], 3.0);
    }

    #[test]
    fn test_mat3_determinant() {
        assert!((SAMPLE.determinant() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_mat3_const_inverse() {
        const INV: Mat3 = SAMPLE.inverted();
        const PRODUCT: Mat3 = SAMPLE.mul_mat(&INV);
        assert!(PRODUCT.max_abs_diff(&Mat3::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_mat3_product_order() {
        // scale first, then swap red and green
        let scale = Mat3::diagonal(2.0, 3.0, 4.0);
        let swap = Mat3::from_rows([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let v = Vec3::new(1.0, 1.0, 1.0);
        assert_eq!(swap.mul_mat(&scale) * v, swap * (scale * v));
        assert_eq!(swap.mul_mat(&scale) * v, Vec3::new(3.0, 2.0, 4.0));
    }

    #[test]
    fn test_mat3_glam_roundtrip() {
        assert_eq!(Mat3::from_glam(SAMPLE.to_glam()), SAMPLE);
    }
}
