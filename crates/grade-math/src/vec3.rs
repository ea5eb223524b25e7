//! Three-component color triplet.
//!
//! [`Vec3`] carries RGB, XYZ, LMS or OkLab values through the grading
//! pipeline. Component-wise operators follow shader semantics so the
//! pipeline code reads like the GPU code it replaces.
//!
//! # Usage
//!
//! ```rust
//! use grade_math::Vec3;
//!
//! let rgb = Vec3::new(1.0, 0.5, 0.25);
//! let graded = (rgb * 2.0).max(Vec3::ZERO).clamp01();
//! assert_eq!(graded.x, 1.0);
//! ```

use std::ops::{Add, AddAssign, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// A color triplet (RGB, XYZ, LMS, Lab).
///
/// For RGB: x=R, y=G, z=B. For XYZ: x=X, y=Y, z=Z. For Lab: x=L, y=a, z=b.
/// Serializes as a three-element sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f32; 3]", into = "[f32; 3]"))]
#[repr(C)]
pub struct Vec3 {
    /// First component (R, X, L)
    pub x: f32,
    /// Second component (G, Y, a)
    pub y: f32,
    /// Third component (B, Z, b)
    pub z: f32,
}

impl Vec3 {
    /// (0, 0, 0)
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// (1, 1, 1)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);
    /// (1, 0, 0)
    pub const X: Self = Self::new(1.0, 0.0, 0.0);
    /// (0, 1, 0)
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);
    /// (0, 0, 1)
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new triplet.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a gray triplet with all components equal.
    ///
    /// ```rust
    /// use grade_math::Vec3;
    ///
    /// assert_eq!(Vec3::splat(0.18), Vec3::new(0.18, 0.18, 0.18));
    /// ```
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product. With a set of luminance weights this is the luminance.
    #[inline]
    pub const fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Component-wise product, usable in `const` context.
    #[inline]
    pub const fn mul_elem(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// Component-wise quotient, usable in `const` context.
    #[inline]
    pub const fn div_elem(self, other: Self) -> Self {
        Self::new(self.x / other.x, self.y / other.y, self.z / other.z)
    }

    /// Applies `f` to every component.
    #[inline]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamps each component to [0, 1] (shader `saturate`).
    #[inline]
    pub fn clamp01(self) -> Self {
        self.min(Self::ONE).max(Self::ZERO)
    }

    /// Clamps each component to `[lo, hi]`.
    #[inline]
    pub fn clamp_scalar(self, lo: f32, hi: f32) -> Self {
        self.map(|c| c.clamp(lo, hi))
    }

    /// Component-wise absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        self.map(f32::abs)
    }

    /// Raises each component to `exp`.
    #[inline]
    pub fn powf(self, exp: f32) -> Self {
        self.map(|c| c.powf(exp))
    }

    /// Raises each component to the matching component of `exp`.
    #[inline]
    pub fn pow(self, exp: Self) -> Self {
        Self::new(self.x.powf(exp.x), self.y.powf(exp.y), self.z.powf(exp.z))
    }

    /// Linear interpolation, `t = 0` gives `self`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Smallest component.
    #[inline]
    pub fn min_element(self) -> f32 {
        self.x.min(self.y).min(self.z)
    }

    /// Largest component.
    #[inline]
    pub fn max_element(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    /// True when every component lies in `[lo, hi]`.
    #[inline]
    pub fn all_within(self, lo: f32, hi: f32) -> bool {
        (lo..=hi).contains(&self.x) && (lo..=hi).contains(&self.y) && (lo..=hi).contains(&self.z)
    }

    /// True when no component is NaN or infinite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to glam Vec3.
    #[inline]
    pub fn to_glam(self) -> ::glam::Vec3 {
        ::glam::Vec3::new(self.x, self.y, self.z)
    }

    /// Creates from glam Vec3.
    #[inline]
    pub fn from_glam(v: ::glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {}", i),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Add<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: f32) -> Self {
        Self::new(self.x + rhs, self.y + rhs, self.z + rhs)
    }
}

impl AddAssign for Vec3 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Sub<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: f32) -> Self {
        Self::new(self.x - rhs, self.y - rhs, self.z - rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_elem(rhs)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl MulAssign<f32> for Vec3 {
    #[inline]
    fn mul_assign(&mut self, rhs: f32) {
        *self = *self * rhs;
    }
}

impl Div for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        self.div_elem(rhs)
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn div(self, rhs: f32) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> [f32; 3] {
        v.to_array()
    }
}

impl From<::glam::Vec3> for Vec3 {
    #[inline]
    fn from(v: ::glam::Vec3) -> Self {
        Self::from_glam(v)
    }
}

impl From<Vec3> for ::glam::Vec3 {
    #[inline]
    fn from(v: Vec3) -> ::glam::Vec3 {
        v.to_glam()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_dot() {
        let rec709 = Vec3::new(0.2126730, 0.7151520, 0.0721750);
        assert!((Vec3::ONE.dot(rec709) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp01() {
        let v = Vec3::new(-0.5, 0.5, 1.5).clamp01();
        assert_eq!(v, Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_all_within() {
        assert!(Vec3::new(-0.03, 0.5, 1.03).all_within(-0.03, 1.03));
        assert!(!Vec3::new(-0.031, 0.5, 1.0).all_within(-0.03, 1.03));
        assert!(!Vec3::new(f32::NAN, 0.5, 1.0).all_within(-0.03, 1.03));
    }

    #[test]
    fn test_const_elementwise() {
        const Q: Vec3 = Vec3::new(1.0, 4.0, 9.0).div_elem(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Q, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_glam_roundtrip() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(Vec3::from(v.to_glam()), v);
    }
}
