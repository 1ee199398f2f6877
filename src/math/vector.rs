//! Three and four component vectors.

use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// A 3D vector.
///
/// Arithmetic is available for any numeric scalar. [`length`](Vector3::length)
/// and [`normalized`](Vector3::normalized) need a floating point scalar.
///
/// # Example
///
/// ```
/// use buildify::Vector3f;
///
/// let x = Vector3f::new(1.0, 0.0, 0.0);
/// let y = Vector3f::new(0.0, 1.0, 0.0);
/// assert_eq!(x.cross(y), Vector3f::new(0.0, 0.0, 1.0));
/// assert_eq!(Vector3f::zero().normalized(), Vector3f::zero());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3<T = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Num + Copy> Vector3<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn splat(v: T) -> Self {
        Self::new(v, v, v)
    }

    pub fn dot(self, other: Self) -> T {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product.
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Extends this vector to homogeneous coordinates.
    pub fn extend(self, w: T) -> Vector4<T> {
        Vector4::from_vector3(self, w)
    }
}

impl<T: Float> Vector3<T> {
    /// Euclidean length.
    pub fn length(self) -> T {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Unit-length copy of this vector.
    ///
    /// A zero-length vector (or one whose length is NaN) yields the zero
    /// vector instead of dividing by zero.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > T::zero() {
            self * (T::one() / len)
        } else {
            Self::zero()
        }
    }
}

impl<T: Num + Copy> Add for Vector3<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Num + Copy> Sub for Vector3<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Num + Copy> Mul<T> for Vector3<T> {
    type Output = Self;

    fn mul(self, scalar: T) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl<T: Num + Copy + Neg<Output = T>> Neg for Vector3<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl<T: fmt::Display> fmt::Display for Vector3<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl<T: Copy> From<[T; 3]> for Vector3<T> {
    fn from(v: [T; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }
}

impl<T> From<Vector3<T>> for [T; 3] {
    fn from(v: Vector3<T>) -> Self {
        [v.x, v.y, v.z]
    }
}

impl From<glam::Vec3> for Vector3<f32> {
    fn from(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f32>> for glam::Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        glam::Vec3::new(v.x, v.y, v.z)
    }
}

/// A 4D vector, used for homogeneous coordinates in matrix products.
///
/// The default value is all zeros, including `w`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector4<T = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T: Num + Copy> Vector4<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    /// Builds `(v.x, v.y, v.z, w)`. Use `w = 1` for points and `w = 0` for
    /// directions.
    pub fn from_vector3(v: Vector3<T>, w: T) -> Self {
        Self::new(v.x, v.y, v.z, w)
    }

    /// Drops the `w` component without dividing by it.
    pub fn truncate(self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<glam::Vec4> for Vector4<f32> {
    fn from(v: glam::Vec4) -> Self {
        Self::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4<f32>> for glam::Vec4 {
    fn from(v: Vector4<f32>) -> Self {
        glam::Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-6;

    #[test]
    fn normalized_has_unit_length() {
        let samples = [
            Vector3::new(3.0f32, 4.0, 0.0),
            Vector3::new(-1.0, 2.0, -3.0),
            Vector3::new(1e-3, 0.0, 0.0),
            Vector3::new(250.0, -75.5, 12.25),
        ];
        for v in samples {
            assert!((v.normalized().length() - 1.0).abs() < EPS, "{v}");
        }
    }

    #[test]
    fn normalized_zero_vector_is_zero() {
        assert_eq!(Vector3::<f32>::zero().normalized(), Vector3::zero());
        assert_eq!(Vector3::<f64>::zero().normalized(), Vector3::zero());
    }

    #[test]
    fn cross_is_anticommutative() {
        let pairs = [
            (Vector3::new(1.0f32, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-4.0, 5.0, 0.5)),
            (Vector3::new(0.0, 0.0, 0.0), Vector3::new(7.0, 8.0, 9.0)),
        ];
        for (a, b) in pairs {
            assert_eq!(a.cross(b), -b.cross(a));
        }
    }

    #[test]
    fn cross_is_right_handed() {
        let x = Vector3::new(1, 0, 0);
        let y = Vector3::new(0, 1, 0);
        assert_eq!(x.cross(y), Vector3::new(0, 0, 1));
    }

    #[test]
    fn integer_vectors_support_arithmetic() {
        let a = Vector3::new(1i32, 2, 3);
        let b = Vector3::new(4i32, 5, 6);
        assert_eq!(a + b, Vector3::new(5, 7, 9));
        assert_eq!(b - a, Vector3::new(3, 3, 3));
        assert_eq!(a * 2, Vector3::new(2, 4, 6));
        assert_eq!(a.dot(b), 32);
    }

    #[test]
    fn length_is_euclidean() {
        assert!((Vector3::new(3.0f32, 4.0, 12.0).length() - 13.0).abs() < EPS);
    }

    #[test]
    fn extend_and_truncate() {
        let v = Vector3::new(1.0f32, 2.0, 3.0);
        let h = v.extend(1.0);
        assert_eq!(h, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(h.truncate(), v);
        assert_eq!(Vector4::<f32>::default().w, 0.0);
    }

    #[test]
    fn glam_conversions_preserve_components() {
        let v = Vector3::new(1.0f32, -2.0, 3.5);
        let g: glam::Vec3 = v.into();
        assert_eq!(g, glam::Vec3::new(1.0, -2.0, 3.5));
        assert_eq!(Vector3::from(g), v);
    }
}
