//! Row-major 4×4 matrices.

use super::vector::{Vector3, Vector4};
use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A 4×4 matrix stored row-major: `m[row][column]`.
///
/// Points are column vectors, so translation lives in the last column and
/// `a * b` applies `b` first. The default value is the identity.
///
/// # Units
///
/// The axis rotation factories ([`rotation_x`](Matrix4::rotation_x) and
/// friends) take **radians**, while [`perspective`](Matrix4::perspective)
/// takes its field of view in **degrees**. Both conventions are part of the
/// public contract; convert at the call site.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix4<T = f32> {
    pub m: [[T; 4]; 4],
}

impl<T: Num + Copy> Default for Matrix4<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Num + Copy> Matrix4<T> {
    pub fn identity() -> Self {
        let o = T::one();
        let z = T::zero();
        Self {
            m: [[o, z, z, z], [z, o, z, z], [z, z, o, z], [z, z, z, o]],
        }
    }

    pub fn from_rows(m: [[T; 4]; 4]) -> Self {
        Self { m }
    }

    pub fn translation(v: Vector3<T>) -> Self {
        let mut result = Self::identity();
        result.m[0][3] = v.x;
        result.m[1][3] = v.y;
        result.m[2][3] = v.z;
        result
    }

    pub fn scale(v: Vector3<T>) -> Self {
        let mut result = Self::identity();
        result.m[0][0] = v.x;
        result.m[1][1] = v.y;
        result.m[2][2] = v.z;
        result
    }

    pub fn transpose(&self) -> Self {
        let mut result = *self;
        for (i, row) in result.m.iter_mut().enumerate() {
            for (j, value) in row.iter_mut().enumerate() {
                *value = self.m[j][i];
            }
        }
        result
    }
}

impl<T: Float> Matrix4<T> {
    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[1][1] = c;
        result.m[1][2] = -s;
        result.m[2][1] = s;
        result.m[2][2] = c;
        result
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][2] = s;
        result.m[2][0] = -s;
        result.m[2][2] = c;
        result
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let mut result = Self::identity();
        result.m[0][0] = c;
        result.m[0][1] = -s;
        result.m[1][0] = s;
        result.m[1][1] = c;
        result
    }

    /// OpenGL-style perspective projection.
    ///
    /// `fov` is the vertical field of view in **degrees** (unlike the axis
    /// rotations, which take radians). Depth is mapped to `[-1, 1]` clip space
    /// and `w` receives `-z` for the perspective divide.
    ///
    /// ```
    /// use buildify::Matrix4f;
    ///
    /// let p = Matrix4f::perspective(90.0, 1.0, 0.1, 100.0);
    /// assert!((p.m[0][0] - 1.0).abs() < 1e-6);
    /// assert_eq!(p.m[3][2], -1.0);
    /// assert_eq!(p.m[3][3], 0.0);
    /// ```
    pub fn perspective(fov: T, aspect: T, near: T, far: T) -> Self {
        let two = T::one() + T::one();
        let tan_half_fov = (fov.to_radians() / two).tan();

        let mut result = Self::identity();
        result.m[0][0] = T::one() / (aspect * tan_half_fov);
        result.m[1][1] = T::one() / tan_half_fov;
        result.m[2][2] = -(far + near) / (far - near);
        result.m[2][3] = -(two * far * near) / (far - near);
        result.m[3][2] = -T::one();
        result.m[3][3] = T::zero();
        result
    }

    /// True if every element differs from `other` by at most `epsilon`.
    pub fn abs_diff_eq(&self, other: &Self, epsilon: T) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (*a - *b).abs() <= epsilon)
    }
}

impl<T: Num + Copy> Mul for Matrix4<T> {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut result = Self {
            m: [[T::zero(); 4]; 4],
        };
        for i in 0..4 {
            for j in 0..4 {
                let mut sum = T::zero();
                for k in 0..4 {
                    sum = sum + self.m[i][k] * other.m[k][j];
                }
                result.m[i][j] = sum;
            }
        }
        result
    }
}

impl<T: Num + Copy> Mul<Vector4<T>> for Matrix4<T> {
    type Output = Vector4<T>;

    fn mul(self, v: Vector4<T>) -> Vector4<T> {
        let row = |r: [T; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vector4::new(row(self.m[0]), row(self.m[1]), row(self.m[2]), row(self.m[3]))
    }
}

impl From<Matrix4<f32>> for glam::Mat4 {
    fn from(matrix: Matrix4<f32>) -> Self {
        // glam is column-major; rows read as columns give the transpose.
        glam::Mat4::from_cols_array_2d(&matrix.m).transpose()
    }
}

impl From<glam::Mat4> for Matrix4<f32> {
    fn from(matrix: glam::Mat4) -> Self {
        Self {
            m: matrix.transpose().to_cols_array_2d(),
        }
    }
}
