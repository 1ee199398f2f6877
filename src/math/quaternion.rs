//! Rotation quaternions.

use super::matrix::Matrix4;
use super::vector::Vector3;
use num_traits::{Float, Num};
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// A rotation quaternion `(x, y, z, w)` with `w` as the scalar part.
///
/// The default value is the identity rotation `(0, 0, 0, 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Quaternion<T = f32> {
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T: Num + Copy> Default for Quaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Num + Copy> Quaternion<T> {
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::one())
    }

    /// Equivalent rotation-only matrix.
    ///
    /// Only the upper 3×3 block is written; the translation column and bottom
    /// row stay as in the identity. The formula assumes a unit quaternion.
    pub fn to_matrix(&self) -> Matrix4<T> {
        let one = T::one();
        let two = one + one;

        let xx = self.x * self.x;
        let xy = self.x * self.y;
        let xz = self.x * self.z;
        let xw = self.x * self.w;
        let yy = self.y * self.y;
        let yz = self.y * self.z;
        let yw = self.y * self.w;
        let zz = self.z * self.z;
        let zw = self.z * self.w;

        let mut result = Matrix4::identity();

        result.m[0][0] = one - two * (yy + zz);
        result.m[0][1] = two * (xy - zw);
        result.m[0][2] = two * (xz + yw);

        result.m[1][0] = two * (xy + zw);
        result.m[1][1] = one - two * (xx + zz);
        result.m[1][2] = two * (yz - xw);

        result.m[2][0] = two * (xz - yw);
        result.m[2][1] = two * (yz + xw);
        result.m[2][2] = one - two * (xx + yy);

        result
    }
}

impl<T: Float> Quaternion<T> {
    /// Rotation of `angle` radians about `axis`.
    ///
    /// The axis is used as given; pass a unit vector; it is not renormalized.
    pub fn from_axis_angle(axis: Vector3<T>, angle: T) -> Self {
        let half_angle = angle / (T::one() + T::one());
        let (s, c) = half_angle.sin_cos();
        Self::new(axis.x * s, axis.y * s, axis.z * s, c)
    }
}

/// Hamilton product: `a * b` applies `b` first, then `a`.
impl<T: Num + Copy> Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, b: Self) -> Self {
        let a = self;
        Self::new(
            a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        )
    }
}

impl From<glam::Quat> for Quaternion<f32> {
    fn from(q: glam::Quat) -> Self {
        Self::new(q.x, q.y, q.z, q.w)
    }
}

impl From<Quaternion<f32>> for glam::Quat {
    fn from(q: Quaternion<f32>) -> Self {
        glam::Quat::from_xyzw(q.x, q.y, q.z, q.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector4;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn product_composes_rotations_like_glam() {
        let a = Quaternion::from_axis_angle(Vector3::new(0.0f32, 1.0, 0.0), 0.7);
        let b = Quaternion::from_axis_angle(Vector3::new(1.0f32, 0.0, 0.0), -1.2);
        let ours = glam::Quat::from(a * b);
        let theirs = glam::Quat::from(a) * glam::Quat::from(b);
        assert!(ours.abs_diff_eq(theirs, EPS));

        let id = Quaternion::identity();
        assert_eq!(a * id, a);
        assert_eq!(id * a, a);
    }

    #[test]
    fn identity_quaternion_gives_identity_matrix() {
        assert_eq!(Quaternion::<f32>::identity().to_matrix(), Matrix4::identity());
        assert_eq!(Quaternion::<f64>::default().to_matrix(), Matrix4::identity());
    }

    #[test]
    fn axis_angle_about_z_rotates_x_onto_y() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0f32, 0.0, 1.0), FRAC_PI_2);
        let v = q.to_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert!(v.x.abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
        assert!(v.z.abs() < EPS);
    }

    #[test]
    fn axis_is_not_renormalized() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0f32, 2.0, 0.0), PI);
        assert!((q.y - 2.0).abs() < EPS);
    }

    #[test]
    fn to_matrix_matches_glam_for_unit_quaternions() {
        let axis = Vector3::new(1.0f32, -2.0, 0.5).normalized();
        for angle in [0.1f32, 1.0, 2.5, -0.75] {
            let q = Quaternion::from_axis_angle(axis, angle);
            let theirs = glam::Mat4::from_quat(q.into());
            assert!(q.to_matrix().abs_diff_eq(&theirs.into(), EPS));
        }
    }

    #[test]
    fn to_matrix_has_no_translation() {
        let q = Quaternion::from_axis_angle(Vector3::new(0.0f32, 1.0, 0.0), 1.2);
        let m = q.to_matrix();
        assert_eq!([m.m[0][3], m.m[1][3], m.m[2][3]], [0.0, 0.0, 0.0]);
        assert_eq!(m.m[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
