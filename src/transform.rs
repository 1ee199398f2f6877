//! Position, rotation and scale for placing entities in a scene.
//!
//! [`Transform`] uses a builder pattern for ergonomic positioning:
//!
//! ```
//! use buildify::{Quaternionf, Transform, Vector3f};
//!
//! let transform = Transform::new()
//!     .position(Vector3f::new(0.0, 2.0, -5.0))
//!     .rotation(Quaternionf::from_axis_angle(Vector3f::new(0.0, 1.0, 0.0), 0.5))
//!     .uniform_scale(2.0);
//!
//! let positioned = Transform::from_position(Vector3f::new(1.0, 0.0, 0.0));
//! assert_eq!(positioned.scale, Vector3f::new(1.0, 1.0, 1.0));
//! ```

use crate::math::{Matrix4f, Quaternionf, Vector3f};
use serde::{Deserialize, Serialize};

/// Spatial placement of an entity.
///
/// No field is validated: zero or negative scale passes straight through to
/// [`to_matrix`](Transform::to_matrix).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in world units.
    pub position: Vector3f,
    /// Orientation as a unit quaternion.
    pub rotation: Quaternionf,
    /// Per-axis scale factors.
    pub scale: Vector3f,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3f::zero(),
            rotation: Quaternionf::identity(),
            scale: Vector3f::splat(1.0),
        }
    }
}

impl Transform {
    /// Creates a new identity transform (origin, no rotation, unit scale).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transform positioned at the given location.
    pub fn from_position(position: Vector3f) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the position (translation) component.
    pub fn position(mut self, position: Vector3f) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation component.
    pub fn rotation(mut self, rotation: Quaternionf) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    pub fn scale(mut self, scale: Vector3f) -> Self {
        self.scale = scale;
        self
    }

    /// Sets uniform scale on all axes.
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vector3f::splat(scale);
        self
    }

    /// Converts this transform to a 4×4 model matrix.
    ///
    /// Computed as `translation(position) * rotation.to_matrix() * scale(scale)`,
    /// two products in that order, so a point is scaled, then rotated, then
    /// translated. The matrix is rebuilt on every call.
    ///
    /// ```
    /// use buildify::{Transform, Vector3f, Vector4f};
    ///
    /// let t = Transform::from_position(Vector3f::new(1.0, 2.0, 3.0));
    /// let origin = t.to_matrix() * Vector4f::new(0.0, 0.0, 0.0, 1.0);
    /// assert_eq!(origin, Vector4f::new(1.0, 2.0, 3.0, 1.0));
    /// ```
    pub fn to_matrix(&self) -> Matrix4f {
        Matrix4f::translation(self.position)
            * self.rotation.to_matrix()
            * Matrix4f::scale(self.scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vector4f;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn default_is_identity() {
        assert_eq!(Transform::default().to_matrix(), Matrix4f::identity());
    }

    #[test]
    fn translation_maps_origin() {
        let t = Transform {
            position: Vector3f::new(1.0, 2.0, 3.0),
            rotation: Quaternionf::identity(),
            scale: Vector3f::new(1.0, 1.0, 1.0),
        };
        let p = t.to_matrix() * Vector4f::new(0.0, 0.0, 0.0, 1.0);
        assert_eq!(p, Vector4f::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn scale_is_applied_before_rotation() {
        // Scale X by 2 then rotate a quarter turn about Z: (1,0,0) -> (0,2,0).
        let t = Transform::new()
            .rotation(Quaternionf::from_axis_angle(Vector3f::new(0.0, 0.0, 1.0), FRAC_PI_2))
            .scale(Vector3f::new(2.0, 1.0, 1.0));
        let p = t.to_matrix() * Vector4f::new(1.0, 0.0, 0.0, 1.0);
        assert!(p.x.abs() < EPS);
        assert!((p.y - 2.0).abs() < EPS);
    }

    #[test]
    fn matches_glam_srt_composition() {
        let rotation = Quaternionf::from_axis_angle(Vector3f::new(0.0, 1.0, 0.0), 0.8);
        let t = Transform::new()
            .position(Vector3f::new(-3.0, 0.5, 7.0))
            .rotation(rotation)
            .scale(Vector3f::new(0.5, 2.0, 1.5));
        let theirs = glam::Mat4::from_scale_rotation_translation(
            t.scale.into(),
            t.rotation.into(),
            t.position.into(),
        );
        assert!(t.to_matrix().abs_diff_eq(&theirs.into(), EPS));
    }

    #[test]
    fn degenerate_scale_passes_through() {
        let t = Transform::new().uniform_scale(0.0);
        let p = t.to_matrix() * Vector4f::new(5.0, 5.0, 5.0, 1.0);
        assert_eq!(p, Vector4f::new(0.0, 0.0, 0.0, 1.0));

        let mirrored = Transform::new().scale(Vector3f::new(-1.0, 1.0, 1.0));
        let p = mirrored.to_matrix() * Vector4f::new(2.0, 0.0, 0.0, 1.0);
        assert_eq!(p.x, -2.0);
    }
}
