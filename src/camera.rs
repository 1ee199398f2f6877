//! Camera projection parameters and view/projection derivation.
//!
//! A [`Camera`] only stores how it projects. Where it sits and which way it
//! faces come from the [`Transform`] of the entity that carries it, so the
//! view matrix is always derived from that transform.

use crate::math::{Matrix4f, Vector3f, Vector4f};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};

/// Which parameter set [`Camera::projection_matrix`] reads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectionMode {
    #[default]
    Perspective,
    Orthographic,
}

/// Perspective frustum parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveParams {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveParams {
    fn default() -> Self {
        Self {
            fov: 45.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// Orthographic box parameters. The default is the unit cube `[-1, 1]³`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrthographicParams {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthographicParams {
    fn default() -> Self {
        Self {
            left: -1.0,
            right: 1.0,
            bottom: -1.0,
            top: 1.0,
            near: -1.0,
            far: 1.0,
        }
    }
}

/// Projection state of a camera entity.
///
/// Both parameter sets are kept. Switching modes with
/// [`set_perspective`](Camera::set_perspective) or
/// [`set_orthographic`](Camera::set_orthographic) is always allowed and only
/// overwrites the set being switched to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    mode: ProjectionMode,
    perspective: PerspectiveParams,
    orthographic: OrthographicParams,
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switches to perspective projection. `fov` is in degrees.
    pub fn set_perspective(&mut self, fov: f32, aspect_ratio: f32, near: f32, far: f32) {
        self.mode = ProjectionMode::Perspective;
        self.perspective = PerspectiveParams {
            fov,
            aspect_ratio,
            near,
            far,
        };
    }

    /// Switches to orthographic projection.
    pub fn set_orthographic(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) {
        self.mode = ProjectionMode::Orthographic;
        self.orthographic = OrthographicParams {
            left,
            right,
            bottom,
            top,
            near,
            far,
        };
    }

    /// Projection mode read by [`projection_matrix`](Camera::projection_matrix).
    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Stored perspective parameters, kept even while orthographic.
    pub fn perspective_params(&self) -> &PerspectiveParams {
        &self.perspective
    }

    /// Stored orthographic parameters, kept even while perspective.
    pub fn orthographic_params(&self) -> &OrthographicParams {
        &self.orthographic
    }

    /// World-to-camera matrix for a camera placed by `transform`.
    ///
    /// The transform's rotation is applied to the canonical forward `(0,0,-1)`
    /// and up `(0,1,0)`. The basis is then re-orthogonalized
    /// (`right = forward × up`, `up = right × forward`, both normalized) so a
    /// drifting rotation still yields an orthonormal view. Rows are
    /// `(right, up, -forward)` with the position folded into the last column.
    /// Scale is ignored.
    pub fn view_matrix(&self, transform: &Transform) -> Matrix4f {
        let rotation = transform.rotation.to_matrix();
        let forward = (rotation * Vector4f::new(0.0, 0.0, -1.0, 0.0)).truncate();
        let up = (rotation * Vector4f::new(0.0, 1.0, 0.0, 0.0)).truncate();

        let right = forward.cross(up).normalized();
        let up = right.cross(forward).normalized();

        basis_matrix(right, up, forward, transform.position)
    }

    /// Camera-to-clip matrix for the active projection mode.
    pub fn projection_matrix(&self) -> Matrix4f {
        match self.mode {
            ProjectionMode::Perspective => {
                let p = &self.perspective;
                Matrix4f::perspective(p.fov, p.aspect_ratio, p.near, p.far)
            }
            ProjectionMode::Orthographic => {
                let o = &self.orthographic;
                let mut ortho = Matrix4f::identity();
                ortho.m[0][0] = 2.0 / (o.right - o.left);
                ortho.m[1][1] = 2.0 / (o.top - o.bottom);
                ortho.m[2][2] = -2.0 / (o.far - o.near);
                ortho.m[0][3] = -(o.right + o.left) / (o.right - o.left);
                ortho.m[1][3] = -(o.top + o.bottom) / (o.top - o.bottom);
                ortho.m[2][3] = -(o.far + o.near) / (o.far - o.near);
                ortho
            }
        }
    }

    /// Builds the rotation that would aim a camera at `position` toward
    /// `target`.
    ///
    /// The camera's transform is not modified: the basis is computed and
    /// returned as a rotation matrix with rows `(right, up, -forward)`, and it
    /// is up to the caller to apply it. A target equal to the position yields
    /// a zero basis instead of failing.
    pub fn look_at(&self, position: Vector3f, target: Vector3f, up: Vector3f) -> Matrix4f {
        let forward = (target - position).normalized();
        let right = forward.cross(up).normalized();
        let new_up = right.cross(forward);

        basis_matrix(right, new_up, forward, Vector3f::zero())
    }
}

fn basis_matrix(right: Vector3f, up: Vector3f, forward: Vector3f, eye: Vector3f) -> Matrix4f {
    Matrix4f::from_rows([
        [right.x, right.y, right.z, -right.dot(eye)],
        [up.x, up.y, up.z, -up.dot(eye)],
        [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ])
}
