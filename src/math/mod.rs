//! Linear algebra for scene transforms and cameras.
//!
//! Everything here is a pure function of its inputs. Nothing fails; NaN and
//! infinity propagate through the usual IEEE-754 rules.
//!
//! - [`Vector3`] and [`Vector4`] for positions, directions and homogeneous points
//! - [`Quaternion`] for rotations
//! - [`Matrix4`] for row-major 4×4 transforms and projections
//!
//! Types are generic over the scalar; the `*f` aliases fix it to `f32`, which
//! is what [`Transform`](crate::Transform) and [`Camera`](crate::Camera) use.
//! Every `f32` type converts to and from its `glam` counterpart.

mod matrix;
mod quaternion;
mod vector;

pub use matrix::Matrix4;
pub use quaternion::Quaternion;
pub use vector::{Vector3, Vector4};

pub type Vector3f = Vector3<f32>;
pub type Vector4f = Vector4<f32>;
pub type Matrix4f = Matrix4<f32>;
pub type Quaternionf = Quaternion<f32>;
