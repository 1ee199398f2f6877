//! Scene graph: named entities with transforms, grouped into scenes.
//!
//! # Overview
//!
//! - [`Entity`] is a named object owning one [`Transform`](crate::Transform),
//!   optionally carrying [`Camera`](crate::Camera) parameters and a per-tick
//!   update hook.
//! - [`Scene`] holds entities through shared [`EntityRef`] handles, keeps
//!   their insertion order, and designates one camera entity as active.
//! - Scenes can be written to and read from JSON documents with
//!   [`Scene::save_to_file`] and [`Scene::load_from_file`].
//!
//! # Example
//!
//! ```
//! use buildify::*;
//!
//! let mut scene = Scene::new("Main");
//! let camera = scene.create_entity(
//!     Entity::new_camera("Camera")
//!         .with_transform(Transform::from_position(Vector3f::new(0.0, 0.0, 5.0))),
//! );
//! scene.set_active_camera(&camera).unwrap();
//!
//! let active = scene.active_camera().unwrap();
//! let view = active.borrow().view_matrix().unwrap();
//! let origin = view * Vector4f::new(0.0, 0.0, 0.0, 1.0);
//! assert!((origin.z + 5.0).abs() < 1e-6);
//! ```

mod entity;
mod persist;
#[allow(clippy::module_inception)]
mod scene;

pub use entity::{Entity, EntityId, EntityKind, EntityRef, UpdateHook};
pub use scene::Scene;
