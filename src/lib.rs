//! # Buildify
//!
//! **Scene toolkit for 3D Gaussian Splatting.**
//!
//! A small linear-algebra layer, an entity/camera scene graph and an engine
//! loop, plus an accumulator for gaussian primitives with boundaries toward
//! rendering backends, tensor libraries and content tools.
//!
//! ## Quick Start
//!
//! ```
//! use buildify::*;
//!
//! // Scene graph
//! let mut scene = Scene::new("Main");
//! let camera = scene.create_entity(
//!     Entity::new_camera("Camera")
//!         .with_transform(Transform::from_position(Vector3f::new(0.0, 2.0, 10.0))),
//! );
//! scene.set_active_camera(&camera).unwrap();
//! scene.update(1.0 / 60.0);
//!
//! // Gaussian primitives
//! let mut context = Context::new();
//! context.initialize();
//! let gaussians = context.create_scene().unwrap();
//! for i in 0..100 {
//!     gaussians.borrow_mut().add_gaussian(Gaussian::at([i as f32, 0.0, 0.0]));
//! }
//! assert_eq!(gaussians.borrow().count(), 100);
//! ```
//!
//! ## Conventions
//!
//! - Matrices are row-major and multiply column vectors: `m * v`.
//! - Rotation angles are radians, except the field of view, which is degrees.
//! - Quaternions are stored `(x, y, z, w)` with `w` the scalar part.

mod camera;
mod config;
mod content_tool;
mod engine;
mod error;
mod gaussian;
mod logging;
pub mod math;
mod renderer;
pub mod scene;
mod tensor;
mod transform;

pub use camera::{Camera, OrthographicParams, PerspectiveParams, ProjectionMode};
pub use config::EngineConfig;
pub use content_tool::{BlenderBridge, ContentToolBridge};
pub use engine::{Engine, SceneRef};
pub use error::{BuildifyError, Result};
pub use gaussian::{Context, Gaussian, GaussianScene, GaussianSceneRef};
pub use logging::{
    LogLevel, Logger, MemoryLogger, SharedLogger, TracingLogger, default_logger,
};
pub use math::{
    Matrix4, Matrix4f, Quaternion, Quaternionf, Vector3, Vector3f, Vector4, Vector4f,
};
pub use renderer::{
    DEFAULT_CLEAR_COLOR, GlRenderer, NativeHandle, RenderTarget, Renderer, Viewport,
};
pub use scene::{Entity, EntityId, EntityKind, EntityRef, Scene, UpdateHook};
pub use tensor::{FlatArray, TensorBridge};
pub use transform::Transform;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const VERSION_MAJOR: u32 = 1;
pub const VERSION_MINOR: u32 = 0;
pub const VERSION_PATCH: u32 = 0;
