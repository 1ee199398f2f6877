//! Gaussian splat records and the accumulator scene that stores them.
//!
//! This is the lightweight data path: a [`Context`] hands out
//! [`GaussianScene`]s, which only collect [`Gaussian`] values. No transform or
//! camera machinery is involved. The tensor and content-tool boundaries
//! ([`TensorBridge`](crate::TensorBridge),
//! [`ContentToolBridge`](crate::ContentToolBridge)) operate on this type.
//!
//! # Example
//!
//! ```
//! use buildify::{Context, Gaussian};
//!
//! let mut context = Context::new();
//! context.initialize();
//!
//! let scene = context.create_scene().unwrap();
//! scene.borrow_mut().add_gaussian(Gaussian::at([1.0, 2.0, 3.0]));
//! assert_eq!(scene.borrow().count(), 1);
//! ```

use crate::error::{BuildifyError, Result};
use crate::logging::{SharedLogger, default_logger};
use std::cell::RefCell;
use std::fmt;
use std::path::Path;
use std::rc::Rc;

/// One splat: position, anisotropic scale, orientation and colour.
///
/// `#[repr(C)]` with fourteen packed `f32`s, so a slice of gaussians can be
/// viewed as a flat float buffer through `bytemuck`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Gaussian {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    /// Quaternion `(x, y, z, w)`.
    pub rotation: [f32; 4],
    /// RGBA.
    pub color: [f32; 4],
}

impl Gaussian {
    /// Number of floats in one record.
    pub const FLOATS: usize = 14;

    pub fn new(position: [f32; 3], scale: [f32; 3], rotation: [f32; 4], color: [f32; 4]) -> Self {
        Self {
            position,
            scale,
            rotation,
            color,
        }
    }

    /// A unit-scale, unrotated, opaque white gaussian at `position`.
    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }
}

impl Default for Gaussian {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            scale: [1.0; 3],
            rotation: [0.0, 0.0, 0.0, 1.0],
            color: [1.0; 4],
        }
    }
}

/// Ordered, by-value collection of gaussians.
pub struct GaussianScene {
    gaussians: Vec<Gaussian>,
    logger: SharedLogger,
}

/// Shared handle returned by [`Context::create_scene`].
pub type GaussianSceneRef = Rc<RefCell<GaussianScene>>;

impl GaussianScene {
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            gaussians: Vec::new(),
            logger,
        }
    }

    pub fn add_gaussian(&mut self, gaussian: Gaussian) {
        self.gaussians.push(gaussian);
    }

    pub fn extend(&mut self, gaussians: impl IntoIterator<Item = Gaussian>) {
        self.gaussians.extend(gaussians);
    }

    /// Number of stored gaussians.
    pub fn count(&self) -> usize {
        self.gaussians.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gaussians.is_empty()
    }

    /// Stored gaussians in insertion order.
    pub fn gaussians(&self) -> &[Gaussian] {
        &self.gaussians
    }

    /// Every gaussian as one flat float slice, [`Gaussian::FLOATS`] per record.
    pub fn parameters(&self) -> &[f32] {
        bytemuck::cast_slice(&self.gaussians)
    }

    /// Placeholder loss: `0.1` per gaussian.
    pub fn compute_rendering_loss(&self) -> f32 {
        0.1 * self.gaussians.len() as f32
    }

    /// Writing `.ply` splat files is an extension point; this always fails
    /// with [`BuildifyError::Unimplemented`].
    pub fn export_to_3dgs(&self, path: impl AsRef<Path>) -> Result<()> {
        self.logger.info(&format!(
            "Exporting {} gaussians to: {}",
            self.gaussians.len(),
            path.as_ref().display()
        ));
        Err(BuildifyError::Unimplemented("3DGS export"))
    }
}

impl Default for GaussianScene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GaussianScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaussianScene")
            .field("count", &self.gaussians.len())
            .finish()
    }
}

/// Entry point of the gaussian data path.
///
/// [`create_scene`](Context::create_scene) fails with
/// [`BuildifyError::NotInitialized`] until [`initialize`](Context::initialize)
/// has been called.
pub struct Context {
    initialized: bool,
    logger: SharedLogger,
}

impl Context {
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            initialized: false,
            logger,
        }
    }

    /// Enables [`create_scene`](Context::create_scene).
    pub fn initialize(&mut self) {
        self.initialized = true;
        self.logger.debug("Context initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn create_scene(&self) -> Result<GaussianSceneRef> {
        if !self.initialized {
            return Err(BuildifyError::NotInitialized("Context"));
        }
        Ok(Rc::new(RefCell::new(GaussianScene::with_logger(Rc::clone(
            &self.logger,
        )))))
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
