//! Render target description and the renderer extension point.
//!
//! [`Renderer`] is the seam a real GPU backend plugs into. [`GlRenderer`] is
//! the built-in stand-in: it keeps track of the frame lifecycle, viewport and
//! clear colour, and computes the active camera's view-projection matrix for
//! each rendered scene, but issues no draw calls.

use crate::error::{BuildifyError, Result};
use crate::logging::{SharedLogger, default_logger};
use crate::math::Matrix4f;
use crate::scene::Scene;
use serde::Deserialize;

/// Opaque platform surface handle (window, GL context, ...) passed through to
/// the backend untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NativeHandle(pub usize);

/// Size and sampling of the surface a renderer draws into.
///
/// Deserializable so it can sit in a config file; the native handle is
/// runtime-only and never read from config.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    pub samples: u32,
    #[serde(skip)]
    pub native_handle: Option<NativeHandle>,
}

impl Default for RenderTarget {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            samples: 1,
            native_handle: None,
        }
    }
}

impl RenderTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn native_handle(mut self, handle: NativeHandle) -> Self {
        self.native_handle = Some(handle);
        self
    }
}

/// Pixel rectangle rendered into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Opaque black, the conventional clear colour.
pub const DEFAULT_CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// A rendering backend.
///
/// Frame calls made before [`initialize`](Renderer::initialize) fail with
/// [`BuildifyError::NotInitialized`].
pub trait Renderer {
    fn initialize(&mut self, target: &RenderTarget) -> Result<()>;

    /// Releases backend resources. Calling it twice is harmless.
    fn shutdown(&mut self);

    fn is_initialized(&self) -> bool;

    fn begin_frame(&mut self) -> Result<()>;

    fn end_frame(&mut self) -> Result<()>;

    /// Draws `scene` from its active camera. A scene without one is skipped
    /// with a warning, not an error.
    fn render_scene(&mut self, scene: &Scene) -> Result<()>;

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);

    /// Clears colour and depth. Pass [`DEFAULT_CLEAR_COLOR`] for black.
    fn clear(&mut self, color: [f32; 4]);
}

/// Stand-in OpenGL renderer. See the [module docs](self).
pub struct GlRenderer {
    target: Option<RenderTarget>,
    viewport: Viewport,
    clear_color: [f32; 4],
    in_frame: bool,
    frames_rendered: u64,
    last_view_projection: Option<Matrix4f>,
    logger: SharedLogger,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self {
            target: None,
            viewport: Viewport::default(),
            clear_color: DEFAULT_CLEAR_COLOR,
            in_frame: false,
            frames_rendered: 0,
            last_view_projection: None,
            logger,
        }
    }

    /// Target passed to the last `initialize`, or `None` after shutdown.
    pub fn target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    /// Current viewport rectangle.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Colour from the last `clear`.
    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    /// True between `begin_frame` and `end_frame`.
    pub fn in_frame(&self) -> bool {
        self.in_frame
    }

    /// Frames completed since construction.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// `projection * view` of the camera used by the last rendered scene.
    pub fn last_view_projection(&self) -> Option<Matrix4f> {
        self.last_view_projection
    }

    fn ensure_initialized(&self) -> Result<()> {
        if self.target.is_none() {
            return Err(BuildifyError::NotInitialized("Renderer"));
        }
        Ok(())
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for GlRenderer {
    fn initialize(&mut self, target: &RenderTarget) -> Result<()> {
        self.target = Some(*target);
        self.viewport = Viewport {
            x: 0,
            y: 0,
            width: target.width,
            height: target.height,
        };
        self.logger.info(&format!(
            "OpenGL renderer initialized ({}x{}, {} samples)",
            target.width, target.height, target.samples
        ));
        Ok(())
    }

    fn shutdown(&mut self) {
        if self.target.take().is_none() {
            return;
        }
        self.in_frame = false;
        self.logger.info("OpenGL renderer shutdown");
    }

    fn is_initialized(&self) -> bool {
        self.target.is_some()
    }

    fn begin_frame(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        self.in_frame = true;
        Ok(())
    }

    fn end_frame(&mut self) -> Result<()> {
        self.ensure_initialized()?;
        if self.in_frame {
            self.in_frame = false;
            self.frames_rendered += 1;
        }
        Ok(())
    }

    fn render_scene(&mut self, scene: &Scene) -> Result<()> {
        self.ensure_initialized()?;

        let Some(camera) = scene.active_camera() else {
            self.logger
                .warn(&format!("No active camera in scene '{}'", scene.name()));
            return Ok(());
        };
        let camera = camera.borrow();
        if let (Some(view), Some(projection)) = (camera.view_matrix(), camera.projection_matrix())
        {
            self.last_view_projection = Some(projection * view);
        }
        self.logger.debug(&format!(
            "Rendered scene '{}' ({} entities) from '{}'",
            scene.name(),
            scene.entity_count(),
            camera.name()
        ));
        Ok(())
    }

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32) {
        self.viewport = Viewport {
            x,
            y,
            width,
            height,
        };
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.clear_color = color;
    }
}

impl Drop for GlRenderer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MemoryLogger};
    use crate::math::Vector3f;
    use crate::scene::Entity;
    use crate::transform::Transform;
    use std::rc::Rc;

    #[test]
    fn frames_require_initialization() {
        let mut renderer = GlRenderer::new();
        assert!(matches!(
            renderer.begin_frame(),
            Err(BuildifyError::NotInitialized(_))
        ));
        assert!(matches!(
            renderer.render_scene(&Scene::new("S")),
            Err(BuildifyError::NotInitialized(_))
        ));
    }

    #[test]
    fn initialize_sets_full_viewport() {
        let mut renderer = GlRenderer::new();
        let target = RenderTarget::new(800, 600).samples(4).native_handle(NativeHandle(7));
        renderer.initialize(&target).unwrap();

        assert!(renderer.is_initialized());
        assert_eq!(renderer.target(), Some(&target));
        assert_eq!(
            renderer.viewport(),
            Viewport {
                x: 0,
                y: 0,
                width: 800,
                height: 600
            }
        );
    }

    #[test]
    fn frame_lifecycle_counts_frames() {
        let mut renderer = GlRenderer::new();
        renderer.initialize(&RenderTarget::default()).unwrap();
        for _ in 0..3 {
            renderer.begin_frame().unwrap();
            assert!(renderer.in_frame());
            renderer.end_frame().unwrap();
        }
        assert_eq!(renderer.frames_rendered(), 3);
        assert!(!renderer.in_frame());
    }

    #[test]
    fn scene_without_camera_is_skipped_with_warning() {
        let logger = Rc::new(MemoryLogger::new());
        let mut renderer = GlRenderer::with_logger(logger.clone());
        renderer.initialize(&RenderTarget::default()).unwrap();

        renderer.render_scene(&Scene::new("Empty")).unwrap();
        assert!(logger.contains(LogLevel::Warning, "No active camera in scene 'Empty'"));
        assert!(renderer.last_view_projection().is_none());
    }

    #[test]
    fn render_computes_view_projection_of_active_camera() {
        let mut scene = Scene::new("S");
        let camera = scene.create_entity(
            Entity::new_camera("Camera")
                .with_transform(Transform::from_position(Vector3f::new(0.0, 0.0, 5.0))),
        );
        scene.set_active_camera(&camera).unwrap();

        let mut renderer = GlRenderer::new();
        renderer.initialize(&RenderTarget::default()).unwrap();
        renderer.render_scene(&scene).unwrap();

        let camera = camera.borrow();
        let expected = camera.projection_matrix().unwrap() * camera.view_matrix().unwrap();
        assert_eq!(renderer.last_view_projection(), Some(expected));
    }

    #[test]
    fn viewport_and_clear_are_recorded() {
        let mut renderer = GlRenderer::new();
        renderer.set_viewport(10, 20, 300, 400);
        renderer.clear([0.2, 0.3, 0.4, 1.0]);
        assert_eq!(renderer.viewport().width, 300);
        assert_eq!(renderer.clear_color(), [0.2, 0.3, 0.4, 1.0]);

        renderer.clear(DEFAULT_CLEAR_COLOR);
        assert_eq!(renderer.clear_color(), DEFAULT_CLEAR_COLOR);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let logger = Rc::new(MemoryLogger::new());
        let mut renderer = GlRenderer::with_logger(logger.clone());
        renderer.initialize(&RenderTarget::default()).unwrap();
        renderer.shutdown();
        renderer.shutdown();
        assert!(!renderer.is_initialized());

        let shutdowns = logger
            .records()
            .iter()
            .filter(|(_, m)| m == "OpenGL renderer shutdown")
            .count();
        assert_eq!(shutdowns, 1);
    }
}
