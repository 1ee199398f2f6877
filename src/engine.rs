//! Engine: owns scenes, the renderer and per-tick callbacks.

use crate::config::EngineConfig;
use crate::error::Result;
use crate::logging::{SharedLogger, default_logger};
use crate::renderer::Renderer;
use crate::scene::Scene;
use crate::VERSION;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

/// Shared handle to a scene registered with an [`Engine`].
pub type SceneRef = Rc<RefCell<Scene>>;

/// Drives scenes and a renderer.
///
/// The engine does nothing until [`initialize`](Engine::initialize) is called:
/// [`update`](Engine::update) and [`render`](Engine::render) return early while
/// it is stopped.
///
/// # Example
///
/// ```
/// use buildify::*;
///
/// let mut engine = Engine::new();
/// engine.set_renderer(Box::new(GlRenderer::new()));
/// engine.initialize(None).unwrap();
///
/// let scene = engine.create_scene("Main");
/// let camera = scene.borrow_mut().create_entity(Entity::new_camera("Camera"));
/// scene.borrow_mut().set_active_camera(&camera).unwrap();
///
/// engine.update(1.0 / 60.0);
/// engine.render().unwrap();
/// engine.shutdown();
/// ```
pub struct Engine {
    scenes: HashMap<String, SceneRef>,
    active_scene: Option<SceneRef>,
    renderer: Option<Box<dyn Renderer>>,
    update_callbacks: Vec<Box<dyn FnMut(f64)>>,
    config: EngineConfig,
    running: bool,
    logger: SharedLogger,
}

impl Engine {
    /// Engine logging through the default `tracing` logger.
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    /// Engine reporting to `logger`; scenes it creates share it.
    pub fn with_logger(logger: SharedLogger) -> Self {
        logger.info(&format!("Buildify Engine v{} created", VERSION));
        Self {
            scenes: HashMap::new(),
            active_scene: None,
            renderer: None,
            update_callbacks: Vec::new(),
            config: EngineConfig::default(),
            running: false,
            logger,
        }
    }

    /// Starts the engine, optionally reading an [`EngineConfig`] from a TOML
    /// file first.
    ///
    /// An installed renderer is initialized with the configured render
    /// target. Calling this on a running engine only logs a warning.
    pub fn initialize(&mut self, config_path: Option<&Path>) -> Result<()> {
        if self.running {
            self.logger.warn("Engine already initialized");
            return Ok(());
        }

        if let Some(path) = config_path {
            self.config = EngineConfig::load(path)?;
            self.logger
                .debug(&format!("Loaded engine config from {}", path.display()));
        }

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.initialize(&self.config.render_target)?;
        }

        self.running = true;
        self.logger.info("Engine initialized successfully");
        Ok(())
    }

    /// Stops the engine, shuts the renderer down and releases every scene.
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;

        if let Some(renderer) = self.renderer.as_mut() {
            renderer.shutdown();
        }
        self.scenes.clear();
        self.active_scene = None;

        self.logger.info("Engine shutdown complete");
    }

    /// True between `initialize` and `shutdown` or `stop`.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Halts updates and rendering without releasing anything.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Configuration read by the last `initialize`.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Updates the active scene, then runs every callback, each with
    /// `delta_time`.
    pub fn update(&mut self, delta_time: f64) {
        if !self.running {
            return;
        }

        if let Some(scene) = &self.active_scene {
            scene.borrow_mut().update(delta_time);
        }

        for callback in &mut self.update_callbacks {
            callback(delta_time);
        }
    }

    /// Renders the active scene as one frame. Does nothing while stopped or
    /// without a renderer or active scene.
    pub fn render(&mut self) -> Result<()> {
        if !self.running {
            return Ok(());
        }
        let (Some(renderer), Some(scene)) = (self.renderer.as_mut(), self.active_scene.as_ref())
        else {
            return Ok(());
        };

        renderer.begin_frame()?;
        renderer.render_scene(&scene.borrow())?;
        renderer.end_frame()
    }

    /// Creates and registers a scene. A scene registered under the same name
    /// is replaced. The first scene created becomes the active one.
    pub fn create_scene(&mut self, name: &str) -> SceneRef {
        let scene = Rc::new(RefCell::new(Scene::with_logger(
            name,
            Rc::clone(&self.logger),
        )));
        self.scenes.insert(name.to_string(), Rc::clone(&scene));

        if self.active_scene.is_none() {
            self.active_scene = Some(Rc::clone(&scene));
        }

        self.logger.info(&format!("Created scene: {}", name));
        scene
    }

    /// Registered scene named `name`.
    pub fn scene(&self, name: &str) -> Option<SceneRef> {
        self.scenes.get(name).cloned()
    }

    /// Number of registered scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Makes `scene` the one updated and rendered. It need not be registered.
    pub fn set_active_scene(&mut self, scene: SceneRef) {
        self.logger.info(&format!(
            "Active scene set to: {}",
            scene.borrow().name()
        ));
        self.active_scene = Some(scene);
    }

    pub fn clear_active_scene(&mut self) {
        self.active_scene = None;
    }

    /// Scene currently updated and rendered.
    pub fn active_scene(&self) -> Option<SceneRef> {
        self.active_scene.clone()
    }

    /// Installs the backend. Install it before `initialize` so it receives the render target.
    pub fn set_renderer(&mut self, renderer: Box<dyn Renderer>) {
        self.renderer = Some(renderer);
    }

    pub fn renderer(&self) -> Option<&dyn Renderer> {
        self.renderer.as_deref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut (dyn Renderer + 'static)> {
        self.renderer.as_deref_mut()
    }

    /// Registers a callback run at the end of every [`update`](Engine::update).
    pub fn add_update_callback<F: FnMut(f64) + 'static>(&mut self, callback: F) {
        self.update_callbacks.push(Box::new(callback));
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.shutdown();
    }
}
