//! The entity-holding scene.

use super::entity::{Entity, EntityId, EntityRef};
use crate::error::{BuildifyError, Result};
use crate::logging::{SharedLogger, default_logger};
use std::fmt;
use std::rc::Rc;

/// An ordered collection of shared entities plus an optional active camera.
///
/// Entities keep their insertion order and may appear more than once. The
/// active camera is remembered by [`EntityId`], not by a second handle, so a
/// scene never keeps an entity alive on its own account beyond its entity list.
///
/// Scenes are single-threaded. Entities are shared through `Rc<RefCell<_>>`,
/// so touching the same scene from inside an entity's update hook panics on
/// the re-borrow rather than iterating a half-modified list.
///
/// # Example
///
/// ```
/// use buildify::{Entity, Scene};
///
/// let mut scene = Scene::new("S");
/// let a = scene.create_entity(Entity::new("A"));
/// scene.create_entity(Entity::new("B"));
///
/// assert!(scene.find_entity("A").is_some());
/// scene.remove_entity(&a);
/// assert!(scene.find_entity("A").is_none());
/// assert_eq!(scene.entity_count(), 1);
/// ```
pub struct Scene {
    pub(super) name: String,
    pub(super) entities: Vec<EntityRef>,
    pub(super) active_camera: Option<EntityId>,
    pub(super) logger: SharedLogger,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_logger(name, default_logger())
    }

    pub fn with_logger(name: impl Into<String>, logger: SharedLogger) -> Self {
        let name = name.into();
        logger.debug(&format!("Scene created: {}", name));
        Self {
            name,
            entities: Vec::new(),
            active_camera: None,
            logger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Appends an entity. Nothing is deduplicated.
    pub fn add_entity(&mut self, entity: EntityRef) {
        self.logger.debug(&format!(
            "Entity '{}' added to scene '{}'",
            entity.borrow().name(),
            self.name
        ));
        self.entities.push(entity);
    }

    /// Wraps `entity` in a shared handle, adds it, and returns the handle.
    pub fn create_entity(&mut self, entity: Entity) -> EntityRef {
        let entity = entity.into_ref();
        self.add_entity(Rc::clone(&entity));
        entity
    }

    /// Removes the first occurrence of this exact handle.
    ///
    /// Returns whether anything was removed; removing an absent entity is a
    /// no-op.
    pub fn remove_entity(&mut self, entity: &EntityRef) -> bool {
        let Some(index) = self.entities.iter().position(|e| Rc::ptr_eq(e, entity)) else {
            return false;
        };
        self.entities.remove(index);
        self.logger.debug(&format!(
            "Entity '{}' removed from scene '{}'",
            entity.borrow().name(),
            self.name
        ));
        true
    }

    /// First entity, in insertion order, whose name equals `name`.
    pub fn find_entity(&self, name: &str) -> Option<EntityRef> {
        self.entities
            .iter()
            .find(|e| e.borrow().name() == name)
            .cloned()
    }

    /// Whether this exact handle is in the scene.
    pub fn contains(&self, entity: &EntityRef) -> bool {
        self.entities.iter().any(|e| Rc::ptr_eq(e, entity))
    }

    /// Every entity, in insertion order.
    pub fn entities(&self) -> &[EntityRef] {
        &self.entities
    }

    /// Number of entries, counting duplicates.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// All camera entities, in insertion order.
    pub fn cameras(&self) -> Vec<EntityRef> {
        self.entities
            .iter()
            .filter(|e| e.borrow().is_camera())
            .cloned()
            .collect()
    }

    /// Designates the scene's active camera.
    ///
    /// The entity must already be in this scene and must be a camera;
    /// otherwise nothing changes and `NotFound` or `NotACamera` is returned.
    pub fn set_active_camera(&mut self, camera: &EntityRef) -> Result<()> {
        let entity = camera.borrow();
        if !self.contains(camera) {
            return Err(BuildifyError::NotFound(entity.name().to_string()));
        }
        if !entity.is_camera() {
            return Err(BuildifyError::NotACamera(entity.name().to_string()));
        }
        self.active_camera = Some(entity.id());
        self.logger.debug(&format!(
            "Active camera of scene '{}' set to '{}'",
            self.name,
            entity.name()
        ));
        Ok(())
    }

    pub fn clear_active_camera(&mut self) {
        self.active_camera = None;
    }

    /// The active camera, if one is set and it is still in the scene.
    pub fn active_camera(&self) -> Option<EntityRef> {
        let id = self.active_camera?;
        self.entities.iter().find(|e| e.borrow().id() == id).cloned()
    }

    /// Runs every entity's update hook with the same `delta_time`, in
    /// insertion order.
    pub fn update(&mut self, delta_time: f64) {
        for entity in &self.entities {
            entity.borrow_mut().update(delta_time);
        }
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.name)
            .field("entities", &self.entities)
            .field("active_camera", &self.active_camera)
            .finish()
    }
}
