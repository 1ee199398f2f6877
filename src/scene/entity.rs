//! Named scene objects.

use crate::camera::Camera;
use crate::math::{Matrix4f, Vector3f};
use crate::transform::Transform;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ENTITY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of an [`Entity`].
///
/// Two handles refer to the same entity exactly when their ids match. A
/// [`Scene`](super::Scene) uses the id to designate its active camera without
/// holding a second owning handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    fn next() -> Self {
        Self(NEXT_ENTITY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What an entity is, beyond its name and transform.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum EntityKind {
    #[default]
    Generic,
    Camera(Camera),
}

/// Per-tick behaviour attached to an entity. Receives the entity's transform
/// and the frame delta in seconds.
pub type UpdateHook = Box<dyn FnMut(&mut Transform, f64)>;

/// Shared handle to an entity. Scenes and callers hold these; the entity is
/// dropped with the last handle.
pub type EntityRef = Rc<RefCell<Entity>>;

/// A named object with a transform.
///
/// # Example
///
/// ```
/// use buildify::{Entity, Vector3f};
///
/// let mut spinner = Entity::new("Spinner").on_update(|transform, dt| {
///     transform.position = transform.position + Vector3f::new(dt as f32, 0.0, 0.0);
/// });
///
/// spinner.update(0.5);
/// assert_eq!(spinner.transform().position.x, 0.5);
/// ```
pub struct Entity {
    id: EntityId,
    name: String,
    transform: Transform,
    kind: EntityKind,
    on_update: Option<UpdateHook>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::next(),
            name: name.into(),
            transform: Transform::default(),
            kind: EntityKind::Generic,
            on_update: None,
        }
    }

    /// A camera entity with default projection parameters.
    pub fn new_camera(name: impl Into<String>) -> Self {
        Self::new(name).with_camera(Camera::default())
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.kind = EntityKind::Camera(camera);
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Attaches the per-tick hook run by [`update`](Entity::update).
    pub fn on_update<F: FnMut(&mut Transform, f64) + 'static>(mut self, hook: F) -> Self {
        self.on_update = Some(Box::new(hook));
        self
    }

    pub fn set_update_hook<F: FnMut(&mut Transform, f64) + 'static>(&mut self, hook: F) {
        self.on_update = Some(Box::new(hook));
    }

    /// Wraps the entity in a shared handle.
    pub fn into_ref(self) -> EntityRef {
        Rc::new(RefCell::new(self))
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    pub fn is_camera(&self) -> bool {
        matches!(self.kind, EntityKind::Camera(_))
    }

    pub fn camera(&self) -> Option<&Camera> {
        match &self.kind {
            EntityKind::Camera(camera) => Some(camera),
            EntityKind::Generic => None,
        }
    }

    pub fn camera_mut(&mut self) -> Option<&mut Camera> {
        match &mut self.kind {
            EntityKind::Camera(camera) => Some(camera),
            EntityKind::Generic => None,
        }
    }

    /// Runs the update hook, if any. Without one this does nothing.
    pub fn update(&mut self, delta_time: f64) {
        if let Some(hook) = self.on_update.as_mut() {
            hook(&mut self.transform, delta_time);
        }
    }

    /// View matrix derived from this entity's transform, for camera entities.
    pub fn view_matrix(&self) -> Option<Matrix4f> {
        self.camera().map(|c| c.view_matrix(&self.transform))
    }

    /// Projection matrix of the active mode, for camera entities.
    pub fn projection_matrix(&self) -> Option<Matrix4f> {
        self.camera().map(Camera::projection_matrix)
    }

    /// Aim computation for camera entities; see [`Camera::look_at`].
    ///
    /// Takes `&self`: the stored rotation is never changed. Apply the returned
    /// rotation matrix yourself if the camera should actually turn.
    pub fn look_at(&self, target: Vector3f, up: Vector3f) -> Option<Matrix4f> {
        self.camera()
            .map(|c| c.look_at(self.transform.position, target, up))
    }

    /// [`look_at`](Entity::look_at) with world up `(0, 1, 0)`.
    pub fn look_at_target(&self, target: Vector3f) -> Option<Matrix4f> {
        self.look_at(target, Vector3f::new(0.0, 1.0, 0.0))
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::new("")
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("transform", &self.transform)
            .field("kind", &self.kind)
            .field("has_update_hook", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quaternionf;

    #[test]
    fn default_entity_has_empty_name_and_identity_transform() {
        let entity = Entity::default();
        assert_eq!(entity.name(), "");
        assert_eq!(entity.transform(), &Transform::default());
        assert!(!entity.is_camera());
        assert!(entity.view_matrix().is_none());
    }

    #[test]
    fn ids_are_unique() {
        let a = Entity::new("same");
        let b = Entity::new("same");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn rename_keeps_identity() {
        let mut entity = Entity::new("before");
        let id = entity.id();
        entity.set_name("after");
        assert_eq!(entity.name(), "after");
        assert_eq!(entity.id(), id);
    }

    #[test]
    fn update_without_hook_is_a_no_op() {
        let mut entity = Entity::new("idle")
            .with_transform(Transform::from_position(Vector3f::new(1.0, 2.0, 3.0)));
        entity.update(1.0);
        assert_eq!(entity.transform().position, Vector3f::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn update_hook_receives_delta() {
        let mut entity = Entity::new("mover");
        entity.set_update_hook(|t, dt| t.position.y += dt as f32 * 2.0);
        entity.update(0.25);
        entity.update(0.25);
        assert_eq!(entity.transform().position.y, 1.0);
    }

    #[test]
    fn camera_entity_exposes_matrices() {
        let camera = Entity::new_camera("Camera");
        assert!(camera.is_camera());
        assert_eq!(camera.projection_matrix().map(|p| p.m[3][2]), Some(-1.0));
        assert!(camera.view_matrix().is_some());
    }

    #[test]
    fn look_at_does_not_touch_rotation() {
        let rotation = Quaternionf::from_axis_angle(Vector3f::new(0.0, 1.0, 0.0), 0.3);
        let camera = Entity::new_camera("Camera").with_transform(
            Transform::new()
                .position(Vector3f::new(0.0, 0.0, 5.0))
                .rotation(rotation),
        );

        let aim = camera.look_at(Vector3f::zero(), Vector3f::new(0.0, 1.0, 0.0));
        assert!(aim.is_some());
        assert_eq!(camera.transform().rotation, rotation);
    }

    #[test]
    fn look_at_target_uses_world_up() {
        let camera = Entity::new_camera("Camera")
            .with_transform(Transform::from_position(Vector3f::new(3.0, 1.0, 4.0)));
        let target = Vector3f::new(0.0, 0.5, -2.0);

        assert_eq!(
            camera.look_at_target(target),
            camera.look_at(target, Vector3f::new(0.0, 1.0, 0.0))
        );
        assert!(Entity::new("plain").look_at_target(target).is_none());
    }

    #[test]
    fn look_at_on_generic_entity_is_none() {
        let entity = Entity::new("plain");
        assert!(entity.look_at(Vector3f::zero(), Vector3f::new(0.0, 1.0, 0.0)).is_none());
    }
}
