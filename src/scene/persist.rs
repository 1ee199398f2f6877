//! JSON scene documents.
//!
//! The document stores the scene name, each entity's name, transform and
//! camera parameters, and the index of the active camera. Update hooks are
//! behaviour, not data, and are not written. Entities listed twice by identity
//! come back as two separate entities.

use super::entity::Entity;
use super::scene::Scene;
use crate::camera::Camera;
use crate::error::{BuildifyError, Result};
use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct SceneDocument {
    name: String,
    #[serde(default)]
    entities: Vec<EntityRecord>,
    #[serde(default)]
    active_camera: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
struct EntityRecord {
    name: String,
    #[serde(default)]
    transform: Transform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    camera: Option<Camera>,
}

impl SceneDocument {
    fn capture(scene: &Scene) -> Self {
        let mut active_camera = None;
        let entities = scene
            .entities
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                let entity = entity.borrow();
                if active_camera.is_none() && scene.active_camera == Some(entity.id()) {
                    active_camera = Some(index);
                }
                EntityRecord {
                    name: entity.name().to_string(),
                    transform: *entity.transform(),
                    camera: entity.camera().copied(),
                }
            })
            .collect();

        Self {
            name: scene.name.clone(),
            entities,
            active_camera,
        }
    }
}

impl Scene {
    /// Writes this scene to `path` as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.logger
            .info(&format!("Saving scene to: {}", path.display()));

        let json = serde_json::to_string_pretty(&SceneDocument::capture(self))?;
        fs::write(path, json).map_err(|e| BuildifyError::io(path, e))
    }

    /// Replaces this scene's name, entities and active camera with the
    /// contents of `path`.
    ///
    /// The whole file is read and validated before anything changes, so a
    /// failed load leaves the scene as it was. Loaded entities get fresh ids.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.logger
            .info(&format!("Loading scene from: {}", path.display()));

        let text = fs::read_to_string(path).map_err(|e| BuildifyError::io(path, e))?;
        let document: SceneDocument = serde_json::from_str(&text)?;

        let entities: Vec<_> = document
            .entities
            .into_iter()
            .map(|record| {
                let entity = Entity::new(record.name).with_transform(record.transform);
                let entity = match record.camera {
                    Some(camera) => entity.with_camera(camera),
                    None => entity,
                };
                entity.into_ref()
            })
            .collect();

        let active_camera = match document.active_camera {
            Some(index) => {
                let entity = entities.get(index).ok_or_else(|| {
                    BuildifyError::NotFound(format!("active camera index {}", index))
                })?;
                let entity = entity.borrow();
                if !entity.is_camera() {
                    return Err(BuildifyError::NotACamera(entity.name().to_string()));
                }
                Some(entity.id())
            }
            None => None,
        };

        self.name = document.name;
        self.entities = entities;
        self.active_camera = active_camera;
        self.logger.debug(&format!(
            "Loaded scene '{}' with {} entities",
            self.name,
            self.entities.len()
        ));
        Ok(())
    }

    /// Reads a new scene from `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut scene = Scene::new("");
        scene.load_from_file(path)?;
        Ok(scene)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quaternionf, Vector3f};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new("Saved");
        scene.create_entity(
            Entity::new("Splat Cloud").with_transform(
                Transform::new()
                    .position(Vector3f::new(1.0, 2.0, 3.0))
                    .rotation(Quaternionf::from_axis_angle(Vector3f::new(0.0, 1.0, 0.0), 0.5))
                    .uniform_scale(0.5),
            ),
        );
        let camera = scene.create_entity(Entity::new_camera("Main Camera"));
        camera
            .borrow_mut()
            .camera_mut()
            .unwrap()
            .set_orthographic(-5.0, 5.0, -3.0, 3.0, 0.1, 100.0);
        scene.set_active_camera(&camera).unwrap();
        scene
    }

    #[test]
    fn save_then_load_restores_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let original = sample_scene();
        original.save_to_file(&path).unwrap();

        let loaded = Scene::from_file(&path).unwrap();
        assert_eq!(loaded.name(), "Saved");
        assert_eq!(loaded.entity_count(), 2);

        let cloud = loaded.find_entity("Splat Cloud").unwrap();
        let before = original.find_entity("Splat Cloud").unwrap();
        assert_eq!(cloud.borrow().transform(), before.borrow().transform());
        assert!(!cloud.borrow().is_camera());

        let active = loaded.active_camera().unwrap();
        assert_eq!(active.borrow().name(), "Main Camera");
        assert_eq!(
            active.borrow().camera().unwrap().orthographic_params().right,
            5.0
        );
    }

    #[test]
    fn failed_load_leaves_scene_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let mut scene = sample_scene();
        assert!(matches!(
            scene.load_from_file(&path),
            Err(BuildifyError::Json(_))
        ));
        assert_eq!(scene.name(), "Saved");
        assert_eq!(scene.entity_count(), 2);
        assert!(scene.active_camera().is_some());
    }

    #[test]
    fn active_camera_index_must_point_at_a_camera() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad_camera.json");
        fs::write(
            &path,
            r#"{ "name": "X", "entities": [ { "name": "plain" } ], "active_camera": 0 }"#,
        )
        .unwrap();

        let mut scene = Scene::new("Y");
        assert!(matches!(
            scene.load_from_file(&path),
            Err(BuildifyError::NotACamera(_))
        ));
        assert_eq!(scene.name(), "Y");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut scene = Scene::new("S");
        let err = scene.load_from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, BuildifyError::Io { .. }));
    }
}
