//! Boundary to external 3D content-creation tools.
//!
//! Implement [`ContentToolBridge`] to move gaussian scenes in and out of a
//! content tool. [`BlenderBridge`] is the stock extension point: it reports
//! what it was asked to do and declines.

use crate::gaussian::GaussianScene;
use crate::logging::{SharedLogger, default_logger};
use std::path::Path;

/// Import and export of gaussian scenes through an external tool.
pub trait ContentToolBridge {
    /// Reads a scene from `path`, or `None` if the file could not be imported.
    fn import_scene(&self, path: &Path) -> Option<GaussianScene>;

    /// Writes `scene` to `path`, returning whether the export succeeded.
    fn export_scene(&self, scene: &GaussianScene, path: &Path) -> bool;
}

/// Blender `.blend` bridge. Import and export are not implemented yet, so
/// every call logs a warning and reports failure.
pub struct BlenderBridge {
    logger: SharedLogger,
}

impl BlenderBridge {
    pub fn new() -> Self {
        Self::with_logger(default_logger())
    }

    pub fn with_logger(logger: SharedLogger) -> Self {
        Self { logger }
    }
}

impl Default for BlenderBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentToolBridge for BlenderBridge {
    fn import_scene(&self, path: &Path) -> Option<GaussianScene> {
        self.logger.warn(&format!(
            "Importing from Blender file {} is not supported",
            path.display()
        ));
        None
    }

    fn export_scene(&self, scene: &GaussianScene, path: &Path) -> bool {
        self.logger.warn(&format!(
            "Exporting {} gaussians to Blender file {} is not supported",
            scene.count(),
            path.display()
        ));
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::Gaussian;
    use crate::logging::{LogLevel, MemoryLogger};
    use std::rc::Rc;

    #[test]
    fn blender_import_reports_absent() {
        let logger = Rc::new(MemoryLogger::new());
        let bridge = BlenderBridge::with_logger(logger.clone());
        assert!(bridge.import_scene(Path::new("scene.blend")).is_none());
        assert!(logger.contains(
            LogLevel::Warning,
            "Importing from Blender file scene.blend is not supported"
        ));
    }

    #[test]
    fn blender_export_reports_failure() {
        let bridge = BlenderBridge::new();
        let mut scene = GaussianScene::new();
        scene.add_gaussian(Gaussian::default());
        assert!(!bridge.export_scene(&scene, Path::new("out.blend")));
    }

    #[test]
    fn trait_objects_can_stand_in_for_the_tool() {
        struct Echo;

        impl ContentToolBridge for Echo {
            fn import_scene(&self, _path: &Path) -> Option<GaussianScene> {
                let mut scene = GaussianScene::new();
                scene.add_gaussian(Gaussian::at([1.0, 1.0, 1.0]));
                Some(scene)
            }

            fn export_scene(&self, scene: &GaussianScene, _path: &Path) -> bool {
                !scene.is_empty()
            }
        }

        let bridge: Box<dyn ContentToolBridge> = Box::new(Echo);
        let scene = bridge.import_scene(Path::new("x")).unwrap();
        assert!(bridge.export_scene(&scene, Path::new("y")));
    }
}
