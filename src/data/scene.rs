//! Scene.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::SceneObject;

/// Read-only access to the scene being exported.
pub trait SceneProvider {
    /// Returns the objects of the scene.
    fn objects(&self) -> &[SceneObject];

    /// Resolves an asset path stored in the scene to a filesystem path.
    fn resolve_path(&self, filepath: &str) -> PathBuf;
}

/// Scene.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Directory `//`-prefixed asset paths are relative to.
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    /// Objects.
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Creates a new `Scene`.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneProvider for Scene {
    fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    fn resolve_path(&self, filepath: &str) -> PathBuf {
        match filepath.strip_prefix("//") {
            Some(relative) => match &self.base_dir {
                Some(base) => base.join(relative),
                None => PathBuf::from(relative),
            },
            None => PathBuf::from(filepath),
        }
    }
}
