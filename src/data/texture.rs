//! Texture.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Image texture.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Texture {
    /// Name.
    #[serde(default)]
    pub name: Option<String>,
    /// Image file path as stored in the scene.
    ///
    /// Paths starting with `//` are relative to the scene directory.
    pub filepath: String,
}

impl Texture {
    /// Returns the file name of the image, without directories.
    pub fn file_name(&self) -> Option<&str> {
        let path = self.filepath.trim_start_matches("//");
        Path::new(path).file_name().and_then(|name| name.to_str())
    }
}
