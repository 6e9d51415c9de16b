//! Material.

use serde::{Deserialize, Serialize};

use crate::data::Texture;

/// Material.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Name.
    pub name: String,
    /// Image textures, in node order.
    #[serde(default)]
    pub textures: Vec<Texture>,
}

impl Material {
    /// Returns the first image texture, if any.
    pub fn diffuse_texture(&self) -> Option<&Texture> {
        self.textures.first()
    }
}
