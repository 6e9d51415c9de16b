//! Mesh.

use serde::{Deserialize, Serialize};

use crate::data::{GeometryMesh, Material};

/// Mesh.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    /// Name of the mesh data.
    pub name: String,
    /// Geometry.
    pub geometry: GeometryMesh,
    /// Material slots.
    #[serde(default)]
    pub materials: Vec<Material>,
}
