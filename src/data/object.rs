//! Scene object.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::Mesh;

/// Scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    /// Object name.
    pub name: String,
    /// Whether the object is selected in the host application.
    #[serde(default)]
    pub selected: bool,
    /// Object data.
    pub data: ObjectData,
}

impl SceneObject {
    /// Returns the object type.
    pub fn object_type(&self) -> ObjectType {
        match self.data {
            ObjectData::Empty => ObjectType::Empty,
            ObjectData::Camera => ObjectType::Camera,
            ObjectData::Lamp => ObjectType::Lamp,
            ObjectData::Armature => ObjectType::Armature,
            ObjectData::Mesh(_) => ObjectType::Mesh,
            ObjectData::Curve => ObjectType::Curve,
        }
    }

    /// Returns the mesh data if the object is a mesh.
    pub fn mesh(&self) -> Option<&Mesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}

/// Object data.
///
/// Only meshes carry data the exporter uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    /// Empty.
    Empty,
    /// Camera.
    Camera,
    /// Lamp.
    Lamp,
    /// Armature.
    Armature,
    /// Mesh.
    Mesh(Mesh),
    /// Curve.
    Curve,
}

/// Object type.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ObjectType {
    /// Empty.
    Empty,
    /// Camera.
    Camera,
    /// Lamp.
    Lamp,
    /// Armature.
    Armature,
    /// Mesh.
    Mesh,
    /// Curve.
    Curve,
}

impl ObjectType {
    /// All object types.
    pub const ALL: [ObjectType; 6] = [
        ObjectType::Empty,
        ObjectType::Camera,
        ObjectType::Lamp,
        ObjectType::Armature,
        ObjectType::Mesh,
        ObjectType::Curve,
    ];
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ObjectType::Empty => "empty",
            ObjectType::Camera => "camera",
            ObjectType::Lamp => "lamp",
            ObjectType::Armature => "armature",
            ObjectType::Mesh => "mesh",
            ObjectType::Curve => "curve",
        };
        f.write_str(s)
    }
}
