//! 3D content data.

pub use self::{
    geometry::{ColorLayer, GeometryMesh, Loop, Polygon, UvLayer},
    material::Material,
    mesh::Mesh,
    object::{ObjectData, ObjectType, SceneObject},
    scene::{Scene, SceneProvider},
    texture::Texture,
};

mod geometry;
mod material;
mod mesh;
mod object;
mod scene;
mod texture;
