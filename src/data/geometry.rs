//! Geometry.

use serde::{Deserialize, Serialize};

/// Geometry mesh.
///
/// Attributes other than positions are stored per loop (face corner), since
/// the same vertex can carry different normals and UVs on different faces.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryMesh {
    /// Positions, indexed by source vertex index.
    pub positions: Vec<[f32; 3]>,
    /// Polygons.
    #[serde(default)]
    pub polygons: Vec<Polygon>,
    /// Loops.
    #[serde(default)]
    pub loops: Vec<Loop>,
    /// UV layers.
    #[serde(default)]
    pub uv_layers: Vec<UvLayer>,
    /// Vertex color layers.
    #[serde(default)]
    pub color_layers: Vec<ColorLayer>,
}

impl GeometryMesh {
    /// Returns the source vertex index of the given loop.
    pub fn loop_vertex(&self, loop_index: usize) -> Option<u32> {
        self.loops.get(loop_index).map(|l| l.vertex)
    }

    /// Returns the position of the given source vertex.
    pub fn position(&self, vertex: u32) -> Option<[f32; 3]> {
        self.positions.get(vertex as usize).copied()
    }

    /// Returns the number of polygons which are not triangles.
    pub fn non_triangle_count(&self) -> usize {
        self.polygons.iter().filter(|p| !p.is_triangle()).count()
    }
}

/// Polygon.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Polygon {
    /// Loop indices, in winding order.
    pub loops: Vec<usize>,
}

impl Polygon {
    /// Creates a new `Polygon`.
    pub fn new(loops: impl Into<Vec<usize>>) -> Self {
        Self {
            loops: loops.into(),
        }
    }

    /// Returns the loops if the polygon is a triangle.
    pub fn as_triangle(&self) -> Option<[usize; 3]> {
        match *self.loops.as_slice() {
            [l0, l1, l2] => Some([l0, l1, l2]),
            _ => None,
        }
    }

    /// Returns whether the polygon is a triangle.
    pub fn is_triangle(&self) -> bool {
        self.loops.len() == 3
    }
}

/// Loop, a face corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loop {
    /// Source vertex index.
    pub vertex: u32,
    /// Split normal.
    pub normal: [f32; 3],
    /// Tangent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tangent: Option<[f32; 3]>,
    /// Bitangent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitangent: Option<[f32; 3]>,
}

impl Loop {
    /// Creates a new `Loop` without tangent data.
    pub fn new(vertex: u32, normal: [f32; 3]) -> Self {
        Self {
            vertex,
            normal,
            tangent: None,
            bitangent: None,
        }
    }
}

/// UV layer.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    /// Name.
    #[serde(default)]
    pub name: String,
    /// UV coordinates, indexed by loop.
    pub uvs: Vec<[f32; 2]>,
}

/// Vertex color layer.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorLayer {
    /// Name.
    #[serde(default)]
    pub name: String,
    /// RGBA colors, indexed by loop.
    pub colors: Vec<[f32; 4]>,
}
