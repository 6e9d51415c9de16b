//! Vertex welding.

use std::collections::BTreeMap;

use cgmath::{Vector2, Vector3};
use rgb::RGB;

use crate::{data::GeometryMesh, error::ExportError, export::tangent::LoopTangent};

/// Vertex as written to the file.
#[derive(Debug, Clone, PartialEq)]
pub struct WeldedVertex {
    /// Source vertex index.
    pub index: u32,
    /// Position.
    pub position: Vector3<f32>,
    /// Normal.
    pub normal: Vector3<f32>,
    /// Tangent.
    pub tangent: Option<Vector3<f32>>,
    /// Bitangent.
    pub bitangent: Option<Vector3<f32>>,
    /// Vertex color.
    pub color: Option<RGB<f32>>,
    /// UV coordinates, one per UV layer.
    pub uv: Vec<Vector2<f32>>,
}

/// Welds the loops of the given triangles into one vertex per source vertex.
///
/// The first loop referencing a vertex (in triangle order, then corner
/// order) provides its attributes. The result is sorted by source vertex
/// index.
pub fn weld(
    mesh_name: &str,
    geometry: &GeometryMesh,
    triangles: &[[usize; 3]],
    tangents: Option<&[LoopTangent]>,
    has_vertex_color: bool,
) -> Result<Vec<WeldedVertex>, ExportError> {
    let mut vertices = BTreeMap::new();
    for &loop_index in triangles.iter().flatten() {
        let l = geometry.loops.get(loop_index).ok_or_else(|| {
            ExportError::invalid_geometry(mesh_name, format!("loop {} does not exist", loop_index))
        })?;
        if vertices.contains_key(&l.vertex) {
            continue;
        }

        let position = geometry.position(l.vertex).ok_or_else(|| {
            ExportError::invalid_geometry(
                mesh_name,
                format!("loop {} references missing vertex {}", loop_index, l.vertex),
            )
        })?;
        if geometry.uv_layers.is_empty() {
            return Err(ExportError::MissingUv {
                mesh: mesh_name.to_owned(),
                vertex: l.vertex,
            });
        }
        let uv = geometry
            .uv_layers
            .iter()
            .map(|layer| {
                layer.uvs.get(loop_index).map(|&uv| Vector2::from(uv)).ok_or_else(|| {
                    ExportError::invalid_geometry(
                        mesh_name,
                        format!("UV layer {:?} has no entry for loop {}", layer.name, loop_index),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let color = if has_vertex_color {
            let [r, g, b, _] = geometry
                .color_layers
                .first()
                .and_then(|layer| layer.colors.get(loop_index))
                .copied()
                .ok_or_else(|| {
                    ExportError::invalid_geometry(
                        mesh_name,
                        format!("no vertex color for loop {}", loop_index),
                    )
                })?;
            Some(RGB::new(r, g, b))
        } else {
            None
        };
        let frame = match tangents {
            Some(tangents) => Some(tangents.get(loop_index).copied().ok_or_else(|| {
                ExportError::invalid_geometry(mesh_name, format!("no tangent for loop {}", loop_index))
            })?),
            None => None,
        };

        vertices.insert(
            l.vertex,
            WeldedVertex {
                index: l.vertex,
                position: position.into(),
                normal: l.normal.into(),
                tangent: frame.map(|f| f.tangent),
                bitangent: frame.map(|f| f.bitangent),
                color,
                uv,
            },
        );
    }

    Ok(vertices.into_iter().map(|(_, v)| v).collect())
}

/// Returns the position of the source vertex in the welded vertex table.
pub fn table_index(vertices: &[WeldedVertex], source: u32) -> Option<usize> {
    vertices.binary_search_by_key(&source, |v| v.index).ok()
}
