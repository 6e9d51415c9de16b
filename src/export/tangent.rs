//! Tangent space generation.

use cgmath::{InnerSpace, Vector2, Vector3};
use thiserror::Error;

use crate::data::GeometryMesh;

/// Squared length under which a vector is treated as zero.
const EPSILON: f32 = 1e-12;

/// Tangent computation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TangentError {
    /// The mesh has no UV layer.
    #[error("mesh has no UV layer")]
    NoUvLayer,
    /// UV layer does not cover every loop.
    #[error("UV layer has {uvs} entries for {loops} loops")]
    UvLayerTooShort {
        /// UV count.
        uvs: usize,
        /// Loop count.
        loops: usize,
    },
    /// A polygon is not a triangle.
    #[error("polygon {polygon} has {loops} corners, only triangles are supported")]
    NotTriangulated {
        /// Polygon index.
        polygon: usize,
        /// Corner count.
        loops: usize,
    },
    /// A loop or vertex reference is out of range.
    #[error("polygon {0} references a missing loop or vertex")]
    InvalidReference(usize),
    /// A loop references a missing vertex.
    #[error("loop {0} references a missing vertex")]
    InvalidLoop(usize),
}

/// Tangent frame of a loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopTangent {
    /// Tangent.
    pub tangent: Vector3<f32>,
    /// Bitangent.
    pub bitangent: Vector3<f32>,
}

/// Returns the tangent frame of every loop.
///
/// Tangents stored on the loops are used when every loop has them.
/// Otherwise they are derived from the first UV layer.
pub fn loop_tangents(geometry: &GeometryMesh) -> Result<Vec<LoopTangent>, TangentError> {
    let stored = geometry
        .loops
        .iter()
        .map(|l| match (l.tangent, l.bitangent) {
            (Some(tangent), Some(bitangent)) => Some(LoopTangent {
                tangent: tangent.into(),
                bitangent: bitangent.into(),
            }),
            _ => None,
        })
        .collect::<Option<Vec<_>>>();
    match stored {
        Some(tangents) if !tangents.is_empty() => Ok(tangents),
        _ => compute(geometry),
    }
}

/// Computes tangents from positions, normals and the first UV layer.
fn compute(geometry: &GeometryMesh) -> Result<Vec<LoopTangent>, TangentError> {
    let uv_layer = geometry.uv_layers.first().ok_or(TangentError::NoUvLayer)?;
    if uv_layer.uvs.len() < geometry.loops.len() {
        return Err(TangentError::UvLayerTooShort {
            uvs: uv_layer.uvs.len(),
            loops: geometry.loops.len(),
        });
    }

    let zero = Vector3::new(0.0, 0.0, 0.0);
    let mut tangents = vec![zero; geometry.positions.len()];
    let mut bitangents = vec![zero; geometry.positions.len()];

    for (index, polygon) in geometry.polygons.iter().enumerate() {
        let loops = polygon.as_triangle().ok_or(TangentError::NotTriangulated {
            polygon: index,
            loops: polygon.loops.len(),
        })?;
        let mut vertices = [0usize; 3];
        let mut positions = [zero; 3];
        let mut uvs = [Vector2::new(0.0, 0.0); 3];
        for (i, &l) in loops.iter().enumerate() {
            let vertex = geometry
                .loop_vertex(l)
                .ok_or(TangentError::InvalidReference(index))?;
            let position = geometry
                .position(vertex)
                .ok_or(TangentError::InvalidReference(index))?;
            vertices[i] = vertex as usize;
            positions[i] = position.into();
            uvs[i] = uv_layer.uvs[l].into();
        }

        let edge1 = positions[1] - positions[0];
        let edge2 = positions[2] - positions[0];
        let duv1 = uvs[1] - uvs[0];
        let duv2 = uvs[2] - uvs[0];
        let det = duv1.x * duv2.y - duv1.y * duv2.x;
        if det.abs() < 1e-8 {
            // Degenerate UV mapping contributes nothing.
            continue;
        }
        // Scaling by the face area weights large faces more.
        let area = edge1.cross(edge2).magnitude() * 0.5;
        let face_tangent = (edge1 * duv2.y - edge2 * duv1.y) / det;
        let face_bitangent = (edge2 * duv1.x - edge1 * duv2.x) / det;
        for &vertex in &vertices {
            tangents[vertex] += face_tangent * area;
            bitangents[vertex] += face_bitangent * area;
        }
    }

    geometry
        .loops
        .iter()
        .enumerate()
        .map(|(index, l)| -> Result<LoopTangent, TangentError> {
            let vertex = l.vertex as usize;
            let accumulated = *tangents
                .get(vertex)
                .ok_or(TangentError::InvalidLoop(index))?;
            Ok(orthonormalize(l.normal.into(), accumulated, bitangents[vertex]))
        })
        .collect()
}

/// Builds an orthonormal tangent frame around the normal.
fn orthonormalize(
    normal: Vector3<f32>,
    tangent: Vector3<f32>,
    bitangent: Vector3<f32>,
) -> LoopTangent {
    let normal = if normal.magnitude2() > EPSILON {
        normal.normalize()
    } else {
        Vector3::unit_z()
    };
    let projected = tangent - normal * normal.dot(tangent);
    let tangent = if projected.magnitude2() > EPSILON {
        projected.normalize()
    } else {
        // Pick any direction perpendicular to the normal.
        let up = if normal.x.abs() > 0.9 {
            Vector3::unit_y()
        } else {
            Vector3::unit_x()
        };
        (up - normal * normal.dot(up)).normalize()
    };
    let sign = if normal.cross(tangent).dot(bitangent) < 0.0 {
        -1.0
    } else {
        1.0
    };
    LoopTangent {
        tangent,
        bitangent: normal.cross(tangent) * sign,
    }
}
