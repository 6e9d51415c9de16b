//! Mesh encoder.

use std::io::Write;

use log::{debug, error, info};

use crate::{
    data::{GeometryMesh, Mesh, Polygon},
    error::{ExportError, Warning, Warnings, Width},
    export::{
        axis::UpAxis,
        tangent::loop_tangents,
        triangulator::triangulate,
        welder::{table_index, weld, WeldedVertex},
    },
    wom::WomWriter,
    ExportConfig,
};

/// Summary of a written mesh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshSummary {
    /// Written name.
    pub name: String,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Number of faces skipped for not being triangles.
    pub skipped_faces: usize,
    /// Whether tangents and binormals were written.
    pub has_tangents: bool,
    /// Whether vertex colors were written.
    pub has_vertex_color: bool,
}

/// Writes the mesh block (without materials).
///
/// Nothing is written when the mesh cannot be represented.
pub fn write_mesh<W: Write>(
    out: &mut WomWriter<W>,
    mesh: &Mesh,
    name_override: Option<&str>,
    config: &ExportConfig,
    warnings: &mut Warnings,
) -> Result<MeshSummary, ExportError> {
    let name = match name_override {
        Some(name) if !name.is_empty() => {
            info!("Overriding mesh name {:?}", mesh.name);
            name
        }
        _ => mesh.name.as_str(),
    };

    let encoded = EncodedMesh::new(name, &mesh.geometry, config, warnings).map_err(|e| {
        error!("Failed to export mesh {:?}: {}", name, e);
        e
    })?;
    encoded.write(out, UpAxis::from_config(config))?;

    Ok(encoded.summary())
}

/// Mesh validated and converted to the vertex table layout.
#[derive(Debug)]
struct EncodedMesh<'a> {
    /// Name.
    name: &'a str,
    /// Whether the vertices carry tangents and bitangents.
    has_tangents: bool,
    /// Whether the vertices carry colors.
    has_vertex_color: bool,
    /// Welded vertices, sorted by source index.
    vertices: Vec<WeldedVertex>,
    /// Triangles as vertex table indices.
    triangles: Vec<[u16; 3]>,
    /// Number of skipped non-triangle faces.
    skipped_faces: usize,
}

impl<'a> EncodedMesh<'a> {
    /// Validates and converts the geometry.
    fn new(
        name: &'a str,
        source: &GeometryMesh,
        config: &ExportConfig,
        warnings: &mut Warnings,
    ) -> Result<Self, ExportError> {
        let geometry = triangulate(source)
            .map_err(|e| ExportError::invalid_geometry(name, format!("{:#}", e)))?;

        let skipped_faces = geometry.non_triangle_count();
        let loop_triangles: Vec<_> = geometry
            .polygons
            .iter()
            .filter_map(Polygon::as_triangle)
            .collect();
        if skipped_faces > 0 {
            warnings.push(Warning::NonTriangularFaces {
                mesh: name.to_owned(),
                skipped: skipped_faces,
            });
        }

        let tangents = if config.use_tangent_arrays {
            match loop_tangents(&geometry) {
                Ok(tangents) => Some(tangents),
                Err(e) => {
                    warnings.push(Warning::TangentComputation {
                        mesh: name.to_owned(),
                        reason: e.to_string(),
                    });
                    None
                }
            }
        } else {
            None
        };
        let has_vertex_color = !geometry.color_layers.is_empty();

        let vertices = weld(
            name,
            &geometry,
            &loop_triangles,
            tangents.as_deref(),
            has_vertex_color,
        )?;

        let triangles = loop_triangles
            .iter()
            .map(|tri| -> Result<[u16; 3], ExportError> {
                let mut indices = [0u16; 3];
                for (index, &l) in indices.iter_mut().zip(tri) {
                    let vertex = geometry.loop_vertex(l).ok_or_else(|| {
                        ExportError::invalid_geometry(name, format!("loop {} does not exist", l))
                    })?;
                    let value = if config.compact_indices {
                        let table = table_index(&vertices, vertex).ok_or_else(|| {
                            ExportError::invalid_geometry(
                                name,
                                format!("vertex {} was not welded", vertex),
                            )
                        })?;
                        table as i64
                    } else {
                        i64::from(vertex)
                    };
                    if !Width::Short16.contains(value) {
                        error!(
                            "Mesh {:?} has too many vertices and can't be represented in WOM",
                            name
                        );
                        return Err(ExportError::range(Width::Short16, value));
                    }
                    *index = value as u16;
                }
                Ok(indices)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            has_tangents: tangents.is_some(),
            has_vertex_color,
            vertices,
            triangles,
            skipped_faces,
        })
    }

    /// Writes the mesh block.
    fn write<W: Write>(&self, out: &mut WomWriter<W>, axis: UpAxis) -> Result<(), ExportError> {
        let has_binormal = self.has_tangents;
        out.write_bool(self.has_tangents)?;
        out.write_bool(has_binormal)?;
        out.write_bool(self.has_vertex_color)?;
        out.write_string(self.name)?;
        info!("Mesh name:\t{}", self.name);
        debug!("Has tangents:\t{}", self.has_tangents);
        debug!("Has binormals:\t{}", has_binormal);
        debug!("Has colors:\t{}", self.has_vertex_color);

        out.write_count(self.vertices.len())?;
        info!("Vertices:\t{}", self.vertices.len());
        for v in &self.vertices {
            let p = axis.position(v.position);
            out.write_floats(&[p.x, p.y, p.z])?;
            let n = axis.normal(v.normal);
            out.write_floats(&[n.x, n.y, n.z])?;

            let uv = v.uv.first().ok_or_else(|| ExportError::MissingUv {
                mesh: self.name.to_owned(),
                vertex: v.index,
            })?;
            out.write_floats(&[uv.x, 1.0 - uv.y])?;

            if self.has_vertex_color {
                let c = v.color.map(|c| [c.r, c.g, c.b]).unwrap_or_default();
                out.write_floats(&c)?;
            }
            if self.has_tangents {
                let t: [f32; 3] = v.tangent.map(Into::into).unwrap_or_default();
                out.write_floats(&t)?;
            }
            if has_binormal {
                let b: [f32; 3] = v.bitangent.map(Into::into).unwrap_or_default();
                out.write_floats(&b)?;
            }
        }

        info!("Triangles:\t{}", self.triangles.len());
        out.write_count(self.triangles.len() * 3)?;
        for &tri in &self.triangles {
            for &index in &axis.triangle(tri) {
                out.write_short16(i64::from(index))?;
            }
        }

        Ok(())
    }

    /// Returns the summary of the mesh.
    fn summary(&self) -> MeshSummary {
        MeshSummary {
            name: self.name.to_owned(),
            vertex_count: self.vertices.len(),
            triangle_count: self.triangles.len(),
            skipped_faces: self.skipped_faces,
            has_tangents: self.has_tangents,
            has_vertex_color: self.has_vertex_color,
        }
    }
}
