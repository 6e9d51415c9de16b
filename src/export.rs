//! Export.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::{debug, error, info};

use crate::{
    data::{Mesh, ObjectType, SceneObject, SceneProvider},
    error::{ExportError, Warning, Warnings},
    wom::WomWriter,
    ExportConfig,
};

pub use self::{
    material::{copy_image, material_record, MaterialRecord},
    mesh::{write_mesh, MeshSummary},
};

pub mod axis;
pub mod material;
pub mod mesh;
pub mod tangent;
pub mod triangulator;
pub mod welder;

/// Result of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Written meshes, in file order.
    pub meshes: Vec<MeshSummary>,
    /// Non-fatal conditions met during the export.
    pub warnings: Vec<Warning>,
    /// Size of the written file.
    pub bytes_written: u64,
}

/// Exports a scene to WOM.
#[derive(Debug)]
pub struct Exporter<'a, S: ?Sized> {
    /// Scene.
    scene: &'a S,
    /// Configuration.
    config: ExportConfig,
}

impl<'a, S: SceneProvider + ?Sized> Exporter<'a, S> {
    /// Creates a new `Exporter`.
    pub fn new(scene: &'a S, config: ExportConfig) -> Self {
        Self { scene, config }
    }

    /// Returns the mesh objects to export, sorted by object name.
    pub fn meshes(&self) -> Vec<(&'a SceneObject, &'a Mesh)> {
        let mut meshes: Vec<_> = self
            .scene
            .objects()
            .iter()
            .filter(|obj| !self.config.use_export_selected || obj.selected)
            .filter_map(|obj| match obj.mesh() {
                Some(mesh) => Some((obj, mesh)),
                None => {
                    let ty = obj.object_type();
                    if self.config.object_types.contains(&ty) && ty != ObjectType::Mesh {
                        debug!("Object {:?} ({}) has no mesh data, skipped", obj.name, ty);
                    }
                    None
                }
            })
            .collect();
        meshes.sort_by(|(a, _), (b, _)| a.name.cmp(&b.name));
        meshes
    }

    /// Exports the scene to the given file.
    ///
    /// Copied images are placed next to the file.
    pub fn export(&self, path: impl AsRef<Path>) -> Result<ExportReport, ExportError> {
        self.export_impl(path.as_ref()).map_err(|e| {
            error!("Export failed: {}", e);
            e
        })
    }

    /// Exports the scene to the given file.
    fn export_impl(&self, path: &Path) -> Result<ExportReport, ExportError> {
        info!("Exporting to {}", path.display());
        let output_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        let file = BufWriter::new(File::create(path)?);
        let (report, file) = self.write_to(file, output_dir)?;
        file.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        info!("Export finished: {} bytes", report.bytes_written);
        Ok(report)
    }

    /// Writes the scene to the given writer.
    ///
    /// `output_dir` is where images are copied to.
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        output_dir: &Path,
    ) -> Result<(ExportReport, W), ExportError> {
        let mut out = WomWriter::new(writer);
        let mut warnings = Warnings::new();

        let meshes = self.meshes();
        out.write_count(meshes.len())?;
        info!("Meshes:\t{}", meshes.len());

        let mut summaries = Vec::with_capacity(meshes.len());
        for (i, (obj, mesh)) in meshes.iter().enumerate() {
            debug!("Object {:?}", obj.name);
            let fixed_name = format!("mesh_{}", i);
            let name_override = if self.config.fix_mesh_names {
                Some(fixed_name.as_str())
            } else {
                None
            };
            summaries.push(write_mesh(
                &mut out,
                mesh,
                name_override,
                &self.config,
                &mut warnings,
            )?);
            self.write_materials(&mut out, mesh, output_dir, &mut warnings)?;
        }

        // Joints and skinning are never exported.
        out.write_count(0)?;
        for _ in &meshes {
            out.write_bool(false)?;
        }

        let bytes_written = out.position();
        let writer = out.finish()?;
        let report = ExportReport {
            meshes: summaries,
            warnings: warnings.into_vec(),
            bytes_written,
        };
        Ok((report, writer))
    }

    /// Writes the material list of a mesh.
    fn write_materials<W: Write>(
        &self,
        out: &mut WomWriter<W>,
        mesh: &Mesh,
        output_dir: &Path,
        warnings: &mut Warnings,
    ) -> Result<(), ExportError> {
        out.write_count(mesh.materials.len())?;
        info!("Materials:\t{}", mesh.materials.len());
        for slot in &mesh.materials {
            let material = if self.config.duplicate_first_material {
                &mesh.materials[0]
            } else {
                slot
            };
            material_record(material, self.scene, &self.config, output_dir, warnings)?
                .write(out)?;
        }
        Ok(())
    }
}
