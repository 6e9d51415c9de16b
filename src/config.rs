//! Export configuration.

use std::collections::BTreeSet;

use crate::{data::ObjectType, CliOpt};

/// Export configuration.
///
/// Built once per export and shared by reference with every encoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Object types to consider.
    ///
    /// Only meshes are ever written.
    pub object_types: BTreeSet<ObjectType>,
    /// Rename meshes to `mesh_0`, `mesh_1`, ...
    pub fix_mesh_names: bool,
    /// Export tangent and binormal arrays.
    pub use_tangent_arrays: bool,
    /// Export only selected objects.
    pub use_export_selected: bool,
    /// Copy textures next to the output file.
    pub use_copy_images: bool,
    /// Use Y as the up axis instead of Z.
    pub use_y_is_up: bool,
    /// Write the first material slot for every slot of a mesh.
    pub duplicate_first_material: bool,
    /// Write triangle indices as positions in the written vertex table
    /// instead of source vertex indices.
    ///
    /// Meshes with unreferenced vertices only decode correctly with this set.
    pub compact_indices: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            object_types: ObjectType::ALL.iter().copied().collect(),
            fix_mesh_names: false,
            use_tangent_arrays: false,
            use_export_selected: false,
            use_copy_images: false,
            use_y_is_up: false,
            duplicate_first_material: true,
            compact_indices: false,
        }
    }
}

impl From<&CliOpt> for ExportConfig {
    fn from(opt: &CliOpt) -> Self {
        let object_types = if opt.object_types.is_empty() {
            ObjectType::ALL.iter().copied().collect()
        } else {
            opt.object_types.iter().copied().collect()
        };
        Self {
            object_types,
            fix_mesh_names: opt.fix_mesh_names,
            use_tangent_arrays: opt.tangents,
            use_export_selected: opt.selected,
            use_copy_images: opt.copy_images,
            use_y_is_up: opt.y_up,
            duplicate_first_material: !opt.all_material_slots,
            compact_indices: opt.compact_indices,
        }
    }
}
