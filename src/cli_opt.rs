//! CLI options.

use std::path::PathBuf;

use clap::Parser;

use crate::data::ObjectType;

/// CLI options.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct CliOpt {
    /// Scene document (JSON)
    pub scene_path: PathBuf,
    /// Output WOM file
    #[arg(short, long)]
    pub output: PathBuf,
    /// Rename meshes to mesh_0, mesh_1, ...
    #[arg(long)]
    pub fix_mesh_names: bool,
    /// Export tangent and binormal arrays (for normal mapping)
    #[arg(long)]
    pub tangents: bool,
    /// Export only selected objects
    #[arg(long)]
    pub selected: bool,
    /// Copy images to the folder of the output file
    #[arg(long)]
    pub copy_images: bool,
    /// Use the Y axis as up and Z as forward
    #[arg(long)]
    pub y_up: bool,
    /// Write each material slot's own material instead of repeating the first
    #[arg(long)]
    pub all_material_slots: bool,
    /// Write triangle indices relative to the written vertices
    #[arg(long)]
    pub compact_indices: bool,
    /// Object types to consider (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub object_types: Vec<ObjectType>,
    /// Decode the written file and log a summary
    #[arg(long)]
    pub verify: bool,
}
