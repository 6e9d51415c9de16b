//! WOM exporter.

use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use clap::Parser;
use log::info;

use wom_exporter::{scene_file, wom, CliOpt, ExportConfig, Exporter};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    info!("version: {}", env!("CARGO_PKG_VERSION"));

    let opt = CliOpt::parse();
    info!("Scene: {}", opt.scene_path.display());

    let scene = scene_file::load(&opt.scene_path)?;
    let config = ExportConfig::from(&opt);
    let report = Exporter::new(&scene, config)
        .export(&opt.output)
        .with_context(|| format!("Failed to export to {}", opt.output.display()))?;
    info!(
        "Wrote {} mesh(es), {} bytes, {} warning(s)",
        report.meshes.len(),
        report.bytes_written,
        report.warnings.len()
    );

    if opt.verify {
        verify(&opt.output)?;
    }

    Ok(())
}

/// Decodes the written file and logs a summary.
fn verify(path: &Path) -> anyhow::Result<()> {
    let file = BufReader::new(File::open(path)?);
    let decoded =
        wom::read(file).with_context(|| format!("Failed to decode {}", path.display()))?;
    for mesh in &decoded.meshes {
        info!(
            "Verified mesh {:?}: {} vertices, {} triangles, {} material(s)",
            mesh.name,
            mesh.vertices.len(),
            mesh.triangles.len(),
            mesh.materials.len()
        );
    }
    Ok(())
}
