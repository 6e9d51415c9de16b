//! Material encoder.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, error, info};
use rgb::RGBA;

use crate::{
    data::{Material, SceneProvider},
    error::{ExportError, Warning, Warnings},
    wom::{WomWriter, PLACEHOLDER_TEXTURE_NAME},
    ExportConfig,
};

/// Material record as stored in the file.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRecord {
    /// Texture file name.
    pub texture_name: String,
    /// Material name.
    pub name: String,
    /// Enabled flag.
    pub enabled: bool,
    /// Emissive color.
    pub emissive: Option<RGBA<f32>>,
    /// Shininess.
    pub shininess: Option<f32>,
    /// Specular color.
    pub specular: Option<RGBA<f32>>,
    /// Transparency.
    pub transparency: Option<RGBA<f32>>,
}

impl MaterialRecord {
    /// Creates an enabled record without optional properties.
    pub fn new(texture_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            texture_name: texture_name.into(),
            name: name.into(),
            enabled: true,
            emissive: None,
            shininess: None,
            specular: None,
            transparency: None,
        }
    }

    /// Writes the record.
    pub fn write<W: Write>(&self, out: &mut WomWriter<W>) -> Result<(), ExportError> {
        out.write_string(&self.texture_name)?;
        out.write_string(&self.name)?;
        info!("Material name:\t{:?}", self.name);
        info!("Texture name:\t{:?}", self.texture_name);
        out.write_bool(self.enabled)?;

        write_color(out, "Emissive", self.emissive)?;
        out.write_bool(self.shininess.is_some())?;
        if let Some(shininess) = self.shininess {
            debug!("Shininess:\t{}", shininess);
            out.write_float(shininess)?;
        }
        write_color(out, "Specular", self.specular)?;
        write_color(out, "Transparency", self.transparency)?;

        Ok(())
    }
}

/// Writes an optional RGBA block.
fn write_color<W: Write>(
    out: &mut WomWriter<W>,
    label: &str,
    color: Option<RGBA<f32>>,
) -> Result<(), ExportError> {
    out.write_bool(color.is_some())?;
    if let Some(c) = color {
        debug!("{}:\t{}\t{}\t{}\t{}", label, c.r, c.g, c.b, c.a);
        out.write_floats(&[c.r, c.g, c.b, c.a])?;
    }
    Ok(())
}

/// Builds the record of a scene material, copying its texture if requested.
pub fn material_record<S: SceneProvider + ?Sized>(
    material: &Material,
    scene: &S,
    config: &ExportConfig,
    output_dir: &Path,
    warnings: &mut Warnings,
) -> Result<MaterialRecord, ExportError> {
    let texture = match material.diffuse_texture() {
        Some(texture) => texture,
        None => {
            warnings.push(Warning::NoTexture {
                material: material.name.clone(),
            });
            return Ok(MaterialRecord::new(PLACEHOLDER_TEXTURE_NAME, &material.name));
        }
    };

    let source = scene.resolve_path(&texture.filepath);
    if image::ImageFormat::from_path(&source).is_err() {
        warnings.push(Warning::UnrecognizedImageFormat {
            path: source.clone(),
        });
    }
    if config.use_copy_images {
        copy_image(&source, output_dir, warnings).map_err(|e| {
            error!("Failed to copy image {}: {}", source.display(), e);
            e
        })?;
    }

    let texture_name = texture.file_name().unwrap_or(PLACEHOLDER_TEXTURE_NAME);
    Ok(MaterialRecord::new(texture_name, &material.name))
}

/// Copies the image into the output directory unless it is already there.
///
/// Returns the destination path when the source exists.
pub fn copy_image(
    source: &Path,
    output_dir: &Path,
    warnings: &mut Warnings,
) -> Result<Option<PathBuf>, ExportError> {
    info!("Copying image: {}", source.display());
    if !output_dir.is_dir() {
        fs::create_dir_all(output_dir)?;
    }

    let file_name = match source.file_name() {
        Some(name) if source.is_file() => name,
        _ => {
            warnings.push(Warning::AssetMissing {
                path: source.to_owned(),
            });
            return Ok(None);
        }
    };
    let destination = output_dir.join(file_name);
    if destination.is_file() {
        debug!("{} already exists, not copied", destination.display());
    } else {
        fs::copy(source, &destination)?;
    }
    Ok(Some(destination))
}
