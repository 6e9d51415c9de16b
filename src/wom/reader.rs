//! Decoder.

use std::{
    convert::TryFrom,
    io::{self, Read},
    string::FromUtf8Error,
};

use byteorder::{LittleEndian, ReadBytesExt};
use thiserror::Error;

/// WOM decoding error.
#[derive(Debug, Error)]
pub enum ReadError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// String is not valid UTF-8.
    #[error("invalid UTF-8 string: {0}")]
    Utf8(#[from] FromUtf8Error),
    /// Negative count or length.
    #[error("negative {what}: {value}")]
    NegativeLength {
        /// Field name.
        what: &'static str,
        /// Value read.
        value: i32,
    },
    /// Index count is not a multiple of three.
    #[error("index count {0} is not a multiple of 3")]
    IndexCount(i32),
    /// Joints are not supported.
    #[error("joints are not supported: joint count {0}")]
    UnsupportedJoints(i32),
    /// Skinning data is not supported.
    #[error("skinning data is not supported (mesh {0})")]
    UnsupportedSkinning(usize),
}

/// Decoded WOM file.
#[derive(Debug, Clone, PartialEq)]
pub struct WomFile {
    /// Meshes.
    pub meshes: Vec<WomMesh>,
    /// Joint count.
    pub joint_count: i32,
    /// Skinning flags, one per mesh.
    pub skinning: Vec<bool>,
}

/// Decoded mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct WomMesh {
    /// Whether vertices carry tangents.
    pub has_tangents: bool,
    /// Whether vertices carry binormals.
    pub has_binormal: bool,
    /// Whether vertices carry colors.
    pub has_vertex_color: bool,
    /// Name.
    pub name: String,
    /// Vertices.
    pub vertices: Vec<WomVertex>,
    /// Triangles.
    pub triangles: Vec<[i16; 3]>,
    /// Materials.
    pub materials: Vec<WomMaterial>,
}

/// Decoded vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WomVertex {
    /// Position.
    pub position: [f32; 3],
    /// Normal.
    pub normal: [f32; 3],
    /// UV, with V already flipped.
    pub uv: [f32; 2],
    /// Color.
    pub color: Option<[f32; 3]>,
    /// Tangent.
    pub tangent: Option<[f32; 3]>,
    /// Binormal.
    pub binormal: Option<[f32; 3]>,
}

/// Decoded material.
#[derive(Debug, Clone, PartialEq)]
pub struct WomMaterial {
    /// Texture file name.
    pub texture_name: String,
    /// Material name.
    pub name: String,
    /// Enabled flag.
    pub enabled: bool,
    /// Emissive color.
    pub emissive: Option<[f32; 4]>,
    /// Shininess.
    pub shininess: Option<f32>,
    /// Specular color.
    pub specular: Option<[f32; 4]>,
    /// Transparency.
    pub transparency: Option<[f32; 4]>,
}

/// Reads a WOM file.
pub fn read(reader: impl Read) -> Result<WomFile, ReadError> {
    let mut r = Reader { inner: reader };

    let mesh_count = r.count("mesh count")?;
    let meshes = (0..mesh_count)
        .map(|_| r.mesh())
        .collect::<Result<Vec<_>, _>>()?;

    let joint_count = r.inner.read_i32::<LittleEndian>()?;
    if joint_count != 0 {
        return Err(ReadError::UnsupportedJoints(joint_count));
    }

    let skinning = (0..mesh_count)
        .map(|i| -> Result<bool, ReadError> {
            match r.flag()? {
                false => Ok(false),
                true => Err(ReadError::UnsupportedSkinning(i)),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WomFile {
        meshes,
        joint_count,
        skinning,
    })
}

/// Primitive reader.
struct Reader<R> {
    /// Source.
    inner: R,
}

impl<R: Read> Reader<R> {
    /// Reads a non-negative count.
    fn count(&mut self, what: &'static str) -> Result<usize, ReadError> {
        let value = self.inner.read_i32::<LittleEndian>()?;
        usize::try_from(value).map_err(|_| ReadError::NegativeLength { what, value })
    }

    /// Reads a byte flag.
    fn flag(&mut self) -> Result<bool, ReadError> {
        Ok(self.inner.read_i8()? != 0)
    }

    /// Reads a float.
    fn float(&mut self) -> Result<f32, ReadError> {
        Ok(self.inner.read_f32::<LittleEndian>()?)
    }

    /// Reads consecutive floats.
    fn floats<const N: usize>(&mut self) -> Result<[f32; N], ReadError> {
        let mut values = [0.0f32; N];
        self.inner.read_f32_into::<LittleEndian>(&mut values)?;
        Ok(values)
    }

    /// Reads consecutive floats if the flag is set.
    fn optional_floats<const N: usize>(
        &mut self,
        present: bool,
    ) -> Result<Option<[f32; N]>, ReadError> {
        if present {
            self.floats().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Reads a length-prefixed string.
    fn string(&mut self) -> Result<String, ReadError> {
        let len = self.count("string length")?;
        let mut bytes = vec![0u8; len];
        self.inner.read_exact(&mut bytes)?;
        Ok(String::from_utf8(bytes)?)
    }

    /// Reads a mesh block including its materials.
    fn mesh(&mut self) -> Result<WomMesh, ReadError> {
        let has_tangents = self.flag()?;
        let has_binormal = self.flag()?;
        let has_vertex_color = self.flag()?;
        let name = self.string()?;

        let vertex_count = self.count("vertex count")?;
        let mut vertices = Vec::with_capacity(vertex_count.min(1 << 16));
        for _ in 0..vertex_count {
            let position = self.floats()?;
            let normal = self.floats()?;
            let uv = self.floats()?;
            let color = self.optional_floats(has_vertex_color)?;
            let tangent = self.optional_floats(has_tangents)?;
            let binormal = self.optional_floats(has_binormal)?;
            vertices.push(WomVertex {
                position,
                normal,
                uv,
                color,
                tangent,
                binormal,
            });
        }

        let index_count = self.inner.read_i32::<LittleEndian>()?;
        if index_count < 0 || index_count % 3 != 0 {
            return Err(ReadError::IndexCount(index_count));
        }
        let triangles = (0..index_count / 3)
            .map(|_| -> Result<[i16; 3], ReadError> {
                let mut tri = [0i16; 3];
                self.inner.read_i16_into::<LittleEndian>(&mut tri)?;
                Ok(tri)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let material_count = self.count("material count")?;
        let materials = (0..material_count)
            .map(|_| self.material())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(WomMesh {
            has_tangents,
            has_binormal,
            has_vertex_color,
            name,
            vertices,
            triangles,
            materials,
        })
    }

    /// Reads a material record.
    fn material(&mut self) -> Result<WomMaterial, ReadError> {
        let texture_name = self.string()?;
        let name = self.string()?;
        let enabled = self.flag()?;
        let has_emissive = self.flag()?;
        let emissive = self.optional_floats(has_emissive)?;
        let shininess = if self.flag()? {
            Some(self.float()?)
        } else {
            None
        };
        let has_specular = self.flag()?;
        let specular = self.optional_floats(has_specular)?;
        let has_transparency = self.flag()?;
        let transparency = self.optional_floats(has_transparency)?;

        Ok(WomMaterial {
            texture_name,
            name,
            enabled,
            emissive,
            shininess,
            specular,
            transparency,
        })
    }
}
