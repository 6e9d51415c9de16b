//! Errors and warnings.

use std::{fmt, io, path::PathBuf};

use log::warn;
use thiserror::Error;

/// Integer width of a WOM primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    /// Signed 8-bit.
    Byte,
    /// Signed 16-bit.
    Short16,
    /// Signed 32-bit.
    Int32,
}

impl Width {
    /// Returns the inclusive range of the width.
    pub fn range(self) -> (i64, i64) {
        match self {
            Width::Byte => (i8::MIN.into(), i8::MAX.into()),
            Width::Short16 => (i16::MIN.into(), i16::MAX.into()),
            Width::Int32 => (i32::MIN.into(), i32::MAX.into()),
        }
    }

    /// Returns whether the value fits the width.
    pub fn contains(self, value: i64) -> bool {
        let (min, max) = self.range();
        (min..=max).contains(&value)
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Width::Byte => "byte",
            Width::Short16 => "short",
            Width::Int32 => "integer",
        };
        f.write_str(s)
    }
}

/// Fatal export error.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Value does not fit the wire format.
    #[error("tried to write {width} that was out of range: {value}")]
    Range {
        /// Width of the field.
        width: Width,
        /// Rejected value.
        value: i64,
    },
    /// Vertex without UV coordinates.
    #[error("vertex {vertex} of mesh {mesh:?} has no UV coordinates")]
    MissingUv {
        /// Mesh name.
        mesh: String,
        /// Source vertex index.
        vertex: u32,
    },
    /// Broken references inside the mesh geometry.
    #[error("invalid geometry in mesh {mesh:?}: {message}")]
    InvalidGeometry {
        /// Mesh name.
        mesh: String,
        /// Description.
        message: String,
    },
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    /// Creates a range error.
    pub(crate) fn range(width: Width, value: i64) -> Self {
        ExportError::Range { width, value }
    }

    /// Creates an invalid geometry error.
    pub(crate) fn invalid_geometry(mesh: &str, message: impl Into<String>) -> Self {
        ExportError::InvalidGeometry {
            mesh: mesh.to_owned(),
            message: message.into(),
        }
    }
}

/// Non-fatal condition reported during export.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Warning {
    /// Texture file to copy does not exist.
    #[error("image file not found: {}", path.display())]
    AssetMissing {
        /// Resolved source path.
        path: PathBuf,
    },
    /// Material has no image texture.
    #[error("no texture found for material {material:?}")]
    NoTexture {
        /// Material name.
        material: String,
    },
    /// Texture file extension is not a known image format.
    #[error("texture {} is not a recognized image format", path.display())]
    UnrecognizedImageFormat {
        /// Resolved texture path.
        path: PathBuf,
    },
    /// Tangent computation failed; the mesh is written without tangents.
    #[error("tangent computation failed for mesh {mesh:?}, no tangents will be exported: {reason}")]
    TangentComputation {
        /// Mesh name.
        mesh: String,
        /// Failure reason.
        reason: String,
    },
    /// Faces which are not triangles were skipped.
    #[error("mesh {mesh:?} has {skipped} face(s) that are not triangles, skipped")]
    NonTriangularFaces {
        /// Mesh name.
        mesh: String,
        /// Number of skipped faces.
        skipped: usize,
    },
}

/// Warnings collected during an export.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Warnings {
    /// Warnings in the order they were raised.
    list: Vec<Warning>,
}

impl Warnings {
    /// Creates an empty `Warnings`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and records a warning.
    pub fn push(&mut self, warning: Warning) {
        warn!("{}", warning);
        self.list.push(warning);
    }

    /// Returns the recorded warnings.
    pub fn as_slice(&self) -> &[Warning] {
        &self.list
    }

    /// Returns the recorded warnings.
    pub fn into_vec(self) -> Vec<Warning> {
        self.list
    }
}
