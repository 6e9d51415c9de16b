//! WOM binary format.
//!
//! Every value is little-endian. Strings are a 32-bit byte length followed by
//! the UTF-8 bytes, without terminator.

pub use self::{
    reader::{read, ReadError, WomFile, WomMaterial, WomMesh, WomVertex},
    writer::WomWriter,
};

mod reader;
mod writer;

/// Texture name written when a material has no image texture.
pub const PLACEHOLDER_TEXTURE_NAME: &str = "something";
