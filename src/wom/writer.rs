//! Primitive writer.

use std::{
    convert::TryFrom,
    io::{self, Write},
};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{ExportError, Width};

/// Little-endian writer of WOM primitives.
///
/// Range checks happen before anything is written, so a rejected value
/// leaves the stream untouched.
#[derive(Debug)]
pub struct WomWriter<W> {
    /// Destination.
    inner: W,
    /// Number of bytes written so far.
    position: u64,
}

impl<W: Write> WomWriter<W> {
    /// Creates a new `WomWriter`.
    pub fn new(inner: W) -> Self {
        Self { inner, position: 0 }
    }

    /// Returns the number of bytes written so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Writes a signed 8-bit integer.
    pub fn write_byte(&mut self, v: i64) -> Result<(), ExportError> {
        let v = checked(Width::Byte, v)? as i8;
        self.inner.write_i8(v)?;
        self.position += 1;
        Ok(())
    }

    /// Writes a boolean as a byte.
    pub fn write_bool(&mut self, v: bool) -> Result<(), ExportError> {
        self.write_byte(if v { 1 } else { 0 })
    }

    /// Writes a 32-bit float.
    pub fn write_float(&mut self, v: f32) -> Result<(), ExportError> {
        self.inner.write_f32::<LittleEndian>(v)?;
        self.position += 4;
        Ok(())
    }

    /// Writes floats in order.
    pub fn write_floats(&mut self, values: &[f32]) -> Result<(), ExportError> {
        values.iter().try_for_each(|&v| self.write_float(v))
    }

    /// Writes a signed 32-bit integer.
    pub fn write_int32(&mut self, v: i64) -> Result<(), ExportError> {
        let v = checked(Width::Int32, v)? as i32;
        self.inner.write_i32::<LittleEndian>(v)?;
        self.position += 4;
        Ok(())
    }

    /// Writes a count as a signed 32-bit integer.
    pub fn write_count(&mut self, count: usize) -> Result<(), ExportError> {
        self.write_int32(i64::try_from(count).unwrap_or(i64::MAX))
    }

    /// Writes a signed 16-bit integer.
    pub fn write_short16(&mut self, v: i64) -> Result<(), ExportError> {
        let v = checked(Width::Short16, v)? as i16;
        self.inner.write_i16::<LittleEndian>(v)?;
        self.position += 2;
        Ok(())
    }

    /// Writes a length-prefixed UTF-8 string.
    pub fn write_string(&mut self, s: &str) -> Result<(), ExportError> {
        let bytes = s.as_bytes();
        self.write_count(bytes.len())?;
        self.inner.write_all(bytes)?;
        self.position += bytes.len() as u64;
        Ok(())
    }

    /// Flushes the writer and returns the destination.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Checks the value against the width.
fn checked(width: Width, v: i64) -> Result<i64, ExportError> {
    if width.contains(v) {
        Ok(v)
    } else {
        Err(ExportError::range(width, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn writer() -> WomWriter<Vec<u8>> {
        WomWriter::new(Vec::new())
    }

    #[test]
    fn little_endian_integers() {
        let mut w = writer();
        w.write_byte(-2).unwrap();
        w.write_short16(0x1234).unwrap();
        w.write_int32(-2).unwrap();
        assert_eq!(w.position(), 7);
        assert_eq!(
            w.finish().unwrap(),
            [0xfe, 0x34, 0x12, 0xfe, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn float_passes_through_special_values() {
        let mut w = writer();
        w.write_float(1.0).unwrap();
        w.write_float(f32::INFINITY).unwrap();
        w.write_float(f32::NAN).unwrap();
        let bytes = w.finish().unwrap();
        assert_eq!(bytes[..4], [0x00, 0x00, 0x80, 0x3f]);
        assert_eq!(bytes[4..8], [0x00, 0x00, 0x80, 0x7f]);
        assert!(f32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]).is_nan());
    }

    #[test]
    fn string_is_length_prefixed_utf8() {
        let mut w = writer();
        w.write_string("héllo").unwrap();
        let bytes = w.finish().unwrap();
        assert_eq!(bytes[..4], [6, 0, 0, 0]);
        assert_eq!(&bytes[4..], "héllo".as_bytes());
    }

    #[test]
    fn empty_string() {
        let mut w = writer();
        w.write_string("").unwrap();
        assert_eq!(w.finish().unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn out_of_range_values_write_nothing() {
        let mut w = writer();
        assert!(matches!(
            w.write_byte(128),
            Err(ExportError::Range {
                width: Width::Byte,
                value: 128
            })
        ));
        assert!(w.write_byte(-129).is_err());
        assert!(matches!(
            w.write_short16(32768),
            Err(ExportError::Range {
                width: Width::Short16,
                value: 32768
            })
        ));
        assert!(w.write_short16(-32769).is_err());
        assert!(w.write_int32(i64::from(i32::MAX) + 1).is_err());
        assert!(w.write_int32(i64::from(i32::MIN) - 1).is_err());
        assert_eq!(w.position(), 0);
        assert!(w.finish().unwrap().is_empty());
    }

    #[test]
    fn bounds_are_inclusive() {
        let mut w = writer();
        w.write_byte(-128).unwrap();
        w.write_byte(127).unwrap();
        w.write_short16(-32768).unwrap();
        w.write_short16(32767).unwrap();
        w.write_int32(i64::from(i32::MIN)).unwrap();
        w.write_int32(i64::from(i32::MAX)).unwrap();
        assert_eq!(w.position(), 2 + 4 + 8);
    }
}
