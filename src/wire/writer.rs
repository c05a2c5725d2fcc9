//! Primitive writer
//!
//! Appends tagged or untagged scalars to a growable buffer.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{Result, WireError};
use super::{ByteOrder, WireType};

/// Largest string length representable by the 2-byte prefix
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Append-only buffer for one encode call
pub struct WireWriter {
    buf: BytesMut,
    order: ByteOrder,
}

impl WireWriter {
    pub fn new(order: ByteOrder) -> Self {
        Self::with_capacity(order, 64)
    }

    pub fn with_capacity(order: ByteOrder, capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            order,
        }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// View the bytes written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Take the written bytes as-is
    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }

    /// Take the written bytes behind a 4-byte length prefix
    pub fn finish_prefixed(self) -> Result<Bytes> {
        let len = u32::try_from(self.buf.len()).map_err(|_| WireError::Range {
            wire_type: WireType::Int,
            value: self.buf.len().to_string(),
        })?;

        let mut out = BytesMut::with_capacity(4 + self.buf.len());
        match self.order {
            ByteOrder::Big => out.put_u32(len),
            ByteOrder::Little => out.put_u32_le(len),
        }
        out.extend_from_slice(&self.buf);
        Ok(out.freeze())
    }

    fn put_tag(&mut self, ty: WireType, tagged: bool) {
        if tagged {
            self.buf.put_u8(ty.tag());
        }
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    pub fn write_bool(&mut self, value: bool, tagged: bool) {
        self.put_tag(WireType::Bool, tagged);
        self.buf.put_u8(u8::from(value));
    }

    pub fn write_byte(&mut self, value: u8, tagged: bool) {
        self.put_tag(WireType::Byte, tagged);
        self.buf.put_u8(value);
    }

    /// Write a single 16-bit code unit
    pub fn write_char(&mut self, value: u16, tagged: bool) {
        self.put_tag(WireType::Char, tagged);
        self.put_u16(value);
    }

    pub fn write_short(&mut self, value: i16, tagged: bool) {
        self.put_tag(WireType::Short, tagged);
        match self.order {
            ByteOrder::Big => self.buf.put_i16(value),
            ByteOrder::Little => self.buf.put_i16_le(value),
        }
    }

    pub fn write_int(&mut self, value: i32, tagged: bool) {
        self.put_tag(WireType::Int, tagged);
        match self.order {
            ByteOrder::Big => self.buf.put_i32(value),
            ByteOrder::Little => self.buf.put_i32_le(value),
        }
    }

    pub fn write_long(&mut self, value: i64, tagged: bool) {
        self.put_tag(WireType::Long, tagged);
        match self.order {
            ByteOrder::Big => self.buf.put_i64(value),
            ByteOrder::Little => self.buf.put_i64_le(value),
        }
    }

    pub fn write_float(&mut self, value: f32, tagged: bool) {
        self.put_tag(WireType::Float, tagged);
        match self.order {
            ByteOrder::Big => self.buf.put_f32(value),
            ByteOrder::Little => self.buf.put_f32_le(value),
        }
    }

    pub fn write_double(&mut self, value: f64, tagged: bool) {
        self.put_tag(WireType::Double, tagged);
        match self.order {
            ByteOrder::Big => self.buf.put_f64(value),
            ByteOrder::Little => self.buf.put_f64_le(value),
        }
    }

    /// Write a string as a 2-byte length plus one byte per code unit
    ///
    /// Fails with a range error for code units above 0xFF or strings
    /// longer than 65535 code units. Nothing is written on failure.
    pub fn write_string(&mut self, value: &str, tagged: bool) -> Result<()> {
        let mut narrow = Vec::with_capacity(value.len());
        for c in value.chars() {
            let unit = u8::try_from(u32::from(c)).map_err(|_| WireError::Range {
                wire_type: WireType::String,
                value: format!("{:?} (code unit U+{:04X})", value, u32::from(c)),
            })?;
            narrow.push(unit);
        }

        if narrow.len() > MAX_STRING_LEN {
            return Err(WireError::Range {
                wire_type: WireType::String,
                value: format!("string of {} code units", narrow.len()),
            });
        }

        self.put_tag(WireType::String, tagged);
        self.put_u16(narrow.len() as u16);
        self.buf.extend_from_slice(&narrow);
        Ok(())
    }

    /// Copy bytes verbatim (no tag, no length)
    pub fn write_raw(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }

    /// Write an untagged 4-byte length followed by an encoded block
    pub fn write_block(&mut self, block: &[u8]) -> Result<()> {
        let len = u32::try_from(block.len()).map_err(|_| WireError::Range {
            wire_type: WireType::Int,
            value: block.len().to_string(),
        })?;
        match self.order {
            ByteOrder::Big => self.buf.put_u32(len),
            ByteOrder::Little => self.buf.put_u32_le(len),
        }
        self.buf.extend_from_slice(block);
        Ok(())
    }

    /// Write a bare tag byte (for extended types that frame their own payload)
    pub fn write_tag(&mut self, ty: WireType) {
        self.buf.put_u8(ty.tag());
    }

    fn put_u16(&mut self, value: u16) {
        match self.order {
            ByteOrder::Big => self.buf.put_u16(value),
            ByteOrder::Little => self.buf.put_u16_le(value),
        }
    }
}
