//! Primitive reader
//!
//! Consumes tagged or untagged scalars from a borrowed byte slice.
//! Every read checks the remaining length first, so a short buffer
//! surfaces as `LengthMismatch` rather than a panic.

use bytes::Buf;

use crate::error::{Result, WireError};
use super::{ByteOrder, WireType};

/// Cursor over one decode call's bytes
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> WireReader<'a> {
    pub fn new(buf: &'a [u8], order: ByteOrder) -> Self {
        Self { buf, pos: 0, order }
    }

    pub fn order(&self) -> ByteOrder {
        self.order
    }

    /// Bytes consumed so far
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to consume
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail unless every byte has been consumed
    pub fn expect_end(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(WireError::LengthMismatch {
                expected: self.pos,
                actual: self.buf.len(),
            })
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(WireError::LengthMismatch {
                expected: n,
                actual: self.remaining(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Look at the next byte without consuming it
    pub fn peek_tag(&self) -> Result<u8> {
        self.buf.get(self.pos).copied().ok_or(WireError::LengthMismatch {
            expected: 1,
            actual: 0,
        })
    }

    /// Consume a tag and verify it
    pub fn expect_tag(&mut self, ty: WireType) -> Result<()> {
        let actual = self.peek_tag()?;
        if actual != ty.tag() {
            return Err(WireError::TypeMismatch {
                expected: ty.tag(),
                actual,
            });
        }
        self.pos += 1;
        Ok(())
    }

    fn check_tag(&mut self, ty: WireType, tagged: bool) -> Result<()> {
        if tagged {
            self.expect_tag(ty)?;
        }
        Ok(())
    }

    // =========================================================================
    // Scalars
    // =========================================================================

    pub fn read_bool(&mut self, tagged: bool) -> Result<bool> {
        self.check_tag(WireType::Bool, tagged)?;
        Ok(self.take(1)?[0] != 0)
    }

    pub fn read_byte(&mut self, tagged: bool) -> Result<u8> {
        self.check_tag(WireType::Byte, tagged)?;
        Ok(self.take(1)?[0])
    }

    pub fn read_char(&mut self, tagged: bool) -> Result<u16> {
        self.check_tag(WireType::Char, tagged)?;
        self.read_u16()
    }

    pub fn read_short(&mut self, tagged: bool) -> Result<i16> {
        self.check_tag(WireType::Short, tagged)?;
        let mut bytes = self.take(2)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_i16(),
            ByteOrder::Little => bytes.get_i16_le(),
        })
    }

    pub fn read_int(&mut self, tagged: bool) -> Result<i32> {
        self.check_tag(WireType::Int, tagged)?;
        let mut bytes = self.take(4)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_i32(),
            ByteOrder::Little => bytes.get_i32_le(),
        })
    }

    pub fn read_long(&mut self, tagged: bool) -> Result<i64> {
        self.check_tag(WireType::Long, tagged)?;
        let mut bytes = self.take(8)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_i64(),
            ByteOrder::Little => bytes.get_i64_le(),
        })
    }

    pub fn read_float(&mut self, tagged: bool) -> Result<f32> {
        self.check_tag(WireType::Float, tagged)?;
        let mut bytes = self.take(4)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_f32(),
            ByteOrder::Little => bytes.get_f32_le(),
        })
    }

    pub fn read_double(&mut self, tagged: bool) -> Result<f64> {
        self.check_tag(WireType::Double, tagged)?;
        let mut bytes = self.take(8)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_f64(),
            ByteOrder::Little => bytes.get_f64_le(),
        })
    }

    /// Read a 2-byte length and that many single-byte code units
    pub fn read_string(&mut self, tagged: bool) -> Result<String> {
        self.check_tag(WireType::String, tagged)?;
        let len = self.read_u16()? as usize;
        let bytes = self.take(len)?;
        Ok(bytes.iter().map(|&b| char::from(b)).collect())
    }

    /// Read exactly `len` verbatim bytes
    pub fn read_raw(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Read an untagged unsigned 4-byte length
    pub fn read_len(&mut self) -> Result<usize> {
        let mut bytes = self.take(4)?;
        let len = match self.order {
            ByteOrder::Big => bytes.get_u32(),
            ByteOrder::Little => bytes.get_u32_le(),
        };
        Ok(len as usize)
    }

    /// Read a 4-byte length and return a reader over exactly that block
    pub fn read_block(&mut self) -> Result<WireReader<'a>> {
        let len = self.read_len()?;
        let block = self.take(len)?;
        Ok(WireReader::new(block, self.order))
    }

    fn read_u16(&mut self) -> Result<u16> {
        let mut bytes = self.take(2)?;
        Ok(match self.order {
            ByteOrder::Big => bytes.get_u16(),
            ByteOrder::Little => bytes.get_u16_le(),
        })
    }
}
