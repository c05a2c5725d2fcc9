//! Schema-driven Message Engine
//!
//! Encodes and decodes any message by walking its descriptor. There is
//! no per-message code: the field table decides order, width and which
//! fields exist at the negotiated wire version.
//!
//! ## Encoded Message
//! ```text
//! ┌──────────┬──────────┬───────────────────────────────────────┐
//! │ Len (4)  │ Cmd (1)  │ Fields (untagged, in descriptor order)│
//! └──────────┴──────────┴───────────────────────────────────────┘
//! ```
//!
//! Nested fields are length-delimited blocks:
//! - message:       `[len][cmd][fields…]`
//! - message list:  `[len][count]{[len][cmd][fields…]} × count`
//! - property map:  `[len][count]{entries}`

use bytes::Bytes;

use crate::config::CodecConfig;
use crate::error::{Result, WireError};
use crate::schema::{FieldDescriptor, FieldType, MessageDescriptor};
use crate::wire::{ByteOrder, WireReader, WireType, WireValue, WireWriter};
use super::properties::{decode_properties_at, descend, encode_properties};
use super::Message;

/// Encoder/decoder bound to one byte order and wire version
#[derive(Debug, Clone, Copy)]
pub struct MessageEngine {
    config: CodecConfig,
}

impl MessageEngine {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn wire_version(&self) -> u32 {
        self.config.wire_version
    }

    // =========================================================================
    // Encoding
    // =========================================================================

    /// Encode a message behind its 4-byte length prefix
    pub fn encode(&self, message: &Message) -> Result<Bytes> {
        let mut writer = WireWriter::with_capacity(self.config.byte_order, 128);
        self.encode_body(message, &mut writer)?;
        writer.finish_prefixed()
    }

    /// Encode the command byte and fields without a length prefix
    pub fn encode_body(&self, message: &Message, writer: &mut WireWriter) -> Result<()> {
        let descriptor = message.descriptor();
        writer.write_byte(descriptor.command.id(), false);

        for field in descriptor.fields_for(self.config.wire_version) {
            let value = message.get(field.name).ok_or_else(|| WireError::IncompleteValue {
                field: field.name.to_string(),
            })?;

            self.encode_field(field, value, writer)
                .map_err(|e| e.in_field(field.name))?;
        }

        for field in descriptor.fields.iter().filter(|f| !f.is_present_in(self.config.wire_version)) {
            if message.get(field.name).is_some() {
                tracing::trace!(
                    "Skipped {}.{} (since v{}, wire v{})",
                    descriptor.name,
                    field.name,
                    field.since,
                    self.config.wire_version
                );
            }
        }
        for name in message.names().filter(|n| descriptor.field(n).is_none()) {
            tracing::trace!("Ignored {}.{}: not in descriptor", descriptor.name, name);
        }

        Ok(())
    }

    fn encode_field(&self, field: &FieldDescriptor, value: &WireValue, writer: &mut WireWriter) -> Result<()> {
        match field.field_type {
            FieldType::Primitive(ty) => {
                let value = value.coerce(ty)?;
                write_untagged(&value, writer)
            }
            FieldType::Raw(len) => {
                let bytes = match value {
                    WireValue::Raw(bytes) => bytes,
                    other => {
                        return Err(WireError::TypeMismatch {
                            expected: WireType::Raw.tag(),
                            actual: other.wire_type().tag(),
                        })
                    }
                };
                if bytes.len() != len {
                    return Err(WireError::LengthMismatch {
                        expected: len,
                        actual: bytes.len(),
                    });
                }
                writer.write_raw(bytes);
                Ok(())
            }
            FieldType::Message(nested) => {
                let message = match value {
                    WireValue::Message(m) => m,
                    other => return Err(mismatch(WireType::Message, other)),
                };
                let block = self.encode_nested(nested, message, writer.order())?;
                writer.write_block(&block)
            }
            FieldType::MessageList(nested) => {
                let list = match value {
                    WireValue::MessageList(list) => list,
                    other => return Err(mismatch(WireType::MessageList, other)),
                };
                let count = i32::try_from(list.len()).map_err(|_| WireError::Range {
                    wire_type: WireType::Int,
                    value: list.len().to_string(),
                })?;

                let mut inner = WireWriter::new(writer.order());
                inner.write_int(count, false);
                for message in list {
                    let block = self.encode_nested(nested, message, writer.order())?;
                    inner.write_block(&block)?;
                }
                writer.write_block(inner.as_slice())
            }
            FieldType::PropertyMap(specs) => {
                let map = match value {
                    WireValue::Properties(map) => map,
                    other => return Err(mismatch(WireType::PropertyMap, other)),
                };
                let mut inner = WireWriter::new(writer.order());
                encode_properties(map, specs, &mut inner)?;
                writer.write_block(inner.as_slice())
            }
        }
    }

    /// Encode a nested message body, checking it matches the field's descriptor
    fn encode_nested(
        &self,
        expected: &'static MessageDescriptor,
        message: &Message,
        order: ByteOrder,
    ) -> Result<Bytes> {
        if message.command() != expected.command {
            return Err(WireError::TypeMismatch {
                expected: expected.command.id(),
                actual: message.command().id(),
            });
        }
        let mut inner = WireWriter::new(order);
        self.encode_body(message, &mut inner)?;
        Ok(inner.finish())
    }

    // =========================================================================
    // Decoding
    // =========================================================================

    /// Decode a frame payload (`[cmd][fields…]`) with a known descriptor
    ///
    /// The payload must be consumed exactly.
    pub fn decode(&self, descriptor: &'static MessageDescriptor, payload: &[u8]) -> Result<Message> {
        let mut reader = WireReader::new(payload, self.config.byte_order);
        let message = self.decode_body(descriptor, &mut reader)?;
        reader.expect_end()?;
        Ok(message)
    }

    /// Decode the command byte and fields from a reader
    pub fn decode_body(&self, descriptor: &'static MessageDescriptor, reader: &mut WireReader<'_>) -> Result<Message> {
        self.decode_body_at(descriptor, reader, 0)
    }

    fn decode_body_at(
        &self,
        descriptor: &'static MessageDescriptor,
        reader: &mut WireReader<'_>,
        depth: usize,
    ) -> Result<Message> {
        let command = reader.read_byte(false)?;
        if command != descriptor.command.id() {
            return Err(WireError::TypeMismatch {
                expected: descriptor.command.id(),
                actual: command,
            });
        }
        self.decode_fields_at(descriptor, reader, depth)
    }

    /// Decode only the fields (command byte already consumed)
    pub fn decode_fields(&self, descriptor: &'static MessageDescriptor, reader: &mut WireReader<'_>) -> Result<Message> {
        self.decode_fields_at(descriptor, reader, 0)
    }

    /// `depth` counts the nested blocks enclosing this message
    fn decode_fields_at(
        &self,
        descriptor: &'static MessageDescriptor,
        reader: &mut WireReader<'_>,
        depth: usize,
    ) -> Result<Message> {
        let mut message = Message::new(descriptor);

        for field in descriptor.fields_for(self.config.wire_version) {
            let value = self
                .decode_field(field, reader, depth)
                .map_err(|e| e.in_field(field.name))?;
            tracing::trace!("Decoded {}.{} = {}", descriptor.name, field.name, value);
            message.set(field.name, value);
        }

        Ok(message)
    }

    fn decode_field(&self, field: &FieldDescriptor, reader: &mut WireReader<'_>, depth: usize) -> Result<WireValue> {
        let max_depth = self.config.max_nesting_depth;
        let value = match field.field_type {
            FieldType::Primitive(ty) => read_untagged(ty, reader)?,
            FieldType::Raw(len) => WireValue::Raw(Bytes::copy_from_slice(reader.read_raw(len)?)),
            FieldType::Message(nested) => {
                let depth = descend(depth, max_depth)?;
                let mut block = reader.read_block()?;
                let message = self.decode_body_at(nested, &mut block, depth)?;
                block.expect_end()?;
                WireValue::Message(Box::new(message))
            }
            FieldType::MessageList(nested) => {
                let depth = descend(depth, max_depth)?;
                let mut block = reader.read_block()?;
                let count = block.read_len()?;

                // Each element carries at least a 4-byte length and a command byte
                if count.saturating_mul(5) > block.remaining() {
                    return Err(WireError::LengthMismatch {
                        expected: count.saturating_mul(5),
                        actual: block.remaining(),
                    });
                }

                let mut list = Vec::with_capacity(count);
                for _ in 0..count {
                    let mut element = block.read_block()?;
                    list.push(self.decode_body_at(nested, &mut element, depth)?);
                    element.expect_end()?;
                }
                block.expect_end()?;
                WireValue::MessageList(list)
            }
            FieldType::PropertyMap(_) => {
                let depth = descend(depth, max_depth)?;
                let mut block = reader.read_block()?;
                let map = decode_properties_at(&mut block, depth, max_depth)?;
                block.expect_end()?;
                WireValue::Properties(map)
            }
        };
        Ok(value)
    }
}

impl Default for MessageEngine {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

fn mismatch(expected: WireType, actual: &WireValue) -> WireError {
    WireError::TypeMismatch {
        expected: expected.tag(),
        actual: actual.wire_type().tag(),
    }
}

/// Write a scalar without its tag; the value must already have the field's type
fn write_untagged(value: &WireValue, writer: &mut WireWriter) -> Result<()> {
    match value {
        WireValue::Bool(v) => writer.write_bool(*v, false),
        WireValue::Byte(v) => writer.write_byte(*v, false),
        WireValue::Char(v) => writer.write_char(*v, false),
        WireValue::Short(v) => writer.write_short(*v, false),
        WireValue::Int(v) => writer.write_int(*v, false),
        WireValue::Long(v) => writer.write_long(*v, false),
        WireValue::Float(v) => writer.write_float(*v, false),
        WireValue::Double(v) => writer.write_double(*v, false),
        WireValue::String(v) => writer.write_string(v, false)?,
        other => return Err(WireError::UnsupportedType(other.wire_type().tag())),
    }
    Ok(())
}

/// Read a scalar whose type comes from the descriptor
fn read_untagged(ty: WireType, reader: &mut WireReader<'_>) -> Result<WireValue> {
    let value = match ty {
        WireType::Bool => WireValue::Bool(reader.read_bool(false)?),
        WireType::Byte => WireValue::Byte(reader.read_byte(false)?),
        WireType::Char => WireValue::Char(reader.read_char(false)?),
        WireType::Short => WireValue::Short(reader.read_short(false)?),
        WireType::Int => WireValue::Int(reader.read_int(false)?),
        WireType::Long => WireValue::Long(reader.read_long(false)?),
        WireType::Float => WireValue::Float(reader.read_float(false)?),
        WireType::Double => WireValue::Double(reader.read_double(false)?),
        WireType::String => WireValue::String(reader.read_string(false)?),
        other => return Err(WireError::UnsupportedType(other.tag())),
    };
    Ok(value)
}
