//! Property Map Codec
//!
//! A dynamically typed name -> value bag. Unlike descriptor fields, every
//! value is written tagged so a reader with no schema can recover it.
//!
//! ## Wire Format
//! ```text
//! ┌───────────┬──────────────────────────────────────────────┐
//! │ Count (4) │ { Name (u16 len + bytes) │ Tag (1) │ Value } │ × count
//! └───────────┴──────────────────────────────────────────────┘
//! ```

use std::borrow::Cow;
use std::fmt;

use indexmap::IndexMap;

use crate::config::DEFAULT_MAX_NESTING_DEPTH;
use crate::error::{Result, WireError};
use crate::schema::PropertySpec;
use crate::wire::{WireReader, WireType, WireValue, WireWriter};

/// Smallest possible entry: empty name (2) + tag (1) + bool (1)
const MIN_ENTRY_SIZE: usize = 4;

/// Property map with unique names
///
/// Iteration follows insertion order, so encoding is deterministic.
/// Equality ignores order.
#[derive(Clone, Default)]
pub struct PropertyMap {
    entries: IndexMap<String, WireValue>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert or replace an entry, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<WireValue>) -> Option<WireValue> {
        // A replaced entry keeps its original position
        self.entries.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.entries.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove an entry, keeping the order of the rest
    pub fn remove(&mut self, name: &str) -> Option<WireValue> {
        self.entries.shift_remove(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl PartialEq for PropertyMap {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(name, value)| other.get(name) == Some(value))
    }
}

impl fmt::Debug for PropertyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Into<String>, V: Into<WireValue>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

// =============================================================================
// Encoding
// =============================================================================

/// Encode a property map (count + entries, no outer length)
///
/// Entries named in `specs` are coerced to their declared type first;
/// unknown names are written as they are.
pub fn encode_properties(map: &PropertyMap, specs: &[PropertySpec], writer: &mut WireWriter) -> Result<()> {
    let count = i32::try_from(map.len()).map_err(|_| WireError::Range {
        wire_type: WireType::Int,
        value: map.len().to_string(),
    })?;
    writer.write_int(count, false);

    for (name, value) in map.iter() {
        writer.write_string(name, false)?;

        let value = match specs.iter().find(|s| s.name == name) {
            Some(spec) => value.coerce(spec.wire_type).map_err(|e| e.in_field(name))?,
            None => Cow::Borrowed(value),
        };

        write_tagged(&value, writer).map_err(|e| e.in_field(name))?;
    }

    Ok(())
}

/// Write one tagged value
pub fn write_tagged(value: &WireValue, writer: &mut WireWriter) -> Result<()> {
    match value {
        WireValue::Bool(v) => writer.write_bool(*v, true),
        WireValue::Byte(v) => writer.write_byte(*v, true),
        WireValue::Char(v) => writer.write_char(*v, true),
        WireValue::Short(v) => writer.write_short(*v, true),
        WireValue::Int(v) => writer.write_int(*v, true),
        WireValue::Long(v) => writer.write_long(*v, true),
        WireValue::Float(v) => writer.write_float(*v, true),
        WireValue::Double(v) => writer.write_double(*v, true),
        WireValue::String(v) => writer.write_string(v, true)?,
        WireValue::Properties(map) => {
            let mut inner = WireWriter::new(writer.order());
            encode_properties(map, &[], &mut inner)?;
            writer.write_tag(WireType::PropertyMap);
            writer.write_block(inner.as_slice())?;
        }
        other => return Err(WireError::UnsupportedType(other.wire_type().tag())),
    }
    Ok(())
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a property map, consuming exactly the declared entry count
///
/// Nested maps deeper than the default nesting limit are rejected.
pub fn decode_properties(reader: &mut WireReader<'_>) -> Result<PropertyMap> {
    decode_properties_at(reader, 0, DEFAULT_MAX_NESTING_DEPTH)
}

/// Decode a property map found `depth` levels below the top of a frame
pub fn decode_properties_at(reader: &mut WireReader<'_>, depth: usize, max_depth: usize) -> Result<PropertyMap> {
    let count = reader.read_len()?;

    let needed = count.saturating_mul(MIN_ENTRY_SIZE);
    if needed > reader.remaining() {
        return Err(WireError::LengthMismatch {
            expected: needed,
            actual: reader.remaining(),
        });
    }

    let mut map = PropertyMap::with_capacity(count);
    for _ in 0..count {
        let name = reader.read_string(false)?;
        let value = read_tagged_at(reader, depth, max_depth).map_err(|e| e.in_field(&name))?;

        tracing::trace!("Decoded property {} = {}", name, value);
        if map.insert(name.as_str(), value).is_some() {
            tracing::debug!("Duplicate property '{}', keeping last value", name);
        }
    }

    Ok(map)
}

/// Read one tagged value, dispatching on the tag without consuming it first
pub fn read_tagged(reader: &mut WireReader<'_>) -> Result<WireValue> {
    read_tagged_at(reader, 0, DEFAULT_MAX_NESTING_DEPTH)
}

fn read_tagged_at(reader: &mut WireReader<'_>, depth: usize, max_depth: usize) -> Result<WireValue> {
    let tag = reader.peek_tag()?;

    let value = match WireType::from_tag(tag) {
        Some(WireType::Bool) => WireValue::Bool(reader.read_bool(true)?),
        Some(WireType::Byte) => WireValue::Byte(reader.read_byte(true)?),
        Some(WireType::Char) => WireValue::Char(reader.read_char(true)?),
        Some(WireType::Short) => WireValue::Short(reader.read_short(true)?),
        Some(WireType::Int) => WireValue::Int(reader.read_int(true)?),
        Some(WireType::Long) => WireValue::Long(reader.read_long(true)?),
        Some(WireType::Float) => WireValue::Float(reader.read_float(true)?),
        Some(WireType::Double) => WireValue::Double(reader.read_double(true)?),
        Some(WireType::String) => WireValue::String(reader.read_string(true)?),
        Some(WireType::PropertyMap) => {
            let depth = descend(depth, max_depth)?;
            reader.expect_tag(WireType::PropertyMap)?;
            let mut block = reader.read_block()?;
            let map = decode_properties_at(&mut block, depth, max_depth)?;
            block.expect_end()?;
            WireValue::Properties(map)
        }
        // The width of anything else is unknown; skipping would desync the stream
        _ => return Err(WireError::UnsupportedType(tag)),
    };

    Ok(value)
}

/// Step one nesting level down, failing past `max_depth`
pub(crate) fn descend(depth: usize, max_depth: usize) -> Result<usize> {
    if depth >= max_depth {
        return Err(WireError::NestingTooDeep { max: max_depth });
    }
    Ok(depth + 1)
}
