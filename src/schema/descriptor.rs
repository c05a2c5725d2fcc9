//! Field and message descriptors
//!
//! Descriptors are `static` tables built at compile time. They never
//! change and are shared read-only by every connection.

use std::fmt;

use crate::wire::WireType;
use super::CommandType;

/// Expected type of one named entry in a property map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertySpec {
    pub name: &'static str,
    pub wire_type: WireType,
}

impl PropertySpec {
    pub const fn new(name: &'static str, wire_type: WireType) -> Self {
        Self { name, wire_type }
    }
}

/// How a field is laid out on the wire
#[derive(Clone, Copy)]
pub enum FieldType {
    /// Untagged scalar (bool through string)
    Primitive(WireType),

    /// Fixed number of verbatim bytes
    Raw(usize),

    /// Length-delimited nested message
    Message(&'static MessageDescriptor),

    /// Length-delimited, counted list of nested messages
    MessageList(&'static MessageDescriptor),

    /// Length-delimited property map with its known entry types
    PropertyMap(&'static [PropertySpec]),
}

impl FieldType {
    pub const BOOL: FieldType = FieldType::Primitive(WireType::Bool);
    pub const BYTE: FieldType = FieldType::Primitive(WireType::Byte);
    pub const CHAR: FieldType = FieldType::Primitive(WireType::Char);
    pub const SHORT: FieldType = FieldType::Primitive(WireType::Short);
    pub const INT: FieldType = FieldType::Primitive(WireType::Int);
    pub const LONG: FieldType = FieldType::Primitive(WireType::Long);
    pub const FLOAT: FieldType = FieldType::Primitive(WireType::Float);
    pub const DOUBLE: FieldType = FieldType::Primitive(WireType::Double);
    pub const STRING: FieldType = FieldType::Primitive(WireType::String);

    /// The wire type tag this field corresponds to
    pub fn wire_type(&self) -> WireType {
        match self {
            FieldType::Primitive(ty) => *ty,
            FieldType::Raw(_) => WireType::Raw,
            FieldType::Message(_) => WireType::Message,
            FieldType::MessageList(_) => WireType::MessageList,
            FieldType::PropertyMap(_) => WireType::PropertyMap,
        }
    }
}

// Nested descriptors may refer back to their parent, so print them by name only.
impl fmt::Debug for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Primitive(ty) => write!(f, "{:?}", ty),
            FieldType::Raw(len) => write!(f, "Raw({})", len),
            FieldType::Message(d) => write!(f, "Message({})", d.name),
            FieldType::MessageList(d) => write!(f, "MessageList({})", d.name),
            FieldType::PropertyMap(specs) => write!(f, "PropertyMap({} known)", specs.len()),
        }
    }
}

/// One field of a message: name, layout and the version that introduced it
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
    pub since: u32,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, field_type: FieldType, since: u32) -> Self {
        Self {
            name,
            field_type,
            since,
        }
    }

    /// Whether the field is on the wire at `wire_version`
    pub fn is_present_in(&self, wire_version: u32) -> bool {
        self.since <= wire_version
    }
}

/// Ordered field list for one command type
///
/// Field order is wire order.
#[derive(Debug)]
pub struct MessageDescriptor {
    pub command: CommandType,
    pub name: &'static str,
    pub fields: &'static [FieldDescriptor],
}

impl MessageDescriptor {
    pub const fn new(
        command: CommandType,
        name: &'static str,
        fields: &'static [FieldDescriptor],
    ) -> Self {
        Self {
            command,
            name,
            fields,
        }
    }

    /// Find a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields on the wire at `wire_version`, in wire order
    pub fn fields_for(&self, wire_version: u32) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields
            .iter()
            .filter(move |f| f.is_present_in(wire_version))
    }
}
