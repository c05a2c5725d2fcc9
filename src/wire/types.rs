//! Wire type tags and byte order

/// Wire types and their one-byte tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum WireType {
    Bool = 0x01,
    Byte = 0x02,
    Char = 0x03,
    Short = 0x04,
    Int = 0x05,
    Long = 0x06,
    Float = 0x07,
    Double = 0x08,
    String = 0x09,
    /// Verbatim bytes, length known from context; never tagged
    Raw = 0x0a,
    /// Embedded message block
    Message = 0x0b,
    /// Embedded property map block
    PropertyMap = 0x0c,
    /// Counted list of embedded message blocks
    MessageList = 0x0d,
}

impl WireType {
    /// The tag byte written before a tagged value
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Look up a wire type by tag
    pub fn from_tag(tag: u8) -> Option<Self> {
        let ty = match tag {
            0x01 => WireType::Bool,
            0x02 => WireType::Byte,
            0x03 => WireType::Char,
            0x04 => WireType::Short,
            0x05 => WireType::Int,
            0x06 => WireType::Long,
            0x07 => WireType::Float,
            0x08 => WireType::Double,
            0x09 => WireType::String,
            0x0a => WireType::Raw,
            0x0b => WireType::Message,
            0x0c => WireType::PropertyMap,
            0x0d => WireType::MessageList,
            _ => return None,
        };
        Some(ty)
    }

    /// Fixed payload width, or None for length-prefixed types
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            WireType::Bool | WireType::Byte => Some(1),
            WireType::Char | WireType::Short => Some(2),
            WireType::Int | WireType::Float => Some(4),
            WireType::Long | WireType::Double => Some(8),
            _ => None,
        }
    }

    /// Scalar types that may appear tagged inside a property map
    pub fn is_primitive(self) -> bool {
        self.tag() <= WireType::String.tag()
    }
}

/// Byte order used for every multi-byte value of one codec instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    Big,
    Little,
}
