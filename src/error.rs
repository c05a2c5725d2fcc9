//! Error types for the OpenWire codec
//!
//! Provides a unified error type for encoding, decoding and framing.

use thiserror::Error;

use crate::schema::CommandType;
use crate::wire::WireType;

/// Result type alias using WireError
pub type Result<T> = std::result::Result<T, WireError>;

/// Unified error type for codec operations
#[derive(Debug, Error)]
pub enum WireError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The transport reached end-of-stream on a frame boundary
    #[error("Connection closed by peer")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    #[error("Type mismatch: expected tag 0x{expected:02x}, got 0x{actual:02x}")]
    TypeMismatch { expected: u8, actual: u8 },

    #[error("Length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Unsupported type tag: 0x{0:02x}")]
    UnsupportedType(u8),

    #[error("Unknown command type: 0x{0:02x}")]
    UnknownCommand(u8),

    #[error("No descriptor registered for {0:?}")]
    NoDescriptor(CommandType),

    #[error("Frame too large: {size} bytes (max {max})")]
    FrameTooLarge { size: usize, max: usize },

    #[error("Nesting too deep: more than {max} levels")]
    NestingTooDeep { max: usize },

    // -------------------------------------------------------------------------
    // Encode Errors
    // -------------------------------------------------------------------------
    #[error("Value {value} out of range for {wire_type:?}")]
    Range { wire_type: WireType, value: String },

    #[error("Missing value for field '{field}'")]
    IncompleteValue { field: String },

    // -------------------------------------------------------------------------
    // Context
    // -------------------------------------------------------------------------
    #[error("Field '{field}': {source}")]
    Field {
        field: String,
        #[source]
        source: Box<WireError>,
    },
}

impl WireError {
    /// Attach the name of the field being processed
    pub fn in_field(self, field: &str) -> Self {
        WireError::Field {
            field: field.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with field context stripped
    pub fn root(&self) -> &WireError {
        match self {
            WireError::Field { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the failure came from the transport, not from the bytes
    pub fn is_io(&self) -> bool {
        matches!(self.root(), WireError::Io(_) | WireError::ConnectionClosed)
    }
}
