//! Configuration for the OpenWire codec
//!
//! Centralized configuration with sensible defaults.

use crate::wire::ByteOrder;

/// Default negotiated wire version
pub const DEFAULT_WIRE_VERSION: u32 = 12;

/// Default maximum frame size (100 MB, the broker's MaxFrameSize)
pub const DEFAULT_MAX_FRAME_SIZE: usize = 104_857_600;

/// Default limit on nested messages and property maps within one frame
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Codec configuration, fixed for the lifetime of one connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    // -------------------------------------------------------------------------
    // Encoding
    // -------------------------------------------------------------------------
    /// Byte order for every multi-byte value
    pub byte_order: ByteOrder,

    /// Negotiated wire version; fields introduced later are skipped
    pub wire_version: u32,

    // -------------------------------------------------------------------------
    // Framing
    // -------------------------------------------------------------------------
    /// Largest frame payload accepted by the reader (in bytes)
    pub max_frame_size: usize,

    /// Deepest nesting of messages or property maps the decoder accepts
    pub max_nesting_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::Big,
            wire_version: DEFAULT_WIRE_VERSION,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl CodecConfig {
    /// Create a new config builder
    pub fn builder() -> CodecConfigBuilder {
        CodecConfigBuilder::default()
    }
}

/// Builder for CodecConfig
#[derive(Default)]
pub struct CodecConfigBuilder {
    config: CodecConfig,
}

impl CodecConfigBuilder {
    /// Set the byte order
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.config.byte_order = order;
        self
    }

    /// Set the negotiated wire version
    pub fn wire_version(mut self, version: u32) -> Self {
        self.config.wire_version = version;
        self
    }

    /// Set the maximum frame size (in bytes)
    pub fn max_frame_size(mut self, size: usize) -> Self {
        self.config.max_frame_size = size;
        self
    }

    /// Set the maximum frame size (in MB), saturating at `usize::MAX` bytes
    pub fn max_frame_size_mb(mut self, mb: usize) -> Self {
        self.config.max_frame_size = mb.saturating_mul(1024 * 1024);
        self
    }

    /// Set the maximum nesting depth for decoding
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.config.max_nesting_depth = depth;
        self
    }

    pub fn build(self) -> CodecConfig {
        self.config
    }
}
