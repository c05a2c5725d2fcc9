//! # OpenWire codec
//!
//! Schema-driven binary marshaling for OpenWire-style broker commands:
//! - Primitive codec for tagged and untagged scalars
//! - Static, versioned message descriptors
//! - Dynamically typed property maps
//! - Length-prefixed framing with command dispatch
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                Connection (Read + Write)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │            Frame Reader / Writer + Dispatcher                │
//! │               (length prefix, command byte)                  │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Message   │─────────▶│  Property   │
//!   │   Engine    │          │  Map Codec  │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          ▼                        ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ Descriptors │          │  Primitive  │
//!   │  (static)   │          │   Codec     │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod wire;
pub mod schema;
pub mod message;
pub mod protocol;
pub mod network;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{WireError, Result};
pub use config::CodecConfig;
pub use message::{Message, MessageEngine, PropertyMap};
pub use protocol::{Dispatcher, Frame};
pub use wire::{ByteOrder, WireType, WireValue};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the codec crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
