//! Schema Module
//!
//! Declarative message layouts. Each message type is a static, ordered
//! list of `(name, type, introduced version)` records; the message engine
//! walks that list instead of per-message code.
//!
//! ## Example
//! ```text
//! WireFormatInfo (0x01)
//! ┌──────────────┬─────────────┬───────────┬─────────────────────────┐
//! │ magic raw(8) │ version i32 │ data bool │ properties (map block)  │
//! │ since 1      │ since 1     │ since 1   │ since 1                 │
//! └──────────────┴─────────────┴───────────┴─────────────────────────┘
//! ```

mod command;
mod descriptor;
mod registry;
pub mod messages;

pub use command::CommandType;
pub use descriptor::{FieldDescriptor, FieldType, MessageDescriptor, PropertySpec};
pub use registry::DescriptorRegistry;
