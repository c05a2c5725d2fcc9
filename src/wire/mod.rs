//! Primitive Codec
//!
//! Reads and writes one scalar at a time, tagged or untagged.
//!
//! ## Tags
//! ```text
//! ┌──────┬──────┬──────┬───────┬──────┬──────┬───────┬────────┬────────┬──────┐
//! │ bool │ byte │ char │ short │ int  │ long │ float │ double │ string │ raw  │
//! │ 0x01 │ 0x02 │ 0x03 │ 0x04  │ 0x05 │ 0x06 │ 0x07  │ 0x08   │ 0x09   │ 0x0a │
//! └──────┴──────┴──────┴───────┴──────┴──────┴───────┴────────┴────────┴──────┘
//! ```
//!
//! Extended types: 0x0b nested message, 0x0c property map, 0x0d message list.
//!
//! A tagged value is `[tag][payload]`; an untagged value is `[payload]`
//! and relies on a descriptor (or an already-consumed tag) for its type.
//! Strings are `[u16 length][one byte per code unit]`.

mod types;
mod value;
mod writer;
mod reader;

pub use types::{ByteOrder, WireType};
pub use value::WireValue;
pub use writer::{WireWriter, MAX_STRING_LEN};
pub use reader::WireReader;
