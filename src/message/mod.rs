//! Message Module
//!
//! Turns field/value maps into bytes and back.
//!
//! Two polymorphism strategies live side by side:
//! - descriptor fields are written **untagged**; the schema supplies the type
//! - property map entries are written **tagged**; the value carries its type

mod instance;
mod engine;
pub mod properties;

pub use instance::Message;
pub use engine::MessageEngine;
pub use properties::{decode_properties, encode_properties, PropertyMap};
