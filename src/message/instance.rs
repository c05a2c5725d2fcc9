//! Message values
//!
//! A descriptor plus the field values for one command instance.

use std::collections::HashMap;
use std::fmt;

use crate::schema::{CommandType, MessageDescriptor};
use crate::wire::WireValue;

/// One command: its descriptor and a field name -> value map
#[derive(Clone)]
pub struct Message {
    descriptor: &'static MessageDescriptor,
    values: HashMap<String, WireValue>,
}

impl Message {
    /// Create a message with no field values set
    pub fn new(descriptor: &'static MessageDescriptor) -> Self {
        Self {
            descriptor,
            values: HashMap::new(),
        }
    }

    /// Builder-style setter
    pub fn with(mut self, field: &str, value: impl Into<WireValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field value, returning the previous one
    pub fn set(&mut self, field: &str, value: impl Into<WireValue>) -> Option<WireValue> {
        self.values.insert(field.to_string(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&WireValue> {
        self.values.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<WireValue> {
        self.values.remove(field)
    }

    pub fn descriptor(&self) -> &'static MessageDescriptor {
        self.descriptor
    }

    pub fn command(&self) -> CommandType {
        self.descriptor.command
    }

    /// Number of field values set
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of every value set, including ones the descriptor lacks
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Field values in descriptor order, skipping unset fields
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &WireValue)> + '_ {
        self.descriptor
            .fields
            .iter()
            .filter_map(move |f| self.values.get(f.name).map(|v| (f.name, v)))
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.command == other.descriptor.command && self.values == other.values
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct(self.descriptor.name);
        for (name, value) in self.fields() {
            s.field(name, value);
        }
        s.finish()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {{", self.descriptor.name)?;
        for (i, (name, value)) in self.fields().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", name, value)?;
        }
        write!(f, " }}")
    }
}
