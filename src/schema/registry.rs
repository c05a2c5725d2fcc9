//! Descriptor registry
//!
//! Maps command types to the descriptor used to decode them.

use std::collections::HashMap;

use crate::error::{Result, WireError};
use super::{messages, CommandType, MessageDescriptor};

/// Command type -> descriptor lookup table
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: HashMap<CommandType, &'static MessageDescriptor>,
}

impl DescriptorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in descriptor
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for descriptor in messages::BUILTIN.iter().copied() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous one for its command
    pub fn register(&mut self, descriptor: &'static MessageDescriptor) -> &mut Self {
        if let Some(previous) = self.descriptors.insert(descriptor.command, descriptor) {
            tracing::debug!(
                "Replaced descriptor {} with {} for {:?}",
                previous.name,
                descriptor.name,
                descriptor.command
            );
        }
        self
    }

    pub fn get(&self, command: CommandType) -> Option<&'static MessageDescriptor> {
        self.descriptors.get(&command).copied()
    }

    /// Resolve a raw command byte to its descriptor
    pub fn resolve(&self, id: u8) -> Result<&'static MessageDescriptor> {
        let command = CommandType::try_from(id)?;
        self.get(command).ok_or(WireError::NoDescriptor(command))
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
