//! Command dispatch
//!
//! Routes a frame to the descriptor named by its first payload byte.

use crate::config::CodecConfig;
use crate::error::Result;
use crate::message::{Message, MessageEngine};
use crate::schema::DescriptorRegistry;
use super::Frame;

/// Frame -> message router
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: DescriptorRegistry,
    engine: MessageEngine,
}

impl Dispatcher {
    pub fn new(registry: DescriptorRegistry, config: CodecConfig) -> Self {
        Self {
            registry,
            engine: MessageEngine::new(config),
        }
    }

    /// Dispatcher over the built-in descriptors
    pub fn standard(config: CodecConfig) -> Self {
        Self::new(DescriptorRegistry::standard(), config)
    }

    pub fn registry(&self) -> &DescriptorRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &MessageEngine {
        &self.engine
    }

    /// Decode one frame
    ///
    /// Returns `None` for a heartbeat, which is never routed.
    pub fn dispatch(&self, frame: &Frame) -> Result<Option<Message>> {
        let id = match frame.command_id() {
            Some(id) => id,
            None => return Ok(None),
        };

        let descriptor = self.registry.resolve(id)?;
        tracing::trace!("Dispatching {} ({} bytes)", descriptor.name, frame.len());

        self.engine.decode(descriptor, frame.payload()).map(Some)
    }

    /// Decode every frame in a buffer of consecutive frames
    pub fn dispatch_all(&self, bytes: &[u8]) -> Result<Vec<Message>> {
        let mut messages = Vec::new();
        for frame in Frame::split(bytes, self.engine.config())? {
            if let Some(message) = self.dispatch(&frame)? {
                messages.push(message);
            }
        }
        Ok(messages)
    }
}
