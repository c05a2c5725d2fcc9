//! Connection
//!
//! One sequential frame reader and writer over a single stream.

use std::io::{BufReader, BufWriter, Read, Write};

use crate::config::CodecConfig;
use crate::error::{Result, WireError};
use crate::message::{Message, MessageEngine};
use crate::protocol::{Dispatcher, FrameReader, FrameWriter};
use crate::schema::DescriptorRegistry;

/// Sends and receives messages over one stream
///
/// A connection never starts decoding a frame before the previous frame
/// has been fully read. Use one `Connection` per stream.
pub struct Connection<R: Read, W: Write> {
    /// Frame reader (buffered for efficiency)
    reader: FrameReader<BufReader<R>>,

    /// Frame writer (buffered for efficiency)
    writer: FrameWriter<BufWriter<W>>,

    /// Routes received frames to descriptors
    dispatcher: Dispatcher,

    /// Peer label for logging
    peer: String,
}

impl<R: Read, W: Write> Connection<R, W> {
    /// Create a connection from separate read and write halves
    pub fn new(
        read_half: R,
        write_half: W,
        registry: DescriptorRegistry,
        config: CodecConfig,
        peer: impl Into<String>,
    ) -> Self {
        let peer = peer.into();
        tracing::debug!("Connection established with {}", peer);

        Self {
            reader: FrameReader::new(BufReader::new(read_half), config),
            writer: FrameWriter::new(BufWriter::new(write_half), config.byte_order),
            dispatcher: Dispatcher::new(registry, config),
            peer,
        }
    }

    pub fn engine(&self) -> &MessageEngine {
        self.dispatcher.engine()
    }

    /// Encode and send one message
    pub fn send(&mut self, message: &Message) -> Result<()> {
        let bytes = self.dispatcher.engine().encode(message)?;
        tracing::trace!("Sending {} to {}", message.descriptor().name, self.peer);
        self.writer.write_encoded(&bytes)
    }

    /// Send a zero-length frame
    pub fn send_heartbeat(&mut self) -> Result<()> {
        self.writer.write_heartbeat()
    }

    /// Receive the next message, skipping heartbeats
    ///
    /// Returns `Ok(None)` when the peer closes the stream between frames.
    pub fn receive(&mut self) -> Result<Option<Message>> {
        loop {
            let frame = match self.reader.read_frame() {
                Ok(frame) => frame,
                Err(WireError::ConnectionClosed) => {
                    tracing::debug!("Peer {} closed the connection", self.peer);
                    return Ok(None);
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer, e);
                    return Err(e);
                }
            };

            match self.dispatcher.dispatch(&frame) {
                Ok(Some(message)) => {
                    tracing::trace!("Received {} from {}", message.descriptor().name, self.peer);
                    return Ok(Some(message));
                }
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Bad frame from {}: {}", self.peer, e);
                    return Err(e);
                }
            }
        }
    }

    /// Get the peer label
    pub fn peer(&self) -> &str {
        &self.peer
    }
}

impl<S: Read + Write + TryClone> Connection<S, S> {
    /// Create a connection over a duplex stream by cloning its handle
    pub fn from_stream(
        stream: S,
        registry: DescriptorRegistry,
        config: CodecConfig,
        peer: impl Into<String>,
    ) -> Result<Self> {
        let read_half = stream.try_clone()?;
        Ok(Self::new(read_half, stream, registry, config, peer))
    }
}

/// Streams whose handle can be duplicated into independent read/write halves
pub trait TryClone: Sized {
    fn try_clone(&self) -> std::io::Result<Self>;
}

impl TryClone for std::net::TcpStream {
    fn try_clone(&self) -> std::io::Result<Self> {
        std::net::TcpStream::try_clone(self)
    }
}
