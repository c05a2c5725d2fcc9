//! Frame codec
//!
//! A frame is one length-delimited unit carrying exactly one command.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ Cmd (1)  │          Fields             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` counts the bytes after itself. `Len == 0` is a heartbeat.

use std::io::{ErrorKind, Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use crate::config::CodecConfig;
use crate::error::{Result, WireError};
use crate::wire::{ByteOrder, WireReader};

/// Size of the length prefix
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Payload buffer reserved up front; larger frames grow as bytes arrive
const INITIAL_PAYLOAD_CAPACITY: usize = 64 * 1024;

/// One received or outgoing frame payload (without its length prefix)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// An empty, zero-length frame
    pub fn heartbeat() -> Self {
        Self::default()
    }

    /// Value of the length prefix
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_heartbeat(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Leading command byte, if any
    pub fn command_id(&self) -> Option<u8> {
        self.payload.first().copied()
    }

    /// Prefix the payload with its length
    pub fn encode(&self, order: ByteOrder) -> Result<Bytes> {
        let len = u32::try_from(self.payload.len()).map_err(|_| WireError::FrameTooLarge {
            size: self.payload.len(),
            max: u32::MAX as usize,
        })?;

        let mut out = BytesMut::with_capacity(LENGTH_PREFIX_SIZE + self.payload.len());
        match order {
            ByteOrder::Big => out.put_u32(len),
            ByteOrder::Little => out.put_u32_le(len),
        }
        out.extend_from_slice(&self.payload);
        Ok(out.freeze())
    }

    /// Split a buffer of consecutive frames
    ///
    /// Each frame is bounded to its own declared span; a truncated final
    /// frame is an error.
    pub fn split(bytes: &[u8], config: &CodecConfig) -> Result<Vec<Frame>> {
        let mut reader = WireReader::new(bytes, config.byte_order);
        let mut frames = Vec::new();

        while !reader.is_empty() {
            let len = reader.read_len()?;
            check_size(len, config)?;
            let payload = reader.read_raw(len)?;
            frames.push(Frame::new(Bytes::copy_from_slice(payload)));
        }

        Ok(frames)
    }
}

fn check_size(len: usize, config: &CodecConfig) -> Result<()> {
    if len > config.max_frame_size {
        return Err(WireError::FrameTooLarge {
            size: len,
            max: config.max_frame_size,
        });
    }
    Ok(())
}

// =============================================================================
// Stream-based I/O
// =============================================================================

/// Reads whole frames from a byte stream, one at a time
pub struct FrameReader<R> {
    reader: R,
    config: CodecConfig,
}

impl<R: Read> FrameReader<R> {
    pub fn new(reader: R, config: CodecConfig) -> Self {
        Self { reader, config }
    }

    /// Read the next complete frame
    ///
    /// Blocks until the length prefix and the full payload have arrived.
    /// The payload buffer grows with the bytes received, not the declared length.
    /// End-of-stream before the first prefix byte is `ConnectionClosed`;
    /// anywhere later it is an `UnexpectedEof` I/O error.
    pub fn read_frame(&mut self) -> Result<Frame> {
        let mut prefix = [0u8; LENGTH_PREFIX_SIZE];
        self.read_prefix(&mut prefix)?;

        let len = match self.config.byte_order {
            ByteOrder::Big => u32::from_be_bytes(prefix),
            ByteOrder::Little => u32::from_le_bytes(prefix),
        } as usize;

        if let Err(e) = check_size(len, &self.config) {
            tracing::warn!("Rejecting frame: {}", e);
            return Err(e);
        }

        if len == 0 {
            tracing::debug!("Received heartbeat frame");
            return Ok(Frame::heartbeat());
        }

        let mut payload = Vec::with_capacity(len.min(INITIAL_PAYLOAD_CAPACITY));
        (&mut self.reader).take(len as u64).read_to_end(&mut payload)?;
        if payload.len() < len {
            return Err(WireError::Io(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("stream ended after {} of {} frame bytes", payload.len(), len),
            )));
        }

        tracing::trace!("Received frame of {} bytes", len);
        Ok(Frame::new(payload))
    }

    fn read_prefix(&mut self, prefix: &mut [u8; LENGTH_PREFIX_SIZE]) -> Result<()> {
        let mut filled = 0;
        while filled < prefix.len() {
            match self.reader.read(&mut prefix[filled..]) {
                Ok(0) if filled == 0 => return Err(WireError::ConnectionClosed),
                Ok(0) => {
                    return Err(WireError::Io(std::io::Error::new(
                        ErrorKind::UnexpectedEof,
                        "stream ended inside a frame length prefix",
                    )))
                }
                Ok(n) => filled += n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> Iterator for FrameReader<R> {
    type Item = Result<Frame>;

    /// Yields frames until the stream closes cleanly
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_frame() {
            Err(WireError::ConnectionClosed) => None,
            other => Some(other),
        }
    }
}

/// Writes already length-prefixed messages to a byte stream
pub struct FrameWriter<W> {
    writer: W,
    order: ByteOrder,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W, order: ByteOrder) -> Self {
        Self { writer, order }
    }

    /// Write one self-prefixed encoded message as a single unit
    pub fn write_encoded(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes)?;
        self.writer.flush()?;
        tracing::trace!("Sent frame of {} bytes", bytes.len());
        Ok(())
    }

    /// Write a frame payload behind its length prefix
    pub fn write_frame(&mut self, frame: &Frame) -> Result<()> {
        let bytes = frame.encode(self.order)?;
        self.write_encoded(&bytes)
    }

    /// Write a zero-length frame
    pub fn write_heartbeat(&mut self) -> Result<()> {
        self.write_frame(&Frame::heartbeat())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
