//! Protocol Module
//!
//! Framing and command dispatch.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Len (4)  │ Cmd (1)  │          Fields             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Reading
//! 1. Read exactly 4 bytes, decode the unsigned length
//! 2. Read exactly `Len` bytes before interpreting any of them
//! 3. Route on `Cmd` to the registered descriptor
//!
//! A zero-length frame is a heartbeat and is never routed.

mod frame;
mod dispatch;

pub use frame::{Frame, FrameReader, FrameWriter, LENGTH_PREFIX_SIZE};
pub use dispatch::Dispatcher;
