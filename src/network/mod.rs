//! Network Module
//!
//! Message-level send/receive over a byte stream.
//!
//! ## Architecture
//! - One connection = one sequential reader and one writer
//! - Descriptors are `'static` and shared; everything else is per connection
//! - Socket setup, handshakes and reconnection belong to the caller

mod connection;

pub use connection::{Connection, TryClone};
