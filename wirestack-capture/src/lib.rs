//! External boundaries for the wirestack toolkit
//!
//! The serialization engine in `wirestack-pdu` produces plain byte
//! buffers; this crate holds the adapters that connect those buffers to
//! the outside world:
//!
//! - [`writer`] - pcap savefile sink for timestamped, already-serialized
//!   packets
//! - [`interface`] - network interface enumeration and lookup

pub mod interface;
pub mod writer;

// Re-export main types
pub use interface::{list_interfaces, lookup, InterfaceAddress, InterfaceInfo};
pub use writer::PacketWriter;
