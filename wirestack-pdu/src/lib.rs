//! Protocol layer composition and serialization engine
//!
//! This crate models a packet as a chain of protocol layers (PDUs), each
//! exclusively owning the layer it encapsulates. It provides:
//!
//! - [`pdu`] - the [`Pdu`] trait, the chain ownership model, and the
//!   recursive size/serialize engine
//! - [`stream`] - bounded byte cursors all codecs decode and encode through
//! - [`iter`] - bidirectional, non-owning traversal over a chain
//! - [`options`] - the generic TLV option store
//! - [`seq`] - RFC 1982 comparison for wrapping sequence counters
//! - [`internals`] - the next-protocol demux table
//! - concrete codecs: [`sll`], [`ethernet`], [`vxlan`], [`dhcpv6`], [`raw`]
//!
//! # Quick start
//!
//! ```
//! use wirestack_pdu::{serialize, total_size, Pdu, Sll, Vxlan};
//!
//! let mut sll = Sll::new();
//! sll.set_inner_pdu(Some(Box::new(Vxlan::new(0x1234))));
//!
//! let bytes = serialize(&mut sll).unwrap();
//! assert_eq!(bytes.len(), total_size(&sll));
//!
//! let decoded = Sll::decode(&bytes).unwrap();
//! assert_eq!(decoded.protocol(), sll.protocol());
//! ```
//!
//! Serialization is two-phase: inner layers are committed to bytes first,
//! then each outer header is written over its whole region. Fields that
//! summarize the payload, like SLL's next-protocol field above, are
//! refreshed automatically during the write.

pub mod dhcpv6;
pub mod ethernet;
pub mod internals;
pub mod iter;
pub mod options;
pub mod pdu;
pub mod raw;
pub mod seq;
pub mod sll;
pub mod stream;
pub mod vxlan;

// Re-export commonly used types
pub use dhcpv6::Dhcpv6;
pub use ethernet::{EthernetII, MacAddr};
pub use internals::decode_as;
pub use iter::{find_pdu, iterate_pdus, PduIter};
pub use options::{TlvOption, TlvOptions};
pub use pdu::{serialize, total_size, Pdu, PduType};
pub use raw::RawPdu;
pub use seq::seq_compare;
pub use sll::Sll;
pub use stream::{InputStream, OutputStream};
pub use vxlan::Vxlan;
