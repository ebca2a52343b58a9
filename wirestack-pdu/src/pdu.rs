//! The protocol layer abstraction and chain serialization engine
//!
//! A packet is a chain of [`Pdu`] nodes, outermost first, each exclusively
//! owning its successor through a `Box`. Dropping a node drops its whole
//! inner subchain; replacing an inner layer releases the previous subchain
//! before attaching the new one. Chains are finite and acyclic by
//! construction since a node holds at most one successor.

use bytes::BytesMut;
use tracing::trace;
use wirestack_core::{Error, Result};

/// Tag identifying a concrete protocol layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PduType {
    /// Linux cooked capture metadata
    Sll,
    /// Ethernet II frame
    EthernetII,
    /// VXLAN tunnel encapsulation
    Vxlan,
    /// DHCPv6 message
    Dhcpv6,
    /// Opaque payload bytes
    Raw,
}

impl PduType {
    /// Human-readable protocol name
    pub fn name(&self) -> &'static str {
        match self {
            PduType::Sll => "SLL",
            PduType::EthernetII => "Ethernet II",
            PduType::Vxlan => "VXLAN",
            PduType::Dhcpv6 => "DHCPv6",
            PduType::Raw => "RAW",
        }
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One protocol layer in a packet chain.
///
/// `write_header` is invoked by the engine *after* the inner chain has been
/// committed to bytes, over the entire region this node governs. That
/// ordering lets headers that summarize their payload (next-protocol flags,
/// lengths, checksums) read the finished inner bytes or the current inner
/// layer before writing themselves.
pub trait Pdu: std::fmt::Debug {
    /// This layer's protocol tag
    fn pdu_type(&self) -> PduType;

    /// Size of this layer's header; may depend on current field values
    fn header_size(&self) -> usize;

    /// Size of this layer's trailer; most layers have none
    fn trailer_size(&self) -> usize {
        0
    }

    /// The encapsulated layer, if any
    fn inner_pdu(&self) -> Option<&dyn Pdu>;

    /// Mutable access to the encapsulated layer
    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)>;

    /// Replace the encapsulated layer, dropping the previous inner subchain
    fn set_inner_pdu(&mut self, inner: Option<Box<dyn Pdu>>);

    /// Detach and return the encapsulated subchain
    fn take_inner_pdu(&mut self) -> Option<Box<dyn Pdu>>;

    /// Encode this layer's header (and trailer) into `buffer`, which spans
    /// the entire region from this layer's first byte to the end of its
    /// trailer space. The inner chain's bytes are already in place.
    fn write_header(&mut self, buffer: &mut [u8]) -> Result<()>;
}

/// Total wire size of the chain rooted at `pdu`: the sum of every node's
/// header and trailer sizes. O(depth).
pub fn total_size(pdu: &dyn Pdu) -> usize {
    let mut size = pdu.header_size() + pdu.trailer_size();
    let mut inner = pdu.inner_pdu();
    while let Some(node) = inner {
        size += node.header_size() + node.trailer_size();
        inner = node.inner_pdu();
    }
    size
}

/// Serialize the chain rooted at `pdu` into freshly allocated wire bytes.
///
/// The buffer is sized by [`total_size`] and filled inner-layers-first so
/// outer headers can refresh fields derived from their payload; see
/// [`Pdu::write_header`]. Takes `&mut` because that refresh mutates layer
/// state (e.g. a demux field tracking a swapped inner layer).
pub fn serialize(pdu: &mut dyn Pdu) -> Result<Vec<u8>> {
    let size = total_size(pdu);
    trace!(size, pdu_type = %pdu.pdu_type(), "serializing chain");
    let mut buffer = BytesMut::zeroed(size);
    serialize_into(pdu, &mut buffer)?;
    Ok(buffer.to_vec())
}

fn serialize_into(pdu: &mut dyn Pdu, buffer: &mut [u8]) -> Result<()> {
    let header = pdu.header_size();
    let own = header + pdu.trailer_size();
    if own > buffer.len() {
        // A codec reported a size inconsistent with what total_size saw
        return Err(Error::InsufficientBufferSpace {
            needed: own,
            available: buffer.len(),
        });
    }
    let inner_end = buffer.len() - pdu.trailer_size();
    if let Some(inner) = pdu.inner_pdu_mut() {
        serialize_into(inner, &mut buffer[header..inner_end])?;
    }
    pdu.write_header(buffer)
}
