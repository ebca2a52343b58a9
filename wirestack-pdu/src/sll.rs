//! SLL (Linux cooked capture) layer
//!
//! Pseudo link layer prepended by capture on the "any" device: packet
//! direction, hardware address metadata, and a next-protocol field that
//! selects the decoder for the payload.

use crate::internals::{pdu_flag, pdu_from_flag};
use crate::pdu::{Pdu, PduType};
use crate::stream::{InputStream, OutputStream};
use wirestack_core::{Error, Result};

/// Linux cooked capture header
#[derive(Debug, Default)]
pub struct Sll {
    packet_type: u16,
    lladdr_type: u16,
    lladdr_len: u16,
    address: [u8; 8],
    protocol: u16,
    inner: Option<Box<dyn Pdu>>,
}

impl Sll {
    /// Fixed header size in bytes
    pub const HEADER_SIZE: usize = 16;

    /// Create a header with all fields zeroed
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an SLL layer and whatever it encapsulates.
    ///
    /// If bytes remain past the header they are decoded according to the
    /// protocol field; an unknown protocol keeps them as a raw payload.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated("SLL", Self::HEADER_SIZE, data.len()));
        }
        let mut stream = InputStream::new(data);
        let packet_type = stream.read_u16()?;
        let lladdr_type = stream.read_u16()?;
        let lladdr_len = stream.read_u16()?;
        let address = stream.read_array::<8>()?;
        let protocol = stream.read_u16()?;
        let inner = if stream.has_data() {
            Some(pdu_from_flag(protocol, stream.rest())?)
        } else {
            None
        };
        Ok(Self {
            packet_type,
            lladdr_type,
            lladdr_len,
            address,
            protocol,
            inner,
        })
    }

    /// Packet direction/type field
    pub fn packet_type(&self) -> u16 {
        self.packet_type
    }

    /// Set the packet direction/type field
    pub fn set_packet_type(&mut self, packet_type: u16) {
        self.packet_type = packet_type;
    }

    /// Link-layer address type (ARPHRD value)
    pub fn lladdr_type(&self) -> u16 {
        self.lladdr_type
    }

    /// Set the link-layer address type
    pub fn set_lladdr_type(&mut self, lladdr_type: u16) {
        self.lladdr_type = lladdr_type;
    }

    /// Significant length of the link-layer address
    pub fn lladdr_len(&self) -> u16 {
        self.lladdr_len
    }

    /// Set the significant length of the link-layer address
    pub fn set_lladdr_len(&mut self, lladdr_len: u16) {
        self.lladdr_len = lladdr_len;
    }

    /// Link-layer address, zero padded to 8 bytes
    pub fn address(&self) -> &[u8; 8] {
        &self.address
    }

    /// Set the link-layer address
    pub fn set_address(&mut self, address: [u8; 8]) {
        self.address = address;
    }

    /// Next-protocol field.
    ///
    /// Refreshed from the current inner layer's tag during encode, so it
    /// cannot go stale after an inner-layer swap.
    pub fn protocol(&self) -> u16 {
        self.protocol
    }

    /// Set the next-protocol field
    pub fn set_protocol(&mut self, protocol: u16) {
        self.protocol = protocol;
    }
}

impl Pdu for Sll {
    fn pdu_type(&self) -> PduType {
        PduType::Sll
    }

    fn header_size(&self) -> usize {
        Self::HEADER_SIZE
    }

    fn inner_pdu(&self) -> Option<&dyn Pdu> {
        self.inner.as_deref()
    }

    fn inner_pdu_mut(&mut self) -> Option<&mut (dyn Pdu + 'static)> {
        self.inner.as_deref_mut()
    }

    fn set_inner_pdu(&mut self, inner: Option<Box<dyn Pdu>>) {
        self.inner = inner;
    }

    fn take_inner_pdu(&mut self) -> Option<Box<dyn Pdu>> {
        self.inner.take()
    }

    fn write_header(&mut self, buffer: &mut [u8]) -> Result<()> {
        if let Some(inner) = &self.inner {
            if let Some(flag) = pdu_flag(inner.pdu_type()) {
                self.protocol = flag;
            }
        }
        let mut stream = OutputStream::new(buffer);
        stream.write_u16(self.packet_type)?;
        stream.write_u16(self.lladdr_type)?;
        stream.write_u16(self.lladdr_len)?;
        stream.write_bytes(&self.address)?;
        stream.write_u16(self.protocol)
    }
}
