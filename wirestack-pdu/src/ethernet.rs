//! Ethernet II frame layer
//!
//! Carries a nonzero trailer: frames below the 60-byte minimum (FCS
//! excluded) are zero padded, and the padding is reported through
//! `trailer_size` so the chain engine reserves space for it.

use std::fmt;

use crate::internals::{pdu_flag, pdu_from_flag};
use crate::pdu::{self, Pdu, PduType};
use crate::stream::{InputStream, OutputStream};
use wirestack_core::{Error, Result};

/// MAC address (6 bytes)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MacAddr(pub [u8; 6]);

impl MacAddr {
    /// Broadcast MAC address (ff:ff:ff:ff:ff:ff)
    pub const BROADCAST: MacAddr = MacAddr([0xFF; 6]);

    /// Zero MAC address (00:00:00:00:00:00)
    pub const ZERO: MacAddr = MacAddr([0x00; 6]);

    /// Create a new MAC address
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Get the address bytes
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Check if this is a broadcast address
    pub fn is_broadcast(&self) -> bool {
        self.0 == [0xFF; 6]
    }

    /// Check if this is a multicast address (bit 0 of first octet is 1)
    pub fn is_multicast(&self) -> bool {
        self.0[0] & 0x01 == 0x01
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddr(bytes)
    }
}

/// Ethernet II frame header
#[derive(Debug, Default)]
pub struct EthernetII {
    dst: MacAddr,
    src: MacAddr,
    ethertype: u16,
    inner: Option<Box<dyn Pdu>>,
}

impl EthernetII {
    /// Fixed header size in bytes
    pub const HEADER_SIZE: usize = 14;

    /// Minimum frame size without FCS; shorter frames are zero padded
    pub const MIN_FRAME_SIZE: usize = 60;

    /// Create a frame header with zeroed addresses
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an Ethernet frame and whatever it encapsulates
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated(
                "Ethernet II",
                Self::HEADER_SIZE,
                data.len(),
            ));
        }
        let mut stream = InputStream::new(data);
        let dst = MacAddr(stream.read_array::<6>()?);
        let src = MacAddr(stream.read_array::<6>()?);
        let ethertype = stream.read_u16()?;
        let inner = if stream.has_data() {
            Some(pdu_from_flag(ethertype, stream.rest())?)
        } else {
            None
        };
        Ok(Self {
            dst,
            src,
            ethertype,
            inner,
        })
    }

    /// Destination address
    pub fn dst(&self) -> MacAddr {
        self.dst
    }

    /// Set the destination address
    pub fn set_dst(&mut self, dst: MacAddr) {
        self.dst = dst;
    }

    /// Source address
    pub fn src(&self) -> MacAddr {
        self.src
    }

    /// Set the source address
    pub fn set_src(&mut self, src: MacAddr) {
        self.src = src;
    }

    /// EtherType field; refreshed from the inner layer's tag during encode
    pub fn ethertype(&self) -> u16 {
        self.ethertype
    }

    /// Set the EtherType field
    pub fn set_ethertype(&mut self, ethertype: u16) {
        self.ethertype = ethertype;
    }

    fn payload_size(&self) -> usize {
        self.inner.as_deref().map(pdu::total_size).unwrap_or(0)
    }
}

impl Pdu for EthernetII {
    fn pdu_type(&self) -> PduType {
        PduType::EthernetII
    }

    fn header_size(&self) -> usize {
        Self::HEADER_SIZE
    }

    fn trailer_size(&self) -> usize {
        let frame = Self::HEADER_SIZE + self.payload_size();
        Self::MIN_FRAME_SIZE.saturating_sub(frame)
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
                self.ethertype = flag;
            }
        }
        // Padding bytes stay zeroed; only the header needs writing
        let mut stream = OutputStream::new(buffer);
        stream.write_bytes(&self.dst.0)?;
        stream.write_bytes(&self.src.0)?;
        stream.write_u16(self.ethertype)
    }
}
