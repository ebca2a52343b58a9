//! VXLAN (RFC 7348) tunnel encapsulation layer
//!
//! Fixed 8-byte header: flags, 24-bit network identifier, reserved bytes.
//! The payload is always an Ethernet frame; there is no demux field.

use crate::ethernet::EthernetII;
use crate::pdu::{Pdu, PduType};
use crate::stream::{InputStream, OutputStream};
use wirestack_core::{Error, Result};

/// VXLAN header
#[derive(Debug, Default)]
pub struct Vxlan {
    flags: u8,
    vni: u32,
    inner: Option<Box<dyn Pdu>>,
}

impl Vxlan {
    /// Fixed header size in bytes
    pub const HEADER_SIZE: usize = 8;

    /// Flag bit marking the VNI field as valid
    pub const FLAG_VNI_PRESENT: u8 = 0x08;

    /// Create a header for the given 24-bit network identifier, with the
    /// VNI-present flag set
    pub fn new(vni: u32) -> Self {
        Self {
            flags: Self::FLAG_VNI_PRESENT,
            vni: vni & 0x00FF_FFFF,
            inner: None,
        }
    }

    /// Parse a VXLAN layer; any payload is decoded as Ethernet II
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < Self::HEADER_SIZE {
            return Err(Error::truncated("VXLAN", Self::HEADER_SIZE, data.len()));
        }
        let mut stream = InputStream::new(data);
        let flags = stream.read_u8()?;
        stream.skip(3)?;
        let vni = stream.read_u24()?;
        stream.skip(1)?;
        let inner: Option<Box<dyn Pdu>> = if stream.has_data() {
            Some(Box::new(EthernetII::decode(stream.rest())?))
        } else {
            None
        };
        Ok(Self { flags, vni, inner })
    }

    /// Header flags
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Set the header flags
    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }

    /// 24-bit VXLAN network identifier
    pub fn vni(&self) -> u32 {
        self.vni
    }

    /// Set the network identifier; only the low 24 bits are kept
    pub fn set_vni(&mut self, vni: u32) {
        self.vni = vni & 0x00FF_FFFF;
    }
}

impl Pdu for Vxlan {
    fn pdu_type(&self) -> PduType {
        PduType::Vxlan
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
        let mut stream = OutputStream::new(buffer);
        stream.write_u8(self.flags)?;
        stream.write_bytes(&[0u8; 3])?;
        stream.write_u24(self.vni)?;
        stream.write_u8(0)
    }
}
