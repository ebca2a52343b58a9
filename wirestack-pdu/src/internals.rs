//! Next-protocol demultiplexing table
//!
//! Outer layers store a 16-bit flag naming the protocol of their payload.
//! Flags live in the EtherType number space; protocols that have no
//! EtherType assignment are registered under their IANA service port so
//! every supported layer has a stable demux code.

use tracing::debug;

use crate::dhcpv6::Dhcpv6;
use crate::ethernet::EthernetII;
use crate::pdu::{Pdu, PduType};
use crate::raw::RawPdu;
use crate::sll::Sll;
use crate::vxlan::Vxlan;
use wirestack_core::Result;

/// IPv4 (recognized, no codec shipped)
pub const ETHERTYPE_IPV4: u16 = 0x0800;
/// ARP (recognized, no codec shipped)
pub const ETHERTYPE_ARP: u16 = 0x0806;
/// Transparent Ethernet Bridging, used to demux an encapsulated frame
pub const ETHERTYPE_BRIDGED_ETHERNET: u16 = 0x6558;
/// VXLAN demux code (IANA UDP port 4789)
pub const FLAG_VXLAN: u16 = 0x12B5;
/// DHCPv6 demux code (IANA server UDP port 547)
pub const FLAG_DHCPV6: u16 = 0x0223;

/// The demux code for a protocol tag, if it has one.
///
/// Outer layers use this to refresh their next-protocol field from the
/// current inner layer right before encoding.
pub fn pdu_flag(pdu_type: PduType) -> Option<u16> {
    match pdu_type {
        PduType::EthernetII => Some(ETHERTYPE_BRIDGED_ETHERNET),
        PduType::Vxlan => Some(FLAG_VXLAN),
        PduType::Dhcpv6 => Some(FLAG_DHCPV6),
        PduType::Sll | PduType::Raw => None,
    }
}

/// Decode an inner layer selected by a next-protocol flag.
///
/// Decode errors from a registered codec propagate. An unregistered flag
/// is not an error: the bytes are kept as an opaque terminal [`RawPdu`] so
/// no captured data is lost.
pub fn pdu_from_flag(flag: u16, data: &[u8]) -> Result<Box<dyn Pdu>> {
    match flag {
        ETHERTYPE_BRIDGED_ETHERNET => Ok(Box::new(EthernetII::decode(data)?)),
        FLAG_VXLAN => Ok(Box::new(Vxlan::decode(data)?)),
        FLAG_DHCPV6 => Ok(Box::new(Dhcpv6::decode(data)?)),
        _ => {
            debug!(flag, len = data.len(), "no decoder for flag, keeping raw payload");
            Ok(Box::new(RawPdu::new(data.to_vec())))
        }
    }
}

/// Decode a chain from raw bytes, interpreting them as the given root
/// protocol. This is the decode entry point for captured buffers.
pub fn decode_as(pdu_type: PduType, data: &[u8]) -> Result<Box<dyn Pdu>> {
    match pdu_type {
        PduType::Sll => Ok(Box::new(Sll::decode(data)?)),
        PduType::EthernetII => Ok(Box::new(EthernetII::decode(data)?)),
        PduType::Vxlan => Ok(Box::new(Vxlan::decode(data)?)),
        PduType::Dhcpv6 => Ok(Box::new(Dhcpv6::decode(data)?)),
        PduType::Raw => Ok(Box::new(RawPdu::new(data.to_vec()))),
    }
}
