//! DHCPv6 (RFC 8415) message layer
//!
//! The worked example of an option-bearing protocol: a small fixed header
//! whose shape depends on the message type, followed by TLV options that
//! fill the rest of the message. Relay messages (Relay-forward and
//! Relay-reply) replace the transaction id with a hop count and two
//! addresses.

use std::net::Ipv6Addr;

use crate::options::{TlvOption, TlvOptions};
use crate::pdu::{Pdu, PduType};
use crate::stream::{InputStream, OutputStream};
use wirestack_core::{Error, Result};

/// DHCPv6 message
#[derive(Debug)]
pub struct Dhcpv6 {
    message_type: u8,
    hop_count: u8,
    transaction_id: u32,
    link_addr: Ipv6Addr,
    peer_addr: Ipv6Addr,
    options: TlvOptions,
    inner: Option<Box<dyn Pdu>>,
}

impl Dhcpv6 {
    /// Solicit message type
    pub const SOLICIT: u8 = 1;
    /// Advertise message type
    pub const ADVERTISE: u8 = 2;
    /// Request message type
    pub const REQUEST: u8 = 3;
    /// Reply message type
    pub const REPLY: u8 = 7;
    /// Relay-forward message type
    pub const RELAY_FORWARD: u8 = 12;
    /// Relay-reply message type
    pub const RELAY_REPLY: u8 = 13;

    /// Client identifier option
    pub const OPTION_CLIENT_ID: u16 = 1;
    /// Server identifier option
    pub const OPTION_SERVER_ID: u16 = 2;
    /// Identity association for non-temporary addresses option
    pub const OPTION_IA_NA: u16 = 3;
    /// Option-request option
    pub const OPTION_ORO: u16 = 6;
    /// Elapsed-time option
    pub const OPTION_ELAPSED_TIME: u16 = 8;

    const NON_RELAY_HEADER: usize = 4;
    const RELAY_HEADER: usize = 34;

    /// Create an empty message: type 0, hop count 0, transaction id 0,
    /// no options
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a DHCPv6 message; the options region runs to the end of the
    /// buffer
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::truncated("DHCPv6", Self::NON_RELAY_HEADER, 0));
        }
        let message_type = data[0];
        let required = if Self::is_relay_type(message_type) {
            Self::RELAY_HEADER
        } else {
            Self::NON_RELAY_HEADER
        };
        if data.len() < required {
            return Err(Error::truncated("DHCPv6", required, data.len()));
        }

        let mut stream = InputStream::new(data);
        let mut message = Dhcpv6::new();
        message.message_type = stream.read_u8()?;
        if message.is_relay_message() {
            message.hop_count = stream.read_u8()?;
            message.link_addr = Ipv6Addr::from(stream.read_array::<16>()?);
            message.peer_addr = Ipv6Addr::from(stream.read_array::<16>()?);
        } else {
            message.transaction_id = stream.read_u24()?;
        }
        let available = stream.remaining();
        message.options = TlvOptions::read(&mut stream, available)?;
        Ok(message)
    }

    fn is_relay_type(message_type: u8) -> bool {
        matches!(message_type, Self::RELAY_FORWARD | Self::RELAY_REPLY)
    }

    /// Whether this is a relay message (Relay-forward or Relay-reply)
    pub fn is_relay_message(&self) -> bool {
        Self::is_relay_type(self.message_type)
    }

    /// Message type
    pub fn message_type(&self) -> u8 {
        self.message_type
    }

    /// Set the message type; switching to or from a relay type also
    /// switches the header layout
    pub fn set_message_type(&mut self, message_type: u8) {
        self.message_type = message_type;
    }

    /// Relay hop count
    pub fn hop_count(&self) -> u8 {
        self.hop_count
    }

    /// Set the relay hop count
    pub fn set_hop_count(&mut self, hop_count: u8) {
        self.hop_count = hop_count;
    }

    /// 24-bit transaction id
    pub fn transaction_id(&self) -> u32 {
        self.transaction_id
    }

    /// Set the transaction id; only the low 24 bits are kept
    pub fn set_transaction_id(&mut self, transaction_id: u32) {
        self.transaction_id = transaction_id & 0x00FF_FFFF;
    }

    /// Relay link address
    pub fn link_addr(&self) -> Ipv6Addr {
        self.link_addr
    }

    /// Set the relay link address
    pub fn set_link_addr(&mut self, link_addr: Ipv6Addr) {
        self.link_addr = link_addr;
    }

    /// Relay peer address
    pub fn peer_addr(&self) -> Ipv6Addr {
        self.peer_addr
    }

    /// Set the relay peer address
    pub fn set_peer_addr(&mut self, peer_addr: Ipv6Addr) {
        self.peer_addr = peer_addr;
    }

    /// The message's options, in wire order
    pub fn options(&self) -> &TlvOptions {
        &self.options
    }

    /// Append an option
    pub fn add_option(&mut self, option: TlvOption) {
        self.options.add(option);
    }

    /// Find the first option with the given type
    pub fn search_option(&self, opt_type: u16) -> Option<&TlvOption> {
        self.options.search(opt_type)
    }

    /// Remove the first option with the given type
    pub fn remove_option(&mut self, opt_type: u16) -> bool {
        self.options.remove(opt_type)
    }

    fn base_header_size(&self) -> usize {
        if self.is_relay_message() {
            Self::RELAY_HEADER
        } else {
            Self::NON_RELAY_HEADER
        }
    }
}

impl Default for Dhcpv6 {
    fn default() -> Self {
        Self {
            message_type: 0,
            hop_count: 0,
            transaction_id: 0,
            link_addr: Ipv6Addr::UNSPECIFIED,
            peer_addr: Ipv6Addr::UNSPECIFIED,
            options: TlvOptions::new(),
            inner: None,
        }
    }
}

impl Pdu for Dhcpv6 {
    fn pdu_type(&self) -> PduType {
        PduType::Dhcpv6
    }

    fn header_size(&self) -> usize {
        self.base_header_size() + self.options.serialized_size()
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
        stream.write_u8(self.message_type)?;
        if self.is_relay_message() {
            stream.write_u8(self.hop_count)?;
            stream.write_bytes(&self.link_addr.octets())?;
            stream.write_bytes(&self.peer_addr.octets())?;
        } else {
            stream.write_u24(self.transaction_id)?;
        }
        self.options.write(&mut stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdu::{serialize, total_size};

    // Solicit message with client id, IA_NA, elapsed time and
    // option-request options
    const SOLICIT_PACKET: [u8; 46] = [
        0x01, 0xE8, 0x28, 0xB9, // solicit, transaction id 0xE828B9
        0x00, 0x01, 0x00, 0x0A, // client id, 10 bytes
        0x00, 0x03, 0x00, 0x01, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, //
        0x00, 0x03, 0x00, 0x0C, // IA_NA, 12 bytes
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
        0x00, 0x08, 0x00, 0x02, 0x00, 0x00, // elapsed time
        0x00, 0x06, 0x00, 0x02, 0x00, 0x03, // option request
    ];

    #[test]
    fn test_default_constructor() {
        let message = Dhcpv6::new();
        assert_eq!(message.message_type(), 0);
        assert_eq!(message.hop_count(), 0);
        assert_eq!(message.transaction_id(), 0);
        assert!(message.options().is_empty());
    }

    #[test]
    fn test_decode_solicit() {
        let message = Dhcpv6::decode(&SOLICIT_PACKET).unwrap();
        assert_eq!(message.message_type(), Dhcpv6::SOLICIT);
        assert!(!message.is_relay_message());
        assert_eq!(message.transaction_id(), 0xE828B9);
        assert!(message.search_option(Dhcpv6::OPTION_CLIENT_ID).is_some());
        assert!(message.search_option(Dhcpv6::OPTION_IA_NA).is_some());
        assert!(message.search_option(Dhcpv6::OPTION_ELAPSED_TIME).is_some());
        assert!(message.search_option(Dhcpv6::OPTION_ORO).is_some());
        assert!(message.search_option(Dhcpv6::OPTION_SERVER_ID).is_none());
    }

    #[test]
    fn test_roundtrip_is_byte_identical() {
        let mut message = Dhcpv6::decode(&SOLICIT_PACKET).unwrap();
        assert_eq!(total_size(&message), SOLICIT_PACKET.len());
        assert_eq!(serialize(&mut message).unwrap(), SOLICIT_PACKET);
    }

    #[test]
    fn test_relay_roundtrip() {
        let mut message = Dhcpv6::new();
        message.set_message_type(Dhcpv6::RELAY_FORWARD);
        message.set_hop_count(3);
        message.set_link_addr("fe80::1".parse().unwrap());
        message.set_peer_addr("fe80::2".parse().unwrap());
        message.add_option(TlvOption::new(Dhcpv6::OPTION_CLIENT_ID, vec![1, 2, 3]));

        let bytes = serialize(&mut message).unwrap();
        assert_eq!(bytes.len(), 34 + 7);

        let decoded = Dhcpv6::decode(&bytes).unwrap();
        assert!(decoded.is_relay_message());
        assert_eq!(decoded.hop_count(), 3);
        assert_eq!(decoded.link_addr(), "fe80::1".parse::<Ipv6Addr>().unwrap());
        assert_eq!(decoded.peer_addr(), "fe80::2".parse::<Ipv6Addr>().unwrap());
        assert_eq!(
            decoded.search_option(Dhcpv6::OPTION_CLIENT_ID).unwrap().data(),
            &[1, 2, 3]
        );
    }

    #[test]
    fn test_remove_option_shrinks_header() {
        let mut message = Dhcpv6::decode(&SOLICIT_PACKET).unwrap();
        let before = message.header_size();
        assert!(message.remove_option(Dhcpv6::OPTION_IA_NA));
        assert_eq!(message.header_size(), before - (4 + 12));
        assert!(!message.remove_option(Dhcpv6::OPTION_IA_NA));
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(
            Dhcpv6::decode(&[]),
            Err(Error::TruncatedHeader { pdu: "DHCPv6", .. })
        ));
        assert!(matches!(
            Dhcpv6::decode(&[0x01, 0xE8]),
            Err(Error::TruncatedHeader {
                needed: 4,
                available: 2,
                ..
            })
        ));
        // Relay message types need the larger header
        assert!(matches!(
            Dhcpv6::decode(&[0x0C, 0x00, 0x00, 0x00]),
            Err(Error::TruncatedHeader {
                needed: 34,
                available: 4,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_options() {
        // Valid header, then an option declaring more bytes than remain
        let packet = [0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0xFF, 0xAA];
        assert!(matches!(
            Dhcpv6::decode(&packet),
            Err(Error::MalformedOptions { .. })
        ));
    }

    #[test]
    fn test_transaction_id_masked() {
        let mut message = Dhcpv6::new();
        message.set_transaction_id(0xFF123456);
        assert_eq!(message.transaction_id(), 0x123456);
    }
}
