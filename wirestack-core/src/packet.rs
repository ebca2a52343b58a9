//! Packet types

use std::time::SystemTime;

/// A fully serialized packet plus the timestamp it was captured or built at.
///
/// This is the unit handed across the sink boundary: the bytes are final
/// wire bytes and are never inspected or mutated past this point.
#[derive(Debug, Clone)]
pub struct Packet {
    /// When the packet was captured/created
    pub timestamp: SystemTime,
    /// Packet data (including all headers)
    pub data: Vec<u8>,
}

impl Packet {
    /// Create a new packet timestamped now
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            timestamp: SystemTime::now(),
            data,
        }
    }

    /// Create a packet with an explicit timestamp
    pub fn with_timestamp(timestamp: SystemTime, data: Vec<u8>) -> Self {
        Self { timestamp, data }
    }

    /// Get packet data as slice
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get packet length
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if packet is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_new() {
        let packet = Packet::new(vec![1, 2, 3]);
        assert_eq!(packet.len(), 3);
        assert_eq!(packet.data(), &[1, 2, 3]);
        assert!(!packet.is_empty());
    }

    #[test]
    fn test_packet_with_timestamp() {
        let ts = SystemTime::UNIX_EPOCH;
        let packet = Packet::with_timestamp(ts, vec![]);
        assert_eq!(packet.timestamp, ts);
        assert!(packet.is_empty());
    }
}
