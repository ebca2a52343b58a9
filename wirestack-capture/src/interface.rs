//! Network interface enumeration and lookup

use pnet_datalink::NetworkInterface;
use std::net::IpAddr;
use wirestack_core::{Error, Result};

/// One address assigned to an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceAddress {
    /// The address itself
    pub address: IpAddr,
    /// The network mask covering it
    pub netmask: IpAddr,
}

/// Information about a network interface
#[derive(Debug, Clone)]
pub struct InterfaceInfo {
    /// Interface name (e.g., "eth0", "wlan0")
    pub name: String,
    /// MAC address if available
    pub mac: Option<String>,
    /// Addresses assigned to this interface, with their netmasks
    pub addresses: Vec<InterfaceAddress>,
    /// Whether the interface is up
    pub is_up: bool,
    /// Whether the interface is a loopback
    pub is_loopback: bool,
}

impl From<&NetworkInterface> for InterfaceInfo {
    fn from(iface: &NetworkInterface) -> Self {
        let mac = iface.mac.map(|mac| mac.to_string());
        let addresses = iface
            .ips
            .iter()
            .map(|network| InterfaceAddress {
                address: network.ip(),
                netmask: network.mask(),
            })
            .collect();

        InterfaceInfo {
            name: iface.name.clone(),
            mac,
            addresses,
            is_up: iface.is_up(),
            is_loopback: iface.is_loopback(),
        }
    }
}

impl InterfaceInfo {
    /// Get the primary IPv4 address if available
    pub fn primary_ipv4(&self) -> Option<IpAddr> {
        self.addresses
            .iter()
            .map(|addr| addr.address)
            .find(|ip| ip.is_ipv4())
    }
}

/// List all network interfaces on the system
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .map(InterfaceInfo::from)
        .collect()
}

/// Look up a single interface by name
pub fn lookup(name: &str) -> Result<InterfaceInfo> {
    pnet_datalink::interfaces()
        .iter()
        .find(|iface| iface.name == name)
        .map(InterfaceInfo::from)
        .ok_or_else(|| Error::InterfaceNotFound(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_missing_interface() {
        let err = lookup("no-such-interface-0").unwrap_err();
        assert!(matches!(err, Error::InterfaceNotFound(name) if name == "no-such-interface-0"));
    }

    #[test]
    fn test_list_interfaces_runs() {
        // Contents depend on the host; just exercise the projection
        for iface in list_interfaces() {
            assert!(!iface.name.is_empty());
        }
    }
}
