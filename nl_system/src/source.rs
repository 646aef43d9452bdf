//! Property source backed by the host interface table.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use nl_core::{LinkAddress, LinkProperties, MtuError, NetworkId, PropertySource};

/// Answers property queries by scanning the host interface table.
///
/// Network ids are derived from interface names, so an interface keeps its
/// id across scans within one process.
#[derive(Debug, Default)]
pub struct SystemSource;

impl SystemSource {
    pub fn new() -> Self {
        Self
    }

    /// Stable id for an interface name.
    pub fn id_for(name: &str) -> NetworkId {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        NetworkId::new(hasher.finish())
    }

    /// One full scan of the host interface table, grouped by interface
    /// name, in the order the OS reports interfaces.
    pub fn scan(&self) -> Vec<(NetworkId, LinkProperties)> {
        let mut by_name: Vec<(String, LinkProperties)> = Vec::new();

        match if_addrs::get_if_addrs() {
            Ok(ifaces) => {
                for iface in ifaces {
                    let address = LinkAddress::new(
                        iface.addr.ip().to_string(),
                        prefix_len_of(&iface.addr),
                    );
                    match by_name.iter_mut().find(|(name, _)| *name == iface.name) {
                        Some((_, properties)) => properties.addresses.push(address),
                        None => {
                            let mut properties = LinkProperties::named(iface.name.clone());
                            properties.addresses.push(address);
                            by_name.push((iface.name, properties));
                        }
                    }
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to scan interfaces");
            }
        }

        by_name
            .into_iter()
            .map(|(name, properties)| (Self::id_for(&name), properties))
            .collect()
    }
}

impl PropertySource for SystemSource {
    fn link_properties(&self, id: NetworkId) -> Option<LinkProperties> {
        self.scan()
            .into_iter()
            .find(|(scanned, _)| *scanned == id)
            .map(|(_, properties)| properties)
    }

    fn default_network(&self) -> Option<NetworkId> {
        // There is no portable default-route query; the first non-loopback
        // interface holding an IPv4 address is a reasonable stand-in.
        self.scan()
            .into_iter()
            .find(|(_, properties)| is_default_candidate(properties))
            .map(|(id, _)| id)
    }

    fn mtu(&self, interface_name: &str) -> Result<u32, MtuError> {
        read_mtu(interface_name)
    }
}

fn is_default_candidate(properties: &LinkProperties) -> bool {
    properties.addresses.iter().any(|a| {
        a.address
            .parse::<std::net::IpAddr>()
            .map(|ip| ip.is_ipv4() && !ip.is_loopback())
            .unwrap_or(false)
    })
}

fn prefix_len_of(addr: &if_addrs::IfAddr) -> u8 {
    match addr {
        if_addrs::IfAddr::V4(v4) => u32::from(v4.netmask).count_ones() as u8,
        if_addrs::IfAddr::V6(v6) => u128::from(v6.netmask).count_ones() as u8,
    }
}

#[cfg(target_os = "linux")]
fn read_mtu(interface_name: &str) -> Result<u32, MtuError> {
    let path = format!("/sys/class/net/{interface_name}/mtu");
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MtuError::NotFound(interface_name.to_string()));
        }
        Err(e) => return Err(MtuError::Io(e)),
    };
    raw.trim()
        .parse()
        .map_err(|_| MtuError::Malformed(interface_name.to_string()))
}

#[cfg(not(target_os = "linux"))]
fn read_mtu(_interface_name: &str) -> Result<u32, MtuError> {
    Err(MtuError::Unsupported)
}
