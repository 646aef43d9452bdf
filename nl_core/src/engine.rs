//! Engine-side view of the last pushed network state.
//!
//! The transport engine consumes the snapshot document rather than querying
//! the OS itself. [`EngineState`] decodes every submitted payload, retains
//! the latest snapshot, and answers the interface-list and default-route
//! queries the engine needs for routing and socket binding.

use std::net::IpAddr;
use std::str::FromStr;
use std::sync::RwLock;

use anyhow::{Context, Result};

use crate::bridge::TransportBridge;
use crate::config::DEFAULT_MTU;
use crate::snapshot::NetworkSnapshot;

/// Placeholder interface reported before the first snapshot arrives, so
/// early route lookups stay usable instead of erroring out.
const PLACEHOLDER_NAME: &str = "dummy0";

/// One interface in the form the transport engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineInterface {
    /// 1-based position, stable within one snapshot
    pub index: u32,
    pub name: String,
    pub mtu: u32,
    /// Parsed (address, prefix length) pairs; unparseable entries are skipped
    pub addrs: Vec<(IpAddr, u8)>,
}

/// Default-route answer derived from the latest snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRoute {
    pub name: String,
    pub addr: IpAddr,
}

/// Latest host network state as seen by the transport engine.
#[derive(Debug, Default)]
pub struct EngineState {
    last: RwLock<NetworkSnapshot>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone of the latest decoded snapshot.
    pub fn snapshot(&self) -> NetworkSnapshot {
        self.last.read().unwrap().clone()
    }

    /// Typed interface list.
    ///
    /// While no snapshot has arrived, a single loopback placeholder is
    /// reported.
    pub fn interfaces(&self) -> Vec<EngineInterface> {
        let last = self.last.read().unwrap();

        if last.interfaces.is_empty() {
            return vec![EngineInterface {
                index: 1,
                name: PLACEHOLDER_NAME.to_string(),
                mtu: DEFAULT_MTU,
                addrs: vec![(IpAddr::from([127, 0, 0, 1]), 8)],
            }];
        }

        last.interfaces
            .iter()
            .enumerate()
            .map(|(at, summary)| EngineInterface {
                index: (at + 1) as u32,
                name: summary.name.clone(),
                mtu: summary.mtu,
                addrs: summary.addrs.iter().filter_map(|c| parse_cidr(c)).collect(),
            })
            .collect()
    }

    /// Name and address of the default interface, preferring the first IPv4
    /// address and falling back to IPv6.
    ///
    /// While no default interface is known the loopback placeholder is
    /// returned; `None` means a default was named but carries no usable
    /// address.
    pub fn default_route(&self) -> Option<DefaultRoute> {
        let last = self.last.read().unwrap();

        if last.default_interface.is_empty() {
            return Some(DefaultRoute {
                name: PLACEHOLDER_NAME.to_string(),
                addr: IpAddr::from([127, 0, 0, 1]),
            });
        }

        let Some(summary) = last
            .interfaces
            .iter()
            .find(|s| s.name == last.default_interface)
        else {
            tracing::warn!(interface = %last.default_interface, "default interface missing from snapshot");
            return None;
        };

        let parsed: Vec<IpAddr> = summary
            .addrs
            .iter()
            .filter_map(|c| parse_cidr(c))
            .map(|(ip, _)| ip)
            .collect();

        let addr = parsed
            .iter()
            .copied()
            .find(|ip| ip.is_ipv4())
            .or_else(|| parsed.first().copied());

        match addr {
            Some(addr) => Some(DefaultRoute {
                name: last.default_interface.clone(),
                addr,
            }),
            None => {
                tracing::warn!(interface = %last.default_interface, "default interface has no usable address");
                None
            }
        }
    }
}

impl TransportBridge for EngineState {
    fn submit_network_state(&self, payload: &str) -> Result<()> {
        let snapshot =
            NetworkSnapshot::from_json(payload).context("malformed network state document")?;

        tracing::debug!(
            default_interface = %snapshot.default_interface,
            interfaces = snapshot.interfaces.len(),
            "received network update"
        );

        *self.last.write().unwrap() = snapshot;
        Ok(())
    }
}

/// Split `"ip/prefixLen"` into its parts; malformed entries yield `None`.
fn parse_cidr(cidr: &str) -> Option<(IpAddr, u8)> {
    let (ip, prefix) = cidr.split_once('/')?;
    Some((IpAddr::from_str(ip).ok()?, prefix.parse().ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_IFACE_STATE: &str = r#"{"Interfaces":[{"Name":"wlan0","MTU":1500,"Addrs":["fe80::1/64","192.168.1.5/24"]},{"Name":"rmnet0","MTU":1400,"Addrs":["10.0.0.2/32"]}],"DefaultInterface":"wlan0"}"#;

    #[test]
    fn test_placeholder_before_first_push() {
        let engine = EngineState::new();

        let interfaces = engine.interfaces();
        assert_eq!(interfaces.len(), 1);
        assert_eq!(interfaces[0].name, "dummy0");
        assert_eq!(interfaces[0].mtu, 1500);

        let route = engine.default_route().unwrap();
        assert_eq!(route.name, "dummy0");
        assert!(route.addr.is_loopback());
    }

    #[test]
    fn test_decodes_submitted_state() {
        let engine = EngineState::new();
        engine.submit_network_state(TWO_IFACE_STATE).unwrap();

        let interfaces = engine.interfaces();
        assert_eq!(interfaces.len(), 2);
        assert_eq!(interfaces[0].index, 1);
        assert_eq!(interfaces[0].addrs.len(), 2);
        assert_eq!(interfaces[1].name, "rmnet0");
        assert_eq!(interfaces[1].mtu, 1400);
    }

    #[test]
    fn test_default_route_prefers_ipv4() {
        let engine = EngineState::new();
        engine.submit_network_state(TWO_IFACE_STATE).unwrap();

        let route = engine.default_route().unwrap();
        assert_eq!(route.name, "wlan0");
        assert_eq!(route.addr, IpAddr::from([192, 168, 1, 5]));
    }

    #[test]
    fn test_default_route_falls_back_to_ipv6() {
        let engine = EngineState::new();
        let payload = r#"{"Interfaces":[{"Name":"wlan0","MTU":1500,"Addrs":["fe80::1/64"]}],"DefaultInterface":"wlan0"}"#;
        engine.submit_network_state(payload).unwrap();

        let route = engine.default_route().unwrap();
        assert!(route.addr.is_ipv6());
    }

    #[test]
    fn test_default_route_none_without_usable_address() {
        let engine = EngineState::new();
        let payload = r#"{"Interfaces":[{"Name":"wlan0","MTU":1500,"Addrs":[]}],"DefaultInterface":"wlan0"}"#;
        engine.submit_network_state(payload).unwrap();

        assert!(engine.default_route().is_none());
    }

    #[test]
    fn test_rejects_malformed_payload() {
        let engine = EngineState::new();
        assert!(engine.submit_network_state("not json").is_err());
        // Prior state is untouched.
        assert_eq!(engine.interfaces()[0].name, "dummy0");
    }
}
