//! Snapshot builder and canonical serializer.

use serde::{Deserialize, Serialize};

use crate::source::PropertySource;
use crate::store::LinkTable;
use crate::{NetStateError, Result};

/// One interface as presented to the transport engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSummary {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "MTU")]
    pub mtu: u32,
    #[serde(rename = "Addrs")]
    pub addrs: Vec<String>,
}

/// Immutable description of all known interfaces and the current default
/// interface at one point in time.
///
/// `Interfaces` preserves store iteration order; `DefaultInterface` is the
/// empty string when no default network exists or its name cannot be
/// resolved. Both fields are always present on the wire, and unknown extra
/// fields are tolerated on decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    #[serde(rename = "Interfaces", default)]
    pub interfaces: Vec<InterfaceSummary>,
    #[serde(rename = "DefaultInterface", default)]
    pub default_interface: String,
}

impl NetworkSnapshot {
    /// Canonical wire encoding: deterministic field order, interface order
    /// preserved, empty fields emitted rather than omitted.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(NetStateError::Serialize)
    }

    pub fn from_json(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(NetStateError::Decode)
    }
}

/// Build a snapshot from the current table contents and the source's
/// default-network answer.
///
/// Per-interface failures never abort the build: a failed MTU lookup falls
/// back to `mtu_fallback`, entries without a resolved interface name are
/// omitted rather than defaulted.
pub fn build_snapshot(
    table: &LinkTable,
    source: &dyn PropertySource,
    mtu_fallback: u32,
) -> NetworkSnapshot {
    let default_interface = resolve_default_name(table, source);

    let mut interfaces = Vec::with_capacity(table.len());
    for (_, properties) in table.entries() {
        let Some(name) = properties.name() else {
            continue;
        };

        let mtu = match source.mtu(name) {
            Ok(mtu) => mtu,
            Err(e) => {
                tracing::debug!(interface = name, error = %e, "MTU lookup failed, using fallback");
                mtu_fallback
            }
        };

        let addrs = properties.addresses.iter().map(|a| a.to_cidr()).collect();

        interfaces.push(InterfaceSummary {
            name: name.to_string(),
            mtu,
            addrs,
        });
    }

    NetworkSnapshot {
        interfaces,
        default_interface,
    }
}

/// Interface name of the current default network, or the empty string.
///
/// The fresh source lookup is preferred over the stored copy: the default
/// network's properties may not have reached the store yet. Failure at any
/// step is not an error condition.
fn resolve_default_name(table: &LinkTable, source: &dyn PropertySource) -> String {
    let Some(id) = source.default_network() else {
        return String::new();
    };

    let fresh = source.link_properties(id);
    let name = fresh
        .as_ref()
        .and_then(|p| p.name())
        .or_else(|| table.get(id).and_then(|p| p.name()));

    name.map(str::to_string).unwrap_or_default()
}
