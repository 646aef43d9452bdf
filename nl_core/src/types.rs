//! Core data model: network handles and their last-known link properties.

use std::fmt;

/// Opaque handle identifying one currently-active network as reported by
/// the operating system.
///
/// Unique only among currently-active networks; a lost network's id may be
/// handed to a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetworkId(u64);

impl NetworkId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for NetworkId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "net#{}", self.0)
    }
}

/// One assigned address exactly as the OS delivered it.
///
/// The textual IP may carry a `%zone` scope qualifier on link-local IPv6;
/// it is kept verbatim here and stripped at snapshot-build time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkAddress {
    pub address: String,
    pub prefix_len: u8,
}

impl LinkAddress {
    pub fn new(address: impl Into<String>, prefix_len: u8) -> Self {
        Self {
            address: address.into(),
            prefix_len,
        }
    }

    /// Plain `ip/prefixLen` CIDR form, scope qualifier and everything after
    /// it stripped. Downstream consumers parse standard notation only.
    pub fn to_cidr(&self) -> String {
        let ip = match self.address.find('%') {
            Some(at) => &self.address[..at],
            None => self.address.as_str(),
        };
        format!("{}/{}", ip, self.prefix_len)
    }
}

/// Last-known per-network record: interface name plus assigned addresses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkProperties {
    /// Interface name; `None` (or empty) means not yet resolved.
    pub interface_name: Option<String>,
    pub addresses: Vec<LinkAddress>,
}

impl LinkProperties {
    /// Properties with a known interface name and no addresses yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            interface_name: Some(name.into()),
            addresses: Vec::new(),
        }
    }

    /// Append one assigned address.
    pub fn with_address(mut self, address: impl Into<String>, prefix_len: u8) -> Self {
        self.addresses.push(LinkAddress::new(address, prefix_len));
        self
    }

    /// Interface name, treating the empty string as unknown.
    pub fn name(&self) -> Option<&str> {
        match self.interface_name.as_deref() {
            Some("") | None => None,
            some => some,
        }
    }
}
