//! Property-source abstraction: change events and pull-based queries.
//!
//! The core is never invoked directly by platform code. An adapter turns OS
//! notifications into [`NetEvent`]s on a channel and answers the pull
//! queries during snapshot construction, so unit tests can feed synthetic
//! event sequences.

use crate::types::{LinkProperties, NetworkId};

/// Change notifications driving the state store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetEvent {
    /// A network came up. Details usually follow with `Changed`.
    Available(NetworkId),
    /// A network's link properties were (re)announced.
    Changed(NetworkId, LinkProperties),
    /// A network went away.
    Lost(NetworkId),
}

/// MTU lookup failure.
///
/// Kept explicit so callers can distinguish "fell back to the default" from
/// "succeeded"; the snapshot builder substitutes the fallback and moves on.
#[derive(Debug, thiserror::Error)]
pub enum MtuError {
    #[error("interface {0} not found")]
    NotFound(String),

    #[error("malformed MTU value for {0}")]
    Malformed(String),

    #[error("MTU lookup not supported on this platform")]
    Unsupported,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Pull-based queries used while building a snapshot.
pub trait PropertySource: Send + Sync {
    /// Current properties for `id`, if the source still considers it active.
    fn link_properties(&self, id: NetworkId) -> Option<LinkProperties>;

    /// Network the OS currently routes general traffic through.
    fn default_network(&self) -> Option<NetworkId>;

    /// MTU for the named interface.
    fn mtu(&self, interface_name: &str) -> Result<u32, MtuError>;
}
