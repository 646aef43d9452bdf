//! # NetLens core
//!
//! Concurrent aggregation of host network state for an external
//! transport/tunneling engine.
//!
//! Change notifications (network available / changed / lost) are merged
//! into a consistent multi-network map. After every change a canonical
//! snapshot of all known interfaces plus the current default interface is
//! serialized and pushed across the [`bridge::TransportBridge`] boundary:
//!
//! ```text
//! {"Interfaces":[{"Name":"wlan0","MTU":1500,"Addrs":["192.168.1.5/24"]}],
//!  "DefaultInterface":"wlan0"}
//! ```
//!
//! One mutex serializes the whole notification-to-push pipeline, so the
//! engine never observes a half-applied update. Pushes are best effort: a
//! failed push is logged and superseded by the next change.

pub mod bridge;
pub mod config;
pub mod engine;
pub mod logging;
pub mod monitor;
pub mod snapshot;
pub mod source;
pub mod store;
pub mod types;

pub use bridge::{NullBridge, TransportBridge};
pub use config::{MonitorConfig, DEFAULT_MTU};
pub use engine::{DefaultRoute, EngineInterface, EngineState};
pub use monitor::NetMonitor;
pub use snapshot::{build_snapshot, InterfaceSummary, NetworkSnapshot};
pub use source::{MtuError, NetEvent, PropertySource};
pub use store::LinkTable;
pub use types::{LinkAddress, LinkProperties, NetworkId};

/// State-aggregation errors
#[derive(Debug, thiserror::Error)]
pub enum NetStateError {
    #[error("snapshot serialization error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("snapshot decode error: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NetStateError>;
