//! Side-effect boundary toward the external transport engine.

use anyhow::Result;

/// Delivers one serialized snapshot per push cycle.
///
/// Best effort: the monitor catches and logs any error and never retries; a
/// failed push is superseded by the next network-change-triggered push. The
/// consumer is assumed idempotent and order-tolerant.
pub trait TransportBridge: Send + Sync {
    fn submit_network_state(&self, payload: &str) -> Result<()>;
}

/// Bridge that discards every snapshot. Useful when the transport engine is
/// not running yet.
#[derive(Debug, Default)]
pub struct NullBridge;

impl TransportBridge for NullBridge {
    fn submit_network_state(&self, payload: &str) -> Result<()> {
        tracing::trace!(bytes = payload.len(), "snapshot discarded");
        Ok(())
    }
}
