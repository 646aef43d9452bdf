//! The notification-to-push pipeline.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::bridge::TransportBridge;
use crate::config::MonitorConfig;
use crate::snapshot::build_snapshot;
use crate::source::{NetEvent, PropertySource};
use crate::store::LinkTable;

/// Aggregates change notifications into the state store and pushes a fresh
/// serialized snapshot to the transport bridge after every change.
///
/// One mutex serializes store mutation, snapshot build, serialization and
/// bridge push, so two notifications never interleave their effects. Bursts
/// serialize strictly: each notification yields its own push, none are
/// coalesced.
pub struct NetMonitor {
    table: Mutex<LinkTable>,
    source: Arc<dyn PropertySource>,
    bridge: Arc<dyn TransportBridge>,
    config: MonitorConfig,
}

impl NetMonitor {
    pub fn new(
        source: Arc<dyn PropertySource>,
        bridge: Arc<dyn TransportBridge>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            table: Mutex::new(LinkTable::new()),
            source,
            bridge,
            config,
        }
    }

    /// Apply one change notification and push the resulting snapshot.
    ///
    /// Safe to call from any thread; the whole cycle runs under the lock.
    pub fn handle_event(&self, event: NetEvent) {
        let mut table = self.table.lock().unwrap();

        match event {
            NetEvent::Available(id) => {
                // Details usually arrive with a following Changed
                // notification; fetch what the source already knows in case
                // they never do.
                match self.source.link_properties(id) {
                    Some(properties) => table.upsert(id, properties),
                    None => {
                        debug!(%id, "network available but properties not yet known");
                        return;
                    }
                }
            }
            NetEvent::Changed(id, properties) => table.upsert(id, properties),
            NetEvent::Lost(id) => {
                if !table.remove(id) {
                    debug!(%id, "loss notification for unknown network");
                }
            }
        }

        self.push_locked(&table);
    }

    /// Force a push of the current state outside any notification, e.g. at
    /// startup.
    pub fn push_now(&self) {
        let table = self.table.lock().unwrap();
        self.push_locked(&table);
    }

    fn push_locked(&self, table: &LinkTable) {
        let snapshot = build_snapshot(table, self.source.as_ref(), self.config.mtu_fallback);

        let payload = match snapshot.to_json() {
            Ok(payload) => payload,
            Err(e) => {
                // Skipped, not retried: the next notification rebuilds from
                // scratch anyway.
                error!(error = %e, "failed to serialize snapshot, skipping push");
                return;
            }
        };

        debug!(
            default_interface = %snapshot.default_interface,
            interfaces = snapshot.interfaces.len(),
            "pushing network state"
        );

        if let Err(e) = self.bridge.submit_network_state(&payload) {
            warn!(error = %e, "transport bridge rejected snapshot");
        }
    }

    /// Consume change events until the channel closes.
    pub fn run(self: Arc<Self>, mut events: mpsc::Receiver<NetEvent>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                self.handle_event(event);
            }
            info!("event channel closed, monitor stopped");
        })
    }

    /// Number of networks currently tracked.
    pub fn tracked(&self) -> usize {
        self.table.lock().unwrap().len()
    }
}
