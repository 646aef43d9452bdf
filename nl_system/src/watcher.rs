//! Interface watcher: polls the host table and emits change events.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use nl_core::{LinkProperties, NetEvent, NetworkId};

use crate::source::SystemSource;

/// Watcher configuration
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// How often the host interface table is re-scanned
    pub poll_interval: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
        }
    }
}

/// Polls the host interface table and converts scan differences into
/// [`NetEvent`]s on a channel.
///
/// A new interface is announced as `Available` followed by `Changed` with
/// its properties, mirroring how OS connectivity callbacks behave.
pub struct SystemWatcher {
    stop_tx: watch::Sender<bool>,
}

impl SystemWatcher {
    /// Spawn the polling task; events are delivered on `events` until the
    /// watcher is stopped or the receiver goes away.
    pub fn spawn(
        source: Arc<SystemSource>,
        config: WatcherConfig,
        events: mpsc::Sender<NetEvent>,
    ) -> Self {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.poll_interval);
            let mut known: HashMap<NetworkId, LinkProperties> = HashMap::new();

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let scan: HashMap<_, _> = source.scan().into_iter().collect();

                        for (id, properties) in &scan {
                            match known.get(id) {
                                None => {
                                    if events.send(NetEvent::Available(*id)).await.is_err() {
                                        return;
                                    }
                                    if events.send(NetEvent::Changed(*id, properties.clone())).await.is_err() {
                                        return;
                                    }
                                }
                                Some(previous) if previous != properties => {
                                    if events.send(NetEvent::Changed(*id, properties.clone())).await.is_err() {
                                        return;
                                    }
                                }
                                Some(_) => {}
                            }
                        }

                        for id in known.keys() {
                            if !scan.contains_key(id) {
                                if events.send(NetEvent::Lost(*id)).await.is_err() {
                                    return;
                                }
                            }
                        }

                        known = scan;
                    }
                    _ = stop_rx.changed() => {
                        break;
                    }
                }
            }
        });

        Self { stop_tx }
    }

    /// Stop polling. Teardown is best effort: failure to signal the task is
    /// logged and ignored.
    pub fn stop(&self) {
        if self.stop_tx.send(true).is_err() {
            tracing::warn!("watcher task already stopped");
        }
    }
}
