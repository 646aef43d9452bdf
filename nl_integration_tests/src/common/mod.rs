//! Scripted fakes standing in for the OS property source and the transport
//! engine.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use anyhow::Result;
use nl_core::{LinkProperties, MtuError, NetworkId, PropertySource, TransportBridge};

/// Property source with adjustable answers, so tests can script exactly
/// what the OS would report.
#[derive(Debug, Default)]
pub struct FakeSource {
    inner: Mutex<FakeSourceState>,
}

#[derive(Debug, Default)]
struct FakeSourceState {
    properties: HashMap<NetworkId, LinkProperties>,
    default_network: Option<NetworkId>,
    mtus: HashMap<String, u32>,
    fail_mtu: bool,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_properties(&self, id: NetworkId, properties: LinkProperties) {
        self.inner.lock().unwrap().properties.insert(id, properties);
    }

    pub fn set_default_network(&self, id: Option<NetworkId>) {
        self.inner.lock().unwrap().default_network = id;
    }

    pub fn set_mtu(&self, interface_name: &str, mtu: u32) {
        self.inner
            .lock()
            .unwrap()
            .mtus
            .insert(interface_name.to_string(), mtu);
    }

    /// When set, every MTU lookup fails regardless of scripted values.
    pub fn fail_mtu_lookups(&self, fail: bool) {
        self.inner.lock().unwrap().fail_mtu = fail;
    }
}

impl PropertySource for FakeSource {
    fn link_properties(&self, id: NetworkId) -> Option<LinkProperties> {
        self.inner.lock().unwrap().properties.get(&id).cloned()
    }

    fn default_network(&self) -> Option<NetworkId> {
        self.inner.lock().unwrap().default_network
    }

    fn mtu(&self, interface_name: &str) -> std::result::Result<u32, MtuError> {
        let state = self.inner.lock().unwrap();
        if state.fail_mtu {
            return Err(MtuError::Unsupported);
        }
        state
            .mtus
            .get(interface_name)
            .copied()
            .ok_or_else(|| MtuError::NotFound(interface_name.to_string()))
    }
}

/// Bridge that records every submitted payload.
#[derive(Debug, Default)]
pub struct RecordingBridge {
    payloads: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn payloads(&self) -> Vec<String> {
        self.payloads.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.payloads.lock().unwrap().last().cloned()
    }

    /// When set, every submission is rejected.
    pub fn fail_submissions(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl TransportBridge for RecordingBridge {
    fn submit_network_state(&self, payload: &str) -> Result<()> {
        if self.fail.load(Ordering::SeqCst) {
            anyhow::bail!("transport engine unavailable");
        }
        self.payloads.lock().unwrap().push(payload.to_string());
        Ok(())
    }
}
