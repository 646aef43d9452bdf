//! Monitor configuration.

/// MTU substituted when the per-interface lookup fails (Ethernet default).
pub const DEFAULT_MTU: u32 = 1500;

/// Configuration for the notification-to-push pipeline
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// MTU used when the per-interface lookup fails
    pub mtu_fallback: u32,
    /// Capacity of the change-event channel
    pub event_buffer: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            mtu_fallback: DEFAULT_MTU,
            event_buffer: 64,
        }
    }
}
