use std::sync::Arc;
use std::time::Duration;

use nl_core::{MonitorConfig, NetMonitor, NetworkSnapshot};
use nl_integration_tests::common::RecordingBridge;
use nl_system::{SystemSource, SystemWatcher, WatcherConfig};
use tokio::sync::mpsc;
use tokio::time::sleep;

#[tokio::test]
async fn test_live_host_scan_reaches_the_bridge() {
    let _ = tracing_subscriber::fmt::try_init();

    let source = Arc::new(SystemSource::new());
    if source.scan().is_empty() {
        // Host exposes no interfaces at all; nothing to observe.
        return;
    }

    let bridge = Arc::new(RecordingBridge::new());
    let config = MonitorConfig::default();
    let (events_tx, events_rx) = mpsc::channel(config.event_buffer);
    let monitor = Arc::new(NetMonitor::new(source.clone(), bridge.clone(), config));
    let monitor_task = monitor.clone().run(events_rx);

    let watcher = SystemWatcher::spawn(
        source,
        WatcherConfig {
            poll_interval: Duration::from_millis(100),
        },
        events_tx,
    );

    // The first poll fires immediately; give the pipeline a moment.
    let mut waited = Duration::ZERO;
    while bridge.payloads().is_empty() && waited < Duration::from_secs(5) {
        sleep(Duration::from_millis(50)).await;
        waited += Duration::from_millis(50);
    }

    watcher.stop();
    monitor_task.await.unwrap();

    let last = bridge.last().expect("no snapshot reached the bridge");
    let snapshot = NetworkSnapshot::from_json(&last).unwrap();
    assert!(!snapshot.interfaces.is_empty());
}
