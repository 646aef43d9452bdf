use std::sync::Arc;

use nl_core::{LinkProperties, MonitorConfig, NetEvent, NetMonitor, NetworkId};
use nl_integration_tests::common::{FakeSource, RecordingBridge};

fn monitor_with(source: &Arc<FakeSource>, bridge: &Arc<RecordingBridge>) -> NetMonitor {
    NetMonitor::new(source.clone(), bridge.clone(), MonitorConfig::default())
}

#[test]
fn test_mtu_lookup_failure_falls_back_to_1500() {
    let source = Arc::new(FakeSource::new());
    let bridge = Arc::new(RecordingBridge::new());
    source.fail_mtu_lookups(true);

    let monitor = monitor_with(&source, &bridge);
    monitor.handle_event(NetEvent::Changed(
        NetworkId::new(1),
        LinkProperties::named("wlan0").with_address("192.168.1.5", 24),
    ));

    assert!(bridge.last().unwrap().contains(r#""MTU":1500"#));
}

#[test]
fn test_no_default_network_serializes_empty_string() {
    let source = Arc::new(FakeSource::new());
    let bridge = Arc::new(RecordingBridge::new());

    let monitor = monitor_with(&source, &bridge);
    monitor.handle_event(NetEvent::Changed(
        NetworkId::new(1),
        LinkProperties::named("wlan0"),
    ));

    assert!(bridge.last().unwrap().contains(r#""DefaultInterface":"""#));
}

#[test]
fn test_unresolvable_default_name_serializes_empty_string() {
    let source = Arc::new(FakeSource::new());
    let bridge = Arc::new(RecordingBridge::new());
    // Default network id exists but neither the source nor the store can
    // name it.
    source.set_default_network(Some(NetworkId::new(99)));

    let monitor = monitor_with(&source, &bridge);
    monitor.handle_event(NetEvent::Changed(
        NetworkId::new(1),
        LinkProperties::named("wlan0"),
    ));

    assert!(bridge.last().unwrap().contains(r#""DefaultInterface":"""#));
}

#[test]
fn test_partial_entries_are_omitted_not_defaulted() {
    let source = Arc::new(FakeSource::new());
    let bridge = Arc::new(RecordingBridge::new());

    let monitor = monitor_with(&source, &bridge);
    monitor.handle_event(NetEvent::Changed(
        NetworkId::new(1),
        LinkProperties::default(),
    ));

    assert!(bridge.last().unwrap().contains(r#""Interfaces":[]"#));
}

#[test]
fn test_bridge_failures_never_stop_the_monitor() {
    let source = Arc::new(FakeSource::new());
    let bridge = Arc::new(RecordingBridge::new());
    bridge.fail_submissions(true);

    let monitor = monitor_with(&source, &bridge);
    for raw in 0..5 {
        monitor.handle_event(NetEvent::Changed(
            NetworkId::new(raw),
            LinkProperties::named(format!("if{raw}")),
        ));
    }

    // Every push was rejected; every state change still landed.
    assert!(bridge.payloads().is_empty());
    assert_eq!(monitor.tracked(), 5);

    // The next successful cycle supersedes all failed ones.
    bridge.fail_submissions(false);
    monitor.handle_event(NetEvent::Lost(NetworkId::new(0)));
    let last = bridge.last().unwrap();
    assert!(!last.contains(r#""Name":"if0""#));
    assert!(last.contains(r#""Name":"if4""#));
}
