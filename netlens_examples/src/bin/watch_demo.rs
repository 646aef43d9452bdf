//! Watch the host's interfaces and print the engine-side view as it
//! changes.

use std::sync::Arc;
use std::time::Duration;

use nl_core::logging;
use nl_core::{EngineState, MonitorConfig, NetMonitor};
use nl_system::{SystemSource, SystemWatcher, WatcherConfig};
use tokio::sync::mpsc;
use tokio::time::sleep;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_dev_logging();

    println!("NetLens demo: watching host interfaces");
    println!("{}", "=".repeat(50));

    let source = Arc::new(SystemSource::new());
    let engine = Arc::new(EngineState::new());

    let config = MonitorConfig::default();
    let (events_tx, events_rx) = mpsc::channel(config.event_buffer);

    let monitor = Arc::new(NetMonitor::new(source.clone(), engine.clone(), config));
    let monitor_task = monitor.clone().run(events_rx);

    let watcher = SystemWatcher::spawn(
        source,
        WatcherConfig {
            poll_interval: Duration::from_secs(2),
        },
        events_tx,
    );

    // Push once before the first poll lands, so the engine starts from the
    // placeholder state visibly.
    monitor.push_now();

    for round in 1..=10 {
        sleep(Duration::from_secs(2)).await;

        println!("\nround {round}: {} network(s) tracked", monitor.tracked());
        for iface in engine.interfaces() {
            println!("  {} (mtu {})", iface.name, iface.mtu);
            for (addr, prefix_len) in &iface.addrs {
                println!("    {addr}/{prefix_len}");
            }
        }
        if let Some(route) = engine.default_route() {
            println!("  default route: {} via {}", route.name, route.addr);
        }
    }

    watcher.stop();
    monitor_task.await?;

    println!("\nDemo complete");
    Ok(())
}
