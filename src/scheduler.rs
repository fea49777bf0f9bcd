//! Scheduling of patch passes: one delayed first pass once the page has
//! loaded, plus an unbounded periodic re-scan.

use std::sync::Arc;

use log::info;
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, sleep, Duration, Instant, MissedTickBehavior};

use crate::host::{PageHost, ReadyState};
use crate::logging::SCHEDULER_NAMESPACE;
use crate::patcher::run_pass;

/// Delay between page load and the first patch pass.
pub const FIRST_PASS_DELAY: Duration = Duration::from_millis(500);

/// Interval of the recurring re-scan.
pub const SCAN_INTERVAL: Duration = Duration::from_millis(2000);

/// Handle to the two scheduled patcher tasks.
///
/// Dropping the handle leaves both timers running for the lifetime of the
/// runtime, matching the page-lifetime model of the embedding. Call
/// [`PatcherHandle::shutdown`] for an orderly stop.
pub struct PatcherHandle {
    shutdown: watch::Sender<bool>,
    first_pass: JoinHandle<()>,
    scan: JoinHandle<()>,
}

impl PatcherHandle {
    /// Signal both tasks to stop without waiting for them.
    pub fn stop(&self) {
        let _ = self.shutdown.send(true);
    }

    /// Stop both tasks and wait until they have exited.
    pub async fn shutdown(self) {
        self.stop();
        let _ = self.first_pass.await;
        let _ = self.scan.await;
    }
}

/// Start the patcher against `host`.
///
/// Registers one delayed first pass, run [`FIRST_PASS_DELAY`] after the page
/// has finished loading, and one recurring scan every [`SCAN_INTERVAL`]. The
/// recurring scan is registered independently of the load event: the host
/// recreates charts when the user switches views or the dashboard refreshes,
/// and re-scanning is the only way to catch the new instances.
pub fn start(host: Arc<dyn PageHost>) -> PatcherHandle {
    let (shutdown, shutdown_rx) = watch::channel(false);

    let first_host = host.clone();
    let mut first_rx = shutdown_rx.clone();
    let first_pass = tokio::spawn(async move {
        if first_host.ready_state() == ReadyState::Loading {
            let loaded = Arc::new(Notify::new());
            let notify = loaded.clone();
            first_host.on_load(Box::new(move || notify.notify_one()));
            tokio::select! {
                _ = loaded.notified() => {}
                _ = stopped(&mut first_rx) => return,
            }
        }
        tokio::select! {
            _ = sleep(FIRST_PASS_DELAY) => {}
            _ = stopped(&mut first_rx) => return,
        }
        run_pass(first_host.as_ref());
    });

    let mut scan_rx = shutdown_rx;
    let scan = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + SCAN_INTERVAL, SCAN_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    run_pass(host.as_ref());
                }
                _ = stopped(&mut scan_rx) => break,
            }
        }
    });

    info!(target: SCHEDULER_NAMESPACE, "chart patcher initialized");

    PatcherHandle {
        shutdown,
        first_pass,
        scan,
    }
}

/// Resolves once a stop has been signalled. A dropped sender means the
/// handle is gone and the tasks keep running for the page's lifetime, so in
/// that case this never resolves.
async fn stopped(rx: &mut watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
