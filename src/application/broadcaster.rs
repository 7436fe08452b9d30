// Broadcast timer - Periodic generation and fan-out of stats updates
use crate::application::stats_service::StatsService;
use crate::domain::telemetry::StatsPayload;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Event name carried by every push frame
pub const STATS_UPDATE_EVENT: &str = "stats_update";

/// Fan-out channel for stats updates. Delivery is fire-and-forget.
#[derive(Clone)]
pub struct StatsBroadcaster {
    tx: broadcast::Sender<Arc<StatsPayload>>,
}

impl StatsBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Arc<StatsPayload>> {
        self.tx.subscribe()
    }

    /// Returns how many subscribers the update was queued for
    pub fn publish(&self, payload: StatsPayload) -> usize {
        // No subscribers is not an error
        self.tx.send(Arc::new(payload)).unwrap_or(0)
    }
}

/// Handle to the running timer task
pub struct BroadcastTimer {
    handle: JoinHandle<()>,
}

impl BroadcastTimer {
    /// Starts ticking; the first tick fires one full period after spawn.
    pub fn spawn(service: StatsService, broadcaster: StatsBroadcaster) -> Self {
        let period = service.interval();
        let handle = tokio::spawn(run_timer(service, broadcaster, period));
        Self { handle }
    }

    /// Cancels the timer and waits for the task to stop
    pub async fn shutdown(self) {
        self.handle.abort();
        let _ = self.handle.await;
        tracing::info!("Broadcast timer stopped");
    }
}

async fn run_timer(service: StatsService, broadcaster: StatsBroadcaster, period: Duration) {
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::info!(
        "Broadcasting {} every {}ms from {} source",
        STATS_UPDATE_EVENT,
        period.as_millis(),
        service.source_name()
    );

    loop {
        interval.tick().await;

        match service.tick() {
            Ok(payload) => {
                let delivered = broadcaster.publish(payload);
                tracing::debug!("Published {} to {} subscribers", STATS_UPDATE_EVENT, delivered);
            }
            Err(e) => {
                tracing::warn!("Skipping tick: {}", e);
            }
        }
    }
}
