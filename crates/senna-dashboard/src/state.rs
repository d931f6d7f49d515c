//! Shared application state and the background tasks that keep the feed
//! current.

use crate::config::DashboardConfig;
use crate::feed::DashboardFeed;
use senna_core::{
    ChatResponder, EventBus, NetworkSimulator, PerformanceSimulator, SimRng, SimulationEvent,
    SubscriptionId, ThreatSimulator, patterns,
};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Thread-safe handle to everything the API serves
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub rng: SimRng,
    pub bus: Arc<EventBus>,
    pub simulator: Arc<ThreatSimulator>,
    pub chat: Arc<ChatResponder>,
    pub performance: Arc<PerformanceSimulator>,
    pub network: Arc<NetworkSimulator>,
    feed: Arc<Mutex<DashboardFeed>>,
}

impl AppState {
    /// Build the engine components and connect the feed to the bus
    pub fn new(config: DashboardConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::from_os(),
        };
        let bus = Arc::new(EventBus::new());
        let simulator = Arc::new(ThreatSimulator::new(
            bus.clone(),
            rng.clone(),
            config.simulation.clone(),
        ));
        let performance = Arc::new(PerformanceSimulator::new(rng.clone()));
        let network = Arc::new(NetworkSimulator::new(rng.clone()));

        let mut feed = DashboardFeed::seeded();
        feed.metrics = Some(performance.generate_metrics());
        feed.network = Some(network.get_status());

        let state = Self {
            config: Arc::new(config),
            chat: Arc::new(ChatResponder::new(rng.clone())),
            rng,
            bus,
            simulator,
            performance,
            network,
            feed: Arc::new(Mutex::new(feed)),
        };
        state.attach_feed();
        state
    }

    pub fn feed(&self) -> MutexGuard<'_, DashboardFeed> {
        self.feed.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fold every published event into the feed and schedule the "new" flag
    /// reset for its table. Threat and anomaly highlights expire independently.
    fn attach_feed(&self) -> SubscriptionId {
        let feed = self.feed.clone();
        let normal = self.config.new_flag_window();
        let breach = self.config.breach_flag_window();

        self.bus.subscribe(move |event| {
            feed.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .apply(event);

            let (table, window) = match event {
                SimulationEvent::Threat(t) if t.title == patterns::BREACH_TITLE => {
                    (FlaggedTable::Threats, breach)
                }
                SimulationEvent::Threat(_) => (FlaggedTable::Threats, normal),
                SimulationEvent::Anomaly(_) => (FlaggedTable::Anomalies, normal),
                SimulationEvent::Trend(_) => return,
            };
            schedule_flag_reset(feed.clone(), table, window);
        })
    }

    /// Refresh performance and network counters on an interval until cancelled
    pub fn spawn_metrics_poller(&self, token: CancellationToken) -> JoinHandle<()> {
        let state = self.clone();
        let period = self.config.metrics_poll_interval();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.tick().await;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = ticker.tick() => state.refresh_counters(),
                }
            }
            debug!("metrics poller exited");
        })
    }

    pub fn refresh_counters(&self) {
        let metrics = self.performance.generate_metrics();
        let network = self.network.get_status();
        let mut feed = self.feed();
        feed.metrics = Some(metrics);
        feed.network = Some(network);
    }

    /// Simulated assistant think time
    pub fn chat_delay(&self) -> Duration {
        let (min, max) = self.config.chat_delay();
        self.rng.delay_between(min, max)
    }

    pub fn shutdown(&self) {
        if self.simulator.stop() {
            info!("simulation halted for shutdown");
        }
    }
}

#[derive(Clone, Copy)]
enum FlaggedTable {
    Threats,
    Anomalies,
}

fn schedule_flag_reset(feed: Arc<Mutex<DashboardFeed>>, table: FlaggedTable, window: Duration) {
    // Events published outside a runtime keep their flag until the next reset
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        return;
    };
    handle.spawn(async move {
        tokio::time::sleep(window).await;
        let mut feed = feed.lock().unwrap_or_else(PoisonError::into_inner);
        match table {
            FlaggedTable::Threats => feed.clear_threat_flags(),
            FlaggedTable::Anomalies => feed.clear_anomaly_flags(),
        }
    });
}
