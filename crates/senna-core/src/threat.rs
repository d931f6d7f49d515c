//! Threat Simulator
//!
//! Owns the three periodic generators (threat, anomaly, trend) and the
//! manual demo triggers. Every generated event is published on the shared
//! [`EventBus`].
//!
//! ```text
//!   start() ──► ┌──────────────┐  sleep(initial), then sleep(next_delay) ...
//!               │ threat task  │──┐
//!               ├──────────────┤  │   EventGenerator::emit(kind)
//!               │ anomaly task │──┼──────────────────────────────► EventBus
//!               ├──────────────┤  │
//!               │ trend task   │──┘
//!               └──────────────┘
//!   stop()  ──► CancellationToken::cancel()  (all three exit)
//! ```

use crate::bus::EventBus;
use crate::config::SimulationConfig;
use crate::model::{
    AnomalyCategory, AnomalyEvent, EventKind, Severity, SimulationEvent, ThreatEvent, TrendCounts,
    TrendSample,
};
use crate::patterns::{self, ANOMALY_IDENTITIES, THREAT_PATTERNS};
use crate::rng::SimRng;
use crate::template;
use chrono::{Local, Utc};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

/// Builds events from the pattern tables and publishes them.
///
/// Cheap to clone; clones share the bus and the random stream.
#[derive(Clone)]
pub struct EventGenerator {
    bus: Arc<EventBus>,
    rng: SimRng,
}

impl EventGenerator {
    pub fn new(bus: Arc<EventBus>, rng: SimRng) -> Self {
        Self { bus, rng }
    }

    /// Random threat from a random pattern
    pub fn threat(&self) -> ThreatEvent {
        let pattern = self.rng.pick(&THREAT_PATTERNS);
        let source = *self.rng.pick(pattern.sources);
        let description = *self.rng.pick(pattern.descriptions);
        let level = *self.rng.pick(pattern.severities);

        ThreatEvent {
            id: Uuid::new_v4().to_string(),
            title: format!("{} from {}", pattern.kind, source),
            level,
            description: template::render(description, &[("source", source.to_string())]),
            timestamp: patterns::JUST_NOW.to_string(),
            is_new: true,
        }
    }

    /// Random anomaly for a random identity, confidence in 70..=99
    pub fn anomaly(&self) -> AnomalyEvent {
        AnomalyEvent {
            user: self.rng.pick(&ANOMALY_IDENTITIES).to_string(),
            anomaly: *self.rng.pick(&AnomalyCategory::GENERATED),
            confidence: 70 + self.rng.range_u32(0..30) as u8,
            last_seen: patterns::JUST_NOW.to_string(),
            exact_time: Utc::now(),
            is_new: true,
        }
    }

    /// Fresh trend bucket stamped with the current time
    pub fn trend(&self) -> TrendSample {
        let counts = TrendCounts {
            critical: self.rng.range_u32(0..8),
            high: self.rng.range_u32(0..15) + 2,
            medium: self.rng.range_u32(0..20) + 5,
            low: self.rng.range_u32(0..25) + 8,
        };
        TrendSample {
            time: Local::now().format("%H:%M").to_string(),
            timestamp: Utc::now(),
            counts,
        }
    }

    /// Generate one event of the given kind and publish it
    pub fn emit(&self, kind: EventKind) -> SimulationEvent {
        let event = match kind {
            EventKind::Threat => SimulationEvent::Threat(self.threat()),
            EventKind::Anomaly => SimulationEvent::Anomaly(self.anomaly()),
            EventKind::Trend => SimulationEvent::Trend(self.trend()),
        };
        self.bus.publish(&event);
        event
    }

    pub fn publish(&self, event: SimulationEvent) -> SimulationEvent {
        self.bus.publish(&event);
        event
    }
}

#[derive(Default)]
struct Lifecycle {
    cancel: Option<CancellationToken>,
    tasks: Vec<JoinHandle<()>>,
}

/// Periodic event source for the dashboard.
///
/// Construct one per application and share it by `Arc`. `start` and `stop`
/// are symmetric: `stop` cancels every armed timer, and a later `start` arms
/// a fresh set.
pub struct ThreatSimulator {
    generator: EventGenerator,
    config: SimulationConfig,
    lifecycle: Mutex<Lifecycle>,
}

impl ThreatSimulator {
    pub fn new(bus: Arc<EventBus>, rng: SimRng, config: SimulationConfig) -> Self {
        Self {
            generator: EventGenerator::new(bus, rng),
            config,
            lifecycle: Mutex::new(Lifecycle::default()),
        }
    }

    pub fn generator(&self) -> &EventGenerator {
        &self.generator
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.lock().cancel.is_some()
    }

    /// Arm the three generators. No-op while already running.
    ///
    /// Returns true if timers were armed. Must be called from within a Tokio
    /// runtime.
    pub fn start(&self) -> bool {
        let mut lifecycle = self.lock();
        if lifecycle.cancel.is_some() {
            debug!("simulator already running");
            return false;
        }

        let token = CancellationToken::new();
        lifecycle.tasks = [EventKind::Threat, EventKind::Anomaly, EventKind::Trend]
            .into_iter()
            .map(|kind| self.spawn_generator(kind, token.clone()))
            .collect();
        lifecycle.cancel = Some(token);

        info!("threat simulator started");
        true
    }

    /// Cancel all armed timers. Returns false if the simulator was not running.
    pub fn stop(&self) -> bool {
        let mut lifecycle = self.lock();
        let Some(token) = lifecycle.cancel.take() else {
            return false;
        };
        token.cancel();
        for task in lifecycle.tasks.drain(..) {
            task.abort();
        }

        info!("threat simulator stopped");
        true
    }

    fn spawn_generator(&self, kind: EventKind, token: CancellationToken) -> JoinHandle<()> {
        let generator = self.generator.clone();
        let schedule = self.config.schedule(kind);

        tokio::spawn(async move {
            let mut delay = schedule.initial;
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    _ = tokio::time::sleep(delay) => {}
                }
                generator.emit(kind);
                delay = schedule.next_delay(&generator.rng);
            }
            debug!(kind = %kind, "generator exited");
        })
    }

    // --- Manual demo triggers ---

    /// Publish a critical APT alert
    pub fn trigger_critical_threat(&self) -> ThreatEvent {
        let threat = manual_threat(patterns::APT_TITLE, patterns::APT_DESCRIPTION);
        self.generator.publish(SimulationEvent::Threat(threat.clone()));
        threat
    }

    /// Publish a high-confidence privilege escalation anomaly
    pub fn trigger_anomaly(&self) -> AnomalyEvent {
        let anomaly = AnomalyEvent {
            user: patterns::ESCALATION_IDENTITY.to_string(),
            anomaly: AnomalyCategory::PrivilegeEscalation,
            confidence: patterns::ESCALATION_CONFIDENCE,
            last_seen: patterns::JUST_NOW.to_string(),
            exact_time: Utc::now(),
            is_new: true,
        };
        self.generator.publish(SimulationEvent::Anomaly(anomaly.clone()));
        anomaly
    }

    /// Publish a data-breach alert. Returns the published alert and the
    /// assistant's notice for it.
    pub fn trigger_breach(&self) -> (ThreatEvent, &'static str) {
        let threat = manual_threat(patterns::BREACH_TITLE, patterns::BREACH_DESCRIPTION);
        self.generator.publish(SimulationEvent::Threat(threat.clone()));
        (threat, patterns::BREACH_NOTICE)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ThreatSimulator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn manual_threat(title: &str, description: &str) -> ThreatEvent {
    ThreatEvent {
        id: Uuid::new_v4().to_string(),
        title: title.to_string(),
        level: Severity::Critical,
        description: description.to_string(),
        timestamp: patterns::JUST_NOW.to_string(),
        is_new: true,
    }
}
