//! # senna-core - Security Dashboard Simulation Engine
//!
//! Synthetic threat alerts, user-behavior anomalies and severity trends for
//! the Senna operations dashboard, plus the canned assistant replies and the
//! performance and network counters shown alongside them.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        senna-core                            │
//! │                                                              │
//! │   SimRng (seeded, shared) ─┬──────────────┬───────────────┐  │
//! │                            ▼              ▼               ▼  │
//! │   ┌──────────────────┐  ┌───────────┐  ┌───────────┐  ┌─────┐│
//! │   │ ThreatSimulator  │  │ Chat      │  │Performance│  │ Net ││
//! │   │ threat/anomaly/  │  │ Responder │  │ Simulator │  │ Sim ││
//! │   │ trend timers     │  └───────────┘  └───────────┘  └─────┘│
//! │   └────────┬─────────┘                                       │
//! │            ▼                                                 │
//! │   ┌──────────────────┐                                       │
//! │   │    EventBus      │──► subscribers (dashboard feed, CLI)  │
//! │   └──────────────────┘                                       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use senna_core::{EventBus, SimRng, SimulationConfig, ThreatSimulator};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let bus = Arc::new(EventBus::new());
//! bus.subscribe(|event| println!("{:?}", event.kind()));
//!
//! let simulator = ThreatSimulator::new(bus, SimRng::seeded(7), SimulationConfig::default());
//! simulator.start();
//! tokio::time::sleep(std::time::Duration::from_secs(30)).await;
//! simulator.stop();
//! # }
//! ```

pub mod bus;
pub mod chat;
pub mod config;
pub mod error;
pub mod model;
pub mod network;
pub mod patterns;
pub mod performance;
pub mod rng;
pub mod template;
pub mod threat;

pub use bus::{EventBus, Subscriber, SubscriptionId};
pub use chat::{ChatResponder, ChatTopic};
pub use config::{Repeat, Schedule, SimulationConfig};
pub use error::SimError;
pub use model::{
    AnomalyCategory, AnomalyEvent, EventKind, Severity, SimulationEvent, ThreatEvent, TrendCounts,
    TrendSample,
};
pub use network::{NetworkSimulator, NetworkStatus, Quality};
pub use performance::{PerformanceSimulator, PerformanceSnapshot};
pub use rng::SimRng;
pub use threat::{EventGenerator, ThreatSimulator};
