//! Simulated network link.
//!
//! Two states, Connected and Disconnected. Each call to
//! [`NetworkSimulator::get_status`] flips the state with probability
//! [`FLIP_PROBABILITY`]; while connected (including the call that
//! reconnects) the latency is redrawn. Latency is frozen while disconnected.

use crate::rng::SimRng;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};

pub const FLIP_PROBABILITY: f64 = 0.05;
pub const INITIAL_LATENCY_MS: u32 = 42;
/// Half-open range of freshly drawn latencies
pub const LATENCY_RANGE_MS: std::ops::Range<u32> = 20..100;

/// Link quality derived from latency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Excellent,
    Good,
    Poor,
}

impl Quality {
    pub fn from_latency(latency_ms: u32) -> Self {
        if latency_ms < 50 {
            Quality::Excellent
        } else if latency_ms < 100 {
            Quality::Good
        } else {
            Quality::Poor
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStatus {
    pub connected: bool,
    #[serde(rename = "latency")]
    pub latency_ms: u32,
    pub quality: Quality,
}

#[derive(Debug)]
struct Link {
    connected: bool,
    latency_ms: u32,
}

pub struct NetworkSimulator {
    link: Mutex<Link>,
    rng: SimRng,
}

impl NetworkSimulator {
    /// Starts connected at [`INITIAL_LATENCY_MS`]
    pub fn new(rng: SimRng) -> Self {
        Self::with_state(rng, true, INITIAL_LATENCY_MS)
    }

    pub fn with_state(rng: SimRng, connected: bool, latency_ms: u32) -> Self {
        Self {
            link: Mutex::new(Link {
                connected,
                latency_ms,
            }),
            rng,
        }
    }

    /// Advance the link one step and report it
    pub fn get_status(&self) -> NetworkStatus {
        let mut link = self.link.lock().unwrap_or_else(PoisonError::into_inner);

        if self.rng.chance(FLIP_PROBABILITY) {
            link.connected = !link.connected;
        }
        if link.connected {
            link.latency_ms = self.rng.range_u32(LATENCY_RANGE_MS);
        }

        NetworkStatus {
            connected: link.connected,
            latency_ms: link.latency_ms,
            quality: Quality::from_latency(link.latency_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_boundaries() {
        assert_eq!(Quality::from_latency(0), Quality::Excellent);
        assert_eq!(Quality::from_latency(49), Quality::Excellent);
        assert_eq!(Quality::from_latency(50), Quality::Good);
        assert_eq!(Quality::from_latency(99), Quality::Good);
        assert_eq!(Quality::from_latency(100), Quality::Poor);
        assert_eq!(Quality::from_latency(450), Quality::Poor);
    }

    #[test]
    fn test_quality_consistent_with_latency() {
        let net = NetworkSimulator::new(SimRng::seeded(31));
        for _ in 0..1000 {
            let status = net.get_status();
            assert_eq!(status.quality, Quality::from_latency(status.latency_ms));
            assert!(status.latency_ms < 100);
        }
    }

    #[test]
    fn test_flip_rate_near_five_percent() {
        let net = NetworkSimulator::new(SimRng::seeded(2024));
        let mut previous = true;
        let mut flips = 0;
        for _ in 0..1000 {
            let status = net.get_status();
            if status.connected != previous {
                flips += 1;
            }
            previous = status.connected;
        }
        // Binomial(1000, 0.05): mean 50, sd ~6.9
        assert!((20..=85).contains(&flips), "flips = {}", flips);
    }

    #[test]
    fn test_latency_frozen_while_disconnected() {
        // Run until the link drops, then check latency only moves on reconnect
        let net = NetworkSimulator::new(SimRng::seeded(77));
        let mut last: Option<NetworkStatus> = None;
        for _ in 0..2000 {
            let status = net.get_status();
            if let Some(prev) = last {
                if !prev.connected && !status.connected {
                    assert_eq!(prev.latency_ms, status.latency_ms);
                }
            }
            last = Some(status);
        }
    }

    #[test]
    fn test_poor_quality_reported_from_initial_state() {
        let net = NetworkSimulator::with_state(SimRng::seeded(0), false, 180);
        let status = net.get_status();
        if !status.connected {
            assert_eq!(status.latency_ms, 180);
            assert_eq!(status.quality, Quality::Poor);
        } else {
            assert_eq!(status.quality, Quality::from_latency(status.latency_ms));
        }
    }
}
