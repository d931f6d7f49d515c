//! Dashboard performance counters. Each snapshot is drawn independently;
//! no field depends on another or on the previous snapshot.

use crate::rng::SimRng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceSnapshot {
    /// 1247..=2246
    pub threats_blocked: u32,
    /// Seconds, 0.1..=0.6, one decimal
    pub response_time: f64,
    /// Percent, 99.5..=99.9, two decimals
    pub uptime: f64,
    /// Percent, 99.0..=99.9, one decimal
    pub detection_rate: f64,
    /// Percent, 0.0..=2.0, one decimal
    pub false_positives: f64,
    /// 200..=699
    pub active_connections: u32,
    /// e.g. "87.3 GB"
    pub data_processed: String,
    /// e.g. "12 minutes ago"
    pub models_updated: String,
}

pub struct PerformanceSimulator {
    rng: SimRng,
}

impl PerformanceSimulator {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }

    pub fn generate_metrics(&self) -> PerformanceSnapshot {
        let rng = &self.rng;
        PerformanceSnapshot {
            threats_blocked: 1247 + rng.range_u32(0..1000),
            response_time: round_to(0.1 + rng.range_f64(0.0..0.5), 1),
            uptime: round_to(99.5 + rng.range_f64(0.0..0.4), 2),
            detection_rate: round_to(99.0 + rng.range_f64(0.0..0.9), 1),
            false_positives: round_to(rng.range_f64(0.0..2.0), 1),
            active_connections: 200 + rng.range_u32(0..500),
            data_processed: format!("{:.1} GB", 50.0 + rng.range_f64(0.0..100.0)),
            models_updated: format!("{} minutes ago", rng.range_u32(0..60)),
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_ranges() {
        let sim = PerformanceSimulator::new(SimRng::seeded(17));
        for _ in 0..2000 {
            let m = sim.generate_metrics();
            assert!((1247..=2246).contains(&m.threats_blocked));
            assert!((0.1..=0.6).contains(&m.response_time), "{}", m.response_time);
            assert!((99.5..=99.9).contains(&m.uptime), "{}", m.uptime);
            assert!((99.0..=99.9).contains(&m.detection_rate));
            assert!((0.0..=2.0).contains(&m.false_positives));
            assert!((200..=699).contains(&m.active_connections));

            let gb: f64 = m
                .data_processed
                .trim_end_matches(" GB")
                .parse()
                .expect("numeric data volume");
            assert!((50.0..=150.0).contains(&gb));

            let minutes: u32 = m
                .models_updated
                .trim_end_matches(" minutes ago")
                .parse()
                .expect("numeric minutes");
            assert!(minutes < 60);
        }
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round_to(0.5999, 1), 0.6);
        assert_eq!(round_to(99.8999, 2), 99.9);
        assert_eq!(round_to(0.14, 1), 0.1);
    }
}
