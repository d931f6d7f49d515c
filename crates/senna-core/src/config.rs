//! Generator timing configuration

use crate::error::SimError;
use crate::model::EventKind;
use crate::rng::SimRng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Timer settings for the three periodic generators (milliseconds).
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub threat_initial_delay_ms: u64,
    pub threat_delay_min_ms: u64,
    pub threat_delay_max_ms: u64,

    pub anomaly_initial_delay_ms: u64,
    pub anomaly_delay_min_ms: u64,
    pub anomaly_delay_max_ms: u64,

    pub trend_initial_delay_ms: u64,
    pub trend_interval_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            threat_initial_delay_ms: 2_000,
            threat_delay_min_ms: 8_000,
            threat_delay_max_ms: 20_000,
            anomaly_initial_delay_ms: 4_000,
            anomaly_delay_min_ms: 15_000,
            anomaly_delay_max_ms: 35_000,
            trend_initial_delay_ms: 6_000,
            trend_interval_ms: 5_000,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file and validate
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        check_range("threat", self.threat_delay_min_ms, self.threat_delay_max_ms)?;
        check_range("anomaly", self.anomaly_delay_min_ms, self.anomaly_delay_max_ms)?;
        if self.trend_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "trend_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Timer schedule for one generator
    pub fn schedule(&self, kind: EventKind) -> Schedule {
        let ms = Duration::from_millis;
        match kind {
            EventKind::Threat => Schedule {
                initial: ms(self.threat_initial_delay_ms),
                repeat: Repeat::Uniform {
                    min: ms(self.threat_delay_min_ms),
                    max: ms(self.threat_delay_max_ms),
                },
            },
            EventKind::Anomaly => Schedule {
                initial: ms(self.anomaly_initial_delay_ms),
                repeat: Repeat::Uniform {
                    min: ms(self.anomaly_delay_min_ms),
                    max: ms(self.anomaly_delay_max_ms),
                },
            },
            EventKind::Trend => Schedule {
                initial: ms(self.trend_initial_delay_ms),
                repeat: Repeat::Fixed(ms(self.trend_interval_ms)),
            },
        }
    }
}

fn check_range(name: &str, min: u64, max: u64) -> Result<(), SimError> {
    if min == 0 || max <= min {
        return Err(SimError::InvalidConfig(format!(
            "{} delay range must satisfy 0 < min < max (got {}..{})",
            name, min, max
        )));
    }
    Ok(())
}

/// When a generator fires
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    pub initial: Duration,
    pub repeat: Repeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Fixed(Duration),
    /// Uniform in `[min, max)`, redrawn for every firing
    Uniform { min: Duration, max: Duration },
}

impl Schedule {
    pub fn next_delay(&self, rng: &SimRng) -> Duration {
        match self.repeat {
            Repeat::Fixed(d) => d,
            Repeat::Uniform { min, max } => rng.delay_between(min, max),
        }
    }
}

/// Read and deserialize a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, SimError> {
    let text = std::fs::read_to_string(path).map_err(|source| SimError::ConfigIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SimError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());

        let threat = config.schedule(EventKind::Threat);
        assert_eq!(threat.initial, Duration::from_secs(2));
        assert_eq!(
            threat.repeat,
            Repeat::Uniform {
                min: Duration::from_secs(8),
                max: Duration::from_secs(20)
            }
        );
        assert_eq!(
            config.schedule(EventKind::Trend).repeat,
            Repeat::Fixed(Duration::from_secs(5))
        );
    }

    #[test]
    fn test_inverted_range_rejected() {
        let config = SimulationConfig {
            anomaly_delay_min_ms: 35_000,
            anomaly_delay_max_ms: 15_000,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("anomaly"));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"trend_interval_ms": 1000}"#).unwrap();
        assert_eq!(config.trend_interval_ms, 1000);
        assert_eq!(config.threat_delay_max_ms, 20_000);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = SimulationConfig::load(Path::new("/nonexistent/senna.json")).unwrap_err();
        assert!(matches!(err, SimError::ConfigIo { .. }));
        assert!(err.to_string().contains("senna.json"));
    }

    #[test]
    fn test_uniform_next_delay_in_range() {
        let rng = SimRng::seeded(5);
        let schedule = SimulationConfig::default().schedule(EventKind::Anomaly);
        for _ in 0..200 {
            let d = schedule.next_delay(&rng);
            assert!(d >= Duration::from_secs(15) && d < Duration::from_secs(35));
        }
    }
}
