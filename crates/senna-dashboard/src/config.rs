//! Dashboard server configuration

use senna_core::config::load_json;
use senna_core::{SimError, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Host to bind to (default: 127.0.0.1)
    pub host: String,
    /// Port to listen on (default: 8080)
    pub port: u16,
    /// Fixed RNG seed; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Start the generators when the server starts
    pub autostart: bool,
    /// How long freshly published entries keep their "new" highlight
    pub new_flag_window_ms: u64,
    pub breach_flag_window_ms: u64,
    /// Simulated assistant think time, uniform in [min, max)
    pub chat_delay_min_ms: u64,
    pub chat_delay_max_ms: u64,
    /// Refresh period for performance and network counters
    pub metrics_poll_interval_ms: u64,
    pub simulation: SimulationConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            seed: None,
            autostart: true,
            new_flag_window_ms: 3_000,
            breach_flag_window_ms: 5_000,
            chat_delay_min_ms: 1_000,
            chat_delay_max_ms: 3_000,
            metrics_poll_interval_ms: 2_000,
            simulation: SimulationConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        self.simulation.validate()?;
        if self.chat_delay_max_ms < self.chat_delay_min_ms {
            return Err(SimError::InvalidConfig(format!(
                "chat delay range is inverted ({}..{})",
                self.chat_delay_min_ms, self.chat_delay_max_ms
            )));
        }
        if self.metrics_poll_interval_ms == 0 {
            return Err(SimError::InvalidConfig(
                "metrics_poll_interval_ms must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn new_flag_window(&self) -> Duration {
        Duration::from_millis(self.new_flag_window_ms)
    }

    pub fn breach_flag_window(&self) -> Duration {
        Duration::from_millis(self.breach_flag_window_ms)
    }

    pub fn chat_delay(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.chat_delay_min_ms),
            Duration::from_millis(self.chat_delay_max_ms),
        )
    }

    pub fn metrics_poll_interval(&self) -> Duration {
        Duration::from_millis(self.metrics_poll_interval_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_nested_simulation_overrides() {
        let config: DashboardConfig = serde_json::from_str(
            r#"{"port": 9000, "seed": 4, "simulation": {"trend_interval_ms": 2000}}"#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.simulation.trend_interval_ms, 2000);
        assert_eq!(config.simulation.threat_delay_min_ms, 8000);
    }

    #[test]
    fn test_inverted_chat_delay_rejected() {
        let config = DashboardConfig {
            chat_delay_min_ms: 5,
            chat_delay_max_ms: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
