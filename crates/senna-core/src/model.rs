//! Event Types
//!
//! Payloads published by the simulator. Serialized in camelCase for the
//! dashboard API; the bus envelope is `{"type": ..., "payload": ...}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Threat severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A detected security incident
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatEvent {
    pub id: String,
    pub title: String,
    pub level: Severity,
    pub description: String,
    /// Display string, e.g. "Just now" or "5m ago"
    pub timestamp: String,
    /// Transient highlight flag, cleared by the dashboard after a display window
    pub is_new: bool,
}

/// Behavioral anomaly classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnomalyCategory {
    #[serde(rename = "Unusual Access Time")]
    UnusualAccessTime,
    #[serde(rename = "Geographic Anomaly")]
    GeographicAnomaly,
    #[serde(rename = "Data Access Pattern")]
    DataAccessPattern,
    #[serde(rename = "Login Frequency")]
    LoginFrequency,
    #[serde(rename = "File Access Pattern")]
    FileAccessPattern,
    /// Only raised by the manual demo trigger
    #[serde(rename = "Privilege Escalation")]
    PrivilegeEscalation,
}

impl AnomalyCategory {
    /// Categories the periodic generator draws from
    pub const GENERATED: [AnomalyCategory; 5] = [
        AnomalyCategory::UnusualAccessTime,
        AnomalyCategory::GeographicAnomaly,
        AnomalyCategory::DataAccessPattern,
        AnomalyCategory::LoginFrequency,
        AnomalyCategory::FileAccessPattern,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnomalyCategory::UnusualAccessTime => "Unusual Access Time",
            AnomalyCategory::GeographicAnomaly => "Geographic Anomaly",
            AnomalyCategory::DataAccessPattern => "Data Access Pattern",
            AnomalyCategory::LoginFrequency => "Login Frequency",
            AnomalyCategory::FileAccessPattern => "File Access Pattern",
            AnomalyCategory::PrivilegeEscalation => "Privilege Escalation",
        }
    }
}

impl fmt::Display for AnomalyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Unusual behavior tied to one user identity.
///
/// `user` is the identity key: a newer event for the same user replaces the
/// previous record in the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyEvent {
    pub user: String,
    pub anomaly: AnomalyCategory,
    /// Percent, 70..=99 for generated events
    pub confidence: u8,
    pub last_seen: String,
    pub exact_time: DateTime<Utc>,
    pub is_new: bool,
}

/// Per-severity counts for one trend bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrendCounts {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl TrendCounts {
    pub fn total(&self) -> u32 {
        self.critical + self.high + self.medium + self.low
    }
}

/// One point of the severity time series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendSample {
    /// "HH:MM"
    pub time: String,
    pub timestamp: DateTime<Utc>,
    pub counts: TrendCounts,
}

/// Which generator produced an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Threat,
    Anomaly,
    Trend,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Threat => "threat",
            EventKind::Anomaly => "anomaly",
            EventKind::Trend => "trend",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Envelope delivered to bus subscribers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum SimulationEvent {
    Threat(ThreatEvent),
    Anomaly(AnomalyEvent),
    Trend(TrendSample),
}

impl SimulationEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            SimulationEvent::Threat(_) => EventKind::Threat,
            SimulationEvent::Anomaly(_) => EventKind::Anomaly,
            SimulationEvent::Trend(_) => EventKind::Trend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_envelope_shape() {
        let event = SimulationEvent::Trend(TrendSample {
            time: "10:30".to_string(),
            timestamp: DateTime::<Utc>::default(),
            counts: TrendCounts {
                critical: 1,
                high: 2,
                medium: 3,
                low: 4,
            },
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "trend");
        assert_eq!(json["payload"]["time"], "10:30");
        assert_eq!(json["payload"]["counts"]["low"], 4);
        assert_eq!(event.kind(), EventKind::Trend);
    }

    #[test]
    fn test_anomaly_serializes_labels() {
        let anomaly = AnomalyEvent {
            user: "lisa.chen@gmail.com".to_string(),
            anomaly: AnomalyCategory::GeographicAnomaly,
            confidence: 81,
            last_seen: "Just now".to_string(),
            exact_time: DateTime::<Utc>::default(),
            is_new: true,
        };

        let json = serde_json::to_value(&anomaly).unwrap();
        assert_eq!(json["anomaly"], "Geographic Anomaly");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["lastSeen"], "Just now");
    }

    #[test]
    fn test_generated_categories_exclude_manual_trigger() {
        assert_eq!(AnomalyCategory::GENERATED.len(), 5);
        assert!(!AnomalyCategory::GENERATED.contains(&AnomalyCategory::PrivilegeEscalation));
    }
}
