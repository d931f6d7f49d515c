//! Dashboard Feed
//!
//! The state the dashboard renders, folded from bus events:
//! - **threats**: newest first, at most [`MAX_THREATS`]
//! - **anomalies**: one row per user; a newer event for a known user
//!   replaces that row in place, otherwise it is prepended (at most
//!   [`MAX_ANOMALIES`])
//! - **trends**: sliding window of [`TREND_WINDOW`] samples
//! - **chat**: assistant transcript, the last [`MAX_CHAT`] lines

use chrono::{DateTime, Local, TimeZone, Utc};
use senna_core::{
    AnomalyCategory, AnomalyEvent, NetworkStatus, PerformanceSnapshot, Severity, SimulationEvent,
    ThreatEvent, TrendCounts, TrendSample,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

pub const MAX_THREATS: usize = 10;
pub const MAX_ANOMALIES: usize = 20;
pub const TREND_WINDOW: usize = 7;
pub const MAX_CHAT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    #[serde(rename = "type")]
    pub role: ChatRole,
    pub message: String,
    /// "HH:MM"
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardFeed {
    pub threats: VecDeque<ThreatEvent>,
    pub anomalies: Vec<AnomalyEvent>,
    pub trends: VecDeque<TrendSample>,
    pub chat: Vec<ChatMessage>,
    pub metrics: Option<PerformanceSnapshot>,
    pub network: Option<NetworkStatus>,
}

impl Default for DashboardFeed {
    fn default() -> Self {
        Self {
            threats: VecDeque::with_capacity(MAX_THREATS),
            anomalies: Vec::with_capacity(MAX_ANOMALIES),
            trends: VecDeque::with_capacity(TREND_WINDOW),
            chat: Vec::with_capacity(MAX_CHAT),
            metrics: None,
            network: None,
        }
    }
}

impl DashboardFeed {
    /// Feed pre-populated with the historical rows shown before the first
    /// generated event arrives
    pub fn seeded() -> Self {
        let mut feed = Self::default();

        let threats = [
            (
                "1",
                "Suspicious login from Russia",
                Severity::Critical,
                "2m ago",
                "Multiple failed login attempts detected from Moscow IP address",
            ),
            (
                "2",
                "Unusual data transfer detected",
                Severity::High,
                "5m ago",
                "Large file upload outside business hours from internal network",
            ),
            (
                "3",
                "Malware signature detected",
                Severity::Medium,
                "12m ago",
                "Suspicious file hash matched known malware database entry",
            ),
            (
                "4",
                "Phishing email blocked",
                Severity::Low,
                "18m ago",
                "Email with suspicious links automatically quarantined by filter",
            ),
        ];
        feed.threats = threats
            .into_iter()
            .map(|(id, title, level, timestamp, description)| ThreatEvent {
                id: id.to_string(),
                title: title.to_string(),
                level,
                description: description.to_string(),
                timestamp: timestamp.to_string(),
                is_new: false,
            })
            .collect();

        let anomalies = [
            (
                "john.doe@gmail.com",
                AnomalyCategory::UnusualAccessTime,
                89,
                "3m ago",
                (14, 32, 15),
            ),
            (
                "sarah.smith@proton.me",
                AnomalyCategory::GeographicAnomaly,
                76,
                "15m ago",
                (14, 20, 30),
            ),
            (
                "mike.wilson@outlook.com",
                AnomalyCategory::DataAccessPattern,
                92,
                "22m ago",
                (14, 13, 45),
            ),
        ];
        feed.anomalies = anomalies
            .into_iter()
            .map(|(user, anomaly, confidence, last_seen, (h, m, s))| AnomalyEvent {
                user: user.to_string(),
                anomaly,
                confidence,
                last_seen: last_seen.to_string(),
                exact_time: Utc
                    .with_ymd_and_hms(2024, 1, 15, h, m, s)
                    .single()
                    .unwrap_or_default(),
                is_new: false,
            })
            .collect();

        let trends = [
            ("00:00", 2, 5, 8, 12),
            ("04:00", 1, 3, 6, 10),
            ("08:00", 3, 7, 12, 15),
            ("12:00", 4, 8, 10, 18),
            ("16:00", 2, 6, 14, 20),
            ("20:00", 1, 4, 9, 16),
            ("24:00", 1, 2, 5, 8),
        ];
        feed.trends = trends
            .into_iter()
            .map(|(time, critical, high, medium, low)| TrendSample {
                time: time.to_string(),
                timestamp: DateTime::<Utc>::default(),
                counts: TrendCounts {
                    critical,
                    high,
                    medium,
                    low,
                },
            })
            .collect();

        feed.chat = vec![
            ChatMessage {
                id: 1,
                role: ChatRole::User,
                message: "Any threats in last hour?".to_string(),
                timestamp: "10:30".to_string(),
            },
            ChatMessage {
                id: 2,
                role: ChatRole::Bot,
                message: "I detected 4 threats in the last hour: 1 Critical, 1 High, 1 Medium, and 1 Low severity. The critical threat involves suspicious login attempts from Russia which I've automatically blocked.".to_string(),
                timestamp: "10:30".to_string(),
            },
        ];

        feed
    }

    pub fn apply(&mut self, event: &SimulationEvent) {
        match event {
            SimulationEvent::Threat(threat) => self.push_threat(threat.clone()),
            SimulationEvent::Anomaly(anomaly) => self.upsert_anomaly(anomaly.clone()),
            SimulationEvent::Trend(sample) => self.push_trend(sample.clone()),
        }
    }

    pub fn push_threat(&mut self, threat: ThreatEvent) {
        self.threats.push_front(ThreatEvent {
            is_new: true,
            ..threat
        });
        self.threats.truncate(MAX_THREATS);
    }

    pub fn upsert_anomaly(&mut self, anomaly: AnomalyEvent) {
        let anomaly = AnomalyEvent {
            is_new: true,
            ..anomaly
        };
        match self.anomalies.iter_mut().find(|a| a.user == anomaly.user) {
            Some(existing) => *existing = anomaly,
            None => {
                self.anomalies.insert(0, anomaly);
                self.anomalies.truncate(MAX_ANOMALIES);
            }
        }
    }

    pub fn push_trend(&mut self, sample: TrendSample) {
        if self.trends.len() >= TREND_WINDOW {
            self.trends.pop_front();
        }
        self.trends.push_back(sample);
    }

    /// Append a transcript line stamped with the local time
    pub fn push_chat(&mut self, role: ChatRole, message: impl Into<String>) -> ChatMessage {
        let next_id = self.chat.last().map_or(1, |m| m.id + 1);
        let entry = ChatMessage {
            id: next_id,
            role,
            message: message.into(),
            timestamp: Local::now().format("%H:%M").to_string(),
        };
        self.chat.push(entry.clone());
        if self.chat.len() > MAX_CHAT {
            let excess = self.chat.len() - MAX_CHAT;
            self.chat.drain(..excess);
        }
        entry
    }

    pub fn clear_threat_flags(&mut self) {
        self.threats.iter_mut().for_each(|t| t.is_new = false);
    }

    pub fn clear_anomaly_flags(&mut self) {
        self.anomalies.iter_mut().for_each(|a| a.is_new = false);
    }

    /// Anomalies at or above 90% confidence
    pub fn high_confidence_count(&self) -> usize {
        self.anomalies.iter().filter(|a| a.confidence >= 90).count()
    }
}
