//! Canned replies for the assistant chat panel.
//!
//! The message is classified by keyword into a topic, a reply template is
//! drawn from that topic's table and its placeholders are filled with fresh
//! random values. Nothing is remembered between calls.

use crate::patterns::THREAT_PATTERNS;
use crate::rng::SimRng;
use crate::template;
use serde::{Deserialize, Serialize};

const THREAT_REPLIES: [&str; 4] = [
    "I've detected {count} threats in the last hour. The most critical involves {threat}. I've automatically implemented containment measures.",
    "Current threat landscape shows elevated activity from {region}. I'm monitoring {count} suspicious connections.",
    "Analysis complete: {count} threats neutralized, {active} still under investigation. All critical systems remain secure.",
    "Threat intelligence indicates a {type} campaign targeting our sector. I've enhanced monitoring protocols.",
];

const STATUS_REPLIES: [&str; 4] = [
    "All systems operational. Real-time monitoring active across {endpoints} endpoints. Response time: {latency}ms.",
    "Security posture: OPTIMAL. {blocked} threats blocked today. Zero successful breaches detected.",
    "Infrastructure health: 99.9% uptime. AI models updated {time} ago. Threat database current.",
    "Autonomous response systems: ACTIVE. {rules} security rules enforced. {updates} policy updates applied.",
];

const GENERAL_REPLIES: [&str; 4] = [
    "Based on current threat intelligence, I recommend {action}. This will enhance our security posture by {percentage}%.",
    "I'm continuously learning from global threat patterns. Recent analysis shows {insight}.",
    "Your security metrics are trending positively. {metric} improved by {percentage}% this week.",
    "I've identified {count} optimization opportunities in your security configuration. Shall I implement them?",
];

const THREAT_KEYWORDS: [&str; 3] = ["threat", "attack", "security"];
const STATUS_KEYWORDS: [&str; 3] = ["status", "health", "system"];

/// Reply category selected by keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatTopic {
    Threats,
    Status,
    General,
}

impl ChatTopic {
    /// Case-insensitive substring match. Threat keywords win over status
    /// keywords; anything else is general.
    pub fn classify(message: &str) -> Self {
        let lower = message.to_lowercase();
        if THREAT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            ChatTopic::Threats
        } else if STATUS_KEYWORDS.iter().any(|k| lower.contains(k)) {
            ChatTopic::Status
        } else {
            ChatTopic::General
        }
    }

    pub fn templates(&self) -> &'static [&'static str] {
        match self {
            ChatTopic::Threats => &THREAT_REPLIES,
            ChatTopic::Status => &STATUS_REPLIES,
            ChatTopic::General => &GENERAL_REPLIES,
        }
    }
}

pub struct ChatResponder {
    rng: SimRng,
}

impl ChatResponder {
    pub fn new(rng: SimRng) -> Self {
        Self { rng }
    }

    pub fn respond(&self, message: &str) -> String {
        let topic = ChatTopic::classify(message);
        let reply = *self.rng.pick(topic.templates());
        template::render(reply, &self.values(topic))
    }

    fn values(&self, topic: ChatTopic) -> Vec<(&'static str, String)> {
        let n = |lo: u32, hi: u32| self.rng.range_u32(lo..hi + 1).to_string();
        match topic {
            ChatTopic::Threats => {
                let region = *self.rng.pick(THREAT_PATTERNS[0].sources);
                vec![
                    ("count", n(1, 10)),
                    ("threat", self.pattern_kind()),
                    ("region", region.to_string()),
                    ("active", n(0, 2)),
                    ("type", self.pattern_kind()),
                ]
            }
            ChatTopic::Status => vec![
                ("endpoints", n(100, 599)),
                ("latency", n(20, 69)),
                ("blocked", n(500, 1499)),
                ("time", format!("{} minutes", n(0, 59))),
                ("rules", n(50, 249)),
                ("updates", n(0, 9)),
            ],
            ChatTopic::General => vec![
                ("action", "implementing additional network segmentation".to_string()),
                ("percentage", n(10, 29)),
                ("insight", "increased APT activity in the financial sector".to_string()),
                ("metric", "Threat detection accuracy".to_string()),
                ("count", n(1, 5)),
            ],
        }
    }

    fn pattern_kind(&self) -> String {
        self.rng.pick(&THREAT_PATTERNS).kind.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keywords() {
        assert_eq!(ChatTopic::classify("Any threats in last hour?"), ChatTopic::Threats);
        assert_eq!(ChatTopic::classify("was that an ATTACK"), ChatTopic::Threats);
        assert_eq!(ChatTopic::classify("system health please"), ChatTopic::Status);
        assert_eq!(ChatTopic::classify("security status"), ChatTopic::Threats);
        assert_eq!(ChatTopic::classify("hello there"), ChatTopic::General);
        assert_eq!(ChatTopic::classify(""), ChatTopic::General);
    }

    #[test]
    fn test_threat_question_uses_threat_templates() {
        let responder = ChatResponder::new(SimRng::seeded(21));
        for _ in 0..100 {
            let reply = responder.respond("Any threats in last hour?");
            assert!(template::is_resolved(&reply), "unresolved token in {:?}", reply);
            let from_threats = THREAT_REPLIES.iter().any(|t| {
                let prefix = t.split('{').next().unwrap_or_default();
                reply.starts_with(prefix)
            });
            assert!(from_threats, "{:?} not drawn from threat replies", reply);
        }
    }

    #[test]
    fn test_every_template_fully_resolves() {
        let responder = ChatResponder::new(SimRng::seeded(5));
        for topic in [ChatTopic::Threats, ChatTopic::Status, ChatTopic::General] {
            let values = responder.values(topic);
            for reply in topic.templates() {
                let text = template::render(reply, &values);
                assert!(template::is_resolved(&text), "{:?}", text);
            }
        }
    }

    #[test]
    fn test_seeded_replies_repeat() {
        let a = ChatResponder::new(SimRng::seeded(99));
        let b = ChatResponder::new(SimRng::seeded(99));
        assert_eq!(a.respond("status?"), b.respond("status?"));
    }
}
