//! Static pattern tables the generators draw from.

use crate::model::Severity;

/// One family of synthetic threats.
///
/// Descriptions may reference `{source}`, filled with the chosen source.
#[derive(Debug)]
pub struct ThreatPattern {
    pub kind: &'static str,
    pub sources: &'static [&'static str],
    pub descriptions: &'static [&'static str],
    pub severities: &'static [Severity],
}

pub static THREAT_PATTERNS: [ThreatPattern; 5] = [
    ThreatPattern {
        kind: "Brute Force Attack",
        sources: &["Russia", "China", "North Korea", "Iran", "Unknown"],
        descriptions: &[
            "Multiple failed login attempts detected from {source} IP address",
            "Automated password spraying attack from {source} targeting admin accounts",
            "SSH brute force attack detected from {source} infrastructure",
            "RDP login attempts from {source} with common password lists",
        ],
        severities: &[Severity::Critical, Severity::High, Severity::Medium],
    },
    ThreatPattern {
        kind: "Malware Detection",
        sources: &["Email", "USB", "Download", "Network"],
        descriptions: &[
            "Suspicious file hash matched known malware database entry",
            "Ransomware signature detected in {source} traffic",
            "Trojan behavior identified in system processes",
            "Cryptominer detected consuming system resources",
        ],
        severities: &[
            Severity::Critical,
            Severity::High,
            Severity::Medium,
            Severity::Low,
        ],
    },
    ThreatPattern {
        kind: "Data Exfiltration",
        sources: &["Internal", "External", "Cloud", "Mobile"],
        descriptions: &[
            "Large file upload outside business hours from {source} network",
            "Unusual data transfer patterns detected to {source} servers",
            "Sensitive data accessed from unauthorized {source} location",
            "Database queries exceeding normal patterns from {source}",
        ],
        severities: &[Severity::Critical, Severity::High, Severity::Medium],
    },
    ThreatPattern {
        kind: "Phishing Attack",
        sources: &["Email", "SMS", "Social Media", "Website"],
        descriptions: &[
            "Phishing {source} with suspicious links automatically quarantined",
            "Credential harvesting attempt detected via {source}",
            "Social engineering attack identified through {source} channel",
            "Fake login page detected mimicking company portal",
        ],
        severities: &[Severity::High, Severity::Medium, Severity::Low],
    },
    ThreatPattern {
        kind: "Insider Threat",
        sources: &["Employee", "Contractor", "Partner", "Admin"],
        descriptions: &[
            "Privileged {source} accessing files outside normal scope",
            "After-hours data access by {source} account",
            "Unusual file deletion patterns by {source} user",
            "Unauthorized system configuration changes by {source}",
        ],
        severities: &[Severity::Critical, Severity::High, Severity::Medium],
    },
];

/// Identities the anomaly generator reports on
pub static ANOMALY_IDENTITIES: [&str; 15] = [
    "john.doe@gmail.com",
    "sarah.smith@proton.me",
    "mike.wilson@outlook.com",
    "alice.johnson@yahoo.com",
    "bob.brown@gmail.com",
    "carol.davis@proton.me",
    "david.miller@hotmail.com",
    "emma.garcia@gmail.com",
    "frank.rodriguez@icloud.com",
    "lisa.chen@gmail.com",
    "james.taylor@proton.me",
    "maria.gonzalez@outlook.com",
    "robert.anderson@yahoo.com",
    "jennifer.white@gmail.com",
    "michael.lee@proton.me",
];

/// Display string for freshly generated events
pub const JUST_NOW: &str = "Just now";

// Manual demo triggers

pub const APT_TITLE: &str = "CRITICAL: Advanced Persistent Threat Detected";
pub const APT_DESCRIPTION: &str =
    "Sophisticated APT group attempting lateral movement across network infrastructure";

pub const BREACH_TITLE: &str = "DATA BREACH DETECTED - IMMEDIATE ACTION REQUIRED";
pub const BREACH_DESCRIPTION: &str =
    "Unauthorized access to customer database detected. AI containment protocols activated.";
pub const BREACH_NOTICE: &str = "SECURITY BREACH DETECTED! I've immediately isolated the affected systems and initiated incident response protocols. All stakeholders have been notified. Forensic analysis is underway.";

pub const ESCALATION_IDENTITY: &str = "admin@proton.me";
pub const ESCALATION_CONFIDENCE: u8 = 95;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template;

    #[test]
    fn test_tables_are_populated() {
        for pattern in &THREAT_PATTERNS {
            assert!(!pattern.sources.is_empty(), "{} has no sources", pattern.kind);
            assert!(!pattern.descriptions.is_empty());
            assert!(!pattern.severities.is_empty());
        }
    }

    #[test]
    fn test_descriptions_only_reference_source() {
        for pattern in &THREAT_PATTERNS {
            for description in pattern.descriptions {
                for name in template::placeholders(description) {
                    assert_eq!(name, "source", "unexpected token in {:?}", description);
                }
            }
        }
    }
}
