pub mod demo;
pub mod metrics;
pub mod store;
pub mod summary;
pub mod view;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use store::AlertStore;

/// Priority tier of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::High, Severity::Medium, Severity::Low];

    /// Rank used by the priority sort. Higher ranks sort first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    /// Badge text shown next to an alert.
    pub fn badge(self) -> &'static str {
        match self {
            Severity::High => "High priority",
            Severity::Medium => "Needs attention",
            Severity::Low => "Monitor",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Severity::High),
            "medium" | "med" => Some(Severity::Medium),
            "low" => Some(Severity::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertStatus {
    Open,
    Handled,
}

impl AlertStatus {
    pub fn toggled(self) -> Self {
        match self {
            AlertStatus::Open => AlertStatus::Handled,
            AlertStatus::Handled => AlertStatus::Open,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertStatus::Open => write!(f, "Open"),
            AlertStatus::Handled => write!(f, "Handled"),
        }
    }
}

/// An operational signal requiring staff attention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub subtitle: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-text urgency window, e.g. "Next 3h" or "Within 24h".
    pub eta: String,
    pub owner: String,
    pub status: AlertStatus,
    #[serde(default)]
    pub rationale: Vec<String>,
    #[serde(default)]
    pub suggested: Vec<String>,
}

impl Alert {
    pub fn is_open(&self) -> bool {
        self.status == AlertStatus::Open
    }
}

/// User input for a new alert, as collected by the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDraft {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub severity: Severity,
    #[serde(rename = "type")]
    pub kind: String,
    pub eta: String,
    pub owner: String,
}

impl Default for AlertDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            subtitle: String::new(),
            severity: Severity::Medium,
            kind: "Confirmation".into(),
            eta: "Today".into(),
            owner: "Reception".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_rank_orders_high_first() {
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
    }

    #[test]
    fn severity_parse_is_case_insensitive() {
        assert_eq!(Severity::parse("HIGH"), Some(Severity::High));
        assert_eq!(Severity::parse(" low "), Some(Severity::Low));
        assert_eq!(Severity::parse("urgent"), None);
    }

    #[test]
    fn alert_serializes_type_field() {
        let alert = Alert {
            id: "A1".into(),
            created_at: Utc::now(),
            title: "t".into(),
            subtitle: String::new(),
            severity: Severity::Low,
            kind: "Confirmation".into(),
            eta: "Today".into(),
            owner: "Reception".into(),
            status: AlertStatus::Open,
            rationale: vec![],
            suggested: vec![],
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "Confirmation");
        assert_eq!(json["severity"], "Low");
        assert_eq!(json["status"], "Open");
    }
}
