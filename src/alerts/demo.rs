use super::{Alert, AlertStatus, Severity};
use chrono::{DateTime, Duration, Utc};

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// The three alerts a fresh dashboard starts with.
pub fn seed_alerts() -> Vec<Alert> {
    seed_alerts_at(Utc::now())
}

pub fn seed_alerts_at(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert {
            id: "A1005".into(),
            created_at: now - Duration::minutes(42),
            title: "Unconfirmed long consult — Dr Carter (10:00)".into(),
            subtitle: "High no-show risk: long slot + no response".into(),
            severity: Severity::High,
            kind: "No-show risk".into(),
            eta: "Today".into(),
            owner: "Reception".into(),
            status: AlertStatus::Open,
            rationale: lines(&[
                "No response to confirmation",
                "Long consult (30 min)",
                "Booked late (previous evening)",
            ]),
            suggested: lines(&[
                "Call patient to confirm",
                "If no response, offer slot to waitlist",
            ]),
        },
        Alert {
            id: "A1002".into(),
            created_at: now - Duration::minutes(90),
            title: "Follow-up flagged — consult completed (09:15)".into(),
            subtitle: "Follow-up required but no workflow action recorded".into(),
            severity: Severity::Medium,
            kind: "Follow-up gap".into(),
            eta: "Within 24h".into(),
            owner: "Practice manager".into(),
            status: AlertStatus::Open,
            rationale: lines(&[
                "Follow-up required = Yes",
                "No follow-up action logged",
                "72h since completion threshold approaching",
            ]),
            suggested: lines(&["Create recall task", "Assign to provider for review"]),
        },
        Alert {
            id: "A1010".into(),
            created_at: now - Duration::minutes(14),
            title: "Same-day booking — unconfirmed (14:00)".into(),
            subtitle: "No response yet; confirm to protect the slot".into(),
            severity: Severity::Low,
            kind: "Confirmation".into(),
            eta: "Next 3h".into(),
            owner: "Reception".into(),
            status: AlertStatus::Open,
            rationale: lines(&[
                "Booked this morning",
                "No response yet",
                "Routine slot (15 min)",
            ]),
            suggested: lines(&[
                "Send quick confirmation SMS",
                "No further action if confirmed",
            ]),
        },
    ]
}

/// Low-risk reminder injected by a sync run when the queue is quiet.
pub fn auto_check_alert(id: String, now: DateTime<Utc>) -> Alert {
    Alert {
        id,
        created_at: now,
        title: "Auto-check: reminder — SMS not yet sent (15:30)".into(),
        subtitle: "Low risk but worth confirming to protect the slot".into(),
        severity: Severity::Low,
        kind: "Confirmation".into(),
        eta: "Next 3h".into(),
        owner: "Reception".into(),
        status: AlertStatus::Open,
        rationale: lines(&[
            "No SMS confirmation logged",
            "Booked today",
            "Short slot (15 min)",
        ]),
        suggested: lines(&["Send quick confirmation SMS", "Mark handled if confirmed"]),
    }
}
