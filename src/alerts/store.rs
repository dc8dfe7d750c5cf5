use super::{Alert, AlertDraft, AlertStatus};
use anyhow::bail;
use chrono::Utc;
use rand::{thread_rng, Rng};
use std::collections::HashSet;

const ID_MIN: u32 = 1000;
const ID_MAX: u32 = 9999;
const RANDOM_ID_ATTEMPTS: usize = 32;

pub const DEFAULT_SUBTITLE: &str = "New alert created in demo mode.";

/// Ordered, in-memory collection of alerts. Newest insertions come first.
///
/// Alerts are never removed; they only move between `Open` and `Handled`.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    alerts: Vec<Alert>,
}

impl AlertStore {
    pub fn new(alerts: Vec<Alert>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        for alert in &alerts {
            if !seen.insert(alert.id.as_str()) {
                bail!("duplicate alert id {}", alert.id);
            }
        }
        Ok(Self { alerts })
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn open_count(&self) -> usize {
        self.alerts.iter().filter(|a| a.is_open()).count()
    }

    /// Distinct alert types in first-seen order.
    pub fn types(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for alert in &self.alerts {
            if !out.iter().any(|t| t == &alert.kind) {
                out.push(alert.kind.clone());
            }
        }
        out
    }

    /// Build an alert from `draft` and insert it at the front.
    ///
    /// An empty title is rejected and leaves the store untouched.
    pub fn create(&mut self, draft: &AlertDraft) -> anyhow::Result<&Alert> {
        let title = draft.title.trim();
        if title.is_empty() {
            bail!("alert title is required");
        }
        let subtitle = match draft.subtitle.trim() {
            "" => DEFAULT_SUBTITLE.to_string(),
            s => s.to_string(),
        };
        let alert = Alert {
            id: self.next_id()?,
            created_at: Utc::now(),
            title: title.to_string(),
            subtitle,
            severity: draft.severity,
            kind: draft.kind.clone(),
            eta: draft.eta.clone(),
            owner: draft.owner.clone(),
            status: AlertStatus::Open,
            rationale: vec![
                "Created in demo mode".into(),
                "No clinical notes".into(),
                "Operational signal only".into(),
            ],
            suggested: vec![
                "Assign to staff member".into(),
                "Mark as handled when complete".into(),
            ],
        };
        tracing::debug!(id = %alert.id, severity = %alert.severity, "alert created");
        self.insert(alert)
    }

    /// Insert a fully built alert at the front of the store.
    pub fn insert(&mut self, alert: Alert) -> anyhow::Result<&Alert> {
        if self.contains(&alert.id) {
            bail!("duplicate alert id {}", alert.id);
        }
        self.alerts.insert(0, alert);
        Ok(&self.alerts[0])
    }

    /// Flip an alert between `Open` and `Handled`, returning the new status.
    pub fn toggle_status(&mut self, id: &str) -> anyhow::Result<AlertStatus> {
        match self.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.status = alert.status.toggled();
                tracing::debug!(id, status = %alert.status, "alert status toggled");
                Ok(alert.status)
            }
            None => bail!("alert {id} not found"),
        }
    }

    /// Draw an unused `A####` identifier.
    pub fn next_id(&self) -> anyhow::Result<String> {
        let mut rng = thread_rng();
        for _ in 0..RANDOM_ID_ATTEMPTS {
            let id = format!("A{}", rng.gen_range(ID_MIN..=ID_MAX));
            if !self.contains(&id) {
                return Ok(id);
            }
        }
        // Dense store: fall back to the first free slot.
        let used: HashSet<&str> = self.alerts.iter().map(|a| a.id.as_str()).collect();
        (ID_MIN..=ID_MAX)
            .map(|n| format!("A{n}"))
            .find(|id| !used.contains(id.as_str()))
            .ok_or_else(|| anyhow::anyhow!("alert id space exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::demo::seed_alerts;
    use crate::alerts::Severity;

    fn draft(title: &str) -> AlertDraft {
        AlertDraft {
            title: title.into(),
            ..AlertDraft::default()
        }
    }

    #[test]
    fn new_rejects_duplicate_ids() {
        let mut alerts = seed_alerts();
        alerts.push(alerts[0].clone());
        assert!(AlertStore::new(alerts).is_err());
    }

    #[test]
    fn create_inserts_open_alert_at_front() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        let before = store.len();
        let id = store.create(&draft("  Call Mrs Lee  ")).unwrap().id.clone();
        assert_eq!(store.len(), before + 1);
        let first = &store.alerts()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.title, "Call Mrs Lee");
        assert_eq!(first.subtitle, DEFAULT_SUBTITLE);
        assert_eq!(first.status, AlertStatus::Open);
        assert_eq!(first.severity, Severity::Medium);
        assert_eq!(first.rationale.len(), 3);
        assert!(id.starts_with('A') && id.len() == 5);
    }

    #[test]
    fn create_with_blank_title_leaves_store_unchanged() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        let snapshot = store.alerts().to_vec();
        assert!(store.create(&draft("")).is_err());
        assert!(store.create(&draft("   ")).is_err());
        assert_eq!(store.alerts(), snapshot.as_slice());
    }

    #[test]
    fn toggle_twice_restores_status() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        let original = store.get("A1002").unwrap().status;
        assert_eq!(store.toggle_status("A1002").unwrap(), original.toggled());
        assert_eq!(store.toggle_status("A1002").unwrap(), original);
    }

    #[test]
    fn toggle_unknown_id_is_an_error() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        assert!(store.toggle_status("A0000").is_err());
    }

    #[test]
    fn insert_rejects_duplicate() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        let dup = store.alerts()[1].clone();
        assert!(store.insert(dup).is_err());
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn types_are_distinct_in_first_seen_order() {
        let store = AlertStore::new(seed_alerts()).unwrap();
        assert_eq!(
            store.types(),
            vec!["No-show risk", "Follow-up gap", "Confirmation"]
        );
    }

    #[test]
    fn generated_ids_stay_unique() {
        let mut store = AlertStore::default();
        for i in 0..200 {
            store.create(&draft(&format!("alert {i}"))).unwrap();
        }
        let ids: HashSet<&str> = store.alerts().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    fn filled_store(skip: Option<u32>) -> AlertStore {
        let template = seed_alerts().remove(0);
        let alerts = (ID_MIN..=ID_MAX)
            .filter(|n| Some(*n) != skip)
            .map(|n| Alert {
                id: format!("A{n}"),
                ..template.clone()
            })
            .collect();
        AlertStore::new(alerts).unwrap()
    }

    #[test]
    fn dense_store_still_finds_the_free_id() {
        let store = filled_store(Some(5000));
        assert_eq!(store.len(), 8999);
        assert_eq!(store.next_id().unwrap(), "A5000");
    }

    #[test]
    fn full_id_space_rejects_create() {
        let mut store = filled_store(None);
        assert_eq!(store.len(), 9000);
        let err = store.create(&draft("one too many")).unwrap_err();
        assert!(err.to_string().contains("exhausted"));
        assert_eq!(store.len(), 9000);
    }
}
