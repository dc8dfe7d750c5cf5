//! Display numbers derived from the alert list.
//!
//! The formulas are demo heuristics tied to open-alert counts. They are
//! recomputed from scratch whenever the dashboard needs them.

use super::{Alert, Severity};
use serde::{Deserialize, Serialize};

/// Fixed appointment count shown on the summary view.
pub const TODAY_APPOINTMENTS: usize = 42;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    pub open_count: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub today_appts: usize,
    pub at_risk_slots: usize,
    pub followups_missing: usize,
    /// Team capacity in percent, floored at 0.
    pub capacity: usize,
    pub revenue_leak: usize,
}

fn kind_contains(alert: &Alert, needle: &str) -> bool {
    alert.kind.to_lowercase().contains(needle)
}

pub fn compute_stats(alerts: &[Alert]) -> AlertStats {
    let open: Vec<&Alert> = alerts.iter().filter(|a| a.is_open()).collect();
    let count = |sev: Severity| open.iter().filter(|a| a.severity == sev).count();
    let high = count(Severity::High);
    let medium = count(Severity::Medium);
    let low = count(Severity::Low);
    AlertStats {
        open_count: open.len(),
        high,
        medium,
        low,
        today_appts: TODAY_APPOINTMENTS,
        at_risk_slots: high * 30 + medium * 15 + low * 10,
        followups_missing: open.iter().filter(|a| kind_contains(a, "follow")).count(),
        capacity: 100usize.saturating_sub(open.len() * 12),
        revenue_leak: open.iter().filter(|a| kind_contains(a, "revenue")).count(),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum KpiMode {
    #[default]
    Summary,
    Revenue,
    Capacity,
}

impl KpiMode {
    pub fn next(self) -> Self {
        match self {
            KpiMode::Summary => KpiMode::Revenue,
            KpiMode::Revenue => KpiMode::Capacity,
            KpiMode::Capacity => KpiMode::Summary,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KpiMode::Summary => "Summary",
            KpiMode::Revenue => "Revenue",
            KpiMode::Capacity => "Capacity",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Good,
    Warn,
    Bad,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub title: String,
    pub value: String,
    pub sub: String,
    pub tone: Tone,
    pub trend: String,
}

/// What clicking a KPI card does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiAction {
    ShowAllOpen,
    FilterHigh,
    RunSync,
}

impl Kpi {
    pub fn action(&self) -> Option<KpiAction> {
        kpi_action(&self.title)
    }
}

/// Map a card title to its click action.
pub fn kpi_action(title: &str) -> Option<KpiAction> {
    let t = title.to_lowercase();
    if t.contains("open") {
        Some(KpiAction::ShowAllOpen)
    } else if t.contains("high") {
        Some(KpiAction::FilterHigh)
    } else if t.contains("sync") {
        Some(KpiAction::RunSync)
    } else {
        None
    }
}

/// Sync status fed into the "last sync" and "automation health" cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSnapshot {
    pub syncing: bool,
    pub progress: u8,
    pub last_sync_mins: u32,
}

fn kpi(title: &str, value: String, sub: &str, tone: Tone, trend: String) -> Kpi {
    Kpi {
        title: title.to_string(),
        value,
        sub: sub.to_string(),
        tone,
        trend,
    }
}

fn last_sync_card(sync: SyncSnapshot) -> Kpi {
    kpi(
        "Last sync",
        format!("{} min", sync.last_sync_mins),
        if sync.syncing { "Syncing…" } else { "Signals updated" },
        if sync.syncing { Tone::Info } else { Tone::Good },
        if sync.syncing {
            format!("{}%", sync.progress)
        } else {
            "Healthy".into()
        },
    )
}

fn good_if(cond: bool, otherwise: Tone) -> Tone {
    if cond {
        Tone::Good
    } else {
        otherwise
    }
}

pub fn build_kpis(mode: KpiMode, stats: &AlertStats, sync: SyncSnapshot) -> Vec<Kpi> {
    match mode {
        KpiMode::Capacity => {
            let capacity_tone = if stats.capacity > 70 {
                Tone::Good
            } else if stats.capacity > 45 {
                Tone::Warn
            } else {
                Tone::Bad
            };
            let open_tone = match stats.open_count {
                0..=2 => Tone::Good,
                3..=5 => Tone::Warn,
                _ => Tone::Bad,
            };
            vec![
                kpi(
                    "Team capacity",
                    format!("{}%", stats.capacity),
                    "Based on open alerts",
                    capacity_tone,
                    "Live demo".into(),
                ),
                kpi(
                    "Open alerts",
                    stats.open_count.to_string(),
                    "Across owners",
                    open_tone,
                    "Actionable only".into(),
                ),
                kpi(
                    "High priority",
                    stats.high.to_string(),
                    "Confirm now",
                    good_if(stats.high == 0, Tone::Warn),
                    "Reduce risk".into(),
                ),
                last_sync_card(sync),
            ]
        }
        KpiMode::Revenue => {
            let leakage = 2usize.saturating_sub(stats.open_count);
            vec![
                kpi(
                    "Revenue protected",
                    format!("{} mins", 90usize.saturating_sub(stats.open_count * 10)),
                    "Recovered slot time estimate",
                    good_if(stats.open_count <= 2, Tone::Warn),
                    "Demo calc".into(),
                ),
                kpi(
                    "No-show exposure",
                    (stats.high + stats.medium).to_string(),
                    "Open risk items",
                    good_if(stats.high == 0, Tone::Warn),
                    "Reduce waste".into(),
                ),
                kpi(
                    "Billing checks",
                    leakage.to_string(),
                    "Potential leakage flags",
                    good_if(leakage == 0, Tone::Warn),
                    "Prevent gaps".into(),
                ),
                last_sync_card(sync),
            ]
        }
        KpiMode::Summary => vec![
            kpi(
                "Today’s appointments",
                stats.today_appts.to_string(),
                "Across 3 providers",
                Tone::Neutral,
                "+6 vs last Thu".into(),
            ),
            kpi(
                "High-risk no-shows",
                stats.high.to_string(),
                "Priority: confirm now",
                good_if(stats.high == 0, Tone::Warn),
                format!(
                    "Protect ~{} mins",
                    (30 * stats.high + 15 * stats.medium).min(180)
                ),
            ),
            kpi(
                "Follow-ups missing",
                stats.followups_missing.to_string(),
                "Needs action in 24h",
                good_if(stats.followups_missing == 0, Tone::Bad),
                "Reduce gaps".into(),
            ),
            kpi(
                "Automation health",
                if sync.syncing { "Syncing" } else { "Good" }.into(),
                if sync.syncing {
                    "Refreshing signals"
                } else {
                    "Sync running normally"
                },
                if sync.syncing { Tone::Info } else { Tone::Good },
                if sync.syncing {
                    format!("{}%", sync.progress)
                } else {
                    format!("Last sync: {} min", sync.last_sync_mins)
                },
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::demo::seed_alerts;
    use crate::alerts::AlertStore;

    #[test]
    fn stats_for_seed_alerts() {
        let stats = compute_stats(&seed_alerts());
        assert_eq!(stats.open_count, 3);
        assert_eq!((stats.high, stats.medium, stats.low), (1, 1, 1));
        assert_eq!(stats.capacity, 64);
        assert_eq!(stats.at_risk_slots, 55);
        assert_eq!(stats.followups_missing, 1);
        assert_eq!(stats.revenue_leak, 0);
        assert_eq!(stats.today_appts, 42);
    }

    #[test]
    fn handled_alerts_do_not_count() {
        let mut store = AlertStore::new(seed_alerts()).unwrap();
        store.toggle_status("A1002").unwrap();
        let stats = compute_stats(store.alerts());
        assert_eq!(stats.open_count, 2);
        assert_eq!(stats.medium, 0);
        assert_eq!(stats.followups_missing, 0);
        assert_eq!(stats.capacity, 76);
    }

    #[test]
    fn capacity_floors_at_zero() {
        let mut store = AlertStore::default();
        for i in 0..10 {
            store
                .create(&crate::alerts::AlertDraft {
                    title: format!("a{i}"),
                    kind: "Revenue check".into(),
                    ..Default::default()
                })
                .unwrap();
        }
        let stats = compute_stats(store.alerts());
        assert_eq!(stats.capacity, 0);
        assert_eq!(stats.revenue_leak, 10);
    }

    #[test]
    fn summary_cards() {
        let stats = compute_stats(&seed_alerts());
        let cards = build_kpis(
            KpiMode::Summary,
            &stats,
            SyncSnapshot {
                syncing: false,
                progress: 0,
                last_sync_mins: 9,
            },
        );
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[1].trend, "Protect ~45 mins");
        assert_eq!(cards[1].tone, Tone::Warn);
        assert_eq!(cards[2].tone, Tone::Bad);
        assert_eq!(cards[3].trend, "Last sync: 9 min");
    }

    #[test]
    fn capacity_cards_reflect_tones() {
        let stats = compute_stats(&seed_alerts());
        let cards = build_kpis(
            KpiMode::Capacity,
            &stats,
            SyncSnapshot {
                syncing: true,
                progress: 38,
                last_sync_mins: 4,
            },
        );
        assert_eq!(cards[0].value, "64%");
        assert_eq!(cards[0].tone, Tone::Warn);
        assert_eq!(cards[1].tone, Tone::Warn);
        assert_eq!(cards[3].value, "4 min");
        assert_eq!(cards[3].trend, "38%");
        assert_eq!(cards[3].tone, Tone::Info);
    }

    #[test]
    fn revenue_cards() {
        let stats = compute_stats(&seed_alerts());
        let cards = build_kpis(KpiMode::Revenue, &stats, SyncSnapshot::default());
        assert_eq!(cards[0].value, "60 mins");
        assert_eq!(cards[1].value, "2");
        assert_eq!(cards[2].value, "0");
        assert_eq!(cards[2].tone, Tone::Good);
    }

    #[test]
    fn kpi_titles_map_to_actions() {
        assert_eq!(kpi_action("Open alerts"), Some(KpiAction::ShowAllOpen));
        assert_eq!(kpi_action("High-risk no-shows"), Some(KpiAction::FilterHigh));
        assert_eq!(kpi_action("Last sync"), Some(KpiAction::RunSync));
        assert_eq!(kpi_action("Billing checks"), None);
    }

    #[test]
    fn mode_cycles() {
        assert_eq!(KpiMode::Summary.next(), KpiMode::Revenue);
        assert_eq!(KpiMode::Revenue.next(), KpiMode::Capacity);
        assert_eq!(KpiMode::Capacity.next(), KpiMode::Summary);
    }
}
