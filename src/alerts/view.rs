use super::{Alert, AlertStatus, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Priority,
    Eta,
    Newest,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Priority
    }
}

impl SortKey {
    pub fn label(self) -> &'static str {
        match self {
            SortKey::Priority => "Priority",
            SortKey::Eta => "ETA",
            SortKey::Newest => "Newest",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "priority" => Some(SortKey::Priority),
            "eta" => Some(SortKey::Eta),
            "newest" | "new" => Some(SortKey::Newest),
            _ => None,
        }
    }

    pub fn cycle(self) -> Self {
        match self {
            SortKey::Priority => SortKey::Eta,
            SortKey::Eta => SortKey::Newest,
            SortKey::Newest => SortKey::Priority,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum SeverityFilter {
    #[default]
    All,
    Only(Severity),
}

impl SeverityFilter {
    /// Parse the filter label: "All" or a severity name.
    pub fn parse(s: &str) -> Option<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Some(SeverityFilter::All);
        }
        Severity::parse(s).map(SeverityFilter::Only)
    }

    fn matches(&self, alert: &Alert) -> bool {
        match self {
            SeverityFilter::All => true,
            SeverityFilter::Only(s) => alert.severity == *s,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("all") {
            TypeFilter::All
        } else {
            TypeFilter::Only(s.trim().to_string())
        }
    }

    fn matches(&self, alert: &Alert) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(kind) => &alert.kind == kind,
        }
    }
}

/// Everything that shapes the visible alert list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub severity: SeverityFilter,
    pub kind: TypeFilter,
    pub sort: SortKey,
}

impl ViewQuery {
    /// Drop the search text and both filters. The sort key is kept.
    pub fn clear_filters(&mut self) {
        self.search.clear();
        self.severity = SeverityFilter::All;
        self.kind = TypeFilter::All;
    }
}

/// Bucket used by the ETA sort. Lower is more urgent.
pub fn eta_score(eta: &str) -> u8 {
    if eta.is_empty() {
        return 99;
    }
    let x = eta.to_lowercase();
    if x.contains("next") {
        1
    } else if x.contains("today") {
        2
    } else if x.contains("24") {
        3
    } else {
        9
    }
}

fn search_matches(alert: &Alert, needle: &str) -> bool {
    needle.is_empty()
        || alert.title.to_lowercase().contains(needle)
        || alert.kind.to_lowercase().contains(needle)
        || alert.owner.to_lowercase().contains(needle)
}

fn status_rank(status: AlertStatus) -> u8 {
    match status {
        AlertStatus::Open => 0,
        AlertStatus::Handled => 1,
    }
}

/// Filter and order `alerts` according to `query`.
pub fn project<'a>(alerts: &'a [Alert], query: &ViewQuery) -> Vec<&'a Alert> {
    let needle = query.search.trim().to_lowercase();
    let mut list: Vec<&Alert> = alerts
        .iter()
        .filter(|a| {
            search_matches(a, &needle) && query.severity.matches(a) && query.kind.matches(a)
        })
        .collect();

    match query.sort {
        SortKey::Priority => list.sort_by(|a, b| {
            status_rank(a.status)
                .cmp(&status_rank(b.status))
                .then_with(|| b.severity.rank().cmp(&a.severity.rank()))
        }),
        SortKey::Newest => list.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        SortKey::Eta => list.sort_by_key(|a| eta_score(&a.eta)),
    }
    list
}
