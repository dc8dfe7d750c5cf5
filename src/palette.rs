use crate::actions::{decode_payload, encode_payload, Action};
use crate::alerts::{Alert, AlertDraft, Severity};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

pub const NEW_PREFIX: &str = "new";
pub const ALERT_PREFIX: &str = "alert";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteCommand {
    OpenConnect,
    CreateAlert,
    RunSync,
    CycleKpiMode,
}

impl PaletteCommand {
    pub const ALL: [PaletteCommand; 4] = [
        PaletteCommand::OpenConnect,
        PaletteCommand::CreateAlert,
        PaletteCommand::RunSync,
        PaletteCommand::CycleKpiMode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaletteCommand::OpenConnect => "Open connect modal",
            PaletteCommand::CreateAlert => "Create new alert",
            PaletteCommand::RunSync => "Run sync simulation",
            PaletteCommand::CycleKpiMode => "Switch KPI view (Summary/Revenue/Capacity)",
        }
    }

    pub fn hint(self) -> Option<&'static str> {
        match self {
            PaletteCommand::OpenConnect => Some("Ctrl/⌘ + K"),
            PaletteCommand::CreateAlert => Some("Ctrl/⌘ + N"),
            _ => None,
        }
    }

    fn key(self) -> &'static str {
        match self {
            PaletteCommand::OpenConnect => "connect",
            PaletteCommand::CreateAlert => "create",
            PaletteCommand::RunSync => "sync",
            PaletteCommand::CycleKpiMode => "kpi",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn to_action(self) -> Action {
        Action {
            label: self.label().into(),
            desc: "Quick action".into(),
            action: format!("cmd:{}", self.key()),
            hint: self.hint().map(str::to_string),
        }
    }
}

/// What running a palette action asks the dashboard to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteAction {
    Command(PaletteCommand),
    CreateAlert(AlertDraft),
    OpenAlert(String),
}

pub fn parse_action(action: &str) -> anyhow::Result<PaletteAction> {
    if let Some(key) = action.strip_prefix("cmd:") {
        return PaletteCommand::from_key(key)
            .map(PaletteAction::Command)
            .ok_or_else(|| anyhow::anyhow!("unknown palette command '{key}'"));
    }
    if let Some(encoded) = action.strip_prefix("alert:add:") {
        return Ok(PaletteAction::CreateAlert(decode_payload(encoded)?));
    }
    if let Some(id) = action.strip_prefix("alert:open:") {
        return Ok(PaletteAction::OpenAlert(id.to_string()));
    }
    anyhow::bail!("unrecognised action '{action}'")
}

/// Parse `new <title words> [sev=high] [type=..] [eta=..] [owner=..] [sub=..]`
/// arguments into a draft. Quoting follows shell rules.
pub fn parse_draft(args: &str) -> AlertDraft {
    let tokens = shlex::split(args)
        .unwrap_or_else(|| args.split_whitespace().map(|s| s.to_string()).collect());
    let mut draft = AlertDraft::default();
    let mut title = Vec::new();
    for token in tokens {
        match token.split_once('=') {
            Some((key, value)) => match key.to_ascii_lowercase().as_str() {
                "sev" | "severity" => {
                    if let Some(sev) = Severity::parse(value) {
                        draft.severity = sev;
                    }
                }
                "type" => draft.kind = value.to_string(),
                "eta" => draft.eta = value.to_string(),
                "owner" => draft.owner = value.to_string(),
                "sub" | "subtitle" => draft.subtitle = value.to_string(),
                _ => title.push(token),
            },
            None => title.push(token),
        }
    }
    draft.title = title.join(" ");
    draft
}

pub struct CommandPalette {
    matcher: SkimMatcherV2,
}

impl Default for CommandPalette {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandPalette {
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
        }
    }

    /// Actions matching `query`. An empty query lists every quick action.
    pub fn search(&self, query: &str, alerts: &[Alert]) -> Vec<Action> {
        let query = query.trim();

        if let Some(rest) = strip_word(query, NEW_PREFIX) {
            let draft = parse_draft(rest);
            if draft.title.trim().is_empty() {
                return vec![PaletteCommand::CreateAlert.to_action()];
            }
            return match encode_payload(&draft) {
                Ok(encoded) => vec![Action {
                    label: format!("Create alert {} ({})", draft.title, draft.severity),
                    desc: "Alert".into(),
                    action: format!("alert:add:{encoded}"),
                    hint: None,
                }],
                Err(e) => {
                    tracing::error!("failed to encode alert draft: {e}");
                    Vec::new()
                }
            };
        }

        if let Some(filter) = strip_word(query, ALERT_PREFIX) {
            let filter = filter.trim();
            return alerts
                .iter()
                .filter(|a| filter.is_empty() || self.matcher.fuzzy_match(&a.title, filter).is_some())
                .map(|a| Action {
                    label: format!("{} {}", a.id, a.title),
                    desc: format!("{} · {}", a.severity, a.status),
                    action: format!("alert:open:{}", a.id),
                    hint: None,
                })
                .collect();
        }

        let mut scored: Vec<(i64, usize, PaletteCommand)> = PaletteCommand::ALL
            .into_iter()
            .enumerate()
            .filter_map(|(idx, cmd)| {
                if query.is_empty() {
                    return Some((0, idx, cmd));
                }
                self.matcher
                    .fuzzy_match(cmd.label(), query)
                    .map(|score| (score, idx, cmd))
            })
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        scored.into_iter().map(|(_, _, cmd)| cmd.to_action()).collect()
    }
}

/// `"new foo"` with word `"new"` yields `Some("foo")`; `"newest"` yields `None`.
fn strip_word<'a>(query: &'a str, word: &str) -> Option<&'a str> {
    let rest = query.strip_prefix(word)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::demo::seed_alerts;

    #[test]
    fn empty_query_lists_all_commands_in_order() {
        let palette = CommandPalette::new();
        let results = palette.search("", &[]);
        let labels: Vec<_> = results.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(
            labels,
            PaletteCommand::ALL.iter().map(|c| c.label()).collect::<Vec<_>>()
        );
        assert_eq!(results[0].hint.as_deref(), Some("Ctrl/⌘ + K"));
    }

    #[test]
    fn fuzzy_query_finds_sync() {
        let palette = CommandPalette::new();
        let results = palette.search("sync sim", &[]);
        assert_eq!(results[0].action, "cmd:sync");
    }

    #[test]
    fn new_with_title_encodes_draft() {
        let palette = CommandPalette::new();
        let results = palette.search("new \"Call Mr Chen\" sev=high type=Confirmation eta='Next 3h'", &[]);
        assert_eq!(results.len(), 1);
        match parse_action(&results[0].action).unwrap() {
            PaletteAction::CreateAlert(draft) => {
                assert_eq!(draft.title, "Call Mr Chen");
                assert_eq!(draft.severity, Severity::High);
                assert_eq!(draft.eta, "Next 3h");
                assert_eq!(draft.owner, "Reception");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn new_without_title_opens_form() {
        let palette = CommandPalette::new();
        let results = palette.search("new", &[]);
        assert_eq!(results, vec![PaletteCommand::CreateAlert.to_action()]);
    }

    #[test]
    fn newest_is_not_the_new_prefix() {
        assert_eq!(strip_word("newest", NEW_PREFIX), None);
        assert_eq!(strip_word("new x", NEW_PREFIX), Some(" x"));
    }

    #[test]
    fn alert_prefix_searches_titles() {
        let palette = CommandPalette::new();
        let alerts = seed_alerts();
        let results = palette.search("alert carter", &alerts);
        assert_eq!(results.len(), 1);
        assert_eq!(
            parse_action(&results[0].action).unwrap(),
            PaletteAction::OpenAlert("A1005".into())
        );
        assert_eq!(palette.search("alert", &alerts).len(), 3);
    }

    #[test]
    fn unknown_actions_are_errors() {
        assert!(parse_action("cmd:launch").is_err());
        assert!(parse_action("todo:add:x").is_err());
    }
}
