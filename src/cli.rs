//! Line-oriented front end for the dashboard.

use crate::actions::Action;
use crate::alerts::view::{SeverityFilter, SortKey, TypeFilter};
use crate::clipboard::ClipboardSink;
use crate::connect::find_system;
use crate::dashboard::{Dashboard, DemoAction};
use crate::hotkey::{parse_combo, KeyCombo};
use crate::palette::parse_draft;
use std::fmt::Write as _;
use std::time::Duration;

pub const HELP: &str = "\
commands:
  list                       show KPIs and the visible alerts
  search [text]              set the search text (empty clears it)
  filter sev <All|High|Medium|Low>
  filter type <All|name>
  filter clear               drop search and filters
  sort [priority|eta|newest] set or cycle the sort key
  open <id>                  select an alert and open its drawer
  handle [id]                toggle handled on an alert (default: selected)
  note <text>                attach a note to the selected alert
  note clear                 discard the unsaved note draft
  rmnote <note id>           remove a note from the selected alert
  copy                       copy the selected alert summary
  new <title> [sev=..] [type=..] [eta=..] [owner=..] [sub=..]
  sync                       run the sync simulation
  connect [system|close]     open the connect wizard or pick a system
  kpi [card title]           cycle KPI mode or click a card
  palette [query]            search the command palette
  run <n>                    run result n of the last palette search
  key <combo>                press a shortcut, e.g. mod+k or escape
  wait <ms>                  let time pass
  toasts                     list active toasts
  dismiss <toast id>         close a toast
  demo <related|rules|privacy>  press a demo-only button
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List,
    Search(String),
    FilterSeverity(SeverityFilter),
    FilterType(TypeFilter),
    ClearFilters,
    Sort(Option<SortKey>),
    Open(String),
    Handle(Option<String>),
    Note(String),
    ClearNoteDraft,
    RemoveNote(String),
    Copy,
    New(String),
    Sync,
    Connect(Option<String>),
    CloseConnect,
    Kpi(Option<String>),
    Palette(String),
    Run(usize),
    Key(KeyCombo),
    Wait(Duration),
    Toasts,
    Dismiss(String),
    Demo(DemoAction),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> anyhow::Result<Option<CliCommand>> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (trimmed, ""),
    };
    let args = shlex::split(rest)
        .unwrap_or_else(|| rest.split_whitespace().map(|s| s.to_string()).collect());

    let cmd = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => CliCommand::List,
        "search" => CliCommand::Search(args.join(" ")),
        "filter" => parse_filter(&args)?,
        "sort" => match args.first() {
            None => CliCommand::Sort(None),
            Some(key) => match SortKey::parse(key) {
                Some(k) => CliCommand::Sort(Some(k)),
                None => anyhow::bail!("unknown sort key '{key}'"),
            },
        },
        "open" => CliCommand::Open(required(&args, "open <id>")?),
        "handle" => CliCommand::Handle(args.first().cloned()),
        "note" => {
            if rest.is_empty() {
                anyhow::bail!("usage: note <text> | note clear");
            }
            if rest.eq_ignore_ascii_case("clear") {
                CliCommand::ClearNoteDraft
            } else {
                CliCommand::Note(rest.to_string())
            }
        }
        "rmnote" => CliCommand::RemoveNote(required(&args, "rmnote <note id>")?),
        "copy" => CliCommand::Copy,
        "new" => CliCommand::New(rest.to_string()),
        "sync" => CliCommand::Sync,
        "connect" => match args.first().map(|s| s.as_str()) {
            Some("close") => CliCommand::CloseConnect,
            Some(_) => CliCommand::Connect(Some(args.join(" "))),
            None => CliCommand::Connect(None),
        },
        "kpi" => CliCommand::Kpi((!args.is_empty()).then(|| args.join(" "))),
        "palette" | "p" => CliCommand::Palette(rest.to_string()),
        "run" => {
            let n = required(&args, "run <n>")?;
            CliCommand::Run(n.parse()?)
        }
        "key" => {
            let combo = required(&args, "key <combo>")?;
            match parse_combo(&combo) {
                Some(c) => CliCommand::Key(c),
                None => anyhow::bail!("invalid key combo '{combo}'"),
            }
        }
        "wait" => {
            let ms: u64 = required(&args, "wait <ms>")?.parse()?;
            CliCommand::Wait(Duration::from_millis(ms))
        }
        "toasts" => CliCommand::Toasts,
        "dismiss" => CliCommand::Dismiss(required(&args, "dismiss <toast id>")?),
        "demo" => {
            let name = required(&args, "demo <related|rules|privacy>")?;
            match DemoAction::parse(&name) {
                Some(a) => CliCommand::Demo(a),
                None => anyhow::bail!("unknown demo action '{name}'"),
            }
        }
        "help" | "?" => CliCommand::Help,
        "quit" | "exit" | "q" => CliCommand::Quit,
        other => anyhow::bail!("unknown command '{other}' (try help)"),
    };
    Ok(Some(cmd))
}

fn required(args: &[String], usage: &str) -> anyhow::Result<String> {
    match args.first() {
        Some(a) => Ok(a.clone()),
        None => anyhow::bail!("usage: {usage}"),
    }
}

fn parse_filter(args: &[String]) -> anyhow::Result<CliCommand> {
    let kind = args.first().map(|s| s.to_ascii_lowercase());
    let value = args.get(1..).map(|v| v.join(" ")).unwrap_or_default();
    match kind.as_deref() {
        Some("sev") | Some("severity") => match SeverityFilter::parse(&value) {
            Some(f) => Ok(CliCommand::FilterSeverity(f)),
            None => anyhow::bail!("unknown severity '{value}'"),
        },
        Some("type") if !value.is_empty() => Ok(CliCommand::FilterType(TypeFilter::parse(&value))),
        Some("clear") => Ok(CliCommand::ClearFilters),
        _ => anyhow::bail!("usage: filter sev <..> | filter type <..> | filter clear"),
    }
}

/// Holds what a session needs beyond the dashboard itself.
pub struct Session<'a> {
    pub dashboard: Dashboard,
    pub clipboard: &'a mut dyn ClipboardSink,
    last_results: Vec<Action>,
}

/// Whether the loop should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl<'a> Session<'a> {
    pub fn new(dashboard: Dashboard, clipboard: &'a mut dyn ClipboardSink) -> Self {
        Self {
            dashboard,
            clipboard,
            last_results: Vec::new(),
        }
    }

    /// Execute `cmd` and append anything worth printing to `out`.
    pub fn execute(&mut self, cmd: CliCommand, out: &mut String) -> anyhow::Result<Flow> {
        let d = &mut self.dashboard;
        match cmd {
            CliCommand::List => render_dashboard(d, out),
            CliCommand::Search(text) => {
                d.query.search = text;
                render_alerts(d, out);
            }
            CliCommand::FilterSeverity(f) => {
                d.query.severity = f;
                render_alerts(d, out);
            }
            CliCommand::FilterType(f) => {
                d.query.kind = f;
                render_alerts(d, out);
            }
            CliCommand::ClearFilters => {
                d.query.clear_filters();
                render_alerts(d, out);
            }
            CliCommand::Sort(key) => {
                let next = key.unwrap_or(d.query.sort.cycle());
                d.query.sort = next;
                render_alerts(d, out);
            }
            CliCommand::Open(id) => {
                d.open_alert(&id)?;
                render_drawer(d, out);
            }
            CliCommand::Handle(id) => {
                let id = match id {
                    Some(id) => id,
                    None => match d.selected() {
                        Some(a) => a.id.clone(),
                        None => anyhow::bail!("no alert selected"),
                    },
                };
                let status = d.mark_handled(&id)?;
                let _ = writeln!(out, "{id} is now {status}");
            }
            CliCommand::Note(text) => {
                d.note_draft = text;
                match d.save_note_draft() {
                    Some(id) => {
                        let _ = writeln!(out, "note {id} saved");
                    }
                    None => {
                        let _ = writeln!(out, "nothing to save");
                    }
                }
            }
            CliCommand::ClearNoteDraft => d.clear_note_draft(),
            CliCommand::RemoveNote(id) => {
                if !d.remove_note(&id) {
                    anyhow::bail!("note {id} not found on the selected alert");
                }
            }
            CliCommand::Copy => {
                d.copy_alert_summary(&mut *self.clipboard);
            }
            CliCommand::New(args) => {
                let draft = parse_draft(&args);
                let id = d.create_alert(&draft)?;
                let _ = writeln!(out, "created {id}");
            }
            CliCommand::Sync => {
                if !d.run_sync() {
                    let _ = writeln!(out, "sync already running");
                }
            }
            CliCommand::Connect(None) => {
                d.open_connect();
                render_connect(d, out);
            }
            CliCommand::Connect(Some(name)) => {
                let Some(system) = find_system(&name) else {
                    anyhow::bail!("unknown practice system '{name}'");
                };
                d.choose_system(system);
                render_connect(d, out);
            }
            CliCommand::CloseConnect => d.close_connect(),
            CliCommand::Kpi(None) => {
                d.cycle_kpi_mode();
                render_kpis(d, out);
            }
            CliCommand::Kpi(Some(title)) => d.activate_kpi(&title),
            CliCommand::Palette(query) => {
                d.overlays.palette = true;
                self.last_results = d.palette_results(&query);
                for (i, a) in self.last_results.iter().enumerate() {
                    let hint = a.hint.as_deref().map(|h| format!("  [{h}]")).unwrap_or_default();
                    let _ = writeln!(out, "{i:>2}. {}  ({}){hint}", a.label, a.desc);
                }
            }
            CliCommand::Run(n) => {
                let Some(action) = self.last_results.get(n).map(|a| a.action.clone()) else {
                    anyhow::bail!("no palette result {n}");
                };
                d.run_action(&action)?;
            }
            CliCommand::Key(combo) => {
                if !d.handle_hotkey(&combo) {
                    let _ = writeln!(out, "{combo} is not bound");
                }
            }
            CliCommand::Wait(elapsed) => d.tick(elapsed),
            CliCommand::Toasts => render_toasts(d, out),
            CliCommand::Dismiss(id) => {
                if !d.dismiss_toast(&id) {
                    anyhow::bail!("no toast {id}");
                }
            }
            CliCommand::Demo(action) => d.run_demo_action(action),
            CliCommand::Help => {
                let _ = writeln!(out, "{HELP}");
            }
            CliCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

pub fn render_dashboard(d: &Dashboard, out: &mut String) {
    render_kpis(d, out);
    let _ = writeln!(out);
    render_alerts(d, out);
}

pub fn render_kpis(d: &Dashboard, out: &mut String) {
    let _ = writeln!(out, "[{}]", d.kpi_mode.label());
    for k in d.kpis() {
        let _ = writeln!(out, "  {:<22} {:>8}  {}  {}", k.title, k.value, k.sub, k.trend);
    }
}

pub fn render_alerts(d: &Dashboard, out: &mut String) {
    let q = &d.query;
    let _ = writeln!(
        out,
        "search='{}' severity={:?} type={:?} sort={}",
        q.search,
        q.severity,
        q.kind,
        q.sort.label()
    );
    let visible = d.visible_alerts();
    if visible.is_empty() {
        let _ = writeln!(out, "  (no alerts match)");
    }
    let selected = d.selected().map(|a| a.id.as_str());
    for a in visible {
        let marker = if Some(a.id.as_str()) == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {} {:<6} {:<7} {:<14} {:<12} {}",
            a.id,
            a.severity.badge(),
            a.status.to_string(),
            a.kind,
            a.eta,
            a.title
        );
    }
}

pub fn render_drawer(d: &Dashboard, out: &mut String) {
    let Some(alert) = d.selected() else {
        return;
    };
    let _ = writeln!(out, "{}", crate::alerts::summary::alert_summary(alert));
    let notes = d.selected_notes();
    if !notes.is_empty() {
        let _ = writeln!(out, "\nNotes:");
        for n in notes {
            let _ = writeln!(out, "  {} [{}] {}", n.id, n.ts.format("%H:%M"), n.text);
        }
    }
}

pub fn render_connect(d: &Dashboard, out: &mut String) {
    let c = d.connect();
    let name = c.system().map(|s| s.name).unwrap_or("-");
    let _ = writeln!(out, "connect: {name} {}% {}", c.progress(), c.label());
}

pub fn render_toasts(d: &Dashboard, out: &mut String) {
    for t in d.toasts().toasts() {
        let _ = writeln!(out, "  {} ({:?}) {}: {}", t.id, t.tone, t.title, t.message);
    }
}
